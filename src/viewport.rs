//! Keeps camera projections and renderer output buffers in step with the
//! display surface.
//!
//! [`SurfaceSignal`] is the ambient source of surface-size changes.  A
//! [`ViewportAdapter`] registers (camera, renderer) pairs with it; every
//! size notification then updates the camera aspect ratio, recomputes its
//! projection and resizes the renderer, with no further involvement from
//! the scene that owns the pair.  Registrations are explicit handles so a
//! scene teardown never leaks listeners into the next scene's lifetime.

use std::sync::{Arc, Weak};

use log::debug;
use parking_lot::RwLock;
use thiserror::Error;

/// Camera side of an adapter binding: a settable aspect ratio plus a
/// recompute step that folds the new aspect into the projection matrix.
pub trait ProjectionCamera {
    fn aspect(&self) -> f32;
    fn set_aspect(&mut self, aspect: f32);
    fn update_projection(&mut self);
}

/// Renderer side of an adapter binding: an output buffer that can be
/// resized to match the surface.
pub trait RenderTarget {
    fn size(&self) -> (u32, u32);
    fn set_size(&mut self, width: u32, height: u32);
}

/// Non-owning camera reference held by a binding.
pub type WeakCamera = Weak<RwLock<dyn ProjectionCamera>>;
/// Non-owning renderer reference held by a binding.
pub type WeakTarget = Weak<RwLock<dyn RenderTarget>>;

/// Failures of the bind/unbind surface.  The per-notification reaction
/// itself never fails; degenerate sizes are skipped instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdapterError {
    /// The named target was already dropped when `bind` was called.
    #[error("cannot bind: {0} is no longer alive")]
    InvalidTarget(&'static str),
    /// `unbind` was called twice on the same handle.
    #[error("handle was already unbound")]
    AlreadyUnbound,
}

/// Ambient display-surface state: the current size in device-independent
/// pixels and the list of bindings to notify when it changes.
///
/// Delivery is serialized and run-to-completion; each call to
/// [`set_size`](Self::set_size) applies every binding's reaction in
/// registration order before returning.
#[derive(Debug, Default)]
pub struct SurfaceSignal {
    state: RwLock<SignalState>,
}

#[derive(Debug, Default)]
struct SignalState {
    width: u32,
    height: u32,
    next_id: u64,
    bindings: Vec<Binding>,
}

#[derive(Clone)]
struct Binding {
    id: u64,
    camera: WeakCamera,
    renderer: WeakTarget,
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding").field("id", &self.id).finish()
    }
}

impl Binding {
    /// Reaction for a single notification.  A zero height would produce a
    /// non-finite aspect ratio, so the whole update is skipped for that
    /// event and the pair is left untouched.
    fn apply(&self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        let (Some(camera), Some(renderer)) = (self.camera.upgrade(), self.renderer.upgrade())
        else {
            debug!("skipping stale viewport binding {}", self.id);
            return;
        };
        {
            let mut camera = camera.write();
            camera.set_aspect(width as f32 / height as f32);
            camera.update_projection();
        }
        renderer.write().set_size(width, height);
    }
}

impl SurfaceSignal {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            state: RwLock::new(SignalState {
                width,
                height,
                next_id: 0,
                bindings: Vec::new(),
            }),
        }
    }

    /// Current surface size as of the latest notification.
    pub fn size(&self) -> (u32, u32) {
        let state = self.state.read();
        (state.width, state.height)
    }

    /// Records a new surface size and notifies every live binding.
    pub fn set_size(&self, width: u32, height: u32) {
        let snapshot = {
            let mut state = self.state.write();
            state.width = width;
            state.height = height;
            state.bindings.clone()
        };
        for binding in &snapshot {
            binding.apply(width, height);
        }
    }

    /// Redelivers the current size to every live binding.  Callers that
    /// need camera/renderer state consistent immediately after a bind use
    /// this to close the gap, since binding alone forces no update.
    pub fn resync(&self) {
        let (width, height) = self.size();
        self.set_size(width, height);
    }

    fn subscribe(&self, camera: WeakCamera, renderer: WeakTarget) -> u64 {
        let mut state = self.state.write();
        let id = state.next_id;
        state.next_id += 1;
        state.bindings.push(Binding {
            id,
            camera,
            renderer,
        });
        id
    }

    fn unsubscribe(&self, id: u64) {
        self.state.write().bindings.retain(|b| b.id != id);
    }

    #[cfg(test)]
    fn binding_count(&self) -> usize {
        self.state.read().bindings.len()
    }
}

/// Binds (camera, renderer) pairs to a [`SurfaceSignal`].
///
/// Binding the same pair twice yields two independent handles and two
/// update applications per notification; deduplication is the caller's
/// responsibility.
#[derive(Debug, Clone)]
pub struct ViewportAdapter {
    signal: Arc<SurfaceSignal>,
}

impl ViewportAdapter {
    pub fn new(signal: Arc<SurfaceSignal>) -> Self {
        Self { signal }
    }

    /// Registers a pair for size updates.  The references are non-owning;
    /// both must upgrade at bind time or the call fails with
    /// [`AdapterError::InvalidTarget`].  No synchronous update is forced;
    /// see [`SurfaceSignal::resync`] for callers that need one.
    pub fn bind(
        &self,
        camera: WeakCamera,
        renderer: WeakTarget,
    ) -> Result<AdapterHandle, AdapterError> {
        if camera.upgrade().is_none() {
            return Err(AdapterError::InvalidTarget("camera"));
        }
        if renderer.upgrade().is_none() {
            return Err(AdapterError::InvalidTarget("renderer"));
        }
        let id = self.signal.subscribe(camera, renderer);
        Ok(AdapterHandle {
            id,
            signal: Arc::downgrade(&self.signal),
            bound: true,
        })
    }

    /// Removes a registration.  Later notifications no longer touch the
    /// pair.  A second unbind of the same handle fails with
    /// [`AdapterError::AlreadyUnbound`].
    pub fn unbind(&self, handle: &mut AdapterHandle) -> Result<(), AdapterError> {
        handle.release()
    }
}

/// Active registration of one (camera, renderer) pair.
///
/// Dropping a still-bound handle deregisters it, so a scene that simply
/// drops its handle at teardown leaves nothing behind in the signal.
#[derive(Debug)]
pub struct AdapterHandle {
    id: u64,
    signal: Weak<SurfaceSignal>,
    bound: bool,
}

impl AdapterHandle {
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    fn release(&mut self) -> Result<(), AdapterError> {
        if !self.bound {
            return Err(AdapterError::AlreadyUnbound);
        }
        self.bound = false;
        if let Some(signal) = self.signal.upgrade() {
            signal.unsubscribe(self.id);
        }
        Ok(())
    }
}

impl Drop for AdapterHandle {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestCamera {
        aspect: f32,
        recomputes: usize,
    }

    impl TestCamera {
        fn new(aspect: f32) -> Self {
            Self {
                aspect,
                recomputes: 0,
            }
        }
    }

    impl ProjectionCamera for TestCamera {
        fn aspect(&self) -> f32 {
            self.aspect
        }

        fn set_aspect(&mut self, aspect: f32) {
            self.aspect = aspect;
        }

        fn update_projection(&mut self) {
            self.recomputes += 1;
        }
    }

    struct TestTarget {
        size: (u32, u32),
    }

    impl RenderTarget for TestTarget {
        fn size(&self) -> (u32, u32) {
            self.size
        }

        fn set_size(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }
    }

    type Pair = (Arc<RwLock<TestCamera>>, Arc<RwLock<TestTarget>>);

    fn pair() -> Pair {
        (
            Arc::new(RwLock::new(TestCamera::new(1.0))),
            Arc::new(RwLock::new(TestTarget { size: (100, 100) })),
        )
    }

    fn adapter() -> (ViewportAdapter, Arc<SurfaceSignal>) {
        let signal = Arc::new(SurfaceSignal::new(100, 100));
        (ViewportAdapter::new(Arc::clone(&signal)), signal)
    }

    fn bind(adapter: &ViewportAdapter, (camera, target): &Pair) -> AdapterHandle {
        adapter
            .bind(weak_camera(camera), weak_target(target))
            .unwrap()
    }

    fn weak_camera(camera: &Arc<RwLock<TestCamera>>) -> WeakCamera {
        Arc::downgrade(&(Arc::clone(camera) as Arc<RwLock<dyn ProjectionCamera>>))
    }

    fn weak_target(target: &Arc<RwLock<TestTarget>>) -> WeakTarget {
        Arc::downgrade(&(Arc::clone(target) as Arc<RwLock<dyn RenderTarget>>))
    }

    #[test]
    fn resize_updates_camera_and_renderer() {
        let (adapter, signal) = adapter();
        let targets = pair();
        let _handle = bind(&adapter, &targets);

        signal.set_size(800, 600);

        let camera = targets.0.read();
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(camera.recomputes, 1);
        assert_eq!(targets.1.read().size, (800, 600));
    }

    #[test]
    fn zero_height_leaves_pair_untouched() {
        let (adapter, signal) = adapter();
        let targets = pair();
        let _handle = bind(&adapter, &targets);

        signal.set_size(800, 0);

        let camera = targets.0.read();
        assert_eq!(camera.aspect, 1.0);
        assert_eq!(camera.recomputes, 0);
        assert_eq!(targets.1.read().size, (100, 100));
        // The size itself is still recorded as ambient truth.
        assert_eq!(signal.size(), (800, 0));
    }

    #[test]
    fn repeated_notification_is_idempotent() {
        let (adapter, signal) = adapter();
        let targets = pair();
        let _handle = bind(&adapter, &targets);

        signal.set_size(640, 480);
        let once = (targets.0.read().aspect, targets.1.read().size);
        signal.set_size(640, 480);

        assert_eq!(targets.0.read().aspect, once.0);
        assert_eq!(targets.1.read().size, once.1);
    }

    #[test]
    fn unbind_stops_updates() {
        let (adapter, signal) = adapter();
        let targets = pair();
        let mut handle = bind(&adapter, &targets);

        adapter.unbind(&mut handle).unwrap();
        signal.set_size(800, 600);

        assert_eq!(targets.0.read().aspect, 1.0);
        assert_eq!(targets.1.read().size, (100, 100));
        assert!(!handle.is_bound());
    }

    #[test]
    fn double_unbind_fails() {
        let (adapter, _signal) = adapter();
        let targets = pair();
        let mut handle = bind(&adapter, &targets);

        assert_eq!(adapter.unbind(&mut handle), Ok(()));
        assert_eq!(
            adapter.unbind(&mut handle),
            Err(AdapterError::AlreadyUnbound)
        );
    }

    #[test]
    fn dropping_handle_deregisters() {
        let (adapter, signal) = adapter();
        let targets = pair();
        {
            let _handle = bind(&adapter, &targets);
            assert_eq!(signal.binding_count(), 1);
        }
        assert_eq!(signal.binding_count(), 0);

        signal.set_size(800, 600);
        assert_eq!(targets.0.read().aspect, 1.0);
    }

    #[test]
    fn bind_rejects_dead_targets() {
        let (adapter, _signal) = adapter();
        let (camera, target) = pair();

        let dead_camera: WeakCamera = {
            let short_lived = Arc::new(RwLock::new(TestCamera::new(1.0)));
            weak_camera(&short_lived)
        };
        let err = adapter
            .bind(dead_camera, weak_target(&target))
            .unwrap_err();
        assert_eq!(err, AdapterError::InvalidTarget("camera"));

        let dead_target: WeakTarget = {
            let short_lived = Arc::new(RwLock::new(TestTarget { size: (1, 1) }));
            weak_target(&short_lived)
        };
        let err = adapter
            .bind(weak_camera(&camera), dead_target)
            .unwrap_err();
        assert_eq!(err, AdapterError::InvalidTarget("renderer"));
    }

    #[test]
    fn pairs_are_updated_independently() {
        let (adapter, signal) = adapter();
        let first = pair();
        let second = pair();
        let _first_handle = bind(&adapter, &first);
        let _second_handle = bind(&adapter, &second);

        signal.set_size(400, 200);

        for targets in [&first, &second] {
            assert!((targets.0.read().aspect - 2.0).abs() < 1e-6);
            assert_eq!(targets.1.read().size, (400, 200));
        }
    }

    #[test]
    fn double_bind_applies_twice_per_event() {
        let (adapter, signal) = adapter();
        let targets = pair();
        let _first = bind(&adapter, &targets);
        let _second = bind(&adapter, &targets);

        signal.set_size(300, 300);

        assert_eq!(targets.0.read().recomputes, 2);
    }

    #[test]
    fn target_dropped_while_bound_is_skipped() {
        let (adapter, signal) = adapter();
        let (camera, target) = pair();
        let _handle = adapter
            .bind(weak_camera(&camera), weak_target(&target))
            .unwrap();

        drop(target);
        signal.set_size(800, 600);

        assert_eq!(camera.read().aspect, 1.0);
        assert_eq!(camera.read().recomputes, 0);
    }

    #[test]
    fn resync_redelivers_current_size() {
        let (adapter, signal) = adapter();
        signal.set_size(1024, 768);

        let targets = pair();
        let _handle = bind(&adapter, &targets);
        assert_eq!(targets.1.read().size, (100, 100));

        signal.resync();
        assert!((targets.0.read().aspect - 1024.0 / 768.0).abs() < 1e-6);
        assert_eq!(targets.1.read().size, (1024, 768));
    }
}
