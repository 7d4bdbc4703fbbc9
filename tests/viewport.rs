use std::sync::Arc;

use parking_lot::RwLock;
use scene_viewer::{
    PerspectiveCamera, ProjectionCamera, RenderTarget, SurfaceSignal, ViewportAdapter,
};

struct RecordingTarget {
    size: (u32, u32),
}

impl RenderTarget for RecordingTarget {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }
}

fn setup() -> (
    ViewportAdapter,
    Arc<SurfaceSignal>,
    Arc<RwLock<PerspectiveCamera>>,
    Arc<RwLock<RecordingTarget>>,
) {
    let signal = Arc::new(SurfaceSignal::new(100, 100));
    let adapter = ViewportAdapter::new(Arc::clone(&signal));
    let camera = Arc::new(RwLock::new(PerspectiveCamera::new(60.0, 1.0)));
    let target = Arc::new(RwLock::new(RecordingTarget { size: (100, 100) }));
    (adapter, signal, camera, target)
}

#[test]
fn surface_change_keeps_camera_and_target_in_step() {
    let (adapter, signal, camera, target) = setup();
    let _handle = adapter
        .bind(
            Arc::downgrade(&(Arc::clone(&camera) as Arc<RwLock<dyn ProjectionCamera>>)),
            Arc::downgrade(&(Arc::clone(&target) as Arc<RwLock<dyn RenderTarget>>)),
        )
        .unwrap();

    let before = camera.read().projection();
    signal.set_size(800, 600);

    let camera = camera.read();
    assert!((camera.aspect() - 800.0 / 600.0).abs() < 1e-6);
    assert_ne!(camera.projection(), before);
    assert_eq!(target.read().size(), (800, 600));
}

#[test]
fn degenerate_surface_is_ignored_end_to_end() {
    let (adapter, signal, camera, target) = setup();
    let _handle = adapter
        .bind(
            Arc::downgrade(&(Arc::clone(&camera) as Arc<RwLock<dyn ProjectionCamera>>)),
            Arc::downgrade(&(Arc::clone(&target) as Arc<RwLock<dyn RenderTarget>>)),
        )
        .unwrap();

    let before = camera.read().projection();
    signal.set_size(800, 0);

    assert_eq!(camera.read().aspect(), 1.0);
    assert_eq!(camera.read().projection(), before);
    assert_eq!(target.read().size(), (100, 100));
}

#[test]
fn resync_closes_setup_drift_window() {
    let (adapter, signal, camera, target) = setup();
    // Surface changed after the camera was configured but before binding.
    signal.set_size(1920, 1080);

    let _handle = adapter
        .bind(
            Arc::downgrade(&(Arc::clone(&camera) as Arc<RwLock<dyn ProjectionCamera>>)),
            Arc::downgrade(&(Arc::clone(&target) as Arc<RwLock<dyn RenderTarget>>)),
        )
        .unwrap();
    assert_eq!(camera.read().aspect(), 1.0);

    signal.resync();
    assert!((camera.read().aspect() - 1920.0 / 1080.0).abs() < 1e-6);
    assert_eq!(target.read().size(), (1920, 1080));
}

#[test]
fn scene_teardown_by_drop_detaches_the_pair() {
    let (adapter, signal, camera, target) = setup();
    let handle = adapter
        .bind(
            Arc::downgrade(&(Arc::clone(&camera) as Arc<RwLock<dyn ProjectionCamera>>)),
            Arc::downgrade(&(Arc::clone(&target) as Arc<RwLock<dyn RenderTarget>>)),
        )
        .unwrap();
    drop(handle);

    signal.set_size(640, 360);
    assert_eq!(camera.read().aspect(), 1.0);
    assert_eq!(target.read().size(), (100, 100));
}

#[test]
fn two_scenes_track_the_same_surface() {
    let (adapter, signal, camera, target) = setup();
    let other_camera = Arc::new(RwLock::new(PerspectiveCamera::new(45.0, 2.0)));
    let other_target = Arc::new(RwLock::new(RecordingTarget { size: (10, 10) }));

    let _first = adapter
        .bind(
            Arc::downgrade(&(Arc::clone(&camera) as Arc<RwLock<dyn ProjectionCamera>>)),
            Arc::downgrade(&(Arc::clone(&target) as Arc<RwLock<dyn RenderTarget>>)),
        )
        .unwrap();
    let _second = adapter
        .bind(
            Arc::downgrade(&(Arc::clone(&other_camera) as Arc<RwLock<dyn ProjectionCamera>>)),
            Arc::downgrade(&(Arc::clone(&other_target) as Arc<RwLock<dyn RenderTarget>>)),
        )
        .unwrap();

    signal.set_size(500, 250);

    assert!((camera.read().aspect() - 2.0).abs() < 1e-6);
    assert!((other_camera.read().aspect() - 2.0).abs() < 1e-6);
    assert_eq!(target.read().size(), (500, 250));
    assert_eq!(other_target.read().size(), (500, 250));
}
