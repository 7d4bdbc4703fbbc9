use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use log::info;
use parking_lot::RwLock;
use pollster::block_on;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowBuilder};

use scene_viewer::render::CameraParams;
use scene_viewer::routes::{resolve, Route, ROUTES};
use scene_viewer::scene::SceneView;
use scene_viewer::viewport::{
    AdapterHandle, ProjectionCamera, RenderTarget, SurfaceSignal, ViewportAdapter,
};
use scene_viewer::{PerspectiveCamera, Renderer};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;

    if options.list_routes {
        println!("Available routes:");
        for route in ROUTES {
            println!("  {:<12} {}", route.path, route.title);
        }
        return Ok(());
    }

    let route = resolve(&options.route).ok_or_else(|| {
        let known: Vec<&str> = ROUTES.iter().map(|route| route.path).collect();
        anyhow!(
            "Unknown route: {}. Known routes: {}",
            options.route,
            known.join(", ")
        )
    })?;

    if options.summary_only {
        return run_headless(route, options.frames);
    }

    match run_interactive(route) {
        Ok(()) => Ok(()),
        Err(err) => {
            if err.downcast_ref::<WindowInitError>().is_some() {
                eprintln!(
                    "{err}. Falling back to --summary-only mode (set DISPLAY or install window-system libs to enable rendering)."
                );
                run_headless(route, options.frames)
            } else {
                Err(err)
            }
        }
    }
}

/// Steps the scene without a window and prints the final object states.
fn run_headless(route: &Route, frames: u32) -> Result<()> {
    let mut scene = route.build();
    println!("Mounted {} ({})", route.title, route.path);
    println!("Scene provides {} mesh(es)", scene.meshes().len());

    let dt = 1.0 / 60.0;
    for _ in 0..frames {
        scene.update(dt);
    }
    print_final_state(scene.as_ref());
    Ok(())
}

fn run_interactive(route: &Route) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|err| WindowInitError::new("event loop", err))?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Scene Viewer")
            .with_inner_size(LogicalSize::new(1280.0, 720.0))
            .build(&event_loop)
            .map_err(|err| WindowInitError::new("window", err))?,
    );

    let renderer = Arc::new(RwLock::new(block_on(Renderer::new(Arc::clone(&window)))?));
    let size = window.inner_size();
    let signal = Arc::new(SurfaceSignal::new(size.width, size.height));
    let adapter = ViewportAdapter::new(Arc::clone(&signal));

    let mut shell = Shell::new(window, renderer, signal, adapter, route)?;

    event_loop.run(|event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);
        shell.process_event(&event, elwt);
    })?;

    if let Some(err) = shell.last_error.take() {
        return Err(err);
    }
    Ok(())
}

/// Everything mounted for the active route.
struct Mounted {
    scene: Box<dyn SceneView>,
    camera: Arc<RwLock<PerspectiveCamera>>,
    binding: AdapterHandle,
}

struct Shell {
    window: Arc<Window>,
    renderer: Arc<RwLock<Renderer>>,
    signal: Arc<SurfaceSignal>,
    adapter: ViewportAdapter,
    mounted: Mounted,
    last_frame: Instant,
    last_error: Option<anyhow::Error>,
}

impl Shell {
    fn new(
        window: Arc<Window>,
        renderer: Arc<RwLock<Renderer>>,
        signal: Arc<SurfaceSignal>,
        adapter: ViewportAdapter,
        route: &Route,
    ) -> Result<Self> {
        let mounted = mount(&adapter, &signal, &renderer, route)?;
        window.set_title(&format!("Scene Viewer - {}", route.title));
        Ok(Self {
            window,
            renderer,
            signal,
            adapter,
            mounted,
            last_frame: Instant::now(),
            last_error: None,
        })
    }

    fn process_event(&mut self, event: &Event<()>, elwt: &EventLoopWindowTarget<()>) {
        match event {
            Event::WindowEvent { window_id, event } if *window_id == self.window.id() => {
                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(size) => {
                        self.signal.set_size(size.width, size.height);
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if self.handle_key(event) {
                            elwt.exit();
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        if let Err(err) = self.redraw() {
                            self.last_error = Some(err);
                            elwt.exit();
                        }
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => self.window.request_redraw(),
            _ => {}
        }
    }

    /// Returns true when the shell should exit.
    fn handle_key(&mut self, event: &KeyEvent) -> bool {
        if event.state != ElementState::Pressed || event.repeat {
            return false;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return false;
        };
        if code == KeyCode::Escape {
            return true;
        }
        if let Some(index) = digit_index(code) {
            if let Some(route) = ROUTES.get(index) {
                if let Err(err) = self.switch(route) {
                    self.last_error = Some(err);
                    return true;
                }
            }
        }
        false
    }

    /// Tears the current scene down and mounts the given route.
    fn switch(&mut self, route: &Route) -> Result<()> {
        let mut previous = std::mem::replace(
            &mut self.mounted,
            mount(&self.adapter, &self.signal, &self.renderer, route)?,
        );
        self.adapter.unbind(&mut previous.binding)?;
        self.window
            .set_title(&format!("Scene Viewer - {}", route.title));
        Ok(())
    }

    fn redraw(&mut self) -> Result<()> {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;

        self.mounted.scene.update(dt);
        let objects = self.mounted.scene.objects();
        let light = self.mounted.scene.light();
        let camera = {
            let camera = self.mounted.camera.read();
            CameraParams {
                view_proj: camera.view_projection(),
                position: camera.position,
            }
        };

        let mut renderer = self.renderer.write();
        renderer.update_globals(&camera, &light);
        match renderer.render(&objects) {
            Ok(()) => Ok(()),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = self.window.inner_size();
                drop(renderer);
                self.signal.set_size(size.width, size.height);
                Ok(())
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Err(anyhow!("GPU is out of memory")),
            Err(err) => {
                info!("surface error: {err}; retrying next frame");
                Ok(())
            }
        }
    }
}

/// Builds a route's scene, hands its meshes to the renderer and binds the
/// fresh camera to the viewport signal.  `resync` closes the window
/// between camera construction and binding, since `bind` itself forces no
/// update.
fn mount(
    adapter: &ViewportAdapter,
    signal: &SurfaceSignal,
    renderer: &Arc<RwLock<Renderer>>,
    route: &Route,
) -> Result<Mounted> {
    let scene = route.build();
    let (width, height) = signal.size();
    let aspect = if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    };
    let camera = Arc::new(RwLock::new(scene.camera(aspect)));
    renderer.write().register_meshes(scene.meshes());

    let camera_dyn: Arc<RwLock<dyn ProjectionCamera>> = Arc::clone(&camera) as _;
    let renderer_dyn: Arc<RwLock<dyn RenderTarget>> = Arc::clone(renderer) as _;
    let binding = adapter.bind(Arc::downgrade(&camera_dyn), Arc::downgrade(&renderer_dyn))?;
    signal.resync();
    info!("mounted route {} ({})", route.path, route.title);

    Ok(Mounted {
        scene,
        camera,
        binding,
    })
}

fn digit_index(code: KeyCode) -> Option<usize> {
    Some(match code {
        KeyCode::Digit1 => 0,
        KeyCode::Digit2 => 1,
        KeyCode::Digit3 => 2,
        KeyCode::Digit4 => 3,
        KeyCode::Digit5 => 4,
        KeyCode::Digit6 => 5,
        KeyCode::Digit7 => 6,
        KeyCode::Digit8 => 7,
        KeyCode::Digit9 => 8,
        _ => return None,
    })
}

fn print_final_state(scene: &dyn SceneView) {
    println!("Final object states:");
    for object in scene.objects() {
        println!(
            " - {} pos=({:.2}, {:.2}, {:.2}) color=({:.2}, {:.2}, {:.2})",
            object.name,
            object.position.x,
            object.position.y,
            object.position.z,
            object.color.x,
            object.color.y,
            object.color.z
        );
    }
}

#[derive(Debug)]
struct WindowInitError {
    message: String,
}

impl WindowInitError {
    fn new(stage: &str, err: impl fmt::Display) -> Self {
        Self {
            message: format!("failed to initialize {stage}: {err}"),
        }
    }
}

impl fmt::Display for WindowInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for WindowInitError {}

struct CliOptions {
    route: String,
    list_routes: bool,
    summary_only: bool,
    frames: u32,
}

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut route = None;
        let mut list_routes = false;
        let mut summary_only = false;
        let mut frames = 120;

        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--list-routes" => list_routes = true,
                "--summary-only" => summary_only = true,
                "--frames" => {
                    frames = args
                        .next()
                        .ok_or_else(|| anyhow!("--frames expects a value"))?
                        .parse()
                        .context("--frames expects an integer")?;
                }
                other if other.starts_with('-') => {
                    return Err(anyhow!(
                        "Unknown flag: {other}. Usage: scene-viewer [route] [--list-routes] [--summary-only] [--frames N]"
                    ));
                }
                other => {
                    if route.is_some() {
                        return Err(anyhow!("Only one route may be given, got {other} too"));
                    }
                    route = Some(other.to_string());
                }
            }
        }

        Ok(Self {
            route: route.unwrap_or_else(|| "/".to_string()),
            list_routes,
            summary_only,
            frames,
        })
    }
}
