//! Building blocks for a small routed 3D demo viewer.
//!
//! The crate's one real contract lives in [`viewport`]: keeping a scene
//! camera and the renderer's output buffer synchronized with the display
//! surface as it changes size.  The route table, the demo scenes and the
//! wgpu renderer are configuration around that core, kept separate so
//! the viewport logic stays testable without a window or a GPU.

pub mod camera;
pub mod geometry;
pub mod render;
pub mod routes;
pub mod scene;
pub mod scenes;
pub mod viewport;

pub use camera::PerspectiveCamera;
pub use geometry::Mesh;
pub use render::{CameraParams, Renderer};
pub use routes::{resolve, Route, ROUTES};
pub use scene::{Light, SceneObject, SceneView};
pub use viewport::{
    AdapterError, AdapterHandle, ProjectionCamera, RenderTarget, SurfaceSignal, ViewportAdapter,
};
