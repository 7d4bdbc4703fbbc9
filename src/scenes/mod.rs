//! The demo scenes reachable through the route table.

mod base;
mod bomb;
mod earth;
mod home;
mod panorama;
mod skeleton;

pub use base::BaseScene;
pub use bomb::BombScene;
pub use earth::EarthScene;
pub use home::HomeScene;
pub use panorama::PanoramaScene;
pub use skeleton::SkeletonScene;
