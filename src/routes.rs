//! Static path-to-scene mapping.  The set of demos is closed and known at
//! build time, so the table is a plain `const` slice of constructors.

use crate::scene::SceneView;
use crate::scenes::{BaseScene, BombScene, EarthScene, HomeScene, PanoramaScene, SkeletonScene};

/// One entry of the route table.
pub struct Route {
    pub path: &'static str,
    pub title: &'static str,
    constructor: fn() -> Box<dyn SceneView>,
}

impl Route {
    /// Builds a fresh scene for this route.
    pub fn build(&self) -> Box<dyn SceneView> {
        (self.constructor)()
    }
}

pub const ROUTES: &[Route] = &[
    Route {
        path: "/",
        title: "Home",
        constructor: || Box::new(HomeScene::new()),
    },
    Route {
        path: "/base",
        title: "Base",
        constructor: || Box::new(BaseScene::new()),
    },
    Route {
        path: "/skeleton",
        title: "Skeleton",
        constructor: || Box::new(SkeletonScene::new()),
    },
    Route {
        path: "/vr",
        title: "Vr",
        constructor: || Box::new(PanoramaScene::new()),
    },
    Route {
        path: "/earth",
        title: "Earth",
        constructor: || Box::new(EarthScene::new()),
    },
    Route {
        path: "/bomb",
        title: "Bomb",
        constructor: || Box::new(BombScene::new()),
    },
];

/// Looks a path up in the table.  A single trailing slash is tolerated so
/// `/earth/` resolves like `/earth`.
pub fn resolve(path: &str) -> Option<&'static Route> {
    let normalized = if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    };
    ROUTES.iter().find(|route| route.path == normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_resolves_to_itself() {
        for route in ROUTES {
            let found = resolve(route.path).expect("route resolves");
            assert_eq!(found.path, route.path);
        }
    }

    #[test]
    fn paths_are_unique() {
        for (index, route) in ROUTES.iter().enumerate() {
            assert!(ROUTES
                .iter()
                .skip(index + 1)
                .all(|other| other.path != route.path));
        }
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        assert_eq!(resolve("/earth/").unwrap().title, "Earth");
        assert_eq!(resolve("/").unwrap().title, "Home");
    }

    #[test]
    fn unknown_path_is_none() {
        assert!(resolve("/missing").is_none());
    }

    #[test]
    fn routes_build_titled_scenes() {
        for route in ROUTES {
            let scene = route.build();
            assert_eq!(scene.title(), route.title);
            assert!(!scene.meshes().is_empty());
        }
    }
}
