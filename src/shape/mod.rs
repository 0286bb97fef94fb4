//! Support mapping based shapes usable with the collision queries.

pub use self::ball::Ball;
pub use self::convex_polyhedron::ConvexPolyhedron;
pub use self::cuboid::Cuboid;
pub use self::support_map::SupportMap;

mod ball;
mod convex_polyhedron;
mod cuboid;
mod support_map;
