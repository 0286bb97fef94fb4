//! Geometric utilities shared by the GJK, EPA and MPR engines.

pub use self::ccw_face_normal::ccw_face_normal;
pub use self::point_segment::{project_origin_on_segment, project_point_on_segment};
pub use self::point_triangle::{project_origin_on_triangle, project_point_on_triangle};

mod ccw_face_normal;
mod point_segment;
mod point_triangle;
