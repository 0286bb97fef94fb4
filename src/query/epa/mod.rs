//! The Expanding Polytope Algorithm.

pub use self::epa3::EPA;

mod epa3;
