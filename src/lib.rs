/*!
mink3d
========

**mink3d** is a 3-dimensional narrow-phase collision detection library
for convex shapes described only by their support mappings. It computes
boolean intersection tests, separation distances with witness points,
and penetration depths with the GJK, EPA, and MPR algorithms.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]

#[macro_use]
extern crate approx;

pub extern crate nalgebra as na;

pub mod math;
pub mod query;
pub mod shape;
pub mod utils;
