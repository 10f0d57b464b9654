#![deny(missing_docs)]
//! Homogeneous 3x3 matrix and 3-vector types for 2D projective transforms.
//!
//! Points are column vectors `(x, y, w)` and transforms act on the left:
//! `p' = M * p`.

mod mat3;
mod vec3;

pub use mat3::{Mat3, SINGULAR_EPS};
pub use vec3::Vec3;
