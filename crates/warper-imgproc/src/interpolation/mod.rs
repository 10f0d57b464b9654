//! Pixel interpolation for inverse-mapped resampling.
//!
//! Only nearest neighbor sampling is provided: a fractional source coordinate selects the
//! single closest source pixel, with no blending between neighbors.

mod nearest;

pub use nearest::{nearest_neighbor_index, nearest_neighbor_interpolation};
