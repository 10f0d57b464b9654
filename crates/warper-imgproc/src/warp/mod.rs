//! Geometric image transformations driven by an accumulated homogeneous matrix.
//!
//! This module provides the stages that turn a 3x3 transform into a warped image:
//!
//! - Elementary transform builders (rotation, scale, translation, shear)
//! - Canvas sizing from the transformed corners of the source image
//! - Inverse-mapped nearest neighbor resampling into that canvas
//!
//! # Examples
//!
//! Scaling an image horizontally by two:
//!
//! ```
//! use warper_image::{Image, ImageSize};
//! use warper_imgproc::parallel::ExecutionStrategy;
//! use warper_imgproc::warp::{scale, warp_to_canvas};
//! use warper_linalg::Mat3;
//!
//! let src = Image::<f32, 4>::from_size_val([10, 10].into(), 1.0).unwrap();
//! let m = scale(Mat3::IDENTITY, 2.0, 1.0);
//!
//! let (dst, canvas) = warp_to_canvas(&src, &m, ExecutionStrategy::Serial, None).unwrap();
//! assert_eq!(canvas.size, ImageSize::from([20, 10]));
//! assert_eq!(dst.size(), canvas.size);
//! ```

mod canvas;
mod error;
mod resample;
mod transform;

pub use canvas::{compute_canvas, CanvasGeometry};
pub use error::WarpError;
pub use resample::{resample_nearest, warp_to_canvas};
pub use transform::{
    rotate, rotation_matrix, scale, scale_matrix, shear, shear_matrix, translate,
    translation_matrix,
};
