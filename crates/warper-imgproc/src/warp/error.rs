use warper_image::ImageError;

use crate::parallel::ParallelError;

/// An error type for the warp module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WarpError {
    /// The accumulated transform contains NaN or infinite entries.
    #[error("accumulated transform is not finite")]
    NonFiniteTransform,

    /// The accumulated transform cannot be inverted.
    #[error("singular accumulated transform (determinant {determinant:e}), inverse resampling undefined")]
    SingularTransform {
        /// Determinant of the rejected matrix.
        determinant: f64,
    },

    /// A source corner maps to a point at infinity.
    #[error("transformed corner ({0}, {1}) is not finite")]
    DegenerateCanvas(f64, f64),

    /// The bounding box of the transformed image is too large to allocate or encode.
    #[error("canvas of {0} x {1} pixels is too large")]
    CanvasTooLarge(f64, f64),

    /// The resampling pass was cancelled.
    #[error("resampling was cancelled")]
    Cancelled,

    /// Error from the parallel executor.
    #[error(transparent)]
    Parallel(ParallelError),

    /// Error creating the output image.
    #[error("failed to create the output image. {0}")]
    Image(#[from] ImageError),
}

impl From<ParallelError> for WarpError {
    fn from(e: ParallelError) -> Self {
        match e {
            ParallelError::Cancelled => WarpError::Cancelled,
            e => WarpError::Parallel(e),
        }
    }
}
