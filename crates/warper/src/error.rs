use crate::interpreter::InterpreterError;

/// An error from any stage of the warp pipeline.
#[derive(thiserror::Error, Debug)]
pub enum WarperError {
    /// Reading or writing an image file failed.
    #[error(transparent)]
    Io(#[from] warper_io::IoError),

    /// The image buffer could not be built or flipped.
    #[error(transparent)]
    Image(#[from] warper_image::ImageError),

    /// The accumulated transform could not be applied.
    #[error(transparent)]
    Warp(#[from] warper_imgproc::warp::WarpError),

    /// The command stream did not produce a transform.
    #[error(transparent)]
    Interpreter(#[from] InterpreterError),
}
