/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel coordinates ({0}, {1}) are out of bounds ({2}, {3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the number of values of an image does not fit in `usize`.
    #[error("Image size {0} with {1} channels overflows the address space")]
    ImageSizeOverflow(crate::ImageSize, usize),

    /// Error when the pixel buffer cannot be allocated.
    #[error("Failed to allocate {0} values for the image")]
    AllocationFailed(usize),
}
