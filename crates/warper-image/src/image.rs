use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use warper_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Returns true if the size covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

impl From<ImageSize> for [u32; 2] {
    fn from(size: ImageSize) -> Self {
        [size.width as u32, size.height as u32]
    }
}

/// Represents an image with pixel data.
///
/// The pixels live in a single contiguous buffer laid out row-major as (H, W, C):
/// the channel values of pixel `(x, y)` start at `(y * W + x) * C`.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

/// Number of values a buffer of `size` with `channels` per pixel holds.
fn buffer_len(size: ImageSize, channels: usize) -> Result<usize, ImageError> {
    size.width
        .checked_mul(size.height)
        .and_then(|n| n.checked_mul(channels))
        .ok_or(ImageError::ImageSizeOverflow(size, channels))
}

/// Allocate room for `len` values, reporting failure instead of aborting.
fn try_alloc<T>(len: usize) -> Result<Vec<T>, ImageError> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| ImageError::AllocationFailed(len))?;
    Ok(data)
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, or the size overflows
    /// `usize`, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use warper_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        // check if the data length matches the image size
        let expected = buffer_len(size, CHANNELS)?;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and default pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `val` - The value every channel of every pixel starts with.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::ImageSizeOverflow`] or [`ImageError::AllocationFailed`] if the
    /// buffer cannot be sized or allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use warper_image::{Image, ImageSize};
    ///
    /// let image = Image::<f32, 4>::from_size_val(
    ///   ImageSize {
    ///     width: 10,
    ///     height: 20,
    ///   }, 0.0).unwrap();
    ///
    /// assert_eq!(image.as_slice().len(), 10 * 20 * 4);
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let len = buffer_len(size, CHANNELS)?;
        let mut data = try_alloc(len)?;
        data.resize(len, val);
        Image::new(size, data)
    }

    /// Create a new image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(
        size: ImageSize,
        mut f: impl FnMut(usize, usize) -> [T; CHANNELS],
    ) -> Result<Self, ImageError>
    where
        T: Copy,
    {
        let mut data = try_alloc(buffer_len(size, CHANNELS)?)?;
        for y in 0..size.height {
            for x in 0..size.width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Image::new(size, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Get the pixel data as a flat slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a flat mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.size.width + x) * CHANNELS
    }

    /// Get the channel values of the pixel at column `x` and row `y`.
    ///
    /// # Errors
    ///
    /// If the coordinates fall outside the image, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use warper_image::{Image, ImageSize};
    ///
    /// let image = Image::<f32, 2>::new(
    ///     ImageSize { width: 2, height: 1 },
    ///     vec![0.0, 1.0, 2.0, 3.0],
    /// ).unwrap();
    ///
    /// assert_eq!(image.get_pixel(1, 0).unwrap(), &[2.0, 3.0]);
    /// assert!(image.get_pixel(2, 0).is_err());
    /// ```
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<&[T], ImageError> {
        if x >= self.cols() || y >= self.rows() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.cols(),
                self.rows(),
            ));
        }
        let base = self.offset(x, y);
        Ok(&self.data[base..base + CHANNELS])
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, ImageSize};
    use crate::ImageError;

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert!(!image_size.is_empty());
        assert!(ImageSize::from([0, 3]).is_empty());
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.as_slice().len(), 10 * 20 * 3);

        Ok(())
    }

    #[test]
    fn image_wrong_length() {
        let res = Image::<f32, 4>::new([2, 2].into(), vec![0.0; 15]);
        assert_eq!(res, Err(ImageError::InvalidChannelShape(15, 16)));
    }

    #[test]
    fn image_empty() -> Result<(), ImageError> {
        let image = Image::<f32, 4>::from_size_val([0, 0].into(), 0.0)?;
        assert!(image.as_slice().is_empty());
        Ok(())
    }

    #[test]
    fn image_pixel_access() -> Result<(), ImageError> {
        let image = Image::<f32, 4>::from_fn([3, 2].into(), |x, y| {
            [x as f32, y as f32, 0.0, 1.0]
        })?;

        assert_eq!(image.get_pixel(2, 1)?, &[2.0, 1.0, 0.0, 1.0]);
        assert_eq!(
            image.get_pixel(3, 0),
            Err(ImageError::PixelIndexOutOfBounds(3, 0, 3, 2))
        );
        assert_eq!(image.get_pixel(0, 1)?, &[0.0, 1.0, 0.0, 1.0]);

        Ok(())
    }

    #[test]
    fn image_size_overflow() {
        let size = ImageSize {
            width: usize::MAX / 2,
            height: 3,
        };
        assert_eq!(
            Image::<f32, 4>::from_size_val(size, 0.0),
            Err(ImageError::ImageSizeOverflow(size, 4))
        );
        assert_eq!(
            Image::<f32, 1>::new(size, vec![]),
            Err(ImageError::ImageSizeOverflow(size, 1))
        );
        let res = Image::<f32, 4>::from_fn(size, |_, _| [0.0; 4]);
        assert!(matches!(res, Err(ImageError::ImageSizeOverflow(_, 4))));
    }
}
