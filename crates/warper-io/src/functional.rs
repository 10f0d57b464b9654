use std::path::Path;

use image::{DynamicImage, ImageFormat, ImageReader, Rgba32FImage};
use warper_image::{Image, ImageSize};

use crate::error::IoError;

/// Reads an image from the given file path as float RGBA.
///
/// The method accepts any format supported by the image crate, detected from the file
/// content. Color channels are converted to `f32` in `[0, 1]` and alpha is set to `1.0` for
/// every pixel, regardless of the channel count of the file.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// A four channel image with rows in file order (top row first).
pub fn read_image_rgba32f(file_path: impl AsRef<Path>) -> Result<Image<f32, 4>, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path));
    }

    let img = ImageReader::open(&file_path)?
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    log::debug!(
        "decoded {} as {:?} ({size})",
        file_path.display(),
        img.color()
    );

    let rgb = img.into_rgb32f().into_raw();
    let mut data = Vec::with_capacity(size.width * size.height * 4);
    for px in rgb.chunks_exact(3) {
        data.extend_from_slice(&[px[0], px[1], px[2], 1.0]);
    }

    Ok(Image::new(size, data)?)
}

/// Writes a float RGBA image to the given file path.
///
/// The format is picked from the file extension. OpenEXR keeps the float channels, JPEG
/// drops alpha and stores 8-bit RGB, Radiance HDR stores float RGB and every other format
/// stores 8-bit RGBA with channels clamped to `[0, 1]`.
///
/// # Arguments
///
/// * `file_path` - The path of the file to create.
/// * `image` - The image with rows in file order (top row first).
pub fn write_image_rgba32f(
    file_path: impl AsRef<Path>,
    image: &Image<f32, 4>,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();

    let format = ImageFormat::from_path(file_path)
        .map_err(|_| IoError::InvalidFileExtension(file_path.to_path_buf()))?;

    if image.size().is_empty() {
        return Err(IoError::EmptyImage(file_path.to_path_buf()));
    }

    let [width, height]: [u32; 2] = image.size().into();
    let buf = Rgba32FImage::from_raw(width, height, image.as_slice().to_vec()).ok_or(
        warper_image::ImageError::InvalidChannelShape(
            image.as_slice().len(),
            width as usize * height as usize * 4,
        ),
    )?;
    let img = DynamicImage::ImageRgba32F(buf);

    let img = match format {
        ImageFormat::OpenExr => img,
        ImageFormat::Hdr => DynamicImage::ImageRgb32F(img.to_rgb32f()),
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
        _ => DynamicImage::ImageRgba8(img.to_rgba8()),
    };

    log::debug!("encoding {} as {format:?}", file_path.display());
    img.save_with_format(file_path, format)?;

    Ok(())
}
