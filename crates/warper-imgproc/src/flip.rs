use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};
use warper_image::{Image, ImageError};

/// Flip the input image vertically.
///
/// Row `r` of the result is row `H - 1 - r` of the input. The warp pipeline works in a
/// bottom-up frame, so images are flipped once on the way in and once on the way out.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
///
/// # Returns
///
/// The flipped image.
///
/// # Example
///
/// ```
/// use warper_image::{Image, ImageSize};
/// use warper_imgproc::flip::vertical_flip;
///
/// let image = Image::<f32, 1>::new(
///     ImageSize {
///         width: 2,
///         height: 3,
///     },
///     vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
/// )
/// .unwrap();
///
/// let flipped = vertical_flip(&image).unwrap();
///
/// assert_eq!(flipped.as_slice(), &[4.0, 5.0, 2.0, 3.0, 0.0, 1.0]);
/// ```
pub fn vertical_flip<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Send + Sync,
{
    let mut dst = src.clone();
    if src.size().is_empty() {
        return Ok(dst);
    }

    let stride = src.cols() * C;
    let rows = src.rows();
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(r, row)| {
            let src_row = rows - 1 - r;
            row.copy_from_slice(&src_data[src_row * stride..(src_row + 1) * stride]);
        });

    Ok(dst)
}
