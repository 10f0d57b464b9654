use warper_image::Image;

/// Round a fractional source coordinate to the nearest pixel index.
///
/// Rounding is half away from zero (`f64::round`). Returns `None` when the rounded
/// coordinate falls outside `[0, cols) x [0, rows)`; out of range samples are not clamped.
///
/// # Arguments
///
/// * `cols` - The number of columns of the source image.
/// * `rows` - The number of rows of the source image.
/// * `u` - The x coordinate of the sample.
/// * `v` - The y coordinate of the sample.
#[inline]
pub fn nearest_neighbor_index(cols: usize, rows: usize, u: f64, v: f64) -> Option<(usize, usize)> {
    let (iu, iv) = (u.round(), v.round());

    // NaN fails every comparison and is rejected here as well
    if iu >= 0.0 && iv >= 0.0 && iu < cols as f64 && iv < rows as f64 {
        Some((iu as usize, iv as usize))
    } else {
        None
    }
}

/// Kernel for nearest neighbor interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
///
/// # Returns
///
/// The channel values of the nearest pixel, or `None` if it lies outside the image.
pub fn nearest_neighbor_interpolation<const C: usize>(
    image: &Image<f32, C>,
    u: f64,
    v: f64,
) -> Option<&[f32]> {
    let (iu, iv) = nearest_neighbor_index(image.cols(), image.rows(), u, v)?;
    let base = (iv * image.cols() + iu) * C;
    image.as_slice().get(base..base + C)
}

#[cfg(test)]
mod tests {
    use super::*;
    use warper_image::ImageError;

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(nearest_neighbor_index(10, 10, 0.5, 1.5), Some((1, 2)));
        assert_eq!(nearest_neighbor_index(10, 10, 0.49, 2.51), Some((0, 3)));
        // -0.4 rounds to -0 which is still inside
        assert_eq!(nearest_neighbor_index(10, 10, -0.4, 0.0), Some((0, 0)));
        assert_eq!(nearest_neighbor_index(10, 10, -0.5, 0.0), None);
    }

    #[test]
    fn test_out_of_bounds() {
        assert_eq!(nearest_neighbor_index(10, 5, 9.4, 4.4), Some((9, 4)));
        assert_eq!(nearest_neighbor_index(10, 5, 9.5, 0.0), None);
        assert_eq!(nearest_neighbor_index(10, 5, 0.0, 4.5), None);
        assert_eq!(nearest_neighbor_index(10, 5, f64::NAN, 0.0), None);
    }

    #[test]
    fn test_interpolation() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new([2, 2].into(), vec![0.0, 1.0, 2.0, 3.0])?;
        assert_eq!(nearest_neighbor_interpolation(&image, 0.6, 0.2), Some(&[1.0][..]));
        assert_eq!(nearest_neighbor_interpolation(&image, 0.2, 1.4), Some(&[2.0][..]));
        assert_eq!(nearest_neighbor_interpolation(&image, 3.0, 0.0), None);
        Ok(())
    }
}
