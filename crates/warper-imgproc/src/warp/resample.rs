use warper_image::Image;
use warper_linalg::{Mat3, Vec3};

use super::{compute_canvas, CanvasGeometry, WarpError};
use crate::interpolation::nearest_neighbor_interpolation;
use crate::parallel::{self, CancellationToken, ExecutionStrategy};

/// Fills `dst` by inverse mapping every output pixel into `src`.
///
/// Output pixel `(col, row)` becomes the homogeneous point `(col, row, 1) + origin`, is
/// mapped through `inv_m`, normalized by `w` and rounded to the nearest source pixel. Samples
/// that land outside the source leave the output pixel untouched.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C), read only during the pass.
/// * `dst` - The output image with shape (H2, W2, C).
/// * `inv_m` - The inverse of the accumulated transform (output -> source).
/// * `origin` - The canvas origin offset, see [`super::compute_canvas`].
/// * `strategy` - How rows are scheduled.
/// * `cancel` - Optional token to abandon the pass.
pub fn resample_nearest<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    inv_m: &Mat3,
    origin: Vec3,
    strategy: ExecutionStrategy,
    cancel: Option<&CancellationToken>,
) -> Result<(), WarpError> {
    if dst.size().is_empty() || src.size().is_empty() {
        return Ok(());
    }

    let stride = dst.cols() * C;
    let inv_m = *inv_m;

    parallel::par_iter_rows_indexed(
        dst.as_slice_mut(),
        stride,
        strategy,
        cancel,
        |row, dst_row| {
            dst_row
                .chunks_exact_mut(C)
                .enumerate()
                .for_each(|(col, dst_pixel)| {
                    let p = Vec3::point(col as f64, row as f64) + origin;
                    let q = (inv_m * p).normalize();
                    if let Some(src_pixel) = nearest_neighbor_interpolation(src, q.x, q.y) {
                        dst_pixel.copy_from_slice(src_pixel);
                    }
                });
        },
    )?;

    Ok(())
}

/// Warps `src` by the accumulated transform `m` into a freshly sized canvas.
///
/// The matrix is validated first: a non-finite or singular transform is reported instead of
/// resampled. The output starts zero filled, so pixels whose inverse image falls outside the
/// source stay `[0.0; C]`.
///
/// # Returns
///
/// The output image together with the canvas geometry it was sampled with.
///
/// # Errors
///
/// * [`WarpError::NonFiniteTransform`] if `m` contains NaN or infinity.
/// * [`WarpError::SingularTransform`] if `m` has no inverse.
/// * [`WarpError::CanvasTooLarge`] or [`WarpError::Image`] if the canvas cannot be
///   allocated.
/// * [`WarpError::Cancelled`] if the token tripped during the pass.
pub fn warp_to_canvas<const C: usize>(
    src: &Image<f32, C>,
    m: &Mat3,
    strategy: ExecutionStrategy,
    cancel: Option<&CancellationToken>,
) -> Result<(Image<f32, C>, CanvasGeometry), WarpError> {
    if !m.is_finite() {
        return Err(WarpError::NonFiniteTransform);
    }

    let inv_m = m.inverse().ok_or(WarpError::SingularTransform {
        determinant: m.determinant(),
    })?;

    let canvas = compute_canvas(m, src.size())?;
    let mut dst = Image::from_size_val(canvas.size, 0.0f32)?;

    log::debug!("resampling {} into {} ({strategy:?})", src.size(), canvas.size);
    resample_nearest(src, &mut dst, &inv_m, canvas.origin, strategy, cancel)?;

    Ok((dst, canvas))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warp::{rotate, scale, shear, translate};
    use warper_image::{ImageError, ImageSize};

    /// 4 channel test pattern where every pixel encodes its own coordinates.
    fn coords_image(width: usize, height: usize) -> Result<Image<f32, 4>, ImageError> {
        Image::from_fn([width, height].into(), |x, y| {
            [x as f32, y as f32, (x + y * width) as f32, 1.0]
        })
    }

    #[test]
    fn test_identity() -> Result<(), WarpError> {
        let src = coords_image(6, 4)?;
        let (dst, canvas) =
            warp_to_canvas(&src, &Mat3::IDENTITY, ExecutionStrategy::Serial, None)?;
        assert_eq!(canvas.size, src.size());
        assert_eq!(dst, src);
        Ok(())
    }

    #[test]
    fn test_scale_x2_nearest() -> Result<(), WarpError> {
        let src = coords_image(10, 10)?;
        let m = scale(Mat3::IDENTITY, 2.0, 1.0);
        let (dst, _) = warp_to_canvas(&src, &m, ExecutionStrategy::ParallelRows, None)?;

        assert_eq!(dst.size(), ImageSize::from([20, 10]));
        for row in 0..10 {
            for col in 0..19 {
                // col / 2 rounds half away from zero: odd columns take the next source column
                let u = (col as f64 / 2.0).round() as usize;
                assert_eq!(dst.get_pixel(col, row)?, src.get_pixel(u, row)?);
            }
            // 19 / 2 = 9.5 rounds to 10, past the source edge
            assert_eq!(dst.get_pixel(19, row)?, &[0.0; 4]);
        }
        Ok(())
    }

    #[test]
    fn test_translate_both_axes_shifts_content() -> Result<(), WarpError> {
        let src = coords_image(10, 10)?;
        let m = translate(Mat3::IDENTITY, 5.0, 2.0);
        let (dst, canvas) = warp_to_canvas(&src, &m, ExecutionStrategy::Serial, None)?;

        assert_eq!(canvas.size, ImageSize::from([10, 10]));
        for row in 0..10 {
            for col in 0..10 {
                let pixel = dst.get_pixel(col, row)?;
                if col < 5 || row < 2 {
                    assert_eq!(pixel, &[0.0; 4]);
                } else {
                    assert_eq!(pixel, src.get_pixel(col - 5, row - 2)?);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_translate_one_axis_is_compensated() -> Result<(), WarpError> {
        // the zero vertical term pulls the origin to min x, undoing the shift
        let src = coords_image(10, 10)?;
        let m = translate(Mat3::IDENTITY, 5.0, 0.0);
        let (dst, _) = warp_to_canvas(&src, &m, ExecutionStrategy::Serial, None)?;
        assert_eq!(dst, src);
        Ok(())
    }

    #[test]
    fn test_rotate_90() -> Result<(), WarpError> {
        let src = coords_image(4, 3)?;
        let m = rotate(Mat3::IDENTITY, 90.0);
        let (dst, canvas) = warp_to_canvas(&src, &m, ExecutionStrategy::Serial, None)?;
        assert_eq!(canvas.size, ImageSize::from([3, 4]));

        // output (col, row) samples source (row, 3 - col); column 0 falls off the top edge
        for row in 0..4 {
            assert_eq!(dst.get_pixel(0, row)?, &[0.0; 4]);
            for col in 1..3 {
                assert_eq!(dst.get_pixel(col, row)?, src.get_pixel(row, 3 - col)?);
            }
        }
        Ok(())
    }

    #[test]
    fn test_full_turn_matches_source() -> Result<(), WarpError> {
        let src = coords_image(8, 5)?;
        let m = rotate(Mat3::IDENTITY, 360.0);
        let (dst, _) = warp_to_canvas(&src, &m, ExecutionStrategy::Serial, None)?;
        assert_eq!(dst, src);
        Ok(())
    }

    #[test]
    fn test_four_quarter_turns_match_source() -> Result<(), WarpError> {
        let src = coords_image(8, 5)?;
        let m = (0..4).fold(Mat3::IDENTITY, |m, _| rotate(m, 90.0));
        let (dst, canvas) = warp_to_canvas(&src, &m, ExecutionStrategy::Serial, None)?;
        assert_eq!(canvas.size, src.size());
        assert_eq!(dst, src);
        Ok(())
    }

    #[test]
    fn test_huge_scale_is_reported() -> Result<(), ImageError> {
        let src = coords_image(10, 10)?;
        let m = scale(Mat3::IDENTITY, 1e10, 1e10);
        let res = warp_to_canvas(&src, &m, ExecutionStrategy::Serial, None);
        assert_eq!(res, Err(WarpError::CanvasTooLarge(1e11, 1e11)));
        Ok(())
    }

    #[test]
    fn test_strategies_agree() -> Result<(), WarpError> {
        let src = coords_image(16, 9)?;
        let m = shear(rotate(scale(Mat3::IDENTITY, 1.5, 0.75), 30.0), 0.2, 0.1);
        let (serial, _) = warp_to_canvas(&src, &m, ExecutionStrategy::Serial, None)?;
        let (rows, _) = warp_to_canvas(&src, &m, ExecutionStrategy::ParallelRows, None)?;
        let (fixed, _) = warp_to_canvas(&src, &m, ExecutionStrategy::Fixed(3), None)?;
        assert_eq!(serial, rows);
        assert_eq!(serial, fixed);
        Ok(())
    }

    #[test]
    fn test_singular_is_reported() -> Result<(), ImageError> {
        let src = coords_image(4, 4)?;
        let m = scale(Mat3::IDENTITY, 0.0, 1.0);
        let res = warp_to_canvas(&src, &m, ExecutionStrategy::Serial, None);
        assert_eq!(res, Err(WarpError::SingularTransform { determinant: 0.0 }));

        let m = shear(Mat3::IDENTITY, 1.0, 1.0);
        let res = warp_to_canvas(&src, &m, ExecutionStrategy::Serial, None);
        assert!(matches!(res, Err(WarpError::SingularTransform { .. })));
        Ok(())
    }

    #[test]
    fn test_non_finite_is_reported() -> Result<(), ImageError> {
        let src = coords_image(4, 4)?;
        let m = translate(Mat3::IDENTITY, f64::INFINITY, 0.0);
        let res = warp_to_canvas(&src, &m, ExecutionStrategy::Serial, None);
        assert_eq!(res, Err(WarpError::NonFiniteTransform));
        Ok(())
    }

    #[test]
    fn test_cancelled_pass() -> Result<(), ImageError> {
        let src = coords_image(4, 4)?;
        let token = CancellationToken::new();
        token.cancel();
        let res = warp_to_canvas(
            &src,
            &Mat3::IDENTITY,
            ExecutionStrategy::ParallelRows,
            Some(&token),
        );
        assert_eq!(res, Err(WarpError::Cancelled));
        Ok(())
    }

    #[test]
    fn test_empty_canvas() -> Result<(), WarpError> {
        let src = coords_image(10, 10)?;
        let m = scale(Mat3::IDENTITY, 0.05, 0.05);
        let (dst, canvas) = warp_to_canvas(&src, &m, ExecutionStrategy::ParallelRows, None)?;
        assert!(canvas.size.is_empty());
        assert!(dst.as_slice().is_empty());
        Ok(())
    }
}
