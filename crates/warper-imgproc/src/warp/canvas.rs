use warper_image::ImageSize;
use warper_linalg::{Mat3, Vec3};

use super::WarpError;

/// Extents within this distance of the next integer snap up to it instead of truncating.
const EXTENT_SNAP_EPS: f64 = 1e-9;

/// Output canvas derived from an accumulated transform and the source size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasGeometry {
    /// Size of the output image.
    pub size: ImageSize,
    /// Offset added to every output pixel coordinate before inverse mapping.
    ///
    /// The homogeneous component is zero so adding it keeps `w = 1`.
    pub origin: Vec3,
    /// Minimum `(x, y)` over the transformed corners.
    pub min: (f64, f64),
    /// Maximum `(x, y)` over the transformed corners.
    pub max: (f64, f64),
}

/// Truncate an extent toward zero, absorbing trigonometric noise just below an integer.
///
/// Returns `None` if the extent does not fit the `u32` dimensions image codecs accept.
fn truncate_extent(extent: f64) -> Option<usize> {
    let extent = extent.abs();
    let nearest = extent.round();
    let pixels = if (extent - nearest).abs() <= EXTENT_SNAP_EPS {
        nearest
    } else {
        extent.trunc()
    };

    if pixels <= u32::MAX as f64 {
        usize::try_from(pixels as u32).ok()
    } else {
        None
    }
}

/// Computes the output canvas for warping an image of `src_size` by `m`.
///
/// The four corners `(0, H)`, `(W, H)`, `(0, 0)` and `(W, 0)` of the source, in the
/// bottom-up frame, are mapped through `m` and normalized by `w`. The output size is the
/// truncated extent of their bounding box.
///
/// The origin offset only compensates when a translation term is exactly zero:
///
/// - `m[0][2] == 0` shifts sampled rows by the minimum transformed `y`.
/// - `m[1][2] == 0` shifts sampled columns by the minimum transformed `x`.
///
/// Note the crossed terms: the horizontal translation term gates the vertical offset and
/// vice versa.
///
/// # Errors
///
/// * [`WarpError::DegenerateCanvas`] if a corner maps to a point at infinity.
/// * [`WarpError::CanvasTooLarge`] if a side of the bounding box exceeds `u32::MAX` pixels.
///
/// # Example
///
/// ```
/// use warper_image::ImageSize;
/// use warper_imgproc::warp::{compute_canvas, rotate};
/// use warper_linalg::Mat3;
///
/// let m = rotate(Mat3::IDENTITY, 90.0);
/// let canvas = compute_canvas(&m, [4, 2].into()).unwrap();
///
/// assert_eq!(canvas.size, ImageSize::from([2, 4]));
/// ```
pub fn compute_canvas(m: &Mat3, src_size: ImageSize) -> Result<CanvasGeometry, WarpError> {
    let (w, h) = (src_size.width as f64, src_size.height as f64);

    let corners = [
        Vec3::point(0.0, h),
        Vec3::point(w, h),
        Vec3::point(0.0, 0.0),
        Vec3::point(w, 0.0),
    ]
    .map(|c| (*m * c).normalize());

    if let Some(c) = corners.iter().find(|c| !c.is_finite()) {
        return Err(WarpError::DegenerateCanvas(c.x, c.y));
    }

    let (min_x, max_x, min_y, max_y) = corners.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(min_x, max_x, min_y, max_y), c| {
            (min_x.min(c.x), max_x.max(c.x), min_y.min(c.y), max_y.max(c.y))
        },
    );

    let (extent_x, extent_y) = (max_x - min_x, max_y - min_y);
    let (Some(width), Some(height)) = (truncate_extent(extent_x), truncate_extent(extent_y))
    else {
        return Err(WarpError::CanvasTooLarge(extent_x, extent_y));
    };
    let size = ImageSize { width, height };

    let mut origin = Vec3::new(0.0, 0.0, 0.0);
    if m[(0, 2)] == 0.0 {
        origin.y = min_y;
    }
    if m[(1, 2)] == 0.0 {
        origin.x = min_x;
    }

    log::debug!(
        "canvas {size} spans x [{min_x}, {max_x}] y [{min_y}, {max_y}], origin ({}, {})",
        origin.x,
        origin.y
    );

    Ok(CanvasGeometry {
        size,
        origin,
        min: (min_x, min_y),
        max: (max_x, max_y),
    })
}
