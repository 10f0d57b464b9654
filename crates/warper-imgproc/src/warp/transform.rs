use std::f64::consts::PI;

use warper_linalg::Mat3;

/// Returns the elementary rotation matrix for an angle in degrees.
///
/// | cos  -sin  0 |
/// | sin   cos  0 |
/// |  0     0   1 |
pub fn rotation_matrix(degrees: f64) -> Mat3 {
    let angle = PI * degrees / 180.0;
    let (s, c) = angle.sin_cos();

    Mat3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0)
}

/// Returns the elementary scale matrix `diag(sx, sy, 1)`.
pub fn scale_matrix(sx: f64, sy: f64) -> Mat3 {
    Mat3::new(sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0)
}

/// Returns the elementary translation matrix with `(tx, ty)` in the last column.
pub fn translation_matrix(tx: f64, ty: f64) -> Mat3 {
    Mat3::new(1.0, 0.0, tx, 0.0, 1.0, ty, 0.0, 0.0, 1.0)
}

/// Returns the elementary shear matrix: identity with `hx` at (0, 1) and `hy` at (1, 0).
pub fn shear_matrix(hx: f64, hy: f64) -> Mat3 {
    Mat3::new(1.0, hx, 0.0, hy, 1.0, 0.0, 0.0, 0.0, 1.0)
}

/// Composes a rotation onto the accumulated transform `m`.
///
/// The new transform left-multiplies the accumulator (`R * m`), so it is applied after
/// every previously accumulated transform when mapping a point forward.
///
/// # Example
///
/// ```
/// use warper_imgproc::warp::rotate;
/// use warper_linalg::{Mat3, Vec3};
///
/// let m = rotate(Mat3::IDENTITY, 90.0);
/// let p = m * Vec3::point(1.0, 0.0);
///
/// assert!(p.x.abs() < 1e-12);
/// assert!((p.y - 1.0).abs() < 1e-12);
/// ```
pub fn rotate(m: Mat3, degrees: f64) -> Mat3 {
    rotation_matrix(degrees) * m
}

/// Composes a scale onto the accumulated transform `m`, returning `S * m`.
pub fn scale(m: Mat3, sx: f64, sy: f64) -> Mat3 {
    scale_matrix(sx, sy) * m
}

/// Composes a translation onto the accumulated transform `m`, returning `T * m`.
pub fn translate(m: Mat3, tx: f64, ty: f64) -> Mat3 {
    translation_matrix(tx, ty) * m
}

/// Composes a shear onto the accumulated transform `m`, returning `H * m`.
pub fn shear(m: Mat3, hx: f64, hy: f64) -> Mat3 {
    shear_matrix(hx, hy) * m
}
