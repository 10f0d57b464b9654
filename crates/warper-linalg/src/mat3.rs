//! 3x3 matrix (double precision).

use std::fmt;
use std::ops::{Deref, Index, IndexMut, Mul};

use crate::vec3::Vec3;

/// Relative singularity threshold for [`Mat3::inverse`].
///
/// The determinant is compared against the product of the row lengths, which bounds it
/// from above (Hadamard's inequality). The ratio is one for orthogonal rows and zero for a
/// singular matrix, and does not change when a row is scaled.
pub const SINGULAR_EPS: f64 = 1e-12;

/// 3x3 matrix (double precision) acting on homogeneous column vectors.
///
/// This is a newtype wrapper around `glam::DMat3`. glam stores columns; the constructors
/// and `m[(row, col)]` indexing here take row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(transparent)]
pub struct Mat3(pub glam::DMat3);

impl Mat3 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self(glam::DMat3::IDENTITY);

    /// Create a new Mat3 from its nine entries in row-major order.
    #[allow(clippy::too_many_arguments)]
    #[rustfmt::skip]
    pub const fn new(
        m00: f64, m01: f64, m02: f64,
        m10: f64, m11: f64, m12: f64,
        m20: f64, m21: f64, m22: f64,
    ) -> Self {
        Self(glam::DMat3::from_cols(
            glam::DVec3::new(m00, m10, m20),
            glam::DVec3::new(m01, m11, m21),
            glam::DVec3::new(m02, m12, m22),
        ))
    }

    /// The rows of the matrix.
    #[inline]
    pub fn to_rows(&self) -> [[f64; 3]; 3] {
        self.0.transpose().to_cols_array_2d()
    }

    /// Determinant of the matrix.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.0.determinant()
    }

    /// Closed-form inverse.
    ///
    /// Returns `None` if the matrix is not finite or singular, that is when
    /// `|det| <= SINGULAR_EPS * |r0| * |r1| * |r2|` for the rows `r0`, `r1` and `r2`. A
    /// uniform downscale keeps its inverse however small the factor.
    ///
    /// # Example
    ///
    /// ```
    /// use warper_linalg::Mat3;
    ///
    /// let m = Mat3::new(1.0, 0.0, -1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0);
    /// let expected = Mat3::new(1.0, 0.0, 1.0, 0.0, 1.0, -1.0, 0.0, 0.0, 1.0);
    /// assert_eq!(m.inverse(), Some(expected));
    ///
    /// let flat = Mat3::new(1.0, 2.0, 0.0, 2.0, 4.0, 0.0, 0.0, 0.0, 1.0);
    /// assert_eq!(flat.inverse(), None);
    /// ```
    pub fn inverse(&self) -> Option<Mat3> {
        if !self.is_finite() {
            return None;
        }

        let det = self.determinant();
        let bound: f64 = (0..3).map(|i| self.row(i).length()).product();
        if !det.is_finite() || det.abs() <= SINGULAR_EPS * bound {
            return None;
        }

        Some(Self(self.0.inverse()))
    }

    /// Returns true if every entry is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Deref for Mat3 {
    type Target = glam::DMat3;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Index<(usize, usize)> for Mat3 {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        let column = match col {
            0 => &self.0.x_axis,
            1 => &self.0.y_axis,
            2 => &self.0.z_axis,
            _ => panic!("column index out of bounds: {col}"),
        };
        match row {
            0 => &column.x,
            1 => &column.y,
            2 => &column.z,
            _ => panic!("row index out of bounds: {row}"),
        }
    }
}

impl IndexMut<(usize, usize)> for Mat3 {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        let column = match col {
            0 => &mut self.0.x_axis,
            1 => &mut self.0.y_axis,
            2 => &mut self.0.z_axis,
            _ => panic!("column index out of bounds: {col}"),
        };
        match row {
            0 => &mut column.x,
            1 => &mut column.y,
            2 => &mut column.z,
            _ => panic!("row index out of bounds: {row}"),
        }
    }
}

// Matrix-matrix multiplication
impl Mul<Mat3> for Mat3 {
    type Output = Mat3;

    #[inline]
    fn mul(self, rhs: Mat3) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

// Matrix-vector multiplication
impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        Vec3(self.0 * rhs.0)
    }
}

impl fmt::Display for Mat3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..3 {
            if i > 0 {
                writeln!(f)?;
            }
            let row = self.row(i);
            write!(f, "[{:>10.4} {:>10.4} {:>10.4} ]", row.x, row.y, row.z)?;
        }
        Ok(())
    }
}
