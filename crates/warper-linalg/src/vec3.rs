//! Homogeneous 3-vector (double precision).

use std::ops::{Add, Deref, DerefMut, Div};

/// A homogeneous 2D point `(x, y, w)`.
///
/// This is a newtype wrapper around `glam::DVec3`; the homogeneous component is stored in
/// glam's `z` lane and read back with [`Vec3::w`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[repr(transparent)]
pub struct Vec3(pub glam::DVec3);

impl Vec3 {
    /// Create a new Vec3 from its three homogeneous components.
    #[inline]
    pub const fn new(x: f64, y: f64, w: f64) -> Self {
        Self(glam::DVec3::new(x, y, w))
    }

    /// Euclidean point `(x, y)` lifted to homogeneous coordinates with `w = 1`.
    #[inline]
    pub const fn point(x: f64, y: f64) -> Self {
        Self::new(x, y, 1.0)
    }

    /// Get the homogeneous component.
    #[inline]
    pub fn w(self) -> f64 {
        self.0.z
    }

    /// Divide every component by `w`, giving `(x / w, y / w, 1)`.
    ///
    /// A point at infinity (`w == 0`) yields non-finite components.
    #[inline]
    pub fn normalize(self) -> Self {
        self / self.w()
    }

    /// Returns true if every component is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl Deref for Vec3 {
    type Target = glam::DVec3;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Vec3 {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    #[inline]
    fn add(self, rhs: Vec3) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Div<f64> for Vec3 {
    type Output = Vec3;

    #[inline]
    fn div(self, rhs: f64) -> Self::Output {
        Self(self.0 / rhs)
    }
}
