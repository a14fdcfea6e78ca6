//! Pinhole camera intrinsics.
//!
//! Intrinsics always have the canonical structure
//! `[[fx, 0, cx], [0, fy, cy], [0, 0, 1]]`, so only the four free parameters
//! are stored. Conversion to and from `nalgebra::Matrix3<f64>` is explicit.

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WarpError};

/// Pinhole intrinsics: focal lengths and principal point in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intrinsics {
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
}

impl Intrinsics {
    /// Create intrinsics from focal lengths and principal point.
    pub fn new(fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self { fx, fy, cx, cy }
    }

    /// Read intrinsics from a 3x3 matrix, checking the canonical structure.
    ///
    /// # Errors
    /// Returns [`WarpError::InvalidArgument`] when an off-diagonal entry that
    /// must be zero is not, when `m[(2, 2)] != 1`, or when a parameter is
    /// non-finite or a focal length is not positive.
    pub fn from_matrix(m: &Matrix3<f64>) -> Result<Self> {
        let zeros = [m[(0, 1)], m[(1, 0)], m[(2, 0)], m[(2, 1)]];
        if zeros.iter().any(|&z| z != 0.0) || m[(2, 2)] != 1.0 {
            return Err(WarpError::invalid_argument(format!(
                "intrinsics matrix is not of the form [[fx,0,cx],[0,fy,cy],[0,0,1]]: {:?}",
                m.as_slice()
            )));
        }

        let k = Self::from_matrix_unchecked(m);
        if ![k.fx, k.fy, k.cx, k.cy].iter().all(|v| v.is_finite()) {
            return Err(WarpError::invalid_argument(format!(
                "intrinsics contain non-finite values: {:?}",
                k
            )));
        }
        if k.fx <= 0.0 || k.fy <= 0.0 {
            return Err(WarpError::invalid_argument(format!(
                "focal lengths must be positive, got fx={}, fy={}",
                k.fx, k.fy
            )));
        }

        Ok(k)
    }

    /// Read `fx, fy, cx, cy` from their matrix positions, ignoring every
    /// other entry.
    pub fn from_matrix_unchecked(m: &Matrix3<f64>) -> Self {
        Self::new(m[(0, 0)], m[(1, 1)], m[(0, 2)], m[(1, 2)])
    }

    /// Canonical 3x3 matrix form.
    pub fn to_matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.fx, 0.0, self.cx,
            0.0, self.fy, self.cy,
            0.0, 0.0, 1.0,
        )
    }

    /// Closed-form inverse of [`Self::to_matrix`].
    ///
    /// Maps homogeneous pixel coordinates back to normalized camera rays.
    pub fn inverse_matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            1.0 / self.fx, 0.0, -self.cx / self.fx,
            0.0, 1.0 / self.fy, -self.cy / self.fy,
            0.0, 0.0, 1.0,
        )
    }

    /// Intrinsics for an image resized by `(sx, sy)` along (x, y).
    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        Self::new(self.fx * sx, self.fy * sy, self.cx * sx, self.cy * sy)
    }

    /// Intrinsics for an image at half the resolution.
    pub fn halved(&self) -> Self {
        self.scaled(0.5, 0.5)
    }

    /// Intrinsics for an image cropped with its top-left corner at
    /// `(offset_x, offset_y)`.
    pub fn cropped(&self, offset_x: f64, offset_y: f64) -> Self {
        Self::new(self.fx, self.fy, self.cx - offset_x, self.cy - offset_y)
    }

    /// Project a camera-space point to pixel coordinates.
    pub fn project(&self, point: [f64; 3]) -> [f64; 2] {
        let [x, y, z] = point;
        [self.fx * x / z + self.cx, self.fy * y / z + self.cy]
    }
}

impl From<Intrinsics> for Matrix3<f64> {
    fn from(k: Intrinsics) -> Self {
        k.to_matrix()
    }
}

impl TryFrom<Matrix3<f64>> for Intrinsics {
    type Error = WarpError;

    fn try_from(m: Matrix3<f64>) -> Result<Self> {
        Self::from_matrix(&m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_roundtrip() {
        let k = Intrinsics::new(718.8, 718.8, 607.2, 185.2);
        let m = k.to_matrix();
        assert_eq!(m[(0, 0)], 718.8);
        assert_eq!(m[(0, 1)], 0.0);
        assert_eq!(m[(2, 2)], 1.0);
        assert_eq!(Intrinsics::from_matrix(&m).unwrap(), k);
    }

    #[test]
    fn test_from_matrix_rejects_skew() {
        let mut m = Intrinsics::new(100.0, 100.0, 50.0, 50.0).to_matrix();
        m[(0, 1)] = 0.5;
        let err = Intrinsics::from_matrix(&m).unwrap_err();
        assert!(matches!(err, WarpError::InvalidArgument(_)));
    }

    #[test]
    fn test_from_matrix_rejects_bad_focal() {
        let m = Intrinsics::new(0.0, 100.0, 50.0, 50.0).to_matrix();
        assert!(Intrinsics::from_matrix(&m).is_err());

        let m = Intrinsics::new(f64::NAN, 100.0, 50.0, 50.0).to_matrix();
        assert!(Intrinsics::from_matrix(&m).is_err());
    }

    #[test]
    fn test_inverse_matrix() {
        let k = Intrinsics::new(120.0, 90.0, 64.0, 48.0);
        let product = k.to_matrix() * k.inverse_matrix();
        assert!((product - Matrix3::identity()).norm() < 1e-12);
    }

    #[test]
    fn test_scaled_and_cropped() {
        let k = Intrinsics::new(100.0, 80.0, 50.0, 40.0);
        let s = k.scaled(2.0, 0.5);
        assert_eq!(s, Intrinsics::new(200.0, 40.0, 100.0, 20.0));

        let c = k.cropped(10.0, 5.0);
        assert_eq!(c, Intrinsics::new(100.0, 80.0, 40.0, 35.0));
    }

    #[test]
    fn test_projection_follows_crop() {
        // A pixel moves by exactly the crop offset.
        let k = Intrinsics::new(100.0, 100.0, 50.0, 50.0);
        let p = [0.3, -0.2, 2.0];
        let before = k.project(p);
        let after = k.cropped(7.0, 3.0).project(p);
        assert!((before[0] - 7.0 - after[0]).abs() < 1e-12);
        assert!((before[1] - 3.0 - after[1]).abs() < 1e-12);
    }
}
