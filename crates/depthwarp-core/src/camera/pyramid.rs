use nalgebra::Matrix3;

use super::intrinsics::Intrinsics;

/// Multi-resolution intrinsics pyramid.
///
/// Level 0 holds the input intrinsics. Every following level halves the
/// focal lengths and principal point of the level before it, so the halving
/// compounds down the pyramid (level `s` is `1 / 2^s` of level 0 only
/// because each step halves its predecessor).
#[derive(Debug, Clone, PartialEq)]
pub struct IntrinsicsPyramid {
    levels: Vec<Intrinsics>,
    inverses: Vec<Matrix3<f64>>,
}

impl IntrinsicsPyramid {
    /// Build a pyramid with `n_scales` levels.
    pub fn new(base: Intrinsics, n_scales: usize) -> Self {
        let levels = base.pyramid(n_scales);
        let inverses = levels.iter().map(Intrinsics::inverse_matrix).collect();
        Self { levels, inverses }
    }

    /// Intrinsics at level `s`.
    pub fn level(&self, s: usize) -> Option<&Intrinsics> {
        self.levels.get(s)
    }

    /// Inverse intrinsics matrix at level `s`.
    pub fn inverse(&self, s: usize) -> Option<&Matrix3<f64>> {
        self.inverses.get(s)
    }

    /// All levels, finest first.
    pub fn levels(&self) -> &[Intrinsics] {
        &self.levels
    }

    /// Matrix form of every level.
    pub fn matrices(&self) -> Vec<Matrix3<f64>> {
        self.levels.iter().map(Intrinsics::to_matrix).collect()
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Intrinsics, &Matrix3<f64>)> {
        self.levels.iter().zip(self.inverses.iter())
    }
}

impl Intrinsics {
    /// Compounding pyramid of `n_scales` levels starting at `self`.
    pub fn pyramid(&self, n_scales: usize) -> Vec<Intrinsics> {
        std::iter::successors(Some(*self), |k| Some(k.halved()))
            .take(n_scales)
            .collect()
    }
}

/// Scale an intrinsics matrix into `n_scales` levels.
///
/// Reads `fx, fy, cx, cy` from their matrix positions; every level is
/// rebuilt in canonical form. Entry 0 is the input, entry `s` halves the
/// parameters of entry `s - 1`.
pub fn scale_pyramid(intrinsics: &Matrix3<f64>, n_scales: usize) -> Vec<Matrix3<f64>> {
    Intrinsics::from_matrix_unchecked(intrinsics)
        .pyramid(n_scales)
        .iter()
        .map(Intrinsics::to_matrix)
        .collect()
}
