//! Configuration for the KITTI transform.

use depthwarp_core::error::{Result, WarpError};
use serde::{Deserialize, Serialize};

/// Random scale + crop augmentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentationConfig {
    /// Apply the augmentation at all.
    pub enabled: bool,
    /// Lower bound of the per-axis scale factor (inclusive).
    pub min_scale: f64,
    /// Upper bound of the per-axis scale factor (exclusive).
    pub max_scale: f64,
}

impl Default for AugmentationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_scale: 1.0,
            max_scale: 1.15,
        }
    }
}

impl AugmentationConfig {
    /// Create a new augmentation config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scale range.
    pub fn with_scale_range(mut self, min_scale: f64, max_scale: f64) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }

    /// Disable augmentation.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Check the scale range.
    ///
    /// Scales below 1 would shrink the image below the crop size.
    pub fn validate(&self) -> Result<()> {
        if !self.min_scale.is_finite() || !self.max_scale.is_finite() {
            return Err(WarpError::invalid_argument(format!(
                "scale range must be finite, got [{}, {})",
                self.min_scale, self.max_scale
            )));
        }
        if self.min_scale < 1.0 {
            return Err(WarpError::invalid_argument(format!(
                "min_scale must be >= 1, got {}",
                self.min_scale
            )));
        }
        if self.max_scale < self.min_scale {
            return Err(WarpError::invalid_argument(format!(
                "max_scale ({}) must not be below min_scale ({})",
                self.max_scale, self.min_scale
            )));
        }
        Ok(())
    }
}

/// Settings of [`crate::KittiTransform`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KittiTransformConfig {
    /// Number of levels in the intrinsics pyramid.
    pub n_scales: usize,
    pub augmentation: AugmentationConfig,
}

impl Default for KittiTransformConfig {
    fn default() -> Self {
        Self {
            n_scales: 4,
            augmentation: AugmentationConfig::default(),
        }
    }
}

impl KittiTransformConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of pyramid levels.
    pub fn with_n_scales(mut self, n_scales: usize) -> Self {
        self.n_scales = n_scales;
        self
    }

    /// Set the augmentation settings.
    pub fn with_augmentation(mut self, augmentation: AugmentationConfig) -> Self {
        self.augmentation = augmentation;
        self
    }
}
