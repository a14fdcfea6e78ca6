//! Random scale + crop augmentation.
//!
//! An image stack is enlarged by a random per-axis factor and then cropped
//! back to its original size at a random offset. The intrinsics go through
//! the same two steps so that a camera-space point keeps projecting onto the
//! same image content.
//!
//! Pixel `(u, v)` of the input moves to `(u * scale_x - offset_x,
//! v * scale_y - offset_y)`, which is exactly what the adjusted intrinsics
//! predict.

use burn::tensor::Tensor;
use depthwarp_core::camera::Intrinsics;
use depthwarp_core::error::{Result, WarpError};
use depthwarp_core::sampler::{identity_grid, sample, SamplerBackend};
use rand::Rng;

use crate::config::AugmentationConfig;

/// One draw of the scale + crop augmentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleCrop {
    pub scale_x: f64,
    pub scale_y: f64,
    /// Size of the image after scaling, before cropping.
    pub scaled_height: usize,
    pub scaled_width: usize,
    /// Top-left corner of the crop in the scaled image.
    pub offset_x: usize,
    pub offset_y: usize,
    /// Size of the crop (the original image size).
    pub height: usize,
    pub width: usize,
}

impl ScaleCrop {
    /// Draw scales and crop offsets for a `height x width` image.
    ///
    /// # Errors
    /// `InvalidArgument` when the config's scale range is invalid or the
    /// image is empty.
    pub fn sample<R: Rng + ?Sized>(
        rng: &mut R,
        config: &AugmentationConfig,
        height: usize,
        width: usize,
    ) -> Result<Self> {
        config.validate()?;
        if height == 0 || width == 0 {
            return Err(WarpError::invalid_argument(format!(
                "cannot augment an empty image of size {}x{}",
                height, width
            )));
        }

        let mut draw_scale = || {
            if config.max_scale > config.min_scale {
                rng.gen_range(config.min_scale..config.max_scale)
            } else {
                config.min_scale
            }
        };
        let scale_x = draw_scale();
        let scale_y = draw_scale();

        let scaled_height = (height as f64 * scale_y).floor() as usize;
        let scaled_width = (width as f64 * scale_x).floor() as usize;

        let offset_y = rng.gen_range(0..=scaled_height - height);
        let offset_x = rng.gen_range(0..=scaled_width - width);

        Ok(Self {
            scale_x,
            scale_y,
            scaled_height,
            scaled_width,
            offset_x,
            offset_y,
            height,
            width,
        })
    }

    /// Scale then crop every frame of `stack` `[N, C, H, W]`.
    ///
    /// Only the cropped window of the scaled image is computed: each output
    /// pixel is a bilinear sample of the input at
    /// `((j + offset_x) / scale_x, (i + offset_y) / scale_y)`.
    ///
    /// # Errors
    /// `ShapeMismatch` when the stack is not `height x width`.
    pub fn apply_image<B: SamplerBackend>(&self, stack: Tensor<B, 4>) -> Result<Tensor<B, 4>> {
        let [n, _, h, w] = stack.dims();
        if h != self.height || w != self.width {
            return Err(WarpError::shape_mismatch(format!(
                "augmentation drawn for {}x{} images, got {}x{}",
                self.height, self.width, h, w
            )));
        }
        if n == 0 {
            return Ok(stack);
        }

        let grid = identity_grid::<B>(n, self.height, self.width, &stack.device());
        let u = grid
            .clone()
            .narrow(1, 0, 1)
            .add_scalar(self.offset_x as f64)
            .div_scalar(self.scale_x);
        let v = grid
            .narrow(1, 1, 1)
            .add_scalar(self.offset_y as f64)
            .div_scalar(self.scale_y);

        sample(stack, Tensor::cat(vec![u, v], 1))
    }

    /// Intrinsics matching [`Self::apply_image`].
    pub fn apply_intrinsics(&self, intrinsics: &Intrinsics) -> Intrinsics {
        intrinsics
            .scaled(self.scale_x, self.scale_y)
            .cropped(self.offset_x as f64, self.offset_y as f64)
    }
}
