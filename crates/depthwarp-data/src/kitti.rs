//! KITTI training-sample transform.
//!
//! A sample is a target frame, its neighbouring source frames and the
//! camera intrinsics. The transform applies one shared scale + crop draw to
//! all frames, adjusts the intrinsics to match, and expands them into the
//! multi-scale pyramid used by the depth/pose losses.

use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use depthwarp_core::camera::{Intrinsics, IntrinsicsPyramid};
use depthwarp_core::error::{Result, WarpError};
use depthwarp_core::sampler::SamplerBackend;
use rand::Rng;

use crate::augmentation::ScaleCrop;
use crate::config::KittiTransformConfig;

/// Raw training sample.
#[derive(Debug, Clone)]
pub struct KittiSample<B: Backend> {
    /// `[C, H, W]`
    pub target: Tensor<B, 3>,
    /// `[N, C, H, W]`
    pub sources: Tensor<B, 4>,
    pub intrinsics: Intrinsics,
}

/// Training sample after augmentation.
#[derive(Debug, Clone)]
pub struct TransformedSample<B: Backend> {
    /// `[C, H, W]`
    pub target: Tensor<B, 3>,
    /// `[N, C, H, W]`
    pub sources: Tensor<B, 4>,
    /// Intrinsics of the augmented images, one level per scale.
    pub pyramid: IntrinsicsPyramid,
    /// The augmentation that was applied, if any.
    pub augmentation: Option<ScaleCrop>,
}

/// Augmentation + intrinsics pyramid for KITTI samples.
#[derive(Debug, Clone, Default)]
pub struct KittiTransform {
    config: KittiTransformConfig,
}

impl KittiTransform {
    /// Create a transform, checking the configuration.
    pub fn new(config: KittiTransformConfig) -> Result<Self> {
        config.augmentation.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &KittiTransformConfig {
        &self.config
    }

    /// Transform one sample, drawing the augmentation from `rng`.
    ///
    /// # Errors
    /// `ShapeMismatch` when the source frames do not share the target's
    /// channel count and size.
    pub fn apply<B: SamplerBackend, R: Rng + ?Sized>(
        &self,
        sample: KittiSample<B>,
        rng: &mut R,
    ) -> Result<TransformedSample<B>> {
        let [c, h, w] = sample.target.dims();
        let [n, sc, sh, sw] = sample.sources.dims();
        if [sc, sh, sw] != [c, h, w] {
            return Err(WarpError::shape_mismatch(format!(
                "source frames {:?} do not match target frame {:?}",
                [sc, sh, sw],
                [c, h, w]
            )));
        }

        let (target, sources, intrinsics, augmentation) = if self.config.augmentation.enabled {
            let draw = ScaleCrop::sample(rng, &self.config.augmentation, h, w)?;
            tracing::debug!(
                scale_x = draw.scale_x,
                scale_y = draw.scale_y,
                offset_x = draw.offset_x,
                offset_y = draw.offset_y,
                "scale/crop augmentation"
            );

            let (target, sources) = if n == 0 {
                let target = draw.apply_image(sample.target.unsqueeze::<4>())?;
                (target.squeeze::<3>(0), sample.sources)
            } else {
                let stack = Tensor::cat(vec![sample.target.unsqueeze::<4>(), sample.sources], 0);
                let stack = draw.apply_image(stack)?;
                let target = stack.clone().narrow(0, 0, 1).squeeze::<3>(0);
                (target, stack.narrow(0, 1, n))
            };

            (target, sources, draw.apply_intrinsics(&sample.intrinsics), Some(draw))
        } else {
            (sample.target, sample.sources, sample.intrinsics, None)
        };

        let pyramid = IntrinsicsPyramid::new(intrinsics, self.config.n_scales);
        tracing::trace!(levels = pyramid.len(), sources = n, "built intrinsics pyramid");

        Ok(TransformedSample {
            target,
            sources,
            pyramid,
            augmentation,
        })
    }
}
