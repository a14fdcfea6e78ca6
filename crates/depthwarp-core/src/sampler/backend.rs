//! Backend extension for the bilinear sampler.
//!
//! [`SamplerBackend`] is the two-method contract a differentiable node needs:
//! evaluate and gradient. The default bodies run the generic tensor kernel,
//! so a plain backend only has to opt in. The autodiff backend overrides
//! `bilinear_sample` to record the custom backward step in the graph.

use burn::tensor::{backend::Backend, ops::FloatTensor, Tensor, TensorPrimitive};

use super::kernel;

/// Backend that can evaluate and differentiate a bilinear sample.
///
/// Tensors are passed as float primitives:
/// * `x` - `[B, C, H, W]`
/// * `grid` - `[B, 2, outH, outW]`
/// * `grad_output` - `[B, C, outH, outW]`
pub trait SamplerBackend: Backend {
    /// Sample `x` at the pixel coordinates in `grid`.
    fn bilinear_sample(x: FloatTensor<Self>, grid: FloatTensor<Self>) -> FloatTensor<Self> {
        let x = Tensor::<Self, 4>::from_primitive(TensorPrimitive::Float(x));
        let grid = Tensor::<Self, 4>::from_primitive(TensorPrimitive::Float(grid));

        kernel::forward(x, grid).into_primitive().tensor()
    }

    /// Gradients `(grad_x, grad_grid)` of a sample given the upstream
    /// gradient. `grad_x` is always zero.
    fn bilinear_sample_backward(
        x: FloatTensor<Self>,
        grid: FloatTensor<Self>,
        grad_output: FloatTensor<Self>,
    ) -> (FloatTensor<Self>, FloatTensor<Self>) {
        let x = Tensor::<Self, 4>::from_primitive(TensorPrimitive::Float(x));
        let grid = Tensor::<Self, 4>::from_primitive(TensorPrimitive::Float(grid));
        let grad_output = Tensor::<Self, 4>::from_primitive(TensorPrimitive::Float(grad_output));

        let (grad_x, grad_grid) = kernel::backward(x, grid, grad_output);
        (
            grad_x.into_primitive().tensor(),
            grad_grid.into_primitive().tensor(),
        )
    }
}

impl SamplerBackend for burn::backend::NdArray<f32> {}

impl SamplerBackend for burn::backend::NdArray<f64> {}

#[cfg(feature = "wgpu")]
impl SamplerBackend for burn::backend::Wgpu {}
