//! Differentiable bilinear sampler ("spatial transformer sampler").
//!
//! Samples a feature tensor `[B, C, H, W]` at fractional pixel coordinates
//! given by a grid `[B, 2, outH, outW]` (channel 0 = x/column, channel 1 =
//! y/row). Coordinates outside the image clamp to the border.
//!
//! The backward pass differentiates w.r.t. the grid only; the gradient
//! w.r.t. the sampled tensor is zero. On an `Autodiff` backend the forward
//! is recorded as a single graph node, so `loss.backward()` routes the
//! coordinate gradient into whatever produced the grid.

mod autodiff;
pub mod backend;
pub mod grid;
mod kernel;
pub mod validation;

use std::marker::PhantomData;

use burn::module::Module;
use burn::tensor::{backend::Backend, Tensor, TensorPrimitive};

use crate::error::Result;

pub use backend::SamplerBackend;
pub use grid::{displacement_grid, identity_grid};
pub use validation::{validate_grad_output, validate_sample_inputs};

/// Sample `x` `[B, C, H, W]` at `grid` `[B, 2, outH, outW]`.
///
/// # Errors
/// `TypeMismatch` for non-float inputs, `ShapeMismatch` when the grid does
/// not have 2 channels, the batch sizes differ, or `x` has an empty
/// spatial dimension.
pub fn sample<B: SamplerBackend>(x: Tensor<B, 4>, grid: Tensor<B, 4>) -> Result<Tensor<B, 4>> {
    validate_sample_inputs(&x.dims(), x.dtype(), &grid.dims(), grid.dtype())?;
    tracing::trace!(x = ?x.dims(), grid = ?grid.dims(), "bilinear sample");

    let output = B::bilinear_sample(x.into_primitive().tensor(), grid.into_primitive().tensor());
    Ok(Tensor::from_primitive(TensorPrimitive::Float(output)))
}

/// Gradients `(grad_x, grad_grid)` of [`sample`] for the upstream gradient
/// `grad_output` `[B, C, outH, outW]`.
///
/// `grad_x` is all zero and shaped like `x`; `grad_grid` is shaped like
/// `grid`.
pub fn sample_backward<B: SamplerBackend>(
    x: Tensor<B, 4>,
    grid: Tensor<B, 4>,
    grad_output: Tensor<B, 4>,
) -> Result<(Tensor<B, 4>, Tensor<B, 4>)> {
    validate_sample_inputs(&x.dims(), x.dtype(), &grid.dims(), grid.dtype())?;
    validate_grad_output(&x.dims(), &grid.dims(), &grad_output.dims(), grad_output.dtype())?;
    tracing::trace!(x = ?x.dims(), grid = ?grid.dims(), "bilinear sample backward");

    let (grad_x, grad_grid) = B::bilinear_sample_backward(
        x.into_primitive().tensor(),
        grid.into_primitive().tensor(),
        grad_output.into_primitive().tensor(),
    );

    Ok((
        Tensor::from_primitive(TensorPrimitive::Float(grad_x)),
        Tensor::from_primitive(TensorPrimitive::Float(grad_grid)),
    ))
}

/// Stateless sampler layer for use inside a model.
#[derive(Module, Debug)]
pub struct BilinearSampler<B: Backend> {
    phantom: PhantomData<B>,
}

impl<B: Backend> BilinearSampler<B> {
    pub fn new() -> Self {
        Self { phantom: PhantomData }
    }
}

impl<B: Backend> Default for BilinearSampler<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: SamplerBackend> BilinearSampler<B> {
    /// See [`sample`].
    pub fn forward(&self, x: Tensor<B, 4>, grid: Tensor<B, 4>) -> Result<Tensor<B, 4>> {
        sample(x, grid)
    }

    /// Warp `x` by a per-pixel displacement `flow` `[B, 2, H, W]`.
    pub fn warp(&self, x: Tensor<B, 4>, flow: Tensor<B, 4>) -> Result<Tensor<B, 4>> {
        sample(x, displacement_grid(flow))
    }

    /// See [`sample_backward`].
    pub fn backward(
        &self,
        x: Tensor<B, 4>,
        grid: Tensor<B, 4>,
        grad_output: Tensor<B, 4>,
    ) -> Result<(Tensor<B, 4>, Tensor<B, 4>)> {
        sample_backward(x, grid, grad_output)
    }
}
