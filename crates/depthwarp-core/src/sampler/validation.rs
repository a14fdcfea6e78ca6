//! Precondition checks for the bilinear sampler.
//!
//! Shapes are taken as plain dimension slices. For the typed
//! `Tensor<B, 4>` entry points ([`sample`](super::sample),
//! [`sample_backward`](super::sample_backward)) the rank and float checks
//! always pass, since the tensor type fixes both at compile time; they only
//! reject anything when these functions are called directly with shapes and
//! dtypes taken from dynamic data (e.g. `TensorData`).

use burn::tensor::DType;

use crate::error::{Result, WarpError};

fn check_float(name: &str, dtype: DType) -> Result<()> {
    if dtype.is_float() {
        Ok(())
    } else {
        Err(WarpError::type_mismatch(format!(
            "{} must be floating point, got {:?}",
            name, dtype
        )))
    }
}

fn check_rank(name: &str, dims: &[usize], rank: usize) -> Result<()> {
    if dims.len() == rank {
        Ok(())
    } else {
        Err(WarpError::shape_mismatch(format!(
            "{} must be rank {}, got shape {:?}",
            name, rank, dims
        )))
    }
}

/// Validate the inputs of a forward sample.
///
/// * `x` must be a float tensor of shape `[B, C, H, W]` with `H, W > 0`.
/// * `grid` must be a float tensor of shape `[B, 2, outH, outW]`.
pub fn validate_sample_inputs(
    x_dims: &[usize],
    x_dtype: DType,
    grid_dims: &[usize],
    grid_dtype: DType,
) -> Result<()> {
    check_float("x", x_dtype)?;
    check_float("grid", grid_dtype)?;
    check_rank("x", x_dims, 4)?;
    check_rank("grid", grid_dims, 4)?;

    if grid_dims[1] != 2 {
        return Err(WarpError::shape_mismatch(format!(
            "grid must have exactly 2 channels (x, y), got shape {:?}",
            grid_dims
        )));
    }
    if x_dims[0] != grid_dims[0] {
        return Err(WarpError::shape_mismatch(format!(
            "batch size of x ({}) does not match batch size of grid ({})",
            x_dims[0], grid_dims[0]
        )));
    }
    if x_dims[2] == 0 || x_dims[3] == 0 {
        return Err(WarpError::shape_mismatch(format!(
            "x must have non-empty spatial dimensions, got shape {:?}",
            x_dims
        )));
    }

    Ok(())
}

/// Validate the upstream gradient of a backward pass against its inputs.
///
/// `grad_output` must be `[B, C, outH, outW]`: batch and channels of `x`,
/// spatial extent of `grid`.
pub fn validate_grad_output(
    x_dims: &[usize],
    grid_dims: &[usize],
    grad_dims: &[usize],
    grad_dtype: DType,
) -> Result<()> {
    check_float("grad_output", grad_dtype)?;
    check_rank("x", x_dims, 4)?;
    check_rank("grid", grid_dims, 4)?;
    check_rank("grad_output", grad_dims, 4)?;

    let expected = [x_dims[0], x_dims[1], grid_dims[2], grid_dims[3]];
    if grad_dims != expected {
        return Err(WarpError::shape_mismatch(format!(
            "grad_output must have shape {:?}, got {:?}",
            expected, grad_dims
        )));
    }

    Ok(())
}
