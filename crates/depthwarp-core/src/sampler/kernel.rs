//! Vectorised bilinear sampling kernel.
//!
//! All four neighbours of every output location are fetched with a single
//! gather per neighbour over a `[B, C, H * W]` view of the source, so the
//! computation runs across batch, channel and output pixel at once on any
//! backend.

use burn::tensor::{backend::Backend, Int, Tensor};

/// The 2x2 neighbourhood of every sampling location.
///
/// Weights have shape `[B, 1, outH, outW]` and broadcast over channels;
/// neighbour values have shape `[B, C, outH, outW]`.
pub(crate) struct Neighborhood<B: Backend> {
    /// `u1 - u`
    pub wt_x0: Tensor<B, 4>,
    /// `u - u0`
    pub wt_x1: Tensor<B, 4>,
    /// `v1 - v`
    pub wt_y0: Tensor<B, 4>,
    /// `v - v0`
    pub wt_y1: Tensor<B, 4>,
    /// Value at `(v0, u0)`
    pub p00: Tensor<B, 4>,
    /// Value at `(v0, u1)`
    pub p01: Tensor<B, 4>,
    /// Value at `(v1, u0)`
    pub p10: Tensor<B, 4>,
    /// Value at `(v1, u1)`
    pub p11: Tensor<B, 4>,
}

impl<B: Backend> Neighborhood<B> {
    /// Gather the neighbourhood of `grid` in `x`.
    ///
    /// Weights use the integer neighbours before clamping; only the lookup
    /// indices are clamped to the image.
    ///
    /// Coordinates are first limited to `[-1, W]` x `[-1, H]`. Beyond that
    /// range both neighbours fall on the same border pixel, and far-out
    /// values would otherwise lose `floor(u) + 1` to float rounding.
    pub fn gather(x: Tensor<B, 4>, grid: Tensor<B, 4>) -> Self {
        let [batch, channels, height, width] = x.dims();
        let [_, _, out_h, out_w] = grid.dims();

        let u = grid.clone().narrow(1, 0, 1).clamp(-1.0, width as f64);
        let v = grid.narrow(1, 1, 1).clamp(-1.0, height as f64);

        let u0 = u.clone().floor();
        let u1 = u0.clone().add_scalar(1.0);
        let v0 = v.clone().floor();
        let v1 = v0.clone().add_scalar(1.0);

        let wt_x0 = u1.clone() - u.clone();
        let wt_x1 = u - u0.clone();
        let wt_y0 = v1.clone() - v.clone();
        let wt_y1 = v - v0.clone();

        let u0_i = u0.clamp(0.0, (width - 1) as f64).int();
        let u1_i = u1.clamp(0.0, (width - 1) as f64).int();
        let v0_i = v0.clamp(0.0, (height - 1) as f64).int();
        let v1_i = v1.clamp(0.0, (height - 1) as f64).int();

        // [B, C, H * W]; lookups never leave their own batch row.
        let flat = x.reshape([batch, channels, height * width]);
        let stride_y = width as i32;

        let lookup = |row: &Tensor<B, 4, Int>, col: &Tensor<B, 4, Int>| -> Tensor<B, 4> {
            let idx = row.clone().mul_scalar(stride_y) + col.clone();
            let idx = idx
                .reshape([batch, 1, out_h * out_w])
                .repeat(&[1, channels, 1]);

            flat.clone()
                .gather(2, idx)
                .reshape([batch, channels, out_h, out_w])
        };

        let p00 = lookup(&v0_i, &u0_i);
        let p01 = lookup(&v0_i, &u1_i);
        let p10 = lookup(&v1_i, &u0_i);
        let p11 = lookup(&v1_i, &u1_i);

        Self {
            wt_x0,
            wt_x1,
            wt_y0,
            wt_y1,
            p00,
            p01,
            p10,
            p11,
        }
    }
}

/// Sample `x` `[B, C, H, W]` at `grid` `[B, 2, outH, outW]`.
pub(crate) fn forward<B: Backend>(x: Tensor<B, 4>, grid: Tensor<B, 4>) -> Tensor<B, 4> {
    let n = Neighborhood::gather(x, grid);

    let w_tl = n.wt_x0.clone() * n.wt_y0.clone();
    let w_tr = n.wt_x1.clone() * n.wt_y0;
    let w_bl = n.wt_x0 * n.wt_y1.clone();
    let w_br = n.wt_x1 * n.wt_y1;

    n.p00 * w_tl + n.p01 * w_tr + n.p10 * w_bl + n.p11 * w_br
}

/// Gradients of a sample w.r.t. `x` (always zero) and `grid`.
///
/// The clamp on the neighbour indices is treated as locally flat.
pub(crate) fn backward<B: Backend>(
    x: Tensor<B, 4>,
    grid: Tensor<B, 4>,
    grad_output: Tensor<B, 4>,
) -> (Tensor<B, 4>, Tensor<B, 4>) {
    let grad_x = x.zeros_like();
    let n = Neighborhood::gather(x, grid);

    let gu = n.p00.clone().neg() * n.wt_y0.clone()
        + n.p01.clone() * n.wt_y0
        - n.p10.clone() * n.wt_y1.clone()
        + n.p11.clone() * n.wt_y1;

    let gv = n.p00.neg() * n.wt_x0.clone()
        - n.p01 * n.wt_x1.clone()
        + n.p10 * n.wt_x0
        + n.p11 * n.wt_x1;

    // Reduce over channels: [B, C, outH, outW] -> [B, 1, outH, outW]
    let gu = (gu * grad_output.clone()).sum_dim(1);
    let gv = (gv * grad_output).sum_dim(1);

    (grad_x, Tensor::cat(vec![gu, gv], 1))
}
