use burn::tensor::{backend::Backend, Int, Tensor};

/// Pixel-coordinate grid that samples every pixel of a `height x width`
/// image at its own location.
///
/// Returns `[batch, 2, height, width]` with channel 0 = column (x) and
/// channel 1 = row (y).
pub fn identity_grid<B: Backend>(
    batch: usize,
    height: usize,
    width: usize,
    device: &B::Device,
) -> Tensor<B, 4> {
    // X coords: [1, 1, 1, W] -> [B, 1, H, W]
    let xs = Tensor::<B, 1, Int>::arange(0..width as i64, device)
        .float()
        .reshape([1, 1, 1, width])
        .repeat(&[batch, 1, height, 1]);

    // Y coords: [1, 1, H, 1] -> [B, 1, H, W]
    let ys = Tensor::<B, 1, Int>::arange(0..height as i64, device)
        .float()
        .reshape([1, 1, height, 1])
        .repeat(&[batch, 1, 1, width]);

    Tensor::cat(vec![xs, ys], 1)
}

/// Sampling grid for a per-pixel displacement `flow` `[B, 2, H, W]`
/// (channel 0 = dx, channel 1 = dy).
pub fn displacement_grid<B: Backend>(flow: Tensor<B, 4>) -> Tensor<B, 4> {
    let [batch, _, height, width] = flow.dims();
    let identity = identity_grid::<B>(batch, height, width, &flow.device());
    flow + identity
}
