pub mod camera;
pub mod error;
pub mod sampler;

pub use camera::{scale_pyramid, Intrinsics, IntrinsicsPyramid};
pub use error::{Result, WarpError};
pub use sampler::{sample, sample_backward, BilinearSampler, SamplerBackend};
