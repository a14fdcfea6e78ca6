//! Camera intrinsics and the multi-scale intrinsics pyramid.

pub mod intrinsics;
pub mod pyramid;

pub use intrinsics::Intrinsics;
pub use pyramid::{scale_pyramid, IntrinsicsPyramid};
