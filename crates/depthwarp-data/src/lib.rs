pub mod augmentation;
pub mod config;
pub mod kitti;

pub use augmentation::ScaleCrop;
pub use config::{AugmentationConfig, KittiTransformConfig};
pub use kitti::{KittiSample, KittiTransform, TransformedSample};
