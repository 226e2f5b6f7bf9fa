pub mod regions;
pub mod ssim;
pub mod threshold;
