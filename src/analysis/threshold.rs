use image::GrayImage;
use imageproc::contrast::{ThresholdType, otsu_level, threshold};

pub const FOREGROUND: u8 = 255;

#[derive(Debug, Clone)]
pub struct DifferenceMask {
    pub mask: GrayImage,
    /// Rescaled similarity values at or below this level were marked.
    pub level: u8,
}

impl DifferenceMask {
    pub fn from_similarity(similarity: &GrayImage) -> Self {
        let level = otsu_level(similarity);
        let mask = threshold(similarity, level, ThresholdType::BinaryInverted);
        Self { mask, level }
    }
}
