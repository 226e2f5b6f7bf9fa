use image::RgbImage;
use serde::{Deserialize, Serialize};

pub mod analysis;
pub mod batch;
pub mod detection;
pub mod error;
pub mod image_utils;
pub mod naming;
pub mod pairs;
pub mod report;

pub use batch::{BatchConfig, BatchProcessor, BatchSummary};
pub use detection::ChangeHighlighter;
pub use naming::NamingConvention;
pub use pairs::{ImagePair, PairResolver};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub window_size: usize,
    // regions with area <= this are dropped
    pub min_region_area: f64,
    pub highlight_color: [u8; 3],
    pub stroke_width: u32,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            window_size: 7,
            min_region_area: 100.0,
            highlight_color: [255, 0, 0],
            stroke_width: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub area: f64,
}

#[derive(Debug, Clone)]
pub struct HighlightResult {
    pub annotated: RgbImage,
    pub regions: Vec<Region>,
    pub score: f64,
}
