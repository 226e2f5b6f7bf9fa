use image::{Rgb, RgbImage};
use log::debug;

use crate::{
    HighlightConfig, HighlightResult,
    analysis::{
        regions::{extract_regions, filter_by_area},
        ssim::SsimAnalyzer,
        threshold::DifferenceMask,
    },
    error::{ChangeDetectError, Result},
    image_utils::{rgb_to_gray, similarity_to_gray},
    report::visualization::{Annotator, VisualizationConfig},
};

const MAX_STROKE_WIDTH: u32 = 64;

pub struct ChangeHighlighter {
    config: HighlightConfig,
    ssim: SsimAnalyzer,
    annotator: Annotator,
}

impl ChangeHighlighter {
    pub fn new(config: HighlightConfig) -> Result<Self> {
        if config.min_region_area < 0.0 || !config.min_region_area.is_finite() {
            return Err(ChangeDetectError::InvalidParameter(
                "Minimum region area must be a finite, non-negative number".into(),
            ));
        }

        if config.stroke_width > MAX_STROKE_WIDTH {
            return Err(ChangeDetectError::InvalidParameter(format!(
                "Stroke width must be at most {MAX_STROKE_WIDTH} pixels"
            )));
        }

        let ssim = SsimAnalyzer::new(config.window_size)?;
        let annotator = Annotator::with_config(VisualizationConfig {
            highlight_color: Rgb(config.highlight_color),
            border_thickness: config.stroke_width,
        });

        Ok(Self {
            config,
            ssim,
            annotator,
        })
    }

    pub fn highlight(&self, before: &RgbImage, after: &RgbImage) -> Result<HighlightResult> {
        let gray_before = rgb_to_gray(before);
        let gray_after = rgb_to_gray(after);

        let similarity = self.ssim.compare(&gray_before, &gray_after)?;
        let rescaled = similarity_to_gray(&similarity.map);
        let difference = DifferenceMask::from_similarity(&rescaled);

        let candidates = extract_regions(&difference.mask);
        let candidate_count = candidates.len();
        let regions = filter_by_area(candidates, self.config.min_region_area);

        debug!(
            "ssim score {:.4}, otsu level {}, {} of {} regions above area {}",
            similarity.score,
            difference.level,
            regions.len(),
            candidate_count,
            self.config.min_region_area
        );

        let annotated = self.annotator.annotate(after, &regions);

        Ok(HighlightResult {
            annotated,
            regions,
            score: similarity.score,
        })
    }
}

impl Default for ChangeHighlighter {
    fn default() -> Self {
        Self {
            config: HighlightConfig::default(),
            ssim: SsimAnalyzer::default(),
            annotator: Annotator::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textured(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([
                ((x * 5 + y * 3) % 256) as u8,
                ((x * y) % 256) as u8,
                ((x + y * 9) % 256) as u8,
            ])
        })
    }

    #[test]
    fn test_identical_images_get_no_boxes() {
        let image = textured(80, 60);

        let result = ChangeHighlighter::default().highlight(&image, &image).unwrap();

        assert!(result.regions.is_empty());
        assert_eq!(result.annotated, image);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_localized_block_is_boxed() {
        let before = RgbImage::from_pixel(120, 120, Rgb([60, 60, 60]));
        let mut after = before.clone();
        for y in 40..60 {
            for x in 40..60 {
                after.put_pixel(x, y, Rgb([230, 230, 30]));
            }
        }

        let result = ChangeHighlighter::default().highlight(&before, &after).unwrap();

        assert!(!result.regions.is_empty());
        assert!(result.regions.iter().any(|r| {
            r.area > 100.0
                && r.x <= 40
                && r.y <= 40
                && r.x + r.width >= 60
                && r.y + r.height >= 60
        }));
        assert!(result.annotated.pixels().any(|p| *p == Rgb([255, 0, 0])));
        assert!(result.score < 1.0);
    }

    #[test]
    fn test_scattered_pixels_are_rejected_as_noise() {
        let before = RgbImage::from_pixel(100, 100, Rgb([128, 128, 128]));
        let mut after = before.clone();
        for y in (15..90).step_by(20) {
            for x in (15..90).step_by(20) {
                after.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }

        let result = ChangeHighlighter::default().highlight(&before, &after).unwrap();

        assert!(result.regions.is_empty());
        assert_eq!(result.annotated, after);
    }

    #[test]
    fn test_min_area_is_configurable() {
        let before = RgbImage::from_pixel(100, 100, Rgb([128, 128, 128]));
        let mut after = before.clone();
        after.put_pixel(50, 50, Rgb([255, 255, 255]));

        let config = HighlightConfig {
            min_region_area: 10.0,
            ..HighlightConfig::default()
        };
        let result = ChangeHighlighter::new(config).unwrap().highlight(&before, &after).unwrap();

        assert_eq!(result.regions.len(), 1);
        assert!(result.regions[0].area <= 36.0);
    }

    #[test]
    fn test_mismatched_dimensions_error() {
        let before = textured(40, 40);
        let after = textured(40, 41);

        let err = ChangeHighlighter::default().highlight(&before, &after).unwrap_err();

        assert!(matches!(err, ChangeDetectError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_rejects_oversized_stroke_width() {
        let config = HighlightConfig {
            stroke_width: u32::MAX,
            ..HighlightConfig::default()
        };

        assert!(matches!(
            ChangeHighlighter::new(config),
            Err(ChangeDetectError::InvalidParameter(_))
        ));

        let config = HighlightConfig {
            stroke_width: MAX_STROKE_WIDTH,
            ..HighlightConfig::default()
        };
        assert!(ChangeHighlighter::new(config).is_ok());
    }

    #[test]
    fn test_rejects_negative_min_area() {
        let config = HighlightConfig {
            min_region_area: -1.0,
            ..HighlightConfig::default()
        };

        assert!(ChangeHighlighter::new(config).is_err());
    }
}
