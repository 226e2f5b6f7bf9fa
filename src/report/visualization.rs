use image::{Rgb, RgbImage};
use imageproc::{drawing::draw_hollow_rect_mut, rect::Rect};

use crate::Region;

#[derive(Debug, Clone)]
pub struct VisualizationConfig {
    pub highlight_color: Rgb<u8>,
    pub border_thickness: u32,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            highlight_color: Rgb([255, 0, 0]),
            border_thickness: 2,
        }
    }
}

pub struct Annotator {
    config: VisualizationConfig,
}

impl Annotator {
    pub fn new() -> Self {
        Self {
            config: VisualizationConfig::default(),
        }
    }

    pub fn with_config(config: VisualizationConfig) -> Self {
        Self { config }
    }

    pub fn annotate(&self, image: &RgbImage, regions: &[Region]) -> RgbImage {
        let mut annotated = image.clone();
        for region in regions {
            self.draw_region_border(&mut annotated, region);
        }
        annotated
    }

    // extra stroke pixels grow outward, clipped at the image edge
    pub fn draw_region_border(&self, image: &mut RgbImage, region: &Region) {
        for t in 0..self.config.border_thickness {
            let offset = t as i32;
            let rect = Rect::at(region.x as i32 - offset, region.y as i32 - offset)
                .of_size(region.width + 1 + 2 * t, region.height + 1 + 2 * t);
            draw_hollow_rect_mut(image, rect, self.config.highlight_color);
        }
    }
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    fn region(x: u32, y: u32, width: u32, height: u32) -> Region {
        Region {
            x,
            y,
            width,
            height,
            area: (width * height) as f64,
        }
    }

    #[test]
    fn test_draws_two_pixel_unfilled_border() {
        let image = RgbImage::from_pixel(40, 40, Rgb([10, 10, 10]));

        let annotated = Annotator::new().annotate(&image, &[region(10, 10, 10, 10)]);

        assert_eq!(*annotated.get_pixel(10, 10), RED);
        assert_eq!(*annotated.get_pixel(20, 20), RED);
        assert_eq!(*annotated.get_pixel(9, 15), RED);
        assert_eq!(*annotated.get_pixel(21, 15), RED);
        assert_eq!(*annotated.get_pixel(8, 15), Rgb([10, 10, 10]));
        assert_eq!(*annotated.get_pixel(15, 15), Rgb([10, 10, 10]));
        assert_eq!(*annotated.get_pixel(11, 15), Rgb([10, 10, 10]));
    }

    #[test]
    fn test_no_regions_leaves_image_untouched() {
        let image = RgbImage::from_fn(16, 16, |x, y| Rgb([x as u8, y as u8, 7]));

        let annotated = Annotator::new().annotate(&image, &[]);

        assert_eq!(annotated, image);
    }

    #[test]
    fn test_border_is_clipped_at_image_edge() {
        let image = RgbImage::new(12, 12);
        let config = VisualizationConfig {
            highlight_color: Rgb([0, 0, 255]),
            border_thickness: 3,
        };

        let annotated = Annotator::with_config(config).annotate(&image, &[region(0, 0, 11, 11)]);

        assert_eq!(*annotated.get_pixel(0, 5), Rgb([0, 0, 255]));
        assert_eq!(*annotated.get_pixel(11, 11), Rgb([0, 0, 255]));
        assert_eq!(*annotated.get_pixel(5, 5), Rgb([0, 0, 0]));
    }
}
