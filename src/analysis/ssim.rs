use image::GrayImage;
use ndarray::{Array2, Axis};

use crate::{
    error::{ChangeDetectError, Result},
    image_utils::gray_to_array,
};

const DATA_RANGE: f64 = 255.0;

#[derive(Debug, Clone)]
pub struct SimilarityMap {
    pub map: Array2<f64>,
    // mean over the map with the window border cropped off
    pub score: f64,
}

impl SimilarityMap {
    pub fn dimensions(&self) -> (u32, u32) {
        let (height, width) = self.map.dim();
        (width as u32, height as u32)
    }
}

pub struct SsimAnalyzer {
    window_size: usize,
    k1: f64,
    k2: f64,
}

impl SsimAnalyzer {
    pub fn new(window_size: usize) -> Result<Self> {
        if window_size < 3 || window_size % 2 == 0 {
            return Err(ChangeDetectError::InvalidParameter(
                "Window size must be an odd number of at least 3".into(),
            ));
        }

        Ok(Self {
            window_size,
            k1: 0.01,
            k2: 0.03,
        })
    }

    pub fn compare(&self, before: &GrayImage, after: &GrayImage) -> Result<SimilarityMap> {
        if before.dimensions() != after.dimensions() {
            return Err(ChangeDetectError::DimensionMismatch {
                before: before.dimensions(),
                after: after.dimensions(),
            });
        }

        let (width, height) = before.dimensions();
        let min_side = self.window_size as u32;
        if width < min_side || height < min_side {
            return Err(ChangeDetectError::ImageTooSmall(min_side));
        }

        let x = gray_to_array(before);
        let y = gray_to_array(after);

        let samples = (self.window_size * self.window_size) as f64;
        let cov_norm = samples / (samples - 1.0);
        let c1 = (self.k1 * DATA_RANGE).powi(2);
        let c2 = (self.k2 * DATA_RANGE).powi(2);

        let ux = self.uniform_filter(&x);
        let uy = self.uniform_filter(&y);
        let uxx = self.uniform_filter(&(&x * &x));
        let uyy = self.uniform_filter(&(&y * &y));
        let uxy = self.uniform_filter(&(&x * &y));

        let mut map = Array2::zeros(x.dim());
        ndarray::Zip::from(&mut map)
            .and(&ux)
            .and(&uy)
            .and(&uxx)
            .and(&uyy)
            .and(&uxy)
            .for_each(|s, &mx, &my, &mxx, &myy, &mxy| {
                let vx = cov_norm * (mxx - mx * mx);
                let vy = cov_norm * (myy - my * my);
                let vxy = cov_norm * (mxy - mx * my);

                let a1 = 2.0 * mx * my + c1;
                let a2 = 2.0 * vxy + c2;
                let b1 = mx * mx + my * my + c1;
                let b2 = vx + vy + c2;

                *s = (a1 * a2) / (b1 * b2);
            });

        let score = self.cropped_mean(&map);

        Ok(SimilarityMap { map, score })
    }

    fn cropped_mean(&self, map: &Array2<f64>) -> f64 {
        let pad = (self.window_size - 1) / 2;
        let (height, width) = map.dim();

        if height <= 2 * pad || width <= 2 * pad {
            return map.mean().unwrap_or(1.0);
        }

        map.slice(ndarray::s![pad..height - pad, pad..width - pad])
            .mean()
            .unwrap_or(1.0)
    }

    /// Separable box filter; samples outside the array mirror back in,
    /// repeating the edge sample (`d c b a | a b c d`).
    fn uniform_filter(&self, input: &Array2<f64>) -> Array2<f64> {
        let rows = self.filter_axis(input, Axis(1));
        self.filter_axis(&rows, Axis(0))
    }

    fn filter_axis(&self, input: &Array2<f64>, axis: Axis) -> Array2<f64> {
        let half = (self.window_size / 2) as isize;
        let norm = self.window_size as f64;
        let mut output = Array2::zeros(input.dim());

        for (src, mut dst) in input
            .lanes(axis)
            .into_iter()
            .zip(output.lanes_mut(axis))
        {
            let len = src.len() as isize;
            for i in 0..len {
                let mut sum = 0.0;
                for k in -half..=half {
                    sum += src[reflect_index(i + k, len)];
                }
                dst[i as usize] = sum / norm;
            }
        }

        output
    }
}

impl Default for SsimAnalyzer {
    fn default() -> Self {
        Self {
            window_size: 7,
            k1: 0.01,
            k2: 0.03,
        }
    }
}

fn reflect_index(mut index: isize, len: isize) -> usize {
    loop {
        if index < 0 {
            index = -index - 1;
        } else if index >= len {
            index = 2 * len - index - 1;
        } else {
            return index as usize;
        }
    }
}
