use std::{
    fs,
    path::{Path, PathBuf},
};

use image::{ImageError, ImageReader, RgbImage};
use log::{debug, info, warn};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::{Deserialize, Serialize};

use crate::{
    HighlightConfig,
    detection::ChangeHighlighter,
    error::{ChangeDetectError, Result},
    naming::NamingConvention,
    pairs::{ImagePair, PairResolver},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub parallel: bool,
    pub naming: NamingConvention,
    pub highlight: HighlightConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            parallel: false,
            naming: NamingConvention::default(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl BatchConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PairStatus {
    Saved {
        output_path: PathBuf,
        region_count: usize,
        similarity: f64,
    },
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct PairOutcome {
    pub pair: ImagePair,
    #[serde(flatten)]
    pub status: PairStatus,
}

impl PairOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self.status, PairStatus::Saved { .. })
    }
}

#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub total_pairs: usize,
    pub saved: usize,
    pub failed: usize,
    pub outcomes: Vec<PairOutcome>,
}

impl BatchSummary {
    fn from_outcomes(outcomes: Vec<PairOutcome>) -> Self {
        let saved = outcomes.iter().filter(|o| o.is_saved()).count();
        Self {
            total_pairs: outcomes.len(),
            saved,
            failed: outcomes.len() - saved,
            outcomes,
        }
    }
}

pub fn list_image_files<P: AsRef<Path>>(dir: P) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => debug!("skipping non UTF-8 file name {:?}", name),
        }
    }

    names.sort();
    Ok(names)
}

pub struct BatchProcessor {
    config: BatchConfig,
    resolver: PairResolver,
    highlighter: ChangeHighlighter,
}

impl BatchProcessor {
    pub fn new(config: BatchConfig) -> Result<Self> {
        let highlighter = ChangeHighlighter::new(config.highlight.clone())?;
        let resolver = PairResolver::new(config.naming.clone());

        Ok(Self {
            config,
            resolver,
            highlighter,
        })
    }

    pub fn ensure_output_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.config.output_dir)?;
        Ok(())
    }

    pub fn discover_pairs(&self) -> Result<Vec<ImagePair>> {
        let files = list_image_files(&self.config.input_dir)?;
        Ok(self.resolver.resolve(&files))
    }

    pub fn run(&self) -> Result<BatchSummary> {
        self.ensure_output_dir()?;

        let pairs = self.discover_pairs()?;
        info!("Found {} image pairs.", pairs.len());

        let outcomes: Vec<PairOutcome> = if self.config.parallel {
            pairs.par_iter().map(|pair| self.process(pair)).collect()
        } else {
            pairs.iter().map(|pair| self.process(pair)).collect()
        };

        Ok(BatchSummary::from_outcomes(outcomes))
    }

    fn process(&self, pair: &ImagePair) -> PairOutcome {
        let status = match self.process_pair(pair) {
            Ok(status) => status,
            Err(err) => {
                warn!("Skipping {} / {}: {}", pair.before, pair.after, err);
                PairStatus::Failed {
                    reason: err.to_string(),
                }
            }
        };

        PairOutcome {
            pair: pair.clone(),
            status,
        }
    }

    pub fn process_pair(&self, pair: &ImagePair) -> Result<PairStatus> {
        let before = load_rgb(self.config.input_dir.join(&pair.before))?;
        let after = load_rgb(self.config.input_dir.join(&pair.after))?;

        if before.dimensions() != after.dimensions() {
            return Err(ChangeDetectError::DimensionMismatch {
                before: before.dimensions(),
                after: after.dimensions(),
            });
        }

        let result = self.highlighter.highlight(&before, &after)?;

        let output_path = self.config.output_dir.join(&pair.output);
        result
            .annotated
            .save(&output_path)
            .map_err(|source| ChangeDetectError::WriteFailed {
                path: output_path.clone(),
                source,
            })?;

        info!("Saved: {}", output_path.display());
        debug!(
            "{}: {} regions, similarity {:.4}",
            pair.before,
            result.regions.len(),
            result.score
        );

        Ok(PairStatus::Saved {
            output_path,
            region_count: result.regions.len(),
            similarity: result.score,
        })
    }
}

// format comes from the file contents, not the extension
fn load_rgb(path: PathBuf) -> Result<RgbImage> {
    let decoded = ImageReader::open(&path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(ImageError::IoError)
        .and_then(|reader| reader.decode());

    match decoded {
        Ok(image) => Ok(image.to_rgb8()),
        Err(source) => Err(ChangeDetectError::UnreadableImage { path, source }),
    }
}
