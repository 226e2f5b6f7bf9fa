use std::path::PathBuf;

use change_highlight::{BatchConfig, BatchProcessor, error::Result, report::JsonReport};
use clap::Parser;
use log::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Box the regions that changed between before/after photo pairs")]
struct Args {
    /// Directory holding `<name>.jpg` / `<name>~2.jpg` pairs
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory annotated `<name>~3.jpg` results are written to
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with batch settings; flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Regions with an area at or below this are ignored
    #[arg(long)]
    min_area: Option<f64>,

    /// Box outline width in pixels
    #[arg(long)]
    stroke_width: Option<u32>,

    /// Process pairs in parallel
    #[arg(long)]
    parallel: bool,

    /// Write a JSON summary of the run to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<(BatchConfig, Option<PathBuf>)> {
        let mut config = match &self.config {
            Some(path) => BatchConfig::from_json_file(path)?,
            None => BatchConfig::default(),
        };

        if let Some(input) = self.input {
            config.input_dir = input;
        }
        if let Some(output) = self.output {
            config.output_dir = output;
        }
        if let Some(min_area) = self.min_area {
            config.highlight.min_region_area = min_area;
        }
        if let Some(stroke_width) = self.stroke_width {
            config.highlight.stroke_width = stroke_width;
        }
        config.parallel |= self.parallel;

        Ok((config, self.report))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (config, report_path) = Args::parse().into_config()?;
    let processor = BatchProcessor::new(config)?;
    let summary = processor.run()?;

    info!(
        "Done: {} of {} pairs saved, {} failed.",
        summary.saved, summary.total_pairs, summary.failed
    );

    if let Some(path) = report_path {
        JsonReport::from(&summary).write(&path)?;
        info!("Report written to {}", path.display());
    }

    Ok(())
}
