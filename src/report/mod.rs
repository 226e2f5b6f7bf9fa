pub mod visualization;

use std::{fs, path::Path};

use serde::Serialize;

use crate::{
    batch::{BatchSummary, PairOutcome},
    error::Result,
};

#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub total_pairs: usize,
    pub saved: usize,
    pub failed: usize,
    pub pairs: &'a [PairOutcome],
}

impl<'a> From<&'a BatchSummary> for JsonReport<'a> {
    fn from(summary: &'a BatchSummary) -> Self {
        Self {
            total_pairs: summary.total_pairs,
            saved: summary.saved,
            failed: summary.failed,
            pairs: &summary.outcomes,
        }
    }
}

impl JsonReport<'_> {
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
