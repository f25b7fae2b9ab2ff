//! Append-only list of players who escaped the labyrinth.

use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use minotaur_session::SurvivorLedger;

/// Survivor ledger stored as one name per line in a text file.
#[derive(Debug)]
pub(crate) struct SurvivorsFile {
    path: PathBuf,
}

impl SurvivorsFile {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl SurvivorLedger for SurvivorsFile {
    fn record(&mut self, name: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open survivors file {}", self.path.display()))?;
        writeln!(file, "{}", name.trim())
            .with_context(|| format!("failed to append to {}", self.path.display()))?;
        Ok(())
    }
}
