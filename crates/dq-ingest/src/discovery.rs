use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Fixed directory layout under one data root:
/// `raw/` inputs, `processed/` cleaned outputs, `violations/` audit files.
#[derive(Debug, Clone)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn raw_path(&self, table: &str) -> PathBuf {
        self.root.join("raw").join(format!("{table}.csv"))
    }

    pub fn cleaned_path(&self, table: &str) -> PathBuf {
        self.root
            .join("processed")
            .join(format!("{table}_cleaned.csv"))
    }

    pub fn violations_path(&self, check: &str) -> PathBuf {
        self.root.join("violations").join(format!("{check}.csv"))
    }

    pub fn summary_path(&self) -> PathBuf {
        self.root.join("data_cleaning_summary.csv")
    }

    pub fn report_path(&self) -> PathBuf {
        self.root.join("run_report.json")
    }

    /// A raw source that does not exist is skipped, not an error.
    pub fn raw_source(&self, table: &str) -> Option<PathBuf> {
        let path = self.raw_path(table);
        if path.exists() { Some(path) } else { None }
    }

    pub fn ensure_output_dirs(&self) -> Result<()> {
        for dir in ["processed", "violations"] {
            let path = self.root.join(dir);
            fs::create_dir_all(&path)
                .with_context(|| format!("create dir: {}", path.display()))?;
        }
        Ok(())
    }
}
