//! # Configuration Management Module
//!
//! This module handles all application configuration.
//!
//! ## Responsibilities:
//! - Defines the `Config` struct holding the full job list for one run
//! - Defines `MinifyJob` and `ImageJob`, the per-file work descriptions
//! - Provides robust validation of job parameters
//! - Supports loading/saving the job manifest from/to a JSON file
//! - Provides a default job set matching the site's standard assets
//!
//! ## Job model:
//! - `MinifyJob`: (input, output, kind) — kind may be omitted and is then
//!   inferred from the input extension at run time
//! - `ImageJob`: (input, output, max_width, max_height, quality)
//! - All job paths are relative to the asset directory passed on the CLI
//!
//! ## Validation:
//! - JPEG quality must be 1-100 for every image job
//! - Job paths must be non-empty and relative
//! - A job may not write over its own input
//!
//! ## Example:
//! ```ignore
//! let config = Config {
//!     dry_run: true,
//!     ..Default::default()
//! };
//! config.validate()?;
//! ```

use crate::error::OptimizeError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The kind of text asset a minify job operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Css,
    Js,
}

impl AssetKind {
    /// Infer the asset kind from a file extension.
    ///
    /// Returns `OptimizeError::UnsupportedFormat` for anything that is not
    /// `.css` or `.js`, so a mistyped job fails on its own without touching
    /// the rest of the run.
    pub fn from_extension(path: &Path) -> Result<Self, OptimizeError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "css" => Ok(AssetKind::Css),
            "js" | "mjs" => Ok(AssetKind::Js),
            other => Err(OptimizeError::UnsupportedFormat(format!(
                "{} ({})",
                path.display(),
                if other.is_empty() { "no extension" } else { other }
            ))),
        }
    }
}

/// One text-minification job: read `input`, minify, write `output`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinifyJob {
    /// Input file, relative to the asset directory
    pub input: PathBuf,
    /// Output file, relative to the asset directory
    pub output: PathBuf,
    /// Asset kind; inferred from the input extension when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AssetKind>,
}

/// One image-optimization job: decode `input`, normalize color mode,
/// resize within the given bounds and re-encode as JPEG at `quality`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageJob {
    /// Input image, relative to the asset directory
    pub input: PathBuf,
    /// Output JPEG, relative to the asset directory
    pub output: PathBuf,
    /// Maximum output width in pixels (no bound when omitted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
    /// Maximum output height in pixels (no bound when omitted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<u32>,
    /// JPEG quality (1-100)
    pub quality: u8,
}

/// Configuration for one optimization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Text assets to minify
    pub minify_jobs: Vec<MinifyJob>,
    /// Images to resize/recompress
    pub image_jobs: Vec<ImageJob>,
    /// Dry run - transform but don't write output files
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for Config {
    /// The site's standard asset set: the two text bundles plus the three
    /// portfolio images, with the display-size-derived bounds (logo shown at
    /// 40px gets a 3x bound for high-DPI screens, the portrait a 2x bound).
    fn default() -> Self {
        Self {
            minify_jobs: vec![
                MinifyJob {
                    input: PathBuf::from("style.css"),
                    output: PathBuf::from("style.min.css"),
                    kind: Some(AssetKind::Css),
                },
                MinifyJob {
                    input: PathBuf::from("script.js"),
                    output: PathBuf::from("script.min.js"),
                    kind: Some(AssetKind::Js),
                },
            ],
            image_jobs: vec![
                ImageJob {
                    input: PathBuf::from("images/okamuralogo.png"),
                    output: PathBuf::from("images/okamuralogo_optimized.jpg"),
                    max_width: None,
                    max_height: Some(120),
                    quality: 90,
                },
                ImageJob {
                    input: PathBuf::from("images/kenjiTop.png"),
                    output: PathBuf::from("images/kenjiTop_optimized.jpg"),
                    max_width: Some(600),
                    max_height: Some(600),
                    quality: 85,
                },
                ImageJob {
                    input: PathBuf::from("images/hime.jpg"),
                    output: PathBuf::from("images/hime_optimized.jpg"),
                    max_width: Some(800),
                    max_height: None,
                    quality: 80,
                },
            ],
            dry_run: false,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        for job in &self.minify_jobs {
            Self::validate_job_paths(&job.input, &job.output)?;
        }

        for job in &self.image_jobs {
            Self::validate_job_paths(&job.input, &job.output)?;

            if job.quality == 0 || job.quality > 100 {
                return Err(anyhow::anyhow!(
                    "JPEG quality must be between 1 and 100 for {}",
                    job.input.display()
                ));
            }

            if job.max_width == Some(0) || job.max_height == Some(0) {
                return Err(anyhow::anyhow!(
                    "Size bounds must be greater than 0 for {}",
                    job.input.display()
                ));
            }
        }

        Ok(())
    }

    fn validate_job_paths(input: &Path, output: &Path) -> Result<()> {
        if input.as_os_str().is_empty() || output.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("Job paths must not be empty"));
        }

        if input.is_absolute() || output.is_absolute() {
            return Err(anyhow::anyhow!(
                "Job paths must be relative to the asset directory: {}",
                input.display()
            ));
        }

        if input == output {
            return Err(anyhow::anyhow!(
                "Job would overwrite its own input: {}",
                input.display()
            ));
        }

        Ok(())
    }

    /// Load a job manifest from file, falling back to the default job set
    /// when the file does not exist
    pub async fn from_file(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the job manifest to file
    pub async fn save_to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    /// Total number of jobs in this run
    pub fn job_count(&self) -> usize {
        self.minify_jobs.len() + self.image_jobs.len()
    }
}
