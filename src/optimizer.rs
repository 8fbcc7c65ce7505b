//! # Asset Optimizer Orchestrator
//!
//! This module drives one optimization run over the configured job list.
//!
//! ## Execution flow:
//! 1. Validate the configuration
//! 2. Run every minify job, then every image job, strictly in order
//! 3. Update the progress bar and statistics after each job
//! 4. Print the final summary
//!
//! ## Error boundary:
//! Each job is independent and idempotent, so failures never abort the run:
//! - missing input file: warning, job counted as skipped
//! - unsupported asset kind: error for that job only
//! - read/transform/write failure: error logged, next job proceeds
//!
//! No retries and no cleanup of partial output; re-running regenerates the
//! same files from the same inputs.

use crate::{
    config::Config,
    file_manager::FileManager,
    image_processor::ImageProcessor,
    minifier,
    progress::{OptimizationStats, ProgressManager},
};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Byte sizes measured for one completed job
#[derive(Debug, Clone, Copy)]
pub struct JobOutcome {
    pub original_size: u64,
    pub optimized_size: u64,
}

impl JobOutcome {
    /// Percentage saved relative to the input size
    pub fn reduction_percent(&self) -> f64 {
        FileManager::calculate_reduction(self.original_size, self.optimized_size)
    }
}

/// Main asset optimizer orchestrator
pub struct AssetOptimizer {
    config: Config,
    asset_dir: PathBuf,
}

impl AssetOptimizer {
    /// Create a new optimizer instance for the given asset directory
    pub fn new(asset_dir: &Path, config: Config) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            asset_dir: asset_dir.to_path_buf(),
        })
    }

    /// Run the optimization process over every configured job
    pub async fn run(&self) -> Result<OptimizationStats> {
        info!(
            "Starting asset optimization in: {}",
            self.asset_dir.display()
        );
        info!(
            "Jobs: {} text, {} image",
            self.config.minify_jobs.len(),
            self.config.image_jobs.len()
        );

        if self.config.dry_run {
            info!("🧪 Dry run mode: no files will be written");
        }

        let progress = ProgressManager::new(self.config.job_count() as u64);
        let mut stats = OptimizationStats::new();

        for job in &self.config.minify_jobs {
            if self.input_missing(&job.input, &mut stats, &progress) {
                continue;
            }
            let result = minifier::minify_file(&self.asset_dir, job, self.config.dry_run)
                .await
                .map_err(anyhow::Error::from);
            self.record(&job.input, result, &mut stats, &progress);
        }

        for job in &self.config.image_jobs {
            if self.input_missing(&job.input, &mut stats, &progress) {
                continue;
            }
            let result = ImageProcessor::optimize(&self.asset_dir, job, self.config.dry_run)
                .await
                .map_err(anyhow::Error::from);
            self.record(&job.input, result, &mut stats, &progress);
        }

        progress.finish(&stats.format_summary());
        info!("{}", stats.format_summary());

        Ok(stats)
    }

    /// A missing input is a warning and a skip, never a failure.
    fn input_missing(
        &self,
        input: &Path,
        stats: &mut OptimizationStats,
        progress: &ProgressManager,
    ) -> bool {
        let path = self.asset_dir.join(input);
        if path.exists() {
            return false;
        }

        warn!("Input not found, skipping: {}", path.display());
        stats.add_skipped();
        progress.update(&format!("⏩ {}: missing, skipped", Self::file_name(input)));
        true
    }

    /// Fold one job result into the statistics and the progress bar.
    fn record(
        &self,
        input: &Path,
        result: Result<JobOutcome>,
        stats: &mut OptimizationStats,
        progress: &ProgressManager,
    ) {
        match result {
            Ok(outcome) => {
                stats.add_optimized(outcome.original_size, outcome.optimized_size);
                progress.update(&format!(
                    "✅ {}: {:.1}% saved",
                    Self::file_name(input),
                    outcome.reduction_percent()
                ));
            }
            Err(e) => {
                error!("Failed to process {}: {}", input.display(), e);
                stats.add_error();
                progress.update(&format!("❌ {}: error", Self::file_name(input)));
            }
        }
    }

    fn file_name(path: &Path) -> String {
        path.file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AssetKind, ImageJob, MinifyJob};
    use image::{DynamicImage, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn write_png(path: &Path, width: u32, height: u32) {
        let img = RgbaImage::from_pixel(width, height, Rgba([90, 120, 30, 255]));
        DynamicImage::ImageRgba8(img).save(path).unwrap();
    }

    fn test_config() -> Config {
        Config {
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
            image_jobs: vec![ImageJob {
                input: PathBuf::from("photo.png"),
                output: PathBuf::from("photo_optimized.jpg"),
                max_width: Some(100),
                max_height: None,
                quality: 80,
            }],
            dry_run: false,
        }
    }

    #[tokio::test]
    async fn test_full_run_produces_all_outputs() {
        let temp_dir = TempDir::new().unwrap();
        tokio::fs::write(
            temp_dir.path().join("style.css"),
            "/* site */\nbody {  margin : 0 ; }",
        )
        .await
        .unwrap();
        tokio::fs::write(
            temp_dir.path().join("script.js"),
            "let s = 'a  b'; // note\n",
        )
        .await
        .unwrap();
        write_png(&temp_dir.path().join("photo.png"), 200, 100);

        let optimizer = AssetOptimizer::new(temp_dir.path(), test_config()).unwrap();
        let stats = optimizer.run().await.unwrap();

        assert_eq!(stats.files_processed, 3);
        assert_eq!(stats.files_optimized, 3);
        assert_eq!(stats.errors, 0);
        assert!(temp_dir.path().join("style.min.css").exists());
        assert!(temp_dir.path().join("script.min.js").exists());
        assert!(temp_dir.path().join("photo_optimized.jpg").exists());

        let css = tokio::fs::read_to_string(temp_dir.path().join("style.min.css"))
            .await
            .unwrap();
        assert_eq!(css, "body{margin:0;}");
    }

    #[tokio::test]
    async fn test_missing_input_is_skipped_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        // Only the JS input exists
        tokio::fs::write(temp_dir.path().join("script.js"), "let a = 1;")
            .await
            .unwrap();

        let optimizer = AssetOptimizer::new(temp_dir.path(), test_config()).unwrap();
        let stats = optimizer.run().await.unwrap();

        assert_eq!(stats.files_processed, 3);
        assert_eq!(stats.files_optimized, 1);
        assert_eq!(stats.files_skipped, 2);
        assert_eq!(stats.errors, 0);
        assert!(temp_dir.path().join("script.min.js").exists());
    }

    #[tokio::test]
    async fn test_failed_job_does_not_abort_remaining_jobs() {
        let temp_dir = TempDir::new().unwrap();
        tokio::fs::write(temp_dir.path().join("style.css"), "a { b : c ; }")
            .await
            .unwrap();
        tokio::fs::write(temp_dir.path().join("script.js"), "let a = 1;")
            .await
            .unwrap();
        // Present but undecodable: caught at the job boundary
        tokio::fs::write(temp_dir.path().join("photo.png"), b"not a png")
            .await
            .unwrap();

        let optimizer = AssetOptimizer::new(temp_dir.path(), test_config()).unwrap();
        let stats = optimizer.run().await.unwrap();

        assert_eq!(stats.files_optimized, 2);
        assert_eq!(stats.errors, 1);
        assert!(temp_dir.path().join("style.min.css").exists());
        assert!(temp_dir.path().join("script.min.js").exists());
        assert!(!temp_dir.path().join("photo_optimized.jpg").exists());
    }

    #[tokio::test]
    async fn test_unsupported_kind_fails_that_job_only() {
        let temp_dir = TempDir::new().unwrap();
        tokio::fs::write(temp_dir.path().join("data.txt"), "plain  text")
            .await
            .unwrap();
        tokio::fs::write(temp_dir.path().join("style.css"), "a { b : c ; }")
            .await
            .unwrap();

        let config = Config {
            minify_jobs: vec![
                MinifyJob {
                    input: PathBuf::from("data.txt"),
                    output: PathBuf::from("data.min.txt"),
                    kind: None,
                },
                MinifyJob {
                    input: PathBuf::from("style.css"),
                    output: PathBuf::from("style.min.css"),
                    kind: None,
                },
            ],
            image_jobs: vec![],
            dry_run: false,
        };

        let optimizer = AssetOptimizer::new(temp_dir.path(), config).unwrap();
        let stats = optimizer.run().await.unwrap();

        assert_eq!(stats.errors, 1);
        assert_eq!(stats.files_optimized, 1);
        assert!(temp_dir.path().join("style.min.css").exists());
        assert!(!temp_dir.path().join("data.min.txt").exists());
    }

    #[tokio::test]
    async fn test_rerun_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        tokio::fs::write(temp_dir.path().join("style.css"), "a {  b : c ; }")
            .await
            .unwrap();

        let config = Config {
            minify_jobs: vec![MinifyJob {
                input: PathBuf::from("style.css"),
                output: PathBuf::from("style.min.css"),
                kind: Some(AssetKind::Css),
            }],
            image_jobs: vec![],
            dry_run: false,
        };

        let optimizer = AssetOptimizer::new(temp_dir.path(), config).unwrap();
        optimizer.run().await.unwrap();
        let first = tokio::fs::read(temp_dir.path().join("style.min.css"))
            .await
            .unwrap();

        optimizer.run().await.unwrap();
        let second = tokio::fs::read(temp_dir.path().join("style.min.css"))
            .await
            .unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_invalid_config_rejected_at_construction() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = test_config();
        config.image_jobs[0].quality = 0;

        assert!(AssetOptimizer::new(temp_dir.path(), config).is_err());
    }
}
