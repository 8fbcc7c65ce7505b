//! # Progress Tracking and Statistics Module
//!
//! This module handles progress reporting and run statistics.
//!
//! ## Responsibilities:
//! - Visual progress bar with `indicatif` for real-time feedback
//! - Cumulative statistics (jobs processed, bytes saved, errors)
//! - Final summary with the overall reduction percentage
//!
//! ## Tracked statistics:
//! - **files_processed**: all jobs attempted
//! - **files_optimized**: jobs that produced an output
//! - **files_skipped**: jobs skipped (missing input)
//! - **total_bytes_saved**: bytes saved across all optimized jobs
//! - **total_original_size**: combined size of all optimized inputs
//! - **errors**: jobs that failed
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:00:02] [====================>-------------------] 3/5 (60%) ✅ style.css: 38.2% saved
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Manages progress reporting for asset optimization
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_jobs: u64) -> Self {
        let bar = ProgressBar::new(total_jobs);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update progress with a message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

/// Statistics tracker for optimization results
#[derive(Debug, Default)]
pub struct OptimizationStats {
    pub files_processed: usize,
    pub files_optimized: usize,
    pub files_skipped: usize,
    pub total_bytes_saved: u64,
    pub total_original_size: u64,
    pub errors: usize,
}

impl OptimizationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_optimized(&mut self, original_size: u64, new_size: u64) {
        self.files_processed += 1;
        self.files_optimized += 1;
        self.total_original_size += original_size;
        self.total_bytes_saved += original_size.saturating_sub(new_size);
    }

    pub fn add_skipped(&mut self) {
        self.files_processed += 1;
        self.files_skipped += 1;
    }

    pub fn add_error(&mut self) {
        self.files_processed += 1;
        self.errors += 1;
    }

    pub fn overall_reduction_percent(&self) -> f64 {
        if self.total_original_size > 0 {
            (self.total_bytes_saved as f64 / self.total_original_size as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Processed: {} jobs | Optimized: {} | Skipped: {} | Errors: {} | Total saved: {} ({:.2}%)",
            self.files_processed,
            self.files_optimized,
            self.files_skipped,
            self.errors,
            crate::file_manager::FileManager::format_size(self.total_bytes_saved),
            self.overall_reduction_percent()
        )
    }
}
