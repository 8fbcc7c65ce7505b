//! # Text Minification Module
//!
//! This module runs single minification jobs end to end.
//!
//! ## Responsibilities:
//! - Dispatches a job to the CSS or JS pass based on its `AssetKind`
//! - Infers the kind from the input extension when the job omits it
//! - Reads input as UTF-8, writes the minified output (unless dry-run)
//! - Reports the byte sizes before and after for the stats layer
//!
//! ## Submodules:
//! - `css`: regex-based CSS compression
//! - `js`: JS compression with string-literal masking

pub mod css;
pub mod js;

pub use css::minify_css;
pub use js::minify_js;

use crate::config::{AssetKind, MinifyJob};
use crate::error::OptimizeError;
use crate::optimizer::JobOutcome;
use std::path::Path;
use tracing::{debug, info};

/// Minify the text content according to the asset kind.
pub fn minify(kind: AssetKind, content: &str) -> String {
    match kind {
        AssetKind::Css => minify_css(content),
        AssetKind::Js => minify_js(content),
    }
}

/// Run one minification job: read, transform, write, measure.
///
/// `base_dir` anchors the job's relative paths. With `dry_run` set the
/// transform still runs (so errors surface) but nothing is written.
pub async fn minify_file(
    base_dir: &Path,
    job: &MinifyJob,
    dry_run: bool,
) -> Result<JobOutcome, OptimizeError> {
    let input_path = base_dir.join(&job.input);
    let output_path = base_dir.join(&job.output);

    let kind = match job.kind {
        Some(kind) => kind,
        None => AssetKind::from_extension(&job.input)?,
    };

    let content = tokio::fs::read_to_string(&input_path).await?;
    let original_size = content.len() as u64;

    let minified = minify(kind, &content);
    let minified_size = minified.len() as u64;

    if dry_run {
        debug!("Dry run: not writing {}", output_path.display());
    } else {
        if let Some(parent) = output_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&output_path, &minified).await?;
    }

    info!(
        "{} -> {}: {} -> {} bytes",
        input_path.display(),
        output_path.display(),
        original_size,
        minified_size
    );

    Ok(JobOutcome {
        original_size,
        optimized_size: minified_size,
    })
}
