//! # Error Types Module
//!
//! This module defines all the custom error types of the application.
//!
//! ## Responsibilities:
//! - Defines the `OptimizeError` enum covering every failure category
//! - Provides descriptive, structured error messages
//! - Integrates with `thiserror` for automatic error conversion
//! - Keeps the failing context via source-error chaining
//!
//! ## Error categories:
//! - `Io`: I/O errors (missing files, permissions, etc.)
//! - `Image`: image decode/encode errors (corrupt files, codec failures)
//! - `UnsupportedFormat`: an asset kind the minifier does not handle
//! - `Validation`: invalid configuration or job parameters
//!
//! ## Example:
//! ```ignore
//! if quality == 0 || quality > 100 {
//!     return Err(OptimizeError::Validation("quality must be 1-100".to_string()));
//! }
//! ```

/// Custom error types for asset optimization
#[derive(thiserror::Error, Debug)]
pub enum OptimizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported asset type: {0}")]
    UnsupportedFormat(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
