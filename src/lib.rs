//! # Site Asset Optimizer Library
//!
//! This is the main library module exposing all public APIs.
//!
//! ## Responsibilities:
//! - Defines the modular structure of the application
//! - Exposes the main types and functions via re-exports
//! - Provides a clean interface for main.rs and other consumers
//!
//! ## Module architecture:
//! - `config`: job manifest, validation and the default job set
//! - `error`: custom error types for the different operations
//! - `minifier`: CSS/JS text compression with literal protection
//! - `image_processor`: image resize and JPEG recompression
//! - `file_manager`: file-size formatting helpers
//! - `optimizer`: main orchestrator for one run
//! - `progress`: progress tracking and statistics
//!
//! ## Usage:
//! ```ignore
//! use site_asset_optimizer::{AssetOptimizer, Config};
//!
//! let config = Config::default();
//! let optimizer = AssetOptimizer::new(&asset_dir, config)?;
//! let stats = optimizer.run().await?;
//! ```

pub mod config;
pub mod error;
pub mod file_manager;
pub mod image_processor;
pub mod minifier;
pub mod optimizer;
pub mod progress;

pub use config::{AssetKind, Config, ImageJob, MinifyJob};
pub use error::OptimizeError;
pub use optimizer::AssetOptimizer;
