//! # Image Processing Module
//!
//! This module optimizes raster images in memory with the `image` crate:
//! decode, normalize the color mode, resize within the job's bounds and
//! re-encode as JPEG.
//!
//! ## Pipeline:
//! 1. **Decode**: load the source bytes (PNG or JPEG input)
//! 2. **Flatten**: composite any alpha channel onto a white background;
//!    convert every other color mode to 8-bit RGB
//! 3. **Resize**: scale down to fit the optional max width/height bounds,
//!    preserving aspect ratio; never upscale past the original dimensions
//! 4. **Encode**: JPEG at the job's quality (1-100), Lanczos3 resampling
//!
//! ## Error handling:
//! Decode and encode failures surface as `OptimizeError::Image`, read/write
//! failures as `OptimizeError::Io`. The orchestrator catches both at the
//! per-job boundary, so one corrupt image never aborts the run.

use crate::config::ImageJob;
use crate::error::OptimizeError;
use crate::optimizer::JobOutcome;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, GenericImageView, Rgb, RgbImage};
use std::path::Path;
use tracing::{debug, info};

/// Stateless image optimizer; all parameters come from the job.
pub struct ImageProcessor;

impl ImageProcessor {
    /// Run one image job: decode, flatten, resize within bounds, encode
    /// JPEG, write.
    ///
    /// `base_dir` anchors the job's relative paths. With `dry_run` set the
    /// full transform still runs but the output file is not written.
    pub async fn optimize(
        base_dir: &Path,
        job: &ImageJob,
        dry_run: bool,
    ) -> Result<JobOutcome, OptimizeError> {
        let input_path = base_dir.join(&job.input);
        let output_path = base_dir.join(&job.output);

        let input_bytes = tokio::fs::read(&input_path).await?;
        let original_size = input_bytes.len() as u64;

        let img = image::load_from_memory(&input_bytes)?;
        let (orig_w, orig_h) = img.dimensions();
        debug!(
            "{}: {}x{}, {:?}",
            input_path.display(),
            orig_w,
            orig_h,
            img.color()
        );

        let rgb = flatten_to_rgb(img);

        let (target_w, target_h) =
            target_dimensions(orig_w, orig_h, job.max_width, job.max_height);
        let rgb = if (target_w, target_h) != (orig_w, orig_h) {
            debug!("Resizing to {}x{}", target_w, target_h);
            image::imageops::resize(&rgb, target_w, target_h, FilterType::Lanczos3)
        } else {
            rgb
        };

        let encoded = encode_jpeg(&rgb, job.quality)?;
        let optimized_size = encoded.len() as u64;

        if dry_run {
            debug!("Dry run: not writing {}", output_path.display());
        } else {
            if let Some(parent) = output_path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&output_path, &encoded).await?;
        }

        info!(
            "{} ({}x{}) -> {} ({}x{}): {} -> {} bytes",
            input_path.display(),
            orig_w,
            orig_h,
            output_path.display(),
            target_w,
            target_h,
            original_size,
            optimized_size
        );

        Ok(JobOutcome {
            original_size,
            optimized_size,
        })
    }
}

/// Compute output dimensions that fit the optional bounds while preserving
/// aspect ratio. A scale above 1.0 is clamped: images are never upscaled.
pub fn target_dimensions(
    width: u32,
    height: u32,
    max_width: Option<u32>,
    max_height: Option<u32>,
) -> (u32, u32) {
    let scale_w = max_width.map(|m| m as f64 / width as f64).unwrap_or(1.0);
    let scale_h = max_height.map(|m| m as f64 / height as f64).unwrap_or(1.0);
    let scale = scale_w.min(scale_h).min(1.0);

    if scale >= 1.0 {
        return (width, height);
    }

    let target_w = ((width as f64 * scale).round() as u32).max(1);
    let target_h = ((height as f64 * scale).round() as u32).max(1);
    (target_w, target_h)
}

/// Convert any color mode to 8-bit RGB. Pixels with an alpha channel are
/// composited onto a white background, matching how the images render on
/// the site's white pages.
pub fn flatten_to_rgb(img: DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }

    let rgba = img.to_rgba8();
    let mut rgb = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let blend =
            |c: u8| ((c as u16 * a as u16 + 255u16 * (255 - a) as u16) / 255) as u8;
        rgb.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    rgb
}

/// Encode an RGB image as JPEG at the given quality (1-100).
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, OptimizeError> {
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder.encode(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::Rgb8,
    )?;
    Ok(buf)
}
