//! Filesystem-backed image pipeline.
//!
//! Reads the intrinsic size of a source asset and describes the responsive
//! variants a build would publish for it. Pixels are never re-encoded; URLs
//! are content addressed so the same source and transform always produce the
//! same descriptor.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use imagesize::{ImageError, ImageSize};
use metrics::counter;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::application::images::{ImagePipeline, ImagePipelineError};
use crate::domain::image::{
    ImageDescriptor, ImageFallback, ImageFormat, ImageLayout, ImageSource, ImageSources,
    ImageTransform,
};

const METRIC_IMAGE_TRANSFORM_TOTAL: &str = "sitemeta_image_transform_total";
const PUBLIC_PREFIX: &str = "/static";
const DENSITIES: [f64; 4] = [0.25, 0.5, 1.0, 2.0];
const DIGEST_HEX_LEN: usize = 16;

pub struct LocalImagePipeline {
    root: PathBuf,
}

impl LocalImagePipeline {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read_source(&self, source: &str) -> Result<(PathBuf, Vec<u8>), ImagePipelineError> {
        let path = self.root.join(source);
        match std::fs::read(&path) {
            Ok(bytes) => Ok((path, bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(ImagePipelineError::Missing { path })
            }
            Err(err) => Err(ImagePipelineError::Io(err)),
        }
    }

    fn image_size(path: &Path, bytes: &[u8]) -> Result<ImageSize, ImagePipelineError> {
        match imagesize::blob_size(bytes) {
            Ok(size) => Ok(size),
            Err(ImageError::NotSupported) => Err(ImagePipelineError::Unsupported {
                path: path.to_path_buf(),
            }),
            Err(ImageError::CorruptedImage) => {
                Err(ImagePipelineError::Probe("corrupted image".to_string()))
            }
            Err(ImageError::IoError(err)) => Err(ImagePipelineError::Io(err)),
        }
    }
}

impl ImagePipeline for LocalImagePipeline {
    fn transform(&self, transform: &ImageTransform) -> Result<ImageDescriptor, ImagePipelineError> {
        check_transform(transform)?;

        let (path, bytes) = self.read_source(&transform.source)?;
        let size = Self::image_size(&path, &bytes)?;
        let source_width = u32::try_from(size.width)
            .ok()
            .filter(|width| *width > 0)
            .ok_or_else(|| ImagePipelineError::Probe("image has no width".to_string()))?;
        let source_height = u32::try_from(size.height)
            .ok()
            .filter(|height| *height > 0)
            .ok_or_else(|| ImagePipelineError::Probe("image has no height".to_string()))?;

        let (stem, source_extension) = split_file_name(&path)?;
        let digest = transform_digest(&bytes, transform);

        let width = match transform.layout {
            ImageLayout::FullWidth => source_width,
            ImageLayout::Constrained | ImageLayout::Fixed => transform.width.min(source_width),
        };
        let height = scaled_height(width, source_width, source_height);
        let widths = variant_widths(transform.layout, width, source_width);
        let sizes = sizes_attribute(transform.layout, width);

        let fallback_format = transform
            .formats
            .iter()
            .copied()
            .find(|format| *format == ImageFormat::Auto)
            .unwrap_or(transform.formats[0]);
        let extension_for = |format: ImageFormat| {
            format
                .extension()
                .map(str::to_string)
                .unwrap_or_else(|| source_extension.clone())
        };
        let url_for = |variant_width: u32, extension: &str| {
            format!("{PUBLIC_PREFIX}/{digest}/{variant_width}/{stem}.{extension}")
        };
        let src_set_for = |extension: &str| {
            widths
                .iter()
                .map(|w| format!("{} {w}w", url_for(*w, extension)))
                .collect::<Vec<_>>()
                .join(",\n")
        };

        let fallback_extension = extension_for(fallback_format);
        let fallback = ImageFallback {
            src: url_for(width, &fallback_extension),
            src_set: src_set_for(&fallback_extension),
            sizes: sizes.clone(),
        };

        let sources = transform
            .formats
            .iter()
            .copied()
            .filter(|format| *format != fallback_format)
            .map(|format| {
                let extension = extension_for(format);
                ImageSource {
                    src_set: src_set_for(&extension),
                    mime_type: mime_guess::from_ext(&extension)
                        .first_or_octet_stream()
                        .essence_str()
                        .to_string(),
                    sizes: sizes.clone(),
                }
            })
            .collect();

        debug!(
            target = "infra::images",
            op = "images::transform",
            source = %path.display(),
            source_width,
            source_height,
            width,
            height,
            variants = widths.len(),
            "Image descriptor computed"
        );
        counter!(METRIC_IMAGE_TRANSFORM_TOTAL).increment(1);

        Ok(ImageDescriptor {
            layout: transform.layout,
            width,
            height,
            background_color: None,
            images: ImageSources { fallback, sources },
        })
    }
}

fn check_transform(transform: &ImageTransform) -> Result<(), ImagePipelineError> {
    if transform.width == 0 {
        return Err(ImagePipelineError::InvalidTransform(
            "width must be greater than zero".to_string(),
        ));
    }
    if !(1..=100).contains(&transform.quality) {
        return Err(ImagePipelineError::InvalidTransform(format!(
            "quality must be within 1..=100, got {}",
            transform.quality
        )));
    }
    if transform.formats.is_empty() {
        return Err(ImagePipelineError::InvalidTransform(
            "at least one output format is required".to_string(),
        ));
    }
    Ok(())
}

fn split_file_name(path: &Path) -> Result<(String, String), ImagePipelineError> {
    let stem = path.file_stem().and_then(|stem| stem.to_str());
    let extension = path.extension().and_then(|ext| ext.to_str());
    match (stem, extension) {
        (Some(stem), Some(extension)) if !stem.is_empty() => {
            Ok((stem.to_string(), extension.to_ascii_lowercase()))
        }
        _ => Err(ImagePipelineError::Unsupported {
            path: path.to_path_buf(),
        }),
    }
}

fn transform_digest(bytes: &[u8], transform: &ImageTransform) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.update(transform.quality.to_be_bytes());
    hasher.update(transform.layout.query_name().as_bytes());
    let mut encoded = hex::encode(hasher.finalize());
    encoded.truncate(DIGEST_HEX_LEN);
    encoded
}

fn scaled_height(width: u32, source_width: u32, source_height: u32) -> u32 {
    let scaled = (u64::from(width) * u64::from(source_height) + u64::from(source_width) / 2)
        / u64::from(source_width);
    u32::try_from(scaled.max(1)).unwrap_or(u32::MAX)
}

/// Widths published for a layout, ascending and never wider than the source.
fn variant_widths(layout: ImageLayout, width: u32, source_width: u32) -> Vec<u32> {
    let mut widths: Vec<u32> = match layout {
        ImageLayout::Fixed => vec![width, width.saturating_mul(2)],
        ImageLayout::Constrained | ImageLayout::FullWidth => DENSITIES
            .iter()
            .map(|density| (f64::from(width) * density).round() as u32)
            .collect(),
    };
    widths.retain(|w| *w > 0 && *w <= source_width);
    if !widths.contains(&width) {
        widths.push(width);
    }
    widths.sort_unstable();
    widths.dedup();
    widths
}

fn sizes_attribute(layout: ImageLayout, width: u32) -> String {
    match layout {
        ImageLayout::Constrained => format!("(min-width: {width}px) {width}px, 100vw"),
        ImageLayout::Fixed => format!("{width}px"),
        ImageLayout::FullWidth => "100vw".to_string(),
    }
}
