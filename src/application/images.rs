//! Image pipeline contract used to resolve named image assets.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::image::{ImageDescriptor, ImageTransform};

#[derive(Debug, Error)]
pub enum ImagePipelineError {
    #[error("image asset `{}` not found", path.display())]
    Missing { path: PathBuf },
    #[error("failed to read image asset: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported image format for `{}`", path.display())]
    Unsupported { path: PathBuf },
    #[error("failed to inspect image: {0}")]
    Probe(String),
    #[error("invalid transform: {0}")]
    InvalidTransform(String),
}

/// Turns a fixed source asset into a processed-image descriptor.
pub trait ImagePipeline: Send + Sync {
    fn transform(&self, transform: &ImageTransform) -> Result<ImageDescriptor, ImagePipelineError>;
}
