//! Processed-image descriptors and the transforms that produce them.

use serde::{Deserialize, Serialize};

/// Layout strategy requested from the image pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageLayout {
    /// Never wider than the requested width; scales down on smaller viewports.
    Constrained,
    Fixed,
    FullWidth,
}

impl ImageLayout {
    pub fn query_name(self) -> &'static str {
        match self {
            ImageLayout::Constrained => "CONSTRAINED",
            ImageLayout::Fixed => "FIXED",
            ImageLayout::FullWidth => "FULL_WIDTH",
        }
    }
}

/// Output encodings. `Auto` keeps the source format and acts as the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Auto,
    Webp,
}

impl ImageFormat {
    pub fn query_name(self) -> &'static str {
        match self {
            ImageFormat::Auto => "AUTO",
            ImageFormat::Webp => "WEBP",
        }
    }

    /// File extension to emit, `None` when the source extension is kept.
    pub fn extension(self) -> Option<&'static str> {
        match self {
            ImageFormat::Auto => None,
            ImageFormat::Webp => Some("webp"),
        }
    }
}

/// A named transform over a fixed source asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTransform {
    /// Source path relative to the asset root.
    pub source: String,
    pub width: u32,
    pub quality: u8,
    pub layout: ImageLayout,
    pub formats: Vec<ImageFormat>,
}

impl ImageTransform {
    pub const PROFILE_PICTURE_SOURCE: &'static str = "images/profile-picture.png";

    /// The author profile picture: 300px wide, quality 60, WebP with automatic fallback.
    pub fn profile_picture() -> Self {
        Self {
            source: Self::PROFILE_PICTURE_SOURCE.to_string(),
            width: 300,
            quality: 60,
            layout: ImageLayout::Constrained,
            formats: vec![ImageFormat::Auto, ImageFormat::Webp],
        }
    }
}

/// Multi-resolution, multi-format description of a processed image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDescriptor {
    pub layout: ImageLayout,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    pub images: ImageSources,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSources {
    pub fallback: ImageFallback,
    #[serde(default)]
    pub sources: Vec<ImageSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFallback {
    pub src: String,
    pub src_set: String,
    pub sizes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSource {
    pub src_set: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub sizes: String,
}

impl ImageDescriptor {
    /// Single URL for consumers that do not need the full source set.
    pub fn src(&self) -> &str {
        &self.images.fallback.src
    }
}
