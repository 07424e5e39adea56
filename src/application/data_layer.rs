//! Contract between the metadata projection and the external data layer.
//!
//! The projection asks for an explicit set of fields plus one image transform;
//! any provider that can answer [`MetadataQuery`] with the documented result
//! shape can back it.

use std::fmt::Write as _;

use serde_json::Value;
use thiserror::Error;

use crate::application::images::ImagePipelineError;
use crate::domain::image::ImageTransform;

/// Result key holding the site metadata selection.
pub const SITE_KEY: &str = "site";
pub const SITE_METADATA_KEY: &str = "siteMetadata";
/// Result key holding the resolved profile picture.
pub const PROFILE_PICTURE_KEY: &str = "authorProfilePicture";
pub const IMAGE_KEY: &str = "image";

#[derive(Debug, Error)]
pub enum DataLayerError {
    #[error("field `{path}` is not defined by the data layer")]
    UnknownField { path: String },
    #[error("field `{path}` has no sub-fields to select")]
    NotAnObject { path: String },
    #[error("failed to resolve image asset `{asset}`")]
    Asset {
        asset: String,
        #[source]
        source: ImagePipelineError,
    },
    #[error("failed to encode store: {0}")]
    Store(#[from] serde_json::Error),
}

/// A field selection, optionally with nested selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub name: &'static str,
    pub children: Vec<Selection>,
}

impl Selection {
    pub fn leaf(name: &'static str) -> Self {
        Self {
            name,
            children: Vec::new(),
        }
    }

    pub fn node(name: &'static str, children: Vec<Selection>) -> Self {
        Self { name, children }
    }

    fn leaves(names: &[&'static str]) -> Vec<Selection> {
        names.iter().copied().map(Selection::leaf).collect()
    }
}

/// Declarative query answered by a [`DataLayer`].
///
/// The result is a JSON object of the form
/// `{ "site": { "siteMetadata": { .. } }, "authorProfilePicture": { "image": { .. } } }`
/// where `siteMetadata` carries exactly the selected fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataQuery {
    pub site_metadata: Vec<Selection>,
    pub profile_picture: ImageTransform,
}

impl MetadataQuery {
    /// Everything the metadata projection consumes.
    pub fn site_metadata() -> Self {
        let site_info = Selection::node(
            "siteInfo",
            Selection::leaves(&[
                "title",
                "description",
                "metaTitle",
                "metaDescription",
                "url",
                "repositoryUrl",
                "githubCommentsRepository",
                "googleCustomSearchId",
            ]),
        );

        let mut author_fields =
            Selection::leaves(&["name", "description", "job", "email", "jobTitle"]);
        author_fields.push(Selection::node(
            "profiles",
            Selection::leaves(&["stackoverflow", "twitter", "linkedin", "github", "facebook"]),
        ));
        author_fields.push(Selection::node(
            "nicknames",
            Selection::leaves(&["twitter"]),
        ));
        let author_info = Selection::node("authorInfo", author_fields);

        let affiliates = Selection::node(
            "affiliates",
            Selection::leaves(&["tag", "courseTitle", "pitch", "courseLink"]),
        );

        Self {
            site_metadata: vec![site_info, author_info, affiliates],
            profile_picture: ImageTransform::profile_picture(),
        }
    }

    /// Render the query in GraphQL syntax, for diagnostics.
    pub fn to_graphql(&self) -> String {
        let mut out = String::from("query SiteMetadata {\n  site {\n    siteMetadata {\n");
        for selection in &self.site_metadata {
            write_selection(&mut out, selection, 3);
        }
        out.push_str("    }\n  }\n");

        let transform = &self.profile_picture;
        let formats = transform
            .formats
            .iter()
            .map(|format| format.query_name())
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            out,
            "  {PROFILE_PICTURE_KEY}: file(relativePath: {{ eq: \"{}\" }}) {{",
            transform.source
        );
        let _ = writeln!(
            out,
            "    {IMAGE_KEY}(width: {}, quality: {}, layout: {}, formats: [{formats}])",
            transform.width,
            transform.quality,
            transform.layout.query_name()
        );
        out.push_str("  }\n}\n");
        out
    }
}

fn write_selection(out: &mut String, selection: &Selection, depth: usize) {
    let indent = "  ".repeat(depth);
    if selection.children.is_empty() {
        let _ = writeln!(out, "{indent}{}", selection.name);
        return;
    }
    let _ = writeln!(out, "{indent}{} {{", selection.name);
    for child in &selection.children {
        write_selection(out, child, depth + 1);
    }
    let _ = writeln!(out, "{indent}}}");
}

/// External data layer resolving metadata queries.
pub trait DataLayer: Send + Sync {
    fn resolve(&self, query: &MetadataQuery) -> Result<Value, DataLayerError>;
}
