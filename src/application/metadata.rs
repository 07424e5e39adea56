//! Projection of site metadata into the shape presentational consumers use.

use std::{sync::Arc, time::Instant};

use metrics::counter;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::application::data_layer::{DataLayer, DataLayerError, MetadataQuery};
use crate::domain::{
    affiliates::AffiliateOffer, author::AuthorInfo, image::ImageDescriptor, site::SiteInfo,
};

pub(crate) const METRIC_PROJECTION_TOTAL: &str = "sitemeta_projection_total";

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("data layer query failed")]
    DataLayer(#[from] DataLayerError),
    #[error("data layer result has an unexpected shape: {0}")]
    Shape(#[source] serde_json::Error),
    #[error("profile picture descriptor has no fallback src")]
    MissingProfilePictureSrc,
}

/// Site, author and affiliate data grouped for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedMetadata {
    pub author: AuthorProjection,
    pub site: SiteInfo,
    pub affiliates: Vec<AffiliateOffer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorProjection {
    pub info: AuthorInfo,
    pub profile_picture: ImageDescriptor,
    pub profile_picture_src: String,
}

impl ProjectedMetadata {
    pub fn affiliate_for_tags<S: AsRef<str>>(&self, article_tags: &[S]) -> Option<&AffiliateOffer> {
        crate::domain::affiliates::offer_for_article(&self.affiliates, article_tags)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResult {
    site: SiteNode,
    author_profile_picture: ProfilePictureNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SiteNode {
    site_metadata: SiteMetadataNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SiteMetadataNode {
    site_info: SiteInfo,
    author_info: AuthorInfo,
    affiliates: Vec<AffiliateOffer>,
}

#[derive(Debug, Deserialize)]
struct ProfilePictureNode {
    image: ImageDescriptor,
}

/// Reads site metadata through a [`DataLayer`] and regroups it.
///
/// Holds no cache of its own; repeated loads hit the data layer again.
#[derive(Clone)]
pub struct MetadataService {
    data_layer: Arc<dyn DataLayer>,
    query: MetadataQuery,
}

impl MetadataService {
    pub fn new(data_layer: Arc<dyn DataLayer>) -> Self {
        Self {
            data_layer,
            query: MetadataQuery::site_metadata(),
        }
    }

    pub fn load(&self) -> Result<ProjectedMetadata, MetadataError> {
        let started_at = Instant::now();
        let result = self.project();

        match &result {
            Ok(projected) => {
                debug!(
                    target = "application::metadata",
                    op = "metadata::load",
                    result = "ok",
                    elapsed_ms = started_at.elapsed().as_millis() as u64,
                    affiliates = projected.affiliates.len(),
                    "Site metadata projected"
                );
                counter!(METRIC_PROJECTION_TOTAL, "result" => "ok").increment(1);
            }
            Err(err) => {
                warn!(
                    target = "application::metadata",
                    op = "metadata::load",
                    result = "error",
                    elapsed_ms = started_at.elapsed().as_millis() as u64,
                    error = %err,
                    "Site metadata projection failed"
                );
                counter!(METRIC_PROJECTION_TOTAL, "result" => "error").increment(1);
            }
        }

        result
    }

    fn project(&self) -> Result<ProjectedMetadata, MetadataError> {
        let raw = self.data_layer.resolve(&self.query)?;
        let QueryResult {
            site,
            author_profile_picture,
        } = serde_json::from_value(raw).map_err(MetadataError::Shape)?;
        let SiteMetadataNode {
            site_info,
            author_info,
            affiliates,
        } = site.site_metadata;

        let profile_picture = author_profile_picture.image;
        let profile_picture_src = profile_picture.src().to_string();
        if profile_picture_src.is_empty() {
            return Err(MetadataError::MissingProfilePictureSrc);
        }

        Ok(ProjectedMetadata {
            author: AuthorProjection {
                info: author_info,
                profile_picture,
                profile_picture_src,
            },
            site: site_info,
            affiliates,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    struct FixedLayer(serde_json::Value);

    impl DataLayer for FixedLayer {
        fn resolve(&self, _query: &MetadataQuery) -> Result<serde_json::Value, DataLayerError> {
            Ok(self.0.clone())
        }
    }

    fn fixture(src: &str) -> serde_json::Value {
        json!({
            "site": {
                "siteMetadata": {
                    "siteInfo": {
                        "title": "Example",
                        "description": "Notes",
                        "metaTitle": "Example Blog",
                        "metaDescription": "Notes on things",
                        "url": "https://example.com",
                        "repositoryUrl": "https://github.com/example/site",
                        "githubCommentsRepository": "example/site",
                        "googleCustomSearchId": "cx:1"
                    },
                    "authorInfo": {
                        "name": "Example Author",
                        "description": "Writes notes",
                        "job": "",
                        "email": "author@example.com",
                        "jobTitle": "Engineer",
                        "profiles": {
                            "stackoverflow": "https://stackoverflow.com/users/1",
                            "twitter": "https://twitter.com/example",
                            "linkedin": "https://www.linkedin.com/in/example/",
                            "github": "https://github.com/example",
                            "facebook": "https://www.facebook.com/example"
                        },
                        "nicknames": { "twitter": "example" }
                    },
                    "affiliates": [
                        {
                            "tag": "rust",
                            "courseTitle": "Rust",
                            "pitch": "Learn Rust",
                            "courseLink": "https://courses.example.com/rust"
                        }
                    ]
                }
            },
            "authorProfilePicture": {
                "image": {
                    "layout": "constrained",
                    "width": 300,
                    "height": 300,
                    "images": {
                        "fallback": { "src": src, "srcSet": format!("{src} 300w"), "sizes": "300px" },
                        "sources": []
                    }
                }
            }
        })
    }

    #[test]
    fn regroups_flat_result() {
        let service = MetadataService::new(Arc::new(FixedLayer(fixture("/static/a/300/p.jpg"))));

        let projected = service.load().expect("projection");
        assert_eq!(projected.site.title, "Example");
        assert_eq!(projected.author.info.nicknames.twitter, "example");
        assert_eq!(projected.author.profile_picture_src, "/static/a/300/p.jpg");
        assert_eq!(projected.affiliates[0].tag, "rust");
    }

    #[test]
    fn missing_field_is_a_shape_error() {
        let mut raw = fixture("/static/a/300/p.jpg");
        raw["site"]["siteMetadata"]["siteInfo"]
            .as_object_mut()
            .expect("object")
            .remove("url");
        let service = MetadataService::new(Arc::new(FixedLayer(raw)));

        let err = service.load().expect_err("shape error");
        assert!(matches!(err, MetadataError::Shape(_)));
    }

    #[test]
    fn empty_fallback_src_is_rejected() {
        let service = MetadataService::new(Arc::new(FixedLayer(fixture(""))));
        let err = service.load().expect_err("empty src");
        assert!(matches!(err, MetadataError::MissingProfilePictureSrc));
    }
}
