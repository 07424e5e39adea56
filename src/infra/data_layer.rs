//! In-process data layer answering metadata queries from a configuration store.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::trace;

use crate::application::data_layer::{
    DataLayer, DataLayerError, IMAGE_KEY, MetadataQuery, PROFILE_PICTURE_KEY, SITE_KEY,
    SITE_METADATA_KEY, Selection,
};
use crate::application::images::ImagePipeline;
use crate::domain::store::ConfigurationStore;

/// Resolves selections against the store's own schema and delegates image
/// assets to an [`ImagePipeline`].
#[derive(Clone)]
pub struct StaticDataLayer {
    store: Arc<ConfigurationStore>,
    images: Arc<dyn ImagePipeline>,
}

impl StaticDataLayer {
    pub fn new(store: Arc<ConfigurationStore>, images: Arc<dyn ImagePipeline>) -> Self {
        Self { store, images }
    }
}

impl DataLayer for StaticDataLayer {
    fn resolve(&self, query: &MetadataQuery) -> Result<Value, DataLayerError> {
        let schema = serde_json::to_value(self.store.as_ref())?;
        let site_metadata = select_fields(&schema, &query.site_metadata, "siteMetadata")?;

        let transform = &query.profile_picture;
        let descriptor =
            self.images
                .transform(transform)
                .map_err(|source| DataLayerError::Asset {
                    asset: transform.source.clone(),
                    source,
                })?;
        let image = serde_json::to_value(descriptor)?;

        trace!(
            target = "infra::data_layer",
            op = "data_layer::resolve",
            selections = query.site_metadata.len(),
            asset = %transform.source,
            "Metadata query resolved"
        );

        let mut site = Map::new();
        site.insert(SITE_METADATA_KEY.to_string(), site_metadata);
        let mut picture = Map::new();
        picture.insert(IMAGE_KEY.to_string(), image);

        let mut result = Map::new();
        result.insert(SITE_KEY.to_string(), Value::Object(site));
        result.insert(PROFILE_PICTURE_KEY.to_string(), Value::Object(picture));
        Ok(Value::Object(result))
    }
}

/// Keep only the selected fields of `value`, mapping over arrays element-wise.
fn select_fields(value: &Value, selections: &[Selection], path: &str) -> Result<Value, DataLayerError> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| select_fields(item, selections, &format!("{path}[{index}]")))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(fields) => {
            let mut selected = Map::new();
            for selection in selections {
                let field_path = format!("{path}.{}", selection.name);
                let field = fields
                    .get(selection.name)
                    .ok_or_else(|| DataLayerError::UnknownField {
                        path: field_path.clone(),
                    })?;
                let resolved = if selection.children.is_empty() {
                    field.clone()
                } else {
                    select_fields(field, &selection.children, &field_path)?
                };
                selected.insert(selection.name.to_string(), resolved);
            }
            Ok(Value::Object(selected))
        }
        _ => Err(DataLayerError::NotAnObject {
            path: path.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::application::images::ImagePipelineError;
    use crate::domain::image::{
        ImageDescriptor, ImageFallback, ImageLayout, ImageSources, ImageTransform,
    };
    use crate::domain::integrations::DeploymentEnvironment;

    use super::*;

    struct StubImages;

    impl ImagePipeline for StubImages {
        fn transform(
            &self,
            transform: &ImageTransform,
        ) -> Result<ImageDescriptor, ImagePipelineError> {
            Ok(ImageDescriptor {
                layout: ImageLayout::Constrained,
                width: transform.width,
                height: transform.width,
                background_color: None,
                images: ImageSources {
                    fallback: ImageFallback {
                        src: "/static/stub/300/profile.jpg".to_string(),
                        src_set: "/static/stub/300/profile.jpg 300w".to_string(),
                        sizes: "300px".to_string(),
                    },
                    sources: Vec::new(),
                },
            })
        }
    }

    struct BrokenImages;

    impl ImagePipeline for BrokenImages {
        fn transform(
            &self,
            transform: &ImageTransform,
        ) -> Result<ImageDescriptor, ImagePipelineError> {
            Err(ImagePipelineError::Missing {
                path: transform.source.clone().into(),
            })
        }
    }

    fn layer(images: Arc<dyn ImagePipeline>) -> StaticDataLayer {
        let store = ConfigurationStore::builtin(DeploymentEnvironment::Development);
        StaticDataLayer::new(Arc::new(store), images)
    }

    #[test]
    fn returns_only_selected_fields() {
        let result = layer(Arc::new(StubImages))
            .resolve(&MetadataQuery::site_metadata())
            .expect("resolved");

        let metadata = &result["site"]["siteMetadata"];
        assert_eq!(metadata["siteInfo"]["title"], "Dmitri Pavlutin");
        assert!(metadata.get("carbonAdsService").is_none());
        assert!(metadata.get("emailSubscriptionService").is_none());
        assert_eq!(metadata["affiliates"][1]["tag"], "javascript");
        assert_eq!(
            result["authorProfilePicture"]["image"]["images"]["fallback"]["src"],
            "/static/stub/300/profile.jpg"
        );
    }

    #[test]
    fn unknown_field_names_its_path() {
        let mut query = MetadataQuery::site_metadata();
        query.site_metadata[0]
            .children
            .push(Selection::leaf("favicon"));

        let err = layer(Arc::new(StubImages))
            .resolve(&query)
            .expect_err("unknown field");
        match err {
            DataLayerError::UnknownField { path } => {
                assert_eq!(path, "siteMetadata.siteInfo.favicon")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn sub_selection_on_scalar_is_rejected() {
        let mut query = MetadataQuery::site_metadata();
        query.site_metadata[0].children[0] =
            Selection::node("title", vec![Selection::leaf("length")]);

        let err = layer(Arc::new(StubImages))
            .resolve(&query)
            .expect_err("scalar has no fields");
        assert!(matches!(err, DataLayerError::NotAnObject { .. }));
    }

    #[test]
    fn asset_failures_propagate() {
        let err = layer(Arc::new(BrokenImages))
            .resolve(&MetadataQuery::site_metadata())
            .expect_err("asset failure");
        assert!(matches!(err, DataLayerError::Asset { .. }));
    }
}
