use std::{path::PathBuf, sync::Arc};

use serial_test::serial;
use sitemeta::application::data_layer::{DataLayer, DataLayerError, MetadataQuery};
use sitemeta::application::metadata::{MetadataError, MetadataService};
use sitemeta::domain::integrations::{DeploymentEnvironment, ENVIRONMENT_VARIABLE};
use sitemeta::domain::store::ConfigurationStore;
use sitemeta::infra::data_layer::StaticDataLayer;
use sitemeta::infra::images::LocalImagePipeline;
use sitemeta::presentation::views::{AffiliateCardView, AuthorCardView, CarbonAdsBannerView};

fn assets_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

fn builtin_store(environment: DeploymentEnvironment) -> Arc<ConfigurationStore> {
    Arc::new(ConfigurationStore::builtin(environment))
}

fn service_for(store: Arc<ConfigurationStore>) -> MetadataService {
    let images = Arc::new(LocalImagePipeline::new(assets_dir()));
    MetadataService::new(Arc::new(StaticDataLayer::new(store, images)))
}

#[test]
fn projection_mirrors_store_fields() {
    let store = builtin_store(DeploymentEnvironment::Development);
    let projected = service_for(store.clone()).load().expect("projection");

    assert_eq!(&projected.site, store.site_info());
    assert_eq!(&projected.author.info, store.author_info());
    assert_eq!(projected.affiliates.as_slice(), store.affiliates());
}

#[test]
fn example_store_identity() {
    let projected = service_for(builtin_store(DeploymentEnvironment::Development))
        .load()
        .expect("projection");

    assert_eq!(projected.site.title, "Dmitri Pavlutin");
    assert_eq!(
        projected.author.info.profiles.github,
        "https://github.com/panzerdp"
    );
}

#[test]
fn affiliates_keep_display_order() {
    let projected = service_for(builtin_store(DeploymentEnvironment::Development))
        .load()
        .expect("projection");

    assert_eq!(projected.affiliates[0].tag, "react");
    assert_eq!(projected.affiliates[1].tag, "javascript");
}

#[test]
fn profile_picture_src_is_derived_and_stable() {
    let service = service_for(builtin_store(DeploymentEnvironment::Development));
    let first = service.load().expect("first load");
    let second = service.load().expect("second load");

    assert!(!first.author.profile_picture_src.is_empty());
    assert_eq!(
        first.author.profile_picture_src,
        first.author.profile_picture.images.fallback.src
    );
    assert_eq!(first.author.profile_picture.width, 300);
    assert_eq!(first, second);
}

#[test]
fn separate_services_over_same_inputs_agree() {
    let store = builtin_store(DeploymentEnvironment::Production);
    let a = service_for(store.clone()).load().expect("first");
    let b = service_for(store).load().expect("second");
    assert_eq!(a, b);
}

#[test]
fn missing_profile_picture_fails_the_projection() {
    let store = builtin_store(DeploymentEnvironment::Development);
    let images = Arc::new(LocalImagePipeline::new(assets_dir().join("does-not-exist")));
    let service = MetadataService::new(Arc::new(StaticDataLayer::new(store, images)));

    let err = service.load().expect_err("asset missing");
    assert!(matches!(
        err,
        MetadataError::DataLayer(DataLayerError::Asset { .. })
    ));
}

struct FailingLayer;

impl DataLayer for FailingLayer {
    fn resolve(&self, _query: &MetadataQuery) -> Result<serde_json::Value, DataLayerError> {
        Err(DataLayerError::UnknownField {
            path: "siteMetadata.siteInfo".to_string(),
        })
    }
}

#[test]
fn data_layer_failures_are_not_recovered() {
    let service = MetadataService::new(Arc::new(FailingLayer));
    assert!(matches!(
        service.load(),
        Err(MetadataError::DataLayer(DataLayerError::UnknownField { .. }))
    ));
}

#[test]
fn serialized_projection_uses_camel_case_groups() {
    let projected = service_for(builtin_store(DeploymentEnvironment::Development))
        .load()
        .expect("projection");
    let value = serde_json::to_value(&projected).expect("serialize");

    assert!(value["author"]["profilePictureSrc"].is_string());
    assert_eq!(value["author"]["info"]["nicknames"]["twitter"], "panzerdp");
    assert_eq!(value["site"]["githubCommentsRepository"], "panzerdp/dmitripavlutin.com");
    assert_eq!(value["affiliates"][0]["courseTitle"], "React Front To Back");
}

#[test]
fn affiliate_card_for_article_tags() {
    let projected = service_for(builtin_store(DeploymentEnvironment::Development))
        .load()
        .expect("projection");

    let card = AffiliateCardView::for_article(&projected, &["javascript", "closure"])
        .expect("javascript card");
    assert_eq!(card.course_title, "Modern JavaScript From The Beginning");
    assert_eq!(card.author_twitter, "@panzerdp");
    assert_eq!(card.author_picture_src, projected.author.profile_picture_src);

    assert!(AffiliateCardView::for_article(&projected, &["css"]).is_none());
}

#[test]
fn author_card_lists_profiles_in_order() {
    let projected = service_for(builtin_store(DeploymentEnvironment::Development))
        .load()
        .expect("projection");

    let card = AuthorCardView::from_projection(&projected);
    let labels: Vec<_> = card.profiles.iter().map(|link| link.label).collect();
    assert_eq!(
        labels,
        vec!["Stack Overflow", "Twitter", "LinkedIn", "GitHub", "Facebook"]
    );
}

#[test]
fn ad_banner_only_in_production() {
    let production = builtin_store(DeploymentEnvironment::Production);
    let development = builtin_store(DeploymentEnvironment::Development);

    assert!(CarbonAdsBannerView::from_service(production.carbon_ads_service()).is_some());
    assert!(CarbonAdsBannerView::from_service(development.carbon_ads_service()).is_none());
}

fn environment_from(designation: Option<&str>) -> DeploymentEnvironment {
    // SAFETY: every test touching the process environment is #[serial].
    unsafe {
        match designation {
            Some(value) => std::env::set_var(ENVIRONMENT_VARIABLE, value),
            None => std::env::remove_var(ENVIRONMENT_VARIABLE),
        }
    }
    DeploymentEnvironment::from_env()
}

#[test]
#[serial]
fn production_mode_from_environment_variable() {
    for (designation, expected) in [
        (Some("production"), true),
        (Some("prod"), true),
        (Some("development"), false),
        (Some("test"), false),
        (Some(" prod "), false),
        (Some("Production"), false),
        (None, false),
    ] {
        let store = ConfigurationStore::builtin(environment_from(designation));
        assert_eq!(
            store.carbon_ads_service().is_production_mode,
            expected,
            "designation {designation:?}"
        );
    }
    environment_from(None);
}
