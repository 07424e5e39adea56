use serde::Serialize;

use crate::application::metadata::ProjectedMetadata;
use crate::domain::integrations::CarbonAdsService;

/// Affiliate-contact card shown under an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateCardView {
    pub course_title: String,
    pub course_link: String,
    pub pitch: String,
    pub author_name: String,
    pub author_picture_src: String,
    pub author_twitter: String,
}

impl AffiliateCardView {
    /// Card for an article with the given tags, if any offer matches.
    pub fn for_article<S: AsRef<str>>(metadata: &ProjectedMetadata, tags: &[S]) -> Option<Self> {
        let offer = metadata.affiliate_for_tags(tags)?;
        let author = &metadata.author;
        Some(Self {
            course_title: offer.course_title.clone(),
            course_link: offer.course_link.clone(),
            pitch: offer.pitch.clone(),
            author_name: author.info.name.clone(),
            author_picture_src: author.profile_picture_src.clone(),
            author_twitter: format!("@{}", author.info.nicknames.twitter),
        })
    }
}

/// Wrapper around the ad banner; exists only when ads should be served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonAdsBannerView {
    pub script_src: String,
}

impl CarbonAdsBannerView {
    pub fn from_service(service: &CarbonAdsService) -> Option<Self> {
        service.should_serve().then(|| Self {
            script_src: service.script_src.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileLinkView {
    pub label: &'static str,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorCardView {
    pub name: String,
    pub job_title: String,
    pub description: String,
    pub picture_src: String,
    pub profiles: Vec<ProfileLinkView>,
}

impl AuthorCardView {
    pub fn from_projection(metadata: &ProjectedMetadata) -> Self {
        let info = &metadata.author.info;
        let profiles = info
            .profiles
            .iter()
            .map(|(platform, href)| ProfileLinkView {
                label: platform.label(),
                href: href.to_string(),
            })
            .collect();

        Self {
            name: info.name.clone(),
            job_title: info.job_title.clone(),
            description: info.description.clone(),
            picture_src: metadata.author.profile_picture_src.clone(),
            profiles,
        }
    }
}
