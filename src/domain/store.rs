//! The configuration store: every site, author, affiliate and integration value, defined once.

use serde::{Deserialize, Serialize};

use super::{
    affiliates::{self, AffiliateOffer},
    author::{AuthorInfo, AuthorNicknames, AuthorProfiles},
    error::DomainError,
    integrations::{CarbonAdsService, DeploymentEnvironment, EmailSubscriptionService},
    site::SiteInfo,
};

/// Immutable after construction. Share it behind `Arc` or by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationStore {
    site_info: SiteInfo,
    author_info: AuthorInfo,
    affiliates: Vec<AffiliateOffer>,
    email_subscription_service: EmailSubscriptionService,
    carbon_ads_service: CarbonAdsService,
}

/// Declarative store definition as written in a store file.
///
/// The production-mode flag is absent on purpose: it always comes from the
/// deployment environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StoreDefinition {
    pub site_info: SiteInfo,
    pub author_info: AuthorInfo,
    #[serde(default)]
    pub affiliates: Vec<AffiliateOffer>,
    pub email_subscription_service: EmailSubscriptionService,
    pub carbon_ads_service: CarbonAdsDefinition,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CarbonAdsDefinition {
    pub script_src: String,
    #[serde(default)]
    pub is_enabled: bool,
}

impl ConfigurationStore {
    /// Build and validate a store from its definition.
    pub fn from_definition(
        definition: StoreDefinition,
        environment: DeploymentEnvironment,
    ) -> Result<Self, DomainError> {
        let StoreDefinition {
            site_info,
            author_info,
            affiliates,
            email_subscription_service,
            carbon_ads_service,
        } = definition;

        let store = Self {
            site_info,
            author_info,
            affiliates,
            email_subscription_service,
            carbon_ads_service: CarbonAdsService::new(
                carbon_ads_service.script_src,
                carbon_ads_service.is_enabled,
                environment,
            ),
        };
        store.validate()?;
        Ok(store)
    }

    /// The site's own configuration.
    pub fn builtin(environment: DeploymentEnvironment) -> Self {
        Self {
            site_info: SiteInfo {
                title: "Dmitri Pavlutin".to_string(),
                description: "Thoughts on Frontend development".to_string(),
                meta_title: "Dmitri Pavlutin Blog".to_string(),
                meta_description: "Posts about JavaScript, React, and Frontend development"
                    .to_string(),
                url: "https://dmitripavlutin.com".to_string(),
                repository_url: "https://github.com/panzerdp/dmitripavlutin.com".to_string(),
                github_comments_repository: "panzerdp/dmitripavlutin.com".to_string(),
                google_custom_search_id: "012223646567311766458:cxsdbukcl9s".to_string(),
            },
            author_info: AuthorInfo {
                name: "Dmitri Pavlutin".to_string(),
                description: "Software developer, tech writer and coach. My daily routine \
                              consists of (but not limited to) drinking coffee, coding, \
                              writing, coaching, overcoming boredom 😉."
                    .to_string(),
                job: String::new(),
                email: "dmitripavlutin@gmail.com".to_string(),
                job_title: "Software Developer".to_string(),
                profiles: AuthorProfiles {
                    stackoverflow: "https://stackoverflow.com/users/1894471/dmitri-pavlutin"
                        .to_string(),
                    twitter: "https://twitter.com/panzerdp".to_string(),
                    linkedin: "https://www.linkedin.com/in/dmitri-pavlutin/".to_string(),
                    github: "https://github.com/panzerdp".to_string(),
                    facebook: "https://www.facebook.com/dmitri.pavlutin".to_string(),
                },
                nicknames: AuthorNicknames {
                    twitter: "panzerdp".to_string(),
                },
            },
            affiliates: vec![
                AffiliateOffer {
                    tag: "react".to_string(),
                    course_title: "React Front To Back".to_string(),
                    course_link: "https://www.udemy.com/course/modern-react-front-to-back/"
                        .to_string(),
                    pitch: "Build and deploy real-world React applications, from \
                            components and hooks to context and routing."
                        .to_string(),
                },
                AffiliateOffer {
                    tag: "javascript".to_string(),
                    course_title: "Modern JavaScript From The Beginning".to_string(),
                    course_link: "https://www.udemy.com/course/modern-javascript-from-the-beginning/"
                        .to_string(),
                    pitch: "Learn and build projects with pure JavaScript, no frameworks \
                            or libraries."
                        .to_string(),
                },
            ],
            email_subscription_service: EmailSubscriptionService {
                endpoint: "https://dmitripavlutin.us15.list-manage.com/subscribe/post?u=\
                           85e4fc7e5a2c1a5d3b4a1e1e4&id=7d1e1e1e1e"
                    .to_string(),
                hidden_field_name: "b_85e4fc7e5a2c1a5d3b4a1e1e4_7d1e1e1e1e".to_string(),
            },
            carbon_ads_service: CarbonAdsService::new(
                "//cdn.carbonads.com/carbon.js?serve=CE7DC2JW&placement=dmitripavlutincom",
                true,
                environment,
            ),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.site_info.validate()?;
        self.author_info.validate()?;
        for (index, offer) in self.affiliates.iter().enumerate() {
            offer.validate(index)?;
        }
        self.email_subscription_service.validate()?;
        self.carbon_ads_service.validate()
    }

    pub fn site_info(&self) -> &SiteInfo {
        &self.site_info
    }

    pub fn author_info(&self) -> &AuthorInfo {
        &self.author_info
    }

    /// Offers in display priority order.
    pub fn affiliates(&self) -> &[AffiliateOffer] {
        &self.affiliates
    }

    pub fn email_subscription_service(&self) -> &EmailSubscriptionService {
        &self.email_subscription_service
    }

    pub fn carbon_ads_service(&self) -> &CarbonAdsService {
        &self.carbon_ads_service
    }

    pub fn affiliates_for_tag<'a>(
        &'a self,
        tag: &'a str,
    ) -> impl Iterator<Item = &'a AffiliateOffer> + 'a {
        affiliates::offers_for_tag(&self.affiliates, tag)
    }

    pub fn affiliate_for_tags<S: AsRef<str>>(&self, article_tags: &[S]) -> Option<&AffiliateOffer> {
        affiliates::offer_for_article(&self.affiliates, article_tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_store_is_valid() {
        let store = ConfigurationStore::builtin(DeploymentEnvironment::Development);
        store.validate().expect("builtin store passes validation");
    }

    #[test]
    fn builtin_store_identity() {
        let store = ConfigurationStore::builtin(DeploymentEnvironment::Development);
        assert_eq!(store.site_info().title, "Dmitri Pavlutin");
        assert_eq!(
            store.author_info().profiles.github,
            "https://github.com/panzerdp"
        );
        assert_eq!(store.author_info().job, "");
    }

    #[test]
    fn builtin_affiliates_keep_declared_order() {
        let store = ConfigurationStore::builtin(DeploymentEnvironment::Development);
        let tags: Vec<_> = store.affiliates().iter().map(|o| o.tag.as_str()).collect();
        assert_eq!(tags, vec!["react", "javascript"]);
    }

    #[test]
    fn production_mode_follows_environment() {
        let prod = ConfigurationStore::builtin(DeploymentEnvironment::Production);
        let dev = ConfigurationStore::builtin(DeploymentEnvironment::Development);
        assert!(prod.carbon_ads_service().is_production_mode);
        assert!(!dev.carbon_ads_service().is_production_mode);
        assert_eq!(prod.site_info(), dev.site_info());
    }

    #[test]
    fn affiliate_lookup_by_article_tags() {
        let store = ConfigurationStore::builtin(DeploymentEnvironment::Development);
        let offer = store
            .affiliate_for_tags(&["javascript", "closure"])
            .expect("javascript offer");
        assert_eq!(offer.course_title, "Modern JavaScript From The Beginning");
        assert_eq!(store.affiliates_for_tag("react").count(), 1);
    }
}
