//! Site identity.

use serde::{Deserialize, Serialize};

use super::{error::DomainError, validation};

/// Identity of the published site: titles, canonical URLs and search wiring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteInfo {
    pub title: String,
    pub description: String,
    pub meta_title: String,
    pub meta_description: String,
    /// Canonical absolute URL of the site.
    pub url: String,
    pub repository_url: String,
    /// Repository backing the comment threads, in `owner/repo` form.
    pub github_comments_repository: String,
    pub google_custom_search_id: String,
}

impl SiteInfo {
    pub fn validate(&self) -> Result<(), DomainError> {
        validation::non_empty("siteInfo.title", &self.title)?;
        validation::non_empty("siteInfo.description", &self.description)?;
        validation::non_empty("siteInfo.metaTitle", &self.meta_title)?;
        validation::non_empty("siteInfo.metaDescription", &self.meta_description)?;
        validation::absolute_url("siteInfo.url", &self.url)?;
        validation::absolute_url("siteInfo.repositoryUrl", &self.repository_url)?;
        validation::owner_repo(
            "siteInfo.githubCommentsRepository",
            &self.github_comments_repository,
        )?;
        validation::non_empty("siteInfo.googleCustomSearchId", &self.google_custom_search_id)
    }
}
