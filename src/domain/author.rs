//! Author identity and social presence.

use serde::{Deserialize, Serialize};

use super::{error::DomainError, validation};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInfo {
    pub name: String,
    pub description: String,
    /// Free-form and currently unused; may be empty.
    #[serde(default)]
    pub job: String,
    pub email: String,
    pub job_title: String,
    pub profiles: AuthorProfiles,
    pub nicknames: AuthorNicknames,
}

/// Profile URLs on the fixed set of platforms the site links to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthorProfiles {
    pub stackoverflow: String,
    pub twitter: String,
    pub linkedin: String,
    pub github: String,
    pub facebook: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthorNicknames {
    pub twitter: String,
}

/// Platforms an author profile can point to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilePlatform {
    StackOverflow,
    Twitter,
    LinkedIn,
    GitHub,
    Facebook,
}

impl ProfilePlatform {
    pub const ALL: [ProfilePlatform; 5] = [
        ProfilePlatform::StackOverflow,
        ProfilePlatform::Twitter,
        ProfilePlatform::LinkedIn,
        ProfilePlatform::GitHub,
        ProfilePlatform::Facebook,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ProfilePlatform::StackOverflow => "stackoverflow",
            ProfilePlatform::Twitter => "twitter",
            ProfilePlatform::LinkedIn => "linkedin",
            ProfilePlatform::GitHub => "github",
            ProfilePlatform::Facebook => "facebook",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProfilePlatform::StackOverflow => "Stack Overflow",
            ProfilePlatform::Twitter => "Twitter",
            ProfilePlatform::LinkedIn => "LinkedIn",
            ProfilePlatform::GitHub => "GitHub",
            ProfilePlatform::Facebook => "Facebook",
        }
    }
}

impl AuthorProfiles {
    pub fn get(&self, platform: ProfilePlatform) -> &str {
        match platform {
            ProfilePlatform::StackOverflow => &self.stackoverflow,
            ProfilePlatform::Twitter => &self.twitter,
            ProfilePlatform::LinkedIn => &self.linkedin,
            ProfilePlatform::GitHub => &self.github,
            ProfilePlatform::Facebook => &self.facebook,
        }
    }

    /// Profiles in display order.
    pub fn iter(&self) -> impl Iterator<Item = (ProfilePlatform, &str)> {
        ProfilePlatform::ALL
            .into_iter()
            .map(move |platform| (platform, self.get(platform)))
    }
}

impl AuthorInfo {
    pub fn validate(&self) -> Result<(), DomainError> {
        validation::non_empty("authorInfo.name", &self.name)?;
        validation::non_empty("authorInfo.description", &self.description)?;
        validation::non_empty("authorInfo.email", &self.email)?;
        if !self.email.contains('@') {
            return Err(DomainError::validation(
                "authorInfo.email",
                format!("`{}` is not an email address", self.email),
            ));
        }
        validation::non_empty("authorInfo.jobTitle", &self.job_title)?;

        for (platform, url) in self.profiles.iter() {
            let field = format!("authorInfo.profiles.{}", platform.key());
            validation::absolute_url(&field, url)?;
        }

        validation::non_empty("authorInfo.nicknames.twitter", &self.nicknames.twitter)?;
        if self.nicknames.twitter.starts_with('@') {
            return Err(DomainError::validation(
                "authorInfo.nicknames.twitter",
                "store the handle without a leading `@`",
            ));
        }
        Ok(())
    }
}
