//! Third-party integration endpoints: newsletter subscription and ads.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{error::DomainError, validation};

/// Environment variable carrying the deployment designation.
pub const ENVIRONMENT_VARIABLE: &str = "SITEMETA_ENV";

/// Deployment designation the site was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeploymentEnvironment {
    Production,
    #[default]
    Development,
}

impl DeploymentEnvironment {
    /// `production` and `prod` designate production; any other value, or none, does not.
    pub fn from_designation(designation: Option<&str>) -> Self {
        match designation {
            Some("production" | "prod") => Self::Production,
            _ => Self::Development,
        }
    }

    /// Read the designation from [`ENVIRONMENT_VARIABLE`].
    pub fn from_env() -> Self {
        let designation = std::env::var(ENVIRONMENT_VARIABLE).ok();
        Self::from_designation(designation.as_deref())
    }

    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }
}

impl FromStr for DeploymentEnvironment {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_designation(Some(value)))
    }
}

impl fmt::Display for DeploymentEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Newsletter signup form target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSubscriptionService {
    pub endpoint: String,
    /// Honeypot input name expected by the list provider.
    pub hidden_field_name: String,
}

impl EmailSubscriptionService {
    pub fn validate(&self) -> Result<(), DomainError> {
        validation::absolute_url("emailSubscriptionService.endpoint", &self.endpoint)?;
        validation::non_empty(
            "emailSubscriptionService.hiddenFieldName",
            &self.hidden_field_name,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonAdsService {
    pub script_src: String,
    pub is_enabled: bool,
    pub is_production_mode: bool,
}

impl CarbonAdsService {
    pub fn new(script_src: impl Into<String>, is_enabled: bool, env: DeploymentEnvironment) -> Self {
        Self {
            script_src: script_src.into(),
            is_enabled,
            is_production_mode: env.is_production(),
        }
    }

    /// Ads are served only from enabled production builds.
    pub fn should_serve(&self) -> bool {
        self.is_enabled && self.is_production_mode
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.is_enabled {
            validation::non_empty("carbonAdsService.scriptSrc", &self.script_src)?;
        }
        Ok(())
    }
}
