//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{path::PathBuf, str::FromStr};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::domain::integrations::DeploymentEnvironment;

mod cli;

pub use cli::{AffiliateArgs, CliArgs, Command, GlobalOverrides, ShowArgs};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "sitemeta";
const ENV_PREFIX: &str = "SITEMETA";
const DEFAULT_ASSETS_DIR: &str = "assets";

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub store: StoreSettings,
    pub assets: AssetSettings,
    pub environment: DeploymentEnvironment,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// Store definition to load; the built-in store is used when absent.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AssetSettings {
    pub directory: PathBuf,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(&cli.overrides);

    Settings::from_raw(raw, DeploymentEnvironment::from_env)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    logging: RawLoggingSettings,
    store: RawStoreSettings,
    assets: RawAssetSettings,
    environment: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawStoreSettings {
    file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawAssetSettings {
    directory: Option<PathBuf>,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &GlobalOverrides) {
        if let Some(path) = overrides.store_file.as_ref() {
            self.store.file = Some(path.clone());
        }
        if let Some(dir) = overrides.assets_dir.as_ref() {
            self.assets.directory = Some(dir.clone());
        }
        if let Some(environment) = overrides.environment.as_ref() {
            self.environment = Some(environment.clone());
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    /// `fallback_environment` runs only when no layer names an environment.
    fn from_raw(
        raw: RawSettings,
        fallback_environment: impl FnOnce() -> DeploymentEnvironment,
    ) -> Result<Self, LoadError> {
        let RawSettings {
            logging,
            store,
            assets,
            environment,
        } = raw;

        let logging = build_logging_settings(logging)?;
        let store = build_store_settings(store)?;
        let assets = build_asset_settings(assets)?;
        let environment = match environment {
            Some(designation) => DeploymentEnvironment::from_designation(Some(&designation)),
            None => fallback_environment(),
        };

        Ok(Self {
            logging,
            store,
            assets,
            environment,
        })
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_store_settings(store: RawStoreSettings) -> Result<StoreSettings, LoadError> {
    let file = match store.file {
        Some(path) if path.as_os_str().is_empty() => {
            return Err(LoadError::invalid("store.file", "path must not be empty"));
        }
        other => other,
    };
    Ok(StoreSettings { file })
}

fn build_asset_settings(assets: RawAssetSettings) -> Result<AssetSettings, LoadError> {
    let directory = assets
        .directory
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR));
    if directory.as_os_str().is_empty() {
        return Err(LoadError::invalid(
            "assets.directory",
            "path must not be empty",
        ));
    }
    Ok(AssetSettings { directory })
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}
