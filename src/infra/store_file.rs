//! Loading a configuration store definition from a TOML file.

use std::{fs, path::Path};

use thiserror::Error;
use tracing::info;

use crate::domain::{
    error::DomainError,
    integrations::DeploymentEnvironment,
    store::{ConfigurationStore, StoreDefinition},
};

#[derive(Debug, Error)]
pub enum StoreFileError {
    #[error("failed to read store file `{path}`")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("store file is not a valid definition")]
    Parse(#[from] toml::de::Error),
    #[error("store definition rejected")]
    Invalid(#[from] DomainError),
}

/// Parse and validate a store definition.
pub fn parse_store(
    contents: &str,
    environment: DeploymentEnvironment,
) -> Result<ConfigurationStore, StoreFileError> {
    let definition: StoreDefinition = toml::from_str(contents)?;
    Ok(ConfigurationStore::from_definition(definition, environment)?)
}

pub fn load_store(
    path: &Path,
    environment: DeploymentEnvironment,
) -> Result<ConfigurationStore, StoreFileError> {
    let contents = fs::read_to_string(path).map_err(|source| StoreFileError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let store = parse_store(&contents, environment)?;

    info!(
        target = "infra::store_file",
        op = "store_file::load",
        path = %path.display(),
        affiliates = store.affiliates().len(),
        environment = %environment,
        "Configuration store loaded"
    );
    Ok(store)
}
