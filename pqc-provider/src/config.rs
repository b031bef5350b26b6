//! Provider configuration
//!
//! Selects which scheme families are registered and which parameter set each
//! family binds.
//!
//! ```toml
//! enabled = ["Dilithium", "Falcon"]
//! dilithium_parameter_set = "Dilithium3"
//! falcon_parameter_set = "Falcon-512"
//! ```

use crate::dilithium::DilithiumParameterSet;
use crate::error::{PqcError, Result};
use crate::falcon::FalconParameterSet;
use crate::traits::SchemeFamily;
use config::{Config, Environment, File, Source};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;

/// Environment variable prefix for [`load_config_from_env`]
pub const ENV_PREFIX: &str = "PQC";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Families to register, each under its family name
    pub enabled: Vec<SchemeFamily>,
    pub dilithium_parameter_set: DilithiumParameterSet,
    pub falcon_parameter_set: FalconParameterSet,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enabled: vec![SchemeFamily::Dilithium, SchemeFamily::Falcon],
            dilithium_parameter_set: DilithiumParameterSet::default(),
            falcon_parameter_set: FalconParameterSet::default(),
        }
    }
}

/// Load provider configuration from a file
///
/// # Parameters
/// - `config_path`: configuration file path (TOML, JSON or YAML, by extension)
///
/// # Errors
/// - `Config` if the file cannot be read, parsed or fails validation
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<ProviderConfig> {
    let config = Config::builder()
        .add_source(File::from(config_path.as_ref()))
        .build()
        .map_err(|e| PqcError::Config(format!("Failed to load config file: {}", e)))?;

    let provider_config: ProviderConfig = config
        .try_deserialize()
        .map_err(|e| PqcError::Config(format!("Failed to parse config: {}", e)))?;

    validate_config(&provider_config)?;

    Ok(provider_config)
}

/// Load configuration from environment variables
///
/// Prefix: `PQC_`
/// Example: `PQC_ENABLED=Dilithium,Falcon`, `PQC_DILITHIUM_PARAMETER_SET=Dilithium5`
pub fn load_config_from_env() -> Result<ProviderConfig> {
    load_from_environment(Environment::with_prefix(ENV_PREFIX))
}

fn load_from_environment(environment: Environment) -> Result<ProviderConfig> {
    let environment = environment
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("enabled");

    if environment.collect()?.is_empty() {
        warn!(
            "No {}_* environment variables set, using default provider configuration",
            ENV_PREFIX
        );
    }

    let config = Config::builder().add_source(environment).build()?;
    let provider_config: ProviderConfig = config.try_deserialize()?;

    validate_config(&provider_config)?;

    Ok(provider_config)
}

/// Check:
/// - at least one family is enabled
/// - no family is listed twice
pub fn validate_config(config: &ProviderConfig) -> Result<()> {
    if config.enabled.is_empty() {
        return Err(PqcError::Config(
            "at least one signature scheme family must be enabled".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for family in &config.enabled {
        if !seen.insert(family) {
            return Err(PqcError::Config(format!(
                "scheme family {} is enabled more than once",
                family
            )));
        }
    }

    Ok(())
}
