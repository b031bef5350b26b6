//! Scheme registry
//!
//! Maps names to [`Scheme`] handles so callers can pick an algorithm at run
//! time and get a typed [`PqcError::UnknownScheme`] when it is missing, instead
//! of probing for it.
//!
//! A registry is built once, then only read. [`Registry::global`] holds the
//! process-wide instance; install a configured one at start-up with
//! [`Registry::install_global`] before the first lookup.

use crate::config::{validate_config, ProviderConfig};
use crate::dilithium::Dilithium;
use crate::error::{PqcError, Result};
use crate::falcon::Falcon;
use crate::scheme::Scheme;
use crate::traits::{SchemeDescriptor, SchemeFamily};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;
use tracing::{debug, info};

static GLOBAL: OnceLock<Registry> = OnceLock::new();

#[derive(Debug, Clone, Default)]
pub struct Registry {
    schemes: BTreeMap<String, Scheme>,
}

impl Registry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// `Dilithium` (Dilithium3) and `Falcon` (Falcon-512)
    pub fn with_defaults() -> Self {
        let config = ProviderConfig::default();
        let schemes = config
            .enabled
            .iter()
            .map(|family| (family.to_string(), scheme_for(*family, &config)))
            .collect();
        Self { schemes }
    }

    /// Register every family enabled in `config` under its family name
    ///
    /// # Errors
    /// - `Config` if the configuration is invalid
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        validate_config(config)?;

        let mut registry = Self::new();
        for family in &config.enabled {
            registry.register(family.as_str(), scheme_for(*family, config))?;
        }

        info!(
            "Built scheme registry: {:?}",
            registry.available_schemes()
        );

        Ok(registry)
    }

    /// Add `scheme` under `name`
    ///
    /// # Errors
    /// - `DuplicateScheme` if `name` is already taken
    pub fn register(&mut self, name: impl Into<String>, scheme: Scheme) -> Result<()> {
        match self.schemes.entry(name.into()) {
            Entry::Occupied(entry) => Err(PqcError::duplicate_scheme(entry.key())),
            Entry::Vacant(entry) => {
                debug!("Registered scheme {} -> {}", entry.key(), scheme.name());
                entry.insert(scheme);
                Ok(())
            }
        }
    }

    /// Resolve `name` to its scheme
    ///
    /// # Errors
    /// - `UnknownScheme` if nothing is registered under `name`
    pub fn lookup(&self, name: &str) -> Result<Scheme> {
        self.schemes
            .get(name)
            .cloned()
            .ok_or_else(|| PqcError::unknown_scheme(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemes.contains_key(name)
    }

    /// Registered names
    pub fn available_schemes(&self) -> BTreeSet<String> {
        self.schemes.keys().cloned().collect()
    }

    /// Descriptor of every registered scheme, keyed by registered name
    pub fn describe(&self) -> BTreeMap<String, SchemeDescriptor> {
        self.schemes
            .iter()
            .map(|(name, scheme)| (name.clone(), *scheme.descriptor()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    /// Process-wide registry, [`Registry::with_defaults`] unless another one was
    /// installed first
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(|| {
            debug!("Initializing global scheme registry with defaults");
            Registry::with_defaults()
        })
    }

    /// Install `registry` as the process-wide registry
    ///
    /// # Errors
    /// - `RegistryAlreadyInitialized` if a registry was installed or
    ///   [`Registry::global`] was already called
    pub fn install_global(registry: Registry) -> Result<&'static Registry> {
        GLOBAL
            .set(registry)
            .map_err(|_| PqcError::RegistryAlreadyInitialized)?;
        Ok(Self::global())
    }
}

fn scheme_for(family: SchemeFamily, config: &ProviderConfig) -> Scheme {
    match family {
        SchemeFamily::Dilithium => Scheme::new(Dilithium::new(config.dilithium_parameter_set)),
        SchemeFamily::Falcon => Scheme::new(Falcon::new(config.falcon_parameter_set)),
    }
}
