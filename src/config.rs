//! Runtime configuration.
//!
//! A database plugin has no command line, so configuration comes from the
//! environment of the host process. The `etldp1` binary layers its flags on
//! top of the same structure.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::error::EtldError;
use crate::logging::{TracingSink, DEFAULT_LOG_FILTER};
use crate::suffix::{BundledList, Resolver, SuffixRuleSet, SuffixSource};
use crate::url::Normalizer;

/// Path of a `public_suffix_list.dat` file replacing the bundled list.
pub const SUFFIX_LIST_ENV: &str = "ETLDP1_SUFFIX_LIST";

/// `EnvFilter` directives for diagnostics, e.g. `etldp1=debug`.
pub const LOG_ENV: &str = "ETLDP1_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Rule file to load instead of the bundled list.
    pub suffix_list: Option<PathBuf>,
    /// Log filter directives.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            suffix_list: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            suffix_list: get(SUFFIX_LIST_ENV).map(PathBuf::from),
            log_filter: get(LOG_ENV).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }

    /// Load the configured rule source. The file, if any, is read here and only here.
    pub fn suffix_source(&self) -> Result<Arc<dyn SuffixSource>, EtldError> {
        match &self.suffix_list {
            Some(path) => {
                let rules = SuffixRuleSet::from_path(path)?;
                info!("Loaded {} public suffix rules from {}", rules.len(), path.display());
                Ok(Arc::new(rules))
            }
            None => Ok(Arc::new(BundledList)),
        }
    }

    /// Build a normalizer over the configured rule source, logging through `tracing`.
    pub fn normalizer(&self) -> Result<Normalizer, EtldError> {
        let resolver = Resolver::new(self.suffix_source()?);
        Ok(Normalizer::new(resolver, Arc::new(TracingSink)))
    }
}
