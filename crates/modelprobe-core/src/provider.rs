//! Statically declared provider registry.
//!
//! Providers are listed up front as `(name, handle)` pairs. The registry
//! never discovers anything at runtime; it only filters the declared list.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Connection details for one provider, passed through to the probe client
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderHandle {
    /// Base URL of an OpenAI-compatible API (e.g. "https://api.groq.com/openai/v1").
    pub base_url: String,

    /// Environment variable holding the bearer token, if the provider needs one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
}

impl ProviderHandle {
    /// Create a handle for an endpoint that needs no credential.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key_env: None,
        }
    }

    /// Builder method to set the credential environment variable.
    pub fn with_api_key_env(mut self, var: impl Into<String>) -> Self {
        self.api_key_env = Some(var.into());
        self
    }
}

/// A named provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEntry {
    /// Provider name as shown in reports.
    pub name: String,

    /// Handle given to the probe client.
    #[serde(flatten)]
    pub handle: ProviderHandle,
}

impl ProviderEntry {
    pub fn new(name: impl Into<String>, handle: ProviderHandle) -> Self {
        Self {
            name: name.into(),
            handle,
        }
    }
}

/// Ordered list of declared providers.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    entries: Vec<ProviderEntry>,
}

impl ProviderRegistry {
    /// Build a registry, rejecting duplicate names.
    pub fn new(entries: Vec<ProviderEntry>) -> Result<Self, CoreError> {
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.name == entry.name) {
                return Err(CoreError::DuplicateProvider(entry.name.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// All declared providers, in declaration order.
    pub fn entries(&self) -> &[ProviderEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Providers eligible for probing.
    ///
    /// Skips empty names and names starting with `_`, then drops every name
    /// containing any of `exclusions` as a case-sensitive substring.
    pub fn filtered<S: AsRef<str>>(&self, exclusions: &[S]) -> Vec<ProviderEntry> {
        self.entries
            .iter()
            .filter(|e| !e.name.is_empty() && !e.name.starts_with('_'))
            .filter(|e| !exclusions.iter().any(|x| e.name.contains(x.as_ref())))
            .cloned()
            .collect()
    }
}
