//! Provider registry sources: the built-in list or a JSON file.

use std::path::Path;

use modelprobe_core::{CoreError, ProviderEntry, ProviderHandle, ProviderRegistry};
use thiserror::Error;

/// Errors loading a provider file.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read provider file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse provider file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Invalid(#[from] CoreError),
}

/// OpenAI-compatible endpoints known at compile time.
const BUILTIN: &[(&str, &str, Option<&str>)] = &[
    ("OpenAI", "https://api.openai.com/v1", Some("OPENAI_API_KEY")),
    ("Groq", "https://api.groq.com/openai/v1", Some("GROQ_API_KEY")),
    ("Together", "https://api.together.xyz/v1", Some("TOGETHER_API_KEY")),
    ("OpenRouter", "https://openrouter.ai/api/v1", Some("OPENROUTER_API_KEY")),
    ("DeepInfra", "https://api.deepinfra.com/v1/openai", Some("DEEPINFRA_API_KEY")),
    ("Mistral", "https://api.mistral.ai/v1", Some("MISTRAL_API_KEY")),
    ("Ollama", "http://localhost:11434/v1", None),
    ("LMStudio", "http://localhost:1234/v1", None),
];

/// The built-in registry.
pub fn builtin() -> ProviderRegistry {
    let entries = BUILTIN
        .iter()
        .map(|(name, url, key)| {
            let handle = ProviderHandle::new(*url);
            let handle = match key {
                Some(var) => handle.with_api_key_env(*var),
                None => handle,
            };
            ProviderEntry::new(*name, handle)
        })
        .collect();
    // Names above are distinct.
    ProviderRegistry::new(entries).unwrap_or_default()
}

/// Load a registry from a JSON array of `{name, base_url, api_key_env?}`.
pub fn load(path: &Path) -> Result<ProviderRegistry, RegistryError> {
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| RegistryError::Read {
        path: display.clone(),
        source,
    })?;
    parse(&raw, &display)
}

fn parse(raw: &str, path: &str) -> Result<ProviderRegistry, RegistryError> {
    let entries: Vec<ProviderEntry> =
        serde_json::from_str(raw).map_err(|source| RegistryError::Parse {
            path: path.to_string(),
            source,
        })?;
    Ok(ProviderRegistry::new(entries)?)
}
