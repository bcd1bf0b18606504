use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::console::{ConsoleConfig, DEFAULT_DEBUG_PREFIX};
use crate::markup::parse_token_map;
use crate::paths;
use crate::style::StyleSpec;
use crate::translation::{DEFAULT_CACHE_TTL, validate_language};

/// Settings in the `[console]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsoleSection {
    /// Emit `debug` lines.
    pub debug: Option<bool>,
    /// Tag printed in front of debug lines.
    pub debug_prefix: Option<String>,
    /// Active output language (ISO 639-1 code).
    pub language: Option<String>,
}

/// Settings in the `[translation]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationSection {
    /// Provider tried first when online translation is requested.
    pub online: Option<String>,
    /// Provider used offline and as the online fallback.
    pub offline: Option<String>,
    /// Provider asked for language detection.
    pub detector: Option<String>,
    /// Cache lifetime in seconds.
    pub cache_ttl: Option<u64>,
}

/// Configuration for a translation provider.
///
/// Each provider has an OpenAI-compatible endpoint, a model and optional
/// API key settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The OpenAI-compatible API endpoint URL.
    pub endpoint: String,
    /// Model name sent with every request.
    pub model: String,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
}

impl ProviderConfig {
    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone()
    }

    /// Returns `true` if this provider requires an API key.
    pub const fn requires_api_key(&self) -> bool {
        self.api_key.is_some() || self.api_key_env.is_some()
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/x-console/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub console: ConsoleSection,
    /// Token overrides merged over the default table.
    #[serde(default)]
    pub tokens: BTreeMap<String, String>,
    #[serde(default)]
    pub translation: TranslationSection,
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

/// Console settings after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub console: ConsoleConfig,
    /// Canonical code of the active output language.
    pub language: Option<String>,
    /// Token overrides, already validated.
    pub tokens: Vec<(char, StyleSpec)>,
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// `--debug` was given.
    pub debug: bool,
    /// Debug prefix override.
    pub debug_prefix: Option<String>,
    /// Output language override.
    pub language: Option<String>,
}

/// A provider ready to be turned into a back end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProvider {
    pub name: String,
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
}

/// Translation settings with provider names resolved.
#[derive(Debug, Clone)]
pub struct ResolvedTranslation {
    pub online: Option<ResolvedProvider>,
    pub offline: Option<ResolvedProvider>,
    pub detector: Option<ResolvedProvider>,
    pub cache_ttl: Duration,
}

/// Resolves console settings by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values.
///
/// # Errors
///
/// Returns an error if the language code is unsupported or a token key is not
/// a single character.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let debug = options.debug || config_file.console.debug.unwrap_or(false);

    let debug_prefix = options
        .debug_prefix
        .as_ref()
        .or(config_file.console.debug_prefix.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_DEBUG_PREFIX.to_string());

    let language = options
        .language
        .as_deref()
        .or(config_file.console.language.as_deref())
        .map(validate_language)
        .transpose()?
        .map(str::to_string);

    let tokens = parse_token_map(
        config_file
            .tokens
            .iter()
            .map(|(token, spec)| (token.as_str(), spec.as_str())),
    )
    .context("Invalid [tokens] table in config file")?;

    Ok(ResolvedConfig {
        console: ConsoleConfig {
            debug,
            debug_prefix,
        },
        language,
        tokens,
    })
}

/// Looks up a provider by name and resolves its API key.
///
/// # Errors
///
/// Returns an error if the provider is not configured or needs an API key
/// that is not available.
pub fn resolve_provider(name: &str, config_file: &ConfigFile) -> Result<ResolvedProvider> {
    let provider_config = config_file.providers.get(name).ok_or_else(|| {
        let mut available: Vec<_> = config_file.providers.keys().map(String::as_str).collect();
        available.sort_unstable();
        if available.is_empty() {
            anyhow::anyhow!(
                "Provider '{name}' not found\n\n\
                 No providers configured. Add providers to ~/.config/x-console/config.toml"
            )
        } else {
            anyhow::anyhow!(
                "Provider '{name}' not found\n\n\
                 Available providers:\n  \
                 - {}\n\n\
                 Add providers to ~/.config/x-console/config.toml",
                available.join("\n  - ")
            )
        }
    })?;

    let api_key = provider_config.get_api_key();

    if provider_config.requires_api_key() && api_key.is_none() {
        let env_var = provider_config.api_key_env.as_deref().unwrap_or("API_KEY");
        bail!(
            "Provider '{name}' requires an API key\n\n\
             Set the {env_var} environment variable:\n  \
             export {env_var}=\"your-api-key\"\n\n\
             Or set api_key in ~/.config/x-console/config.toml"
        );
    }

    Ok(ResolvedProvider {
        name: name.to_string(),
        endpoint: provider_config.endpoint.clone(),
        model: provider_config.model.clone(),
        api_key,
    })
}

/// Resolves the `[translation]` section.
///
/// Returns `None` when neither an online nor an offline provider is set. The
/// detector defaults to the offline provider, then the online one.
///
/// # Errors
///
/// Returns an error if a named provider cannot be resolved.
pub fn resolve_translation(config_file: &ConfigFile) -> Result<Option<ResolvedTranslation>> {
    let section = &config_file.translation;
    if section.online.is_none() && section.offline.is_none() {
        return Ok(None);
    }

    let resolve = |name: Option<&String>| {
        name.map(|name| resolve_provider(name, config_file))
            .transpose()
    };

    let online = resolve(section.online.as_ref())?;
    let offline = resolve(section.offline.as_ref())?;
    let detector = match &section.detector {
        Some(name) => Some(resolve_provider(name, config_file)?),
        None => offline.clone().or_else(|| online.clone()),
    };

    Ok(Some(ResolvedTranslation {
        online,
        offline,
        detector,
        cache_ttl: section
            .cache_ttl
            .map_or(DEFAULT_CACHE_TTL, Duration::from_secs),
    }))
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/x-console/config.toml`
    /// or `~/.config/x-console/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    /// Uses an explicit config file path.
    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    /// Loads the config file, or an empty one if it is missing.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}
