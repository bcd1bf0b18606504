#![allow(clippy::unwrap_used)]
//! Config priority contract tests.
//!
//! These tests verify that CLI options take priority over config file settings.
//! Priority order (highest to lowest):
//! 1. CLI arguments
//! 2. Config file defaults
//! 3. Built-in defaults

use std::collections::{BTreeMap, HashMap};
use x_console::config::{
    ConfigFile, ConsoleSection, ProviderConfig, ResolveOptions, TranslationSection, resolve_config,
    resolve_translation,
};

fn make_config_with_defaults() -> ConfigFile {
    let mut providers = HashMap::new();
    providers.insert(
        "local".to_string(),
        ProviderConfig {
            endpoint: "http://localhost:11434".to_string(),
            model: "gemma3:12b".to_string(),
            api_key: None,
            api_key_env: None,
        },
    );
    providers.insert(
        "remote".to_string(),
        ProviderConfig {
            endpoint: "https://api.example.com".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: Some("test_key".to_string()),
            api_key_env: None,
        },
    );

    ConfigFile {
        console: ConsoleSection {
            debug: Some(true),
            debug_prefix: Some("FILE".to_string()),
            language: Some("fr".to_string()),
        },
        tokens: BTreeMap::from([
            ("#".to_string(), "blue".to_string()),
            ("*".to_string(), "bold red".to_string()),
        ]),
        translation: TranslationSection {
            online: Some("remote".to_string()),
            offline: Some("local".to_string()),
            detector: Some("remote".to_string()),
            cache_ttl: None,
        },
        providers,
    }
}

#[test]
fn test_cli_debug_prefix_overrides_config() {
    let options = ResolveOptions {
        debug_prefix: Some("CLI".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &make_config_with_defaults()).unwrap();

    assert_eq!(resolved.console.debug_prefix, "CLI");
}

#[test]
fn test_config_debug_used_when_cli_flag_absent() {
    let resolved =
        resolve_config(&ResolveOptions::default(), &make_config_with_defaults()).unwrap();

    assert!(resolved.console.debug);
    assert_eq!(resolved.console.debug_prefix, "FILE");
}

#[test]
fn test_cli_language_overrides_config() {
    let options = ResolveOptions {
        language: Some("de".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &make_config_with_defaults()).unwrap();

    assert_eq!(resolved.language, Some("de".to_string()));
}

#[test]
fn test_config_tokens_are_carried_in_key_order() {
    let resolved =
        resolve_config(&ResolveOptions::default(), &make_config_with_defaults()).unwrap();

    let tokens: Vec<(char, &str)> = resolved
        .tokens
        .iter()
        .map(|(token, spec)| (*token, spec.as_str()))
        .collect();
    assert_eq!(tokens, vec![('#', "blue"), ('*', "bold red")]);
}

#[test]
fn test_builtin_defaults_when_nothing_is_set() {
    let resolved = resolve_config(&ResolveOptions::default(), &ConfigFile::default()).unwrap();

    assert!(!resolved.console.debug);
    assert_eq!(resolved.console.debug_prefix, "DEBUG");
    assert!(resolved.language.is_none());
}

#[test]
fn test_explicit_detector_wins_over_offline_provider() {
    let resolved = resolve_translation(&make_config_with_defaults())
        .unwrap()
        .unwrap();

    assert_eq!(resolved.detector.unwrap().name, "remote");
    assert_eq!(resolved.online.unwrap().api_key, Some("test_key".to_string()));
    assert_eq!(resolved.offline.unwrap().endpoint, "http://localhost:11434");
    assert_eq!(resolved.cache_ttl.as_secs(), 3600);
}
