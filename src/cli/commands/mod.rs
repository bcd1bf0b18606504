//! Subcommand implementations.

use anyhow::{Result, bail};

use crate::cli::Args;
use crate::config::{ConfigFile, ConfigManager, ResolveOptions, resolve_config, resolve_translation};
use crate::console::Console;
use crate::translation::TranslationService;

/// Feature walkthrough.
pub mod demo;

/// Single-line rendering.
pub mod echo;

/// Translation and detection commands.
pub mod translate;

fn load_config_file(args: &Args) -> Result<ConfigFile> {
    let manager = match &args.config {
        Some(path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new()?,
    };
    manager.load_or_default()
}

/// Builds a console from the config file and global flags.
///
/// A translator is attached only when translation providers are configured.
pub fn load_console(args: &Args) -> Result<Console> {
    let config_file = load_config_file(args)?;

    let options = ResolveOptions {
        debug: args.debug,
        debug_prefix: args.debug_prefix.clone(),
        language: args.language.clone(),
    };
    let resolved = resolve_config(&options, &config_file)?;

    let mut console = Console::new(resolved.console);
    console.set_color_tokens(resolved.tokens);

    if let Some(translation) = resolve_translation(&config_file)? {
        console = console.with_translator(TranslationService::from_resolved(&translation)?);
    }

    if let Some(language) = resolved.language {
        console.setup_language(None, Some(&language))?;
    }

    Ok(console)
}

/// Builds the translation service, which must be configured.
pub fn load_translation(args: &Args) -> Result<TranslationService> {
    let config_file = load_config_file(args)?;

    let Some(translation) = resolve_translation(&config_file)? else {
        bail!(
            "No translation providers configured\n\n\
             Add a [translation] section and a provider to ~/.config/x-console/config.toml:\n\n  \
             [translation]\n  \
             offline = \"ollama\"\n\n  \
             [providers.ollama]\n  \
             endpoint = \"http://localhost:11434\"\n  \
             model = \"gemma3:12b\""
        );
    };

    TranslationService::from_resolved(&translation)
}
