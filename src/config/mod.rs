mod manager;

pub use manager::{
    ConfigFile, ConfigManager, ConsoleSection, ProviderConfig, ResolveOptions, ResolvedConfig,
    ResolvedProvider, ResolvedTranslation, TranslationSection, resolve_config, resolve_provider,
    resolve_translation,
};
