//! XDG-style path utilities for configuration and cache directories.
//!
//! Paths follow XDG Base Directory conventions on every platform rather
//! than OS-specific locations.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "x-console";

/// Returns the configuration directory.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/x-console` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/x-console` otherwise
pub fn config_dir() -> Result<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

/// Returns the cache directory.
///
/// Resolution order:
/// 1. `$XDG_CACHE_HOME/x-console` if `XDG_CACHE_HOME` is set
/// 2. `~/.cache/x-console` otherwise
pub fn cache_dir() -> Result<PathBuf> {
    xdg_dir("XDG_CACHE_HOME", ".cache")
}

fn xdg_dir(var: &str, fallback: &str) -> Result<PathBuf> {
    match std::env::var_os(var) {
        Some(xdg) if !xdg.is_empty() => Ok(PathBuf::from(xdg).join(APP_DIR)),
        _ => {
            let home = dirs::home_dir().context("Failed to determine home directory")?;
            Ok(home.join(fallback).join(APP_DIR))
        }
    }
}
