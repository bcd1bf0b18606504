use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, warn};

use super::language::canonical_code;
use super::{Backend, HttpBackend, LanguageDetector, Translate};
use crate::cache::{CacheKey, CacheManager};
use crate::config::{ResolvedProvider, ResolvedTranslation};

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Source language recorded when detection is unavailable.
const UNKNOWN_SOURCE: &str = "auto";

/// Online/offline translation with caching and language detection.
///
/// With `online` requested, the online back end is tried first; an error or
/// an unchanged answer falls through to the offline back end. Whatever
/// happens, [`Translate::translate`] hands back a string.
pub struct TranslationService {
    online: Option<Box<dyn Backend>>,
    offline: Option<Box<dyn Backend>>,
    detector: Option<Box<dyn LanguageDetector>>,
    cache: Option<CacheManager>,
    cache_ttl: Duration,
}

impl Default for TranslationService {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslationService {
    pub fn new() -> Self {
        Self {
            online: None,
            offline: None,
            detector: None,
            cache: None,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Builds HTTP back ends for every configured provider.
    ///
    /// The cache is optional: if it cannot be opened, translations still run
    /// uncached.
    pub fn from_resolved(resolved: &ResolvedTranslation) -> Result<Self> {
        let mut service = Self::new().with_cache_ttl(resolved.cache_ttl);

        if let Some(provider) = &resolved.online {
            service = service.with_online(http_backend(provider)?);
        }
        if let Some(provider) = &resolved.offline {
            service = service.with_offline(http_backend(provider)?);
        }
        if let Some(provider) = &resolved.detector {
            service = service.with_detector(http_backend(provider)?);
        }

        match CacheManager::new() {
            Ok(cache) => service = service.with_cache(cache),
            Err(err) => warn!(error = %err, "translation cache unavailable"),
        }

        Ok(service)
    }

    #[must_use]
    pub fn with_online(mut self, backend: impl Backend + 'static) -> Self {
        self.online = Some(Box::new(backend));
        self
    }

    #[must_use]
    pub fn with_offline(mut self, backend: impl Backend + 'static) -> Self {
        self.offline = Some(Box::new(backend));
        self
    }

    #[must_use]
    pub fn with_detector(mut self, detector: impl LanguageDetector + 'static) -> Self {
        self.detector = Some(Box::new(detector));
        self
    }

    #[must_use]
    pub fn with_cache(mut self, cache: CacheManager) -> Self {
        self.cache = Some(cache);
        self
    }

    #[must_use]
    pub const fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    fn cached(&self, key: &CacheKey) -> Option<String> {
        let cache = self.cache.as_ref()?;
        match cache.get(key) {
            Ok(hit) => hit,
            Err(err) => {
                warn!(error = %err, "cache lookup failed");
                None
            }
        }
    }

    fn store(&self, key: &CacheKey, translated: &str) {
        if let Some(cache) = &self.cache
            && let Err(err) = cache.put(key, translated, self.cache_ttl)
        {
            warn!(error = %err, "cache write failed");
        }
    }

    fn run_backends(&self, text: &str, source: &str, target: &str, online: bool) -> Option<String> {
        if online && let Some(backend) = &self.online {
            match backend.translate(text, source, target) {
                Ok(translated) if translated != text => return Some(translated),
                Ok(_) => debug!(backend = backend.name(), "online answer unchanged, trying offline"),
                Err(err) => debug!(backend = backend.name(), error = %err, "online translation failed, trying offline"),
            }
        }

        let backend = self.offline.as_ref()?;
        match backend.translate(text, source, target) {
            Ok(translated) => Some(translated),
            Err(err) => {
                debug!(backend = backend.name(), error = %err, "offline translation failed");
                None
            }
        }
    }
}

impl Translate for TranslationService {
    fn translate(&self, text: &str, target_lang: &str, online: bool) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        let target = canonical_code(target_lang).map_or_else(|| target_lang.to_lowercase(), str::to_lowercase);
        let source = self.detect_language(text).unwrap_or_else(|err| {
            debug!(error = %err, "source language unknown");
            UNKNOWN_SOURCE.to_string()
        });

        if source == target {
            return text.to_string();
        }

        let key = CacheKey::new(&source, &target, text);
        if let Some(hit) = self.cached(&key) {
            debug!(source = %source, target = %target, "cache hit");
            return hit;
        }

        match self.run_backends(text, &source, &target, online) {
            Some(translated) => {
                self.store(&key, &translated);
                translated
            }
            None => text.to_string(),
        }
    }

    fn detect_language(&self, text: &str) -> Result<String> {
        let detector = self
            .detector
            .as_ref()
            .context("No language detector configured")?;
        let code = detector.detect(text)?;
        canonical_code(&code)
            .map(str::to_lowercase)
            .with_context(|| format!("Unsupported language code: '{code}'"))
    }
}

fn http_backend(provider: &ResolvedProvider) -> Result<HttpBackend> {
    HttpBackend::new(
        provider.name.clone(),
        provider.endpoint.clone(),
        provider.model.clone(),
        provider.api_key.clone(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct Fixed {
        answer: &'static str,
        calls: Arc<AtomicUsize>,
    }

    impl Fixed {
        fn new(answer: &'static str) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    answer,
                    calls: Arc::clone(&calls),
                },
                calls,
            )
        }
    }

    impl Backend for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn translate(&self, _text: &str, _source: &str, _target: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.answer.to_string())
        }
    }

    struct Failing;

    impl Backend for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn translate(&self, _text: &str, _source: &str, _target: &str) -> Result<String> {
            anyhow::bail!("backend down")
        }
    }

    struct Echo;

    impl Backend for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn translate(&self, text: &str, _source: &str, _target: &str) -> Result<String> {
            Ok(text.to_string())
        }
    }

    struct Detects(&'static str);

    impl LanguageDetector for Detects {
        fn detect(&self, _text: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct CannotDetect;

    impl LanguageDetector for CannotDetect {
        fn detect(&self, _text: &str) -> Result<String> {
            anyhow::bail!("detector offline")
        }
    }

    #[test]
    fn test_failing_backends_return_input() {
        let service = TranslationService::new()
            .with_online(Failing)
            .with_offline(Failing)
            .with_detector(Detects("en"));
        assert_eq!(service.translate("x", "es", true), "x");
        assert_eq!(service.translate("x", "es", false), "x");
    }

    #[test]
    fn test_no_backends_returns_input() {
        let service = TranslationService::new();
        assert_eq!(service.translate("hello", "es", true), "hello");
    }

    #[test]
    fn test_online_preferred() {
        let (online, _) = Fixed::new("hola");
        let (offline, offline_calls) = Fixed::new("hola (offline)");
        let service = TranslationService::new()
            .with_online(online)
            .with_offline(offline)
            .with_detector(Detects("en"));

        assert_eq!(service.translate("hello", "es", true), "hola");
        assert_eq!(offline_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_online_failure_falls_back_to_offline() {
        let (offline, _) = Fixed::new("hola");
        let service = TranslationService::new()
            .with_online(Failing)
            .with_offline(offline)
            .with_detector(Detects("en"));

        assert_eq!(service.translate("hello", "es", true), "hola");
    }

    #[test]
    fn test_unchanged_online_answer_falls_back_to_offline() {
        let (offline, offline_calls) = Fixed::new("hola");
        let service = TranslationService::new()
            .with_online(Echo)
            .with_offline(offline)
            .with_detector(Detects("en"));

        assert_eq!(service.translate("hello", "es", true), "hola");
        assert_eq!(offline_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_offline_only_skips_online() {
        let (online, online_calls) = Fixed::new("hola (online)");
        let (offline, _) = Fixed::new("hola");
        let service = TranslationService::new()
            .with_online(online)
            .with_offline(offline)
            .with_detector(Detects("en"));

        assert_eq!(service.translate("hello", "es", false), "hola");
        assert_eq!(online_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_same_language_short_circuits() {
        let (offline, calls) = Fixed::new("should not be used");
        let service = TranslationService::new()
            .with_offline(offline)
            .with_detector(Detects("ES"));

        assert_eq!(service.translate("hola", "es", false), "hola");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_detection_failure_still_translates() {
        let (offline, _) = Fixed::new("hola");
        let service = TranslationService::new()
            .with_offline(offline)
            .with_detector(CannotDetect);

        assert_eq!(service.translate("hello", "es", false), "hola");
    }

    #[test]
    fn test_blank_text_is_untouched() {
        let (offline, calls) = Fixed::new("x");
        let service = TranslationService::new().with_offline(offline);
        assert_eq!(service.translate("  ", "es", false), "  ");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_detect_language_lowercases() {
        let service = TranslationService::new().with_detector(Detects("DE"));
        assert_eq!(service.detect_language("Hallo").unwrap(), "de");
    }

    #[test]
    fn test_detect_language_rejects_unknown_code() {
        let service = TranslationService::new().with_detector(Detects("xx"));
        assert!(service.detect_language("???").is_err());
    }

    #[test]
    fn test_detect_language_without_detector() {
        let service = TranslationService::new();
        let err = service.detect_language("Hallo").unwrap_err();
        assert!(err.to_string().contains("detector"));
    }

    #[test]
    fn test_cache_hit_skips_backend() {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheManager::open(temp_dir.path().join("translations.db")).unwrap();
        let (offline, calls) = Fixed::new("hola");
        let service = TranslationService::new()
            .with_offline(offline)
            .with_detector(Detects("en"))
            .with_cache(cache);

        assert_eq!(service.translate("hello", "es", false), "hola");
        assert_eq!(service.translate("hello", "es", false), "hola");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_zero_ttl_disables_reuse() {
        let temp_dir = TempDir::new().unwrap();
        let cache = CacheManager::open(temp_dir.path().join("translations.db")).unwrap();
        let (offline, calls) = Fixed::new("hola");
        let service = TranslationService::new()
            .with_offline(offline)
            .with_detector(Detects("en"))
            .with_cache(cache)
            .with_cache_ttl(Duration::ZERO);

        service.translate("hello", "es", false);
        service.translate("hello", "es", false);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
