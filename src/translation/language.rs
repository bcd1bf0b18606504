//! Supported language codes and their validation.

use anyhow::Result;

use crate::ui::Style;

/// Supported language codes (ISO 639-1) and their names.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("am", "Amharic"),
    ("ar", "Arabic"),
    ("az", "Azerbaijani"),
    ("be", "Belarusian"),
    ("bg", "Bulgarian"),
    ("bn", "Bengali"),
    ("bs", "Bosnian"),
    ("ca", "Catalan"),
    ("cs", "Czech"),
    ("cy", "Welsh"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("eu", "Basque"),
    ("fa", "Persian"),
    ("fi", "Finnish"),
    ("fil", "Filipino"),
    ("fr", "French"),
    ("ga", "Irish"),
    ("gl", "Galician"),
    ("gu", "Gujarati"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("hy", "Armenian"),
    ("id", "Indonesian"),
    ("is", "Icelandic"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ka", "Georgian"),
    ("kk", "Kazakh"),
    ("km", "Khmer"),
    ("kn", "Kannada"),
    ("ko", "Korean"),
    ("la", "Latin"),
    ("lo", "Lao"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("mk", "Macedonian"),
    ("ml", "Malayalam"),
    ("mn", "Mongolian"),
    ("mr", "Marathi"),
    ("ms", "Malay"),
    ("mt", "Maltese"),
    ("my", "Myanmar (Burmese)"),
    ("ne", "Nepali"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pa", "Punjabi"),
    ("pl", "Polish"),
    ("ps", "Pashto"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("si", "Sinhala"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sq", "Albanian"),
    ("sr", "Serbian"),
    ("sv", "Swedish"),
    ("sw", "Swahili"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("th", "Thai"),
    ("tl", "Tagalog"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("uz", "Uzbek"),
    ("vi", "Vietnamese"),
    ("zh", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Traditional)"),
];

/// Returns the canonical spelling of a supported code, ignoring case.
pub fn canonical_code(code: &str) -> Option<&'static str> {
    let code = code.trim();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(c, _)| *c)
}

/// Returns the English name of a supported language code.
pub fn language_name(code: &str) -> Option<&'static str> {
    canonical_code(code).and_then(|canonical| {
        SUPPORTED_LANGUAGES
            .iter()
            .find(|(c, _)| *c == canonical)
            .map(|(_, name)| *name)
    })
}

/// Formats the supported language table, one line per code.
pub fn language_lines() -> Vec<String> {
    SUPPORTED_LANGUAGES
        .iter()
        .map(|(code, name)| format!("  {:5} {}", Style::code(code), Style::secondary(name)))
        .collect()
}

/// Prints all supported language codes to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Supported language codes (ISO 639-1)"));
    for line in language_lines() {
        println!("{line}");
    }
}

/// Validates that the given language code is supported and returns its
/// canonical spelling.
///
/// # Errors
///
/// Returns an error if the language code is not in the supported list.
pub fn validate_language(lang: &str) -> Result<&'static str> {
    canonical_code(lang).ok_or_else(|| {
        anyhow::anyhow!(
            "Invalid language code: '{lang}'\n\n\
             Valid language codes (ISO 639-1): en, es, fr, de, ja, zh, ...\n\
             Run 'xc languages' to see all supported codes."
        )
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_language_valid() {
        assert_eq!(validate_language("es").unwrap(), "es");
        assert_eq!(validate_language("en").unwrap(), "en");
        assert_eq!(validate_language("zh-TW").unwrap(), "zh-TW");
    }

    #[test]
    fn test_validate_language_is_case_insensitive() {
        assert_eq!(validate_language("ES").unwrap(), "es");
        assert_eq!(validate_language("zh-tw").unwrap(), "zh-TW");
        assert_eq!(validate_language(" fr ").unwrap(), "fr");
    }

    #[test]
    fn test_validate_language_invalid() {
        assert!(validate_language("invalid").is_err());
        assert!(validate_language("").is_err());
        let err = validate_language("xx").unwrap_err();
        assert!(err.to_string().contains("Invalid language code"));
    }

    #[test]
    fn test_language_name() {
        assert_eq!(language_name("de"), Some("German"));
        assert_eq!(language_name("FR"), Some("French"));
        assert_eq!(language_name("qq"), None);
    }

    #[test]
    fn test_language_lines_cover_table() {
        let lines = language_lines();
        assert_eq!(lines.len(), SUPPORTED_LANGUAGES.len());
        assert!(lines.iter().any(|l| l.contains("Spanish")));
    }
}
