use anyhow::Result;

use crate::status;
use crate::translation::{Translate, TranslationService, language_name, validate_language};
use crate::ui::{Spinner, Style};

/// Translates `text` and prints the result to stdout.
///
/// The service never fails; when no back end could translate, the original
/// text is printed and a note goes to stderr.
pub fn run_translate(service: &TranslationService, text: &str, to: &str, online: bool) -> Result<()> {
    let target = validate_language(to)?;

    let mut spinner = Spinner::new("Translating...");
    let translated = service.translate(text, target, online);
    spinner.stop();

    if translated == text {
        status!(
            "{} no translation was produced; showing the original text",
            Style::warning("Note:")
        );
    }

    println!("{translated}");
    Ok(())
}

/// Prints the detected language code and name.
pub fn run_detect(service: &TranslationService, text: &str) -> Result<()> {
    let mut spinner = Spinner::new("Detecting language...");
    let detected = service.detect_language(text);
    spinner.stop();

    let code = detected?;
    match language_name(&code) {
        Some(name) => println!("{} {}", Style::code(&code), Style::secondary(name)),
        None => println!("{}", Style::code(&code)),
    }
    Ok(())
}
