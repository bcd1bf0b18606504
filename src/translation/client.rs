use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::time::Duration;
use tracing::debug;

use super::language::{canonical_code, language_name};
use super::prompt::{DETECT_PROMPT, build_translate_prompt};
use super::{Backend, LanguageDetector};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// Use Cow to avoid cloning strings that are only borrowed for serialization
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Cow<'a, str>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

/// Translation and language detection through an OpenAI-compatible
/// chat completions endpoint.
pub struct HttpBackend {
    client: Client,
    name: String,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl HttpBackend {
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            name: name.into(),
            endpoint: endpoint.into(),
            model: model.into(),
            api_key,
        })
    }

    fn complete(&self, system_prompt: String, text: &str) -> Result<String> {
        let url = format!(
            "{}/v1/chat/completions",
            self.endpoint.trim_end_matches('/')
        );

        let chat_request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: Cow::Owned(system_prompt),
                },
                Message {
                    role: "user",
                    content: Cow::Borrowed(text),
                },
            ],
            stream: false,
        };

        let mut http_request = self.client.post(&url).json(&chat_request);

        // Add Authorization header if API key is present
        if let Some(api_key) = &self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = http_request
            .send()
            .with_context(|| format!("Failed to connect to API endpoint: {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            anyhow::bail!("API request failed with status {status}: {body}");
        }

        let body = response.text().context("Failed to read API response")?;
        parse_completion(&body).with_context(|| format!("Empty completion from {}", self.name))
    }
}

impl Backend for HttpBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        let source = language_name(source_lang).unwrap_or("the original language");
        let target = language_name(target_lang).unwrap_or(target_lang);
        debug!(backend = %self.name, source_lang, target_lang, "requesting translation");
        self.complete(build_translate_prompt(source, target), text)
    }
}

impl LanguageDetector for HttpBackend {
    fn detect(&self, text: &str) -> Result<String> {
        let answer = self.complete(DETECT_PROMPT.to_string(), text)?;
        let code = parse_language_code(&answer)
            .with_context(|| format!("Unrecognised language code from {}: '{answer}'", self.name))?;
        debug!(backend = %self.name, code = %code, "detected language");
        Ok(code)
    }
}

fn parse_completion(body: &str) -> Option<String> {
    let response = serde_json::from_str::<CompletionResponse>(body).ok()?;

    let content: String = response
        .choices
        .into_iter()
        .filter_map(|c| c.message.content)
        .collect();

    let content = content.trim();
    if content.is_empty() {
        None
    } else {
        Some(content.to_string())
    }
}

/// Extracts a lowercase ISO 639-1 code from a model answer such as `"es"` or `"Es."`.
fn parse_language_code(answer: &str) -> Option<String> {
    let word = answer
        .split_whitespace()
        .next()?
        .trim_matches(|c: char| !c.is_ascii_alphanumeric() && c != '-');
    canonical_code(word).map(str::to_lowercase)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_completion() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Hello world"}}]}"#;
        assert_eq!(parse_completion(body), Some("Hello world".to_string()));
    }

    #[test]
    fn test_parse_completion_trims() {
        let body = r#"{"choices":[{"message":{"content":"  Hola \n"}}]}"#;
        assert_eq!(parse_completion(body), Some("Hola".to_string()));
    }

    #[test]
    fn test_parse_completion_empty_content() {
        let body = r#"{"choices":[{"message":{"content":""}}]}"#;
        assert_eq!(parse_completion(body), None);

        let body = r#"{"choices":[{"message":{"content":null}}]}"#;
        assert_eq!(parse_completion(body), None);
    }

    #[test]
    fn test_parse_completion_invalid_json() {
        assert_eq!(parse_completion("not json"), None);
        assert_eq!(parse_completion(r#"{"choices":[]}"#), None);
    }

    #[test]
    fn test_parse_language_code() {
        assert_eq!(parse_language_code("es"), Some("es".to_string()));
        assert_eq!(parse_language_code("FR."), Some("fr".to_string()));
        assert_eq!(parse_language_code("\"de\" is the code"), Some("de".to_string()));
        assert_eq!(parse_language_code("zh-TW"), Some("zh-tw".to_string()));
    }

    #[test]
    fn test_parse_language_code_unknown() {
        assert_eq!(parse_language_code("klingon"), None);
        assert_eq!(parse_language_code(""), None);
    }

    #[test]
    fn test_backend_name() {
        let backend = HttpBackend::new("local", "http://localhost:11434", "gemma3:12b", None).unwrap();
        assert_eq!(Backend::name(&backend), "local");
    }

    #[test]
    fn test_unreachable_endpoint_is_an_error() {
        // port 9 (discard) on localhost is not an HTTP server
        let backend = HttpBackend::new("nowhere", "http://127.0.0.1:9", "m", None).unwrap();
        assert!(backend.translate("Hola", "es", "en").is_err());
    }
}
