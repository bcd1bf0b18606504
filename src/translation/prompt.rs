pub const TRANSLATE_PROMPT_TEMPLATE: &str = "You are a translator. Translate the following text from {source_language} to {target_language}. \
     Output only the translated text without any explanations. \
     Keep the characters * _ | and any text between them exactly where they are.";

pub const DETECT_PROMPT: &str = "Identify the language of the following text. \
     Answer with its ISO 639-1 code in lowercase and nothing else.";

#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_translate_prompt(source_language: &str, target_language: &str) -> String {
    // {source_language} and {target_language} are placeholders for string replacement, not format arguments
    TRANSLATE_PROMPT_TEMPLATE
        .replace("{source_language}", source_language)
        .replace("{target_language}", target_language)
}
