//! Prompt text handed to the AI translation collaborator
//!
//! Only the encoding *names* cross this boundary. Any name outside the
//! catalogue, including `"Unknown"`, is refused instead of being sent on.

use crate::settings::TranslatorSettings;
use crate::{EncodingType, Error, Result};

/// System message sent alongside every prompt
pub const SYSTEM_INSTRUCTION: &str = "You are a specialized format translator. \
Provide only the translation and a brief byte-by-byte breakdown. \
Preserve any control code structures or formatting (things like <|, etc). \
Be concise and focus only on the translation task.";

const PREAMBLE: &str = "You are a specialized language and format translator. \
Translate the following content. \
Provide the translation and a character-by-character breakdown where relevant. \
Preserve any control code structures or formatting (things like <|, etc). \
Be concise and focus only on the translation task. ";

const AUTO_DETECT: &str = "Auto-Detect (please specify if multiple languages are detected)";

fn checked_name(name: &str) -> Result<EncodingType> {
    EncodingType::from_name(name).ok_or_else(|| Error::UnknownEncoding(name.to_string()))
}

/// Build the translation prompt for `text` converted between two named formats
pub fn build_prompt(
    text: &str,
    source_format: &str,
    target_format: &str,
    settings: &TranslatorSettings,
) -> Result<String> {
    let source = checked_name(source_format)?;
    let target = checked_name(target_format)?;

    let from = settings
        .translate_from
        .as_deref()
        .filter(|language| !language.is_empty())
        .unwrap_or(AUTO_DETECT);

    let mut prompt = String::with_capacity(PREAMBLE.len() + text.len() + 256);
    prompt.push_str(PREAMBLE);

    if let Some(context) = settings.custom_context.as_deref().filter(|c| !c.is_empty()) {
        prompt.push_str(&format!("\n\nContext for translation: {}", context));
    }

    prompt.push_str(&format!(
        "\n\nSource format: {}\nTarget format: {}\nTranslate to: {}\nTranslate from: {}",
        source,
        target,
        settings.target_language(),
        from
    ));

    prompt.push_str("\n\nContent to translate:\n");
    prompt.push_str(text);

    Ok(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{UNKNOWN_ENCODING_NAME, encoding_type_to_name};

    #[test]
    fn test_prompt_layout() {
        let prompt = build_prompt("Hello", "Hex", "UTF-8", &TranslatorSettings::default()).unwrap();
        assert!(prompt.starts_with("You are a specialized language and format translator. "));
        assert!(prompt.ends_with(
            "\n\nSource format: Hex\nTarget format: UTF-8\nTranslate to: English\n\
             Translate from: Auto-Detect (please specify if multiple languages are detected)\
             \n\nContent to translate:\nHello"
        ));
        assert!(!prompt.contains("Context for translation"));
    }

    #[test]
    fn test_prompt_with_context_and_languages() {
        let settings = TranslatorSettings {
            custom_context: Some("Retro game script".to_string()),
            translate_to: "German".to_string(),
            translate_from: Some("Japanese".to_string()),
            ..TranslatorSettings::default()
        };
        let prompt = build_prompt("ｱ", "Shift-JIS", "UTF-16LE", &settings).unwrap();
        assert!(prompt.contains("\n\nContext for translation: Retro game script\n\nSource format: Shift-JIS"));
        assert!(prompt.contains("\nTranslate to: German\nTranslate from: Japanese\n"));
    }

    #[test]
    fn test_blank_settings_use_fallbacks() {
        let settings = TranslatorSettings {
            custom_context: Some(String::new()),
            translate_to: " ".to_string(),
            translate_from: Some(String::new()),
            ..TranslatorSettings::default()
        };
        let prompt = build_prompt("41", "Hex", "ASCII", &settings).unwrap();
        let expected = format!(
            "{}\n\nSource format: Hex\nTarget format: ASCII\nTranslate to: English\n\
             Translate from: {}\n\nContent to translate:\n41",
            PREAMBLE, AUTO_DETECT
        );
        assert_eq!(prompt, expected);
    }

    #[test]
    fn test_unknown_format_is_refused() {
        let settings = TranslatorSettings::default();
        let unknown = encoding_type_to_name(42);
        assert_eq!(unknown, UNKNOWN_ENCODING_NAME);
        assert_eq!(
            build_prompt("x", unknown, "UTF-8", &settings),
            Err(Error::UnknownEncoding("Unknown".to_string()))
        );
        assert!(build_prompt("x", "Hex", "utf8", &settings).is_err());
    }
}
