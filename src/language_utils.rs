use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for the speech language setting
///
/// Speech engines take ISO 639-1 codes, sometimes with a region suffix
/// ("en", "pt-BR", "zh-CN"). These helpers validate and normalize such codes.

/// Split a code into its language part and optional region suffix
fn split_region(code: &str) -> (String, Option<String>) {
    let trimmed = code.trim();
    match trimmed.split_once(['-', '_']) {
        Some((lang, region)) => (lang.to_lowercase(), Some(region.to_uppercase())),
        None => (trimmed.to_lowercase(), None),
    }
}

/// Look up the language for a 2-letter or 3-letter code
fn lookup(code: &str) -> Option<Language> {
    match code.len() {
        2 => Language::from_639_1(code),
        3 => Language::from_639_3(code),
        _ => None,
    }
}

/// Normalize a language code for speech synthesis
///
/// 3-letter codes are converted to their 2-letter form when one exists, and
/// a region suffix is kept in upper case (`pt_br` becomes `pt-BR`).
pub fn normalize_speech_language(code: &str) -> Result<String> {
    let (lang_part, region) = split_region(code);

    let lang = lookup(&lang_part)
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))?;

    let base = lang
        .to_639_1()
        .map(|c| c.to_string())
        .unwrap_or_else(|| lang.to_639_3().to_string());

    Ok(match region {
        Some(region) if !region.is_empty() => format!("{}-{}", base, region),
        _ => base,
    })
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let (lang_part, _) = split_region(code);
    let lang = lookup(&lang_part)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(lang.to_name().to_string())
}
