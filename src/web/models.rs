use serde::{Deserialize, Serialize};

use crate::weaver::language::{self, DEFAULT_LANGUAGE, LANGUAGES};
use crate::weaver::state::WeaverState;

pub const MAX_PROMPT_CHARS: usize = 100;

#[derive(Debug, Deserialize)]
pub struct PromptForm {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct TranslateForm {
    pub story: String,
    #[serde(default)]
    pub prompt: String,
    pub language: String,
}

#[derive(Debug, Deserialize)]
pub struct ExportForm {
    pub text: String,
    pub language: Option<String>,
}

/// Trims the prompt and applies the form limits.
pub fn validate_prompt(raw: &str) -> Result<&str, &'static str> {
    let prompt = raw.trim();
    if prompt.is_empty() {
        Err("Please enter a word or phrase.")
    } else if prompt.chars().count() > MAX_PROMPT_CHARS {
        Err("Prompt is too long (max 100 characters).")
    } else {
        Ok(prompt)
    }
}

/// Base name for a download; no language means the original story.
pub fn export_base(target: Option<&str>) -> String {
    match target.map(str::trim).filter(|l| !l.is_empty()) {
        Some(lang) => language::translated_export_base(lang),
        None => language::original_export_base(),
    }
}

/// Everything the page template needs, flattened out of a [`WeaverState`].
#[derive(Debug, Serialize)]
pub struct PageView<'a> {
    pub prompt: &'a str,
    pub prompt_error: Option<&'a str>,
    pub story: Option<&'a str>,
    pub generation_error: Option<&'a str>,
    pub translation: Option<&'a str>,
    pub translation_error: Option<&'a str>,
    pub selected_language: &'a str,
    pub languages: &'static [&'static str],
}

impl<'a> PageView<'a> {
    pub fn new(state: &'a WeaverState, prompt: &'a str, selected_language: Option<&'a str>) -> Self {
        let selected_language = state
            .language()
            .or(selected_language)
            .unwrap_or(DEFAULT_LANGUAGE);

        Self {
            prompt,
            prompt_error: None,
            story: state.story(),
            generation_error: state.generation_error(),
            translation: state.translation(),
            translation_error: state.translation_error(),
            selected_language,
            languages: LANGUAGES,
        }
    }

    pub fn with_prompt_error(mut self, message: &'a str) -> Self {
        self.prompt_error = Some(message);
        self
    }
}
