/// Target languages offered by the page. The service itself accepts any name.
pub const LANGUAGES: &[&str] = &[
    "Spanish",
    "French",
    "German",
    "Japanese",
    "Chinese (Simplified)",
    "Hindi",
    "Bangla",
    "Portuguese",
    "Russian",
    "Arabic",
];

pub const DEFAULT_LANGUAGE: &str = "Spanish";

const EXPORT_PREFIX: &str = "word_weaver_story_";

/// Download name stem for the untranslated story.
pub fn original_export_base() -> String {
    format!("{}original", EXPORT_PREFIX)
}

/// Download name stem for a translation: lowercased, each whitespace char replaced with `_`.
pub fn translated_export_base(language: &str) -> String {
    let slug: String = language
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!("{}{}", EXPORT_PREFIX, slug)
}

pub fn export_file_name(base: &str) -> String {
    format!("{}.txt", base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offers_ten_languages_with_spanish_first() {
        assert_eq!(LANGUAGES.len(), 10);
        assert_eq!(LANGUAGES[0], DEFAULT_LANGUAGE);
    }

    #[test]
    fn export_names() {
        assert_eq!(original_export_base(), "word_weaver_story_original");
        assert_eq!(translated_export_base("Spanish"), "word_weaver_story_spanish");
        assert_eq!(
            translated_export_base("Chinese (Simplified)"),
            "word_weaver_story_chinese_(simplified)"
        );
        assert_eq!(
            export_file_name(&translated_export_base("Spanish")),
            "word_weaver_story_spanish.txt"
        );
    }
}
