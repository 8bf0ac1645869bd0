//! Instruction templates sent to the model.

/// Output field the story prompt asks for when the model answers in JSON.
pub const STORY_FIELD: &str = "story";

/// Output field the translation prompt asks for when the model answers in JSON.
pub const TRANSLATION_FIELD: &str = "translatedText";

pub fn story_prompt(input_word: &str) -> String {
    format!(
        "You are a creative story writer. Generate a short story, up to 200 words, \
         based on the following word or phrase: {}.",
        input_word
    )
}

pub fn translation_prompt(text_to_translate: &str, target_language: &str) -> String {
    format!(
        "Translate the following text to {}:\n\n{}\n\n\
         Ensure the translation maintains the original tone and style of the story as much as possible.\n\
         Only provide the translated text as output.",
        target_language, text_to_translate
    )
}
