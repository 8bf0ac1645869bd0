use thiserror::Error;

use super::WeaverError;

/// Page interaction state. Every variant carries exactly the data it can show,
/// so a translation without a story, or a spinner next to an error, cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WeaverState {
    #[default]
    Idle,
    Generating,
    StoryReady {
        story: String,
    },
    GenerationFailed {
        message: String,
    },
    Translating {
        story: String,
        language: String,
    },
    TranslationReady {
        story: String,
        translation: String,
        language: String,
    },
    TranslationFailed {
        story: String,
        message: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("there is no story to translate yet")]
    NoStory,
    #[error("a request is already in flight")]
    Busy,
    #[error("no generation is in flight")]
    NotGenerating,
    #[error("no translation is in flight")]
    NotTranslating,
}

impl WeaverState {
    /// A new prompt always starts over, dropping any story and translation.
    pub fn submit(self) -> Self {
        WeaverState::Generating
    }

    pub fn finish_generation(self, result: Result<String, WeaverError>) -> Result<Self, TransitionError> {
        match self {
            WeaverState::Generating => Ok(match result {
                Ok(story) => WeaverState::StoryReady { story },
                Err(err) => WeaverState::GenerationFailed {
                    message: err.to_string(),
                },
            }),
            _ => Err(TransitionError::NotGenerating),
        }
    }

    /// Starts a translation of the current story, discarding any previous translation.
    pub fn begin_translation(self, language: impl Into<String>) -> Result<Self, TransitionError> {
        match self {
            WeaverState::StoryReady { story }
            | WeaverState::TranslationReady { story, .. }
            | WeaverState::TranslationFailed { story, .. } => Ok(WeaverState::Translating {
                story,
                language: language.into(),
            }),
            WeaverState::Generating | WeaverState::Translating { .. } => Err(TransitionError::Busy),
            _ => Err(TransitionError::NoStory),
        }
    }

    pub fn finish_translation(self, result: Result<String, WeaverError>) -> Result<Self, TransitionError> {
        match self {
            WeaverState::Translating { story, language } => Ok(match result {
                Ok(translation) => WeaverState::TranslationReady {
                    story,
                    translation,
                    language,
                },
                Err(err) => WeaverState::TranslationFailed {
                    story,
                    message: err.to_string(),
                },
            }),
            _ => Err(TransitionError::NotTranslating),
        }
    }

    /// True while a request is outstanding.
    pub fn is_busy(&self) -> bool {
        matches!(self, WeaverState::Generating | WeaverState::Translating { .. })
    }

    pub fn story(&self) -> Option<&str> {
        match self {
            WeaverState::StoryReady { story }
            | WeaverState::Translating { story, .. }
            | WeaverState::TranslationReady { story, .. }
            | WeaverState::TranslationFailed { story, .. } => Some(story),
            _ => None,
        }
    }

    pub fn translation(&self) -> Option<&str> {
        match self {
            WeaverState::TranslationReady { translation, .. } => Some(translation),
            _ => None,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match self {
            WeaverState::Translating { language, .. }
            | WeaverState::TranslationReady { language, .. } => Some(language),
            _ => None,
        }
    }

    pub fn generation_error(&self) -> Option<&str> {
        match self {
            WeaverState::GenerationFailed { message } => Some(message),
            _ => None,
        }
    }

    pub fn translation_error(&self) -> Option<&str> {
        match self {
            WeaverState::TranslationFailed { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(message: &str) -> Result<String, WeaverError> {
        Err(WeaverError::RequestFailed(message.to_string()))
    }

    fn story_ready() -> WeaverState {
        WeaverState::Idle
            .submit()
            .finish_generation(Ok("A fox found a lantern.".to_string()))
            .unwrap()
    }

    #[test]
    fn starts_idle_with_nothing_to_show() {
        let state = WeaverState::default();
        assert_eq!(state, WeaverState::Idle);
        assert!(state.story().is_none());
        assert!(state.translation().is_none());
        assert!(!state.is_busy());
    }

    #[test]
    fn successful_generation_shows_story() {
        let state = story_ready();
        assert_eq!(state.story(), Some("A fox found a lantern."));
        assert!(state.translation().is_none());
    }

    #[test]
    fn failed_generation_clears_story_and_translation() {
        let state = story_ready()
            .begin_translation("Spanish")
            .unwrap()
            .finish_translation(Ok("Un zorro encontró una linterna.".to_string()))
            .unwrap()
            .submit()
            .finish_generation(failed("connection refused"))
            .unwrap();

        assert!(state.story().is_none());
        assert!(state.translation().is_none());
        assert_eq!(state.generation_error(), Some("connection refused"));
        assert!(!state.is_busy());
    }

    #[test]
    fn submitting_clears_previous_results_immediately() {
        let state = story_ready()
            .begin_translation("French")
            .unwrap()
            .finish_translation(Ok("Un renard a trouvé une lanterne.".to_string()))
            .unwrap();
        assert!(state.translation().is_some());

        let state = state.submit();

        assert_eq!(state, WeaverState::Generating);
        assert!(state.story().is_none());
        assert!(state.translation().is_none());
        assert!(state.is_busy());
    }

    #[test]
    fn failed_translation_keeps_story_and_clears_translation() {
        let state = story_ready()
            .begin_translation("German")
            .unwrap()
            .finish_translation(Ok("Ein Fuchs fand eine Laterne.".to_string()))
            .unwrap()
            .begin_translation("Japanese")
            .unwrap()
            .finish_translation(failed("provider refused"))
            .unwrap();

        assert_eq!(state.story(), Some("A fox found a lantern."));
        assert!(state.translation().is_none());
        assert_eq!(state.translation_error(), Some("provider refused"));
    }

    #[test]
    fn retranslating_replaces_previous_translation() {
        let state = story_ready()
            .begin_translation("Spanish")
            .unwrap()
            .finish_translation(Ok("uno".to_string()))
            .unwrap()
            .begin_translation("Hindi")
            .unwrap();

        assert!(state.is_busy());
        assert!(state.translation().is_none());
        assert_eq!(state.language(), Some("Hindi"));

        let state = state.finish_translation(Ok("ek".to_string())).unwrap();
        assert_eq!(state.translation(), Some("ek"));
        assert_eq!(state.story(), Some("A fox found a lantern."));
    }

    #[test]
    fn translation_can_be_retried_after_failure() {
        let state = story_ready()
            .begin_translation("Arabic")
            .unwrap()
            .finish_translation(failed("timeout"))
            .unwrap()
            .begin_translation("Arabic");

        assert!(state.is_ok());
    }

    #[test]
    fn rejects_translation_without_story() {
        assert_eq!(
            WeaverState::Idle.begin_translation("Spanish"),
            Err(TransitionError::NoStory)
        );
        let failed_generation = WeaverState::Generating
            .finish_generation(failed("boom"))
            .unwrap();
        assert_eq!(
            failed_generation.begin_translation("Spanish"),
            Err(TransitionError::NoStory)
        );
    }

    #[test]
    fn rejects_translation_while_a_request_is_in_flight() {
        assert_eq!(
            WeaverState::Generating.begin_translation("Spanish"),
            Err(TransitionError::Busy)
        );
        let translating = story_ready().begin_translation("Spanish").unwrap();
        let err = translating.begin_translation("French").unwrap_err();
        assert_eq!(err, TransitionError::Busy);
        assert_eq!(err.to_string(), "a request is already in flight");
    }

    #[test]
    fn rejects_resolving_requests_that_are_not_in_flight() {
        assert_eq!(
            WeaverState::Idle.finish_generation(Ok("story".to_string())),
            Err(TransitionError::NotGenerating)
        );
        assert_eq!(
            story_ready().finish_translation(Ok("historia".to_string())),
            Err(TransitionError::NotTranslating)
        );
    }
}
