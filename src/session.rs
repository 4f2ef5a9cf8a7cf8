//! The single mutable record of the current translation task.

use crate::detect::Detection;
use crate::language::{Language, SourceChoice};
use crate::registry::ModelChoice;

/// Category of a user-visible notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyInput,
    ModelUnavailable,
    TranslationFailed,
    EmptyUrl,
    PageFetchFailed,
    UnsupportedFile,
    FileReadFailed,
    FileWriteFailed,
    Busy,
    /// A terminal line that is not valid UTF-8
    UnreadableInput,
}

/// A locally recovered error, kept until the next successful action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub detail: Option<String>,
}

impl ErrorInfo {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, detail: None }
    }

    pub fn with_detail(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self { kind, detail: Some(detail.into()) }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub input_text: String,
    pub source: SourceChoice,
    pub target: Language,
    pub detected_language: Option<Detection>,
    pub selected_model: ModelChoice,
    pub output_text: String,
    pub last_error: Option<ErrorInfo>,
    /// A translation is in flight; the translate action is disabled meanwhile
    pub busy: bool,
    input_revision: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Language::English, ModelChoice::default())
    }
}

impl Session {
    pub fn new(target: Language, selected_model: ModelChoice) -> Self {
        Self {
            input_text: String::new(),
            source: SourceChoice::Auto,
            target,
            detected_language: None,
            selected_model,
            output_text: String::new(),
            last_error: None,
            busy: false,
            input_revision: 0,
        }
    }

    /// Replace the input buffer; every call counts as an edit
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
        self.input_revision += 1;
    }

    /// Monotonic edit counter, used to recognise stale detection results
    pub fn input_revision(&self) -> u64 {
        self.input_revision
    }

    pub fn trimmed_input(&self) -> &str {
        self.input_text.trim()
    }

    pub fn has_input(&self) -> bool {
        !self.trimmed_input().is_empty()
    }

    /// Name of the detected language, when detection succeeded
    pub fn detected_language(&self) -> Option<&str> {
        self.detected_language.as_ref().and_then(Detection::language)
    }

    pub fn set_error(&mut self, error: ErrorInfo) {
        self.last_error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let session = Session::default();
        assert_eq!(session.source, SourceChoice::Auto);
        assert_eq!(session.target, Language::English);
        assert!(!session.selected_model.is_available());
        assert!(session.output_text.is_empty());
        assert!(!session.busy);
    }

    #[test]
    fn test_set_input_bumps_revision() {
        let mut session = Session::default();
        let before = session.input_revision();
        session.set_input("  hi  ");
        session.set_input("  hi  ");
        assert_eq!(session.input_revision(), before + 2);
        assert_eq!(session.trimmed_input(), "hi");
        assert!(session.has_input());

        session.set_input(" \n\t ");
        assert!(!session.has_input());
    }

    #[test]
    fn test_detected_language_only_for_success() {
        let mut session = Session::default();
        session.detected_language = Some(Detection::Failed("timeout".to_string()));
        assert_eq!(session.detected_language(), None);
        session.detected_language = Some(Detection::Detected("English".to_string()));
        assert_eq!(session.detected_language(), Some("English"));
    }
}
