use std::path::PathBuf;

use crate::detect::Detection;
use crate::locale::UiLocale;
use crate::orchestrator::TranslationReport;
use crate::session::ErrorInfo;

/// How the input buffer changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEdit {
    Replace(String),
    /// Add a line after the current text
    Append(String),
    Clear,
}

impl InputEdit {
    pub fn apply(self, current: &str) -> String {
        match self {
            InputEdit::Replace(text) => text,
            InputEdit::Append(line) if current.is_empty() => line,
            InputEdit::Append(line) => format!("{}\n{}", current, line),
            InputEdit::Clear => String::new(),
        }
    }
}

/// Everything the event loop reacts to: user actions first, then
/// completions of work spawned by the dispatcher.
#[derive(Debug, PartialEq)]
pub enum AppEvent {
    TextChanged(InputEdit),
    TimerFired { generation: u64 },
    TranslateClicked,
    ModelSelected(usize),
    LocaleChanged(UiLocale),
    SourceSelected(usize),
    TargetSelected(usize),
    LoadFile(PathBuf),
    SaveOutput(PathBuf),
    WebRequested(String),

    DetectionFinished { revision: u64, detection: Detection },
    TranslationFinished(TranslationReport),
    FileLoaded(Result<String, ErrorInfo>),
    OutputSaved(Result<PathBuf, ErrorInfo>),
    PageFetched(Result<String, String>),
}

impl AppEvent {
    /// Idle event produced by the debounce timer
    pub fn timer_fired(generation: u64) -> Self {
        AppEvent::TimerFired { generation }
    }
}
