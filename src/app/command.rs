//! Line commands for the interactive terminal session.
//!
//! Plain lines are appended to the input buffer. Lines starting with `:`
//! are commands; `::` escapes a literal leading colon.

use std::path::PathBuf;

use crate::language::{Language, SourceChoice};
use crate::locale::UiLocale;
use super::event::{AppEvent, InputEdit};

#[derive(Debug, PartialEq)]
pub enum Command {
    Dispatch(AppEvent),
    ListModels,
    Show,
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);

    if let Some(escaped) = line.strip_prefix("::") {
        return append(format!(":{}", escaped));
    }
    let Some(command) = line.strip_prefix(':') else {
        return append(line.to_string());
    };

    let (name, argument) = match command.trim().split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (command.trim(), ""),
    };

    match (name, argument) {
        ("translate" | "t", "") => Command::Dispatch(AppEvent::TranslateClicked),
        ("clear", "") => Command::Dispatch(AppEvent::TextChanged(InputEdit::Clear)),
        ("models", "") => Command::ListModels,
        ("show", "") => Command::Show,
        ("help" | "h" | "?", "") => Command::Help,
        ("quit" | "q" | "exit", "") => Command::Quit,
        ("source", argument) if !argument.is_empty() => source_index(argument)
            .map(|index| Command::Dispatch(AppEvent::SourceSelected(index)))
            .unwrap_or_else(|| invalid(line)),
        ("target", argument) if !argument.is_empty() => target_index(argument)
            .map(|index| Command::Dispatch(AppEvent::TargetSelected(index)))
            .unwrap_or_else(|| invalid(line)),
        ("model", argument) => match argument.parse::<usize>() {
            Ok(index) => Command::Dispatch(AppEvent::ModelSelected(index)),
            Err(_) => invalid(line),
        },
        ("locale", argument) => match UiLocale::from_code(argument) {
            Ok(locale) => Command::Dispatch(AppEvent::LocaleChanged(locale)),
            Err(_) => invalid(line),
        },
        ("load", argument) if !argument.is_empty() => {
            Command::Dispatch(AppEvent::LoadFile(PathBuf::from(argument)))
        }
        ("save", argument) if !argument.is_empty() => {
            Command::Dispatch(AppEvent::SaveOutput(PathBuf::from(argument)))
        }
        // an empty URL still reaches the dispatcher, which owns that warning
        ("web", argument) => Command::Dispatch(AppEvent::WebRequested(argument.to_string())),
        _ => invalid(line),
    }
}

fn append(line: String) -> Command {
    Command::Dispatch(AppEvent::TextChanged(InputEdit::Append(line)))
}

fn invalid(line: &str) -> Command {
    Command::Invalid(line.to_string())
}

fn source_index(argument: &str) -> Option<usize> {
    match argument.parse::<usize>() {
        Ok(index) => SourceChoice::from_index(index).map(SourceChoice::index),
        Err(_) => SourceChoice::parse(argument).ok().map(SourceChoice::index),
    }
}

fn target_index(argument: &str) -> Option<usize> {
    match argument.parse::<usize>() {
        Ok(index) => Language::from_index(index).map(Language::index),
        Err(_) => Language::parse(argument).ok().map(Language::index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatched(line: &str) -> AppEvent {
        match parse_line(line) {
            Command::Dispatch(event) => event,
            other => panic!("expected an event for {:?}, got {:?}", line, other),
        }
    }

    #[test]
    fn test_plain_lines_append() {
        assert_eq!(
            dispatched("Hello world\n"),
            AppEvent::TextChanged(InputEdit::Append("Hello world".to_string()))
        );
        assert_eq!(dispatched(""), AppEvent::TextChanged(InputEdit::Append(String::new())));
        assert_eq!(
            dispatched("::not a command"),
            AppEvent::TextChanged(InputEdit::Append(":not a command".to_string()))
        );
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(dispatched(":translate"), AppEvent::TranslateClicked);
        assert_eq!(dispatched(":t"), AppEvent::TranslateClicked);
        assert_eq!(dispatched(":clear"), AppEvent::TextChanged(InputEdit::Clear));
        assert_eq!(parse_line(":models"), Command::ListModels);
        assert_eq!(parse_line(":show"), Command::Show);
        assert_eq!(parse_line(":help"), Command::Help);
        assert_eq!(parse_line(":q"), Command::Quit);
        assert_eq!(parse_line(":quit\r\n"), Command::Quit);
    }

    #[test]
    fn test_selection_commands() {
        assert_eq!(dispatched(":source 0"), AppEvent::SourceSelected(0));
        assert_eq!(dispatched(":source auto"), AppEvent::SourceSelected(0));
        assert_eq!(dispatched(":source French"), AppEvent::SourceSelected(5));
        assert_eq!(dispatched(":target 일본어"), AppEvent::TargetSelected(2));
        assert_eq!(dispatched(":target 5"), AppEvent::TargetSelected(5));
        assert_eq!(dispatched(":model 2"), AppEvent::ModelSelected(2));
        assert_eq!(dispatched(":locale en"), AppEvent::LocaleChanged(UiLocale::English));
    }

    #[test]
    fn test_path_and_url_commands() {
        assert_eq!(
            dispatched(":load docs/report final.docx"),
            AppEvent::LoadFile(PathBuf::from("docs/report final.docx"))
        );
        assert_eq!(dispatched(":save out.txt"), AppEvent::SaveOutput(PathBuf::from("out.txt")));
        assert_eq!(
            dispatched(":web https://example.com"),
            AppEvent::WebRequested("https://example.com".to_string())
        );
        assert_eq!(dispatched(":web"), AppEvent::WebRequested(String::new()));
    }

    #[test]
    fn test_invalid_commands() {
        for line in [":target auto", ":target 6", ":source 7", ":model x", ":locale jp", ":load", ":frobnicate"] {
            assert_eq!(parse_line(line), Command::Invalid(line.to_string()), "{}", line);
        }
    }
}
