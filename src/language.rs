//! Supported languages and the table that names them.
//!
//! The same table feeds the language selectors (per UI locale) and the
//! prompts sent to the model (English names).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, TranslyError};
use crate::locale::UiLocale;

/// A concrete language. `Auto` is not a member; see [`SourceChoice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Korean,
    Japanese,
    Chinese,
    French,
    German,
}

struct LanguageEntry {
    language: Language,
    english: &'static str,
    korean: &'static str,
}

const LANGUAGE_TABLE: &[LanguageEntry] = &[
    LanguageEntry { language: Language::English, english: "English", korean: "영어" },
    LanguageEntry { language: Language::Korean, english: "Korean", korean: "한국어" },
    LanguageEntry { language: Language::Japanese, english: "Japanese", korean: "일본어" },
    LanguageEntry { language: Language::Chinese, english: "Chinese", korean: "중국어" },
    LanguageEntry { language: Language::French, english: "French", korean: "프랑스어" },
    LanguageEntry { language: Language::German, english: "German", korean: "독일어" },
];

impl Language {
    /// All languages in selector order
    pub fn all() -> impl Iterator<Item = Language> {
        LANGUAGE_TABLE.iter().map(|entry| entry.language)
    }

    fn entry(self) -> &'static LanguageEntry {
        // every variant has exactly one row
        LANGUAGE_TABLE
            .iter()
            .find(|entry| entry.language == self)
            .unwrap_or(&LANGUAGE_TABLE[0])
    }

    /// Name used when talking to the model
    pub fn prompt_name(self) -> &'static str {
        self.entry().english
    }

    /// Name shown in the given UI locale
    pub fn display_name(self, locale: UiLocale) -> &'static str {
        match locale {
            UiLocale::Korean => self.entry().korean,
            UiLocale::English => self.entry().english,
        }
    }

    /// Position in the target selector
    pub fn index(self) -> usize {
        LANGUAGE_TABLE
            .iter()
            .position(|entry| entry.language == self)
            .unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Language> {
        LANGUAGE_TABLE.get(index).map(|entry| entry.language)
    }

    /// Parse an English or Korean language name, case-insensitively
    pub fn parse(name: &str) -> Result<Language> {
        let wanted = name.trim();
        LANGUAGE_TABLE
            .iter()
            .find(|entry| entry.english.eq_ignore_ascii_case(wanted) || entry.korean == wanted)
            .map(|entry| entry.language)
            .ok_or_else(|| TranslyError::Config(format!("Unknown language '{}'", name)))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prompt_name())
    }
}

/// Source selection: either auto-detect or a fixed language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceChoice {
    #[default]
    Auto,
    Fixed(Language),
}

impl SourceChoice {
    /// Position in the source selector; Auto is always first.
    pub fn index(self) -> usize {
        match self {
            SourceChoice::Auto => 0,
            SourceChoice::Fixed(language) => language.index() + 1,
        }
    }

    pub fn from_index(index: usize) -> Option<SourceChoice> {
        match index {
            0 => Some(SourceChoice::Auto),
            n => Language::from_index(n - 1).map(SourceChoice::Fixed),
        }
    }

    /// Parse "auto" or a language name
    pub fn parse(name: &str) -> Result<SourceChoice> {
        if name.trim().eq_ignore_ascii_case("auto") {
            return Ok(SourceChoice::Auto);
        }
        Language::parse(name).map(SourceChoice::Fixed)
    }

    pub fn display_name(self, locale: UiLocale) -> &'static str {
        match self {
            SourceChoice::Auto => locale.strings().auto_detect,
            SourceChoice::Fixed(language) => language.display_name(locale),
        }
    }
}
