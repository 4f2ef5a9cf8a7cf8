//! UI locale tables.

use crate::error::{Result, TranslyError};
use crate::language::{Language, SourceChoice};
use crate::session::{ErrorInfo, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiLocale {
    #[default]
    Korean,
    English,
}

/// Every user-visible string for one locale
#[derive(Debug)]
pub struct UiStrings {
    pub window_title: &'static str,
    pub lbl_source: &'static str,
    pub lbl_target: &'static str,
    pub lbl_model: &'static str,
    pub lbl_detected: &'static str,
    pub input_label: &'static str,
    pub output_label: &'static str,
    pub input_placeholder: &'static str,
    pub output_placeholder: &'static str,
    pub url_placeholder: &'static str,
    pub load_btn: &'static str,
    pub translate_btn: &'static str,
    pub save_btn: &'static str,
    pub web_btn: &'static str,
    pub auto_detect: &'static str,
    pub detect_failed: &'static str,
    pub model_unusable: &'static str,
    pub no_supported_model: &'static str,
    pub check_api_key: &'static str,
    pub translating: &'static str,
    pub saved: &'static str,
    pub fatal_api_key: &'static str,
    pub help_intro: &'static str,
    pub help_clear: &'static str,
    pub help_source: &'static str,
    pub help_target: &'static str,
    pub help_model: &'static str,
    pub help_models: &'static str,
    pub help_locale: &'static str,
    pub help_show: &'static str,
    pub help_help: &'static str,
    pub help_quit: &'static str,
    pub help_escape: &'static str,
    pub help_hint: &'static str,
    pub unknown_command: &'static str,
    empty_input: &'static str,
    invalid_model: &'static str,
    translation_failed: &'static str,
    empty_url: &'static str,
    page_fetch_failed: &'static str,
    unsupported_file: &'static str,
    file_read_failed: &'static str,
    file_write_failed: &'static str,
    busy: &'static str,
    unreadable_input: &'static str,
}

static KOREAN: UiStrings = UiStrings {
    window_title: "Gemini 번역기 - 확장판",
    lbl_source: "원문:",
    lbl_target: "번역:",
    lbl_model: "모델 선택:",
    lbl_detected: "감지된 언어:",
    input_label: "원문 텍스트 입력",
    output_label: "번역 결과",
    input_placeholder: "여기에 원문 텍스트를 입력하거나, '파일 불러오기'를 사용하세요.",
    output_placeholder: "여기에 번역 결과가 표시됩니다.",
    url_placeholder: "번역할 웹페이지 URL 입력",
    load_btn: "파일 불러오기",
    translate_btn: "번역하기",
    save_btn: "번역 결과 저장",
    web_btn: "웹 번역하기",
    auto_detect: "자동 감지",
    detect_failed: "감지 실패",
    model_unusable: "모델 선택 불가",
    no_supported_model: "⚠️ 지원되는 모델 없음",
    check_api_key: "⚠️ API 키를 확인하세요",
    translating: "번역 중...",
    saved: "저장했습니다",
    fatal_api_key: "⚠️ 설정 파일이 없거나 API 키가 설정되지 않았습니다.\n설정 파일을 확인하고 올바른 API 키를 입력하세요.",
    help_intro: "입력한 줄은 원문 텍스트에 추가됩니다. 명령:",
    help_clear: "원문 지우기",
    help_source: "원문 언어 선택 (0 또는 auto = 자동 감지)",
    help_target: "번역 언어 선택",
    help_model: "번호로 모델 선택",
    help_models: "모델 목록 보기",
    help_locale: "화면 언어 변경",
    help_show: "화면 다시 표시",
    help_help: "도움말 보기",
    help_quit: "종료",
    help_escape: "':'로 시작하는 텍스트는 '::'로 시작해 입력하세요.",
    help_hint: "도움말: :help",
    unknown_command: "알 수 없는 명령",
    empty_input: "⚠️ 번역할 문장을 입력하거나 파일을 불러오세요.",
    invalid_model: "⚠️ 올바른 모델을 선택해주세요.",
    translation_failed: "⚠️ 번역 중 오류 발생",
    empty_url: "⚠️ URL을 입력해주세요.",
    page_fetch_failed: "⚠️ 웹페이지 불러오기 실패",
    unsupported_file: "⚠️ 지원하지 않는 파일 형식입니다.",
    file_read_failed: "⚠️ 파일 읽기 오류",
    file_write_failed: "⚠️ 파일 저장 오류",
    busy: "⚠️ 번역이 이미 진행 중입니다.",
    unreadable_input: "⚠️ 입력을 읽을 수 없습니다",
};

static ENGLISH: UiStrings = UiStrings {
    window_title: "Gemini Translator - Extended",
    lbl_source: "Source:",
    lbl_target: "Translation:",
    lbl_model: "Select Model:",
    lbl_detected: "Detected:",
    input_label: "Input Text",
    output_label: "Translation Result",
    input_placeholder: "Type the source text here, or use 'Load File'.",
    output_placeholder: "The translation will appear here.",
    url_placeholder: "Enter a web page URL to translate",
    load_btn: "Load File",
    translate_btn: "Translate",
    save_btn: "Save Translation",
    web_btn: "Translate Webpage",
    auto_detect: "Auto Detect",
    detect_failed: "Detection failed",
    model_unusable: "Cannot select model",
    no_supported_model: "⚠️ No supported model",
    check_api_key: "⚠️ Check your API key",
    translating: "Translating...",
    saved: "Saved",
    fatal_api_key: "⚠️ The config file is missing or has no API key.\nCheck the config file and enter a valid API key.",
    help_intro: "Typed lines are appended to the input text. Commands:",
    help_clear: "Clear the input",
    help_source: "Select the source language (0 or auto = auto detect)",
    help_target: "Select the target language",
    help_model: "Select a model by number",
    help_models: "List models",
    help_locale: "Switch the UI language",
    help_show: "Redraw the screen",
    help_help: "Show this help",
    help_quit: "Quit",
    help_escape: "Start a line with '::' to enter text beginning with ':'.",
    help_hint: "Help: :help",
    unknown_command: "Unknown command",
    empty_input: "⚠️ Enter text to translate or load a file.",
    invalid_model: "⚠️ Please select a valid model.",
    translation_failed: "⚠️ Translation error",
    empty_url: "⚠️ Please enter a URL.",
    page_fetch_failed: "⚠️ Failed to load web page",
    unsupported_file: "⚠️ Unsupported file format.",
    file_read_failed: "⚠️ File read error",
    file_write_failed: "⚠️ File save error",
    busy: "⚠️ A translation is already in progress.",
    unreadable_input: "⚠️ Could not read the input line",
};

impl UiLocale {
    pub fn all() -> [UiLocale; 2] {
        [UiLocale::Korean, UiLocale::English]
    }

    /// Two-letter tag
    pub fn code(self) -> &'static str {
        match self {
            UiLocale::Korean => "ko",
            UiLocale::English => "en",
        }
    }

    pub fn from_code(code: &str) -> Result<UiLocale> {
        match code.trim().to_lowercase().as_str() {
            "ko" => Ok(UiLocale::Korean),
            "en" => Ok(UiLocale::English),
            other => Err(TranslyError::Config(format!(
                "Unsupported UI locale '{}'. Valid locales: ko, en",
                other
            ))),
        }
    }

    pub fn strings(self) -> &'static UiStrings {
        match self {
            UiLocale::Korean => &KOREAN,
            UiLocale::English => &ENGLISH,
        }
    }

    /// Source selector entries, Auto first
    pub fn source_options(self) -> Vec<&'static str> {
        std::iter::once(SourceChoice::Auto)
            .chain(Language::all().map(SourceChoice::Fixed))
            .map(|choice| choice.display_name(self))
            .collect()
    }

    /// Target selector entries
    pub fn target_options(self) -> Vec<&'static str> {
        Language::all().map(|language| language.display_name(self)).collect()
    }
}

impl UiStrings {
    /// Render a notice, appending the underlying error text when there is one
    pub fn describe(&self, error: &ErrorInfo) -> String {
        let headline = match error.kind {
            ErrorKind::EmptyInput => self.empty_input,
            ErrorKind::ModelUnavailable => self.invalid_model,
            ErrorKind::TranslationFailed => self.translation_failed,
            ErrorKind::EmptyUrl => self.empty_url,
            ErrorKind::PageFetchFailed => self.page_fetch_failed,
            ErrorKind::UnsupportedFile => self.unsupported_file,
            ErrorKind::FileReadFailed => self.file_read_failed,
            ErrorKind::FileWriteFailed => self.file_write_failed,
            ErrorKind::Busy => self.busy,
            ErrorKind::UnreadableInput => self.unreadable_input,
        };
        match &error.detail {
            Some(detail) => format!("{}: {}", headline, detail),
            None => headline.to_string(),
        }
    }
}
