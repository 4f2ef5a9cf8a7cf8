use std::sync::Arc;
use tracing::{debug, warn};

use crate::locale::UiLocale;
use crate::provider::ModelProvider;
use crate::registry::ModelChoice;

/// Label used in the translation prompt when detection did not produce a name
pub const UNDETERMINED_SOURCE_LABEL: &str = "an undetermined language";

/// Outcome of a detection attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// The model named a language
    Detected(String),
    /// The model answered with no text
    Undetermined,
    /// The selected model is the sentinel; nothing was sent
    ModelUnavailable,
    /// Transport or API failure
    Failed(String),
}

impl Detection {
    /// Detected language name, if any
    pub fn language(&self) -> Option<&str> {
        match self {
            Detection::Detected(name) => Some(name),
            _ => None,
        }
    }

    /// What the UI shows in place of the source selection
    pub fn display_label(&self, locale: UiLocale) -> String {
        let strings = locale.strings();
        match self {
            Detection::Detected(name) => name.clone(),
            Detection::Undetermined | Detection::Failed(_) => strings.detect_failed.to_string(),
            Detection::ModelUnavailable => strings.model_unusable.to_string(),
        }
    }

    /// Source language as written into the translation prompt
    pub fn prompt_label(&self) -> &str {
        self.language().unwrap_or(UNDETERMINED_SOURCE_LABEL)
    }
}

pub fn detection_prompt(text: &str) -> String {
    format!(
        "Detect the language of this text and answer with the language name only:\n{}",
        text
    )
}

/// Asks the remote model which language a text is written in
#[derive(Clone)]
pub struct LanguageDetector {
    provider: Arc<dyn ModelProvider>,
}

impl LanguageDetector {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self { provider }
    }

    /// Detect the language of `text`.
    ///
    /// Callers must not pass trimmed-empty text. A sentinel model returns
    /// [`Detection::ModelUnavailable`] without touching the network, and no
    /// failure is ever retried.
    pub async fn detect(&self, text: &str, model: &ModelChoice) -> Detection {
        let model = match model.model() {
            Some(model) => model,
            None => return Detection::ModelUnavailable,
        };

        debug!("Detecting language with {} ({} chars)", model, text.chars().count());

        match self.provider.generate_content(model, &detection_prompt(text)).await {
            Ok(content) => {
                let name = content.text.unwrap_or_default().trim().to_string();
                if name.is_empty() {
                    Detection::Undetermined
                } else {
                    Detection::Detected(name)
                }
            }
            Err(e) => {
                warn!("Language detection failed: {}", e);
                Detection::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslyError;
    use crate::provider::{GeneratedContent, MockModelProvider, ModelId};
    use crate::registry::Unavailable;

    fn pro() -> ModelChoice {
        ModelChoice::Available(ModelId::new("gemini-2.5-pro"))
    }

    #[tokio::test]
    async fn test_detect_trims_reply() {
        let mut provider = MockModelProvider::new();
        provider
            .expect_generate_content()
            .withf(|model, prompt| {
                model.as_str() == "gemini-2.5-pro"
                    && prompt == "Detect the language of this text and answer with the language name only:\nBonjour"
            })
            .times(1)
            .returning(|_, _| Ok(GeneratedContent::text("  French\n")));

        let detector = LanguageDetector::new(Arc::new(provider));
        assert_eq!(detector.detect("Bonjour", &pro()).await, Detection::Detected("French".to_string()));
    }

    #[tokio::test]
    async fn test_sentinel_model_makes_no_call() {
        let mut provider = MockModelProvider::new();
        provider.expect_generate_content().never();

        let detector = LanguageDetector::new(Arc::new(provider));
        let sentinel = ModelChoice::Unavailable(Unavailable::ListingFailed);
        let detection = detector.detect("Hello", &sentinel).await;

        assert_eq!(detection, Detection::ModelUnavailable);
        assert_eq!(detection.display_label(UiLocale::Korean), "모델 선택 불가");
    }

    #[tokio::test]
    async fn test_empty_reply_is_undetermined() {
        let mut provider = MockModelProvider::new();
        provider
            .expect_generate_content()
            .times(1)
            .returning(|_, _| Ok(GeneratedContent::default()));

        let detector = LanguageDetector::new(Arc::new(provider));
        let detection = detector.detect("???", &pro()).await;
        assert_eq!(detection, Detection::Undetermined);
        assert_eq!(detection.display_label(UiLocale::English), "Detection failed");
        assert_eq!(detection.prompt_label(), UNDETERMINED_SOURCE_LABEL);
    }

    #[tokio::test]
    async fn test_transport_error_is_failure_not_panic() {
        let mut provider = MockModelProvider::new();
        provider
            .expect_generate_content()
            .times(1)
            .returning(|_, _| Err(TranslyError::Provider("connection reset".to_string())));

        let detector = LanguageDetector::new(Arc::new(provider));
        match detector.detect("Hallo", &pro()).await {
            Detection::Failed(message) => assert!(message.contains("connection reset")),
            other => panic!("unexpected detection: {:?}", other),
        }
    }
}
