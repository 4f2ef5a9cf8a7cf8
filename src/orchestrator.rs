//! Translation orchestration.
//!
//! A translation runs in three steps so the event loop can keep the network
//! part off its own task:
//! - [`TranslationOrchestrator::prepare`] validates the session and builds a
//!   [`TranslationJob`] without any I/O,
//! - [`TranslationOrchestrator::run`] performs detection (for Auto source)
//!   followed by the translation call,
//! - [`TranslationOrchestrator::apply`] writes the report back into the session.
//!
//! [`TranslationOrchestrator::translate`] chains all three for callers that
//! can simply await.

use std::sync::Arc;
use tracing::{info, warn};

use crate::detect::{Detection, LanguageDetector};
use crate::language::{Language, SourceChoice};
use crate::provider::{ModelId, ModelProvider};
use crate::registry::ModelChoice;
use crate::session::{ErrorInfo, ErrorKind, Session};

/// Tagged result of a translate action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    Translated(String),
    NothingToTranslate,
    ModelUnavailable,
    Failed(String),
}

/// Everything needed to run one translation, detached from the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationJob {
    pub text: String,
    pub source: SourceChoice,
    pub target: Language,
    pub model: ModelId,
}

/// Result of [`TranslationOrchestrator::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationReport {
    /// Present when the source was Auto and detection ran
    pub detection: Option<Detection>,
    pub outcome: TranslationOutcome,
}

pub fn translation_prompt(source: &str, target: Language, model: &ModelId, text: &str) -> String {
    format!(
        "Translate the following text from {} to {} using the {} model.\nText:\n{}",
        source,
        target.prompt_name(),
        model,
        text
    )
}

#[derive(Clone)]
pub struct TranslationOrchestrator {
    provider: Arc<dyn ModelProvider>,
    detector: LanguageDetector,
}

impl TranslationOrchestrator {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        let detector = LanguageDetector::new(provider.clone());
        Self { provider, detector }
    }

    pub fn detector(&self) -> &LanguageDetector {
        &self.detector
    }

    /// Validate the session; rejections are final outcomes that need no network
    pub fn prepare(&self, session: &Session) -> Result<TranslationJob, TranslationOutcome> {
        if !session.has_input() {
            return Err(TranslationOutcome::NothingToTranslate);
        }

        let model = session
            .selected_model
            .model()
            .cloned()
            .ok_or(TranslationOutcome::ModelUnavailable)?;

        Ok(TranslationJob {
            text: session.trimmed_input().to_string(),
            source: session.source,
            target: session.target,
            model,
        })
    }

    /// Detect (when needed) and translate. Never retries.
    pub async fn run(&self, job: TranslationJob) -> TranslationReport {
        let (source_label, detection) = match job.source {
            SourceChoice::Fixed(language) => (language.prompt_name().to_string(), None),
            SourceChoice::Auto => {
                let model = ModelChoice::Available(job.model.clone());
                let detection = self.detector.detect(&job.text, &model).await;
                (detection.prompt_label().to_string(), Some(detection))
            }
        };

        info!(
            "Translating {} chars from {} to {} with {}",
            job.text.chars().count(),
            source_label,
            job.target,
            job.model
        );

        let prompt = translation_prompt(&source_label, job.target, &job.model, &job.text);
        let outcome = match self.provider.generate_content(&job.model, &prompt).await {
            Ok(content) => TranslationOutcome::Translated(content.text.unwrap_or_default()),
            Err(e) => {
                warn!("Translation failed: {}", e);
                TranslationOutcome::Failed(e.to_string())
            }
        };

        TranslationReport { detection, outcome }
    }

    /// Write a finished report into the session and return its outcome
    pub fn apply(session: &mut Session, report: TranslationReport) -> TranslationOutcome {
        if let Some(detection) = report.detection {
            session.detected_language = Some(detection);
        }
        Self::record(session, &report.outcome);
        report.outcome
    }

    /// Reflect an outcome in the session's output and error state
    pub fn record(session: &mut Session, outcome: &TranslationOutcome) {
        match outcome {
            TranslationOutcome::Translated(text) => {
                session.output_text = text.clone();
                session.clear_error();
            }
            TranslationOutcome::NothingToTranslate => {
                session.set_error(ErrorInfo::new(ErrorKind::EmptyInput));
            }
            TranslationOutcome::ModelUnavailable => {
                session.set_error(ErrorInfo::new(ErrorKind::ModelUnavailable));
            }
            TranslationOutcome::Failed(message) => {
                session.set_error(ErrorInfo::with_detail(ErrorKind::TranslationFailed, message.clone()));
            }
        }
    }

    /// Full translate action against the session
    pub async fn translate(&self, session: &mut Session) -> TranslationOutcome {
        match self.prepare(session) {
            Ok(job) => {
                let report = self.run(job).await;
                Self::apply(session, report)
            }
            Err(rejection) => {
                Self::record(session, &rejection);
                rejection
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::UNDETERMINED_SOURCE_LABEL;
    use crate::error::TranslyError;
    use crate::provider::{GeneratedContent, MockModelProvider};
    use crate::registry::Unavailable;
    use mockall::Sequence;

    fn session_with(text: &str, source: SourceChoice, target: Language) -> Session {
        let mut session = Session::new(target, ModelChoice::Available(ModelId::new("gemini-2.5-pro")));
        session.source = source;
        session.set_input(text);
        session
    }

    fn is_detection(prompt: &str) -> bool {
        prompt.starts_with("Detect the language")
    }

    #[tokio::test]
    async fn test_hello_world_scenario() {
        let mut provider = MockModelProvider::new();
        let mut seq = Sequence::new();
        provider
            .expect_generate_content()
            .withf(|_, prompt| is_detection(prompt) && prompt.ends_with("\nHello world"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(GeneratedContent::text("English")));
        provider
            .expect_generate_content()
            .withf(|model, prompt| {
                model.as_str() == "gemini-2.5-pro"
                    && prompt == "Translate the following text from English to Korean using the gemini-2.5-pro model.\nText:\nHello world"
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(GeneratedContent::text("안녕 세상")));

        let orchestrator = TranslationOrchestrator::new(Arc::new(provider));
        let mut session = session_with("Hello world", SourceChoice::Auto, Language::Korean);

        let outcome = orchestrator.translate(&mut session).await;

        assert_eq!(outcome, TranslationOutcome::Translated("안녕 세상".to_string()));
        assert_eq!(session.detected_language(), Some("English"));
        assert_eq!(session.output_text, "안녕 세상");
        assert!(session.last_error.is_none());
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_call() {
        let mut provider = MockModelProvider::new();
        provider.expect_generate_content().never();
        provider.expect_list_models().never();

        let orchestrator = TranslationOrchestrator::new(Arc::new(provider));
        for text in ["", "   ", "\n\t "] {
            let mut session = session_with(text, SourceChoice::Auto, Language::Korean);
            session.output_text = "previous".to_string();

            let outcome = orchestrator.translate(&mut session).await;

            assert_eq!(outcome, TranslationOutcome::NothingToTranslate);
            assert_eq!(session.output_text, "previous");
            assert_eq!(session.last_error, Some(ErrorInfo::new(ErrorKind::EmptyInput)));
        }
    }

    #[tokio::test]
    async fn test_sentinel_model_makes_no_call() {
        let mut provider = MockModelProvider::new();
        provider.expect_generate_content().never();

        let orchestrator = TranslationOrchestrator::new(Arc::new(provider));
        let mut session = session_with("Hello", SourceChoice::Auto, Language::Korean);
        session.selected_model = ModelChoice::Unavailable(Unavailable::NoSupportedModel);

        let outcome = orchestrator.translate(&mut session).await;

        assert_eq!(outcome, TranslationOutcome::ModelUnavailable);
        assert_eq!(session.last_error, Some(ErrorInfo::new(ErrorKind::ModelUnavailable)));
        assert!(session.output_text.is_empty());
    }

    #[tokio::test]
    async fn test_fixed_source_skips_detection() {
        let mut provider = MockModelProvider::new();
        provider
            .expect_generate_content()
            .withf(|_, prompt| is_detection(prompt))
            .never();
        provider
            .expect_generate_content()
            .withf(|_, prompt| prompt.starts_with("Translate the following text from Japanese to German"))
            .times(1)
            .returning(|_, _| Ok(GeneratedContent::text("Guten Morgen")));

        let orchestrator = TranslationOrchestrator::new(Arc::new(provider));
        let mut session = session_with("おはよう", SourceChoice::Fixed(Language::Japanese), Language::German);

        let outcome = orchestrator.translate(&mut session).await;
        assert_eq!(outcome, TranslationOutcome::Translated("Guten Morgen".to_string()));
        assert!(session.detected_language.is_none());
    }

    #[tokio::test]
    async fn test_failed_detection_still_translates() {
        let mut provider = MockModelProvider::new();
        let mut seq = Sequence::new();
        provider
            .expect_generate_content()
            .withf(|_, prompt| is_detection(prompt))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(TranslyError::Provider("timeout".to_string())));
        provider
            .expect_generate_content()
            .withf(|_, prompt| prompt.contains(UNDETERMINED_SOURCE_LABEL))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(GeneratedContent::text("Hello")));

        let orchestrator = TranslationOrchestrator::new(Arc::new(provider));
        let mut session = session_with("Hallo", SourceChoice::Auto, Language::English);

        let outcome = orchestrator.translate(&mut session).await;
        assert_eq!(outcome, TranslationOutcome::Translated("Hello".to_string()));
        assert_eq!(session.detected_language, Some(Detection::Failed("Model provider error: timeout".to_string())));
    }

    #[tokio::test]
    async fn test_remote_error_keeps_output() {
        let mut provider = MockModelProvider::new();
        provider
            .expect_generate_content()
            .times(1)
            .returning(|_, _| Err(TranslyError::Api { status: 429, message: "quota exceeded".to_string() }));

        let orchestrator = TranslationOrchestrator::new(Arc::new(provider));
        let mut session = session_with("Bonjour", SourceChoice::Fixed(Language::French), Language::English);
        session.output_text = "earlier result".to_string();

        let outcome = orchestrator.translate(&mut session).await;

        match outcome {
            TranslationOutcome::Failed(message) => assert!(message.contains("quota exceeded")),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(session.output_text, "earlier result");
        let error = session.last_error.expect("error recorded");
        assert_eq!(error.kind, ErrorKind::TranslationFailed);
        assert!(error.detail.unwrap_or_default().contains("429"));
    }

    #[tokio::test]
    async fn test_missing_text_is_empty_output() {
        let mut provider = MockModelProvider::new();
        provider
            .expect_generate_content()
            .times(1)
            .returning(|_, _| Ok(GeneratedContent::default()));

        let orchestrator = TranslationOrchestrator::new(Arc::new(provider));
        let mut session = session_with("Hola", SourceChoice::Fixed(Language::English), Language::Korean);
        session.output_text = "stale".to_string();

        let outcome = orchestrator.translate(&mut session).await;
        assert_eq!(outcome, TranslationOutcome::Translated(String::new()));
        assert_eq!(session.output_text, "");
        assert!(session.last_error.is_none());
    }

    #[tokio::test]
    async fn test_auto_source_redetects_every_time() {
        let mut provider = MockModelProvider::new();
        provider
            .expect_generate_content()
            .withf(|_, prompt| is_detection(prompt))
            .times(2)
            .returning(|_, _| Ok(GeneratedContent::text("Korean")));
        provider
            .expect_generate_content()
            .withf(|_, prompt| prompt.contains("from Korean to English"))
            .times(2)
            .returning(|_, _| Ok(GeneratedContent::text("Hi")));

        let orchestrator = TranslationOrchestrator::new(Arc::new(provider));
        let mut session = session_with("안녕", SourceChoice::Auto, Language::English);

        orchestrator.translate(&mut session).await;
        orchestrator.translate(&mut session).await;
        assert_eq!(session.output_text, "Hi");
    }

    #[test]
    fn test_prepare_uses_trimmed_text() {
        let orchestrator = TranslationOrchestrator::new(Arc::new(MockModelProvider::new()));
        let session = session_with("  padded text \n", SourceChoice::Auto, Language::French);
        let job = orchestrator.prepare(&session).unwrap();
        assert_eq!(job.text, "padded text");
        assert_eq!(job.target, Language::French);
        assert_eq!(job.model, ModelId::new("gemini-2.5-pro"));
    }
}
