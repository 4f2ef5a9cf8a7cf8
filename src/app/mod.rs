// Modular application layer: events, the dispatcher that owns the session,
// the terminal view and the line command parser

pub mod command;
pub mod event;
pub mod view;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::debounce::DebounceScheduler;
use crate::error::{Result, TranslyError};
use crate::language::{Language, SourceChoice};
use crate::locale::UiLocale;
use crate::orchestrator::{TranslationOrchestrator, TranslationOutcome};
use crate::provider::ModelProvider;
use crate::registry::ModelRegistry;
use crate::session::{ErrorInfo, ErrorKind, Session};
use crate::source::{self, PageSource};

pub use command::{parse_line, Command};
pub use event::{AppEvent, InputEdit};

/// Background activity shown next to the session view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Idle,
    LoadingFile(PathBuf),
    FetchingPage(String),
    Saved(PathBuf),
}

/// What the terminal should do after one line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Write to stdout
    Print(String),
    /// Write to stderr
    Warn(String),
    Silent,
    Quit,
}

/// Owns the session and turns events into state changes and spawned work.
///
/// All mutation happens in [`App::dispatch`] on the event loop's task;
/// remote calls and file I/O run in spawned tasks that report back through
/// the same channel.
pub struct App {
    session: Session,
    locale: UiLocale,
    registry: ModelRegistry,
    orchestrator: TranslationOrchestrator,
    pages: Arc<dyn PageSource>,
    debounce: DebounceScheduler<AppEvent>,
    tx: UnboundedSender<AppEvent>,
    web_max_chars: usize,
    status: Status,
}

impl App {
    pub fn new(
        config: &Config,
        registry: ModelRegistry,
        provider: Arc<dyn ModelProvider>,
        pages: Arc<dyn PageSource>,
        tx: UnboundedSender<AppEvent>,
    ) -> Result<Self> {
        let locale = UiLocale::from_code(&config.session.ui_locale)?;
        let target = Language::parse(&config.session.default_target)?;
        let session = Session::new(target, registry.default_choice());
        let delay = Duration::from_millis(config.session.detect_delay_ms);

        Ok(Self {
            session,
            locale,
            registry,
            orchestrator: TranslationOrchestrator::new(provider),
            pages,
            debounce: DebounceScheduler::new(tx.clone(), delay, AppEvent::timer_fired),
            tx,
            web_max_chars: config.web.max_chars,
            status: Status::Idle,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn locale(&self) -> UiLocale {
        self.locale
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Handles one read from the terminal. Only end of input or a broken
    /// stream ends the session; an undecodable line becomes a notice.
    pub fn handle_input(&mut self, read: io::Result<Option<String>>) -> Reaction {
        let line = match read {
            Ok(Some(line)) => line,
            Ok(None) => return Reaction::Quit,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!("Skipping unreadable input line: {}", e);
                self.session.set_error(ErrorInfo::with_detail(ErrorKind::UnreadableInput, e.to_string()));
                return Reaction::Print(view::render(self));
            }
            Err(e) => {
                warn!("Terminal input closed: {}", e);
                return Reaction::Quit;
            }
        };

        match parse_line(&line) {
            // typed text is already on screen
            Command::Dispatch(event @ AppEvent::TextChanged(InputEdit::Append(_))) => {
                self.dispatch(event);
                Reaction::Silent
            }
            Command::Dispatch(event) => {
                self.dispatch(event);
                Reaction::Print(view::render(self))
            }
            Command::ListModels => Reaction::Print(view::render_models(self)),
            Command::Show => Reaction::Print(view::render(self)),
            Command::Help => Reaction::Print(view::render_help(self.locale)),
            Command::Quit => Reaction::Quit,
            Command::Invalid(line) => {
                let strings = self.locale.strings();
                Reaction::Warn(format!("{}: {} ({})", strings.unknown_command, line, strings.help_hint))
            }
        }
    }

    pub fn dispatch(&mut self, event: AppEvent) {
        debug!("Dispatching {:?}", event);

        match event {
            AppEvent::TextChanged(edit) => {
                let text = edit.apply(&self.session.input_text);
                self.session.set_input(text);
                self.debounce.on_text_changed();
            }
            AppEvent::TimerFired { generation } => self.on_timer(generation),
            AppEvent::TranslateClicked => self.start_translation(),
            AppEvent::ModelSelected(index) => match self.registry.get(index) {
                Some(choice) => {
                    info!("Model selected: {}", choice.display_name(UiLocale::English));
                    self.session.selected_model = choice.clone();
                }
                None => warn!("No model at index {}", index),
            },
            AppEvent::SourceSelected(index) => match SourceChoice::from_index(index) {
                Some(source) => self.session.source = source,
                None => warn!("No source language at index {}", index),
            },
            AppEvent::TargetSelected(index) => match Language::from_index(index) {
                Some(target) => self.session.target = target,
                None => warn!("No target language at index {}", index),
            },
            AppEvent::LocaleChanged(locale) => {
                info!("UI locale changed to {}", locale.code());
                self.locale = locale;
            }
            AppEvent::LoadFile(path) => self.load_file(path),
            AppEvent::SaveOutput(path) => self.save_output(path),
            AppEvent::WebRequested(url) => self.fetch_page(url),

            AppEvent::DetectionFinished { revision, detection } => {
                if revision != self.session.input_revision() {
                    debug!("Discarding detection for input revision {}", revision);
                    return;
                }
                self.session.detected_language = Some(detection);
            }
            AppEvent::TranslationFinished(report) => {
                self.session.busy = false;
                let outcome = TranslationOrchestrator::apply(&mut self.session, report);
                if let TranslationOutcome::Translated(text) = outcome {
                    info!("Translation finished: {} chars", text.chars().count());
                }
            }
            AppEvent::FileLoaded(result) => {
                self.status = Status::Idle;
                match result {
                    Ok(text) => {
                        self.session.set_input(text);
                        self.session.clear_error();
                        self.debounce.on_text_changed();
                    }
                    Err(error) => self.session.set_error(error),
                }
            }
            AppEvent::OutputSaved(result) => match result {
                Ok(path) => {
                    self.session.clear_error();
                    self.status = Status::Saved(path);
                }
                Err(error) => {
                    self.status = Status::Idle;
                    self.session.set_error(error);
                }
            },
            AppEvent::PageFetched(result) => {
                self.status = Status::Idle;
                match result {
                    Ok(text) => {
                        let text = source::truncate_chars(&text, self.web_max_chars).to_string();
                        self.session.set_input(text);
                        self.debounce.on_text_changed();
                        self.start_translation();
                    }
                    Err(message) => {
                        self.session.set_error(ErrorInfo::with_detail(ErrorKind::PageFetchFailed, message));
                    }
                }
            }
        }
    }

    fn on_timer(&mut self, generation: u64) {
        if !self.debounce.is_current(generation) {
            debug!("Ignoring stale debounce generation {}", generation);
            return;
        }

        if !self.session.has_input() {
            self.session.detected_language = None;
            return;
        }

        let detector = self.orchestrator.detector().clone();
        let model = self.session.selected_model.clone();
        let text = self.session.trimmed_input().to_string();
        let revision = self.session.input_revision();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let detection = detector.detect(&text, &model).await;
            let _ = tx.send(AppEvent::DetectionFinished { revision, detection });
        });
    }

    fn start_translation(&mut self) {
        if self.session.busy {
            self.session.set_error(ErrorInfo::new(ErrorKind::Busy));
            return;
        }

        let job = match self.orchestrator.prepare(&self.session) {
            Ok(job) => job,
            Err(rejection) => {
                TranslationOrchestrator::record(&mut self.session, &rejection);
                return;
            }
        };

        self.session.busy = true;
        let orchestrator = self.orchestrator.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let report = orchestrator.run(job).await;
            let _ = tx.send(AppEvent::TranslationFinished(report));
        });
    }

    fn load_file(&mut self, path: PathBuf) {
        self.status = Status::LoadingFile(path.clone());
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = source::read_text(&path).await.map_err(|e| match e {
                TranslyError::UnsupportedFormat(_) => ErrorInfo::new(ErrorKind::UnsupportedFile),
                other => ErrorInfo::with_detail(ErrorKind::FileReadFailed, other.to_string()),
            });
            let _ = tx.send(AppEvent::FileLoaded(result));
        });
    }

    fn save_output(&mut self, path: PathBuf) {
        let text = self.session.output_text.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = match source::write_text(&path, &text).await {
                Ok(()) => Ok(path),
                Err(e) => Err(ErrorInfo::with_detail(ErrorKind::FileWriteFailed, e.to_string())),
            };
            let _ = tx.send(AppEvent::OutputSaved(result));
        });
    }

    fn fetch_page(&mut self, url: String) {
        let url = url.trim().to_string();
        if url.is_empty() {
            self.session.set_error(ErrorInfo::new(ErrorKind::EmptyUrl));
            return;
        }

        self.status = Status::FetchingPage(url.clone());
        let pages = self.pages.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let result = pages.fetch_text(&url).await.map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::PageFetched(result));
        });
    }
}
