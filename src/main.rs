//! transly - interactive Gemini translation client
//!
//! Entry point: parses the command line, loads the configuration, discovers
//! the supported models once and then runs either the interactive session or
//! a one-shot command.

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use transly::app::{view, App, Reaction};
use transly::cli::{Args, Commands};
use transly::config::Config;
use transly::detect::{Detection, LanguageDetector};
use transly::error::TranslyError;
use transly::language::{Language, SourceChoice};
use transly::locale::UiLocale;
use transly::orchestrator::{TranslationOrchestrator, TranslationOutcome};
use transly::provider::{ModelProvider, ProviderFactory};
use transly::registry::{ModelChoice, ModelRegistry};
use transly::session::{ErrorInfo, ErrorKind, Session};
use transly::source::{self, HttpPageSource, PageSource};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Keep the file writer flushing until exit
    let guard = setup_logging(args.verbose)?;
    info!("Starting transly {}", env!("CARGO_PKG_VERSION"));

    let startup_locale = args
        .locale
        .as_deref()
        .and_then(|code| UiLocale::from_code(code).ok())
        .unwrap_or_default();

    let mut config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return Ok(fatal(guard, startup_locale, &e)),
    };
    if let Some(locale) = &args.locale {
        config.session.ui_locale = locale.clone();
    }
    let locale = UiLocale::from_code(&config.session.ui_locale)?;
    if let Err(e) = config.validate() {
        return Ok(fatal(guard, locale, &e));
    }

    let provider = ProviderFactory::create_gemini(&config.gemini, config.api_key())?;
    let registry = ModelRegistry::discover(provider.as_ref()).await;

    match args.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => run_interactive(&config, registry, provider).await?,
        Commands::Models => print!("{}", view::model_list(&registry, locale)),
        Commands::Translate { text, file, source, target, model, output } => {
            let text = read_input(text, file.as_deref()).await?;
            let source = SourceChoice::parse(&source)?;
            let target = target_language(&config, target.as_deref())?;
            let model = select_model(&registry, model.as_deref())?;
            translate_once(locale, provider, text, source, target, model, output.as_deref()).await?;
        }
        Commands::Detect { text, file, model } => {
            let text = read_input(text, file.as_deref()).await?;
            let model = select_model(&registry, model.as_deref())?;
            detect_once(locale, provider, &text, &model).await?;
        }
        Commands::Web { url, target, model } => {
            let target = target_language(&config, target.as_deref())?;
            let model = select_model(&registry, model.as_deref())?;
            let pages = HttpPageSource::new(&config.web)?;

            let spinner = spinner(&url)?;
            let page = pages.fetch_text(&url).await;
            spinner.finish_and_clear();

            let page = page.map_err(|e| {
                anyhow::anyhow!(locale.strings().describe(&ErrorInfo::with_detail(ErrorKind::PageFetchFailed, e.to_string())))
            })?;
            let text = source::truncate_chars(&page, config.web.max_chars).to_string();
            translate_once(locale, provider, text, SourceChoice::Auto, target, model, None).await?;
        }
    }

    info!("transly finished");
    Ok(ExitCode::SUCCESS)
}

/// Explicit path, else `config.toml` in the current directory
fn load_config(path: Option<&Path>) -> transly::error::Result<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None => {
            let default_path = Path::new("config.toml");
            if default_path.exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file(default_path)
            } else {
                Err(TranslyError::Config("No config file found (config.toml)".to_string()))
            }
        }
    }
}

/// Reports a startup failure and flushes the log file before exiting with 1
fn fatal(guard: WorkerGuard, locale: UiLocale, error: &TranslyError) -> ExitCode {
    error!("Startup failed: {}", error);
    eprintln!("{}", locale.strings().fatal_api_key);
    eprintln!("{}", error);
    drop(guard);
    ExitCode::from(1)
}

/// Setup logging to stderr and a daily rolling file
fn setup_logging(verbose: bool) -> Result<WorkerGuard> {
    let log_dir = std::env::current_dir()?.join(".transly").join("log");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = rolling::daily(&log_dir, "transly.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };
    // the interactive view shares the terminal, so the console stays quiet unless verbose
    let console_level = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(console_level);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Logging initialized - level: {}, file: {}",
          log_level, log_dir.join("transly.log").display());

    Ok(guard)
}

fn spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .map_err(|e| anyhow::anyhow!("Invalid progress template: {}", e))?,
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Text argument, else file contents, else stdin
async fn read_input(text: Option<String>, file: Option<&Path>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return Ok(source::read_text(path).await?);
    }

    let mut buffer = String::new();
    tokio::io::stdin().read_to_string(&mut buffer).await?;
    Ok(buffer)
}

fn target_language(config: &Config, wanted: Option<&str>) -> transly::error::Result<Language> {
    Language::parse(wanted.unwrap_or(&config.session.default_target))
}

/// Named model from the registry, or the default entry (possibly the sentinel)
fn select_model(registry: &ModelRegistry, wanted: Option<&str>) -> transly::error::Result<ModelChoice> {
    match wanted {
        None => Ok(registry.default_choice()),
        Some(name) => registry.find(name).cloned().ok_or_else(|| {
            TranslyError::Config(format!(
                "Model '{}' is not a supported model. Run `transly models` to list them",
                name
            ))
        }),
    }
}

async fn translate_once(
    locale: UiLocale,
    provider: Arc<dyn ModelProvider>,
    text: String,
    source_choice: SourceChoice,
    target: Language,
    model: ModelChoice,
    output: Option<&Path>,
) -> Result<()> {
    let strings = locale.strings();
    let mut session = Session::new(target, model);
    session.source = source_choice;
    session.set_input(text);

    let orchestrator = TranslationOrchestrator::new(provider);
    let spinner = spinner(strings.translating)?;
    let outcome = orchestrator.translate(&mut session).await;
    spinner.finish_and_clear();

    if let Some(detection) = &session.detected_language {
        eprintln!("{} {}", strings.lbl_detected, detection.display_label(locale));
    }

    match outcome {
        TranslationOutcome::Translated(translation) => match output {
            Some(path) => {
                source::write_text(path, &translation).await?;
                eprintln!("{}: {}", strings.saved, path.display());
            }
            None => println!("{}", translation),
        },
        _ => {
            let error = session
                .last_error
                .unwrap_or_else(|| ErrorInfo::new(ErrorKind::TranslationFailed));
            anyhow::bail!(strings.describe(&error));
        }
    }

    Ok(())
}

async fn detect_once(
    locale: UiLocale,
    provider: Arc<dyn ModelProvider>,
    text: &str,
    model: &ModelChoice,
) -> Result<()> {
    let strings = locale.strings();
    let text = text.trim();
    if text.is_empty() {
        anyhow::bail!(strings.describe(&ErrorInfo::new(ErrorKind::EmptyInput)));
    }

    let detector = LanguageDetector::new(provider);
    let spinner = spinner(strings.lbl_detected)?;
    let detection = detector.detect(text, model).await;
    spinner.finish_and_clear();

    match &detection {
        Detection::Failed(message) => {
            anyhow::bail!("{}: {}", detection.display_label(locale), message)
        }
        Detection::ModelUnavailable => {
            anyhow::bail!(strings.describe(&ErrorInfo::new(ErrorKind::ModelUnavailable)))
        }
        _ => println!("{}", detection.display_label(locale)),
    }

    Ok(())
}

async fn run_interactive(
    config: &Config,
    registry: ModelRegistry,
    provider: Arc<dyn ModelProvider>,
) -> Result<()> {
    let pages: Arc<dyn PageSource> = Arc::new(HttpPageSource::new(&config.web)?);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(config, registry, provider, pages, tx)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print!("{}", view::render(&app));
    println!("{}", app.locale().strings().help_hint);

    loop {
        tokio::select! {
            read = lines.next_line() => match app.handle_input(read) {
                Reaction::Print(text) => print!("{}", text),
                Reaction::Warn(text) => eprintln!("{}", text),
                Reaction::Silent => {}
                Reaction::Quit => break,
            },
            Some(event) = rx.recv() => {
                app.dispatch(event);
                print!("{}", view::render(&app));
            }
        }
    }

    info!("Interactive session closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn test_fatal_flushes_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("transly.log");
        let (writer, guard) = non_blocking(File::create(&log_path).unwrap());
        let subscriber = tracing_subscriber::registry()
            .with(fmt::layer().with_writer(writer).with_ansi(false));

        tracing::subscriber::with_default(subscriber, || {
            fatal(guard, UiLocale::English, &TranslyError::Config("API key is missing".to_string()))
        });

        let log = std::fs::read_to_string(&log_path).unwrap();
        assert!(log.contains("Startup failed: Configuration error: API key is missing"), "{}", log);
    }
}
