//! Plain-text rendering of the session for the terminal front end.

use std::fmt::Write;

use crate::locale::UiLocale;
use crate::registry::ModelRegistry;
use crate::session::ErrorKind;
use super::{App, Status};

/// One selector line: every option with its index, the selected one starred
pub fn selector_line(label: &str, options: &[String], selected: usize) -> String {
    let mut line = String::from(label);
    for (index, option) in options.iter().enumerate() {
        let marker = if index == selected { "*" } else { " " };
        let _ = write!(line, "  {}[{}] {}", marker, index, option);
    }
    line
}

fn owned(options: Vec<&'static str>) -> Vec<String> {
    options.into_iter().map(str::to_string).collect()
}

/// Full session view, re-rendered after every handled event
pub fn render(app: &App) -> String {
    let locale = app.locale();
    let strings = locale.strings();
    let session = app.session();
    let mut out = String::new();

    let _ = writeln!(out, "== {} ==", strings.window_title);

    let models: Vec<String> = app
        .registry()
        .list_supported_models()
        .iter()
        .map(|choice| choice.display_name(locale))
        .collect();
    let selected_model = app
        .registry()
        .list_supported_models()
        .iter()
        .position(|choice| *choice == session.selected_model)
        .unwrap_or(0);
    let _ = writeln!(out, "{}", selector_line(strings.lbl_model, &models, selected_model));
    let _ = writeln!(
        out,
        "{}",
        selector_line(strings.lbl_source, &owned(locale.source_options()), session.source.index())
    );
    let _ = writeln!(
        out,
        "{}",
        selector_line(strings.lbl_target, &owned(locale.target_options()), session.target.index())
    );
    let _ = writeln!(out, "{} {}", strings.lbl_detected, detected_label(app));

    let _ = writeln!(out, "-- {} --", strings.input_label);
    let _ = writeln!(out, "{}", or_placeholder(&session.input_text, strings.input_placeholder));
    let _ = writeln!(out, "-- {} --", strings.output_label);
    let _ = writeln!(out, "{}", or_placeholder(&session.output_text, strings.output_placeholder));

    if session.busy {
        let _ = writeln!(out, "{}", strings.translating);
    }
    if let Status::Saved(path) = app.status() {
        let _ = writeln!(out, "{}: {}", strings.saved, path.display());
    }
    if let Some(error) = &session.last_error {
        let _ = writeln!(out, "{}", strings.describe(error));
        if error.kind == ErrorKind::EmptyUrl {
            let _ = writeln!(out, "  :web <{}>", strings.url_placeholder);
        }
    }

    out
}

/// Command list labelled in the current UI locale
pub fn render_help(locale: UiLocale) -> String {
    let strings = locale.strings();
    let web = format!("{} ({})", strings.web_btn, strings.url_placeholder);
    let entries: [(&str, &str); 14] = [
        (":translate, :t", strings.translate_btn),
        (":clear", strings.help_clear),
        (":source N|NAME", strings.help_source),
        (":target N|NAME", strings.help_target),
        (":model N", strings.help_model),
        (":models", strings.help_models),
        (":locale ko|en", strings.help_locale),
        (":load PATH", strings.load_btn),
        (":save PATH", strings.save_btn),
        (":web URL", &web),
        (":show", strings.help_show),
        (":help", strings.help_help),
        (":quit, :q", strings.help_quit),
        ("", strings.help_escape),
    ];

    let mut out = String::new();
    let _ = writeln!(out, "{}", strings.help_intro);
    for (command, description) in entries {
        if command.is_empty() {
            let _ = writeln!(out, "{}", description);
        } else {
            let _ = writeln!(out, "  {:<16} {}", command, description);
        }
    }
    out
}

/// Detection label; falls back to "Auto Detect" until a detection lands
pub fn detected_label(app: &App) -> String {
    match &app.session().detected_language {
        Some(detection) => detection.display_label(app.locale()),
        None => app.locale().strings().auto_detect.to_string(),
    }
}

fn or_placeholder<'a>(text: &'a str, placeholder: &'a str) -> &'a str {
    if text.is_empty() { placeholder } else { text }
}

/// Numbered model list for the `models` command and `:models`
pub fn render_models(app: &App) -> String {
    model_list(app.registry(), app.locale())
}

pub fn model_list(registry: &ModelRegistry, locale: UiLocale) -> String {
    let mut out = String::new();
    for (index, choice) in registry.list_supported_models().iter().enumerate() {
        let _ = writeln!(out, "[{}] {}", index, choice.display_name(locale));
    }
    out
}
