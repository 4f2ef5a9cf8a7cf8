//! transly - interactive translation client for Gemini models
//!
//! The core is a small state machine: a single [`session::Session`] mutated by
//! [`app::App::dispatch`], a debounced language detector and a translation
//! orchestrator that talk to the model provider through
//! [`provider::ModelProvider`].

pub mod app;
pub mod cli;
pub mod config;
pub mod debounce;
pub mod detect;
pub mod error;
pub mod language;
pub mod locale;
pub mod orchestrator;
pub mod provider;
pub mod registry;
pub mod session;
pub mod source;
