// Remote model provider
//
// Everything that talks to the language model goes through the ModelProvider
// trait, so detection, translation and model discovery can be exercised
// against a mock in tests.

pub mod gemini;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub use gemini::GeminiProvider;
use crate::config::GeminiConfig;
use crate::error::Result;

#[cfg(test)]
use mockall::automock;

/// Identifier of a remote model version, e.g. `models/gemini-2.5-pro`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelId(String);

impl ModelId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of the provider's model listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteModel {
    pub name: String,
}

/// Result of a generation call; `text` is absent when the model produced no content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedContent {
    pub text: Option<String>,
}

impl GeneratedContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()) }
    }
}

/// Main trait for remote model operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// List every model the credential can see
    async fn list_models(&self) -> Result<Vec<RemoteModel>>;

    /// Run a single prompt through the given model
    async fn generate_content(&self, model: &ModelId, prompt: &str) -> Result<GeneratedContent>;
}

/// Factory for creating provider instances
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create the Gemini provider for the given API key
    pub fn create_gemini(config: &GeminiConfig, api_key: &str) -> Result<Arc<dyn ModelProvider>> {
        Ok(Arc::new(GeminiProvider::new(config, api_key)?))
    }
}
