//! Model discovery.
//!
//! The registry lists the provider's models once at startup and keeps the ones
//! whose name carries a supported version marker. When nothing usable is found
//! it holds a single sentinel entry instead, which every caller must refuse to
//! send to the provider.

use tracing::{info, warn};

use crate::locale::UiLocale;
use crate::provider::{ModelId, ModelProvider};

/// Version markers a model name must contain (plain substring match)
pub const SUPPORTED_VERSION_MARKERS: [&str; 3] = ["2.0", "2.5", "3.0"];

/// Why no model can be used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailable {
    /// The listing succeeded but no name matched a supported version
    NoSupportedModel,
    /// The listing call itself failed, usually a bad API key
    ListingFailed,
}

/// A selector entry: a usable model or the sentinel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelChoice {
    Available(ModelId),
    Unavailable(Unavailable),
}

impl ModelChoice {
    pub fn model(&self) -> Option<&ModelId> {
        match self {
            ModelChoice::Available(model) => Some(model),
            ModelChoice::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.model().is_some()
    }

    pub fn display_name(&self, locale: UiLocale) -> String {
        match self {
            ModelChoice::Available(model) => model.to_string(),
            ModelChoice::Unavailable(Unavailable::NoSupportedModel) => {
                locale.strings().no_supported_model.to_string()
            }
            ModelChoice::Unavailable(Unavailable::ListingFailed) => {
                locale.strings().check_api_key.to_string()
            }
        }
    }
}

impl Default for ModelChoice {
    fn default() -> Self {
        ModelChoice::Unavailable(Unavailable::NoSupportedModel)
    }
}

pub fn is_supported_model(name: &str) -> bool {
    SUPPORTED_VERSION_MARKERS.iter().any(|marker| name.contains(marker))
}

#[derive(Debug, Clone)]
pub struct ModelRegistry {
    choices: Vec<ModelChoice>,
}

impl ModelRegistry {
    /// Query the provider once and build the selector entries
    pub async fn discover(provider: &dyn ModelProvider) -> Self {
        match provider.list_models().await {
            Ok(models) => {
                let total = models.len();
                let supported: Vec<String> = models
                    .into_iter()
                    .map(|model| model.name)
                    .filter(|name| is_supported_model(name))
                    .collect();
                info!("{} of {} listed models are supported", supported.len(), total);
                Self::from_names(supported)
            }
            Err(e) => {
                warn!("Failed to list models: {}", e);
                Self::unavailable(Unavailable::ListingFailed)
            }
        }
    }

    /// Build from already filtered names; an empty list yields the sentinel
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let choices: Vec<ModelChoice> = names
            .into_iter()
            .map(|name| ModelChoice::Available(ModelId::new(name)))
            .collect();
        if choices.is_empty() {
            Self::unavailable(Unavailable::NoSupportedModel)
        } else {
            Self { choices }
        }
    }

    pub fn unavailable(reason: Unavailable) -> Self {
        Self { choices: vec![ModelChoice::Unavailable(reason)] }
    }

    /// Ordered selector entries; never empty
    pub fn list_supported_models(&self) -> &[ModelChoice] {
        &self.choices
    }

    pub fn get(&self, index: usize) -> Option<&ModelChoice> {
        self.choices.get(index)
    }

    /// First entry, selected at startup
    pub fn default_choice(&self) -> ModelChoice {
        self.choices.first().cloned().unwrap_or_default()
    }

    /// Find an entry by exact id, or by id without the `models/` prefix
    pub fn find(&self, wanted: &str) -> Option<&ModelChoice> {
        self.choices.iter().find(|choice| match choice.model() {
            Some(model) => {
                let name = model.as_str();
                name == wanted || name.strip_prefix("models/") == Some(wanted)
            }
            None => false,
        })
    }

    pub fn has_usable_model(&self) -> bool {
        self.choices.iter().any(ModelChoice::is_available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslyError;
    use crate::provider::{MockModelProvider, RemoteModel};

    fn remote(names: &[&str]) -> Vec<RemoteModel> {
        names.iter().map(|name| RemoteModel { name: name.to_string() }).collect()
    }

    #[test]
    fn test_version_marker_is_substring_match() {
        assert!(is_supported_model("models/gemini-2.5-pro"));
        assert!(is_supported_model("models/gemini-2.0-flash-lite"));
        assert!(is_supported_model("models/gemini-3.0-ultra"));
        assert!(!is_supported_model("models/gemini-1.5-pro"));
        assert!(!is_supported_model("models/gemini-pro"));
        // no semantic comparison: 2.05 still contains "2.0"
        assert!(is_supported_model("models/custom-12.05"));
    }

    #[tokio::test]
    async fn test_discover_filters_and_keeps_order() {
        let mut provider = MockModelProvider::new();
        provider
            .expect_list_models()
            .times(1)
            .returning(|| Ok(remote(&[
                "models/gemini-1.5-flash",
                "models/gemini-2.5-pro",
                "models/embedding-001",
                "models/gemini-2.0-flash",
            ])));

        let registry = ModelRegistry::discover(&provider).await;
        let names: Vec<String> = registry
            .list_supported_models()
            .iter()
            .filter_map(|choice| choice.model().map(|m| m.to_string()))
            .collect();
        assert_eq!(names, vec!["models/gemini-2.5-pro", "models/gemini-2.0-flash"]);
        assert_eq!(
            registry.default_choice(),
            ModelChoice::Available(ModelId::new("models/gemini-2.5-pro"))
        );
        assert!(registry.find("gemini-2.0-flash").is_some());
    }

    #[tokio::test]
    async fn test_discover_without_matches_yields_sentinel() {
        let mut provider = MockModelProvider::new();
        provider
            .expect_list_models()
            .returning(|| Ok(remote(&["models/gemini-1.5-pro"])));

        let registry = ModelRegistry::discover(&provider).await;
        assert_eq!(
            registry.list_supported_models(),
            &[ModelChoice::Unavailable(Unavailable::NoSupportedModel)]
        );
        assert!(!registry.has_usable_model());
    }

    #[tokio::test]
    async fn test_listing_failure_yields_sentinel() {
        let mut provider = MockModelProvider::new();
        provider.expect_list_models().returning(|| {
            Err(TranslyError::Api { status: 403, message: "API key not valid".to_string() })
        });

        let registry = ModelRegistry::discover(&provider).await;
        assert_eq!(
            registry.default_choice(),
            ModelChoice::Unavailable(Unavailable::ListingFailed)
        );
        assert_eq!(
            registry.default_choice().display_name(UiLocale::Korean),
            "⚠️ API 키를 확인하세요"
        );
    }
}
