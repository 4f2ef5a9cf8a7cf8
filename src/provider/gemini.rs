use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{GeneratedContent, ModelId, ModelProvider, RemoteModel};
use crate::config::GeminiConfig;
use crate::error::{Result, TranslyError};

const API_VERSION: &str = "v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";
const LIST_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListModelsResponse {
    #[serde(default)]
    pub models: Vec<ModelEntry>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelEntry {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(prompt.to_string()) }],
            }],
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, like the official SDKs' `text`
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let texts: Vec<&str> = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

/// Gemini REST API client
pub struct GeminiProvider {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(config: &GeminiConfig, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Resource path for a model; listing returns `models/...` names but bare ids are accepted too
    fn model_path(model: &ModelId) -> String {
        let name = model.as_str();
        if name.starts_with("models/") || name.starts_with("tunedModels/") {
            name.to_string()
        } else {
            format!("models/{}", name)
        }
    }

    async fn api_error(response: reqwest::Response) -> TranslyError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        TranslyError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        }
    }
}

/// Pull the human-readable message out of a Gemini error body
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(status) if !status.is_empty() => format!("{} ({})", envelope.error.message, status),
            _ => envelope.error.message,
        },
        Err(_) => body.trim().to_string(),
    }
}

#[async_trait]
impl ModelProvider for GeminiProvider {
    async fn list_models(&self) -> Result<Vec<RemoteModel>> {
        let url = format!("{}/{}/models", self.endpoint, API_VERSION);
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![("pageSize", LIST_PAGE_SIZE.to_string())];
            if let Some(token) = &page_token {
                query.push(("pageToken", token.clone()));
            }

            debug!("Listing models: {} (page token: {:?})", url, page_token);

            let response = self.client
                .get(&url)
                .header(API_KEY_HEADER, &self.api_key)
                .query(&query)
                .send()
                .await
                .map_err(|e| TranslyError::Provider(format!("Model listing request failed: {}", e)))?;

            if !response.status().is_success() {
                return Err(Self::api_error(response).await);
            }

            let page: ListModelsResponse = response.json().await
                .map_err(|e| TranslyError::Provider(format!("Failed to parse model listing: {}", e)))?;

            models.extend(page.models.into_iter().map(|entry| RemoteModel { name: entry.name }));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        info!("Gemini reported {} models", models.len());
        Ok(models)
    }

    async fn generate_content(&self, model: &ModelId, prompt: &str) -> Result<GeneratedContent> {
        let url = format!(
            "{}/{}/{}:generateContent",
            self.endpoint,
            API_VERSION,
            Self::model_path(model)
        );

        debug!("Sending generation request to: {}", url);

        let response = self.client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| TranslyError::Provider(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let body: GenerateContentResponse = response.json().await
            .map_err(|e| TranslyError::Provider(format!("Failed to parse response: {}", e)))?;

        let text = body.text();
        debug!("Gemini response: {:?}", text);

        Ok(GeneratedContent { text })
    }
}
