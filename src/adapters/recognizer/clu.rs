//! CLU Recognizer - Implementation of Recognizer for Azure Conversational
//! Language Understanding.
//!
//! # Configuration
//!
//! ```ignore
//! let config = CluConfig::new("HotelBot", "production", "myres.cognitiveservices.azure.com", key)
//!     .with_language("en")
//!     .with_timeout(Duration::from_secs(5));
//!
//! let recognizer = CluRecognizer::new(config)?;
//! ```
//!
//! The service is only considered configured when project, deployment, host
//! and key are all non-empty.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::booking::{EntityCategory, Intent, Recognition};
use crate::ports::{Recognizer, RecognizerError};

const API_VERSION: &str = "2023-04-01";

/// Configuration for the CLU recognizer.
#[derive(Debug, Clone)]
pub struct CluConfig {
    pub project_name: String,
    pub deployment_name: String,
    /// Resource host name, with or without scheme.
    pub host: String,
    api_key: Secret<String>,
    pub language: String,
    pub timeout: Duration,
}

impl CluConfig {
    /// Creates a new configuration.
    pub fn new(
        project_name: impl Into<String>,
        deployment_name: impl Into<String>,
        host: impl Into<String>,
        api_key: Secret<String>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            deployment_name: deployment_name.into(),
            host: host.into(),
            api_key,
            language: "en".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the utterance language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// True when every connection setting is present.
    pub fn is_complete(&self) -> bool {
        !self.project_name.trim().is_empty()
            && !self.deployment_name.trim().is_empty()
            && !self.host.trim().is_empty()
            && !self.api_key.expose_secret().trim().is_empty()
    }

    fn analyze_url(&self) -> String {
        let host = self.host.trim().trim_end_matches('/');
        let base = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        };
        format!(
            "{}/language/:analyze-conversations?api-version={}",
            base, API_VERSION
        )
    }
}

/// Azure CLU recognizer.
pub struct CluRecognizer {
    config: CluConfig,
    client: Client,
}

impl CluRecognizer {
    /// Creates a new recognizer with the given configuration.
    pub fn new(config: CluConfig) -> Result<Self, RecognizerError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RecognizerError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn to_request<'a>(&'a self, utterance: &'a str) -> AnalyzeRequest<'a> {
        AnalyzeRequest {
            kind: "Conversation",
            analysis_input: AnalysisInput {
                conversation_item: ConversationItem {
                    id: "1",
                    participant_id: "1",
                    text: utterance,
                    language: &self.config.language,
                },
            },
            parameters: AnalyzeParameters {
                project_name: &self.config.project_name,
                deployment_name: &self.config.deployment_name,
                string_index_type: "Utf16CodeUnit",
                verbose: true,
            },
        }
    }

    async fn send_request(&self, utterance: &str) -> Result<Response, RecognizerError> {
        self.client
            .post(self.config.analyze_url())
            .header("Ocp-Apim-Subscription-Key", self.config.api_key.expose_secret())
            .header("Content-Type", "application/json")
            .json(&self.to_request(utterance))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RecognizerError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    RecognizerError::network(format!("Connection failed: {}", e))
                } else {
                    RecognizerError::network(e.to_string())
                }
            })
    }

    async fn handle_response_status(
        &self,
        response: Response,
    ) -> Result<Response, RecognizerError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(RecognizerError::AuthenticationFailed),
            code => Err(RecognizerError::Service {
                status: code,
                message: error_body,
            }),
        }
    }
}

#[async_trait]
impl Recognizer for CluRecognizer {
    fn is_configured(&self) -> bool {
        self.config.is_complete()
    }

    async fn recognize(&self, utterance: &str) -> Result<Recognition, RecognizerError> {
        if !self.is_configured() {
            return Err(RecognizerError::NotConfigured);
        }

        let response = self.send_request(utterance).await?;
        let response = self.handle_response_status(response).await?;
        let body = response
            .text()
            .await
            .map_err(|e| RecognizerError::network(format!("Failed to read response: {}", e)))?;

        parse_analyze_response(utterance, &body)
    }

    fn name(&self) -> &'static str {
        "clu"
    }
}

/// Converts a raw analyze-conversations response body into a recognition.
///
/// Unknown intent and entity categories are dropped.
pub fn parse_analyze_response(utterance: &str, body: &str) -> Result<Recognition, RecognizerError> {
    let response: AnalyzeResponse = serde_json::from_str(body)
        .map_err(|e| RecognizerError::parse(format!("Failed to parse response: {}", e)))?;

    let mut recognition = Recognition::empty(utterance);
    for intent in response.result.prediction.intents {
        if let Some(known) = Intent::from_category(&intent.category) {
            recognition = recognition.with_intent(known, intent.confidence_score);
        }
    }
    for entity in response.result.prediction.entities {
        if let Some(category) = EntityCategory::from_category(&entity.category) {
            recognition = recognition.with_entity(category, entity.text);
        }
    }
    Ok(recognition)
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest<'a> {
    kind: &'static str,
    analysis_input: AnalysisInput<'a>,
    parameters: AnalyzeParameters<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisInput<'a> {
    conversation_item: ConversationItem<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConversationItem<'a> {
    id: &'static str,
    participant_id: &'static str,
    text: &'a str,
    language: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeParameters<'a> {
    project_name: &'a str,
    deployment_name: &'a str,
    string_index_type: &'static str,
    verbose: bool,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    result: AnalyzeResult,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResult {
    prediction: Prediction,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    #[serde(default)]
    intents: Vec<PredictedIntent>,
    #[serde(default)]
    entities: Vec<PredictedEntity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PredictedIntent {
    category: String,
    confidence_score: f64,
}

#[derive(Debug, Deserialize)]
struct PredictedEntity {
    category: String,
    text: String,
}
