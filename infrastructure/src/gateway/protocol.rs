//! Gateway wire types
//!
//! The REST API uses camelCase JSON. Envelope interpretation lives here as
//! a pure function so it can be tested without a server: an execute
//! response folds to exactly one [`EnvelopeAction`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub triks: Option<TrikCounts>,
}

#[derive(Debug, Deserialize)]
pub struct TrikCounts {
    #[serde(default)]
    pub loaded: u32,
}

impl HealthResponse {
    pub fn triks_loaded(&self) -> u32 {
        self.triks.as_ref().map(|t| t.loaded).unwrap_or(0)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsResponse {
    #[serde(default)]
    pub tools: Vec<ManifestTool>,
    #[serde(default)]
    pub triks: Vec<TrikInfo>,
}

/// One tool as listed by the gateway manifest. Names come wire-form,
/// `trikId:actionName`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestTool {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub input_schema: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrikInfo {
    pub id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    pub tool: String,
    pub input: HashMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub response_mode: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub user_content_ref: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContentResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub content: Option<ContentPayload>,
}

#[derive(Debug, Deserialize)]
pub struct ContentPayload {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

/// What an execute response means for the agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeAction {
    /// Gateway reported failure; message goes to the model.
    Failure(String),
    /// Template mode: rendered text the model sees in full.
    Template(String),
    /// Passthrough mode with a content reference to resolve.
    Passthrough {
        content_ref: String,
        content_type: String,
    },
    /// Anything else, including passthrough without a reference.
    Plain(String),
}

/// Collapse an execute response into the single action it calls for.
pub fn fold_envelope(response: &ExecuteResponse) -> EnvelopeAction {
    if !response.success {
        let message = response
            .error
            .clone()
            .unwrap_or_else(|| "Unknown error".to_string());
        return EnvelopeAction::Failure(message);
    }

    match response.response_mode.as_deref() {
        Some("template") => EnvelopeAction::Template(
            response
                .response
                .clone()
                .unwrap_or_else(|| "Action completed.".to_string()),
        ),
        Some("passthrough") => match &response.user_content_ref {
            Some(content_ref) => EnvelopeAction::Passthrough {
                content_ref: content_ref.clone(),
                content_type: response
                    .content_type
                    .clone()
                    .unwrap_or_else(|| "content".to_string()),
            },
            None => EnvelopeAction::Plain("Content delivered to user.".to_string()),
        },
        _ => EnvelopeAction::Plain(
            response
                .response
                .clone()
                .unwrap_or_else(|| "Action completed.".to_string()),
        ),
    }
}
