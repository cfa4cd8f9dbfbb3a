//! HTTP client for the trik gateway
//!
//! Owns the per-process gateway session: the first successful execute
//! returns a session id, and every later execute carries it. Passthrough
//! content is fetched eagerly and parked in the shared slot; the model
//! only ever sees the delivery acknowledgment.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;
use tracing::{debug, warn};

use trik_agent_domain::{ExecutionResult, PassthroughContent, PassthroughSlot};

use super::error::TrikError;
use super::protocol::{
    fold_envelope, ContentResponse, EnvelopeAction, ExecuteRequest, ExecuteResponse,
    HealthResponse, ToolsResponse,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct TrikClient {
    http: reqwest::Client,
    base_url: String,
    session_id: Mutex<Option<String>>,
    slot: Arc<PassthroughSlot>,
}

impl TrikClient {
    pub fn new(
        base_url: impl Into<String>,
        auth_token: Option<&str>,
        slot: Arc<PassthroughSlot>,
    ) -> Result<Self, TrikError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = auth_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| TrikError::Protocol(format!("invalid auth token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .map_err(|e| TrikError::Connectivity(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session_id: Mutex::new(None),
            slot,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthResponse, TrikError> {
        let response = self.http.get(self.url("health")).send().await?;
        if !response.status().is_success() {
            return Err(unreachable_status("health check", response.status()));
        }
        Ok(response.json().await?)
    }

    pub async fn list_tools(&self) -> Result<ToolsResponse, TrikError> {
        let response = self.http.get(self.url("tools")).send().await?;
        if !response.status().is_success() {
            return Err(unreachable_status("tool manifest", response.status()));
        }
        Ok(response.json().await?)
    }

    /// Raw execute call. Gateway-reported failures come back as a parsed
    /// response with `success: false`, not as `Err` — only transport and
    /// decode problems error out.
    ///
    /// `session_override` replaces the stored session id for this one call;
    /// the stored id is used otherwise, and is only updated from successful
    /// responses.
    pub async fn execute(
        &self,
        tool: &str,
        input: HashMap<String, Value>,
        session_override: Option<&str>,
    ) -> Result<ExecuteResponse, TrikError> {
        let stored = self
            .session_id
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        let request = ExecuteRequest {
            tool: tool.to_string(),
            input,
            session_id: session_for_request(session_override, stored),
        };

        debug!(tool, "executing gateway tool");
        let response = self.http.post(self.url("execute")).json(&request).send().await?;

        if response.status().as_u16() == 404 {
            return Err(TrikError::NotFound(format!("tool '{}'", tool)));
        }

        // Error statuses still carry a JSON body describing the failure.
        let status_ok = response.status().is_success();
        let parsed: ExecuteResponse = response.json().await?;

        if let Some(id) = session_to_store(status_ok, &parsed) {
            let mut guard = self.session_id.lock().unwrap_or_else(|e| e.into_inner());
            *guard = Some(id.to_string());
        }

        Ok(parsed)
    }

    pub async fn fetch_content(&self, content_ref: &str) -> Result<ContentResponse, TrikError> {
        let response = self
            .http
            .get(self.url(&format!("content/{}", content_ref)))
            .send()
            .await?;

        if response.status().as_u16() == 404 {
            return Err(TrikError::NotFound(format!("content '{}'", content_ref)));
        }
        if !response.status().is_success() {
            return Err(TrikError::Protocol(format!(
                "content fetch returned {}",
                response.status()
            )));
        }
        Ok(response.json().await?)
    }

    /// Execute a wire-named tool and fold the envelope into an
    /// [`ExecutionResult`]. Null arguments are dropped before sending;
    /// the gateway treats them as absent.
    pub async fn run_tool(
        &self,
        wire_name: &str,
        arguments: &HashMap<String, Value>,
    ) -> Result<ExecutionResult, TrikError> {
        let response = self
            .execute(wire_name, drop_null_args(arguments), None)
            .await?;

        match fold_envelope(&response) {
            EnvelopeAction::Failure(message) => Ok(ExecutionResult::Failure(message)),
            EnvelopeAction::Template(text) | EnvelopeAction::Plain(text) => {
                Ok(ExecutionResult::Success(text))
            }
            EnvelopeAction::Passthrough {
                content_ref,
                content_type,
            } => Ok(self.resolve_passthrough(&content_ref, &content_type).await),
        }
    }

    /// Fetch passthrough content into the slot. A failed fetch degrades to
    /// a bare acknowledgment rather than failing the tool call.
    async fn resolve_passthrough(&self, content_ref: &str, content_type: &str) -> ExecutionResult {
        match self.fetch_content(content_ref).await {
            Ok(response) => deliver_passthrough(&self.slot, response, content_type),
            Err(e) => {
                warn!(content_ref, error = %e, "passthrough content fetch failed");
                ExecutionResult::Success("Content delivered to user.".to_string())
            }
        }
    }
}

/// Park fetched passthrough content in the slot and produce the
/// acknowledgment the model sees. One write per delivery; the payload text
/// never appears in the returned acknowledgment.
fn deliver_passthrough(
    slot: &PassthroughSlot,
    response: ContentResponse,
    content_type: &str,
) -> ExecutionResult {
    let payload = match response.content {
        Some(payload) if response.success => payload,
        _ => return ExecutionResult::Success("Content delivered to user.".to_string()),
    };

    let mut content = PassthroughContent::new(payload.content);
    content.metadata = payload.metadata;
    if !content.metadata.contains_key("contentType") {
        content.metadata.insert(
            "contentType".to_string(),
            Value::String(content_type.to_string()),
        );
    }
    slot.put(content);
    ExecutionResult::Success(format!("[{} delivered to user]", content_type))
}

fn session_for_request(override_id: Option<&str>, stored: Option<String>) -> Option<String> {
    override_id.map(str::to_string).or(stored)
}

/// Session ids from error envelopes are not trusted.
fn session_to_store(status_ok: bool, response: &ExecuteResponse) -> Option<&str> {
    if status_ok {
        response.session_id.as_deref()
    } else {
        None
    }
}

fn unreachable_status(endpoint: &str, status: reqwest::StatusCode) -> TrikError {
    TrikError::Connectivity(format!("{} returned {}", endpoint, status))
}

/// The gateway treats null as absent; don't send it.
fn drop_null_args(arguments: &HashMap<String, Value>) -> HashMap<String, Value> {
    arguments
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::protocol::ContentPayload;
    use serde_json::json;

    fn client() -> TrikClient {
        TrikClient::new(
            "http://localhost:3002/",
            Some("token-123"),
            Arc::new(PassthroughSlot::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        assert_eq!(client().base_url(), "http://localhost:3002");
        assert_eq!(client().url("health"), "http://localhost:3002/api/v1/health");
    }

    #[test]
    fn test_execute_request_omits_absent_session() {
        let request = ExecuteRequest {
            tool: "article-search:search".to_string(),
            input: HashMap::from([("query".to_string(), json!("rust"))]),
            session_id: None,
        };
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("sessionId").is_none());
        assert_eq!(body["tool"], "article-search:search");
    }

    #[test]
    fn test_null_arguments_omitted_not_sent() {
        let args = HashMap::from([
            ("query".to_string(), json!("rust agents")),
            ("limit".to_string(), json!(null)),
        ]);
        let input = drop_null_args(&args);
        assert_eq!(input.len(), 1);
        assert!(input.contains_key("query"));
        assert!(!input.contains_key("limit"));
    }

    #[test]
    fn test_execute_request_carries_session() {
        let request = ExecuteRequest {
            tool: "article-search:search".to_string(),
            input: HashMap::new(),
            session_id: Some("sess-1".to_string()),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["sessionId"], "sess-1");
    }

    #[test]
    fn test_session_override_beats_stored() {
        assert_eq!(
            session_for_request(Some("one-off"), Some("stored".to_string())),
            Some("one-off".to_string())
        );
        assert_eq!(
            session_for_request(None, Some("stored".to_string())),
            Some("stored".to_string())
        );
        assert_eq!(session_for_request(None, None), None);
    }

    #[test]
    fn test_session_only_stored_from_successful_responses() {
        let envelope: ExecuteResponse =
            serde_json::from_str(r#"{"success": false, "sessionId": "sess-9"}"#).unwrap();
        assert_eq!(session_to_store(false, &envelope), None);
        assert_eq!(session_to_store(true, &envelope), Some("sess-9"));
    }

    #[test]
    fn test_startup_status_errors_are_connectivity() {
        let err = unreachable_status("health check", reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(err, TrikError::Connectivity(_)));
        assert!(err.to_string().contains("health check"));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_deliver_passthrough_writes_slot_once_and_hides_content() {
        let slot = PassthroughSlot::new();
        let response = ContentResponse {
            success: true,
            content: Some(ContentPayload {
                content: "# Quarterly Report\nfull body".to_string(),
                metadata: HashMap::from([("title".to_string(), json!("Q3"))]),
            }),
        };

        let result = deliver_passthrough(&slot, response, "markdown");
        let ack = result.into_turn_text();
        assert_eq!(ack, "[markdown delivered to user]");
        assert!(!ack.contains("Quarterly Report"));

        let content = slot.take().unwrap();
        assert_eq!(content.content, "# Quarterly Report\nfull body");
        assert_eq!(content.metadata.get("title"), Some(&json!("Q3")));
        // contentType merged in when the payload metadata lacks it.
        assert_eq!(content.content_type(), "markdown");
        // Exactly one write: the slot is empty again.
        assert!(slot.take().is_none());
    }

    #[test]
    fn test_deliver_passthrough_keeps_payload_content_type() {
        let slot = PassthroughSlot::new();
        let response = ContentResponse {
            success: true,
            content: Some(ContentPayload {
                content: "body".to_string(),
                metadata: HashMap::from([("contentType".to_string(), json!("html"))]),
            }),
        };

        deliver_passthrough(&slot, response, "markdown");
        assert_eq!(slot.take().unwrap().content_type(), "html");
    }

    #[test]
    fn test_deliver_passthrough_degrades_without_payload() {
        let slot = PassthroughSlot::new();
        let unsuccessful = ContentResponse {
            success: false,
            content: None,
        };
        let result = deliver_passthrough(&slot, unsuccessful, "markdown");
        assert_eq!(result.into_turn_text(), "Content delivered to user.");
        assert!(slot.take().is_none());
    }
}
