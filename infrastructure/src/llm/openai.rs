//! OpenAI-compatible Chat Completions adapter
//!
//! Serves both application ports: [`DecisionGateway`] sends the whole
//! conversation with function declarations, [`StructuredJudge`] asks for
//! a typed verdict through `response_format: json_schema`. Works against
//! any endpoint that speaks POST /v1/chat/completions.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use trik_agent_application::{Decision, DecisionError, DecisionGateway, StructuredJudge};
use trik_agent_domain::{
    Conversation, GatePromptTemplate, ToolCall, ToolDescriptor, Turn, Verdict,
};

use crate::tools::schema::descriptor_to_function;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub struct OpenAiAdapter {
    http: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
    model: String,
    gate_prompt: GatePromptTemplate,
}

impl OpenAiAdapter {
    pub fn new(
        api_base: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Result<Self, DecisionError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DecisionError::Connection(e.to_string()))?;

        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key,
            model: model.into(),
            gate_prompt: GatePromptTemplate::default(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send(&self, body: &ChatRequest) -> Result<ChatResponse, DecisionError> {
        let url = format!("{}/v1/chat/completions", self.api_base);
        debug!(model = %self.model, url, "sending chat completion request");

        let mut request = self.http.post(&url).json(body);
        if let Some(key) = &self.api_key {
            if !key.is_empty() {
                request = request.header("Authorization", format!("Bearer {}", key));
            }
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                DecisionError::Timeout(REQUEST_TIMEOUT.as_secs())
            } else {
                DecisionError::Connection(e.to_string())
            }
        })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(DecisionError::RequestFailed {
                status: status.as_u16(),
                message: text,
            });
        }

        serde_json::from_str(&text)
            .map_err(|e| DecisionError::InvalidResponse(format!("{}. Raw: {}", e, text)))
    }

    fn first_message(response: ChatResponse) -> Result<ResponseMessage, DecisionError> {
        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or_else(|| DecisionError::InvalidResponse("no choices in response".to_string()))
    }
}

#[async_trait]
impl DecisionGateway for OpenAiAdapter {
    async fn decide(
        &self,
        conversation: &Conversation,
        tools: &[ToolDescriptor],
    ) -> Result<Decision, DecisionError> {
        let declarations: Vec<Value> = tools.iter().map(descriptor_to_function).collect();
        let request = ChatRequest {
            model: self.model.clone(),
            messages: conversation_messages(conversation),
            temperature: Some(0.0),
            tools: if declarations.is_empty() {
                None
            } else {
                Some(declarations)
            },
            response_format: None,
        };

        let message = Self::first_message(self.send(&request).await?)?;
        Ok(decision_from_message(message))
    }
}

#[async_trait]
impl StructuredJudge for OpenAiAdapter {
    async fn judge(&self, argument_value: &str) -> Result<Verdict, DecisionError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(self.gate_prompt.instructions()),
                ChatMessage::user(self.gate_prompt.judge_request(argument_value)),
            ],
            temperature: Some(0.0),
            tools: None,
            response_format: Some(verdict_response_format()),
        };

        let message = Self::first_message(self.send(&request).await?)?;
        let content = message.content.unwrap_or_default();
        let raw: RawVerdict = serde_json::from_str(&content).map_err(|e| {
            DecisionError::InvalidResponse(format!("bad verdict payload: {}. Raw: {}", e, content))
        })?;

        Ok(Verdict {
            valid: raw.is_valid,
            feedback: raw.feedback,
        })
    }
}

/// JSON-schema response format matching [`RawVerdict`].
fn verdict_response_format() -> Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": "reason_validation",
            "strict": true,
            "schema": {
                "type": "object",
                "properties": {
                    "is_valid": {
                        "type": "boolean",
                        "description": "Whether the refund reason is specific enough to process",
                    },
                    "feedback": {
                        "type": "string",
                        "description": "If invalid, explain what information is missing",
                    },
                },
                "required": ["is_valid", "feedback"],
                "additionalProperties": false,
            },
        },
    })
}

fn conversation_messages(conversation: &Conversation) -> Vec<ChatMessage> {
    conversation
        .turns()
        .iter()
        .map(|turn| match turn {
            Turn::User { text } => ChatMessage::user(text),
            Turn::Assistant { text, tool_calls } => ChatMessage::assistant(text, tool_calls),
            Turn::ToolResult { call_id, text } => ChatMessage::tool(call_id, text),
        })
        .collect()
}

fn decision_from_message(message: ResponseMessage) -> Decision {
    let tool_calls = message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|call| {
            let arguments: HashMap<String, Value> =
                serde_json::from_str(&call.function.arguments).unwrap_or_default();
            let mut tool_call = ToolCall::new(call.id, call.function.name);
            tool_call.arguments = arguments;
            tool_call
        })
        .collect();

    Decision {
        text: message.content.unwrap_or_default(),
        tool_calls,
    }
}

// Wire types, OpenAI Chat Completions shape.

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<Value>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
}

impl ChatMessage {
    fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: Some(content.into()),
            tool_call_id: None,
            tool_calls: None,
        }
    }

    fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: Some(content.into()),
            tool_call_id: None,
            tool_calls: None,
        }
    }

    fn assistant(text: &str, tool_calls: &[ToolCall]) -> Self {
        let wire_calls = if tool_calls.is_empty() {
            None
        } else {
            Some(
                tool_calls
                    .iter()
                    .map(|call| WireToolCall {
                        id: call.id.clone(),
                        call_type: "function".to_string(),
                        function: WireFunction {
                            name: call.name.clone(),
                            arguments: serde_json::to_string(&call.arguments)
                                .unwrap_or_else(|_| "{}".to_string()),
                        },
                    })
                    .collect(),
            )
        };
        Self {
            role: "assistant".to_string(),
            content: if text.is_empty() && wire_calls.is_some() {
                None
            } else {
                Some(text.to_string())
            },
            tool_call_id: None,
            tool_calls: wire_calls,
        }
    }

    fn tool(call_id: &str, content: &str) -> Self {
        Self {
            role: "tool".to_string(),
            content: Some(content.to_string()),
            tool_call_id: Some(call_id.to_string()),
            tool_calls: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type")]
    call_type: String,
    function: WireFunction,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunction {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Deserialize)]
struct RawVerdict {
    is_valid: bool,
    feedback: String,
}
