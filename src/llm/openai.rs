//! OpenAI chat-completions client.
//!
//! Speaks the `/chat/completions` wire format directly over reqwest, so any
//! OpenAI-compatible endpoint works by changing the base URL.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::llm::provider::{
    ChatMessage, FinishReason, LlmProvider, Role, ToolCall, ToolCompletionRequest,
    ToolCompletionResponse, ToolDefinition,
};

const PROVIDER: &str = "openai";

/// HTTP timeout for a single completion call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

// ── Wire types ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ApiTool<'a>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: Role,
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ApiToolCall>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiToolCall {
    id: String,
    #[serde(rename = "type", default = "function_type")]
    kind: String,
    function: ApiFunctionCall,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Serialize)]
struct ApiTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: &'a ToolDefinition,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    id: Option<String>,
    choices: Vec<ApiChoice>,
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

fn function_type() -> String {
    "function".to_string()
}

impl From<&ChatMessage> for ApiMessage {
    fn from(msg: &ChatMessage) -> Self {
        let tool_calls = (!msg.tool_calls.is_empty()).then(|| {
            msg.tool_calls
                .iter()
                .map(|call| ApiToolCall {
                    id: call.id.clone(),
                    kind: function_type(),
                    function: ApiFunctionCall {
                        name: call.name.clone(),
                        arguments: call.arguments.clone(),
                    },
                })
                .collect()
        });

        // An assistant turn that only carries tool calls has null content.
        let content = if tool_calls.is_some() && msg.content.is_empty() {
            None
        } else {
            Some(msg.content.clone())
        };

        Self {
            role: msg.role,
            content,
            tool_call_id: msg.tool_call_id.clone(),
            tool_calls,
        }
    }
}

// ── Client ──────────────────────────────────────────────────────────────

/// OpenAI-compatible chat-completions provider.
pub struct OpenAiProvider {
    client: Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: SecretString, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete_with_tools(
        &self,
        request: ToolCompletionRequest,
    ) -> Result<ToolCompletionResponse, LlmError> {
        let body = ApiRequest {
            model: &self.model,
            messages: request.messages.iter().map(ApiMessage::from).collect(),
            tools: request
                .tools
                .iter()
                .map(|function| ApiTool {
                    kind: "function",
                    function,
                })
                .collect(),
        };

        tracing::debug!(
            model = %self.model,
            messages = body.messages.len(),
            tools = body.tools.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(LlmError::AuthFailed {
                provider: PROVIDER.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason: format!("HTTP {}: {}", status, body),
            });
        }

        let parsed: ApiResponse = response.json().await.map_err(|e| LlmError::InvalidResponse {
            provider: PROVIDER.to_string(),
            reason: e.to_string(),
        })?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse {
                provider: PROVIDER.to_string(),
                reason: "response contained no choices".to_string(),
            })?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| ToolCall {
                id: call.id,
                name: call.function.name,
                arguments: call.function.arguments,
            })
            .collect();

        let (input_tokens, output_tokens) = parsed
            .usage
            .map(|u| (u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        Ok(ToolCompletionResponse {
            content: choice.message.content,
            tool_calls,
            input_tokens,
            output_tokens,
            finish_reason: choice
                .finish_reason
                .as_deref()
                .map(FinishReason::from_api)
                .unwrap_or(FinishReason::Stop),
            response_id: parsed.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
    use serde_json::{Value, json};

    use super::*;

    type Captured = Arc<Mutex<Vec<Value>>>;

    /// Serve `reply` from a local `/v1/chat/completions`, capturing request bodies.
    async fn start_stub(status: StatusCode, reply: Value) -> (String, Captured) {
        let captured: Captured = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route(
                "/v1/chat/completions",
                post(
                    move |State(captured): State<Captured>, Json(body): Json<Value>| {
                        let reply = reply.clone();
                        async move {
                            captured.lock().unwrap().push(body);
                            (status, Json(reply))
                        }
                    },
                ),
            )
            .with_state(Arc::clone(&captured));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://127.0.0.1:{port}/v1"), captured)
    }

    fn provider(base_url: &str) -> OpenAiProvider {
        OpenAiProvider::new(SecretString::from("sk-test"), base_url, "gpt-4o-mini")
    }

    #[test]
    fn test_assistant_tool_call_message_has_null_content() {
        let msg = ChatMessage::assistant_with_tool_calls(
            None,
            vec![ToolCall {
                id: "call_1".into(),
                name: "record_unknown_question".into(),
                arguments: r#"{"question":"?"}"#.into(),
            }],
        );
        let wire = serde_json::to_value(ApiMessage::from(&msg)).unwrap();
        assert_eq!(wire["role"], "assistant");
        assert!(wire["content"].is_null());
        assert_eq!(wire["tool_calls"][0]["type"], "function");
        assert_eq!(wire["tool_calls"][0]["function"]["name"], "record_unknown_question");
    }

    #[tokio::test]
    async fn test_parses_tool_call_response() {
        let (base_url, captured) = start_stub(
            StatusCode::OK,
            json!({
                "id": "chatcmpl-1",
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": null,
                        "tool_calls": [{
                            "id": "call_abc",
                            "type": "function",
                            "function": {
                                "name": "record_unknown_question",
                                "arguments": "{\"question\":\"Favourite colour?\"}"
                            }
                        }]
                    },
                    "finish_reason": "tool_calls"
                }],
                "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
            }),
        )
        .await;

        let tools = vec![ToolDefinition {
            name: "record_unknown_question".into(),
            description: "d".into(),
            parameters: json!({"type": "object"}),
        }];
        let request = ToolCompletionRequest::new(
            vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
            tools,
        );

        let response = provider(&base_url).complete_with_tools(request).await.unwrap();
        assert_eq!(response.finish_reason, FinishReason::ToolUse);
        assert_eq!(response.content, None);
        assert_eq!(response.tool_calls.len(), 1);
        assert_eq!(response.tool_calls[0].id, "call_abc");
        assert_eq!(response.input_tokens, 12);
        assert_eq!(response.response_id.as_deref(), Some("chatcmpl-1"));

        let bodies = captured.lock().unwrap();
        assert_eq!(bodies[0]["model"], "gpt-4o-mini");
        assert_eq!(bodies[0]["messages"][0]["role"], "system");
        assert_eq!(bodies[0]["tools"][0]["type"], "function");
        assert_eq!(bodies[0]["tools"][0]["function"]["name"], "record_unknown_question");
    }

    #[tokio::test]
    async fn test_parses_final_answer() {
        let (base_url, _captured) = start_stub(
            StatusCode::OK,
            json!({
                "choices": [{
                    "message": {"role": "assistant", "content": "Hello!"},
                    "finish_reason": "stop"
                }]
            }),
        )
        .await;

        let response = provider(&base_url)
            .complete_with_tools(ToolCompletionRequest::new(vec![ChatMessage::user("hi")], vec![]))
            .await
            .unwrap();
        assert_eq!(response.finish_reason, FinishReason::Stop);
        assert_eq!(response.content.as_deref(), Some("Hello!"));
        assert!(response.tool_calls.is_empty());
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_auth_failed() {
        let (base_url, _captured) =
            start_stub(StatusCode::UNAUTHORIZED, json!({"error": {"message": "bad key"}})).await;

        let err = provider(&base_url)
            .complete_with_tools(ToolCompletionRequest::new(vec![ChatMessage::user("hi")], vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::AuthFailed { .. }));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_request_failed() {
        let (base_url, _captured) =
            start_stub(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "boom"})).await;

        let err = provider(&base_url)
            .complete_with_tools(ToolCompletionRequest::new(vec![ChatMessage::user("hi")], vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::RequestFailed { .. }));
    }

    #[tokio::test]
    async fn test_empty_choices_is_invalid_response() {
        let (base_url, _captured) = start_stub(StatusCode::OK, json!({"choices": []})).await;

        let err = provider(&base_url)
            .complete_with_tools(ToolCompletionRequest::new(vec![ChatMessage::user("hi")], vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse { .. }));
    }
}
