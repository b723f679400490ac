//! @ai:module:intent OpenAI-compatible chat-completions client for live agents
//! @ai:module:layer infrastructure
//! @ai:module:public_api LlmClient, OpenAiClient, MockLlmClient, ChatMessage, ChatRequest
//! @ai:module:stateless false

use crate::config::ApiConfig;
use crate::error::{AgentError, AgentResult};
use crate::frameworks::rate_limiter::{RateLimiter, RateLimiterTrait};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// @ai:intent One chat message in the chat-completions wire format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    fn text(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::text("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::text("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::text("assistant", content)
    }

    /// @ai:intent Result of a tool call, addressed to the call id
    /// @ai:effects pure
    pub fn tool_result(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: Some(call_id.into()),
            ..Self::text("tool", content)
        }
    }

    /// @ai:intent Tool calls requested by an assistant message, if any
    /// @ai:effects pure
    pub fn requested_tools(&self) -> &[ToolCall] {
        self.tool_calls.as_deref().unwrap_or(&[])
    }
}

/// @ai:intent Tool invocation requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type", default = "default_call_type")]
    pub call_type: String,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded arguments
    pub arguments: String,
}

fn default_call_type() -> String {
    "function".to_string()
}

impl FunctionCall {
    /// @ai:intent Extract the tool input from the JSON arguments
    /// @ai:post falls back to the raw argument string
    /// @ai:effects pure
    pub fn input(&self) -> String {
        match serde_json::from_str::<Value>(&self.arguments) {
            Ok(Value::Object(map)) => map
                .get("input")
                .or_else(|| map.values().next())
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .unwrap_or_default(),
            Ok(Value::String(s)) => s,
            _ => self.arguments.clone(),
        }
    }
}

/// @ai:intent One completion request
#[derive(Debug, Clone)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub tools: Vec<Value>,
}

/// @ai:intent Trait for chat-completion backends
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// @ai:intent Request the next assistant message
    async fn complete(&self, request: ChatRequest<'_>) -> AgentResult<ChatMessage>;
}

/// @ai:intent Chat-completions request body
#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "no_tools")]
    tools: &'a [Value],
}

fn no_tools(tools: &&[Value]) -> bool {
    tools.is_empty()
}

/// @ai:intent Chat-completions response body
#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// @ai:intent Chat-completions client with bearer auth and rate limiting
pub struct OpenAiClient {
    client: reqwest::Client,
    config: ApiConfig,
    rate_limiter: Arc<RateLimiter>,
    api_key: String,
}

impl OpenAiClient {
    /// @ai:intent Create a new client for the configured endpoint
    /// @ai:pre api_key is non-empty
    /// @ai:effects pure
    pub fn new(config: ApiConfig, api_key: String) -> AgentResult<Self> {
        let rate_limiter = Arc::new(RateLimiter::new(config.requests_per_minute));
        Self::with_rate_limiter(config, api_key, rate_limiter)
    }

    /// @ai:intent Create a client sharing an existing rate limiter
    /// @ai:effects pure
    pub fn with_rate_limiter(
        config: ApiConfig,
        api_key: String,
        rate_limiter: Arc<RateLimiter>,
    ) -> AgentResult<Self> {
        if api_key.trim().is_empty() {
            return Err(AgentError::MissingApiKey(config.api_key_env.clone()));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            config,
            rate_limiter,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    /// @ai:intent Send a completion request and return the first choice
    /// @ai:effects network
    async fn complete(&self, request: ChatRequest<'_>) -> AgentResult<ChatMessage> {
        self.rate_limiter.wait().await;

        let body = ApiRequest {
            model: request.model,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            messages: request.messages,
            tools: &request.tools,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| AgentError::MalformedResponse(e.to_string()))?;

        api_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| AgentError::MalformedResponse("response has no choices".to_string()))
    }
}

/// @ai:intent Scripted client for tests; echoes once the script runs out
#[derive(Default)]
pub struct MockLlmClient {
    script: Mutex<VecDeque<ChatMessage>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockLlmClient {
    /// @ai:intent Create a mock client that replies with the given messages in order
    /// @ai:effects pure
    pub fn new(script: Vec<ChatMessage>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// @ai:intent Message lists received so far
    /// @ai:effects pure
    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    /// @ai:intent Return the next scripted message
    /// @ai:effects state:write
    async fn complete(&self, request: ChatRequest<'_>) -> AgentResult<ChatMessage> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.messages.to_vec());
        }

        let scripted = self.script.lock().ok().and_then(|mut s| s.pop_front());
        Ok(scripted.unwrap_or_else(|| {
            let last = request
                .messages
                .iter()
                .rev()
                .find(|m| m.role == "user")
                .and_then(|m| m.content.clone())
                .unwrap_or_default();
            ChatMessage::assistant(format!("Demo response to: {}", last))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client_script_then_echo() {
        let client = MockLlmClient::new(vec![ChatMessage::assistant("scripted")]);
        let messages = vec![ChatMessage::user("Hello")];

        let first = client
            .complete(ChatRequest { model: "m", messages: &messages, tools: vec![] })
            .await
            .unwrap();
        let second = client
            .complete(ChatRequest { model: "m", messages: &messages, tools: vec![] })
            .await
            .unwrap();

        assert_eq!(first.content.as_deref(), Some("scripted"));
        assert_eq!(second.content.as_deref(), Some("Demo response to: Hello"));
        assert_eq!(client.requests().len(), 2);
    }

    #[test]
    fn test_function_call_input() {
        let call = |arguments: &str| FunctionCall {
            name: "calc".to_string(),
            arguments: arguments.to_string(),
        };

        assert_eq!(call(r#"{"input": "2+2"}"#).input(), "2+2");
        assert_eq!(call(r#"{"expression": "3*3"}"#).input(), "3*3");
        assert_eq!(call("1+1").input(), "1+1");
    }

    #[test]
    fn test_response_with_tool_calls_parses() {
        let json = r#"{
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "calc", "arguments": "{\"input\":\"6*7\"}"}
                    }]
                }
            }]
        }"#;

        let response: ApiResponse = serde_json::from_str(json).unwrap();
        let message = &response.choices[0].message;
        assert_eq!(message.requested_tools().len(), 1);
        assert_eq!(message.requested_tools()[0].function.input(), "6*7");
    }

    #[test]
    fn test_missing_key_rejected() {
        let result = OpenAiClient::new(ApiConfig::default(), "  ".to_string());
        assert!(matches!(result, Err(AgentError::MissingApiKey(_))));
    }

    #[test]
    fn test_request_omits_empty_tools() {
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("hi")];
        let body = ApiRequest {
            model: "gpt-3.5-turbo",
            max_tokens: 10,
            temperature: 0.5,
            messages: &messages,
            tools: &[],
        };

        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("tools").is_none());
        assert_eq!(value["messages"][1]["role"], "user");
        assert!(value["messages"][0].get("tool_calls").is_none());
    }
}
