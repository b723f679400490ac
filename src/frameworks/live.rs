//! @ai:module:intent Live niflheim-x stand-in: LLM-backed agents with memory and tools
//! @ai:module:layer application
//! @ai:module:public_api LiveFramework, LlmAgent
//! @ai:module:stateless false

use crate::config::ApiConfig;
use crate::error::{AgentError, AgentResult};
use crate::frameworks::client::{ChatMessage, ChatRequest, LlmClient, OpenAiClient};
use crate::frameworks::tools::{calculator, ToolRegistry};
use crate::frameworks::{Agent, AgentFramework, AgentSpec, BoxedAgent, MemoryBackend};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Upper bound on model/tool round trips for one user message
const MAX_TOOL_ROUNDS: usize = 4;

/// @ai:intent Agent that sends its conversation to a chat-completions backend
pub struct LlmAgent {
    name: String,
    model: String,
    system_prompt: String,
    memory: MemoryBackend,
    tools: ToolRegistry,
    client: Arc<dyn LlmClient>,
    history: Vec<ChatMessage>,
    exchanges: usize,
    last_tool_calls: Vec<String>,
}

impl LlmAgent {
    /// @ai:intent Create an agent from a spec
    /// @ai:effects pure
    pub fn new(client: Arc<dyn LlmClient>, default_model: &str, spec: AgentSpec) -> Self {
        Self {
            name: spec.name,
            model: spec.model.unwrap_or_else(|| default_model.to_string()),
            system_prompt: spec.system_prompt,
            memory: spec.memory,
            tools: spec.tools,
            client,
            history: Vec::new(),
            exchanges: 0,
            last_tool_calls: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// @ai:intent Names of the tools invoked while answering the latest message
    /// @ai:effects pure
    pub fn last_tool_calls(&self) -> &[String] {
        &self.last_tool_calls
    }

    /// @ai:intent System prompt with the tool list appended
    /// @ai:effects pure
    pub fn full_system_prompt(&self) -> String {
        if self.tools.is_empty() {
            self.system_prompt.clone()
        } else {
            format!(
                "{}\n\nAvailable tools:\n{}",
                self.system_prompt,
                self.tools.describe()
            )
        }
    }

    /// @ai:intent Messages sent for a new user turn
    /// @ai:effects pure
    fn context_for(&self, message: &str) -> Vec<ChatMessage> {
        let mut messages = vec![ChatMessage::system(self.full_system_prompt())];
        if self.memory == MemoryBackend::Buffer {
            messages.extend(self.history.iter().cloned());
        }
        messages.push(ChatMessage::user(message));
        messages
    }
}

#[async_trait]
impl Agent for LlmAgent {
    /// @ai:intent Send a message, resolving tool calls until the model answers
    /// @ai:post buffer memory keeps the full turn, including tool traffic
    /// @ai:effects network, state:write
    async fn chat(&mut self, message: &str) -> AgentResult<String> {
        let mut messages = self.context_for(message);
        let turn_start = messages.len() - 1;
        self.last_tool_calls.clear();

        for _ in 0..MAX_TOOL_ROUNDS {
            let reply = self
                .client
                .complete(ChatRequest {
                    model: &self.model,
                    messages: &messages,
                    tools: self.tools.function_specs(),
                })
                .await?;

            let calls = reply.requested_tools().to_vec();
            messages.push(reply);

            if calls.is_empty() {
                let answer = messages
                    .last()
                    .and_then(|m| m.content.clone())
                    .unwrap_or_default();

                if self.memory == MemoryBackend::Buffer {
                    self.history.extend(messages.drain(turn_start..));
                }
                self.exchanges += 1;
                return Ok(answer);
            }

            for call in calls {
                let output = self.tools.call(&call.function.name, &call.function.input())?;
                debug!(agent = %self.name, tool = %call.function.name, "tool call resolved");
                self.last_tool_calls.push(call.function.name.clone());
                messages.push(ChatMessage::tool_result(call.id, output));
            }
        }

        Err(AgentError::Tool {
            name: self.name.clone(),
            message: format!("no final answer after {} tool rounds", MAX_TOOL_ROUNDS),
        })
    }

    fn history_len(&self) -> usize {
        self.exchanges
    }
}

/// @ai:intent Framework producing LlmAgents that share one client
pub struct LiveFramework {
    name: String,
    config: ApiConfig,
    client: Arc<dyn LlmClient>,
}

impl LiveFramework {
    /// @ai:intent Create the live framework over the configured HTTP endpoint
    /// @ai:effects pure
    pub fn new(config: ApiConfig, api_key: String) -> AgentResult<Self> {
        let client = Arc::new(OpenAiClient::new(config.clone(), api_key)?);
        Ok(Self::with_client(config, client))
    }

    /// @ai:intent Create the framework over any chat-completions client
    /// @ai:effects pure
    pub fn with_client(config: ApiConfig, client: Arc<dyn LlmClient>) -> Self {
        Self {
            name: "niflheim-x".to_string(),
            config,
            client,
        }
    }

    fn agent(&self, spec: AgentSpec) -> BoxedAgent {
        Box::new(LlmAgent::new(Arc::clone(&self.client), &self.config.model, spec))
    }
}

#[async_trait]
impl AgentFramework for LiveFramework {
    fn name(&self) -> &str {
        &self.name
    }

    async fn create_simple_agent(&self) -> AgentResult<BoxedAgent> {
        Ok(self.agent(AgentSpec::new("BenchmarkAgent", self.config.system_prompt.clone())))
    }

    async fn create_agent_with_memory(&self) -> AgentResult<BoxedAgent> {
        Ok(self.agent(
            AgentSpec::new("MemoryAgent", self.config.system_prompt.clone())
                .with_memory(MemoryBackend::Buffer),
        ))
    }

    async fn create_agent_with_tools(&self) -> AgentResult<BoxedAgent> {
        Ok(self.agent(
            AgentSpec::new("ToolAgent", self.config.system_prompt.clone()).with_tool(calculator()),
        ))
    }

    async fn create_agent(&self, spec: AgentSpec) -> AgentResult<BoxedAgent> {
        Ok(self.agent(spec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frameworks::client::{FunctionCall, MockLlmClient, ToolCall};

    fn tool_call(name: &str, input: &str) -> ChatMessage {
        ChatMessage {
            role: "assistant".to_string(),
            content: None,
            tool_calls: Some(vec![ToolCall {
                id: "call_1".to_string(),
                call_type: "function".to_string(),
                function: FunctionCall {
                    name: name.to_string(),
                    arguments: format!(r#"{{"input": "{}"}}"#, input),
                },
            }]),
            tool_call_id: None,
        }
    }

    #[tokio::test]
    async fn test_buffer_memory_replays_history() {
        let client = Arc::new(MockLlmClient::default());
        let framework = LiveFramework::with_client(ApiConfig::default(), client.clone());

        let mut agent = framework.create_agent_with_memory().await.unwrap();
        let reply = agent.chat("Hello").await.unwrap();
        agent.chat("And again").await.unwrap();

        assert_eq!(reply, "Demo response to: Hello");
        assert_eq!(agent.history_len(), 2);

        let requests = client.requests();
        // system + user, then system + (user, assistant) + user
        assert_eq!(requests[0].len(), 2);
        assert_eq!(requests[1].len(), 4);
    }

    #[tokio::test]
    async fn test_stateless_agent_sends_single_turn() {
        let client = Arc::new(MockLlmClient::default());
        let framework = LiveFramework::with_client(ApiConfig::default(), client.clone());
        let spec = AgentSpec::new("Stateless", "sys").with_memory(MemoryBackend::None);

        let mut agent = framework.create_agent(spec).await.unwrap();
        agent.chat("one").await.unwrap();
        agent.chat("two").await.unwrap();

        assert_eq!(client.requests()[1].len(), 2);
    }

    #[tokio::test]
    async fn test_tool_call_round_trip() {
        let client = Arc::new(MockLlmClient::new(vec![
            tool_call("calc", "6*7"),
            ChatMessage::assistant("The answer is 42"),
        ]));
        let framework = LiveFramework::with_client(ApiConfig::default(), client.clone());

        let mut agent = framework.create_agent_with_tools().await.unwrap();
        let reply = agent.chat("What is 6*7?").await.unwrap();

        assert_eq!(reply, "The answer is 42");
        let second = &client.requests()[1];
        let tool_msg = second.last().unwrap();
        assert_eq!(tool_msg.role, "tool");
        assert_eq!(tool_msg.content.as_deref(), Some("42"));
        assert!(second[0].content.as_deref().unwrap().contains("- calc:"));

        let mut agent = LlmAgent::new(client, "m", AgentSpec::new("A", "p").with_tool(calculator()));
        agent.chat("plain question").await.unwrap();
        assert!(agent.last_tool_calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_tool_fails_chat() {
        let client = Arc::new(MockLlmClient::new(vec![tool_call("search", "rust")]));
        let framework = LiveFramework::with_client(ApiConfig::default(), client);

        let mut agent = framework.create_agent_with_tools().await.unwrap();
        let err = agent.chat("look it up").await.unwrap_err();
        assert!(matches!(err, AgentError::Tool { .. }));
    }

    #[test]
    fn test_agent_model_overrides_default() {
        let client: Arc<dyn LlmClient> = Arc::new(MockLlmClient::default());
        let agent = LlmAgent::new(client, "gpt-3.5-turbo", AgentSpec::new("A", "p").with_model("gpt-4"));
        assert_eq!(agent.model(), "gpt-4");
        assert_eq!(agent.full_system_prompt(), "p");
    }
}
