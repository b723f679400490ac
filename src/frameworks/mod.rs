//! @ai:module:intent Agent framework abstraction shared by live and simulated frameworks
//! @ai:module:layer domain
//! @ai:module:public_api Agent, AgentFramework, AgentSpec, MemoryBackend, BoxedAgent, FrameworkRegistry
//! @ai:module:stateless true

pub mod client;
pub mod live;
pub mod mock;
pub mod rate_limiter;
pub mod registry;
pub mod tools;

pub use client::{ChatMessage, ChatRequest, LlmClient, MockLlmClient, OpenAiClient};
pub use live::{LiveFramework, LlmAgent};
pub use mock::{ConcurrencyMode, FrameworkProfile, MockAgent, MockFramework};
pub use rate_limiter::{RateLimiter, RateLimiterTrait};
pub use registry::{build_registry, FrameworkRegistry};
pub use tools::{calculator, Tool, ToolRegistry};

use crate::error::{AgentError, AgentResult};
use async_trait::async_trait;
use futures::future::try_join_all;
use std::time::{Duration, Instant};

/// @ai:intent A conversational agent created by a framework
#[async_trait]
pub trait Agent: Send {
    /// @ai:intent Send one user message and return the reply
    async fn chat(&mut self, message: &str) -> AgentResult<String>;

    /// @ai:intent Number of exchanges the agent has recorded
    fn history_len(&self) -> usize;
}

pub type BoxedAgent = Box<dyn Agent>;

/// @ai:intent How an agent keeps conversation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryBackend {
    /// Every message is sent without prior context
    None,
    /// Full history is replayed on each call
    #[default]
    Buffer,
}

/// @ai:intent Description of a custom agent (name, persona, memory, tools)
#[derive(Debug, Clone)]
pub struct AgentSpec {
    pub name: String,
    pub system_prompt: String,
    /// Overrides the framework's default model when set
    pub model: Option<String>,
    pub memory: MemoryBackend,
    pub tools: ToolRegistry,
}

impl AgentSpec {
    /// @ai:intent Create a spec with buffer memory and no tools
    /// @ai:effects pure
    pub fn new(name: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_prompt: system_prompt.into(),
            model: None,
            memory: MemoryBackend::Buffer,
            tools: ToolRegistry::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_memory(mut self, memory: MemoryBackend) -> Self {
        self.memory = memory;
        self
    }

    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.tools.register(tool);
        self
    }
}

/// @ai:intent Message sent by simulated agent `agent_id` in a concurrency run
/// @ai:effects pure
pub fn concurrent_message(agent_id: usize, index: usize) -> String {
    format!("Hello from agent {}, message {}", agent_id, index)
}

/// @ai:intent Uniform interface over the frameworks under benchmark
#[async_trait]
pub trait AgentFramework: Send + Sync {
    /// @ai:intent Registry name, e.g. "niflheim-x"
    fn name(&self) -> &str;

    async fn create_simple_agent(&self) -> AgentResult<BoxedAgent>;

    async fn create_agent_with_memory(&self) -> AgentResult<BoxedAgent>;

    async fn create_agent_with_tools(&self) -> AgentResult<BoxedAgent>;

    /// @ai:intent Build an agent from a custom spec
    async fn create_agent(&self, spec: AgentSpec) -> AgentResult<BoxedAgent>;

    /// @ai:intent Send messages in order and return the elapsed time
    /// @ai:effects time, network
    async fn process_conversation(
        &self,
        agent: &mut dyn Agent,
        messages: &[String],
    ) -> AgentResult<Duration> {
        let start = Instant::now();
        for message in messages {
            agent.chat(message).await?;
        }
        Ok(start.elapsed())
    }

    /// @ai:intent Run agents concurrently, each sending its own messages
    /// @ai:post the first failing agent aborts the batch
    /// @ai:effects time, network
    async fn concurrent_agents(
        &self,
        num_agents: usize,
        messages_per_agent: usize,
    ) -> AgentResult<Duration> {
        let start = Instant::now();
        let tasks = (0..num_agents).map(|agent_id| run_agent(self, agent_id, messages_per_agent));
        try_join_all(tasks).await?;
        Ok(start.elapsed())
    }
}

/// @ai:intent Create one agent and send its concurrency-run messages
/// @ai:effects time, network
pub(crate) async fn run_agent<F>(
    framework: &F,
    agent_id: usize,
    messages_per_agent: usize,
) -> Result<(), AgentError>
where
    F: AgentFramework + ?Sized,
{
    let mut agent = framework.create_simple_agent().await?;
    for index in 0..messages_per_agent {
        agent.chat(&concurrent_message(agent_id, index)).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concurrent_message_format() {
        assert_eq!(concurrent_message(3, 1), "Hello from agent 3, message 1");
    }

    #[test]
    fn test_agent_spec_builder() {
        let spec = AgentSpec::new("Analyst", "Be precise")
            .with_model("gpt-4")
            .with_memory(MemoryBackend::None)
            .with_tool(calculator());

        assert_eq!(spec.model.as_deref(), Some("gpt-4"));
        assert_eq!(spec.memory, MemoryBackend::None);
        assert_eq!(spec.tools.names(), vec!["calc".to_string()]);
    }
}
