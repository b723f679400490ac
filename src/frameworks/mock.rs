//! @ai:module:intent Sleep-based simulators standing in for competitor frameworks
//! @ai:module:layer domain
//! @ai:module:public_api FrameworkProfile, ConcurrencyMode, MockFramework, MockAgent
//! @ai:module:stateless false

use crate::error::{AgentError, AgentResult};
use crate::frameworks::{run_agent, Agent, AgentFramework, AgentSpec, BoxedAgent};
use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// @ai:intent How a simulated framework schedules concurrent agents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcurrencyMode {
    /// All agents run at once
    Parallel,
    /// Agents run one after another
    Sequential,
}

/// @ai:intent Timing characteristics of one simulated framework
#[derive(Debug, Clone, PartialEq)]
pub struct FrameworkProfile {
    pub name: String,
    /// Prefix of every simulated reply
    pub display_name: String,
    pub init_delay: Duration,
    pub base_latency: Duration,
    /// Uniform extra latency range added to each message
    pub jitter: (Duration, Duration),
    pub concurrency: ConcurrencyMode,
    /// Multiplier applied to every delay
    pub time_scale: f64,
    /// Agents fail every message once they have completed this many exchanges
    pub fail_after: Option<usize>,
}

impl FrameworkProfile {
    pub fn langchain() -> Self {
        Self::from_millis("langchain", "LangChain", 100, 50, (10, 30), ConcurrencyMode::Sequential)
    }

    pub fn beeai() -> Self {
        Self::from_millis("beeai", "BeeAI", 80, 40, (5, 15), ConcurrencyMode::Parallel)
    }

    pub fn openai_direct() -> Self {
        Self::from_millis("openai-direct", "OpenAI", 10, 300, (100, 200), ConcurrencyMode::Parallel)
    }

    /// @ai:intent Offline stand-in for the live niflheim-x framework
    pub fn niflheim_x() -> Self {
        Self::from_millis("niflheim-x", "Niflheim-X", 20, 10, (2, 5), ConcurrencyMode::Parallel)
    }

    /// @ai:intent All competitor profiles
    /// @ai:effects pure
    pub fn competitors() -> Vec<Self> {
        vec![Self::langchain(), Self::beeai(), Self::openai_direct()]
    }

    fn from_millis(
        name: &str,
        display_name: &str,
        init_ms: u64,
        base_ms: u64,
        (jitter_lo, jitter_hi): (u64, u64),
        concurrency: ConcurrencyMode,
    ) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            init_delay: Duration::from_millis(init_ms),
            base_latency: Duration::from_millis(base_ms),
            jitter: (Duration::from_millis(jitter_lo), Duration::from_millis(jitter_hi)),
            concurrency,
            time_scale: 1.0,
            fail_after: None,
        }
    }

    /// @ai:intent Return the profile with all delays scaled
    /// @ai:effects pure
    pub fn scaled(mut self, time_scale: f64) -> Self {
        self.time_scale = time_scale.max(0.0);
        self
    }

    /// @ai:intent Return the profile with agents failing after `exchanges` messages
    /// @ai:effects pure
    pub fn failing_after(mut self, exchanges: usize) -> Self {
        self.fail_after = Some(exchanges);
        self
    }

    /// @ai:intent Scaled agent construction delay
    /// @ai:effects pure
    pub fn init_time(&self) -> Duration {
        self.init_delay.mul_f64(self.time_scale)
    }

    /// @ai:intent Sample a scaled per-message latency
    /// @ai:effects pure
    pub fn message_time(&self) -> Duration {
        let (lo, hi) = self.jitter;
        let jitter = if hi > lo {
            rand::thread_rng().gen_range(lo..=hi)
        } else {
            lo
        };
        (self.base_latency + jitter).mul_f64(self.time_scale)
    }
}

/// @ai:intent Simulated agent that sleeps instead of calling a model
pub struct MockAgent {
    profile: Arc<FrameworkProfile>,
    name: String,
    tools: Vec<String>,
    history: Vec<(String, String)>,
}

impl MockAgent {
    pub fn tools(&self) -> &[String] {
        &self.tools
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl Agent for MockAgent {
    /// @ai:intent Sleep for a sampled latency and record the exchange
    /// @ai:post fails with AgentError::Task once the profile's fail_after is reached
    /// @ai:effects time, state:write
    async fn chat(&mut self, message: &str) -> AgentResult<String> {
        if let Some(limit) = self.profile.fail_after {
            if self.history.len() >= limit {
                return Err(AgentError::Task(format!(
                    "{} agent '{}' failed after {} messages",
                    self.profile.display_name, self.name, limit
                )));
            }
        }

        let delay = self.profile.message_time();
        tokio::time::sleep(delay).await;

        let response = format!("{} response to: {}", self.profile.display_name, message);
        self.history.push((message.to_string(), response.clone()));
        Ok(response)
    }

    fn history_len(&self) -> usize {
        self.history.len()
    }
}

/// @ai:intent Framework whose agents follow a FrameworkProfile
pub struct MockFramework {
    profile: Arc<FrameworkProfile>,
}

impl MockFramework {
    /// @ai:intent Create a simulator for a profile
    /// @ai:effects pure
    pub fn new(profile: FrameworkProfile) -> Self {
        Self {
            profile: Arc::new(profile),
        }
    }

    pub fn profile(&self) -> &FrameworkProfile {
        &self.profile
    }

    /// @ai:intent Simulate construction and build the agent
    /// @ai:effects time
    async fn build(&self, name: &str, tools: Vec<String>) -> MockAgent {
        tokio::time::sleep(self.profile.init_time()).await;
        MockAgent {
            profile: Arc::clone(&self.profile),
            name: name.to_string(),
            tools,
            history: Vec::new(),
        }
    }
}

#[async_trait]
impl AgentFramework for MockFramework {
    fn name(&self) -> &str {
        &self.profile.name
    }

    async fn create_simple_agent(&self) -> AgentResult<BoxedAgent> {
        Ok(Box::new(self.build("BenchmarkAgent", Vec::new()).await))
    }

    async fn create_agent_with_memory(&self) -> AgentResult<BoxedAgent> {
        Ok(Box::new(self.build("MemoryAgent", Vec::new()).await))
    }

    async fn create_agent_with_tools(&self) -> AgentResult<BoxedAgent> {
        Ok(Box::new(self.build("ToolAgent", vec!["calculator".to_string()]).await))
    }

    async fn create_agent(&self, spec: AgentSpec) -> AgentResult<BoxedAgent> {
        Ok(Box::new(self.build(&spec.name, spec.tools.names()).await))
    }

    /// @ai:intent Run simulated agents in the profile's concurrency mode
    /// @ai:effects time
    async fn concurrent_agents(
        &self,
        num_agents: usize,
        messages_per_agent: usize,
    ) -> AgentResult<Duration> {
        let start = Instant::now();
        match self.profile.concurrency {
            ConcurrencyMode::Parallel => {
                let tasks = (0..num_agents).map(|id| run_agent(self, id, messages_per_agent));
                futures::future::try_join_all(tasks).await?;
            }
            ConcurrencyMode::Sequential => {
                for id in 0..num_agents {
                    run_agent(self, id, messages_per_agent).await?;
                }
            }
        }
        Ok(start.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny(profile: FrameworkProfile) -> MockFramework {
        MockFramework::new(profile.scaled(0.01))
    }

    #[test]
    fn test_message_time_within_profile_range() {
        let profile = FrameworkProfile::beeai();
        for _ in 0..50 {
            let t = profile.message_time();
            assert!(t >= Duration::from_millis(45));
            assert!(t <= Duration::from_millis(55));
        }
    }

    #[test]
    fn test_scaling_applies_to_all_delays() {
        let profile = FrameworkProfile::openai_direct().scaled(0.5);
        assert_eq!(profile.init_time(), Duration::from_millis(5));
        let t = profile.message_time();
        assert!(t >= Duration::from_millis(200) && t <= Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_agent_records_history() {
        let framework = tiny(FrameworkProfile::langchain());
        let mut agent = framework.create_simple_agent().await.unwrap();

        let reply = agent.chat("Hello").await.unwrap();
        agent.chat("How are you?").await.unwrap();

        assert_eq!(reply, "LangChain response to: Hello");
        assert_eq!(agent.history_len(), 2);
    }

    #[tokio::test]
    async fn test_process_conversation_times_all_messages() {
        let framework = MockFramework::new(FrameworkProfile::niflheim_x().scaled(0.5));
        let mut agent = framework.create_simple_agent().await.unwrap();
        let messages = vec!["a".to_string(), "b".to_string()];

        let elapsed = framework
            .process_conversation(agent.as_mut(), &messages)
            .await
            .unwrap();

        assert!(elapsed >= Duration::from_millis(12));
        assert_eq!(agent.history_len(), 2);
    }

    #[tokio::test]
    async fn test_failing_agent_stops_after_limit() {
        let framework = tiny(FrameworkProfile::beeai().failing_after(1));
        let mut agent = framework.create_simple_agent().await.unwrap();

        agent.chat("first").await.unwrap();
        let err = agent.chat("second").await.unwrap_err();

        assert!(matches!(err, AgentError::Task(_)));
        assert!(err.to_string().contains("BeeAI agent 'BenchmarkAgent' failed after 1 messages"));
        assert_eq!(agent.history_len(), 1);
    }

    #[tokio::test]
    async fn test_one_failing_agent_aborts_batch_in_both_modes() {
        for mode in [ConcurrencyMode::Parallel, ConcurrencyMode::Sequential] {
            let mut profile = FrameworkProfile::niflheim_x().scaled(0.01).failing_after(1);
            profile.concurrency = mode;
            let framework = MockFramework::new(profile);

            // one message per agent stays under the limit, two do not
            assert!(framework.concurrent_agents(3, 1).await.is_ok(), "{:?}", mode);
            let err = framework.concurrent_agents(3, 2).await.unwrap_err();
            assert!(matches!(err, AgentError::Task(_)), "{:?}", mode);
        }
    }

    #[tokio::test]
    async fn test_sequential_slower_than_parallel() {
        let mut sequential = FrameworkProfile::beeai().scaled(0.2);
        sequential.concurrency = ConcurrencyMode::Sequential;
        let parallel = FrameworkProfile::beeai().scaled(0.2);

        let seq = MockFramework::new(sequential).concurrent_agents(4, 1).await.unwrap();
        let par = MockFramework::new(parallel).concurrent_agents(4, 1).await.unwrap();

        // 4 x (16ms init + >=9ms message) vs one overlapped round
        assert!(seq >= Duration::from_millis(100));
        assert!(par < seq);
    }
}
