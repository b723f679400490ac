//! @ai:module:intent Benchmark suite: times startup, conversation and concurrency per framework
//! @ai:module:layer application
//! @ai:module:public_api BenchmarkSuite
//! @ai:module:stateless false

use crate::config::BenchmarkConfig;
use crate::frameworks::{AgentFramework, FrameworkRegistry};
use crate::metrics::{BenchmarkSample, Category};
use crate::monitor::SystemMonitor;
use crate::report::csv_report::{CsvReporter, CsvReporterTrait};
use crate::report::json_report::{JsonReporter, JsonReporterTrait};
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Message sent once before each timed conversation
const WARM_UP_MESSAGE: &str = "Hello";

/// @ai:intent Collects benchmark samples for one run
pub struct BenchmarkSuite {
    frameworks: FrameworkRegistry,
    config: BenchmarkConfig,
    output_dir: PathBuf,
    monitor: SystemMonitor,
    results: Vec<BenchmarkSample>,
}

impl BenchmarkSuite {
    /// @ai:intent Create a suite and its output directory
    /// @ai:effects fs:write
    pub fn new(
        frameworks: FrameworkRegistry,
        config: BenchmarkConfig,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir).with_context(|| {
            format!("Failed to create output directory {}", output_dir.display())
        })?;

        Ok(Self {
            frameworks,
            config,
            output_dir,
            monitor: SystemMonitor::new(),
            results: Vec::new(),
        })
    }

    pub fn frameworks(&self) -> &FrameworkRegistry {
        &self.frameworks
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn monitor(&self) -> &SystemMonitor {
        &self.monitor
    }

    pub fn results(&self) -> &[BenchmarkSample] {
        &self.results
    }

    pub fn into_results(self) -> Vec<BenchmarkSample> {
        self.results
    }

    /// @ai:intent Append a sample stamped with current host info
    /// @ai:effects state:write, time
    #[allow(clippy::too_many_arguments)]
    fn record(
        &mut self,
        framework: &str,
        test_name: &str,
        category: Category,
        metric: &str,
        value: f64,
        unit: &str,
        additional_data: Option<Map<String, Value>>,
    ) {
        let mut sample = BenchmarkSample::new(
            framework,
            test_name,
            category,
            metric,
            value,
            unit,
            self.monitor.system_info(),
        );
        sample.additional_data = additional_data;
        self.results.push(sample);
    }

    /// @ai:intent Time agent construction for one framework
    /// @ai:post unknown framework names record nothing
    /// @ai:effects time, network, state:write
    pub async fn benchmark_startup_time(&mut self, name: &str) -> Result<()> {
        let Some(framework) = self.frameworks.get(name) else {
            return Ok(());
        };

        let start_memory = self.monitor.memory_usage_mb();
        let start = Instant::now();
        let _agent = framework
            .create_simple_agent()
            .await
            .with_context(|| format!("{}: simple agent creation failed", name))?;
        let creation_time = start.elapsed().as_secs_f64();
        let memory_usage = self.monitor.memory_usage_mb() - start_memory;

        let test = "simple_agent_creation";
        self.record(name, test, Category::Startup, "creation_time", creation_time, "seconds", None);
        self.record(name, test, Category::Startup, "memory_usage", memory_usage, "MB", None);

        let start = Instant::now();
        let _memory_agent = framework
            .create_agent_with_memory()
            .await
            .with_context(|| format!("{}: memory agent creation failed", name))?;
        let elapsed = start.elapsed().as_secs_f64();
        self.record(
            name,
            "memory_agent_creation",
            Category::Startup,
            "creation_time",
            elapsed,
            "seconds",
            None,
        );

        let start = Instant::now();
        let _tool_agent = framework
            .create_agent_with_tools()
            .await
            .with_context(|| format!("{}: tool agent creation failed", name))?;
        let elapsed = start.elapsed().as_secs_f64();
        self.record(
            name,
            "tool_agent_creation",
            Category::Startup,
            "creation_time",
            elapsed,
            "seconds",
            None,
        );

        info!(framework = name, "startup benchmarks completed");
        Ok(())
    }

    /// @ai:intent Time conversations of increasing complexity
    /// @ai:post unknown framework names record nothing
    /// @ai:effects time, network, state:write
    pub async fn benchmark_conversation_performance(&mut self, name: &str) -> Result<()> {
        let Some(framework) = self.frameworks.get(name) else {
            return Ok(());
        };

        for tier in self.config.conversation.clone() {
            if tier.messages.is_empty() {
                warn!(tier = %tier.name, "conversation tier has no messages, skipping");
                continue;
            }

            let mut agent = framework
                .create_simple_agent()
                .await
                .with_context(|| format!("{}: agent creation failed", name))?;
            agent
                .chat(WARM_UP_MESSAGE)
                .await
                .with_context(|| format!("{}: warm-up message failed", name))?;

            let total_time = framework
                .process_conversation(agent.as_mut(), &tier.messages)
                .await
                .with_context(|| format!("{}: conversation '{}' failed", name, tier.name))?
                .as_secs_f64();
            let message_count = tier.messages.len();
            let test_name = format!("conversation_{}", tier.name);

            self.record(
                name,
                &test_name,
                Category::Conversation,
                "total_time",
                total_time,
                "seconds",
                Some(data([("message_count", Value::from(message_count))])),
            );
            self.record(
                name,
                &test_name,
                Category::Conversation,
                "avg_time_per_message",
                total_time / message_count as f64,
                "seconds",
                None,
            );
        }

        info!(framework = name, "conversation benchmarks completed");
        Ok(())
    }

    /// @ai:intent Time concurrent agent batches and derive throughput
    /// @ai:post unknown framework names record nothing
    /// @ai:effects time, network, state:write
    pub async fn benchmark_concurrent_performance(&mut self, name: &str) -> Result<()> {
        let Some(framework) = self.frameworks.get(name) else {
            return Ok(());
        };

        for tier in self.config.concurrency.clone() {
            let start_memory = self.monitor.memory_usage_mb();
            let total_time = framework
                .concurrent_agents(tier.num_agents, tier.messages_per_agent)
                .await
                .with_context(|| format!("{}: {} failed", name, tier.test_name()))?;
            let memory_delta = self.monitor.memory_usage_mb() - start_memory;

            let total_messages = tier.total_messages();
            let test_name = tier.test_name();

            self.record(
                name,
                &test_name,
                Category::Concurrency,
                "total_time",
                total_time.as_secs_f64(),
                "seconds",
                Some(data([
                    ("num_agents", Value::from(tier.num_agents)),
                    ("messages_per_agent", Value::from(tier.messages_per_agent)),
                    ("total_messages", Value::from(total_messages)),
                ])),
            );
            self.record(
                name,
                &test_name,
                Category::Concurrency,
                "throughput",
                throughput(total_messages, total_time),
                "messages/second",
                None,
            );
            self.record(
                name,
                &test_name,
                Category::Concurrency,
                "memory_usage",
                memory_delta,
                "MB",
                None,
            );
        }

        info!(framework = name, "concurrency benchmarks completed");
        Ok(())
    }

    /// @ai:intent Run the selected categories for the selected frameworks
    /// @ai:post unknown frameworks are skipped; the first benchmark failure aborts the run
    /// @ai:effects time, network, state:write
    pub async fn run_all_benchmarks(
        &mut self,
        frameworks: Option<&[String]>,
        category: Option<Category>,
    ) -> Result<()> {
        let selected: Vec<String> = match frameworks {
            Some(names) => names.to_vec(),
            None => self
                .frameworks
                .names()
                .into_iter()
                .filter(|n| self.config.run.selection.includes_framework(n))
                .collect(),
        };
        let categories: Vec<Category> = Category::ALL
            .into_iter()
            .filter(|c| category.map_or(true, |only| only == *c))
            .filter(|c| self.config.run.selection.includes_category(*c))
            .collect();

        info!(
            frameworks = %selected.join(", "),
            categories = ?categories,
            "Starting benchmark suite"
        );

        for name in &selected {
            if !self.frameworks.contains(name) {
                warn!(framework = %name, "Framework not available, skipping");
                continue;
            }

            info!(framework = %name, "Benchmarking");
            for category in &categories {
                let outcome = match category {
                    Category::Startup => self.benchmark_startup_time(name).await,
                    Category::Conversation => self.benchmark_conversation_performance(name).await,
                    Category::Concurrency => self.benchmark_concurrent_performance(name).await,
                };
                outcome.with_context(|| format!("{} benchmarks failed for {}", category, name))?;
            }
        }

        info!(samples = self.results.len(), "All benchmarks completed");
        Ok(())
    }

    /// @ai:intent Write timestamped JSON and CSV results files
    /// @ai:post returns (json_path, csv_path)
    /// @ai:effects fs:write, time
    pub fn save_results(&self) -> Result<(PathBuf, PathBuf)> {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let json_path = self
            .output_dir
            .join(format!("benchmark_results_{}.json", timestamp));
        let csv_path = self
            .output_dir
            .join(format!("benchmark_results_{}.csv", timestamp));

        JsonReporter::new().generate(&self.results, &json_path)?;
        CsvReporter::new().generate(&self.results, &csv_path)?;

        info!(json = %json_path.display(), csv = %csv_path.display(), "Results saved");
        Ok((json_path, csv_path))
    }

    /// @ai:intent Look up a registered framework
    /// @ai:effects pure
    pub fn framework(&self, name: &str) -> Option<Arc<dyn AgentFramework>> {
        self.frameworks.get(name)
    }
}

/// @ai:intent Messages per second, or 0 when no time elapsed
/// @ai:effects pure
pub fn throughput(total_messages: usize, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        total_messages as f64 / secs
    } else {
        0.0
    }
}

fn data<const N: usize>(entries: [(&str, Value); N]) -> Map<String, Value> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConcurrencyTier, ConversationTier};
    use crate::frameworks::{FrameworkProfile, MockFramework};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn fast_config() -> BenchmarkConfig {
        let mut config = BenchmarkConfig::default();
        config.conversation = vec![ConversationTier {
            name: "simple".to_string(),
            messages: vec!["Hello".to_string(), "What's 2+2?".to_string()],
        }];
        config.concurrency = vec![ConcurrencyTier {
            num_agents: 2,
            messages_per_agent: 2,
        }];
        config
    }

    fn registry() -> FrameworkRegistry {
        let mut registry = FrameworkRegistry::new();
        registry.insert(Arc::new(MockFramework::new(FrameworkProfile::niflheim_x().scaled(0.01))));
        registry.insert(Arc::new(MockFramework::new(FrameworkProfile::langchain().scaled(0.01))));
        registry
    }

    fn keys(samples: &[BenchmarkSample], framework: &str) -> BTreeSet<(String, String)> {
        samples
            .iter()
            .filter(|s| s.framework == framework)
            .map(|s| (s.test_name.clone(), s.metric.clone()))
            .collect()
    }

    #[test]
    fn test_throughput_zero_elapsed() {
        assert_eq!(throughput(10, Duration::ZERO), 0.0);
        assert_eq!(throughput(10, Duration::from_secs(2)), 5.0);
    }

    #[tokio::test]
    async fn test_full_run_produces_metric_vocabulary() {
        let temp = TempDir::new().unwrap();
        let mut suite = BenchmarkSuite::new(registry(), fast_config(), temp.path().join("out")).unwrap();

        suite.run_all_benchmarks(None, None).await.unwrap();

        let expected: BTreeSet<(String, String)> = [
            ("simple_agent_creation", "creation_time"),
            ("simple_agent_creation", "memory_usage"),
            ("memory_agent_creation", "creation_time"),
            ("tool_agent_creation", "creation_time"),
            ("conversation_simple", "total_time"),
            ("conversation_simple", "avg_time_per_message"),
            ("concurrent_2agents_2msgs", "total_time"),
            ("concurrent_2agents_2msgs", "throughput"),
            ("concurrent_2agents_2msgs", "memory_usage"),
        ]
        .into_iter()
        .map(|(t, m)| (t.to_string(), m.to_string()))
        .collect();

        assert_eq!(keys(suite.results(), "niflheim-x"), expected);
        assert_eq!(keys(suite.results(), "langchain"), expected);
        assert_eq!(suite.results().len(), 18);
    }

    #[tokio::test]
    async fn test_conversation_sample_details() {
        let temp = TempDir::new().unwrap();
        let mut suite = BenchmarkSuite::new(registry(), fast_config(), temp.path()).unwrap();

        suite.benchmark_conversation_performance("niflheim-x").await.unwrap();

        let results = suite.results();
        let total = &results[0];
        let avg = &results[1];
        assert_eq!(total.additional_data.as_ref().unwrap()["message_count"], 2);
        assert!((avg.value - total.value / 2.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_concurrency_throughput_matches_total_time() {
        let temp = TempDir::new().unwrap();
        let mut suite = BenchmarkSuite::new(registry(), fast_config(), temp.path()).unwrap();

        suite.benchmark_concurrent_performance("langchain").await.unwrap();

        let results = suite.results();
        let total_time = results[0].value;
        assert_eq!(results[0].additional_data.as_ref().unwrap()["total_messages"], 4);
        assert!((results[1].value - 4.0 / total_time).abs() < 1e-6);
        assert_eq!(results[2].unit, "MB");
    }

    #[tokio::test]
    async fn test_unknown_frameworks_are_skipped() {
        let temp = TempDir::new().unwrap();
        let mut suite = BenchmarkSuite::new(registry(), fast_config(), temp.path()).unwrap();

        suite.benchmark_startup_time("autogen").await.unwrap();
        assert!(suite.results().is_empty());

        let names = vec!["autogen".to_string(), "langchain".to_string()];
        suite
            .run_all_benchmarks(Some(&names), Some(Category::Startup))
            .await
            .unwrap();

        assert_eq!(suite.results().len(), 4);
        assert!(suite.results().iter().all(|s| s.framework == "langchain"));
    }

    #[tokio::test]
    async fn test_failing_framework_aborts_run() {
        let temp = TempDir::new().unwrap();
        let mut registry = registry();
        registry.insert(Arc::new(MockFramework::new(
            FrameworkProfile::beeai().scaled(0.01).failing_after(0),
        )));
        let mut suite = BenchmarkSuite::new(registry, fast_config(), temp.path()).unwrap();

        let names = vec!["beeai".to_string(), "niflheim-x".to_string()];
        let err = suite.run_all_benchmarks(Some(&names), None).await.unwrap_err();

        assert!(format!("{:#}", err).contains("conversation benchmarks failed for beeai"));
        // startup only builds agents, so it completes before the failure
        assert_eq!(suite.results().len(), 4);
        assert!(suite.results().iter().all(|s| s.framework == "beeai" && s.category == Category::Startup));
    }

    #[tokio::test]
    async fn test_failing_concurrency_tier_propagates() {
        let temp = TempDir::new().unwrap();
        let mut registry = FrameworkRegistry::new();
        registry.insert(Arc::new(MockFramework::new(
            FrameworkProfile::langchain().scaled(0.01).failing_after(1),
        )));
        let mut suite = BenchmarkSuite::new(registry, fast_config(), temp.path()).unwrap();

        let err = suite.benchmark_concurrent_performance("langchain").await.unwrap_err();

        assert!(format!("{:#}", err).contains("concurrent_2agents_2msgs failed"));
        assert!(suite.results().is_empty());
    }

    #[tokio::test]
    async fn test_save_results_writes_both_files() {
        let temp = TempDir::new().unwrap();
        let mut suite = BenchmarkSuite::new(registry(), fast_config(), temp.path()).unwrap();
        suite.benchmark_startup_time("niflheim-x").await.unwrap();

        let (json, csv) = suite.save_results().unwrap();

        let name = json.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("benchmark_results_") && name.ends_with(".json"));
        assert_eq!(JsonReporter::load(&json).unwrap().len(), 4);
        assert_eq!(std::fs::read_to_string(csv).unwrap().lines().count(), 5);
    }
}
