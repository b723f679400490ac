//! @ai:module:intent Configuration structs for the benchmark toolkit
//! @ai:module:layer infrastructure
//! @ai:module:public_api BenchmarkConfig, ApiConfig, RunConfig, SelectionConfig, ConversationTier, ConcurrencyTier, ChartConfig, PathConfig, ExpectedPerformance
//! @ai:module:stateless true

use crate::metrics::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Placeholder value shipped in sample environments; treated as "no key".
pub const PLACEHOLDER_API_KEY: &str = "your-api-key-here";

/// @ai:intent Main configuration for the benchmark toolkit
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub paths: PathConfig,
    #[serde(default)]
    pub charts: ChartConfig,
    #[serde(default = "default_conversation_tiers")]
    pub conversation: Vec<ConversationTier>,
    #[serde(default = "default_concurrency_tiers")]
    pub concurrency: Vec<ConcurrencyTier>,
    #[serde(default = "default_expected_performance")]
    pub expected: BTreeMap<String, ExpectedPerformance>,
    #[serde(default)]
    pub verify: VerifyConfig,
}

/// @ai:intent LLM provider configuration for the live agent framework
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_rate_limit")]
    pub requests_per_minute: u32,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

/// @ai:intent Run configuration for benchmark execution
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Replace the live framework with its simulated profile (no API calls)
    #[serde(default)]
    pub simulate: bool,
    /// Multiplier applied to every mock delay
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
    #[serde(default)]
    pub selection: SelectionConfig,
}

/// @ai:intent Selection of frameworks and categories to benchmark
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub frameworks: Option<Vec<String>>,
    pub categories: Option<Vec<Category>>,
}

/// @ai:intent Path configuration for output directories
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    pub results_dir: PathBuf,
    pub charts_dir: PathBuf,
    pub evaluation_dir: PathBuf,
}

/// @ai:intent Chart rendering configuration
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_chart_width")]
    pub width: u32,
    #[serde(default = "default_chart_height")]
    pub height: u32,
    #[serde(default = "default_chart_formats")]
    pub formats: Vec<ChartFormat>,
    /// Hex colours keyed by framework name
    #[serde(default = "default_chart_colors")]
    pub colors: BTreeMap<String, String>,
}

/// @ai:intent Output format for rendered charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartFormat {
    Png,
    Svg,
}

impl ChartFormat {
    /// @ai:intent File extension for this format
    /// @ai:effects pure
    pub fn extension(&self) -> &'static str {
        match self {
            ChartFormat::Png => "png",
            ChartFormat::Svg => "svg",
        }
    }
}

/// @ai:intent One conversation complexity tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTier {
    pub name: String,
    pub messages: Vec<String>,
}

/// @ai:intent One concurrency tier: N agents each sending M messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcurrencyTier {
    pub num_agents: usize,
    pub messages_per_agent: usize,
}

impl ConcurrencyTier {
    /// @ai:intent Test name used in result samples
    /// @ai:effects pure
    pub fn test_name(&self) -> String {
        format!(
            "concurrent_{}agents_{}msgs",
            self.num_agents, self.messages_per_agent
        )
    }

    /// @ai:intent Total messages sent by the tier
    /// @ai:effects pure
    pub fn total_messages(&self) -> usize {
        self.num_agents * self.messages_per_agent
    }
}

/// @ai:intent Upper-bound threshold (lower measured values are better)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CeilingThreshold {
    pub max: f64,
    pub target: f64,
}

/// @ai:intent Lower-bound threshold (higher measured values are better)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorThreshold {
    pub min: f64,
    pub target: f64,
}

/// @ai:intent Performance expectations for one framework
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedPerformance {
    /// Seconds
    pub startup_time: CeilingThreshold,
    /// Seconds per message
    pub response_time: CeilingThreshold,
    /// MB
    pub memory_usage: CeilingThreshold,
    /// Messages per second
    pub throughput: FloorThreshold,
}

/// @ai:intent Installation smoke-test configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyConfig {
    #[serde(default = "default_verify_checks")]
    pub checks: Vec<VerifyCheck>,
}

/// @ai:intent A single shell-command check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCheck {
    pub description: String,
    pub command: String,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            run: RunConfig::default(),
            paths: PathConfig::default(),
            charts: ChartConfig::default(),
            conversation: default_conversation_tiers(),
            concurrency: default_concurrency_tiers(),
            expected: default_expected_performance(),
            verify: VerifyConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            requests_per_minute: default_rate_limit(),
            system_prompt: default_system_prompt(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            simulate: false,
            time_scale: default_time_scale(),
            selection: SelectionConfig::default(),
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("benchmark_results"),
            charts_dir: PathBuf::from("benchmark_charts"),
            evaluation_dir: PathBuf::from("evaluation_results"),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
            formats: default_chart_formats(),
            colors: default_chart_colors(),
        }
    }
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            checks: default_verify_checks(),
        }
    }
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    256
}

fn default_temperature() -> f32 {
    0.7
}

fn default_rate_limit() -> u32 {
    60
}

fn default_system_prompt() -> String {
    "You are a helpful assistant for benchmarking.".to_string()
}

fn default_time_scale() -> f64 {
    1.0
}

fn default_chart_width() -> u32 {
    1500
}

fn default_chart_height() -> u32 {
    1200
}

fn default_chart_formats() -> Vec<ChartFormat> {
    vec![ChartFormat::Png, ChartFormat::Svg]
}

fn default_chart_colors() -> BTreeMap<String, String> {
    [
        ("niflheim-x", "#2E86AB"),
        ("langchain", "#A23B72"),
        ("beeai", "#F18F01"),
        ("openai", "#84C7D0"),
        ("openai-direct", "#84C7D0"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_conversation_tiers() -> Vec<ConversationTier> {
    let tier = |name: &str, messages: &[&str]| ConversationTier {
        name: name.to_string(),
        messages: messages.iter().map(|m| m.to_string()).collect(),
    };

    vec![
        tier("simple", &["Hello", "How are you?", "What's 2+2?"]),
        tier(
            "medium",
            &[
                "Explain machine learning in one sentence",
                "What are the benefits of Python?",
                "How do you create a simple web server?",
            ],
        ),
        tier(
            "complex",
            &[
                "Explain the differences between supervised and unsupervised learning",
                "Write a Python function to calculate the Fibonacci sequence",
                "Compare and contrast different software architecture patterns",
            ],
        ),
    ]
}

fn default_concurrency_tiers() -> Vec<ConcurrencyTier> {
    [(2, 3), (5, 2), (10, 1)]
        .into_iter()
        .map(|(num_agents, messages_per_agent)| ConcurrencyTier {
            num_agents,
            messages_per_agent,
        })
        .collect()
}

fn default_expected_performance() -> BTreeMap<String, ExpectedPerformance> {
    let mut expected = BTreeMap::new();

    expected.insert(
        "niflheim-x".to_string(),
        ExpectedPerformance {
            startup_time: CeilingThreshold { max: 0.1, target: 0.05 },
            response_time: CeilingThreshold { max: 2.0, target: 1.0 },
            memory_usage: CeilingThreshold { max: 50.0, target: 30.0 },
            throughput: FloorThreshold { min: 5.0, target: 10.0 },
        },
    );

    expected.insert(
        "langchain".to_string(),
        ExpectedPerformance {
            startup_time: CeilingThreshold { max: 0.5, target: 0.2 },
            response_time: CeilingThreshold { max: 3.0, target: 1.5 },
            memory_usage: CeilingThreshold { max: 80.0, target: 50.0 },
            throughput: FloorThreshold { min: 2.0, target: 5.0 },
        },
    );

    expected
}

fn default_verify_checks() -> Vec<VerifyCheck> {
    let check = |description: &str, command: &str| VerifyCheck {
        description: description.to_string(),
        command: command.to_string(),
    };

    vec![
        check(
            "Import framework",
            "python -c 'import niflheim_x; print(f\"Niflheim_x v{niflheim_x.__version__} imported successfully\")'",
        ),
        check(
            "Import core components",
            "python -c 'from niflheim_x import Agent, DictMemory; print(\"Core components imported\")'",
        ),
        check(
            "Import LLM adapters",
            "python -c 'from niflheim_x.llms import OpenAIAdapter, AnthropicAdapter; print(\"LLM adapters imported\")'",
        ),
        check(
            "Import tool system",
            "python -c 'from niflheim_x.core.tools import tool; print(\"Tool system imported\")'",
        ),
    ]
}

impl BenchmarkConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Look up a framework colour, if configured
    /// @ai:effects pure
    pub fn color_for(&self, framework: &str) -> Option<&str> {
        self.charts.colors.get(framework).map(String::as_str)
    }
}

impl ApiConfig {
    /// @ai:intent Read the API key from the configured environment variable
    /// @ai:post returns None for unset, empty or placeholder keys
    /// @ai:effects env
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| is_usable_api_key(key))
    }
}

/// @ai:intent Check whether an API key value is usable
/// @ai:effects pure
pub fn is_usable_api_key(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && key != PLACEHOLDER_API_KEY
}

impl SelectionConfig {
    /// @ai:intent Check if a framework is selected
    /// @ai:effects pure
    pub fn includes_framework(&self, framework: &str) -> bool {
        self.frameworks
            .as_ref()
            .map(|f| f.iter().any(|name| name == framework))
            .unwrap_or(true)
    }

    /// @ai:intent Check if a category is selected
    /// @ai:effects pure
    pub fn includes_category(&self, category: Category) -> bool {
        self.categories
            .as_ref()
            .map(|c| c.contains(&category))
            .unwrap_or(true)
    }
}
