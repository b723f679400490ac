//! @ai:module:intent Measurement record and summary types
//! @ai:module:layer domain
//! @ai:module:public_api BenchmarkSample, Category, SystemInfo, FrameworkSummary, ComparisonReport, ExpectationCheck, ExpectationStatus
//! @ai:module:stateless true

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// @ai:intent Benchmark category
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Startup,
    Conversation,
    Concurrency,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Startup,
        Category::Conversation,
        Category::Concurrency,
    ];

    /// @ai:intent Convert category to string representation
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Startup => "startup",
            Category::Conversation => "conversation",
            Category::Concurrency => "concurrency",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "startup" => Ok(Category::Startup),
            "conversation" => Ok(Category::Conversation),
            "concurrency" => Ok(Category::Concurrency),
            other => Err(format!(
                "unknown category '{}' (expected startup, conversation or concurrency)",
                other
            )),
        }
    }
}

/// @ai:intent Host description attached to every sample
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub arch: String,
    #[serde(default)]
    pub cpu_count: usize,
    /// GB
    #[serde(default)]
    pub total_memory: f64,
    /// GB
    #[serde(default)]
    pub available_memory: f64,
    #[serde(default)]
    pub harness_version: String,
}

/// @ai:intent One timestamped (framework, metric, value) measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSample {
    pub framework: String,
    pub test_name: String,
    pub category: Category,
    pub metric: String,
    pub value: f64,
    pub unit: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub system_info: SystemInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<Map<String, Value>>,
}

impl BenchmarkSample {
    /// @ai:intent Create a sample stamped with the current time
    /// @ai:effects time
    pub fn new(
        framework: impl Into<String>,
        test_name: impl Into<String>,
        category: Category,
        metric: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
        system_info: SystemInfo,
    ) -> Self {
        Self {
            framework: framework.into(),
            test_name: test_name.into(),
            category,
            metric: metric.into(),
            value,
            unit: unit.into(),
            timestamp: Utc::now(),
            system_info,
            additional_data: None,
        }
    }

    /// @ai:intent Attach extra fields to the sample
    /// @ai:effects pure
    pub fn with_data<I, K>(mut self, data: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let map = self.additional_data.get_or_insert_with(Map::new);
        for (key, value) in data {
            map.insert(key.into(), value);
        }
        self
    }

    /// @ai:intent Check whether the sample matches a category and metric
    /// @ai:effects pure
    pub fn is(&self, category: Category, metric: &str) -> bool {
        self.category == category && self.metric == metric
    }
}

/// @ai:intent Per-framework averages used by reports and scoring
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameworkSummary {
    pub framework: String,
    /// Mean startup creation time in seconds
    pub avg_startup_time: Option<f64>,
    /// Mean conversation time per message in seconds
    pub avg_response_time: Option<f64>,
    /// Highest concurrency throughput in messages/second
    pub peak_throughput: Option<f64>,
    /// Mean memory delta across concurrency runs in MB
    pub avg_memory_usage: Option<f64>,
}

/// @ai:intent Weighted overall score for one framework
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkScore {
    pub framework: String,
    pub score: f64,
}

/// @ai:intent Startup table row: one framework's value for a test/metric pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartupRow {
    pub test_name: String,
    pub metric: String,
    pub framework: String,
    pub value: f64,
    pub unit: String,
}

/// @ai:intent Data behind the console/markdown comparison report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub startup: Vec<StartupRow>,
    /// (framework, mean seconds per message)
    pub conversation: Vec<(String, f64)>,
    /// (framework, peak messages per second)
    pub concurrency: Vec<(String, f64)>,
}

impl ComparisonReport {
    /// @ai:intent Check whether the report has any content
    /// @ai:effects pure
    pub fn is_empty(&self) -> bool {
        self.startup.is_empty() && self.conversation.is_empty() && self.concurrency.is_empty()
    }
}

/// @ai:intent Outcome of comparing a measurement with its threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectationStatus {
    MeetsTarget,
    WithinLimit,
    ExceedsLimit,
}

impl ExpectationStatus {
    /// @ai:intent Human readable label
    /// @ai:effects pure
    pub fn label(&self) -> &'static str {
        match self {
            ExpectationStatus::MeetsTarget => "meets target",
            ExpectationStatus::WithinLimit => "within limit",
            ExpectationStatus::ExceedsLimit => "exceeds limit",
        }
    }
}

/// @ai:intent One expectation check result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectationCheck {
    pub framework: String,
    pub metric: String,
    pub measured: f64,
    pub status: ExpectationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!("Startup".parse::<Category>().unwrap(), Category::Startup);
        assert_eq!(" concurrency ".parse::<Category>().unwrap(), Category::Concurrency);
        assert!("memory".parse::<Category>().is_err());
    }

    #[test]
    fn test_sample_with_data() {
        let sample = BenchmarkSample::new(
            "beeai",
            "conversation_simple",
            Category::Conversation,
            "total_time",
            0.5,
            "seconds",
            SystemInfo::default(),
        )
        .with_data([("message_count", Value::from(3))]);

        let data = sample.additional_data.as_ref().unwrap();
        assert_eq!(data["message_count"], 3);
        assert!(sample.is(Category::Conversation, "total_time"));
        assert!(!sample.is(Category::Startup, "total_time"));
    }

    #[test]
    fn test_sample_reads_sparse_json() {
        let json = r#"{
            "framework": "langchain",
            "test_name": "simple_agent_creation",
            "category": "startup",
            "metric": "creation_time",
            "value": 0.187,
            "unit": "seconds",
            "timestamp": "2024-09-15T14:30:22Z",
            "system_info": {"platform": "win32", "cpu_count": 4}
        }"#;

        let sample: BenchmarkSample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.category, Category::Startup);
        assert_eq!(sample.system_info.cpu_count, 4);
        assert!(sample.additional_data.is_none());
    }
}
