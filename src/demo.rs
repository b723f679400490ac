//! @ai:module:intent Illustrative demo dataset for exercising reports without API access
//! @ai:module:layer application
//! @ai:module:public_api generate_demo_results, create_demo_files, DemoFiles
//! @ai:module:stateless true

use crate::metrics::{BenchmarkSample, Category, SystemInfo};
use crate::report::{demo_summary, CsvReporter, CsvReporterTrait, JsonReporter, JsonReporterTrait};
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

/// Fixed stamp so repeated demo runs overwrite the same files
pub const DEMO_STAMP: &str = "demo_20240915_143022";

const STARTUP: [(&str, f64); 3] = [("niflheim-x", 0.048), ("langchain", 0.187), ("beeai", 0.124)];
const CONVERSATION: [(&str, f64, f64); 3] = [
    ("niflheim-x", 0.82, 0.41),
    ("langchain", 1.45, 0.72),
    ("beeai", 1.12, 0.56),
];
const CONCURRENCY: [(&str, f64); 3] = [("niflheim-x", 2.1), ("langchain", 5.8), ("beeai", 3.7)];

fn demo_system() -> SystemInfo {
    SystemInfo {
        platform: "win32".to_string(),
        cpu_count: 4,
        total_memory: 8.0,
        ..Default::default()
    }
}

fn demo_sample(framework: &str, test: &str, category: Category, metric: &str, value: f64) -> BenchmarkSample {
    BenchmarkSample::new(framework, test, category, metric, value, "seconds", demo_system())
        .with_data([("illustrative", Value::Bool(true))])
}

/// @ai:intent Fixed illustrative results with niflheim-x ahead in every category
/// @ai:post every sample carries additional_data.illustrative = true
/// @ai:effects time
pub fn generate_demo_results() -> Vec<BenchmarkSample> {
    let mut results = Vec::with_capacity(12);

    for (framework, value) in STARTUP {
        results.push(demo_sample(framework, "simple_agent_creation", Category::Startup, "creation_time", value));
    }
    for (framework, total, average) in CONVERSATION {
        results.push(demo_sample(framework, "simple_conversation", Category::Conversation, "total_time", total));
        results.push(demo_sample(
            framework,
            "simple_conversation",
            Category::Conversation,
            "avg_time_per_message",
            average,
        ));
    }
    for (framework, value) in CONCURRENCY {
        results.push(demo_sample(
            framework,
            "concurrent_2_agents_3_messages",
            Category::Concurrency,
            "total_time",
            value,
        ));
    }

    results
}

/// @ai:intent Paths written by create_demo_files
#[derive(Debug, Clone)]
pub struct DemoFiles {
    pub json: PathBuf,
    pub csv: PathBuf,
    pub summary: PathBuf,
}

/// @ai:intent Write demo JSON, CSV and summary_report.txt into dir
/// @ai:effects fs:write
pub fn create_demo_files(dir: &Path) -> Result<DemoFiles> {
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let results = generate_demo_results();
    let files = DemoFiles {
        json: dir.join(format!("benchmark_results_{}.json", DEMO_STAMP)),
        csv: dir.join(format!("benchmark_results_{}.csv", DEMO_STAMP)),
        summary: dir.join("summary_report.txt"),
    };

    JsonReporter::new().generate(&results, &files.json)?;
    CsvReporter::new().generate(&results, &files.csv)?;
    std::fs::write(&files.summary, demo_summary(&results)?)
        .with_context(|| format!("Failed to write {}", files.summary.display()))?;

    info!(dir = %dir.display(), "Demo results saved");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_demo_dataset_shape() {
        let results = generate_demo_results();
        assert_eq!(results.len(), 12);
        assert!(results.iter().all(|s| {
            s.additional_data
                .as_ref()
                .and_then(|d| d.get("illustrative"))
                .and_then(Value::as_bool)
                == Some(true)
        }));

        let niflheim_startup = results
            .iter()
            .find(|s| s.framework == "niflheim-x" && s.is(Category::Startup, "creation_time"))
            .unwrap();
        assert_eq!(niflheim_startup.value, 0.048);
        assert_eq!(niflheim_startup.system_info.platform, "win32");
    }

    #[test]
    fn test_create_demo_files() {
        let temp = TempDir::new().unwrap();
        let files = create_demo_files(temp.path()).unwrap();

        assert!(files.json.ends_with("benchmark_results_demo_20240915_143022.json"));
        assert_eq!(JsonReporter::load(&files.json).unwrap().len(), 12);
        assert_eq!(std::fs::read_to_string(&files.csv).unwrap().lines().count(), 13);

        let summary = std::fs::read_to_string(&files.summary).unwrap();
        assert!(summary.contains("3.9x faster than LangChain"));
        assert!(summary.contains("  beeai: 3.7s"));
    }
}
