//! @ai:module:intent JSON persistence of benchmark samples
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReporter, JsonReporterTrait
//! @ai:module:stateless true

use crate::metrics::BenchmarkSample;
use anyhow::{Context, Result};
use std::path::Path;

/// @ai:intent Trait for JSON report generation
pub trait JsonReporterTrait: Send + Sync {
    /// @ai:intent Write samples as a pretty-printed JSON array
    fn generate(&self, samples: &[BenchmarkSample], output_path: &Path) -> Result<()>;
}

/// @ai:intent Reads and writes results files
pub struct JsonReporter;

impl JsonReporter {
    /// @ai:intent Create a new JSON reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Load samples from a results file
    /// @ai:pre path points to a JSON array of samples
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Vec<BenchmarkSample>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read results file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse results file {}", path.display()))
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporterTrait for JsonReporter {
    /// @ai:intent Write samples to file
    /// @ai:effects fs:write
    fn generate(&self, samples: &[BenchmarkSample], output_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(samples)?;
        std::fs::write(output_path, json)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{Category, SystemInfo};
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tempfile::TempDir;

    #[test]
    fn test_samples_survive_write_and_load() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("results.json");

        let samples = vec![
            BenchmarkSample::new(
                "beeai",
                "concurrent_2agents_3msgs",
                Category::Concurrency,
                "total_time",
                0.42,
                "seconds",
                SystemInfo {
                    platform: "linux".to_string(),
                    cpu_count: 8,
                    ..Default::default()
                },
            )
            .with_data([("num_agents", Value::from(2)), ("total_messages", Value::from(6))]),
            BenchmarkSample::new(
                "beeai",
                "concurrent_2agents_3msgs",
                Category::Concurrency,
                "throughput",
                14.2,
                "messages/second",
                SystemInfo::default(),
            ),
        ];

        JsonReporter::new().generate(&samples, &output).unwrap();
        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("\"category\": \"concurrency\""));

        let loaded = JsonReporter::load(&output).unwrap();
        assert_eq!(loaded, samples);
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = JsonReporter::load(Path::new("/nonexistent/results.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read results file"));
    }
}
