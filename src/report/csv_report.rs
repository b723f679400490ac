//! @ai:module:intent CSV export of benchmark samples
//! @ai:module:layer infrastructure
//! @ai:module:public_api CsvReporter, CsvReporterTrait
//! @ai:module:stateless true

use crate::metrics::BenchmarkSample;
use anyhow::{Context, Result};
use std::fmt::Write;
use std::path::Path;

const HEADER: &str =
    "framework,test_name,category,metric,value,unit,timestamp,system_info,additional_data";

/// @ai:intent Trait for CSV report generation
pub trait CsvReporterTrait: Send + Sync {
    /// @ai:intent Write samples as CSV, one row per sample
    fn generate(&self, samples: &[BenchmarkSample], output_path: &Path) -> Result<()>;
}

/// @ai:intent Serializes samples to RFC 4180 CSV; nested maps become JSON text
pub struct CsvReporter;

impl CsvReporter {
    /// @ai:intent Create a new CSV reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Render samples to a CSV string
    /// @ai:effects pure
    pub fn render(&self, samples: &[BenchmarkSample]) -> Result<String> {
        let mut output = String::with_capacity((samples.len() + 1) * 256);
        writeln!(output, "{}", HEADER)?;

        for sample in samples {
            let system_info = serde_json::to_string(&sample.system_info)?;
            let additional_data = match &sample.additional_data {
                Some(data) => serde_json::to_string(data)?,
                None => String::new(),
            };

            let fields = [
                escape(&sample.framework),
                escape(&sample.test_name),
                escape(sample.category.as_str()),
                escape(&sample.metric),
                sample.value.to_string(),
                escape(&sample.unit),
                escape(&sample.timestamp.to_rfc3339()),
                escape(&system_info),
                escape(&additional_data),
            ];
            writeln!(output, "{}", fields.join(","))?;
        }

        Ok(output)
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvReporterTrait for CsvReporter {
    /// @ai:intent Write CSV to file
    /// @ai:effects fs:write
    fn generate(&self, samples: &[BenchmarkSample], output_path: &Path) -> Result<()> {
        let csv = self.render(samples)?;
        std::fs::write(output_path, csv)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        Ok(())
    }
}

/// @ai:intent Quote a field when it contains a delimiter, quote or line break
/// @ai:effects pure
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
