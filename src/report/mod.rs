//! @ai:module:intent Report generation for benchmark results
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportGenerator, JsonReporter, CsvReporter, MarkdownReporter, BenchmarkVisualizer

pub mod charts;
pub mod csv_report;
pub mod json_report;
pub mod markdown_report;

pub use charts::{BenchmarkVisualizer, Chart, ChartPalette, Panel};
pub use csv_report::{CsvReporter, CsvReporterTrait};
pub use json_report::{JsonReporter, JsonReporterTrait};
pub use markdown_report::{console_report, demo_summary, title_case, MarkdownReporter, MarkdownReporterTrait};

use crate::config::BenchmarkConfig;
use crate::metrics::BenchmarkSample;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// @ai:intent Files written by one report run
#[derive(Debug, Clone, Default)]
pub struct GeneratedReports {
    pub json: PathBuf,
    pub csv: PathBuf,
    pub markdown: PathBuf,
    pub charts: Vec<PathBuf>,
}

/// @ai:intent Combined report generator
pub struct ReportGenerator {
    json: JsonReporter,
    csv: CsvReporter,
    markdown: MarkdownReporter,
    config: BenchmarkConfig,
}

impl ReportGenerator {
    /// @ai:intent Create a report generator using chart and threshold settings from config
    /// @ai:effects pure
    pub fn new(config: BenchmarkConfig) -> Self {
        Self {
            json: JsonReporter::new(),
            csv: CsvReporter::new(),
            markdown: MarkdownReporter::new().with_expectations(config.expected.clone()),
            config,
        }
    }

    /// @ai:intent Generate JSON, CSV, Markdown and chart reports
    /// @ai:post chart failures are logged, not returned
    /// @ai:effects fs:write
    pub fn generate_all(
        &self,
        samples: &[BenchmarkSample],
        results_dir: &Path,
        charts_dir: &Path,
    ) -> Result<GeneratedReports> {
        std::fs::create_dir_all(results_dir)
            .with_context(|| format!("Failed to create {}", results_dir.display()))?;

        let reports = GeneratedReports {
            json: results_dir.join("results.json"),
            csv: results_dir.join("results.csv"),
            markdown: results_dir.join("comparison_report.md"),
            charts: self.generate_charts(samples, charts_dir),
        };

        self.json.generate(samples, &reports.json)?;
        self.csv.generate(samples, &reports.csv)?;
        self.markdown.generate(samples, &reports.markdown)?;

        info!("Reports generated in {}", results_dir.display());
        Ok(reports)
    }

    /// @ai:intent Render charts, logging instead of failing
    /// @ai:effects fs:write
    pub fn generate_charts(&self, samples: &[BenchmarkSample], charts_dir: &Path) -> Vec<PathBuf> {
        let visualizer = BenchmarkVisualizer::new(samples.to_vec(), charts_dir, self.config.charts.clone());
        match visualizer.generate_all_charts() {
            Ok(paths) => paths,
            Err(e) => {
                warn!("Chart generation failed: {:#}", e);
                Vec::new()
            }
        }
    }

    /// @ai:intent Write the Markdown comparison report only
    /// @ai:effects fs:write
    pub fn save_markdown(&self, samples: &[BenchmarkSample], output_path: &Path) -> Result<()> {
        self.markdown.generate(samples, output_path)?;
        info!("Comparison report saved to {}", output_path.display());
        Ok(())
    }

    /// @ai:intent Console text of the comparison report
    /// @ai:effects pure
    pub fn console(&self, samples: &[BenchmarkSample]) -> Result<String> {
        self.markdown.render_console(samples)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(BenchmarkConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{Category, SystemInfo};
    use tempfile::TempDir;

    #[test]
    fn test_generate_all_writes_text_reports() {
        let temp = TempDir::new().unwrap();
        let samples = vec![BenchmarkSample::new(
            "niflheim-x",
            "simple_agent_creation",
            Category::Startup,
            "creation_time",
            0.03,
            "seconds",
            SystemInfo::default(),
        )];

        let reports = ReportGenerator::default()
            .generate_all(&samples, &temp.path().join("results"), &temp.path().join("charts"))
            .unwrap();

        assert!(reports.json.exists());
        assert!(reports.csv.exists());
        let markdown = std::fs::read_to_string(&reports.markdown).unwrap();
        assert!(markdown.contains("Simple Agent Creation"));
    }

    #[test]
    fn test_generate_all_with_no_samples() {
        let temp = TempDir::new().unwrap();
        let reports = ReportGenerator::default()
            .generate_all(&[], temp.path(), &temp.path().join("charts"))
            .unwrap();

        assert!(reports.charts.is_empty());
        assert_eq!(std::fs::read_to_string(&reports.json).unwrap(), "[]");
    }
}
