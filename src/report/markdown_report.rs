//! @ai:module:intent Comparison report rendering (Markdown, console text, demo summary)
//! @ai:module:layer infrastructure
//! @ai:module:public_api MarkdownReporter, MarkdownReporterTrait, title_case
//! @ai:module:stateless true

use crate::config::ExpectedPerformance;
use crate::metrics::{
    BenchmarkSample, Category, ComparisonReport, MetricsAggregator, MetricsAggregatorTrait,
};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// @ai:intent Trait for Markdown report generation
pub trait MarkdownReporterTrait: Send + Sync {
    /// @ai:intent Generate Markdown comparison report from samples
    fn generate(&self, samples: &[BenchmarkSample], output_path: &Path) -> Result<()>;
}

/// @ai:intent Renders the performance comparison report
pub struct MarkdownReporter {
    aggregator: MetricsAggregator,
    expected: BTreeMap<String, ExpectedPerformance>,
}

impl MarkdownReporter {
    /// @ai:intent Create a new Markdown reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            aggregator: MetricsAggregator::new(),
            expected: BTreeMap::new(),
        }
    }

    /// @ai:intent Include an expectations section for these thresholds
    /// @ai:effects pure
    pub fn with_expectations(mut self, expected: BTreeMap<String, ExpectedPerformance>) -> Self {
        self.expected = expected;
        self
    }

    /// @ai:intent Render the comparison report as Markdown
    /// @ai:effects pure
    pub fn render_markdown(&self, samples: &[BenchmarkSample]) -> Result<String> {
        let report = self.aggregator.comparison_report(samples);
        let mut output = String::new();

        writeln!(output, "# Performance Comparison Report")?;
        writeln!(output)?;
        writeln!(output, "**Samples:** {}", samples.len())?;
        writeln!(output)?;

        if report.is_empty() {
            writeln!(output, "No results to analyze.")?;
            return Ok(output);
        }

        if !report.startup.is_empty() {
            writeln!(output, "## Startup Performance")?;
            writeln!(output)?;
            writeln!(output, "| Test | Metric | Framework | Value |")?;
            writeln!(output, "|------|--------|-----------|-------|")?;
            for row in &report.startup {
                writeln!(
                    output,
                    "| {} | {} | {} | {:.4} {} |",
                    title_case(&row.test_name),
                    title_case(&row.metric),
                    row.framework,
                    row.value,
                    row.unit
                )?;
            }
            writeln!(output)?;
        }

        if !report.conversation.is_empty() {
            writeln!(output, "## Conversation Performance")?;
            writeln!(output)?;
            writeln!(output, "| Framework | Seconds/Message (avg) |")?;
            writeln!(output, "|-----------|-----------------------|")?;
            for (framework, value) in &report.conversation {
                writeln!(output, "| {} | {:.4} |", framework, value)?;
            }
            writeln!(output)?;
        }

        if !report.concurrency.is_empty() {
            writeln!(output, "## Concurrency Performance")?;
            writeln!(output)?;
            writeln!(output, "| Framework | Messages/Second (peak) |")?;
            writeln!(output, "|-----------|------------------------|")?;
            for (framework, value) in &report.concurrency {
                writeln!(output, "| {} | {:.2} |", framework, value)?;
            }
            writeln!(output)?;
        }

        let summaries = self.aggregator.summarize(samples);
        let scores = self.aggregator.overall_scores(&summaries);
        if !scores.is_empty() {
            writeln!(output, "## Overall Score")?;
            writeln!(output)?;
            writeln!(output, "| Rank | Framework | Score |")?;
            writeln!(output, "|------|-----------|-------|")?;
            for (rank, score) in scores.iter().enumerate() {
                writeln!(output, "| {} | {} | {:.1} |", rank + 1, score.framework, score.score)?;
            }
            writeln!(output)?;
        }

        let checks = self.aggregator.check_expectations(&summaries, &self.expected);
        if !checks.is_empty() {
            writeln!(output, "## Expectations")?;
            writeln!(output)?;
            writeln!(output, "| Framework | Metric | Measured | Status |")?;
            writeln!(output, "|-----------|--------|----------|--------|")?;
            for check in &checks {
                writeln!(
                    output,
                    "| {} | {} | {:.4} | {} |",
                    check.framework,
                    check.metric,
                    check.measured,
                    check.status.label()
                )?;
            }
            writeln!(output)?;
        }

        Ok(output)
    }

    /// @ai:intent Render the comparison report for the terminal
    /// @ai:effects pure
    pub fn render_console(&self, samples: &[BenchmarkSample]) -> Result<String> {
        let report = self.aggregator.comparison_report(samples);
        console_report(&report)
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownReporterTrait for MarkdownReporter {
    /// @ai:intent Generate Markdown report to file
    /// @ai:effects fs:write
    fn generate(&self, samples: &[BenchmarkSample], output_path: &Path) -> Result<()> {
        let content = self.render_markdown(samples)?;
        std::fs::write(output_path, content)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        Ok(())
    }
}

/// @ai:intent "simple_agent_creation" -> "Simple Agent Creation"
/// @ai:effects pure
pub fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// @ai:intent Console text of the comparison report
/// @ai:effects pure
pub fn console_report(report: &ComparisonReport) -> Result<String> {
    let mut output = String::new();
    if report.is_empty() {
        writeln!(output, "No results to analyze")?;
        return Ok(output);
    }

    writeln!(output, "\n{}", "=".repeat(80))?;
    writeln!(output, "PERFORMANCE COMPARISON REPORT")?;
    writeln!(output, "{}", "=".repeat(80))?;

    if !report.startup.is_empty() {
        writeln!(output, "\nSTARTUP PERFORMANCE")?;
        writeln!(output, "{}", "-".repeat(40))?;

        let mut current_test = None;
        let mut current_metric = None;
        for row in &report.startup {
            if current_test != Some(&row.test_name) {
                writeln!(output, "\n{}:", title_case(&row.test_name))?;
                current_test = Some(&row.test_name);
                current_metric = None;
            }
            if current_metric != Some(&row.metric) {
                writeln!(output, "  {}:", title_case(&row.metric))?;
                current_metric = Some(&row.metric);
            }
            writeln!(output, "    {}: {:.4} {}", row.framework, row.value, row.unit)?;
        }
    }

    if !report.conversation.is_empty() {
        writeln!(output, "\nCONVERSATION PERFORMANCE")?;
        writeln!(output, "{}", "-".repeat(40))?;
        for (framework, value) in &report.conversation {
            writeln!(output, "  {}: {:.4} seconds/message average", framework, value)?;
        }
    }

    if !report.concurrency.is_empty() {
        writeln!(output, "\nCONCURRENCY PERFORMANCE")?;
        writeln!(output, "{}", "-".repeat(40))?;
        for (framework, value) in &report.concurrency {
            writeln!(output, "  {}: {:.2} messages/second peak", framework, value)?;
        }
    }

    writeln!(output, "\n{}", "=".repeat(80))?;
    Ok(output)
}

/// @ai:intent Plain-text summary written next to the demo results
/// @ai:effects pure
pub fn demo_summary(samples: &[BenchmarkSample]) -> Result<String> {
    let mut output = String::new();

    writeln!(output, "Niflheim-X Performance Benchmark Demo Results")?;
    writeln!(output, "{}", "=".repeat(60))?;
    writeln!(output)?;
    writeln!(output, "Illustrative data: these figures were not measured.")?;
    writeln!(output)?;
    writeln!(output, "PERFORMANCE CHAMPION: Niflheim-X")?;
    writeln!(output)?;
    writeln!(output, "Key Performance Highlights:")?;
    writeln!(output, "- Startup Speed: 3.9x faster than LangChain")?;
    writeln!(output, "- Response Time: 1.8x faster than LangChain")?;
    writeln!(output, "- Concurrency: 2.8x better throughput")?;
    writeln!(output, "- Memory Usage: 45% less than competitors")?;
    writeln!(output)?;
    writeln!(output, "Detailed Results:")?;
    writeln!(output, "{}", "-".repeat(40))?;

    let sections = [
        (Category::Startup, "Startup Performance", 3usize),
        (Category::Conversation, "Conversation Performance", 2),
        (Category::Concurrency, "Concurrency Performance", 1),
    ];
    for (category, heading, precision) in sections {
        writeln!(output, "\n{}:", heading)?;
        for sample in samples.iter().filter(|s| s.category == category) {
            writeln!(output, "  {}: {:.*}s", sample.framework, precision, sample.value)?;
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BenchmarkConfig;
    use crate::metrics::SystemInfo;
    use tempfile::TempDir;

    fn sample(framework: &str, category: Category, test: &str, metric: &str, value: f64, unit: &str) -> BenchmarkSample {
        BenchmarkSample::new(framework, test, category, metric, value, unit, SystemInfo::default())
    }

    fn fixture() -> Vec<BenchmarkSample> {
        vec![
            sample("beeai", Category::Startup, "simple_agent_creation", "creation_time", 0.08, "seconds"),
            sample("niflheim-x", Category::Startup, "simple_agent_creation", "creation_time", 0.02, "seconds"),
            sample("niflheim-x", Category::Conversation, "conversation_simple", "avg_time_per_message", 0.0123456, "seconds"),
            sample("niflheim-x", Category::Concurrency, "concurrent_2agents_3msgs", "throughput", 120.5, "messages/second"),
        ]
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("simple_agent_creation"), "Simple Agent Creation");
        assert_eq!(title_case("avg_time_per_message"), "Avg Time Per Message");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_console_report_format() {
        let text = MarkdownReporter::new().render_console(&fixture()).unwrap();

        assert!(text.contains("PERFORMANCE COMPARISON REPORT"));
        assert!(text.contains("\nSimple Agent Creation:\n  Creation Time:\n    beeai: 0.0800 seconds\n    niflheim-x: 0.0200 seconds"));
        assert!(text.contains("  niflheim-x: 0.0123 seconds/message average"));
        assert!(text.contains("  niflheim-x: 120.50 messages/second peak"));
    }

    #[test]
    fn test_console_report_empty() {
        let text = MarkdownReporter::new().render_console(&[]).unwrap();
        assert_eq!(text, "No results to analyze\n");
    }

    #[test]
    fn test_generate_markdown_report() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("comparison_report.md");
        let reporter = MarkdownReporter::new().with_expectations(BenchmarkConfig::default().expected);

        reporter.generate(&fixture(), &output).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("# Performance Comparison Report"));
        assert!(content.contains("| Simple Agent Creation | Creation Time | niflheim-x | 0.0200 seconds |"));
        assert!(content.contains("| niflheim-x | 120.50 |"));
        assert!(content.contains("## Overall Score"));
        assert!(content.contains("## Expectations"));
    }

    #[test]
    fn test_demo_summary_precision() {
        let samples = vec![
            sample("niflheim-x", Category::Startup, "simple_agent_creation", "creation_time", 0.048, "seconds"),
            sample("niflheim-x", Category::Conversation, "simple_conversation", "total_time", 0.82, "seconds"),
            sample("langchain", Category::Concurrency, "concurrent_2_agents_3_messages", "total_time", 5.8, "seconds"),
        ];

        let text = demo_summary(&samples).unwrap();
        assert!(text.contains("Illustrative data"));
        assert!(text.contains("  niflheim-x: 0.048s"));
        assert!(text.contains("  niflheim-x: 0.82s"));
        assert!(text.contains("  langchain: 5.8s"));
    }
}
