//! @ai:module:intent Statistical aggregation for benchmark samples
//! @ai:module:layer application
//! @ai:module:public_api MetricsAggregator, MetricsAggregatorTrait
//! @ai:module:stateless true

use crate::config::{CeilingThreshold, ExpectedPerformance, FloorThreshold};
use crate::metrics::types::{
    BenchmarkSample, Category, ComparisonReport, ExpectationCheck, ExpectationStatus,
    FrameworkScore, FrameworkSummary, StartupRow,
};
use std::collections::BTreeMap;

/// @ai:intent Trait for metrics aggregation
pub trait MetricsAggregatorTrait: Send + Sync {
    /// @ai:intent Summarize samples per framework
    fn summarize(&self, samples: &[BenchmarkSample]) -> Vec<FrameworkSummary>;

    /// @ai:intent Build the comparison report data
    fn comparison_report(&self, samples: &[BenchmarkSample]) -> ComparisonReport;
}

/// @ai:intent Aggregates benchmark samples into per-framework summaries
pub struct MetricsAggregator;

impl MetricsAggregator {
    /// @ai:intent Create a new metrics aggregator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Compute weighted overall scores, best first
    /// @ai:post terms without data contribute nothing
    /// @ai:effects pure
    pub fn overall_scores(&self, summaries: &[FrameworkSummary]) -> Vec<FrameworkScore> {
        let mut scores: Vec<_> = summaries
            .iter()
            .map(|s| {
                let mut score = 0.0;
                if let Some(startup) = s.avg_startup_time {
                    score += 30.0 / (startup + 0.001);
                }
                if let Some(response) = s.avg_response_time {
                    score += 40.0 / (response + 0.001);
                }
                if let Some(throughput) = s.peak_throughput {
                    score += throughput * 30.0;
                }
                FrameworkScore {
                    framework: s.framework.clone(),
                    score,
                }
            })
            .collect();

        scores.sort_by(|a, b| b.score.total_cmp(&a.score));
        scores
    }

    /// @ai:intent Compare summaries against configured thresholds
    /// @ai:post frameworks without thresholds or data are omitted
    /// @ai:effects pure
    pub fn check_expectations(
        &self,
        summaries: &[FrameworkSummary],
        expected: &BTreeMap<String, ExpectedPerformance>,
    ) -> Vec<ExpectationCheck> {
        let mut checks = Vec::new();

        for summary in summaries {
            let Some(thresholds) = expected.get(&summary.framework) else {
                continue;
            };

            let ceilings = [
                ("startup_time", summary.avg_startup_time, thresholds.startup_time),
                ("response_time", summary.avg_response_time, thresholds.response_time),
                ("memory_usage", summary.avg_memory_usage, thresholds.memory_usage),
            ];
            for (metric, measured, threshold) in ceilings {
                if let Some(measured) = measured {
                    checks.push(ExpectationCheck {
                        framework: summary.framework.clone(),
                        metric: metric.to_string(),
                        measured,
                        status: classify_ceiling(measured, threshold),
                    });
                }
            }

            if let Some(measured) = summary.peak_throughput {
                checks.push(ExpectationCheck {
                    framework: summary.framework.clone(),
                    metric: "throughput".to_string(),
                    measured,
                    status: classify_floor(measured, thresholds.throughput),
                });
            }
        }

        checks
    }
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// @ai:intent Calculate average of an iterator of f64
/// @ai:effects pure
fn average<I: Iterator<Item = f64>>(iter: I) -> Option<f64> {
    let (sum, count) = iter.fold((0.0, 0u32), |(s, c), v| (s + v, c + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// @ai:intent Classify a lower-is-better measurement
/// @ai:effects pure
fn classify_ceiling(measured: f64, threshold: CeilingThreshold) -> ExpectationStatus {
    if measured <= threshold.target {
        ExpectationStatus::MeetsTarget
    } else if measured <= threshold.max {
        ExpectationStatus::WithinLimit
    } else {
        ExpectationStatus::ExceedsLimit
    }
}

/// @ai:intent Classify a higher-is-better measurement
/// @ai:effects pure
fn classify_floor(measured: f64, threshold: FloorThreshold) -> ExpectationStatus {
    if measured >= threshold.target {
        ExpectationStatus::MeetsTarget
    } else if measured >= threshold.min {
        ExpectationStatus::WithinLimit
    } else {
        ExpectationStatus::ExceedsLimit
    }
}

/// @ai:intent Group samples by framework name, sorted
/// @ai:effects pure
fn by_framework(samples: &[BenchmarkSample]) -> BTreeMap<&str, Vec<&BenchmarkSample>> {
    let mut grouped: BTreeMap<&str, Vec<&BenchmarkSample>> = BTreeMap::new();
    for sample in samples {
        grouped.entry(sample.framework.as_str()).or_default().push(sample);
    }
    grouped
}

/// @ai:intent Values of one category/metric pair within a sample group
/// @ai:effects pure
fn values<'a>(
    samples: &'a [&'a BenchmarkSample],
    category: Category,
    metric: &'a str,
) -> impl Iterator<Item = f64> + 'a {
    samples
        .iter()
        .filter(move |s| s.is(category, metric))
        .map(|s| s.value)
}

impl MetricsAggregatorTrait for MetricsAggregator {
    /// @ai:intent Summarize samples per framework, sorted by name
    /// @ai:effects pure
    fn summarize(&self, samples: &[BenchmarkSample]) -> Vec<FrameworkSummary> {
        by_framework(samples)
            .into_iter()
            .map(|(framework, group)| FrameworkSummary {
                framework: framework.to_string(),
                avg_startup_time: average(values(&group, Category::Startup, "creation_time")),
                avg_response_time: average(values(
                    &group,
                    Category::Conversation,
                    "avg_time_per_message",
                )),
                peak_throughput: values(&group, Category::Concurrency, "throughput")
                    .reduce(f64::max),
                avg_memory_usage: average(values(&group, Category::Concurrency, "memory_usage")),
            })
            .collect()
    }

    /// @ai:intent Build the comparison report data
    /// @ai:effects pure
    fn comparison_report(&self, samples: &[BenchmarkSample]) -> ComparisonReport {
        let mut startup: BTreeMap<(&str, &str, &str), (Vec<f64>, &str)> = BTreeMap::new();
        for sample in samples.iter().filter(|s| s.category == Category::Startup) {
            startup
                .entry((
                    sample.test_name.as_str(),
                    sample.metric.as_str(),
                    sample.framework.as_str(),
                ))
                .or_insert_with(|| (Vec::new(), sample.unit.as_str()))
                .0
                .push(sample.value);
        }

        let startup = startup
            .into_iter()
            .filter_map(|((test_name, metric, framework), (vals, unit))| {
                average(vals.into_iter()).map(|value| StartupRow {
                    test_name: test_name.to_string(),
                    metric: metric.to_string(),
                    framework: framework.to_string(),
                    value,
                    unit: unit.to_string(),
                })
            })
            .collect();

        let summaries = self.summarize(samples);
        let conversation = summaries
            .iter()
            .filter_map(|s| s.avg_response_time.map(|v| (s.framework.clone(), v)))
            .collect();
        let concurrency = summaries
            .iter()
            .filter_map(|s| s.peak_throughput.map(|v| (s.framework.clone(), v)))
            .collect();

        ComparisonReport {
            startup,
            conversation,
            concurrency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::types::SystemInfo;
    use pretty_assertions::assert_eq;

    fn sample(framework: &str, category: Category, test: &str, metric: &str, value: f64) -> BenchmarkSample {
        BenchmarkSample::new(framework, test, category, metric, value, "seconds", SystemInfo::default())
    }

    fn fixture() -> Vec<BenchmarkSample> {
        vec![
            sample("niflheim-x", Category::Startup, "simple_agent_creation", "creation_time", 0.04),
            sample("niflheim-x", Category::Startup, "memory_agent_creation", "creation_time", 0.05),
            sample("niflheim-x", Category::Conversation, "conversation_simple", "avg_time_per_message", 0.4),
            sample("niflheim-x", Category::Concurrency, "concurrent_2agents_3msgs", "throughput", 8.0),
            sample("niflheim-x", Category::Concurrency, "concurrent_5agents_2msgs", "throughput", 12.0),
            sample("niflheim-x", Category::Concurrency, "concurrent_5agents_2msgs", "memory_usage", 20.0),
            sample("langchain", Category::Startup, "simple_agent_creation", "creation_time", 0.2),
            sample("langchain", Category::Conversation, "conversation_simple", "avg_time_per_message", 0.7),
            sample("langchain", Category::Conversation, "conversation_medium", "avg_time_per_message", 0.9),
        ]
    }

    #[test]
    fn test_average() {
        let values = vec![10.0, 20.0, 30.0];
        assert!((average(values.into_iter()).unwrap() - 20.0).abs() < 0.01);
    }

    #[test]
    fn test_average_empty() {
        let values: Vec<f64> = vec![];
        assert_eq!(average(values.into_iter()), None);
    }

    #[test]
    fn test_summarize_sorted_by_name() {
        let summaries = MetricsAggregator::new().summarize(&fixture());

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].framework, "langchain");
        assert!((summaries[0].avg_response_time.unwrap() - 0.8).abs() < 1e-9);
        assert_eq!(summaries[0].peak_throughput, None);

        let nx = &summaries[1];
        assert!((nx.avg_startup_time.unwrap() - 0.045).abs() < 1e-9);
        assert_eq!(nx.peak_throughput, Some(12.0));
        assert_eq!(nx.avg_memory_usage, Some(20.0));
    }

    #[test]
    fn test_overall_scores_skip_missing_terms() {
        let summaries = vec![
            FrameworkSummary {
                framework: "a".to_string(),
                avg_startup_time: Some(0.099),
                avg_response_time: None,
                peak_throughput: Some(2.0),
                avg_memory_usage: None,
            },
            FrameworkSummary {
                framework: "b".to_string(),
                avg_response_time: Some(0.999),
                ..Default::default()
            },
        ];

        let scores = MetricsAggregator::new().overall_scores(&summaries);
        assert_eq!(scores[0].framework, "a");
        assert!((scores[0].score - 360.0).abs() < 1e-6);
        assert!((scores[1].score - 40.0).abs() < 1e-6);
    }

    #[test]
    fn test_check_expectations() {
        let aggregator = MetricsAggregator::new();
        let summaries = aggregator.summarize(&fixture());
        let expected = crate::config::BenchmarkConfig::default().expected;

        let checks = aggregator.check_expectations(&summaries, &expected);
        let status = |fw: &str, metric: &str| {
            checks
                .iter()
                .find(|c| c.framework == fw && c.metric == metric)
                .map(|c| c.status)
        };

        assert_eq!(status("niflheim-x", "startup_time"), Some(ExpectationStatus::MeetsTarget));
        assert_eq!(status("niflheim-x", "throughput"), Some(ExpectationStatus::MeetsTarget));
        assert_eq!(status("niflheim-x", "memory_usage"), Some(ExpectationStatus::MeetsTarget));
        assert_eq!(status("langchain", "startup_time"), Some(ExpectationStatus::MeetsTarget));
        assert_eq!(status("langchain", "throughput"), None);
    }

    #[test]
    fn test_classify_thresholds() {
        let ceiling = CeilingThreshold { max: 2.0, target: 1.0 };
        assert_eq!(classify_ceiling(1.5, ceiling), ExpectationStatus::WithinLimit);
        assert_eq!(classify_ceiling(2.5, ceiling), ExpectationStatus::ExceedsLimit);

        let floor = FloorThreshold { min: 5.0, target: 10.0 };
        assert_eq!(classify_floor(6.0, floor), ExpectationStatus::WithinLimit);
        assert_eq!(classify_floor(4.0, floor), ExpectationStatus::ExceedsLimit);
    }

    #[test]
    fn test_comparison_report() {
        let report = MetricsAggregator::new().comparison_report(&fixture());

        assert_eq!(report.startup.len(), 3);
        assert_eq!(report.startup[0].test_name, "memory_agent_creation");
        assert_eq!(report.conversation.len(), 2);
        assert_eq!(report.concurrency, vec![("niflheim-x".to_string(), 12.0)]);
    }
}
