//! @ai:module:intent Benchmark samples and their aggregation
//! @ai:module:layer application
//! @ai:module:public_api BenchmarkSample, Category, SystemInfo, FrameworkSummary, MetricsAggregator

pub mod aggregator;
pub mod types;

pub use aggregator::{MetricsAggregator, MetricsAggregatorTrait};
pub use types::{
    BenchmarkSample, Category, ComparisonReport, ExpectationCheck, ExpectationStatus,
    FrameworkScore, FrameworkSummary, StartupRow, SystemInfo,
};
