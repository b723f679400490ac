//! @ai:module:intent Niflheim-X benchmark, visualization and competitive analysis library
//! @ai:module:layer application
//! @ai:module:public_api config, frameworks, suite, metrics, report, demo, analysis, usage, verify

pub mod analysis;
pub mod config;
pub mod demo;
pub mod error;
pub mod frameworks;
pub mod metrics;
pub mod monitor;
pub mod report;
pub mod suite;
pub mod usage;
pub mod verify;

pub use config::BenchmarkConfig;
pub use error::{AgentError, AgentResult};
pub use frameworks::{build_registry, AgentFramework, FrameworkRegistry};
pub use metrics::{BenchmarkSample, Category, MetricsAggregator};
pub use report::{BenchmarkVisualizer, ReportGenerator};
pub use suite::BenchmarkSuite;
