//! @ai:module:intent Framework evaluation beyond raw benchmarks
//! @ai:module:layer application
//! @ai:module:public_api CompetitiveAnalysis, PotentialAssessment, ProjectShowcase

pub mod assessment;
pub mod competitive;
pub mod showcase;

pub use assessment::{AssessmentReport, AssessmentSummary, PotentialAssessment, Scenario, ScenarioOutcome};
pub use competitive::{CompetitiveAnalysis, CompetitiveReport, CompetitiveStatus, Ranked};
pub use showcase::{ProjectShowcase, ShowcaseReport};
