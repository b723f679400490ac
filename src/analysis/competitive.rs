//! @ai:module:intent Weighted competitive comparison over hand-scored framework tables
//! @ai:module:layer application
//! @ai:module:public_api CompetitiveAnalysis, CompetitiveReport, CompetitiveStatus, Ranked
//! @ai:module:stateless true
//!
//! The tables below are illustrative estimates, not measurements. Every saved
//! report carries `"data_source": "illustrative"`.

use crate::report::title_case;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};
use tracing::info;

pub const SUBJECT: &str = "niflheim_x";

/// @ai:intent Static description of a compared framework
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Competitor {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub target_market: &'static str,
}

pub const COMPETITORS: [Competitor; 5] = [
    Competitor {
        key: "niflheim_x",
        name: "Niflheim-X",
        description: "Lightweight, composable Agent Orchestration Framework",
        category: "Agent Framework",
        target_market: "Enterprise & Developers",
    },
    Competitor {
        key: "langchain",
        name: "LangChain",
        description: "Framework for developing applications with LLMs",
        category: "LLM Framework",
        target_market: "Developers & Researchers",
    },
    Competitor {
        key: "autogen",
        name: "AutoGen",
        description: "Multi-agent conversation framework",
        category: "Multi-Agent Framework",
        target_market: "Researchers & Advanced Users",
    },
    Competitor {
        key: "crewai",
        name: "CrewAI",
        description: "Framework for orchestrating role-playing AI agents",
        category: "Agent Framework",
        target_market: "Business Users",
    },
    Competitor {
        key: "semantic_kernel",
        name: "Semantic Kernel",
        description: "SDK for integrating AI into applications",
        category: "AI SDK",
        target_market: "Enterprise Developers",
    },
];

/// @ai:intent Performance figures per framework (seconds, MB, msg/s, /10)
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PerformanceFigures {
    pub startup_time: f64,
    pub memory_usage: f64,
    pub response_time: f64,
    pub throughput: f64,
    pub concurrency_score: f64,
}

const PERFORMANCE: [PerformanceFigures; 5] = [
    PerformanceFigures { startup_time: 0.048, memory_usage: 28.0, response_time: 0.82, throughput: 12.5, concurrency_score: 9.2 },
    PerformanceFigures { startup_time: 0.187, memory_usage: 65.0, response_time: 1.45, throughput: 4.2, concurrency_score: 5.8 },
    PerformanceFigures { startup_time: 0.156, memory_usage: 52.0, response_time: 1.28, throughput: 6.1, concurrency_score: 6.5 },
    PerformanceFigures { startup_time: 0.124, memory_usage: 45.0, response_time: 1.12, throughput: 8.1, concurrency_score: 7.2 },
    PerformanceFigures { startup_time: 0.095, memory_usage: 38.0, response_time: 0.98, throughput: 9.8, concurrency_score: 8.1 },
];

/// Scores in COMPETITORS order
type ScoreTable<const N: usize> = [(&'static str, [u32; 5]); N];

const FEATURES: ScoreTable<8> = [
    ("agent_creation", [10, 8, 9, 8, 7]),
    ("memory_systems", [9, 7, 6, 7, 8]),
    ("tool_integration", [10, 9, 7, 8, 9]),
    ("multi_agent_support", [8, 6, 10, 9, 7]),
    ("llm_compatibility", [9, 10, 8, 7, 8]),
    ("enterprise_features", [9, 6, 5, 6, 9]),
    ("developer_experience", [10, 7, 6, 8, 8]),
    ("documentation", [9, 9, 7, 7, 8]),
];

/// setup_complexity and learning_curve are lower-is-better
const EASE_OF_USE: ScoreTable<5> = [
    ("setup_complexity", [2, 4, 5, 3, 4]),
    ("learning_curve", [3, 6, 8, 4, 5]),
    ("code_readability", [9, 6, 5, 7, 7]),
    ("example_quality", [9, 8, 6, 7, 7]),
    ("community_support", [6, 10, 7, 6, 8]),
];

const DEVELOPER_EXPERIENCE: ScoreTable<5> = [
    ("api_design", [9, 6, 5, 7, 7]),
    ("debugging_support", [8, 6, 4, 6, 7]),
    ("testing_framework", [8, 5, 4, 5, 6]),
    ("deployment_ease", [9, 6, 5, 7, 8]),
    ("performance_monitoring", [8, 5, 3, 5, 7]),
];

const ENTERPRISE_READINESS: ScoreTable<6> = [
    ("security_features", [8, 6, 5, 6, 9]),
    ("scalability", [9, 6, 6, 7, 8]),
    ("compliance_support", [8, 5, 4, 5, 9]),
    ("support_availability", [7, 8, 6, 6, 9]),
    ("integration_capabilities", [9, 8, 5, 7, 9]),
    ("monitoring_observability", [8, 5, 3, 5, 8]),
];

/// @ai:intent Market positioning notes per framework
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Positioning {
    pub market_segment: &'static str,
    pub key_differentiator: &'static str,
    pub pricing_model: &'static str,
    pub competitive_advantage: &'static str,
}

const POSITIONING: [Positioning; 5] = [
    Positioning {
        market_segment: "Enterprise AI Applications",
        key_differentiator: "Performance + Simplicity",
        pricing_model: "Open Source + Enterprise Support",
        competitive_advantage: "Fastest, most developer-friendly",
    },
    Positioning {
        market_segment: "LLM Application Development",
        key_differentiator: "Comprehensive LLM ecosystem",
        pricing_model: "Open Source + LangSmith SaaS",
        competitive_advantage: "Largest ecosystem and community",
    },
    Positioning {
        market_segment: "Multi-Agent Research",
        key_differentiator: "Advanced multi-agent conversations",
        pricing_model: "Open Source (Microsoft)",
        competitive_advantage: "Sophisticated agent interactions",
    },
    Positioning {
        market_segment: "Business Process Automation",
        key_differentiator: "Role-based agent collaboration",
        pricing_model: "Open Source + SaaS Platform",
        competitive_advantage: "Business-friendly abstractions",
    },
    Positioning {
        market_segment: "Enterprise AI Integration",
        key_differentiator: "Microsoft ecosystem integration",
        pricing_model: "Open Source (Microsoft)",
        competitive_advantage: "Enterprise Microsoft integration",
    },
];

const WEIGHT_PERFORMANCE: f64 = 0.25;
const WEIGHT_FEATURES: f64 = 0.20;
const WEIGHT_EASE: f64 = 0.15;
const WEIGHT_DX: f64 = 0.20;
const WEIGHT_ENTERPRISE: f64 = 0.20;

const UNIQUE_POSITION: [&str; 3] = [
    "Combines enterprise performance with developer simplicity",
    "Fills gap between research frameworks and production needs",
    "Optimal for AI-first applications requiring speed and scale",
];

const KEY_ADVANTAGES: [&str; 5] = [
    "Superior performance metrics",
    "Excellent developer experience",
    "Enterprise-ready features",
    "Clean, intuitive API design",
    "Optimal balance of power and simplicity",
];

const GROWTH_OPPORTUNITIES: [&str; 4] = [
    "Expand community and ecosystem",
    "Increase documentation and tutorials",
    "Build enterprise partnerships",
    "Enhance LLM provider integrations",
];

pub const FEATURE_MAX: u32 = 80;
pub const EASE_MAX: u32 = 35;
pub const DX_MAX: u32 = 50;
pub const ENTERPRISE_MAX: u32 = 60;

/// @ai:intent A framework with its score in one dimension
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked {
    pub key: &'static str,
    pub name: &'static str,
    pub score: f64,
}

/// @ai:intent Market position derived from the overall rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitiveStatus {
    MarketLeader,
    StrongCompetitor,
    EmergingPlayer,
}

impl CompetitiveStatus {
    /// @ai:intent #1 leads, #2 competes, anything lower is emerging
    /// @ai:effects pure
    pub fn from_rank(rank: usize) -> Self {
        match rank {
            1 => CompetitiveStatus::MarketLeader,
            2 => CompetitiveStatus::StrongCompetitor,
            _ => CompetitiveStatus::EmergingPlayer,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompetitiveStatus::MarketLeader => "MARKET LEADER",
            CompetitiveStatus::StrongCompetitor => "STRONG COMPETITOR",
            CompetitiveStatus::EmergingPlayer => "EMERGING PLAYER",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RankEntry {
    pub rank: usize,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailedMetrics {
    pub performance: BTreeMap<&'static str, PerformanceFigures>,
    pub features: BTreeMap<&'static str, BTreeMap<&'static str, u32>>,
    pub ease_of_use: BTreeMap<&'static str, BTreeMap<&'static str, u32>>,
    pub positioning: BTreeMap<&'static str, Positioning>,
    pub developer_experience: BTreeMap<&'static str, BTreeMap<&'static str, u32>>,
    pub enterprise_readiness: BTreeMap<&'static str, BTreeMap<&'static str, u32>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompetitiveSummary {
    pub niflheim_x_position: usize,
    pub niflheim_x_score: f64,
    pub status: CompetitiveStatus,
    pub total_frameworks_analyzed: usize,
}

/// @ai:intent Serialized competitive_analysis.json
#[derive(Debug, Clone, Serialize)]
pub struct CompetitiveReport {
    pub data_source: &'static str,
    pub overall_rankings: BTreeMap<&'static str, RankEntry>,
    pub detailed_metrics: DetailedMetrics,
    pub competitive_summary: CompetitiveSummary,
}

/// @ai:intent Scores the framework tables per dimension and overall
pub struct CompetitiveAnalysis;

impl CompetitiveAnalysis {
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Framework order per performance metric, best first
    /// @ai:effects pure
    pub fn performance_rankings(&self) -> Vec<(&'static str, Vec<&'static str>)> {
        let metrics: [(&str, fn(&PerformanceFigures) -> f64, bool); 5] = [
            ("startup_time", |p| p.startup_time, true),
            ("memory_usage", |p| p.memory_usage, true),
            ("response_time", |p| p.response_time, true),
            ("throughput", |p| p.throughput, false),
            ("concurrency_score", |p| p.concurrency_score, false),
        ];

        metrics
            .into_iter()
            .map(|(metric, value, lower_is_better)| {
                let mut order: Vec<usize> = (0..COMPETITORS.len()).collect();
                order.sort_by(|&a, &b| {
                    let ordering = value(&PERFORMANCE[a]).total_cmp(&value(&PERFORMANCE[b]));
                    if lower_is_better {
                        ordering
                    } else {
                        ordering.reverse()
                    }
                });
                (metric, order.into_iter().map(|i| COMPETITORS[i].key).collect())
            })
            .collect()
    }

    /// @ai:intent Inverse-rank points summed over performance metrics
    /// @ai:post maximum is metrics x frameworks
    /// @ai:effects pure
    pub fn performance_scores(&self) -> Vec<Ranked> {
        let rankings = self.performance_rankings();
        let n = COMPETITORS.len();
        sorted(COMPETITORS.iter().map(|c| {
            let points: usize = rankings
                .iter()
                .filter_map(|(_, order)| order.iter().position(|k| *k == c.key))
                .map(|position| n - position)
                .sum();
            (c, points as f64)
        }))
    }

    /// @ai:intent Sum of feature scores, out of 80
    /// @ai:effects pure
    pub fn feature_totals(&self) -> Vec<Ranked> {
        sorted(COMPETITORS.iter().enumerate().map(|(i, c)| (c, column_sum(&FEATURES, i) as f64)))
    }

    /// @ai:intent (6 - setup) + (9 - learning) + readability + examples + community, out of 35
    /// @ai:effects pure
    pub fn ease_scores(&self) -> Vec<Ranked> {
        sorted(COMPETITORS.iter().enumerate().map(|(i, c)| (c, ease_score(i) as f64)))
    }

    /// @ai:intent Sum of developer experience scores, out of 50
    /// @ai:effects pure
    pub fn developer_experience_totals(&self) -> Vec<Ranked> {
        sorted(COMPETITORS.iter().enumerate().map(|(i, c)| (c, column_sum(&DEVELOPER_EXPERIENCE, i) as f64)))
    }

    /// @ai:intent Sum of enterprise readiness scores, out of 60
    /// @ai:effects pure
    pub fn enterprise_totals(&self) -> Vec<Ranked> {
        sorted(COMPETITORS.iter().enumerate().map(|(i, c)| (c, column_sum(&ENTERPRISE_READINESS, i) as f64)))
    }

    /// @ai:intent Features the subject scores 9 or more on
    /// @ai:effects pure
    pub fn subject_strengths(&self) -> Vec<String> {
        FEATURES
            .iter()
            .filter(|(_, scores)| scores[0] >= 9)
            .map(|(feature, _)| title_case(feature))
            .collect()
    }

    /// @ai:intent Weighted overall score per framework, best first
    /// @ai:effects pure
    pub fn final_rankings(&self) -> Vec<Ranked> {
        sorted(COMPETITORS.iter().enumerate().map(|(i, c)| {
            let p = &PERFORMANCE[i];
            let performance = (1.0 / p.startup_time) * 0.2
                + (1.0 / p.memory_usage) * 0.2
                + (1.0 / p.response_time) * 0.2
                + p.throughput * 0.2
                + p.concurrency_score * 0.2;

            let percent = |score: u32, max: u32| score as f64 / max as f64 * 100.0;
            let score = performance * WEIGHT_PERFORMANCE
                + percent(column_sum(&FEATURES, i), FEATURE_MAX) * WEIGHT_FEATURES
                + percent(ease_score(i), EASE_MAX) * WEIGHT_EASE
                + percent(column_sum(&DEVELOPER_EXPERIENCE, i), DX_MAX) * WEIGHT_DX
                + percent(column_sum(&ENTERPRISE_READINESS, i), ENTERPRISE_MAX) * WEIGHT_ENTERPRISE;
            (c, score)
        }))
    }

    /// @ai:intent Build the serializable report
    /// @ai:effects pure
    pub fn report(&self) -> CompetitiveReport {
        let rankings = self.final_rankings();
        let position = rank_of(&rankings, SUBJECT);
        let score = rankings
            .iter()
            .find(|r| r.key == SUBJECT)
            .map_or(0.0, |r| r.score);

        CompetitiveReport {
            data_source: "illustrative",
            overall_rankings: rankings
                .iter()
                .enumerate()
                .map(|(i, r)| (r.key, RankEntry { rank: i + 1, score: r.score }))
                .collect(),
            detailed_metrics: DetailedMetrics {
                performance: COMPETITORS.iter().map(|c| c.key).zip(PERFORMANCE).collect(),
                features: table_map(&FEATURES),
                ease_of_use: table_map(&EASE_OF_USE),
                positioning: COMPETITORS.iter().map(|c| c.key).zip(POSITIONING).collect(),
                developer_experience: table_map(&DEVELOPER_EXPERIENCE),
                enterprise_readiness: table_map(&ENTERPRISE_READINESS),
            },
            competitive_summary: CompetitiveSummary {
                niflheim_x_position: position,
                niflheim_x_score: score,
                status: CompetitiveStatus::from_rank(position),
                total_frameworks_analyzed: COMPETITORS.len(),
            },
        }
    }

    /// @ai:intent Console rendering of every dimension and the final ranking
    /// @ai:effects pure
    pub fn render_console(&self) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "NIFLHEIM-X COMPETITIVE ANALYSIS (illustrative data)")?;
        writeln!(out, "{}", "=".repeat(60))?;

        writeln!(out, "\nPERFORMANCE METRICS COMPARISON")?;
        writeln!(out, "{}", "-".repeat(40))?;
        let rankings = self.performance_rankings();
        writeln!(out, "Performance Rankings (Niflheim-X position):")?;
        for (metric, order) in &rankings {
            let position = order.iter().position(|k| *k == SUBJECT).map_or(0, |p| p + 1);
            writeln!(out, "  - {}: #{} of {}", title_case(metric), position, order.len())?;
        }
        let performance = self.performance_scores();
        if let Some(winner) = performance.first() {
            writeln!(out, "\nOverall Performance Winner: {}", winner.name)?;
        }
        let subject = performance.iter().find(|r| r.key == SUBJECT).map_or(0.0, |r| r.score);
        writeln!(out, "   Niflheim-X Score: {}/{}", subject, rankings.len() * COMPETITORS.len())?;

        writeln!(out, "\nFEATURE COMPARISON")?;
        writeln!(out, "{}", "-".repeat(40))?;
        write_ranked(&mut out, "Feature Scores", &self.feature_totals(), FEATURE_MAX)?;
        writeln!(out, "\nNiflheim-X Key Strengths:")?;
        for strength in self.subject_strengths() {
            writeln!(out, "  - {}", strength)?;
        }

        writeln!(out, "\nEASE OF USE ANALYSIS")?;
        writeln!(out, "{}", "-".repeat(40))?;
        let ease = self.ease_scores();
        write_ranked(&mut out, "Ease of Use Rankings", &ease, EASE_MAX)?;
        writeln!(out, "\nNiflheim-X Ease of Use Rank: #{}", rank_of(&ease, SUBJECT))?;

        writeln!(out, "\nMARKET POSITIONING ANALYSIS")?;
        writeln!(out, "{}", "-".repeat(40))?;
        for (competitor, positioning) in COMPETITORS.iter().zip(&POSITIONING) {
            writeln!(out, "\n{}:", competitor.name)?;
            writeln!(out, "  - Target: {}", positioning.market_segment)?;
            writeln!(out, "  - Advantage: {}", positioning.competitive_advantage)?;
        }
        writeln!(out, "\nNiflheim-X Unique Position:")?;
        write_bullets(&mut out, &UNIQUE_POSITION)?;

        writeln!(out, "\nDEVELOPER EXPERIENCE ANALYSIS")?;
        writeln!(out, "{}", "-".repeat(40))?;
        let dx = self.developer_experience_totals();
        write_ranked(&mut out, "Developer Experience Scores", &dx, DX_MAX)?;
        if let Some(best) = dx.first() {
            writeln!(out, "\nBest Developer Experience: {}", best.name)?;
        }

        writeln!(out, "\nENTERPRISE READINESS ANALYSIS")?;
        writeln!(out, "{}", "-".repeat(40))?;
        let enterprise = self.enterprise_totals();
        write_ranked(&mut out, "Enterprise Readiness Scores", &enterprise, ENTERPRISE_MAX)?;
        writeln!(out, "\nNiflheim-X Enterprise Rank: #{}", rank_of(&enterprise, SUBJECT))?;

        let report = self.report();
        writeln!(out, "\n{}", "=".repeat(60))?;
        writeln!(out, "FINAL COMPETITIVE ANALYSIS")?;
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out, "OVERALL FRAMEWORK RANKINGS:")?;
        for (i, ranked) in self.final_rankings().iter().enumerate() {
            writeln!(out, "  #{} {}: {:.1} points", i + 1, ranked.name, ranked.score)?;
        }
        let summary = &report.competitive_summary;
        writeln!(out, "\nNIFLHEIM-X COMPETITIVE POSITION:")?;
        writeln!(out, "  - Overall Rank: #{} out of {}", summary.niflheim_x_position, summary.total_frameworks_analyzed)?;
        writeln!(out, "  - Overall Score: {:.1}/100", summary.niflheim_x_score)?;
        writeln!(out, "  - Status: {}", summary.status.label())?;

        writeln!(out, "\nKEY COMPETITIVE ADVANTAGES:")?;
        write_bullets(&mut out, &KEY_ADVANTAGES)?;
        writeln!(out, "\nGROWTH OPPORTUNITIES:")?;
        write_bullets(&mut out, &GROWTH_OPPORTUNITIES)?;

        Ok(out)
    }

    /// @ai:intent Write competitive_analysis.json into output_dir
    /// @ai:effects fs:write
    pub fn save(&self, output_dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;
        let path = output_dir.join("competitive_analysis.json");
        let json = serde_json::to_string_pretty(&self.report())?;
        std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Competitive analysis saved");
        Ok(path)
    }
}

impl Default for CompetitiveAnalysis {
    fn default() -> Self {
        Self::new()
    }
}

fn column_sum<const N: usize>(table: &ScoreTable<N>, column: usize) -> u32 {
    table.iter().map(|(_, scores)| scores[column]).sum()
}

fn ease_score(column: usize) -> u32 {
    let [setup, learning, readability, examples, community] = EASE_OF_USE.map(|(_, scores)| scores[column]);
    (6 - setup) + (9 - learning) + readability + examples + community
}

fn table_map<const N: usize>(table: &ScoreTable<N>) -> BTreeMap<&'static str, BTreeMap<&'static str, u32>> {
    table
        .iter()
        .map(|(row, scores)| {
            let per_framework = COMPETITORS.iter().map(|c| c.key).zip(scores.iter().copied()).collect();
            (*row, per_framework)
        })
        .collect()
}

/// Stable descending sort keeps table order for ties
fn sorted<'a>(scores: impl Iterator<Item = (&'a Competitor, f64)>) -> Vec<Ranked> {
    let mut ranked: Vec<Ranked> = scores
        .map(|(c, score)| Ranked {
            key: c.key,
            name: c.name,
            score,
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

fn rank_of(ranked: &[Ranked], key: &str) -> usize {
    ranked.iter().position(|r| r.key == key).map_or(0, |p| p + 1)
}

fn write_ranked(out: &mut String, heading: &str, ranked: &[Ranked], max: u32) -> Result<()> {
    writeln!(out, "{} (out of {}):", heading, max)?;
    for (i, r) in ranked.iter().enumerate() {
        writeln!(out, "  #{} {}: {}/{}", i + 1, r.name, r.score, max)?;
    }
    Ok(())
}

fn write_bullets(out: &mut String, items: &[&str]) -> Result<()> {
    for item in items {
        writeln!(out, "  - {}", item)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn score_of(ranked: &[Ranked], key: &str) -> f64 {
        ranked.iter().find(|r| r.key == key).unwrap().score
    }

    #[test]
    fn test_performance_rankings() {
        let analysis = CompetitiveAnalysis::new();
        let rankings = analysis.performance_rankings();

        assert_eq!(rankings[0].0, "startup_time");
        assert_eq!(
            rankings[0].1,
            vec!["niflheim_x", "semantic_kernel", "crewai", "autogen", "langchain"]
        );
        assert_eq!(rankings[3].1[0], "niflheim_x");

        let scores = analysis.performance_scores();
        assert_eq!(score_of(&scores, "niflheim_x"), 25.0);
        assert_eq!(score_of(&scores, "langchain"), 5.0);
    }

    #[test]
    fn test_dimension_totals() {
        let analysis = CompetitiveAnalysis::new();

        assert_eq!(score_of(&analysis.feature_totals(), "niflheim_x"), 74.0);
        assert_eq!(score_of(&analysis.feature_totals(), "langchain"), 62.0);
        assert_eq!(score_of(&analysis.ease_scores(), "niflheim_x"), 34.0);
        assert_eq!(score_of(&analysis.ease_scores(), "autogen"), 20.0);
        assert_eq!(score_of(&analysis.developer_experience_totals(), "niflheim_x"), 42.0);
        assert_eq!(score_of(&analysis.enterprise_totals(), "semantic_kernel"), 52.0);
    }

    #[test]
    fn test_ease_ties_keep_table_order() {
        let ease = CompetitiveAnalysis::new().ease_scores();
        let keys: Vec<_> = ease.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec!["niflheim_x", "langchain", "crewai", "semantic_kernel", "autogen"]);
    }

    #[test]
    fn test_final_ranking_arithmetic() {
        let rankings = CompetitiveAnalysis::new().final_rankings();

        assert_eq!(rankings[0].key, "niflheim_x");
        assert!((rankings[0].score - 68.394).abs() < 0.01);
        assert_eq!(rankings[1].key, "semantic_kernel");
    }

    #[test]
    fn test_strengths() {
        let strengths = CompetitiveAnalysis::new().subject_strengths();
        assert_eq!(strengths.len(), 7);
        assert!(strengths.contains(&"Agent Creation".to_string()));
        assert!(!strengths.contains(&"Multi Agent Support".to_string()));
    }

    #[test]
    fn test_status_from_rank() {
        assert_eq!(CompetitiveStatus::from_rank(1), CompetitiveStatus::MarketLeader);
        assert_eq!(CompetitiveStatus::from_rank(2), CompetitiveStatus::StrongCompetitor);
        assert_eq!(CompetitiveStatus::from_rank(4), CompetitiveStatus::EmergingPlayer);
    }

    #[test]
    fn test_save_labels_data_as_illustrative() {
        let temp = TempDir::new().unwrap();
        let path = CompetitiveAnalysis::new().save(temp.path()).unwrap();

        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json["data_source"], "illustrative");
        assert_eq!(json["overall_rankings"]["niflheim_x"]["rank"], 1);
        assert_eq!(json["competitive_summary"]["status"], "market_leader");
        assert_eq!(json["detailed_metrics"]["features"]["documentation"]["langchain"], 9);
    }

    #[test]
    fn test_console_output() {
        let text = CompetitiveAnalysis::new().render_console().unwrap();
        assert!(text.contains("  - Startup Time: #1 of 5"));
        assert!(text.contains("  #1 Niflheim-X: 74/80"));
        assert!(text.contains("  - Status: MARKET LEADER"));
    }

    #[test]
    fn test_console_closing_sections() {
        let text = CompetitiveAnalysis::new().render_console().unwrap();

        let unique = text.find("Niflheim-X Unique Position:").unwrap();
        let advantages = text.find("KEY COMPETITIVE ADVANTAGES:").unwrap();
        let growth = text.find("GROWTH OPPORTUNITIES:").unwrap();
        assert!(unique < advantages && advantages < growth);
        assert!(text.contains("  - Fills gap between research frameworks and production needs"));
        assert!(text.contains("  - Optimal balance of power and simplicity"));
        assert!(text.trim_end().ends_with("  - Enhance LLM provider integrations"));
    }
}
