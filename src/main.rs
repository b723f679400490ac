//! @ai:module:intent CLI for the Niflheim-X benchmark toolkit
//! @ai:module:layer presentation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use niflheim_bench::{
    analysis::{CompetitiveAnalysis, PotentialAssessment, ProjectShowcase},
    config::BenchmarkConfig,
    demo::create_demo_files,
    frameworks::{build_registry, LiveFramework},
    metrics::{BenchmarkSample, Category, MetricsAggregator, MetricsAggregatorTrait},
    report::{BenchmarkVisualizer, ReportGenerator},
    suite::BenchmarkSuite,
    usage::{self, Team, TeamMode},
    verify::SetupVerifier,
};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "niflheim-bench")]
#[command(about = "Performance benchmarks and competitive analysis for the Niflheim-X agent framework")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run benchmarks
    Run {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Frameworks to test (comma-separated, or "all")
        #[arg(long, default_value = "all")]
        frameworks: String,

        /// Run a single category (startup, conversation, concurrency)
        #[arg(long)]
        category: Option<Category>,

        /// Output directory for results
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Use the simulated niflheim-x profile instead of the live API
        #[arg(long)]
        simulate: bool,
    },
    /// Run every benchmark, then render charts from the new results
    Quick {
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long)]
        simulate: bool,
    },
    /// Write illustrative demo results and charts (no API calls)
    Demo {
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        #[arg(long)]
        charts_dir: Option<PathBuf>,
    },
    /// Render charts from a results file
    Visualize {
        /// Results JSON file (defaults to the newest in the results directory)
        #[arg(short, long)]
        results_file: Option<PathBuf>,

        /// Output directory for charts
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Print and save the competitive analysis
    Compete {
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Run the real-world scenario assessment
    Assess {
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Assess the live framework (requires an API key)
        #[arg(long)]
        live: bool,
    },
    /// Print and save the catalogue of example projects
    Showcase {
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Chat with a Q&A bot that remembers the conversation
    Qa {
        /// Ask for a single short story instead of an interactive session
        #[arg(long)]
        story: bool,

        /// Use the configured API instead of the offline mock
        #[arg(long)]
        live: bool,
    },
    /// Walk through an agent with calculator, weather, search, note and time tools
    Tools {
        /// Read prompts from stdin instead of the scripted demo
        #[arg(short, long)]
        interactive: bool,

        #[arg(long)]
        live: bool,

        /// Directory for notes written by the note tool
        #[arg(long, default_value = ".")]
        notes_dir: PathBuf,
    },
    /// Run a team of specialist agents (collaborate, discuss, debate, interactive)
    Team {
        #[arg(long, default_value = "collaborate")]
        mode: TeamMode,

        #[arg(long)]
        live: bool,

        /// Directory for exported conversations
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Run installation smoke checks
    Verify {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "benchmark.toml")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("niflheim_bench=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            frameworks,
            category,
            output_dir,
            simulate,
        } => {
            let config = load_or_default_config(config)?;
            run_benchmarks(config, &frameworks, category, output_dir, simulate).await?;
            Ok(())
        }
        Commands::Quick { config, simulate } => {
            quick(load_or_default_config(config)?, simulate).await?;
            Ok(())
        }
        Commands::Demo { output_dir, charts_dir } => demo(output_dir, charts_dir),
        Commands::Visualize {
            results_file,
            output_dir,
        } => visualize(results_file, output_dir),
        Commands::Compete { output_dir } => compete(output_dir),
        Commands::Assess { output_dir, live } => assess(output_dir, live).await,
        Commands::Showcase { output_dir } => showcase(output_dir),
        Commands::Qa { story, live } => qa(story, live).await,
        Commands::Tools {
            interactive,
            live,
            notes_dir,
        } => tools(interactive, live, notes_dir).await,
        Commands::Team {
            mode,
            live,
            output_dir,
        } => team(mode, live, output_dir).await,
        Commands::Verify { config } => verify(config),
        Commands::Init { output } => init_config(output),
    }
}

/// @ai:intent Run the suite, save results and print the comparison report
/// @ai:post None when no API key is set and the run is not simulated
/// @ai:effects network, fs:write
async fn run_benchmarks(
    mut config: BenchmarkConfig,
    frameworks: &str,
    category: Option<Category>,
    output_dir: Option<PathBuf>,
    simulate: bool,
) -> Result<Option<PathBuf>> {
    config.run.simulate |= simulate;

    let api_key = config.api.api_key();
    if api_key.is_none() && !config.run.simulate {
        println!("{} Please set the {} environment variable", "Error:".red().bold(), config.api.api_key_env);
        println!("Usage: export {}='your-key-here'", config.api.api_key_env);
        println!("Or pass --simulate to benchmark the simulated profiles");
        return Ok(None);
    }

    let registry = build_registry(&config, api_key)?;
    let selected: Option<Vec<String>> = match frameworks.trim() {
        "all" => None,
        list => Some(
            list.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        ),
    };

    let output_dir = output_dir.unwrap_or_else(|| config.paths.results_dir.clone());
    let reporter = ReportGenerator::new(config.clone());
    let mut suite = BenchmarkSuite::new(registry, config, &output_dir)?;

    println!("Starting Niflheim-X Performance Benchmark Suite");
    println!("Testing frameworks: {}", suite.frameworks().names().join(", "));
    println!("System: {:?}", suite.monitor().system_info());
    println!("{}", "-".repeat(60));

    suite.run_all_benchmarks(selected.as_deref(), category).await?;

    let (json_path, csv_path) = suite.save_results()?;
    println!("Results saved to {} and {}", json_path.display(), csv_path.display());

    reporter.save_markdown(suite.results(), &output_dir.join("comparison_report.md"))?;
    print!("{}", reporter.console(suite.results())?);
    print_summary(suite.results());

    Ok(Some(json_path))
}

/// @ai:intent Benchmark everything, then chart the results file this run wrote
/// @ai:post returns the charted results file, None when nothing was benchmarked
/// @ai:effects network, fs:write
async fn quick(config: BenchmarkConfig, simulate: bool) -> Result<Option<PathBuf>> {
    let results_dir = config.paths.results_dir.clone();
    let charts_dir = config.paths.charts_dir.clone();
    let chart_config = config.charts.clone();

    println!("Starting Niflheim-X Quick Benchmark");
    println!("{}", "=".repeat(50));

    let Some(results_file) = run_benchmarks(config, "all", None, None, simulate).await? else {
        return Ok(None);
    };

    println!("\nGenerating charts from {}", results_file.display());
    let visualizer = BenchmarkVisualizer::from_results_file(&results_file, &charts_dir, chart_config)?;
    match visualizer.generate_all_charts() {
        Ok(paths) => println!("Charts saved in: {} ({} files)", charts_dir.display(), paths.len()),
        Err(e) => tracing::error!("Chart generation failed: {:#}", e),
    }

    println!("\n{} Benchmark completed", "OK".green().bold());
    println!("Results saved in: {}", results_dir.display());
    Ok(Some(results_file))
}

/// @ai:intent Write the illustrative demo dataset and chart it
/// @ai:effects fs:write
fn demo(output_dir: Option<PathBuf>, charts_dir: Option<PathBuf>) -> Result<()> {
    let config = load_or_default_config(None)?;
    let output_dir = output_dir.unwrap_or_else(|| config.paths.results_dir.clone());
    let charts_dir = charts_dir.unwrap_or_else(|| config.paths.charts_dir.clone());

    println!("Niflheim-X Demo Benchmark Suite");
    println!("{}", "=".repeat(50));
    println!("Illustrative data, no API calls; these figures were not measured");
    println!();

    let files = create_demo_files(&output_dir)?;
    println!("Demo results saved to: {}", output_dir.display());

    let visualizer = BenchmarkVisualizer::from_results_file(&files.json, &charts_dir, config.charts)?;
    match visualizer.generate_all_charts() {
        Ok(paths) => {
            for path in paths {
                println!("  {}", path.display());
            }
        }
        Err(e) => tracing::error!("Chart generation failed: {:#}", e),
    }

    println!("Summary: {}", files.summary.display());
    Ok(())
}

/// @ai:intent Render charts for an existing results file
/// @ai:effects fs:read, fs:write
fn visualize(results_file: Option<PathBuf>, output_dir: Option<PathBuf>) -> Result<()> {
    let config = load_or_default_config(None)?;
    let results_file = match results_file {
        Some(path) => path,
        None => latest_results_file(&config.paths.results_dir)?.with_context(|| {
            format!("No results files found in {}", config.paths.results_dir.display())
        })?,
    };
    let output_dir = output_dir.unwrap_or_else(|| config.paths.charts_dir.clone());

    let visualizer = BenchmarkVisualizer::from_results_file(&results_file, &output_dir, config.charts)?;
    let paths = visualizer.generate_all_charts()?;

    println!("Generated {} chart files in {}", paths.len(), output_dir.display());
    Ok(())
}

/// @ai:intent Print and save the competitive analysis
/// @ai:effects fs:write
fn compete(output_dir: Option<PathBuf>) -> Result<()> {
    let config = load_or_default_config(None)?;
    let output_dir = output_dir.unwrap_or(config.paths.evaluation_dir);

    let analysis = CompetitiveAnalysis::new();
    print!("{}", analysis.render_console()?);
    let path = analysis.save(&output_dir)?;
    println!("\nDetailed analysis saved to: {}", path.display());
    Ok(())
}

/// @ai:intent Run the scenario assessment against simulated or live niflheim-x
/// @ai:effects network, fs:write
async fn assess(output_dir: Option<PathBuf>, live: bool) -> Result<()> {
    let config = load_or_default_config(None)?;
    let output_dir = output_dir.unwrap_or_else(|| config.paths.evaluation_dir.clone());

    let assessment = if live {
        let key = config
            .api
            .api_key()
            .with_context(|| format!("--live requires {} to be set", config.api.api_key_env))?;
        PotentialAssessment::new(Arc::new(LiveFramework::new(config.api.clone(), key)?))
    } else {
        PotentialAssessment::simulated(config.run.time_scale)
    };

    let report = assessment.run().await;
    print!("{}", PotentialAssessment::render_console(&report)?);
    let path = PotentialAssessment::save(&report, &output_dir)?;
    println!("\nDetailed results saved to: {}", path.display());
    Ok(())
}

/// @ai:intent Print and save the project showcase catalogue
/// @ai:effects fs:write
fn showcase(output_dir: Option<PathBuf>) -> Result<()> {
    let config = load_or_default_config(None)?;
    let output_dir = output_dir.unwrap_or(config.paths.evaluation_dir);

    let showcase = ProjectShowcase::new();
    print!("{}", showcase.render_console()?);
    let path = showcase.save(&output_dir)?;
    println!("\nDetailed showcases saved to: {}", path.display());
    Ok(())
}

/// @ai:intent Interactive Q&A session, or the one-shot story
/// @ai:effects network, io
async fn qa(story: bool, live: bool) -> Result<()> {
    let config = load_or_default_config(None)?;
    let client = usage::chat_client(&config.api, live, Vec::new())?;
    let mut stdout = std::io::stdout();

    if story {
        return usage::tell_story(client, &config.api.model, &mut stdout).await;
    }
    let mut agent = usage::qa_agent(client, &config.api.model);
    usage::run_qa_session(&mut agent, std::io::stdin().lock(), &mut stdout).await?;
    Ok(())
}

/// @ai:intent Scripted or interactive walkthrough of the tool-using agent
/// @ai:effects network, io, fs:write
async fn tools(interactive: bool, live: bool, notes_dir: PathBuf) -> Result<()> {
    let config = load_or_default_config(None)?;
    let script = if interactive { Vec::new() } else { usage::offline_tool_script() };
    let client = usage::chat_client(&config.api, live, script)?;
    let mut agent = usage::tool_assistant(client, &config.api.model, &notes_dir);
    let mut stdout = std::io::stdout();

    if interactive {
        usage::run_tool_session(&mut agent, std::io::stdin().lock(), &mut stdout).await?;
    } else {
        usage::run_tool_demo(&mut agent, &mut stdout).await?;
    }
    Ok(())
}

/// @ai:intent Assemble the specialist team and run one mode
/// @ai:effects network, io, fs:write
async fn team(mode: TeamMode, live: bool, output_dir: Option<PathBuf>) -> Result<()> {
    let config = load_or_default_config(None)?;
    let output_dir = output_dir.unwrap_or_else(|| config.paths.evaluation_dir.clone());
    let client = usage::chat_client(&config.api, live, Vec::new())?;
    let framework = LiveFramework::with_client(config.api.clone(), client);

    let mut team = Team::assemble(&framework, usage::specialists()).await?;
    usage::run_team(&mut team, mode, std::io::stdin().lock(), &mut std::io::stdout(), &output_dir).await
}

/// @ai:intent Run smoke checks; exit status 1 when any fails
/// @ai:effects io
fn verify(config: Option<PathBuf>) -> Result<()> {
    let config = load_or_default_config(config)?;

    println!("Niflheim-X Framework Verification");
    println!("{}", "=".repeat(50));

    let report = SetupVerifier::new(config.verify.checks).run();

    println!("\n{}", "=".repeat(50));
    if report.all_passed() {
        println!("{} All checks passed, the framework is ready to use", "OK".green().bold());
        Ok(())
    } else {
        println!(
            "{} {} checks failed. Please check your setup.",
            "FAIL".red().bold(),
            report.failed()
        );
        std::process::exit(1);
    }
}

/// @ai:intent Write the default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<()> {
    let config = BenchmarkConfig::default();
    config.save(&output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Load configuration or use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<BenchmarkConfig> {
    match path {
        Some(p) => BenchmarkConfig::load(&p),
        None => {
            let default_path = PathBuf::from("benchmark.toml");
            if default_path.exists() {
                BenchmarkConfig::load(&default_path)
            } else {
                Ok(BenchmarkConfig::default())
            }
        }
    }
}

/// @ai:intent Newest benchmark_results_*.json directly inside dir
/// @ai:effects fs:read
fn latest_results_file(dir: &Path) -> Result<Option<PathBuf>> {
    if !dir.exists() {
        return Ok(None);
    }
    let pattern = Regex::new(r"^benchmark_results_.*\.json$")?;

    let latest = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| pattern.is_match(&entry.file_name().to_string_lossy()))
        .filter_map(|entry| {
            let modified = entry.metadata().ok()?.modified().ok()?;
            Some((modified, entry.into_path()))
        })
        .max_by_key(|(modified, _)| *modified)
        .map(|(_, path)| path);

    Ok(latest)
}

/// @ai:intent Print per-framework summary table
/// @ai:effects io
fn print_summary(samples: &[BenchmarkSample]) {
    let summaries = MetricsAggregator::new().summarize(samples);
    if summaries.is_empty() {
        return;
    }
    let cell = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v));

    println!();
    println!(
        "{:<18} {:>12} {:>12} {:>12} {:>12}",
        "Framework", "Startup (s)", "Response (s)", "Peak msg/s", "Memory (MB)"
    );
    println!("{}", "-".repeat(70));
    for summary in &summaries {
        println!(
            "{:<18} {:>12} {:>12} {:>12} {:>12}",
            summary.framework,
            cell(summary.avg_startup_time),
            cell(summary.avg_response_time),
            cell(summary.peak_throughput),
            cell(summary.avg_memory_usage)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use niflheim_bench::config::{ChartFormat, ConcurrencyTier, ConversationTier};
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn fast_config(root: &Path) -> BenchmarkConfig {
        let mut config = BenchmarkConfig::default();
        config.run.time_scale = 0.001;
        config.paths.results_dir = root.join("results");
        config.paths.charts_dir = root.join("charts");
        config.charts.formats = vec![ChartFormat::Svg];
        config.conversation = vec![ConversationTier {
            name: "simple".to_string(),
            messages: vec!["Hello".to_string()],
        }];
        config.concurrency = vec![ConcurrencyTier {
            num_agents: 2,
            messages_per_agent: 1,
        }];
        config
    }

    #[tokio::test]
    async fn test_quick_charts_the_results_of_its_own_run() {
        let temp = TempDir::new().unwrap();
        let config = fast_config(temp.path());

        let stale = config.paths.results_dir.join("benchmark_results_29991231_235959.json");
        std::fs::create_dir_all(&config.paths.results_dir).unwrap();
        std::fs::write(&stale, "[]").unwrap();
        std::fs::File::options()
            .write(true)
            .open(&stale)
            .unwrap()
            .set_modified(SystemTime::now() + Duration::from_secs(3600))
            .unwrap();

        let charted = quick(config, true).await.unwrap().unwrap();

        assert_ne!(charted, stale);
        assert_eq!(latest_results_file(&temp.path().join("results")).unwrap(), Some(stale));
        let samples: Vec<BenchmarkSample> =
            serde_json::from_str(&std::fs::read_to_string(&charted).unwrap()).unwrap();
        assert!(samples.iter().any(|s| s.framework == "niflheim-x"));
    }

    #[test]
    fn test_latest_results_file_ignores_other_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("results.json"), "[]").unwrap();
        std::fs::write(temp.path().join("benchmark_results_1.csv"), "").unwrap();
        assert_eq!(latest_results_file(temp.path()).unwrap(), None);

        let json = temp.path().join("benchmark_results_1.json");
        std::fs::write(&json, "[]").unwrap();
        assert_eq!(latest_results_file(temp.path()).unwrap(), Some(json));
    }
}
