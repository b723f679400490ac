//! @ai:module:intent Chart generation for benchmark results (PNG and SVG)
//! @ai:module:layer infrastructure
//! @ai:module:public_api BenchmarkVisualizer, Chart, Panel, ChartPalette
//! @ai:module:stateless true

use crate::config::{ChartConfig, ChartFormat};
use crate::metrics::{BenchmarkSample, Category, FrameworkSummary, MetricsAggregator, MetricsAggregatorTrait};
use crate::report::json_report::JsonReporter;
use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::collections::BTreeMap;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const WINNER: RGBColor = RGBColor(0x2E, 0x8B, 0x57);
const BETTER: RGBColor = RGBColor(0, 204, 0);
const WORSE: RGBColor = RGBColor(204, 0, 0);

/// Colours for frameworks without a configured colour and for per-test series
const FALLBACK: [RGBColor; 6] = [
    RGBColor(0xE4, 0x57, 0x55),
    RGBColor(0x4C, 0x9F, 0x70),
    RGBColor(0x6A, 0x5A, 0xCD),
    RGBColor(0xD6, 0x9E, 0x2E),
    RGBColor(0x3A, 0x9B, 0xBF),
    RGBColor(0xB5, 0x52, 0xA8),
];

/// @ai:intent Value label style drawn above bars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    Seconds,
    Decimal,
}

impl Annotation {
    fn format(&self, value: f64) -> String {
        match self {
            Annotation::Seconds => format!("{:.3}s", value),
            Annotation::Decimal => format!("{:.1}", value),
        }
    }
}

/// @ai:intent How bars in a simple bar panel are coloured
#[derive(Debug, Clone, PartialEq)]
pub enum BarColoring {
    /// Framework colours, with an optional winner in green and a marker label
    Framework {
        highlight: Option<usize>,
        marker: Option<String>,
    },
    /// Green for the better half of the range, red for the worse (lower is better)
    Ranked,
}

/// @ai:intent One bar per framework
#[derive(Debug, Clone, PartialEq)]
pub struct BarPanel {
    pub title: String,
    pub y_desc: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub coloring: BarColoring,
    pub annotation: Option<Annotation>,
}

/// @ai:intent Bars grouped by category, one series per sub-key
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedPanel {
    pub title: String,
    pub y_desc: String,
    pub groups: Vec<String>,
    /// (series name, value per group)
    pub series: Vec<(String, Vec<Option<f64>>)>,
    /// Colour series by framework instead of by position
    pub framework_series: bool,
}

/// @ai:intent Lines across frameworks, one per test
#[derive(Debug, Clone, PartialEq)]
pub struct LinePanel {
    pub title: String,
    pub y_desc: String,
    pub x_labels: Vec<String>,
    pub series: Vec<(String, Vec<Option<f64>>)>,
}

/// @ai:intent Free text panel (winner announcement)
#[derive(Debug, Clone, PartialEq)]
pub struct TextPanel {
    pub heading: String,
    pub headline: String,
    pub subline: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Bars(BarPanel),
    Grouped(GroupedPanel),
    Lines(LinePanel),
    Text(TextPanel),
}

/// @ai:intent A 2x2 figure written as `{stem}.{png,svg}`
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub stem: &'static str,
    pub title: String,
    pub panels: Vec<Panel>,
}

/// @ai:intent Framework colour lookup with fallback palette
#[derive(Debug, Clone)]
pub struct ChartPalette {
    colors: BTreeMap<String, RGBColor>,
}

impl ChartPalette {
    /// @ai:intent Build from configured hex colours, ignoring invalid entries
    /// @ai:effects pure
    pub fn from_config(config: &ChartConfig) -> Self {
        let colors = config
            .colors
            .iter()
            .filter_map(|(name, hex)| parse_hex(hex).map(|c| (name.clone(), c)))
            .collect();
        Self { colors }
    }

    /// @ai:intent Colour for a framework; index picks the fallback
    /// @ai:effects pure
    pub fn framework(&self, name: &str, index: usize) -> RGBColor {
        self.colors
            .get(name)
            .copied()
            .unwrap_or(FALLBACK[index % FALLBACK.len()])
    }

    fn series(index: usize) -> RGBColor {
        FALLBACK[index % FALLBACK.len()]
    }
}

/// @ai:intent Parse "#RRGGBB"
/// @ai:effects pure
pub fn parse_hex(hex: &str) -> Option<RGBColor> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

/// @ai:intent Mean value per (framework, test) with first-seen ordering
struct Pivot {
    frameworks: Vec<String>,
    tests: Vec<String>,
    cells: BTreeMap<(String, String), (f64, usize)>,
}

impl Pivot {
    fn build(samples: &[BenchmarkSample], category: Category, metric: &str) -> Self {
        let mut pivot = Pivot {
            frameworks: Vec::new(),
            tests: Vec::new(),
            cells: BTreeMap::new(),
        };
        for sample in samples.iter().filter(|s| s.is(category, metric)) {
            if !pivot.frameworks.contains(&sample.framework) {
                pivot.frameworks.push(sample.framework.clone());
            }
            if !pivot.tests.contains(&sample.test_name) {
                pivot.tests.push(sample.test_name.clone());
            }
            let cell = pivot
                .cells
                .entry((sample.framework.clone(), sample.test_name.clone()))
                .or_insert((0.0, 0));
            cell.0 += sample.value;
            cell.1 += 1;
        }
        pivot
    }

    fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn mean(&self, framework: &str, test: &str) -> Option<f64> {
        self.cells
            .get(&(framework.to_string(), test.to_string()))
            .map(|(sum, n)| sum / *n as f64)
    }

    /// Groups are frameworks, one series per test
    fn by_framework(&self, title: &str, y_desc: &str) -> GroupedPanel {
        GroupedPanel {
            title: title.to_string(),
            y_desc: y_desc.to_string(),
            groups: self.frameworks.clone(),
            series: self
                .tests
                .iter()
                .map(|t| {
                    let values = self.frameworks.iter().map(|f| self.mean(f, t)).collect();
                    (t.clone(), values)
                })
                .collect(),
            framework_series: false,
        }
    }

    /// Groups are tests, one series per framework
    fn by_test(&self, title: &str, y_desc: &str) -> GroupedPanel {
        GroupedPanel {
            title: title.to_string(),
            y_desc: y_desc.to_string(),
            groups: self.tests.clone(),
            series: self
                .frameworks
                .iter()
                .map(|f| {
                    let values = self.tests.iter().map(|t| self.mean(f, t)).collect();
                    (f.clone(), values)
                })
                .collect(),
            framework_series: true,
        }
    }

    fn lines(&self, title: &str, y_desc: &str) -> LinePanel {
        let grouped = self.by_framework(title, y_desc);
        LinePanel {
            title: grouped.title,
            y_desc: grouped.y_desc,
            x_labels: grouped.groups,
            series: grouped.series,
        }
    }

    /// (framework, values across tests)
    fn per_framework(&self) -> Vec<(String, Vec<f64>)> {
        self.frameworks
            .iter()
            .map(|f| {
                let values = self.tests.iter().filter_map(|t| self.mean(f, t)).collect();
                (f.clone(), values)
            })
            .collect()
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn bars(title: &str, y_desc: &str, rows: Vec<(String, f64)>, coloring: BarColoring, annotation: Option<Annotation>) -> BarPanel {
    let (labels, values) = rows.into_iter().unzip();
    BarPanel {
        title: title.to_string(),
        y_desc: y_desc.to_string(),
        labels,
        values,
        coloring,
        annotation,
    }
}

fn plain() -> BarColoring {
    BarColoring::Framework {
        highlight: None,
        marker: None,
    }
}

/// @ai:intent Startup figure: creation times, memory and averages
/// @ai:post None when there are no startup samples
/// @ai:effects pure
pub fn startup_chart(samples: &[BenchmarkSample]) -> Option<Chart> {
    let creation = Pivot::build(samples, Category::Startup, "creation_time");
    let memory = Pivot::build(samples, Category::Startup, "memory_usage");
    if creation.is_empty() && memory.is_empty() {
        return None;
    }

    let memory_rows = memory
        .per_framework()
        .into_iter()
        .map(|(f, v)| (f, mean(&v)))
        .collect();
    let average_rows = creation
        .per_framework()
        .into_iter()
        .map(|(f, v)| (f, mean(&v)))
        .collect();

    Some(Chart {
        stem: "startup_performance",
        title: "Framework Startup Performance Comparison".to_string(),
        panels: vec![
            Panel::Grouped(creation.by_framework("Agent Creation Time", "Time (seconds)")),
            Panel::Bars(bars("Memory Usage During Creation", "Memory (MB)", memory_rows, plain(), None)),
            Panel::Grouped(creation.by_test("Creation Time by Agent Type", "Time (seconds)")),
            Panel::Bars(bars(
                "Average Creation Time",
                "Time (seconds)",
                average_rows,
                plain(),
                Some(Annotation::Seconds),
            )),
        ],
    })
}

/// @ai:intent Conversation figure: response times by complexity and efficiency
/// @ai:post None when there are no conversation samples
/// @ai:effects pure
pub fn conversation_chart(samples: &[BenchmarkSample]) -> Option<Chart> {
    let avg = Pivot::build(samples, Category::Conversation, "avg_time_per_message");
    let total = Pivot::build(samples, Category::Conversation, "total_time");
    if avg.is_empty() && total.is_empty() {
        return None;
    }

    let efficiency = avg
        .per_framework()
        .into_iter()
        .map(|(f, v)| (f, mean(&v)))
        .collect();

    Some(Chart {
        stem: "conversation_performance",
        title: "Conversation Performance Comparison".to_string(),
        panels: vec![
            Panel::Grouped(avg.by_framework(
                "Average Response Time by Complexity",
                "Time per Message (seconds)",
            )),
            Panel::Grouped(total.by_framework("Total Conversation Time", "Total Time (seconds)")),
            Panel::Lines(avg.lines(
                "Response Time Scaling by Complexity",
                "Time per Message (seconds)",
            )),
            Panel::Bars(bars(
                "Overall Efficiency Score (Lower = Better)",
                "Average Response Time (seconds)",
                efficiency,
                BarColoring::Ranked,
                None,
            )),
        ],
    })
}

/// @ai:intent Concurrency figure: throughput, memory, scalability, throughput per MB
/// @ai:post None when there are no concurrency samples
/// @ai:effects pure
pub fn concurrency_chart(samples: &[BenchmarkSample]) -> Option<Chart> {
    let throughput = Pivot::build(samples, Category::Concurrency, "throughput");
    let memory = Pivot::build(samples, Category::Concurrency, "memory_usage");
    if throughput.is_empty() && memory.is_empty() {
        return None;
    }

    let memory_means: BTreeMap<String, f64> = memory
        .per_framework()
        .into_iter()
        .map(|(f, v)| (f, mean(&v)))
        .collect();
    let efficiency = throughput
        .per_framework()
        .into_iter()
        .filter_map(|(f, v)| {
            let peak = v.into_iter().reduce(f64::max)?;
            let mem = memory_means.get(&f)?;
            Some((f, peak / mem.max(1.0)))
        })
        .collect();

    Some(Chart {
        stem: "concurrency_performance",
        title: "Concurrency Performance Comparison".to_string(),
        panels: vec![
            Panel::Grouped(throughput.by_framework("Message Throughput", "Messages per Second")),
            Panel::Grouped(memory.by_framework("Memory Usage Under Load", "Memory Delta (MB)")),
            Panel::Lines(throughput.lines("Scalability Pattern", "Throughput (messages/sec)")),
            Panel::Bars(bars(
                "Performance Efficiency (Throughput per MB)",
                "Messages/sec per MB",
                efficiency,
                plain(),
                Some(Annotation::Decimal),
            )),
        ],
    })
}

/// @ai:intent Index of the best value among frameworks that have data
fn best(values: &[Option<f64>], lower_is_better: bool) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .reduce(|a, b| {
            let b_wins = if lower_is_better { b.1 < a.1 } else { b.1 > a.1 };
            if b_wins {
                b
            } else {
                a
            }
        })
        .map(|(i, _)| i)
}

fn summary_panel(
    title: &str,
    y_desc: &str,
    summaries: &[FrameworkSummary],
    pick: impl Fn(&FrameworkSummary) -> Option<f64>,
    lower_is_better: bool,
    marker: &str,
) -> BarPanel {
    let values: Vec<Option<f64>> = summaries.iter().map(&pick).collect();
    let highlight = best(&values, lower_is_better);
    let rows = summaries
        .iter()
        .zip(&values)
        .map(|(s, v)| (s.framework.clone(), v.unwrap_or(0.0)))
        .collect();
    bars(
        title,
        y_desc,
        rows,
        BarColoring::Framework {
            highlight,
            marker: highlight.map(|_| marker.to_string()),
        },
        None,
    )
}

/// @ai:intent Overall figure: best performer per panel and weighted scores
/// @ai:post None when there are no samples
/// @ai:effects pure
pub fn overall_chart(samples: &[BenchmarkSample]) -> Option<Chart> {
    if samples.is_empty() {
        return None;
    }

    let aggregator = MetricsAggregator::new();
    let summaries = aggregator.summarize(samples);
    let scores = aggregator.overall_scores(&summaries);

    let text = match scores.first() {
        Some(winner) => TextPanel {
            heading: "PERFORMANCE CHAMPION".to_string(),
            headline: winner.framework.to_uppercase(),
            subline: format!("Overall Performance Score: {:.1}", winner.score),
            lines: scores
                .iter()
                .map(|s| format!("{}: {:.1}", s.framework, s.score))
                .collect(),
        },
        None => TextPanel {
            heading: "PERFORMANCE CHAMPION".to_string(),
            headline: "-".to_string(),
            subline: String::new(),
            lines: Vec::new(),
        },
    };

    Some(Chart {
        stem: "overall_comparison",
        title: "Niflheim-X vs Competition: Complete Performance Analysis".to_string(),
        panels: vec![
            Panel::Bars(summary_panel(
                "Startup Speed (Lower = Better)",
                "Average Time (seconds)",
                &summaries,
                |s| s.avg_startup_time,
                true,
                "FASTEST",
            )),
            Panel::Bars(summary_panel(
                "Response Speed (Lower = Better)",
                "Average Time per Message (seconds)",
                &summaries,
                |s| s.avg_response_time,
                true,
                "FASTEST",
            )),
            Panel::Bars(summary_panel(
                "Peak Throughput (Higher = Better)",
                "Messages per Second",
                &summaries,
                |s| s.peak_throughput,
                false,
                "HIGHEST",
            )),
            Panel::Text(text),
        ],
    })
}

/// @ai:intent Loads results and renders the benchmark figures
pub struct BenchmarkVisualizer {
    samples: Vec<BenchmarkSample>,
    output_dir: PathBuf,
    config: ChartConfig,
    palette: ChartPalette,
}

impl BenchmarkVisualizer {
    /// @ai:intent Create a visualizer over in-memory samples
    /// @ai:effects pure
    pub fn new(samples: Vec<BenchmarkSample>, output_dir: impl Into<PathBuf>, config: ChartConfig) -> Self {
        let palette = ChartPalette::from_config(&config);
        Self {
            samples,
            output_dir: output_dir.into(),
            config,
            palette,
        }
    }

    /// @ai:intent Create a visualizer from a results JSON file
    /// @ai:effects fs:read
    pub fn from_results_file(
        results_file: &Path,
        output_dir: impl Into<PathBuf>,
        config: ChartConfig,
    ) -> Result<Self> {
        let samples = JsonReporter::load(results_file)?;
        Ok(Self::new(samples, output_dir, config))
    }

    /// @ai:intent Figures that have data
    /// @ai:effects pure
    pub fn charts(&self) -> Vec<Chart> {
        [
            startup_chart(&self.samples),
            conversation_chart(&self.samples),
            concurrency_chart(&self.samples),
            overall_chart(&self.samples),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// @ai:intent Render every figure in every configured format
    /// @ai:post returns the written paths
    /// @ai:effects fs:write
    pub fn generate_all_charts(&self) -> Result<Vec<PathBuf>> {
        let charts = self.charts();
        if charts.is_empty() {
            warn!("No benchmark samples to chart");
            return Ok(Vec::new());
        }

        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create chart directory {}", self.output_dir.display())
        })?;

        let mut written = Vec::new();
        for chart in &charts {
            for format in &self.config.formats {
                let path = self
                    .output_dir
                    .join(format!("{}.{}", chart.stem, format.extension()));
                self.render(chart, *format, &path)
                    .with_context(|| format!("Failed to render {}", path.display()))?;
                written.push(path);
            }
            info!(chart = chart.stem, "Chart saved");
        }

        info!(dir = %self.output_dir.display(), "All charts generated");
        Ok(written)
    }

    fn render(&self, chart: &Chart, format: ChartFormat, path: &Path) -> Result<()> {
        let size = (self.config.width, self.config.height);
        match format {
            ChartFormat::Png => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                paint(chart, &root, &self.palette)?;
                root.present()?;
            }
            ChartFormat::Svg => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                paint(chart, &root, &self.palette)?;
                root.present()?;
            }
        }
        Ok(())
    }
}

fn paint<DB>(chart: &Chart, root: &DrawingArea<DB, Shift>, palette: &ChartPalette) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let body = root.titled(&chart.title, ("sans-serif", 36))?;

    for (area, panel) in body.split_evenly((2, 2)).iter().zip(&chart.panels) {
        match panel {
            Panel::Bars(p) => draw_bars(area, p, palette)?,
            Panel::Grouped(p) => draw_grouped(area, p, palette)?,
            Panel::Lines(p) => draw_lines(area, p)?,
            Panel::Text(p) => draw_text(area, p)?,
        }
    }
    Ok(())
}

fn x_range(count: usize) -> Range<f64> {
    -0.5..(count.max(1) as f64 - 0.5)
}

/// @ai:intent Y range covering zero and all values, padded on top
/// @ai:effects pure
fn y_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let span = if hi - lo < 1e-9 { 1.0 } else { hi - lo };
    let bottom = if lo < 0.0 { lo - span * 0.1 } else { 0.0 };
    bottom..(hi + span * 0.15)
}

fn category_label(labels: &[String], x: f64) -> String {
    let i = x.round();
    if (x - i).abs() > 1e-6 || i < 0.0 {
        return String::new();
    }
    labels.get(i as usize).cloned().unwrap_or_default()
}

fn draw_bars<DB>(area: &DrawingArea<DB, Shift>, panel: &BarPanel, palette: &ChartPalette) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let labels = &panel.labels;
    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range(labels.len()), y_range(panel.values.iter().copied()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len().max(1))
        .x_label_formatter(&|x| category_label(labels, *x))
        .y_desc(panel.y_desc.as_str())
        .draw()?;

    let (lo, hi) = panel
        .values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));

    let colors: Vec<RGBColor> = panel
        .values
        .iter()
        .zip(labels)
        .enumerate()
        .map(|(i, (value, label))| match &panel.coloring {
            BarColoring::Framework { highlight, .. } if *highlight == Some(i) => WINNER,
            BarColoring::Framework { .. } => palette.framework(label, i),
            BarColoring::Ranked => {
                let normalized = if hi > lo { (value - lo) / (hi - lo) } else { 0.0 };
                if normalized < 0.5 {
                    BETTER
                } else {
                    WORSE
                }
            }
        })
        .collect();

    chart.draw_series(panel.values.iter().zip(&colors).enumerate().map(|(i, (v, color))| {
        let x = i as f64;
        Rectangle::new([(x - 0.35, 0.0), (x + 0.35, *v)], color.mix(0.85).filled())
    }))?;

    if let Some(annotation) = panel.annotation {
        chart.draw_series(panel.values.iter().enumerate().map(|(i, v)| {
            Text::new(
                annotation.format(*v),
                (i as f64 - 0.15, *v),
                ("sans-serif", 16),
            )
        }))?;
    }

    if let BarColoring::Framework {
        highlight: Some(i),
        marker: Some(marker),
    } = &panel.coloring
    {
        if let Some(value) = panel.values.get(*i) {
            chart.draw_series(std::iter::once(Text::new(
                marker.clone(),
                (*i as f64 - 0.2, *value),
                ("sans-serif", 18).into_font().color(&WINNER),
            )))?;
        }
    }

    Ok(())
}

fn draw_grouped<DB>(area: &DrawingArea<DB, Shift>, panel: &GroupedPanel, palette: &ChartPalette) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let groups = &panel.groups;
    let all_values = panel.series.iter().flat_map(|(_, v)| v.iter().flatten().copied());

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range(groups.len()), y_range(all_values))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(groups.len().max(1))
        .x_label_formatter(&|x| category_label(groups, *x))
        .y_desc(panel.y_desc.as_str())
        .draw()?;

    let width = 0.8 / panel.series.len().max(1) as f64;
    for (j, (name, values)) in panel.series.iter().enumerate() {
        let color = if panel.framework_series {
            palette.framework(name, j)
        } else {
            ChartPalette::series(j)
        };
        let offset = -0.4 + j as f64 * width;

        chart
            .draw_series(values.iter().enumerate().filter_map(|(i, v)| {
                v.map(|v| {
                    let x0 = i as f64 + offset;
                    Rectangle::new([(x0, 0.0), (x0 + width, v)], color.mix(0.85).filled())
                })
            }))?
            .label(name.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

fn draw_lines<DB>(area: &DrawingArea<DB, Shift>, panel: &LinePanel) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let labels = &panel.x_labels;
    let all_values = panel.series.iter().flat_map(|(_, v)| v.iter().flatten().copied());

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range(labels.len()), y_range(all_values))?;

    chart
        .configure_mesh()
        .x_labels(labels.len().max(1))
        .x_label_formatter(&|x| category_label(labels, *x))
        .y_desc(panel.y_desc.as_str())
        .x_desc("Framework")
        .draw()?;

    for (j, (name, values)) in panel.series.iter().enumerate() {
        let color = ChartPalette::series(j);
        let points: Vec<(f64, f64)> = values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i as f64, v)))
            .collect();

        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
            .label(name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 14, y)], color.stroke_width(2)));
        chart.draw_series(points.into_iter().map(|p| Circle::new(p, 5, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

fn draw_text<DB>(area: &DrawingArea<DB, Shift>, panel: &TextPanel) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (width, height) = area.dim_in_pixel();
    let centered = Pos::new(HPos::Center, VPos::Center);
    let at = |fraction: f64| ((width / 2) as i32, (height as f64 * fraction) as i32);

    area.draw(&Text::new(
        panel.heading.clone(),
        at(0.2),
        ("sans-serif", 30).into_font().color(&BLACK).pos(centered),
    ))?;
    area.draw(&Text::new(
        panel.headline.clone(),
        at(0.4),
        ("sans-serif", 40).into_font().color(&WINNER).pos(centered),
    ))?;
    area.draw(&Text::new(
        panel.subline.clone(),
        at(0.55),
        ("sans-serif", 22).into_font().color(&BLACK).pos(centered),
    ))?;

    for (i, line) in panel.lines.iter().enumerate() {
        area.draw(&Text::new(
            line.clone(),
            at(0.68 + i as f64 * 0.06),
            ("sans-serif", 18).into_font().color(&BLACK).pos(centered),
        ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::SystemInfo;
    use tempfile::TempDir;

    fn sample(framework: &str, category: Category, test: &str, metric: &str, value: f64) -> BenchmarkSample {
        BenchmarkSample::new(framework, test, category, metric, value, "seconds", SystemInfo::default())
    }

    fn fixture() -> Vec<BenchmarkSample> {
        vec![
            sample("niflheim-x", Category::Startup, "simple_agent_creation", "creation_time", 0.05),
            sample("niflheim-x", Category::Startup, "tool_agent_creation", "creation_time", 0.07),
            sample("langchain", Category::Startup, "simple_agent_creation", "creation_time", 0.2),
            sample("niflheim-x", Category::Conversation, "conversation_simple", "avg_time_per_message", 0.4),
            sample("langchain", Category::Conversation, "conversation_simple", "avg_time_per_message", 0.7),
        ]
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#2E86AB"), Some(RGBColor(0x2E, 0x86, 0xAB)));
        assert_eq!(parse_hex("84c7d0"), Some(RGBColor(0x84, 0xC7, 0xD0)));
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(parse_hex("#GGGGGG"), None);
    }

    #[test]
    fn test_palette_falls_back_for_unknown_frameworks() {
        let palette = ChartPalette::from_config(&ChartConfig::default());
        assert_eq!(palette.framework("langchain", 0), RGBColor(0xA2, 0x3B, 0x72));
        assert_eq!(palette.framework("autogen", 1), FALLBACK[1]);
    }

    #[test]
    fn test_empty_categories_are_skipped() {
        let samples = fixture();
        assert!(startup_chart(&samples).is_some());
        assert!(conversation_chart(&samples).is_some());
        assert!(concurrency_chart(&samples).is_none());
        assert!(overall_chart(&[]).is_none());

        let visualizer = BenchmarkVisualizer::new(samples, "unused", ChartConfig::default());
        let stems: Vec<_> = visualizer.charts().iter().map(|c| c.stem).collect();
        assert_eq!(stems, vec!["startup_performance", "conversation_performance", "overall_comparison"]);
    }

    #[test]
    fn test_startup_grouping() {
        let chart = startup_chart(&fixture()).unwrap();
        let Panel::Grouped(grouped) = &chart.panels[0] else {
            panic!("expected grouped panel");
        };

        assert_eq!(grouped.groups, vec!["niflheim-x", "langchain"]);
        assert_eq!(grouped.series[0].0, "simple_agent_creation");
        assert_eq!(grouped.series[0].1, vec![Some(0.05), Some(0.2)]);
        assert_eq!(grouped.series[1].1, vec![Some(0.07), None]);

        let Panel::Bars(average) = &chart.panels[3] else {
            panic!("expected bar panel");
        };
        assert!((average.values[0] - 0.06).abs() < 1e-9);
    }

    #[test]
    fn test_overall_marks_best_performers() {
        let chart = overall_chart(&fixture()).unwrap();

        let Panel::Bars(startup) = &chart.panels[0] else {
            panic!("expected bar panel");
        };
        // summaries are sorted by name: langchain, niflheim-x
        assert_eq!(startup.labels, vec!["langchain", "niflheim-x"]);
        assert_eq!(
            startup.coloring,
            BarColoring::Framework {
                highlight: Some(1),
                marker: Some("FASTEST".to_string())
            }
        );

        let Panel::Bars(throughput) = &chart.panels[2] else {
            panic!("expected bar panel");
        };
        assert_eq!(
            throughput.coloring,
            BarColoring::Framework {
                highlight: None,
                marker: None
            }
        );

        let Panel::Text(text) = &chart.panels[3] else {
            panic!("expected text panel");
        };
        assert_eq!(text.headline, "NIFLHEIM-X");
        assert_eq!(text.lines.len(), 2);
    }

    #[test]
    fn test_y_range_includes_negative_memory_deltas() {
        let range = y_range([-2.0, 4.0].into_iter());
        assert!(range.start < -2.0);
        assert!(range.end > 4.0);
        assert_eq!(y_range(std::iter::empty()), 0.0..0.15);
    }

    #[test]
    fn test_no_samples_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let visualizer = BenchmarkVisualizer::new(Vec::new(), temp.path().join("charts"), ChartConfig::default());

        assert!(visualizer.generate_all_charts().unwrap().is_empty());
        assert!(!temp.path().join("charts").exists());
    }
}
