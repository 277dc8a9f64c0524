//! Terminal renderings of experiments, metric statistics and responses.
//!
//! Row building is kept separate from printing so the table contents can be
//! checked without a terminal.

use colored::Colorize;
use comfy_table::{Cell, Color};
use llm_lab_core::{
    format_metric_name, format_percentage, format_percentage_with, metric_columns,
    Experiment, ExperimentDetail, MetricsSummary, Response, ResponseSortKey, SortConfig,
    SortState,
};
use serde::Serialize;

use crate::output::{
    format_param, format_score, header_cell, new_table, print_field, print_optional_field,
    print_section, score_bar, sortable_header, TableDisplay,
};

pub const METRICS_CAPTION: &str =
    "All scores are percentages (0-100%). Higher scores indicate better quality.";

const PROMPT_PREVIEW_CHARS: usize = 60;

// ===== Experiment list =====

/// One line of the experiment list
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ExperimentRow(pub Experiment);

impl TableDisplay for ExperimentRow {
    fn to_row(&self) -> Vec<Cell> {
        vec![
            Cell::new(self.0.id),
            Cell::new(&self.0.name),
            Cell::new(self.0.prompt_preview(PROMPT_PREVIEW_CHARS)),
            Cell::new(self.0.created_display()),
        ]
    }

    fn display_compact(&self) {
        println!("{}\t{}\t{}", self.0.id, self.0.name, self.0.created_display());
    }
}

// ===== Experiment detail =====

/// Everything the detail view shows, in serializable form
#[derive(Debug, Serialize)]
pub struct ExperimentView<'a> {
    pub experiment: &'a ExperimentDetail,
    pub metrics: &'a MetricsSummary,
    pub responses: Vec<&'a Response>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortLabel>,
    #[serde(skip)]
    metric_names: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SortLabel {
    pub key: String,
    pub direction: String,
}

impl From<&SortConfig<ResponseSortKey>> for SortLabel {
    fn from(config: &SortConfig<ResponseSortKey>) -> Self {
        Self {
            key: config.key.to_string(),
            direction: config.direction.to_string(),
        }
    }
}

impl<'a> ExperimentView<'a> {
    pub fn new(
        experiment: &'a ExperimentDetail,
        metrics: &'a MetricsSummary,
        responses: &'a [Response],
        sort: &SortState<ResponseSortKey>,
    ) -> Self {
        Self {
            experiment,
            metrics,
            responses: sort.apply(responses, Response::sort_value),
            sort: sort.config().map(SortLabel::from),
            metric_names: metric_columns(responses),
        }
    }

    pub fn print(&self, sort: &SortState<ResponseSortKey>) {
        print_experiment_header(self.experiment);
        print_metrics_table(self.metrics);
        print_comparison(&self.responses, &self.metric_names, sort.config());
    }
}

pub fn print_experiment_header(detail: &ExperimentDetail) {
    print_section(&detail.experiment.name);
    print_field("ID", &detail.id().to_string());
    print_field("Created", &detail.experiment.created_display());
    print_field("Responses", &detail.response_count.to_string());
    print_section("Prompt");
    println!("{}", detail.prompt());
}

// ===== Metrics statistics =====

/// Rows of the statistics table: name, mean, median, min, max, std dev.
pub fn metrics_rows(summary: &MetricsSummary) -> Vec<[String; 6]> {
    summary
        .iter()
        .map(|(name, stats)| {
            [
                format_metric_name(name),
                format_percentage_with(stats.mean, 2),
                format_percentage_with(stats.median, 2),
                format_percentage_with(stats.min, 2),
                format_percentage_with(stats.max, 2),
                format_percentage_with(stats.std_dev, 2),
            ]
        })
        .collect()
}

pub fn print_metrics_table(summary: &MetricsSummary) {
    print_section("Metrics Statistics");
    if summary.is_empty() {
        println!("{}", "No metrics available yet.".dimmed());
        return;
    }

    let headers = ["Metric", "Mean", "Median", "Min", "Max", "Std Dev"];
    let mut table = new_table(headers.iter().map(|h| header_cell(h)));
    for row in metrics_rows(summary) {
        table.add_row(row.to_vec());
    }
    println!("{table}");
    println!("{}", METRICS_CAPTION.dimmed());

    if let Some(best) = summary.get(llm_lab_core::OVERALL_SCORE).and_then(|s| s.best()) {
        println!(
            "{} response {} (temperature {}, top P {}) at {}",
            "Best overall:".bold(),
            best.response_id,
            format_param(best.temperature),
            format_param(best.top_p),
            format_percentage(best.value).green()
        );
    }
}

// ===== Comparison table =====

/// One comparison-table line before styling
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub id: String,
    pub overall: String,
    pub bar: String,
    pub temperature: String,
    pub top_p: String,
    pub metrics: Vec<String>,
    pub warning: Option<String>,
}

/// Column labels with their sort keys; the id column is not sortable.
pub fn comparison_columns(metric_names: &[String]) -> Vec<(String, ResponseSortKey)> {
    let mut columns = vec![
        ("Overall Score".to_string(), ResponseSortKey::overall()),
        ("Temp".to_string(), ResponseSortKey::Temperature),
        ("Top P".to_string(), ResponseSortKey::TopP),
    ];
    columns.extend(
        metric_names
            .iter()
            .map(|name| (format_metric_name(name), ResponseSortKey::Metric(name.clone()))),
    );
    columns
}

pub fn comparison_row(response: &Response, metric_names: &[String]) -> ComparisonRow {
    let overall = response.overall_score();
    ComparisonRow {
        id: response.id.to_string(),
        overall: format_score(overall),
        bar: score_bar(overall.unwrap_or(0.0)),
        temperature: format_param(response.temperature),
        top_p: format_param(response.top_p),
        metrics: metric_names
            .iter()
            .map(|name| format_score(response.metric_value(name)))
            .collect(),
        warning: response
            .has_warnings()
            .then(|| {
                response
                    .validation_metadata
                    .as_ref()
                    .map(|m| m.warning_summary())
                    .unwrap_or_default()
            }),
    }
}

pub fn print_comparison(
    responses: &[&Response],
    metric_names: &[String],
    sort: Option<&SortConfig<ResponseSortKey>>,
) {
    print_section("Response Comparison");
    if responses.is_empty() {
        println!("{}", "No responses yet.".dimmed());
        return;
    }

    let mut headers = vec![header_cell("ID")];
    headers.extend(comparison_columns(metric_names).into_iter().map(|(label, key)| {
        let active = sort.filter(|s| s.key == key).map(|s| s.direction);
        sortable_header(&label, active)
    }));
    let mut table = new_table(headers);

    let mut flagged = 0;
    for response in responses {
        let row = comparison_row(response, metric_names);
        let mut overall = format!("{} {}", row.overall, row.bar);
        if row.warning.is_some() {
            flagged += 1;
            overall.push_str(" Warning");
        }
        let overall_cell = match row.warning {
            Some(_) => Cell::new(overall).fg(Color::Yellow),
            None => Cell::new(overall),
        };

        let mut cells = vec![Cell::new(row.id), overall_cell, Cell::new(row.temperature), Cell::new(row.top_p)];
        cells.extend(row.metrics.into_iter().map(Cell::new));
        table.add_row(cells);
    }

    println!("{table}");
    if flagged > 0 {
        println!(
            "{} {} response(s) flagged. Run `llm-lab responses get <id>` for details.",
            "⚠".yellow(),
            flagged
        );
    }
}

// ===== Response detail =====

/// Renders one response the way the detail modal shows it.
pub struct ResponseView<'a>(pub &'a Response);

impl ResponseView<'_> {
    /// Banner lines, empty when the response has no warnings.
    pub fn banner_lines(&self) -> Vec<String> {
        let Some(meta) = self.0.validation_metadata.as_ref().filter(|m| m.has_warnings()) else {
            return Vec::new();
        };
        let mut lines = meta.warning_lines();
        if meta.corruption_score > 0.0 {
            lines.push(format!(
                "Corruption Score: {}",
                format_percentage(meta.corruption_score)
            ));
        }
        lines
    }

    pub fn header_line(&self) -> String {
        format!(
            "Temperature: {} | Top P: {} | Overall Score: {}",
            format_param(self.0.temperature),
            format_param(self.0.top_p),
            format_score(self.0.overall_score())
        )
    }

    pub fn print(&self) {
        let response = self.0;
        print_section(&format!("Response {}", response.id));

        let banner = self.banner_lines();
        if !banner.is_empty() {
            println!("\n{} {}", "⚠".yellow(), "Response Quality Warning".yellow().bold());
            for line in &banner {
                println!("  {} {}", "•".yellow(), line);
            }
        }

        println!("\n{}", self.header_line());
        print_field("Experiment", &response.experiment_id.to_string());
        print_field("Max Tokens", &response.max_tokens.to_string());
        print_optional_field("Finish Reason", response.finish_reason.as_deref());

        print_section("Response Text:");
        println!("{}", response.text);

        print_section("Metrics");
        let metrics: Vec<_> = response
            .metrics
            .iter()
            .filter(|m| m.name != llm_lab_core::OVERALL_SCORE)
            .collect();
        if metrics.is_empty() {
            println!("{}", "No metrics recorded.".dimmed());
            return;
        }
        let mut table = new_table(["Metric", "Score", ""].iter().map(|h| header_cell(h)));
        for metric in metrics {
            table.add_row(vec![
                Cell::new(format_metric_name(&metric.name)),
                Cell::new(format_percentage(metric.value)),
                Cell::new(score_bar(metric.value)),
            ]);
        }
        println!("{table}");
    }
}
