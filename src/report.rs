//! `summary` subcommand: overall and per-category statistics of the target
//! column, printed as a labeled block plus a grid table (or as JSON).

use std::fmt::Write as _;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::{
    category,
    cli::SummaryArgs,
    dataset::Dataset,
    stats::{self, GroupSummary, Summary},
    table::{self, Alignment},
};

pub const NOT_AVAILABLE: &str = "N/A";
const SECTION_RULE_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub target: String,
    pub category_column: String,
    pub overall: Summary,
    pub groups: Vec<GroupSummary>,
}

impl SummaryReport {
    /// Resolves the category column and aggregates `target` overall and per group.
    pub fn build(dataset: &Dataset, target: &str, requested_category: Option<&str>) -> Result<Self> {
        let overall = stats::summarize_column(dataset, target)?;
        let category = category::select_category_column(dataset, requested_category)?;
        let groups = stats::summarize_by_group(dataset, target, category)?;
        Ok(Self {
            target: target.to_string(),
            category_column: dataset.columns()[category].name().to_string(),
            overall,
            groups,
        })
    }

    pub fn render(&self) -> String {
        let mut output = String::new();
        output.push_str(&section_header(&format!(
            "Overall Statistics ({})",
            self.target
        )));
        output.push_str(&render_overall(&self.overall));
        output.push('\n');
        output.push_str(&section_header(&format!(
            "Summary by Category ({})",
            self.category_column
        )));
        output.push_str(&render_groups(&self.category_column, &self.groups));
        output
    }
}

pub fn execute(args: &SummaryArgs) -> Result<()> {
    let source = &args.source;
    let dataset = Dataset::open(
        &source.input,
        source.delimiter,
        source.input_encoding.as_deref(),
    )?;

    let report = SummaryReport::build(&dataset, &args.target, args.category.as_deref())?;
    if args.json {
        let rendered =
            serde_json::to_string_pretty(&report).context("Serializing summary report")?;
        println!("{rendered}");
    } else {
        print!("{}", report.render());
    }
    info!(
        "Summarized '{}' across {} group(s) of '{}'",
        report.target,
        report.groups.len(),
        report.category_column
    );
    Ok(())
}

fn section_header(title: &str) -> String {
    let rule = "-".repeat(SECTION_RULE_WIDTH);
    format!("{rule}\n {title}\n{rule}\n")
}

pub fn render_overall(summary: &Summary) -> String {
    let lines = [
        ("Count", summary.count.to_string()),
        ("Median", format_statistic(summary.median)),
        ("Mode", format_statistic(summary.mode)),
        ("Mean", format_statistic(summary.mean)),
        ("Min", format_statistic(summary.min)),
        ("Max", format_statistic(summary.max)),
    ];
    let mut output = String::new();
    for (label, value) in lines {
        let _ = writeln!(output, "- {label:<8}: {value}");
    }
    output
}

pub fn render_groups(category_column: &str, groups: &[GroupSummary]) -> String {
    let headers = [category_column, "count", "median", "mode", "mean", "min", "max"]
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();
    let rows = groups
        .iter()
        .map(|group| {
            let summary = &group.summary;
            vec![
                group.category.as_display(),
                summary.count.to_string(),
                format_statistic(summary.median),
                format_statistic(summary.mode),
                format_statistic(summary.mean),
                format_statistic(summary.min),
                format_statistic(summary.max),
            ]
        })
        .collect::<Vec<_>>();
    let mut alignments = vec![Alignment::Left];
    alignments.extend(std::iter::repeat_n(Alignment::Right, headers.len() - 1));
    table::render_grid(&headers, &rows, &alignments)
}

pub fn format_statistic(value: Option<f64>) -> String {
    value
        .map(format_number)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
