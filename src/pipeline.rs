// 🚀 Run Pipeline - validate, score, export, print
//
// One call per invocation. Console text goes to stdout; logs go wherever
// the subscriber installed by the binary sends them.

use crate::dataset;
use crate::report::{export, ExportSummary, DEFAULT_OUTPUT_DIR, DISCLAIMER};
use crate::score::{BatchSummary, ScoreReport};
use crate::terminal::{render_grid, render_ranking, Palette, BANNER};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use crossterm::style::Color;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub output_dir: PathBuf,
    /// Run date for file names and the report; today when unset
    pub date: Option<NaiveDate>,
    pub json: bool,
    pub color: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            date: None,
            json: false,
            color: true,
        }
    }
}

impl RunConfig {
    pub fn run_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Analyze the embedded dataset, write both files, then print the console
/// report (or JSON)
pub fn run(config: &RunConfig) -> Result<ExportSummary> {
    let date = config.run_date();

    let funds = dataset::funds();
    let reports = crate::analyze(&funds).context("Embedded fund data failed validation")?;
    tracing::info!(funds = reports.len(), %date, "funds scored");

    let summary = export(&reports, &config.output_dir, date)?;
    tracing::debug!(
        html_sha256 = %summary.html_sha256,
        csv_sha256 = %summary.csv_sha256,
        "artifact digests"
    );

    let output = if config.json {
        render_json(&reports, &summary, date)?
    } else {
        render_console(&reports, &summary, Palette::new(config.color))
    };
    print!("{}", output);

    Ok(summary)
}

pub fn render_json(reports: &[ScoreReport], summary: &ExportSummary, date: NaiveDate) -> Result<String> {
    let out = serde_json::json!({
        "date": date.format("%Y-%m-%d").to_string(),
        "html": summary.paths.html,
        "csv": summary.paths.csv,
        "summary": BatchSummary::from_reports(reports),
        "reports": reports,
    });
    let text = serde_json::to_string_pretty(&out).context("Failed to serialize reports as JSON")?;
    Ok(format!("{}\n", text))
}

pub fn render_console(reports: &[ScoreReport], summary: &ExportSummary, palette: Palette) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", palette.paint(BANNER, Color::Cyan, false)));
    out.push_str("  RESULTADO DA ANÁLISE - 20 CRITÉRIOS DE QUALIDADE\n\n");
    out.push_str(&render_grid(reports, palette));

    out.push_str("\n💾 Arquivos exportados:\n");
    out.push_str(&format!("  📄 HTML salvo em: {}\n", summary.paths.html.display()));
    out.push_str(&format!("  📋 CSV salvo em: {}\n", summary.paths.csv.display()));

    out.push('\n');
    out.push_str(&render_ranking(reports, palette));
    out.push_str(&format!("\n  {}\n", BatchSummary::from_reports(reports).summary()));

    let rule = "─".repeat(70);
    out.push_str(&format!(
        "\n{}\n",
        palette.paint(&format!("{}\n⚠️  {}\n{}", rule, DISCLAIMER, rule), Color::Yellow, false)
    ));

    out
}
