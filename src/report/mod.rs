// 📄 Report Export - dated HTML table + raw CSV
//
// Both artifacts are rendered fully in memory, then written. A write
// failure is fatal and surfaced with the offending path.

pub mod html;
pub mod raw_data;

use crate::score::ScoreReport;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Shown at the bottom of the HTML page and of the console run
pub const DISCLAIMER: &str = "Este projeto é para fins educacionais e informativos apenas. \
Não constitui recomendação de investimento. Os dados estáticos são aproximações baseadas em \
RIs públicos (2024/2025) e podem não refletir a situação atual dos fundos. Consulte sempre \
fontes oficiais (CVM, B3, RIs dos fundos) antes de investir.";

// ============================================================================
// OUTPUT PATHS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub html: PathBuf,
    pub csv: PathBuf,
}

impl OutputPaths {
    /// `resultado_fiis_<YYYY-MM-DD>.html` and `dados_brutos_fiis_<YYYY-MM-DD>.csv`
    pub fn for_date(output_dir: &Path, date: NaiveDate) -> Self {
        let stamp = date.format("%Y-%m-%d");
        OutputPaths {
            html: output_dir.join(format!("resultado_fiis_{}.html", stamp)),
            csv: output_dir.join(format!("dados_brutos_fiis_{}.csv", stamp)),
        }
    }
}

// ============================================================================
// EXPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub paths: OutputPaths,
    pub html_sha256: String,
    pub csv_sha256: String,
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Render both artifacts and write them under `output_dir` (created if missing)
pub fn export(reports: &[ScoreReport], output_dir: &Path, date: NaiveDate) -> Result<ExportSummary> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    let paths = OutputPaths::for_date(output_dir, date);

    let html = html::render(reports, date);
    let csv = raw_data::render(reports).context("Failed to render CSV")?;

    fs::write(&paths.html, html.as_bytes())
        .with_context(|| format!("Failed to write HTML report: {:?}", paths.html))?;
    tracing::info!(path = %paths.html.display(), bytes = html.len(), "HTML report written");

    fs::write(&paths.csv, csv.as_bytes())
        .with_context(|| format!("Failed to write CSV data: {:?}", paths.csv))?;
    tracing::info!(path = %paths.csv.display(), bytes = csv.len(), "CSV data written");

    Ok(ExportSummary {
        html_sha256: sha256_hex(html.as_bytes()),
        csv_sha256: sha256_hex(csv.as_bytes()),
        paths,
    })
}

// ============================================================================
// TESTS
// ============================================================================
