// 🖨️ Console output - grid table, ranking, banner
// Colors come from crossterm styling and can be switched off entirely.

use crate::criteria::{Criterion, Verdict};
use crate::score::{rank, ScoreReport, Tier};
use crossterm::style::{style, Attribute, Color, Stylize};

pub const BANNER: &str = r"
╔══════════════════════════════════════════════════════════╗
║     TICKER ANALYZER - Análise de FIIs Brasileiros        ║
║          20 Critérios de Qualidade por Fundo             ║
╚══════════════════════════════════════════════════════════╝
";

// ============================================================================
// PALETTE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Palette { enabled }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn paint(&self, text: &str, color: Color, bold: bool) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let styled = style(text).with(color);
        if bold {
            styled.attribute(Attribute::Bold).to_string()
        } else {
            styled.to_string()
        }
    }

    pub fn verdict(&self, text: &str, verdict: Verdict) -> String {
        match verdict {
            Verdict::Pass => self.paint(text, Color::Green, false),
            Verdict::Fail => self.paint(text, Color::Red, false),
            Verdict::Neutral => self.paint(text, Color::Yellow, false),
            Verdict::Disqualify => self.paint(text, Color::Red, true),
            Verdict::NotApplicable => self.paint(text, Color::DarkGrey, false),
        }
    }

    pub fn tier(&self, text: &str, tier: Tier) -> String {
        match tier {
            Tier::Strong => self.paint(text, Color::Green, true),
            Tier::Moderate => self.paint(text, Color::Yellow, true),
            Tier::Weak => self.paint(text, Color::Red, true),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(true)
    }
}

// ============================================================================
// GRID TABLE
// ============================================================================

enum Tint {
    None,
    Verdict(Verdict),
    Score,
}

struct GridCell {
    text: String,
    tint: Tint,
}

impl GridCell {
    fn plain(text: impl Into<String>) -> Self {
        GridCell {
            text: text.into(),
            tint: Tint::None,
        }
    }
}

/// Criteria as rows, one column per fund, score row at the bottom
pub fn render_grid(reports: &[ScoreReport], palette: Palette) -> String {
    let mut headers = vec!["#".to_string(), "Critério".to_string()];
    headers.extend(reports.iter().map(|r| r.ticker.clone()));

    let mut rows: Vec<Vec<GridCell>> = Criterion::ALL
        .iter()
        .map(|criterion| {
            let mut row = vec![
                GridCell::plain(criterion.code()),
                GridCell::plain(criterion.description()),
            ];
            for report in reports {
                let cell = match report.result(*criterion) {
                    Some(result) => GridCell {
                        text: result.verdict.label().to_string(),
                        tint: Tint::Verdict(result.verdict),
                    },
                    None => GridCell::plain("-"),
                };
                row.push(cell);
            }
            row
        })
        .collect();

    let mut score_row = vec![GridCell::plain("-"), GridCell::plain("PONTUAÇÃO (SIM)")];
    score_row.extend(reports.iter().map(|r| GridCell {
        text: r.score_label(),
        tint: Tint::Score,
    }));
    rows.push(score_row);

    grid(&headers, &rows, palette)
}

fn grid(headers: &[String], rows: &[Vec<GridCell>], palette: Palette) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.text.chars().count());
            }
        }
    }

    let separator = |fill: char| -> String {
        let mut line = String::from("+");
        for width in &widths {
            line.extend(std::iter::repeat(fill).take(width + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };

    let mut out = separator('-');

    out.push('|');
    for (header, width) in headers.iter().zip(&widths) {
        out.push_str(&format!(" {:<width$} |", header, width = width));
    }
    out.push('\n');
    out.push_str(&separator('='));

    for row in rows {
        out.push('|');
        for (cell, width) in row.iter().zip(&widths) {
            let padded = format!("{:<width$}", cell.text, width = width);
            let painted = match cell.tint {
                Tint::None => padded,
                Tint::Verdict(verdict) => palette.verdict(&padded, verdict),
                Tint::Score => palette.paint(&padded, Color::Cyan, true),
            };
            out.push_str(&format!(" {} |", painted));
        }
        out.push('\n');
        out.push_str(&separator('-'));
    }

    out
}

// ============================================================================
// RANKING
// ============================================================================

pub fn render_ranking(reports: &[ScoreReport], palette: Palette) -> String {
    let rule = "=".repeat(50);
    let mut out = format!(
        "{}\n",
        palette.paint(&format!("{}\n  RANKING FINAL - Pontuação por Fundo\n{}", rule, rule), Color::Cyan, true)
    );

    for (position, report) in rank(reports).iter().enumerate() {
        let tier = report.tier();
        let mut line = format!(
            "  {:>2}. {}  -  {}",
            position + 1,
            palette.tier(&report.ticker, tier),
            palette.tier(&format!("{} pontos", report.score_label()), tier)
        );
        if report.disqualified {
            line.push_str(&format!("  {}", palette.verdict("DESCARTADO", Verdict::Disqualify)));
        }
        out.push_str(&line);
        out.push('\n');
    }

    out
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::CriteriaEngine;
    use crate::dataset;

    fn dataset_reports() -> Vec<ScoreReport> {
        let funds = dataset::funds();
        CriteriaEngine::for_funds(&funds).score_batch(&funds)
    }

    #[test]
    fn test_plain_palette_adds_no_escape_codes() {
        let palette = Palette::plain();
        assert_eq!(palette.verdict("SIM", Verdict::Pass), "SIM");
        assert_eq!(palette.tier("HGLG11", Tier::Strong), "HGLG11");
    }

    #[test]
    fn test_colored_palette_wraps_text() {
        let painted = Palette::default().verdict("DESCARTAR", Verdict::Disqualify);
        assert!(painted.contains("DESCARTAR"));
        assert!(painted.contains('\u{1b}'));
    }

    #[test]
    fn test_grid_layout() {
        let reports = dataset_reports();
        let table = render_grid(&reports, Palette::plain());

        let lines: Vec<&str> = table.lines().collect();
        // top rule + header + '=' rule + (20 criteria + score) * 2
        assert_eq!(lines.len(), 3 + 21 * 2);
        assert!(lines[1].contains("GGRC11") && lines[1].contains("JURO11"));
        assert!(table.contains("PONTUAÇÃO (SIM)"));

        // every line has the same visible width
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn test_ranking_lists_every_fund_once() {
        let reports = dataset_reports();
        let ranking = render_ranking(&reports, Palette::plain());

        for ticker in dataset::TICKERS {
            assert_eq!(ranking.matches(ticker).count(), 1, "{}", ticker);
        }
        assert!(ranking.contains(" 1. "));
        assert!(ranking.contains("10. "));
    }
}
