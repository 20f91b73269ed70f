// 🌐 HTML report - one row per fund, one column per criterion
//
// Verdicts map to CSS classes (sim / nao / neutro / descartar / na).
// Output depends only on the reports and the run date.

use super::DISCLAIMER;
use crate::criteria::{Criterion, Verdict};
use crate::score::ScoreReport;
use chrono::NaiveDate;

const STYLESHEET: &str = include_str!("../../assets/report.css");

pub const TITLE: &str = "Ticker Analyzer - Análise de FIIs Brasileiros";

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn render(reports: &[ScoreReport], date: NaiveDate) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n");
    html.push_str("  <meta charset=\"UTF-8\" />\n");
    html.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n",
    );
    html.push_str(&format!("  <title>{}</title>\n", escape_html(TITLE)));
    html.push_str(&format!("  <style>\n{}  </style>\n", STYLESHEET));
    html.push_str("</head>\n<body>\n");

    html.push_str(&format!("  <h1>{}</h1>\n", escape_html(TITLE)));
    html.push_str(&format!(
        "  <p class=\"meta\">Gerado em: <strong>{}</strong> | Fonte: dados estáticos (RIs públicos 2024/2025)</p>\n",
        date.format("%d/%m/%Y")
    ));

    html.push_str("  <table>\n");
    html.push_str(&render_header());
    html.push_str("    <tbody>\n");
    for report in reports {
        html.push_str(&render_row(report));
    }
    html.push_str("    </tbody>\n  </table>\n");

    html.push_str(&render_legend());
    html.push_str(&render_criteria_list());

    html.push_str("  <hr />\n");
    html.push_str(&format!(
        "  <p class=\"disclaimer\"><strong>Aviso:</strong> {}</p>\n",
        escape_html(DISCLAIMER)
    ));
    html.push_str("</body>\n</html>\n");

    html
}

fn render_header() -> String {
    let mut header = String::from("    <thead>\n      <tr>\n        <th>Ticker</th>\n");
    for criterion in Criterion::ALL.iter() {
        header.push_str(&format!(
            "        <th title=\"{}\">{}</th>\n",
            escape_html(criterion.description()),
            criterion.code()
        ));
    }
    header.push_str("        <th>Pontuação</th>\n      </tr>\n    </thead>\n");
    header
}

fn render_row(report: &ScoreReport) -> String {
    let row_class = if report.disqualified { " class=\"descartado\"" } else { "" };
    let mut row = format!(
        "      <tr{}>\n        <th scope=\"row\" title=\"{}\">{}</th>\n",
        row_class,
        escape_html(&report.fund_type),
        escape_html(&report.ticker)
    );

    for result in &report.results {
        let value = result
            .raw
            .map(|raw| raw.to_string())
            .unwrap_or_else(|| "sem dado".to_string());
        row.push_str(&format!(
            "        <td class=\"{}\" title=\"{} {}: {}\">{}</td>\n",
            result.verdict.css_class(),
            result.criterion.code(),
            escape_html(result.criterion.description()),
            escape_html(&value),
            escape_html(result.verdict.label())
        ));
    }

    let score = if report.disqualified {
        format!("{} (descartado)", report.score_label())
    } else {
        report.score_label()
    };
    row.push_str(&format!("        <td class=\"pontos\">{}</td>\n      </tr>\n", score));
    row
}

fn render_legend() -> String {
    let mut legend = String::from("  <p class=\"legenda\">\n");
    for verdict in [
        Verdict::Pass,
        Verdict::Fail,
        Verdict::Neutral,
        Verdict::Disqualify,
        Verdict::NotApplicable,
    ] {
        legend.push_str(&format!(
            "    <span class=\"{}\">{}</span>\n",
            verdict.css_class(),
            escape_html(verdict.label())
        ));
    }
    legend.push_str("  </p>\n");
    legend
}

fn render_criteria_list() -> String {
    let mut list = String::from("  <h2>Critérios</h2>\n  <ol>\n");
    for criterion in Criterion::ALL.iter() {
        list.push_str(&format!("    <li>{}</li>\n", escape_html(criterion.description())));
    }
    list.push_str("  </ol>\n");
    list
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::CriteriaEngine;
    use crate::dataset;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
    }

    fn dataset_reports() -> Vec<ScoreReport> {
        let funds = dataset::funds();
        CriteriaEngine::for_funds(&funds).score_batch(&funds)
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("< 10% & \"x\""), "&lt; 10% &amp; &quot;x&quot;");
        assert_eq!(escape_html("Vacância"), "Vacância");
    }

    #[test]
    fn test_one_row_per_fund() {
        let reports = dataset_reports();
        let html = render(&reports, date());

        assert_eq!(html.matches("<th scope=\"row\"").count(), reports.len());
        for ticker in dataset::TICKERS {
            assert!(html.contains(&format!(">{}</th>", ticker)));
        }
        assert!(html.contains("Gerado em: <strong>31/01/2025</strong>"));
    }

    #[test]
    fn test_cells_use_verdict_classes() {
        let reports = dataset_reports();
        let html = render(&reports, date());

        let cells = html.matches("<td class=\"sim\"").count()
            + html.matches("<td class=\"nao\"").count()
            + html.matches("<td class=\"neutro\"").count()
            + html.matches("<td class=\"descartar\"").count()
            + html.matches("<td class=\"na\"").count();
        assert_eq!(cells, reports.len() * Criterion::ALL.len());

        // HGLG11 trades at 1.10 P/VP: neutral, not a pass
        assert!(html.contains("<td class=\"neutro\" title=\"C3 P/VP abaixo de 1,0: 1.1\">NEUTRO</td>"));
    }

    #[test]
    fn test_disqualified_row_is_marked() {
        let mut funds = dataset::funds();
        funds[0].pvp = Some(1.7);
        let reports = CriteriaEngine::for_funds(&funds).score_batch(&funds);

        let html = render(&reports, date());

        assert!(html.contains("<tr class=\"descartado\">"));
        assert!(html.contains(">DESCARTAR</td>"));
        assert!(html.contains("(descartado)</td>"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let reports = dataset_reports();
        assert_eq!(render(&reports, date()), render(&reports, date()));
    }
}
