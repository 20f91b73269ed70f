// 📋 Raw data CSV - one row per fund
// Columns: ticker, the raw figure behind each criterion (C1..C20), score
// A disqualified fund's score cell carries DISQUALIFIED_MARKER instead of a number

use crate::criteria::Criterion;
use crate::score::ScoreReport;
use anyhow::{Context, Result};
use std::io;

pub const DISQUALIFIED_MARKER: &str = "DESCARTADO";

pub fn header() -> Vec<String> {
    let mut columns = Vec::with_capacity(Criterion::ALL.len() + 2);
    columns.push("ticker".to_string());
    columns.extend(Criterion::ALL.iter().map(|c| c.column()));
    columns.push("score".to_string());
    columns
}

/// Unpublished figures are written as empty cells
pub fn row(report: &ScoreReport) -> Vec<String> {
    let mut cells = Vec::with_capacity(report.results.len() + 2);
    cells.push(report.ticker.clone());
    cells.extend(
        report
            .results
            .iter()
            .map(|r| r.raw.map(|raw| raw.to_string()).unwrap_or_default()),
    );
    cells.push(score_cell(report));
    cells
}

fn score_cell(report: &ScoreReport) -> String {
    if report.disqualified {
        DISQUALIFIED_MARKER.to_string()
    } else {
        report.score.to_string()
    }
}

pub fn write<W: io::Write>(reports: &[ScoreReport], writer: W) -> Result<()> {
    let mut wtr = ::csv::Writer::from_writer(writer);

    wtr.write_record(header()).context("Failed to write CSV header")?;
    for report in reports {
        wtr.write_record(row(report))
            .with_context(|| format!("Failed to write CSV row for {}", report.ticker))?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn render(reports: &[ScoreReport]) -> Result<String> {
    let mut buffer = Vec::new();
    write(reports, &mut buffer)?;
    String::from_utf8(buffer).context("CSV output is not valid UTF-8")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::CriteriaEngine;
    use crate::dataset;
    use crate::fund::FundRecord;

    fn parse(csv_text: &str) -> (Vec<String>, Vec<Vec<String>>) {
        let mut rdr = ::csv::Reader::from_reader(csv_text.as_bytes());
        let headers = rdr.headers().unwrap().iter().map(String::from).collect();
        let rows = rdr
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        (headers, rows)
    }

    #[test]
    fn test_header_schema() {
        let columns = header();

        assert_eq!(columns.len(), 22);
        assert_eq!(columns[0], "ticker");
        assert_eq!(columns[1], "c1_regioes_nobres");
        assert_eq!(columns[3], "c3_pvp");
        assert_eq!(columns[20], "c20_tem_reserva_1mes");
        assert_eq!(columns[21], "score");
    }

    #[test]
    fn test_values_match_source_constants() {
        let funds = dataset::funds();
        let reports = CriteriaEngine::for_funds(&funds).score_batch(&funds);

        let (headers, rows) = parse(&render(&reports).unwrap());

        assert_eq!(headers, header());
        assert_eq!(rows.len(), funds.len());

        for (fund, row) in funds.iter().zip(&rows) {
            assert_eq!(row[0], fund.ticker);
            assert_eq!(row[1].parse::<bool>().unwrap(), fund.prime_locations.unwrap());
            assert_eq!(row[3].parse::<f64>().unwrap(), fund.pvp.unwrap());
            assert_eq!(row[6].parse::<f64>().unwrap(), fund.dividend_yield_pct.unwrap());
            assert_eq!(row[10].parse::<f64>().unwrap(), fund.vacancy_pct.unwrap());
            assert_eq!(row[15].parse::<f64>().unwrap(), fund.admin_fee_pct.unwrap());
            assert_eq!(row[17].parse::<u32>().unwrap(), fund.daily_liquidity_k_brl.unwrap());
        }

        let hglg = rows.iter().find(|r| r[0] == "HGLG11").unwrap();
        assert_eq!(hglg[3], "1.1");
        assert_eq!(hglg[10], "3.5");
        assert_eq!(hglg[17], "25000");
    }

    #[test]
    fn test_missing_figure_is_empty_cell() {
        let mut fund = FundRecord::new("PART11", "Logística");
        fund.pvp = Some(0.9);
        let report = CriteriaEngine::for_funds(std::slice::from_ref(&fund)).score(&fund);

        let cells = row(&report);

        assert_eq!(cells.len(), 22);
        assert_eq!(cells[1], "");
        assert_eq!(cells[3], "0.9");
        assert_eq!(cells[21], "1");
    }

    #[test]
    fn test_disqualified_score_cell_is_marked() {
        let mut funds = dataset::funds();
        funds[0].vacancy_pct = Some(50.0);
        let btlg = funds.iter_mut().find(|f| f.ticker == "BTLG11").unwrap();
        btlg.pvp = Some(1.6);
        let reports = CriteriaEngine::for_funds(&funds).score_batch(&funds);

        let (_, rows) = parse(&render(&reports).unwrap());

        // same pass count, only the flag differs
        let ggrc = rows.iter().find(|r| r[0] == "GGRC11").unwrap();
        let btlg = rows.iter().find(|r| r[0] == "BTLG11").unwrap();
        assert_eq!(ggrc[21], "19");
        assert_eq!(btlg[3], "1.6");
        assert_eq!(btlg[21], DISQUALIFIED_MARKER);
    }
}
