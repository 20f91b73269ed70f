// 🏆 Score Aggregation - one report per fund, plus ranking
//
// Passes = number of Pass verdicts out of 20. A Disqualify verdict on P/VP
// zeroes the aggregate score but never removes the individual results.

use crate::criteria::{Criterion, CriterionResult, Verdict, CRITERIA_COUNT};
use serde::{Deserialize, Serialize};

// ============================================================================
// SCORE REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub ticker: String,
    pub fund_type: String,
    pub results: Vec<CriterionResult>,
    /// Pass verdicts, regardless of disqualification
    pub passes: usize,
    /// Aggregate score: `passes`, or 0 once disqualified
    pub score: usize,
    pub disqualified: bool,
}

impl ScoreReport {
    pub fn from_results(ticker: &str, fund_type: &str, results: Vec<CriterionResult>) -> Self {
        let passes = results.iter().filter(|r| r.verdict.is_pass()).count();
        let disqualified = results.iter().any(|r| r.verdict == Verdict::Disqualify);

        ScoreReport {
            ticker: ticker.to_string(),
            fund_type: fund_type.to_string(),
            results,
            passes,
            score: if disqualified { 0 } else { passes },
            disqualified,
        }
    }

    pub fn result(&self, criterion: Criterion) -> Option<&CriterionResult> {
        self.results.iter().find(|r| r.criterion == criterion)
    }

    pub fn count(&self, verdict: Verdict) -> usize {
        self.results.iter().filter(|r| r.verdict == verdict).count()
    }

    /// "17/20", counting passes even for a disqualified fund
    pub fn score_label(&self) -> String {
        format!("{}/{}", self.passes, CRITERIA_COUNT)
    }

    pub fn tier(&self) -> Tier {
        Tier::from_score(self.passes)
    }

    pub fn summary(&self) -> String {
        let status = if self.disqualified { " [DESCARTADO]" } else { "" };
        format!(
            "{} ({}): {} pontos, {} falhas, {} neutros, {} N/A{}",
            self.ticker,
            self.fund_type,
            self.score_label(),
            self.count(Verdict::Fail),
            self.count(Verdict::Neutral),
            self.count(Verdict::NotApplicable),
            status
        )
    }
}

// ============================================================================
// TIER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    /// 15 or more passes
    Strong,
    /// 10 to 14 passes
    Moderate,
    Weak,
}

impl Tier {
    pub fn from_score(score: usize) -> Self {
        if score >= 15 {
            Tier::Strong
        } else if score >= 10 {
            Tier::Moderate
        } else {
            Tier::Weak
        }
    }
}

// ============================================================================
// RANKING
// ============================================================================

/// Highest pass count first; disqualified funds last; ties keep input order
pub fn rank(reports: &[ScoreReport]) -> Vec<&ScoreReport> {
    let mut ranked: Vec<&ScoreReport> = reports.iter().collect();
    ranked.sort_by(|a, b| {
        a.disqualified
            .cmp(&b.disqualified)
            .then_with(|| b.passes.cmp(&a.passes))
    });
    ranked
}

// ============================================================================
// BATCH SUMMARY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_funds: usize,
    pub disqualified_count: usize,
    pub strong_count: usize,
    pub average_score: f64,
    pub best_ticker: Option<String>,
}

impl BatchSummary {
    pub fn from_reports(reports: &[ScoreReport]) -> Self {
        let qualified: Vec<&ScoreReport> = reports.iter().filter(|r| !r.disqualified).collect();
        let average_score = if qualified.is_empty() {
            0.0
        } else {
            qualified.iter().map(|r| r.score).sum::<usize>() as f64 / qualified.len() as f64
        };

        BatchSummary {
            total_funds: reports.len(),
            disqualified_count: reports.iter().filter(|r| r.disqualified).count(),
            strong_count: reports
                .iter()
                .filter(|r| !r.disqualified && r.tier() == Tier::Strong)
                .count(),
            average_score,
            best_ticker: rank(reports)
                .first()
                .filter(|r| !r.disqualified)
                .map(|r| r.ticker.clone()),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} fundos: média {:.1}/{} | {} fortes, {} descartados | melhor: {}",
            self.total_funds,
            self.average_score,
            CRITERIA_COUNT,
            self.strong_count,
            self.disqualified_count,
            self.best_ticker.as_deref().unwrap_or("-")
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_report(ticker: &str, passes: usize, pvp_verdict: Verdict) -> ScoreReport {
        let results = Criterion::ALL
            .iter()
            .enumerate()
            .map(|(i, criterion)| {
                let verdict = if *criterion == Criterion::PriceToBook {
                    pvp_verdict
                } else if i < passes {
                    Verdict::Pass
                } else {
                    Verdict::Fail
                };
                CriterionResult {
                    criterion: *criterion,
                    verdict,
                    raw: None,
                }
            })
            .collect();

        ScoreReport::from_results(ticker, "Logística", results)
    }

    #[test]
    fn test_score_counts_only_passes() {
        let report = create_report("AAAA11", 12, Verdict::Neutral);

        // C3 sits inside the first 12 but is Neutral
        assert_eq!(report.passes, 11);
        assert_eq!(report.score, 11);
        assert_eq!(report.count(Verdict::Neutral), 1);
        assert_eq!(report.count(Verdict::Fail), 8);
        assert_eq!(report.score_label(), "11/20");
        assert!(!report.disqualified);
    }

    #[test]
    fn test_disqualification_overrides_other_results() {
        let report = create_report("AAAA11", 20, Verdict::Disqualify);

        assert!(report.disqualified);
        assert_eq!(report.passes, 19);
        assert_eq!(report.score, 0);
        assert_eq!(report.score_label(), "19/20");
        assert_eq!(report.results.len(), CRITERIA_COUNT);
        assert_eq!(
            report.result(Criterion::PriceToBook).map(|r| r.verdict),
            Some(Verdict::Disqualify)
        );
        assert!(report.summary().contains("DESCARTADO"));
    }

    #[test]
    fn test_tiers() {
        assert_eq!(Tier::from_score(20), Tier::Strong);
        assert_eq!(Tier::from_score(15), Tier::Strong);
        assert_eq!(Tier::from_score(14), Tier::Moderate);
        assert_eq!(Tier::from_score(10), Tier::Moderate);
        assert_eq!(Tier::from_score(9), Tier::Weak);
    }

    #[test]
    fn test_rank_is_stable_and_pushes_disqualified_last() {
        let reports = vec![
            create_report("LOW11", 8, Verdict::Pass),
            create_report("DQ11", 20, Verdict::Disqualify),
            create_report("TIEA11", 15, Verdict::Pass),
            create_report("TIEB11", 15, Verdict::Pass),
        ];

        let ranked: Vec<&str> = rank(&reports).iter().map(|r| r.ticker.as_str()).collect();

        assert_eq!(ranked, vec!["TIEA11", "TIEB11", "LOW11", "DQ11"]);
    }

    #[test]
    fn test_batch_summary() {
        let reports = vec![
            create_report("AAAA11", 16, Verdict::Pass),
            create_report("BBBB11", 10, Verdict::Pass),
            create_report("CCCC11", 20, Verdict::Disqualify),
        ];

        let summary = BatchSummary::from_reports(&reports);

        println!("Batch summary: {}", summary.summary());

        assert_eq!(summary.total_funds, 3);
        assert_eq!(summary.disqualified_count, 1);
        assert_eq!(summary.strong_count, 1);
        assert_eq!(summary.best_ticker.as_deref(), Some("AAAA11"));
        // CCCC11 stays out of the average
        assert!((summary.average_score - 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_batch_summary_all_disqualified() {
        let reports = vec![create_report("DQ11", 18, Verdict::Disqualify)];

        let summary = BatchSummary::from_reports(&reports);

        assert_eq!(summary.disqualified_count, 1);
        assert_eq!(summary.average_score, 0.0);
        assert_eq!(summary.best_ticker, None);
    }

    #[test]
    fn test_batch_summary_empty() {
        let summary = BatchSummary::from_reports(&[]);
        assert_eq!(summary.total_funds, 0);
        assert_eq!(summary.average_score, 0.0);
        assert_eq!(summary.best_ticker, None);
    }
}
