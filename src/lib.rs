// Ticker Analyzer - Core Library
// Scores ten Brazilian real-estate funds (FIIs) against 20 quality criteria
// and renders the results as a dated HTML table and a raw-data CSV.

pub mod fund;
pub mod dataset;
pub mod criteria;
pub mod score;
pub mod report;
pub mod terminal;
pub mod pipeline;

// Re-export commonly used types
pub use fund::{FundRecord, RawValue};
pub use dataset::{DatasetError, TICKERS};
pub use criteria::{
    classify_pvp, CriteriaEngine, Criterion, CriterionResult, SectorBenchmarks, Verdict,
    CRITERIA_COUNT,
};
pub use score::{rank, BatchSummary, ScoreReport, Tier};
pub use report::{export, ExportSummary, OutputPaths, DEFAULT_OUTPUT_DIR, DISCLAIMER};
pub use terminal::Palette;
pub use pipeline::{run, RunConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Validate the records, then score each one against all 20 criteria
///
/// The C6 sector benchmark is derived from the same records.
pub fn analyze(funds: &[FundRecord]) -> Result<Vec<ScoreReport>, DatasetError> {
    dataset::validate(funds)?;
    let engine = CriteriaEngine::for_funds(funds);
    Ok(engine.score_batch(funds))
}
