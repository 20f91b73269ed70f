// ✅ Criteria Engine - 20 fixed quality checks per fund
// Each check is a pure comparison of one FundRecord field against a constant
//
// Verdicts: Pass / Fail, plus Neutral and Disqualify for the P/VP band,
// and NotApplicable when the fund does not publish the figure.

use crate::fund::{FundRecord, RawValue};
use crate::score::ScoreReport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// THRESHOLDS
// ============================================================================

pub const MAX_PROPERTY_AGE_YEARS: u32 = 15;
pub const PVP_PASS_BELOW: f64 = 1.0;
pub const PVP_DISQUALIFY_ABOVE: f64 = 1.5;
pub const MIN_DIVIDEND_TRACK_YEARS: u32 = 4;
pub const MAX_TOP_TENANT_SHARE_PCT: u32 = 30;
pub const MAX_NET_DEBT_TO_EQUITY_PCT: u32 = 50;
pub const MAX_YEARS_TO_REPAY_DEBT: f64 = 4.0;
pub const MAX_VACANCY_PCT: f64 = 10.0;
pub const MAX_OTHER_FII_HOLDINGS_PCT: u32 = 10;
pub const MIN_CAP_RATE_PCT: f64 = 8.0;
pub const MIN_STATES: u32 = 3;
pub const MAX_ADMIN_FEE_PCT: f64 = 1.5;
pub const MAX_ISSUANCES_24M: u32 = 2;
pub const MIN_DAILY_LIQUIDITY_K_BRL: u32 = 1000;
pub const MIN_INVESTMENT_GRADE_PCT: u32 = 70;
pub const MIN_CONTRACT_TERM_YEARS: u32 = 5;

/// Used for C6 when no fund in the dataset publishes a yield
pub const FALLBACK_SECTOR_YIELD_PCT: f64 = 10.0;

pub const CRITERIA_COUNT: usize = 20;

// ============================================================================
// CRITERION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Criterion {
    PrimeLocations,
    NewProperties,
    PriceToBook,
    DividendTrack,
    TenantConcentration,
    DividendYield,
    NoDerivatives,
    Leverage,
    DebtPayback,
    Vacancy,
    FundOfFunds,
    CapRate,
    BookValueGrowth,
    GeographicSpread,
    AdminFee,
    Issuances,
    Liquidity,
    InvestmentGrade,
    ContractTerm,
    CashReserve,
}

impl Criterion {
    /// All criteria in report order (C1..C20)
    pub const ALL: [Criterion; CRITERIA_COUNT] = [
        Criterion::PrimeLocations,
        Criterion::NewProperties,
        Criterion::PriceToBook,
        Criterion::DividendTrack,
        Criterion::TenantConcentration,
        Criterion::DividendYield,
        Criterion::NoDerivatives,
        Criterion::Leverage,
        Criterion::DebtPayback,
        Criterion::Vacancy,
        Criterion::FundOfFunds,
        Criterion::CapRate,
        Criterion::BookValueGrowth,
        Criterion::GeographicSpread,
        Criterion::AdminFee,
        Criterion::Issuances,
        Criterion::Liquidity,
        Criterion::InvestmentGrade,
        Criterion::ContractTerm,
        Criterion::CashReserve,
    ];

    /// 1-based position in the criteria table
    pub fn number(&self) -> usize {
        *self as usize + 1
    }

    /// Short code shown in table headers ("C1".."C20")
    pub fn code(&self) -> String {
        format!("C{}", self.number())
    }

    pub fn description(&self) -> &'static str {
        match self {
            Criterion::PrimeLocations => "Imóveis em regiões nobres",
            Criterion::NewProperties => "Propriedades novas (< 15 anos)",
            Criterion::PriceToBook => "P/VP abaixo de 1,0",
            Criterion::DividendTrack => "Dividendos consistentes > 4 anos",
            Criterion::TenantConcentration => "Sem dependência de único inquilino (< 30%)",
            Criterion::DividendYield => "Dividend Yield acima da média do setor",
            Criterion::NoDerivatives => "Gestão sem derivativos/opções",
            Criterion::Leverage => "Dívida líquida/PL < 50%",
            Criterion::DebtPayback => "< 4 anos de lucro para quitar dívidas",
            Criterion::Vacancy => "Vacância < 10%",
            Criterion::FundOfFunds => "< 10% em cotas de outros FIIs",
            Criterion::CapRate => "Cap Rate > 8% a.a.",
            Criterion::BookValueGrowth => "Cota patrimonial valorizada (3 anos)",
            Criterion::GeographicSpread => "Imóveis em >= 3 estados",
            Criterion::AdminFee => "Taxa adm + gestão < 1,5% a.a.",
            Criterion::Issuances => "< 2 emissões nos últimos 24 meses",
            Criterion::Liquidity => "Liquidez diária > R$ 1 milhão",
            Criterion::InvestmentGrade => "> 70% inquilinos investment grade",
            Criterion::ContractTerm => "Prazo médio contratos > 5 anos",
            Criterion::CashReserve => "Reserva >= 1 mês de distribuição",
        }
    }

    /// Name of the raw figure the criterion reads, used as CSV column suffix
    pub fn field(&self) -> &'static str {
        match self {
            Criterion::PrimeLocations => "regioes_nobres",
            Criterion::NewProperties => "idade_media_anos",
            Criterion::PriceToBook => "pvp",
            Criterion::DividendTrack => "anos_dividendos",
            Criterion::TenantConcentration => "concentracao_maior_inquilino_pct",
            Criterion::DividendYield => "dy_anual_pct",
            Criterion::NoDerivatives => "usa_derivativos",
            Criterion::Leverage => "divida_pl_pct",
            Criterion::DebtPayback => "anos_quitar_divida",
            Criterion::Vacancy => "vacancia_pct",
            Criterion::FundOfFunds => "pct_cotas_outros_fiis",
            Criterion::CapRate => "cap_rate_pct",
            Criterion::BookValueGrowth => "valorizou_cota_3anos",
            Criterion::GeographicSpread => "num_estados",
            Criterion::AdminFee => "taxa_adm_gestao_pct",
            Criterion::Issuances => "emissoes_24meses",
            Criterion::Liquidity => "liquidez_diaria_mil_reais",
            Criterion::InvestmentGrade => "pct_inquilinos_investment_grade",
            Criterion::ContractTerm => "prazo_medio_contratos_anos",
            Criterion::CashReserve => "tem_reserva_1mes",
        }
    }

    /// CSV column name, e.g. "c10_vacancia_pct"
    pub fn column(&self) -> String {
        format!("c{}_{}", self.number(), self.field())
    }
}

// ============================================================================
// VERDICT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Pass,
    Fail,
    /// P/VP between 1.0 and 1.5: neither a pass nor a fail
    Neutral,
    /// P/VP above 1.5: the whole fund is discarded
    Disqualify,
    /// The fund does not publish the figure
    NotApplicable,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Pass => "SIM",
            Verdict::Fail => "NÃO",
            Verdict::Neutral => "NEUTRO",
            Verdict::Disqualify => "DESCARTAR",
            Verdict::NotApplicable => "N/A",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Verdict::Pass => "sim",
            Verdict::Fail => "nao",
            Verdict::Neutral => "neutro",
            Verdict::Disqualify => "descartar",
            Verdict::NotApplicable => "na",
        }
    }

    pub fn is_pass(&self) -> bool {
        *self == Verdict::Pass
    }
}

// ============================================================================
// CRITERION RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionResult {
    pub criterion: Criterion,
    pub verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawValue>,
}

impl CriterionResult {
    pub fn new(criterion: Criterion, verdict: Verdict, raw: RawValue) -> Self {
        CriterionResult {
            criterion,
            verdict,
            raw: Some(raw),
        }
    }

    pub fn not_applicable(criterion: Criterion) -> Self {
        CriterionResult {
            criterion,
            verdict: Verdict::NotApplicable,
            raw: None,
        }
    }
}

/// Three-way P/VP rule for C3
pub fn classify_pvp(pvp: f64) -> Verdict {
    if pvp > PVP_DISQUALIFY_ABOVE {
        Verdict::Disqualify
    } else if pvp < PVP_PASS_BELOW {
        Verdict::Pass
    } else {
        Verdict::Neutral
    }
}

fn judge<T>(criterion: Criterion, value: Option<T>, passes: impl FnOnce(T) -> bool) -> CriterionResult
where
    T: Copy + Into<RawValue>,
{
    match value {
        Some(v) => {
            let verdict = if passes(v) { Verdict::Pass } else { Verdict::Fail };
            CriterionResult::new(criterion, verdict, v.into())
        }
        None => CriterionResult::not_applicable(criterion),
    }
}

// ============================================================================
// SECTOR BENCHMARKS
// ============================================================================

/// Mean dividend yield per fund type, computed from the evaluated dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectorBenchmarks {
    by_type: BTreeMap<String, f64>,
    overall: Option<f64>,
}

impl SectorBenchmarks {
    pub fn from_funds(funds: &[FundRecord]) -> Self {
        let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        let mut total = 0.0;
        let mut count = 0usize;

        for fund in funds {
            if let Some(dy) = fund.dividend_yield_pct {
                let entry = sums.entry(fund.fund_type.clone()).or_insert((0.0, 0));
                entry.0 += dy;
                entry.1 += 1;
                total += dy;
                count += 1;
            }
        }

        let by_type = sums
            .into_iter()
            .map(|(fund_type, (sum, n))| (fund_type, sum / n as f64))
            .collect();

        SectorBenchmarks {
            by_type,
            overall: (count > 0).then(|| total / count as f64),
        }
    }

    /// Mean yield for the sector, falling back to the dataset mean, then to a constant
    pub fn mean_for(&self, fund_type: &str) -> f64 {
        self.by_type
            .get(fund_type)
            .copied()
            .or(self.overall)
            .unwrap_or(FALLBACK_SECTOR_YIELD_PCT)
    }
}

// ============================================================================
// CRITERIA ENGINE
// ============================================================================

pub struct CriteriaEngine {
    benchmarks: SectorBenchmarks,
}

impl CriteriaEngine {
    pub fn new(benchmarks: SectorBenchmarks) -> Self {
        CriteriaEngine { benchmarks }
    }

    /// Engine whose C6 benchmark is derived from the funds being scored
    pub fn for_funds(funds: &[FundRecord]) -> Self {
        Self::new(SectorBenchmarks::from_funds(funds))
    }

    pub fn benchmarks(&self) -> &SectorBenchmarks {
        &self.benchmarks
    }

    /// Apply all 20 criteria, in order, exactly once
    pub fn evaluate(&self, fund: &FundRecord) -> Vec<CriterionResult> {
        Criterion::ALL
            .iter()
            .map(|criterion| self.check(*criterion, fund))
            .collect()
    }

    /// Evaluate and aggregate one fund
    pub fn score(&self, fund: &FundRecord) -> ScoreReport {
        let report = ScoreReport::from_results(&fund.ticker, &fund.fund_type, self.evaluate(fund));
        tracing::debug!(
            ticker = %report.ticker,
            passes = report.passes,
            score = report.score,
            disqualified = report.disqualified,
            "fund scored"
        );
        report
    }

    /// Evaluate and aggregate every fund, keeping input order
    pub fn score_batch(&self, funds: &[FundRecord]) -> Vec<ScoreReport> {
        funds.iter().map(|fund| self.score(fund)).collect()
    }

    pub fn check(&self, criterion: Criterion, fund: &FundRecord) -> CriterionResult {
        match criterion {
            Criterion::PrimeLocations => judge(criterion, fund.prime_locations, |v| v),
            Criterion::NewProperties => {
                judge(criterion, fund.avg_property_age_years, |v| v < MAX_PROPERTY_AGE_YEARS)
            }
            Criterion::PriceToBook => match fund.pvp {
                Some(pvp) => CriterionResult::new(criterion, classify_pvp(pvp), pvp.into()),
                None => CriterionResult::not_applicable(criterion),
            },
            Criterion::DividendTrack => {
                judge(criterion, fund.dividend_track_years, |v| v > MIN_DIVIDEND_TRACK_YEARS)
            }
            Criterion::TenantConcentration => {
                judge(criterion, fund.top_tenant_share_pct, |v| v < MAX_TOP_TENANT_SHARE_PCT)
            }
            Criterion::DividendYield => {
                let mean = self.benchmarks.mean_for(&fund.fund_type);
                judge(criterion, fund.dividend_yield_pct, |v| v >= mean)
            }
            Criterion::NoDerivatives => judge(criterion, fund.uses_derivatives, |v| !v),
            Criterion::Leverage => {
                judge(criterion, fund.net_debt_to_equity_pct, |v| v < MAX_NET_DEBT_TO_EQUITY_PCT)
            }
            Criterion::DebtPayback => {
                judge(criterion, fund.years_to_repay_debt, |v| v < MAX_YEARS_TO_REPAY_DEBT)
            }
            Criterion::Vacancy => judge(criterion, fund.vacancy_pct, |v| v < MAX_VACANCY_PCT),
            Criterion::FundOfFunds => {
                judge(criterion, fund.other_fii_holdings_pct, |v| v < MAX_OTHER_FII_HOLDINGS_PCT)
            }
            Criterion::CapRate => judge(criterion, fund.cap_rate_pct, |v| v > MIN_CAP_RATE_PCT),
            Criterion::BookValueGrowth => judge(criterion, fund.book_value_grew_3y, |v| v),
            Criterion::GeographicSpread => judge(criterion, fund.states_count, |v| v >= MIN_STATES),
            Criterion::AdminFee => judge(criterion, fund.admin_fee_pct, |v| v < MAX_ADMIN_FEE_PCT),
            Criterion::Issuances => judge(criterion, fund.issuances_24m, |v| v < MAX_ISSUANCES_24M),
            Criterion::Liquidity => {
                judge(criterion, fund.daily_liquidity_k_brl, |v| v > MIN_DAILY_LIQUIDITY_K_BRL)
            }
            Criterion::InvestmentGrade => judge(criterion, fund.investment_grade_tenants_pct, |v| {
                v > MIN_INVESTMENT_GRADE_PCT
            }),
            Criterion::ContractTerm => {
                judge(criterion, fund.avg_contract_term_years, |v| v > MIN_CONTRACT_TERM_YEARS)
            }
            Criterion::CashReserve => judge(criterion, fund.has_one_month_reserve, |v| v),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
