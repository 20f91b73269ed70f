// 📚 Static Dataset - the ten funds under analysis
//
// Figures are approximations taken from public investor-relations reports
// (2024/2025). They are embedded constants, never fetched.

use crate::fund::FundRecord;
use std::collections::HashSet;
use thiserror::Error;

/// Tickers in report order
pub const TICKERS: [&str; 10] = [
    "GGRC11", "BTAL11", "VISC11", "ALZR11", "BTLG11", "HGLG11", "TRXF11", "RZTR11", "BRCO11",
    "JURO11",
];

// ============================================================================
// DATASET ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    #[error("fund at position {0} has an empty ticker")]
    EmptyTicker(usize),

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),

    #[error("{ticker}: {field} = {value} is outside 0..=100")]
    PercentOutOfRange {
        ticker: String,
        field: &'static str,
        value: f64,
    },

    #[error("{ticker}: {field} = {value} is not a finite non-negative number")]
    InvalidNumber {
        ticker: String,
        field: &'static str,
        value: f64,
    },

    #[error("{ticker}: P/VP must be a positive finite number, got {value}")]
    InvalidPriceToBook { ticker: String, value: f64 },
}

// ============================================================================
// EMBEDDED RECORDS
// ============================================================================

/// Every figure a fund publishes, before wrapping into a FundRecord
struct Snapshot {
    ticker: &'static str,
    fund_type: &'static str,
    prime_locations: bool,
    avg_property_age_years: u32,
    pvp: f64,
    dividend_track_years: u32,
    top_tenant_share_pct: u32,
    dividend_yield_pct: f64,
    uses_derivatives: bool,
    net_debt_to_equity_pct: u32,
    years_to_repay_debt: f64,
    vacancy_pct: f64,
    other_fii_holdings_pct: u32,
    cap_rate_pct: f64,
    book_value_grew_3y: bool,
    states_count: u32,
    admin_fee_pct: f64,
    issuances_24m: u32,
    daily_liquidity_k_brl: u32,
    investment_grade_tenants_pct: u32,
    avg_contract_term_years: u32,
    has_one_month_reserve: bool,
}

impl Snapshot {
    fn to_record(&self) -> FundRecord {
        let s = self;
        FundRecord {
            ticker: s.ticker.to_string(),
            fund_type: s.fund_type.to_string(),
            prime_locations: Some(s.prime_locations),
            avg_property_age_years: Some(s.avg_property_age_years),
            states_count: Some(s.states_count),
            other_fii_holdings_pct: Some(s.other_fii_holdings_pct),
            cap_rate_pct: Some(s.cap_rate_pct),
            vacancy_pct: Some(s.vacancy_pct),
            pvp: Some(s.pvp),
            dividend_track_years: Some(s.dividend_track_years),
            dividend_yield_pct: Some(s.dividend_yield_pct),
            book_value_grew_3y: Some(s.book_value_grew_3y),
            has_one_month_reserve: Some(s.has_one_month_reserve),
            top_tenant_share_pct: Some(s.top_tenant_share_pct),
            investment_grade_tenants_pct: Some(s.investment_grade_tenants_pct),
            avg_contract_term_years: Some(s.avg_contract_term_years),
            uses_derivatives: Some(s.uses_derivatives),
            net_debt_to_equity_pct: Some(s.net_debt_to_equity_pct),
            years_to_repay_debt: Some(s.years_to_repay_debt),
            admin_fee_pct: Some(s.admin_fee_pct),
            issuances_24m: Some(s.issuances_24m),
            daily_liquidity_k_brl: Some(s.daily_liquidity_k_brl),
        }
    }
}

const SNAPSHOTS: [Snapshot; 10] = [
    Snapshot {
        ticker: "GGRC11",
        fund_type: "Logística",
        prime_locations: true,
        avg_property_age_years: 8,
        pvp: 0.95,
        dividend_track_years: 5,
        top_tenant_share_pct: 22,
        dividend_yield_pct: 12.5,
        uses_derivatives: false,
        net_debt_to_equity_pct: 30,
        years_to_repay_debt: 2.5,
        vacancy_pct: 3.0,
        other_fii_holdings_pct: 0,
        cap_rate_pct: 9.5,
        book_value_grew_3y: true,
        states_count: 4,
        admin_fee_pct: 1.1,
        issuances_24m: 1,
        daily_liquidity_k_brl: 3500,
        investment_grade_tenants_pct: 80,
        avg_contract_term_years: 7,
        has_one_month_reserve: true,
    },
    Snapshot {
        ticker: "BTAL11",
        fund_type: "Lajes Corporativas",
        prime_locations: true,
        avg_property_age_years: 18,
        pvp: 0.82,
        dividend_track_years: 6,
        top_tenant_share_pct: 25,
        dividend_yield_pct: 10.8,
        uses_derivatives: false,
        net_debt_to_equity_pct: 38,
        years_to_repay_debt: 3.2,
        vacancy_pct: 14.0,
        other_fii_holdings_pct: 0,
        cap_rate_pct: 7.8,
        book_value_grew_3y: false,
        states_count: 2,
        admin_fee_pct: 1.4,
        issuances_24m: 0,
        daily_liquidity_k_brl: 1200,
        investment_grade_tenants_pct: 65,
        avg_contract_term_years: 4,
        has_one_month_reserve: true,
    },
    Snapshot {
        ticker: "VISC11",
        fund_type: "Shopping Centers",
        prime_locations: true,
        avg_property_age_years: 12,
        pvp: 0.98,
        dividend_track_years: 8,
        top_tenant_share_pct: 8,
        dividend_yield_pct: 9.5,
        uses_derivatives: false,
        net_debt_to_equity_pct: 25,
        years_to_repay_debt: 2.0,
        vacancy_pct: 5.0,
        other_fii_holdings_pct: 0,
        cap_rate_pct: 8.5,
        book_value_grew_3y: true,
        states_count: 5,
        admin_fee_pct: 1.1,
        issuances_24m: 1,
        daily_liquidity_k_brl: 8000,
        investment_grade_tenants_pct: 75,
        avg_contract_term_years: 5,
        has_one_month_reserve: true,
    },
    Snapshot {
        ticker: "ALZR11",
        fund_type: "Logística",
        prime_locations: true,
        avg_property_age_years: 6,
        pvp: 1.05,
        dividend_track_years: 5,
        top_tenant_share_pct: 35,
        dividend_yield_pct: 11.0,
        uses_derivatives: false,
        net_debt_to_equity_pct: 20,
        years_to_repay_debt: 1.8,
        vacancy_pct: 0.0,
        other_fii_holdings_pct: 0,
        cap_rate_pct: 10.0,
        book_value_grew_3y: false,
        states_count: 3,
        admin_fee_pct: 1.0,
        issuances_24m: 2,
        daily_liquidity_k_brl: 2500,
        investment_grade_tenants_pct: 90,
        avg_contract_term_years: 9,
        has_one_month_reserve: true,
    },
    Snapshot {
        ticker: "BTLG11",
        fund_type: "Logística",
        prime_locations: true,
        avg_property_age_years: 7,
        pvp: 0.93,
        dividend_track_years: 6,
        top_tenant_share_pct: 18,
        dividend_yield_pct: 12.0,
        uses_derivatives: false,
        net_debt_to_equity_pct: 28,
        years_to_repay_debt: 2.3,
        vacancy_pct: 4.0,
        other_fii_holdings_pct: 0,
        cap_rate_pct: 9.8,
        book_value_grew_3y: true,
        states_count: 5,
        admin_fee_pct: 0.9,
        issuances_24m: 1,
        daily_liquidity_k_brl: 12000,
        investment_grade_tenants_pct: 85,
        avg_contract_term_years: 7,
        has_one_month_reserve: true,
    },
    Snapshot {
        ticker: "HGLG11",
        fund_type: "Logística",
        prime_locations: true,
        avg_property_age_years: 10,
        pvp: 1.10,
        dividend_track_years: 12,
        top_tenant_share_pct: 15,
        dividend_yield_pct: 11.5,
        uses_derivatives: false,
        net_debt_to_equity_pct: 22,
        years_to_repay_debt: 2.0,
        vacancy_pct: 3.5,
        other_fii_holdings_pct: 5,
        cap_rate_pct: 9.2,
        book_value_grew_3y: true,
        states_count: 6,
        admin_fee_pct: 1.0,
        issuances_24m: 1,
        daily_liquidity_k_brl: 25000,
        investment_grade_tenants_pct: 82,
        avg_contract_term_years: 8,
        has_one_month_reserve: true,
    },
    Snapshot {
        ticker: "TRXF11",
        fund_type: "Logística/Varejo",
        prime_locations: false,
        avg_property_age_years: 9,
        pvp: 0.90,
        dividend_track_years: 4,
        top_tenant_share_pct: 55,
        dividend_yield_pct: 13.5,
        uses_derivatives: false,
        net_debt_to_equity_pct: 45,
        years_to_repay_debt: 3.5,
        vacancy_pct: 0.0,
        other_fii_holdings_pct: 0,
        cap_rate_pct: 10.5,
        book_value_grew_3y: false,
        states_count: 5,
        admin_fee_pct: 1.3,
        issuances_24m: 2,
        daily_liquidity_k_brl: 3000,
        investment_grade_tenants_pct: 70,
        avg_contract_term_years: 10,
        has_one_month_reserve: true,
    },
    Snapshot {
        ticker: "RZTR11",
        fund_type: "Agro/CRI",
        prime_locations: false,
        avg_property_age_years: 5,
        pvp: 0.88,
        dividend_track_years: 4,
        top_tenant_share_pct: 20,
        dividend_yield_pct: 14.0,
        uses_derivatives: false,
        net_debt_to_equity_pct: 10,
        years_to_repay_debt: 0.8,
        vacancy_pct: 0.0,
        other_fii_holdings_pct: 0,
        cap_rate_pct: 11.0,
        book_value_grew_3y: false,
        states_count: 8,
        admin_fee_pct: 1.2,
        issuances_24m: 1,
        daily_liquidity_k_brl: 2000,
        investment_grade_tenants_pct: 60,
        avg_contract_term_years: 6,
        has_one_month_reserve: true,
    },
    Snapshot {
        ticker: "BRCO11",
        fund_type: "Logística",
        prime_locations: true,
        avg_property_age_years: 5,
        pvp: 0.96,
        dividend_track_years: 5,
        top_tenant_share_pct: 20,
        dividend_yield_pct: 11.8,
        uses_derivatives: false,
        net_debt_to_equity_pct: 25,
        years_to_repay_debt: 2.2,
        vacancy_pct: 2.0,
        other_fii_holdings_pct: 0,
        cap_rate_pct: 9.5,
        book_value_grew_3y: true,
        states_count: 4,
        admin_fee_pct: 0.9,
        issuances_24m: 1,
        daily_liquidity_k_brl: 5000,
        investment_grade_tenants_pct: 88,
        avg_contract_term_years: 8,
        has_one_month_reserve: true,
    },
    Snapshot {
        ticker: "JURO11",
        fund_type: "Papel/CRI",
        prime_locations: false,
        avg_property_age_years: 3,
        pvp: 0.97,
        dividend_track_years: 3,
        top_tenant_share_pct: 15,
        dividend_yield_pct: 13.0,
        uses_derivatives: false,
        net_debt_to_equity_pct: 5,
        years_to_repay_debt: 0.5,
        vacancy_pct: 0.0,
        other_fii_holdings_pct: 0,
        cap_rate_pct: 12.0,
        book_value_grew_3y: false,
        states_count: 6,
        admin_fee_pct: 1.0,
        issuances_24m: 3,
        daily_liquidity_k_brl: 1500,
        investment_grade_tenants_pct: 75,
        avg_contract_term_years: 4,
        has_one_month_reserve: false,
    },
];

/// Fresh copies of all ten records, in report order
pub fn funds() -> Vec<FundRecord> {
    SNAPSHOTS.iter().map(Snapshot::to_record).collect()
}

/// Look up one embedded fund by ticker (case-insensitive)
pub fn find(ticker: &str) -> Option<FundRecord> {
    SNAPSHOTS
        .iter()
        .find(|s| s.ticker.eq_ignore_ascii_case(ticker))
        .map(Snapshot::to_record)
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Sanity checks on the records before scoring
pub fn validate(funds: &[FundRecord]) -> Result<(), DatasetError> {
    let mut seen = HashSet::new();

    for (position, fund) in funds.iter().enumerate() {
        if fund.ticker.trim().is_empty() {
            return Err(DatasetError::EmptyTicker(position));
        }
        if !seen.insert(fund.ticker.to_uppercase()) {
            return Err(DatasetError::DuplicateTicker(fund.ticker.clone()));
        }

        if let Some(pvp) = fund.pvp {
            if !pvp.is_finite() || pvp <= 0.0 {
                return Err(DatasetError::InvalidPriceToBook {
                    ticker: fund.ticker.clone(),
                    value: pvp,
                });
            }
        }

        for (field, value) in fund.float_fields() {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(DatasetError::InvalidNumber {
                        ticker: fund.ticker.clone(),
                        field,
                        value,
                    });
                }
            }
        }

        for (field, value) in fund.percent_fields() {
            if let Some(value) = value {
                if !(0.0..=100.0).contains(&value) {
                    return Err(DatasetError::PercentOutOfRange {
                        ticker: fund.ticker.clone(),
                        field,
                        value,
                    });
                }
            }
        }
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
