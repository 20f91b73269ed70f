// 🏢 Fund Record - one listed real-estate fund (FII)
// Static attributes compared by the 20 quality criteria
//
// Every attribute is optional: a fund that does not publish a figure
// gets a NotApplicable verdict for that criterion instead of an error.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// FUND RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundRecord {
    /// B3 ticker (e.g. "HGLG11")
    pub ticker: String,

    /// Sector label used to group funds for the dividend-yield benchmark
    pub fund_type: String,

    // ========================================================================
    // PORTFOLIO
    // ========================================================================
    /// Properties located in prime regions (C1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prime_locations: Option<bool>,

    /// Average property age in years (C2)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_property_age_years: Option<u32>,

    /// Number of Brazilian states with properties (C14)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states_count: Option<u32>,

    /// Share of the portfolio held in other FIIs' shares, percent (C11)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_fii_holdings_pct: Option<u32>,

    /// Cap rate, percent per year (C12)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cap_rate_pct: Option<f64>,

    /// Physical vacancy, percent (C10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vacancy_pct: Option<f64>,

    // ========================================================================
    // VALUATION & DISTRIBUTIONS
    // ========================================================================
    /// Price over book value per share (C3)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pvp: Option<f64>,

    /// Consecutive years paying dividends (C4)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dividend_track_years: Option<u32>,

    /// Trailing twelve-month dividend yield, percent (C6)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dividend_yield_pct: Option<f64>,

    /// Book value per share grew over the last 3 years (C13)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_value_grew_3y: Option<bool>,

    /// Holds at least one month of distributions in reserve (C20)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_one_month_reserve: Option<bool>,

    // ========================================================================
    // TENANTS & CONTRACTS
    // ========================================================================
    /// Revenue share of the largest tenant, percent (C5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_tenant_share_pct: Option<u32>,

    /// Share of tenants rated investment grade, percent (C18)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investment_grade_tenants_pct: Option<u32>,

    /// Weighted average lease term in years (C19)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_contract_term_years: Option<u32>,

    // ========================================================================
    // MANAGEMENT & CAPITAL STRUCTURE
    // ========================================================================
    /// Manager trades derivatives or options (C7)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses_derivatives: Option<bool>,

    /// Net debt over equity, percent (C8)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_debt_to_equity_pct: Option<u32>,

    /// Years of earnings needed to repay all debt (C9)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_to_repay_debt: Option<f64>,

    /// Administration + management fee, percent per year (C15)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_fee_pct: Option<f64>,

    /// Share issuances in the last 24 months (C16)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuances_24m: Option<u32>,

    /// Average daily traded volume, thousands of BRL (C17)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_liquidity_k_brl: Option<u32>,
}

impl FundRecord {
    /// Create a record with no published figures
    pub fn new(ticker: impl Into<String>, fund_type: impl Into<String>) -> Self {
        FundRecord {
            ticker: ticker.into(),
            fund_type: fund_type.into(),
            prime_locations: None,
            avg_property_age_years: None,
            states_count: None,
            other_fii_holdings_pct: None,
            cap_rate_pct: None,
            vacancy_pct: None,
            pvp: None,
            dividend_track_years: None,
            dividend_yield_pct: None,
            book_value_grew_3y: None,
            has_one_month_reserve: None,
            top_tenant_share_pct: None,
            investment_grade_tenants_pct: None,
            avg_contract_term_years: None,
            uses_derivatives: None,
            net_debt_to_equity_pct: None,
            years_to_repay_debt: None,
            admin_fee_pct: None,
            issuances_24m: None,
            daily_liquidity_k_brl: None,
        }
    }

    /// Percentage fields, by name, for range checks
    pub fn percent_fields(&self) -> [(&'static str, Option<f64>); 5] {
        [
            ("top_tenant_share_pct", self.top_tenant_share_pct.map(f64::from)),
            ("net_debt_to_equity_pct", self.net_debt_to_equity_pct.map(f64::from)),
            ("other_fii_holdings_pct", self.other_fii_holdings_pct.map(f64::from)),
            ("investment_grade_tenants_pct", self.investment_grade_tenants_pct.map(f64::from)),
            ("vacancy_pct", self.vacancy_pct),
        ]
    }

    /// Float fields that must be finite and non-negative
    pub fn float_fields(&self) -> [(&'static str, Option<f64>); 5] {
        [
            ("dividend_yield_pct", self.dividend_yield_pct),
            ("years_to_repay_debt", self.years_to_repay_debt),
            ("cap_rate_pct", self.cap_rate_pct),
            ("admin_fee_pct", self.admin_fee_pct),
            ("vacancy_pct", self.vacancy_pct),
        ]
    }
}

// ============================================================================
// RAW VALUE
// ============================================================================

/// The raw figure a criterion compared against its threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Bool(bool),
    Int(u32),
    Float(f64),
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        RawValue::Int(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl fmt::Display for RawValue {
    // f64 Display is the shortest representation that parses back to the same value
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Bool(b) => write!(f, "{}", b),
            RawValue::Int(i) => write!(f, "{}", i),
            RawValue::Float(x) => write!(f, "{}", x),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
