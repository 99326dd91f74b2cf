//! Fixed-rate loan terms

use serde::Serialize;

use crate::error::{require_non_negative, require_positive, AnalyzerError, AnalyzerResult};

/// Terms of a fixed-rate, fully-amortizing mortgage
///
/// Fields are private so that the rate and payment count cannot drift after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanTerms {
    /// Amount borrowed
    principal: f64,

    /// Annual nominal rate in percent (6.5 = 6.5%)
    annual_rate_pct: f64,

    /// Term in whole years
    term_years: u32,
}

impl LoanTerms {
    /// Validate and build loan terms
    pub fn new(principal: f64, annual_rate_pct: f64, term_years: u32) -> AnalyzerResult<Self> {
        validate(principal, annual_rate_pct, term_years)?;
        Ok(Self {
            principal,
            annual_rate_pct,
            term_years,
        })
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn annual_rate_pct(&self) -> f64 {
        self.annual_rate_pct
    }

    pub fn term_years(&self) -> u32 {
        self.term_years
    }

    /// Periodic (monthly) rate as a decimal
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_pct / 100.0 / 12.0
    }

    /// Total number of monthly payments
    pub fn payment_count(&self) -> u32 {
        self.term_years * 12
    }
}

/// Longest loan term accepted, in years
pub const MAX_TERM_YEARS: u32 = 50;

/// Shared precondition check for loan calculations
pub(crate) fn validate(principal: f64, annual_rate_pct: f64, term_years: u32) -> AnalyzerResult<()> {
    require_positive("principal", principal)?;
    require_non_negative("annual_rate_pct", annual_rate_pct)?;
    if !(1..=MAX_TERM_YEARS).contains(&term_years) {
        return Err(AnalyzerError::invalid(
            "term_years",
            format!("must be between 1 and {} years (got {})", MAX_TERM_YEARS, term_years),
        ));
    }
    Ok(())
}
