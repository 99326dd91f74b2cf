//! Level-payment amortization
//!
//! Payment uses the standard annuity formula; the schedule rolls the balance
//! forward month by month. Reported entries are rounded to cents while the
//! running balance stays unrounded, so rounding never compounds.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::terms::{validate, LoanTerms};
use crate::error::AnalyzerResult;

/// One month of the amortization schedule (amounts rounded to cents)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "Payment")]
    pub payment: f64,
    #[serde(rename = "Principal")]
    pub principal: f64,
    #[serde(rename = "Interest")]
    pub interest: f64,
    #[serde(rename = "Balance")]
    pub balance: f64,
}

/// Full schedule for a loan
#[derive(Debug, Clone, Serialize)]
pub struct AmortizationSchedule {
    /// Unrounded level monthly payment
    pub payment: f64,

    /// Original loan amount
    pub principal: f64,

    /// Monthly entries, month 1 first
    pub entries: Vec<AmortizationEntry>,
}

impl AmortizationSchedule {
    /// Balance remaining after the payment of `month`
    ///
    /// Month 0 is the original principal; months past the term are paid off.
    pub fn balance_after(&self, month: u32) -> f64 {
        if month == 0 {
            return self.principal;
        }
        self.entries
            .get(month as usize - 1)
            .map(|e| e.balance)
            .unwrap_or(0.0)
    }

    pub fn total_interest(&self) -> f64 {
        self.entries.iter().map(|e| e.interest).sum()
    }

    pub fn total_principal(&self) -> f64 {
        self.entries.iter().map(|e| e.principal).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Monthly payment for a fixed-rate loan
///
/// A 0% loan repays straight-line: `principal / n`.
pub fn compute_payment(principal: f64, annual_rate_pct: f64, term_years: u32) -> AnalyzerResult<f64> {
    validate(principal, annual_rate_pct, term_years)?;
    Ok(annuity_payment(principal, annual_rate_pct / 100.0 / 12.0, term_years * 12))
}

/// Month-by-month schedule for a fixed-rate loan
pub fn build_schedule(
    principal: f64,
    annual_rate_pct: f64,
    term_years: u32,
) -> AnalyzerResult<AmortizationSchedule> {
    validate(principal, annual_rate_pct, term_years)?;
    Ok(roll_schedule(principal, annual_rate_pct / 100.0 / 12.0, term_years * 12))
}

impl LoanTerms {
    /// Level monthly payment for these terms
    pub fn payment(&self) -> f64 {
        annuity_payment(self.principal(), self.monthly_rate(), self.payment_count())
    }

    /// Full amortization schedule for these terms
    pub fn schedule(&self) -> AmortizationSchedule {
        roll_schedule(self.principal(), self.monthly_rate(), self.payment_count())
    }
}

fn roll_schedule(principal: f64, monthly_rate: f64, n_payments: u32) -> AmortizationSchedule {
    let payment = annuity_payment(principal, monthly_rate, n_payments);
    roll_with_payment(principal, monthly_rate, n_payments, payment)
}

// A payment below the month's interest is not special-cased: the balance grows
fn roll_with_payment(principal: f64, monthly_rate: f64, n_payments: u32, payment: f64) -> AmortizationSchedule {
    debug!(
        "Building schedule: principal={:.2} monthly_rate={:.6} months={} payment={:.6}",
        principal, monthly_rate, n_payments, payment
    );

    let mut entries = Vec::with_capacity(n_payments as usize);
    let mut balance = principal;

    for month in 1..=n_payments {
        let interest = balance * monthly_rate;
        let principal_part = payment - interest;
        if principal_part < 0.0 {
            warn!(
                "Month {}: payment {:.2} does not cover interest {:.2}, balance grows",
                month, payment, interest
            );
        }
        balance = (balance - principal_part).max(0.0);

        entries.push(AmortizationEntry {
            month,
            payment: round_cents(payment),
            principal: round_cents(principal_part),
            interest: round_cents(interest),
            balance: round_cents(balance),
        });
    }

    AmortizationSchedule {
        payment,
        principal,
        entries,
    }
}

fn annuity_payment(principal: f64, monthly_rate: f64, n_payments: u32) -> f64 {
    if monthly_rate == 0.0 {
        return principal / n_payments as f64;
    }
    // Discount form stays finite when (1 + r)^n overflows: the payment
    // tends to interest-only, principal * r
    let discount = (1.0 + monthly_rate).powi(-(n_payments as i32));
    principal * monthly_rate / (1.0 - discount)
}

/// Round to currency precision
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
