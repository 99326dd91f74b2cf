//! Fixed-rate mortgage terms and amortization

mod terms;
mod amortization;

pub use terms::{LoanTerms, MAX_TERM_YEARS};
pub use amortization::{
    build_schedule, compute_payment, round_cents, AmortizationEntry, AmortizationSchedule,
};
