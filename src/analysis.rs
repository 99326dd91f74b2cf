//! One-call entry points for the analyzer
//!
//! Each function validates its inputs and delegates to the loan, projection,
//! metrics and scoring modules. `analyze_deal` chains all of them for a raw
//! [`DealInput`].

use log::info;
use serde::Serialize;

use crate::assumptions::{DealInput, OperatingAssumptions, PropertyParams};
use crate::error::AnalyzerResult;
use crate::loan::{build_schedule, AmortizationSchedule, LoanTerms};
use crate::metrics::{DealRatios, ReturnSummary};
use crate::projection::{
    CashflowSeries, ProjectionConfig, ProjectionEngine, ProjectionResult, ProjectionSummary, YearSummary,
};
use crate::scoring::{self, quick_score, DealMetrics, DealScoreResult, QuickScore};

/// Level payment and full schedule for a fixed-rate loan
pub fn compute_amortization(
    loan_amount: f64,
    annual_rate_pct: f64,
    term_years: u32,
) -> AnalyzerResult<(f64, AmortizationSchedule)> {
    let schedule = build_schedule(loan_amount, annual_rate_pct, term_years)?;
    Ok((schedule.payment, schedule))
}

/// Month-by-month operating projection
pub fn project_cashflows(
    property: &PropertyParams,
    loan: Option<&LoanTerms>,
    assumptions: &OperatingAssumptions,
    config: &ProjectionConfig,
) -> AnalyzerResult<ProjectionResult> {
    ProjectionEngine::new(assumptions.clone(), config.clone()).project(property, loan)
}

/// IRR and NPV of a projected series against the cash invested
pub fn compute_return_metrics(
    series: &CashflowSeries,
    initial_investment: f64,
    annual_discount_pct: f64,
) -> ReturnSummary {
    ReturnSummary::compute(&series.net_cash_flows(), initial_investment, annual_discount_pct)
}

/// Composite 0-100 score from already-computed metrics
pub fn compute_deal_score(
    cap_rate: f64,
    cash_on_cash: f64,
    roi: f64,
    irr: Option<f64>,
    npv: Option<f64>,
    initial_investment: f64,
) -> DealScoreResult {
    scoring::compute_deal_score(&DealMetrics {
        cap_rate,
        cash_on_cash,
        roi,
        irr,
        npv,
        initial_investment,
    })
}

/// Everything the analyzer knows about one deal
#[derive(Debug, Clone, Serialize)]
pub struct DealReport {
    pub label: String,
    pub purchase_price: f64,
    pub loan_amount: f64,
    pub monthly_payment: f64,
    pub initial_investment: f64,
    pub summary: ProjectionSummary,
    pub yearly: Vec<YearSummary>,
    pub ratios: DealRatios,
    pub returns: ReturnSummary,
    pub score: DealScoreResult,

    /// Full monthly projection (omitted from JSON output)
    #[serde(skip)]
    pub projection: ProjectionResult,

    /// `None` for an all-cash purchase
    #[serde(skip)]
    pub schedule: Option<AmortizationSchedule>,
}

impl DealReport {
    pub fn metrics(&self) -> DealMetrics {
        DealMetrics {
            cap_rate: self.ratios.cap_rate,
            cash_on_cash: self.ratios.cash_on_cash,
            roi: self.ratios.roi,
            irr: self.returns.irr_pct,
            npv: self.returns.npv,
            initial_investment: self.initial_investment,
        }
    }
}

/// Validate a raw deal, project it and score it
pub fn analyze_deal(input: &DealInput) -> AnalyzerResult<DealReport> {
    let parts = input.to_parts()?;
    let projection = project_cashflows(&parts.property, parts.loan.as_ref(), &parts.assumptions, &parts.config)?;

    let ratios = DealRatios::from_projection(&projection, parts.property.purchase_price);
    let returns = compute_return_metrics(&projection.series, projection.initial_investment, input.discount_rate);
    let score = compute_deal_score(
        ratios.cap_rate,
        ratios.cash_on_cash,
        ratios.roi,
        returns.irr_pct,
        returns.npv,
        projection.initial_investment,
    );
    let label = input.label();
    info!("{}: score {:.1} ({:?})", label, score.total_score, score.rating);

    Ok(DealReport {
        label,
        purchase_price: parts.property.purchase_price,
        loan_amount: parts.property.loan_amount(),
        monthly_payment: projection.monthly_payment,
        initial_investment: projection.initial_investment,
        summary: projection.summary(),
        yearly: projection.series.yearly(),
        ratios,
        returns,
        score,
        schedule: parts.loan.as_ref().map(LoanTerms::schedule),
        projection,
    })
}

/// Two-metric screen of a deal, kept apart from the composite report
#[derive(Debug, Clone, Serialize)]
pub struct QuickScreen {
    pub label: String,
    pub cap_rate: f64,
    pub cash_on_cash: f64,
    pub quick: QuickScore,
}

/// Project a deal and rate it on cap rate and cash-on-cash only
pub fn screen_deal(input: &DealInput) -> AnalyzerResult<QuickScreen> {
    let parts = input.to_parts()?;
    let projection = project_cashflows(&parts.property, parts.loan.as_ref(), &parts.assumptions, &parts.config)?;
    let ratios = DealRatios::from_projection(&projection, parts.property.purchase_price);

    Ok(QuickScreen {
        label: input.label(),
        cap_rate: ratios.cap_rate,
        cash_on_cash: ratios.cash_on_cash,
        quick: quick_score(ratios.cap_rate, ratios.cash_on_cash),
    })
}
