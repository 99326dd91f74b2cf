//! CSV export of schedules and projections
//!
//! Every writer emits a header row followed by one row per entry.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;
use log::debug;
use serde::Serialize;

use crate::error::AnalyzerResult;
use crate::loan::{round_cents, AmortizationSchedule};
use crate::projection::{ProjectionResult, YearSummary};

/// Flattened projection month with its running totals
#[derive(Debug, Serialize)]
struct ProjectionRow {
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "Rent")]
    rent: f64,
    #[serde(rename = "Vacancy")]
    vacancy: f64,
    #[serde(rename = "Management")]
    management: f64,
    #[serde(rename = "Maintenance")]
    maintenance: f64,
    #[serde(rename = "FixedCosts")]
    fixed_costs: f64,
    #[serde(rename = "Mortgage")]
    mortgage: f64,
    #[serde(rename = "NetCashFlow")]
    net_cash_flow: f64,
    #[serde(rename = "Cumulative")]
    cumulative: f64,
    #[serde(rename = "Equity")]
    equity: f64,
}

#[derive(Debug, Serialize)]
struct YearRow {
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "Rent")]
    rent: f64,
    #[serde(rename = "NOI")]
    noi: f64,
    #[serde(rename = "DebtService")]
    debt_service: f64,
    #[serde(rename = "CashFlow")]
    cash_flow: f64,
}

/// `Month,Payment,Principal,Interest,Balance`
pub fn write_schedule<W: Write>(writer: W, schedule: &AmortizationSchedule) -> AnalyzerResult<()> {
    let mut wtr = Writer::from_writer(writer);
    for entry in &schedule.entries {
        wtr.serialize(entry)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_projection<W: Write>(writer: W, result: &ProjectionResult) -> AnalyzerResult<()> {
    let mut wtr = Writer::from_writer(writer);
    for (i, point) in result.series.iter().enumerate() {
        wtr.serialize(ProjectionRow {
            month: point.month,
            rent: round_cents(point.rent),
            vacancy: round_cents(point.vacancy_loss),
            management: round_cents(point.management_fee),
            maintenance: round_cents(point.maintenance),
            fixed_costs: round_cents(point.fixed_costs),
            mortgage: round_cents(point.mortgage_payment),
            net_cash_flow: round_cents(point.net_cash_flow),
            cumulative: round_cents(result.cumulative_cash_flow.get(i).copied().unwrap_or(0.0)),
            equity: round_cents(result.equity.get(i).copied().unwrap_or(0.0)),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_yearly<W: Write>(writer: W, years: &[YearSummary]) -> AnalyzerResult<()> {
    let mut wtr = Writer::from_writer(writer);
    for year in years {
        wtr.serialize(YearRow {
            year: year.year,
            rent: round_cents(year.total_rent),
            noi: round_cents(year.net_operating_income),
            debt_service: round_cents(year.debt_service),
            cash_flow: round_cents(year.cash_flow),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_schedule<P: AsRef<Path>>(path: P, schedule: &AmortizationSchedule) -> AnalyzerResult<()> {
    write_schedule(File::create(path.as_ref())?, schedule)?;
    debug!("Wrote {} schedule rows to {}", schedule.len(), path.as_ref().display());
    Ok(())
}

pub fn save_projection<P: AsRef<Path>>(path: P, result: &ProjectionResult) -> AnalyzerResult<()> {
    write_projection(File::create(path.as_ref())?, result)?;
    debug!("Wrote {} projection rows to {}", result.series.len(), path.as_ref().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{OperatingAssumptions, PropertyParams};
    use crate::loan::{build_schedule, LoanTerms};
    use crate::projection::{ProjectionConfig, ProjectionEngine};

    fn to_string(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_schedule_csv_layout() {
        let schedule = build_schedule(240_000.0, 6.5, 30).unwrap();
        let mut out = Vec::new();
        write_schedule(&mut out, &schedule).unwrap();

        let text = to_string(out);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 361);
        assert_eq!(lines[0], "Month,Payment,Principal,Interest,Balance");
        assert_eq!(lines[1], "1,1516.96,216.96,1300.0,239783.04");
    }

    #[test]
    fn test_projection_and_yearly_csv() {
        let property = PropertyParams::new(300_000.0, 60_000.0, 3.0);
        let loan = LoanTerms::new(240_000.0, 6.5, 30).unwrap();
        let result = ProjectionEngine::new(OperatingAssumptions::default(), ProjectionConfig::new(2))
            .project(&property, Some(&loan))
            .unwrap();

        let mut out = Vec::new();
        write_projection(&mut out, &result).unwrap();
        let text = to_string(out);
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Month,Rent,Vacancy,Management,Maintenance,FixedCosts,Mortgage,NetCashFlow,Cumulative,Equity")
        );
        assert_eq!(lines.count(), 24);

        let mut out = Vec::new();
        write_yearly(&mut out, &result.series.yearly()).unwrap();
        let text = to_string(out);
        assert_eq!(text.lines().next(), Some("Year,Rent,NOI,DebtService,CashFlow"));
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().nth(1).unwrap().starts_with("1,"));
    }
}
