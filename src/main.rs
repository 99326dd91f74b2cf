//! Rental Analyzer CLI
//!
//! Command-line interface for amortization, deal analysis, batch runs and
//! rent sensitivity

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use rental_analyzer::analysis::{analyze_deal, compute_amortization, DealReport};
use rental_analyzer::assumptions::{load_deal, load_deals, DealInput};
use rental_analyzer::export::{save_projection, save_schedule};
use rental_analyzer::metrics::affordability::HomePurchase;
use rental_analyzer::ScenarioRunner;

#[derive(Parser)]
#[command(version, about = "Rental property cash flow projection and deal scoring")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the level payment and amortization schedule for a loan
    Amortize {
        #[arg(long)]
        amount: f64,
        /// Annual interest rate in percent
        #[arg(long)]
        rate: f64,
        #[arg(long, default_value_t = 30)]
        years: u32,
        /// Write the full schedule to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Project and score one deal (defaults when no input file is given)
    Analyze {
        /// Deal file in JSON
        #[arg(long)]
        input: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Write the monthly projection to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write the amortization schedule to this CSV file
        #[arg(long)]
        schedule_csv: Option<PathBuf>,
    },

    /// Analyze every deal in a CSV file (one deal per row)
    Batch {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        json: bool,
        /// Rate on cap rate and cash-on-cash only instead of the composite score
        #[arg(long)]
        quick: bool,
    },

    /// Re-run a deal across several monthly rents
    Sensitivity {
        #[arg(long)]
        input: Option<PathBuf>,
        /// Comma-separated monthly rents
        #[arg(long, value_delimiter = ',', required = true)]
        rents: Vec<f64>,
    },

    /// Owner-occupant affordability check
    Afford {
        #[arg(long)]
        price: f64,
        #[arg(long, default_value_t = 20.0)]
        down_pct: f64,
        #[arg(long, default_value_t = 6.5)]
        rate: f64,
        #[arg(long, default_value_t = 30)]
        years: u32,
        /// Annual property tax
        #[arg(long, default_value_t = 0.0)]
        tax: f64,
        /// Annual homeowner's insurance
        #[arg(long, default_value_t = 0.0)]
        insurance: f64,
        /// Gross monthly income
        #[arg(long, default_value_t = 0.0)]
        income: f64,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Amortize { amount, rate, years, csv } => amortize(amount, rate, years, csv),
        Commands::Analyze {
            input,
            json,
            csv,
            schedule_csv,
        } => analyze(input, json, csv, schedule_csv),
        Commands::Batch { input, json, quick } => {
            if quick {
                batch_quick(input, json)
            } else {
                batch(input, json)
            }
        }
        Commands::Sensitivity { input, rents } => sensitivity(input, &rents),
        Commands::Afford {
            price,
            down_pct,
            rate,
            years,
            tax,
            insurance,
            income,
        } => afford(price, down_pct, rate, years, tax, insurance, income),
    }
}

fn read_deal(input: Option<PathBuf>) -> Result<DealInput> {
    match input {
        Some(path) => load_deal(&path).with_context(|| format!("Failed to load deal from {}", path.display())),
        None => Ok(DealInput::default()),
    }
}

fn amortize(amount: f64, rate: f64, years: u32, csv: Option<PathBuf>) -> Result<()> {
    let (payment, schedule) = compute_amortization(amount, rate, years).context("Invalid loan terms")?;

    println!("Loan: ${:.2} @ {:.3}% for {} years", amount, rate, years);
    println!("  Monthly Payment: ${:.2}", payment);
    println!("  Total Interest: ${:.2}", schedule.total_interest());
    println!();

    println!("{:>5} {:>12} {:>12} {:>12} {:>14}", "Month", "Payment", "Principal", "Interest", "Balance");
    println!("{}", "-".repeat(59));
    for entry in schedule.entries.iter().take(12) {
        println!(
            "{:>5} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
            entry.month, entry.payment, entry.principal, entry.interest, entry.balance
        );
    }
    if schedule.len() > 12 {
        println!("... ({} more months)", schedule.len() - 12);
    }

    if let Some(path) = csv {
        save_schedule(&path, &schedule).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("\nFull schedule written to: {}", path.display());
    }
    Ok(())
}

fn analyze(
    input: Option<PathBuf>,
    json: bool,
    csv: Option<PathBuf>,
    schedule_csv: Option<PathBuf>,
) -> Result<()> {
    let deal = read_deal(input)?;
    let report = analyze_deal(&deal).context("Deal analysis failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if let Some(path) = csv {
        save_projection(&path, &report.projection).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("\nProjection written to: {}", path.display());
    }
    if let Some(path) = schedule_csv {
        match &report.schedule {
            Some(schedule) => {
                save_schedule(&path, schedule).with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Schedule written to: {}", path.display());
            }
            None => println!("All-cash purchase: no amortization schedule to write"),
        }
    }
    Ok(())
}

fn print_report(report: &DealReport) {
    println!("Deal: {}", report.label);
    println!("  Purchase Price: ${:.2}", report.purchase_price);
    println!("  Loan Amount: ${:.2}", report.loan_amount);
    println!("  Monthly Payment: ${:.2}", report.monthly_payment);
    println!("  Initial Investment: ${:.2}", report.initial_investment);
    println!();

    println!("{:>4} {:>12} {:>12} {:>12} {:>12}", "Year", "Rent", "NOI", "Debt Svc", "Cash Flow");
    println!("{}", "-".repeat(56));
    for year in &report.yearly {
        println!(
            "{:>4} {:>12.2} {:>12.2} {:>12.2} {:>12.2}",
            year.year, year.total_rent, year.net_operating_income, year.debt_service, year.cash_flow
        );
    }

    let summary = &report.summary;
    println!("\nSummary:");
    println!("  Total Net Cash Flow: ${:.2}", summary.total_net_cash_flow);
    println!("  Final Property Value: ${:.2}", summary.final_property_value);
    println!("  Final Equity: ${:.2}", summary.final_equity);
    match summary.break_even_month {
        Some(month) => println!("  Break-even: month {} ({:.1} years)", month, month as f64 / 12.0),
        None => println!("  Break-even: not within the projection period"),
    }

    let ratios = &report.ratios;
    println!("\nReturns:");
    println!("  Cap Rate: {:.2}%", ratios.cap_rate);
    println!("  Cash-on-Cash: {:.2}%", ratios.cash_on_cash);
    println!("  ROI: {:.2}%", ratios.roi);
    println!("  IRR: {}", fmt_pct(report.returns.irr_pct));
    match report.returns.npv {
        Some(npv) => println!("  NPV @ {:.2}%: ${:.2}", report.returns.discount_rate_pct, npv),
        None => println!("  NPV: n/a"),
    }

    let score = &report.score;
    println!("\nDeal Score: {:.1} / 100 ({:?})", score.total_score, score.rating);
    println!(
        "  CoC {:.1} | ROI {:.1} | IRR {:.1} | NPV {:.1} | Cap {:.1}",
        score.coc_score, score.roi_score, score.irr_score, score.npv_score, score.cap_rate_score
    );
}

fn fmt_pct(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}%", v))
}

fn fmt_num(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}", v))
}

fn batch(input: PathBuf, json: bool) -> Result<()> {
    let deals = load_deals(&input).with_context(|| format!("Failed to load deals from {}", input.display()))?;
    let results = ScenarioRunner::default().run_batch(&deals);

    if json {
        let reports: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
        for (deal, result) in deals.iter().zip(&results) {
            if let Err(e) = result {
                log::error!("{}: {}", deal.label(), e);
            }
        }
        return Ok(());
    }

    println!(
        "{:<28} {:>8} {:>8} {:>8} {:>8} {:>7} {:<10}",
        "Deal", "Cap%", "CoC%", "ROI%", "IRR%", "Score", "Rating"
    );
    println!("{}", "-".repeat(84));
    for (deal, result) in deals.iter().zip(&results) {
        match result {
            Ok(report) => println!(
                "{:<28} {:>8.2} {:>8.2} {:>8.2} {:>8} {:>7.1} {:<10}",
                report.label,
                report.ratios.cap_rate,
                report.ratios.cash_on_cash,
                report.ratios.roi,
                fmt_num(report.returns.irr_pct),
                report.score.total_score,
                format!("{:?}", report.score.rating),
            ),
            Err(e) => println!("{:<28} error: {}", deal.label(), e),
        }
    }
    Ok(())
}

fn batch_quick(input: PathBuf, json: bool) -> Result<()> {
    let deals = load_deals(&input).with_context(|| format!("Failed to load deals from {}", input.display()))?;
    let results = ScenarioRunner::default().run_quick_screen(&deals);

    if json {
        let screens: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        println!("{}", serde_json::to_string_pretty(&screens)?);
        for (deal, result) in deals.iter().zip(&results) {
            if let Err(e) = result {
                log::error!("{}: {}", deal.label(), e);
            }
        }
        return Ok(());
    }

    println!("{:<28} {:>8} {:>8} {:>7} {:<10}", "Deal", "Cap%", "CoC%", "Quick", "Rating");
    println!("{}", "-".repeat(64));
    for (deal, result) in deals.iter().zip(&results) {
        match result {
            Ok(screen) => println!(
                "{:<28} {:>8.2} {:>8.2} {:>7.2} {:<10}",
                screen.label,
                screen.cap_rate,
                screen.cash_on_cash,
                screen.quick.score,
                format!("{:?}", screen.quick.rating),
            ),
            Err(e) => println!("{:<28} error: {}", deal.label(), e),
        }
    }
    Ok(())
}

fn sensitivity(input: Option<PathBuf>, rents: &[f64]) -> Result<()> {
    let runner = ScenarioRunner::new(read_deal(input)?);
    let table = runner.run_rent_sensitivity(rents).context("Sensitivity run failed")?;

    println!(
        "{:>10} {:>12} {:>12} {:>8} {:>8} {:>8} {:>7}",
        "Rent", "Yr1 CF", "Total CF", "Cap%", "CoC%", "IRR%", "Score"
    );
    println!("{}", "-".repeat(71));
    for row in &table {
        println!(
            "{:>10.2} {:>12.2} {:>12.2} {:>8.2} {:>8.2} {:>8} {:>7.1}",
            row.monthly_rent,
            row.year_one_cash_flow,
            row.total_cash_flow,
            row.cap_rate,
            row.cash_on_cash,
            fmt_num(row.irr_pct),
            row.total_score,
        );
    }

    match runner.estimate_break_even_rent()? {
        Some(rent) => println!(
            "\nEstimated rent to recover the initial investment in {} years: ${:.0}/month",
            runner.base().projection_years, rent
        ),
        None => println!("\nNo rent below twice the base rent recovers the initial investment"),
    }
    Ok(())
}

fn afford(
    price: f64,
    down_pct: f64,
    rate: f64,
    years: u32,
    tax: f64,
    insurance: f64,
    income: f64,
) -> Result<()> {
    let purchase = HomePurchase {
        price,
        down_payment_pct: down_pct,
        annual_rate: rate,
        term_years: years,
        annual_property_tax: tax,
        annual_insurance: insurance,
        gross_monthly_income: income,
    };
    let report = purchase.assess().context("Invalid purchase")?;

    println!("Home: ${:.2} with {:.1}% down (loan ${:.2})", price, down_pct, report.loan_amount);
    println!("  Mortgage (P&I): ${:.2}", report.monthly_mortgage);

    match &report.housing {
        Some(cost) => println!(
            "  Housing Cost: ${:.2}/month = {:.1}% of income ({:?})",
            cost.total_monthly_payment, cost.ratio_pct, cost.verdict
        ),
        None => println!("  Housing Cost: enter a gross monthly income to compare"),
    }

    let breakdown = &report.piti;
    println!("\nPITI + PMI:");
    println!("  Principal & Interest: ${:.2}", breakdown.mortgage);
    println!("  Property Tax: ${:.2}", breakdown.property_tax);
    println!("  Insurance: ${:.2}", breakdown.insurance);
    println!("  PMI: ${:.2}", breakdown.pmi);
    println!("  Total: ${:.2}", breakdown.total);
    if let (Some(dti), Some(verdict)) = (breakdown.debt_to_income, breakdown.verdict) {
        println!("  Debt-to-Income: {:.1}% ({:?})", dti * 100.0, verdict);
    }
    Ok(())
}
