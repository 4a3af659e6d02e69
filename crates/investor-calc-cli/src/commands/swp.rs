use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use investor_calc_core::swp::{self, SwpInput};
use investor_calc_core::InvestorCalcError;

use crate::input;

/// Arguments for SWP simulation
#[derive(Args)]
pub struct SwpArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    /// Starting lump sum
    #[arg(long)]
    pub total_investment: Option<Decimal>,

    /// First-year monthly withdrawal
    #[arg(long)]
    pub monthly_withdrawal: Option<Decimal>,

    /// Expected annual return in percent
    #[arg(long)]
    pub annual_return_pct: Option<Decimal>,

    /// Simulation horizon in whole years
    #[arg(long)]
    pub years: Option<u32>,

    /// Annual step-up applied to the withdrawal, in percent
    #[arg(long, default_value = "0")]
    pub step_up_pct: Decimal,
}

pub fn run_swp(args: SwpArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let swp_input: SwpInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let (Some(corpus), Some(withdrawal), Some(rate), Some(years)) = (
        args.total_investment,
        args.monthly_withdrawal,
        args.annual_return_pct,
        args.years,
    ) {
        SwpInput {
            total_investment: corpus,
            monthly_withdrawal: withdrawal,
            annual_return_pct: rate,
            years,
            annual_step_up_pct: args.step_up_pct,
        }
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("Provide --total-investment, --monthly-withdrawal, \
                    --annual-return-pct and --years, or --input <file.json>, \
                    or pipe JSON via stdin"
            .into());
    };
    let result = swp::simulate_swp(&swp_input)?;
    Ok(serde_json::to_value(result).map_err(InvestorCalcError::from)?)
}
