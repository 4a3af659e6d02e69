use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use investor_calc_core::sip::{self, SipInput};
use investor_calc_core::InvestorCalcError;

use crate::input;

/// Arguments for SIP projection
#[derive(Args)]
pub struct SipArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    /// First-year monthly contribution
    #[arg(long)]
    pub monthly_investment: Option<Decimal>,

    /// Expected annual return in percent (12 = 12% p.a.)
    #[arg(long)]
    pub annual_return_pct: Option<Decimal>,

    /// Investment horizon in whole years
    #[arg(long)]
    pub years: Option<u32>,

    /// Annual step-up applied to the contribution, in percent
    #[arg(long, default_value = "0")]
    pub step_up_pct: Decimal,
}

pub fn run_sip(args: SipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sip_input: SipInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let (Some(monthly), Some(rate), Some(years)) =
        (args.monthly_investment, args.annual_return_pct, args.years)
    {
        SipInput {
            monthly_investment: monthly,
            annual_return_pct: rate,
            years,
            annual_step_up_pct: args.step_up_pct,
        }
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("Provide --monthly-investment, --annual-return-pct and --years, \
                    or --input <file.json>, or pipe JSON via stdin"
            .into());
    };
    let result = sip::project_sip(&sip_input)?;
    Ok(serde_json::to_value(result).map_err(InvestorCalcError::from)?)
}
