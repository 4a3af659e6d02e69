use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use investor_calc_core::tvm::{self, SolveFor, TvmVariables};
use investor_calc_core::InvestorCalcError;

use crate::input;

/// Arguments for the TVM solver. Unset slots default to zero, the way a
/// cleared pocket calculator register reads.
#[derive(Args)]
pub struct TvmArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    /// Variable to solve for (required unless the request comes from a file
    /// or stdin)
    #[arg(long, value_enum)]
    pub solve_for: Option<SolveTarget>,

    /// Number of monthly periods (N)
    #[arg(long, default_value = "0")]
    pub periods: Decimal,

    /// Nominal annual rate in percent (I)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub rate: Decimal,

    /// Present value (PV)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub pv: Decimal,

    /// Payment per period (PMT)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub pmt: Decimal,

    /// Future value (FV)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub fv: Decimal,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SolveTarget {
    N,
    I,
    Pv,
    Pmt,
    Fv,
}

impl From<SolveTarget> for SolveFor {
    fn from(target: SolveTarget) -> Self {
        match target {
            SolveTarget::N => SolveFor::Periods,
            SolveTarget::I => SolveFor::Rate,
            SolveTarget::Pv => SolveFor::PresentValue,
            SolveTarget::Pmt => SolveFor::Payment,
            SolveTarget::Fv => SolveFor::FutureValue,
        }
    }
}

/// One solve request as carried by JSON input: the solve target plus the
/// variable slots. Unset slots default to zero, matching the flag defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvmRequest {
    pub solve_for: SolveFor,
    #[serde(default)]
    pub periods: Decimal,
    #[serde(default)]
    pub annual_rate_pct: Decimal,
    #[serde(default)]
    pub present_value: Decimal,
    #[serde(default)]
    pub payment: Decimal,
    #[serde(default)]
    pub future_value: Decimal,
}

impl TvmRequest {
    pub fn variables(&self) -> TvmVariables {
        TvmVariables {
            periods: self.periods,
            annual_rate_pct: self.annual_rate_pct,
            present_value: self.present_value,
            payment: self.payment,
            future_value: self.future_value,
        }
    }
}

pub fn run_tvm(args: TvmArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: TvmRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(target) = args.solve_for {
        TvmRequest {
            solve_for: target.into(),
            periods: args.periods,
            annual_rate_pct: args.rate,
            present_value: args.pv,
            payment: args.pmt,
            future_value: args.fv,
        }
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("Provide --solve-for with variable flags, or --input <file.json>, \
                    or pipe JSON via stdin"
            .into());
    };
    let result = tvm::solve_tvm(&request.variables(), request.solve_for)?;
    Ok(serde_json::to_value(result).map_err(InvestorCalcError::from)?)
}
