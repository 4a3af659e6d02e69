use clap::{Args, ValueEnum};
use serde::Serialize;
use serde_json::Value;

use investor_calc_core::history::HistoryLedger;
use investor_calc_core::sip::{self, SipInput};
use investor_calc_core::swp::{self, SwpInput};
use investor_calc_core::types::ComputationOutput;
use investor_calc_core::{tvm, InvestorCalcError, InvestorCalcResult};

use crate::commands::tvm::TvmRequest;
use crate::input;

/// Arguments for batch comparison. Plans run in file order; the output is
/// the resulting calculation history, newest first, capped at ten entries
/// with duplicate plans collapsed.
#[derive(Args)]
pub struct CompareArgs {
    /// Calculator the plans feed
    #[arg(long, value_enum, default_value = "sip")]
    pub calculator: Calculator,

    /// Path to a JSON file holding an array of plans
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Calculator {
    Sip,
    Swp,
    Tvm,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let raw: Value = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err(
            "Provide --input <file.json> with an array of plans, or pipe JSON via stdin".into(),
        );
    };

    match args.calculator {
        Calculator::Sip => {
            let plans: Vec<SipInput> = serde_json::from_value(raw)?;
            run_batch(plans, sip::project_sip)
        }
        Calculator::Swp => {
            let plans: Vec<SwpInput> = serde_json::from_value(raw)?;
            run_batch(plans, swp::simulate_swp)
        }
        Calculator::Tvm => {
            let requests: Vec<TvmRequest> = serde_json::from_value(raw)?;
            run_batch(requests, |request| {
                tvm::solve_tvm(&request.variables(), request.solve_for)
            })
        }
    }
}

/// Run every plan through one calculator, recording each into a fresh
/// session ledger, and serialize the ledger newest first.
fn run_batch<I, R, F>(plans: Vec<I>, mut calculate: F) -> Result<Value, Box<dyn std::error::Error>>
where
    I: PartialEq + Serialize,
    R: Serialize,
    F: FnMut(&I) -> InvestorCalcResult<ComputationOutput<R>>,
{
    if plans.is_empty() {
        return Err("Comparison needs at least one plan".into());
    }

    let mut ledger: HistoryLedger<I, R> = HistoryLedger::new();
    for plan in plans {
        let output = calculate(&plan)?;
        ledger.record(plan, output.result);
    }

    Ok(serde_json::to_value(ledger.entries()).map_err(InvestorCalcError::from)?)
}
