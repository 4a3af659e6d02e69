//! Five-variable time-value-of-money solver.
//!
//! Emulates a pocket financial calculator: given four of `{N, I, PV, PMT,
//! FV}`, solve the fifth under fixed-rate monthly compounding. Each solve
//! writes the computed value back into the variable set, so every variable is
//! both an input slot and a potential output slot.
//!
//! Conventions, kept from the product this replaces:
//!
//! - All five variables share one sign: balances and payments are entered as
//!   positive magnitudes. No cash-flow sign flipping is applied anywhere.
//! - `I` is a nominal annual percentage; every formula compounds at the
//!   monthly rate `I / 100 / 12`.
//! - The rate solve is the closed-form lump-sum approximation
//!   `((FV/PV)^(1/N) − 1) · 12 · 100`. It ignores the payment leg and is
//!   reported with a warning; it is not an iterative amortized-rate recovery.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::InvestorCalcError;
use crate::types::{monthly_rate, with_metadata, ComputationOutput};
use crate::InvestorCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which of the five TVM variables to solve for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveFor {
    /// N, the number of monthly periods.
    Periods,
    /// I, the nominal annual rate in percent.
    Rate,
    /// PV, the present value.
    PresentValue,
    /// PMT, the per-period payment.
    Payment,
    /// FV, the future value.
    FutureValue,
}

/// The full TVM variable set. The field designated by [`SolveFor`] is ignored
/// on input and overwritten in the returned set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvmVariables {
    /// Monthly period count. Whole months on input; holds a fractional value
    /// when it is the solved variable.
    pub periods: Decimal,
    /// Nominal annual interest rate in percent (12 = 12% p.a.).
    pub annual_rate_pct: Decimal,
    /// Present value.
    pub present_value: Decimal,
    /// Per-period payment.
    pub payment: Decimal,
    /// Future value.
    pub future_value: Decimal,
}

/// Result of a TVM solve: the computed value plus the variable set with that
/// value written back into its slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TvmSolution {
    pub value: Decimal,
    pub variables: TvmVariables,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// (1 + r)^n for a possibly fractional n, with overflow surfaced as an error
/// instead of a panic.
fn growth_factor(one_plus_r: Decimal, n: Decimal) -> InvestorCalcResult<Decimal> {
    one_plus_r
        .checked_powd(n)
        .ok_or_else(|| InvestorCalcError::InvalidInput {
            field: "periods".into(),
            reason: "growth factor is not representable at this rate and period count".into(),
        })
}

/// A formula result past `Decimal`'s representable range.
fn overflow_target(target: &str) -> InvestorCalcError {
    InvestorCalcError::InvalidSolveTarget {
        target: target.into(),
        reason: "result exceeds the representable numeric range".into(),
    }
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Solve one TVM variable from the other four.
pub fn solve_tvm(
    variables: &TvmVariables,
    solve_for: SolveFor,
) -> InvestorCalcResult<ComputationOutput<TvmSolution>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let r = monthly_rate(variables.annual_rate_pct);
    let one_plus_r = Decimal::ONE + r;
    // The rate slot is ignored when it is the solve target
    if solve_for != SolveFor::Rate && one_plus_r <= Decimal::ZERO {
        return Err(InvestorCalcError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "monthly growth factor 1 + I/1200 must be positive".into(),
        });
    }

    let value = match solve_for {
        SolveFor::FutureValue => solve_future_value(variables, r, one_plus_r)?,
        SolveFor::PresentValue => solve_present_value(variables, r, one_plus_r)?,
        SolveFor::Payment => solve_payment(variables, r, one_plus_r)?,
        SolveFor::Periods => solve_periods(variables, r, one_plus_r)?,
        SolveFor::Rate => {
            warnings.push(
                "Rate solve uses the closed-form (FV/PV)^(1/N) approximation; \
                 the payment leg is ignored"
                    .to_string(),
            );
            solve_rate(variables)?
        }
    };

    let mut updated = variables.clone();
    match solve_for {
        SolveFor::Periods => updated.periods = value,
        SolveFor::Rate => updated.annual_rate_pct = value,
        SolveFor::PresentValue => updated.present_value = value,
        SolveFor::Payment => updated.payment = value,
        SolveFor::FutureValue => updated.future_value = value,
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Five-variable TVM solve (monthly compounding, same-sign convention)",
        &serde_json::json!({
            "solve_for": format!("{solve_for:?}"),
            "annual_rate_pct": variables.annual_rate_pct.to_string(),
            "monthly_rate": r.to_string(),
        }),
        warnings,
        elapsed,
        TvmSolution {
            value,
            variables: updated,
        },
    ))
}

// ---------------------------------------------------------------------------
// Per-variable solvers
// ---------------------------------------------------------------------------

/// FV = PV·(1+r)^N + PMT·((1+r)^N − 1)/r
fn solve_future_value(
    vars: &TvmVariables,
    r: Decimal,
    one_plus_r: Decimal,
) -> InvestorCalcResult<Decimal> {
    if r.is_zero() {
        return Err(InvestorCalcError::DivisionByZero {
            context: "monthly rate (future value solve)".into(),
        });
    }
    let growth = growth_factor(one_plus_r, vars.periods)?;
    (growth - Decimal::ONE)
        .checked_div(r)
        .and_then(|factor| vars.payment.checked_mul(factor))
        .and_then(|annuity_leg| {
            vars.present_value
                .checked_mul(growth)
                .and_then(|lump_leg| lump_leg.checked_add(annuity_leg))
        })
        .ok_or_else(|| overflow_target("FutureValue"))
}

/// PV = PMT·(1 − (1+r)^(−N))/r + FV·(1+r)^(−N)
fn solve_present_value(
    vars: &TvmVariables,
    r: Decimal,
    one_plus_r: Decimal,
) -> InvestorCalcResult<Decimal> {
    if r.is_zero() {
        return Err(InvestorCalcError::DivisionByZero {
            context: "monthly rate (present value solve)".into(),
        });
    }
    let growth = growth_factor(one_plus_r, vars.periods)?;
    if growth.is_zero() {
        return Err(InvestorCalcError::DivisionByZero {
            context: "discount factor (present value solve)".into(),
        });
    }
    // Smallest positive growth is 1e-28, so the reciprocal stays in range
    let discount = Decimal::ONE / growth;
    (Decimal::ONE - discount)
        .checked_div(r)
        .and_then(|factor| vars.payment.checked_mul(factor))
        .and_then(|annuity_leg| {
            vars.future_value
                .checked_mul(discount)
                .and_then(|lump_leg| annuity_leg.checked_add(lump_leg))
        })
        .ok_or_else(|| overflow_target("PresentValue"))
}

/// PMT = PV·r·(1+r)^N / ((1+r)^N − 1)
///
/// The amortizing-payment relation: future value does not enter this formula.
fn solve_payment(
    vars: &TvmVariables,
    r: Decimal,
    one_plus_r: Decimal,
) -> InvestorCalcResult<Decimal> {
    if r.is_zero() {
        return Err(InvestorCalcError::DivisionByZero {
            context: "monthly rate (payment solve)".into(),
        });
    }
    let growth = growth_factor(one_plus_r, vars.periods)?;
    let annuity = growth - Decimal::ONE;
    if annuity.is_zero() {
        return Err(InvestorCalcError::DivisionByZero {
            context: "annuity factor (payment solve)".into(),
        });
    }
    vars.present_value
        .checked_mul(r)
        .and_then(|numerator| numerator.checked_mul(growth))
        .and_then(|numerator| numerator.checked_div(annuity))
        .ok_or_else(|| overflow_target("Payment"))
}

/// N = ln(1 + FV·r/PMT) / ln(1+r)
///
/// The annuity-accumulation relation: present value does not enter this
/// formula, and PMT must be non-zero.
fn solve_periods(
    vars: &TvmVariables,
    r: Decimal,
    one_plus_r: Decimal,
) -> InvestorCalcResult<Decimal> {
    if vars.payment.is_zero() {
        return Err(InvestorCalcError::InvalidSolveTarget {
            target: "Periods".into(),
            reason: "payment must be non-zero".into(),
        });
    }
    if r.is_zero() {
        return Err(InvestorCalcError::DivisionByZero {
            context: "monthly rate (period solve)".into(),
        });
    }
    let argument = vars
        .future_value
        .checked_mul(r)
        .and_then(|product| product.checked_div(vars.payment))
        .and_then(|quotient| Decimal::ONE.checked_add(quotient))
        .ok_or_else(|| overflow_target("Periods"))?;
    if argument <= Decimal::ZERO {
        return Err(InvestorCalcError::InvalidSolveTarget {
            target: "Periods".into(),
            reason: "logarithm argument must be positive".into(),
        });
    }
    argument
        .ln()
        .checked_div(one_plus_r.ln())
        .ok_or_else(|| overflow_target("Periods"))
}

/// I = ((FV/PV)^(1/N) − 1) · 12 · 100
fn solve_rate(vars: &TvmVariables) -> InvestorCalcResult<Decimal> {
    if vars.present_value.is_zero() {
        return Err(InvestorCalcError::InvalidSolveTarget {
            target: "Rate".into(),
            reason: "present value must be non-zero".into(),
        });
    }
    if vars.periods.is_zero() {
        return Err(InvestorCalcError::InvalidSolveTarget {
            target: "Rate".into(),
            reason: "periods must be non-zero".into(),
        });
    }
    let ratio = vars
        .future_value
        .checked_div(vars.present_value)
        .ok_or_else(|| overflow_target("Rate"))?;
    if ratio <= Decimal::ZERO {
        return Err(InvestorCalcError::InvalidSolveTarget {
            target: "Rate".into(),
            reason: "future value and present value must have the same sign".into(),
        });
    }
    let root = ratio
        .checked_powd(Decimal::ONE / vars.periods)
        .ok_or_else(|| InvestorCalcError::InvalidSolveTarget {
            target: "Rate".into(),
            reason: "growth ratio is not representable at this period count".into(),
        })?;
    (root - Decimal::ONE)
        .checked_mul(dec!(1200))
        .ok_or_else(|| overflow_target("Rate"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
