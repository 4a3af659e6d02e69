//! SWP (systematic withdrawal plan) depletion simulator.
//!
//! Simulates month-by-month withdrawal from a lump sum earning compound
//! interest, with the withdrawal optionally stepped up once per year, until
//! the balance can no longer cover the next withdrawal or the horizon is
//! reached. The two outcomes are distinguishable in the output: early
//! depletion reports `months_lasted` short of the horizon and a remaining
//! amount of zero, while reaching the horizon reports the surviving balance.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::InvestorCalcError;
use crate::types::{monthly_rate, with_metadata, ComputationOutput, Money, Percent};
use crate::InvestorCalcResult;

// ---------------------------------------------------------------------------
// Input Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwpInput {
    /// Starting lump sum.
    pub total_investment: Money,
    /// First-year monthly withdrawal.
    pub monthly_withdrawal: Money,
    /// Expected annual return, in percent.
    pub annual_return_pct: Percent,
    /// Simulation horizon in whole years.
    pub years: u32,
    /// Annual increase applied to the monthly withdrawal, in percent.
    #[serde(default)]
    pub annual_step_up_pct: Percent,
}

// ---------------------------------------------------------------------------
// Output Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwpOutput {
    /// Sum of every withdrawal actually made.
    pub total_withdrawals: Money,
    /// Balance surviving at the horizon; zero when the corpus depleted early.
    pub remaining_amount: Money,
    /// Months the corpus supported withdrawals.
    pub months_lasted: u32,
    /// True when the horizon was reached with the corpus intact.
    pub sustainable: bool,
    pub year_by_year: Vec<SwpYearRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwpYearRow {
    /// 1-based year index. The final row covers a partial year when the
    /// corpus depletes mid-year.
    pub year: u32,
    pub monthly_withdrawal: Money,
    pub withdrawn_in_year: Money,
    pub closing_balance: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Simulate monthly withdrawals from a growing lump sum.
pub fn simulate_swp(input: &SwpInput) -> InvestorCalcResult<ComputationOutput<SwpOutput>> {
    let start = Instant::now();
    validate(input)?;

    let r = monthly_rate(input.annual_return_pct);
    let one_plus_r = Decimal::ONE + r;
    let step_factor = Decimal::ONE + input.annual_step_up_pct / dec!(100);
    let horizon = input.years * 12;

    let mut balance = input.total_investment;
    let mut current = input.monthly_withdrawal;
    let mut months: u32 = 0;
    let mut total_withdrawals = Decimal::ZERO;
    let mut year_by_year: Vec<SwpYearRow> = Vec::new();
    let mut withdrawn_this_year = Decimal::ZERO;
    let mut withdrawal_in_force = current;

    // Guard checked before the first iteration: a first withdrawal the
    // balance cannot cover means the plan never starts (months_lasted = 0).
    while balance > current && months < horizon {
        balance = balance
            .checked_mul(one_plus_r)
            .ok_or_else(|| InvestorCalcError::overflow("annual_return_pct"))?
            - current;
        total_withdrawals = total_withdrawals
            .checked_add(current)
            .ok_or_else(|| InvestorCalcError::overflow("monthly_withdrawal"))?;
        withdrawn_this_year += current;
        months += 1;

        if months % 12 == 0 {
            year_by_year.push(SwpYearRow {
                year: months / 12,
                monthly_withdrawal: withdrawal_in_force,
                withdrawn_in_year: withdrawn_this_year,
                closing_balance: balance,
            });
            withdrawn_this_year = Decimal::ZERO;
            if input.annual_step_up_pct > Decimal::ZERO {
                current = current
                    .checked_mul(step_factor)
                    .ok_or_else(|| InvestorCalcError::overflow("annual_step_up_pct"))?;
            }
            withdrawal_in_force = current;
        }
    }

    // Partial final year when the corpus gives out mid-year.
    if months % 12 != 0 {
        year_by_year.push(SwpYearRow {
            year: months / 12 + 1,
            monthly_withdrawal: withdrawal_in_force,
            withdrawn_in_year: withdrawn_this_year,
            closing_balance: balance,
        });
    }

    let sustainable = months == horizon;
    let remaining_amount = if sustainable {
        balance.max(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    let mut warnings: Vec<String> = Vec::new();
    if !sustainable {
        warnings.push(format!(
            "Corpus is exhausted after {months} of {horizon} months"
        ));
    }

    let output = SwpOutput {
        total_withdrawals,
        remaining_amount,
        months_lasted: months,
        sustainable,
        year_by_year,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Month-by-month balance simulation: growth applied, then the \
         withdrawal taken, with the withdrawal stepped up once per completed year",
        &serde_json::json!({
            "monthly_rate": r.to_string(),
            "annual_step_up_pct": input.annual_step_up_pct.to_string(),
            "horizon_months": horizon,
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn validate(input: &SwpInput) -> InvestorCalcResult<()> {
    if input.total_investment <= Decimal::ZERO {
        return Err(InvestorCalcError::InvalidInput {
            field: "total_investment".into(),
            reason: "must be positive".into(),
        });
    }
    if input.monthly_withdrawal <= Decimal::ZERO {
        return Err(InvestorCalcError::InvalidInput {
            field: "monthly_withdrawal".into(),
            reason: "must be positive".into(),
        });
    }
    if input.annual_return_pct < Decimal::ZERO {
        return Err(InvestorCalcError::InvalidInput {
            field: "annual_return_pct".into(),
            reason: "must not be negative".into(),
        });
    }
    if input.years == 0 || input.years > 100 {
        return Err(InvestorCalcError::InvalidInput {
            field: "years".into(),
            reason: "must be between 1 and 100".into(),
        });
    }
    if input.annual_step_up_pct < Decimal::ZERO {
        return Err(InvestorCalcError::InvalidInput {
            field: "annual_step_up_pct".into(),
            reason: "must not be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_instant_depletion_never_starts() {
        // First withdrawal exceeds the whole corpus
        let input = SwpInput {
            total_investment: dec!(10_000),
            monthly_withdrawal: dec!(20_000),
            annual_return_pct: dec!(12),
            years: 5,
            annual_step_up_pct: dec!(0),
        };
        let result = simulate_swp(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.months_lasted, 0);
        assert_eq!(out.remaining_amount, dec!(0));
        assert_eq!(out.total_withdrawals, dec!(0));
        assert!(!out.sustainable);
        assert!(out.year_by_year.is_empty());
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_growth_outpaces_withdrawals_to_horizon() {
        // 1% monthly growth on 1 crore yields 100k/month against an 8k
        // withdrawal, so the corpus only grows
        let input = SwpInput {
            total_investment: dec!(10_000_000),
            monthly_withdrawal: dec!(8_000),
            annual_return_pct: dec!(12),
            years: 20,
            annual_step_up_pct: dec!(0),
        };
        let result = simulate_swp(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.months_lasted, 240);
        assert!(out.sustainable);
        assert!(out.remaining_amount > dec!(10_000_000));
        assert_eq!(out.total_withdrawals, dec!(8_000) * dec!(240));
        assert_eq!(out.year_by_year.len(), 20);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_zero_rate_depletes_arithmetically() {
        // 100k draining at 10k/month stops when the balance no longer
        // exceeds the withdrawal: 9 months, 90k withdrawn
        let input = SwpInput {
            total_investment: dec!(100_000),
            monthly_withdrawal: dec!(10_000),
            annual_return_pct: dec!(0),
            years: 5,
            annual_step_up_pct: dec!(0),
        };
        let result = simulate_swp(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.months_lasted, 9);
        assert_eq!(out.total_withdrawals, dec!(90_000));
        assert_eq!(out.remaining_amount, dec!(0));
        assert!(!out.sustainable);
    }

    #[test]
    fn test_step_up_accelerates_depletion() {
        // Zero growth, 10% step-up: 12 months at 1000, 12 at 1100, then
        // three more at 1210 before 1170 cannot cover a fourth
        let input = SwpInput {
            total_investment: dec!(30_000),
            monthly_withdrawal: dec!(1000),
            annual_return_pct: dec!(0),
            years: 3,
            annual_step_up_pct: dec!(10),
        };
        let result = simulate_swp(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.months_lasted, 27);
        assert_eq!(out.total_withdrawals, dec!(28_830));
        assert_eq!(out.remaining_amount, dec!(0));

        let rows = &out.year_by_year;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].monthly_withdrawal, dec!(1000));
        assert_eq!(rows[0].withdrawn_in_year, dec!(12_000));
        assert_eq!(rows[0].closing_balance, dec!(18_000));
        assert_eq!(rows[1].monthly_withdrawal, dec!(1100));
        assert_eq!(rows[1].closing_balance, dec!(4_800));
        assert_eq!(rows[2].year, 3);
        assert_eq!(rows[2].monthly_withdrawal, dec!(1210));
        assert_eq!(rows[2].withdrawn_in_year, dec!(3_630));
        assert_eq!(rows[2].closing_balance, dec!(1_170));
    }

    #[test]
    fn test_strict_guard_stops_at_equal_balance() {
        // After one withdrawal the balance equals the withdrawal exactly;
        // the strict comparison ends the plan there
        let input = SwpInput {
            total_investment: dec!(20_000),
            monthly_withdrawal: dec!(10_000),
            annual_return_pct: dec!(0),
            years: 5,
            annual_step_up_pct: dec!(0),
        };
        let result = simulate_swp(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.months_lasted, 1);
        assert_eq!(out.total_withdrawals, dec!(10_000));
    }

    #[test]
    fn test_rejects_zero_lump_sum() {
        let input = SwpInput {
            total_investment: dec!(0),
            monthly_withdrawal: dec!(1000),
            annual_return_pct: dec!(8),
            years: 10,
            annual_step_up_pct: dec!(0),
        };
        assert!(simulate_swp(&input).is_err());
    }

    #[test]
    fn test_rejects_zero_withdrawal() {
        let input = SwpInput {
            total_investment: dec!(100_000),
            monthly_withdrawal: dec!(0),
            annual_return_pct: dec!(8),
            years: 10,
            annual_step_up_pct: dec!(0),
        };
        assert!(simulate_swp(&input).is_err());
    }

    #[test]
    fn test_runaway_growth_overflow_is_an_error() {
        // At 1000% a year the corpus leaves Decimal's range before the
        // 10-year horizon; the simulation must error, not abort
        let input = SwpInput {
            total_investment: dec!(1_000_000_000),
            monthly_withdrawal: dec!(1000),
            annual_return_pct: dec!(1000),
            years: 10,
            annual_step_up_pct: dec!(0),
        };
        let err = simulate_swp(&input).unwrap_err();
        assert!(
            matches!(err, InvestorCalcError::InvalidInput { .. }),
            "Expected InvalidInput, got {err:?}"
        );
    }
}
