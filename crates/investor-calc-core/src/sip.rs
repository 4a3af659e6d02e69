//! SIP (systematic investment plan) future-value projector.
//!
//! Projects the contributed principal and compounded value of a monthly
//! contribution schedule that may step up by a fixed percentage once per year.
//!
//! Timing convention: each deposit lands at the end of its month, after that
//! month's growth has been applied to the running balance. The final deposit
//! therefore earns no growth at all, and the first deposit compounds for
//! `total months − 1` periods.

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
pub struct SipInput {
    /// First-year monthly contribution.
    pub monthly_investment: Money,
    /// Expected annual return, in percent (12 = 12% p.a.).
    pub annual_return_pct: Percent,
    /// Investment horizon in whole years.
    pub years: u32,
    /// Annual increase applied to the monthly contribution, in percent.
    /// 0 means a flat SIP.
    #[serde(default)]
    pub annual_step_up_pct: Percent,
}

// ---------------------------------------------------------------------------
// Output Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipOutput {
    /// Sum of every contribution actually made, after step-ups.
    pub total_investment: Money,
    /// `total_value - total_investment`.
    pub estimated_returns: Money,
    /// Compounded value of all contributions at the horizon.
    pub total_value: Money,
    pub year_by_year: Vec<SipYearRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipYearRow {
    /// 1-based year index.
    pub year: u32,
    /// Monthly contribution in force during this year.
    pub monthly_contribution: Money,
    pub invested_in_year: Money,
    pub cumulative_investment: Money,
    /// Running balance after the year's final deposit.
    pub value_at_year_end: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project a monthly SIP with optional annual step-up.
pub fn project_sip(input: &SipInput) -> InvestorCalcResult<ComputationOutput<SipOutput>> {
    let start = Instant::now();
    validate(input)?;

    let mut warnings: Vec<String> = Vec::new();
    if input.annual_return_pct > dec!(15) {
        warnings.push(
            "Expected return above 15% a year is optimistic over long horizons".to_string(),
        );
    }

    let r = monthly_rate(input.annual_return_pct);
    let one_plus_r = Decimal::ONE + r;
    let step_factor = Decimal::ONE + input.annual_step_up_pct / dec!(100);
    let total_months = input.years * 12;

    let mut balance = Decimal::ZERO;
    let mut total_investment = Decimal::ZERO;
    let mut current = input.monthly_investment;
    let mut year_by_year = Vec::with_capacity(input.years as usize);

    for year in 0..input.years {
        // Always 12 while horizons are whole years
        let months_this_year = 12.min(total_months - year * 12);
        let mut invested_this_year = Decimal::ZERO;

        for _ in 0..months_this_year {
            // Growth first, deposit second: the month's deposit earns nothing
            // until the following month.
            balance = balance
                .checked_mul(one_plus_r)
                .ok_or_else(|| InvestorCalcError::overflow("annual_return_pct"))?
                .checked_add(current)
                .ok_or_else(|| InvestorCalcError::overflow("monthly_investment"))?;
            // total_investment never exceeds balance while r >= 0, so these
            // sums stay in range
            total_investment += current;
            invested_this_year += current;
        }

        year_by_year.push(SipYearRow {
            year: year + 1,
            monthly_contribution: current,
            invested_in_year: invested_this_year,
            cumulative_investment: total_investment,
            value_at_year_end: balance,
        });

        if year + 1 < input.years {
            current = current
                .checked_mul(step_factor)
                .ok_or_else(|| InvestorCalcError::overflow("annual_step_up_pct"))?;
        }
    }

    let output = SipOutput {
        total_investment,
        estimated_returns: balance - total_investment,
        total_value: balance,
        year_by_year,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "End-of-month contribution compounding at the monthly rate, with the \
         contribution stepped up once per completed year",
        &serde_json::json!({
            "monthly_rate": r.to_string(),
            "annual_step_up_pct": input.annual_step_up_pct.to_string(),
            "horizon_months": total_months,
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn validate(input: &SipInput) -> InvestorCalcResult<()> {
    if input.monthly_investment <= Decimal::ZERO {
        return Err(InvestorCalcError::InvalidInput {
            field: "monthly_investment".into(),
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
    use rust_decimal::MathematicalOps;
    use rust_decimal_macros::dec;

    fn flat_sip() -> SipInput {
        SipInput {
            monthly_investment: dec!(5000),
            annual_return_pct: dec!(12),
            years: 10,
            annual_step_up_pct: dec!(0),
        }
    }

    #[test]
    fn test_flat_sip_matches_closed_form() {
        // 5000/month at 1% monthly over 120 months, end-of-month deposits:
        // FV = 5000 * (1.01^120 - 1) / 0.01
        let result = project_sip(&flat_sip()).unwrap();
        let out = &result.result;

        assert_eq!(out.total_investment, dec!(600_000));
        let expected = dec!(5000) * (dec!(1.01).powd(dec!(120)) - Decimal::ONE) / dec!(0.01);
        assert!(
            (out.total_value - expected).abs() < dec!(1),
            "total_value={} expected={}",
            out.total_value,
            expected
        );
        assert_eq!(out.estimated_returns, out.total_value - out.total_investment);
    }

    #[test]
    fn test_final_deposit_earns_no_growth() {
        // One year at 12%: FV = 1000 * (1.01^12 - 1) / 0.01 ≈ 12682.50, the
        // ordinary-annuity value with no extra (1+r) factor.
        let input = SipInput {
            monthly_investment: dec!(1000),
            annual_return_pct: dec!(12),
            years: 1,
            annual_step_up_pct: dec!(0),
        };
        let result = project_sip(&input).unwrap();
        let fv = result.result.total_value;
        assert!((fv - dec!(12_682.50)).abs() < dec!(0.05), "fv={fv}");
    }

    #[test]
    fn test_zero_rate_sums_contributions() {
        // 1000/month stepping up 10% a year for 3 years at 0% return:
        // 12000 + 13200 + 14520 = 39720, with no growth at all
        let input = SipInput {
            monthly_investment: dec!(1000),
            annual_return_pct: dec!(0),
            years: 3,
            annual_step_up_pct: dec!(10),
        };
        let result = project_sip(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.total_investment, dec!(39_720));
        assert_eq!(out.total_value, dec!(39_720));
        assert_eq!(out.estimated_returns, dec!(0));
    }

    #[test]
    fn test_step_up_ladder_in_year_rows() {
        let input = SipInput {
            monthly_investment: dec!(1000),
            annual_return_pct: dec!(12),
            years: 3,
            annual_step_up_pct: dec!(10),
        };
        let result = project_sip(&input).unwrap();
        let rows = &result.result.year_by_year;

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].monthly_contribution, dec!(1000));
        assert_eq!(rows[1].monthly_contribution, dec!(1100));
        assert_eq!(rows[2].monthly_contribution, dec!(1210));
        assert_eq!(rows[2].cumulative_investment, dec!(39_720));
        assert_eq!(rows[2].value_at_year_end, result.result.total_value);
    }

    #[test]
    fn test_zero_step_up_keeps_contribution_flat() {
        let result = project_sip(&flat_sip()).unwrap();
        for row in &result.result.year_by_year {
            assert_eq!(row.monthly_contribution, dec!(5000));
            assert_eq!(row.invested_in_year, dec!(60_000));
        }
    }

    #[test]
    fn test_high_return_warns() {
        let mut input = flat_sip();
        input.annual_return_pct = dec!(18);
        let result = project_sip(&input).unwrap();
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_rejects_zero_contribution() {
        let mut input = flat_sip();
        input.monthly_investment = dec!(0);
        assert!(project_sip(&input).is_err());
    }

    #[test]
    fn test_rejects_zero_years() {
        let mut input = flat_sip();
        input.years = 0;
        assert!(project_sip(&input).is_err());
    }

    #[test]
    fn test_rejects_negative_step_up() {
        let mut input = flat_sip();
        input.annual_step_up_pct = dec!(-5);
        assert!(project_sip(&input).is_err());
    }

    #[test]
    fn test_runaway_growth_overflow_is_an_error() {
        // 1e9/month at 1000% a year leaves Decimal's range mid-projection
        let input = SipInput {
            monthly_investment: dec!(1_000_000_000),
            annual_return_pct: dec!(1000),
            years: 10,
            annual_step_up_pct: dec!(0),
        };
        let err = project_sip(&input).unwrap_err();
        assert!(
            matches!(err, InvestorCalcError::InvalidInput { .. }),
            "Expected InvalidInput, got {err:?}"
        );
    }

    #[test]
    fn test_runaway_step_up_overflow_is_an_error() {
        // An 11x annual contribution multiplier cannot run for 60 years
        let input = SipInput {
            monthly_investment: dec!(1000),
            annual_return_pct: dec!(0),
            years: 60,
            annual_step_up_pct: dec!(1000),
        };
        let err = project_sip(&input).unwrap_err();
        assert!(matches!(err, InvestorCalcError::InvalidInput { .. }));
    }
}
