//! IRPS progressive income tax.
//!
//! The bracket table is expressed in annual income. A monthly gross is
//! annualised, taxed with the first bracket whose upper bound (inclusive)
//! covers it, and the annual tax is spread back over twelve months.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

use super::{NegativeAmountPolicy, out_of_range};

/// Number of pay months in a tax year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// A single IRPS bracket.
///
/// `annual_tax = annual_gross * rate - subtract` for incomes up to `up_to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrpsBracket {
    /// Inclusive upper bound in annual income; `None` for the top bracket.
    #[serde(default)]
    pub up_to: Option<Decimal>,
    /// Marginal rate as a fraction (0.20 for 20%).
    pub rate: Decimal,
    /// Fixed amount subtracted from `annual_gross * rate`.
    pub subtract: Decimal,
}

impl IrpsBracket {
    fn annual_tax(&self, annual_gross: Decimal) -> Option<Decimal> {
        annual_gross.checked_mul(self.rate)?.checked_sub(self.subtract)
    }
}

/// An ordered, validated IRPS bracket table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IrpsTable {
    brackets: Vec<IrpsBracket>,
}

impl IrpsTable {
    /// Builds a table from brackets in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the table is empty, if the
    /// bounds do not strictly ascend, if a rate lies outside 0-1, or if any
    /// bracket other than the last is open-ended (or the last one is not).
    pub fn new(brackets: Vec<IrpsBracket>) -> EngineResult<Self> {
        let Some(last) = brackets.last() else {
            return Err(EngineError::InvalidConfig {
                message: "IRPS table has no brackets".to_string(),
            });
        };
        if last.up_to.is_some() {
            return Err(EngineError::InvalidConfig {
                message: "the last IRPS bracket must have no upper bound".to_string(),
            });
        }

        let mut previous: Option<Decimal> = None;
        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "IRPS bracket {} has rate {} outside 0-1",
                        index + 1,
                        bracket.rate
                    ),
                });
            }
            if index + 1 == brackets.len() {
                break;
            }
            let Some(bound) = bracket.up_to else {
                return Err(EngineError::InvalidConfig {
                    message: format!("IRPS bracket {} is open-ended but not last", index + 1),
                });
            };
            if previous.is_some_and(|p| bound <= p) {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "IRPS bracket {} bound {} does not ascend",
                        index + 1,
                        bound
                    ),
                });
            }
            previous = Some(bound);
        }

        Ok(Self { brackets })
    }

    /// The statutory IRPS table.
    ///
    /// | Annual gross <= | Rate | Subtract |
    /// |---|---|---|
    /// | 42,000 | 10% | 0 |
    /// | 168,000 | 15% | 2,100 |
    /// | 504,000 | 20% | 10,500 |
    /// | 1,512,000 | 25% | 37,500 |
    /// | above | 32% | 141,540 |
    pub fn statutory() -> Self {
        let bracket = |up_to: Option<i64>, rate: i64, subtract: i64| IrpsBracket {
            up_to: up_to.map(Decimal::from),
            rate: Decimal::new(rate, 2),
            subtract: Decimal::from(subtract),
        };

        Self {
            brackets: vec![
                bracket(Some(42_000), 10, 0),
                bracket(Some(168_000), 15, 2_100),
                bracket(Some(504_000), 20, 10_500),
                bracket(Some(1_512_000), 25, 37_500),
                bracket(None, 32, 141_540),
            ],
        }
    }

    /// Returns the brackets in ascending order.
    pub fn brackets(&self) -> &[IrpsBracket] {
        &self.brackets
    }

    /// Finds the bracket for an annual income, returning its zero-based index.
    pub fn bracket_for(&self, annual_gross: Decimal) -> (usize, &IrpsBracket) {
        let last = self.brackets.len() - 1;
        let index = self
            .brackets
            .iter()
            .position(|b| b.up_to.is_none_or(|bound| annual_gross <= bound))
            .unwrap_or(last);
        (index, &self.brackets[index])
    }

    /// Lists the annual tax jump at each bracket boundary.
    ///
    /// Each entry is `(bound, tax_above - tax_at)` where both sides are
    /// evaluated at the bound itself. A continuous table yields zeros.
    pub fn boundary_gaps(&self) -> Vec<(Decimal, Decimal)> {
        self.brackets
            .windows(2)
            .filter_map(|pair| {
                let bound = pair[0].up_to?;
                let gap = pair[1]
                    .annual_tax(bound)?
                    .checked_sub(pair[0].annual_tax(bound)?)?;
                Some((bound, gap))
            })
            .collect()
    }
}

impl Default for IrpsTable {
    fn default() -> Self {
        Self::statutory()
    }
}

/// The result of the IRPS calculation.
#[derive(Debug, Clone)]
pub struct IrpsResult {
    /// The monthly gross multiplied by twelve.
    pub annual_gross: Decimal,
    /// One-based position of the applied bracket.
    pub bracket: usize,
    /// Tax due for the whole year.
    pub annual_tax: Decimal,
    /// Tax withheld this month, after the negative amount policy.
    pub monthly_tax: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the monthly IRPS withholding for a monthly gross pay.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] when the gross pay is too large to
/// annualise.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_irps, IrpsTable, NegativeAmountPolicy};
/// use rust_decimal::Decimal;
///
/// let table = IrpsTable::statutory();
/// let result =
///     calculate_irps(Decimal::new(3000, 0), &table, NegativeAmountPolicy::PassThrough, 1)
///         .unwrap();
///
/// // 36,000 a year falls in the 10% bracket
/// assert_eq!(result.bracket, 1);
/// assert_eq!(result.monthly_tax, Decimal::new(300, 0));
/// ```
pub fn calculate_irps(
    gross_pay: Decimal,
    table: &IrpsTable,
    policy: NegativeAmountPolicy,
    step_number: u32,
) -> EngineResult<IrpsResult> {
    let months = Decimal::from(MONTHS_PER_YEAR);
    let annual_gross = gross_pay
        .checked_mul(months)
        .ok_or_else(|| out_of_range("gross_pay"))?;
    let (index, bracket) = table.bracket_for(annual_gross);
    let annual_tax = bracket
        .annual_tax(annual_gross)
        .ok_or_else(|| out_of_range("gross_pay"))?;
    let unclamped = annual_tax / months;
    let monthly_tax = policy.apply(unclamped);

    let audit_step = AuditStep {
        step_number,
        rule_id: "irps".to_string(),
        rule_name: "IRPS Progressive Tax".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.normalize().to_string(),
            "annual_gross": annual_gross.normalize().to_string(),
            "policy": policy.as_str()
        }),
        output: serde_json::json!({
            "bracket": index + 1,
            "rate": bracket.rate.normalize().to_string(),
            "subtract": bracket.subtract.normalize().to_string(),
            "annual_tax": annual_tax.normalize().to_string(),
            "monthly_tax": monthly_tax.normalize().to_string(),
            "clamped": monthly_tax != unclamped
        }),
        reasoning: format!(
            "({} x {} - {}) / 12 = {}",
            annual_gross.round_dp(2),
            bracket.rate.normalize(),
            bracket.subtract.normalize(),
            monthly_tax.round_dp(2)
        ),
    };

    Ok(IrpsResult {
        annual_gross,
        bracket: index + 1,
        annual_tax,
        monthly_tax,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn irps(monthly: &str) -> IrpsResult {
        calculate_irps(
            dec(monthly),
            &IrpsTable::statutory(),
            NegativeAmountPolicy::PassThrough,
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_first_bracket_upper_bound_is_inclusive() {
        // 3,500 x 12 = 42,000
        let result = irps("3500");
        assert_eq!(result.bracket, 1);
        assert_eq!(result.annual_tax, dec("4200"));
        assert_eq!(result.monthly_tax, dec("350"));
    }

    #[test]
    fn test_just_above_first_bound_uses_second_bracket() {
        let result = irps("3500.01");
        assert_eq!(result.bracket, 2);
    }

    #[test]
    fn test_third_bracket_scenario() {
        // 20,909.09 x 12 = 250,909.08 -> 20% less 10,500
        let result = irps("20909.09");
        assert_eq!(result.bracket, 3);
        assert_eq!(result.annual_tax, dec("39681.816"));
        assert_eq!(result.monthly_tax.round_dp(2), dec("3306.82"));
    }

    #[test]
    fn test_top_bracket() {
        // 200,000 x 12 = 2,400,000 -> 32% less 141,540
        let result = irps("200000");
        assert_eq!(result.bracket, 5);
        assert_eq!(result.annual_tax, dec("626460"));
        assert_eq!(result.monthly_tax, dec("52205"));
    }

    #[test]
    fn test_zero_gross_pays_no_tax() {
        assert_eq!(irps("0").monthly_tax, Decimal::ZERO);
    }

    #[test]
    fn test_negative_gross_passes_negative_tax_through() {
        let result = irps("-1000");
        assert_eq!(result.bracket, 1);
        assert_eq!(result.monthly_tax, dec("-100"));
    }

    #[test]
    fn test_negative_gross_clamped_to_zero() {
        let result = calculate_irps(
            dec("-1000"),
            &IrpsTable::statutory(),
            NegativeAmountPolicy::ClampToZero,
            1,
        )
        .unwrap();
        assert_eq!(result.monthly_tax, Decimal::ZERO);
        assert_eq!(result.audit_step.output["clamped"], true);
    }

    #[test]
    fn test_gross_too_large_to_annualise_is_rejected() {
        let result = calculate_irps(
            Decimal::MAX,
            &IrpsTable::statutory(),
            NegativeAmountPolicy::PassThrough,
            1,
        );
        match result {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "gross_pay"),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_continuity_at_lower_boundaries() {
        let gaps = IrpsTable::statutory().boundary_gaps();
        assert_eq!(gaps.len(), 4);
        assert_eq!(gaps[0], (dec("42000"), Decimal::ZERO));
        assert_eq!(gaps[1], (dec("168000"), Decimal::ZERO));
    }

    #[test]
    fn test_upper_boundaries_jump_by_1800_a_year() {
        let gaps = IrpsTable::statutory().boundary_gaps();
        assert_eq!(gaps[2], (dec("504000"), dec("-1800")));
        assert_eq!(gaps[3], (dec("1512000"), dec("1800")));
    }

    #[test]
    fn test_monthly_difference_across_boundary_is_bounded() {
        for bound in ["42000", "168000", "504000", "1512000"] {
            let at = dec(bound) / dec("12");
            let above = (dec(bound) + Decimal::ONE) / dec("12");
            let difference = (irps(&above.to_string()).monthly_tax
                - irps(&at.to_string()).monthly_tax)
                .abs();
            assert!(
                difference <= dec("150.1"),
                "jump of {} at annual {}",
                difference,
                bound
            );
        }
    }

    #[test]
    fn test_new_rejects_empty_table() {
        assert!(matches!(
            IrpsTable::new(vec![]),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_new_rejects_bounded_last_bracket() {
        let brackets = vec![IrpsBracket {
            up_to: Some(dec("1000")),
            rate: dec("0.1"),
            subtract: Decimal::ZERO,
        }];
        assert!(IrpsTable::new(brackets).is_err());
    }

    #[test]
    fn test_new_rejects_descending_bounds() {
        let brackets = vec![
            IrpsBracket {
                up_to: Some(dec("2000")),
                rate: dec("0.1"),
                subtract: Decimal::ZERO,
            },
            IrpsBracket {
                up_to: Some(dec("1000")),
                rate: dec("0.2"),
                subtract: dec("100"),
            },
            IrpsBracket {
                up_to: None,
                rate: dec("0.3"),
                subtract: dec("200"),
            },
        ];
        match IrpsTable::new(brackets) {
            Err(EngineError::InvalidConfig { message }) => {
                assert!(message.contains("does not ascend"))
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_new_accepts_statutory_brackets() {
        let table = IrpsTable::new(IrpsTable::statutory().brackets().to_vec()).unwrap();
        assert_eq!(table, IrpsTable::default());
    }

    #[test]
    fn test_audit_step_reports_bracket() {
        let result = irps("20000");
        assert_eq!(result.audit_step.rule_id, "irps");
        assert_eq!(result.audit_step.output["bracket"], 3);
        assert_eq!(result.audit_step.output["rate"].as_str().unwrap(), "0.2");
    }
}
