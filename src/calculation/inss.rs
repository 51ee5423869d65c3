//! INSS social security contribution.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// Returns the employee INSS contribution rate (3% of gross pay).
pub fn inss_rate() -> Decimal {
    Decimal::new(3, 2)
}

/// The result of the INSS calculation.
#[derive(Debug, Clone)]
pub struct InssResult {
    /// The contribution withheld from gross pay.
    pub contribution: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the INSS contribution on a monthly gross pay.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_inss;
/// use rust_decimal::Decimal;
///
/// let result = calculate_inss(Decimal::new(20000, 0), 1);
/// assert_eq!(result.contribution, Decimal::new(600, 0));
/// ```
pub fn calculate_inss(gross_pay: Decimal, step_number: u32) -> InssResult {
    let rate = inss_rate();
    let contribution = gross_pay * rate;

    let audit_step = AuditStep {
        step_number,
        rule_id: "inss".to_string(),
        rule_name: "INSS Contribution".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.normalize().to_string()
        }),
        output: serde_json::json!({
            "rate": rate.to_string(),
            "contribution": contribution.normalize().to_string()
        }),
        reasoning: format!(
            "{} x {} = {}",
            gross_pay.round_dp(2),
            rate,
            contribution.round_dp(2)
        ),
    };

    InssResult {
        contribution,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_rate_is_exactly_three_percent() {
        assert_eq!(inss_rate(), dec("0.03"));
    }

    #[test]
    fn test_contribution_on_round_salary() {
        assert_eq!(calculate_inss(dec("15000"), 1).contribution, dec("450"));
    }

    #[test]
    fn test_contribution_keeps_full_precision() {
        let gross = dec("20909.0909");
        assert_eq!(calculate_inss(gross, 1).contribution, gross * dec("0.03"));
    }

    #[test]
    fn test_zero_gross_contributes_nothing() {
        assert_eq!(calculate_inss(Decimal::ZERO, 1).contribution, Decimal::ZERO);
    }

    #[test]
    fn test_audit_step() {
        let result = calculate_inss(dec("1000"), 3);
        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "inss");
        assert_eq!(result.audit_step.output["rate"].as_str().unwrap(), "0.03");
        assert_eq!(result.audit_step.reasoning, "1000 x 0.03 = 30.00");
    }
}
