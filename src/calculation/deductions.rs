//! Gross pay and the deduction chain.
//!
//! # Order
//!
//! 1. Pension premium, from gross pay.
//! 2. Secondary fund premium, from gross pay.
//! 3. Taxable base = gross - pension - secondary fund.
//! 4. Disability premium, from the taxable base.
//! 5. Wage tax, from the taxable base (waived when a tax credit is elected).
//! 6. Net pay = gross minus all four deductions.
//!
//! Every amount passes through [`round_currency`] as soon as it is computed,
//! and later steps use the rounded values.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, DeductionRates, HourTotals};

/// Pay multipliers for the allowance tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceMultipliers {
    /// Legacy 25% tier.
    pub allowance_25: Decimal,
    /// 50% tier (night, Sunday).
    pub allowance_50: Decimal,
    /// 100% tier (public holiday).
    pub allowance_100: Decimal,
}

impl Default for AllowanceMultipliers {
    fn default() -> Self {
        Self {
            allowance_25: Decimal::new(125, 2),
            allowance_50: Decimal::new(15, 1),
            allowance_100: Decimal::new(20, 1),
        }
    }
}

/// Rounds a currency amount to cents, halves away from zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
///
/// assert_eq!(round_currency(dec("0.195")), dec("0.20"));
/// assert_eq!(round_currency(dec("3.1005")), dec("3.10"));
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

fn percent_of(base: Decimal, percent: Decimal) -> Decimal {
    round_currency(base * percent / Decimal::ONE_HUNDRED)
}

/// The result of a gross pay calculation.
#[derive(Debug, Clone)]
pub struct GrossPayResult {
    /// Gross pay, rounded to cents.
    pub gross_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates gross pay from period totals and the hourly rate.
///
/// Regular and paid-break hours are paid at the rate; each allowance tier at
/// the rate times its multiplier.
pub fn calculate_gross_pay(
    hours: &HourTotals,
    rate: Decimal,
    multipliers: &AllowanceMultipliers,
    step_number: u32,
) -> GrossPayResult {
    let regular_pay = hours.regular * rate;
    let paid_break_pay = hours.paid_break * rate;
    let allowance_25_pay = hours.allowance_25 * rate * multipliers.allowance_25;
    let allowance_50_pay = hours.allowance_50 * rate * multipliers.allowance_50;
    let allowance_100_pay = hours.allowance_100 * rate * multipliers.allowance_100;

    let gross_pay = round_currency(
        regular_pay + paid_break_pay + allowance_25_pay + allowance_50_pay + allowance_100_pay,
    );

    let audit_step = AuditStep {
        step_number,
        rule_id: "gross_pay".to_string(),
        rule_name: "Gross Pay".to_string(),
        input: serde_json::json!({
            "rate": rate.to_string(),
            "regular_hours": hours.regular.to_string(),
            "paid_break_hours": hours.paid_break.to_string(),
            "allowance_25_hours": hours.allowance_25.to_string(),
            "allowance_50_hours": hours.allowance_50.to_string(),
            "allowance_100_hours": hours.allowance_100.to_string(),
        }),
        output: serde_json::json!({
            "regular_pay": round_currency(regular_pay).to_string(),
            "paid_break_pay": round_currency(paid_break_pay).to_string(),
            "allowance_25_pay": round_currency(allowance_25_pay).to_string(),
            "allowance_50_pay": round_currency(allowance_50_pay).to_string(),
            "allowance_100_pay": round_currency(allowance_100_pay).to_string(),
            "gross_pay": gross_pay.to_string(),
        }),
        reasoning: format!("Gross pay at €{}/hour: €{}", rate, gross_pay),
    };

    GrossPayResult {
        gross_pay,
        audit_step,
    }
}

/// Amounts produced by the deduction chain.
#[derive(Debug, Clone)]
pub struct DeductionBreakdown {
    /// Gross pay the chain started from.
    pub gross_pay: Decimal,
    /// Pension premium.
    pub pension: Decimal,
    /// Secondary fund premium.
    pub secondary_fund: Decimal,
    /// Gross pay minus the two premiums.
    pub taxable_base: Decimal,
    /// Disability premium.
    pub disability_premium: Decimal,
    /// Wage tax.
    pub wage_tax: Decimal,
    /// Net pay.
    pub net_pay: Decimal,
    /// One audit step per deduction, then net pay.
    pub audit_steps: Vec<AuditStep>,
}

fn deduction_step(
    step_number: u32,
    rule_id: &str,
    rule_name: &str,
    base_name: &str,
    base: Decimal,
    percent: Decimal,
    amount: Decimal,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input: serde_json::json!({
            "base": base_name,
            "base_amount": base.to_string(),
            "percent": percent.to_string(),
        }),
        output: serde_json::json!({
            "amount": amount.to_string(),
        }),
        reasoning: format!("{}% of {} €{} = €{}", percent, base_name, base, amount),
    }
}

/// Applies the deduction chain to a gross amount.
///
/// `step_number` is the number of the first audit step; six are produced.
pub fn apply_deductions(
    gross_pay: Decimal,
    rates: &DeductionRates,
    step_number: u32,
) -> DeductionBreakdown {
    let gross_pay = round_currency(gross_pay);

    let pension = percent_of(gross_pay, rates.pension_percent);
    let secondary_fund = percent_of(gross_pay, rates.secondary_fund_percent);
    let taxable_base = gross_pay - pension - secondary_fund;
    let disability_premium = percent_of(taxable_base, rates.disability_premium_percent);
    let wage_tax = if rates.tax_credit_elected {
        round_currency(Decimal::ZERO)
    } else {
        percent_of(taxable_base, rates.wage_tax_percent)
    };
    let net_pay = gross_pay - pension - secondary_fund - disability_premium - wage_tax;

    let mut audit_steps = vec![
        deduction_step(
            step_number,
            "pension_premium",
            "Pension Premium",
            "gross_pay",
            gross_pay,
            rates.pension_percent,
            pension,
        ),
        deduction_step(
            step_number + 1,
            "secondary_fund_premium",
            "Secondary Fund Premium",
            "gross_pay",
            gross_pay,
            rates.secondary_fund_percent,
            secondary_fund,
        ),
        AuditStep {
            step_number: step_number + 2,
            rule_id: "taxable_base".to_string(),
            rule_name: "Taxable Base".to_string(),
            input: serde_json::json!({
                "gross_pay": gross_pay.to_string(),
                "pension": pension.to_string(),
                "secondary_fund": secondary_fund.to_string(),
            }),
            output: serde_json::json!({
                "taxable_base": taxable_base.to_string(),
            }),
            reasoning: format!(
                "€{} - €{} - €{} = €{}",
                gross_pay, pension, secondary_fund, taxable_base
            ),
        },
        deduction_step(
            step_number + 3,
            "disability_premium",
            "Disability Premium",
            "taxable_base",
            taxable_base,
            rates.disability_premium_percent,
            disability_premium,
        ),
    ];

    if rates.tax_credit_elected {
        audit_steps.push(AuditStep {
            step_number: step_number + 4,
            rule_id: "wage_tax".to_string(),
            rule_name: "Wage Tax".to_string(),
            input: serde_json::json!({
                "taxable_base": taxable_base.to_string(),
                "tax_credit_elected": true,
            }),
            output: serde_json::json!({
                "amount": wage_tax.to_string(),
            }),
            reasoning: "Tax credit elected: wage tax waived".to_string(),
        });
    } else {
        audit_steps.push(deduction_step(
            step_number + 4,
            "wage_tax",
            "Wage Tax",
            "taxable_base",
            taxable_base,
            rates.wage_tax_percent,
            wage_tax,
        ));
    }

    audit_steps.push(AuditStep {
        step_number: step_number + 5,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "total_deductions":
                (pension + secondary_fund + disability_premium + wage_tax).to_string(),
        }),
        output: serde_json::json!({
            "net_pay": net_pay.to_string(),
        }),
        reasoning: format!("Net pay: €{}", net_pay),
    });

    DeductionBreakdown {
        gross_pay,
        pension,
        secondary_fund,
        taxable_base,
        disability_premium,
        wage_tax,
        net_pay,
        audit_steps,
    }
}
