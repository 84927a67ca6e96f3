//! Calculation result models for the payroll engine.
//!
//! This module contains the [`Results`] type and the structures it is built
//! from: per-category hour totals, the pay amounts and the audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::to_text;

/// Period-level hour totals per category, in decimal hours.
///
/// The 25% bucket is kept for compatibility with hour-based input and is
/// always zero for shift-based calculations.
///
/// # Example
///
/// ```
/// use payroll_engine::models::HourTotals;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let totals = HourTotals {
///     regular: Decimal::from_str("7.5").unwrap(),
///     paid_break: Decimal::ZERO,
///     allowance_25: Decimal::ZERO,
///     allowance_50: Decimal::from_str("2.25").unwrap(),
///     allowance_100: Decimal::ZERO,
/// };
/// assert_eq!(totals.as_text().regular, "07:30");
/// assert_eq!(totals.as_text().allowance_50, "02:15");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourTotals {
    /// Hours paid at the base rate.
    pub regular: Decimal,
    /// Paid portion of breaks, paid at the base rate.
    pub paid_break: Decimal,
    /// Legacy 125% bucket.
    pub allowance_25: Decimal,
    /// Hours paid at 150% (night, Sunday).
    pub allowance_50: Decimal,
    /// Hours paid at 200% (public holiday).
    pub allowance_100: Decimal,
}

impl HourTotals {
    /// Formats every bucket as `HH:MM`.
    pub fn as_text(&self) -> HourTotalsText {
        HourTotalsText {
            regular: to_text(self.regular),
            paid_break: to_text(self.paid_break),
            allowance_25: to_text(self.allowance_25),
            allowance_50: to_text(self.allowance_50),
            allowance_100: to_text(self.allowance_100),
        }
    }
}

/// [`HourTotals`] formatted as `HH:MM` text for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourTotalsText {
    /// Regular hours.
    pub regular: String,
    /// Paid break hours.
    pub paid_break: String,
    /// Legacy 125% hours.
    pub allowance_25: String,
    /// 150% hours.
    pub allowance_50: String,
    /// 200% hours.
    pub allowance_100: String,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag degraded input (an unpriced rate combination, a malformed
/// shift) without stopping the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of a payroll estimate.
///
/// All currency amounts are rounded to two decimals; each deduction was
/// computed from the rounded amounts before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Results {
    /// The hourly rate the calculation used.
    pub hourly_rate: Decimal,
    /// Hour totals per category.
    pub hours: HourTotals,
    /// Hour totals formatted for display.
    pub hours_text: HourTotalsText,
    /// Gross pay.
    pub gross_pay: Decimal,
    /// Pension premium deducted from gross pay.
    pub pension_deduction: Decimal,
    /// Secondary fund premium deducted from gross pay.
    pub secondary_fund_deduction: Decimal,
    /// Disability premium deducted from the taxable base.
    pub disability_premium: Decimal,
    /// Wage tax deducted from the taxable base (zero when a tax credit is elected).
    pub wage_tax: Decimal,
    /// Net pay after all deductions.
    pub net_pay: Decimal,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl Results {
    /// Sum of the four deductions.
    pub fn total_deductions(&self) -> Decimal {
        self.pension_deduction
            + self.secondary_fund_deduction
            + self.disability_premium
            + self.wage_tax
    }
}
