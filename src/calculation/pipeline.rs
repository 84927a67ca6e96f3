//! The full estimate: shifts in, [`Results`] out.
//!
//! The pipeline resolves the rate, classifies and sums every shift, prices
//! the totals and runs the deduction chain. It is pure: the same inputs
//! always produce the same results, audit trace included.

use rust_decimal::Decimal;

use crate::config::PayrollData;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, HourTotals, PayrollConfig, Results, WeekShifts,
};

use super::aggregation::aggregate_weeks;
use super::config_events::DEFAULT_NUMBER_OF_WEEKS;
use super::deductions::{apply_deductions, calculate_gross_pay};
use super::rate_policy::resolve_rate;
use super::validation::validate_shift;

/// Computes the estimate for a period of shift entries.
///
/// Only the first `config.number_of_weeks` weeks belong to the period;
/// weeks beyond that are ignored.
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::compute_results;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{Shift, WeekShifts};
///
/// let loader = ConfigLoader::load("./config/ah2025").unwrap();
/// let mut week = WeekShifts::new(1);
/// week.add_shift(Shift::new("09:00", "17:00"));
///
/// let results = compute_results(loader.defaults(), &[week], loader.data());
/// println!("Net pay: {}", results.net_pay);
/// ```
pub fn compute_results(
    config: &PayrollConfig,
    weeks: &[WeekShifts],
    data: &PayrollData,
) -> Results {
    let weeks = weeks_in_period(config, weeks);
    let mut trace = AuditTrace::default();

    let resolution = resolve_rate(config, data.rates(), 1);
    trace.steps.push(resolution.audit_step);
    trace.warnings.extend(resolution.warning);

    trace.warnings.extend(shift_warnings(weeks));

    let aggregation = aggregate_weeks(weeks, config.age_group.age_class(), 2);
    trace.steps.extend(aggregation.audit_steps);

    let hours = aggregation.totals.hour_totals();

    tracing::debug!(
        weeks = weeks.len(),
        shifts = aggregation.totals.shift_count,
        rate = %resolution.rate,
        "Aggregated shift hours"
    );

    price_hours(config, hours, resolution.rate, data, trace)
}

/// Computes the estimate from hour totals entered directly.
///
/// This is the older hour-based entry format; it is the only path on which
/// the 25% tier can be non-zero.
pub fn compute_results_from_hours(
    config: &PayrollConfig,
    hours: &HourTotals,
    data: &PayrollData,
) -> Results {
    let mut trace = AuditTrace::default();

    let resolution = resolve_rate(config, data.rates(), 1);
    trace.steps.push(resolution.audit_step);
    trace.warnings.extend(resolution.warning);

    price_hours(config, hours.clone(), resolution.rate, data, trace)
}

fn price_hours(
    config: &PayrollConfig,
    hours: HourTotals,
    rate: Decimal,
    data: &PayrollData,
    mut trace: AuditTrace,
) -> Results {
    let next_step = next_step_number(&trace.steps);

    let gross = calculate_gross_pay(&hours, rate, data.multipliers(), next_step);
    trace.steps.push(gross.audit_step);

    let breakdown = apply_deductions(gross.gross_pay, &config.deductions, next_step + 1);
    trace.steps.extend(breakdown.audit_steps);

    if !trace.warnings.is_empty() {
        tracing::warn!(
            warnings = trace.warnings.len(),
            "Estimate produced with warnings"
        );
    }

    Results {
        hourly_rate: rate,
        hours_text: hours.as_text(),
        hours,
        gross_pay: breakdown.gross_pay,
        pension_deduction: breakdown.pension,
        secondary_fund_deduction: breakdown.secondary_fund,
        disability_premium: breakdown.disability_premium,
        wage_tax: breakdown.wage_tax,
        net_pay: breakdown.net_pay,
        audit_trace: trace,
    }
}

fn weeks_in_period<'a>(config: &PayrollConfig, weeks: &'a [WeekShifts]) -> &'a [WeekShifts] {
    let number_of_weeks = match config.number_of_weeks {
        0 => DEFAULT_NUMBER_OF_WEEKS,
        n => n,
    };
    &weeks[..weeks.len().min(usize::from(number_of_weeks))]
}

fn next_step_number(steps: &[AuditStep]) -> u32 {
    steps.last().map_or(1, |step| step.step_number + 1)
}

fn shift_warnings(weeks: &[WeekShifts]) -> Vec<AuditWarning> {
    weeks
        .iter()
        .flat_map(|week| week.shifts.iter().map(move |shift| (week.week_number, shift)))
        .filter_map(|(week_number, shift)| {
            let problems = validate_shift(shift);
            (!problems.is_empty()).then(|| AuditWarning {
                code: "INVALID_SHIFT".to_string(),
                message: format!(
                    "Week {} shift '{}': {}",
                    week_number,
                    shift.id,
                    problems.join("; ")
                ),
                severity: "medium".to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{AgeGroup, JobFunction, RateMode, Shift};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn load_data() -> PayrollData {
        ConfigLoader::load("./config/ah2025").unwrap().data().clone()
    }

    fn flat_config(data: &PayrollData, rate: &str) -> PayrollConfig {
        let mut config = data.defaults().clone();
        config.rate_mode = RateMode::Flat;
        config.flat_hourly_rate = dec(rate);
        config
    }

    fn create_shift(start: &str, end: &str, manual: Option<u32>) -> Shift {
        Shift {
            id: format!("shift_{}_{}", start, end),
            start_time: start.to_string(),
            end_time: end.to_string(),
            break_minutes: manual,
            is_sunday: false,
            is_holiday: false,
        }
    }

    fn one_week(shift: Shift) -> Vec<WeekShifts> {
        let mut week = WeekShifts::new(1);
        week.add_shift(shift);
        vec![week]
    }

    /// PL-001: weekday shift with a 30 minute break
    #[test]
    fn test_weekday_shift_gross() {
        let data = load_data();
        let config = flat_config(&data, "20");
        let weeks = one_week(create_shift("09:00", "17:00", Some(30)));

        let results = compute_results(&config, &weeks, &data);

        assert_eq!(results.hours.regular, dec("7.5"));
        assert_eq!(results.hours.paid_break, Decimal::ZERO);
        assert_eq!(results.gross_pay, dec("150.00"));
    }

    #[test]
    fn test_weekday_shift_automatic_break() {
        let data = load_data();
        let config = flat_config(&data, "20");
        let weeks = one_week(create_shift("09:00", "17:00", None));

        let results = compute_results(&config, &weeks, &data);

        assert_eq!(results.hours.regular, dec("7.25"));
        assert_eq!(results.hours.paid_break, dec("0.25"));
        assert_eq!(results.gross_pay, dec("150.00"));
    }

    /// PL-002: Sunday shift
    #[test]
    fn test_sunday_shift_gross() {
        let data = load_data();
        let config = flat_config(&data, "20");
        let mut shift = create_shift("09:00", "17:00", Some(30));
        shift.is_sunday = true;

        let results = compute_results(&config, &one_week(shift), &data);

        assert_eq!(results.hours.allowance_50, dec("7.5"));
        assert_eq!(results.hours.regular, Decimal::ZERO);
        assert_eq!(results.gross_pay, dec("225.00"));
    }

    /// PL-003: night shift
    #[test]
    fn test_night_shift_gross() {
        let data = load_data();
        let config = flat_config(&data, "20");
        let weeks = one_week(create_shift("22:00", "06:00", Some(0)));

        let results = compute_results(&config, &weeks, &data);

        assert_eq!(results.hours.allowance_50, dec("8"));
        assert_eq!(results.hours.regular, Decimal::ZERO);
        assert_eq!(results.gross_pay, dec("240.00"));
        assert_eq!(results.hours_text.allowance_50, "08:00");
    }

    /// PL-003b: night shift with the automatic break
    #[test]
    fn test_night_shift_automatic_break_gross() {
        let data = load_data();
        let config = flat_config(&data, "20");
        let weeks = one_week(create_shift("22:00", "06:00", None));

        let results = compute_results(&config, &weeks, &data);

        assert_eq!(results.hours.allowance_50, dec("8"));
        assert_eq!(results.hours.regular, Decimal::ZERO);
        assert_eq!(results.hours.paid_break, dec("0.25"));
        // 8 * 20 * 1.5 + 0.25 * 20
        assert_eq!(results.gross_pay, dec("245.00"));
    }

    /// PL-004: legacy hour entry reproduces the reference deductions
    #[test]
    fn test_hour_based_reference_fixture() {
        let data = load_data();
        let config = flat_config(&data, "20");
        let hours = HourTotals {
            regular: dec("8"),
            paid_break: dec("0.5"),
            allowance_25: dec("1"),
            allowance_50: Decimal::ZERO,
            allowance_100: Decimal::ZERO,
        };

        let results = compute_results_from_hours(&config, &hours, &data);

        assert_eq!(results.gross_pay, dec("195.00"));
        assert_eq!(results.pension_deduction, dec("3.10"));
        assert_eq!(results.secondary_fund_deduction, dec("0.20"));
        assert_eq!(results.disability_premium, dec("0.90"));
        assert_eq!(results.wage_tax, dec("14.97"));
        assert_eq!(results.net_pay, dec("175.83"));
    }

    #[test]
    fn test_function_based_rate_ignores_flat_field() {
        let data = load_data();
        let mut config = flat_config(&data, "99");
        config.rate_mode = RateMode::FunctionBased;
        config.job_function = JobFunction::Cashier;
        config.age_group = AgeGroup::Age18;

        let weeks = one_week(create_shift("09:00", "13:00", None));

        let results = compute_results(&config, &weeks, &data);

        assert_eq!(results.hourly_rate, dec("9.95"));
        // 3.75 regular + 0.25 paid break at 9.95
        assert_eq!(results.gross_pay, dec("39.80"));
    }

    #[test]
    fn test_unavailable_rate_warns_and_pays_zero() {
        let data = load_data();
        let mut config = flat_config(&data, "20");
        config.rate_mode = RateMode::FunctionBased;
        config.job_function = JobFunction::ShiftLeader;
        config.age_group = AgeGroup::Age16;

        let weeks = one_week(create_shift("09:00", "17:00", None));

        let results = compute_results(&config, &weeks, &data);

        assert_eq!(results.gross_pay, Decimal::ZERO);
        assert_eq!(results.net_pay, Decimal::ZERO);
        assert_eq!(results.audit_trace.warnings[0].code, "RATE_UNAVAILABLE");
    }

    #[test]
    fn test_invalid_shift_warns_but_still_computes() {
        let data = load_data();
        let config = flat_config(&data, "20");
        let mut week = WeekShifts::new(2);
        week.add_shift(create_shift("09:00", "12:00", None));
        week.add_shift(create_shift("", "", None));

        let results = compute_results(&config, &[week], &data);

        assert_eq!(results.gross_pay, dec("60.00"));
        assert_eq!(results.audit_trace.warnings.len(), 1);
        assert_eq!(results.audit_trace.warnings[0].code, "INVALID_SHIFT");
        assert!(results.audit_trace.warnings[0].message.starts_with("Week 2"));
    }

    #[test]
    fn test_only_configured_weeks_are_counted() {
        let data = load_data();
        let mut config = flat_config(&data, "20");
        config.number_of_weeks = 1;
        let weeks: Vec<WeekShifts> = (1..=4)
            .map(|n| {
                let mut week = WeekShifts::new(n);
                week.add_shift(create_shift("09:00", "12:00", None));
                week
            })
            .collect();

        let results = compute_results(&config, &weeks, &data);

        assert_eq!(results.hours.regular, dec("3"));
        assert_eq!(results.gross_pay, dec("60.00"));

        config.number_of_weeks = 0;
        let results = compute_results(&config, &weeks, &data);
        assert_eq!(results.gross_pay, dec("240.00"));
    }

    #[test]
    fn test_shifts_beyond_period_are_not_validated() {
        let data = load_data();
        let mut config = flat_config(&data, "20");
        config.number_of_weeks = 1;
        let mut second = WeekShifts::new(2);
        second.add_shift(create_shift("", "", None));
        let weeks = vec![WeekShifts::new(1), second];

        let results = compute_results(&config, &weeks, &data);

        assert!(results.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_empty_period() {
        let data = load_data();
        let config = data.defaults().clone();

        let results = compute_results(&config, &[], &data);

        assert_eq!(results.gross_pay, Decimal::ZERO);
        assert_eq!(results.net_pay, Decimal::ZERO);
        assert_eq!(results.hours_text.regular, "00:00");
    }

    #[test]
    fn test_audit_trace_is_numbered_and_deterministic() {
        let data = load_data();
        let config = flat_config(&data, "20");
        let weeks = one_week(create_shift("22:00", "06:00", None));

        let first = compute_results(&config, &weeks, &data);
        let second = compute_results(&config, &weeks, &data);
        assert_eq!(first, second);

        let numbers: Vec<u32> = first.audit_trace.steps.iter().map(|s| s.step_number).collect();
        let expected: Vec<u32> = (1..=numbers.len() as u32).collect();
        assert_eq!(numbers, expected);
        assert_eq!(first.audit_trace.steps.last().unwrap().rule_id, "net_pay");
    }

    #[test]
    fn test_net_pay_identity_across_weeks() {
        let data = load_data();
        let config = flat_config(&data, "19.18");
        let mut weeks = Vec::new();
        for n in 1..=4 {
            let mut week = WeekShifts::new(n);
            week.add_shift(create_shift("16:00", "22:30", None));
            let mut sunday = create_shift("10:00", "18:00", None);
            sunday.is_sunday = true;
            week.add_shift(sunday);
            weeks.push(week);
        }

        let results = compute_results(&config, &weeks, &data);

        assert_eq!(
            results.net_pay,
            results.gross_pay - results.total_deductions()
        );
    }
}
