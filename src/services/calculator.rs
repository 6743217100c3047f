use bigdecimal::{BigDecimal, RoundingMode, Zero};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use super::schedule;
use crate::database::models::{
    Compensation, PaymentBreakdown, PaymentPeriod, PaymentResult, ScheduleDescriptor, ScheduleRule,
    TimeCard, Worker,
};
use crate::database::utils::MONEY_SCALE;

/// Daily hours paid at the normal rate; anything beyond is overtime.
pub const DAILY_NORMAL_HOURS: i64 = 8;

fn overtime_multiplier() -> BigDecimal {
    BigDecimal::new(15.into(), 1)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HoursSplit {
    pub normal: BigDecimal,
    pub overtime: BigDecimal,
}

/// Sum hours per calendar day over the cards accepted by `include`, then
/// split each day at the normal-hours threshold.
pub fn split_hours<F>(cards: &[TimeCard], include: F) -> HoursSplit
where
    F: Fn(NaiveDate) -> bool,
{
    let mut per_day: BTreeMap<NaiveDate, BigDecimal> = BTreeMap::new();
    for card in cards.iter().filter(|c| include(c.date)) {
        *per_day.entry(card.date).or_insert_with(BigDecimal::zero) += &card.hours;
    }

    let threshold = BigDecimal::from(DAILY_NORMAL_HOURS);
    per_day
        .into_values()
        .fold(HoursSplit::default(), |mut split, hours| {
            if hours > threshold {
                split.overtime += &hours - &threshold;
                split.normal += &threshold;
            } else {
                split.normal += hours;
            }
            split
        })
}

/// Salary owed for one period: the monthly amount for monthly schedules,
/// `monthly * 12 * frequency / 52` rounded down for weekly ones.
pub fn fixed_pay(monthly_salary: &BigDecimal, schedule: &ScheduleDescriptor, mode: RoundingMode) -> BigDecimal {
    match schedule.frequency_weeks() {
        Some(frequency) => {
            let yearly = monthly_salary * BigDecimal::from(12) * BigDecimal::from(frequency);
            (yearly / BigDecimal::from(52)).with_scale_round(MONEY_SCALE, mode)
        }
        None => monthly_salary.clone(),
    }
}

/// Commission on the summed sales, truncated to cents.
pub fn commission(sales_total: &BigDecimal, rate: &BigDecimal) -> BigDecimal {
    (sales_total * rate).with_scale_round(MONEY_SCALE, RoundingMode::Floor)
}

/// Days of dues charged for the period: every day of the pay month on
/// monthly schedules, every day of the period on weekly ones.
pub fn dues_billing_days(schedule: &ScheduleDescriptor, period: &PaymentPeriod) -> i64 {
    match schedule.rule() {
        ScheduleRule::Weekly { .. } => period.days(),
        ScheduleRule::MonthlyDay(_) | ScheduleRule::MonthlyLastBusinessDay => {
            i64::from(schedule::last_day_of_month(period.end).day())
        }
    }
}

/// Union dues plus service fees posted within the period. Zero for non-members.
pub fn union_deductions(worker: &Worker, period: &PaymentPeriod) -> BigDecimal {
    let Some(membership) = &worker.union else {
        return BigDecimal::zero();
    };

    let dues = &membership.dues_rate * BigDecimal::from(dues_billing_days(&worker.schedule, period));
    let fees = worker
        .service_fees
        .iter()
        .filter(|fee| period.contains(fee.date))
        .fold(BigDecimal::zero(), |total, fee| total + &fee.amount);

    dues + fees
}

/// Compute pay for `worker` on `period_end`, with the period start derived
/// from the worker's schedule and payment history.
pub fn compute(worker: &Worker, period_end: NaiveDate) -> PaymentResult {
    compute_for_period(worker, schedule::payment_period(worker, period_end))
}

pub fn compute_for_period(worker: &Worker, period: PaymentPeriod) -> PaymentResult {
    let (gross, breakdown) = match &worker.compensation {
        Compensation::Hourly { hourly_rate } => {
            let hours = split_hours(&worker.time_cards, |date| period.contains(date));
            let gross = &hours.normal * hourly_rate
                + &hours.overtime * (hourly_rate * overtime_multiplier());
            (
                gross,
                PaymentBreakdown::Hourly {
                    normal_hours: hours.normal,
                    overtime_hours: hours.overtime,
                },
            )
        }
        Compensation::Salaried { monthly_salary } => (
            fixed_pay(monthly_salary, &worker.schedule, RoundingMode::Down),
            PaymentBreakdown::Salaried,
        ),
        Compensation::Commissioned {
            monthly_salary,
            commission_rate,
            sales,
        } => {
            let fixed = fixed_pay(monthly_salary, &worker.schedule, RoundingMode::Floor);
            let sales_total = sales
                .iter()
                .filter(|sale| period.contains(sale.date))
                .fold(BigDecimal::zero(), |total, sale| total + &sale.amount);
            let commission = commission(&sales_total, commission_rate);
            (
                &fixed + &commission,
                PaymentBreakdown::Commissioned {
                    fixed,
                    sales: sales_total,
                    commission,
                },
            )
        }
    };

    // Hourly workers with nothing to pay are not charged for the period.
    let deductions = match &worker.compensation {
        Compensation::Hourly { .. } if gross.is_zero() => BigDecimal::zero(),
        _ => union_deductions(worker, &period),
    };

    let net = if gross > deductions {
        &gross - &deductions
    } else {
        BigDecimal::zero()
    };

    log::debug!(
        "Worker {} pay for {}..={}: gross {} deductions {} net {}",
        worker.id,
        period.start,
        period.end,
        gross,
        deductions,
        net
    );

    PaymentResult {
        worker_id: worker.id,
        period,
        gross,
        deductions,
        net,
        breakdown,
    }
}
