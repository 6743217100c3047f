use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::database::models::{PaymentPeriod, ScheduleDescriptor, ScheduleRule, Worker};

/// Monday that anchors week counting for multi-week schedules. Week 0 runs
/// from here, so Friday 2004-12-31 is the first pay day of `weekly 2 5`.
pub fn pay_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2004, 12, 27).unwrap_or(NaiveDate::MIN)
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Last weekday of the month, walking back over Saturday and Sunday.
pub fn last_business_day(date: NaiveDate) -> NaiveDate {
    let mut day = last_day_of_month(date);
    while matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }
    day
}

/// Whole weeks since the epoch, `None` for dates before it.
fn weeks_since_epoch(date: NaiveDate) -> Option<i64> {
    let epoch = pay_epoch();
    if date < epoch {
        return None;
    }
    Some((date - epoch).num_days() / 7)
}

/// Whether `date` is a pay day for `schedule`. Nobody is due before their hire date.
pub fn is_due(schedule: &ScheduleDescriptor, hire_date: Option<NaiveDate>, date: NaiveDate) -> bool {
    if hire_date.is_some_and(|hired| date < hired) {
        return false;
    }

    match schedule.rule() {
        ScheduleRule::MonthlyDay(day) => {
            let last = last_day_of_month(date);
            date.day() == day || (day > last.day() && date == last)
        }
        ScheduleRule::MonthlyLastBusinessDay => date == last_business_day(date),
        ScheduleRule::Weekly { frequency, weekday } => {
            date.weekday().number_from_monday() == weekday
                && weeks_since_epoch(date).is_some_and(|weeks| weeks % i64::from(frequency) == 0)
        }
    }
}

/// First day covered by a payment made on `date`.
///
/// The later of the day after the last payment and the start implied by the
/// schedule (first of the month, or `frequency` weeks back). Workers never
/// paid are bounded by their hire date instead.
pub fn period_start(
    schedule: &ScheduleDescriptor,
    date: NaiveDate,
    last_paid: Option<NaiveDate>,
    hire_date: Option<NaiveDate>,
) -> NaiveDate {
    let implied = match schedule.rule() {
        ScheduleRule::Weekly { frequency, .. } => date
            .checked_sub_days(Days::new(7 * u64::from(frequency)))
            .and_then(|d| d.succ_opt())
            .unwrap_or(date),
        ScheduleRule::MonthlyDay(_) | ScheduleRule::MonthlyLastBusinessDay => {
            date.with_day(1).unwrap_or(date)
        }
    };

    let bound = match last_paid {
        Some(paid) => paid.succ_opt(),
        None => hire_date,
    };

    match bound {
        Some(bound) if bound > implied => bound,
        _ => implied,
    }
}

/// Due on `date` with a non-empty period left to pay. A second run on the
/// same date finds the period already covered.
pub fn is_worker_due(worker: &Worker, date: NaiveDate) -> bool {
    is_due(&worker.schedule, worker.effective_hire_date(), date)
        && payment_period(worker, date).start <= date
}

pub fn payment_period(worker: &Worker, date: NaiveDate) -> PaymentPeriod {
    let start = period_start(
        &worker.schedule,
        date,
        worker.last_paid,
        worker.effective_hire_date(),
    );
    PaymentPeriod::new(start, date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn schedule(text: &str) -> ScheduleDescriptor {
        ScheduleDescriptor::parse(text).unwrap()
    }

    #[test]
    fn test_weekly_every_friday() {
        let weekly = schedule("weekly 1 5");
        assert!(is_due(&weekly, None, date(2005, 1, 7)));
        assert!(is_due(&weekly, None, date(2005, 1, 14)));
        assert!(!is_due(&weekly, None, date(2005, 1, 13)));
    }

    #[test]
    fn test_biweekly_anchored_on_epoch() {
        let biweekly = schedule("weekly 2 5");
        assert!(is_due(&biweekly, None, date(2004, 12, 31)));
        assert!(!is_due(&biweekly, None, date(2005, 1, 7)));
        assert!(is_due(&biweekly, None, date(2005, 1, 14)));
        assert!(is_due(&biweekly, None, date(2005, 1, 28)));
    }

    #[test]
    fn test_dates_before_epoch_are_never_due() {
        let weekly = schedule("weekly 5");
        assert!(!is_due(&weekly, None, date(2004, 12, 24)));
    }

    #[test]
    fn test_last_business_day_skips_weekend() {
        // 2005-04-30 is a Saturday
        let monthly = schedule("monthly $");
        assert!(is_due(&monthly, None, date(2005, 4, 29)));
        assert!(!is_due(&monthly, None, date(2005, 4, 30)));
        assert!(is_due(&monthly, None, date(2005, 1, 31)));
    }

    #[test]
    fn test_monthly_fixed_day() {
        let monthly = schedule("monthly 28");
        assert!(is_due(&monthly, None, date(2005, 2, 28)));
        assert!(!is_due(&monthly, None, date(2005, 3, 31)));
    }

    #[test]
    fn test_never_due_before_hire() {
        let weekly = schedule("weekly 5");
        assert!(!is_due(&weekly, Some(date(2005, 1, 8)), date(2005, 1, 7)));
        assert!(is_due(&weekly, Some(date(2005, 1, 7)), date(2005, 1, 7)));
    }

    #[test]
    fn test_worker_paid_on_date_is_no_longer_due() {
        let mut worker = Worker::new(
            crate::database::models::WorkerId(1),
            "Ana".to_string(),
            "Street 1".to_string(),
            crate::database::models::Compensation::Salaried {
                monthly_salary: bigdecimal::BigDecimal::from(1000),
            },
            schedule("monthly $"),
        );
        assert!(is_worker_due(&worker, date(2005, 1, 31)));

        worker.last_paid = Some(date(2005, 1, 31));
        assert!(!is_worker_due(&worker, date(2005, 1, 31)));
        assert!(is_worker_due(&worker, date(2005, 2, 28)));
    }

    #[test]
    fn test_period_start_rules() {
        let biweekly = schedule("weekly 2 5");
        assert_eq!(
            period_start(&biweekly, date(2005, 1, 14), None, Some(date(2005, 1, 1))),
            date(2005, 1, 1)
        );
        assert_eq!(
            period_start(&biweekly, date(2005, 1, 14), None, Some(date(2005, 1, 5))),
            date(2005, 1, 5)
        );
        assert_eq!(
            period_start(&biweekly, date(2005, 1, 28), Some(date(2005, 1, 20)), None),
            date(2005, 1, 21)
        );
        assert_eq!(
            period_start(&biweekly, date(2005, 1, 28), Some(date(2004, 12, 31)), None),
            date(2005, 1, 15)
        );

        let monthly = schedule("monthly $");
        assert_eq!(
            period_start(&monthly, date(2005, 2, 28), Some(date(2005, 1, 31)), None),
            date(2005, 2, 1)
        );
    }
}
