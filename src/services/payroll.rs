use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use serde::Serialize;

use super::{calculator, schedule};
use crate::database::Registry;
use crate::database::models::{Category, PaymentBreakdown, PaymentResult, Worker, WorkerId};
use crate::database::utils::round_total;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollEntry {
    pub worker_id: WorkerId,
    pub name: String,
    pub category: Category,
    pub payment_method: String,
    pub result: PaymentResult,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryTotals {
    pub normal_hours: BigDecimal,
    pub overtime_hours: BigDecimal,
    pub fixed: BigDecimal,
    pub sales: BigDecimal,
    pub commission: BigDecimal,
    pub gross: BigDecimal,
    pub deductions: BigDecimal,
    pub net: BigDecimal,
}

/// Every payment due on one date, sorted by worker name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollReport {
    pub date: NaiveDate,
    pub entries: Vec<PayrollEntry>,
}

impl PayrollReport {
    pub fn section(&self, category: Category) -> impl Iterator<Item = &PayrollEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn totals(&self, category: Category) -> CategoryTotals {
        self.section(category)
            .fold(CategoryTotals::default(), |mut totals, entry| {
                let result = &entry.result;
                match &result.breakdown {
                    PaymentBreakdown::Hourly {
                        normal_hours,
                        overtime_hours,
                    } => {
                        totals.normal_hours += normal_hours;
                        totals.overtime_hours += overtime_hours;
                    }
                    PaymentBreakdown::Commissioned {
                        fixed,
                        sales,
                        commission,
                    } => {
                        totals.fixed += fixed;
                        totals.sales += sales;
                        totals.commission += commission;
                    }
                    PaymentBreakdown::Salaried => {}
                }
                totals.gross += &result.gross;
                totals.deductions += &result.deductions;
                totals.net += &result.net;
                totals
            })
    }

    /// Gross pay over all entries, rounded half-up.
    pub fn total_gross(&self) -> BigDecimal {
        round_total(
            &self
                .entries
                .iter()
                .fold(BigDecimal::zero(), |total, e| total + &e.result.gross),
        )
    }
}

pub fn due_workers(registry: &Registry, date: NaiveDate) -> impl Iterator<Item = &Worker> {
    registry
        .workers
        .get_all()
        .filter(move |worker| schedule::is_worker_due(worker, date))
}

/// Sum of gross pay for every worker due on `date`. Never mutates state.
pub fn compute_total_payroll(registry: &Registry, date: NaiveDate) -> BigDecimal {
    let total = due_workers(registry, date)
        .map(|worker| calculator::compute(worker, date).gross)
        .fold(BigDecimal::zero(), |total, gross| total + gross);
    round_total(&total)
}

/// Compute every due payment without committing anything.
pub fn build_report(registry: &Registry, date: NaiveDate) -> PayrollReport {
    let mut entries: Vec<PayrollEntry> = due_workers(registry, date)
        .map(|worker| PayrollEntry {
            worker_id: worker.id,
            name: worker.name.clone(),
            category: worker.category(),
            payment_method: worker.payment_method.describe(&worker.address),
            result: calculator::compute(worker, date),
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name).then(a.worker_id.cmp(&b.worker_id)));

    PayrollReport { date, entries }
}

/// Pay everyone due on `date`. Workers whose net pay is positive get their
/// last-paid date moved to `date`; run this inside a command so the update
/// rolls back with everything else.
pub fn run_payroll(registry: &mut Registry, date: NaiveDate) -> PayrollReport {
    let report = build_report(registry, date);

    let mut paid = 0usize;
    for entry in report.entries.iter().filter(|e| e.result.net > BigDecimal::zero()) {
        if let Some(worker) = registry.workers.get_by_id_mut(entry.worker_id) {
            worker.last_paid = Some(date);
            paid += 1;
        }
    }

    log::info!(
        "Payroll for {}: {} due, {} paid, gross {}",
        date,
        report.entries.len(),
        paid,
        report.total_gross()
    );
    report
}
