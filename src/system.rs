use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::fmt::Display;
use std::fs;
use std::path::Path;

use crate::database::Registry;
use crate::database::models::{
    Category, HireWorkerInput, PaymentMethod, ScheduleDescriptor, UnionMembershipInput, Worker,
    WorkerId, WorkerUpdate,
};
use crate::database::store;
use crate::database::transaction::CommandExecutor;
use crate::error::AppError;
use crate::services::{PayrollReport, payroll, report, roster};

/// Entry point for the payroll business layer.
///
/// Every mutation runs as one command on the executor, so it either commits
/// fully or leaves the registry as it was. Queries read the live registry
/// directly.
#[derive(Debug)]
pub struct PayrollSystem {
    executor: CommandExecutor,
}

impl Default for PayrollSystem {
    fn default() -> Self {
        Self::new(Registry::new())
    }
}

impl PayrollSystem {
    pub fn new(registry: Registry) -> Self {
        Self {
            executor: CommandExecutor::new(registry),
        }
    }

    pub fn registry(&self) -> &Registry {
        self.executor.registry()
    }

    pub fn into_registry(self) -> Registry {
        self.executor.into_registry()
    }

    /// Run an arbitrary command with the executor's rollback guarantees.
    pub fn execute<T, E, F>(&mut self, operation: F) -> Result<T, E>
    where
        F: FnOnce(&mut Registry) -> Result<T, E>,
        E: From<AppError> + Display,
    {
        self.executor.execute(operation)
    }

    pub fn undo(&mut self) -> Result<(), AppError> {
        self.executor.undo()
    }

    pub fn redo(&mut self) -> Result<(), AppError> {
        self.executor.redo()
    }

    pub fn is_open(&self) -> bool {
        self.executor.is_open()
    }

    pub fn close(&mut self) {
        self.executor.close();
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AppError> {
        store::save_registry(path, self.registry())
    }

    // Commands

    pub fn hire_worker(&mut self, input: &HireWorkerInput) -> Result<WorkerId, AppError> {
        self.execute(|r| roster::hire_worker(r, input))
    }

    pub fn fire_worker(&mut self, id: WorkerId) -> Result<Worker, AppError> {
        self.execute(|r| roster::fire_worker(r, id))
    }

    pub fn update_worker(&mut self, id: WorkerId, update: &WorkerUpdate) -> Result<(), AppError> {
        self.execute(|r| roster::update_worker(r, id, update))
    }

    pub fn set_union_membership(
        &mut self,
        id: WorkerId,
        membership: Option<&UnionMembershipInput>,
    ) -> Result<(), AppError> {
        self.execute(|r| roster::set_union_membership(r, id, membership))
    }

    pub fn set_payment_method(&mut self, id: WorkerId, method: PaymentMethod) -> Result<(), AppError> {
        self.execute(|r| roster::set_payment_method(r, id, method))
    }

    pub fn change_category(
        &mut self,
        id: WorkerId,
        category: Category,
        salary: &str,
        commission: Option<&str>,
    ) -> Result<(), AppError> {
        self.execute(|r| roster::change_category(r, id, category, salary, commission))
    }

    pub fn post_time_card(&mut self, id: WorkerId, date: &str, hours: &str) -> Result<(), AppError> {
        self.execute(|r| roster::post_time_card(r, id, date, hours))
    }

    pub fn post_sale(&mut self, id: WorkerId, date: &str, amount: &str) -> Result<(), AppError> {
        self.execute(|r| roster::post_sale(r, id, date, amount))
    }

    pub fn post_service_fee(&mut self, union_id: &str, date: &str, amount: &str) -> Result<(), AppError> {
        self.execute(|r| roster::post_service_fee(r, union_id, date, amount))
    }

    pub fn create_payment_schedule(&mut self, text: &str) -> Result<ScheduleDescriptor, AppError> {
        self.execute(|r| r.schedules.create(text.trim()))
    }

    /// Remove every worker and custom schedule. Undoable.
    pub fn reset(&mut self) -> Result<(), AppError> {
        self.execute(|r| {
            r.clear();
            log::info!("Registry cleared");
            Ok(())
        })
    }

    /// Pay everyone due on `date` and commit their last-paid markers.
    ///
    /// When `output` is given the rendered report is written there as part of
    /// the same command; a write failure rolls the whole run back.
    pub fn run_payroll(&mut self, date: NaiveDate, output: Option<&Path>) -> Result<PayrollReport, AppError> {
        self.execute(|r| {
            let result = payroll::run_payroll(r, date);
            if let Some(path) = output {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, report::render(&result))?;
                log::info!("Payroll report written to {}", path.display());
            }
            Ok(result)
        })
    }

    // Queries

    /// Gross pay due on `date`. Read-only.
    pub fn total_payroll(&self, date: NaiveDate) -> BigDecimal {
        payroll::compute_total_payroll(self.registry(), date)
    }

    /// The report a run on `date` would produce, without committing it.
    pub fn preview_payroll(&self, date: NaiveDate) -> PayrollReport {
        payroll::build_report(self.registry(), date)
    }

    pub fn worker(&self, id: WorkerId) -> Result<&Worker, AppError> {
        self.registry().workers.find(id)
    }

    pub fn worker_by_name(&self, name: &str, index: usize) -> Result<&Worker, AppError> {
        self.registry()
            .workers
            .find_by_name(name, index)
            .ok_or_else(|| AppError::not_found(format!("No worker named '{}' at position {}", name, index)))
    }

    pub fn worker_count(&self) -> usize {
        self.registry().workers.len()
    }

    pub fn normal_hours(&self, id: WorkerId, start: &str, end: &str) -> Result<BigDecimal, AppError> {
        roster::normal_hours(self.registry(), id, start, end)
    }

    pub fn overtime_hours(&self, id: WorkerId, start: &str, end: &str) -> Result<BigDecimal, AppError> {
        roster::overtime_hours(self.registry(), id, start, end)
    }

    pub fn sales_total(&self, id: WorkerId, start: &str, end: &str) -> Result<BigDecimal, AppError> {
        roster::sales_total(self.registry(), id, start, end)
    }

    pub fn service_fees_total(&self, id: WorkerId, start: &str, end: &str) -> Result<BigDecimal, AppError> {
        roster::service_fees_total(self.registry(), id, start, end)
    }
}
