use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

use super::calculator::{self, HoursSplit};
use crate::database::Registry;
use crate::database::models::{
    Category, Compensation, HireWorkerInput, PaymentMethod, SaleEntry, ServiceFee, TimeCard,
    UnionMembership, UnionMembershipInput, Worker, WorkerId, WorkerUpdate,
};
use crate::database::utils::{parse_date, parse_non_negative, parse_positive, to_stored_scale};
use crate::error::AppError;

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\s]+$").expect("name pattern"));

fn validate_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("Name cannot be empty"));
    }
    if !NAME.is_match(name) {
        return Err(AppError::bad_request(format!("Invalid name: '{}'", name)));
    }
    Ok(name.to_string())
}

fn validate_address(address: &str) -> Result<String, AppError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(AppError::bad_request("Address cannot be empty"));
    }
    Ok(address.to_string())
}

fn required(value: &str, field: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::bad_request(format!("{} cannot be empty", field)));
    }
    Ok(value.to_string())
}

fn rate(text: &str, field: &str) -> Result<BigDecimal, AppError> {
    parse_non_negative(text, field).map(|value| to_stored_scale(&value))
}

fn compensation(
    category: Category,
    salary: &str,
    commission: Option<&str>,
    sales: Vec<SaleEntry>,
) -> Result<Compensation, AppError> {
    let base = rate(salary, "Salary")?;
    match (category, commission) {
        (Category::Commissioned, Some(commission)) => Ok(Compensation::Commissioned {
            monthly_salary: base,
            commission_rate: rate(commission, "Commission")?,
            sales,
        }),
        (Category::Commissioned, None) => Err(AppError::bad_request("Commission cannot be empty")),
        (_, Some(_)) => Err(AppError::wrong_category(format!(
            "Commission does not apply to {} workers",
            category
        ))),
        (Category::Hourly, None) => Ok(Compensation::Hourly { hourly_rate: base }),
        (Category::Salaried, None) => Ok(Compensation::Salaried {
            monthly_salary: base,
        }),
    }
}

/// Add a worker on their category's default schedule.
pub fn hire_worker(registry: &mut Registry, input: &HireWorkerInput) -> Result<WorkerId, AppError> {
    let name = validate_name(&input.name)?;
    let address = validate_address(&input.address)?;
    let category = Category::from_str(input.category.trim())?;
    let compensation = compensation(category, &input.salary, input.commission.as_deref(), Vec::new())?;
    let schedule = registry.schedules.get(category.default_schedule())?;

    let mut worker = Worker::new(WorkerId(0), name, address, compensation, schedule);
    worker.hire_date = input
        .hire_date
        .as_deref()
        .filter(|text| !text.trim().is_empty())
        .map(|text| parse_date(text, "hire"))
        .transpose()?;

    let id = registry.workers.add(worker);
    log::info!("Hired {} worker {}", category, id);
    Ok(id)
}

pub fn fire_worker(registry: &mut Registry, id: WorkerId) -> Result<Worker, AppError> {
    let worker = registry
        .workers
        .remove(id)
        .ok_or_else(|| AppError::not_found(format!("Worker {} does not exist", id)))?;
    log::info!("Removed worker {}", id);
    Ok(worker)
}

pub fn update_worker(registry: &mut Registry, id: WorkerId, update: &WorkerUpdate) -> Result<(), AppError> {
    let schedule = match update {
        WorkerUpdate::Schedule(text) => Some(registry.schedules.get(text.trim())?),
        _ => None,
    };
    let worker = registry.workers.find_mut(id)?;

    match update {
        WorkerUpdate::Name(name) => worker.name = validate_name(name)?,
        WorkerUpdate::Address(address) => worker.address = validate_address(address)?,
        WorkerUpdate::Salary(salary) => worker.compensation.set_base_rate(rate(salary, "Salary")?),
        WorkerUpdate::Commission(text) => match &mut worker.compensation {
            Compensation::Commissioned {
                commission_rate, ..
            } => *commission_rate = rate(text, "Commission")?,
            _ => {
                return Err(AppError::wrong_category(format!(
                    "Worker {} is not commissioned",
                    id
                )));
            }
        },
        WorkerUpdate::Schedule(_) => {
            if let Some(schedule) = schedule {
                worker.schedule = schedule;
            }
        }
        WorkerUpdate::HireDate(text) => worker.hire_date = Some(parse_date(text, "hire")?),
    }
    Ok(())
}

/// Join or leave the union. Leaving keeps the posted service fees.
pub fn set_union_membership(
    registry: &mut Registry,
    id: WorkerId,
    membership: Option<&UnionMembershipInput>,
) -> Result<(), AppError> {
    let membership = match membership {
        Some(input) => {
            let union_id = required(&input.union_id, "Union id")?;
            if registry
                .workers
                .find_by_union_id(&union_id)
                .is_some_and(|other| other.id != id)
            {
                return Err(AppError::conflict(format!(
                    "Union id '{}' belongs to another worker",
                    union_id
                )));
            }
            Some(UnionMembership {
                union_id,
                dues_rate: rate(&input.dues_rate, "Union dues")?,
            })
        }
        None => None,
    };

    registry.workers.find_mut(id)?.union = membership;
    Ok(())
}

pub fn set_payment_method(registry: &mut Registry, id: WorkerId, method: PaymentMethod) -> Result<(), AppError> {
    let method = match method {
        PaymentMethod::Bank {
            bank,
            agency,
            account,
        } => PaymentMethod::Bank {
            bank: required(&bank, "Bank")?,
            agency: required(&agency, "Agency")?,
            account: required(&account, "Account")?,
        },
        other => other,
    };
    registry.workers.find_mut(id)?.payment_method = method;
    Ok(())
}

/// Move a worker to another category. Identity, union, payment method, logs
/// and dates carry over; sales survive only within the commissioned category.
/// The schedule resets to the new category's default.
pub fn change_category(
    registry: &mut Registry,
    id: WorkerId,
    category: Category,
    salary: &str,
    commission: Option<&str>,
) -> Result<(), AppError> {
    let schedule = registry.schedules.get(category.default_schedule())?;
    let worker = registry.workers.find_mut(id)?;

    let sales = match &mut worker.compensation {
        Compensation::Commissioned { sales, .. } if category == Category::Commissioned => {
            std::mem::take(sales)
        }
        _ => Vec::new(),
    };
    worker.compensation = compensation(category, salary, commission, sales)?;
    worker.schedule = schedule;
    log::info!("Worker {} is now {}", id, category);
    Ok(())
}

pub fn post_time_card(registry: &mut Registry, id: WorkerId, date: &str, hours: &str) -> Result<(), AppError> {
    let date = parse_date(date, "time card")?;
    let hours = to_stored_scale(&parse_positive(hours, "Hours")?);
    let worker = registry.workers.find_mut(id)?;
    if worker.category() != Category::Hourly {
        return Err(AppError::wrong_category(format!("Worker {} is not hourly", id)));
    }
    worker.time_cards.push(TimeCard { date, hours });
    Ok(())
}

pub fn post_sale(registry: &mut Registry, id: WorkerId, date: &str, amount: &str) -> Result<(), AppError> {
    let date = parse_date(date, "sale")?;
    let amount = to_stored_scale(&parse_positive(amount, "Amount")?);
    match &mut registry.workers.find_mut(id)?.compensation {
        Compensation::Commissioned { sales, .. } => {
            sales.push(SaleEntry { date, amount });
            Ok(())
        }
        _ => Err(AppError::wrong_category(format!("Worker {} is not commissioned", id))),
    }
}

pub fn post_service_fee(registry: &mut Registry, union_id: &str, date: &str, amount: &str) -> Result<(), AppError> {
    let union_id = required(union_id, "Union id")?;
    let date = parse_date(date, "service fee")?;
    let amount = to_stored_scale(&parse_positive(amount, "Amount")?);
    let worker = registry
        .workers
        .find_by_union_id_mut(&union_id)
        .ok_or_else(|| AppError::not_found(format!("No union member with id '{}'", union_id)))?;
    worker.service_fees.push(ServiceFee { date, amount });
    Ok(())
}

fn range(start: &str, end: &str) -> Result<(NaiveDate, NaiveDate), AppError> {
    let start = parse_date(start, "start")?;
    let end = parse_date(end, "end")?;
    if start > end {
        return Err(AppError::bad_request("Start date must not be after end date"));
    }
    Ok((start, end))
}

fn hours_between(registry: &Registry, id: WorkerId, start: &str, end: &str) -> Result<HoursSplit, AppError> {
    let (start, end) = range(start, end)?;
    let worker = registry.workers.find(id)?;
    if worker.category() != Category::Hourly {
        return Err(AppError::wrong_category(format!("Worker {} is not hourly", id)));
    }
    Ok(calculator::split_hours(&worker.time_cards, |date| {
        date >= start && date < end
    }))
}

/// Normal hours worked in `[start, end)`.
pub fn normal_hours(registry: &Registry, id: WorkerId, start: &str, end: &str) -> Result<BigDecimal, AppError> {
    hours_between(registry, id, start, end).map(|split| split.normal)
}

/// Overtime hours worked in `[start, end)`.
pub fn overtime_hours(registry: &Registry, id: WorkerId, start: &str, end: &str) -> Result<BigDecimal, AppError> {
    hours_between(registry, id, start, end).map(|split| split.overtime)
}

pub fn sales_total(registry: &Registry, id: WorkerId, start: &str, end: &str) -> Result<BigDecimal, AppError> {
    let (start, end) = range(start, end)?;
    let worker = registry.workers.find(id)?;
    if worker.category() != Category::Commissioned {
        return Err(AppError::wrong_category(format!("Worker {} is not commissioned", id)));
    }
    Ok(worker
        .sales()
        .iter()
        .filter(|sale| sale.date >= start && sale.date < end)
        .fold(BigDecimal::zero(), |total, sale| total + &sale.amount))
}

pub fn service_fees_total(registry: &Registry, id: WorkerId, start: &str, end: &str) -> Result<BigDecimal, AppError> {
    let (start, end) = range(start, end)?;
    let worker = registry.workers.find(id)?;
    if !worker.is_union_member() {
        return Err(AppError::bad_request(format!("Worker {} is not a union member", id)));
    }
    Ok(worker
        .service_fees
        .iter()
        .filter(|fee| fee.date >= start && fee.date < end)
        .fold(BigDecimal::zero(), |total, fee| total + &fee.amount))
}
