use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::macros::string_enum;
use super::{PaymentMethod, ScheduleDescriptor};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(pub u64);

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WorkerId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(AppError::bad_request("Worker id cannot be empty"));
        }
        s.trim()
            .parse()
            .map(WorkerId)
            .map_err(|_| AppError::not_found(format!("Worker {} does not exist", s)))
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Category {
        Hourly => "hourly",
        Salaried => "salaried",
        Commissioned => "commissioned",
    }
}

impl Category {
    /// Report section order.
    pub const ALL: [Category; 3] = [Category::Hourly, Category::Salaried, Category::Commissioned];

    pub fn default_schedule(&self) -> &'static str {
        match self {
            Category::Hourly => ScheduleDescriptor::WEEKLY,
            Category::Salaried => ScheduleDescriptor::MONTHLY_LAST_BUSINESS_DAY,
            Category::Commissioned => ScheduleDescriptor::BIWEEKLY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeCard {
    pub date: NaiveDate,
    pub hours: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleEntry {
    pub date: NaiveDate,
    pub amount: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceFee {
    pub date: NaiveDate,
    pub amount: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionMembership {
    pub union_id: String,
    /// Charged once per billing day.
    pub dues_rate: BigDecimal,
}

/// Pay terms per category. Sales only exist for commissioned workers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Compensation {
    Hourly {
        hourly_rate: BigDecimal,
    },
    Salaried {
        monthly_salary: BigDecimal,
    },
    Commissioned {
        monthly_salary: BigDecimal,
        commission_rate: BigDecimal,
        #[serde(default)]
        sales: Vec<SaleEntry>,
    },
}

impl Compensation {
    pub fn category(&self) -> Category {
        match self {
            Compensation::Hourly { .. } => Category::Hourly,
            Compensation::Salaried { .. } => Category::Salaried,
            Compensation::Commissioned { .. } => Category::Commissioned,
        }
    }

    /// Hourly rate for hourly workers, monthly salary otherwise.
    pub fn base_rate(&self) -> &BigDecimal {
        match self {
            Compensation::Hourly { hourly_rate } => hourly_rate,
            Compensation::Salaried { monthly_salary } => monthly_salary,
            Compensation::Commissioned { monthly_salary, .. } => monthly_salary,
        }
    }

    pub fn set_base_rate(&mut self, rate: BigDecimal) {
        match self {
            Compensation::Hourly { hourly_rate } => *hourly_rate = rate,
            Compensation::Salaried { monthly_salary } => *monthly_salary = rate,
            Compensation::Commissioned { monthly_salary, .. } => *monthly_salary = rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,
    pub address: String,
    pub compensation: Compensation,
    pub union: Option<UnionMembership>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub hire_date: Option<NaiveDate>,
    pub last_paid: Option<NaiveDate>,
    pub schedule: ScheduleDescriptor,
    #[serde(default)]
    pub time_cards: Vec<TimeCard>,
    #[serde(default)]
    pub service_fees: Vec<ServiceFee>,
}

impl Worker {
    pub fn new(
        id: WorkerId,
        name: String,
        address: String,
        compensation: Compensation,
        schedule: ScheduleDescriptor,
    ) -> Self {
        Self {
            id,
            name,
            address,
            compensation,
            union: None,
            payment_method: PaymentMethod::default(),
            hire_date: None,
            last_paid: None,
            schedule,
            time_cards: Vec::new(),
            service_fees: Vec::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.compensation.category()
    }

    pub fn is_union_member(&self) -> bool {
        self.union.is_some()
    }

    pub fn union_id(&self) -> Option<&str> {
        self.union.as_ref().map(|u| u.union_id.as_str())
    }

    pub fn sales(&self) -> &[SaleEntry] {
        match &self.compensation {
            Compensation::Commissioned { sales, .. } => sales,
            _ => &[],
        }
    }

    /// Hire date used for due-date checks. Hourly workers without an explicit
    /// hire date start on their earliest time card.
    pub fn effective_hire_date(&self) -> Option<NaiveDate> {
        match (self.hire_date, self.category()) {
            (Some(date), _) => Some(date),
            (None, Category::Hourly) => self.time_cards.iter().map(|c| c.date).min(),
            (None, _) => None,
        }
    }
}

/// Raw hiring form; amounts and dates arrive as text and are validated on hire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HireWorkerInput {
    pub name: String,
    pub address: String,
    pub category: String,
    pub salary: String,
    pub commission: Option<String>,
    pub hire_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkerUpdate {
    Name(String),
    Address(String),
    Salary(String),
    Commission(String),
    Schedule(String),
    HireDate(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionMembershipInput {
    pub union_id: String,
    pub dues_rate: String,
}
