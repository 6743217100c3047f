use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::WorkerId;

/// Inclusive date range covered by one payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PaymentPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Calendar days in the period, zero when start is after end.
    pub fn days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum PaymentBreakdown {
    Hourly {
        normal_hours: BigDecimal,
        overtime_hours: BigDecimal,
    },
    Salaried,
    Commissioned {
        fixed: BigDecimal,
        sales: BigDecimal,
        commission: BigDecimal,
    },
}

/// Result of one payroll computation. Recomputed on every run, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub worker_id: WorkerId,
    pub period: PaymentPeriod,
    pub gross: BigDecimal,
    pub deductions: BigDecimal,
    pub net: BigDecimal,
    pub breakdown: PaymentBreakdown,
}
