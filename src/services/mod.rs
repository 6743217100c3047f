pub mod calculator;
pub mod payroll;
pub mod report;
pub mod roster;
pub mod schedule;

pub use payroll::{CategoryTotals, PayrollEntry, PayrollReport};
