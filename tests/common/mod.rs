use anyhow::Result;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tempfile::TempDir;

use payroll::PayrollSystem;
use payroll::config::Config;
use payroll::database::models::*;

// Test system wrapper with a scratch directory for data and reports
#[allow(dead_code)]
pub struct TestContext {
    pub system: PayrollSystem,
    pub config: Config,
    pub temp_dir: TempDir,
}

impl TestContext {
    #[allow(dead_code)]
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;

        let config = Config {
            data_file: temp_dir.path().join("payroll.json").display().to_string(),
            report_dir: temp_dir.path().join("reports").display().to_string(),
            environment: "test".to_string(),
        };

        Ok(TestContext {
            system: PayrollSystem::default(),
            config,
            temp_dir,
        })
    }

    #[allow(dead_code)]
    pub fn data_file(&self) -> PathBuf {
        PathBuf::from(&self.config.data_file)
    }
}

// Mock data generators
#[allow(dead_code)]
pub struct MockData;

#[allow(dead_code)]
impl MockData {
    pub fn hourly(name: &str, rate: &str) -> HireWorkerInput {
        HireWorkerInput {
            name: name.to_string(),
            address: "Rua das Flores 12".to_string(),
            category: "hourly".to_string(),
            salary: rate.to_string(),
            commission: None,
            hire_date: None,
        }
    }

    pub fn salaried(name: &str, salary: &str) -> HireWorkerInput {
        HireWorkerInput {
            name: name.to_string(),
            address: "Avenida Central 300".to_string(),
            category: "salaried".to_string(),
            salary: salary.to_string(),
            commission: None,
            hire_date: Some("1/1/2005".to_string()),
        }
    }

    pub fn commissioned(name: &str, salary: &str, commission: &str) -> HireWorkerInput {
        HireWorkerInput {
            name: name.to_string(),
            address: "Travessa Sete 7".to_string(),
            category: "commissioned".to_string(),
            salary: salary.to_string(),
            commission: Some(commission.to_string()),
            hire_date: Some("1/1/2005".to_string()),
        }
    }

    pub fn union(union_id: &str, dues_rate: &str) -> UnionMembershipInput {
        UnionMembershipInput {
            union_id: union_id.to_string(),
            dues_rate: dues_rate.to_string(),
        }
    }
}

#[allow(dead_code)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

#[allow(dead_code)]
pub fn dec(text: &str) -> BigDecimal {
    BigDecimal::from_str(text).expect("valid test decimal")
}

#[allow(dead_code)]
pub fn setup_test_env() {
    unsafe {
        env::set_var("RUST_LOG", "debug");
    }
    let _ = env_logger::builder().is_test(true).try_init();
}
