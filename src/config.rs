use anyhow::Result;
use chrono::NaiveDate;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_file: String,
    pub report_dir: String,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_env_only()
    }

    /// Load configuration from environment variables only (without loading .env files)
    /// This is useful for testing where you want to control the environment directly
    pub fn from_env_only() -> Result<Self> {
        Ok(Config {
            data_file: env::var("PAYROLL_DATA_FILE").unwrap_or_else(|_| "payroll.json".to_string()),
            report_dir: env::var("PAYROLL_REPORT_DIR").unwrap_or_else(|_| "reports".to_string()),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Default location of the report written by a payroll run on `date`.
    pub fn report_path(&self, date: NaiveDate) -> PathBuf {
        PathBuf::from(&self.report_dir).join(format!("payroll-{}.txt", date.format("%Y-%m-%d")))
    }
}
