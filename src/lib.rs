pub mod config;
pub mod database;
pub mod error;
pub mod services;
pub mod system;

pub use config::Config;
pub use database::Registry;
pub use error::AppError;
pub use system::PayrollSystem;
