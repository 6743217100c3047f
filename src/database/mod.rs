use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::AppError;

pub mod models;
pub mod repositories;
pub mod snapshot;
pub mod store;
pub mod transaction;
pub mod utils;

use repositories::{ScheduleRepository, WorkerRepository};

/// The whole mutable payroll state: every worker plus the available schedules.
///
/// All contained data is owned, so `Clone` is a full deep copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    pub workers: WorkerRepository,
    #[serde(default)]
    pub schedules: ScheduleRepository,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every worker and custom schedule.
    pub fn clear(&mut self) {
        self.workers.clear();
        self.schedules.reset();
    }
}

/// Load the registry persisted at `data_file`, starting empty when the file is missing.
pub fn init_registry(data_file: impl AsRef<Path>) -> Result<Registry, AppError> {
    let path = data_file.as_ref();
    if !path.exists() {
        log::info!("No data file at {}, starting with an empty registry", path.display());
        return Ok(Registry::new());
    }

    let registry = store::load_registry(path)?;
    log::info!(
        "Loaded {} workers from {}",
        registry.workers.len(),
        path.display()
    );
    Ok(registry)
}
