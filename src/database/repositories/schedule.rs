use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::database::models::ScheduleDescriptor;
use crate::error::AppError;

/// Payment schedules workers may be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleRepository {
    schedules: BTreeSet<ScheduleDescriptor>,
}

impl Default for ScheduleRepository {
    fn default() -> Self {
        Self {
            schedules: ScheduleDescriptor::defaults().into_iter().collect(),
        }
    }
}

impl ScheduleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, text: &str) -> Result<ScheduleDescriptor, AppError> {
        let descriptor = ScheduleDescriptor::parse(text)?;
        if !self.schedules.insert(descriptor.clone()) {
            return Err(AppError::conflict(format!(
                "Payment schedule '{}' already exists",
                text
            )));
        }
        Ok(descriptor)
    }

    pub fn is_available(&self, text: &str) -> bool {
        self.schedules.iter().any(|s| s.text() == text)
    }

    /// Resolve `text` to an available schedule.
    pub fn get(&self, text: &str) -> Result<ScheduleDescriptor, AppError> {
        self.schedules
            .iter()
            .find(|s| s.text() == text)
            .cloned()
            .ok_or_else(|| AppError::bad_request(format!("Payment schedule '{}' is not available", text)))
    }

    /// Back to the default schedules only.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_available() {
        let repo = ScheduleRepository::new();
        assert!(repo.is_available("weekly 5"));
        assert!(repo.is_available("monthly $"));
        assert!(repo.is_available("weekly 2 5"));
        assert!(!repo.is_available("monthly 10"));
    }

    #[test]
    fn test_create_rejects_duplicates_and_resets() {
        let mut repo = ScheduleRepository::new();
        repo.create("monthly 10").unwrap();
        assert!(matches!(repo.create("monthly 10"), Err(AppError::Conflict(_))));
        assert!(matches!(repo.create("monthly 31"), Err(AppError::BadRequest(_))));

        repo.reset();
        assert!(!repo.is_available("monthly 10"));
    }
}
