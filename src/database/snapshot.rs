use super::Registry;

/// An immutable deep copy of the registry taken at one instant.
///
/// The registry owns all of its data, so cloning it shares nothing with the
/// live state. A snapshot can be restored any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    state: Registry,
}

pub struct SnapshotStore;

impl SnapshotStore {
    pub fn capture(registry: &Registry) -> Snapshot {
        Snapshot {
            state: registry.clone(),
        }
    }

    /// Replace the live registry with a fresh copy of `snapshot`.
    pub fn restore(registry: &mut Registry, snapshot: &Snapshot) {
        *registry = snapshot.state.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{Compensation, ScheduleDescriptor, TimeCard, Worker, WorkerId};
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;

    fn registry_with_worker() -> (Registry, WorkerId) {
        let mut registry = Registry::new();
        let id = registry.workers.add(Worker::new(
            WorkerId(0),
            "Ana".to_string(),
            "Street 1".to_string(),
            Compensation::Hourly {
                hourly_rate: BigDecimal::from(10),
            },
            ScheduleDescriptor::parse("weekly 5").unwrap(),
        ));
        (registry, id)
    }

    #[test]
    fn test_capture_is_independent_of_live_state() {
        let (mut registry, id) = registry_with_worker();
        let snapshot = SnapshotStore::capture(&registry);

        registry
            .workers
            .get_by_id_mut(id)
            .unwrap()
            .time_cards
            .push(TimeCard {
                date: NaiveDate::from_ymd_opt(2005, 1, 3).unwrap(),
                hours: BigDecimal::from(8),
            });

        SnapshotStore::restore(&mut registry, &snapshot);
        assert!(registry.workers.get_by_id(id).unwrap().time_cards.is_empty());
    }

    #[test]
    fn test_restore_leaves_snapshot_reusable() {
        let (mut registry, id) = registry_with_worker();
        let snapshot = SnapshotStore::capture(&registry);

        SnapshotStore::restore(&mut registry, &snapshot);
        registry.workers.remove(id);
        SnapshotStore::restore(&mut registry, &snapshot);

        assert!(registry.workers.get_by_id(id).is_some());
    }
}
