use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::database::models::{Worker, WorkerId};
use crate::error::AppError;

/// In-memory worker records keyed by id, iterated in id order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerRepository {
    workers: BTreeMap<WorkerId, Worker>,
}

impl WorkerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_all(&self) -> impl Iterator<Item = &Worker> {
        self.workers.values()
    }

    pub fn get_by_id(&self, id: WorkerId) -> Option<&Worker> {
        self.workers.get(&id)
    }

    pub fn get_by_id_mut(&mut self, id: WorkerId) -> Option<&mut Worker> {
        self.workers.get_mut(&id)
    }

    /// Like `get_by_id` but missing workers are an error.
    pub fn find(&self, id: WorkerId) -> Result<&Worker, AppError> {
        self.get_by_id(id)
            .ok_or_else(|| AppError::not_found(format!("Worker {} does not exist", id)))
    }

    pub fn find_mut(&mut self, id: WorkerId) -> Result<&mut Worker, AppError> {
        self.get_by_id_mut(id)
            .ok_or_else(|| AppError::not_found(format!("Worker {} does not exist", id)))
    }

    pub fn next_id(&self) -> WorkerId {
        self.workers
            .keys()
            .next_back()
            .map_or(WorkerId(1), |last| WorkerId(last.0 + 1))
    }

    /// Store a new worker under the next free id and return that id.
    pub fn add(&mut self, mut worker: Worker) -> WorkerId {
        let id = self.next_id();
        worker.id = id;
        self.workers.insert(id, worker);
        id
    }

    pub fn remove(&mut self, id: WorkerId) -> Option<Worker> {
        self.workers.remove(&id)
    }

    pub fn find_by_union_id(&self, union_id: &str) -> Option<&Worker> {
        self.workers
            .values()
            .find(|w| w.union_id() == Some(union_id))
    }

    pub fn find_by_union_id_mut(&mut self, union_id: &str) -> Option<&mut Worker> {
        self.workers
            .values_mut()
            .find(|w| w.union_id() == Some(union_id))
    }

    /// The `index`-th (1-based) worker named exactly `name`, in id order.
    pub fn find_by_name(&self, name: &str, index: usize) -> Option<&Worker> {
        if index == 0 {
            return None;
        }
        self.workers
            .values()
            .filter(|w| w.name == name)
            .nth(index - 1)
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    pub fn clear(&mut self) {
        self.workers.clear();
    }
}
