use std::fmt::Display;

use super::Registry;
use super::snapshot::{Snapshot, SnapshotStore};
use crate::error::AppError;

/// Runs every mutation of the registry as an all-or-nothing command and keeps
/// the snapshots needed for undo and redo.
#[derive(Debug)]
pub struct CommandExecutor {
    registry: Registry,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    open: bool,
}

impl CommandExecutor {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            open: true,
        }
    }

    /// Read-only view of the live state. Queries go through here and never
    /// need rollback.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn into_registry(self) -> Registry {
        self.registry
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Stop accepting commands; undo and redo are refused as well.
    pub fn close(&mut self) {
        log::info!("Command executor closed");
        self.open = false;
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    fn ensure_open(&self) -> Result<(), AppError> {
        if !self.open {
            return Err(AppError::SystemClosed);
        }
        Ok(())
    }

    /// Run `operation` against the live registry.
    ///
    /// On success the pre-operation snapshot becomes the newest undo entry and
    /// the redo history is discarded. On failure the registry is restored from
    /// that snapshot, the histories are untouched and the operation's error is
    /// returned as is.
    pub fn execute<T, E, F>(&mut self, operation: F) -> Result<T, E>
    where
        F: FnOnce(&mut Registry) -> Result<T, E>,
        E: From<AppError> + Display,
    {
        self.ensure_open()?;
        let before = SnapshotStore::capture(&self.registry);

        match operation(&mut self.registry) {
            Ok(value) => {
                self.undo_stack.push(before);
                self.redo_stack.clear();
                log::debug!("Command committed (undo depth {})", self.undo_stack.len());
                Ok(value)
            }
            Err(err) => {
                log::warn!("Command failed with error: {}, rolling back", err);
                SnapshotStore::restore(&mut self.registry, &before);
                Err(err)
            }
        }
    }

    pub fn undo(&mut self) -> Result<(), AppError> {
        self.ensure_open()?;
        let previous = self.undo_stack.pop().ok_or(AppError::NothingToUndo)?;

        self.redo_stack.push(SnapshotStore::capture(&self.registry));
        SnapshotStore::restore(&mut self.registry, &previous);
        log::info!("Undo applied (undo depth {})", self.undo_stack.len());
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), AppError> {
        self.ensure_open()?;
        let next = self.redo_stack.pop().ok_or(AppError::NothingToRedo)?;

        self.undo_stack.push(SnapshotStore::capture(&self.registry));
        SnapshotStore::restore(&mut self.registry, &next);
        log::info!("Redo applied (redo depth {})", self.redo_stack.len());
        Ok(())
    }
}
