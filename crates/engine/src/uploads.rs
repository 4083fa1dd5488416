// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Upload task manager
//!
//! Every submitted file gets its own driver task that reads the file in
//! bounded slices and advances progress once per tick. All task state lives
//! behind one lock, and events are published while it is held, so a task
//! removed by `cancel` can never report progress afterwards.

use crate::progress::ProgressPolicy;
use folio_adapters::FileSource;
use folio_core::{
    Clock, CoreError, Event, EventBus, EventReceiver, FileHandle, IdGen, TaskId, UploadEvent,
    UploadTask,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use tokio::task::JoinHandle;

struct Entry {
    task: UploadTask,
    driver: Option<JoinHandle<()>>,
}

#[derive(Default)]
struct TaskTable {
    order: Vec<TaskId>,
    entries: HashMap<TaskId, Entry>,
}

impl TaskTable {
    fn remove(&mut self, id: &TaskId) -> Option<Entry> {
        let entry = self.entries.remove(id)?;
        self.order.retain(|t| t != id);
        Some(entry)
    }

    fn any_uploading(&self) -> bool {
        self.entries.values().any(|e| e.task.is_uploading())
    }
}

struct Shared<S, C, I> {
    source: S,
    clock: C,
    id_gen: I,
    policy: ProgressPolicy,
    bus: EventBus,
    table: Mutex<TaskTable>,
    /// Signalled whenever a task stops uploading
    settled: Notify,
}

impl<S: FileSource, C: Clock, I: IdGen> Shared<S, C, I> {
    fn lock(&self) -> std::sync::MutexGuard<'_, TaskTable> {
        self.table.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Apply an update to a live task.
    ///
    /// Returns `None` once the task is gone or no longer uploading, which
    /// tells the driver to stop.
    fn apply(&self, id: &TaskId, event: &UploadEvent) -> Option<UploadTask> {
        let mut table = self.lock();
        let entry = table.entries.get_mut(id)?;
        let (task, events) = match entry.task.transition(event, &self.clock) {
            Ok(next) => next,
            Err(e) => {
                tracing::debug!(task_id = %id, error = %e, "dropping update");
                return None;
            }
        };

        entry.task = task.clone();
        if !task.is_uploading() {
            entry.driver = None;
        }
        self.bus.publish_all(events);
        drop(table);

        if task.is_uploading() {
            tracing::trace!(task_id = %id, progress = task.progress, "progress");
            Some(task)
        } else {
            match &task.error {
                Some(reason) => tracing::warn!(task_id = %id, reason, "upload failed"),
                None => tracing::info!(task_id = %id, name = %task.file.name, "upload completed"),
            }
            self.settled.notify_waiters();
            None
        }
    }
}

/// Drive one task until it settles or is removed
async fn drive<S: FileSource, C: Clock, I: IdGen>(
    shared: Arc<Shared<S, C, I>>,
    id: TaskId,
    file: FileHandle,
) {
    let mut progress = 0u8;
    loop {
        tokio::time::sleep(shared.policy.tick()).await;

        let step = shared.policy.next_step();
        let to = progress.saturating_add(step.max(1)).min(100);
        let event = match shared.source.read(&file, progress, to).await {
            Ok(_) => UploadEvent::Advance { step },
            Err(e) => UploadEvent::Fail {
                reason: e.to_string(),
            },
        };

        match shared.apply(&id, &event) {
            Some(task) => progress = task.progress,
            None => return,
        }
    }
}

/// Manages concurrent upload tasks.
///
/// Must be used from within a Tokio runtime; `submit` spawns one driver per
/// file. Dropping the manager stops every driver.
pub struct UploadManager<S: FileSource, C: Clock, I: IdGen> {
    shared: Arc<Shared<S, C, I>>,
}

impl<S: FileSource, C: Clock, I: IdGen> UploadManager<S, C, I> {
    pub fn new(source: S, clock: C, id_gen: I, policy: ProgressPolicy, bus: EventBus) -> Self {
        Self {
            shared: Arc::new(Shared {
                source,
                clock,
                id_gen,
                policy,
                bus,
                table: Mutex::new(TaskTable::default()),
                settled: Notify::new(),
            }),
        }
    }

    /// Bus this manager publishes on
    pub fn bus(&self) -> &EventBus {
        &self.shared.bus
    }

    /// Receive upload updates (`upload:*` and `file:ready`) as they happen
    pub fn subscribe(&self) -> EventReceiver {
        let (_, rx) = self.shared.bus.listen(&["upload:*", "file:ready"]);
        rx
    }

    /// Start uploading `files`, one task each, in order.
    ///
    /// Returns the new tasks at 0%; progress arrives on the bus.
    pub fn submit(&self, files: impl IntoIterator<Item = FileHandle>) -> Vec<UploadTask> {
        let mut created = Vec::new();
        let mut table = self.shared.lock();

        for file in files {
            let id = TaskId::from(self.shared.id_gen.next());
            let task = UploadTask::new(id.clone(), file.clone(), &self.shared.clock);
            tracing::info!(task_id = %id, name = %file.name, size = file.size, "upload started");

            self.shared.bus.publish(Event::UploadStarted {
                task_id: id.clone(),
                name: file.name.clone(),
                size: file.size,
            });
            // The driver blocks on the table lock until the entry is in place
            let driver = tokio::spawn(drive(self.shared.clone(), id.clone(), file));
            table.order.push(id.clone());
            table.entries.insert(
                id,
                Entry {
                    task: task.clone(),
                    driver: Some(driver),
                },
            );
            created.push(task);
        }

        created
    }

    /// Stop an in-flight upload and forget it
    pub fn cancel(&self, id: &TaskId) -> Result<(), CoreError> {
        let mut table = self.shared.lock();
        let entry = table
            .entries
            .get(id)
            .ok_or_else(|| CoreError::task_not_found(id.0.clone()))?;
        entry.task.check_cancel()?;

        if let Some(driver) = table.remove(id).and_then(|e| e.driver) {
            driver.abort();
        }
        self.shared.bus.publish(Event::UploadCancelled {
            task_id: id.clone(),
        });
        drop(table);

        tracing::info!(task_id = %id, "upload cancelled");
        self.shared.settled.notify_waiters();
        Ok(())
    }

    /// Forget a completed or failed upload
    pub fn dismiss(&self, id: &TaskId) -> Result<(), CoreError> {
        let mut table = self.shared.lock();
        let entry = table
            .entries
            .get(id)
            .ok_or_else(|| CoreError::task_not_found(id.0.clone()))?;
        entry.task.check_dismiss()?;

        table.remove(id);
        self.shared.bus.publish(Event::UploadDismissed {
            task_id: id.clone(),
        });
        tracing::debug!(task_id = %id, "upload dismissed");
        Ok(())
    }

    pub fn get(&self, id: &TaskId) -> Result<UploadTask, CoreError> {
        self.shared
            .lock()
            .entries
            .get(id)
            .map(|e| e.task.clone())
            .ok_or_else(|| CoreError::task_not_found(id.0.clone()))
    }

    /// Every live task, in submission order
    pub fn snapshot(&self) -> Vec<UploadTask> {
        let table = self.shared.lock();
        table
            .order
            .iter()
            .filter_map(|id| table.entries.get(id))
            .map(|e| e.task.clone())
            .collect()
    }

    /// Stop every driver and clear the live set.
    ///
    /// In-flight uploads are reported as cancelled.
    pub fn reset(&self) {
        let mut guard = self.shared.lock();
        let table = std::mem::take(&mut *guard);
        for id in &table.order {
            let Some(entry) = table.entries.get(id) else {
                continue;
            };
            if let Some(driver) = &entry.driver {
                driver.abort();
            }
            if entry.task.is_uploading() {
                self.shared.bus.publish(Event::UploadCancelled {
                    task_id: id.clone(),
                });
            }
        }
        drop(guard);

        tracing::info!(cleared = table.order.len(), "upload manager reset");
        self.shared.settled.notify_waiters();
    }

    /// Wait until no task is uploading
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.shared.settled.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if !self.shared.lock().any_uploading() {
                return;
            }
            notified.await;
        }
    }
}

impl<S: FileSource, C: Clock, I: IdGen> Drop for UploadManager<S, C, I> {
    fn drop(&mut self) {
        let table = self.shared.lock();
        for entry in table.entries.values() {
            if let Some(driver) = &entry.driver {
                driver.abort();
            }
        }
    }
}

#[cfg(test)]
#[path = "uploads_tests.rs"]
mod tests;
