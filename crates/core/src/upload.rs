// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Upload task state machine
//!
//! An upload task tracks one file being ingested. Progress only moves
//! forward, clamps at 100, and the task settles exactly once, either
//! completed or in error.

use crate::clock::Clock;
use crate::error::CoreError;
use crate::event::Event;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

/// Unique identifier for an upload task
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub String);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        TaskId(s)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId(s.to_string())
    }
}

/// The file behind an upload task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    pub name: String,
    pub size: u64,
    pub media_type: String,
    /// Where the bytes live, when they come from the local filesystem
    pub path: Option<PathBuf>,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, size: u64, media_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            media_type: media_type.into(),
            path: None,
        }
    }

    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..self
        }
    }

    /// Images get a preview thumbnail
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }

    pub fn display_size(&self) -> String {
        format_size(self.size)
    }
}

/// Render a byte count as "0 Bytes", "1.5 KB", "10 MB", ...
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rendered = format!("{:.2}", value);
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

/// Lifecycle of an upload task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Uploading,
    Completed,
    Error,
}

impl UploadStatus {
    pub fn name(self) -> &'static str {
        match self {
            UploadStatus::Uploading => "uploading",
            UploadStatus::Completed => "completed",
            UploadStatus::Error => "error",
        }
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Events that can change upload task state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    /// Progress moved forward by `step` percentage points (at least one)
    Advance { step: u8 },
    /// Reading the file failed
    Fail { reason: String },
}

/// One file being ingested
#[derive(Debug, Clone)]
pub struct UploadTask {
    pub id: TaskId,
    pub file: FileHandle,
    /// Percent complete, 0..=100
    pub progress: u8,
    pub status: UploadStatus,
    pub error: Option<String>,
    pub created_at: Instant,
    pub finished_at: Option<Instant>,
}

impl UploadTask {
    /// Create a new task at 0% in the uploading state
    pub fn new(id: impl Into<TaskId>, file: FileHandle, clock: &impl Clock) -> Self {
        Self {
            id: id.into(),
            file,
            progress: 0,
            status: UploadStatus::Uploading,
            error: None,
            created_at: clock.now(),
            finished_at: None,
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.status == UploadStatus::Uploading
    }

    pub fn is_completed(&self) -> bool {
        self.status == UploadStatus::Completed
    }

    pub fn is_error(&self) -> bool {
        self.status == UploadStatus::Error
    }

    /// Cancellation only applies to in-flight uploads
    pub fn check_cancel(&self) -> Result<(), CoreError> {
        if self.is_uploading() {
            Ok(())
        } else {
            Err(self.invalid_state("cancel"))
        }
    }

    /// Dismissal only applies to settled uploads
    pub fn check_dismiss(&self) -> Result<(), CoreError> {
        if self.is_uploading() {
            Err(self.invalid_state("dismiss"))
        } else {
            Ok(())
        }
    }

    fn invalid_state(&self, action: &'static str) -> CoreError {
        CoreError::InvalidState {
            id: self.id.0.clone(),
            status: self.status.name(),
            action,
        }
    }

    fn progress_event(&self) -> Event {
        Event::UploadProgress {
            task_id: self.id.clone(),
            progress: self.progress,
            status: self.status,
        }
    }

    /// Pure transition function - returns new state and events
    pub fn transition(
        &self,
        event: &UploadEvent,
        clock: &impl Clock,
    ) -> Result<(UploadTask, Vec<Event>), CoreError> {
        if !self.is_uploading() {
            return Err(self.invalid_state("update"));
        }

        match event {
            UploadEvent::Advance { step } => {
                let progress = self.progress.saturating_add((*step).max(1)).min(100);
                if progress < 100 {
                    let task = UploadTask {
                        progress,
                        ..self.clone()
                    };
                    let events = vec![task.progress_event()];
                    return Ok((task, events));
                }

                let task = UploadTask {
                    progress: 100,
                    status: UploadStatus::Completed,
                    finished_at: Some(clock.now()),
                    ..self.clone()
                };
                let events = vec![
                    task.progress_event(),
                    Event::FileReady {
                        task_id: self.id.clone(),
                        name: self.file.name.clone(),
                        size: self.file.size,
                        media_type: self.file.media_type.clone(),
                    },
                ];
                Ok((task, events))
            }

            UploadEvent::Fail { reason } => {
                let task = UploadTask {
                    status: UploadStatus::Error,
                    error: Some(reason.clone()),
                    finished_at: Some(clock.now()),
                    ..self.clone()
                };
                let events = vec![
                    task.progress_event(),
                    Event::UploadFailed {
                        task_id: self.id.clone(),
                        reason: reason.clone(),
                    },
                ];
                Ok((task, events))
            }
        }
    }
}

#[cfg(test)]
#[path = "upload_tests.rs"]
mod tests;
