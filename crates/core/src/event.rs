// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events emitted by the pipeline and upload state machines

use crate::document::DocumentId;
use crate::stage::Stage;
use crate::upload::{TaskId, UploadStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Events published to subscribers as state changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    // Document events
    DocumentIngested {
        id: DocumentId,
        title: String,
    },
    StageAssigned {
        id: DocumentId,
        stage: Stage,
        assignee: String,
    },
    /// A stage became open for assignment after its predecessor completed
    StageOpened {
        id: DocumentId,
        stage: Stage,
    },
    StageCompleted {
        id: DocumentId,
        stage: Stage,
        on: NaiveDate,
    },
    DocumentCertified {
        id: DocumentId,
    },

    // Upload events
    UploadStarted {
        task_id: TaskId,
        name: String,
        size: u64,
    },
    UploadProgress {
        task_id: TaskId,
        progress: u8,
        status: UploadStatus,
    },
    UploadFailed {
        task_id: TaskId,
        reason: String,
    },
    UploadCancelled {
        task_id: TaskId,
    },
    UploadDismissed {
        task_id: TaskId,
    },
    /// Bytes are fully read; persisting them is up to the storage collaborator
    FileReady {
        task_id: TaskId,
        name: String,
        size: u64,
        media_type: String,
    },
}

impl Event {
    /// Colon-separated name used for subscription patterns
    pub fn name(&self) -> &'static str {
        match self {
            Event::DocumentIngested { .. } => "document:ingested",
            Event::StageAssigned { .. } => "stage:assigned",
            Event::StageOpened { .. } => "stage:opened",
            Event::StageCompleted { .. } => "stage:completed",
            Event::DocumentCertified { .. } => "document:certified",

            Event::UploadStarted { .. } => "upload:started",
            Event::UploadProgress { .. } => "upload:progress",
            Event::UploadFailed { .. } => "upload:failed",
            Event::UploadCancelled { .. } => "upload:cancelled",
            Event::UploadDismissed { .. } => "upload:dismissed",
            Event::FileReady { .. } => "file:ready",
        }
    }

    /// The upload task this event concerns, if any
    pub fn task_id(&self) -> Option<&TaskId> {
        match self {
            Event::UploadStarted { task_id, .. }
            | Event::UploadProgress { task_id, .. }
            | Event::UploadFailed { task_id, .. }
            | Event::UploadCancelled { task_id }
            | Event::UploadDismissed { task_id }
            | Event::FileReady { task_id, .. } => Some(task_id),
            _ => None,
        }
    }

    /// The document this event concerns, if any
    pub fn document_id(&self) -> Option<&DocumentId> {
        match self {
            Event::DocumentIngested { id, .. }
            | Event::StageAssigned { id, .. }
            | Event::StageOpened { id, .. }
            | Event::StageCompleted { id, .. }
            | Event::DocumentCertified { id } => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
