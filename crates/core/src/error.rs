// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy shared by the pipeline and the upload manager

use crate::stage::{Stage, StageStatus};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by pipeline and upload operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("cannot {action} {stage} on {id}: stage is {status}")]
    InvalidTransition {
        id: String,
        stage: Stage,
        status: StageStatus,
        action: &'static str,
    },
    #[error("cannot {action} {stage} on {id}: current stage is {current}")]
    NotCurrentStage {
        id: String,
        stage: Stage,
        current: Stage,
        action: &'static str,
    },
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),
    #[error("cannot {action} task {id} while {status}")]
    InvalidState {
        id: String,
        status: &'static str,
        action: &'static str,
    },
}

/// Copyable tag for a [`CoreError`], used where errors are aggregated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    InvalidTransition,
    InvalidMetadata,
    InvalidState,
}

impl CoreError {
    pub fn document_not_found(id: impl Into<String>) -> Self {
        CoreError::NotFound {
            kind: "document",
            id: id.into(),
        }
    }

    pub fn task_not_found(id: impl Into<String>) -> Self {
        CoreError::NotFound {
            kind: "task",
            id: id.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::NotFound { .. } => ErrorKind::NotFound,
            CoreError::InvalidTransition { .. } | CoreError::NotCurrentStage { .. } => {
                ErrorKind::InvalidTransition
            }
            CoreError::InvalidMetadata(_) => ErrorKind::InvalidMetadata,
            CoreError::InvalidState { .. } => ErrorKind::InvalidState,
        }
    }

    /// True when the action was valid once but the target has since moved on.
    ///
    /// Callers should present these as "this action is no longer available"
    /// rather than as a failure.
    pub fn is_stale(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidTransition | ErrorKind::InvalidState
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::NotFound => "not found",
            ErrorKind::InvalidTransition => "invalid transition",
            ErrorKind::InvalidMetadata => "invalid metadata",
            ErrorKind::InvalidState => "invalid state",
        };
        f.write_str(name)
    }
}
