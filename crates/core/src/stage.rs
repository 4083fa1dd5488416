// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stage registry
//!
//! The editorial pipeline is a fixed, ordered sequence of stages. Every
//! document carries exactly one record per stage, in this order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One step of the editorial pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Upload,
    Contribution,
    Validation,
    Expert,
    Golden,
}

/// All stages in pipeline order
pub const STAGES: [Stage; 5] = [
    Stage::Upload,
    Stage::Contribution,
    Stage::Validation,
    Stage::Expert,
    Stage::Golden,
];

/// Ordered stages of the pipeline
pub fn stages() -> &'static [Stage] {
    &STAGES
}

impl Stage {
    /// Zero-based position in the pipeline
    pub fn index(self) -> usize {
        match self {
            Stage::Upload => 0,
            Stage::Contribution => 1,
            Stage::Validation => 2,
            Stage::Expert => 3,
            Stage::Golden => 4,
        }
    }

    /// The stage that follows this one, if any
    pub fn next(self) -> Option<Stage> {
        STAGES.get(self.index() + 1).copied()
    }

    /// Only the golden stage ends the pipeline
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Golden)
    }

    /// Machine name, as used in events and filters
    pub fn name(self) -> &'static str {
        match self {
            Stage::Upload => "upload",
            Stage::Contribution => "contribution",
            Stage::Validation => "validation",
            Stage::Expert => "expert",
            Stage::Golden => "golden",
        }
    }

    /// Short human label, used in aggregate status
    pub fn label(self) -> &'static str {
        match self {
            Stage::Upload => "Upload",
            Stage::Contribution => "Contribution",
            Stage::Validation => "Validation",
            Stage::Expert => "Expert Review",
            Stage::Golden => "Golden Document",
        }
    }

    /// Long title shown in a document's journey
    pub fn title(self) -> &'static str {
        match self {
            Stage::Expert => "Subject Matter Expert Review",
            other => other.label(),
        }
    }
}

/// Check if `stage` is the last stage of the pipeline
pub fn is_terminal(stage: Stage) -> bool {
    stage.is_terminal()
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stage {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STAGES
            .iter()
            .copied()
            .find(|stage| stage.name() == s)
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// Lifecycle state of one stage for one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageStatus {
    /// An earlier stage has not completed yet
    NotStarted,
    /// Open for assignment
    ToBeAssigned,
    /// Assigned and in progress
    Pending,
    /// Done; never changes again
    Completed,
}

impl StageStatus {
    pub fn name(self) -> &'static str {
        match self {
            StageStatus::NotStarted => "not-started",
            StageStatus::ToBeAssigned => "to-be-assigned",
            StageStatus::Pending => "pending",
            StageStatus::Completed => "completed",
        }
    }

    /// Whether the stage is waiting on someone (open or in progress)
    pub fn is_active(self) -> bool {
        matches!(self, StageStatus::ToBeAssigned | StageStatus::Pending)
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StageStatus {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not-started" => Ok(StageStatus::NotStarted),
            "to-be-assigned" => Ok(StageStatus::ToBeAssigned),
            "pending" => Ok(StageStatus::Pending),
            "completed" => Ok(StageStatus::Completed),
            other => Err(UnknownName(other.to_string())),
        }
    }
}

/// A stage or status name that is not part of the registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown name: {0}")]
pub struct UnknownName(pub String);

#[cfg(test)]
#[path = "stage_tests.rs"]
mod tests;
