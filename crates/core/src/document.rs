// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Document lifecycle state machine
//!
//! A document moves through every stage of the registry in order. Each
//! stage has its own record; only the current stage (the earliest one not
//! yet completed) accepts assignment or completion, and completing a stage
//! opens the next one for assignment.

use crate::error::CoreError;
use crate::event::Event;
use crate::stage::{Stage, StageStatus, STAGES};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Unique identifier for a document
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub String);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        DocumentId(s)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        DocumentId(s.to_string())
    }
}

/// Descriptive metadata supplied when a document enters the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub title: String,
    pub language: String,
    pub page_count: u32,
    pub contributors: BTreeSet<String>,
    /// Parent collection ("main document") this one belongs to
    pub collection: Option<String>,
    pub upload_date: Option<NaiveDate>,
}

impl DocumentMetadata {
    pub fn new(title: impl Into<String>, language: impl Into<String>, page_count: u32) -> Self {
        Self {
            title: title.into(),
            language: language.into(),
            page_count,
            contributors: BTreeSet::new(),
            collection: None,
            upload_date: None,
        }
    }

    pub fn with_contributors<I, S>(self, contributors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            contributors: contributors.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn with_collection(self, collection: impl Into<String>) -> Self {
        Self {
            collection: Some(collection.into()),
            ..self
        }
    }

    pub fn uploaded_on(self, date: NaiveDate) -> Self {
        Self {
            upload_date: Some(date),
            ..self
        }
    }

    /// Check the required fields are present
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::InvalidMetadata("title is required".into()));
        }
        if self.language.trim().is_empty() {
            return Err(CoreError::InvalidMetadata("language is required".into()));
        }
        if self.page_count == 0 {
            return Err(CoreError::InvalidMetadata(
                "page count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Per-stage state of one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRecord {
    pub stage: Stage,
    pub status: StageStatus,
    pub completed_on: Option<NaiveDate>,
    pub assignee: Option<String>,
}

impl StageRecord {
    fn new(stage: Stage) -> Self {
        let status = if stage.index() == 0 {
            StageStatus::ToBeAssigned
        } else {
            StageStatus::NotStarted
        };
        Self {
            stage,
            status,
            completed_on: None,
            assignee: None,
        }
    }
}

/// Requests that move a stage forward
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageEvent {
    /// Hand the stage to someone: to-be-assigned → pending
    Assign { stage: Stage, assignee: String },
    /// Finish the stage: pending → completed, opening the next stage
    Complete { stage: Stage, on: NaiveDate },
}

impl StageEvent {
    pub fn stage(&self) -> Stage {
        match self {
            StageEvent::Assign { stage, .. } | StageEvent::Complete { stage, .. } => *stage,
        }
    }

    fn action(&self) -> &'static str {
        match self {
            StageEvent::Assign { .. } => "assign",
            StageEvent::Complete { .. } => "complete",
        }
    }

    fn required_status(&self) -> StageStatus {
        match self {
            StageEvent::Assign { .. } => StageStatus::ToBeAssigned,
            StageEvent::Complete { .. } => StageStatus::Pending,
        }
    }
}

/// Human-facing status derived from the current stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregateStatus {
    /// The current stage is open or in progress
    Awaiting { stage: Stage, status: StageStatus },
    /// Every stage is completed
    Certified,
}

impl fmt::Display for AggregateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateStatus::Awaiting { stage, .. } => write!(f, "{} Pending", stage.label()),
            AggregateStatus::Certified => f.write_str("Golden Document Created"),
        }
    }
}

/// A document and its journey through the pipeline.
///
/// Serialize-only: the only way to build one is `new` followed by
/// `transition`, which keeps the stage records monotonic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub id: DocumentId,
    pub metadata: DocumentMetadata,
    records: [StageRecord; 5],
}

impl Document {
    /// Create a document at the start of the pipeline
    pub fn new(id: impl Into<DocumentId>, metadata: DocumentMetadata) -> Result<Self, CoreError> {
        metadata.validate()?;
        Ok(Self {
            id: id.into(),
            metadata,
            records: STAGES.map(StageRecord::new),
        })
    }

    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    /// Record for a single stage
    pub fn record(&self, stage: Stage) -> &StageRecord {
        &self.records[stage.index()]
    }

    /// Every stage record, in pipeline order
    pub fn journey(&self) -> &[StageRecord] {
        &self.records
    }

    /// The earliest non-completed stage and its status.
    ///
    /// When every stage is completed this is the terminal stage.
    pub fn current(&self) -> (Stage, StageStatus) {
        self.records
            .iter()
            .find(|r| r.status != StageStatus::Completed)
            .map(|r| (r.stage, r.status))
            .unwrap_or((Stage::Golden, StageStatus::Completed))
    }

    pub fn current_stage(&self) -> Stage {
        self.current().0
    }

    /// All stages completed
    pub fn is_certified(&self) -> bool {
        self.records
            .iter()
            .all(|r| r.status == StageStatus::Completed)
    }

    pub fn aggregate_status(&self) -> AggregateStatus {
        if self.is_certified() {
            return AggregateStatus::Certified;
        }
        let (stage, status) = self.current();
        AggregateStatus::Awaiting { stage, status }
    }

    /// Case-insensitive match against title or language.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.metadata.title.to_lowercase().contains(needle)
            || self.metadata.language.to_lowercase().contains(needle)
    }

    /// Pure transition function - returns the new document and its events.
    ///
    /// The document is left untouched on error.
    pub fn transition(&self, event: &StageEvent) -> Result<(Document, Vec<Event>), CoreError> {
        let stage = event.stage();
        let (current, status) = self.current();

        if stage != current {
            return Err(CoreError::NotCurrentStage {
                id: self.id.0.clone(),
                stage,
                current,
                action: event.action(),
            });
        }
        if status != event.required_status() {
            return Err(CoreError::InvalidTransition {
                id: self.id.0.clone(),
                stage,
                status,
                action: event.action(),
            });
        }

        let mut doc = self.clone();
        let mut events = Vec::new();

        match event {
            StageEvent::Assign { assignee, .. } => {
                let record = &mut doc.records[stage.index()];
                record.status = StageStatus::Pending;
                record.assignee = Some(assignee.clone());
                events.push(Event::StageAssigned {
                    id: self.id.clone(),
                    stage,
                    assignee: assignee.clone(),
                });
            }
            StageEvent::Complete { on, .. } => {
                let record = &mut doc.records[stage.index()];
                record.status = StageStatus::Completed;
                record.completed_on = Some(*on);
                events.push(Event::StageCompleted {
                    id: self.id.clone(),
                    stage,
                    on: *on,
                });

                match stage.next() {
                    Some(next) => {
                        doc.records[next.index()].status = StageStatus::ToBeAssigned;
                        events.push(Event::StageOpened {
                            id: self.id.clone(),
                            stage: next,
                        });
                    }
                    None => events.push(Event::DocumentCertified {
                        id: self.id.clone(),
                    }),
                }
            }
        }

        Ok((doc, events))
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
