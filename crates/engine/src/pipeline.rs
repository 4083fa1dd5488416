// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Document lifecycle pipeline
//!
//! Owns the document collection. Mutations are serialized and publish
//! their events on the shared [`EventBus`]; reads work against an immutable
//! snapshot and never wait for a mutation in progress.

use chrono::NaiveDate;
use folio_core::{
    Clock, CoreError, Document, DocumentId, DocumentMetadata, ErrorKind, Event, EventBus, IdGen,
    Stage, StageEvent, StageRecord, StageStatus, STAGES,
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, RwLock};

/// Filter for [`Pipeline::query`]. Supplied criteria are AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    /// Case-insensitive substring of the title or language
    pub text: Option<String>,
    /// The document's current stage
    pub stage: Option<Stage>,
    /// The status of the document's current stage
    pub status: Option<StageStatus>,
}

impl DocumentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..self
        }
    }

    pub fn stage(self, stage: Stage) -> Self {
        Self {
            stage: Some(stage),
            ..self
        }
    }

    pub fn status(self, status: StageStatus) -> Self {
        Self {
            status: Some(status),
            ..self
        }
    }

    fn matches(&self, doc: &Document, needle: Option<&str>) -> bool {
        let (stage, status) = doc.current();
        self.stage.is_none_or(|s| s == stage)
            && self.status.is_none_or(|s| s == status)
            && needle.is_none_or(|n| doc.matches_text(n))
    }
}

/// Outcome of [`Pipeline::bulk_assign`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkResult {
    pub succeeded: BTreeSet<DocumentId>,
    pub failed: BTreeMap<DocumentId, ErrorKind>,
}

impl BulkResult {
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Per-stage dashboard counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageCounts {
    /// Documents whose current stage is this one, waiting for an assignee
    pub awaiting: usize,
    /// Documents whose current stage is this one, assigned and in progress
    pub in_progress: usize,
    /// Documents that have completed this stage
    pub completed: usize,
}

/// Dashboard counters across the whole collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub total: usize,
    pub certified: usize,
    pub stages: BTreeMap<Stage, StageCounts>,
}

impl PipelineStats {
    pub fn for_stage(&self, stage: Stage) -> StageCounts {
        self.stages.get(&stage).copied().unwrap_or_default()
    }
}

/// Immutable view of the collection, in ingestion order
#[derive(Clone, Default)]
struct Snapshot {
    documents: Vec<Arc<Document>>,
    index: HashMap<DocumentId, usize>,
}

impl Snapshot {
    fn get(&self, id: &DocumentId) -> Option<&Arc<Document>> {
        self.index.get(id).map(|&i| &self.documents[i])
    }

    fn require(&self, id: &DocumentId) -> Result<&Arc<Document>, CoreError> {
        self.get(id)
            .ok_or_else(|| CoreError::document_not_found(id.0.clone()))
    }

    fn push(&mut self, doc: Document) {
        self.index.insert(doc.id.clone(), self.documents.len());
        self.documents.push(Arc::new(doc));
    }

    fn replace(&mut self, doc: Document) {
        if let Some(&i) = self.index.get(&doc.id) {
            self.documents[i] = Arc::new(doc);
        }
    }

    /// Apply a stage event to one document
    fn apply(&mut self, id: &DocumentId, event: &StageEvent) -> Result<Vec<Event>, CoreError> {
        let (doc, events) = self.require(id)?.transition(event)?;
        self.replace(doc);
        Ok(events)
    }
}

/// The document lifecycle pipeline
pub struct Pipeline<C: Clock, I: IdGen> {
    state: RwLock<Arc<Snapshot>>,
    /// Serializes mutations; readers only contend on the snapshot swap
    writer: Mutex<()>,
    clock: C,
    id_gen: I,
    bus: EventBus,
}

impl<C: Clock, I: IdGen> Pipeline<C, I> {
    pub fn new(clock: C, id_gen: I, bus: EventBus) -> Self {
        Self {
            state: RwLock::new(Arc::new(Snapshot::default())),
            writer: Mutex::new(()),
            clock,
            id_gen,
            bus,
        }
    }

    /// Bus this pipeline publishes on
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    fn snapshot(&self) -> Arc<Snapshot> {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Run `f` against a private copy of the state and install the result.
    ///
    /// Events are published before the writer lock is released so subscribers
    /// see them in mutation order.
    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut Snapshot) -> Result<(T, Vec<Event>), CoreError>,
    ) -> Result<T, CoreError> {
        let _writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        let mut next = Snapshot::clone(&self.snapshot());
        let (value, events) = f(&mut next)?;
        *self.state.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(next);
        self.bus.publish_all(events);
        Ok(value)
    }

    /// Add a document at the start of the pipeline.
    ///
    /// Documents without an upload date are stamped with today's date.
    pub fn ingest(&self, metadata: DocumentMetadata) -> Result<Document, CoreError> {
        let metadata = match metadata.upload_date {
            Some(_) => metadata,
            None => metadata.uploaded_on(self.clock.today()),
        };
        let doc = Document::new(self.id_gen.next(), metadata).inspect_err(|e| {
            tracing::debug!(error = %e, "rejected ingest");
        })?;

        self.mutate(|snapshot| {
            snapshot.push(doc.clone());
            let event = Event::DocumentIngested {
                id: doc.id.clone(),
                title: doc.title().to_string(),
            };
            Ok((doc, vec![event]))
        })
        .inspect(|doc| {
            tracing::info!(document_id = %doc.id, title = doc.title(), "ingested document");
        })
    }

    /// Look up one document
    pub fn get(&self, id: &DocumentId) -> Result<Document, CoreError> {
        self.snapshot().require(id).map(|doc| Document::clone(doc))
    }

    /// The document's current stage and its status
    pub fn current_stage(&self, id: &DocumentId) -> Result<(Stage, StageStatus), CoreError> {
        self.snapshot().require(id).map(|doc| doc.current())
    }

    /// Hand the current stage to `assignee`
    pub fn assign(
        &self,
        id: &DocumentId,
        stage: Stage,
        assignee: impl Into<String>,
    ) -> Result<(), CoreError> {
        let event = StageEvent::Assign {
            stage,
            assignee: assignee.into(),
        };
        self.apply(id, &event)
    }

    /// Finish the current stage, opening the next one
    pub fn complete(&self, id: &DocumentId, stage: Stage, on: NaiveDate) -> Result<(), CoreError> {
        self.apply(id, &StageEvent::Complete { stage, on })
    }

    fn apply(&self, id: &DocumentId, event: &StageEvent) -> Result<(), CoreError> {
        let result = self.mutate(|snapshot| Ok(((), snapshot.apply(id, event)?)));
        match &result {
            Ok(()) => tracing::info!(
                document_id = %id,
                stage = %event.stage(),
                ?event,
                "stage transition"
            ),
            Err(e) => tracing::debug!(document_id = %id, error = %e, "rejected transition"),
        }
        result
    }

    /// Assign each document's current stage to `assignee`.
    ///
    /// Every id is attempted independently; failures are collected rather
    /// than rolling back the ids that succeeded.
    pub fn bulk_assign<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a DocumentId>,
        assignee: &str,
    ) -> BulkResult {
        let ids: BTreeSet<&DocumentId> = ids.into_iter().collect();

        let outcome = self.mutate(|snapshot| {
            let mut result = BulkResult::default();
            let mut events = Vec::new();
            for id in ids {
                let stage = match snapshot.require(id) {
                    Ok(doc) => doc.current_stage(),
                    Err(e) => {
                        result.failed.insert(id.clone(), e.kind());
                        continue;
                    }
                };
                let event = StageEvent::Assign {
                    stage,
                    assignee: assignee.to_string(),
                };
                match snapshot.apply(id, &event) {
                    Ok(evs) => {
                        events.extend(evs);
                        result.succeeded.insert(id.clone());
                    }
                    Err(e) => {
                        tracing::debug!(document_id = %id, error = %e, "bulk assign skipped");
                        result.failed.insert(id.clone(), e.kind());
                    }
                }
            }
            Ok((result, events))
        });

        // The closure never fails; individual failures live in the result
        let result = outcome.unwrap_or_default();
        tracing::info!(
            assignee,
            succeeded = result.succeeded.len(),
            failed = result.failed.len(),
            "bulk assign"
        );
        result
    }

    /// Documents matching `filter`, in ingestion order.
    ///
    /// The sequence is lazy and reads the collection as of this call; call
    /// again to observe later changes.
    pub fn query(&self, filter: DocumentFilter) -> impl Iterator<Item = Document> {
        let snapshot = self.snapshot();
        let needle = filter.text.as_deref().map(str::to_lowercase);
        (0..snapshot.documents.len()).filter_map(move |i| {
            let doc = &snapshot.documents[i];
            filter
                .matches(doc, needle.as_deref())
                .then(|| Document::clone(doc))
        })
    }

    /// Every stage record of one document, in pipeline order
    pub fn journey(&self, id: &DocumentId) -> Result<Vec<StageRecord>, CoreError> {
        self.snapshot()
            .require(id)
            .map(|doc| doc.journey().to_vec())
    }

    pub fn len(&self) -> usize {
        self.snapshot().documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dashboard counters
    pub fn stats(&self) -> PipelineStats {
        let snapshot = self.snapshot();
        let mut stats = PipelineStats {
            total: snapshot.documents.len(),
            certified: 0,
            stages: STAGES.iter().map(|&s| (s, StageCounts::default())).collect(),
        };

        for doc in &snapshot.documents {
            if doc.is_certified() {
                stats.certified += 1;
            }
            for record in doc.journey() {
                let counts = stats.stages.entry(record.stage).or_default();
                match record.status {
                    StageStatus::ToBeAssigned => counts.awaiting += 1,
                    StageStatus::Pending => counts.in_progress += 1,
                    StageStatus::Completed => counts.completed += 1,
                    StageStatus::NotStarted => {}
                }
            }
        }

        stats
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
