// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Assignment queue: documents waiting for an assignee at their current stage

use crate::config::QueueConfig;
use crate::pipeline::{BulkResult, DocumentFilter, Pipeline};
use folio_core::{Clock, Document, DocumentId, IdGen, StageStatus};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

/// One page of the pending queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// 1-based page number
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items: Vec<Document>,
}

/// A selection session over the pipeline's pending documents.
///
/// The queue keeps no copy of the documents; every read goes back to the
/// pipeline. Only the selected ids and the active filter are held here.
pub struct AssignmentQueue<C: Clock, I: IdGen> {
    pipeline: Arc<Pipeline<C, I>>,
    filter: DocumentFilter,
    selection: BTreeSet<DocumentId>,
    page_size: usize,
}

impl<C: Clock, I: IdGen> AssignmentQueue<C, I> {
    pub fn new(pipeline: Arc<Pipeline<C, I>>, config: &QueueConfig) -> Self {
        Self {
            pipeline,
            filter: DocumentFilter::default(),
            selection: BTreeSet::new(),
            page_size: config.page_size.max(1),
        }
    }

    /// Documents awaiting assignment that match `filter`, or the active
    /// filter when none is given
    pub fn pending_for_assignment(
        &self,
        filter: Option<DocumentFilter>,
    ) -> impl Iterator<Item = Document> {
        let filter = filter
            .unwrap_or_else(|| self.filter.clone())
            .status(StageStatus::ToBeAssigned);
        self.pipeline.query(filter)
    }

    fn pending_ids(&self) -> impl Iterator<Item = DocumentId> {
        self.pending_for_assignment(None).map(|doc| doc.id)
    }

    pub fn filter(&self) -> &DocumentFilter {
        &self.filter
    }

    /// Change the active filter. The selection is kept.
    pub fn set_filter(&mut self, filter: DocumentFilter) {
        self.filter = filter;
    }

    pub fn selection(&self) -> &BTreeSet<DocumentId> {
        &self.selection
    }

    pub fn is_selected(&self, id: &DocumentId) -> bool {
        self.selection.contains(id)
    }

    pub fn select<'a>(&mut self, ids: impl IntoIterator<Item = &'a DocumentId>) {
        self.selection.extend(ids.into_iter().cloned());
    }

    pub fn deselect<'a>(&mut self, ids: impl IntoIterator<Item = &'a DocumentId>) {
        for id in ids {
            self.selection.remove(id);
        }
    }

    /// Flip one id in or out of the selection
    pub fn toggle(&mut self, id: &DocumentId) {
        if !self.selection.remove(id) {
            self.selection.insert(id.clone());
        }
    }

    /// Select exactly the documents matching the active filter right now.
    ///
    /// Returns the number selected. Documents that match later are not
    /// picked up.
    pub fn select_all(&mut self) -> usize {
        self.selection = self.pending_ids().collect();
        self.selection.len()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// At least one document matches the active filter and all are selected
    pub fn is_all_selected(&self) -> bool {
        let mut any = false;
        for id in self.pending_ids() {
            if !self.selection.contains(&id) {
                return false;
            }
            any = true;
        }
        any
    }

    /// Page `number` (1-based) of the pending documents under the active
    /// filter. Out-of-range pages have no items.
    pub fn page(&self, number: usize) -> Page {
        let pending: Vec<Document> = self.pending_for_assignment(None).collect();
        let total_items = pending.len();
        let total_pages = total_items.div_ceil(self.page_size);
        let items = match number.checked_sub(1) {
            Some(index) => pending
                .into_iter()
                .skip(index.saturating_mul(self.page_size))
                .take(self.page_size)
                .collect(),
            None => Vec::new(),
        };
        Page {
            number,
            total_pages,
            total_items,
            items,
        }
    }

    /// Assign every selected document at its current stage.
    ///
    /// Ids that were assigned leave the selection; failures stay selected so
    /// the caller can retry or inspect them.
    pub fn assign_selected(&mut self, assignee: &str) -> BulkResult {
        let result = self.pipeline.bulk_assign(&self.selection, assignee);
        for id in &result.succeeded {
            self.selection.remove(id);
        }
        tracing::debug!(
            remaining = self.selection.len(),
            "assigned selection"
        );
        result
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
