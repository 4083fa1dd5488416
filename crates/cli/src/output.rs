// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use folio_core::{CoreError, Document, StageRecord, UploadStatus, UploadTask};
use folio_engine::Page;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print output in the specified format
pub fn print<T: Serialize + fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// Turn a pipeline error into a user-facing one.
///
/// Stale actions usually mean something else changed the document first.
pub fn explain(err: CoreError) -> anyhow::Error {
    if err.is_stale() {
        anyhow::anyhow!("this action is no longer available ({})", err)
    } else {
        err.into()
    }
}

/// A document and its journey
#[derive(Debug, Serialize)]
pub struct DocumentView {
    pub id: String,
    pub title: String,
    pub language: String,
    pub status: String,
    pub journey: Vec<StageRecord>,
}

impl From<&Document> for DocumentView {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.to_string(),
            title: doc.title().to_string(),
            language: doc.metadata.language.clone(),
            status: doc.aggregate_status().to_string(),
            journey: doc.journey().to_vec(),
        }
    }
}

impl fmt::Display for DocumentView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({}) [{}]", self.title, self.language, self.id)?;
        for record in &self.journey {
            write!(
                f,
                "  {:<30} {:<15}",
                record.stage.title(),
                record.status.name()
            )?;
            if let Some(assignee) = &record.assignee {
                write!(f, " {}", assignee)?;
            }
            if let Some(on) = record.completed_on {
                write!(f, " on {}", on)?;
            }
            writeln!(f)?;
        }
        write!(f, "Status: {}", self.status)
    }
}

/// Final state of one upload
#[derive(Debug, Serialize)]
pub struct TaskView {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub display_size: String,
    pub status: UploadStatus,
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&UploadTask> for TaskView {
    fn from(task: &UploadTask) -> Self {
        Self {
            id: task.id.to_string(),
            name: task.file.name.clone(),
            size: task.file.size,
            display_size: task.file.display_size(),
            status: task.status,
            progress: task.progress,
            error: task.error.clone(),
        }
    }
}

impl fmt::Display for TaskView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<24} {:>10} {:<10} {:>3}%",
            self.name,
            self.display_size,
            self.status.name(),
            self.progress
        )?;
        if let Some(error) = &self.error {
            write!(f, " ({})", error)?;
        }
        Ok(())
    }
}

/// One page of documents awaiting assignment
#[derive(Debug, Serialize)]
pub struct QueueView {
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items: Vec<QueueItem>,
}

#[derive(Debug, Serialize)]
pub struct QueueItem {
    pub id: String,
    pub title: String,
    pub status: String,
}

impl From<Page> for QueueView {
    fn from(page: Page) -> Self {
        Self {
            page: page.number,
            total_pages: page.total_pages,
            total_items: page.total_items,
            items: page
                .items
                .iter()
                .map(|doc| QueueItem {
                    id: doc.id.to_string(),
                    title: doc.title().to_string(),
                    status: doc.aggregate_status().to_string(),
                })
                .collect(),
        }
    }
}

impl fmt::Display for QueueView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total_items == 0 {
            return write!(f, "No documents awaiting assignment");
        }
        write!(
            f,
            "Awaiting assignment: {} (page {} of {})",
            self.total_items, self.page, self.total_pages
        )?;
        for item in &self.items {
            write!(f, "\n  {:<32} {}", item.title, item.status)?;
        }
        Ok(())
    }
}

/// Result of `folio upload`
#[derive(Debug, Serialize)]
pub struct UploadReport {
    pub tasks: Vec<TaskView>,
    pub queue: QueueView,
}

impl UploadReport {
    pub fn any_failed(&self) -> bool {
        self.tasks.iter().any(|t| t.status == UploadStatus::Error)
    }
}

impl fmt::Display for UploadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for task in &self.tasks {
            writeln!(f, "{}", task)?;
        }
        write!(f, "{}", self.queue)
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
