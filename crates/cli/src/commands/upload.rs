// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `folio upload` - Upload files and ingest them as documents

use crate::output::{self, OutputFormat, QueueView, TaskView, UploadReport};
use anyhow::{Context, Result};
use clap::Args;
use folio_adapters::{LocalFileSource, TracedFileSource};
use folio_core::{DocumentMetadata, Event, EventBus, SystemClock, UuidIdGen};
use folio_engine::{AssignmentQueue, FolioConfig, Pipeline, ProgressPolicy, UploadManager};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Args)]
pub struct UploadArgs {
    /// Files to upload
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Language recorded on each ingested document
    #[arg(long, default_value = "English")]
    pub language: String,
}

pub async fn upload(args: UploadArgs, config: &FolioConfig, format: OutputFormat) -> Result<ExitCode> {
    let mut files = Vec::with_capacity(args.paths.len());
    for path in &args.paths {
        let file = LocalFileSource::handle(path)
            .await
            .with_context(|| format!("cannot upload {}", path.display()))?;
        files.push(file);
    }

    let bus = EventBus::new();
    let pipeline = Arc::new(Pipeline::new(
        SystemClock,
        UuidIdGen::new("doc"),
        bus.clone(),
    ));
    let manager = UploadManager::new(
        TracedFileSource::new(LocalFileSource::new()),
        SystemClock,
        UuidIdGen::new("task"),
        ProgressPolicy::new(&config.uploads),
        bus.clone(),
    );

    let mut updates = manager.subscribe();
    let tasks = manager.submit(files);
    let mut remaining = tasks.len();

    while remaining > 0 {
        let Some(event) = updates.recv().await else {
            break;
        };
        match event {
            Event::UploadProgress {
                task_id, progress, ..
            } => {
                if matches!(format, OutputFormat::Text) {
                    let name = tasks
                        .iter()
                        .find(|t| t.id == task_id)
                        .map_or("?", |t| t.file.name.as_str());
                    println!("{} {}%", name, progress);
                }
            }
            Event::FileReady { name, .. } => {
                remaining -= 1;
                let metadata = DocumentMetadata::new(title_for(&name), &args.language, 1);
                pipeline.ingest(metadata).map_err(output::explain)?;
            }
            Event::UploadFailed { .. } => remaining -= 1,
            _ => {}
        }
    }

    let queue = AssignmentQueue::new(pipeline.clone(), &config.queue);
    let report = UploadReport {
        tasks: manager.snapshot().iter().map(TaskView::from).collect(),
        queue: QueueView::from(queue.page(1)),
    };
    output::print(&report, format);

    if report.any_failed() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Document title for an uploaded file: its name without the extension
fn title_for(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.trim().is_empty())
        .unwrap_or_else(|| name.to_string())
}

#[cfg(test)]
#[path = "upload_tests.rs"]
mod tests;
