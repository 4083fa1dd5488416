// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `folio walk` - Ingest a document and move it through the pipeline

use crate::output::{self, DocumentView, OutputFormat};
use anyhow::Result;
use clap::Args;
use folio_core::{Clock, DocumentMetadata, EventBus, Stage, SystemClock, UuidIdGen, STAGES};
use folio_engine::Pipeline;
use std::process::ExitCode;

#[derive(Args)]
pub struct WalkArgs {
    /// Document title
    pub title: String,

    /// Document language
    #[arg(long)]
    pub language: String,

    /// Last stage to complete (upload, contribution, validation, expert, golden)
    #[arg(long, default_value = "golden")]
    pub through: Stage,

    /// Who each stage is assigned to
    #[arg(long, default_value = "Admin")]
    pub assignee: String,

    /// Page count recorded on the document
    #[arg(long, default_value_t = 1)]
    pub pages: u32,
}

pub fn walk(args: WalkArgs, format: OutputFormat) -> Result<ExitCode> {
    let clock = SystemClock;
    let pipeline = Pipeline::new(clock, UuidIdGen::new("doc"), EventBus::new());

    let doc = pipeline
        .ingest(DocumentMetadata::new(&args.title, &args.language, args.pages))
        .map_err(output::explain)?;

    for &stage in STAGES.iter().take_while(|&&s| s <= args.through) {
        pipeline
            .assign(&doc.id, stage, &args.assignee)
            .map_err(output::explain)?;
        pipeline
            .complete(&doc.id, stage, clock.today())
            .map_err(output::explain)?;
    }

    let doc = pipeline.get(&doc.id)?;
    output::print(&DocumentView::from(&doc), format);
    Ok(ExitCode::SUCCESS)
}
