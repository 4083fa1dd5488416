// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Folio editorial engine
//!
//! Owned services that hold the mutable state the core state machines act on:
//! the document [`Pipeline`], the [`AssignmentQueue`] view over it, and the
//! [`UploadManager`] that drives upload tasks.

pub mod config;
mod pipeline;
mod progress;
mod queue;
mod uploads;

pub use config::{ConfigError, FolioConfig, QueueConfig, UploadConfig, MAX_STEP};
pub use pipeline::{BulkResult, DocumentFilter, Pipeline, PipelineStats, StageCounts};
pub use progress::ProgressPolicy;
pub use queue::{AssignmentQueue, Page};
pub use uploads::UploadManager;
