// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! folio-core: Core library for the folio editorial pipeline
//!
//! This crate provides:
//! - The stage registry (ordered stages and per-stage statuses)
//! - Pure state machines for documents and upload tasks
//! - Events and an event bus for push delivery to collaborators
//! - Clock and ID abstractions for deterministic tests

pub mod clock;
pub mod error;
pub mod id;

// State machines (order matters for dependencies)
pub mod stage;
pub mod document;
pub mod upload;
pub mod event;
pub mod events;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use document::{
    AggregateStatus, Document, DocumentId, DocumentMetadata, StageEvent, StageRecord,
};
pub use error::{CoreError, ErrorKind};
pub use event::Event;
pub use events::{EventBus, EventPattern, EventReceiver, SubscriberId, Subscription};
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use stage::{stages, Stage, StageStatus, STAGES};
pub use upload::{format_size, FileHandle, TaskId, UploadEvent, UploadStatus, UploadTask};
