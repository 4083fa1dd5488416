// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File sources: where an upload task reads its bytes from

mod local;

pub use local::LocalFileSource;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeFileSource, SourceCall};

use async_trait::async_trait;
use folio_core::FileHandle;
use thiserror::Error;

/// Errors from reading a file handle
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("file has no readable location: {0}")]
    NoLocation(String),
    #[error("failed to read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{name} ended early: expected {expected} bytes, found {found}")]
    Truncated {
        name: String,
        expected: u64,
        found: u64,
    },
    #[error("read failed: {0}")]
    Failed(String),
}

/// Adapter for reading the bytes behind an upload
#[async_trait]
pub trait FileSource: Clone + Send + Sync + 'static {
    /// Read the slice of `file` between `from` and `to` percent.
    ///
    /// Returns the number of bytes read.
    async fn read(&self, file: &FileHandle, from: u8, to: u8) -> Result<u64, SourceError>;
}

/// Byte offset of `percent` into a file of `size` bytes
pub fn offset_of(size: u64, percent: u8) -> u64 {
    let percent = u64::from(percent.min(100));
    // u128 keeps very large files from overflowing
    ((u128::from(size) * u128::from(percent)) / 100) as u64
}
