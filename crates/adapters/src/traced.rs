// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::source::{FileSource, SourceError};
use async_trait::async_trait;
use folio_core::FileHandle;
use tracing::Instrument;

/// Wrapper that adds tracing to any FileSource
#[derive(Clone)]
pub struct TracedFileSource<S> {
    inner: S,
}

impl<S> TracedFileSource<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: FileSource> FileSource for TracedFileSource<S> {
    async fn read(&self, file: &FileHandle, from: u8, to: u8) -> Result<u64, SourceError> {
        let span = tracing::info_span!("source.read", name = %file.name, from, to);

        async {
            // Precondition: a local file must still be there
            if let Some(path) = &file.path {
                if !path.exists() {
                    tracing::error!(path = %path.display(), "file no longer exists");
                    return Err(SourceError::NoLocation(format!(
                        "file no longer exists: {}",
                        path.display()
                    )));
                }
            }

            let start = std::time::Instant::now();
            let result = self.inner.read(file, from, to).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(bytes) => tracing::trace!(
                    bytes,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "read"
                ),
                Err(e) => tracing::warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "read failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
