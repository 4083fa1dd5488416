// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake file source for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{offset_of, FileSource, SourceError};
use async_trait::async_trait;
use folio_core::FileHandle;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Recorded read call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceCall {
    pub name: String,
    pub from: u8,
    pub to: u8,
}

#[derive(Debug)]
struct Failure {
    at: u8,
    reason: String,
}

/// Fake file source for testing.
///
/// Reads succeed instantly unless a failure was injected for the file name.
#[derive(Clone, Default)]
pub struct FakeFileSource {
    failures: Arc<Mutex<HashMap<String, Failure>>>,
    latency: Arc<Mutex<Option<Duration>>>,
    calls: Arc<Mutex<Vec<SourceCall>>>,
}

impl FakeFileSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the first read of `name` that reaches `at` percent.
    ///
    /// The failure fires once; later reads of the same name succeed.
    pub fn fail_at(&self, name: impl Into<String>, at: u8, reason: impl Into<String>) {
        self.failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(
                name.into(),
                Failure {
                    at,
                    reason: reason.into(),
                },
            );
    }

    /// Delay every read by `latency`
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap_or_else(|e| e.into_inner()) = Some(latency);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<SourceCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Recorded calls for one file
    pub fn calls_for(&self, name: &str) -> Vec<SourceCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.name == name)
            .collect()
    }
}

#[async_trait]
impl FileSource for FakeFileSource {
    async fn read(&self, file: &FileHandle, from: u8, to: u8) -> Result<u64, SourceError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SourceCall {
                name: file.name.clone(),
                from,
                to,
            });

        let latency = *self.latency.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        {
            let mut failures = self.failures.lock().unwrap_or_else(|e| e.into_inner());
            if failures.get(&file.name).is_some_and(|f| to >= f.at) {
                if let Some(failure) = failures.remove(&file.name) {
                    return Err(SourceError::Failed(failure.reason));
                }
            }
        }

        Ok(offset_of(file.size, to).saturating_sub(offset_of(file.size, from)))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
