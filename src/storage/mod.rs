// ABOUTME: Scoped key-value slot abstraction and the measurement store built on it
// ABOUTME: Pluggable backends (in-memory, file) following the CacheProvider pattern
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// File-backed slots with atomic replacement
pub mod file;
/// Append-only measurement history per session
pub mod measurement_store;
/// In-memory slots for tests and ephemeral runs
pub mod memory;

use std::fmt;

use crate::errors::AppResult;

pub use file::FileSlot;
pub use measurement_store::MeasurementStore;
pub use memory::InMemorySlot;

/// Key of one persisted slot: a session scope plus a slot name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    session_id: String,
    slot: &'static str,
}

impl SlotKey {
    /// Build a key; characters outside `[A-Za-z0-9_-]` in the session id become `_`
    #[must_use]
    pub fn new(session_id: &str, slot: &'static str) -> Self {
        let session_id: String = session_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        Self { session_id, slot }
    }

    /// Sanitized session scope
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Slot name within the session
    #[must_use]
    pub const fn slot(&self) -> &'static str {
        self.slot
    }

    /// File name used by file-backed slots
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{}.json", self.session_id, self.slot)
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.session_id, self.slot)
    }
}

/// Storage backend holding one string value per scoped key
///
/// Implementations must make `write` atomic: a concurrent or later `read`
/// sees either the previous value or the new one, never a mix.
#[async_trait::async_trait]
pub trait KeyValueSlot: Send + Sync {
    /// Read the value stored under `key`, `None` if nothing was written yet
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    async fn read(&self, key: &SlotKey) -> AppResult<Option<String>>;

    /// Replace the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn write(&self, key: &SlotKey, value: String) -> AppResult<()>;

    /// Remove the value stored under `key`; removing an absent key is not an error
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn remove(&self, key: &SlotKey) -> AppResult<()>;

    /// Check that the backend is usable
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable
    async fn health_check(&self) -> AppResult<()>;

    /// Backend name for logs and health output
    fn backend_name(&self) -> &'static str;
}
