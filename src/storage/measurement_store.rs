// ABOUTME: Append-only measurement history persisted in one scoped slot per session
// ABOUTME: Validates on append, serializes writers and persists the full sequence before returning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Measurement Store
//!
//! The history of one session lives in a single slot as a JSON array,
//! oldest record first. Appends are read-modify-write under a mutex so two
//! writers of the same session never lose a record.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::warn;

use super::{KeyValueSlot, SlotKey};
use crate::constants::storage::MEASUREMENT_SLOT;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::MeasurementRecord;

/// Measurement history of one session
pub struct MeasurementStore {
    slot: Arc<dyn KeyValueSlot>,
    key: SlotKey,
    write_lock: Mutex<()>,
}

impl MeasurementStore {
    /// Store for `session_id` on top of `slot`
    #[must_use]
    pub fn new(slot: Arc<dyn KeyValueSlot>, session_id: &str) -> Self {
        Self {
            slot,
            key: SlotKey::new(session_id, MEASUREMENT_SLOT),
            write_lock: Mutex::new(()),
        }
    }

    /// Scoped key of the backing slot
    #[must_use]
    pub const fn key(&self) -> &SlotKey {
        &self.key
    }

    /// Validate and append `record`, returning the updated history
    ///
    /// Nothing is written when validation fails.
    ///
    /// # Errors
    ///
    /// Returns a validation error for out-of-range measurements, or a
    /// storage error if the slot cannot be read or written.
    pub async fn append(&self, record: MeasurementRecord) -> AppResult<Vec<MeasurementRecord>> {
        record.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut history = self.read_history().await?;
        history.push(record);

        let serialized = serde_json::to_string(&history)?;
        self.slot.write(&self.key, serialized).await?;

        AppLogger::log_store_append(self.key.session_id(), history.len());
        Ok(history)
    }

    /// Full history, empty when nothing was stored yet
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read or holds malformed data
    pub async fn load_all(&self) -> AppResult<Vec<MeasurementRecord>> {
        self.read_history().await
    }

    /// Most recent record, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read or holds malformed data
    pub async fn latest(&self) -> AppResult<Option<MeasurementRecord>> {
        Ok(self.read_history().await?.pop())
    }

    async fn read_history(&self) -> AppResult<Vec<MeasurementRecord>> {
        let Some(raw) = self.slot.read(&self.key).await? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            warn!(slot = %self.key, error = %e, "Stored measurement history is malformed");
            AppError::serialization(format!("Stored history for {} is malformed", self.key))
                .with_source(e)
        })
    }
}
