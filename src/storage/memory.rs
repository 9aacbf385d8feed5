// ABOUTME: In-memory key-value slot backend
// ABOUTME: Shared Arc<RwLock<HashMap>> store, injectable per test
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::{KeyValueSlot, SlotKey};
use crate::errors::AppResult;

/// In-memory slots; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct InMemorySlot {
    store: Arc<RwLock<HashMap<SlotKey, String>>>,
}

impl InMemorySlot {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of populated slots
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Whether no slot has been written
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl KeyValueSlot for InMemorySlot {
    async fn read(&self, key: &SlotKey) -> AppResult<Option<String>> {
        Ok(self.store.read().await.get(key).cloned())
    }

    async fn write(&self, key: &SlotKey, value: String) -> AppResult<()> {
        self.store.write().await.insert(key.clone(), value);
        Ok(())
    }

    async fn remove(&self, key: &SlotKey) -> AppResult<()> {
        self.store.write().await.remove(key);
        Ok(())
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
