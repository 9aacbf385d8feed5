// ABOUTME: Shared server resources handed to every route
// ABOUTME: Holds config, slot backend, AI gateway and the bounded registry of live coaching sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use lru::LruCache;
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::CoachConfig;
use crate::constants::storage::MEASUREMENT_SLOT;
use crate::gateway::AiGateway;
use crate::session::CoachSession;
use crate::storage::{KeyValueSlot, MeasurementStore, SlotKey};

/// Resources shared by all requests
pub struct CoachResources {
    /// Loaded configuration
    pub config: CoachConfig,
    /// Persistence backend
    pub slot: Arc<dyn KeyValueSlot>,
    /// AI gateway
    pub gateway: AiGateway,
    sessions: Mutex<LruCache<String, Arc<CoachSession>>>,
}

impl CoachResources {
    /// Bundle the resources
    #[must_use]
    pub fn new(config: CoachConfig, slot: Arc<dyn KeyValueSlot>, gateway: AiGateway) -> Self {
        Self {
            config,
            slot,
            gateway,
            sessions: Mutex::new(LruCache::unbounded()),
        }
    }

    /// Session for `session_id`, created on first use
    ///
    /// Ids are sanitized the same way as slot keys, so two raw ids that map
    /// to the same slot share one session. Once more than
    /// `config.max_sessions` are open, the least recently used idle session
    /// is dropped; its history stays in the slot and is read back when the
    /// id returns. Sessions still held by a request are never evicted.
    pub async fn session(&self, session_id: &str) -> Arc<CoachSession> {
        let id = SlotKey::new(session_id, MEASUREMENT_SLOT)
            .session_id()
            .to_owned();

        let mut sessions = self.sessions.lock().await;
        if let Some(session) = sessions.get(&id) {
            return Arc::clone(session);
        }

        debug!(session.id = %id, "Opening coaching session");
        let session = Arc::new(CoachSession::new(
            id.clone(),
            MeasurementStore::new(Arc::clone(&self.slot), &id),
            self.gateway.clone(),
            self.config.trend_window,
        ));
        sessions.put(id, Arc::clone(&session));
        Self::evict_idle(&mut sessions, self.config.max_sessions);
        session
    }

    fn evict_idle(sessions: &mut LruCache<String, Arc<CoachSession>>, max_sessions: usize) {
        while sessions.len() > max_sessions {
            let idle = sessions
                .iter()
                .rev()
                .find(|(_, session)| Arc::strong_count(session) == 1)
                .map(|(id, _)| id.clone());
            let Some(id) = idle else {
                break;
            };
            sessions.pop(&id);
            debug!(session.id = %id, "Evicted idle coaching session");
        }
    }

    /// Number of open sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
