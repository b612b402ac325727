//! Lifecycle notifications
//!
//! Fire-and-forget side channel: `notify` never blocks on I/O and never
//! fails the caller.

use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

pub trait NotificationSink: Send + Sync {
    fn notify(&self, owner_id: Uuid, message: &str);
}

/// Logs each notification and keeps a per-owner inbox
#[derive(Debug, Default)]
pub struct InMemoryNotifier {
    inbox: DashMap<Uuid, Vec<String>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages delivered to `owner_id`, oldest first
    pub fn notifications(&self, owner_id: Uuid) -> Vec<String> {
        self.inbox
            .get(&owner_id)
            .map(|messages| messages.value().clone())
            .unwrap_or_default()
    }
}

impl NotificationSink for InMemoryNotifier {
    fn notify(&self, owner_id: Uuid, message: &str) {
        info!(target: "notify", owner = %owner_id, "{}", message);
        self.inbox
            .entry(owner_id)
            .or_default()
            .push(message.to_string());
    }
}

/// Log-only sink
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, owner_id: Uuid, message: &str) {
        info!(target: "notify", owner = %owner_id, "{}", message);
    }
}
