//! Concurrent in-memory link store
//!
//! Primary map `code -> Link` plus a derived `owner -> codes` index. Every
//! mutation takes the primary map's entry lock first and updates the owner
//! index while still holding it, so the two views never diverge beyond a
//! single mutation. Lock order is always primary map, then owner index.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::trace;
use uuid::Uuid;

use super::models::Link;

/// Storage seam used by the lifecycle service
pub trait LinkRepository: Send + Sync {
    fn get(&self, code: &str) -> Option<Arc<Link>>;

    /// Insert or overwrite the entry under `link.code`
    fn put(&self, link: Arc<Link>);

    /// Remove the entry; returns what was removed, `None` if absent
    fn delete(&self, code: &str) -> Option<Arc<Link>>;

    /// Remove the entry only if it is still this exact record.
    ///
    /// Guards check-then-act callers (sweep, owner delete) against
    /// removing a record that replaced the one they inspected.
    fn delete_if_current(&self, link: &Arc<Link>) -> bool;

    /// Weakly consistent snapshot of every entry
    fn list_all(&self) -> Vec<Arc<Link>>;

    /// Snapshot of entries owned by `owner_id`; empty for unknown owners
    fn list_by_owner(&self, owner_id: Uuid) -> Vec<Arc<Link>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
pub struct InMemoryLinkStore {
    links: DashMap<String, Arc<Link>>,
    owners: DashMap<Uuid, HashSet<String>>,
}

impl InMemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Codes currently indexed for `owner_id`
    pub fn owned_codes(&self, owner_id: Uuid) -> HashSet<String> {
        self.owners
            .get(&owner_id)
            .map(|codes| codes.value().clone())
            .unwrap_or_default()
    }

    fn index(&self, owner_id: Uuid, code: String) {
        self.owners.entry(owner_id).or_default().insert(code);
    }

    fn unindex(&self, owner_id: Uuid, code: &str) {
        if let Entry::Occupied(mut entry) = self.owners.entry(owner_id) {
            entry.get_mut().remove(code);
            if entry.get().is_empty() {
                entry.remove();
            }
        }
    }
}

impl LinkRepository for InMemoryLinkStore {
    fn get(&self, code: &str) -> Option<Arc<Link>> {
        self.links.get(code).map(|entry| Arc::clone(entry.value()))
    }

    fn put(&self, link: Arc<Link>) {
        let code = link.code.clone();
        let owner_id = link.owner_id;

        match self.links.entry(code.clone()) {
            Entry::Occupied(mut entry) => {
                let previous = entry.insert(link);
                if previous.owner_id != owner_id {
                    self.unindex(previous.owner_id, &code);
                }
                self.index(owner_id, code);
                trace!("LinkStore: overwrote '{}'", entry.key());
            }
            Entry::Vacant(entry) => {
                // 索引更新期间保持分片锁
                let _guard = entry.insert(link);
                self.index(owner_id, code);
            }
        }
    }

    fn delete(&self, code: &str) -> Option<Arc<Link>> {
        match self.links.entry(code.to_string()) {
            Entry::Occupied(entry) => {
                self.unindex(entry.get().owner_id, code);
                Some(entry.remove())
            }
            Entry::Vacant(_) => None,
        }
    }

    fn delete_if_current(&self, link: &Arc<Link>) -> bool {
        match self.links.entry(link.code.clone()) {
            Entry::Occupied(entry) if Arc::ptr_eq(entry.get(), link) => {
                self.unindex(link.owner_id, &link.code);
                entry.remove();
                true
            }
            _ => false,
        }
    }

    fn list_all(&self) -> Vec<Arc<Link>> {
        self.links
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    fn list_by_owner(&self, owner_id: Uuid) -> Vec<Arc<Link>> {
        // 先复制 code 集合并释放索引锁，再读主表
        self.owned_codes(owner_id)
            .iter()
            .filter_map(|code| self.get(code))
            .filter(|link| link.owner_id == owner_id)
            .collect()
    }

    fn len(&self) -> usize {
        self.links.len()
    }
}
