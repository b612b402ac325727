//! Short link lifecycle service
//!
//! Orchestrates creation (retry loop over generated candidates), redirect
//! resolution with click accounting, owner-checked deletion and the expiry
//! sweep. Shared by the HTTP handlers, the interactive CLI and the
//! cleanup scheduler.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::LinkConfig;
use crate::errors::{Result, ShortlifeError};
use crate::services::code_generator::CodeGenerator;
use crate::services::notification::NotificationSink;
use crate::storage::{Link, LinkRepository};

/// Request to create a new link
#[derive(Debug, Clone, Default)]
pub struct CreateLinkRequest {
    pub target_url: String,
    /// Owner; a fresh id is generated when absent
    pub owner_id: Option<Uuid>,
    /// Click budget (None = configured default)
    pub max_clicks: Option<u32>,
    /// Lifetime in seconds (None = configured default)
    pub ttl_seconds: Option<u64>,
}

impl CreateLinkRequest {
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            ..Self::default()
        }
    }

    pub fn owner(mut self, owner_id: Uuid) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn max_clicks(mut self, max_clicks: u32) -> Self {
        self.max_clicks = Some(max_clicks);
        self
    }

    pub fn ttl_seconds(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = Some(ttl_seconds);
        self
    }
}

pub struct LinkLifecycleService {
    store: Arc<dyn LinkRepository>,
    notifier: Arc<dyn NotificationSink>,
    generator: CodeGenerator,
    settings: LinkConfig,
}

impl LinkLifecycleService {
    pub fn new(
        store: Arc<dyn LinkRepository>,
        notifier: Arc<dyn NotificationSink>,
        settings: LinkConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            generator: CodeGenerator::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &LinkConfig {
        &self.settings
    }

    /// Create a new short link
    ///
    /// Tries `max_short_gen_attempts` candidate codes and stores the first
    /// one not already taken. Two concurrent creates with identical owner,
    /// URL and attempt can both see the code as free; the later `put` wins.
    pub fn create(&self, req: CreateLinkRequest) -> Result<Arc<Link>> {
        let owner_id = req.owner_id.unwrap_or_else(|| {
            let id = Uuid::new_v4();
            debug!("LinkService: generated new owner id {}", id);
            id
        });
        let ttl_seconds = req
            .ttl_seconds
            .unwrap_or(self.settings.default_ttl_seconds);
        let max_clicks = req.max_clicks.unwrap_or(self.settings.default_max_clicks);

        for attempt in 0..self.settings.max_short_gen_attempts {
            let code = self.generator.generate(
                owner_id,
                &req.target_url,
                self.settings.code_length,
                attempt,
            );

            if self.store.get(&code).is_some() {
                debug!(
                    "LinkService: code '{}' taken (attempt {}), retrying",
                    code, attempt
                );
                continue;
            }

            let link = Arc::new(Link::new(
                code,
                req.target_url.clone(),
                owner_id,
                ttl_seconds,
                max_clicks,
            ));
            self.store.put(Arc::clone(&link));
            self.notifier
                .notify(owner_id, &format!("Link created: {}", link.code));

            info!(
                "LinkService: created '{}' -> '{}' (ttl={}s, max_clicks={})",
                link.code, link.target_url, ttl_seconds, max_clicks
            );
            return Ok(link);
        }

        warn!(
            "LinkService: no free code for '{}' after {} attempts",
            req.target_url, self.settings.max_short_gen_attempts
        );
        Err(ShortlifeError::code_exhausted(format!(
            "Cannot generate unique link code after {} attempts",
            self.settings.max_short_gen_attempts
        )))
    }

    /// Resolve a code for a redirect, counting the click
    ///
    /// Missing, inactive and expired links all come back as `None`. The call
    /// that exhausts the click budget still gets the link.
    pub fn resolve(&self, code: &str) -> Option<Arc<Link>> {
        let link = self.store.get(code)?;

        if !link.is_usable_at(Utc::now()) {
            debug!("LinkService: '{}' is inactive or expired", code);
            return None;
        }

        let outcome = link.register_click();
        if outcome.deactivated {
            self.notifier.notify(
                link.owner_id,
                &format!("Link {} reached max clicks and is now inactive", code),
            );
            info!(
                "LinkService: '{}' deactivated after {} clicks",
                code, outcome.count
            );
        }

        Some(link)
    }

    pub fn list_owned(&self, owner_id: Uuid) -> Vec<Arc<Link>> {
        self.store.list_by_owner(owner_id)
    }

    pub fn list_all(&self) -> Vec<Arc<Link>> {
        self.store.list_all()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Delete a link on behalf of `requester_id`
    ///
    /// Returns `Ok(false)` when the code does not exist and
    /// `OwnershipViolation` when the requester is not the owner.
    pub fn delete(&self, code: &str, requester_id: Uuid) -> Result<bool> {
        let Some(link) = self.store.get(code) else {
            return Ok(false);
        };

        if link.owner_id != requester_id {
            warn!(
                "LinkService: {} tried to delete '{}' owned by someone else",
                requester_id, code
            );
            return Err(ShortlifeError::ownership_violation(
                "Only owner can delete link",
            ));
        }

        // 检查与删除之间可能已被清理任务移除
        if !self.store.delete_if_current(&link) {
            return Ok(false);
        }

        self.notifier
            .notify(requester_id, &format!("Link deleted: {}", code));
        info!("LinkService: deleted '{}'", code);
        Ok(true)
    }

    /// Remove every expired entry; returns how many were removed
    pub fn cleanup(&self) -> usize {
        self.cleanup_at(Utc::now())
    }

    /// Sweep against an explicit clock
    ///
    /// Safe to run concurrently with itself: each record is removed (and
    /// notified) by exactly one sweep.
    pub fn cleanup_at(&self, now: DateTime<Utc>) -> usize {
        let mut removed = 0;

        for link in self.store.list_all() {
            if link.is_expired_at(now) && self.store.delete_if_current(&link) {
                self.notifier.notify(
                    link.owner_id,
                    &format!("Link {} expired and removed", link.code),
                );
                removed += 1;
            }
        }

        if removed > 0 {
            info!("LinkService: cleanup removed {} expired links", removed);
        } else {
            debug!("LinkService: cleanup found nothing to remove");
        }
        removed
    }

    /// `base_url/code`
    pub fn short_url(&self, link: &Link) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), link.code)
    }
}
