use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A short link record.
///
/// Identity fields are immutable after construction. Runtime state
/// (click counter and active flag) lives in atomics so concurrent
/// redirects on the same record never need an external lock.
#[derive(Debug)]
pub struct Link {
    pub code: String,
    pub target_url: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub ttl_seconds: u64,
    pub max_clicks: u32,
    click_count: AtomicU64,
    active: AtomicBool,
}

/// Result of counting one redirect against a link's click budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickOutcome {
    /// Click count after this increment
    pub count: u64,
    /// True only for the caller whose increment flipped `active` to false
    pub deactivated: bool,
}

impl Link {
    pub fn new(
        code: impl Into<String>,
        target_url: impl Into<String>,
        owner_id: Uuid,
        ttl_seconds: u64,
        max_clicks: u32,
    ) -> Self {
        Self::new_at(code, target_url, owner_id, Utc::now(), ttl_seconds, max_clicks)
    }

    pub fn new_at(
        code: impl Into<String>,
        target_url: impl Into<String>,
        owner_id: Uuid,
        created_at: DateTime<Utc>,
        ttl_seconds: u64,
        max_clicks: u32,
    ) -> Self {
        Self {
            code: code.into(),
            target_url: target_url.into(),
            owner_id,
            created_at,
            ttl_seconds,
            max_clicks,
            click_count: AtomicU64::new(0),
            active: AtomicBool::new(true),
        }
    }

    /// `created_at + ttl_seconds`, saturating at the maximum representable instant
    pub fn expires_at(&self) -> DateTime<Utc> {
        i64::try_from(self.ttl_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|ttl| self.created_at.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn click_count(&self) -> u64 {
        self.click_count.load(Ordering::Acquire)
    }

    /// Active and not yet expired at `now`
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active() && !self.is_expired_at(now)
    }

    /// Count one click; deactivates the link once the budget is reached.
    ///
    /// The increment never loses updates under contention, and `active`
    /// only ever moves from true to false.
    pub fn register_click(&self) -> ClickOutcome {
        let count = self.click_count.fetch_add(1, Ordering::AcqRel) + 1;
        let deactivated =
            count >= u64::from(self.max_clicks) && self.active.swap(false, Ordering::AcqRel);

        ClickOutcome { count, deactivated }
    }

    /// Serializable point-in-time copy for front ends
    pub fn view(&self, now: DateTime<Utc>) -> LinkView {
        LinkView {
            code: self.code.clone(),
            target_url: self.target_url.clone(),
            owner_id: self.owner_id,
            created_at: self.created_at,
            expires_at: self.expires_at(),
            ttl_seconds: self.ttl_seconds,
            max_clicks: self.max_clicks,
            click_count: self.click_count(),
            active: self.is_active(),
            expired: self.is_expired_at(now),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkView {
    pub code: String,
    pub target_url: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub ttl_seconds: u64,
    pub max_clicks: u32,
    pub click_count: u64,
    pub active: bool,
    pub expired: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn link(max_clicks: u32) -> Link {
        Link::new("abc123", "https://example.com", Uuid::new_v4(), 60, max_clicks)
    }

    #[test]
    fn test_new_link_is_usable() {
        let link = link(3);
        assert!(link.is_active());
        assert_eq!(link.click_count(), 0);
        assert!(link.is_usable_at(Utc::now()));
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let created = Utc::now();
        let link = Link::new_at("c", "https://example.com", Uuid::new_v4(), created, 10, 5);
        let boundary = created + TimeDelta::seconds(10);

        assert!(!link.is_expired_at(boundary - TimeDelta::milliseconds(1)));
        assert!(link.is_expired_at(boundary));
        assert!(!link.is_usable_at(boundary));
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let link = Link::new("c", "https://example.com", Uuid::new_v4(), u64::MAX, 1);
        assert_eq!(link.expires_at(), DateTime::<Utc>::MAX_UTC);
        assert!(!link.is_expired_at(Utc::now()));
    }

    #[test]
    fn test_register_click_deactivates_once() {
        let link = link(2);

        let first = link.register_click();
        assert_eq!(first, ClickOutcome { count: 1, deactivated: false });
        assert!(link.is_active());

        let second = link.register_click();
        assert_eq!(second, ClickOutcome { count: 2, deactivated: true });
        assert!(!link.is_active());

        // 超出阈值后不会再次触发，也不会恢复 active
        let third = link.register_click();
        assert!(!third.deactivated);
        assert!(!link.is_active());
    }

    #[test]
    fn test_concurrent_clicks_are_not_lost() {
        let link = Arc::new(link(u32::MAX));

        std::thread::scope(|s| {
            for _ in 0..8 {
                let link = Arc::clone(&link);
                s.spawn(move || {
                    for _ in 0..1000 {
                        link.register_click();
                    }
                });
            }
        });

        assert_eq!(link.click_count(), 8000);
        assert!(link.is_active());
    }

    #[test]
    fn test_concurrent_crossing_deactivates_exactly_once() {
        let link = Arc::new(link(50));
        let flips = AtomicU64::new(0);

        std::thread::scope(|s| {
            for _ in 0..4 {
                let link = Arc::clone(&link);
                let flips = &flips;
                s.spawn(move || {
                    for _ in 0..25 {
                        if link.register_click().deactivated {
                            flips.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                });
            }
        });

        assert_eq!(link.click_count(), 100);
        assert_eq!(flips.load(Ordering::Relaxed), 1);
        assert!(!link.is_active());
    }

    #[test]
    fn test_view_reflects_state() {
        let link = link(1);
        link.register_click();
        let view = link.view(Utc::now());

        assert_eq!(view.code, "abc123");
        assert_eq!(view.click_count, 1);
        assert!(!view.active);
        assert!(!view.expired);
        assert_eq!(view.expires_at, link.expires_at());
    }
}
