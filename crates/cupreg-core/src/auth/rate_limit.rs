//! Per-identity rate limiting for the login endpoints.
//!
//! Tracks failed attempts per (endpoint class, client identity) key inside
//! a fixed time window and locks the key out once the class limit is
//! reached. The window resets entirely the first time a key is touched
//! after expiry. A successful login does not reset anything; only time
//! does.

use std::time::{Duration, Instant};

use dashmap::DashMap;

/// How long a failure window lasts for both endpoint classes.
pub const ATTEMPT_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Failed attempts allowed per window on the administrator endpoint.
///
/// Stricter than the captain limit: the endpoint guards a single shared
/// secret with a much higher blast radius.
pub const MAX_ADMIN_ATTEMPTS: u32 = 5;

/// Failed attempts allowed per window on the captain endpoint.
pub const MAX_CAPTAIN_ATTEMPTS: u32 = 10;

/// The two login surfaces, limited independently.
///
/// A flood of captain login failures must not lock the administrator
/// endpoint for the same origin, and vice versa, so the class is part of
/// the tracking key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointClass {
    Admin,
    Captain,
}

impl EndpointClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointClass::Admin => "admin",
            EndpointClass::Captain => "captain",
        }
    }
}

/// Outcome of a [`RateLimiter::check`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed,
    /// Locked out; retry after the remaining window, rounded up to whole
    /// seconds.
    Limited { retry_after_secs: u64 },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed)
    }
}

#[derive(Debug)]
struct AttemptRecord {
    count: u32,
    window_start: Instant,
}

/// Fixed-window failure tracker for the login endpoints.
///
/// One record per (class, identity) key that has failed at least once in
/// the current window. Expired records are swept on every call, bounding
/// the map to identities active within one window. The store is a single
/// in-memory structure local to one process; the
/// `check`/`record_failure`/`sweep_expired` surface is the contract a
/// multi-instance deployment would re-implement over a shared counter
/// store.
///
/// The check-then-verify-then-record sequence for one login attempt spans
/// the (deliberately slow) hash comparison, so two racing attempts at the
/// exact threshold can both pass `check`. The limiter bounds sustained
/// abuse; it is not an atomic gate.
pub struct RateLimiter {
    records: DashMap<(EndpointClass, String), AttemptRecord>,
    window: Duration,
    admin_max: u32,
    captain_max: u32,
}

impl RateLimiter {
    /// Create a limiter with explicit bounds. Production code uses
    /// [`RateLimiter::default`]; tests shrink the window.
    pub fn new(window: Duration, admin_max: u32, captain_max: u32) -> Self {
        Self {
            records: DashMap::new(),
            window,
            admin_max,
            captain_max,
        }
    }

    fn max_for(&self, class: EndpointClass) -> u32 {
        match class {
            EndpointClass::Admin => self.admin_max,
            EndpointClass::Captain => self.captain_max,
        }
    }

    /// Decide whether an attempt from `identity` on `class` is currently
    /// allowed.
    ///
    /// Pure read apart from the opportunistic sweep: counters only move
    /// via [`RateLimiter::record_failure`]. Call this before any
    /// credential comparison so a locked-out identity never reaches the
    /// (expensive) verifier.
    pub fn check(&self, identity: &str, class: EndpointClass) -> RateLimitDecision {
        self.sweep_expired();

        let key = (class, identity.to_string());
        match self.records.get(&key) {
            Some(record) if record.count >= self.max_for(class) => {
                let remaining = self.window.saturating_sub(record.window_start.elapsed());
                let mut retry_after_secs = remaining.as_secs();
                if remaining.subsec_nanos() > 0 {
                    retry_after_secs += 1;
                }
                tracing::debug!(
                    class = class.as_str(),
                    identity,
                    retry_after_secs,
                    "attempt rejected by rate limiter"
                );
                RateLimitDecision::Limited { retry_after_secs }
            }
            _ => RateLimitDecision::Allowed,
        }
    }

    /// Record a verified mismatch for `identity` on `class`.
    ///
    /// Starts a fresh window on the first failure for a key (or the first
    /// touch after expiry, which the sweep has already evicted) and
    /// increments in place otherwise. Never called on a successful match.
    pub fn record_failure(&self, identity: &str, class: EndpointClass) {
        self.sweep_expired();

        let now = Instant::now();
        let mut record = self
            .records
            .entry((class, identity.to_string()))
            .or_insert(AttemptRecord {
                count: 0,
                window_start: now,
            });
        record.count += 1;
        if record.count >= self.max_for(class) {
            tracing::debug!(
                class = class.as_str(),
                identity,
                count = record.count,
                "failure limit reached, identity locked out"
            );
        }
    }

    /// Evict records whose window has fully expired.
    ///
    /// Runs at the start of every `check`/`record_failure` call; the web
    /// frontend also runs it on a timer so an idle process does not hold
    /// stale records until the next login.
    pub fn sweep_expired(&self) {
        let window = self.window;
        self.records
            .retain(|_, record| record.window_start.elapsed() <= window);
    }

    /// Number of (class, identity) keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.records.len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(ATTEMPT_WINDOW, MAX_ADMIN_ATTEMPTS, MAX_CAPTAIN_ATTEMPTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn allows_with_no_recorded_failures() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 5, 10);
        assert!(limiter.check("10.0.0.1", EndpointClass::Admin).is_allowed());
        assert!(limiter
            .check("10.0.0.1", EndpointClass::Captain)
            .is_allowed());
    }

    #[test]
    fn allows_below_the_class_limit() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 3, 10);

        limiter.record_failure("10.0.0.1", EndpointClass::Admin);
        limiter.record_failure("10.0.0.1", EndpointClass::Admin);

        assert!(limiter.check("10.0.0.1", EndpointClass::Admin).is_allowed());
    }

    #[test]
    fn blocks_at_the_class_limit() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 3, 10);

        for _ in 0..3 {
            limiter.record_failure("10.0.0.1", EndpointClass::Admin);
        }

        match limiter.check("10.0.0.1", EndpointClass::Admin) {
            RateLimitDecision::Limited { retry_after_secs } => {
                assert!(retry_after_secs >= 1);
                assert!(retry_after_secs <= 60);
            }
            RateLimitDecision::Allowed => panic!("expected lockout after 3 failures"),
        }
    }

    #[test]
    fn tenth_attempt_is_allowed_then_next_failure_locks() {
        // Captain limit 10: nine failures leave the tenth attempt open;
        // a tenth failure closes the window.
        let limiter = RateLimiter::new(Duration::from_secs(60), 5, 10);

        for _ in 0..9 {
            limiter.record_failure("84.210.0.7", EndpointClass::Captain);
        }
        assert!(limiter
            .check("84.210.0.7", EndpointClass::Captain)
            .is_allowed());

        limiter.record_failure("84.210.0.7", EndpointClass::Captain);
        assert!(!limiter
            .check("84.210.0.7", EndpointClass::Captain)
            .is_allowed());
    }

    #[test]
    fn identities_are_limited_independently() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 2, 10);

        limiter.record_failure("10.0.0.1", EndpointClass::Admin);
        limiter.record_failure("10.0.0.1", EndpointClass::Admin);

        assert!(!limiter.check("10.0.0.1", EndpointClass::Admin).is_allowed());
        assert!(limiter.check("10.0.0.2", EndpointClass::Admin).is_allowed());
    }

    #[test]
    fn classes_are_limited_independently() {
        let limiter = RateLimiter::new(Duration::from_secs(60), 2, 2);

        limiter.record_failure("10.0.0.1", EndpointClass::Captain);
        limiter.record_failure("10.0.0.1", EndpointClass::Captain);

        assert!(!limiter
            .check("10.0.0.1", EndpointClass::Captain)
            .is_allowed());
        assert!(limiter.check("10.0.0.1", EndpointClass::Admin).is_allowed());
    }

    #[test]
    fn window_expiry_allows_again() {
        let limiter = RateLimiter::new(Duration::from_secs(1), 2, 10);

        limiter.record_failure("10.0.0.1", EndpointClass::Admin);
        limiter.record_failure("10.0.0.1", EndpointClass::Admin);
        assert!(!limiter.check("10.0.0.1", EndpointClass::Admin).is_allowed());

        thread::sleep(Duration::from_secs(2));

        assert!(limiter.check("10.0.0.1", EndpointClass::Admin).is_allowed());
    }

    #[test]
    fn retry_after_does_not_increase_as_the_window_ages() {
        let limiter = RateLimiter::new(Duration::from_secs(3), 1, 10);
        limiter.record_failure("10.0.0.1", EndpointClass::Admin);

        let first = match limiter.check("10.0.0.1", EndpointClass::Admin) {
            RateLimitDecision::Limited { retry_after_secs } => retry_after_secs,
            RateLimitDecision::Allowed => panic!("expected lockout"),
        };

        thread::sleep(Duration::from_secs(1));

        let second = match limiter.check("10.0.0.1", EndpointClass::Admin) {
            RateLimitDecision::Limited { retry_after_secs } => retry_after_secs,
            RateLimitDecision::Allowed => panic!("window should not have expired yet"),
        };

        assert!(second <= first);
    }

    #[test]
    fn failures_keep_accumulating_within_a_window() {
        // A successful login never clears the counter, so failures before
        // and after a success share one window.
        let limiter = RateLimiter::new(Duration::from_secs(60), 5, 3);

        limiter.record_failure("10.0.0.1", EndpointClass::Captain);
        limiter.record_failure("10.0.0.1", EndpointClass::Captain);
        // (a successful login happens here; nothing is recorded)
        limiter.record_failure("10.0.0.1", EndpointClass::Captain);

        assert!(!limiter
            .check("10.0.0.1", EndpointClass::Captain)
            .is_allowed());
    }

    #[test]
    fn sweep_evicts_expired_records() {
        let limiter = RateLimiter::new(Duration::from_secs(1), 5, 10);

        limiter.record_failure("10.0.0.1", EndpointClass::Admin);
        limiter.record_failure("10.0.0.2", EndpointClass::Admin);
        limiter.record_failure("10.0.0.3", EndpointClass::Captain);
        assert_eq!(limiter.tracked_keys(), 3);

        thread::sleep(Duration::from_secs(2));

        limiter.sweep_expired();
        assert_eq!(limiter.tracked_keys(), 0);
    }

    #[test]
    fn check_sweeps_opportunistically() {
        let limiter = RateLimiter::new(Duration::from_secs(1), 5, 10);

        limiter.record_failure("10.0.0.1", EndpointClass::Admin);
        assert_eq!(limiter.tracked_keys(), 1);

        thread::sleep(Duration::from_secs(2));

        limiter.check("10.0.0.9", EndpointClass::Captain);
        assert_eq!(limiter.tracked_keys(), 0);
    }

    #[test]
    fn fresh_window_after_expiry_starts_at_one() {
        let limiter = RateLimiter::new(Duration::from_secs(1), 2, 10);

        limiter.record_failure("10.0.0.1", EndpointClass::Admin);
        limiter.record_failure("10.0.0.1", EndpointClass::Admin);
        assert!(!limiter.check("10.0.0.1", EndpointClass::Admin).is_allowed());

        thread::sleep(Duration::from_secs(2));

        // First failure after expiry opens a fresh window with count 1.
        limiter.record_failure("10.0.0.1", EndpointClass::Admin);
        assert!(limiter.check("10.0.0.1", EndpointClass::Admin).is_allowed());
    }

    #[test]
    fn default_uses_reference_limits() {
        let limiter = RateLimiter::default();

        for _ in 0..5 {
            limiter.record_failure("10.0.0.1", EndpointClass::Admin);
        }
        assert!(!limiter.check("10.0.0.1", EndpointClass::Admin).is_allowed());
        // Captain class for the same identity has its own (larger) limit.
        assert!(limiter
            .check("10.0.0.1", EndpointClass::Captain)
            .is_allowed());
    }
}
