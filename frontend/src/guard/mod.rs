//! Client-side gate in front of the lead-capture submission.
//!
//! Checks run in a fixed order: honeypot, field validation, then the
//! persisted rate-limit ledger. Only a `Proceed` decision touches storage
//! for writing, and only a `Proceed` should be followed by a network call.

pub mod ledger;
pub mod validate;

use log::{debug, info};

use crate::config;
use ledger::LedgerStore;
pub use validate::{Field, ValidationResult};

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

pub const RATE_LIMIT_WINDOW_MS: i64 = 60 * 60 * 1000;
pub const RATE_LIMIT_MAX: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterestKind {
    #[default]
    Waitlist,
    Partnership,
}

impl InterestKind {
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("partners") => InterestKind::Partnership,
            _ => InterestKind::Waitlist,
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            InterestKind::Waitlist => "waitlist",
            InterestKind::Partnership => "partners",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InterestKind::Waitlist => "Join the Performance Workshop waitlist",
            InterestKind::Partnership => "Explore an Enterprise Partnership",
        }
    }

    pub fn all() -> [InterestKind; 2] {
        [InterestKind::Waitlist, InterestKind::Partnership]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub email: String,
    pub role: String,
    pub message: String,
    pub interest: InterestKind,
    pub honeypot: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Honeypot was filled. Show success, send nothing.
    SilentAccept,
    Invalid(ValidationResult),
    /// Too many attempts inside the window. `retry_at` is when the window
    /// next has room for an attempt.
    RateLimited { retry_at: Timestamp },
    /// The attempt was recorded; the caller may submit.
    Proceed,
}

pub struct SubmissionGuard<S: LedgerStore> {
    store: S,
    key: String,
    window_ms: i64,
    max_attempts: usize,
}

impl<S: LedgerStore> SubmissionGuard<S> {
    pub fn new(store: S) -> Self {
        Self::with_limits(store, config::LEDGER_KEY, RATE_LIMIT_WINDOW_MS, RATE_LIMIT_MAX)
    }

    pub fn with_limits(store: S, key: &str, window_ms: i64, max_attempts: usize) -> Self {
        Self {
            store,
            key: key.to_string(),
            window_ms,
            max_attempts,
        }
    }

    pub fn evaluate(&mut self, input: &FormInput, now: Timestamp) -> Decision {
        if !input.honeypot.is_empty() {
            info!("Honeypot filled, discarding submission");
            return Decision::SilentAccept;
        }

        let validation = validate::validate(input);
        if !validation.is_valid() {
            debug!(
                "Submission rejected, invalid fields: {:?}",
                validation.fields().map(Field::as_str).collect::<Vec<_>>()
            );
            return Decision::Invalid(validation);
        }

        let mut entries = ledger::load(&self.store, &self.key, now, self.window_ms);
        if entries.len() >= self.max_attempts {
            info!("Submission rate limited ({} in window)", entries.len());
            return Decision::RateLimited {
                retry_at: self.retry_at(&entries, now),
            };
        }

        entries.push(now);
        ledger::save(&mut self.store, &self.key, &entries);
        debug!("Submission allowed ({} in window)", entries.len());
        Decision::Proceed
    }

    // Instant at which enough entries have aged out to admit one more.
    fn retry_at(&self, entries: &[Timestamp], now: Timestamp) -> Timestamp {
        let mut sorted = entries.to_vec();
        sorted.sort_unstable();
        let blocking = sorted.len().checked_sub(self.max_attempts);
        let anchor = blocking.and_then(|i| sorted.get(i)).copied().unwrap_or(now);
        anchor + self.window_ms
    }

    /// Current ledger, pruned relative to `now`.
    #[cfg(test)]
    pub fn ledger(&self, now: Timestamp) -> Vec<Timestamp> {
        ledger::load(&self.store, &self.key, now, self.window_ms)
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::ledger::{LedgerStore, MemoryStore, MockLedgerStore, StorageError};
    use super::{Decision, Field, FormInput, InterestKind, SubmissionGuard, RATE_LIMIT_WINDOW_MS};
    use crate::config::LEDGER_KEY;

    const NOW: i64 = 1_732_000_000_000;
    const MINUTE: i64 = 60 * 1000;

    fn valid() -> FormInput {
        FormInput {
            name: "Jane Smith".to_string(),
            email: "jane@acme.com".to_string(),
            role: "Software Engineer".to_string(),
            message: String::new(),
            interest: InterestKind::Waitlist,
            honeypot: String::new(),
        }
    }

    fn guard_with(raw: &str) -> SubmissionGuard<MemoryStore> {
        SubmissionGuard::new(MemoryStore::with_entry(LEDGER_KEY, raw))
    }

    fn raw_ledger(guard: &SubmissionGuard<MemoryStore>) -> Option<String> {
        guard.store().read(LEDGER_KEY).unwrap()
    }

    #[test]
    fn honeypot_short_circuits_everything() {
        let raw = format!("[{},{},{}]", NOW - 1, NOW - 2, NOW - 3);
        let mut guard = guard_with(&raw);
        let input = FormInput {
            name: String::new(),
            email: "nope".to_string(),
            honeypot: "http://spam.example".to_string(),
            ..FormInput::default()
        };
        assert_eq!(guard.evaluate(&input, NOW), Decision::SilentAccept);
        assert_eq!(raw_ledger(&guard), Some(raw));
    }

    #[test]
    fn honeypot_never_touches_storage() {
        // No expectations: any read or write would panic.
        let mock = MockLedgerStore::new();
        let mut guard = SubmissionGuard::new(mock);
        let input = FormInput {
            honeypot: "x".to_string(),
            ..valid()
        };
        assert_eq!(guard.evaluate(&input, NOW), Decision::SilentAccept);
    }

    #[test]
    fn invalid_lists_exactly_the_failing_fields() {
        let mut guard = SubmissionGuard::new(MemoryStore::new());
        let input = FormInput {
            name: "ab".to_string(),
            email: "bad".to_string(),
            role: "x".to_string(),
            ..FormInput::default()
        };
        match guard.evaluate(&input, NOW) {
            Decision::Invalid(result) => {
                assert_eq!(result.fields().collect::<Vec<_>>(), vec![Field::Email, Field::Role]);
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert_eq!(raw_ledger(&guard), None);
    }

    #[test]
    fn full_window_is_rate_limited_and_unchanged() {
        let raw = format!("[{},{},{}]", NOW - 30 * MINUTE, NOW - 20 * MINUTE, NOW - MINUTE);
        let mut guard = guard_with(&raw);
        assert_eq!(
            guard.evaluate(&valid(), NOW),
            Decision::RateLimited {
                retry_at: NOW - 30 * MINUTE + RATE_LIMIT_WINDOW_MS
            }
        );
        assert_eq!(raw_ledger(&guard), Some(raw));
        assert_eq!(guard.ledger(NOW).len(), 3);
    }

    #[test]
    fn stale_entries_are_pruned_before_counting() {
        let raw = format!("[{},{}]", NOW - 61 * MINUTE, NOW - 10 * MINUTE);
        let mut guard = guard_with(&raw);
        assert_eq!(guard.evaluate(&valid(), NOW), Decision::Proceed);
        assert_eq!(guard.ledger(NOW), vec![NOW - 10 * MINUTE, NOW]);
    }

    #[test]
    fn fourth_attempt_in_a_minute_is_limited() {
        let mut guard = SubmissionGuard::new(MemoryStore::new());
        for i in 0..3 {
            assert_eq!(guard.evaluate(&valid(), NOW + i), Decision::Proceed);
        }
        assert!(matches!(
            guard.evaluate(&valid(), NOW + 3),
            Decision::RateLimited { .. }
        ));
        assert_eq!(guard.ledger(NOW + 3).len(), 3);
    }

    #[test]
    fn limit_clears_once_oldest_entry_ages_out() {
        let mut guard = SubmissionGuard::new(MemoryStore::new());
        for i in 0..3 {
            guard.evaluate(&valid(), NOW + i * MINUTE);
        }
        let later = NOW + RATE_LIMIT_WINDOW_MS;
        assert_eq!(guard.evaluate(&valid(), later), Decision::Proceed);
    }

    #[test]
    fn unreadable_storage_fails_open() {
        let mut mock = MockLedgerStore::new();
        mock.expect_read()
            .returning(|_| Err(StorageError::Unavailable));
        mock.expect_write().times(1).returning(|_, _| Ok(()));
        let mut guard = SubmissionGuard::new(mock);
        assert_eq!(guard.evaluate(&valid(), NOW), Decision::Proceed);
    }

    #[test]
    fn unwritable_storage_fails_open() {
        let mut mock = MockLedgerStore::new();
        mock.expect_read().returning(|_| Ok(None));
        mock.expect_write()
            .returning(|_, _| Err(StorageError::Backend("QuotaExceededError".to_string())));
        let mut guard = SubmissionGuard::new(mock);
        for _ in 0..5 {
            assert_eq!(guard.evaluate(&valid(), NOW), Decision::Proceed);
        }
    }

    #[test]
    fn corrupt_ledger_is_replaced() {
        let mut guard = guard_with("{garbage");
        assert_eq!(guard.evaluate(&valid(), NOW), Decision::Proceed);
        assert_eq!(raw_ledger(&guard), Some(format!("[{}]", NOW)));
    }

    #[test]
    fn overfull_ledger_retries_when_room_opens() {
        let raw = format!(
            "[{},{},{},{}]",
            NOW - 20 * MINUTE,
            NOW - 50 * MINUTE,
            NOW - 30 * MINUTE,
            NOW - 40 * MINUTE
        );
        let mut guard = guard_with(&raw);
        let retry_at = match guard.evaluate(&valid(), NOW) {
            Decision::RateLimited { retry_at } => retry_at,
            other => panic!("expected RateLimited, got {:?}", other),
        };
        assert_eq!(retry_at, NOW + 20 * MINUTE);
        assert!(matches!(
            guard.evaluate(&valid(), retry_at - 1),
            Decision::RateLimited { .. }
        ));
        assert_eq!(guard.evaluate(&valid(), retry_at), Decision::Proceed);
    }

    #[test]
    fn interest_from_query() {
        assert_eq!(InterestKind::from_query(Some("partners")), InterestKind::Partnership);
        assert_eq!(InterestKind::from_query(Some("waitlist")), InterestKind::Waitlist);
        assert_eq!(InterestKind::from_query(Some("other")), InterestKind::Waitlist);
        assert_eq!(InterestKind::from_query(None), InterestKind::Waitlist);
    }
}
