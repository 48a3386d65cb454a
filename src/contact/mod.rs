//! Consultation inquiry handling
//!
//! Validation and throttling for the contact form. The mail transport itself
//! is behind [`ContactSink`]; the default sink just logs the inquiry so the
//! endpoint works without mail credentials.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use thiserror::Error;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// A consultation inquiry submitted through the contact form
#[derive(Debug, Clone, Deserialize)]
pub struct Inquiry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Contact form failures surfaced to the submitter
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("{0}")]
    Validation(String),
    #[error("Too many requests. Please try again later.")]
    RateLimited,
}

impl Inquiry {
    /// Require name, email, and message; email must look like an address
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.message.trim().is_empty()
        {
            return Err(ContactError::Validation(
                "Name, email, and message are required.".to_string(),
            ));
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(ContactError::Validation(
                "Invalid email address.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Counter store keyed by submitter identity
///
/// Injected into the server so tests can swap in a permissive or
/// pre-saturated limiter, and production can back it with a shared store.
pub trait RateLimiter: Send + Sync {
    /// Record one attempt for `key`; false when the key is over its budget
    fn check(&self, key: &str) -> bool;
}

/// Best-effort in-process fixed-window limiter
pub struct FixedWindowLimiter {
    limit: u32,
    window: Duration,
    entries: Mutex<HashMap<String, WindowEntry>>,
}

struct WindowEntry {
    count: u32,
    reset: Instant,
}

impl FixedWindowLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl RateLimiter for FixedWindowLimiter {
    fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        match entries.get_mut(key) {
            Some(entry) if now < entry.reset => {
                if entry.count >= self.limit {
                    return false;
                }
                entry.count += 1;
                true
            }
            _ => {
                entries.insert(
                    key.to_string(),
                    WindowEntry {
                        count: 1,
                        reset: now + self.window,
                    },
                );
                true
            }
        }
    }
}

/// Destination for validated inquiries (mail transport lives outside
/// this crate)
pub trait ContactSink: Send + Sync {
    fn deliver(&self, inquiry: &Inquiry) -> anyhow::Result<()>;
}

/// Sink that records the inquiry in the log, used when no mail transport
/// is configured
pub struct LogSink;

impl ContactSink for LogSink {
    fn deliver(&self, inquiry: &Inquiry) -> anyhow::Result<()> {
        tracing::info!(
            name = %inquiry.name,
            email = %inquiry.email,
            phone = inquiry.phone.as_deref().unwrap_or("-"),
            service = inquiry.service.as_deref().unwrap_or("-"),
            message = %inquiry.message,
            "New consultation inquiry"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inquiry(name: &str, email: &str, message: &str) -> Inquiry {
        Inquiry {
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            service: None,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_valid_inquiry() {
        let i = inquiry("Mina", "mina@example.com", "I would like a consultation.");
        assert!(i.validate().is_ok());
    }

    #[test]
    fn test_missing_required_fields() {
        assert!(matches!(
            inquiry("", "mina@example.com", "hello").validate(),
            Err(ContactError::Validation(_))
        ));
        assert!(matches!(
            inquiry("Mina", "", "hello").validate(),
            Err(ContactError::Validation(_))
        ));
        assert!(matches!(
            inquiry("Mina", "mina@example.com", "  ").validate(),
            Err(ContactError::Validation(_))
        ));
    }

    #[test]
    fn test_malformed_email() {
        for bad in ["plain", "no@dot", "spaces in@mail.com", "@host.com"] {
            let err = inquiry("Mina", bad, "hello").validate().unwrap_err();
            assert!(matches!(err, ContactError::Validation(m) if m.contains("email")));
        }
    }

    #[test]
    fn test_limiter_allows_up_to_limit() {
        let limiter = FixedWindowLimiter::new(3, Duration::from_secs(60));
        assert!(limiter.check("1.2.3.4"));
        assert!(limiter.check("1.2.3.4"));
        assert!(limiter.check("1.2.3.4"));
        assert!(!limiter.check("1.2.3.4"));
        // Other identities are unaffected
        assert!(limiter.check("5.6.7.8"));
    }

    #[test]
    fn test_limiter_resets_after_window() {
        let limiter = FixedWindowLimiter::new(1, Duration::from_millis(10));
        assert!(limiter.check("k"));
        assert!(!limiter.check("k"));
        std::thread::sleep(Duration::from_millis(20));
        assert!(limiter.check("k"));
    }
}
