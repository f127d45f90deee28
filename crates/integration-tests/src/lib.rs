//! Integration tests for Duka.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p duka-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_mutations` - Cart operations, totals, and feedback through the
//!   provider handle
//! - `cart_identity` - Sign-in/sign-out transitions, the anonymous-cart
//!   transfer, and file-backed persistence across restarts
//!
//! Everything runs against local storage backends; no external services are
//! required.

use std::sync::{Arc, Mutex};

use duka_cart::{CueEmitter, NotificationSink, Severity};

/// Notification sink that records every delivery for assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    delivered: Mutex<Vec<(Severity, String, String)>>,
}

impl RecordingSink {
    /// Create a shared recording sink.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Titles of all delivered notifications, in order.
    #[must_use]
    pub fn titles(&self) -> Vec<String> {
        self.delivered
            .lock()
            .map(|d| d.iter().map(|(_, title, _)| title.clone()).collect())
            .unwrap_or_default()
    }

    /// Body of the most recent notification, if any.
    #[must_use]
    pub fn last_body(&self) -> Option<String> {
        self.delivered
            .lock()
            .ok()
            .and_then(|d| d.last().map(|(_, _, body)| body.clone()))
    }

    /// Number of notifications delivered so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.delivered.lock().map(|d| d.len()).unwrap_or(0)
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, severity: Severity, title: &str, body: &str) {
        if let Ok(mut delivered) = self.delivered.lock() {
            delivered.push((severity, title.to_string(), body.to_string()));
        }
    }
}

/// Cue emitter that counts triggers.
#[derive(Debug, Default)]
pub struct CountingCues {
    emitted: Mutex<Vec<duka_cart::Cue>>,
}

impl CountingCues {
    /// Create a shared counting emitter.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of cues emitted so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.emitted.lock().map(|e| e.len()).unwrap_or(0)
    }
}

impl CueEmitter for CountingCues {
    fn emit(&self, cue: duka_cart::Cue) {
        if let Ok(mut emitted) = self.emitted.lock() {
            emitted.push(cue);
        }
    }
}

/// Initialize test logging once per process. Safe to call repeatedly.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("duka_cart=debug")
        .with_test_writer()
        .try_init();
}
