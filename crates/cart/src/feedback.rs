//! Injected feedback capabilities: toast notifications and audio cues.
//!
//! The cart emits user-facing feedback on mutations, but the rendering of a
//! toast or the synthesis of a sound lives in the embedding application.
//! Both capabilities are fire-and-forget: implementations must not block, and
//! their failure must never prevent or roll back a cart mutation.

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Receives user-facing notifications for cart events.
///
/// Implementations must be non-blocking and infallible from the caller's
/// perspective; a sink that cannot deliver should drop the notification.
pub trait NotificationSink: Send + Sync {
    /// Deliver a notification with a short title and a descriptive body.
    fn notify(&self, severity: Severity, title: &str, body: &str);
}

/// A named audio cue tied to a user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Played on every add-to-cart, whether the item is new or incremented.
    ItemAdded,
}

/// Triggers audio cues for cart events.
///
/// Best-effort: an emitter with no working audio backend should silently do
/// nothing.
pub trait CueEmitter: Send + Sync {
    /// Trigger the given cue.
    fn emit(&self, cue: Cue);
}

/// Feedback implementation that discards everything.
///
/// Useful for headless embedders and tests that do not assert on feedback.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl NotificationSink for Silent {
    fn notify(&self, _severity: Severity, _title: &str, _body: &str) {}
}

impl CueEmitter for Silent {
    fn emit(&self, _cue: Cue) {}
}
