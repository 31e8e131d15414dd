use chrono::{DateTime, Utc};

/// A domain-agnostic event.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **versioned** (schema evolution)
/// - cheap to clone, so observers can keep copies
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "checkout.payment.declined").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Whether the event reports an unhappy path (a decline, an abort).
    ///
    /// Observers use this to pick a log level; it does not make the event an
    /// error.
    fn is_adverse(&self) -> bool {
        false
    }
}
