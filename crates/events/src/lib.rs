//! Domain events and the observer hook used to publish them.
//!
//! Domain code never prints or logs directly: it reports what happened as
//! [`Event`]s to an injected [`Observer`], and the caller decides what to do
//! with them (log, record, ignore).

pub mod event;
pub mod observer;

pub use event::Event;
pub use observer::{NoopObserver, Observer, RecordingObserver, TracingObserver};
