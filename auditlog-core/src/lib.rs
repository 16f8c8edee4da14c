//! Formatting of audit log records into display events.
//!
//! [`make_event`] looks up the descriptor for a record's `code` in a registry
//! built once per process and renders a human readable message from whichever
//! fields that event kind carries.

pub mod codes;
pub mod error;
pub mod event;
pub mod formatters;
pub mod metrics;
pub mod raw;
pub mod text;

pub use codes::EventCode;
pub use error::AuditError;
pub use event::{make_event, parse_event, parse_events, NormalizedEvent};
pub use formatters::{lookup, EventDescriptor, UNKNOWN_DESCRIPTOR};
pub use raw::RawEvent;
