//! Datastore change-event payloads.
//!
//! The contact form writes a message document into the datastore; the store
//! delivers a batch of change records to this handler. Only inserts carry a
//! message worth forwarding — modifications and removals are housekeeping.

use serde::{Deserialize, Serialize};

/// A contact-form message as stored by the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    /// Sender's address, as entered in the form.
    pub email: String,
    /// Subject line, as entered in the form.
    pub subject: String,
    /// Message body, as entered in the form.
    pub message: String,
}

/// What happened to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventKind {
    /// A new message document was written.
    Insert,
    /// An existing document changed.
    Modify,
    /// A document was deleted.
    Remove,
    /// Any kind this handler does not know about. Unknown kinds are
    /// ignored, not errors: the store may grow new ones.
    #[serde(other)]
    Other,
}

/// One change record in a delivered batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// What happened.
    #[serde(rename = "eventName")]
    pub kind: EventKind,
    /// The stored message, present when the store includes the new image
    /// of the document.
    #[serde(default)]
    pub message: Option<ContactMessage>,
}

/// A delivered batch of change records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// The records in the batch, in delivery order.
    #[serde(rename = "Records")]
    pub records: Vec<EventRecord>,
}
