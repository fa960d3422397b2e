//! `acs-notify` - Contact-form notification handler
//!
//! The study site's contact form writes each submission into a datastore;
//! the store delivers change events to this handler, which forwards every
//! newly inserted message as one email to the site owner. Stateless and
//! fire-and-forget: no queue, no retry, no read-back.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod mailer;

pub use config::Config;
pub use error::{Error, Result};
pub use event::{ContactMessage, Event, EventKind, EventRecord};
pub use handler::handle_event;
pub use mailer::{HttpMailer, Mailer, OutboundEmail};
