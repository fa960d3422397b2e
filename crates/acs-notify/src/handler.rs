//! The change-event handler: one notification email per inserted message.
//!
//! Fire-and-forget by design. A delivery failure propagates so the caller's
//! runtime can log and retry the batch; the handler itself never retries
//! and keeps no state.

use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::event::{ContactMessage, Event, EventKind};
use crate::mailer::{Mailer, OutboundEmail};

/// Process one delivered batch, sending a notification for every inserted
/// message. Returns the number of emails sent.
///
/// Records that are not inserts, and inserts the store delivered without
/// the document image, are skipped.
///
/// # Errors
///
/// Propagates the first delivery failure. Already-sent emails in the batch
/// stay sent; deduplication on redelivery is the recipient's problem, by
/// the same logic a human applies to a duplicate contact email.
pub async fn handle_event(event: &Event, mailer: &dyn Mailer, config: &Config) -> Result<usize> {
    let mut sent = 0;

    for record in &event.records {
        if record.kind != EventKind::Insert {
            continue;
        }
        let Some(message) = &record.message else {
            warn!("insert record delivered without a message document, skipping");
            continue;
        };

        mailer.send(&compose(message, config)).await?;
        sent += 1;
    }

    info!(records = event.records.len(), sent, "processed event batch");
    Ok(sent)
}

/// Compose the notification for one stored message.
fn compose(message: &ContactMessage, config: &Config) -> OutboundEmail {
    OutboundEmail {
        to: config.destination.clone(),
        from: config.source.clone(),
        reply_to: message.email.clone(),
        subject: format!("{}{}", config.subject_prefix, message.subject),
        body: format!("{} wrote:\n\n{}", message.email, message.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::event::EventRecord;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every email instead of sending; optionally fails.
    struct RecordingMailer {
        sent: Mutex<Vec<OutboundEmail>>,
        fail: bool,
    }

    impl RecordingMailer {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn sent(&self) -> Vec<OutboundEmail> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: &OutboundEmail) -> Result<()> {
            if self.fail {
                return Err(Error::Rejected {
                    status: 500,
                    body: "simulated".to_string(),
                });
            }
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }

    fn config() -> Config {
        Config {
            destination: "owner@example.com".to_string(),
            source: "noreply@example.com".to_string(),
            api_endpoint: "https://mail.example.com/v1/send".to_string(),
            ..Config::default()
        }
    }

    fn message() -> ContactMessage {
        ContactMessage {
            email: "pilot@example.com".to_string(),
            subject: "Holding entries".to_string(),
            message: "The parallel entry diagram helped a lot.".to_string(),
        }
    }

    fn insert(message: ContactMessage) -> EventRecord {
        EventRecord {
            kind: EventKind::Insert,
            message: Some(message),
        }
    }

    #[tokio::test]
    async fn test_insert_sends_one_email() {
        let mailer = RecordingMailer::new();
        let event = Event {
            records: vec![insert(message())],
        };

        let sent = handle_event(&event, &mailer, &config()).await.unwrap();
        assert_eq!(sent, 1);

        let emails = mailer.sent();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].to, "owner@example.com");
        assert_eq!(emails[0].from, "noreply@example.com");
        assert_eq!(emails[0].reply_to, "pilot@example.com");
        assert_eq!(
            emails[0].subject,
            "Instrument ACS contact: Holding entries"
        );
        assert_eq!(
            emails[0].body,
            "pilot@example.com wrote:\n\nThe parallel entry diagram helped a lot."
        );
    }

    #[tokio::test]
    async fn test_non_insert_records_send_nothing() {
        let mailer = RecordingMailer::new();
        let event = Event {
            records: vec![
                EventRecord {
                    kind: EventKind::Modify,
                    message: Some(message()),
                },
                EventRecord {
                    kind: EventKind::Remove,
                    message: None,
                },
                EventRecord {
                    kind: EventKind::Other,
                    message: None,
                },
            ],
        };

        let sent = handle_event(&event, &mailer, &config()).await.unwrap();
        assert_eq!(sent, 0);
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_insert_without_payload_is_skipped() {
        let mailer = RecordingMailer::new();
        let event = Event {
            records: vec![
                EventRecord {
                    kind: EventKind::Insert,
                    message: None,
                },
                insert(message()),
            ],
        };

        let sent = handle_event(&event, &mailer, &config()).await.unwrap();
        assert_eq!(sent, 1);
    }

    #[tokio::test]
    async fn test_delivery_failure_propagates() {
        let mailer = RecordingMailer::failing();
        let event = Event {
            records: vec![insert(message())],
        };

        let err = handle_event(&event, &mailer, &config()).await.unwrap_err();
        assert!(matches!(err, Error::Rejected { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_batch_sends_one_email_per_insert() {
        let mailer = RecordingMailer::new();
        let mut second = message();
        second.subject = "DME arcs".to_string();
        let event = Event {
            records: vec![insert(message()), insert(second)],
        };

        let sent = handle_event(&event, &mailer, &config()).await.unwrap();
        assert_eq!(sent, 2);
        assert_eq!(mailer.sent()[1].subject, "Instrument ACS contact: DME arcs");
    }
}
