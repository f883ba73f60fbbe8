//! Fire-and-forget email notification for new contact messages.
//!
//! [`ContactNotifier`] decouples email delivery from the request path:
//! the contact handler enqueues the persisted message onto a bounded
//! channel and returns immediately; a single background task drains the
//! channel and talks SMTP. Delivery gets at most one attempt per
//! message -- failures (transport errors, bad addresses, a full queue)
//! are logged and dropped, never surfaced to the original caller, and
//! never touch the already-committed row.

use edifica_db::models::contact_message::ContactMessage;
use tokio::sync::mpsc;

/// Capacity of the pending-notification queue. A burst beyond this
/// drops notifications (logged), not requests.
const QUEUE_CAPACITY: usize = 64;

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@edifica.local";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Configuration for the SMTP email delivery service.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Operator address that receives contact notifications.
    pub notify_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable           | Required | Default                  |
    /// |--------------------|----------|--------------------------|
    /// | `SMTP_HOST`        | yes      | --                       |
    /// | `SMTP_PORT`        | no       | `587`                    |
    /// | `SMTP_FROM`        | no       | `noreply@edifica.local`  |
    /// | `CONTACT_NOTIFY_TO`| no       | value of `SMTP_FROM`     |
    /// | `SMTP_USER`        | no       | --                       |
    /// | `SMTP_PASSWORD`    | no       | --                       |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        let from_address =
            std::env::var("SMTP_FROM").unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string());
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            notify_address: std::env::var("CONTACT_NOTIFY_TO")
                .unwrap_or_else(|_| from_address.clone()),
            from_address,
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// ContactNotifier
// ---------------------------------------------------------------------------

/// Hands contact messages to a background delivery task.
///
/// When SMTP is not configured the notifier is inert: `notify` is a
/// logged no-op and no task is spawned.
pub struct ContactNotifier {
    tx: Option<mpsc::Sender<ContactMessage>>,
}

impl ContactNotifier {
    /// Start the notifier, spawning the delivery task if SMTP is
    /// configured.
    pub fn start(config: Option<EmailConfig>) -> Self {
        let Some(config) = config else {
            tracing::info!("SMTP not configured; contact notifications disabled");
            return Self { tx: None };
        };

        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        tokio::spawn(deliver_loop(config, rx));
        Self { tx: Some(tx) }
    }

    /// An inert notifier for contexts without a tokio runtime at
    /// construction time (tests).
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// Enqueue a notification for a freshly created message.
    ///
    /// Never blocks and never fails the caller: a full or closed queue
    /// drops the notification with a log line.
    pub fn notify(&self, message: ContactMessage) {
        let Some(tx) = &self.tx else {
            return;
        };
        if let Err(e) = tx.try_send(message) {
            tracing::warn!(error = %e, "Contact notification queue rejected message");
        }
    }
}

/// Background task: drain the queue, one delivery attempt per message.
async fn deliver_loop(config: EmailConfig, mut rx: mpsc::Receiver<ContactMessage>) {
    while let Some(message) = rx.recv().await {
        let id = message.id;
        if let Err(e) = send_notification(&config, &message).await {
            tracing::error!(contact_message_id = id, error = %e, "Failed to send contact notification");
        }
    }
}

/// Compose and send the operator notification for one contact message.
async fn send_notification(
    config: &EmailConfig,
    message: &ContactMessage,
) -> Result<(), EmailError> {
    use lettre::{
        message::header::ContentType, transport::smtp::authentication::Credentials,
        AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    };

    let full_name = format!("{} {}", message.first_name, message.last_name);
    let subject_line = if message.subject.is_empty() {
        "Website inquiry"
    } else {
        &message.subject
    };
    let phone = if message.phone.is_empty() {
        "Not provided"
    } else {
        &message.phone
    };

    let subject = format!("New lead: {subject_line} - {full_name}");
    let body = format!(
        "Name: {full_name}\nEmail: {}\nPhone: {phone}\nSubject: {subject_line}\n\n{}",
        message.email, message.message,
    );

    let email = Message::builder()
        .from(config.from_address.parse()?)
        .reply_to(message.email.parse()?)
        .to(config.notify_address.parse()?)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body)
        .map_err(|e| EmailError::Build(e.to_string()))?;

    let mut transport_builder =
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);

    if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
        transport_builder =
            transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
    }

    let mailer = transport_builder.build();
    mailer.send(email).await?;

    tracing::info!(
        contact_message_id = message.id,
        to = %config.notify_address,
        "Contact notification email sent"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_returns_none_without_smtp_host() {
        std::env::remove_var("SMTP_HOST");
        assert!(EmailConfig::from_env().is_none());
    }

    #[test]
    fn disabled_notifier_drops_quietly() {
        let notifier = ContactNotifier::disabled();
        let message = ContactMessage {
            id: 1,
            first_name: "Ana".into(),
            last_name: "Pérez".into(),
            email: "ana@example.com".into(),
            phone: String::new(),
            subject: String::new(),
            message: "Hello".into(),
            is_read: false,
            created_at: chrono::Utc::now(),
        };
        // Must not panic or block without a runtime.
        notifier.notify(message);
    }

    #[test]
    fn email_error_display_build() {
        let err = EmailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }
}
