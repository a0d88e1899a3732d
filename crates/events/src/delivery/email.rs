//! Email notification delivery via SMTP.
//!
//! [`EmailNotifier`] subscribes to the event bus and sends a plain-text
//! email to the assigned staff member whenever an assignment is created.
//! Configuration is loaded from environment variables; if `SMTP_HOST` is
//! not set, [`EmailConfig::from_env`] returns `None` and no notifier
//! should be started. Delivery is best-effort: a send failure is logged
//! and never surfaces to the request that triggered it.

use focal_core::audit::event_types;
use focal_db::repositories::StaffRepo;
use focal_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::OpsEvent;

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

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@focal.local";

/// Configuration for the SMTP email delivery service.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
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
    /// | Variable        | Required | Default              |
    /// |-----------------|----------|----------------------|
    /// | `SMTP_HOST`     | yes      | --                   |
    /// | `SMTP_PORT`     | no       | `587`                |
    /// | `SMTP_FROM`     | no       | `noreply@focal.local`|
    /// | `SMTP_USER`     | no       | --                   |
    /// | `SMTP_PASSWORD` | no       | --                   |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

/// Sends assignment notification emails for ops events via SMTP.
pub struct EmailNotifier {
    pool: DbPool,
    config: EmailConfig,
}

impl EmailNotifier {
    /// Create a new notifier with the given configuration.
    pub fn new(pool: DbPool, config: EmailConfig) -> Self {
        Self { pool, config }
    }

    /// Run the notification loop until the event bus is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<OpsEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if event.event_type == event_types::ASSIGNMENT_CREATED {
                        self.notify_assignment(&event).await;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Email notifier lagged, events skipped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, email notifier shutting down");
                    break;
                }
            }
        }
    }

    /// Look up the assigned staff member and send them an email.
    async fn notify_assignment(&self, event: &OpsEvent) {
        let Some(staff_id) = event.payload.get("staff_id").and_then(|v| v.as_i64()) else {
            tracing::warn!(event_type = %event.event_type, "Assignment event without staff_id");
            return;
        };

        let staff = match StaffRepo::find_by_id(&self.pool, staff_id).await {
            Ok(Some(staff)) => staff,
            Ok(None) => {
                tracing::warn!(staff_id, "Assignment notification for unknown staff member");
                return;
            }
            Err(e) => {
                tracing::error!(error = %e, staff_id, "Staff lookup failed for notification");
                return;
            }
        };

        let address = event
            .payload
            .get("address")
            .and_then(|v| v.as_str())
            .unwrap_or("a new listing");

        if let Err(e) = self.send(&staff.email, &staff.name, address).await {
            tracing::warn!(
                error = %e,
                staff_id,
                "Assignment email failed (primary mutation unaffected)"
            );
        }
    }

    /// Send one plain-text assignment email.
    async fn send(&self, to_email: &str, staff_name: &str, address: &str) -> Result<(), EmailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let body = format!(
            "Hi {staff_name},\n\nYou have been assigned to a shoot at {address}.\n\
             Check the ops console for details.\n"
        );

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(format!("[Focal] New assignment: {address}"))
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(password)) = (&self.config.smtp_user, &self.config.smtp_password)
        {
            builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
        }

        let transport = builder.build();
        transport.send(email).await?;
        Ok(())
    }
}
