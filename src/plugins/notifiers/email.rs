use crate::config::{SmtpConfig, SmtpCredentials};
use crate::models::ChangedItem;
use crate::plugins::traits::{NotificationResult, NotifierPlugin};
use crate::plugins::trackers::PriceTracker;
use crate::utils::error::AppError;
use crate::Result;
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

/// Sends one plain-text email per run over an authenticated STARTTLS session.
pub struct EmailNotifier {
    config: SmtpConfig,
    prices: PriceTracker,
}

impl EmailNotifier {
    pub fn new(config: SmtpConfig) -> Self {
        EmailNotifier {
            config,
            prices: PriceTracker::new(),
        }
    }

    fn format_subject(&self, count: usize) -> String {
        format!("[Fry's] Squishmallow price changes ({} item(s))", count)
    }

    fn format_text_body(&self, changes: &[ChangedItem]) -> String {
        changes
            .iter()
            .map(|item| {
                format!(
                    "{} ({})\nOld price: {}\nNew price: {}\nLink: {}\n",
                    item.name,
                    item.size,
                    self.prices.format(item.old_price),
                    self.prices.format(item.price),
                    item.url,
                )
            })
            .collect::<Vec<_>>()
            .join("\n---\n")
    }

    fn build_message(&self, credentials: &SmtpCredentials<'_>, changes: &[ChangedItem]) -> Result<Message> {
        let from: Mailbox = credentials
            .username
            .parse()
            .map_err(|e| AppError::Notify(format!("Invalid sender address: {}", e)))?;
        let to: Mailbox = credentials
            .to_address
            .parse()
            .map_err(|e| AppError::Notify(format!("Invalid recipient address: {}", e)))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(self.format_subject(changes.len()))
            .header(ContentType::TEXT_PLAIN)
            .body(self.format_text_body(changes))
            .map_err(|e| AppError::Notify(format!("Failed to build email: {}", e)))
    }
}

#[async_trait]
impl NotifierPlugin for EmailNotifier {
    async fn notify(&self, changes: &[ChangedItem]) -> Result<NotificationResult> {
        if changes.is_empty() {
            debug!("No price changes, skipping email");
            return Ok(NotificationResult::skipped());
        }

        let Some(credentials) = self.config.credentials() else {
            info!("Email credentials not configured, skipping alert");
            return Ok(NotificationResult::skipped());
        };

        let email = self.build_message(&credentials, changes)?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)
            .map_err(|e| AppError::Notify(format!("Failed to configure SMTP relay: {}", e)))?
            .port(self.config.port)
            .credentials(Credentials::new(
                credentials.username.to_string(),
                credentials.password.to_string(),
            ))
            .build();

        let response = mailer
            .send(email)
            .await
            .map_err(|e| AppError::Notify(format!("SMTP delivery failed: {}", e)))?;

        info!(
            changes = changes.len(),
            to = credentials.to_address,
            code = %response.code(),
            "Sent price change alert"
        );

        Ok(NotificationResult {
            delivered: true,
            message_id: Some(format!("email-{}", chrono::Utc::now().timestamp())),
        })
    }
}
