// src/services/mailer.rs

//! Mail delivery service.

use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::error::{AppError, Result};
use crate::models::MailConfig;

/// Submission port that upgrades the connection with STARTTLS.
const STARTTLS_PORT: u16 = 587;

/// A plain-text mail ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Delivers mail to a single recipient.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn deliver(&self, mail: &OutgoingMail) -> Result<()>;
}

/// Delivers mail through an authenticated SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build a relay transport from the mail settings.
    ///
    /// Port 587 uses STARTTLS, every other port uses implicit TLS.
    pub fn new(config: &MailConfig) -> Result<Self> {
        config.validate()?;

        let from: Mailbox = config.email_from.parse().map_err(|e| {
            AppError::config(format!("invalid email_from '{}': {e}", config.email_from))
        })?;

        let builder = if config.smtp_port == STARTTLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        }
        .map_err(AppError::mail)?
        .port(config.smtp_port);

        let builder = if config.smtp_user.is_empty() {
            builder
        } else {
            builder.credentials(Credentials::new(
                config.smtp_user.clone(),
                config.smtp_pass.clone(),
            ))
        };

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn deliver(&self, mail: &OutgoingMail) -> Result<()> {
        let to: Mailbox = mail
            .to
            .parse()
            .map_err(|e| AppError::mail(format!("invalid recipient '{}': {e}", mail.to)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(mail.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body.clone())
            .map_err(AppError::mail)?;

        self.transport.send(message).await.map_err(AppError::mail)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail_config() -> MailConfig {
        MailConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_user: "alerts".to_string(),
            smtp_pass: "secret".to_string(),
            email_from: "alerts@example.com".to_string(),
            email_to: "me@example.com".to_string(),
            ..MailConfig::default()
        }
    }

    #[test]
    fn test_new_accepts_valid_config() {
        assert!(SmtpMailer::new(&mail_config()).is_ok());

        let mut config = mail_config();
        config.smtp_port = 587;
        assert!(SmtpMailer::new(&config).is_ok());
    }

    #[test]
    fn test_new_rejects_missing_host() {
        let mut config = mail_config();
        config.smtp_host.clear();
        assert!(matches!(SmtpMailer::new(&config), Err(AppError::Config(_))));
    }

    #[test]
    fn test_new_rejects_invalid_sender() {
        let mut config = mail_config();
        config.email_from = "not an address".to_string();
        assert!(matches!(SmtpMailer::new(&config), Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_deliver_rejects_invalid_recipient() {
        let mailer = SmtpMailer::new(&mail_config()).unwrap();
        let mail = OutgoingMail {
            to: "nobody".to_string(),
            subject: "Jobs monitor alert".to_string(),
            body: "http://x\n".to_string(),
        };
        assert!(matches!(mailer.deliver(&mail).await, Err(AppError::Mail(_))));
    }
}
