use std::str::FromStr;
use std::time::Duration;

use anyhow::Context as _;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{error, info};

use crate::domain::repository::MailSender;
use crate::domain::types::OTP_TTL_SECS;
use crate::error::AuthServiceError;

pub const OTP_SUBJECT: &str = "Password Reset OTP";

/// SMTP connection settings, split out of `AuthConfig` so tests can build one.
#[derive(Debug, Clone)]
pub struct MailSettings {
    pub host: String,
    pub port: u16,
    /// Implicit TLS when `true`, STARTTLS otherwise.
    pub secure: bool,
    pub username: String,
    pub password: String,
    pub from: String,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct SmtpMailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    timeout: Duration,
}

impl SmtpMailSender {
    /// Builds the transport without connecting; the first send opens the connection.
    pub fn new(settings: &MailSettings) -> anyhow::Result<Self> {
        let builder = if settings.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
        }
        .with_context(|| format!("invalid SMTP host {}", settings.host))?;

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .timeout(Some(settings.timeout))
            .build();

        let from = Mailbox::from_str(&settings.from)
            .with_context(|| format!("invalid SMTP_FROM mailbox {}", settings.from))?;

        Ok(Self {
            transport,
            from,
            timeout: settings.timeout,
        })
    }

    fn build_message(&self, to: &str, code: &str) -> anyhow::Result<Message> {
        let to = Mailbox::from_str(to).context("invalid recipient mailbox")?;
        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(OTP_SUBJECT)
            .multipart(MultiPart::alternative_plain_html(
                render_otp_text(code),
                render_otp_html(code),
            ))
            .context("build reset code email")
    }
}

impl MailSender for SmtpMailSender {
    async fn send_otp(&self, to: &str, code: &str) -> Result<(), AuthServiceError> {
        let message = self.build_message(to, code).map_err(|e| {
            error!(error = %format!("{e:#}"), to, "failed to build reset code email");
            AuthServiceError::DeliveryFailed
        })?;

        match tokio::time::timeout(self.timeout, self.transport.send(message)).await {
            Ok(Ok(response)) => {
                info!(to, smtp_code = %response.code(), "reset code email sent");
                Ok(())
            }
            Ok(Err(e)) => {
                error!(error = %e, to, "SMTP send failed");
                Err(AuthServiceError::DeliveryFailed)
            }
            Err(_) => {
                error!(to, timeout_secs = self.timeout.as_secs(), "SMTP send timed out");
                Err(AuthServiceError::DeliveryFailed)
            }
        }
    }
}

fn ttl_minutes() -> i64 {
    OTP_TTL_SECS / 60
}

pub fn render_otp_text(code: &str) -> String {
    format!(
        "Password Reset Request\n\n\
         You have requested to reset your password. Please use the following OTP to proceed:\n\n\
         {code}\n\n\
         This OTP will expire in {} minutes.\n\
         If you didn't request this password reset, please ignore this email.\n",
        ttl_minutes()
    )
}

pub fn render_otp_html(code: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #333;">Password Reset Request</h2>
  <p>You have requested to reset your password. Please use the following OTP to proceed:</p>
  <div style="background-color: #f4f4f4; padding: 20px; text-align: center; font-size: 24px; letter-spacing: 5px; margin: 20px 0;">
    <strong>{code}</strong>
  </div>
  <p>This OTP will expire in {} minutes.</p>
  <p>If you didn't request this password reset, please ignore this email.</p>
</div>"#,
        ttl_minutes()
    )
}
