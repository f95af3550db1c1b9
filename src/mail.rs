//! Outbound mail via the configured SMTP relay.

use crate::config::MailConfig;
use crate::error::AppError;
use lettre::{
    message::Mailbox,
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

/// Build an async STARTTLS transport for the configured relay.
pub fn transport(config: &MailConfig) -> Result<AsyncSmtpTransport<Tokio1Executor>, AppError> {
    let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server)
        .map_err(|e| AppError::Internal(format!("SMTP transport error: {}", e)))?
        .port(config.port)
        .credentials(Credentials::new(
            config.username.clone(),
            config.password.clone(),
        ))
        .build();
    Ok(transport)
}

/// Compose the fixed-body test message addressed to `to`.
///
/// A malformed recipient address is a validation error, not an internal one.
pub fn build_test_message(config: &MailConfig, to: &str) -> Result<Message, AppError> {
    let from: Mailbox = format!("{} <{}>", config.from_name, config.from)
        .parse()
        .map_err(|e| AppError::Internal(format!("Invalid MAIL_FROM address: {}", e)))?;
    let to: Mailbox = to
        .parse()
        .map_err(|e| AppError::Validation(format!("Invalid recipient address: {}", e)))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject("Student Information System: test email")
        .body("This is a test email from the Student Information System backend.".to_string())
        .map_err(|e| AppError::Internal(format!("Failed to build message: {}", e)))
}

/// Hand a message to the relay.
pub async fn send(
    transport: &AsyncSmtpTransport<Tokio1Executor>,
    message: Message,
) -> Result<(), AppError> {
    transport
        .send(message)
        .await
        .map_err(|e| AppError::Internal(format!("SMTP send error: {}", e)))?;
    Ok(())
}
