use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{error, info};

use super::{MailError, Mailer, OutgoingEmail, SendReceipt};
use crate::config::SmtpConfig;

/// Mailer delivering through an SMTP relay. Constructed once at startup;
/// the transport pools connections internally.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    host: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|err| MailError::Delivery(err.to_string()))?;

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(config.user.clone(), config.pass.clone()))
            .build();

        let from: Mailbox = config
            .from_email
            .parse()
            .map_err(|err| MailError::Delivery(format!("invalid sender address: {}", err)))?;

        info!(
            "Initialized SMTP mailer: {}:{} ({})",
            config.host,
            config.port,
            if config.secure { "TLS" } else { "STARTTLS" }
        );

        Ok(Self {
            transport,
            from,
            host: config.host.clone(),
        })
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<(Message, String), MailError> {
        let message_id = format!("<{}@{}>", uuid::Uuid::new_v4(), self.host);

        let mut builder = Message::builder()
            .from(self.from.clone())
            .message_id(Some(message_id.clone()))
            .subject(&email.subject);

        for recipient in &email.to {
            let mailbox: Mailbox = recipient.parse().map_err(|err| {
                MailError::Delivery(format!("invalid recipient {:?}: {}", recipient, err))
            })?;
            builder = builder.to(mailbox);
        }

        let message = builder
            .multipart(MultiPart::alternative_plain_html(
                email.text.clone(),
                email.html.clone(),
            ))
            .map_err(|err| MailError::Delivery(err.to_string()))?;

        Ok((message, message_id))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt, MailError> {
        let (message, message_id) = self.build_message(email)?;

        self.transport.send(message).await.map_err(|err| {
            error!("SMTP delivery failed: {}", err);
            MailError::Delivery(err.to_string())
        })?;

        info!(
            "Email accepted for {} recipient(s), message id {}",
            email.to.len(),
            message_id
        );
        Ok(SendReceipt { message_id })
    }
}
