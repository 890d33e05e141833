pub mod templates;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::MailConfig;
use crate::models::Submission;

#[derive(Debug)]
pub struct NotifyError {
    pub message: String,
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for NotifyError {}

impl From<String> for NotifyError {
    fn from(message: String) -> Self {
        NotifyError { message }
    }
}

impl From<&str> for NotifyError {
    fn from(s: &str) -> Self {
        NotifyError {
            message: s.to_string(),
        }
    }
}

/// Tells the administrator about a stored submission. One message per call.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, submission: &Submission) -> Result<(), NotifyError>;
}

pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpNotifier {
    pub fn new(config: &MailConfig) -> Result<Self, String> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| format!("Invalid EMAIL_FROM address: {e}"))?;
        let to: Mailbox = config
            .to
            .parse()
            .map_err(|e| format!("Invalid EMAIL_TO address: {e}"))?;

        let mut builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| format!("SMTP relay error: {e}"))?
        } else {
            let tls = TlsParameters::new(config.host.clone())
                .map_err(|e| format!("SMTP TLS error: {e}"))?;
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                .tls(Tls::Opportunistic(tls))
        };

        builder = builder.port(config.port);
        if let (Some(user), Some(pass)) = (&config.user, &config.pass) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
            to,
        })
    }

    pub fn recipient(&self) -> &Mailbox {
        &self.to
    }

    /// Build the notification without sending it.
    pub fn build_message(&self, submission: &Submission) -> Result<Message, NotifyError> {
        let rendered = templates::render_submission(submission);

        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(rendered.subject);

        // Unparsable submitter addresses only lose the Reply-To header.
        if let Ok(reply_to) = submission.email.parse::<Mailbox>() {
            builder = builder.reply_to(reply_to);
        }

        builder
            .multipart(MultiPart::alternative_plain_html(rendered.text, rendered.html))
            .map_err(|e| NotifyError::from(format!("Failed to build email: {e}")))
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, submission: &Submission) -> Result<(), NotifyError> {
        let message = self.build_message(submission)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotifyError::from(format!("Failed to send email: {e}")))?;

        Ok(())
    }
}
