use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

pub mod digest;

use crate::{conf::Settings, prelude::Result};

/// Delivers one plain-text message through the configured relay. The
/// blocking smtp transport runs on the blocking pool; any failure,
/// authentication included, propagates to the caller.
pub async fn send_email(settings: &Settings, to: &str, subject: &str, body: &str) -> Result<()> {
    tracing::debug!("sending email to {}", to);
    let message = Message::builder()
        .from(format!("{} <{}>", &settings.source_name, &settings.from_email).parse()?)
        .to(to.parse()?)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN)
        .body(body.to_string())?;

    let creds = Credentials::new(settings.smtp_user.clone(), settings.smtp_pass.clone());
    let mailer = SmtpTransport::relay(&settings.smtp_server)?
        .port(settings.smtp_port)
        .credentials(creds)
        .build();

    tokio::task::spawn_blocking(move || mailer.send(&message)).await??;
    Ok(())
}
