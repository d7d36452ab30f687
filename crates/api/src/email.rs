//! Transactional email delivery via SMTP.
//!
//! [`Mailer`] wraps the `lettre` async SMTP transport to send plain-text
//! account and booking emails. Configuration is loaded from environment
//! variables; if `SMTP_HOST` is not set, [`EmailConfig::from_env`] returns
//! `None`, no mailer is constructed, and callers log the link they would
//! have mailed instead (local development mode).

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

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@playground.dev";

/// Configuration for the SMTP mailer.
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
    /// | Variable        | Required | Default                   |
    /// |-----------------|----------|---------------------------|
    /// | `SMTP_HOST`     | yes      | —                         |
    /// | `SMTP_PORT`     | no       | `587`                     |
    /// | `SMTP_FROM`     | no       | `noreply@playground.dev`  |
    /// | `SMTP_USER`     | no       | —                         |
    /// | `SMTP_PASSWORD` | no       | —                         |
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

// ---------------------------------------------------------------------------
// Mailer
// ---------------------------------------------------------------------------

/// Details embedded in a booking confirmation email.
#[derive(Debug)]
pub struct BookingEmail<'a> {
    pub playground_name: &'a str,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub total_amount: f64,
    /// Deep link to the booking in the frontend dashboard.
    pub booking_url: String,
}

/// Sends account and booking emails via SMTP.
pub struct Mailer {
    config: EmailConfig,
}

impl Mailer {
    /// Create a new mailer with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Send the address-verification email issued at registration.
    pub async fn send_verification_email(
        &self,
        to_email: &str,
        name: &str,
        verification_url: &str,
    ) -> Result<(), EmailError> {
        let body = format!(
            "Hello {name},\n\n\
             Thank you for registering with PlayRental. Please verify your \
             email address by opening the link below:\n\n\
             {verification_url}\n\n\
             If you didn't create an account with us, you can safely ignore \
             this email.\n\n\
             Best regards,\nThe PlayRental Team\n"
        );

        self.deliver(to_email, "Verify your email address", body)
            .await
    }

    /// Send the booking confirmation email after a successful payment.
    pub async fn send_booking_confirmation(
        &self,
        to_email: &str,
        name: &str,
        details: &BookingEmail<'_>,
    ) -> Result<(), EmailError> {
        let body = format!(
            "Hello {name},\n\n\
             Your booking has been confirmed. Here are the details:\n\n\
             Playground: {}\n\
             Date: {}\n\
             Time: {} - {}\n\
             Total Amount: {:.2} EGP\n\n\
             View your booking: {}\n\n\
             Thank you for using PlayRental!\n\n\
             Best regards,\nThe PlayRental Team\n",
            details.playground_name,
            details.date,
            details.start_time,
            details.end_time,
            details.total_amount,
            details.booking_url,
        );

        self.deliver(to_email, "Booking Confirmation", body).await
    }

    /// Assemble and send a plain-text message over the configured transport.
    async fn deliver(
        &self,
        to_email: &str,
        subject: &str,
        body: String,
    ) -> Result<(), EmailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(to = to_email, subject, "Email sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
