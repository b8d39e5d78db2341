use std::env;

// Verified sender domain; overridable for staging via RESEND_FROM_EMAIL.
pub const DEFAULT_SENDER: &str = "Franco Consulting <kontakt@franco-consulting.com>";
pub const DEFAULT_RECIPIENT: &str = "kontakt@franco-consulting.com";

#[derive(Debug, Clone)]
pub struct MailSettings {
    pub api_key: Option<String>,
    pub from_email: String,
    pub to_email: String,
}

impl MailSettings {
    /// A missing API key is not a startup failure: the contact endpoint
    /// reports the misconfiguration per request instead.
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("RESEND_API_KEY").ok().filter(|key| !key.is_empty()),
            from_email: env::var("RESEND_FROM_EMAIL")
                .unwrap_or_else(|_| DEFAULT_SENDER.to_string()),
            to_email: env::var("RESEND_TO_EMAIL")
                .unwrap_or_else(|_| DEFAULT_RECIPIENT.to_string()),
        }
    }
}
