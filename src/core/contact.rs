use crate::domain::model::{ContactRequest, ContactResponse, Lead};
use crate::domain::ports::LeadSink;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{is_valid_email, validate_max_length};
use chrono::Utc;

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_EMAIL_LEN: usize = 320;
pub const MAX_MESSAGE_LEN: usize = 5000;
pub const MAX_SHORT_FIELD_LEN: usize = 200;

pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent. We'll be in touch soon.";

fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Validates a contact request and turns it into a [`Lead`].
pub fn build_lead(request: &ContactRequest, source: &str) -> Result<Lead> {
    let required = (
        trimmed(&request.name),
        trimmed(&request.email),
        trimmed(&request.message),
    );
    let (name, email, message) = match required {
        (Some(name), Some(email), Some(message)) => (name, email, message),
        (name, email, message) => {
            let missing: Vec<&str> = [
                ("name", name.is_none()),
                ("email", email.is_none()),
                ("message", message.is_none()),
            ]
            .into_iter()
            .filter(|(_, absent)| *absent)
            .map(|(field, _)| field)
            .collect();
            return Err(SiteError::validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }
    };

    validate_max_length("name", &name, MAX_NAME_LEN)?;
    validate_max_length("email", &email, MAX_EMAIL_LEN)?;
    validate_max_length("message", &message, MAX_MESSAGE_LEN)?;
    if !is_valid_email(&email) {
        return Err(SiteError::validation("Invalid email address"));
    }

    let company = trimmed(&request.company);
    let phone = trimmed(&request.phone);
    let interest = trimmed(&request.interest);
    for (field, value) in [("company", &company), ("phone", &phone), ("interest", &interest)] {
        if let Some(value) = value {
            validate_max_length(field, value, MAX_SHORT_FIELD_LEN)?;
        }
    }

    Ok(Lead {
        name,
        email,
        company,
        phone,
        message,
        interest,
        source: source.to_string(),
        submitted_at: Utc::now(),
    })
}

pub struct ContactService<S: LeadSink> {
    sink: S,
    source: String,
}

impl<S: LeadSink> ContactService<S> {
    pub fn new(sink: S, source: impl Into<String>) -> Self {
        Self {
            sink,
            source: source.into(),
        }
    }

    pub async fn submit(&self, request: &ContactRequest) -> Result<ContactResponse> {
        let lead = build_lead(request, &self.source)?;
        tracing::info!(
            interest = lead.interest.as_deref().unwrap_or("-"),
            "📨 Forwarding contact submission"
        );

        self.sink.submit(&lead).await?;

        Ok(ContactResponse {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
        })
    }
}
