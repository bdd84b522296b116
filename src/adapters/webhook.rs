use crate::domain::model::Lead;
use crate::domain::ports::LeadSink;
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

const MAX_ERROR_BODY_CHARS: usize = 300;

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    event: &'static str,
    lead: &'a Lead,
}

/// Posts leads as JSON to a CRM webhook. No retries.
#[derive(Debug, Clone)]
pub struct WebhookLeadSink {
    client: Client,
    url: String,
    api_token: Option<String>,
}

impl WebhookLeadSink {
    pub fn new(url: String, api_token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url,
            api_token,
        })
    }
}

fn truncate(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        body.to_string()
    } else {
        let cut: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{}…", cut)
    }
}

#[async_trait]
impl LeadSink for WebhookLeadSink {
    async fn submit(&self, lead: &Lead) -> Result<()> {
        tracing::debug!("Posting lead to webhook: {}", self.url);

        let mut request = self.client.post(&self.url).json(&WebhookPayload {
            event: "contact_form",
            lead,
        });
        if let Some(token) = &self.api_token {
            request = request.header(reqwest::header::AUTHORIZATION, token);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Webhook response status: {}", status);

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("webhook request failed")
                .to_string()
        } else {
            truncate(&body)
        };
        tracing::warn!("⚠️ Webhook rejected lead ({}): {}", status, message);

        Err(SiteError::WebhookError {
            status: status.as_u16(),
            message,
        })
    }
}

/// Accepts every lead and only logs it. Used when no webhook is configured.
#[derive(Debug, Clone, Default)]
pub struct LoggingLeadSink;

#[async_trait]
impl LeadSink for LoggingLeadSink {
    async fn submit(&self, lead: &Lead) -> Result<()> {
        tracing::warn!(
            email = %lead.email,
            "No CRM webhook configured, lead only logged"
        );
        Ok(())
    }
}

/// Runtime choice between the real webhook and the logging fallback.
#[derive(Debug, Clone)]
pub enum ConfiguredSink {
    Webhook(WebhookLeadSink),
    Logging(LoggingLeadSink),
}

#[async_trait]
impl LeadSink for ConfiguredSink {
    async fn submit(&self, lead: &Lead) -> Result<()> {
        match self {
            Self::Webhook(sink) => sink.submit(lead).await,
            Self::Logging(sink) => sink.submit(lead).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use httpmock::prelude::*;

    fn lead() -> Lead {
        Lead {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            company: None,
            phone: None,
            message: "Hello".to_string(),
            interest: Some("mobile-apps".to_string()),
            source: "website".to_string(),
            submitted_at: Utc::now(),
        }
    }

    fn sink(url: String, token: Option<&str>) -> WebhookLeadSink {
        WebhookLeadSink::new(url, token.map(str::to_string), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_posts_lead_with_token() {
        let server = MockServer::start();
        let hook = server.mock(|when, then| {
            when.method(POST)
                .path("/hook")
                .header("authorization", "secret-token")
                .json_body_partial(r#"{"event": "contact_form", "lead": {"email": "jane@example.com"}}"#);
            then.status(200).json_body(serde_json::json!({"ok": true}));
        });

        let result = sink(server.url("/hook"), Some("secret-token")).submit(&lead()).await;

        hook.assert();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_error_status_surfaces_body() {
        let server = MockServer::start();
        let hook = server.mock(|when, then| {
            when.method(POST).path("/hook");
            then.status(401).body("Not Authenticated");
        });

        let err = sink(server.url("/hook"), None)
            .submit(&lead())
            .await
            .unwrap_err();

        hook.assert();
        match err {
            SiteError::WebhookError { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Not Authenticated");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_error_body_uses_reason() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/hook");
            then.status(500);
        });

        let err = sink(server.url("/hook"), None)
            .submit(&lead())
            .await
            .unwrap_err();
        assert_eq!(
            err.user_friendly_message(),
            "Failed to submit form: Internal Server Error"
        );
    }

    #[test]
    fn test_truncate_long_body() {
        let long = "e".repeat(MAX_ERROR_BODY_CHARS + 50);
        let cut = truncate(&long);
        assert_eq!(cut.chars().count(), MAX_ERROR_BODY_CHARS + 1);
        assert!(cut.ends_with('…'));
    }

    #[tokio::test]
    async fn test_logging_sink_accepts() {
        tokio_test::assert_ok!(LoggingLeadSink.submit(&lead()).await);
    }
}
