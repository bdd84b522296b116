use crate::domain::model::Lead;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Destination for validated contact-form leads (a CRM webhook in production).
#[async_trait]
pub trait LeadSink: Send + Sync {
    async fn submit(&self, lead: &Lead) -> Result<()>;
}
