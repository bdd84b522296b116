use crate::adapters::webhook::{ConfiguredSink, LoggingLeadSink, WebhookLeadSink};
use crate::config::SiteConfig;
use crate::core::catalog::Catalog;
use crate::core::contact::ContactService;
use crate::utils::error::Result;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct StructureSettings {
    pub root: PathBuf,
    pub max_depth: usize,
}

/// Shared, read-only state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub contact: Arc<ContactService<ConfiguredSink>>,
    pub structure: Option<StructureSettings>,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        sink: ConfiguredSink,
        source: &str,
        structure: Option<StructureSettings>,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            contact: Arc::new(ContactService::new(sink, source)),
            structure,
        }
    }

    /// Loads the catalog and wires the lead sink described by `config`.
    pub fn from_config(config: &SiteConfig) -> Result<Self> {
        let catalog = match &config.catalog.path {
            Some(path) => {
                tracing::info!("📚 Loading catalog from {}", path.display());
                Catalog::from_file(path)?
            }
            None => Catalog::builtin()?,
        };
        tracing::info!(
            "Catalog ready: {} case studies, {} services, {} pages",
            catalog.case_studies.len(),
            catalog.services.len(),
            catalog.pages.len()
        );

        let sink = match &config.contact.webhook_url {
            Some(url) => ConfiguredSink::Webhook(WebhookLeadSink::new(
                url.clone(),
                config.contact.api_token.clone(),
                config.webhook_timeout(),
            )?),
            None => {
                tracing::warn!("⚠️ contact.webhook_url not set, contact submissions will only be logged");
                ConfiguredSink::Logging(LoggingLeadSink)
            }
        };

        let structure = config
            .debug
            .component_root
            .as_ref()
            .map(|root| StructureSettings {
                root: root.clone(),
                max_depth: config.debug.max_depth,
            });
        if structure.is_some() {
            tracing::warn!("Component structure endpoint enabled (debug only)");
        }

        Ok(Self::new(catalog, sink, &config.contact.source, structure))
    }
}
