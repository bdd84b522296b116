// Adapters layer: concrete implementations for external systems (CRM webhook, local file tree).

pub mod structure;
pub mod webhook;
