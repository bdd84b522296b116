pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::routes::router;
pub use app::server::Server;
pub use app::state::AppState;
pub use config::SiteConfig;
pub use core::catalog::Catalog;
pub use utils::error::{Result, SiteError};
