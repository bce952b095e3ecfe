pub mod clash_proxy;
pub mod config;
pub mod error;
pub mod proxy;

pub use clash_proxy::{ConfigEnricher, enrich, enrich_with, verify_references};
pub use config::Settings;
pub use error::{EnrichError, EnrichResult};
