//! Shared domain types and configuration for the market digest event pipeline.

pub mod app_config;
pub mod config;
pub mod error;
pub mod events;
pub mod keywords;
pub mod sources;

pub use app_config::RunConfig;
pub use config::{load_run_config, load_run_config_from_env};
pub use error::ConfigError;
pub use events::{Category, NewsEvent, OfficialEvent, Severity, Species, TemplateId};
pub use keywords::KeywordTable;
pub use sources::{load_sources, FeedSource, Rules, SourcesFile};
