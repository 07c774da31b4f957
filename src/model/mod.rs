pub mod common;
pub mod config;
pub mod crisis;
pub mod document;
pub mod treaty;

pub use common::*;
pub use config::{Config, LimitsConfig, ProviderConfig, QualityConfig};
pub use crisis::*;
pub use document::ExtractTextResponse;
pub use treaty::*;
