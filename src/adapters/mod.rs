// Adapters - External system implementations

pub mod cutlist_http;
pub mod progress_log;
pub mod toml_config;

// Re-export adapters
pub use cutlist_http::{CutlistAtAdapter, CutlistServerConfig};
pub use progress_log::TracingProgressAdapter;
pub use toml_config::TomlConfigAdapter;
