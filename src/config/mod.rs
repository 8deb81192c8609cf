pub mod env;
mod loader;

pub use env::{ApiConfig, AppConfig, DirectoryConfig, FallbackConfig};
pub use loader::load_config;
