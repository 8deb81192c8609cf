pub mod client;
pub mod fallback;
pub mod loader;

pub use client::InsightsApi;
pub use loader::refresh;
