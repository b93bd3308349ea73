// molscout - multi-agent drug repurposing decision-support demo

pub mod agents;
pub mod config;
pub mod models;
pub mod orchestrator;
pub mod report;
pub mod tui;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use orchestrator::Orchestrator;
pub use types::{AppError, AppResult};
