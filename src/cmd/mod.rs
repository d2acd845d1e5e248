//! Command handlers for the src-slim CLI
//!
//! Each submodule handles a specific CLI command.

pub mod completions;
pub mod estimate;
pub mod scan;

// Re-export command functions for convenient access
pub use completions::cmd_completions;
pub use estimate::cmd_estimate;
pub use scan::cmd_scan;
