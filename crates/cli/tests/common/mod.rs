//! Common utilities for integration tests

pub mod fixtures;

// Re-export commonly used items
pub use cli::DenCommand;
pub use fixtures::TestProject;
