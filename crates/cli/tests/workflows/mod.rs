//! Workflow integration tests
//!
//! Each workflow drives several commands and checks what ends up on disk.

pub mod build;
pub mod config;
pub mod pack_unpack;
