//! sobject Core Library
//!
//! This crate provides the foundational utilities for the sobject CLI:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management
//! - Salesforce DX project discovery

pub mod config;
pub mod error;
pub mod logging;
pub mod project;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use project::{find_project_root, PackageDirectory, SfProject};
