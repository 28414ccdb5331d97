//! Configuration file handling for packweave
//!
//! This module contains:
//! - `packweave.yaml` - Project configuration
//! - [`Deferred`] - configuration values computed on first use

pub mod deferred;
pub mod project;

pub use deferred::Deferred;
pub use project::{BundleRef, CONFIG_FILE, ProjectConfig};
