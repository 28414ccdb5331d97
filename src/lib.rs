//! packweave - compose webpack projects out of independently authored bundles
//!
//! The core is [`merge`]: it folds an ordered list of [`bundle::Bundle`]s into
//! one [`merge::ProjectDescriptor`], rejecting duplicate entry points and
//! aliases, mismatched dependency ranges, and copy instructions that leave the
//! allowed paths. [`project`] writes the result to disk and drives npm or yarn.

pub mod bundle;
pub mod config;
pub mod error;
pub mod merge;
pub mod path_utils;
pub mod progress;
pub mod project;
