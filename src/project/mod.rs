//! Webpack project on disk: npm/yarn wrapper, file collection and the
//! build pipeline that ties them to the merge engine

pub mod manifest;
pub mod npm;
pub mod pipeline;
pub mod storage;

pub use npm::{NpmProject, PackageTool};
pub use pipeline::{BuildPipeline, BundleStage, TemplateStage};
pub use storage::{CollectReport, FileStorage};
