pub mod changelog;
pub mod config;
pub mod error;
pub mod git;
pub mod lockfile;
pub mod orchestrator;
pub mod rewriter;
pub mod ui;
pub mod version;

pub use error::{BumpError, Result};
