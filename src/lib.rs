pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod manifest;
pub mod ui;

pub use domain::{evaluate, BranchRule, BranchVersionPolicy, Verdict};
pub use error::{GuardError, Result};
