//! Domain logic - pure policy rules independent of git, config files and I/O

pub mod policy;
pub mod rule;
pub mod snapshot;
pub mod verdict;

pub use policy::{evaluate, BranchVersionPolicy};
pub use rule::{BranchRule, CompiledRule, RuleMatch};
pub use snapshot::SnapshotConvention;
pub use verdict::{Verdict, Violation, ViolationReason};
