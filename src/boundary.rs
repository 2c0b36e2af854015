use std::fmt;

/// Warnings about the inputs of a check.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Neither a flag, the environment nor the repository gave a branch
    NoBranchContext { env_var: String },
    /// Repository detection found a detached `HEAD`
    DetachedHead,
    /// Repository detection was requested but the repository could not be read
    RepositoryUnavailable { reason: String },
    /// No rules are configured, so every branch is treated as non-release
    EmptyRuleSet,
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoBranchContext { env_var } => write!(
                f,
                "No {} in build environment. Ignoring assertions for git branch version semantics",
                env_var
            ),
            BoundaryWarning::DetachedHead => {
                write!(f, "HEAD is detached, cannot determine the current branch")
            }
            BoundaryWarning::RepositoryUnavailable { reason } => {
                write!(f, "Cannot read the git repository: {}", reason)
            }
            BoundaryWarning::EmptyRuleSet => write!(
                f,
                "No branch rules configured; every branch requires a snapshot version"
            ),
        }
    }
}
