use std::fmt;

/// Why a branch/version combination was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationReason {
    /// A release-style branch carries a snapshot / pre-release version
    ReleaseBranchHasSnapshotVersion,
    /// The version pinned by the branch name differs from the project version
    VersionMismatch { expected: String, actual: String },
    /// A branch matching no rule must carry a snapshot version
    NonReleaseBranchRequiresSnapshot,
}

impl ViolationReason {
    /// Stable reason code, suitable for matching in CI logs
    pub fn code(&self) -> &'static str {
        match self {
            ViolationReason::ReleaseBranchHasSnapshotVersion => "ReleaseBranchHasSnapshotVersion",
            ViolationReason::VersionMismatch { .. } => "VersionMismatch",
            ViolationReason::NonReleaseBranchRequiresSnapshot => "NonReleaseBranchRequiresSnapshot",
        }
    }
}

/// A rejected branch/version combination with enough context to explain it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub branch: String,
    /// Name of the matched rule; `None` when no rule matched
    pub rule: Option<String>,
    pub version: String,
    pub reason: ViolationReason,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.reason, &self.rule) {
            (ViolationReason::ReleaseBranchHasSnapshotVersion, rule) => write!(
                f,
                "The current git branch '{}' is defined as a release branch (rule '{}'), \
                 but the project version '{}' is a snapshot version",
                self.branch,
                rule.as_deref().unwrap_or("?"),
                self.version
            )?,
            (ViolationReason::VersionMismatch { expected, actual }, rule) => write!(
                f,
                "The current git branch '{}' (rule '{}') expects the project version to be '{}', \
                 but the project version is '{}'",
                self.branch,
                rule.as_deref().unwrap_or("?"),
                expected,
                actual
            )?,
            (ViolationReason::NonReleaseBranchRequiresSnapshot, _) => write!(
                f,
                "The current git branch '{}' matches no release rule, so the project version \
                 '{}' must be a snapshot version",
                self.branch, self.version
            )?,
        }
        write!(f, " [{}]", self.reason.code())
    }
}

/// Outcome of evaluating a branch/version pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// No branch context was available, nothing could be asserted
    Skipped,
    Valid,
    Invalid(Violation),
}

impl Verdict {
    /// Whether the build step should fail
    pub fn is_failure(&self) -> bool {
        matches!(self, Verdict::Invalid(_))
    }

    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Verdict::Invalid(violation) => Some(violation),
            _ => None,
        }
    }
}
