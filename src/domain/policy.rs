//! Branch-to-version policy evaluation.
//!
//! A branch that fully matches one of the configured rules is "release-style"
//! and must carry a final version, equal to the version its name pins when the
//! rule captures one. Any other branch must carry a snapshot version.

use tracing::debug;

use crate::domain::rule::{compile_rules, BranchRule, CompiledRule, RuleMatch};
use crate::domain::snapshot::SnapshotConvention;
use crate::domain::verdict::{Verdict, Violation, ViolationReason};
use crate::error::Result;

/// Pure evaluator over a compiled, ordered rule list
#[derive(Debug, Clone)]
pub struct BranchVersionPolicy {
    rules: Vec<CompiledRule>,
    snapshot: SnapshotConvention,
}

impl BranchVersionPolicy {
    /// Compile `rules` in order. Fails on the first malformed pattern.
    pub fn new(rules: &[BranchRule], snapshot: SnapshotConvention) -> Result<Self> {
        Ok(BranchVersionPolicy {
            rules: compile_rules(rules)?,
            snapshot,
        })
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    pub fn snapshot_convention(&self) -> &SnapshotConvention {
        &self.snapshot
    }

    /// Find the first rule that fully matches `branch`
    pub fn classify(&self, branch: &str) -> Option<RuleMatch> {
        let matched = self.rules.iter().find_map(|rule| rule.matches(branch));
        if let Some(m) = &matched {
            debug!(branch, rule = %m.rule, pinned = ?m.pinned_version, "branch matched rule");
        } else {
            debug!(branch, "branch matched no rule");
        }
        matched
    }

    /// Evaluate a branch/version pair.
    ///
    /// An absent branch yields [`Verdict::Skipped`] regardless of the version.
    ///
    /// The version is assumed to satisfy
    /// [`SnapshotConvention::validate`]; under the `semver` convention an
    /// unparsable version is classified as a final release. Use
    /// [`try_evaluate`](Self::try_evaluate) to have it checked.
    pub fn evaluate(&self, branch: Option<&str>, version: &str) -> Verdict {
        match branch {
            Some(branch) => self.judge(branch, self.classify(branch), version),
            None => Verdict::Skipped,
        }
    }

    /// Like [`evaluate`](Self::evaluate), but validates the version first
    /// whenever there is a branch to check it against.
    pub fn try_evaluate(&self, branch: Option<&str>, version: &str) -> Result<Verdict> {
        if branch.is_some() {
            self.snapshot.validate(version)?;
        }
        Ok(self.evaluate(branch, version))
    }

    /// Derive the verdict for `branch` from its classification
    pub fn judge(&self, branch: &str, matched: Option<RuleMatch>, version: &str) -> Verdict {
        let is_snapshot = self.snapshot.is_snapshot(version);
        let invalid = |rule: Option<String>, reason| {
            Verdict::Invalid(Violation {
                branch: branch.to_string(),
                rule,
                version: version.to_string(),
                reason,
            })
        };

        match matched {
            Some(RuleMatch {
                rule,
                pinned_version,
            }) => {
                if is_snapshot {
                    return invalid(Some(rule), ViolationReason::ReleaseBranchHasSnapshotVersion);
                }

                match pinned_version {
                    Some(expected) if expected != version.trim() => invalid(
                        Some(rule),
                        ViolationReason::VersionMismatch {
                            expected,
                            actual: version.to_string(),
                        },
                    ),
                    _ => Verdict::Valid,
                }
            }
            None if is_snapshot => Verdict::Valid,
            None => invalid(None, ViolationReason::NonReleaseBranchRequiresSnapshot),
        }
    }
}

/// One-shot evaluation with the Maven snapshot convention
pub fn evaluate(branch: Option<&str>, version: &str, rules: &[BranchRule]) -> Result<Verdict> {
    let policy = BranchVersionPolicy::new(rules, SnapshotConvention::Maven)?;
    Ok(policy.evaluate(branch, version))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gitflow_rules() -> Vec<BranchRule> {
        vec![
            BranchRule::new("main", "^main$"),
            BranchRule::new("release", "^release/(.+)$"),
            BranchRule::new("hotfix", "^hotfix/(.+)$"),
            BranchRule::new("bugfix", "^bugfix/.+$"),
        ]
    }

    fn policy() -> BranchVersionPolicy {
        BranchVersionPolicy::new(&gitflow_rules(), SnapshotConvention::Maven).unwrap()
    }

    #[test]
    fn test_main_with_release_version() {
        assert_eq!(policy().evaluate(Some("main"), "2.3.0"), Verdict::Valid);
    }

    #[test]
    fn test_release_with_snapshot() {
        let verdict = policy().evaluate(Some("release/2.3.0"), "2.3.0-SNAPSHOT");
        let violation = verdict.violation().unwrap();
        assert_eq!(violation.rule.as_deref(), Some("release"));
        assert_eq!(
            violation.reason,
            ViolationReason::ReleaseBranchHasSnapshotVersion
        );
    }

    #[test]
    fn test_release_version_mismatch() {
        let verdict = policy().evaluate(Some("release/2.3.0"), "2.4.0");
        assert_eq!(
            verdict.violation().unwrap().reason,
            ViolationReason::VersionMismatch {
                expected: "2.3.0".to_string(),
                actual: "2.4.0".to_string(),
            }
        );
    }

    #[test]
    fn test_release_version_matches_after_trim() {
        assert_eq!(
            policy().evaluate(Some("release/2.3.0 "), " 2.3.0\n"),
            Verdict::Valid
        );
    }

    #[test]
    fn test_bugfix_without_capture_accepts_any_release_version() {
        assert_eq!(
            policy().evaluate(Some("bugfix/issue-12"), "7.0.1"),
            Verdict::Valid
        );
    }

    #[test]
    fn test_feature_branch_with_snapshot() {
        assert_eq!(
            policy().evaluate(Some("feature/foo"), "1.0.0-SNAPSHOT"),
            Verdict::Valid
        );
    }

    #[test]
    fn test_feature_branch_without_snapshot() {
        let verdict = policy().evaluate(Some("feature/foo"), "1.0.0");
        let violation = verdict.violation().unwrap();
        assert_eq!(violation.rule, None);
        assert_eq!(
            violation.reason,
            ViolationReason::NonReleaseBranchRequiresSnapshot
        );
    }

    #[test]
    fn test_absent_branch_is_skipped() {
        assert_eq!(policy().evaluate(None, "1.0.0"), Verdict::Skipped);
        assert_eq!(policy().evaluate(None, "1.0.0-SNAPSHOT"), Verdict::Skipped);
    }

    #[test]
    fn test_first_match_wins() {
        let rules = vec![
            BranchRule::new("any-release", "release/.+"),
            BranchRule::new("pinned-release", "release/(.+)"),
        ];
        let policy = BranchVersionPolicy::new(&rules, SnapshotConvention::Maven).unwrap();

        // The unpinned rule comes first, so no version comparison happens
        assert_eq!(policy.evaluate(Some("release/1.0.0"), "9.9.9"), Verdict::Valid);
        assert_eq!(
            policy.classify("release/1.0.0").unwrap().rule,
            "any-release"
        );
    }

    #[test]
    fn test_empty_rules_treat_every_branch_as_non_release() {
        let policy = BranchVersionPolicy::new(&[], SnapshotConvention::Maven).unwrap();
        assert!(policy.evaluate(Some("main"), "1.0.0").is_failure());
        assert_eq!(policy.evaluate(Some("main"), "1.0.0-SNAPSHOT"), Verdict::Valid);
    }

    #[test]
    fn test_substring_does_not_match() {
        assert!(policy()
            .evaluate(Some("feature/release/2.0.0"), "2.0.0")
            .is_failure());
    }

    #[test]
    fn test_semver_convention() {
        let policy =
            BranchVersionPolicy::new(&gitflow_rules(), SnapshotConvention::Semver).unwrap();
        assert!(policy.evaluate(Some("release/1.2.0"), "1.2.0-rc.1").is_failure());
        assert_eq!(
            policy.evaluate(Some("feature/x"), "1.3.0-alpha.2"),
            Verdict::Valid
        );
    }

    #[test]
    fn test_free_function_reports_bad_pattern() {
        let rules = vec![BranchRule::new("release", "release/(.+")];
        assert!(evaluate(Some("release/1.0.0"), "1.0.0", &rules).is_err());
    }

    #[test]
    fn test_free_function_evaluates() {
        let verdict = evaluate(Some("main"), "2.3.0", &gitflow_rules()).unwrap();
        assert_eq!(verdict, Verdict::Valid);
    }

    #[test]
    fn test_try_evaluate_rejects_unparsable_semver() {
        let policy =
            BranchVersionPolicy::new(&gitflow_rules(), SnapshotConvention::Semver).unwrap();
        assert!(policy.try_evaluate(Some("feature/x"), "1.2").is_err());
        assert_eq!(
            policy.try_evaluate(Some("release/1.2.0"), "1.2.0").unwrap(),
            Verdict::Valid
        );
    }

    #[test]
    fn test_try_evaluate_skips_without_branch_for_any_version() {
        let policy =
            BranchVersionPolicy::new(&gitflow_rules(), SnapshotConvention::Semver).unwrap();
        assert_eq!(policy.try_evaluate(None, "1.2").unwrap(), Verdict::Skipped);
    }

    #[test]
    fn test_judge_uses_given_classification() {
        let policy = policy();
        let matched = policy.classify("release/2.3.0");
        assert_eq!(
            policy.judge("release/2.3.0", matched, "2.3.0"),
            Verdict::Valid
        );
        assert!(policy.judge("release/2.3.0", None, "2.3.0").is_failure());
    }

    #[test]
    fn test_policy_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BranchVersionPolicy>();
    }
}
