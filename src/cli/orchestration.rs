//! Check workflow orchestration
//!
//! Resolves the branch name, the project version and the rule set, then runs
//! the policy. Kept apart from `main.rs` so the workflow can be called
//! programmatically without depending on clap.

use std::env;
use std::path::Path;

use tracing::{debug, info};

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{BranchVersionPolicy, Verdict};
use crate::error::Result;
use crate::git::{BranchSource, Git2Repository, HeadState};
use crate::manifest;

/// Arguments for the check workflow
///
/// Every field overrides the matching configuration value when set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CheckArgs {
    /// Explicit branch name
    pub branch: Option<String>,

    /// Environment variable to read the branch from
    pub branch_env: Option<String>,

    /// Explicit project version
    pub project_version: Option<String>,

    /// Build descriptor to read the version from
    pub manifest_path: Option<String>,

    /// Fall back to the checked-out branch of the local repository
    pub detect_branch: bool,
}

/// Result of a completed check
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    /// The branch that was checked, if any was found
    pub branch: Option<String>,

    /// The project version that was checked; `None` when the check was
    /// skipped before the version had to be read
    pub version: Option<String>,

    /// The rule the branch matched
    pub matched_rule: Option<String>,

    pub verdict: Verdict,

    /// Non-fatal notices gathered while resolving inputs
    pub warnings: Vec<BoundaryWarning>,
}

/// Where a resolved branch name came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchOrigin {
    Argument,
    Environment,
    Repository,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Resolve the branch name.
///
/// Precedence: explicit argument, then the environment variable, then the
/// repository (only when `detect` is set). Blank values count as absent.
pub fn resolve_branch<E, S>(
    explicit: Option<&str>,
    env_var: &str,
    lookup_env: E,
    detect: bool,
    source: impl FnOnce() -> Result<S>,
    warnings: &mut Vec<BoundaryWarning>,
) -> Option<(String, BranchOrigin)>
where
    E: Fn(&str) -> Option<String>,
    S: BranchSource,
{
    if let Some(branch) = non_blank(explicit.map(str::to_string)) {
        return Some((branch, BranchOrigin::Argument));
    }

    if let Some(branch) = non_blank(lookup_env(env_var)) {
        debug!(env_var, %branch, "detected branch in build environment");
        return Some((branch, BranchOrigin::Environment));
    }

    if detect {
        match source().and_then(|s| s.head_state()) {
            Ok(HeadState::Branch(branch)) if !branch.trim().is_empty() => {
                debug!(%branch, "detected branch from repository HEAD");
                return Some((branch, BranchOrigin::Repository));
            }
            Ok(_) => warnings.push(BoundaryWarning::DetachedHead),
            Err(e) => warnings.push(BoundaryWarning::RepositoryUnavailable {
                reason: e.to_string(),
            }),
        }
    }

    warnings.push(BoundaryWarning::NoBranchContext {
        env_var: env_var.to_string(),
    });
    None
}

/// Resolve the project version: explicit value first, else the manifest.
pub fn resolve_version(args: &CheckArgs, config: &Config) -> Result<String> {
    if let Some(version) = non_blank(args.project_version.clone()) {
        return Ok(version);
    }

    let manifest_path = args.manifest_path.as_deref().unwrap_or(&config.manifest);
    manifest::read_project_version(Path::new(manifest_path))
}

/// Evaluate already-resolved inputs against the configured policy.
///
/// Rule patterns are compiled first, so a malformed pattern is reported even
/// when there is no branch. The version is only validated when there is a
/// branch to check it against.
pub fn check(branch: Option<String>, version: String, config: &Config) -> Result<CheckOutcome> {
    let policy = BranchVersionPolicy::new(&config.rules, config.snapshot.clone())?;
    match branch {
        Some(branch) => evaluate_branch(&policy, branch, version, config),
        None => Ok(skipped(Some(version))),
    }
}

fn skipped(version: Option<String>) -> CheckOutcome {
    info!("no branch context, skipping branch version assertions");
    CheckOutcome {
        branch: None,
        version,
        matched_rule: None,
        verdict: Verdict::Skipped,
        warnings: Vec::new(),
    }
}

fn evaluate_branch(
    policy: &BranchVersionPolicy,
    branch: String,
    version: String,
    config: &Config,
) -> Result<CheckOutcome> {
    config.snapshot.validate(&version)?;

    let mut warnings = Vec::new();
    if config.rules.is_empty() {
        warnings.push(BoundaryWarning::EmptyRuleSet);
    }

    let matched = policy.classify(&branch);
    let matched_rule = matched.as_ref().map(|m| m.rule.clone());
    let verdict = policy.judge(&branch, matched, &version);

    Ok(CheckOutcome {
        branch: Some(branch),
        version: Some(version),
        matched_rule,
        verdict,
        warnings,
    })
}

/// Main check workflow
///
/// 1. Resolve the branch (argument, environment, repository)
/// 2. Compile the rules
/// 3. Without a branch, stop with a skipped outcome
/// 4. Resolve the project version (argument, manifest) and evaluate
///
/// # Returns
///
/// The outcome of the check; a failed assertion is an `Ok` outcome with an
/// invalid verdict, while unusable inputs are errors.
pub fn run_check(args: &CheckArgs, config: &Config) -> Result<CheckOutcome> {
    let env_var = args.branch_env.as_deref().unwrap_or(&config.branch_env);
    let detect = args.detect_branch || config.detect_from_repository;

    let mut warnings = Vec::new();
    let branch = resolve_branch(
        args.branch.as_deref(),
        env_var,
        |name| env::var(name).ok(),
        detect,
        || Git2Repository::open("."),
        &mut warnings,
    );

    let policy = BranchVersionPolicy::new(&config.rules, config.snapshot.clone())?;

    let mut outcome = match branch {
        Some((branch, origin)) => {
            debug!(%branch, ?origin, "resolved branch");
            let version = resolve_version(args, config)?;
            evaluate_branch(&policy, branch, version, config)?
        }
        None => skipped(non_blank(args.project_version.clone())),
    };

    warnings.append(&mut outcome.warnings);
    outcome.warnings = warnings;
    Ok(outcome)
}
