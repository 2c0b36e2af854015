use crate::error::{GuardError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A named branch-naming rule.
///
/// The `name` is the role the rule assigns (e.g. "main", "release"). When the
/// pattern has a capturing group, group 1 is the version the branch mandates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BranchRule {
    pub name: String,
    pub pattern: String,
}

impl BranchRule {
    /// Create a new rule
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        BranchRule {
            name: name.into(),
            pattern: pattern.into(),
        }
    }
}

/// Result of classifying a branch against a rule list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// Name of the first rule that fully matched
    pub rule: String,
    /// Trimmed capture group 1, if the pattern has one and it participated
    pub pinned_version: Option<String>,
}

/// A rule whose pattern has been compiled for full-string matching
#[derive(Debug, Clone)]
pub struct CompiledRule {
    name: String,
    pattern: String,
    regex: Regex,
}

impl CompiledRule {
    /// Compile a rule, anchoring the pattern at both ends.
    ///
    /// The pattern is wrapped in a non-capturing group so group numbering is
    /// the same as in the configured pattern.
    pub fn compile(rule: &BranchRule) -> Result<Self> {
        let anchored = format!("^(?:{})$", rule.pattern);
        let regex = Regex::new(&anchored).map_err(|source| GuardError::InvalidPattern {
            rule: rule.name.clone(),
            pattern: rule.pattern.clone(),
            source,
        })?;

        Ok(CompiledRule {
            name: rule.name.clone(),
            pattern: rule.pattern.clone(),
            regex,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether the pattern declares a version capture group
    pub fn pins_version(&self) -> bool {
        // captures_len counts the implicit whole-match group
        self.regex.captures_len() > 1
    }

    /// Match the whole branch name against this rule
    pub fn matches(&self, branch: &str) -> Option<RuleMatch> {
        let captures = self.regex.captures(branch)?;
        let pinned_version = captures
            .get(1)
            .map(|group| group.as_str().trim().to_string());

        Some(RuleMatch {
            rule: self.name.clone(),
            pinned_version,
        })
    }
}

/// Compile an ordered rule list, failing on the first invalid pattern
pub fn compile_rules(rules: &[BranchRule]) -> Result<Vec<CompiledRule>> {
    rules.iter().map(CompiledRule::compile).collect()
}
