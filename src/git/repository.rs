use crate::error::Result;
use crate::git::{BranchSource, HeadState};
use git2::{ErrorCode, Repository as Git2Repo};
use std::path::Path;

const LOCAL_BRANCH_PREFIX: &str = "refs/heads/";

/// Wrapper around git2::Repository implementing [BranchSource]
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl BranchSource for Git2Repository {
    fn head_state(&self) -> Result<HeadState> {
        match self.repo.head() {
            Ok(head) if head.is_branch() => {
                let name = head
                    .shorthand()
                    .map(str::to_string)
                    .or_else(|| {
                        head.name()
                            .and_then(|n| n.strip_prefix(LOCAL_BRANCH_PREFIX))
                            .map(str::to_string)
                    })
                    .unwrap_or_default();
                Ok(HeadState::Branch(name))
            }
            Ok(_) => Ok(HeadState::Detached),
            // A fresh repository has a symbolic HEAD to a branch with no commits
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                let head = self.repo.find_reference("HEAD")?;
                Ok(head
                    .symbolic_target()
                    .and_then(|target| target.strip_prefix(LOCAL_BRANCH_PREFIX))
                    .map(|name| HeadState::Branch(name.to_string()))
                    .unwrap_or(HeadState::Detached))
            }
            Err(e) => Err(e.into()),
        }
    }
}
