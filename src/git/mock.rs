use crate::error::{GuardError, Result};
use crate::git::{BranchSource, HeadState};

/// Mock branch source for testing without a repository
pub struct MockRepository {
    head: Option<HeadState>,
}

impl MockRepository {
    /// Create a mock whose `HEAD` is on `branch`
    pub fn on_branch(branch: impl Into<String>) -> Self {
        MockRepository {
            head: Some(HeadState::Branch(branch.into())),
        }
    }

    /// Create a mock with a detached `HEAD`
    pub fn detached() -> Self {
        MockRepository {
            head: Some(HeadState::Detached),
        }
    }

    /// Create a mock that fails like a directory outside any repository
    pub fn unavailable() -> Self {
        MockRepository { head: None }
    }
}

impl BranchSource for MockRepository {
    fn head_state(&self) -> Result<HeadState> {
        self.head.clone().ok_or_else(|| {
            GuardError::Git(git2::Error::from_str("could not find repository"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_on_branch() {
        let repo = MockRepository::on_branch("main");
        assert_eq!(repo.head_state().unwrap().branch_name(), Some("main"));
    }

    #[test]
    fn test_mock_detached() {
        assert_eq!(
            MockRepository::detached().head_state().unwrap(),
            HeadState::Detached
        );
    }

    #[test]
    fn test_mock_unavailable() {
        let err = MockRepository::unavailable().head_state().unwrap_err();
        assert!(err.to_string().contains("Git operation failed"));
    }
}
