//! Git branch detection
//!
//! When the CI environment does not export the branch name, the checked-out
//! branch can be read from the local repository instead. The [BranchSource]
//! trait abstracts that lookup:
//!
//! - [repository::Git2Repository]: reads `HEAD` using the `git2` crate
//! - [mock::MockRepository]: a fixed answer for tests
//!
//! ```rust
//! # use git_version_guard::git::{BranchSource, HeadState};
//! # fn example<S: BranchSource>(source: &S) -> git_version_guard::Result<()> {
//! if let HeadState::Branch(name) = source.head_state()? {
//!     println!("on branch {}", name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// What `HEAD` currently points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadState {
    /// A local branch, possibly without commits yet
    Branch(String),
    /// A commit checked out directly
    Detached,
}

impl HeadState {
    pub fn branch_name(&self) -> Option<&str> {
        match self {
            HeadState::Branch(name) => Some(name),
            HeadState::Detached => None,
        }
    }
}

/// Source of the currently checked-out branch
///
/// Implementations map underlying errors (like `git2::Error`) to
/// [crate::error::GuardError] variants.
pub trait BranchSource {
    /// Describe what `HEAD` points at
    ///
    /// # Returns
    /// * `Ok(HeadState::Branch(name))` - short branch name, e.g. "release/1.2.0"
    /// * `Ok(HeadState::Detached)` - `HEAD` is a bare commit
    /// * `Err` - If the repository cannot be read
    fn head_state(&self) -> Result<HeadState>;
}
