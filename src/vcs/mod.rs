//! Version-control abstraction layer
//!
//! The [Vcs] trait is the port the release orchestrator talks to. The
//! concrete implementations are:
//!
//! - [repository::Git2Vcs]: the real implementation over the `git2` crate
//! - [mock::MockVcs]: a recording fake for orchestrator tests
//!
//! Both operations mutate repository history (commits, tags). There is no
//! rollback beyond what git itself provides.

pub mod mock;
pub mod repository;

pub use mock::MockVcs;
pub use repository::Git2Vcs;

use crate::error::Result;
use crate::version::Version;

/// Port for the two repository side effects a release performs.
pub trait Vcs {
    /// Stage the manifest, commit `Version: X.Y.Z`, and create a lightweight
    /// tag named with the canonical version string.
    ///
    /// Fails with `TagAlreadyExists` when the tag name collides with an
    /// existing tag.
    fn commit_version_bump(&self, version: &Version) -> Result<()>;

    /// Stage every file matching the artifact glob and commit
    /// `Release: X.Y.Z`.
    ///
    /// Fails with `NothingToCommit` when the glob matches no files.
    fn commit_build_artifacts(&self, version: &Version) -> Result<()>;
}
