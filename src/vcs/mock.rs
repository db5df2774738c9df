use std::sync::{Arc, Mutex};

use crate::error::{ReleaseError, Result};
use crate::vcs::Vcs;
use crate::version::Version;

/// Mock [Vcs] for testing the orchestrator without a real repository.
///
/// Records each call into a shared event log so tests can assert on
/// sequencing, and can be configured to fail either operation.
pub struct MockVcs {
    log: Arc<Mutex<Vec<String>>>,
    fail_version_commit: bool,
    fail_artifact_commit: bool,
}

impl MockVcs {
    /// Create a mock recording into the given event log.
    pub fn new(log: Arc<Mutex<Vec<String>>>) -> Self {
        MockVcs {
            log,
            fail_version_commit: false,
            fail_artifact_commit: false,
        }
    }

    /// Make `commit_version_bump` fail with `TagAlreadyExists`.
    pub fn fail_version_commit(mut self) -> Self {
        self.fail_version_commit = true;
        self
    }

    /// Make `commit_build_artifacts` fail with `NothingToCommit`.
    pub fn fail_artifact_commit(mut self) -> Self {
        self.fail_artifact_commit = true;
        self
    }
}

impl Vcs for MockVcs {
    fn commit_version_bump(&self, version: &Version) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("commit_version_bump {}", version));
        if self.fail_version_commit {
            return Err(ReleaseError::TagAlreadyExists(version.to_string()));
        }
        Ok(())
    }

    fn commit_build_artifacts(&self, version: &Version) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("commit_build_artifacts {}", version));
        if self.fail_artifact_commit {
            return Err(ReleaseError::NothingToCommit("*.op".to_string()));
        }
        Ok(())
    }
}
