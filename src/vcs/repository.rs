use std::path::{Path, PathBuf};

use git2::{IndexAddOption, Oid, Repository};

use crate::config::Config;
use crate::error::{ReleaseError, Result};
use crate::vcs::Vcs;
use crate::version::Version;

/// Real [Vcs] implementation backed by the `git2` crate.
///
/// Opening validates the repository up front so a release run fails with
/// `NotARepository` before any file is touched.
pub struct Git2Vcs {
    repo: Repository,
    /// Manifest path relative to the repository workdir, for staging.
    manifest_path: PathBuf,
    artifact_glob: String,
}

impl Git2Vcs {
    /// Opens the repository containing `workdir`.
    ///
    /// # Returns
    /// * `Ok(Git2Vcs)` - A usable repository with at least one commit
    /// * `Err(NotARepository)` - If discovery fails, the repository is bare,
    ///   or HEAD has no commits yet
    pub fn open(workdir: &Path, config: &Config) -> Result<Self> {
        let repo = Repository::discover(workdir).map_err(|_| ReleaseError::NotARepository)?;
        if repo.is_bare() {
            return Err(ReleaseError::NotARepository);
        }
        // An unborn HEAD means there is nothing to commit on top of.
        if repo.head().is_err() {
            return Err(ReleaseError::NotARepository);
        }
        Ok(Git2Vcs {
            repo,
            manifest_path: PathBuf::from(&config.manifest),
            artifact_glob: config.artifacts.glob.clone(),
        })
    }

    /// Commits the given tree on top of HEAD with the repository's default
    /// signature.
    fn commit_head(&self, tree_id: Oid, message: &str) -> Result<Oid> {
        let tree = self.repo.find_tree(tree_id)?;
        let sig = self.repo.signature()?;
        let parent = self.repo.head()?.peel_to_commit()?;
        let oid = self
            .repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])?;
        Ok(oid)
    }
}

impl Vcs for Git2Vcs {
    fn commit_version_bump(&self, version: &Version) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_path(&self.manifest_path)?;
        index.write()?;
        let tree_id = index.write_tree()?;

        let oid = self.commit_head(tree_id, &format!("Version: {}", version))?;

        let commit = self.repo.find_commit(oid)?;
        match self
            .repo
            .tag_lightweight(&version.to_string(), commit.as_object(), false)
        {
            Ok(_) => Ok(()),
            Err(e) if e.code() == git2::ErrorCode::Exists => {
                Err(ReleaseError::TagAlreadyExists(version.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn commit_build_artifacts(&self, version: &Version) -> Result<()> {
        let mut index = self.repo.index()?;

        // add_all with a matched-path callback mirrors `git add <glob>`:
        // zero matches means the build produced nothing to commit.
        let mut matched = 0usize;
        let mut count_match = |_path: &Path, _spec: &[u8]| -> i32 {
            matched += 1;
            0
        };
        index.add_all(
            std::iter::once(self.artifact_glob.as_str()),
            IndexAddOption::DEFAULT,
            Some(&mut count_match as &mut git2::IndexMatchedPath),
        )?;
        if matched == 0 {
            return Err(ReleaseError::NothingToCommit(self.artifact_glob.clone()));
        }
        index.write()?;
        let tree_id = index.write_tree()?;

        self.commit_head(tree_id, &format!("Release: {}", version))?;
        Ok(())
    }
}
