//! Release sequencing
//!
//! One release run is a linear, fail-fast pipeline:
//! read manifest → bump → write manifest → commit + tag → build →
//! commit artifacts. Any error aborts the remaining steps with no
//! compensating actions; the manifest may keep its new version on disk if a
//! later step fails, and the error is surfaced to the invoker as-is.

use std::path::Path;

use crate::builder::{Builder, ShellBuilder};
use crate::config::load_config;
use crate::error::Result;
use crate::manifest::Manifest;
use crate::ui::Reporter;
use crate::vcs::{Git2Vcs, Vcs};
use crate::version::{BumpKind, Version};

/// What a completed release produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOutcome {
    /// Plugin display name from the manifest.
    pub name: String,
    pub prior: Version,
    pub released: Version,
}

/// Sequences one release over injected collaborators.
///
/// Generic over the VCS and builder ports so the sequencing can be tested
/// with fakes, without spawning subprocesses or touching a repository.
pub struct Orchestrator<'a, V: Vcs, B: Builder> {
    manifest: Manifest,
    vcs: V,
    builder: B,
    reporter: &'a Reporter,
}

impl<'a, V: Vcs, B: Builder> Orchestrator<'a, V, B> {
    pub fn new(manifest: Manifest, vcs: V, builder: B, reporter: &'a Reporter) -> Self {
        Orchestrator {
            manifest,
            vcs,
            builder,
            reporter,
        }
    }

    /// Runs the full release pipeline for one bump kind.
    pub fn run(&self, kind: BumpKind) -> Result<ReleaseOutcome> {
        let info = self.manifest.read()?;
        self.reporter.status(&format!(
            "[{}] read {} for version: {}",
            info.name,
            self.manifest.path().display(),
            info.version
        ));

        let released = info.version.bump(kind);

        self.manifest.write_version(&info.version, &released)?;
        self.reporter.status(&format!(
            "wrote {} with updated version: {}",
            self.manifest.path().display(),
            released
        ));

        self.vcs.commit_version_bump(&released)?;
        self.reporter.success(&format!(
            "committed version bump from {} to {}, tagged {}",
            info.version, released, released
        ));

        let report = self.builder.build(&released)?;
        self.reporter.build_report(&released, &report);

        self.vcs.commit_build_artifacts(&released)?;
        self.reporter
            .success(&format!("committed build for version: {}", released));

        Ok(ReleaseOutcome {
            name: info.name,
            prior: info.version,
            released,
        })
    }
}

/// Runs a release in `workdir` with the real collaborators.
///
/// The repository is opened and validated first, so running outside a git
/// repository fails with `NotARepository` before any file is mutated.
pub fn run_release(workdir: &Path, kind: BumpKind, reporter: &Reporter) -> Result<ReleaseOutcome> {
    let config = load_config(workdir)?;
    let vcs = Git2Vcs::open(workdir, &config)?;
    let manifest = Manifest::new(workdir.join(&config.manifest));
    let builder = ShellBuilder::new(workdir, &config.build);
    Orchestrator::new(manifest, vcs, builder, reporter).run(kind)
}
