use std::path::PathBuf;
use std::process::Command;
use std::sync::{Arc, Mutex};

use crate::config::BuildConfig;
use crate::error::Result;
use crate::version::Version;

/// What the build invocation produced: captured stdout plus the exit code
/// (`None` if the process was killed by a signal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub stdout: String,
    pub status: Option<i32>,
}

/// Port for the external build step.
pub trait Builder {
    /// Runs a build for the given version and reports what happened.
    ///
    /// A non-zero exit status is NOT an error: the status is surfaced in the
    /// [BuildReport] for logging and the release continues regardless. Only
    /// a failure to spawn the process at all is fatal. The product owner has
    /// not confirmed whether a failing build should abort the release, so
    /// the original behavior is kept as-is.
    fn build(&self, version: &Version) -> Result<BuildReport>;
}

/// Real [Builder] that shells out to the configured build script
/// (`./build.sh release` by default).
pub struct ShellBuilder {
    workdir: PathBuf,
    script: String,
    mode: String,
}

impl ShellBuilder {
    pub fn new(workdir: impl Into<PathBuf>, config: &BuildConfig) -> Self {
        ShellBuilder {
            workdir: workdir.into(),
            script: config.script.clone(),
            mode: config.mode.clone(),
        }
    }
}

impl Builder for ShellBuilder {
    fn build(&self, _version: &Version) -> Result<BuildReport> {
        let script = self.workdir.join(&self.script);
        let output = Command::new(script)
            .arg(&self.mode)
            .current_dir(&self.workdir)
            .output()?;

        Ok(BuildReport {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            status: output.status.code(),
        })
    }
}

/// Mock [Builder] recording invocations into a shared event log.
pub struct MockBuilder {
    log: Arc<Mutex<Vec<String>>>,
    status: Option<i32>,
}

impl MockBuilder {
    pub fn new(log: Arc<Mutex<Vec<String>>>) -> Self {
        MockBuilder { log, status: Some(0) }
    }

    /// Report the given exit status from every build.
    pub fn with_status(mut self, status: Option<i32>) -> Self {
        self.status = status;
        self
    }
}

impl Builder for MockBuilder {
    fn build(&self, version: &Version) -> Result<BuildReport> {
        self.log.lock().unwrap().push(format!("build {}", version));
        Ok(BuildReport {
            stdout: format!("built {}\n", version),
            status: self.status,
        })
    }
}
