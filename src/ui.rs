use console::style;

use crate::builder::BuildReport;
use crate::version::Version;

/// Explicit progress logger for a release run.
///
/// Owned by the caller and handed to the orchestrator, rather than living in
/// process-global logging state.
#[derive(Debug, Default)]
pub struct Reporter;

impl Reporter {
    pub fn new() -> Self {
        Reporter
    }

    pub fn status(&self, message: &str) {
        println!("{} {}", style("→").yellow(), message);
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("ERROR:").red().bold(), message);
    }

    /// Echoes the build output and exit status.
    ///
    /// A non-zero exit is reported as a warning only; the release keeps
    /// going (see [crate::builder::Builder::build]).
    pub fn build_report(&self, version: &Version, report: &BuildReport) {
        if !report.stdout.is_empty() {
            print!("{}", report.stdout);
        }
        match report.status {
            Some(0) => self.success(&format!("built plugin: {}", version)),
            Some(code) => println!(
                "{} build for {} exited with code {}",
                style("⚠").yellow(),
                version,
                code
            ),
            None => println!(
                "{} build for {} was terminated by a signal",
                style("⚠").yellow(),
                version
            ),
        }
    }
}
