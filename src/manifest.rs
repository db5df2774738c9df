use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ReleaseError, Result};
use crate::version::Version;

/// Plugin metadata read from the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    /// Display name, used only for logging.
    pub name: String,
    pub version: Version,
}

#[derive(Deserialize)]
struct ManifestDoc {
    meta: MetaSection,
}

#[derive(Deserialize)]
struct MetaSection {
    name: String,
    version: String,
}

/// Handle to the plugin manifest file (`info.toml` by default).
///
/// Reads are a structural TOML parse; the version write is a plain string
/// substitution so the rest of the file keeps its formatting untouched.
pub struct Manifest {
    path: PathBuf,
}

impl Manifest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Manifest { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the plugin name and current version from the manifest.
    ///
    /// # Returns
    /// * `Ok(PluginInfo)` - Parsed name and version
    /// * `Err(MissingManifest)` - If the file does not exist
    /// * `Err(MalformedVersion)` - If the version field is not "X.Y.Z"
    pub fn read(&self) -> Result<PluginInfo> {
        let content = self.read_content()?;
        let doc: ManifestDoc = toml::from_str(&content)?;
        let version = doc.meta.version.parse::<Version>()?;
        Ok(PluginInfo {
            name: doc.meta.name,
            version,
        })
    }

    /// Replaces the prior version string with the new one, in place.
    ///
    /// The prior version's canonical string must occur exactly once in the
    /// file: zero occurrences fail with `VersionNotFound`, more than one with
    /// `AmbiguousVersion`. The uniqueness guard protects against clobbering
    /// an unrelated numeric string elsewhere in the manifest.
    pub fn write_version(&self, prior: &Version, next: &Version) -> Result<()> {
        let content = self.read_content()?;
        let prior_str = prior.to_string();

        let first = match content.find(&prior_str) {
            Some(idx) => idx,
            None => return Err(ReleaseError::VersionNotFound(prior_str)),
        };
        if content.rfind(&prior_str) != Some(first) {
            return Err(ReleaseError::AmbiguousVersion(prior_str));
        }

        let updated = content.replacen(&prior_str, &next.to_string(), 1);
        fs::write(&self.path, updated)?;
        Ok(())
    }

    fn read_content(&self) -> Result<String> {
        if !self.path.exists() {
            return Err(ReleaseError::MissingManifest(
                self.path.display().to_string(),
            ));
        }
        Ok(fs::read_to_string(&self.path)?)
    }
}
