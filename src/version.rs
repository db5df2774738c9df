use std::str::FromStr;

use crate::error::{ReleaseError, Result};

/// Represents a semantic version with major, minor, and patch components.
///
/// The canonical string form "major.minor.patch" is used both for manifest
/// substitution and for git tag names, so `Display` and `FromStr` must stay
/// exact inverses of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

/// Represents the kind of semantic version bump to apply.
///
/// A closed enumeration: the CLI maps its three leaf subcommands onto these
/// variants, and `FromStr` rejects everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
}

impl Version {
    /// Creates a new Version with the specified major, minor, and patch components.
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Bumps this version according to the specified kind.
    ///
    /// Increments the appropriate component and resets lower components to 0:
    /// - **Major**: major += 1, minor = 0, patch = 0
    /// - **Minor**: minor += 1, patch = 0
    /// - **Patch**: patch += 1
    ///
    /// Pure arithmetic, no I/O.
    pub fn bump(mut self, kind: BumpKind) -> Version {
        match kind {
            BumpKind::Major => {
                self.major += 1;
                self.minor = 0;
                self.patch = 0;
            }
            BumpKind::Minor => {
                self.minor += 1;
                self.patch = 0;
            }
            BumpKind::Patch => {
                self.patch += 1;
            }
        }
        self
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = ReleaseError;

    /// Parses a version of the form "X.Y.Z".
    ///
    /// Expects exactly three dot-separated non-negative integer components;
    /// anything else fails with `MalformedVersion`.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3 {
            return Err(ReleaseError::malformed_version(format!(
                "expected version of the form X.Y.Z, got `{}`",
                s
            )));
        }

        let component = |part: &str| -> Result<u32> {
            part.parse::<u32>().map_err(|_| {
                ReleaseError::malformed_version(format!(
                    "non-numeric component `{}` in `{}`",
                    part, s
                ))
            })
        };

        Ok(Version::new(
            component(parts[0])?,
            component(parts[1])?,
            component(parts[2])?,
        ))
    }
}

impl std::fmt::Display for BumpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BumpKind::Major => write!(f, "major"),
            BumpKind::Minor => write!(f, "minor"),
            BumpKind::Patch => write!(f, "patch"),
        }
    }
}

impl FromStr for BumpKind {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(BumpKind::Major),
            "minor" => Ok(BumpKind::Minor),
            "patch" => Ok(BumpKind::Patch),
            other => Err(ReleaseError::InvalidBumpKind(other.to_string())),
        }
    }
}
