use thiserror::Error;

/// Unified error type for op-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("no manifest file at {0}")]
    MissingManifest(String),

    #[error("malformed version: {0}")]
    MalformedVersion(String),

    #[error("invalid bump kind '{0}', expected major, minor or patch")]
    InvalidBumpKind(String),

    #[error("could not find `{0}` in the manifest")]
    VersionNotFound(String),

    #[error("more than one occurrence of `{0}` in the manifest -- bailing")]
    AmbiguousVersion(String),

    #[error("not in a git repository (or the repository has no commits)")]
    NotARepository,

    #[error("tag `{0}` already exists")]
    TagAlreadyExists(String),

    #[error("nothing to commit: no files match `{0}`")]
    NothingToCommit(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("manifest parse error: {0}")]
    Manifest(#[from] toml::de::Error),

    #[error("git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in op-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a malformed-version error with context
    pub fn malformed_version(msg: impl Into<String>) -> Self {
        ReleaseError::MalformedVersion(msg.into())
    }
}
