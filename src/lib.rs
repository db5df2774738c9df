pub mod builder;
pub mod config;
pub mod error;
pub mod manifest;
pub mod release;
pub mod ui;
pub mod vcs;
pub mod version;

pub use error::{ReleaseError, Result};
