//! Build-time configuration, resolved once from the environment.

use std::io;
use std::path::{Path, PathBuf};

use showcase_engine::MirrorJob;
use thiserror::Error;

pub const DESTINATION_VAR: &str = "MD_ASSET_DIR";
pub const SOURCE_VAR: &str = "COMMON_MD_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot determine working directory: {0}")]
    CurrentDir(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorSettings {
    pub source_root: PathBuf,
    pub destination_root: PathBuf,
}

impl MirrorSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir()?;
        Ok(Self::from_lookup(&cwd, |key| std::env::var(key).ok()))
    }

    /// Empty values count as unset; relative values are taken from `cwd`.
    pub fn from_lookup(cwd: &Path, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let resolve = |key: &str, fallback: PathBuf| match lookup(key) {
            Some(value) if !value.trim().is_empty() => cwd.join(value.trim()),
            _ => fallback,
        };
        Self {
            source_root: resolve(SOURCE_VAR, cwd.join("common_md")),
            destination_root: resolve(DESTINATION_VAR, cwd.join("public").join("md_assets")),
        }
    }

    pub fn job(&self) -> MirrorJob {
        MirrorJob::new(&self.source_root, &self.destination_root)
    }
}
