use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use showcase_logging::{showcase_debug, showcase_info};
use tempfile::TempDir;
use thiserror::Error;
use walkdir::WalkDir;

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "mdx", "markdown"];

/// Which files are left out of the mirror.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExcludeRule {
    /// Markdown sources (`.md`, `.mdx`, `.markdown`); their images travel, the text does not.
    #[default]
    Markdown,
    /// Any of these extensions, compared case-insensitively, without the leading dot.
    Extensions(Vec<String>),
}

impl ExcludeRule {
    pub fn excludes(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            return false;
        };
        match self {
            ExcludeRule::Markdown => MARKDOWN_EXTENSIONS
                .iter()
                .any(|md| md.eq_ignore_ascii_case(ext)),
            ExcludeRule::Extensions(list) => list
                .iter()
                .any(|candidate| candidate.trim_start_matches('.').eq_ignore_ascii_case(ext)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorJob {
    pub source_root: PathBuf,
    pub destination_root: PathBuf,
    pub exclude: ExcludeRule,
}

impl MirrorJob {
    pub fn new(source_root: impl Into<PathBuf>, destination_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            destination_root: destination_root.into(),
            exclude: ExcludeRule::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorSummary {
    pub files_copied: usize,
    pub files_excluded: usize,
    pub bytes_copied: u64,
    pub destination: PathBuf,
}

#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("source directory {path:?} is unavailable: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },
    #[error("source {source_root:?} and destination {destination_root:?} overlap")]
    OverlappingRoots {
        source_root: PathBuf,
        destination_root: PathBuf,
    },
    #[error("failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn io_at(path: &Path) -> impl FnOnce(io::Error) -> MirrorError + '_ {
    move |source| MirrorError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Replace `destination_root` with a filtered copy of `source_root`.
///
/// The new tree is assembled in a staging directory beside the destination and
/// swapped in only after every file was copied. On error the destination is
/// left as it was and the staging directory is removed.
pub fn mirror_assets(job: &MirrorJob) -> Result<MirrorSummary, MirrorError> {
    let source = check_source(&job.source_root)?;
    let destination = absolute(&job.destination_root)?;
    check_overlap(&source, &destination)?;

    let parent = destination
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&parent).map_err(io_at(&parent))?;

    let staging = tempfile::Builder::new()
        .prefix(".mirror-staging-")
        .tempdir_in(&parent)
        .map_err(io_at(&parent))?;

    let mut summary = copy_tree(&source, &staging, &job.exclude)?;
    swap_into_place(staging, &destination)?;
    summary.destination = destination;

    showcase_info!(
        "Mirrored {} files ({} bytes) from {:?} to {:?}, excluded {}",
        summary.files_copied,
        summary.bytes_copied,
        source,
        summary.destination,
        summary.files_excluded
    );
    Ok(summary)
}

fn check_source(root: &Path) -> Result<PathBuf, MirrorError> {
    let unavailable = |reason: String| MirrorError::SourceUnavailable {
        path: root.to_path_buf(),
        reason,
    };
    let meta = fs::metadata(root).map_err(|e| unavailable(e.to_string()))?;
    if !meta.is_dir() {
        return Err(unavailable("path is not a directory".into()));
    }
    // Fails early when the source cannot be listed.
    fs::read_dir(root).map_err(|e| unavailable(e.to_string()))?;
    fs::canonicalize(root).map_err(|e| unavailable(e.to_string()))
}

/// Absolute, symlink-resolved form of a path that may not exist yet.
fn absolute(path: &Path) -> Result<PathBuf, MirrorError> {
    if let Ok(resolved) = fs::canonicalize(path) {
        return Ok(resolved);
    }
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().map_err(io_at(path))?.join(path)
    };
    // Resolve the deepest existing ancestor so overlap checks compare like with like.
    let mut existing = joined.as_path();
    let mut rest = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(joined),
        }
    }
    let mut resolved = fs::canonicalize(existing).map_err(io_at(existing))?;
    resolved.extend(rest.into_iter().rev());
    Ok(resolved)
}

fn check_overlap(source: &Path, destination: &Path) -> Result<(), MirrorError> {
    if source.starts_with(destination) || destination.starts_with(source) {
        return Err(MirrorError::OverlappingRoots {
            source_root: source.to_path_buf(),
            destination_root: destination.to_path_buf(),
        });
    }
    Ok(())
}

fn copy_tree(
    source: &Path,
    staging: &TempDir,
    exclude: &ExcludeRule,
) -> Result<MirrorSummary, MirrorError> {
    let mut summary = MirrorSummary {
        files_copied: 0,
        files_excluded: 0,
        bytes_copied: 0,
        destination: staging.path().to_path_buf(),
    };

    for entry in WalkDir::new(source).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if exclude.excludes(entry.path()) {
            showcase_debug!("Excluding {:?}", entry.path());
            summary.files_excluded += 1;
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|_| MirrorError::Io {
                path: entry.path().to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "entry outside source root"),
            })?;
        let target = staging.path().join(relative);
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir).map_err(io_at(dir))?;
        }
        let bytes = fs::copy(entry.path(), &target).map_err(io_at(entry.path()))?;
        showcase_debug!("Copied {:?} ({} bytes)", relative, bytes);
        summary.files_copied += 1;
        summary.bytes_copied += bytes;
    }
    Ok(summary)
}

fn swap_into_place(staging: TempDir, destination: &Path) -> Result<(), MirrorError> {
    match fs::symlink_metadata(destination) {
        Ok(meta) if meta.is_dir() => {
            fs::remove_dir_all(destination).map_err(io_at(destination))?;
        }
        Ok(_) => fs::remove_file(destination).map_err(io_at(destination))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(io_at(destination)(err)),
    }
    let staged = staging.keep();
    if let Err(err) = fs::rename(&staged, destination) {
        let _ = fs::remove_dir_all(&staged);
        return Err(io_at(destination)(err));
    }
    Ok(())
}
