//! Mirror the local uploads directory to the server with rsync

use std::path::Path;

use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;

use crate::config::Config;
use crate::error::{VpsError, VpsResult};
use crate::remote::{OutputMode, RemoteExecutor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadsReport {
    /// Local files matching the include pattern
    pub matching_files: usize,
    pub remote_dir: String,
}

/// Count top-level files in `dir` matching `pattern`; rsync's
/// `+ pattern` / `- *` filter pair selects the same set.
pub fn count_matching(dir: &Path, pattern: &str) -> VpsResult<usize> {
    let invalid = |e: ignore::Error| VpsError::InvalidSetting {
        key: "uploads.include".to_string(),
        value: pattern.to_string(),
        reason: e.to_string(),
    };

    let mut builder = OverrideBuilder::new(dir);
    builder.add(pattern).map_err(invalid)?;
    let overrides = builder.build().map_err(invalid)?;

    let count = WalkBuilder::new(dir)
        .standard_filters(false)
        .max_depth(Some(1))
        .overrides(overrides)
        .build()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .count();
    Ok(count)
}

/// Fails before touching the network when the local directory is missing
pub fn sync_uploads(
    config: &Config,
    local_root: &Path,
    exec: &RemoteExecutor<'_>,
    output: OutputMode,
    on_counted: impl FnOnce(usize),
) -> VpsResult<UploadsReport> {
    let local_dir = local_root.join(&config.uploads.local_dir);
    if !local_dir.is_dir() {
        return Err(VpsError::LocalPathMissing { path: local_dir });
    }

    let matching_files = count_matching(&local_dir, &config.uploads.include)?;
    on_counted(matching_files);

    let remote_dir = config.remote_path(&config.uploads.remote_dir);
    exec.mirror(
        "sync uploads",
        &local_dir,
        &remote_dir,
        &config.uploads.include,
        output,
    )?;

    Ok(UploadsReport {
        matching_files,
        remote_dir,
    })
}
