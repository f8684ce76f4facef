use crate::error::{AppError, Result};
use byte_unit::Byte;
use log;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_CHAR_LIMIT: usize = 30_000;
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024;
pub const DEFAULT_PROGRESS_EVERY: usize = 100;
pub const DEFAULT_BUNDLE_PREFIX: &str = "bundled_codebase";

/// Every knob of a bundling run. There is no config file; the CLI fills this
/// from its arguments and everything else keeps the defaults below.
#[derive(Debug, Clone, PartialEq)]
pub struct BundlerConfig {
    /// Hard per-bundle budget, counted in `char`s of formatted entries.
    pub char_limit: usize,
    /// Files larger than this many bytes are skipped.
    pub max_file_size: u64,
    /// Emit a progress line after this many accepted files. Zero disables it.
    pub progress_every: usize,
    pub output_dir: PathBuf,
    pub bundle_prefix: String,
    pub sort_entries: bool,
    pub follow_links: bool,
}

impl Default for BundlerConfig {
    fn default() -> Self {
        Self {
            char_limit: DEFAULT_CHAR_LIMIT,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            progress_every: DEFAULT_PROGRESS_EVERY,
            output_dir: PathBuf::from("."),
            bundle_prefix: DEFAULT_BUNDLE_PREFIX.to_string(),
            sort_entries: false,
            follow_links: false,
        }
    }
}

impl BundlerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.char_limit == 0 {
            return Err(AppError::Config(
                "Character limit must be greater than 0".to_string(),
            ));
        }
        if self.bundle_prefix.trim().is_empty() {
            return Err(AppError::Config(
                "Bundle file prefix cannot be empty".to_string(),
            ));
        }
        if self.bundle_prefix.contains(['/', '\\']) {
            return Err(AppError::Config(format!(
                "Bundle file prefix '{}' must not contain path separators",
                self.bundle_prefix
            )));
        }
        Ok(())
    }

    pub fn bundle_path(&self, bundle_number: usize) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.txt", self.bundle_prefix, bundle_number))
    }

    /// Resolves the output directory to an absolute path for the summary.
    /// Falls back to the configured value when the cwd is unavailable.
    pub fn display_output_dir(&self) -> PathBuf {
        if self.output_dir.is_absolute() {
            return self.output_dir.clone();
        }
        match env::current_dir() {
            Ok(cwd) if self.output_dir == Path::new(".") => cwd,
            Ok(cwd) => cwd.join(&self.output_dir),
            Err(e) => {
                log::debug!("Could not read current directory: {}", e);
                self.output_dir.clone()
            }
        }
    }
}

/// Parses a human size such as `100KiB`, `2MB` or `4096` into bytes.
pub fn parse_size(size_str: &str) -> Result<u64> {
    let byte_value = Byte::from_str(size_str.trim()).map_err(|e| {
        AppError::InvalidArgument(format!(
            "Invalid size format '{}': {}. Use B, KiB, MB, etc.",
            size_str, e
        ))
    })?;
    let bytes: u128 = byte_value.into();
    bytes.try_into().map_err(|_| {
        AppError::InvalidArgument(format!("Size '{}' is too large", size_str))
    })
}

pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Expands `~` and checks that the root exists and is a directory.
pub fn resolve_root(raw: &str) -> Result<PathBuf> {
    let expanded = expand_path(raw);
    let metadata = std::fs::metadata(&expanded).map_err(|e| AppError::RootAccess {
        path: expanded.clone(),
        source: e,
    })?;
    if !metadata.is_dir() {
        return Err(AppError::NotADirectory { path: expanded });
    }
    // Existing but unlistable is as fatal as missing.
    std::fs::read_dir(&expanded).map_err(|e| AppError::RootAccess {
        path: expanded.clone(),
        source: e,
    })?;
    log::debug!("Resolved scan root: {}", expanded.display());
    Ok(expanded)
}
