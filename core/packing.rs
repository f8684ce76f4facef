use crate::config::BundlerConfig;
use crate::error::{AppError, Result};
use crate::output_formats::FormattedEntry;
use crate::report::Reporter;
use log;
use std::fs;
use std::path::{Path, PathBuf};

/// The in-flight bundle: entries in arrival order and their summed length.
#[derive(Debug, Default)]
struct PackerState {
    entries: Vec<FormattedEntry>,
    current_chars: usize,
}

impl PackerState {
    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Totals for everything the packer flushed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackStats {
    pub bundles_written: usize,
    pub bundles_failed: usize,
    pub total_characters: usize,
    pub written_paths: Vec<PathBuf>,
}

/// Greedy, order-preserving packer.
///
/// An entry that would push the in-flight bundle past `char_limit` closes it
/// and starts the next one. Entries are never split or reordered, so an entry
/// longer than the limit lands in a bundle of its own.
pub struct BundlePacker<'a> {
    config: &'a BundlerConfig,
    reporter: &'a dyn Reporter,
    state: PackerState,
    next_bundle: usize,
    stats: PackStats,
}

impl<'a> BundlePacker<'a> {
    pub fn new(config: &'a BundlerConfig, reporter: &'a dyn Reporter) -> Self {
        BundlePacker {
            config,
            reporter,
            state: PackerState::default(),
            next_bundle: 1,
            stats: PackStats::default(),
        }
    }

    pub fn add(&mut self, entry: FormattedEntry) {
        let entry_chars = entry.char_len();
        if self.state.current_chars.saturating_add(entry_chars) > self.config.char_limit {
            if entry_chars > self.config.char_limit {
                log::trace!(
                    "Entry of {} chars exceeds limit {}, it gets a bundle of its own.",
                    entry_chars,
                    self.config.char_limit
                );
            }
            self.flush();
            self.state.entries.push(entry);
            self.state.current_chars = entry_chars;
        } else {
            self.state.entries.push(entry);
            self.state.current_chars += entry_chars;
        }
    }

    /// Drains the last partial bundle and returns the totals.
    pub fn finish(mut self) -> PackStats {
        self.flush();
        log::debug!(
            "Packer finished: {} written, {} failed, {} chars",
            self.stats.bundles_written,
            self.stats.bundles_failed,
            self.stats.total_characters
        );
        self.stats
    }

    /// Writes the in-flight bundle, if any. The state is reset whether or not
    /// the write succeeds, and the bundle number is consumed either way.
    fn flush(&mut self) {
        if self.state.is_empty() {
            return;
        }
        let state = std::mem::take(&mut self.state);
        let bundle_number = self.next_bundle;
        self.next_bundle += 1;

        let contents: String = state.entries.iter().map(FormattedEntry::as_str).collect();
        let path = self.config.bundle_path(bundle_number);
        log::debug!(
            "Flushing bundle {} ({} entries, {} chars) to {}",
            bundle_number,
            state.entries.len(),
            state.current_chars,
            path.display()
        );

        match write_bundle(&path, &contents) {
            Ok(()) => {
                self.stats.bundles_written += 1;
                self.stats.total_characters += state.current_chars;
                self.stats.written_paths.push(path);
                self.reporter
                    .success(&format!("Bundle {} written.", bundle_number));
            }
            Err(e) => {
                self.stats.bundles_failed += 1;
                self.reporter
                    .error(&format!("Error writing bundle {}: {}", bundle_number, e));
            }
        }
    }
}

fn write_bundle(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| AppError::DirCreation {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }
    fs::write(path, contents).map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
