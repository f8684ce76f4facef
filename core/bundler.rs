use crate::config::BundlerConfig;
use crate::error::Result;
use crate::gather::TreeWalker;
use crate::output_formats::FormattedEntry;
use crate::packing::BundlePacker;
use crate::report::Reporter;
use crate::rules::IgnoreRules;
use log;
#[cfg(feature = "serde_support")]
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Totals for one run. Owned by the caller; nothing here is global.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Serialize))]
#[cfg_attr(feature = "serde_support", serde(rename_all = "camelCase"))]
pub struct RunStatistics {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub bundles_written: usize,
    pub bundles_failed: usize,
    pub total_characters: usize,
    pub output_dir: PathBuf,
    pub bundle_paths: Vec<PathBuf>,
}

/// Walks `root`, packs every accepted file and drains the last bundle.
///
/// Per-file and per-bundle problems are reported and skipped; only an invalid
/// configuration makes this return an error. The root is expected to have
/// been validated already (see [`crate::config::resolve_root`]).
pub fn bundle_directory(
    root: &Path,
    rules: &IgnoreRules,
    config: &BundlerConfig,
    reporter: &dyn Reporter,
) -> Result<RunStatistics> {
    config.validate()?;
    log::info!(
        "Bundling {} (limit {} chars, max file size {} bytes)",
        root.display(),
        config.char_limit,
        config.max_file_size
    );

    let mut packer = BundlePacker::new(config, reporter);
    let mut walker = TreeWalker::new(root, rules, config, reporter);
    for file in walker.by_ref() {
        packer.add(FormattedEntry::from_source(&file));
    }
    let files_processed = walker.accepted();
    let files_skipped = walker.skipped();
    let pack = packer.finish();

    let stats = RunStatistics {
        files_processed,
        files_skipped,
        bundles_written: pack.bundles_written,
        bundles_failed: pack.bundles_failed,
        total_characters: pack.total_characters,
        output_dir: config.display_output_dir(),
        bundle_paths: pack.written_paths,
    };
    log::debug!("Run statistics: {:?}", stats);
    Ok(stats)
}
