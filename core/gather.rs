use crate::config::BundlerConfig;
use crate::error::{AppError, Result};
use crate::output_formats::SourceFile;
use crate::report::Reporter;
use crate::rules::IgnoreRules;
use log;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Lazily yields every accepted file below `root`, depth first.
///
/// Ignored directories are pruned with `skip_current_dir`, so nothing below
/// them is yielded or reported. walkdir has already opened the directory by
/// then, and with sorting it has read its listing too.
///
/// Symlinks to files are read through the link. Symlinked directories are
/// only descended into with `follow_links`. Every other skip (ignored,
/// oversized, non-UTF-8, unreadable, special file) is reported through the
/// [`Reporter`]; nothing here ends the walk early.
pub struct TreeWalker<'a> {
    root: PathBuf,
    inner: walkdir::IntoIter,
    rules: &'a IgnoreRules,
    max_file_size: u64,
    progress_every: usize,
    reporter: &'a dyn Reporter,
    accepted: usize,
    skipped: usize,
}

enum Decoded {
    Text(String),
    NotUtf8(std::string::FromUtf8Error),
}

impl<'a> TreeWalker<'a> {
    pub fn new(
        root: &Path,
        rules: &'a IgnoreRules,
        config: &BundlerConfig,
        reporter: &'a dyn Reporter,
    ) -> Self {
        let mut walk = WalkDir::new(root).follow_links(config.follow_links);
        if config.sort_entries {
            walk = walk.sort_by_file_name();
        }
        log::debug!(
            "TreeWalker configured (root: {}, follow_links: {}, sorted: {}, rules: {})",
            root.display(),
            config.follow_links,
            config.sort_entries,
            rules.len()
        );
        TreeWalker {
            root: root.to_path_buf(),
            inner: walk.into_iter(),
            rules,
            max_file_size: config.max_file_size,
            progress_every: config.progress_every,
            reporter,
            accepted: 0,
            skipped: 0,
        }
    }

    /// Files yielded so far.
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Files seen but not yielded (ignored, too large, not UTF-8, unreadable).
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn visit_dir(&mut self, entry: &DirEntry) {
        let hit = self
            .rules
            .find_match(entry.path(), &self.root)
            .map(|rule| rule.to_string());
        if let Some(rule) = hit {
            self.reporter.warning(&format!(
                "Skipping directory {} as it is in the ignore list ({}).",
                entry.path().display(),
                rule
            ));
            self.inner.skip_current_dir();
        }
    }

    fn visit_file(&mut self, entry: DirEntry) -> Option<SourceFile> {
        let path = entry.path();

        if let Some(rule) = self.rules.find_match(path, &self.root) {
            self.reporter.warning(&format!(
                "Skipping file {} as it is in the ignore list ({}).",
                path.display(),
                rule
            ));
            self.skipped += 1;
            return None;
        }

        // fs::metadata follows links, so a symlinked file is sized by its target.
        let size = match fs::metadata(path) {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                self.report_unreadable(path, e);
                return None;
            }
        };
        if size > self.max_file_size {
            self.reporter.warning(&format!(
                "Skipping file {} as it exceeds {} KiB. File size: {} KiB",
                path.display(),
                format_kib(self.max_file_size),
                format_kib(size)
            ));
            self.skipped += 1;
            return None;
        }

        match read_text(path) {
            Ok(Decoded::Text(content)) => {
                self.accepted += 1;
                if self.progress_every > 0 && self.accepted % self.progress_every == 0 {
                    self.reporter
                        .success(&format!("Processed {} files...", self.accepted));
                }
                log::trace!("Accepted {} ({} bytes)", path.display(), size);
                Some(SourceFile {
                    path: entry.into_path(),
                    content,
                })
            }
            Ok(Decoded::NotUtf8(e)) => {
                self.reporter.warning(&format!(
                    "Skipping file {} as it is not UTF-8 compatible: {}",
                    path.display(),
                    e
                ));
                self.skipped += 1;
                None
            }
            Err(e) => {
                self.reporter.error(&e.to_string());
                self.skipped += 1;
                None
            }
        }
    }

    /// Symlinks seen while links are not followed. A link to a file is
    /// bundled; a link to a directory is not descended into.
    fn visit_link(&mut self, entry: DirEntry) -> Option<SourceFile> {
        match fs::metadata(entry.path()) {
            Ok(target) if target.is_file() => self.visit_file(entry),
            Ok(target) if target.is_dir() => {
                let message = match self.rules.find_match(entry.path(), &self.root) {
                    Some(rule) => format!(
                        "Skipping directory {} as it is in the ignore list ({}).",
                        entry.path().display(),
                        rule
                    ),
                    None => format!(
                        "Skipping {} as it is a symbolic link to a directory.",
                        entry.path().display()
                    ),
                };
                self.reporter.warning(&message);
                self.skipped += 1;
                None
            }
            Ok(_) => {
                self.report_special(entry.path());
                None
            }
            Err(e) => {
                self.report_unreadable(entry.path(), e);
                None
            }
        }
    }

    fn report_special(&mut self, path: &Path) {
        self.reporter.warning(&format!(
            "Skipping {} as it is not a regular file.",
            path.display()
        ));
        self.skipped += 1;
    }

    fn report_unreadable(&mut self, path: &Path, source: std::io::Error) {
        let err = AppError::FileRead {
            path: path.to_path_buf(),
            source,
        };
        self.reporter.error(&err.to_string());
        self.skipped += 1;
    }
}

impl Iterator for TreeWalker<'_> {
    type Item = SourceFile;

    fn next(&mut self) -> Option<SourceFile> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    let location = e
                        .path()
                        .map_or_else(|| "unknown path".into(), |p| p.display().to_string());
                    self.reporter.error(&format!(
                        "Error reading {}: {}",
                        location,
                        AppError::from(e)
                    ));
                    continue;
                }
            };

            // The root itself is never matched against ignore rules.
            if entry.depth() == 0 {
                continue;
            }

            let file_type = entry.file_type();
            if file_type.is_dir() {
                self.visit_dir(&entry);
            } else if file_type.is_file() {
                if let Some(file) = self.visit_file(entry) {
                    return Some(file);
                }
            } else if file_type.is_symlink() {
                if let Some(file) = self.visit_link(entry) {
                    return Some(file);
                }
            } else {
                log::debug!("Special file: {}", entry.path().display());
                self.report_special(entry.path());
            }
        }
    }
}

fn read_text(path: &Path) -> Result<Decoded> {
    let bytes = fs::read(path).map_err(|e| AppError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => Decoded::Text(text),
        Err(e) => Decoded::NotUtf8(e),
    })
}

fn format_kib(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / 1024.0)
}
