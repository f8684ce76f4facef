use log;
use std::path::{Component, Path, PathBuf, is_separator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Matches any file or directory with this exact name, at any depth.
    Basename,
    /// Matches one exact path.
    ExactPath,
    /// Matches a directory and everything below it.
    PathPrefix,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRule {
    pub kind: RuleKind,
    pub pattern: PathBuf,
}

impl IgnoreRule {
    /// Classifies a raw CLI item.
    ///
    /// `vendor/` is a prefix rule, `src/gen.rs` an exact path rule and
    /// `node_modules` a basename rule. A leading `./` is dropped so that
    /// `./build/` and `build/` behave the same.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let trimmed = trimmed
            .strip_prefix("./")
            .or_else(|| trimmed.strip_prefix(".\\"))
            .unwrap_or(trimmed);
        if trimmed.is_empty() {
            return None;
        }

        let kind = if trimmed.ends_with(is_separator) {
            RuleKind::PathPrefix
        } else if trimmed.contains(is_separator) {
            RuleKind::ExactPath
        } else {
            RuleKind::Basename
        };
        let pattern = PathBuf::from(trimmed.trim_end_matches(is_separator));
        if pattern.as_os_str().is_empty() {
            // A bare separator names nothing.
            return None;
        }
        Some(IgnoreRule { kind, pattern })
    }

    /// `walked` is the path as produced by the walker (root joined with the
    /// relative part); `relative` is the same path relative to the root.
    pub fn matches(&self, walked: &Path, relative: &Path) -> bool {
        match self.kind {
            RuleKind::Basename => walked.file_name() == Some(self.pattern.as_os_str()),
            RuleKind::ExactPath => {
                same_path(walked, &self.pattern) || same_path(relative, &self.pattern)
            }
            RuleKind::PathPrefix => {
                normalized(walked).starts_with(normalized(&self.pattern))
                    || normalized(relative).starts_with(normalized(&self.pattern))
            }
        }
    }
}

fn same_path(a: &Path, b: &Path) -> bool {
    normalized(a) == normalized(b)
}

/// Drops `.` components so `./src/a.rs` and `src/a.rs` compare equal.
fn normalized(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// The full ignore list for a run. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    rules: Vec<IgnoreRule>,
}

impl IgnoreRules {
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules: Vec<IgnoreRule> = items
            .into_iter()
            .filter_map(|item| {
                let parsed = IgnoreRule::parse(item.as_ref());
                if parsed.is_none() {
                    log::warn!("Ignoring empty ignore item {:?}", item.as_ref());
                }
                parsed
            })
            .collect();
        log::debug!("Ignore rules: {:?}", rules);
        IgnoreRules { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns the first rule matching the path, if any.
    pub fn find_match(&self, walked: &Path, root: &Path) -> Option<&IgnoreRule> {
        let relative = pathdiff::diff_paths(walked, root).unwrap_or_else(|| walked.to_path_buf());
        let hit = self.rules.iter().find(|rule| rule.matches(walked, &relative));
        if let Some(rule) = hit {
            log::trace!("{} matched ignore rule {:?}", walked.display(), rule);
        }
        hit
    }
}

impl std::fmt::Display for IgnoreRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self.kind {
            RuleKind::Basename => "name",
            RuleKind::ExactPath => "path",
            RuleKind::PathPrefix => "prefix",
        };
        write!(f, "{}:{}", tag, self.pattern.display())
    }
}
