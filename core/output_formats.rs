use std::path::PathBuf;

pub const ENTRY_HEADER_PREFIX: &str = "// File: ";
pub const FENCE: &str = "```";

/// One accepted file as produced by the walker.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

/// The header-plus-fenced-block text of one file, with its length cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedEntry {
    text: String,
    chars: usize,
}

impl FormattedEntry {
    /// Wraps a file as
    ///
    /// ````text
    /// // File: <path>
    /// ```
    /// <content>
    /// ```
    /// ````
    ///
    /// followed by a trailing newline after the closing fence.
    pub fn new(path: &str, content: &str) -> Self {
        let text = format!("{ENTRY_HEADER_PREFIX}{path}\n{FENCE}\n{content}\n{FENCE}\n");
        let chars = text.chars().count();
        FormattedEntry { text, chars }
    }

    pub fn from_source(file: &SourceFile) -> Self {
        FormattedEntry::new(&file.path.to_string_lossy(), &file.content)
    }

    pub fn char_len(&self) -> usize {
        self.chars
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}
