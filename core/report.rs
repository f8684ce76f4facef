#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Side channel for human-readable progress, skip and error lines.
///
/// Nothing in the pipeline reads back what was reported, so an implementation
/// is free to drop, color or buffer messages.
pub trait Reporter {
    fn report(&self, severity: Severity, message: &str);

    fn info(&self, message: &str) {
        self.report(Severity::Info, message);
    }

    fn success(&self, message: &str) {
        self.report(Severity::Success, message);
    }

    fn warning(&self, message: &str) {
        self.report(Severity::Warning, message);
    }

    fn error(&self, message: &str) {
        self.report(Severity::Error, message);
    }
}
