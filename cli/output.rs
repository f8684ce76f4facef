use anyhow::{Context, Result};
use cbfg_core::{Reporter, RunStatistics, Severity};
use colored::*;
use std::io::{self, Write};

/// Colored console side channel.
///
/// Info and success lines go to stdout unless `quiet` is set; warnings and
/// errors always go to stderr. With `stderr_only` nothing touches stdout,
/// which keeps `--json` output parseable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter {
    pub quiet: bool,
    pub stderr_only: bool,
}

impl Reporter for ConsoleReporter {
    fn report(&self, severity: Severity, message: &str) {
        let line = match severity {
            Severity::Info => message.cyan(),
            Severity::Success => message.green(),
            Severity::Warning => message.yellow(),
            Severity::Error => message.red(),
        };
        match severity {
            Severity::Info | Severity::Success if self.quiet => {}
            Severity::Info | Severity::Success if !self.stderr_only => println!("{}", line),
            _ => eprintln!("{}", line),
        }
    }
}

pub fn print_summary(stats: &RunStatistics) {
    println!(
        "{}",
        format!("Total number of files processed: {}", stats.files_processed).green()
    );
    println!(
        "{}",
        format!(
            "Bundles written to directory: {}",
            stats.output_dir.display()
        )
        .cyan()
    );
    println!(
        "{}",
        format!("Total number of bundles written: {}", stats.bundles_written).green()
    );
    println!(
        "{}",
        format!(
            "Total characters written across all bundles: {}",
            stats.total_characters
        )
        .green()
    );
    if stats.files_skipped > 0 {
        println!(
            "{}",
            format!("Files skipped: {}", stats.files_skipped).yellow()
        );
    }
    if stats.bundles_failed > 0 {
        println!(
            "{}",
            format!("Bundles that failed to write: {}", stats.bundles_failed).red()
        );
    }
    if stats.bundles_written > 0 {
        println!(
            "{}",
            format!(
                "Tell the assistant you are about to paste the entire codebase in {} part(s) and that it should only respond once you say you are finished. Then paste the bundles in order.",
                stats.bundles_written
            )
            .yellow()
        );
    }
}

pub fn print_summary_json(stats: &RunStatistics) -> Result<()> {
    let content =
        serde_json::to_string_pretty(stats).context("Failed to serialize run summary")?;
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", content).context("Failed to write to stdout")?;
    handle.flush().context("Failed to flush stdout")?;
    Ok(())
}
