use crate::cli_args::Cli;
use crate::output::{self, ConsoleReporter};
use crate::prompt;
use anyhow::{Context, Result};
use cbfg_core::{self as core, BundlerConfig, IgnoreRules, Reporter};
use log;
use std::io;

pub fn handle_bundle_command(cli: &Cli) -> Result<()> {
    let config = build_config(cli)?;
    config.validate()?;
    log::debug!("Effective config: {:?}", config);

    let root = core::resolve_root(&cli.directory)?;
    log::info!("Scan root determined: {}", root.display());

    let reporter = ConsoleReporter {
        quiet: cli.quiet,
        stderr_only: cli.output.json,
    };

    if !cli.yes {
        let message = format!("Are you sure you want to scan {}? (y/n) ", root.display());
        let confirmed = {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            if cli.output.json {
                prompt::confirm_action(&message, &mut input, &mut io::stderr())
            } else {
                prompt::confirm_action(&message, &mut input, &mut io::stdout())
            }
        }
        .context("Failed to read confirmation from stdin")?;

        if !confirmed {
            reporter.error("Operation cancelled by user.");
            return Ok(());
        }
    }

    let rules = IgnoreRules::from_items(&cli.ignore);
    if rules.is_empty() {
        log::info!("No ignore items given, every file under the root is a candidate.");
    }
    let stats = core::bundle_directory(&root, &rules, &config, &reporter)
        .context("Failed to bundle directory")?;

    if cli.output.json {
        output::print_summary_json(&stats)?;
    } else {
        output::print_summary(&stats);
    }
    Ok(())
}

fn build_config(cli: &Cli) -> Result<BundlerConfig> {
    let mut config = BundlerConfig {
        sort_entries: cli.walk.sort,
        follow_links: cli.walk.follow_links,
        ..BundlerConfig::default()
    };

    if let Some(dir) = &cli.output.output_dir {
        config.output_dir = core::expand_path(dir);
    }
    if let Some(prefix) = &cli.output.prefix {
        config.bundle_prefix = prefix.clone();
    }
    if let Some(limit) = cli.limits.char_limit {
        config.char_limit = limit;
    }
    if let Some(size) = &cli.limits.max_file_size {
        config.max_file_size = core::parse_size(size)?;
    }
    if let Some(every) = cli.limits.progress_every {
        config.progress_every = every;
    }
    Ok(config)
}
