use clap::{Args, Parser};

#[derive(Args, Debug, Clone, Default)]
pub struct OutputOpts {
    #[arg(
        short = 'o',
        long,
        env = "CBFG_OUTPUT_DIR",
        value_name = "DIR",
        help = "Directory to write bundles into (default: current dir).",
        help_heading = "Output"
    )]
    pub output_dir: Option<String>,

    #[arg(
        long,
        value_name = "NAME",
        help = "File name prefix for bundles [default: bundled_codebase].",
        help_heading = "Output"
    )]
    pub prefix: Option<String>,

    #[arg(
        long,
        help = "Print the run summary as JSON on stdout.",
        help_heading = "Output"
    )]
    pub json: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct LimitOpts {
    #[arg(
        long,
        env = "CBFG_CHAR_LIMIT",
        value_name = "CHARS",
        help = "Maximum characters per bundle [default: 30000].",
        help_heading = "Limits"
    )]
    pub char_limit: Option<usize>,

    #[arg(
        long,
        value_name = "SIZE_STRING",
        help = "Skip files larger than this (e.g., '100KiB', '1MB') [default: 100KiB].",
        help_heading = "Limits"
    )]
    pub max_file_size: Option<String>,

    #[arg(
        long,
        value_name = "N",
        help = "Report progress every N bundled files, 0 to disable [default: 100].",
        help_heading = "Limits"
    )]
    pub progress_every: Option<usize>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct WalkOpts {
    #[arg(
        long,
        help = "Visit directory entries in file name order instead of listing order.",
        help_heading = "Traversal"
    )]
    pub sort: bool,

    #[arg(
        long,
        help = "Follow symbolic links while walking.",
        help_heading = "Traversal"
    )]
    pub follow_links: bool,
}

#[derive(Parser, Debug)]
#[command(
    name = "cbfg",
    author,
    version,
    about = "Bundle a codebase into paste-sized text files for AI chat assistants.",
    long_about = "cbfg walks a directory, wraps every UTF-8 text file in a '// File: <path>' header \nand a fenced block, and packs the results into numbered bundle files that each stay \nunder a character limit, ready to paste into an assistant's prompt box.",
    help_template = "{about-section}\nUsage: {usage}\n\n{all-args}{after-help}",
    after_help = "IGNORE ITEMS:\n  name        skip any file or directory called 'name' (e.g. node_modules)\n  dir/        skip the directory 'dir' and everything below it\n  a/b.txt     skip that exact path (relative to the scanned directory or as printed)\n\nEXAMPLES:\n  cbfg ./my-project node_modules .git/ package-lock.json\n  cbfg . target/ --char-limit 100000 -o ~/bundles --yes",
    arg_required_else_help = true
)]
pub struct Cli {
    #[arg(value_name = "DIRECTORY", help = "Directory to scan.")]
    pub directory: String,

    #[arg(
        value_name = "IGNORE",
        help = "Files or directories to leave out (see IGNORE ITEMS)."
    )]
    pub ignore: Vec<String>,

    #[clap(flatten)]
    pub output: OutputOpts,
    #[clap(flatten)]
    pub limits: LimitOpts,
    #[clap(flatten)]
    pub walk: WalkOpts,

    #[arg(short = 'y', long, help = "Skip the confirmation prompt.")]
    pub yes: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase message verbosity (-v, -vv).")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        help = "Silence progress and success messages (warnings and errors still show)."
    )]
    pub quiet: bool,
}
