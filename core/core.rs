pub mod bundler;
pub mod config;
pub mod error;
pub mod gather;
pub mod output_formats;
pub mod packing;
pub mod report;
pub mod rules;

pub use bundler::{RunStatistics, bundle_directory};
pub use config::{BundlerConfig, expand_path, parse_size, resolve_root};
pub use error::{AppError, Result};
pub use gather::TreeWalker;
pub use output_formats::{FormattedEntry, SourceFile};
pub use packing::{BundlePacker, PackStats};
pub use report::{Reporter, Severity};
pub use rules::{IgnoreRule, IgnoreRules, RuleKind};
