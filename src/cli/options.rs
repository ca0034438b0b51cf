use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// FQCN converter CLI interface
#[derive(Parser)]
#[command(name = "fqcn-converter")]
#[command(about = "Convert Ansible content from short module names to fully qualified collection names")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct FqcnConverterCli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite short module names to FQCN in playbooks and task files
    Convert {
        /// Files or directories to convert (directories are walked recursively)
        paths: Vec<PathBuf>,

        /// Custom mapping file merged over the built-in defaults
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Compute conversions without writing any file
        #[arg(long)]
        dry_run: bool,

        /// Stop the batch at the first failed file
        #[arg(long)]
        stop_on_error: bool,

        /// Write a JSON report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Score files for FQCN compliance without modifying them
    Validate {
        /// Files or directories to validate
        paths: Vec<PathBuf>,

        /// Custom mapping file merged over the built-in defaults
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Exit non-zero when any file is not fully compliant
        #[arg(long)]
        strict: bool,
    },
}
