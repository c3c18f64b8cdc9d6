//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--store <dir>`: Branch store directory (overrides config)

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sdraft - Keep offline schema edits in sync with their branch
#[derive(Parser, Debug)]
#[command(name = "sdraft")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Branch store directory (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    // ========== Offline Commands ==========
    /// Check canonical metadata for structural problems
    #[command(
        name = "validate",
        long_about = "Check canonical metadata for structural problems.\n\n\
            Reports tables and columns without names and columns without types. \
            Each distinct problem is reported once. Exits with status 1 when any \
            problem is found.",
        after_help = "\
EXAMPLES:
    sdraft validate metadata.json"
    )]
    Validate {
        /// Canonical metadata JSON file
        metadata: PathBuf,
    },

    /// Rebuild an editable tree against target metadata
    #[command(
        name = "rebuild",
        long_about = "Rebuild an editable tree against target metadata.\n\n\
            Entities missing from the target are marked dropped, entities new in \
            the target are marked created, and annotations are re-attached by name. \
            Without --tree, builds a fresh tree with every entity marked normal.",
        after_help = "\
EXAMPLES:
    # First build of a session
    sdraft rebuild --target head.json > tree.json

    # Refresh an existing tree after the target changed
    sdraft rebuild --target head.json --tree tree.json"
    )]
    Rebuild {
        /// Target canonical metadata JSON file
        #[arg(long, value_name = "FILE")]
        target: PathBuf,

        /// Previous editable tree JSON file
        #[arg(long, value_name = "FILE")]
        tree: Option<PathBuf>,
    },

    /// Flatten an editable tree into canonical metadata
    #[command(
        name = "flatten",
        long_about = "Flatten an editable tree into canonical metadata.\n\n\
            Applies creates, drops and updates from the tree to the given metadata, \
            synthesizes foreign keys and regenerates annotations. Validation \
            problems of the result are printed as warnings.",
        after_help = "\
EXAMPLES:
    sdraft flatten --tree tree.json --metadata head.json > merged.json"
    )]
    Flatten {
        /// Editable tree JSON file
        #[arg(long, value_name = "FILE")]
        tree: PathBuf,

        /// Canonical metadata JSON file to merge into
        #[arg(long, value_name = "FILE")]
        metadata: PathBuf,
    },

    /// List pending changes of an editable tree
    #[command(
        name = "status",
        after_help = "\
EXAMPLES:
    # Created and dropped entities
    sdraft status --tree tree.json

    # Also columns whose fields differ from a snapshot
    sdraft status --tree tree.json --target head.json"
    )]
    Status {
        /// Editable tree JSON file
        #[arg(long, value_name = "FILE")]
        tree: PathBuf,

        /// Canonical snapshot to detect updated columns against
        #[arg(long, value_name = "FILE")]
        target: Option<PathBuf>,
    },

    // ========== Branch Store Commands ==========
    /// Print the baseline metadata of a branch
    #[command(
        name = "baseline",
        long_about = "Print the baseline metadata of a branch.\n\n\
            A personal draft takes the baseline of its parent branch, re-read \
            from the store. Any other branch uses its own baseline."
    )]
    Baseline {
        /// Branch name
        branch: String,
    },

    /// Open an editing session and print its editable tree
    #[command(name = "open")]
    Open {
        /// Branch name
        branch: String,
    },

    /// Flatten an edited tree into a branch head and save it
    #[command(
        name = "commit",
        after_help = "\
EXAMPLES:
    sdraft open main > tree.json
    # ...edit tree.json...
    sdraft commit main --tree tree.json"
    )]
    Commit {
        /// Branch name
        branch: String,

        /// Edited tree JSON file
        #[arg(long, value_name = "FILE")]
        tree: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["sdraft", "baseline", "main", "--store", "/tmp/s", "-q"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/s")));
        assert!(matches!(cli.command, Command::Baseline { branch } if branch == "main"));
    }

    #[test]
    fn rebuild_tree_is_optional() {
        let cli = Cli::try_parse_from(["sdraft", "rebuild", "--target", "t.json"]).unwrap();
        assert!(matches!(cli.command, Command::Rebuild { tree: None, .. }));
    }

    #[test]
    fn flatten_requires_metadata() {
        assert!(Cli::try_parse_from(["sdraft", "flatten", "--tree", "t.json"]).is_err());
    }
}
