//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::{Order, Variant};

/// Combinatorial decision trees: subsets, permutations, subset-permutations and N-Queens
#[derive(Parser, Debug)]
#[command(name = "combtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(long, global = true, env = "COMBTREE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Override the configured leaf limit
    #[arg(long, global = true)]
    pub max_leaves: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// All subsets (include/exclude tree)
    Subsets {
        /// Universe elements, in order
        #[arg(default_values = ["1", "2", "3", "4"])]
        elements: Vec<String>,
        #[command(flatten)]
        display: DisplayArgs,
    },

    /// All permutations (choose-next tree)
    Permutations {
        /// Universe elements, in order
        #[arg(default_values = ["1", "2", "3"])]
        elements: Vec<String>,
        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Permutations of colors (default: configured colors)
    Colors {
        /// Colors, in order
        colors: Vec<String>,
        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Ordered selections of any size, duplicates pruned
    SubsetPermutations {
        /// Universe elements, in order
        #[arg(default_values = ["A", "B"])]
        elements: Vec<String>,
        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Non-attacking queen placements
    Queens {
        /// Board size (default: configured board size)
        #[arg(short, long)]
        size: Option<usize>,
        /// Draw each solution as a board
        #[arg(long, conflicts_with_all = ["tree", "walk"])]
        boards: bool,
        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Check whether a formatted object is among the leaves
    Search {
        /// Variant to enumerate
        #[arg(value_enum)]
        variant: VariantArg,
        /// Formatted label, e.g. "{1, 3}" or "[2, 0, 3, 1]"
        label: String,
        /// Universe elements (board size for queens)
        elements: Vec<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// How an enumerated tree is printed.
#[derive(Args, Debug, Clone, Default)]
pub struct DisplayArgs {
    /// Render the decision tree
    #[arg(long, conflicts_with = "walk")]
    pub tree: bool,

    /// Print every node in the given traversal order
    #[arg(long, value_enum)]
    pub walk: Option<WalkOrder>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective settings as TOML
    Show,
    /// Print global config file path
    Path,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOrder {
    Pre,
    In,
    Post,
}

impl From<WalkOrder> for Order {
    fn from(order: WalkOrder) -> Self {
        match order {
            WalkOrder::Pre => Order::Pre,
            WalkOrder::In => Order::In,
            WalkOrder::Post => Order::Post,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantArg {
    Subsets,
    Permutations,
    Colors,
    SubsetPermutations,
    Queens,
}

impl From<VariantArg> for Variant {
    fn from(variant: VariantArg) -> Self {
        match variant {
            VariantArg::Subsets => Variant::Subsets,
            VariantArg::Permutations => Variant::Permutations,
            VariantArg::Colors => Variant::ColorPermutations,
            VariantArg::SubsetPermutations => Variant::SubsetPermutations,
            VariantArg::Queens => Variant::NQueens,
        }
    }
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
    fn given_no_elements_when_parsing_subsets_then_uses_demo_universe() {
        let cli = Cli::parse_from(["combtree", "subsets"]);
        match cli.command {
            Some(Commands::Subsets { elements, display }) => {
                assert_eq!(elements, ["1", "2", "3", "4"]);
                assert!(!display.tree);
                assert!(display.walk.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn given_global_flags_after_subcommand_when_parsing_then_accepted() {
        let cli = Cli::parse_from(["combtree", "queens", "-s", "4", "-dd", "--max-leaves", "10"]);
        assert_eq!(cli.debug, 2);
        assert_eq!(cli.max_leaves, Some(10));
        assert!(matches!(cli.command, Some(Commands::Queens { size: Some(4), .. })));
    }

    #[test]
    fn given_config_flag_when_inspecting_then_bound_to_environment() {
        let cmd = Cli::command();
        let config = cmd
            .get_arguments()
            .find(|arg| arg.get_id() == "config")
            .expect("config argument");
        assert_eq!(config.get_env(), Some(std::ffi::OsStr::new("COMBTREE_CONFIG")));
    }

    #[test]
    fn given_tree_and_walk_when_parsing_then_rejected() {
        let result = Cli::try_parse_from(["combtree", "subsets", "--tree", "--walk", "pre"]);
        assert!(result.is_err());
    }
}
