//! Command dispatch: one handler per subcommand

use std::fmt::Display;
use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, EnumerationService};
use crate::cli::args::{Cli, Commands, ConfigCommands, DisplayArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{DecisionTree, Order, Variant};
use crate::exitcode;
use crate::tree_traits::{node_text, TreeNodeConvert};

/// Run the parsed command line, returning the process exit code.
pub fn execute_command(cli: &Cli) -> CliResult<i32> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage("no command given, see --help".into()));
    };

    match command {
        Commands::Completion { shell } => {
            cmd_completion(*shell);
            Ok(exitcode::OK)
        }
        Commands::Subsets { elements, display } => {
            cmd_enumerate(&load_settings(cli)?, Variant::Subsets, elements, display)
        }
        Commands::Permutations { elements, display } => {
            cmd_enumerate(&load_settings(cli)?, Variant::Permutations, elements, display)
        }
        Commands::Colors { colors, display } => {
            let settings = load_settings(cli)?;
            let colors = if colors.is_empty() {
                &settings.colors
            } else {
                colors
            };
            cmd_enumerate(&settings, Variant::ColorPermutations, colors, display)
        }
        Commands::SubsetPermutations { elements, display } => cmd_enumerate(
            &load_settings(cli)?,
            Variant::SubsetPermutations,
            elements,
            display,
        ),
        Commands::Queens {
            size,
            boards,
            display,
        } => {
            let settings = load_settings(cli)?;
            let size = size.unwrap_or(settings.board_size);
            cmd_queens(&settings, size, *boards, display)
        }
        Commands::Search {
            variant,
            label,
            elements,
        } => cmd_search(&load_settings(cli)?, (*variant).into(), label, elements),
        Commands::Config { command } => cmd_config(&load_settings(cli)?, command),
    }
}

/// Layered settings with command-line overrides applied last.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(max_leaves) = cli.max_leaves {
        settings.max_leaves = max_leaves;
    }
    debug!(?settings, "effective settings");
    Ok(settings)
}

fn cmd_completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

#[instrument(level = "debug", skip(settings, display))]
fn cmd_enumerate(
    settings: &Settings,
    variant: Variant,
    elements: &[String],
    display: &DisplayArgs,
) -> CliResult<i32> {
    let service = EnumerationService::new(settings);
    let tree = service.enumerate(variant, elements.to_vec())?;
    render(&tree, display)?;
    Ok(exitcode::OK)
}

#[instrument(level = "debug", skip(settings, display))]
fn cmd_queens(
    settings: &Settings,
    size: usize,
    boards: bool,
    display: &DisplayArgs,
) -> CliResult<i32> {
    let service = EnumerationService::new(settings);
    let tree = service.queens(size)?;

    if boards {
        for (i, (label, columns)) in tree.leaves().iter().zip(tree.values()).enumerate() {
            output::header(&format!("Solution {}: {}", i + 1, label));
            output::info(&output::board(columns));
        }
        print_statistics(&tree);
    } else {
        render(&tree, display)?;
    }
    Ok(exitcode::OK)
}

#[instrument(level = "debug", skip(settings))]
fn cmd_search(
    settings: &Settings,
    variant: Variant,
    label: &str,
    elements: &[String],
) -> CliResult<i32> {
    let service = EnumerationService::new(settings);
    let outcome = match variant {
        Variant::NQueens => {
            let size = match elements {
                [] => settings.board_size,
                [size] => size
                    .parse()
                    .map_err(|_| CliError::InvalidArgs(format!("board size: {size}")))?,
                _ => {
                    return Err(CliError::InvalidArgs(
                        "queens takes a single board size".into(),
                    ))
                }
            };
            service.search_queens(label, size)?
        }
        Variant::ColorPermutations if elements.is_empty() => {
            service.search(variant, label, settings.colors.clone())?
        }
        _ => service.search(variant, label, elements.to_vec())?,
    };

    let summary = format!(
        "{} among {} {} leaves ({})",
        outcome.label, outcome.leaves, variant, outcome.strategy
    );
    if outcome.found {
        output::success(&format!("found: {summary}"));
        Ok(exitcode::OK)
    } else {
        output::failure(&format!("not found: {summary}"));
        Ok(exitcode::NOT_FOUND)
    }
}

fn cmd_config(settings: &Settings, command: &ConfigCommands) -> CliResult<i32> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Path => {
            let path = global_config_path().ok_or_else(|| ApplicationError::Config {
                message: "cannot determine config directory".into(),
            })?;
            output::info(&path.display());
        }
    }
    Ok(exitcode::OK)
}

fn render<T: Display>(tree: &DecisionTree<T>, display: &DisplayArgs) -> CliResult<()> {
    if display.tree {
        output::info(&tree.to_tree_string());
    } else if let Some(order) = display.walk {
        print_walk(tree, order.into())?;
    } else {
        print_mapping(tree);
    }
    Ok(())
}

fn print_mapping<T>(tree: &DecisionTree<T>) {
    output::header(&format!("{} mapping:", tree.variant()));
    for (i, label) in tree.leaves().iter().enumerate() {
        output::numbered(i, label);
    }
    print_statistics(tree);
}

fn print_walk<T: Display>(tree: &DecisionTree<T>, order: Order) -> CliResult<()> {
    let walk = tree.walk(order)?;
    output::header(&format!("{} of {}:", order, tree.variant()));
    for (idx, node) in walk {
        let indent = "  ".repeat(node.depth);
        output::info(&format!("{indent}{}", node_text(tree.arena(), idx)));
    }
    Ok(())
}

fn print_statistics<T>(tree: &DecisionTree<T>) {
    let stats = tree.stats();
    output::header("Statistics:");
    output::detail(&format!("universe: {} elements", tree.universe().len()));
    output::detail(&format!("nodes: {}", tree.node_count()));
    output::detail(&format!("depth: {}", tree.depth()));
    if stats.duplicates_pruned > 0 {
        output::detail(&format!("duplicates pruned: {}", stats.duplicates_pruned));
    }
    if stats.dead_ends > 0 {
        output::detail(&format!("dead ends pruned: {}", stats.dead_ends));
    }

    let count = tree.count();
    match tree.expected_count() {
        Some(expected) if expected == count as u128 => {
            output::success(&format!("leaves: {count} (expected {expected})"));
        }
        Some(expected) if tree.variant().suppresses_duplicates() => {
            output::success(&format!("leaves: {count} (at most {expected})"));
        }
        Some(expected) => {
            output::warning(&format!("leaves: {count}, expected {expected}"));
        }
        None => output::detail(&format!("leaves: {count}")),
    }
}
