//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::{global_config_path, Settings, SettingsError};
use crate::domain::{format_tokens, DivisionMode, Expr, Order, Sample};
use crate::tree_traits::TreeNodeConvert;

/// Traversal orders in the sequence the demonstration prints them.
pub const DEMO_ORDERS: [Order; 4] = [
    Order::InOrder,
    Order::PreOrder,
    Order::PostOrder,
    Order::LevelOrder,
];

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);
    if !settings.color {
        output::disable_colors();
    }

    let expr = cli.sample.build();
    match &cli.command {
        None | Some(Commands::Demo) => _demo(&expr, &settings),
        Some(Commands::Render) => _render(&expr),
        Some(Commands::Eval { floor }) => {
            let mode = if *floor {
                DivisionMode::Floor
            } else {
                settings.division
            };
            _eval(&expr, mode)
        }
        Some(Commands::Traverse { order, separator }) => {
            let separator = separator.as_deref().unwrap_or(&settings.separator);
            _traverse(&expr, *order, separator)
        }
        Some(Commands::Tree) => _tree(&expr),
        Some(Commands::Samples) => _samples(),
        Some(Commands::Config { command }) => _config(command, &settings),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

/// Labeled traversal lines, values joined by `separator`.
pub fn traversal_lines(expr: &Expr, separator: &str) -> Vec<(&'static str, String)> {
    DEMO_ORDERS
        .iter()
        .map(|order| (order.label(), format_tokens(&expr.tokens(*order), separator)))
        .collect()
}

#[instrument(skip(expr, settings), fields(rendered = %expr))]
fn _demo(expr: &Expr, settings: &Settings) -> CliResult<()> {
    output::info(expr);
    let result = expr.evaluate_with(settings.division);
    if let Ok(value) = &result {
        output::info(value);
    }
    for (label, line) in traversal_lines(expr, &settings.separator) {
        output::labeled(label, &line);
    }
    // traversals are shown even when evaluation failed; the caller reports the error
    result?;
    Ok(())
}

#[instrument(skip(expr))]
fn _render(expr: &Expr) -> CliResult<()> {
    output::info(expr);
    Ok(())
}

#[instrument(skip(expr), fields(rendered = %expr))]
fn _eval(expr: &Expr, mode: DivisionMode) -> CliResult<()> {
    let value = expr.evaluate_with(mode)?;
    output::info(&value);
    Ok(())
}

#[instrument(skip(expr))]
fn _traverse(expr: &Expr, order: Order, separator: &str) -> CliResult<()> {
    output::info(&format_tokens(&expr.tokens(order), separator));
    Ok(())
}

#[instrument(skip(expr))]
fn _tree(expr: &Expr) -> CliResult<()> {
    output::info(&expr.to_tree_string());
    Ok(())
}

fn _samples() -> CliResult<()> {
    output::header("Samples:");
    for sample in Sample::ALL {
        output::detail(&format!("{:<12} {}", sample.name(), sample.build()));
    }
    Ok(())
}

fn _config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Path => {
            let path = global_config_path().ok_or(SettingsError::NoConfigDir)?;
            output::info(&path.display());
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}
