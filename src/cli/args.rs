//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::{Order, Sample};

/// Binary expression trees: build, evaluate, render and traverse
#[derive(Parser, Debug)]
#[command(name = "exprtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output on stderr (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (default: $XDG_CONFIG_HOME/exprtree/exprtree.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Built-in expression: classic, leaf, div-by-zero, negative
    #[arg(short, long, global = true, default_value = "classic")]
    pub sample: Sample,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render, evaluate and print all traversals (default)
    Demo,

    /// Print the fully parenthesized expression
    Render,

    /// Evaluate the expression
    Eval {
        /// Floor division instead of the configured mode
        #[arg(long)]
        floor: bool,
    },

    /// Print one traversal order
    Traverse {
        /// pre, in, post or level
        order: Order,
        /// Separator between values (default: from config)
        #[arg(long)]
        separator: Option<String>,
    },

    /// Show the expression as a tree
    Tree,

    /// List built-in expressions
    Samples,

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

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective config
    Show,

    /// Show config path
    Path,

    /// Print config template
    Template,
}
