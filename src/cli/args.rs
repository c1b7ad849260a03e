//! Defines the command-line arguments and subcommands for the descent CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "descent",
    version,
    about = "A hand-rolled backtracking parsing engine with demo grammars."
)]
pub struct DescentArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate an arithmetic expression and print the result.
    Eval {
        /// The expression to evaluate, e.g. "(1 + 2) * 3".
        #[arg(required = true)]
        expr: String,
    },
    /// Parse a data file (or stdin) and print it as canonical JSON.
    Data {
        /// The path to the data file to read; stdin when omitted.
        file: Option<PathBuf>,
    },
    /// Start the interactive calculator.
    Repl,
}
