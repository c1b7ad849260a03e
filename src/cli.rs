//! The descent command-line interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the library: the arithmetic evaluator for `eval`/`repl`, the data-format
//! reader for `data`.

use std::io::Read;
use std::path::Path;
use std::{fs, io, process};

use clap::Parser;

use crate::cli::args::{Command, DescentArgs};
use crate::errors::print_error;
use crate::grammars::{calc, json};
use crate::repl;

pub mod args;

/// The main entry point for the CLI.
pub fn run() {
    let args = DescentArgs::parse();

    let result = match args.command {
        Command::Eval { expr } => handle_eval(&expr),
        Command::Data { file } => handle_data(file.as_deref()),
        Command::Repl => {
            repl::run_repl();
            Ok(())
        }
    };

    if result.is_err() {
        process::exit(1);
    }
}

fn handle_eval(expr: &str) -> Result<(), ()> {
    match calc::eval(expr) {
        Ok(value) => {
            println!("{value}");
            Ok(())
        }
        Err(e) => {
            print_error(e, "<expr>", expr);
            Err(())
        }
    }
}

fn handle_data(path: Option<&Path>) -> Result<(), ()> {
    let (source_name, source) = match read_input(path) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error reading input: {e}");
            return Err(());
        }
    };

    match json::read(&source) {
        Ok(value) => {
            // Canonical JSON output; the parsed dialect (comments, single
            // quotes) does not survive re-serialization.
            match serde_json::to_string_pretty(&value) {
                Ok(rendered) => {
                    println!("{rendered}");
                    Ok(())
                }
                Err(e) => {
                    eprintln!("Error rendering value: {e}");
                    Err(())
                }
            }
        }
        Err(e) => {
            print_error(e, &source_name, &source);
            Err(())
        }
    }
}

fn read_input(path: Option<&Path>) -> io::Result<(String, String)> {
    match path {
        Some(path) => {
            let source = fs::read_to_string(path)?;
            Ok((path.display().to_string(), source))
        }
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(("<stdin>".to_string(), source))
        }
    }
}
