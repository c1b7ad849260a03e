//! Interactive calculator loop.
//!
//! Reads one arithmetic expression per line, evaluates it, and prints the
//! result. Parse errors are rendered as full diagnostics against the line
//! that produced them and never terminate the loop.

use std::io::{self, Write};

use crate::errors::print_error;
use crate::grammars::calc;

/// Main REPL entry point.
pub fn run_repl() {
    println!("descent calc v{}", env!("CARGO_PKG_VERSION"));
    println!("Type :help for help, :quit to exit");
    println!();

    let mut line_number = 1usize;
    loop {
        print!("> ");
        io::stdout().flush().expect("stdout is writable");

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                // EOF (Ctrl+D)
                println!();
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line.starts_with(':') {
                    match handle_command(line) {
                        ReplCommand::Continue => continue,
                        ReplCommand::Quit => break,
                    }
                }

                let source_name = format!("<repl:{line_number}>");
                match calc::eval(line) {
                    Ok(value) => println!("{value}"),
                    Err(e) => print_error(e, &source_name, line),
                }
                line_number += 1;
            }
            Err(e) => {
                eprintln!("Error reading input: {e}");
                break;
            }
        }
    }
}

enum ReplCommand {
    Continue,
    Quit,
}

fn handle_command(command: &str) -> ReplCommand {
    match command.to_ascii_lowercase().as_str() {
        ":help" | ":h" => {
            println!("Commands:");
            println!("  :help, :h     Show this help");
            println!("  :quit, :q     Exit");
            println!();
            println!("Enter an arithmetic expression to evaluate it,");
            println!("e.g. (1 + 2) * 3.5");
            ReplCommand::Continue
        }
        ":quit" | ":q" => ReplCommand::Quit,
        other => {
            println!("Unknown command: {other} (try :help)");
            ReplCommand::Continue
        }
    }
}
