//! descent: a hand-rolled, backtracking, rule-dispatching matching engine.
//!
//! Grammars are sets of named productions interpreted by an ordered-choice
//! dispatcher over a shared cursor; see [`engine`] for the core and
//! [`grammars`] for two proof-of-use consumers (an arithmetic evaluator and
//! a JSON-like data reader).

pub use crate::engine::{parse, CharClass, Cursor, Grammar, Parser, Production};
pub use crate::errors::{print_error, ErrorKind, Found, ParseError, ParseResult};

pub mod cli;
pub mod engine;
pub mod errors;
pub mod grammars;
pub mod repl;
