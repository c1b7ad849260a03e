//! Proof-of-use grammars built on the engine.
//!
//! These are consumers of the core, not part of it: each one is just a
//! start rule, a name-to-production table, and productions written against
//! the engine's primitives.

pub mod calc;
pub mod json;
