//! The generic matching and backtracking engine.
//!
//! A grammar is a set of named rule productions dispatched by name through
//! [`Parser::match_rule`], an ordered choice: candidates are tried in the
//! order listed and the first success wins, PEG-style. Every primitive comes
//! in a raising flavor (`char`, `keyword`, `match_rule`), which returns
//! `Result` and commits, and a non-raising flavor (`maybe_char`,
//! `maybe_keyword`, `maybe_match`), which converts failure into `None` and
//! leaves the position where it started.
//!
//! The engine is a plain recursive call tree: productions call back into the
//! dispatcher, and backtracking is nothing more than a failed call unwinding
//! while a sibling alternative is retried from a restored cursor position.
//! Left recursion is unsupported and will recurse until the stack runs out.

pub mod class;
pub mod cursor;

use std::collections::HashMap;

pub use class::CharClass;
pub use cursor::Cursor;

use crate::errors::{Found, ParseError, ParseResult};

/// A rule production: a named computation over the shared parser state that
/// yields the grammar's value type or fails with a [`ParseError`].
pub type Production<G> = fn(&mut Parser<'_, '_, G>) -> ParseResult<<G as Grammar>::Value>;

/// A concrete grammar: a start rule, a name-to-production mapping, and an
/// overridable trivia hook.
///
/// The mapping is consulted on every dispatch; an unmapped name is a bug in
/// the grammar and makes the dispatcher panic rather than report a parse
/// failure.
pub trait Grammar: Sized {
    /// The value every rule production of this grammar yields.
    type Value;

    /// Name of the rule a top-level [`parse`] begins with.
    fn start_rule(&self) -> &'static str;

    /// Resolves a rule name to its production.
    fn production(&self, name: &str) -> Option<Production<Self>>;

    /// Advances the cursor over ignorable input. Invoked before keyword and
    /// rule matching, and once at the start of a parse. The default skips
    /// plain whitespace; grammars override this to also skip comments.
    fn skip_trivia(&self, cursor: &mut Cursor<'_>) {
        while let Some(ch) = cursor.peek() {
            if !matches!(ch, ' ' | '\t' | '\r' | '\n' | '\x0b' | '\x0c') {
                break;
            }
            cursor.advance();
        }
    }
}

/// Parses `input` with `grammar`: skips leading trivia, matches the start
/// rule, and requires the cursor to reach end of input afterward.
///
/// This is the only place a [`ParseError`] is meant to escape to a caller;
/// everything below it either propagates or converts to `None`.
pub fn parse<G: Grammar>(grammar: &G, input: &str) -> ParseResult<G::Value> {
    let mut parser = Parser::new(grammar, input);
    parser.skip_trivia();
    let value = parser.match_rule(&[grammar.start_rule()])?;
    parser.expect_end()?;
    Ok(value)
}

/// One in-progress parse: a cursor over the input, a reference to the
/// grammar being interpreted, and a cache of compiled character classes.
///
/// Productions receive `&mut Parser` and drive the parse exclusively through
/// the primitives below (plus [`Parser::save`]/[`Parser::restore`] for
/// grammar-side backtracking). A parser is single-use: construct a fresh one
/// per input.
pub struct Parser<'g, 's, G: Grammar> {
    grammar: &'g G,
    cursor: Cursor<'s>,
    // Compiled classes keyed by their spec string, so a rule matching in a
    // loop does not re-parse its class on every character.
    classes: HashMap<String, CharClass>,
}

impl<'g, 's, G: Grammar> Parser<'g, 's, G> {
    pub fn new(grammar: &'g G, input: &'s str) -> Self {
        Self {
            grammar,
            cursor: Cursor::new(input),
            classes: HashMap::new(),
        }
    }

    /// Current byte offset into the input.
    pub fn pos(&self) -> usize {
        self.cursor.pos()
    }

    /// The character at the current position, as error context.
    pub fn found(&self) -> Found {
        Found::from(self.cursor.peek())
    }

    /// Captures the current position for a later [`Parser::restore`].
    pub fn save(&self) -> usize {
        self.cursor.save()
    }

    /// Resets the position to a previously saved mark.
    pub fn restore(&mut self, mark: usize) {
        self.cursor.restore(mark);
    }

    /// Runs the grammar's trivia hook at the current position.
    pub fn skip_trivia(&mut self) {
        self.grammar.skip_trivia(&mut self.cursor);
    }

    /// Matches one character against a class specification and returns it.
    ///
    /// The empty specification accepts any character. Fails without
    /// consuming anything if the cursor is exhausted or the next character
    /// is outside the class. Does not skip trivia.
    pub fn char(&mut self, class: &str) -> ParseResult<char> {
        let Some(ch) = self.cursor.peek() else {
            return Err(ParseError::end_of_input(
                self.cursor.pos(),
                class_expectation(class),
            ));
        };
        if !self.class_matches(class, ch) {
            return Err(ParseError::class_mismatch(self.cursor.pos(), class, ch));
        }
        self.cursor.advance();
        Ok(ch)
    }

    /// Non-raising [`Parser::char`]: `None` instead of an error, position
    /// untouched on failure.
    pub fn maybe_char(&mut self, class: &str) -> Option<char> {
        self.char(class).ok()
    }

    /// Matches one of several literal keywords, first match wins.
    ///
    /// Trivia is skipped before the attempt and after a successful match.
    /// Candidate order is caller-significant: a candidate that is a prefix
    /// of another shadows it, so list the longer literal first when both
    /// should be reachable. On failure the cursor stays where the candidates
    /// were tried, past any skipped trivia but never past literal content.
    pub fn keyword(&mut self, candidates: &[&str]) -> ParseResult<&'s str> {
        assert!(
            !candidates.is_empty(),
            "keyword requires at least one candidate literal"
        );
        self.skip_trivia();
        if self.cursor.is_at_end() {
            return Err(ParseError::end_of_input(
                self.cursor.pos(),
                keyword_expectation(candidates),
            ));
        }
        for literal in candidates {
            if let Some(matched) = self.cursor.consume(literal) {
                self.skip_trivia();
                return Ok(matched);
            }
        }
        Err(ParseError::keyword_mismatch(
            self.cursor.pos(),
            candidates,
            self.found(),
        ))
    }

    /// Non-raising [`Parser::keyword`]. Trivia consumed before the failed
    /// attempt is not restored; trivia is not content.
    pub fn maybe_keyword(&mut self, candidates: &[&str]) -> Option<&'s str> {
        self.keyword(candidates).ok()
    }

    /// Ordered choice over named rules: tries each candidate in the order
    /// listed, restoring the cursor between attempts, and returns the first
    /// success.
    ///
    /// When every candidate fails, the failure that reached furthest into
    /// the input is reported: the furthest candidate's own error if it is
    /// alone at that offset, or an all-alternatives-failed error naming the
    /// tied rules. A rule name with no production panics.
    pub fn match_rule(&mut self, rules: &[&str]) -> ParseResult<G::Value> {
        assert!(!rules.is_empty(), "match_rule requires at least one rule");
        self.skip_trivia();
        let entry = self.cursor.save();

        let mut furthest: Option<ParseError> = None;
        let mut furthest_rules: Vec<&str> = Vec::new();

        for &name in rules {
            let production = self
                .grammar
                .production(name)
                .unwrap_or_else(|| panic!("no production registered for rule `{name}`"));
            match production(self) {
                Ok(value) => {
                    self.skip_trivia();
                    return Ok(value);
                }
                Err(err) => {
                    self.cursor.restore(entry);
                    match &furthest {
                        Some(best) if err.position < best.position => {}
                        Some(best) if err.position == best.position => {
                            furthest_rules.push(name);
                        }
                        _ => {
                            furthest = Some(err);
                            furthest_rules = vec![name];
                        }
                    }
                }
            }
        }

        // `rules` is non-empty, so at least one failure was recorded.
        let best = furthest.unwrap();
        if furthest_rules.len() == 1 {
            return Err(best);
        }
        let found = Found::from(self.cursor.char_at(best.position));
        Err(ParseError::no_alternative(
            best.position,
            furthest_rules.iter().map(|r| r.to_string()).collect(),
            found,
        ))
    }

    /// Non-raising [`Parser::match_rule`]: `None` when every candidate
    /// fails, with the position restored to the entry offset.
    pub fn maybe_match(&mut self, rules: &[&str]) -> Option<G::Value> {
        let entry = self.cursor.save();
        match self.match_rule(rules) {
            Ok(value) => Some(value),
            Err(_) => {
                self.cursor.restore(entry);
                None
            }
        }
    }

    fn expect_end(&mut self) -> ParseResult<()> {
        if let Some(ch) = self.cursor.peek() {
            return Err(ParseError::trailing_input(
                self.cursor.pos(),
                Found::Char(ch),
            ));
        }
        Ok(())
    }

    fn class_matches(&mut self, spec: &str, ch: char) -> bool {
        if let Some(class) = self.classes.get(spec) {
            return class.matches(ch);
        }
        let class = CharClass::new(spec);
        let matched = class.matches(ch);
        self.classes.insert(spec.to_string(), class);
        matched
    }
}

fn class_expectation(class: &str) -> String {
    if class.is_empty() {
        "any character".to_string()
    } else {
        format!("a character matching [{class}]")
    }
}

fn keyword_expectation(candidates: &[&str]) -> String {
    format!(
        "one of {}",
        candidates
            .iter()
            .map(|c| format!("`{c}`"))
            .collect::<Vec<_>>()
            .join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    /// A grammar that matches a single digit, used to exercise the engine
    /// without any recursion.
    struct Digit;

    impl Grammar for Digit {
        type Value = char;

        fn start_rule(&self) -> &'static str {
            "digit"
        }

        fn production(&self, name: &str) -> Option<Production<Self>> {
            match name {
                "digit" => Some(|p| p.char("0-9")),
                _ => None,
            }
        }
    }

    #[test]
    fn parse_single_digit() {
        assert_eq!(parse(&Digit, "7").unwrap(), '7');
    }

    #[test]
    fn parse_skips_surrounding_trivia() {
        assert_eq!(parse(&Digit, "  7\t").unwrap(), '7');
    }

    #[test]
    fn trailing_input_is_reported() {
        let err = parse(&Digit, "12").unwrap_err();
        assert_eq!(err.kind, ErrorKind::TrailingInput);
        assert_eq!(err.position, 1);
        assert_eq!(err.found, Found::Char('2'));
    }

    #[test]
    fn empty_input_fails_with_end_of_input() {
        let err = parse(&Digit, "").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::EndOfInput { .. }));
        assert_eq!(err.position, 0);
    }

    #[test]
    #[should_panic(expected = "no production registered")]
    fn unknown_rule_panics() {
        let grammar = Digit;
        let mut parser = Parser::new(&grammar, "7");
        let _ = parser.match_rule(&["no_such_rule"]);
    }

    #[test]
    fn class_cache_is_reused() {
        let grammar = Digit;
        let mut parser = Parser::new(&grammar, "12a");
        assert_eq!(parser.char("0-9").unwrap(), '1');
        assert_eq!(parser.char("0-9").unwrap(), '2');
        assert_eq!(parser.classes.len(), 1);
        assert!(parser.char("0-9").is_err());
    }
}
