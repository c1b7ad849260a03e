//! An arithmetic-expression evaluator.
//!
//! Four rules (`expression`, `term`, `factor`, `number`) encode the usual
//! precedence: `+`/`-` bind loosest, `*`/`/` tighter, parentheses tightest.
//! Both operator levels are left-associative, built by iterating
//! `maybe_keyword` rather than by recursion. Division is plain `f64`
//! division.

use crate::engine::{parse, Grammar, Parser, Production};
use crate::errors::{ParseError, ParseResult};

/// Evaluates one arithmetic expression to completion.
pub fn eval(input: &str) -> ParseResult<f64> {
    parse(&CalcGrammar, input)
}

pub struct CalcGrammar;

impl Grammar for CalcGrammar {
    type Value = f64;

    fn start_rule(&self) -> &'static str {
        "expression"
    }

    fn production(&self, name: &str) -> Option<Production<Self>> {
        match name {
            "expression" => Some(expression),
            "term" => Some(term),
            "factor" => Some(factor),
            "number" => Some(number),
            _ => None,
        }
    }
}

fn expression(p: &mut Parser<CalcGrammar>) -> ParseResult<f64> {
    let mut value = p.match_rule(&["term"])?;
    while let Some(op) = p.maybe_keyword(&["+", "-"]) {
        let rhs = p.match_rule(&["term"])?;
        if op == "+" {
            value += rhs;
        } else {
            value -= rhs;
        }
    }
    Ok(value)
}

fn term(p: &mut Parser<CalcGrammar>) -> ParseResult<f64> {
    let mut value = p.match_rule(&["factor"])?;
    while let Some(op) = p.maybe_keyword(&["*", "/"]) {
        let rhs = p.match_rule(&["factor"])?;
        if op == "*" {
            value *= rhs;
        } else {
            value /= rhs;
        }
    }
    Ok(value)
}

fn factor(p: &mut Parser<CalcGrammar>) -> ParseResult<f64> {
    if p.maybe_keyword(&["("]).is_some() {
        let value = p.match_rule(&["expression"])?;
        p.keyword(&[")"])?;
        return Ok(value);
    }
    p.match_rule(&["number"])
}

fn number(p: &mut Parser<CalcGrammar>) -> ParseResult<f64> {
    let mut text = String::new();

    if let Some(sign) = p.maybe_keyword(&["+", "-"]) {
        text.push_str(sign);
    }

    text.push(p.char("0-9")?);
    while let Some(digit) = p.maybe_char("0-9") {
        text.push(digit);
    }

    if p.maybe_char(".").is_some() {
        text.push('.');
        text.push(p.char("0-9")?);
        while let Some(digit) = p.maybe_char("0-9") {
            text.push(digit);
        }
    }

    text.parse::<f64>()
        .map_err(|_| ParseError::invalid(p.pos(), format!("invalid number `{text}`"), p.found()))
}
