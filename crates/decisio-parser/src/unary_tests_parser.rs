//! Unary tests compiler
//!
//! Decision table input entries are written as tests against the current
//! input value rather than as full expressions:
//!
//! - `-` or an empty cell matches anything
//! - `"Winter"`, `42`, `season` test for equality
//! - `< 10`, `>= limit`, `!= "Spring"` compare the input with an operand
//! - `[1..5]`, `(1..5)`, `]1..5[`, `[1..5[` test ranges
//! - `"Spring", "Summer"` match if any alternative matches
//! - `not("Spring", "Summer")` negates the alternatives
//!
//! Every form compiles into a boolean [`Expression`] over the input variable.

use crate::error::{ParseError, Result};
use crate::expression_parser::ExpressionParser;
use decisio_core::ast::{Expression, Operator, UnaryOperator};
use decisio_core::Value;

/// Comparison prefixes, longest first
const COMPARISON_PREFIXES: &[(&str, Operator)] = &[
    ("<=", Operator::Le),
    (">=", Operator::Ge),
    ("!=", Operator::Ne),
    ("==", Operator::Eq),
    ("<", Operator::Lt),
    (">", Operator::Gt),
    ("=", Operator::Eq),
];

/// Unary tests compiler
pub struct UnaryTestsParser;

impl UnaryTestsParser {
    /// Compile unary tests into a boolean expression over `input_variable`
    pub fn parse(text: &str, input_variable: &str) -> Result<Expression> {
        let text = text.trim();
        if text.is_empty() || text == "-" {
            return Ok(Expression::literal(Value::Bool(true)));
        }

        let tests = Self::split_alternatives(text)
            .into_iter()
            .map(|test| Self::parse_test(test, input_variable))
            .collect::<Result<Vec<_>>>()?;

        Expression::chain(Operator::Or, tests)
            .ok_or_else(|| ParseError::InvalidExpression(format!("Empty unary tests: {}", text)))
    }

    fn parse_test(test: &str, input_variable: &str) -> Result<Expression> {
        if test.is_empty() {
            return Err(ParseError::InvalidExpression(
                "Empty alternative in unary tests".to_string(),
            ));
        }

        if let Some(inner) = Self::negated(test) {
            return Ok(Expression::unary(
                UnaryOperator::Not,
                Self::parse(inner, input_variable)?,
            ));
        }

        if let Some(range) = Self::parse_range(test, input_variable)? {
            return Ok(range);
        }

        let input = Expression::variable(input_variable);
        for (prefix, op) in COMPARISON_PREFIXES {
            if let Some(operand) = test.strip_prefix(prefix) {
                return Ok(Expression::binary(
                    input,
                    *op,
                    ExpressionParser::parse(operand)?,
                ));
            }
        }

        Ok(Expression::binary(
            input,
            Operator::Eq,
            ExpressionParser::parse(test)?,
        ))
    }

    /// The body of a `not(...)` test, if `test` is one
    fn negated(test: &str) -> Option<&str> {
        let body = test.strip_prefix("not")?.trim_start();
        let inner = body.strip_prefix('(')?.strip_suffix(')')?;
        // `not(a) == not(b)` style text is not a single negation
        (Self::paren_balance(inner) == 0).then_some(inner)
    }

    fn parse_range(test: &str, input_variable: &str) -> Result<Option<Expression>> {
        // a lone bracket is both the opening and the closing character
        if test.len() < 2 {
            return Ok(None);
        }
        let (Some(open), Some(close)) = (test.chars().next(), test.chars().last()) else {
            return Ok(None);
        };
        if !matches!(open, '[' | '(' | ']') || !matches!(close, ']' | ')' | '[') {
            return Ok(None);
        }

        let body = &test[1..test.len() - 1];
        let Some((low, high)) = body.split_once("..") else {
            return Ok(None);
        };

        let lower_op = if open == '[' { Operator::Ge } else { Operator::Gt };
        let upper_op = if close == ']' { Operator::Le } else { Operator::Lt };
        let input = Expression::variable(input_variable);

        Ok(Some(Expression::binary(
            Expression::binary(input.clone(), lower_op, ExpressionParser::parse(low)?),
            Operator::And,
            Expression::binary(input, upper_op, ExpressionParser::parse(high)?),
        )))
    }

    /// Split alternatives on commas outside strings and call parentheses.
    ///
    /// Range brackets do not nest (`]1..5[` is valid), so only a `(` that
    /// directly follows a name opens a group.
    fn split_alternatives(text: &str) -> Vec<&str> {
        let bytes = text.as_bytes();
        let mut parts = Vec::new();
        let mut start = 0;
        let mut depth = 0usize;
        let mut quote: Option<u8> = None;

        for (i, &b) in bytes.iter().enumerate() {
            if let Some(q) = quote {
                if b == q && (i == 0 || bytes[i - 1] != b'\\') {
                    quote = None;
                }
                continue;
            }
            match b {
                b'"' | b'\'' => quote = Some(b),
                b'(' if i > 0 && (bytes[i - 1].is_ascii_alphanumeric() || bytes[i - 1] == b'_') => {
                    depth += 1
                }
                b')' if depth > 0 => depth -= 1,
                b',' if depth == 0 => {
                    parts.push(text[start..i].trim());
                    start = i + 1;
                }
                _ => {}
            }
        }
        parts.push(text[start..].trim());

        parts
    }

    /// Parenthesis balance of `text`; negative as soon as a `)` closes too early
    fn paren_balance(text: &str) -> isize {
        let mut depth: isize = 0;
        let mut quote: Option<char> = None;
        for c in text.chars() {
            match (quote, c) {
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '"' | '\'') => quote = Some(c),
                (None, '(') => depth += 1,
                (None, ')') => {
                    depth -= 1;
                    if depth < 0 {
                        return depth;
                    }
                }
                _ => {}
            }
        }
        depth
    }
}
