//! Expression parser
//!
//! Parses string expressions into Expression AST nodes.
//!
//! Supported syntax:
//! - Field access: `customer.age`, `season`
//! - Literals: `42`, `3.14`, `"string"`, `'string'`, `true`, `false`, `null`
//! - List literals: `[1, 2, "three"]`
//! - Binary operators: `>`, `<`, `>=`, `<=`, `==`, `!=`, `+`, `-`, `*`, `/`, `%`, `&&`, `||`
//! - Keyword operators: `contains`, `in`, `not_in`, `starts_with`, `ends_with`
//! - Unary operators: `!`, `-`
//! - Function calls: `sum(b)`, `max(a, b)`
//! - Parentheses for grouping: `(a + b) * c`

use crate::error::{ParseError, Result};
use decisio_core::ast::{Expression, Operator, UnaryOperator};
use decisio_core::Value;

/// Binary operator levels, lowest precedence first
const SYMBOL_LEVELS: &[&[&str]] = &[
    &["||"],
    &["&&"],
    &["==", "!=", "<=", ">=", "<", ">"],
    &["+", "-"],
    &["*", "/", "%"],
];

const KEYWORD_OPERATORS: &[&str] = &["contains", "not_in", "in", "starts_with", "ends_with"];

/// Expression parser
pub struct ExpressionParser;

impl ExpressionParser {
    /// Parse an expression from a string
    pub fn parse(input: &str) -> Result<Expression> {
        let input = input.trim();

        if input.is_empty() {
            return Err(ParseError::InvalidExpression("Empty expression".to_string()));
        }

        Self::parse_expression(input)
    }

    /// Parse a complete expression (handles binary operators with precedence)
    fn parse_expression(input: &str) -> Result<Expression> {
        let input = input.trim();

        // logical operators bind loosest, keyword operators sit just above them
        for (level, operators) in SYMBOL_LEVELS.iter().enumerate() {
            if level == 2 {
                if let Some((left, op, right)) = Self::split_by_keyword_operator(input) {
                    return Self::binary(left, op, right);
                }
            }
            if let Some((left, op, right)) = Self::split_by_operator(input, operators) {
                return Self::binary(left, op, right);
            }
        }

        Self::parse_primary(input)
    }

    fn binary(left: &str, op: &str, right: &str) -> Result<Expression> {
        let op = Operator::from_symbol(op)
            .ok_or_else(|| ParseError::InvalidExpression(format!("Invalid operator: {}", op)))?;
        Ok(Expression::binary(
            Self::parse_expression(left)?,
            op,
            Self::parse_expression(right)?,
        ))
    }

    /// Parse a primary expression
    fn parse_primary(input: &str) -> Result<Expression> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseError::InvalidExpression("Missing operand".to_string()));
        }

        if let Some(rest) = input.strip_prefix('!') {
            return Ok(Expression::unary(
                UnaryOperator::Not,
                Self::parse_primary(rest)?,
            ));
        }

        if let Some(rest) = input.strip_prefix('-') {
            if let Some(Value::Number(n)) = Self::parse_number(rest.trim()) {
                return Ok(Expression::literal(Value::Number(-n)));
            }
            return Ok(Expression::unary(
                UnaryOperator::Negate,
                Self::parse_primary(rest)?,
            ));
        }

        if input.starts_with('(') && Self::closing_index(input, 0) == Some(input.len() - 1) {
            return Self::parse_expression(&input[1..input.len() - 1]);
        }

        if input.starts_with('[') && Self::closing_index(input, 0) == Some(input.len() - 1) {
            let items = Self::parse_arguments(&input[1..input.len() - 1])?;
            return Ok(Expression::List(items));
        }

        if let Some(s) = Self::parse_string_literal(input) {
            return Ok(Expression::literal(Value::String(s)));
        }

        match input {
            "true" => return Ok(Expression::literal(Value::Bool(true))),
            "false" => return Ok(Expression::literal(Value::Bool(false))),
            "null" => return Ok(Expression::literal(Value::Null)),
            _ => {}
        }

        if let Some(number) = Self::parse_number(input) {
            return Ok(Expression::literal(number));
        }

        // function call: identifier followed by a parenthesised argument list
        if let Some(paren_pos) = input.find('(') {
            let func_name = input[..paren_pos].trim();
            if Self::is_identifier(func_name)
                && Self::closing_index(input, paren_pos) == Some(input.len() - 1)
            {
                let args = Self::parse_arguments(&input[paren_pos + 1..input.len() - 1])?;
                return Ok(Expression::function_call(func_name.to_string(), args));
            }
        }

        let parts: Vec<&str> = input.split('.').map(str::trim).collect();
        if parts.iter().all(|part| Self::is_identifier(part)) {
            return Ok(Expression::field_access(
                parts.into_iter().map(str::to_string).collect(),
            ));
        }

        Err(ParseError::InvalidExpression(format!("Cannot parse: {}", input)))
    }

    fn parse_number(input: &str) -> Option<Value> {
        // keeps `inf` and `NaN` identifiers out of the number path
        if !input.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
            return None;
        }
        input.parse::<f64>().ok().map(Value::Number)
    }

    fn parse_string_literal(input: &str) -> Option<String> {
        if !input.starts_with(['"', '\''])
            || input.len() < 2
            || Self::string_end(input, 0) != Some(input.len() - 1)
        {
            return None;
        }

        let mut result = String::with_capacity(input.len() - 2);
        let mut chars = input[1..input.len() - 1].chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                match chars.next() {
                    Some('n') => result.push('\n'),
                    Some('t') => result.push('\t'),
                    Some(escaped) => result.push(escaped),
                    None => result.push('\\'),
                }
            } else {
                result.push(c);
            }
        }
        Some(result)
    }

    /// Byte index of the quote closing the string that starts at `start`
    fn string_end(input: &str, start: usize) -> Option<usize> {
        let bytes = input.as_bytes();
        let quote = bytes[start];
        let mut i = start + 1;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 2,
                b if b == quote => return Some(i),
                _ => i += 1,
            }
        }
        None
    }

    /// Byte index of the bracket closing the one at `open`
    fn closing_index(input: &str, open: usize) -> Option<usize> {
        let bytes = input.as_bytes();
        let mut depth = 0usize;
        let mut i = open;
        while i < bytes.len() {
            match bytes[i] {
                b'"' | b'\'' => {
                    i = Self::string_end(input, i)?;
                }
                b'(' | b'[' => depth += 1,
                b')' | b']' => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
            i += 1;
        }
        None
    }

    /// Marks the byte positions that sit outside brackets and string literals
    fn top_level_mask(input: &str) -> Vec<bool> {
        let bytes = input.as_bytes();
        let mut mask = vec![false; bytes.len()];
        let mut depth: i32 = 0;
        let mut quote: Option<u8> = None;
        let mut escaped = false;

        for (i, &b) in bytes.iter().enumerate() {
            if let Some(q) = quote {
                if escaped {
                    escaped = false;
                } else if b == b'\\' {
                    escaped = true;
                } else if b == q {
                    quote = None;
                }
                continue;
            }
            match b {
                b'"' | b'\'' => quote = Some(b),
                b'(' | b'[' => depth += 1,
                b')' | b']' => depth -= 1,
                _ => mask[i] = depth == 0,
            }
        }

        mask
    }

    /// Split input by binary operator (respecting brackets and strings)
    fn split_by_operator<'a>(
        input: &'a str,
        operators: &[&str],
    ) -> Option<(&'a str, &'a str, &'a str)> {
        let bytes = input.as_bytes();
        let mask = Self::top_level_mask(input);

        // Scan from right to left to handle left-to-right associativity
        for i in (0..bytes.len()).rev() {
            if !mask[i] {
                continue;
            }

            for &op in operators {
                let end = i + op.len();
                if end > bytes.len() || &bytes[i..end] != op.as_bytes() {
                    continue;
                }

                // Make sure it's not part of another operator
                let is_valid = (i == 0 || !Self::is_operator_char(bytes[i - 1]))
                    && (end >= bytes.len() || !Self::is_operator_char(bytes[end]));
                if !is_valid {
                    continue;
                }

                let left = input[..i].trim();
                // a sign with nothing usable on its left is unary
                if (op == "-" || op == "+")
                    && left
                        .bytes()
                        .last()
                        .map_or(true, |b| Self::is_operator_char(b) || b == b'(' || b == b',')
                {
                    continue;
                }

                return Some((left, &input[i..end], input[end..].trim()));
            }
        }

        None
    }

    /// Split input by keyword operator (respecting brackets and word boundaries)
    fn split_by_keyword_operator(input: &str) -> Option<(&str, &str, &str)> {
        let bytes = input.as_bytes();
        let mask = Self::top_level_mask(input);

        for i in (0..bytes.len()).rev() {
            if !mask[i] {
                continue;
            }

            for &op in KEYWORD_OPERATORS {
                let end = i + op.len();
                if end > bytes.len() || &bytes[i..end] != op.as_bytes() {
                    continue;
                }

                let has_space_before = i > 0 && bytes[i - 1].is_ascii_whitespace();
                let has_space_after = end < bytes.len() && bytes[end].is_ascii_whitespace();

                if has_space_before && has_space_after {
                    return Some((input[..i].trim(), &input[i..end], input[end..].trim()));
                }
            }
        }

        None
    }

    /// Check if a byte is part of an operator
    fn is_operator_char(c: u8) -> bool {
        matches!(
            c,
            b'=' | b'!' | b'<' | b'>' | b'&' | b'|' | b'+' | b'-' | b'*' | b'/' | b'%'
        )
    }

    fn is_identifier(s: &str) -> bool {
        !s.is_empty()
            && !s.starts_with(|c: char| c.is_ascii_digit())
            && s.chars().all(|c| c.is_alphanumeric() || c == '_')
    }

    /// Parse comma-separated function arguments or list items
    fn parse_arguments(args_str: &str) -> Result<Vec<Expression>> {
        if args_str.trim().is_empty() {
            return Ok(Vec::new());
        }

        Self::split_top_level(args_str, b',')
            .into_iter()
            .map(Self::parse_expression)
            .collect()
    }

    /// Split on a separator byte that sits outside brackets and strings
    pub(crate) fn split_top_level(input: &str, separator: u8) -> Vec<&str> {
        let mask = Self::top_level_mask(input);
        let mut parts = Vec::new();
        let mut start = 0;

        for (i, &b) in input.as_bytes().iter().enumerate() {
            if b == separator && mask[i] {
                parts.push(input[start..i].trim());
                start = i + 1;
            }
        }
        parts.push(input[start..].trim());

        parts
    }
}
