// SPDX-License-Identifier: MIT

//! Parser for single comparison expressions
//!
//! Parses expressions like:
//! - `request.time < timestamp("2020-07-01T00:00:00.000Z")`
//! - `timestamp('2020-07-01T00:00:00Z') >= request.time`
//!
//! Each side of the comparison is a call, a dotted path, or a literal.

use super::ast::{Expr, Literal};
use crate::error::ParseError;

/// Relational operators, longest first so `<=` wins over `<`
const OPERATORS: [&str; 6] = ["<=", ">=", "==", "!=", "<", ">"];

/// Deepest call nesting accepted before parsing fails
pub const MAX_NESTING_DEPTH: usize = 250;

/// Parse an expression string into an AST
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    Parser::new(input).parse()
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    fn parse(mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_relation()?;
        self.skip_whitespace();
        if self.pos < self.input.len() {
            return Err(self.error("Unexpected input after expression"));
        }
        Ok(expr)
    }

    fn parse_relation(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_operand()?;
        self.skip_whitespace();

        let Some(op) = self.parse_operator() else {
            return Ok(lhs);
        };
        let rhs = self.parse_operand()?;

        Ok(Expr::call(op, vec![lhs, rhs]))
    }

    fn parse_operator(&mut self) -> Option<&'static str> {
        OPERATORS.into_iter().find(|op| self.match_str(op))
    }

    fn parse_operand(&mut self) -> Result<Expr, ParseError> {
        self.skip_whitespace();

        match self.peek() {
            Some(quote @ ('\'' | '"')) => {
                self.pos += 1;
                self.parse_string(quote)
            }
            Some(c) if c.is_ascii_digit() || c == '-' => self.parse_number(),
            Some(c) if is_ident_start(c) => self.parse_name(),
            Some(_) => Err(self.error("Expected operand")),
            None => Err(self.error("Unexpected end of input")),
        }
    }

    /// Keyword literal, call, or dotted path starting with an identifier
    fn parse_name(&mut self) -> Result<Expr, ParseError> {
        let name = self.parse_identifier()?;

        match name.as_str() {
            "true" => return Ok(Expr::Literal(Literal::Boolean(true))),
            "false" => return Ok(Expr::Literal(Literal::Boolean(false))),
            "null" => return Ok(Expr::Literal(Literal::Null)),
            _ => {}
        }

        self.skip_whitespace();
        if self.match_char('(') {
            if self.depth >= MAX_NESTING_DEPTH {
                return Err(self.error("Maximum nesting depth exceeded"));
            }
            self.depth += 1;
            let args = self.parse_args()?;
            self.depth -= 1;
            return Ok(Expr::call(name, args));
        }

        let mut expr = Expr::Ident(name);
        loop {
            self.skip_whitespace();
            if !self.match_char('.') {
                break;
            }
            self.skip_whitespace();
            let field = self.parse_identifier()?;
            expr = Expr::select(expr, field);
        }
        Ok(expr)
    }

    fn parse_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();

        self.skip_whitespace();
        if self.match_char(')') {
            return Ok(args);
        }

        loop {
            args.push(self.parse_operand()?);
            self.skip_whitespace();
            if self.match_char(',') {
                continue;
            }
            if self.match_char(')') {
                return Ok(args);
            }
            return Err(self.error("Expected ',' or ')'"));
        }
    }

    fn parse_identifier(&mut self) -> Result<String, ParseError> {
        let start = self.pos;

        if !self.peek().is_some_and(is_ident_start) {
            return Err(self.error("Expected identifier"));
        }
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }

        Ok(self.input[start..self.pos].to_string())
    }

    /// Quoted string; the opening quote has already been consumed
    fn parse_string(&mut self, quote: char) -> Result<Expr, ParseError> {
        let start = self.pos - 1;
        let mut value = String::new();

        loop {
            let Some(c) = self.peek() else {
                return Err(ParseError::new("Unterminated string", start));
            };
            self.pos += c.len_utf8();

            if c == quote {
                return Ok(Expr::string(value));
            }
            if c != '\\' {
                value.push(c);
                continue;
            }

            let Some(escaped) = self.peek() else {
                return Err(ParseError::new("Unterminated string", start));
            };
            match escaped {
                '\\' | '\'' | '"' => value.push(escaped),
                'n' => value.push('\n'),
                't' => value.push('\t'),
                _ => return Err(self.error("Invalid escape sequence")),
            }
            self.pos += escaped.len_utf8();
        }
    }

    fn parse_number(&mut self) -> Result<Expr, ParseError> {
        let start = self.pos;
        self.match_char('-');

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '.' {
                self.pos += 1;
            } else {
                break;
            }
        }

        self.input[start..self.pos]
            .parse::<f64>()
            .map(|n| Expr::Literal(Literal::Number(n)))
            .map_err(|_| ParseError::new("Invalid number", start))
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn match_char(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn match_str(&mut self, s: &str) -> bool {
        if self.input[self.pos..].starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn error(&self, message: &str) -> ParseError {
        ParseError::new(message, self.pos)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}
