// SPDX-License-Identifier: MIT

//! Abstract Syntax Tree for time comparison expressions

use std::fmt;

/// Name of the function that builds a timestamp from a string literal
pub const TIMESTAMP_FUNCTION: &str = "timestamp";

/// A node in the expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Function or operator application: `function(args...)`
    Call { function: String, args: Vec<Expr> },
    /// Field access: `operand.field`
    Select { operand: Box<Expr>, field: String },
    /// Bare name reference
    Ident(String),
    /// Constant value
    Literal(Literal),
}

/// Literal values in expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
}

/// Ordering comparisons the evaluator understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// <
    Lt,
    /// >
    Gt,
    /// <=
    Lte,
    /// >=
    Gte,
}

impl CompareOp {
    /// Map a call's function identifier to a comparison, if it is one
    pub fn from_function(function: &str) -> Option<Self> {
        match function {
            "<" => Some(CompareOp::Lt),
            ">" => Some(CompareOp::Gt),
            "<=" => Some(CompareOp::Lte),
            ">=" => Some(CompareOp::Gte),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Lte => "<=",
            CompareOp::Gte => ">=",
        }
    }
}

impl Expr {
    pub fn call(function: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            function: function.into(),
            args,
        }
    }

    pub fn select(operand: Expr, field: impl Into<String>) -> Self {
        Expr::Select {
            operand: Box::new(operand),
            field: field.into(),
        }
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal(Literal::String(value.into()))
    }

    /// `timestamp("<value>")`
    pub fn timestamp(value: impl Into<String>) -> Self {
        Expr::call(TIMESTAMP_FUNCTION, vec![Expr::string(value)])
    }

    /// `lhs <op> rhs`
    pub fn compare(op: CompareOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::call(op.as_str(), vec![lhs, rhs])
    }

    /// Dotted name for identifier and select chains, e.g. `request.time`.
    ///
    /// Returns `None` when any operand in the chain is not itself a name.
    pub fn qualified_name(&self) -> Option<String> {
        match self {
            Expr::Ident(name) => Some(name.clone()),
            Expr::Select { operand, field } => {
                let prefix = operand.qualified_name()?;
                Some(format!("{}.{}", prefix, field))
            }
            _ => None,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => {
                f.write_str("\"")?;
                for c in s.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        _ => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"")
            }
            Literal::Number(n) => write!(f, "{}", n),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Null => f.write_str("null"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Call { function, args } if is_infix(function) && args.len() == 2 => {
                write!(f, "{} {} {}", args[0], function, args[1])
            }
            Expr::Call { function, args } => {
                write!(f, "{}(", function)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Expr::Select { operand, field } => write!(f, "{}.{}", operand, field),
            Expr::Ident(name) => f.write_str(name),
            Expr::Literal(lit) => write!(f, "{}", lit),
        }
    }
}

fn is_infix(function: &str) -> bool {
    matches!(function, "<" | ">" | "<=" | ">=" | "==" | "!=")
}
