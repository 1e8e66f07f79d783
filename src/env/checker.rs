// SPDX-License-Identifier: MIT

//! Declaration checking
//!
//! Resolves every reference against the declared variables and assigns each
//! node a type. Comparisons need both operands to share a type; ordering
//! comparisons additionally need an ordered type.

use super::schema::{DeclType, Declarations};
use crate::error::{CheckError, EvalError};
use crate::eval;
use crate::expr::{Expr, Literal, TIMESTAMP_FUNCTION};
use chrono::{DateTime, Utc};

/// An expression that passed checking, with the type of its root
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedExpr {
    pub expr: Expr,
    pub result_type: DeclType,
}

impl CheckedExpr {
    /// Evaluate with `request.time` bound to `now`
    pub fn evaluate(&self, now: DateTime<Utc>) -> Result<bool, EvalError> {
        eval::evaluate(&self.expr, now)
    }
}

/// Compute the type of `expr` under `decls`
pub fn check(expr: &Expr, decls: &Declarations) -> Result<DeclType, CheckError> {
    match expr {
        Expr::Literal(lit) => Ok(literal_type(lit)),
        Expr::Ident(name) => decls
            .lookup(name)
            .ok_or_else(|| CheckError::UndeclaredReference(name.clone())),
        Expr::Select { .. } => {
            let name = expr
                .qualified_name()
                .ok_or_else(|| CheckError::UnsupportedSelect(expr.to_string()))?;
            decls
                .lookup(&name)
                .ok_or(CheckError::UndeclaredReference(name))
        }
        Expr::Call { function, args } => check_call(function, args, decls),
    }
}

fn check_call(function: &str, args: &[Expr], decls: &Declarations) -> Result<DeclType, CheckError> {
    let arg_types = args
        .iter()
        .map(|arg| check(arg, decls))
        .collect::<Result<Vec<_>, _>>()?;

    let matched = match (function, arg_types.as_slice()) {
        (TIMESTAMP_FUNCTION, [DeclType::String]) => Some(DeclType::Timestamp),
        (TIMESTAMP_FUNCTION, _) => None,
        ("<" | ">" | "<=" | ">=", [lhs, rhs]) if lhs == rhs && lhs.is_ordered() => {
            Some(DeclType::Boolean)
        }
        ("==" | "!=", [lhs, rhs]) if lhs == rhs => Some(DeclType::Boolean),
        ("<" | ">" | "<=" | ">=" | "==" | "!=", _) => None,
        _ => return Err(CheckError::UndeclaredFunction(function.to_string())),
    };

    matched.ok_or_else(|| CheckError::NoMatchingOverload {
        function: function.to_string(),
        args: arg_types
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

fn literal_type(lit: &Literal) -> DeclType {
    match lit {
        Literal::String(_) => DeclType::String,
        Literal::Number(_) => DeclType::Number,
        Literal::Boolean(_) => DeclType::Boolean,
        Literal::Null => DeclType::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::parse;

    fn check_str(src: &str) -> Result<DeclType, CheckError> {
        check(&parse(src).unwrap(), &Declarations::request_time())
    }

    #[test]
    fn test_request_time_comparison() {
        assert_eq!(
            check_str(r#"request.time < timestamp("2020-07-01T00:00:00.000Z")"#),
            Ok(DeclType::Boolean)
        );
        assert_eq!(
            check_str("timestamp('2020-07-01T00:00:00Z') >= request.time"),
            Ok(DeclType::Boolean)
        );
    }

    #[test]
    fn test_equality_type_checks() {
        assert_eq!(
            check_str("request.time == timestamp('2020-07-01T00:00:00Z')"),
            Ok(DeclType::Boolean)
        );
        assert_eq!(check_str("true != false"), Ok(DeclType::Boolean));
    }

    #[test]
    fn test_operand_types() {
        assert_eq!(check_str("request.time"), Ok(DeclType::Timestamp));
        assert_eq!(check_str("timestamp('x')"), Ok(DeclType::Timestamp));
        assert_eq!(check_str("'x'"), Ok(DeclType::String));
    }

    #[test]
    fn test_undeclared_reference() {
        assert_eq!(
            check_str("request.path < 'x'"),
            Err(CheckError::UndeclaredReference("request.path".to_string()))
        );
        assert_eq!(
            check_str("request < 'x'"),
            Err(CheckError::UndeclaredReference("request".to_string()))
        );
    }

    #[test]
    fn test_mismatched_operands() {
        assert_eq!(
            check_str("request.time < 5"),
            Err(CheckError::NoMatchingOverload {
                function: "<".to_string(),
                args: "timestamp, number".to_string(),
            })
        );
        assert_eq!(
            check_str("request.time < '2020-07-01T00:00:00Z'"),
            Err(CheckError::NoMatchingOverload {
                function: "<".to_string(),
                args: "timestamp, string".to_string(),
            })
        );
    }

    #[test]
    fn test_boolean_not_ordered() {
        assert!(matches!(
            check_str("true < false"),
            Err(CheckError::NoMatchingOverload { .. })
        ));
    }

    #[test]
    fn test_timestamp_overload() {
        assert!(matches!(
            check_str("timestamp(1)"),
            Err(CheckError::NoMatchingOverload { .. })
        ));
        assert!(matches!(
            check_str("timestamp('a', 'b')"),
            Err(CheckError::NoMatchingOverload { .. })
        ));
    }

    #[test]
    fn test_undeclared_function() {
        assert_eq!(
            check_str("duration('1s')"),
            Err(CheckError::UndeclaredFunction("duration".to_string()))
        );
    }

    #[test]
    fn test_select_on_call() {
        let expr = Expr::select(Expr::timestamp("x"), "seconds");
        assert!(matches!(
            check(&expr, &Declarations::request_time()),
            Err(CheckError::UnsupportedSelect(_))
        ));
    }

    #[test]
    fn test_custom_declarations() {
        let mut decls = Declarations::default();
        decls.declare("deadline", DeclType::Timestamp);
        let expr = parse("deadline > timestamp('2020-01-01T00:00:00Z')").unwrap();
        assert_eq!(check(&expr, &decls), Ok(DeclType::Boolean));
    }
}
