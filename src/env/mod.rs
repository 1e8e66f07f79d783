// SPDX-License-Identifier: MIT

//! Compilation environment
//!
//! This module provides:
//! - `Declarations` - the variables an expression may reference, and their types
//! - `DeclarationLoader` - reads declarations from YAML
//! - `Env` - parses and checks source text into a `CheckedExpr`

mod checker;
mod loader;
mod schema;

pub use checker::{check, CheckedExpr};
pub use loader::DeclarationLoader;
pub use schema::{DeclType, Declarations, VarDecl};

use crate::error::{CheckError, ParseError, TimeCheckError};
use crate::expr::{self, Expr};

/// Parses and checks expressions against a fixed set of declarations
#[derive(Debug, Clone)]
pub struct Env {
    declarations: Declarations,
}

impl Env {
    pub fn new(declarations: Declarations) -> Self {
        Self { declarations }
    }

    pub fn declarations(&self) -> &Declarations {
        &self.declarations
    }

    pub fn parse(&self, source: &str) -> Result<Expr, ParseError> {
        expr::parse(source)
    }

    pub fn check(&self, expr: Expr) -> Result<CheckedExpr, CheckError> {
        let result_type = check(&expr, &self.declarations)?;
        Ok(CheckedExpr { expr, result_type })
    }

    /// Parse then check
    pub fn compile(&self, source: &str) -> Result<CheckedExpr, TimeCheckError> {
        let parsed = self.parse(source)?;
        log::debug!("Parsed: {:?}", parsed);
        let checked = self.check(parsed)?;
        log::debug!("Checked as {}", checked.result_type);
        Ok(checked)
    }
}

impl Default for Env {
    /// `request.time` declared as a timestamp
    fn default() -> Self {
        Self::new(Declarations::request_time())
    }
}
