// SPDX-License-Identifier: MIT

//! Variable declarations

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Declared variables, keyed by qualified name (e.g. `request.time`)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Declarations {
    #[serde(flatten)]
    pub variables: HashMap<String, VarDecl>,
}

/// Declaration of a single variable
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VarDecl {
    #[serde(rename = "type")]
    pub var_type: DeclType,
}

/// Types known to the checker
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeclType {
    Timestamp,
    String,
    Number,
    Boolean,
    Null,
}

impl Declarations {
    /// The environment with only `request.time: timestamp`
    pub fn request_time() -> Self {
        let mut decls = Self::default();
        decls.declare("request.time", DeclType::Timestamp);
        decls
    }

    pub fn declare(&mut self, name: impl Into<String>, var_type: DeclType) {
        self.variables.insert(name.into(), VarDecl { var_type });
    }

    pub fn lookup(&self, name: &str) -> Option<DeclType> {
        self.variables.get(name).map(|decl| decl.var_type)
    }
}

impl DeclType {
    /// Types that support `<`, `>`, `<=` and `>=`
    pub fn is_ordered(&self) -> bool {
        matches!(self, DeclType::Timestamp | DeclType::String | DeclType::Number)
    }
}

impl fmt::Display for DeclType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeclType::Timestamp => "timestamp",
            DeclType::String => "string",
            DeclType::Number => "number",
            DeclType::Boolean => "boolean",
            DeclType::Null => "null",
        };
        f.write_str(name)
    }
}
