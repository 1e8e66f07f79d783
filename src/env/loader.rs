// SPDX-License-Identifier: MIT

//! Declaration loader - YAML file loading and parsing

use super::schema::Declarations;
use crate::error::TimeCheckError;
use std::fs;
use std::path::Path;

/// Loads variable declarations from YAML files
pub struct DeclarationLoader;

impl DeclarationLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load declarations from a YAML file
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Declarations, TimeCheckError> {
        let path = path.as_ref();
        log::debug!("Loading declarations from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse_yaml(&content)
    }

    /// Parse declarations from a YAML string
    pub fn parse_yaml(content: &str) -> Result<Declarations, TimeCheckError> {
        let decls: Declarations = serde_yaml::from_str(content)?;
        Ok(decls)
    }
}

impl Default for DeclarationLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::DeclType;

    #[test]
    fn test_parse_declarations() {
        let yaml = r#"
request.time:
  type: timestamp
user.name:
  type: string
"#;
        let decls = DeclarationLoader::parse_yaml(yaml).unwrap();
        assert_eq!(decls.lookup("request.time"), Some(DeclType::Timestamp));
        assert_eq!(decls.lookup("user.name"), Some(DeclType::String));
    }

    #[test]
    fn test_invalid_yaml_returns_error() {
        let yaml = r#"
request.time:
  - invalid structure
"#;
        let result = DeclarationLoader::parse_yaml(yaml);
        assert!(matches!(result, Err(TimeCheckError::Yaml(_))));
    }

    #[test]
    fn test_missing_file_returns_io_error() {
        let result = DeclarationLoader::new().load("does/not/exist.yaml");
        assert!(matches!(result, Err(TimeCheckError::Io(_))));
    }
}
