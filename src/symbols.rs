//! Collision detection for generated names.
//!
//! Every namespace segment is declared in its enclosing scope and every array
//! identifier in its namespace. A second declaration of the same name in one
//! scope is rejected, which covers sibling files, sibling directories and a
//! file sharing a name with a subdirectory.

use std::collections::HashMap;

use crate::error::Result;
use crate::error::naming::duplicate;
use crate::mangle::Namespace;

/// Scope-keyed record of declared names and where they came from
#[derive(Debug, Default)]
pub struct SymbolTable {
    scopes: HashMap<String, HashMap<String, String>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `identifier` in `scope`; `origin` is the source path shown on conflict.
    pub fn declare(&mut self, scope: &str, identifier: &str, origin: &str) -> Result<()> {
        let names = self.scopes.entry(scope.to_string()).or_default();
        if let Some(first) = names.get(identifier) {
            return Err(duplicate(scope, identifier, first.as_str(), origin));
        }
        names.insert(identifier.to_string(), origin.to_string());
        Ok(())
    }

    /// Declare the last segment of `namespace` in its parent scope.
    pub fn declare_namespace(&mut self, namespace: &Namespace, origin: &str) -> Result<()> {
        match namespace.split_last() {
            Some((scope, name)) => self.declare(&scope, name, origin),
            None => Ok(()),
        }
    }
}
