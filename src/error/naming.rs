//! Identifier and namespace errors

use super::PackError;

/// Creates an invalid identifier error
pub fn invalid_identifier(name: impl Into<String>, path: impl Into<String>) -> PackError {
    PackError::InvalidIdentifier {
        name: name.into(),
        path: path.into(),
    }
}

/// Creates a duplicate identifier error
pub fn duplicate(
    scope: impl Into<String>,
    identifier: impl Into<String>,
    first: impl Into<String>,
    second: impl Into<String>,
) -> PackError {
    PackError::DuplicateIdentifier {
        scope: scope.into(),
        identifier: identifier.into(),
        first: first.into(),
        second: second.into(),
    }
}
