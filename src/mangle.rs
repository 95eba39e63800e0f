//! Name mangling for generated C++ code.
//!
//! Turns file names and directory paths into identifiers and qualified
//! namespace names. Mangling is segment-aware: only a lone `.` segment stands
//! for the root directory, dots inside a name are sanitized like any other
//! punctuation.

use std::fmt;

use crate::error::naming::invalid_identifier;
use crate::error::{PackError, Result};

/// Scope delimiter used between namespace segments
pub const SCOPE_DELIMITER: &str = "::";

/// Reserved words that cannot be used as identifiers in C++20.
const CPP_KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
    "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
    "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq",
];

/// Sanitize an arbitrary name into a C++ identifier.
///
/// Every character outside `[A-Za-z0-9_]` becomes `_` and runs of `_` collapse
/// to one, since any identifier containing `__` is reserved. A leading digit
/// gets a `_` prefix, a leading `_` before an uppercase letter is dropped and
/// keywords get a `_` suffix. Returns `None` when the name has no ASCII letter
/// or digit to anchor the identifier.
///
/// # Examples
/// ```ignore
/// assert_eq!(sanitize_identifier("icon.png"), Some("icon_png".to_string()));
/// assert_eq!(sanitize_identifier("1.bin"), Some("_1_bin".to_string()));
/// assert_eq!(sanitize_identifier("__init__.py"), Some("_init_py".to_string()));
/// assert_eq!(sanitize_identifier("..."), None);
/// ```
pub fn sanitize_identifier(name: &str) -> Option<String> {
    if !name.chars().any(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    let mut ident = String::with_capacity(name.len());
    for c in name.chars() {
        let c = if c.is_ascii_alphanumeric() { c } else { '_' };
        if c == '_' && ident.ends_with('_') {
            continue;
        }
        ident.push(c);
    }

    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    } else if ident
        .strip_prefix('_')
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_uppercase()))
    {
        ident.remove(0);
    }
    if CPP_KEYWORDS.contains(&ident.as_str()) {
        ident.push('_');
    }

    Some(ident)
}

/// Derive the array identifier for a file name.
///
/// `path` is only used for error reporting.
pub fn mangle_file_name(file_name: &str, path: &str) -> Result<String> {
    sanitize_identifier(file_name).ok_or_else(|| invalid_identifier(file_name, path))
}

/// A fully qualified namespace, e.g. `cnc::images::ui`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    segments: Vec<String>,
}

impl Namespace {
    /// The enclosing scope and the last segment, or `None` for a single-segment namespace
    pub fn split_last(&self) -> Option<(String, &str)> {
        let (last, parent) = self.segments.split_last()?;
        if parent.is_empty() {
            return None;
        }
        Some((parent.join(SCOPE_DELIMITER), last.as_str()))
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join(SCOPE_DELIMITER))
    }
}

/// Validate a namespace prefix such as `cnc` or `game::data`.
///
/// Unlike path segments, prefix segments are taken verbatim and must already be
/// valid identifiers.
pub fn parse_prefix(prefix: &str) -> Result<Vec<String>> {
    let segments: Vec<String> = prefix
        .split(SCOPE_DELIMITER)
        .map(str::to_string)
        .collect();

    let valid = segments
        .iter()
        .all(|s| sanitize_identifier(s).as_deref() == Some(s.as_str()));
    if valid {
        Ok(segments)
    } else {
        Err(PackError::InvalidNamespacePrefix {
            prefix: prefix.to_string(),
        })
    }
}

/// Map a directory path relative to the root onto its namespace.
///
/// Both `/` and `\` separate segments. A path with no real segments (`""` or
/// `"."`) is the root and maps to `prefix::root_name`.
pub fn mangle_namespace(prefix: &[String], root_name: &str, relative: &str) -> Result<Namespace> {
    let dir_segments: Vec<&str> = relative
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();

    let mut segments = prefix.to_vec();
    if dir_segments.is_empty() {
        segments.push(root_name.to_string());
    } else {
        for segment in dir_segments {
            let ident =
                sanitize_identifier(segment).ok_or_else(|| invalid_identifier(segment, relative))?;
            segments.push(ident);
        }
    }

    Ok(Namespace { segments })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cnc() -> Vec<String> {
        vec!["cnc".to_string()]
    }

    #[test]
    fn test_sanitize_replaces_every_dot() {
        assert_eq!(sanitize_identifier("icon.png").as_deref(), Some("icon_png"));
        assert_eq!(sanitize_identifier("a.b.c").as_deref(), Some("a_b_c"));
        assert_eq!(
            sanitize_identifier("font-bold 12.ttf").as_deref(),
            Some("font_bold_12_ttf")
        );
    }

    #[test]
    fn test_sanitize_leading_digit_and_keywords() {
        assert_eq!(sanitize_identifier("1.bin").as_deref(), Some("_1_bin"));
        assert_eq!(sanitize_identifier("int").as_deref(), Some("int_"));
        assert_eq!(sanitize_identifier("namespace").as_deref(), Some("namespace_"));
        assert_eq!(sanitize_identifier("Int").as_deref(), Some("Int"));
    }

    #[test]
    fn test_sanitize_non_ascii() {
        assert_eq!(sanitize_identifier("café.png").as_deref(), Some("caf_png"));
    }

    #[test]
    fn test_sanitize_avoids_reserved_underscores() {
        assert_eq!(sanitize_identifier("__init__.py").as_deref(), Some("_init_py"));
        assert_eq!(sanitize_identifier("a--b..c").as_deref(), Some("a_b_c"));
        assert_eq!(sanitize_identifier("x_.png").as_deref(), Some("x_png"));
        assert_eq!(sanitize_identifier(".Hidden").as_deref(), Some("Hidden"));
        assert_eq!(sanitize_identifier("_Icon").as_deref(), Some("Icon"));
        assert_eq!(sanitize_identifier(".hidden").as_deref(), Some("_hidden"));
        assert_eq!(sanitize_identifier("1__a").as_deref(), Some("_1_a"));

        for name in ["__init__.py", "a---b", "Ω__Ω.x", "..Z..z.."] {
            let ident = sanitize_identifier(name).unwrap();
            assert!(!ident.contains("__"), "{name} -> {ident}");
        }
    }

    #[test]
    fn test_sanitize_rejects_names_without_alphanumerics() {
        assert_eq!(sanitize_identifier(""), None);
        assert_eq!(sanitize_identifier("..."), None);
        assert_eq!(sanitize_identifier("___"), None);
        assert_eq!(sanitize_identifier("ñ"), None);
    }

    #[test]
    fn test_mangle_file_name_error() {
        let err = mangle_file_name("...", "data/...").unwrap_err();
        assert!(matches!(err, PackError::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_root_namespace() {
        assert_eq!(mangle_namespace(&cnc(), "assets", ".").unwrap().to_string(), "cnc::assets");
        assert_eq!(mangle_namespace(&cnc(), "assets", "").unwrap().to_string(), "cnc::assets");
        assert_eq!(mangle_namespace(&cnc(), "assets", "./").unwrap().to_string(), "cnc::assets");
    }

    #[test]
    fn test_subdirectory_namespaces() {
        assert_eq!(
            mangle_namespace(&cnc(), "assets", "images").unwrap().to_string(),
            "cnc::images"
        );
        assert_eq!(mangle_namespace(&cnc(), "assets", "a/b").unwrap().to_string(), "cnc::a::b");
        assert_eq!(mangle_namespace(&cnc(), "assets", "a\\b").unwrap().to_string(), "cnc::a::b");
        assert_eq!(
            mangle_namespace(&cnc(), "assets", "./a/b").unwrap().to_string(),
            "cnc::a::b"
        );
    }

    #[test]
    fn test_dots_inside_segments_are_sanitized() {
        assert_eq!(
            mangle_namespace(&cnc(), "assets", "v1.2/maps").unwrap().to_string(),
            "cnc::v1_2::maps"
        );
    }

    #[test]
    fn test_invalid_directory_segment() {
        let err = mangle_namespace(&cnc(), "assets", "a/---").unwrap_err();
        assert!(matches!(err, PackError::InvalidIdentifier { name, .. } if name == "---"));
    }

    #[test]
    fn test_split_last() {
        let ns = mangle_namespace(&cnc(), "assets", "a/b").unwrap();
        assert_eq!(ns.split_last(), Some(("cnc::a".to_string(), "b")));

        let single = Namespace {
            segments: vec!["cnc".to_string()],
        };
        assert_eq!(single.split_last(), None);
    }

    #[test]
    fn test_parse_prefix() {
        assert_eq!(parse_prefix("cnc").unwrap(), vec!["cnc"]);
        assert_eq!(parse_prefix("game::data").unwrap(), vec!["game", "data"]);
        assert!(parse_prefix("").is_err());
        assert!(parse_prefix("game::").is_err());
        assert!(parse_prefix("my-game").is_err());
        assert!(parse_prefix("int").is_err());
    }
}
