/// Wraps an identifier in double quotes, doubling any embedded quote.
pub fn escape_identifier(ident: &str) -> String {
    format!(r#""{}""#, ident.replace('"', r#""""#))
}

/// Quotes each dot-separated part of a qualified name.
pub fn escape_qualified_name(name: &str) -> String {
    name.split('.')
        .map(escape_identifier)
        .collect::<Vec<_>>()
        .join(".")
}

/// PostgreSQL emulates nested transactions with savepoints.
pub const fn supports_nested_transactions() -> bool {
    true
}
