//! Portable function names and how PostgreSQL expresses them.

/// How a portable function call is emitted for PostgreSQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionResolution {
    /// Same name, same arguments.
    Native,
    /// Two-argument call rewritten as `(date OP interval)`.
    IntervalArithmetic { operator: &'static str },
}

const NATIVE_FUNCTIONS: [&str; 9] = [
    "NOW",
    "COUNT",
    "SUM",
    "MIN",
    "MAX",
    "AVG",
    "CONCAT",
    "CONCAT_WS",
    "SUBSTRING",
];

/// Looks up a function name case-insensitively. `None` means unsupported.
pub fn resolve_function(name: &str) -> Option<FunctionResolution> {
    let upper = name.to_ascii_uppercase();
    match upper.as_str() {
        "DATE_ADD" => Some(FunctionResolution::IntervalArithmetic { operator: "+" }),
        "DATE_SUB" => Some(FunctionResolution::IntervalArithmetic { operator: "-" }),
        other if NATIVE_FUNCTIONS.contains(&other) => Some(FunctionResolution::Native),
        _ => None,
    }
}

/// Renders a call with already-rendered arguments.
///
/// Returns `None` for unknown functions and for interval arithmetic that
/// does not receive exactly two arguments.
pub fn render_function(name: &str, args: &[&str]) -> Option<String> {
    match resolve_function(name)? {
        FunctionResolution::Native => Some(format!(
            "{}({})",
            name.to_ascii_uppercase(),
            args.join(", ")
        )),
        FunctionResolution::IntervalArithmetic { operator } => match args {
            [date, interval] => Some(format!("({date} {operator} {interval})")),
            _ => None,
        },
    }
}
