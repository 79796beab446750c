//! Scalar value helpers.
//!
//! A [`Value`] in this interpreter is simply an owned `String` — the
//! data model is "everything is a string" (see spec §3 and §9's design
//! note on avoiding a tagged union). Integers, booleans, and pointers
//! are lazily-parsed *views* over that string, implemented as the free
//! functions below rather than as a separate variant.

/// The interpreter's value representation: an owned, round-trippable string.
pub type Value = String;

/// Whether `s` parses as a Picol integer: an optional leading `-` followed
/// by one or more ASCII digits. Empty strings and anything with a decimal
/// point are not integers (floating point is out of scope).
pub fn is_integer(s: &str) -> bool {
    let rest = s.strip_prefix('-').unwrap_or(s);
    !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit())
}

/// Parse `s` as an integer, returning `None` if it is not one.
pub fn parse_int(s: &str) -> Option<i64> {
    if is_integer(s) {
        s.parse::<i64>().ok()
    } else {
        None
    }
}

/// Tcl truthiness: any nonzero integer is true. Used by `if`/`while`/`for`
/// after a condition has already been reduced to an integer result.
pub fn is_truthy(n: i64) -> bool {
    n != 0
}

/// Render a boolean as the canonical `0`/`1` integer string.
pub fn bool_str(b: bool) -> &'static str {
    if b {
        "1"
    } else {
        "0"
    }
}

/// Recognized compact binary operators, longest first so `**`/`==`/etc.
/// win over their single-character prefixes when scanning a whitespace-
/// free expression such as `1/0` or (post-substitution) `6<=1`.
const COMPACT_OPS: &[&str] = &[
    "==", "!=", "<=", ">=", "**", "&&", "||", "+", "-", "*", "/", "%", "<", ">",
];

/// Splits a whitespace-free binary expression like `1/0` or `6<=1` into
/// `(left, op, right)` at the leftmost recognized operator, skipping the
/// first byte so a leading unary `-` isn't mistaken for subtraction.
/// `None` means no operator was found (a bare scalar). Shared by `expr`'s
/// single-argument compact form and `if`/`while`/`for`'s condition
/// evaluation, both of which need to recognize an unspaced comparison.
pub fn split_compact(a: &str) -> Option<(&str, &str, &str)> {
    let bytes = a.as_bytes();
    for idx in 1..bytes.len() {
        for op in COMPACT_OPS {
            if a[idx..].starts_with(op) {
                let left = &a[..idx];
                let right = &a[idx + op.len()..];
                if !right.is_empty() {
                    return Some((left, op, right));
                }
            }
        }
    }
    None
}
