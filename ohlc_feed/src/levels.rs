//! Strict parser for string-encoded price-level lists.
//!
//! The source CSV stores support/resistance levels as list literals such as
//! `"[210.5, 208.0]"` or `"[]"`. The grammar accepted here is deliberately
//! tiny: `[` float (`,` float)* `]` with optional ASCII whitespace. Nested
//! structures, trailing commas, non-numeric tokens, and trailing garbage are
//! all rejected. Rejection fails open to an empty list, since a bar without
//! usable levels simply contributes no band point.

/// Parses a level-list literal, yielding an empty list for anything that is
/// absent, empty, or malformed. Never errors.
pub fn parse_levels(raw: Option<&str>) -> Vec<f64> {
    raw.and_then(parse_strict).unwrap_or_default()
}

/// The strict grammar. `None` for any deviation.
fn parse_strict(s: &str) -> Option<Vec<f64>> {
    let s = s.trim();
    let inner = s.strip_prefix('[')?.strip_suffix(']')?.trim();
    if inner.is_empty() {
        return Some(Vec::new());
    }
    let mut levels = Vec::new();
    for token in inner.split(',') {
        let v: f64 = token.trim().parse().ok()?;
        if !v.is_finite() {
            return None;
        }
        levels.push(v);
    }
    Some(levels)
}
