//! Target BAC parsing
//!
//! Accepts free-form strings such as `"0.05%"`, `"0.5‰"`, `"50permille"` or
//! `"0.05/1000"` and normalizes them to g/dL.

use thiserror::Error;

use super::constants::PERMILLE_TO_G_PER_DL;

/// Markers that signal a permille value anywhere in the input
const PERMILLE_MARKERS: [&str; 3] = ["‰", "permille", "/1000"];

/// Trailing suffixes, checked in order; at most one is removed
const SUFFIXES: [&str; 4] = ["%", "‰", "permille", "/1000"];

/// The numeric part of a BAC string could not be read
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Could not parse target BAC {input:?}: {remainder:?} is not a number")]
pub struct ParseError {
    pub input: String,
    pub remainder: String,
}

/// Normalize whitespace and case: trim, lowercase, drop inner spaces.
fn normalize(value: &str) -> String {
    value.trim().to_lowercase().replace(' ', "")
}

/// Read a decimal number the way the original form did: surrounding
/// whitespace is ignored and `_` is allowed between two digits.
fn read_number(s: &str) -> Option<f64> {
    let chars: Vec<char> = s.trim().chars().collect();
    let mut cleaned = String::with_capacity(chars.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            let between_digits = i > 0
                && chars[i - 1].is_ascii_digit()
                && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
            if !between_digits {
                return None;
            }
        } else {
            cleaned.push(c);
        }
    }
    cleaned.parse().ok()
}

/// True if the normalized string contains any permille marker.
pub fn is_permille(value: &str) -> bool {
    let s = normalize(value);
    PERMILLE_MARKERS.iter().any(|m| s.contains(m))
}

/// Parse a target BAC string into g/dL.
///
/// Permille detection scans the whole string while suffix stripping only
/// removes the first matching trailing suffix. The two passes are
/// independent: `"5%"` is 5.0 g/dL and `"5permille"` is 0.5 g/dL.
// NOTE: a permille marker in the middle of the string still scales the
// result even when a different suffix is stripped.
pub fn parse_target_bac(value: &str) -> Result<f64, ParseError> {
    let s = normalize(value);
    let permille = PERMILLE_MARKERS.iter().any(|m| s.contains(m));

    let number = SUFFIXES
        .iter()
        .find_map(|suf| s.strip_suffix(suf))
        .unwrap_or(s.as_str());

    let x: f64 = read_number(number).ok_or_else(|| ParseError {
        input: value.to_string(),
        remainder: number.to_string(),
    })?;

    if permille {
        Ok(x * PERMILLE_TO_G_PER_DL)
    } else {
        Ok(x)
    }
}
