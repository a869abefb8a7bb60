//! Marker search over raw capture bytes
//!
//! Captures may contain a marker of the form `ABC{digits}`. Only the first
//! `ABC{` in the buffer is ever considered, paired with the first `}` that
//! follows it; if the enclosed bytes are not a non-empty run of ASCII
//! digits the whole search yields nothing. Later, well-formed markers do
//! not rescue a malformed first one.

use once_cell::sync::Lazy;
use regex::bytes::Regex;

/// Modulus applied to the marker number
const MARKER_MODULUS: u32 = 10_007;

/// Offset added after the modulus
const MARKER_OFFSET: u32 = 3;

/// First `ABC{` up to the first following `}`, interior captured raw.
/// Digit validation happens separately so a malformed interior stops the
/// search instead of skipping ahead.
static MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"ABC\{([^}]*)\}").expect("marker pattern is valid"));

/// Search a capture for the marker value
///
/// Returns `(n mod 10007) + 3` for a well-formed marker carrying the
/// decimal number `n`, and 0 when no marker is found or the first one is
/// malformed. The digits are folded modulo 10007 while scanning, so
/// arbitrarily long numbers cannot overflow.
pub fn marker_value(capture: &[u8]) -> u32 {
    let Some(found) = MARKER.captures(capture) else {
        return 0;
    };
    let digits = &found[1];
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return 0;
    }

    let n = digits
        .iter()
        .fold(0u32, |acc, b| (acc * 10 + u32::from(b - b'0')) % MARKER_MODULUS);
    n + MARKER_OFFSET
}
