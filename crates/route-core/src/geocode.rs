//! Fast-path parsing for the geocoder: recognising a literal decimal-pair
//! query before ever touching the upstream forward-geocoder.

use crate::types::Coord;
use std::sync::OnceLock;

fn decimal_pair_pattern() -> &'static regex::Regex {
    static PATTERN: OnceLock<regex::Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        #[allow(clippy::unwrap_used)]
        regex::Regex::new(r"^\s*(-?\d{1,3}(?:\.\d+)?)\s*,\s*(-?\d{1,3}(?:\.\d+)?)\s*$").unwrap()
    })
}

/// Try to parse `query` as a literal `lat, lon` decimal pair.
///
/// Returns `None` if the string doesn't match the pattern at all (the
/// caller should fall through to the upstream geocoder). Returns
/// `Some(Err(_))` if it matches the pattern but the values are out of the
/// valid WGS84 range — that's a hard `InputInvalid`, not a "try the
/// upstream" signal, per the spec: an out-of-bounds pair must fail before
/// the upstream is ever called.
#[must_use]
pub fn parse_decimal_pair(query: &str) -> Option<Result<Coord, crate::types::OutOfBounds>> {
    let caps = decimal_pair_pattern().captures(query)?;
    let lat: f64 = caps.get(1)?.as_str().parse().ok()?;
    let lon: f64 = caps.get(2)?.as_str().parse().ok()?;
    Some(Coord::new(lat, lon))
}
