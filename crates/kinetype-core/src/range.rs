//! Index ranges restricting which units take part in a phase.
//!
//! Ranges are written 1-based and inclusive (`"1-1,5-18,22-34"`) and stored
//! 0-based and half-open (`[0,1), [4,18), [21,34)`).

use crate::errors::KinetypeError;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::trace;

/// A set of half-open unit-index intervals.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSet(pub Vec<Range<usize>>);

impl RangeSet {
    pub fn new(ranges: Vec<Range<usize>>) -> Self {
        Self(ranges)
    }

    /// Returns true if `index` falls inside at least one interval.
    pub fn contains(&self, index: usize) -> bool {
        self.0.iter().any(|r| r.contains(&index))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ranges(&self) -> &[Range<usize>] {
        &self.0
    }
}

/// Parses a single `N` or `N-M` token (1-based, inclusive).
pub fn parse_range_token(token: &str) -> Result<Range<usize>, KinetypeError> {
    let invalid = || KinetypeError::InvalidRange(token.to_string());
    let token = token.trim();

    let (lower, upper) = match token.split_once('-') {
        Some((lower, upper)) => (lower.trim(), upper.trim()),
        None => (token, token),
    };
    let lower: usize = lower.parse().map_err(|_| invalid())?;
    let upper: usize = upper.parse().map_err(|_| invalid())?;

    if lower == 0 || upper < lower {
        return Err(invalid());
    }
    Ok((lower - 1)..upper)
}

/// Parses a comma-separated range string.
///
/// `None` and the empty string mean "no restriction" and return `None`.
/// Malformed tokens are dropped; the remaining ones still apply.
pub fn parse_ranges(input: Option<&str>) -> Option<RangeSet> {
    let input = input?.trim();
    if input.is_empty() {
        return None;
    }

    let ranges = input
        .split(',')
        .filter(|token| !token.trim().is_empty())
        .filter_map(|token| match parse_range_token(token) {
            Ok(range) => Some(range),
            Err(e) => {
                trace!("dropping range token: {}", e);
                None
            }
        })
        .collect();

    Some(RangeSet::new(ranges))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_ranges() {
        let set = parse_ranges(Some("1-1,5-18,22-34")).unwrap();
        assert_eq!(set.ranges(), &[0..1, 4..18, 21..34]);
    }

    #[test]
    fn parses_single_index() {
        assert_eq!(parse_ranges(Some("3")).unwrap().ranges(), &[2..3]);
    }

    #[test]
    fn drops_malformed_tokens() {
        let set = parse_ranges(Some("x-y,2-4, 7 ,5-3,0,-,9-")).unwrap();
        assert_eq!(set.ranges(), &[1..4, 6..7]);
    }

    #[test]
    fn empty_means_unrestricted() {
        assert_eq!(parse_ranges(None), None);
        assert_eq!(parse_ranges(Some("")), None);
        assert_eq!(parse_ranges(Some("   ")), None);
    }

    #[test]
    fn all_malformed_restricts_everyone() {
        let set = parse_ranges(Some("abc")).unwrap();
        assert!(set.is_empty());
        assert!(!set.contains(0));
    }

    #[test]
    fn membership_is_half_open() {
        let set = parse_ranges(Some("2-3")).unwrap();
        assert!(!set.contains(0));
        assert!(set.contains(1));
        assert!(set.contains(2));
        assert!(!set.contains(3));
    }

    #[test]
    fn token_errors_name_the_token() {
        assert_eq!(
            parse_range_token("x-y"),
            Err(KinetypeError::InvalidRange("x-y".to_string()))
        );
    }
}
