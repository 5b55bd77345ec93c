use std::cmp::Ordering;
use std::fmt;

/// A candidate suggestion returned by lookup.
///
/// Suggestions own their term, so they stay valid after the dictionary changes.
/// They order by distance ascending, then frequency descending; the term breaks
/// any remaining tie so that sorting is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Suggestion {
    pub term: String,
    /// Edit distance from the queried term to the candidate.
    pub distance: usize,
    /// Frequency of the candidate in the underlying dictionary.
    pub frequency: i64,
}

impl Suggestion {
    pub fn new(term: impl Into<String>, distance: usize, frequency: i64) -> Self {
        Self {
            term: term.into(),
            distance,
            frequency,
        }
    }
}

impl Ord for Suggestion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| other.frequency.cmp(&self.frequency))
            .then_with(|| self.term.cmp(&other.term))
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.term, self.distance, self.frequency)
    }
}

/// Controls which suggestions are returned by lookup functions.
///
/// - `Top`: a single best suggestion (closest distance, then highest frequency)
/// - `Closest`: every suggestion at the smallest distance found
/// - `All`: every suggestion within the max distance, with no early termination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Top,
    Closest,
    All,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        let mut items = vec![
            Suggestion::new("far", 2, 1000),
            Suggestion::new("rare", 1, 3),
            Suggestion::new("common", 1, 90),
            Suggestion::new("also", 1, 90),
        ];
        items.sort();
        let terms: Vec<&str> = items.iter().map(|s| s.term.as_str()).collect();
        assert_eq!(terms, vec!["also", "common", "rare", "far"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Suggestion::new("bank", 1, 50).to_string(), "bank, 1, 50");
    }
}
