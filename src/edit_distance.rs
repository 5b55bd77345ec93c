/*!
Edit distance comparators

Both comparators fill the full `(len1 + 1) x (len2 + 1)` dynamic programming
matrix over `char`s. Inputs are compared as given: lower-casing and trimming
are the caller's business.

- [`levenshtein`]: insert, delete and substitute.
- [`damerau_osa`]: the restricted Damerau-Levenshtein variant (optimal string
  alignment). Adjacent transpositions cost 1, but no substring is edited twice,
  so `"ca"` to `"abc"` is 3 here rather than the unrestricted 2.
*/

use std::cmp::min;

/// Sentinel returned by [`EditDistance::compare`] when the distance exceeds the bound.
pub const OUT_OF_RANGE: i64 = -1;

/// Supported edit distance algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceAlgorithm {
    Levenshtein,
    /// Damerau optimal string alignment.
    #[default]
    DamerauOsa,
}

/// Bounded distance oracle used by lookup to verify candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditDistance {
    algorithm: DistanceAlgorithm,
}

impl EditDistance {
    pub fn new(algorithm: DistanceAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> DistanceAlgorithm {
        self.algorithm
    }

    /// Distance between the char sequences `a` and `b`, or [`OUT_OF_RANGE`] if it
    /// exceeds `max_distance`.
    ///
    /// The distance is never smaller than the length difference, so inputs whose
    /// lengths already differ by more than the bound skip the matrix entirely.
    pub fn compare(&self, a: &[char], b: &[char], max_distance: usize) -> i64 {
        if a.len().abs_diff(b.len()) > max_distance {
            return OUT_OF_RANGE;
        }

        let distance = match self.algorithm {
            DistanceAlgorithm::Levenshtein => matrix_distance(a, b, false),
            DistanceAlgorithm::DamerauOsa => matrix_distance(a, b, true),
        };

        if distance <= max_distance {
            distance as i64
        } else {
            OUT_OF_RANGE
        }
    }
}

/// Levenshtein distance between `a` and `b`.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    matrix_distance(&a, &b, false)
}

/// Restricted Damerau-Levenshtein (optimal string alignment) distance between `a` and `b`.
pub fn damerau_osa(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    matrix_distance(&a, &b, true)
}

fn matrix_distance(a: &[char], b: &[char], transpositions: bool) -> usize {
    let (alen, blen) = (a.len(), b.len());
    if alen == 0 {
        return blen;
    }
    if blen == 0 {
        return alen;
    }

    let width = blen + 1;
    let mut dp = vec![0usize; (alen + 1) * width];

    for i in 0..=alen {
        dp[i * width] = i;
    }
    for j in 0..=blen {
        dp[j] = j;
    }

    for i in 1..=alen {
        for j in 1..=blen {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut value = min(
                min(dp[(i - 1) * width + j] + 1, dp[i * width + j - 1] + 1),
                dp[(i - 1) * width + j - 1] + cost,
            );
            // transposition
            if transpositions && i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                value = min(value, dp[(i - 2) * width + j - 2] + 1);
            }
            dp[i * width + j] = value;
        }
    }

    dp[alen * width + blen]
}
