/*!
Word segmentation

Splits a string into the most probable sequence of dictionary words, inserting
missing spaces and, with a non-zero edit distance, correcting each word.

Every start position `j` is combined with every part length `i` up to the
maximum segmentation word length. The best composition ending at each position
is kept in a circular buffer of that size, so memory stays bounded whatever the
input length.
*/

use crate::error::{Result, SymSpellError};
use crate::suggestion::Verbosity;
use crate::symspell::SymSpell;

/// Best composition of a (prefix of the) input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composition {
    /// The input split into parts, as written.
    pub segmented_string: String,
    /// The parts replaced by their top dictionary suggestion.
    pub corrected_string: String,
    /// Edits (inserted spaces, removed spaces, corrections) summed over all parts.
    pub distance_sum: usize,
    /// Sum of the parts' log10 word probabilities.
    pub probability_log_sum: f64,
}

impl SymSpell {
    /// Segment `input` with the dictionary's max edit distance and longest word
    /// length as the limits.
    pub fn word_segmentation(&self, input: &str) -> Result<Composition> {
        self.word_segmentation_with(
            input,
            self.max_dictionary_edit_distance,
            self.max_dictionary_word_length,
        )
    }

    /// Divide `input` into words by inserting missing spaces.
    ///
    /// Existing spaces are kept as candidate boundaries. Parts are matched as
    /// given, so case-fold the input first if the dictionary is lower case.
    /// Returns an error if `max_edit_distance` exceeds the dictionary's bound.
    pub fn word_segmentation_with(
        &self,
        input: &str,
        max_edit_distance: usize,
        max_segmentation_word_length: usize,
    ) -> Result<Composition> {
        if max_edit_distance > self.max_dictionary_edit_distance {
            return Err(SymSpellError::invalid_argument(
                "max_edit_distance",
                format!(
                    "{} exceeds the dictionary's max edit distance {}",
                    max_edit_distance, self.max_dictionary_edit_distance
                ),
            ));
        }

        let chars: Vec<char> = input.chars().collect();
        let input_len = chars.len();
        let array_size = max_segmentation_word_length.min(input_len);
        if array_size == 0 {
            return Ok(Composition::default());
        }
        let mut compositions = vec![Composition::default(); array_size];
        // slot of the composition ending just before the current start position
        let mut circular_index = array_size - 1;

        for j in 0..input_len {
            let imax = (input_len - j).min(max_segmentation_word_length);
            for i in 1..=imax {
                let mut stripped: &[char] = &chars[j..j + i];
                let mut separator_length = 0;
                if stripped[0].is_whitespace() {
                    stripped = &stripped[1..];
                } else {
                    // the space did not exist and had to be inserted
                    separator_length = 1;
                }

                // interior spaces are removed, each at the cost of one edit
                let part: String = stripped.iter().filter(|ch| !ch.is_whitespace()).collect();
                let part_len = part.chars().count();
                let mut top_ed = stripped.len() - part_len;

                let top = self
                    .lookup_guarded(&part, Verbosity::Top, max_edit_distance, false)
                    .into_iter()
                    .next();
                let (top_result, top_probability_log) = match top {
                    Some(suggestion) => {
                        top_ed += suggestion.distance;
                        // independent words: the log of the joint probability is the sum of logs
                        let probability =
                            (suggestion.frequency as f64 / self.corpus_word_count as f64).log10();
                        (suggestion.term, probability)
                    }
                    None => {
                        // unknown parts are penalized by length, so long unknown
                        // runs don't beat splitting into known words
                        top_ed += part_len;
                        let probability = (10.0
                            / (self.corpus_word_count as f64 * 10f64.powi(part_len as i32)))
                        .log10();
                        (part.clone(), probability)
                    }
                };

                let destination_index = (i + circular_index) % array_size;
                if j == 0 {
                    compositions[destination_index] = Composition {
                        segmented_string: part,
                        corrected_string: top_result,
                        distance_sum: top_ed,
                        probability_log_sum: top_probability_log,
                    };
                    continue;
                }

                let current = &compositions[circular_index];
                let destination = &compositions[destination_index];
                let probability_log_sum = current.probability_log_sum + top_probability_log;
                let replace = i == max_segmentation_word_length
                    // better probability at the same distance, or one space apart
                    || ((current.distance_sum + top_ed == destination.distance_sum
                        || current.distance_sum + separator_length + top_ed
                            == destination.distance_sum)
                        && destination.probability_log_sum < probability_log_sum)
                    // smaller distance
                    || current.distance_sum + separator_length + top_ed < destination.distance_sum;

                if replace {
                    let composition = Composition {
                        segmented_string: format!("{} {}", current.segmented_string, part),
                        corrected_string: format!("{} {}", current.corrected_string, top_result),
                        distance_sum: current.distance_sum + separator_length + top_ed,
                        probability_log_sum,
                    };
                    compositions[destination_index] = composition;
                }
            }
            circular_index = (circular_index + 1) % array_size;
        }

        Ok(std::mem::take(&mut compositions[circular_index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symspell::SymSpellConfig;

    fn dictionary() -> SymSpell {
        let words = [
            ("it", 10_000_000_000),
            ("was", 10_000_000_000),
            ("a", 10_000_000_000),
            ("bright", 1_000_000_000),
        ];
        SymSpell::from_iter(SymSpellConfig::default(), words).unwrap()
    }

    #[test]
    fn test_inserts_missing_spaces() {
        let sym = dictionary();
        let result = sym.word_segmentation_with("itwasabright", 0, 6).unwrap();
        assert_eq!(result.segmented_string, "it was a bright");
        assert_eq!(result.corrected_string, "it was a bright");
        assert_eq!(result.distance_sum, 3);
        assert!(result.probability_log_sum < 0.0);

        // a longer word limit than the dictionary needs changes nothing
        assert_eq!(sym.max_length(), 6);
        assert_eq!(sym.word_segmentation_with("itwasabright", 0, 12).unwrap(), result);
    }

    #[test]
    fn test_unknown_run_stays_whole() {
        let sym = dictionary();
        let result = sym.word_segmentation_with("itwasxyz", 0, 6).unwrap();
        assert_eq!(result.segmented_string, "it was xyz");
        assert_eq!(result.corrected_string, "it was xyz");
        // two inserted spaces plus three unknown chars
        assert_eq!(result.distance_sum, 5);
    }

    #[test]
    fn test_existing_spaces() {
        let sym = dictionary();
        // kept spaces are free, only the one inserted before "bright" counts
        let result = sym.word_segmentation_with("it was abright", 0, 6).unwrap();
        assert_eq!(result.segmented_string, "it was a bright");
        assert_eq!(result.corrected_string, "it was a bright");
        assert_eq!(result.distance_sum, 1);

        // one inserted space plus one removed from inside "wa s"
        let result = sym.word_segmentation_with("itwa s", 0, 6).unwrap();
        assert_eq!(result.segmented_string, "it was");
        assert_eq!(result.corrected_string, "it was");
        assert_eq!(result.distance_sum, 2);
    }

    #[test]
    fn test_single_unknown_char() {
        let sym = dictionary();
        let result = sym.word_segmentation_with("x", 0, 6).unwrap();
        assert_eq!(result.segmented_string, "x");
        assert_eq!(result.distance_sum, 1);
        let expected = (10.0 / (sym.corpus_word_count() as f64 * 10.0)).log10();
        assert!((result.probability_log_sum - expected).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_inputs() {
        let sym = dictionary();
        assert_eq!(sym.word_segmentation("").unwrap(), Composition::default());
        assert_eq!(
            sym.word_segmentation_with("itwas", 0, 0).unwrap(),
            Composition::default()
        );
        match sym.word_segmentation_with("itwas", 3, 6) {
            Err(SymSpellError::InvalidArgument { name, .. }) => {
                assert_eq!(name, "max_edit_distance")
            }
            other => panic!("expected invalid argument, got {other:?}"),
        }
    }
}
