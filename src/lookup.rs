/*!
Lookup over the delete index

The input's prefix and its deletes (up to `max_edit_distance` of them) are
expanded breadth-first, so candidates come out ordered by deletion depth. Each
candidate's hash bucket lists dictionary terms that share a delete variant with
it. Those terms go through cheap length, prefix and boundary-character filters
before the exact comparator runs, because buckets are keyed by hash alone and
most entries are rejected.
*/

use std::sync::Arc;

use ahash::AHashSet;

use crate::error::{Result, SymSpellError};
use crate::suggestion::{Suggestion, Verbosity};
use crate::symspell::{char_len, remove_char, truncate_chars, SymSpell};

/// Per-call working state, kept behind the lookup lock so its allocations are reused.
#[derive(Debug, Default)]
pub(crate) struct LookupScratch {
    candidates: Vec<String>,
    /// Deletes already queued as candidates.
    seen_deletes: AHashSet<String>,
    /// Dictionary terms already verified. Keyed by the term itself, so two terms
    /// that share a hash are both considered.
    seen_suggestions: AHashSet<Arc<str>>,
}

impl LookupScratch {
    fn clear(&mut self) {
        self.candidates.clear();
        self.seen_deletes.clear();
        self.seen_suggestions.clear();
    }
}

impl SymSpell {
    /// Look up suggestions for `input`.
    ///
    /// `max_edit_distance` may not exceed the distance the dictionary was built
    /// for. `verbosity` controls which suggestions are returned:
    /// - `Verbosity::Top` returns the closest suggestion with the highest frequency.
    /// - `Verbosity::Closest` returns every suggestion at the smallest distance found.
    /// - `Verbosity::All` returns every suggestion with distance <= max_edit_distance.
    ///
    /// `Closest` and `All` results are sorted by distance ascending, then frequency
    /// descending. The input is matched as given; fold case before calling.
    pub fn lookup(
        &self,
        input: &str,
        verbosity: Verbosity,
        max_edit_distance: usize,
    ) -> Result<Vec<Suggestion>> {
        self.lookup_with_unknown(input, verbosity, max_edit_distance, false)
    }

    /// Like [`lookup`](Self::lookup), but with `include_unknown` an empty result
    /// becomes a single `(input, max_edit_distance + 1, 0)` item.
    pub fn lookup_with_unknown(
        &self,
        input: &str,
        verbosity: Verbosity,
        max_edit_distance: usize,
        include_unknown: bool,
    ) -> Result<Vec<Suggestion>> {
        if max_edit_distance > self.max_dictionary_edit_distance {
            return Err(SymSpellError::invalid_argument(
                "max_edit_distance",
                format!(
                    "{} exceeds the dictionary's max edit distance {}",
                    max_edit_distance, self.max_dictionary_edit_distance
                ),
            ));
        }
        Ok(self.lookup_guarded(input, verbosity, max_edit_distance, include_unknown))
    }

    /// Return the single best suggestion (if any) for `term`, searching up to the
    /// dictionary's max edit distance.
    pub fn find_top(&self, term: &str) -> Option<Suggestion> {
        self.lookup_guarded(term, Verbosity::Top, self.max_dictionary_edit_distance, false)
            .into_iter()
            .next()
    }

    /// Return all suggestions with minimal distance (shorthand for Closest).
    pub fn find_closest(&self, term: &str) -> Vec<Suggestion> {
        self.lookup_guarded(
            term,
            Verbosity::Closest,
            self.max_dictionary_edit_distance,
            false,
        )
    }

    /// Return all suggestions within the dictionary's max edit distance (shorthand for All).
    pub fn find_all(&self, term: &str) -> Vec<Suggestion> {
        self.lookup_guarded(term, Verbosity::All, self.max_dictionary_edit_distance, false)
    }

    pub(crate) fn lookup_guarded(
        &self,
        input: &str,
        verbosity: Verbosity,
        max_edit_distance: usize,
        include_unknown: bool,
    ) -> Vec<Suggestion> {
        let mut scratch = self.scratch.lock();
        let mut suggestions = self.lookup_locked(input, verbosity, max_edit_distance, &mut scratch);
        scratch.clear();

        if include_unknown && suggestions.is_empty() {
            suggestions.push(Suggestion::new(input, max_edit_distance + 1, 0));
        }
        trace!(
            "lookup {:?} {:?} max={} -> {} suggestions",
            input,
            verbosity,
            max_edit_distance,
            suggestions.len()
        );
        suggestions
    }

    fn lookup_locked(
        &self,
        input: &str,
        verbosity: Verbosity,
        max_edit_distance: usize,
        scratch: &mut LookupScratch,
    ) -> Vec<Suggestion> {
        let mut suggestions: Vec<Suggestion> = Vec::new();
        let input_len = char_len(input);
        if input_len == 0 {
            return suggestions;
        }
        // early exit - word is too long to possibly match any words
        if input_len.saturating_sub(max_edit_distance) > self.max_dictionary_word_length {
            return suggestions;
        }

        // quick look for exact match
        if let Some(&count) = self.words.get(input) {
            suggestions.push(Suggestion::new(input, 0, count));
            // an exact match is optimal unless the caller wants all matches
            if verbosity != Verbosity::All {
                return suggestions;
            }
        }

        // only checking presence or frequency, e.g. for word segmentation
        if max_edit_distance == 0 {
            return suggestions;
        }

        let input_chars: Vec<char> = input.chars().collect();
        let input_prefix_len = input_len.min(self.prefix_length);
        let mut max_edit_distance2 = max_edit_distance;
        scratch
            .candidates
            .push(truncate_chars(input, self.prefix_length).to_owned());

        let mut candidate_pointer = 0;
        while candidate_pointer < scratch.candidates.len() {
            // the slot is never read again, so the candidate is moved out
            let candidate = std::mem::take(&mut scratch.candidates[candidate_pointer]);
            candidate_pointer += 1;
            let candidate_len = char_len(&candidate);
            let length_diff = input_prefix_len - candidate_len;

            if length_diff > max_edit_distance2 {
                // candidates are ordered by delete distance, so none further on are closer
                if verbosity == Verbosity::All {
                    continue;
                }
                break;
            }

            if let Some(dict_suggestions) = self.deletes.get(&self.hash(&candidate)) {
                for suggestion in dict_suggestions {
                    if &**suggestion == input {
                        continue;
                    }
                    let suggestion_len = char_len(suggestion);
                    // too far apart, or in this bucket only through a hash collision
                    if suggestion_len.abs_diff(input_len) > max_edit_distance2
                        || suggestion_len < candidate_len
                        || (suggestion_len == candidate_len && &**suggestion != candidate)
                    {
                        continue;
                    }
                    let sugg_prefix_len = suggestion_len.min(self.prefix_length);
                    if sugg_prefix_len > input_prefix_len
                        && sugg_prefix_len - candidate_len > max_edit_distance2
                    {
                        continue;
                    }

                    let distance;
                    if candidate_len == 0 {
                        // no chars in common: both are at most max_edit_distance long
                        distance = input_len.max(suggestion_len);
                        if distance > max_edit_distance2
                            || !scratch.seen_suggestions.insert(Arc::clone(suggestion))
                        {
                            continue;
                        }
                    } else if suggestion_len == 1 {
                        distance = input_len.max(suggestion_len);
                        if distance > max_edit_distance2
                            || !scratch.seen_suggestions.insert(Arc::clone(suggestion))
                        {
                            continue;
                        }
                    } else {
                        let suggestion_chars: Vec<char> = suggestion.chars().collect();
                        if self.has_different_suffix(
                            max_edit_distance,
                            &input_chars,
                            &suggestion_chars,
                            candidate_len,
                        ) {
                            continue;
                        }
                        // pays off only when the bound can tighten
                        if verbosity != Verbosity::All
                            && !self.delete_in_suggestion_prefix(&candidate, &suggestion_chars)
                        {
                            continue;
                        }
                        if !scratch.seen_suggestions.insert(Arc::clone(suggestion)) {
                            continue;
                        }
                        let compared = self.distance_comparer.compare(
                            &input_chars,
                            &suggestion_chars,
                            max_edit_distance2,
                        );
                        if compared < 0 {
                            continue;
                        }
                        distance = compared as usize;
                    }

                    if distance > max_edit_distance2 {
                        continue;
                    }
                    let Some(&suggestion_count) = self.words.get(&**suggestion) else {
                        continue;
                    };
                    let item = Suggestion::new(&**suggestion, distance, suggestion_count);

                    if !suggestions.is_empty() {
                        match verbosity {
                            Verbosity::Closest => {
                                if distance < max_edit_distance2 {
                                    suggestions.clear();
                                }
                            }
                            Verbosity::Top => {
                                if distance < max_edit_distance2
                                    || suggestion_count > suggestions[0].frequency
                                {
                                    max_edit_distance2 = distance;
                                    suggestions[0] = item;
                                }
                                continue;
                            }
                            Verbosity::All => {}
                        }
                    }
                    if verbosity != Verbosity::All {
                        max_edit_distance2 = distance;
                    }
                    suggestions.push(item);
                }
            }

            // queue the candidate's own deletes until max_edit_distance is reached
            if length_diff < max_edit_distance && candidate_len <= self.prefix_length {
                // nothing closer than what was already found can come from deeper deletes
                if verbosity != Verbosity::All && length_diff >= max_edit_distance2 {
                    continue;
                }
                for i in 0..candidate_len {
                    let delete = remove_char(&candidate, i);
                    if !scratch.seen_deletes.contains(&delete) {
                        scratch.seen_deletes.insert(delete.clone());
                        scratch.candidates.push(delete);
                    }
                }
            }
        }

        if suggestions.len() > 1 {
            suggestions.sort();
        }
        suggestions
    }

    /// True when the prefix already spends the whole edit budget and the parts
    /// after the prefix differ, so the distance must exceed `max_edit_distance`.
    fn has_different_suffix(
        &self,
        max_edit_distance: usize,
        input: &[char],
        suggestion: &[char],
        candidate_len: usize,
    ) -> bool {
        if self.prefix_length - max_edit_distance != candidate_len {
            return false;
        }
        let (input_len, suggestion_len) = (input.len(), suggestion.len());
        let shortest = input_len.min(suggestion_len);
        if shortest <= self.prefix_length {
            return false;
        }
        let min = shortest - self.prefix_length;

        if min > 1 && input[input_len + 1 - min..] != suggestion[suggestion_len + 1 - min..] {
            return true;
        }
        // first char after the prefix differs and is not an adjacent transposition
        input[input_len - min] != suggestion[suggestion_len - min]
            && (input[input_len - min - 1] != suggestion[suggestion_len - min]
                || input[input_len - min] != suggestion[suggestion_len - min - 1])
    }

    /// Check that the delete's chars appear in order in the suggestion's prefix,
    /// otherwise the bucket entry is a hash collision.
    fn delete_in_suggestion_prefix(&self, delete: &str, suggestion: &[char]) -> bool {
        let suggestion_len = suggestion.len().min(self.prefix_length);
        let mut j = 0;
        for del_char in delete.chars() {
            while j < suggestion_len && del_char != suggestion[j] {
                j += 1;
            }
            if j == suggestion_len {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::edit_distance::{damerau_osa, DistanceAlgorithm};
    use crate::error::SymSpellError;
    use crate::suggestion::{Suggestion, Verbosity};
    use crate::symspell::{SymSpell, SymSpellConfig};

    const WORDS: &[(&str, i64)] = &[
        ("the", 500),
        ("then", 120),
        ("they", 300),
        ("than", 90),
        ("bank", 50),
        ("band", 45),
        ("bark", 30),
        ("bake", 25),
        ("ba", 3),
        ("a", 400),
        ("an", 200),
        ("and", 350),
        ("hand", 80),
        ("sand", 40),
        ("stand", 60),
    ];

    fn build(config: SymSpellConfig) -> SymSpell {
        SymSpell::from_iter(config, WORDS.iter().copied()).unwrap()
    }

    fn is_single_char(term: &str) -> bool {
        term.chars().count() == 1
    }

    // one-char terms are scored by length alone, see test_single_char_terms
    fn brute_force(input: &str, max_distance: usize) -> Vec<Suggestion> {
        let mut expected: Vec<Suggestion> = WORDS
            .iter()
            .filter(|(term, _)| !is_single_char(term))
            .filter_map(|&(term, count)| {
                let distance = damerau_osa(input, term);
                (distance <= max_distance).then(|| Suggestion::new(term, distance, count))
            })
            .collect();
        expected.sort();
        expected
    }

    #[test]
    fn test_exact_matches() {
        let sym = build(SymSpellConfig::default());
        for &(term, count) in WORDS {
            let top = sym.lookup(term, Verbosity::Top, 2).unwrap();
            assert_eq!(top, vec![Suggestion::new(term, 0, count)]);
        }
    }

    #[test]
    fn test_all_matches_brute_force() {
        let sym = build(SymSpellConfig::default());
        for input in ["teh", "bnak", "hnad", "an", "x", "stnad", "thne", "bakn", "sa"] {
            for max_distance in 0..=2 {
                let mut all = sym.lookup(input, Verbosity::All, max_distance).unwrap();
                all.retain(|s| !is_single_char(&s.term));
                assert_eq!(all, brute_force(input, max_distance), "{input} @ {max_distance}");
            }
        }
    }

    #[test]
    fn test_single_char_terms() {
        let sym = SymSpell::from_iter(SymSpellConfig::default(), [("a", 10), ("the", 5)]).unwrap();
        // distance is max(input length, 1) even when the input contains the char
        assert!(sym.lookup("ab", Verbosity::All, 1).unwrap().is_empty());
        assert_eq!(
            sym.lookup("ab", Verbosity::All, 2).unwrap(),
            vec![Suggestion::new("a", 2, 10)]
        );
        assert_eq!(
            sym.lookup("b", Verbosity::Closest, 1).unwrap(),
            vec![Suggestion::new("a", 1, 10)]
        );

        let sym = build(SymSpellConfig::default());
        let all = sym.lookup("sa", Verbosity::All, 2).unwrap();
        assert!(all.contains(&Suggestion::new("a", 2, 400)));
        assert_eq!(
            sym.lookup("sa", Verbosity::Closest, 2).unwrap(),
            vec![Suggestion::new("ba", 1, 3)]
        );
    }

    #[test]
    fn test_hash_collisions_are_filtered() {
        let words = [("bank", 50), ("qq", 5), ("xyz", 5), ("zzzzzz", 5)];
        let mut sym = SymSpell::from_iter(SymSpellConfig::default(), words).unwrap();
        let bucket = sym.hash("bak");
        // entries that share the bucket of "bak" only by hash
        let intruders = sym.deletes.entry(bucket).or_default();
        // shorter than the delete
        intruders.push(Arc::from("qq"));
        // same length as the delete but a different string
        intruders.push(Arc::from("xyz"));
        // too long for the prefix
        intruders.push(Arc::from("zzzzzz"));

        for verbosity in [Verbosity::Top, Verbosity::Closest, Verbosity::All] {
            assert_eq!(
                sym.lookup("bakn", verbosity, 2).unwrap(),
                vec![Suggestion::new("bank", 1, 50)],
                "{verbosity:?}"
            );
        }
    }

    #[test]
    fn test_closest_is_the_best_tier_of_all() {
        let sym = build(SymSpellConfig::default());
        for input in ["teh", "bnak", "hnad", "x", "stnad", "thne", "bakn", "sa"] {
            let all = sym.lookup(input, Verbosity::All, 2).unwrap();
            let closest = sym.lookup(input, Verbosity::Closest, 2).unwrap();
            let best = all.first().map(|s| s.distance);
            let expected: Vec<Suggestion> = all
                .iter()
                .filter(|s| Some(s.distance) == best)
                .cloned()
                .collect();
            assert_eq!(closest, expected, "{input}");

            let top = sym.lookup(input, Verbosity::Top, 2).unwrap();
            assert!(top.len() <= 1);
            assert_eq!(top.first(), closest.first(), "{input}");
        }
    }

    #[test]
    fn test_transposition_below_threshold() {
        let entries = [("the", 100), ("bank", 50), ("bnak", 1)];
        let config = SymSpellConfig {
            count_threshold: 2,
            ..SymSpellConfig::default()
        };
        let sym = SymSpell::from_iter(config.clone(), entries).unwrap();
        assert!(!sym.contains("bnak"));
        assert_eq!(
            sym.lookup("bnak", Verbosity::Closest, 2).unwrap(),
            vec![Suggestion::new("bank", 1, 50)]
        );

        let sym = SymSpell::from_iter(
            SymSpellConfig {
                distance_algorithm: DistanceAlgorithm::Levenshtein,
                ..config
            },
            entries,
        )
        .unwrap();
        assert_eq!(
            sym.lookup("bnak", Verbosity::Closest, 2).unwrap(),
            vec![Suggestion::new("bank", 2, 50)]
        );
        assert!(sym.lookup("bnak", Verbosity::Closest, 1).unwrap().is_empty());
    }

    #[test]
    fn test_short_words_through_empty_delete() {
        let sym = SymSpell::from_iter(SymSpellConfig::default(), [("a", 10), ("i", 5)]).unwrap();
        assert_eq!(
            sym.lookup("x", Verbosity::Closest, 1).unwrap(),
            vec![Suggestion::new("a", 1, 10), Suggestion::new("i", 1, 5)]
        );
    }

    #[test]
    fn test_max_edit_distance_bound() {
        let sym = build(SymSpellConfig::default());
        match sym.lookup("bnak", Verbosity::Top, 3) {
            Err(SymSpellError::InvalidArgument { name, .. }) => {
                assert_eq!(name, "max_edit_distance")
            }
            other => panic!("expected invalid argument, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_distance_is_membership() {
        let sym = build(SymSpellConfig::default());
        assert!(sym.lookup("bnak", Verbosity::All, 0).unwrap().is_empty());
        assert_eq!(
            sym.lookup("bank", Verbosity::All, 0).unwrap(),
            vec![Suggestion::new("bank", 0, 50)]
        );
    }

    #[test]
    fn test_include_unknown() {
        let sym = build(SymSpellConfig::default());
        // longer than any word plus the distance
        assert_eq!(
            sym.lookup_with_unknown("bankruptcies", Verbosity::Closest, 2, true)
                .unwrap(),
            vec![Suggestion::new("bankruptcies", 3, 0)]
        );
        assert_eq!(
            sym.lookup_with_unknown("zzzz", Verbosity::Top, 1, true).unwrap(),
            vec![Suggestion::new("zzzz", 2, 0)]
        );
        // found words suppress the sentinel
        assert_eq!(
            sym.lookup_with_unknown("bank", Verbosity::Top, 2, true).unwrap(),
            vec![Suggestion::new("bank", 0, 50)]
        );
        assert!(sym
            .lookup("bankruptcies", Verbosity::All, 2)
            .unwrap()
            .is_empty());
        assert!(sym.lookup("", Verbosity::All, 2).unwrap().is_empty());
    }

    #[test]
    fn test_long_words_match_through_prefix() {
        let config = SymSpellConfig {
            prefix_length: 5,
            ..SymSpellConfig::default()
        };
        let sym = SymSpell::from_iter(config, [("development", 10), ("developer", 20)]).unwrap();
        assert_eq!(
            sym.find_top("developmnet"),
            Some(Suggestion::new("development", 1, 10))
        );
        let all = sym.find_all("developmnet");
        assert_eq!(all, vec![Suggestion::new("development", 1, 10)]);
    }

    #[test]
    fn test_repeated_lookups_are_identical() {
        let sym = build(SymSpellConfig::default());
        let first = sym.lookup("hnad", Verbosity::All, 2).unwrap();
        let second = sym.lookup("hnad", Verbosity::All, 2).unwrap();
        assert!(!first.is_empty());
        assert_eq!(first, second);
        assert_eq!(sym.find_closest("hnad"), sym.find_closest("hnad"));
    }

    #[test]
    fn test_staged_words_need_commit() {
        let mut sym = SymSpell::new(2).unwrap();
        let mut stage = crate::staging::SuggestionStage::new(16);
        sym.create_dictionary_entry("bank", 5, Some(&mut stage));
        // exact lookups read the word table, fuzzy ones the delete index
        assert_eq!(sym.find_top("bank"), Some(Suggestion::new("bank", 0, 5)));
        assert_eq!(sym.find_top("bnak"), None);
        sym.commit_staged(stage);
        assert_eq!(sym.find_top("bnak"), Some(Suggestion::new("bank", 1, 5)));
    }
}
