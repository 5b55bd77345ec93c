/*!
symspell module

The dictionary half of the symmetric delete algorithm:

- `SymSpellConfig` holds the construction parameters and validates them
- `SymSpell` stores the promoted words, the below-threshold words and the
  delete index (hash of a delete variant -> terms that produced it)
- `edits_prefix` generates the delete-variant hashes of a term's prefix
- `create_dictionary_entry` implements the construction protocol, either
  writing the delete index directly or deferring through a `SuggestionStage`

Lookup and word segmentation live in their own modules as further `impl SymSpell`
blocks.

How to populate a dictionary
- Compile-time: the `include_dictionary!` proc-macro (from `symdel_macros`)
  embeds a word list as a `phf` map and bulk-loads it through `from_phf`.
- Runtime: `SymSpell::from_iter` / `load_iter` for `(term, count)` pairs, or
  `load_dictionary` for a tab-separated corpus file.
- Incremental: `create_dictionary_entry` with no stage for single updates.
*/

use std::sync::Arc;

use ahash::{AHashMap, AHashSet, RandomState};
use parking_lot::Mutex;

use crate::edit_distance::{DistanceAlgorithm, EditDistance};
use crate::error::{Result, SymSpellError};
use crate::lookup::LookupScratch;
use crate::staging::SuggestionStage;

/// Word count of the corpus the default frequency dictionaries were built from.
pub const DEFAULT_CORPUS_WORD_COUNT: u64 = 1_024_908_267_229;

// Fixed seeds keep delete hashes stable for the lifetime of a dictionary.
const HASH_SEEDS: [u64; 4] = [808_259_318, 750_368_348, 84_901_999, 789_810_389];

/// Construction parameters for a [`SymSpell`] dictionary.
///
/// The integer fields are signed so that out-of-range input (for example a
/// negative capacity read from a command line) is reported by
/// [`validate`](Self::validate) instead of wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct SymSpellConfig {
    /// Expected number of words; pre-sizes the tables.
    pub initial_capacity: i64,
    /// Maximum edit distance the delete index is built for.
    pub max_dictionary_edit_distance: i64,
    /// Length of the word prefix deletes are generated from (5..7 is typical).
    pub prefix_length: i64,
    /// Minimum cumulative count for a word to become a suggestion.
    pub count_threshold: i64,
    /// Accepted for compatibility, 0..=16; storage is not compacted.
    pub compact_level: i64,
    pub distance_algorithm: DistanceAlgorithm,
    /// N in the word probability `count / N` used by word segmentation.
    pub corpus_word_count: u64,
}

impl Default for SymSpellConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 4096,
            max_dictionary_edit_distance: 2,
            prefix_length: 7,
            count_threshold: 1,
            compact_level: 16,
            distance_algorithm: DistanceAlgorithm::DamerauOsa,
            corpus_word_count: DEFAULT_CORPUS_WORD_COUNT,
        }
    }
}

impl SymSpellConfig {
    /// Check every parameter; nothing is clamped.
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity < 0 {
            return Err(SymSpellError::invalid_argument(
                "initial_capacity",
                format!("must not be negative, got {}", self.initial_capacity),
            ));
        }
        if self.max_dictionary_edit_distance < 0 {
            return Err(SymSpellError::invalid_argument(
                "max_dictionary_edit_distance",
                format!(
                    "must not be negative, got {}",
                    self.max_dictionary_edit_distance
                ),
            ));
        }
        if self.prefix_length < 1 || self.prefix_length <= self.max_dictionary_edit_distance {
            return Err(SymSpellError::invalid_argument(
                "prefix_length",
                format!(
                    "must be at least 1 and greater than max_dictionary_edit_distance ({}), got {}",
                    self.max_dictionary_edit_distance, self.prefix_length
                ),
            ));
        }
        if self.count_threshold < 0 {
            return Err(SymSpellError::invalid_argument(
                "count_threshold",
                format!("must not be negative, got {}", self.count_threshold),
            ));
        }
        if self.compact_level > 16 {
            return Err(SymSpellError::invalid_argument(
                "compact_level",
                format!("must be at most 16, got {}", self.compact_level),
            ));
        }
        if self.corpus_word_count == 0 {
            return Err(SymSpellError::invalid_argument(
                "corpus_word_count",
                "must be positive",
            ));
        }
        Ok(())
    }
}

/// SymSpell dictionary and delete index.
///
/// Build it single-threaded, then share it: `lookup` takes `&self` and
/// serializes concurrent callers on one internal lock, while every mutating
/// method takes `&mut self`.
pub struct SymSpell {
    pub(crate) max_dictionary_edit_distance: usize,
    pub(crate) prefix_length: usize,
    pub(crate) count_threshold: i64,
    compact_level: u8,
    initial_capacity: usize,
    pub(crate) corpus_word_count: u64,
    pub(crate) max_dictionary_word_length: usize,
    pub(crate) distance_comparer: EditDistance,
    hasher: RandomState,
    /// Promoted words: eligible as suggestions.
    pub(crate) words: AHashMap<Arc<str>, i64>,
    /// Words seen, but not yet often enough.
    below_threshold_words: AHashMap<Arc<str>, i64>,
    /// Hash of a delete variant -> every term that produced it. Keys are hashes
    /// only, so a bucket may hold terms of unrelated variants; lookup re-validates.
    pub(crate) deletes: AHashMap<u64, Vec<Arc<str>>>,
    pub(crate) scratch: Mutex<LookupScratch>,
}

impl SymSpell {
    /// Create an empty dictionary with default parameters and the given
    /// `max_dictionary_edit_distance`.
    pub fn new(max_dictionary_edit_distance: i64) -> Result<Self> {
        Self::with_config(SymSpellConfig {
            max_dictionary_edit_distance,
            ..SymSpellConfig::default()
        })
    }

    /// Create an empty dictionary, validating `config` first.
    pub fn with_config(config: SymSpellConfig) -> Result<Self> {
        config.validate()?;
        // validated above: every field is non-negative and in range
        let initial_capacity = config.initial_capacity as usize;
        debug!("creating dictionary: {:?}", config);

        Ok(Self {
            max_dictionary_edit_distance: config.max_dictionary_edit_distance as usize,
            prefix_length: config.prefix_length as usize,
            count_threshold: config.count_threshold,
            compact_level: config.compact_level.max(0) as u8,
            initial_capacity,
            corpus_word_count: config.corpus_word_count,
            max_dictionary_word_length: 0,
            distance_comparer: EditDistance::new(config.distance_algorithm),
            hasher: RandomState::with_seeds(
                HASH_SEEDS[0],
                HASH_SEEDS[1],
                HASH_SEEDS[2],
                HASH_SEEDS[3],
            ),
            words: AHashMap::with_capacity(initial_capacity),
            below_threshold_words: AHashMap::new(),
            deletes: AHashMap::with_capacity(initial_capacity),
            scratch: Mutex::new(LookupScratch::default()),
        })
    }

    /// Build a dictionary from `(term, count)` pairs, staging all deletes and
    /// committing them once.
    pub fn from_iter<I, S>(config: SymSpellConfig, iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: AsRef<str>,
    {
        let mut sym = Self::with_config(config)?;
        sym.load_iter(iter);
        Ok(sym)
    }

    /// Build a dictionary from a `phf` map, as emitted by `include_dictionary!`.
    pub fn from_phf(
        config: SymSpellConfig,
        dict: &'static ::phf::Map<&'static str, i64>,
    ) -> Result<Self> {
        Self::from_iter(config, dict.entries().map(|(term, count)| (*term, *count)))
    }

    /// Add `(term, count)` pairs through a staging arena and commit once.
    /// Counts of repeated terms accumulate. Returns the number of words promoted.
    pub fn load_iter<I, S>(&mut self, iter: I) -> usize
    where
        I: IntoIterator<Item = (S, i64)>,
        S: AsRef<str>,
    {
        let mut staging = SuggestionStage::new(self.initial_capacity);
        let mut promoted = 0;
        for (term, count) in iter {
            if self.create_dictionary_entry(term.as_ref(), count, Some(&mut staging)) {
                promoted += 1;
            }
        }
        self.commit_staged(staging);
        info!(
            "bulk load promoted {} words: {} words, {} delete entries",
            promoted,
            self.word_count(),
            self.entry_count()
        );
        promoted
    }

    /// Create or update a dictionary entry.
    ///
    /// Returns `true` if `key` became a suggestion-eligible word in this call
    /// (new, or promoted from below the threshold), `false` if it was only
    /// counted, stayed below the threshold, or was rejected.
    ///
    /// With `staging`, the new word's deletes are deferred until
    /// [`commit_staged`](Self::commit_staged); lookups will not reach the word
    /// through a delete variant before then.
    pub fn create_dictionary_entry(
        &mut self,
        key: &str,
        count: i64,
        staging: Option<&mut SuggestionStage>,
    ) -> bool {
        if key.is_empty() {
            return false;
        }
        let mut count = count;
        if count <= 0 {
            // a zero count can't change anything when there is a threshold
            if self.count_threshold > 0 {
                return false;
            }
            count = 0;
        }

        let term: Arc<str>;
        if let Some(previous) = self.below_threshold_words.get(key).copied() {
            count = previous.saturating_add(count);
            if count < self.count_threshold {
                if let Some(slot) = self.below_threshold_words.get_mut(key) {
                    *slot = count;
                }
                return false;
            }
            term = match self.below_threshold_words.remove_entry(key) {
                Some((stored, _)) => stored,
                None => Arc::from(key),
            };
        } else if let Some(slot) = self.words.get_mut(key) {
            // already indexed: deletes exist, only the count changes
            *slot = slot.saturating_add(count);
            return false;
        } else if count < self.count_threshold {
            self.below_threshold_words.insert(Arc::from(key), count);
            return false;
        } else {
            term = Arc::from(key);
        }

        self.words.insert(Arc::clone(&term), count);
        let key_len = char_len(&term);
        if key_len > self.max_dictionary_word_length {
            self.max_dictionary_word_length = key_len;
        }

        let edits = self.edits_prefix(&term);
        match staging {
            Some(stage) => {
                for delete_hash in edits {
                    stage.add(delete_hash, Arc::clone(&term));
                }
            }
            None => {
                for delete_hash in edits {
                    self.deletes
                        .entry(delete_hash)
                        .or_default()
                        .push(Arc::clone(&term));
                }
            }
        }
        true
    }

    /// Merge a staging arena into the delete index.
    pub fn commit_staged(&mut self, mut staging: SuggestionStage) {
        debug!(
            "committing {} staged deletes ({} nodes)",
            staging.delete_count(),
            staging.node_count()
        );
        staging.commit_to(&mut self.deletes);
    }

    /// Drop every word still below the count threshold.
    pub fn purge_below_threshold_words(&mut self) {
        debug!(
            "purging {} below-threshold words",
            self.below_threshold_words.len()
        );
        self.below_threshold_words.clear();
        self.below_threshold_words.shrink_to_fit();
    }

    /// Hash set of every delete variant of `key`'s prefix, the prefix included.
    pub(crate) fn edits_prefix(&self, key: &str) -> AHashSet<u64> {
        let mut hash_set = AHashSet::new();
        if char_len(key) <= self.max_dictionary_edit_distance {
            hash_set.insert(self.hash(""));
        }
        let prefix = truncate_chars(key, self.prefix_length);
        hash_set.insert(self.hash(prefix));
        self.edits(prefix, 0, &mut hash_set);
        hash_set
    }

    // only deletes: no transposes, replaces or inserts
    fn edits(&self, word: &str, edit_distance: usize, delete_words: &mut AHashSet<u64>) {
        if edit_distance >= self.max_dictionary_edit_distance {
            return;
        }
        let edit_distance = edit_distance + 1;
        let word_len = char_len(word);
        if word_len > 1 {
            for i in 0..word_len {
                let delete = remove_char(word, i);
                if delete_words.insert(self.hash(&delete)) {
                    self.edits(&delete, edit_distance, delete_words);
                }
            }
        }
    }

    #[inline]
    pub(crate) fn hash(&self, term: &str) -> u64 {
        self.hasher.hash_one(term)
    }

    /// Maximum edit distance for dictionary precalculation.
    pub fn max_dictionary_edit_distance(&self) -> usize {
        self.max_dictionary_edit_distance
    }

    /// Length of prefix, from which deletes are generated.
    pub fn prefix_length(&self) -> usize {
        self.prefix_length
    }

    /// Length of longest word in the dictionary, in chars.
    pub fn max_length(&self) -> usize {
        self.max_dictionary_word_length
    }

    pub fn count_threshold(&self) -> i64 {
        self.count_threshold
    }

    pub fn compact_level(&self) -> u8 {
        self.compact_level
    }

    pub fn distance_algorithm(&self) -> DistanceAlgorithm {
        self.distance_comparer.algorithm()
    }

    pub fn corpus_word_count(&self) -> u64 {
        self.corpus_word_count
    }

    /// Number of unique suggestion-eligible words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Number of words waiting to reach the count threshold.
    pub fn below_threshold_count(&self) -> usize {
        self.below_threshold_words.len()
    }

    /// Number of delete hashes in the index.
    pub fn entry_count(&self) -> usize {
        self.deletes.len()
    }

    /// Frequency of a promoted word.
    pub fn frequency(&self, word: &str) -> Option<i64> {
        self.words.get(word).copied()
    }

    /// Returns true if `word` is a promoted dictionary word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }
}

pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The first `n` chars of `s`.
pub(crate) fn truncate_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((index, _)) => &s[..index],
        None => s,
    }
}

/// `s` without its `index`-th char.
pub(crate) fn remove_char(s: &str, index: usize) -> String {
    s.chars()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, ch)| ch)
        .collect()
}
