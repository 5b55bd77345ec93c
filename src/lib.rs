//! symdel - symmetric delete spelling correction and word segmentation
//!
//! The dictionary precomputes, for every word, the hashes of all strings
//! reachable by deleting up to `max_dictionary_edit_distance` chars from the
//! word's prefix. A lookup generates the same deletes for the input, so
//! candidates come from a handful of hash probes instead of a scan, and only
//! survivors of cheap filters reach the exact edit distance comparator.
//!
//! Examples
//!
//! - Runtime construction:
//!
//! ```
//! use symdel::{SymSpell, SymSpellConfig, Verbosity};
//!
//! let entries = vec![("hello", 10), ("world", 7)];
//! let sym = SymSpell::from_iter(SymSpellConfig::default(), entries).unwrap();
//! let results = sym.lookup("helo", Verbosity::Closest, 2).unwrap();
//! assert_eq!(results[0].term, "hello");
//! ```
//!
//! - Compile-time embedding with `include_dictionary!`, which emits the word
//!   list as a `phf` map and builds the index from it at runtime:
//!
//! ```ignore
//! use symdel::include_dictionary;
//!
//! let sym = include_dictionary!("data/words.txt", max_distance = 2, lowercase = true);
//! let best = sym.find_top("helo");
//! ```
//!
//! - Corpus files: see [`SymSpell::load_dictionary`] and [`CorpusFormat`].

#[macro_use]
extern crate log;

pub mod edit_distance;
pub mod error;
pub mod loader;
mod lookup;
pub mod segmentation;
pub mod staging;
pub mod suggestion;
pub mod symspell;

/// Initialize `env_logger` for the library. Safe to call more than once.
///
/// The log level is controlled by the RUST_LOG environment variable:
/// - RUST_LOG=symdel=debug
/// - RUST_LOG=symdel=trace (one line per lookup)
pub fn init_logger() {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // another logger may already be installed by the host application
        if env_logger::try_init().is_ok() {
            debug!("symdel logging initialized");
        }
    });
}

pub use edit_distance::{damerau_osa, levenshtein, DistanceAlgorithm, EditDistance};
pub use error::{Result, SymSpellError};
pub use loader::CorpusFormat;
pub use segmentation::Composition;
pub use staging::SuggestionStage;
pub use suggestion::{Suggestion, Verbosity};
pub use symspell::{SymSpell, SymSpellConfig, DEFAULT_CORPUS_WORD_COUNT};

/// Re-export the compile-time dictionary macro from the `symdel-macros` crate.
pub use symdel_macros::include_dictionary;
