//! Corpus loading.
//!
//! A corpus is UTF-8 text with one entry per line, fields split by a single
//! separator char. Lines with fewer than two fields are skipped; a leading
//! byte-order mark is ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Result, SymSpellError};
use crate::staging::SuggestionStage;
use crate::symspell::SymSpell;

const BOM: char = '\u{feff}';

/// Initial capacity of the staging arena used while loading.
const STAGING_CAPACITY: usize = 16384;

/// Column layout of a corpus file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusFormat {
    /// Column holding the term.
    pub term_index: usize,
    /// Column holding the count.
    pub count_index: usize,
    pub separator: char,
}

impl Default for CorpusFormat {
    fn default() -> Self {
        Self {
            term_index: 0,
            count_index: 1,
            separator: '\t',
        }
    }
}

impl SymSpell {
    /// Load a corpus file into the dictionary.
    ///
    /// Returns `Ok(false)` if the file cannot be opened. Read and format errors
    /// are returned as errors; entries before the failing line stay loaded.
    pub fn load_dictionary<P: AsRef<Path>>(
        &mut self,
        path: P,
        format: &CorpusFormat,
    ) -> Result<bool> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                warn!("cannot open corpus {}: {}", path.display(), err);
                return Ok(false);
            }
        };
        let entries = self.load_dictionary_from_reader(BufReader::new(file), format)?;
        info!(
            "loaded {} entries from {}: {} words, {} delete entries",
            entries,
            path.display(),
            self.word_count(),
            self.entry_count()
        );
        Ok(true)
    }

    /// Load corpus lines from `reader`, staging every new word and committing
    /// once at the end. Returns the number of entries read.
    pub fn load_dictionary_from_reader<R: BufRead>(
        &mut self,
        reader: R,
        format: &CorpusFormat,
    ) -> Result<usize> {
        let mut staging = SuggestionStage::new(STAGING_CAPACITY);
        let result = self.stage_lines(reader, format, &mut staging);
        // whatever was accepted before a failure becomes searchable too
        self.commit_staged(staging);
        result
    }

    fn stage_lines<R: BufRead>(
        &mut self,
        reader: R,
        format: &CorpusFormat,
        staging: &mut SuggestionStage,
    ) -> Result<usize> {
        let mut entries = 0;
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let mut line = line.trim_end_matches('\r');
            if index == 0 {
                line = line.strip_prefix(BOM).unwrap_or(line);
            }

            let fields: Vec<&str> = line.split(format.separator).collect();
            if fields.len() < 2 {
                continue;
            }
            let line_number = index + 1;
            let term = field(&fields, format.term_index, line_number)?;
            let count = field(&fields, format.count_index, line_number)?;
            let count = count.trim().parse::<i64>().map_err(|_| SymSpellError::Parse {
                line: line_number,
                value: count.to_string(),
            })?;

            self.create_dictionary_entry(term, count, Some(&mut *staging));
            entries += 1;
        }
        Ok(entries)
    }
}

fn field<'a>(fields: &[&'a str], index: usize, line: usize) -> Result<&'a str> {
    fields
        .get(index)
        .copied()
        .ok_or(SymSpellError::MissingColumn { line, index })
}
