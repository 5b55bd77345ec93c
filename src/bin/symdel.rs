//! symdel CLI binary.
//!
//! Loads a corpus, then corrects stdin line by line: every whitespace separated
//! token is replaced by its best suggestion (unknown tokens are kept), or with
//! `--segment` each whole line is segmented into words.

use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use symdel::{CorpusFormat, SymSpell, SymSpellConfig, Verbosity};

/// symdel - symmetric delete spelling correction
#[derive(Parser, Debug, Clone)]
#[command(name = "symdel")]
#[command(about = "Spelling correction and word segmentation over a frequency corpus")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct SymdelArgs {
    /// Corpus file: one `term<sep>count` entry per line
    corpus: PathBuf,

    /// Column of the term in each corpus line
    #[arg(long, default_value_t = 0)]
    term_index: usize,

    /// Column of the count in each corpus line
    #[arg(long, default_value_t = 1)]
    count_index: usize,

    /// Field separator of the corpus
    #[arg(long, default_value_t = '\t')]
    separator: char,

    /// Maximum edit distance the dictionary is built for
    #[arg(short = 'd', long, default_value_t = 2)]
    max_edit_distance: i64,

    /// Prefix length deletes are generated from
    #[arg(short, long, default_value_t = 7)]
    prefix_length: i64,

    /// Minimum count for a corpus word to be suggested
    #[arg(short = 't', long, default_value_t = 1)]
    count_threshold: i64,

    /// Which suggestions to consider for each token
    #[arg(long, value_enum, default_value = "all")]
    verbosity: VerbosityArg,

    /// Segment whole lines instead of correcting tokens
    #[arg(short, long)]
    segment: bool,

    /// Print every suggestion as `term, distance, frequency` instead of the best term
    #[arg(long)]
    details: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum VerbosityArg {
    Top,
    Closest,
    All,
}

impl From<VerbosityArg> for Verbosity {
    fn from(arg: VerbosityArg) -> Self {
        match arg {
            VerbosityArg::Top => Verbosity::Top,
            VerbosityArg::Closest => Verbosity::Closest,
            VerbosityArg::All => Verbosity::All,
        }
    }
}

fn main() -> Result<()> {
    symdel::init_logger();
    let args = SymdelArgs::parse();

    let config = SymSpellConfig {
        max_dictionary_edit_distance: args.max_edit_distance,
        prefix_length: args.prefix_length,
        count_threshold: args.count_threshold,
        ..SymSpellConfig::default()
    };
    let mut sym = SymSpell::with_config(config).context("invalid dictionary parameters")?;

    let format = CorpusFormat {
        term_index: args.term_index,
        count_index: args.count_index,
        separator: args.separator,
    };
    let loaded = sym
        .load_dictionary(&args.corpus, &format)
        .with_context(|| format!("failed to load corpus {}", args.corpus.display()))?;
    if !loaded {
        bail!("cannot open corpus {}", args.corpus.display());
    }

    let stdin = io::stdin();
    let mut out = BufWriter::new(io::stdout().lock());
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        if args.segment {
            let composition = sym.word_segmentation(&line)?;
            writeln!(out, "{}", composition.corrected_string)?;
            continue;
        }

        let max_edit_distance = sym.max_dictionary_edit_distance();
        let mut corrected = Vec::new();
        for token in line.split_whitespace() {
            let suggestions = sym.lookup_with_unknown(
                token,
                args.verbosity.into(),
                max_edit_distance,
                true,
            )?;
            if args.details {
                for suggestion in &suggestions {
                    writeln!(out, "{}", suggestion)?;
                }
            } else if let Some(best) = suggestions.into_iter().next() {
                corrected.push(best.term);
            }
        }
        if !args.details {
            writeln!(out, "{}", corrected.join(" "))?;
        }
    }
    out.flush()?;
    Ok(())
}
