use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;
use syn::parse::{Parse, ParseStream};
use syn::{Expr, Ident, LitStr, Token};

/// Macro input representation:
/// include_dictionary!("path/to/file.txt", max_distance = 2, prefix_length = 7, count_threshold = 1, lowercase = true, has_freq = false)
struct IncludeDictionaryArgs {
    path: LitStr,
    assignments: Vec<(Ident, Expr)>,
}

impl Parse for IncludeDictionaryArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let path: LitStr = input.parse()?;

        let mut assignments = Vec::new();

        // optional comma separated `name = value` assignments
        while input.parse::<Token![,]>().is_ok() {
            // trailing comma
            if input.is_empty() {
                break;
            }

            let ident: Ident = input.parse()?;
            let _eq: Token![=] = input.parse()?;
            let value: Expr = input.parse()?;

            assignments.push((ident, value));
        }

        Ok(IncludeDictionaryArgs { path, assignments })
    }
}

fn int_literal(name: &str, expr: &Expr) -> i64 {
    match expr {
        Expr::Lit(el) => match &el.lit {
            syn::Lit::Int(li) => li.base10_parse::<i64>().unwrap_or_else(|e| {
                panic!("include_dictionary!: {} must be an integer literal: {}", name, e)
            }),
            _ => panic!("include_dictionary!: {} must be an integer literal", name),
        },
        _ => panic!("include_dictionary!: {} must be an integer literal expression", name),
    }
}

fn bool_literal(name: &str, expr: &Expr) -> bool {
    match expr {
        Expr::Lit(el) => match &el.lit {
            syn::Lit::Bool(lb) => lb.value,
            _ => panic!("include_dictionary!: {} must be a boolean literal", name),
        },
        _ => panic!("include_dictionary!: {} must be a boolean literal expression", name),
    }
}

/// include_dictionary!("path/to/file.txt", max_distance = 2, prefix_length = 7, count_threshold = 1, lowercase = true, has_freq = false)
///
/// Reads the word list at compile time, relative to the calling crate's
/// `CARGO_MANIFEST_DIR`, and emits it as a static `DICT_PHF:
/// ::phf::Map<&'static str, i64>` (word -> summed count). The macro expands to
/// an expression of type `symdel::SymSpell`, bulk-loaded from that map through
/// `SymSpell::from_phf`; the delete index is built when the expression runs.
///
/// Without `has_freq` every line is one word with count 1. With it, each line
/// is `word count` separated by whitespace. Blank lines and lines starting with
/// `#` are skipped. Invalid arguments and unreadable files fail the build.
///
/// The calling crate needs `phf` as a dependency.
#[proc_macro]
pub fn include_dictionary(input: TokenStream) -> TokenStream {
    let args = syn::parse_macro_input!(input as IncludeDictionaryArgs);

    // Defaults, matching `SymSpellConfig::default()`
    let mut max_distance: i64 = 2;
    let mut prefix_length: i64 = 7;
    let mut count_threshold: i64 = 1;
    let mut lowercase: bool = false;
    let mut has_freq: bool = false;

    for (ident, expr) in args.assignments.iter() {
        let name = ident.to_string();
        match name.as_str() {
            "max_distance" => max_distance = int_literal(&name, expr),
            "prefix_length" => prefix_length = int_literal(&name, expr),
            "count_threshold" => count_threshold = int_literal(&name, expr),
            "lowercase" => lowercase = bool_literal(&name, expr),
            "has_freq" => has_freq = bool_literal(&name, expr),
            _ => panic!("Unknown argument to include_dictionary: {}", name),
        }
    }

    if max_distance < 0 {
        panic!("include_dictionary!: max_distance must not be negative");
    }
    if prefix_length < 1 || prefix_length <= max_distance {
        panic!(
            "include_dictionary!: prefix_length ({}) must be at least 1 and greater than max_distance ({})",
            prefix_length, max_distance
        );
    }
    if count_threshold < 0 {
        panic!("include_dictionary!: count_threshold must not be negative");
    }

    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .expect("CARGO_MANIFEST_DIR environment variable not set");
    let relative_path = args.path.value();
    let file_path = Path::new(&manifest_dir).join(relative_path);

    let file = File::open(&file_path).unwrap_or_else(|e| {
        panic!(
            "include_dictionary!: failed to open dictionary file '{}': {}",
            file_path.display(),
            e
        )
    });

    let reader = io::BufReader::new(file);

    // BTreeMap for a deterministic expansion
    let mut dict: BTreeMap<String, i64> = BTreeMap::new();

    for (lineno, line_res) in reader.lines().enumerate() {
        let line = line_res.unwrap_or_else(|e| {
            panic!(
                "include_dictionary!: error reading line {} of {}: {}",
                lineno + 1,
                file_path.display(),
                e
            )
        });
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (word_raw, freq) = if has_freq {
            let mut parts = trimmed.split_whitespace();
            let w = parts.next().unwrap_or_default();
            let freq_str = parts.next().unwrap_or_else(|| {
                panic!(
                    "include_dictionary!: missing frequency on line {}: {}",
                    lineno + 1,
                    trimmed
                )
            });
            let f = freq_str.parse::<i64>().unwrap_or_else(|_| {
                panic!(
                    "include_dictionary!: invalid frequency on line {}: {}",
                    lineno + 1,
                    trimmed
                )
            });
            (w.to_string(), f)
        } else {
            (trimmed.to_string(), 1)
        };

        let word = if lowercase {
            word_raw.to_lowercase()
        } else {
            word_raw
        };

        let total = dict.entry(word).or_insert(0);
        *total = total.saturating_add(freq);
    }

    let dict_quote_iter = dict.iter().map(|(k, v)| {
        let key = LitStr::new(k, Span::call_site());
        // quoted as an `i64`-suffixed literal
        let val = *v;
        quote! {
            #key => #val
        }
    });

    let expanded = quote! {
        {
            static DICT_PHF: ::phf::Map<&'static str, i64> = ::phf::phf_map! {
                #(#dict_quote_iter, )*
            };

            let config = ::symdel::SymSpellConfig {
                max_dictionary_edit_distance: #max_distance,
                prefix_length: #prefix_length,
                count_threshold: #count_threshold,
                ..::core::default::Default::default()
            };
            match ::symdel::SymSpell::from_phf(config, &DICT_PHF) {
                ::core::result::Result::Ok(sym) => sym,
                ::core::result::Result::Err(err) => {
                    ::core::panic!("include_dictionary!: {}", err)
                }
            }
        }
    };

    TokenStream::from(expanded)
}
