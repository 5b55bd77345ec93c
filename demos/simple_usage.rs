/*!
simple_usage.rs

Example demonstrating:
- compile-time dictionary embedding using the `include_dictionary!` proc-macro
- runtime construction of `SymSpell` from an iterator of `(term, count)` pairs
- word segmentation of text with missing spaces

Run with:
    cargo run --example simple_usage

The `include_dictionary!` path is relative to the crate root (`CARGO_MANIFEST_DIR`).
This example uses the word lists under `tests/data/`.
*/

use symdel::{include_dictionary, Suggestion, SymSpell, SymSpellConfig, Verbosity};

fn print_suggestions(title: &str, suggestions: &[Suggestion]) {
    println!("-- {} ({} suggestions) --", title, suggestions.len());
    for s in suggestions {
        println!(
            "  term: {:<12} distance: {:>2} frequency: {}",
            s.term, s.distance, s.frequency
        );
    }
}

fn example_compile_time() -> symdel::Result<()> {
    // lowercase = true folds "Hello" and "hello" into one entry
    let sym = include_dictionary!("tests/data/words.txt", max_distance = 2, lowercase = true);

    println!("=== Compile-time dictionary ===");

    let top = sym.lookup("worl", Verbosity::Top, 2)?;
    print_suggestions("Top suggestion for 'worl'", &top);

    let closest = sym.lookup("appl", Verbosity::Closest, 2)?;
    print_suggestions("Closest suggestions for 'appl'", &closest);

    let all = sym.lookup("teso", Verbosity::All, 2)?;
    print_suggestions("All suggestions for 'teso'", &all);
    Ok(())
}

fn example_runtime_build() -> symdel::Result<()> {
    println!("\n=== Runtime-built dictionary ===");

    let entries = vec![
        ("hello", 3),
        ("hell", 1),
        ("help", 1),
        ("world", 5),
        ("test", 2),
        ("tost", 4),
        ("applied", 1),
        ("apple", 2),
        ("apply", 1),
    ];
    let sym = SymSpell::from_iter(SymSpellConfig::default(), entries)?;

    let s1 = sym.lookup("helo", Verbosity::Top, 2)?;
    print_suggestions("Top suggestion for 'helo'", &s1);

    let s2 = sym.lookup("appl", Verbosity::Closest, 2)?;
    print_suggestions("Closest suggestions for 'appl'", &s2);

    let s3 = sym.lookup_with_unknown("xyzzy", Verbosity::Closest, 1, true)?;
    print_suggestions("Unknown word 'xyzzy'", &s3);
    Ok(())
}

fn example_segmentation() -> symdel::Result<()> {
    println!("\n=== Word segmentation ===");

    let sym = include_dictionary!("tests/data/frequencies.txt", has_freq = true);
    let composition = sym.word_segmentation_with("itwasabright", 0, sym.max_length())?;
    println!(
        "  {:?} -> {:?} (distance {}, log probability {:.3})",
        "itwasabright",
        composition.corrected_string,
        composition.distance_sum,
        composition.probability_log_sum
    );
    Ok(())
}

fn main() -> symdel::Result<()> {
    symdel::init_logger();
    println!("symdel example: compile-time macro, runtime builder and segmentation\n");

    example_compile_time()?;
    example_runtime_build()?;
    example_segmentation()?;

    println!("\nDone.");
    Ok(())
}
