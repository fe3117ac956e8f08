//! Golden-file runner: every `fixtures/*.json` schema is assembled and printed,
//! then compared against the `.java` file next to it.
//!
//! `cargo run -p dev-test-runner -- --bless` rewrites the goldens instead.
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use pojo_synth::SchemaFile;

fn main() -> anyhow::Result<()> {
    pojo_synth::init_tracing();
    let bless = std::env::args().any(|a| a == "--bless");
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    let pattern = fixtures.join("*.json");

    let mut failed = 0usize;
    let mut total = 0usize;
    for entry in glob::glob(&pattern.to_string_lossy())? {
        let schema_path = entry?;
        let golden_path = schema_path.with_extension("java");
        total += 1;

        let actual = match render(&schema_path) {
            Ok(src) => src,
            Err(error) => {
                failed += 1;
                println!("❌ {}: {}", schema_path.display(), format!("{error:#}").red());
                continue;
            }
        };

        if bless {
            std::fs::write(&golden_path, &actual)
                .with_context(|| format!("failed to write {}", golden_path.display()))?;
            println!("✍️  {}", golden_path.display());
            continue;
        }

        match std::fs::read_to_string(&golden_path) {
            Ok(expected) if expected == actual => println!("✅ {}", schema_path.display()),
            Ok(expected) => {
                failed += 1;
                println!("❌ {}", schema_path.display());
                print_first_difference(&expected, &actual);
            }
            Err(_) => {
                failed += 1;
                println!("❌ {}: missing {}", schema_path.display(), golden_path.display());
            }
        }
    }

    println!("{} / {total} passed", total - failed);
    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn render(schema_path: &Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(schema_path)?;
    let file: SchemaFile = pojo_synth::path_de::from_slice_with_path(&bytes)?;
    let schema = file.into_schema()?;
    Ok(pojo_synth::codegen::print(&pojo_synth::assemble(&schema)))
}

fn print_first_difference(expected: &str, actual: &str) {
    let mut expected_lines = expected.lines();
    let mut actual_lines = actual.lines();
    for line_no in 1.. {
        match (expected_lines.next(), actual_lines.next()) {
            (None, None) => return,
            (e, a) if e == a => continue,
            (e, a) => {
                println!("   line {line_no}:");
                println!("   {} {}", "-".green(), e.unwrap_or("<eof>").green());
                println!("   {} {}", "+".red(), a.unwrap_or("<eof>").red());
                return;
            }
        }
    }
}
