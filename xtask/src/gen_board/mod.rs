//! `cargo xtask gen-board`: generate a board mapping module from a TOML description.
//!
//! The input names signals and peripherals by their `soul-board` id names and
//! buses as `<type><index>` (`i2c0`, `spi1`). Output is a Rust module with the
//! revision's `static` mapping, written next to the hand-written boards.

mod emit;
mod resolve;
mod schema;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;

use schema::BoardFile;

/// Where board modules live, relative to the workspace root.
const BOARDS_DIR: &str = "crates/soul-board/src/boards";

/// Entry point called from main.rs
pub fn run(input: &Path, output: Option<&Path>, check: bool) -> Result<()> {
    println!();
    println!(
        "{}",
        format!("🛠  Generating board mapping from {}...", input.display())
            .cyan()
            .bold()
    );
    println!();

    let start = Instant::now();
    let (board_name, source) = generate(input)?;
    let output = output.map_or_else(|| default_output(&board_name), Path::to_path_buf);
    tracing::debug!(output = %output.display(), bytes = source.len(), "rendered board module");

    if check {
        verify(input, &output, &source)?;
        println!(
            "{}",
            format!(
                "  ✓ {} is up to date ({:.2}s)",
                output.display(),
                start.elapsed().as_secs_f64()
            )
            .green()
        );
    } else {
        fs::write(&output, &source)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        tracing::info!(board = %board_name, output = %output.display(), "board mapping written");
        println!(
            "{}",
            format!(
                "  ✓ Wrote {} in {:.2}s",
                output.display(),
                start.elapsed().as_secs_f64()
            )
            .green()
        );
    }
    println!();

    Ok(())
}

/// Parse, validate and render `input`. Returns the board name and module source.
pub(crate) fn generate(input: &Path) -> Result<(String, String)> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let file = BoardFile::parse(&text).with_context(|| format!("Failed to parse {}", input.display()))?;
    let board = resolve::resolve(&file).with_context(|| format!("Invalid board {}", input.display()))?;
    tracing::debug!(
        board = %board.name,
        id = board.id,
        signals = board.signals.len(),
        peripherals = board.peripherals.len(),
        "resolved board description"
    );

    let source_name = input
        .file_name()
        .map_or_else(|| input.display().to_string(), |n| n.to_string_lossy().into_owned());
    let source = emit::render(&board, &source_name)
        .with_context(|| format!("Failed to render {}", input.display()))?;
    Ok((board.name, source))
}

/// Fail if `output` differs from `source`, the module rendered from `input`.
pub(crate) fn verify(input: &Path, output: &Path, source: &str) -> Result<()> {
    let existing = fs::read_to_string(output)
        .with_context(|| format!("Failed to read {}", output.display()))?;
    if existing != source {
        eprintln!(
            "{}",
            format!("  ✗ {} is out of date", output.display()).red().bold()
        );
        eprintln!("     Run 'cargo xtask gen-board {}' to regenerate", input.display());
        anyhow::bail!("Generated board mapping drifted from {}", input.display());
    }
    Ok(())
}

pub(crate) fn default_output(board_name: &str) -> PathBuf {
    Path::new(BOARDS_DIR).join(format!("{board_name}.rs"))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn workspace_root() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).parent().unwrap().to_path_buf()
    }

    #[test]
    fn checked_in_evt2_matches_its_description() {
        let root = workspace_root();
        let (name, source) = generate(&root.join("boards/evt2.toml")).unwrap();
        assert_eq!(name, "evt2");
        let checked_in = fs::read_to_string(root.join(BOARDS_DIR).join("evt2.rs")).unwrap();
        assert_eq!(source, checked_in, "run `cargo xtask gen-board boards/evt2.toml`");
    }

    #[test]
    fn write_then_check_round_trips_through_disk() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("proto.toml");
        fs::write(
            &input,
            "[board]\nid = 9\nname = \"proto\"\n[signals]\nbutton_n = { pin = 5, active_low = true }\n",
        )
        .unwrap();
        let output = tmp.path().join("proto.rs");

        run(&input, Some(&output), false).unwrap();
        assert!(fs::read_to_string(&output).unwrap().contains("pub static PROTO"));
        run(&input, Some(&output), true).unwrap();

        fs::write(&output, "// hand edited\n").unwrap();
        let err = run(&input, Some(&output), true).unwrap_err();
        assert!(err.to_string().contains("drifted"), "{err}");
    }

    #[test]
    fn invalid_description_names_the_input() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("bad.toml");
        fs::write(&input, "[board]\nid = 1\nname = \"bad\"\n[signals]\nlaser = { pin = 1 }\n").unwrap();
        let err = format!("{:#}", generate(&input).unwrap_err());
        assert!(err.contains("bad.toml"), "{err}");
        assert!(err.contains("unknown signal \"laser\""), "{err}");
    }

    #[test]
    fn default_output_is_the_boards_module_dir() {
        assert_eq!(
            default_output("evt3"),
            Path::new("crates/soul-board/src/boards/evt3.rs")
        );
    }
}
