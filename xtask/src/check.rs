use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::process::Command;
use std::time::Instant;

use crate::gen_board;

const TARGET: &str = "thumbv7em-none-eabihf";

/// `cargo check` invocations every change must pass: (label, args).
const BUILDS: &[(&str, &[&str])] = &[
    (
        "bsp (no_std, STM32H7 target)",
        &["check", "-p", "bsp", "--target", TARGET, "--no-default-features"],
    ),
    (
        "bsp (no_std + defmt)",
        &["check", "-p", "bsp", "--target", TARGET, "--features", "defmt"],
    ),
    (
        "soul-board (no_std + defmt)",
        &["check", "-p", "soul-board", "--target", TARGET, "--features", "defmt"],
    ),
    (
        "workspace (host, tracing)",
        &["check", "--workspace", "--features", "bsp/tracing"],
    ),
];

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking board-support builds...".cyan().bold());
    println!();

    let total_start = Instant::now();

    for (label, args) in BUILDS {
        cargo_step(label, args)?;
    }

    check_generated_boards()?;

    // Clippy lints
    println!("{}", "  Running clippy lints...".cyan());
    let clippy_start = Instant::now();

    let clippy_output = Command::new("cargo")
        .args(["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])
        .output()
        .context("Failed to run clippy")?;

    if !clippy_output.status.success() {
        eprintln!("{}", "  ⚠ Clippy warnings found".yellow().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&clippy_output.stderr));
        // Don't fail on clippy warnings, just show them
    } else {
        println!(
            "{}",
            format!(
                "  ✓ Clippy passed in {:.2}s",
                clippy_start.elapsed().as_secs_f64()
            )
            .green()
        );
    }
    println!();

    // Format check
    println!("{}", "  Checking code formatting...".cyan());

    let fmt_output = Command::new("cargo")
        .args(["fmt", "--all", "--check"])
        .output()
        .context("Failed to run cargo fmt")?;

    if !fmt_output.status.success() {
        eprintln!("{}", "  ⚠ Formatting issues found".yellow().bold());
        eprintln!("     Run 'cargo fmt --all' to fix");
        // Don't fail on format issues
    } else {
        println!("{}", "  ✓ Formatting check passed".green());
    }
    println!();

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}

fn cargo_step(label: &str, args: &[&str]) -> Result<()> {
    println!("{}", format!("  Checking {label}...").cyan());
    let start = Instant::now();

    let output = Command::new("cargo")
        .args(args)
        .output()
        .with_context(|| format!("Failed to check {label}"))?;

    if !output.status.success() {
        eprintln!("{}", format!("  ✗ {label} check failed").red().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        anyhow::bail!("{label} check failed");
    }

    println!(
        "{}",
        format!(
            "  ✓ {label} passed in {:.2}s",
            start.elapsed().as_secs_f64()
        )
        .green()
    );
    println!();
    Ok(())
}

/// Every `boards/*.toml` must match its checked-in module.
fn check_generated_boards() -> Result<()> {
    println!("{}", "  Checking generated board tables...".cyan());

    let mut descriptions: Vec<_> = fs::read_dir("boards")
        .context("Failed to list boards/")?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    descriptions.sort();

    for input in &descriptions {
        let (name, source) = gen_board::generate(input)?;
        gen_board::verify(input, &gen_board::default_output(&name), &source)?;
    }

    println!(
        "{}",
        format!("  ✓ {} generated board table(s) up to date", descriptions.len()).green()
    );
    println!();
    Ok(())
}
