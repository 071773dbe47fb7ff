//! Custom cargo commands for docsift.
//!
//! Usage:
//!   cargo xtask verify          - Run full verification suite
//!   cargo xtask test            - Run all tests
//!   cargo xtask check           - Quick check (check + test + clippy)
//!   cargo xtask wasm            - Build the browser package with wasm-pack
//!   cargo xtask fuzz [TARGET]   - Run a fuzz target (default: all, 60s each)
//!   cargo xtask bench           - Run benchmarks

use anyhow::{bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

const FUZZ_TARGETS: &[&str] = &[
    "highlight_spans",
    "pagination_bounds",
    "response_decoding",
    "document_links",
];

const FUZZ_SECONDS: &str = "60";

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let task = args.next();
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("wasm") => wasm()?,
        Some("fuzz") => fuzz(args.next().as_deref())?,
        Some("bench") => bench()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify          Run full verification suite (panic audit, tests, clippy, wasm build)
  test            Run all Rust tests
  check           Quick check (cargo check + test + clippy)
  wasm            Build the browser package (wasm-pack, --target web)
  fuzz [TARGET]   Run fuzz targets for {}s each (needs cargo-fuzz, nightly)
  bench           Run benchmarks
"#,
        FUZZ_SECONDS
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("docsift Verification Suite");
    println!("==========================================\n");

    println!("[1/5] Auditing library code for panics...");
    check_no_panics()?;
    println!("✓ No unwrap/expect outside tests\n");

    println!("[2/5] Running Rust tests...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ All Rust tests passed\n");

    println!("[3/5] Checking the core without the HTTP client...");
    run_cargo(&["check", "--quiet", "--lib", "--no-default-features"])?;
    println!("✓ Core builds without reqwest/tokio\n");

    println!("[4/5] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--all-targets", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[5/5] Checking the wasm build...");
    run_cargo(&[
        "check",
        "--quiet",
        "--lib",
        "--no-default-features",
        "--features",
        "wasm",
        "--target",
        "wasm32-unknown-unknown",
    ])?;
    println!("✓ wasm32 build checks\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");
    println!("\nSafe to commit changes.");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Build the browser package into pkg/
fn wasm() -> Result<()> {
    let root = project_root()?;
    let status = Command::new("wasm-pack")
        .args([
            "build",
            "--target",
            "web",
            "--release",
            "--",
            "--no-default-features",
            "--features",
            "wasm",
        ])
        .current_dir(&root)
        .status()
        .context("Failed to run wasm-pack (is it installed?)")?;

    if !status.success() {
        bail!("wasm-pack build failed");
    }
    println!("✓ Package written to {}", root.join("pkg").display());
    Ok(())
}

/// Run one fuzz target, or all of them
fn fuzz(target: Option<&str>) -> Result<()> {
    let targets: Vec<&str> = match target {
        Some(t) if FUZZ_TARGETS.contains(&t) => vec![t],
        Some(t) => bail!("Unknown fuzz target '{}'. Known: {}", t, FUZZ_TARGETS.join(", ")),
        None => FUZZ_TARGETS.to_vec(),
    };

    let fuzz_dir = project_root()?.join("fuzz");
    for t in targets {
        println!("Fuzzing {} for {}s...", t, FUZZ_SECONDS);
        run_in(
            &fuzz_dir,
            "cargo",
            &[
                "+nightly",
                "fuzz",
                "run",
                t,
                "--",
                &format!("-max_total_time={}", FUZZ_SECONDS),
            ],
        )?;
    }
    println!("\n✓ Fuzzing finished without crashes");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    run_in(&project_root()?, "cargo", args)
}

fn run_in(dir: &Path, program: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .status()
        .with_context(|| format!("Failed to run {} {:?}", program, args))?;

    if !status.success() {
        bail!("{} {:?} failed", program, args);
    }

    Ok(())
}

/// Library code propagates errors; `unwrap`/`expect` belong in tests only.
///
/// Scans each file under src/ up to its first `#[cfg(test)]`. The testing
/// helpers module is exempt.
fn check_no_panics() -> Result<()> {
    let src_dir = project_root()?.join("src");
    let mut offenders = Vec::new();
    scan_for_panics(&src_dir, &mut offenders)?;

    if !offenders.is_empty() {
        bail!(
            "Found unwrap/expect in library code:\n  {}",
            offenders.join("\n  ")
        );
    }
    Ok(())
}

fn scan_for_panics(dir: &Path, offenders: &mut Vec<String>) -> Result<()> {
    for entry in std::fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            scan_for_panics(&path, offenders)?;
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("rs")
            || path.file_name().and_then(|n| n.to_str()) == Some("testing.rs")
        {
            continue;
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        for (i, line) in content.lines().enumerate() {
            if line.trim_start().starts_with("#[cfg(test)]") {
                break;
            }
            let code = line.split("//").next().unwrap_or("");
            if code.contains(".unwrap()") || code.contains(".expect(") {
                offenders.push(format!("{}:{}", path.display(), i + 1));
            }
        }
    }
    Ok(())
}
