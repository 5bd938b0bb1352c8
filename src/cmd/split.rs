use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use slidesplit::{process_document, SplitConfig};

pub fn cmd_split(
    input: &Path,
    output: Option<PathBuf>,
    config: &SplitConfig,
    quiet: bool,
    json: bool,
) -> Result<()> {
    let output = output.unwrap_or_else(|| default_output_path(input));
    let existed = output.exists();

    if !quiet {
        eprintln!("📄 Splitting: {}", input.display());
    }

    let result = process_document(input, Some(&output), config, |progress| {
        if !quiet {
            eprint!("\rProcessing... {:>3}%", (progress * 100.0).round() as u32);
            let _ = std::io::stderr().flush();
        }
    });
    if !quiet {
        eprintln!();
    }

    let (path, report) = match result {
        Ok(done) => done,
        Err(e) => {
            if !existed && output.exists() {
                let _ = std::fs::remove_file(&output);
            }
            return Err(e).with_context(|| format!("failed to split {}", input.display()));
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", path.display());
    }

    if !quiet {
        eprintln!(
            "✅ {} page(s) → {} slide page(s)",
            report.input_pages, report.output_pages
        );
        if !report.skipped_pages.is_empty() {
            let pages: Vec<String> = report
                .skipped_pages
                .iter()
                .map(|p| (p + 1).to_string())
                .collect();
            eprintln!("⚠️  Skipped (too few slides found): {}", pages.join(", "));
        }
    }

    Ok(())
}

/// `<dir>/<stem>_slides.pdf` next to the input.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "output".into(), |s| s.to_string_lossy());
    input.with_file_name(format!("{stem}_slides.pdf"))
}
