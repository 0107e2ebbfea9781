//! gdpck CLI - Command-line tool for PCK resource archive extraction.
//!
//! Unpacks every entry of an archive under `export/` and splits compiled
//! textures into per-mipmap files.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use gdpck::prelude::*;

/// gdpck - PCK resource archive extractor
#[derive(Parser)]
#[command(name = "gdpck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the PCK file
    pck: PathBuf,
}

/// Log sink that clears the progress bar while a record is written.
struct SuspendingStderr(ProgressBar);

impl Write for SuspendingStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.suspend(|| io::stderr().write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Hidden until the archive is open; log lines pass straight through.
    let pb = ProgressBar::hidden();

    let mut builder = if std::env::var("RUST_LOG").is_ok() {
        env_logger::Builder::from_default_env()
    } else {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(log::LevelFilter::Info);
        builder
    };
    builder
        .target(env_logger::Target::Pipe(Box::new(SuspendingStderr(pb.clone()))))
        .init();

    cmd_unpack(&cli.pck, Path::new(OUTPUT_ROOT), &pb)
}

fn cmd_unpack(pck_path: &Path, output: &Path, pb: &ProgressBar) -> Result<()> {
    println!("Opening PCK archive: {}", pck_path.display());

    let start = Instant::now();
    let archive = PckArchive::open(pck_path)
        .with_context(|| format!("Failed to open PCK archive {}", pck_path.display()))?;

    println!(
        "Loaded {} entries in {:?} (engine {})",
        archive.entry_count(),
        start.elapsed(),
        archive.header().engine_version
    );

    pb.set_length(archive.entry_count() as u64);
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let summary = unpack_archive(&archive, output, |progress| {
        pb.set_message(progress.entry.relative_path().to_string());
        pb.inc(1);
    })
    .with_context(|| format!("Failed to unpack {}", pck_path.display()))?;

    pb.finish_with_message("Done");
    println!(
        "Extracted {} entries ({} bytes) to {} in {:?}",
        summary.entries,
        summary.bytes_written,
        output.display(),
        start.elapsed()
    );
    if summary.textures > 0 {
        println!(
            "Split {} textures into {} mipmap files",
            summary.textures, summary.mipmaps
        );
    }
    if !summary.integrity_warnings.is_empty() {
        println!(
            "{} entries failed the MD5 check",
            summary.integrity_warnings.len()
        );
    }

    Ok(())
}
