//! PDF Titles CLI tool
//!
//! A command-line tool for reporting PDF metadata and making viewers show
//! the document title.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::debug;

use pdf_titles::batch::{run_patch, run_report, BatchEntry, BatchSummary};
use pdf_titles::manifest::{expand_globs, load_manifest, parse_entry, DEFAULT_MANIFEST};

/// PDF Titles - Report PDF metadata and set display titles
#[derive(Parser)]
#[command(name = "pdf-titles")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Show Title/Author/Subject of every PDF in a directory
    pdf-titles report \"public/pdf/*.pdf\"

    # Set one title and make viewers display it
    pdf-titles patch --set \"public/pdf/education_flyer.pdf=Flyer for educators\"

    # Patch every file listed in a manifest
    pdf-titles patch --manifest pdf-titles.json")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Title, Author and Subject of PDF files
    Report {
        /// PDF files to inspect. Supports glob patterns like "*.pdf"
        inputs: Vec<String>,

        /// JSON manifest listing the files
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Set the title and DisplayDocTitle of PDF files, rewriting them in place
    Patch {
        /// File and title to set, as PATH=TITLE (repeatable)
        #[arg(long = "set", value_name = "PATH=TITLE")]
        entries: Vec<String>,

        /// JSON manifest listing files and titles
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Report { inputs, manifest } => cmd_report(inputs, manifest),
        Commands::Patch { entries, manifest } => cmd_patch(entries, manifest),
    };

    match result {
        Ok(summary) if summary.all_succeeded() => {}
        Ok(_) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Entries from `--manifest`, or from the default manifest when nothing else was given
fn manifest_entries(manifest: Option<PathBuf>, have_args: bool) -> Result<Vec<BatchEntry>> {
    let path = match manifest {
        Some(path) => path,
        None if have_args => return Ok(Vec::new()),
        None => PathBuf::from(DEFAULT_MANIFEST),
    };

    load_manifest(&path).with_context(|| format!("Could not load manifest {}", path.display()))
}

/// Print metadata for each input
fn cmd_report(inputs: Vec<String>, manifest: Option<PathBuf>) -> Result<BatchSummary> {
    let mut entries = manifest_entries(manifest, !inputs.is_empty())?;
    entries.extend(expand_globs(&inputs)?.into_iter().map(BatchEntry::new));

    if entries.is_empty() {
        bail!("No PDF files to report on");
    }
    debug!("reporting on {} files", entries.len());

    let mut stdout = io::stdout().lock();
    let summary = run_report(&entries, &mut stdout)?;
    stdout.flush()?;
    Ok(summary)
}

/// Patch titles for each entry
fn cmd_patch(args: Vec<String>, manifest: Option<PathBuf>) -> Result<BatchSummary> {
    let mut entries = manifest_entries(manifest, !args.is_empty())?;
    for arg in &args {
        entries.push(parse_entry(arg)?);
    }

    if entries.is_empty() {
        bail!("No PDF files to patch");
    }
    debug!("patching {} files", entries.len());

    let mut stdout = io::stdout().lock();
    let summary = run_patch(&entries, &mut stdout)?;
    stdout.flush()?;
    Ok(summary)
}
