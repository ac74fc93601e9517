mod audit;
mod dates;
mod document;
mod error;
mod extract;
mod flatten;
mod lexicon;
mod scanner;
mod segment;
mod snippet;
mod tokenize;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dates::DateFixes;
use error::Error;
use lexicon::Lexicon;

const DEFAULT_LEXICON: &str = "output/lexicon.json";

#[derive(Parser)]
#[command(
    name = "hansard_lexicon",
    about = "Earliest recorded use of every word in the parliamentary debates"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the earliest-use lexicon from transcripts
    Extract {
        /// Transcript files, or directories to search for *.xml
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Lexicon snapshot location
        #[arg(long, env = "LEXICON_PATH", default_value = DEFAULT_LEXICON)]
        lexicon: PathBuf,
        /// Seed the run from the existing snapshot
        #[arg(long)]
        load: bool,
        /// Write the snapshot when the run finishes
        #[arg(long)]
        save: bool,
    },
    /// Report implausible jumps between consecutive sitting dates
    Audit {
        /// Transcript files, or directories to search for *.xml
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Largest gap in days between consecutive dates that is not flagged
        #[arg(
            long,
            env = "LEXICON_AUDIT_GAP_DAYS",
            default_value_t = audit::DEFAULT_GAP_DAYS,
            value_parser = clap::value_parser!(i64).range(0..)
        )]
        gap: i64,
    },
    /// Print saved entries for words or phrases
    Lookup {
        /// Words or phrases, e.g. "woolsack", "prime minister"
        #[arg(required = true)]
        keys: Vec<String>,
        /// Lexicon snapshot location
        #[arg(long, env = "LEXICON_PATH", default_value = DEFAULT_LEXICON)]
        lexicon: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hansard_lexicon=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Extract {
            inputs,
            lexicon,
            load,
            save,
        } => run_extract(&inputs, &lexicon, load, save),
        Command::Audit { inputs, gap } => run_audit(&inputs, gap),
        Command::Lookup { keys, lexicon } => run_lookup(&keys, &lexicon),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  EXTRACT MODE: transcripts → earliest-use lexicon
// ═══════════════════════════════════════════════════════════════════════

fn run_extract(inputs: &[PathBuf], lexicon_path: &Path, load: bool, save: bool) -> Result<(), Error> {
    let mut lexicon = if load {
        let lexicon = Lexicon::load(lexicon_path)?;
        if lexicon.is_empty() {
            tracing::warn!("snapshot {} holds no entries", lexicon_path.display());
        } else {
            tracing::info!(
                "seeded {} entries from {}",
                lexicon.len(),
                lexicon_path.display()
            );
        }
        lexicon
    } else {
        Lexicon::new()
    };

    let fixes = DateFixes::builtin();
    tracing::debug!("{} date overrides loaded", fixes.len());

    let files = scanner::collect_inputs(inputs);
    tracing::info!("processing {} transcripts", files.len());

    let mut skipped = Vec::new();
    let mut total = extract::FileStats::default();

    for path in &files {
        eprintln!("{}", path.display());
        match extract::process_file(path, &mut lexicon, fixes) {
            Ok(stats) => {
                total.units += stats.units;
                total.candidates += stats.candidates;
                total.updated += stats.updated;
            }
            Err(e) if e.is_document_local() => {
                tracing::warn!("skipping {}: {e}", path.display());
                skipped.push(path.display().to_string());
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        "{} units, {} candidates, {} lexicon updates",
        total.units,
        total.candidates,
        total.updated
    );

    if !skipped.is_empty() {
        eprintln!("\nSkipped {} malformed transcripts:", skipped.len());
        for f in skipped.iter().take(30) {
            eprintln!("  {f}");
        }
        if skipped.len() > 30 {
            eprintln!("  ... and {} more", skipped.len() - 30);
        }
    }

    if save {
        lexicon.save(lexicon_path)?;
        tracing::info!("wrote {}", lexicon_path.display());
    }

    println!("{}", lexicon.len());
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
//  AUDIT MODE: suspicious date jumps → override-table rows
// ═══════════════════════════════════════════════════════════════════════

fn run_audit(inputs: &[PathBuf], gap_days: i64) -> Result<(), Error> {
    let fixes = DateFixes::builtin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut flagged = 0usize;

    for path in scanner::collect_inputs(inputs) {
        eprintln!("{}", path.display());
        let records = document::read_transcript(&path).and_then(|xml| {
            let doc = document::parse_transcript(&path, &xml)?;
            segment::date_records(&doc, &document::source_id(&path), fixes)
        });
        let records = match records {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("skipping {}: {e}", path.display());
                continue;
            }
        };

        let anomalies = audit::audit(&records, gap_days);
        flagged += anomalies.len();
        audit::write_report(&mut out, &document::source_id(&path), &anomalies)
            .and_then(|()| out.flush())
            .map_err(|source| Error::Io {
                path: PathBuf::from("<stdout>"),
                source,
            })?;
    }

    tracing::info!("{flagged} date anomalies (allowable gap {gap_days} days)");
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
//  LOOKUP MODE: read the saved snapshot, print matching entries
// ═══════════════════════════════════════════════════════════════════════

fn run_lookup(keys: &[String], lexicon_path: &Path) -> Result<(), Error> {
    let lexicon = Lexicon::load(lexicon_path)?;

    let mut found = serde_json::Map::new();
    for raw in keys {
        let key = tokenize::fold(raw.trim().chars());
        match lexicon.get(&key) {
            Some(entry) => {
                let value = serde_json::to_value(entry).map_err(|source| Error::Snapshot {
                    path: lexicon_path.to_path_buf(),
                    source,
                })?;
                found.insert(key, value);
            }
            None => eprintln!("not in lexicon: {key}"),
        }
    }

    let json = serde_json::to_string_pretty(&found).map_err(|source| Error::Snapshot {
        path: lexicon_path.to_path_buf(),
        source,
    })?;
    println!("{json}");
    Ok(())
}
