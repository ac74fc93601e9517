use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Expand command-line inputs into the list of transcripts to process.
///
/// Files are taken as given, in the order given. Directories are walked
/// recursively and contribute their `.xml` files sorted by name, so a run
/// over a directory is reproducible (earliest-date ties go to whichever
/// file is processed first).
pub fn collect_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut results = Vec::new();

    for input in inputs {
        if !input.is_dir() {
            results.push(input.clone());
            continue;
        }

        for entry in WalkDir::new(input)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| match e {
                Ok(e) => Some(e),
                Err(err) => {
                    tracing::warn!("skipping unreadable entry under {}: {err}", input.display());
                    None
                }
            })
        {
            if entry.file_type().is_file() && is_transcript(entry.path()) {
                results.push(entry.into_path());
            }
        }
    }

    results
}

fn is_transcript(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xml"))
}
