//! Loads Rust source files from disk into compilation units.

use super::{ParsedUnit, parse_rust_source};
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, bail};
use std::fs;

const LOG_TARGET: &str = "    source";

/// Collect the `.rs` files under each root, in a deterministic order.
///
/// Roots are visited in the order given. A root may be a single file or a directory;
/// directories are walked in file-name order, skipping `target` and hidden directories.
pub fn find_source_files(roots: &[Utf8PathBuf]) -> Result<Vec<Utf8PathBuf>> {
    let mut files = Vec::new();

    for root in roots {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }

        if !root.is_dir() {
            bail!("source path '{root}' does not exist");
        }

        let walker = walkdir::WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                let name = entry.file_name().to_string_lossy();
                entry.depth() == 0 || !(entry.file_type().is_dir() && (name == "target" || name.starts_with('.')))
            });

        for entry_result in walker {
            let entry = entry_result.into_app_err_with(|| format!("could not walk source directory '{root}'"))?;

            if entry.file_type().is_dir() {
                continue;
            }

            let is_rust = entry.path().extension().and_then(|s| s.to_str()).is_some_and(|ext| ext == "rs");
            if !is_rust {
                continue;
            }

            let path = Utf8PathBuf::try_from(entry.into_path()).into_app_err("invalid UTF-8 in source file path")?;
            files.push(path);
        }
    }

    Ok(files)
}

/// Read and parse every Rust source file under `roots`.
pub fn load_units(roots: &[Utf8PathBuf]) -> Result<Vec<ParsedUnit>> {
    let files = find_source_files(roots)?;
    log::info!(target: LOG_TARGET, "Parsing {} source file(s)", files.len());

    files.iter().map(|path| load_unit(path)).collect()
}

fn load_unit(path: &Utf8Path) -> Result<ParsedUnit> {
    let text = fs::read_to_string(path).into_app_err_with(|| format!("reading source file '{path}'"))?;
    log::debug!(target: LOG_TARGET, "Parsing '{path}'");
    Ok(parse_rust_source(path.as_str(), &text))
}
