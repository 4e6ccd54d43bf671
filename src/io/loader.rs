//! Loading items from signature files, directories and sig-lists.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::signature::{parse_signatures, Selector};
use crate::cluster::Item;
use crate::error::{Error, Result};
use crate::sketch::MinHashSketch;

/// Extensions picked up when a source is a directory.
const SIGNATURE_EXTENSIONS: [&str; 2] = ["sig", "json"];

/// Load every matching sketch from a signature file, or from each signature file
/// directly inside a directory (sorted by path).
///
/// Each sketch becomes one item whose origin is the file it came from. A source
/// with no matching sketch yields an empty list, not an error.
pub fn load_signatures(path: &Path, selector: &Selector) -> Result<Vec<Item<MinHashSketch>>> {
    if path.is_dir() {
        let mut files = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| Error::io(path, e))? {
            let file = entry.map_err(|e| Error::io(path, e))?.path();
            let is_sig = file
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| SIGNATURE_EXTENSIONS.contains(&ext));
            if file.is_file() && is_sig {
                files.push(file);
            }
        }
        files.sort();

        let mut items = Vec::new();
        for file in &files {
            items.extend(load_file(file, selector)?);
        }
        info!(path = %path.display(), files = files.len(), sketches = items.len(), "loaded directory");
        return Ok(items);
    }

    let items = load_file(path, selector)?;
    info!(path = %path.display(), sketches = items.len(), "loaded signatures");
    Ok(items)
}

fn load_file(path: &Path, selector: &Selector) -> Result<Vec<Item<MinHashSketch>>> {
    let origin = path.display().to_string();
    let reader = BufReader::new(File::open(path).map_err(|e| Error::io(path, e))?);
    let sketches = parse_signatures(reader, &origin, selector)?;
    Ok(sketches
        .into_iter()
        .map(|sketch| Item::new(origin.clone(), sketch))
        .collect())
}

/// Read a sig-list: one signature path per line, blank lines ignored.
pub fn read_signature_list(path: &Path) -> Result<Vec<PathBuf>> {
    let reader = BufReader::new(File::open(path).map_err(|e| Error::io(path, e))?);
    let mut paths = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| Error::io(path, e))?;
        let line = line.trim();
        if !line.is_empty() {
            paths.push(PathBuf::from(line));
        }
    }
    Ok(paths)
}

/// Load all signatures named in a sig-list.
pub fn load_signature_list(path: &Path, selector: &Selector) -> Result<Vec<Item<MinHashSketch>>> {
    let mut items = Vec::new();
    for sig in read_signature_list(path)? {
        items.extend(load_file(&sig, selector)?);
    }
    info!(path = %path.display(), sketches = items.len(), "loaded sig-list");
    Ok(items)
}

/// Load sources, then sig-lists, concatenated in argument order.
///
/// Fails with [`Error::EmptyInput`] if neither sources nor lists are given. Loading
/// zero sketches from the given inputs is not an error.
pub fn load_sources(
    sources: &[PathBuf],
    lists: &[PathBuf],
    selector: &Selector,
) -> Result<Vec<Item<MinHashSketch>>> {
    if sources.is_empty() && lists.is_empty() {
        return Err(Error::EmptyInput);
    }
    let mut items = Vec::new();
    for source in sources {
        items.extend(load_signatures(source, selector)?);
    }
    for list in lists {
        items.extend(load_signature_list(list, selector)?);
    }
    info!(sketches = items.len(), "loaded signatures total");
    Ok(items)
}

/// Paths of the founders recorded in a previous run's summary CSV.
///
/// Rows whose `member_type` is `founder` contribute their `filename` column.
pub fn read_seed_founders(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));
    let headers = reader.headers()?.clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::MissingColumn {
                column: name,
                path: path.display().to_string(),
            })
    };
    let member_type = column("member_type")?;
    let filename = column("filename")?;

    let mut founders = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.get(member_type) == Some("founder") {
            if let Some(f) = record.get(filename) {
                founders.push(f.to_string());
            }
        }
    }
    Ok(founders)
}

/// Seed founders that could be loaded, and the ones that could not.
#[derive(Debug, Default)]
pub struct SeedResolution {
    /// Loaded founder items.
    pub founders: Vec<Item<MinHashSketch>>,
    /// Origins that failed to load, with the reason.
    pub unresolved: Vec<(String, Error)>,
}

/// Load each seed founder independently; a bad seed is reported, not fatal.
pub fn resolve_seeds(origins: &[String], selector: &Selector) -> SeedResolution {
    let mut out = SeedResolution::default();
    for origin in origins {
        match load_file(Path::new(origin), selector) {
            Ok(items) if items.is_empty() => {
                let err = Error::NoMatchingSketch {
                    origin: origin.clone(),
                    ksize: selector.ksize,
                    moltype: selector.moltype.clone(),
                };
                warn!(origin = %origin, error = %err, "skipping seed founder");
                out.unresolved.push((origin.clone(), err));
            }
            Ok(items) => out.founders.extend(items),
            Err(err) => {
                warn!(origin = %origin, error = %err, "skipping seed founder");
                out.unresolved.push((origin.clone(), err));
            }
        }
    }
    info!(
        resolved = out.founders.len(),
        unresolved = out.unresolved.len(),
        "loaded seed founders"
    );
    out
}
