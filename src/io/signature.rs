//! Signature JSON files.
//!
//! The layout follows sourmash: a file holds one signature record or an array of
//! them, and each record carries one sketch per (ksize, molecule) combination.
//! Only the fields needed for containment are read; everything else is ignored.
//! Written signatures carry the same fields, so they load back unchanged.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sketch::{MinHashSketch, DEFAULT_SEED};

/// Which sketch to take from a multi-sketch signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// K-mer size.
    pub ksize: u32,
    /// Molecule type, compared case-insensitively.
    pub moltype: String,
}

impl Selector {
    /// Select sketches with this ksize and molecule type.
    pub fn new(ksize: u32, moltype: impl Into<String>) -> Self {
        Self {
            ksize,
            moltype: moltype.into(),
        }
    }

    fn matches(&self, sketch: &SketchRecord) -> bool {
        sketch.ksize == self.ksize && sketch.molecule.eq_ignore_ascii_case(&self.moltype)
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new(31, "DNA")
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignatureFile {
    Many(Vec<SignatureRecord>),
    One(SignatureRecord),
}

#[derive(Debug, Serialize, Deserialize)]
struct SignatureRecord {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filename: Option<String>,
    signatures: Vec<SketchRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SketchRecord {
    ksize: u32,
    #[serde(default = "default_molecule")]
    molecule: String,
    #[serde(default = "default_seed")]
    seed: u64,
    #[serde(default)]
    max_hash: u64,
    mins: Vec<u64>,
}

fn default_molecule() -> String {
    "DNA".to_string()
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

/// Parse signature JSON from `reader`, keeping sketches that match `selector`.
///
/// `path` is used in error messages and as the name of unnamed signatures.
pub fn parse_signatures<R: Read>(
    reader: R,
    path: &str,
    selector: &Selector,
) -> Result<Vec<MinHashSketch>> {
    let file: SignatureFile = serde_json::from_reader(reader).map_err(|source| Error::Json {
        path: path.to_string(),
        source,
    })?;
    let records = match file {
        SignatureFile::Many(records) => records,
        SignatureFile::One(record) => vec![record],
    };

    let mut out = Vec::new();
    for record in records {
        let name = record
            .name
            .filter(|n| !n.is_empty())
            .or(record.filename)
            .unwrap_or_else(|| path.to_string());
        for sketch in record.signatures.into_iter().filter(|s| selector.matches(s)) {
            out.push(
                MinHashSketch::from_hashes(
                    name.clone(),
                    sketch.ksize,
                    sketch.molecule,
                    sketch.max_hash,
                    sketch.mins,
                )
                .with_seed(sketch.seed),
            );
        }
    }
    Ok(out)
}

impl From<&MinHashSketch> for SignatureRecord {
    fn from(sketch: &MinHashSketch) -> Self {
        Self {
            name: Some(sketch.name().to_string()),
            filename: None,
            signatures: vec![SketchRecord {
                ksize: sketch.ksize(),
                molecule: sketch.moltype().to_string(),
                seed: sketch.seed(),
                max_hash: sketch.max_hash(),
                mins: sketch.hashes().to_vec(),
            }],
        }
    }
}

/// Write `sketches` to `out` as a JSON array of signature records.
pub fn write_signatures<'a, W, I>(mut out: W, path: &str, sketches: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a MinHashSketch>,
{
    let records: Vec<SignatureRecord> = sketches.into_iter().map(SignatureRecord::from).collect();
    serde_json::to_writer(&mut out, &records).map_err(|source| Error::Json {
        path: path.to_string(),
        source,
    })?;
    out.flush().map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value, selector: &Selector) -> Result<Vec<MinHashSketch>> {
        parse_signatures(value.to_string().as_bytes(), "test.sig", selector)
    }

    #[test]
    fn single_record_selects_by_ksize_and_molecule() {
        let value = json!({
            "name": "GCA_000001",
            "filename": "GCA_000001.fna.gz",
            "signatures": [
                {"ksize": 21, "molecule": "DNA", "seed": 42, "max_hash": 18446744073709551u64, "mins": [1, 2]},
                {"ksize": 31, "molecule": "DNA", "seed": 42, "max_hash": 18446744073709551u64, "mins": [3, 1, 2]},
                {"ksize": 31, "molecule": "protein", "seed": 42, "max_hash": 18446744073709551u64, "mins": [9]}
            ]
        });
        let sketches = parse(value, &Selector::default()).unwrap();

        assert_eq!(sketches.len(), 1);
        assert_eq!(sketches[0].name(), "GCA_000001");
        assert_eq!(sketches[0].ksize(), 31);
        assert_eq!(sketches[0].hashes(), &[1, 2, 3]);
        assert_eq!(sketches[0].scaled(), 1000);
    }

    #[test]
    fn array_of_records_and_name_fallbacks() {
        let value = json!([
            {"name": "", "filename": "from_filename.fa", "signatures": [
                {"ksize": 31, "max_hash": 1000, "mins": [1]}
            ]},
            {"signatures": [
                {"ksize": 31, "max_hash": 1000, "mins": [2]}
            ]}
        ]);
        let sketches = parse(value, &Selector::new(31, "dna")).unwrap();

        assert_eq!(sketches.len(), 2);
        assert_eq!(sketches[0].name(), "from_filename.fa");
        assert_eq!(sketches[1].name(), "test.sig");
        assert_eq!(sketches[1].seed(), DEFAULT_SEED);
    }

    #[test]
    fn malformed_json_names_the_file() {
        let err = parse_signatures(&b"{not json"[..], "broken.sig", &Selector::default())
            .unwrap_err();
        assert!(err.to_string().starts_with("broken.sig"));
    }

    #[test]
    fn written_signatures_load_back() {
        let a = MinHashSketch::from_hashes("a", 31, "DNA", 1000, [5, 3, 9]).with_seed(7);
        let b = MinHashSketch::from_hashes("b", 31, "DNA", 1000, [1]);
        let mut buf = Vec::new();
        write_signatures(&mut buf, "out.sig", [&a, &b]).unwrap();

        let loaded = parse_signatures(&buf[..], "out.sig", &Selector::default()).unwrap();
        assert_eq!(loaded, [a, b]);
    }
}
