//! Scaled MinHash sketches.
//!
//! A scaled ("FracMinHash") sketch keeps every hash of a k-mer set that falls below
//! `max_hash = u64::MAX / scaled`. Two such sketches can be compared directly once
//! both are cut down to the smaller `max_hash`, which makes containment estimates
//! meaningful even when the underlying sets differ a lot in size (a draft assembly
//! against a complete genome, say).
//!
//! Building sketches from sequence data is not part of this crate; sketches arrive
//! from signature files (see [`crate::io`]) or from [`MinHashSketch::from_hashes`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cluster::Sketch;
use crate::error::{Error, Result};

/// Hash seed used by default when sketching.
pub const DEFAULT_SEED: u64 = 42;

/// A scaled MinHash sketch: a sorted, deduplicated set of 64-bit hashes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinHashSketch {
    name: String,
    ksize: u32,
    moltype: String,
    seed: u64,
    max_hash: u64,
    hashes: Vec<u64>,
}

impl MinHashSketch {
    /// Build a sketch from raw hashes. Hashes above `max_hash` are dropped.
    pub fn from_hashes(
        name: impl Into<String>,
        ksize: u32,
        moltype: impl Into<String>,
        max_hash: u64,
        hashes: impl IntoIterator<Item = u64>,
    ) -> Self {
        let mut hashes: Vec<u64> = hashes
            .into_iter()
            .filter(|&h| max_hash == 0 || h <= max_hash)
            .collect();
        hashes.sort_unstable();
        hashes.dedup();
        Self {
            name: name.into(),
            ksize,
            moltype: moltype.into(),
            seed: DEFAULT_SEED,
            max_hash,
            hashes,
        }
    }

    /// Set the hash seed the sketch was built with.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sketch name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// K-mer size.
    pub fn ksize(&self) -> u32 {
        self.ksize
    }

    /// Molecule type (`DNA`, `protein`, ...).
    pub fn moltype(&self) -> &str {
        &self.moltype
    }

    /// Hash seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Largest hash retained; 0 for non-scaled sketches.
    pub fn max_hash(&self) -> u64 {
        self.max_hash
    }

    /// Scale factor implied by `max_hash` (0 for non-scaled sketches).
    pub fn scaled(&self) -> u64 {
        if self.max_hash == 0 {
            0
        } else {
            u64::MAX / self.max_hash
        }
    }

    /// Sorted hashes.
    pub fn hashes(&self) -> &[u64] {
        &self.hashes
    }

    /// Number of hashes.
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// True if the sketch holds no hashes.
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    fn check_compatible(&self, other: &Self) -> Result<()> {
        let reason = if self.ksize != other.ksize {
            Some(format!("ksize {} != {}", self.ksize, other.ksize))
        } else if !self.moltype.eq_ignore_ascii_case(&other.moltype) {
            Some(format!("moltype {} != {}", self.moltype, other.moltype))
        } else if self.seed != other.seed {
            Some(format!("seed {} != {}", self.seed, other.seed))
        } else if self.max_hash == 0 || other.max_hash == 0 {
            Some("containment requires scaled sketches".to_string())
        } else {
            None
        };
        match reason {
            Some(reason) => Err(Error::IncompatibleSketches {
                left: self.name.clone(),
                right: other.name.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Hashes at or below `cutoff`.
    #[inline]
    fn below(&self, cutoff: u64) -> &[u64] {
        let end = self.hashes.partition_point(|&h| h <= cutoff);
        &self.hashes[..end]
    }

    /// `(|self|, |other|, |self ∩ other|)` after downsampling to the coarser sketch.
    fn overlap(&self, other: &Self) -> Result<(usize, usize, usize)> {
        self.check_compatible(other)?;
        let cutoff = self.max_hash.min(other.max_hash);
        let a = self.below(cutoff);
        let b = other.below(cutoff);
        Ok((a.len(), b.len(), count_common(a, b)))
    }

    /// Fraction of this sketch's hashes also present in `other`.
    pub fn contained_by(&self, other: &Self) -> Result<f64> {
        let (n_self, _, common) = self.overlap(other)?;
        if n_self == 0 {
            return Ok(0.0);
        }
        Ok(common as f64 / n_self as f64)
    }

    /// Jaccard similarity `|A ∩ B| / |A ∪ B|`.
    pub fn jaccard(&self, other: &Self) -> Result<f64> {
        let (na, nb, common) = self.overlap(other)?;
        let union = na + nb - common;
        if union == 0 {
            return Ok(0.0);
        }
        Ok(common as f64 / union as f64)
    }
}

/// Size of the intersection of two sorted, deduplicated slices.
fn count_common(a: &[u64], b: &[u64]) -> usize {
    let (mut i, mut j, mut n) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                n += 1;
                i += 1;
                j += 1;
            }
        }
    }
    n
}

impl Sketch for MinHashSketch {
    fn max_containment(&self, other: &Self) -> Result<f64> {
        let (na, nb, common) = self.overlap(other)?;
        let smaller = na.min(nb);
        if smaller == 0 {
            return Ok(0.0);
        }
        Ok(common as f64 / smaller as f64)
    }

    fn identifier(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.ksize.to_le_bytes());
        hasher.update(self.moltype.to_ascii_lowercase().as_bytes());
        hasher.update(&self.seed.to_le_bytes());
        for h in &self.hashes {
            hasher.update(&h.to_le_bytes());
        }
        hasher.finalize().to_hex().as_str()[..32].to_string()
    }
}

impl fmt::Display for MinHashSketch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
