//! Greedy clustering of sketches by maximum containment.
//!
//! Full pairwise comparison of n sketches is quadratic and does not scale to
//! collections of hundreds of thousands of genomes. This module instead builds
//! clusters greedily around **founders**: an unclustered item is elected as a cluster
//! representative and absorbs every remaining item whose max-containment with it
//! reaches the threshold. Repeat until nothing is left.
//!
//! ## Similarity
//!
//! Membership uses **maximum containment**, `max(C(A, B), C(B, A))`, not Jaccard.
//! Sketch sizes can differ a lot (draft vs. complete genome) and only one direction
//! of containment may be high.
//!
//! ## Pieces
//!
//! - [`discover_founders`]: elect founders inside one batch until it is empty.
//! - [`assign_to_founders`]: map a pool onto a fixed list of founders, first match wins.
//! - [`Uniqify`]: shuffle, optional seed-founder pass, then discover/assign rounds over
//!   fixed-size batches, with a rarefaction record per batch.
//!
//! There are no approximation guarantees: the founder set depends on the shuffle seed
//! and is neither minimal nor deduplicated.
//!
//! ## Usage
//!
//! ```rust
//! use sigclump::cluster::{Item, Uniqify};
//! use sigclump::sketch::MinHashSketch;
//!
//! let max_hash = u64::MAX / 1000;
//! let sketch = |name: &str, hashes: std::ops::Range<u64>| {
//!     Item::new(name, MinHashSketch::from_hashes(name, 31, "DNA", max_hash, hashes))
//! };
//! let items = vec![
//!     sketch("a", 0..100),
//!     sketch("b", 0..90),
//!     sketch("c", 1000..1100),
//! ];
//!
//! let fit = Uniqify::new(0.2).with_seed(42).fit(items).unwrap();
//! assert_eq!(fit.founders.len(), 2);
//! assert_eq!(fit.members.len(), 1);
//! ```

mod assign;
mod discover;
mod traits;
mod uniqify;
mod util;

#[cfg(test)]
pub(crate) mod testing;

pub use assign::{assign_to_founders, Assignment};
pub use discover::{discover_founders, Discovery};
pub use traits::{Item, Sketch};
pub use uniqify::{RarefactionRecord, Uniqify, UniqifyFit};

/// Absorption record: `member` joined the cluster of `founder`.
///
/// Both fields are indices into the item slice the call was given. Links are
/// appended when an item is absorbed and never rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    /// Founder index.
    pub founder: usize,
    /// Member index.
    pub member: usize,
}
