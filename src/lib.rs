//! Greedy clustering of genome sketches.
//!
//! `sigclump` groups a large pile of containment sketches into clusters of
//! near-duplicates without computing all pairwise distances.
//!
//! - [`cluster`]: founder discovery, membership assignment and the batched
//!   [`Uniqify`] driver
//! - [`sketch`]: scaled MinHash sketches with containment and Jaccard
//! - [`io`]: signature loading and result tables

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod io;
pub mod sketch;

pub use cluster::{
    assign_to_founders, discover_founders, Item, RarefactionRecord, Sketch, Uniqify, UniqifyFit,
};
pub use error::{Error, Result};
pub use sketch::MinHashSketch;
