//! Loading signatures and writing clustering results.
//!
//! Nothing in here is needed by the clustering core; [`crate::cluster`] works on any
//! [`crate::cluster::Sketch`] held in memory.

mod loader;
mod signature;
mod writer;

pub use loader::{
    load_signature_list, load_signatures, load_sources, read_seed_founders,
    read_signature_list, resolve_seeds, SeedResolution,
};
pub use signature::{parse_signatures, write_signatures, Selector};
pub use writer::{
    write_cluster_signatures, write_cluster_table, write_identifiers, write_origins,
    write_outputs, write_rarefaction, write_summary,
};
