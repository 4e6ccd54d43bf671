//! Batched greedy clustering.
//!
//! # The Algorithm
//!
//! 1. Shuffle the input with a seeded RNG. The shuffle is the only source of
//!    randomness; everything after it is a pure function of the shuffled order.
//! 2. If seed founders are supplied (e.g. from a previous run), assign the whole
//!    pool to them once.
//! 3. Until the pool is empty:
//!    - take the first `batch_size` items of the pool;
//!    - elect founders inside that batch ([`discover_founders`]);
//!    - assign the rest of the global pool to the *new* founders only
//!      ([`assign_to_founders`]);
//!    - record cumulative founder and member counts (rarefaction).
//!
//! New items are never re-tested against founders from earlier batches, so an item
//! joins the first founder batch it matches rather than its globally best founder.
//! Re-mapping members to their best founder is left to downstream tools.
//!
//! ## Complexity
//!
//! - **Time**: O(n · f) containment calls, where f is the number of founders.
//! - **Space**: O(n) indices on top of the sketches themselves.
//!
//! ## Why batches
//!
//! Discovery inside a batch is quadratic in the batch size in the worst case (all
//! singletons). Bounding the batch keeps each round tractable on collections of
//! hundreds of thousands of sketches, at the cost of cluster optimality.

use rand::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::assign::assign_to_founders;
use super::discover::discover_founders;
use super::traits::{Item, Sketch};
use super::Link;
use crate::error::{Error, Result};

/// Batched greedy clustering by maximum containment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Uniqify {
    /// Minimum max-containment for an item to join a founder's cluster.
    threshold: f64,
    /// Number of pool items considered per discovery round.
    batch_size: usize,
    /// Shuffle seed.
    seed: u64,
}

/// Cumulative counts after one processed batch.
///
/// Batch 0 is the seed-founder pass (or the single record of an empty run).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarefactionRecord {
    /// Batch index.
    pub batch: usize,
    /// Founders so far.
    pub founders: usize,
    /// Members so far.
    pub members: usize,
}

/// Output of [`Uniqify::fit`].
#[derive(Debug, Clone)]
pub struct UniqifyFit<S> {
    /// Founders in election order (seed founders first).
    pub founders: Vec<Item<S>>,
    /// Members in absorption order.
    pub members: Vec<Item<S>>,
    /// For each member, the index of its founder in `founders`.
    pub assignments: Vec<usize>,
    /// One record per processed batch.
    pub rarefaction: Vec<RarefactionRecord>,
}

impl<S> UniqifyFit<S> {
    /// Number of clusters (one per founder, singletons included).
    pub fn n_clusters(&self) -> usize {
        self.founders.len()
    }

    /// Member indices of each founder's cluster, in member order.
    pub fn cluster_members(&self) -> Vec<Vec<usize>> {
        let mut clusters = vec![Vec::new(); self.founders.len()];
        for (member, &founder) in self.assignments.iter().enumerate() {
            clusters[founder].push(member);
        }
        clusters
    }
}

impl Uniqify {
    /// Create a clusterer with the given containment threshold.
    ///
    /// # Typical Values
    ///
    /// - `threshold`: 0.1-0.2 groups genomes of roughly the same species for
    ///   k=31 DNA sketches.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Set the containment threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the discovery batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the shuffle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Containment threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Discovery batch size.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Shuffle seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidParameter {
                name: "threshold",
                message: "must be within [0, 1]",
            });
        }
        if self.batch_size == 0 {
            return Err(Error::InvalidParameter {
                name: "batch_size",
                message: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Cluster `items` from scratch.
    pub fn fit<S: Sketch>(&self, items: Vec<Item<S>>) -> Result<UniqifyFit<S>> {
        self.fit_with_seeds(items, Vec::new())
    }

    /// Cluster `items`, first mapping them onto previously discovered founders.
    ///
    /// Seed founders are reported as founders whether or not they absorb anything.
    pub fn fit_with_seeds<S: Sketch>(
        &self,
        mut items: Vec<Item<S>>,
        seeds: Vec<Item<S>>,
    ) -> Result<UniqifyFit<S>> {
        self.validate()?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        items.shuffle(&mut rng);

        // Arena: seeds first, then the shuffled items. Pools are index lists into it.
        let n_seeds = seeds.len();
        let mut store = seeds;
        store.extend(items);

        let mut founders: Vec<usize> = (0..n_seeds).collect();
        let mut links: Vec<Link> = Vec::new();
        let mut rarefaction = Vec::new();
        let mut pool: Vec<usize> = (n_seeds..store.len()).collect();

        if pool.is_empty() {
            warn!("no items to cluster");
            rarefaction.push(RarefactionRecord {
                batch: 0,
                founders: founders.len(),
                members: 0,
            });
            return Ok(collect_fit(store, &founders, &links, rarefaction));
        }

        info!(
            items = pool.len(),
            threshold = self.threshold,
            batch_size = self.batch_size,
            seed = self.seed,
            "clustering"
        );

        if n_seeds > 0 {
            let assigned = assign_to_founders(&store, &founders, pool, self.threshold)?;
            links.extend(assigned.links);
            pool = assigned.leftover;
            rarefaction.push(RarefactionRecord {
                batch: 0,
                founders: founders.len(),
                members: links.len(),
            });
            info!(
                seeds = n_seeds,
                members = links.len(),
                unassigned = pool.len(),
                "assigned to seed founders"
            );
        }

        let mut batch = 0;
        while !pool.is_empty() {
            batch += 1;
            let rest = pool.split_off(self.batch_size.min(pool.len()));
            let current = std::mem::replace(&mut pool, rest);
            let batch_len = current.len();

            let discovered = discover_founders(&store, current, self.threshold)?;
            let assigned = assign_to_founders(&store, &discovered.founders, pool, self.threshold)?;
            pool = assigned.leftover;

            let new_founders = discovered.founders.len();
            founders.extend(discovered.founders);
            links.extend(discovered.links);
            links.extend(assigned.links);

            rarefaction.push(RarefactionRecord {
                batch,
                founders: founders.len(),
                members: links.len(),
            });
            info!(
                batch,
                batch_len,
                new_founders,
                founders = founders.len(),
                members = links.len(),
                remaining = pool.len(),
                "batch done"
            );
        }

        Ok(collect_fit(store, &founders, &links, rarefaction))
    }
}

impl Default for Uniqify {
    fn default() -> Self {
        Self {
            threshold: 0.2,
            batch_size: 5000,
            seed: 1,
        }
    }
}

/// Move items out of the arena into founder and member lists.
fn collect_fit<S>(
    store: Vec<Item<S>>,
    founders: &[usize],
    links: &[Link],
    rarefaction: Vec<RarefactionRecord>,
) -> UniqifyFit<S> {
    let mut slots: Vec<Option<Item<S>>> = store.into_iter().map(Some).collect();
    let mut founder_pos = vec![usize::MAX; slots.len()];

    let mut fit = UniqifyFit {
        founders: Vec::with_capacity(founders.len()),
        members: Vec::with_capacity(links.len()),
        assignments: Vec::with_capacity(links.len()),
        rarefaction,
    };
    for &idx in founders {
        if let Some(item) = slots[idx].take() {
            founder_pos[idx] = fit.founders.len();
            fit.founders.push(item);
        }
    }
    for link in links {
        if let Some(item) = slots[link.member].take() {
            fit.members.push(item);
            fit.assignments.push(founder_pos[link.founder]);
        }
    }
    debug_assert!(slots.iter().all(Option::is_none), "every item is classified");
    fit
}
