use rayon::prelude::*;

use super::traits::{Item, Sketch};
use crate::error::{Error, Result};

/// Outcome of scanning a pool against one founder.
#[derive(Clone, Debug, Default)]
pub(crate) struct Split {
    pub(crate) absorbed: Vec<usize>,
    pub(crate) leftover: Vec<usize>,
}

/// Membership test shared by discovery and assignment.
///
/// Returns `Ok(false)` for the founder itself (same origin and equal sketch).
#[inline]
pub(crate) fn belongs_to<S: Sketch>(
    candidate: &Item<S>,
    founder: &Item<S>,
    threshold: f64,
) -> Result<bool> {
    if candidate.is_same(founder) {
        return Ok(false);
    }
    let containment = candidate
        .sketch
        .max_containment(&founder.sketch)
        .map_err(|e| Error::Containment {
            founder: founder.origin.clone(),
            candidate: candidate.origin.clone(),
            source: Box::new(e),
        })?;
    Ok(containment >= threshold)
}

/// Partition `pool` (indices into `store`) by membership in `founder`'s cluster.
///
/// The scan runs on the rayon pool; verdicts are collected in pool order, so both
/// halves keep the relative order of `pool`.
pub(crate) fn split_by_founder<S: Sketch>(
    store: &[Item<S>],
    founder: usize,
    pool: Vec<usize>,
    threshold: f64,
) -> Result<Split> {
    let founder = &store[founder];
    let verdicts: Vec<bool> = pool
        .par_iter()
        .map(|&idx| belongs_to(&store[idx], founder, threshold))
        .collect::<Result<Vec<bool>>>()?;

    let mut split = Split {
        absorbed: Vec::new(),
        leftover: Vec::with_capacity(pool.len()),
    };
    for (idx, hit) in pool.into_iter().zip(verdicts) {
        if hit {
            split.absorbed.push(idx);
        } else {
            split.leftover.push(idx);
        }
    }
    Ok(split)
}
