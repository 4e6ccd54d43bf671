//! Greedy founder discovery ("uniqify").
//!
//! Within one batch: pop an item, make it a founder, sweep away everything within
//! the containment threshold of it, repeat on whatever is left. Each pass consumes
//! at least the founder, so a batch of `n` items takes at most `n` passes.
//!
//! The founder of each pass is the **last** item of the current pool order. With a
//! seeded shuffle upstream, this makes the founder sequence reproducible.

use tracing::debug;

use super::traits::{Item, Sketch};
use super::util::split_by_founder;
use super::Link;
use crate::error::Result;

/// Founders and members found in one batch.
#[derive(Clone, Debug, Default)]
pub struct Discovery {
    /// Founder indices, in election order.
    pub founders: Vec<usize>,
    /// Member indices, grouped by founder in election order.
    pub members: Vec<usize>,
    /// One link per member, in the same order as `members`.
    pub links: Vec<Link>,
}

/// Elect founders from `pool` (indices into `store`) until the pool is empty.
///
/// Every index of `pool` ends up in exactly one of `founders` or `members`.
/// Items identical to a founder are never absorbed by it; they stay in the pool and
/// are elected later.
pub fn discover_founders<S: Sketch>(
    store: &[Item<S>],
    mut pool: Vec<usize>,
    threshold: f64,
) -> Result<Discovery> {
    let mut out = Discovery::default();

    while let Some(founder) = pool.pop() {
        out.founders.push(founder);

        let split = split_by_founder(store, founder, pool, threshold)?;
        if split.absorbed.is_empty() {
            debug!(founder = %store[founder].origin, "singleton founder");
        } else {
            debug!(
                founder = %store[founder].origin,
                absorbed = split.absorbed.len(),
                remaining = split.leftover.len(),
                "founder elected"
            );
        }

        for member in split.absorbed {
            out.links.push(Link { founder, member });
            out.members.push(member);
        }
        pool = split.leftover;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::testing::{items, origins};

    #[test]
    fn empty_pool() {
        let store = items(&[("a", 0..10)]);
        let out = discover_founders(&store, vec![], 0.2).unwrap();
        assert!(out.founders.is_empty());
        assert!(out.members.is_empty());
    }

    #[test]
    fn pops_from_the_end() {
        // E, D, C, B, A in pool order; A is popped first.
        let store = items(&[
            ("A", 0..20),
            ("B", 0..18),
            ("C", 100..120),
            ("D", 200..220),
            ("E", 300..320),
        ]);
        let out = discover_founders(&store, vec![4, 3, 2, 1, 0], 0.2).unwrap();

        assert_eq!(origins(&store, &out.founders), ["A", "C", "D", "E"]);
        assert_eq!(origins(&store, &out.members), ["B"]);
        assert_eq!(out.links, vec![Link { founder: 0, member: 1 }]);
    }

    #[test]
    fn scenario_a_b_cluster_a_c_do_not() {
        // max_containment(A, B) = 0.9, (A, C) = 0.05, everything else 0.
        let mut b: Vec<u64> = (0..18).collect();
        b.extend([1000, 1001]);
        let mut c: Vec<u64> = vec![19];
        c.extend(2000..2019);
        let store = items(&[
            ("A", (0..20).collect::<Vec<_>>()),
            ("B", b),
            ("C", c),
            ("D", (3000..3020).collect()),
            ("E", (4000..4020).collect()),
        ]);

        // Pool order [E, D, C, B, A] popped from the end: A first.
        let out = discover_founders(&store, vec![4, 3, 2, 1, 0], 0.2).unwrap();
        assert_eq!(origins(&store, &out.founders), ["A", "C", "D", "E"]);
        assert_eq!(out.links, vec![Link { founder: 0, member: 1 }]);

        // Reverse order: B is elected and absorbs A; C stays apart.
        let out = discover_founders(&store, vec![0, 2, 3, 4, 1], 0.2).unwrap();
        assert_eq!(origins(&store, &out.founders), ["B", "E", "D", "C"]);
        assert_eq!(out.links, vec![Link { founder: 1, member: 0 }]);
    }

    #[test]
    fn all_singletons() {
        let store = items(&[("a", 0..10), ("b", 10..20), ("c", 20..30)]);
        let out = discover_founders(&store, vec![0, 1, 2], 0.1).unwrap();
        assert_eq!(out.founders, vec![2, 1, 0]);
        assert!(out.members.is_empty());
    }

    #[test]
    fn threshold_is_inclusive() {
        // 1 of 5 hashes shared: containment is exactly 0.2.
        let store = items(&[("a", vec![0, 1, 2, 3, 4]), ("b", vec![4, 5, 6, 7, 8])]);

        let out = discover_founders(&store, vec![0, 1], 0.2).unwrap();
        assert_eq!(out.members, vec![0]);

        let below = 0.2 + f64::EPSILON;
        let out = discover_founders(&store, vec![0, 1], below).unwrap();
        assert_eq!(out.founders, vec![1, 0]);
        assert!(out.members.is_empty());
    }

    #[test]
    fn duplicate_of_founder_is_not_absorbed() {
        let store = items(&[("b", 100..110), ("a", 0..10), ("a", 0..10)]);
        let out = discover_founders(&store, vec![0, 1, 2], 0.5).unwrap();

        // The second copy of `a` cannot absorb the first; both end up founders.
        assert_eq!(out.founders, vec![2, 1, 0]);
        assert!(out.members.is_empty());
    }

    #[test]
    fn incompatible_sketches_propagate() {
        use crate::error::Error;
        use crate::sketch::MinHashSketch;

        let store = vec![
            Item::new("k31", MinHashSketch::from_hashes("k31", 31, "DNA", 1000, 0..10)),
            Item::new("k21", MinHashSketch::from_hashes("k21", 21, "DNA", 1000, 0..10)),
        ];
        match discover_founders(&store, vec![0, 1], 0.2) {
            Err(Error::Containment {
                founder, candidate, ..
            }) => {
                assert_eq!(founder, "k21");
                assert_eq!(candidate, "k31");
            }
            other => panic!("expected containment error, got {other:?}"),
        }
    }
}
