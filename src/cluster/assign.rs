//! Assign a pool to a fixed list of founders.
//!
//! Founders are visited in order and each one absorbs matching items from what the
//! earlier founders left behind. An item therefore joins the first founder it
//! matches, not necessarily the closest one, and is never tested again once absorbed.

use tracing::debug;

use super::traits::{Item, Sketch};
use super::util::split_by_founder;
use super::Link;
use crate::error::Result;

/// Result of assigning a pool to founders.
#[derive(Clone, Debug, Default)]
pub struct Assignment {
    /// Pool items no founder absorbed, in their original relative order.
    pub leftover: Vec<usize>,
    /// Absorbed item indices.
    pub members: Vec<usize>,
    /// One link per member, in the same order as `members`.
    pub links: Vec<Link>,
}

/// Partition `pool` into members of `founders` and leftovers.
///
/// An item equal to a founder (same origin and sketch) is never absorbed by that
/// founder. Stops as soon as the pool is empty.
pub fn assign_to_founders<S: Sketch>(
    store: &[Item<S>],
    founders: &[usize],
    mut pool: Vec<usize>,
    threshold: f64,
) -> Result<Assignment> {
    let mut out = Assignment::default();

    for &founder in founders {
        if pool.is_empty() {
            break;
        }
        let split = split_by_founder(store, founder, pool, threshold)?;
        if !split.absorbed.is_empty() {
            debug!(
                founder = %store[founder].origin,
                absorbed = split.absorbed.len(),
                "assigned to founder"
            );
        }
        for member in split.absorbed {
            out.links.push(Link { founder, member });
            out.members.push(member);
        }
        pool = split.leftover;
    }

    out.leftover = pool;
    Ok(out)
}
