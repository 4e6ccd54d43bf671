use std::collections::HashSet;

use proptest::prelude::*;
use sigclump::cluster::{Item, Uniqify};
use sigclump::sketch::MinHashSketch;

const MAX_HASH: u64 = u64::MAX / 1000;

/// Items drawn from a handful of families: shared core hashes plus a few private ones.
fn make_items(rows: &[(u64, u64)]) -> Vec<Item<MinHashSketch>> {
    rows.iter()
        .enumerate()
        .map(|(i, &(family, private))| {
            let core = family * 100_000;
            let private = (0..private).map(|p| core + 50_000 + i as u64 * 100 + p);
            let hashes = (core..core + 40).chain(private);
            let name = format!("item{i}");
            let sketch = MinHashSketch::from_hashes(name.clone(), 31, "DNA", MAX_HASH, hashes);
            Item::new(name, sketch)
        })
        .collect()
}

fn item_strategy() -> impl Strategy<Value = Vec<(u64, u64)>> {
    prop::collection::vec((0u64..6, 0u64..60), 0..40)
}

proptest! {
    #[test]
    fn prop_every_item_classified_once(
        raw in item_strategy(),
        threshold in 0.0f64..=1.0,
        batch in 1usize..12,
        seed in any::<u64>(),
    ) {
        let n = raw.len();
        let fit = Uniqify::new(threshold)
            .with_batch_size(batch)
            .with_seed(seed)
            .fit(make_items(&raw))
            .unwrap();

        prop_assert_eq!(fit.founders.len() + fit.members.len(), n);
        let founders: HashSet<&str> = fit.founders.iter().map(|f| f.origin.as_str()).collect();
        let members: HashSet<&str> = fit.members.iter().map(|m| m.origin.as_str()).collect();
        prop_assert!(founders.is_disjoint(&members));
        prop_assert_eq!(founders.len() + members.len(), n);
    }

    #[test]
    fn prop_rarefaction_monotonic(
        raw in item_strategy(),
        batch in 1usize..8,
        seed in any::<u64>(),
    ) {
        let fit = Uniqify::new(0.3)
            .with_batch_size(batch)
            .with_seed(seed)
            .fit(make_items(&raw))
            .unwrap();

        prop_assert!(!fit.rarefaction.is_empty());
        for w in fit.rarefaction.windows(2) {
            prop_assert!(w[0].founders <= w[1].founders);
            prop_assert!(w[0].members <= w[1].members);
        }
        let last = fit.rarefaction.last().unwrap();
        prop_assert_eq!(last.founders, fit.founders.len());
        prop_assert_eq!(last.members, fit.members.len());
    }

    #[test]
    fn prop_same_seed_same_founders(
        raw in item_strategy(),
        batch in 1usize..8,
        seed in any::<u64>(),
    ) {
        let run = || {
            Uniqify::new(0.3)
                .with_batch_size(batch)
                .with_seed(seed)
                .fit(make_items(&raw))
                .unwrap()
                .founders
                .into_iter()
                .map(|f| f.origin)
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(run(), run());
    }

    #[test]
    fn prop_members_meet_threshold(
        raw in item_strategy(),
        threshold in 0.05f64..=1.0,
        seed in any::<u64>(),
    ) {
        use sigclump::cluster::Sketch;

        let fit = Uniqify::new(threshold).with_seed(seed).fit(make_items(&raw)).unwrap();
        for (member, &founder) in fit.members.iter().zip(&fit.assignments) {
            let founder = &fit.founders[founder];
            prop_assert_ne!(&founder.origin, &member.origin);
            let c = member.sketch.max_containment(&founder.sketch).unwrap();
            prop_assert!(c >= threshold);
        }
    }

    #[test]
    fn prop_seed_members_never_become_founders(
        raw in item_strategy(),
        batch in 1usize..8,
        seed in any::<u64>(),
    ) {
        let seeds: Vec<Item<MinHashSketch>> = (0..3u64)
            .map(|family| {
                let core = family * 100_000;
                let name = format!("seed{family}");
                let sketch = MinHashSketch::from_hashes(name.clone(), 31, "DNA", MAX_HASH, core..core + 40);
                Item::new(name, sketch)
            })
            .collect();
        let fit = Uniqify::new(0.3)
            .with_batch_size(batch)
            .with_seed(seed)
            .fit_with_seeds(make_items(&raw), seeds)
            .unwrap();

        let seed_members: HashSet<&str> = fit
            .members
            .iter()
            .zip(&fit.assignments)
            .filter(|&(_, &f)| f < 3)
            .map(|(m, _)| m.origin.as_str())
            .collect();
        for founder in &fit.founders[3..] {
            prop_assert!(!seed_members.contains(founder.origin.as_str()));
        }
        prop_assert_eq!(fit.rarefaction[0].batch, 0);
        prop_assert_eq!(fit.rarefaction[0].founders, 3);
    }
}
