use super::Item;
use crate::sketch::MinHashSketch;

const MAX_HASH: u64 = u64::MAX / 1000;

/// One item per `(name, hashes)` row; the name doubles as origin and sketch name.
pub(crate) fn items<H>(rows: &[(&str, H)]) -> Vec<Item<MinHashSketch>>
where
    H: IntoIterator<Item = u64> + Clone,
{
    rows.iter()
        .map(|(name, hashes)| {
            Item::new(
                *name,
                MinHashSketch::from_hashes(*name, 31, "DNA", MAX_HASH, hashes.clone()),
            )
        })
        .collect()
}

pub(crate) fn origins<'a>(store: &'a [Item<MinHashSketch>], idx: &[usize]) -> Vec<&'a str> {
    idx.iter().map(|&i| store[i].origin.as_str()).collect()
}
