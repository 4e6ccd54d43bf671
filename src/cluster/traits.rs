use crate::error::Result;

/// Common interface for sketches that can be clustered by containment.
///
/// Equality is identity: two sketches compare equal only if they summarize the
/// same set with the same parameters.
pub trait Sketch: PartialEq + Send + Sync {
    /// Maximum containment in either direction, in `[0, 1]`.
    ///
    /// Fails if the two sketches were built with incompatible parameters.
    fn max_containment(&self, other: &Self) -> Result<f64>;

    /// Stable identifier (content digest) for output tables.
    fn identifier(&self) -> String;
}

/// A sketch together with the source it was loaded from.
#[derive(Debug, Clone, PartialEq)]
pub struct Item<S> {
    /// Source identifier, e.g. a file path or accession.
    pub origin: String,
    /// The sketch itself.
    pub sketch: S,
}

impl<S> Item<S> {
    /// Pair an origin with its sketch.
    pub fn new(origin: impl Into<String>, sketch: S) -> Self {
        Self {
            origin: origin.into(),
            sketch,
        }
    }
}

impl<S: Sketch> Item<S> {
    /// True if `other` is the same item: same origin and an equal sketch.
    #[inline]
    pub fn is_same(&self, other: &Self) -> bool {
        self.origin == other.origin && self.sketch == other.sketch
    }
}
