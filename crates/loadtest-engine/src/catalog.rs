//! Weighted action catalog.
//!
//! Weighting is expressed by repetition: an entry listed twice is picked twice
//! as often as one listed once, because sampling is a uniform index pick.

use crate::error::EngineError;
use rand::Rng;

/// Non-empty, immutable list of actions with duplicates encoding weight.
#[derive(Debug, Clone)]
pub struct Catalog<A> {
    entries: Vec<A>,
}

impl<A> Catalog<A> {
    /// Build a catalog from a literal list of entries.
    pub fn new(entries: Vec<A>) -> Result<Self, EngineError> {
        if entries.is_empty() {
            return Err(EngineError::EmptyCatalog);
        }
        Ok(Self { entries })
    }

    /// Build a catalog from explicit integer weights.
    ///
    /// Each action is repeated `weight` times, so the result samples exactly
    /// like a hand-written list with the same duplicates. Zero weights drop
    /// the action.
    pub fn weighted(weights: impl IntoIterator<Item = (A, usize)>) -> Result<Self, EngineError>
    where
        A: Clone,
    {
        let mut entries = Vec::new();
        for (action, weight) in weights {
            entries.extend(std::iter::repeat(action).take(weight));
        }
        Self::new(entries)
    }

    /// Pick one entry uniformly at random.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &A {
        &self.entries[rng.gen_range(0..self.entries.len())]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[A] {
        &self.entries
    }

    /// Number of entries equal to `action`, i.e. its relative weight.
    pub fn weight_of(&self, action: &A) -> usize
    where
        A: PartialEq,
    {
        self.entries.iter().filter(|a| *a == action).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Op {
        Read,
        Write,
        Ping,
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let result = Catalog::<Op>::new(Vec::new());
        assert!(matches!(result, Err(EngineError::EmptyCatalog)));

        let result = Catalog::weighted(vec![(Op::Read, 0)]);
        assert!(matches!(result, Err(EngineError::EmptyCatalog)));
    }

    #[test]
    fn test_weighted_expands_to_duplicates() {
        let catalog =
            Catalog::weighted(vec![(Op::Read, 2), (Op::Write, 1), (Op::Ping, 0)]).unwrap();

        assert_eq!(catalog.entries(), &[Op::Read, Op::Read, Op::Write]);
        assert_eq!(catalog.weight_of(&Op::Read), 2);
        assert_eq!(catalog.weight_of(&Op::Ping), 0);
    }

    #[test]
    fn test_sample_stays_in_catalog() {
        let catalog = Catalog::new(vec![Op::Read, Op::Write]).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            let op = catalog.sample(&mut rng);
            assert!(*op == Op::Read || *op == Op::Write);
        }
    }

    #[test]
    fn test_duplicate_entry_frequency() {
        // 1 of 4 entries is Write, 3 are Read
        let catalog = Catalog::new(vec![Op::Read, Op::Read, Op::Read, Op::Write]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let trials = 100_000;

        let reads = (0..trials)
            .filter(|_| *catalog.sample(&mut rng) == Op::Read)
            .count();
        let freq = reads as f64 / trials as f64;

        assert!((freq - 0.75).abs() < 0.01, "read frequency was {freq}");
    }
}
