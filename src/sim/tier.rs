//! Discrete piece sizes
//!
//! Tiers form an arithmetic sequence `min, min + step, ..., min + (count - 1) * step`.
//! Merging two pieces of one tier yields the tier above it.

use rand::Rng;

use crate::error::GameError;

/// Ordered set of valid piece sizes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierSet {
    /// Sizes in ascending order
    sizes: Vec<u32>,
    step: u32,
}

impl TierSet {
    /// Build the sequence; it stops early at the first size that would overflow `u32`
    pub fn new(min: u32, step: u32, count: u32) -> Self {
        Self {
            sizes: (0..count)
                .map_while(|i| i.checked_mul(step).and_then(|offset| min.checked_add(offset)))
                .collect(),
            step,
        }
    }

    pub fn sizes(&self) -> &[u32] {
        &self.sizes
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn min(&self) -> u32 {
        self.sizes.first().copied().unwrap_or_default()
    }

    pub fn max(&self) -> u32 {
        self.sizes.last().copied().unwrap_or_default()
    }

    #[inline]
    pub fn contains(&self, size: u32) -> bool {
        self.sizes.binary_search(&size).is_ok()
    }

    /// Return `size` if it is a tier, `InvalidTier` otherwise
    pub fn check(&self, size: u32) -> Result<u32, GameError> {
        if self.contains(size) {
            Ok(size)
        } else {
            Err(GameError::InvalidTier { size })
        }
    }

    /// Size produced by merging two pieces of `size` (None past the top tier)
    pub fn next_up(&self, size: u32) -> Option<u32> {
        let up = size.checked_add(self.step)?;
        self.contains(up).then_some(up)
    }

    /// Uniform draw from the tier set (repeats allowed)
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        debug_assert!(!self.is_empty(), "draw from an empty tier set");
        self.sizes[rng.random_range(0..self.sizes.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_default_layout() {
        let tiers = TierSet::new(20, 10, 15);
        assert_eq!(&tiers.sizes()[..3], &[20, 30, 40]);
        assert_eq!(tiers.max(), 160);
        assert!(tiers.contains(90));
        assert!(!tiers.contains(95));
        assert!(!tiers.contains(170));
    }

    #[test]
    fn test_next_up_caps_at_max() {
        let tiers = TierSet::new(20, 10, 15);
        assert_eq!(tiers.next_up(20), Some(30));
        assert_eq!(tiers.next_up(150), Some(160));
        assert_eq!(tiers.next_up(160), None);
    }

    #[test]
    fn test_new_stops_before_overflow() {
        let tiers = TierSet::new(4_000_000_000, 1_000_000_000, 2);
        assert_eq!(tiers.sizes(), &[4_000_000_000]);
        assert_eq!(tiers.next_up(4_000_000_000), None);
    }

    #[test]
    fn test_check() {
        let tiers = TierSet::new(20, 10, 15);
        assert_eq!(tiers.check(70).unwrap(), 70);
        assert!(matches!(
            tiers.check(75),
            Err(GameError::InvalidTier { size: 75 })
        ));
    }

    #[test]
    fn test_draw_stays_in_set() {
        let tiers = TierSet::new(20, 10, 15);
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..500 {
            assert!(tiers.contains(tiers.draw(&mut rng)));
        }
    }

    #[test]
    fn test_draw_covers_every_tier() {
        let tiers = TierSet::new(20, 10, 4);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let size = tiers.draw(&mut rng);
            seen[((size - 20) / 10) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
