//! Secret code generation.

use super::config::GameConfig;
use super::types::{Color, Secret};
use rand::Rng;
use tracing::{debug, instrument};

/// Draws secrets of pairwise-distinct colors.
///
/// Holds only the palette and slot counts; randomness is passed in on each
/// call so hosts control seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretGenerator {
    color_count: usize,
    slot_count: usize,
}

impl SecretGenerator {
    /// Creates a generator for a validated configuration.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            color_count: *config.color_count(),
            slot_count: *config.slot_count(),
        }
    }

    /// Generates a secret.
    ///
    /// Draws uniformly from the palette and keeps each color the first time
    /// it comes up, until every slot is filled.
    #[instrument(skip(self, rng), fields(colors = self.color_count, slots = self.slot_count))]
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Secret {
        let mut used = vec![false; self.color_count];
        let mut colors = Vec::with_capacity(self.slot_count);
        let mut rejected = 0usize;

        while colors.len() < self.slot_count {
            let index = rng.gen_range(0..self.color_count);
            if used[index] {
                rejected += 1;
                continue;
            }
            used[index] = true;
            // color_count is capped at 256 by GameConfig::validate
            colors.push(Color::new(index as u8));
        }

        debug!(rejected, "Secret generated");
        Secret::from_generated(colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_generated_secret_is_distinct() {
        let generator = SecretGenerator::new(&GameConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let secret = generator.generate(&mut rng);
            assert_eq!(secret.len(), 4);
            assert!(secret.is_distinct());
            assert!(secret.colors().iter().all(|c| c.index() < 6));
        }
    }

    #[test]
    fn test_same_seed_same_secret() {
        let generator = SecretGenerator::new(&GameConfig::default());
        let a = generator.generate(&mut ChaCha8Rng::seed_from_u64(42));
        let b = generator.generate(&mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_full_palette_is_permutation() {
        let config = GameConfig::new(5, 5, 10).unwrap();
        let generator = SecretGenerator::new(&config);
        let secret = generator.generate(&mut ChaCha8Rng::seed_from_u64(3));
        let mut indices: Vec<_> = secret.colors().iter().map(|c| c.index()).collect();
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_every_color_eventually_used() {
        let generator = SecretGenerator::new(&GameConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut seen = [false; 6];
        for _ in 0..100 {
            for color in generator.generate(&mut rng).colors() {
                seen[color.index()] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }
}
