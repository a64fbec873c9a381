use rand::{rngs::SmallRng, RngCore, SeedableRng};

/// Opaque byte buffer written to and read back from a backend
pub type Payload = Vec<u8>;

/// Pseudo-random payload source
///
/// Owns its generator so nothing outside the gauntlet touches the random
/// state between rounds.
pub struct PayloadGenerator {
    rng: SmallRng,
}

impl PayloadGenerator {
    /// Create a generator seeded from the OS entropy source
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Create a reproducible generator
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Generate `size` bytes, each uniform over 0..=255
    pub fn generate(&mut self, size: usize) -> Payload {
        let mut payload = vec![0u8; size];
        self.rng.fill_bytes(&mut payload);
        payload
    }

    /// Generate `count` independent payloads of `size` bytes each
    pub fn generate_batch(&mut self, size: usize, count: usize) -> Vec<Payload> {
        (0..count).map(|_| self.generate(size)).collect()
    }
}

impl Default for PayloadGenerator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_exact_length() {
        let mut generator = PayloadGenerator::seeded(7);
        for size in [1usize, 10, 100, 1000, 65536] {
            assert_eq!(generator.generate(size).len(), size);
        }
    }

    #[test]
    fn test_generate_zero_is_empty() {
        let mut generator = PayloadGenerator::seeded(7);
        assert!(generator.generate(0).is_empty());
    }

    #[test]
    fn test_seeded_generators_agree() {
        let mut a = PayloadGenerator::seeded(42);
        let mut b = PayloadGenerator::seeded(42);
        assert_eq!(a.generate(256), b.generate(256));
    }

    #[test]
    fn test_batch_payloads_are_independent() {
        let mut generator = PayloadGenerator::seeded(3);
        let batch = generator.generate_batch(64, 4);
        assert_eq!(batch.len(), 4);
        assert!(batch.iter().all(|p| p.len() == 64));
        // 64 random bytes colliding would mean the same buffer was reused
        assert_ne!(batch[0], batch[1]);
        assert_ne!(batch[2], batch[3]);
    }

    #[test]
    fn test_bytes_cover_range() {
        let mut generator = PayloadGenerator::seeded(11);
        let payload = generator.generate(100_000);
        let mut seen = [false; 256];
        for byte in &payload {
            seen[*byte as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
