//! Random text generators.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate a random alphanumeric string of exactly `length` characters.
pub fn generate_alphanumeric<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_alphanumeric_length() {
        let mut rng = StdRng::seed_from_u64(42);

        for length in [0, 1, 10, 50] {
            let value = generate_alphanumeric(&mut rng, length);
            assert_eq!(value.len(), length);
            assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_generate_alphanumeric_deterministic() {
        let mut rng1 = StdRng::seed_from_u64(7);
        let mut rng2 = StdRng::seed_from_u64(7);

        assert_eq!(
            generate_alphanumeric(&mut rng1, 32),
            generate_alphanumeric(&mut rng2, 32)
        );
    }
}
