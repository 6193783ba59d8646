//! Numeric field generators.

use rand::Rng;

/// Upper bound (exclusive) for generated prices.
pub const MAX_PRICE: f32 = 1000.0;

/// Upper bound (inclusive) for generated rating counts.
pub const MAX_TIMES_RATED: u64 = 1000;

/// Highest rating a single customer can give.
pub const MAX_RATING: u64 = 5;

/// Upper bound (inclusive) for generated sale misses.
pub const MAX_SALE_MISSES: u64 = 100;

/// Generate a non-negative price below [`MAX_PRICE`].
pub fn generate_price<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen_range(0.0..MAX_PRICE)
}

/// Generate a `(times_rated, total_rating)` pair.
///
/// The total never exceeds `times_rated * MAX_RATING`.
pub fn generate_rating<R: Rng + ?Sized>(rng: &mut R) -> (u64, u64) {
    let times_rated = rng.gen_range(0..=MAX_TIMES_RATED);
    let total_rating = rng.gen_range(0..=times_rated * MAX_RATING);
    (times_rated, total_rating)
}

/// Generate a sale-miss count.
pub fn generate_sale_misses<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    rng.gen_range(0..=MAX_SALE_MISSES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_price() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let price = generate_price(&mut rng);
            assert!((0.0..MAX_PRICE).contains(&price));
        }
    }

    #[test]
    fn test_generate_rating() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let (times_rated, total_rating) = generate_rating(&mut rng);
            assert!(times_rated <= MAX_TIMES_RATED);
            assert!(total_rating <= times_rated * MAX_RATING);
        }
    }
}
