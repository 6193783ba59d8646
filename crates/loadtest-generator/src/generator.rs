//! Catalog generator producing entries with fresh identifiers.

use crate::generators::numeric::{generate_price, generate_rating, generate_sale_misses};
use crate::generators::text::generate_alphanumeric;
use crate::generators::{AUTHOR_LENGTH, TITLE_LENGTH};
use catalog_core::{CatalogEntry, EntryId};
use rand::seq::IteratorRandom;
use rand::Rng;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

/// Upper bound (exclusive) of the random identifier offset a new generator starts from.
pub const MAX_INITIAL_OFFSET: EntryId = 2000;

/// Copies in stock for every generated entry unless overridden.
pub const DEFAULT_INITIAL_COPIES: u32 = 1000;

/// Generator that produces catalog entries with unique ascending identifiers.
///
/// The identifier counter is atomic, so a single generator can be shared by
/// many tasks: every call to [`next_batch`](Self::next_batch) reserves a
/// contiguous block of identifiers that no other call can observe.
#[derive(Debug)]
pub struct CatalogGenerator {
    /// Last identifier handed out (0 before the first batch is reserved)
    last_issued: AtomicU64,
    /// Copies in stock assigned to each generated entry
    initial_copies: u32,
}

impl CatalogGenerator {
    /// Create a generator whose counter starts at a random offset in
    /// `1..MAX_INITIAL_OFFSET`.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::starting_after(rng.gen_range(1..MAX_INITIAL_OFFSET))
    }

    /// Create a generator whose first issued identifier is `last_issued + 1`.
    pub fn starting_after(last_issued: EntryId) -> Self {
        Self {
            last_issued: AtomicU64::new(last_issued),
            initial_copies: DEFAULT_INITIAL_COPIES,
        }
    }

    /// Set the number of copies in stock for generated entries.
    pub fn with_initial_copies(mut self, copies: u32) -> Self {
        self.initial_copies = copies;
        self
    }

    /// Last identifier handed out by this generator.
    pub fn last_issued(&self) -> EntryId {
        self.last_issued.load(Ordering::SeqCst)
    }

    /// Generate `count` entries with fresh identifiers.
    ///
    /// Identifiers are pairwise distinct, ascending within the batch and
    /// strictly greater than any identifier previously issued by this
    /// generator.
    pub fn next_batch<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<CatalogEntry> {
        let count_u64 = count as u64;
        let first = self.last_issued.fetch_add(count_u64, Ordering::SeqCst) + 1;

        (first..first + count_u64)
            .map(|id| self.generate_entry(rng, id))
            .collect()
    }

    /// Sample `count` distinct identifiers uniformly without replacement.
    ///
    /// If `ids` holds no more than `count` elements it is returned unchanged.
    pub fn sample_ids<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        ids: &BTreeSet<EntryId>,
        count: usize,
    ) -> BTreeSet<EntryId> {
        if ids.len() <= count {
            return ids.clone();
        }

        ids.iter().copied().choose_multiple(rng, count).into_iter().collect()
    }

    fn generate_entry<R: Rng + ?Sized>(&self, rng: &mut R, id: EntryId) -> CatalogEntry {
        let (times_rated, total_rating) = generate_rating(rng);

        CatalogEntry {
            id,
            title: generate_alphanumeric(rng, TITLE_LENGTH),
            author: generate_alphanumeric(rng, AUTHOR_LENGTH),
            price: generate_price(rng),
            copies: self.initial_copies,
            sale_misses: generate_sale_misses(rng),
            times_rated,
            total_rating,
            editor_pick: rng.gen_bool(0.5),
        }
    }
}
