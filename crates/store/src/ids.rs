//! Id and pattern seed generation.
//!
//! The store never makes up ids on its own: it asks an [`IdGenerator`]. Tests
//! use [`SequentialIds`] for predictable output, the application uses
//! [`RandomIds`].

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Builder;

/// Characters used in pattern seeds.
const SEED_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of a pattern seed.
pub const SEED_LEN: usize = 6;

/// The kind of node an id is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    /// A board.
    Board,
    /// A column.
    Column,
    /// A card.
    Card,
}

impl IdKind {
    /// Returns the prefix of ids of this kind.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Board => "b",
            Self::Column => "col",
            Self::Card => "t",
        }
    }
}

/// A source of fresh ids and pattern seeds.
pub trait IdGenerator: fmt::Debug {
    /// Returns a new id for a node of the given kind.
    fn next_id(&mut self, kind: IdKind) -> String;

    /// Returns a new pattern seed.
    fn pattern_seed(&mut self) -> String;

    /// Returns a new id of the given kind for which `taken` is `false`.
    ///
    /// Candidates that are taken are skipped, so ids are never reused within
    /// the scope `taken` describes.
    fn fresh_id(&mut self, kind: IdKind, taken: &dyn Fn(&str) -> bool) -> String {
        loop {
            let id = self.next_id(kind);
            if !taken(&id) {
                return id;
            }
        }
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn next_id(&mut self, kind: IdKind) -> String {
        (**self).next_id(kind)
    }

    fn pattern_seed(&mut self) -> String {
        (**self).pattern_seed()
    }
}

/// Generates `b-1`, `col-2`, `t-3`... from a single counter.
///
/// Seeds are `s1`, `s2`... from a separate counter.
///
/// # Examples
///
/// ```
/// use orcganizer_store::{IdGenerator, IdKind, SequentialIds};
///
/// let mut ids = SequentialIds::new();
/// assert_eq!(ids.next_id(IdKind::Board), "b-1");
/// assert_eq!(ids.next_id(IdKind::Card), "t-2");
/// assert_eq!(ids.pattern_seed(), "s1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    counter: u64,
    seeds: u64,
}

impl SequentialIds {
    /// Creates a generator starting at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, kind: IdKind) -> String {
        self.counter += 1;
        format!("{}-{}", kind.prefix(), self.counter)
    }

    fn pattern_seed(&mut self) -> String {
        self.seeds += 1;
        format!("s{}", self.seeds)
    }
}

/// Generates uuid-based ids and random six-character seeds.
#[derive(Debug, Clone)]
pub struct RandomIds {
    rng: StdRng,
}

impl RandomIds {
    /// Creates a generator seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a generator with a fixed seed, for reproducible output.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomIds {
    fn next_id(&mut self, kind: IdKind) -> String {
        let uuid = Builder::from_random_bytes(self.rng.random()).into_uuid();
        format!("{}-{}", kind.prefix(), uuid.simple())
    }

    fn pattern_seed(&mut self) -> String {
        random_seed(&mut self.rng)
    }
}

/// Draws a six-character base-36 seed from `rng`.
pub fn random_seed<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..SEED_LEN)
        .map(|_| char::from(SEED_ALPHABET[rng.random_range(0..SEED_ALPHABET.len())]))
        .collect()
}
