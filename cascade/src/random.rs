//! Random number generation provider abstraction.
//!
//! Failure trials draw uniform samples from a [`RandomProvider`] that is
//! injected into the system at construction time. This keeps every
//! evaluation deterministic under a seeded provider while production
//! callers can use thread-local entropy, and tests can script the exact
//! draws an evaluation will see.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Provider trait for uniform random number generation.
///
/// Implementations handle the source of randomness appropriate for their
/// environment, from seeded reproducible streams to thread-local entropy.
pub trait RandomProvider: Clone {
    /// Generate a random f64 in [0.0, 1.0).
    fn random_ratio(&self) -> f64;

    /// Generate a random bool with the given probability of being true.
    ///
    /// The probability should be between 0.0 and 1.0.
    fn random_bool(&self, probability: f64) -> bool;
}

/// Deterministic random provider seeded with a fixed value.
///
/// Uses `ChaCha8Rng` for reproducible randomness: the same seed always
/// produces the same sequence of draws. Cloning shares the underlying
/// stream, so a clone held by a test advances the same sequence the
/// system consumes.
///
/// # Example
///
/// ```rust
/// use cascade::{RandomProvider, SeededRandomProvider};
///
/// let random = SeededRandomProvider::new(42);
/// let replay = SeededRandomProvider::new(42);
/// assert_eq!(random.random_ratio(), replay.random_ratio());
/// ```
#[derive(Clone, Debug)]
pub struct SeededRandomProvider {
    rng: Rc<RefCell<ChaCha8Rng>>,
    seed: u64,
}

impl SeededRandomProvider {
    /// Create a new seeded random provider.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rc::new(RefCell::new(ChaCha8Rng::seed_from_u64(seed))),
            seed,
        }
    }

    /// The seed this provider was created with.
    ///
    /// Surfaced so failing runs can be reported and replayed.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomProvider for SeededRandomProvider {
    fn random_ratio(&self) -> f64 {
        self.rng.borrow_mut().random()
    }

    fn random_bool(&self, probability: f64) -> bool {
        self.random_ratio() < probability
    }
}

/// Production random provider using thread-local RNG.
///
/// Uses `rand::rng()` (thread-local, non-cryptographic) for efficient
/// random number generation when reproducibility is not required.
#[derive(Clone, Default)]
pub struct ThreadRandomProvider;

impl ThreadRandomProvider {
    /// Create a new production random provider.
    pub fn new() -> Self {
        Self
    }
}

// Thread-local RNG for ThreadRandomProvider
thread_local! {
    static RNG: RefCell<rand::rngs::ThreadRng> = RefCell::new(rand::rng());
}

impl RandomProvider for ThreadRandomProvider {
    fn random_ratio(&self) -> f64 {
        RNG.with(|rng| rng.borrow_mut().random())
    }

    fn random_bool(&self, probability: f64) -> bool {
        self.random_ratio() < probability
    }
}

/// Random provider that replays an explicit sequence of draws.
///
/// Cloning shares the underlying queue, so a test can keep a handle and
/// append more draws after the provider has been moved into a system.
///
/// # Panics
///
/// [`random_ratio`](RandomProvider::random_ratio) panics when the script
/// is exhausted: running out of draws is a bug in the test, not a runtime
/// condition to recover from.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandomProvider {
    draws: Rc<RefCell<VecDeque<f64>>>,
}

impl ScriptedRandomProvider {
    /// Create a provider that replays `draws` in order.
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: Rc::new(RefCell::new(draws.into_iter().collect())),
        }
    }

    /// Append a draw to the end of the script.
    pub fn push(&self, value: f64) {
        self.draws.borrow_mut().push_back(value);
    }

    /// Number of scripted draws not yet consumed.
    pub fn remaining(&self) -> usize {
        self.draws.borrow().len()
    }
}

impl RandomProvider for ScriptedRandomProvider {
    fn random_ratio(&self) -> f64 {
        self.draws
            .borrow_mut()
            .pop_front()
            .expect("scripted draw sequence exhausted")
    }

    fn random_bool(&self, probability: f64) -> bool {
        self.random_ratio() < probability
    }
}
