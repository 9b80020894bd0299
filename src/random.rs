//! Source d'aléa injectable pour l'assignation initiale.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Fournit un entier uniforme dans `0..upper`.
pub trait RandomSource {
    /// `upper` vaut au moins 1.
    fn next_in_range(&mut self, upper: usize) -> usize;
}

/// Entropie du thread courant (câblage de production).
pub struct ThreadRandom {
    rng: ThreadRng,
}

impl ThreadRandom {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ThreadRandom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadRandom").finish_non_exhaustive()
    }
}

impl RandomSource for ThreadRandom {
    fn next_in_range(&mut self, upper: usize) -> usize {
        if upper <= 1 {
            return 0;
        }
        self.rng.random_range(0..upper)
    }
}

/// Générateur reproductible à partir d'une graine.
#[derive(Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl std::fmt::Debug for SeededRandom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeededRandom").finish_non_exhaustive()
    }
}

impl RandomSource for SeededRandom {
    fn next_in_range(&mut self, upper: usize) -> usize {
        if upper <= 1 {
            return 0;
        }
        self.rng.random_range(0..upper)
    }
}

/// Renvoie toujours la même valeur (modulo `upper`).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedRandom(pub usize);

impl RandomSource for FixedRandom {
    fn next_in_range(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        self.0 % upper
    }
}
