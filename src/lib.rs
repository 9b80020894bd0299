#![forbid(unsafe_code)]
//! Staffgrid — génération de plannings hebdomadaires personnel/sites (sans BD).
//!
//! - Grille de 5 jours ouvrés, un jour fixe optionnel hors optimisation.
//! - Quota exact de sites distincts par personne, chaque site couvert chaque jour.
//! - Équilibrage par recherche locale (chaînes de déplacements).
//! - Stockage fichiers (JSON/CSV) pour la CLI.

#[macro_use]
mod logging;

#[cfg(feature = "serde")]
pub mod io;
pub mod model;
pub mod random;
pub mod scheduler;
#[cfg(feature = "serde")]
pub mod storage;

pub use model::{
    BalanceStats, Day, DayFeasibility, EmptySlot, InputError, OofPreferences, RosterGrid,
    RosterInputs, RosterResult, Slot, StaffAssignment, FIXED, OOF,
};
pub use random::{FixedRandom, RandomSource, SeededRandom, ThreadRandom};
pub use scheduler::{
    balance_locations, generate_roster, BalanceOptions, RosterGenerator, SchedError, ScoreWeights,
};
#[cfg(feature = "serde")]
pub use storage::{JsonStorage, Storage};
