mod assignment;
mod balance;
mod mutate;
mod scoring;
mod types;
mod util;

pub use balance::{balance_locations, result_message};
pub use mutate::{
    can_move_to_location, chain_keeps_quota, generate_move_chains, rank_move_chains, Move,
    MoveChain,
};
pub use scoring::{calculate_roster_score, find_overloaded_locations, Overload, RosterScore};
pub use types::{
    BalanceOptions, SchedError, ScoreWeights, INVALID_DATA_MESSAGE, QUOTA_MESSAGE,
    SUCCESS_MESSAGE,
};
pub use util::{
    calculate_daily_spread, calculate_daily_target, calculate_location_distribution,
    count_staff_per_location, count_unique_locations, validate_daily_distribution,
    validate_roster, DailyCounts, DayCounts, DaySpread,
};

use std::collections::BTreeSet;

use crate::model::{
    BalanceStats, Day, OofPreferences, RosterGrid, RosterInputs, RosterResult, Slot,
};
use crate::random::{RandomSource, SeededRandom, ThreadRandom};

/// Générateur de planning : écarte le jour fixe, construit puis équilibre la grille,
/// et réinsère le jour fixe.
#[derive(Debug, Default, Clone)]
pub struct RosterGenerator {
    options: BalanceOptions,
}

impl RosterGenerator {
    pub fn new() -> Self {
        Self {
            options: BalanceOptions::default(),
        }
    }

    pub fn with_options(options: BalanceOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BalanceOptions {
        &self.options
    }

    /// Génère avec l'entropie du thread.
    pub fn generate(&self, inputs: &RosterInputs) -> RosterResult {
        self.generate_with(inputs, &mut ThreadRandom::new())
    }

    /// Génère de façon reproductible.
    pub fn generate_seeded(&self, inputs: &RosterInputs, seed: u64) -> RosterResult {
        self.generate_with(inputs, &mut SeededRandom::new(seed))
    }

    /// Valide les entrées avant de générer.
    pub fn generate_checked<R: RandomSource + ?Sized>(
        &self,
        inputs: &RosterInputs,
        rng: &mut R,
    ) -> Result<RosterResult, SchedError> {
        inputs.validate()?;
        Ok(self.generate_with(inputs, rng))
    }

    pub fn generate_with<R: RandomSource + ?Sized>(
        &self,
        inputs: &RosterInputs,
        rng: &mut R,
    ) -> RosterResult {
        if inputs.staff.is_empty() || inputs.locations.is_empty() {
            return RosterResult {
                days: Vec::new(),
                roster: Vec::new(),
                is_valid: false,
                empty_locations: Vec::new(),
                impossible_days: Vec::new(),
                message: INVALID_DATA_MESSAGE.to_string(),
                stats: BalanceStats::default(),
            };
        }

        let (working_days, filtered_oof) = working_week(inputs);

        for day in &working_days {
            let feasibility =
                validate_daily_distribution(&inputs.staff, &inputs.locations, &filtered_oof, *day);
            if !feasibility.possible {
                log_warn!(
                    "{}: {} staff available for {} locations",
                    day,
                    feasibility.available_staff,
                    feasibility.required_staff
                );
            }
        }

        let initial = assignment::generate_initial_roster(
            &inputs.staff,
            &inputs.locations,
            inputs.weekly_locations_required,
            &filtered_oof,
            &working_days,
            rng,
        );
        let mut result = balance_locations(
            initial,
            &inputs.locations,
            inputs.weekly_locations_required,
            &self.options,
        );

        if let Some(day) = inputs.fixed_day {
            if !result.roster.is_empty() {
                reinsert_fixed_day(&mut result, inputs, day);
            }
        }
        result
    }
}

/// Remet le jour fixe à sa place : `OOF` si la personne est absente, sinon le site
/// fixe (ou `X` s'il n'est pas encore choisi). Cette colonne n'est jamais optimisée.
fn reinsert_fixed_day(result: &mut RosterResult, inputs: &RosterInputs, day: Day) {
    let position = day.index();
    result.days = Day::WEEK.to_vec();
    for row in &mut result.roster {
        let slot = if inputs.is_oof(&row.staff, day) {
            Slot::Oof
        } else {
            match inputs.fixed_day_location.as_deref() {
                Some(loc) if !loc.is_empty() => Slot::location(loc),
                _ => Slot::Fixed,
            }
        };
        let at = position.min(row.assignment.len());
        row.assignment.insert(at, slot);
    }
}

/// Point d'entrée : génère un planning avec la source d'aléa fournie.
pub fn generate_roster<R: RandomSource + ?Sized>(
    inputs: &RosterInputs,
    rng: &mut R,
) -> RosterResult {
    RosterGenerator::new().generate_with(inputs, rng)
}

/// Grille de départ seule, sans équilibrage (jour fixe exclu).
pub fn initial_grid<R: RandomSource + ?Sized>(inputs: &RosterInputs, rng: &mut R) -> RosterGrid {
    let (days, oof_preferences) = working_week(inputs);
    assignment::generate_initial_roster(
        &inputs.staff,
        &inputs.locations,
        inputs.weekly_locations_required,
        &oof_preferences,
        &days,
        rng,
    )
}

/// Jours optimisés (sans le jour fixe) et absences restreintes à ces jours.
fn working_week(inputs: &RosterInputs) -> (Vec<Day>, OofPreferences) {
    let fixed_day = inputs.fixed_day;
    let days: Vec<Day> = Day::WEEK
        .into_iter()
        .filter(|d| Some(*d) != fixed_day)
        .collect();
    let oof_preferences = inputs
        .oof_preferences
        .iter()
        .map(|(staff, days)| {
            let kept: BTreeSet<Day> = days
                .iter()
                .copied()
                .filter(|d| Some(*d) != fixed_day)
                .collect();
            (staff.clone(), kept)
        })
        .collect();
    (days, oof_preferences)
}
