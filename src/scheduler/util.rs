//! Primitives de comptage et de validation sur la grille.

use std::collections::BTreeMap;

use crate::model::{Day, DayFeasibility, EmptySlot, OofPreferences, Slot, StaffAssignment};

/// Effectifs d'un jour, par site (dans l'ordre de la liste) plus `OOF`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCounts {
    pub day: Day,
    pub locations: Vec<(String, usize)>,
    pub oof: usize,
}

impl DayCounts {
    pub fn get(&self, location: &str) -> usize {
        self.locations
            .iter()
            .find(|(loc, _)| loc == location)
            .map_or(0, |(_, count)| *count)
    }

    pub fn min(&self) -> Option<usize> {
        self.locations.iter().map(|(_, c)| *c).min()
    }

    pub fn max(&self) -> Option<usize> {
        self.locations.iter().map(|(_, c)| *c).max()
    }

    /// Personnes placées sur un site ce jour-là (hors `OOF`).
    pub fn assigned(&self) -> usize {
        self.locations.iter().map(|(_, c)| *c).sum()
    }
}

/// Instantané des effectifs de chaque jour ; jamais mis à jour incrémentalement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCounts {
    days: Vec<DayCounts>,
}

impl DailyCounts {
    /// Effectifs du `idx`-ième jour de la liste courante.
    pub fn at(&self, idx: usize) -> &DayCounts {
        &self.days[idx]
    }

    pub fn day(&self, day: Day) -> Option<&DayCounts> {
        self.days.iter().find(|c| c.day == day)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DayCounts> {
        self.days.iter()
    }
}

/// Écart entre le site le plus et le moins chargé d'un jour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySpread {
    pub balanced: bool,
    pub spread: usize,
    pub min: usize,
    pub max: usize,
}

pub fn count_staff_per_location(
    roster: &[StaffAssignment],
    days: &[Day],
    locations: &[String],
) -> DailyCounts {
    let mut counts: Vec<DayCounts> = days
        .iter()
        .map(|day| DayCounts {
            day: *day,
            locations: locations.iter().map(|loc| (loc.clone(), 0)).collect(),
            oof: 0,
        })
        .collect();

    for row in roster {
        for (idx, slot) in row.assignment.iter().enumerate().take(days.len()) {
            let day = &mut counts[idx];
            match slot {
                Slot::Oof => day.oof += 1,
                Slot::Fixed => {}
                Slot::Location(name) => {
                    if let Some((_, c)) = day.locations.iter_mut().find(|(loc, _)| loc == name) {
                        *c += 1;
                    }
                }
            }
        }
    }

    DailyCounts { days: counts }
}

/// Nombre de sites distincts dans une ligne (hors `OOF` et `X`).
pub fn count_unique_locations(assignment: &[Slot]) -> usize {
    let mut seen: Vec<&str> = Vec::new();
    for name in assignment.iter().filter_map(Slot::as_location) {
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen.len()
}

/// Liste des couples (jour, site) sans personne.
pub fn validate_roster(counts: &DailyCounts, days: &[Day], locations: &[String]) -> Vec<EmptySlot> {
    let mut out = Vec::new();
    for day in days {
        let Some(day_counts) = counts.day(*day) else {
            continue;
        };
        for loc in locations {
            if day_counts.get(loc) == 0 {
                out.push(EmptySlot {
                    day: *day,
                    location: loc.clone(),
                });
            }
        }
    }
    out
}

/// Variance du nombre de jours passés sur chaque site, pour une personne.
pub fn calculate_location_distribution(assignment: &[Slot]) -> f64 {
    let mut per_location: BTreeMap<&str, usize> = BTreeMap::new();
    for name in assignment.iter().filter_map(Slot::as_location) {
        *per_location.entry(name).or_default() += 1;
    }
    if per_location.len() <= 1 {
        return 0.0;
    }

    let n = per_location.len() as f64;
    let mean = per_location.values().sum::<usize>() as f64 / n;
    per_location
        .values()
        .map(|c| (*c as f64 - mean).powi(2))
        .sum::<f64>()
        / n
}

pub fn validate_daily_distribution(
    staff: &[String],
    locations: &[String],
    oof_preferences: &OofPreferences,
    day: Day,
) -> DayFeasibility {
    let unavailable = staff
        .iter()
        .filter(|name| {
            oof_preferences
                .get(name.as_str())
                .is_some_and(|days| days.contains(&day))
        })
        .count();
    DayFeasibility::new(day, staff.len() - unavailable, locations.len())
}

pub fn calculate_daily_spread(counts: &DayCounts) -> DaySpread {
    let (Some(min), Some(max)) = (counts.min(), counts.max()) else {
        return DaySpread {
            balanced: true,
            spread: 0,
            min: 0,
            max: 0,
        };
    };
    let spread = max - min;
    DaySpread {
        balanced: spread <= 1,
        spread,
        min,
        max,
    }
}

/// Effectif cible par site : `floor(personnes placées / sites)`.
pub fn calculate_daily_target(counts: &DayCounts) -> usize {
    if counts.locations.is_empty() {
        return 0;
    }
    counts.assigned() / counts.locations.len()
}

/// Faisabilité calculée sur la grille elle-même (cases `OOF` du jour).
pub(super) fn impossible_days(
    roster: &[StaffAssignment],
    days: &[Day],
    locations: &[String],
) -> Vec<DayFeasibility> {
    days.iter()
        .enumerate()
        .map(|(idx, day)| {
            let oof = roster
                .iter()
                .filter(|row| row.assignment.get(idx).is_some_and(Slot::is_oof))
                .count();
            DayFeasibility::new(*day, roster.len() - oof, locations.len())
        })
        .filter(|f| !f.possible)
        .collect()
}
