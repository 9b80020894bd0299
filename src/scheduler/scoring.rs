use super::types::ScoreWeights;
use super::util::{
    calculate_daily_spread, calculate_daily_target, calculate_location_distribution,
    count_unique_locations, DailyCounts, DayCounts,
};
use crate::model::StaffAssignment;

/// Sites surchargés d'un jour, triés par effectif décroissant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Overload {
    /// Effectif minimal du jour (sites vides compris).
    pub min_count: usize,
    pub locations: Vec<(String, usize)>,
}

impl Overload {
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// Un site est surchargé s'il compte au moins deux personnes de plus que le minimum du jour.
pub fn find_overloaded_locations(counts: &DayCounts) -> Overload {
    let Some(min_count) = counts.min() else {
        return Overload::default();
    };
    let mut locations: Vec<(String, usize)> = counts
        .locations
        .iter()
        .filter(|(_, c)| *c >= min_count + 2)
        .cloned()
        .collect();
    // tri stable : à égalité, l'ordre de la liste des sites est conservé
    locations.sort_by(|a, b| b.1.cmp(&a.1));
    Overload {
        min_count,
        locations,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RosterScore {
    pub score: f64,
    pub has_empty_locations: bool,
}

/// Score de qualité d'une grille ; ne modifie rien.
pub fn calculate_roster_score(
    counts: &DailyCounts,
    roster: &[StaffAssignment],
    weekly_locations_required: usize,
    weights: &ScoreWeights,
) -> RosterScore {
    let mut score = 0.0;
    let mut has_empty_locations = false;

    for day in counts.iter() {
        score += overload_penalty(&find_overloaded_locations(day), weights);

        if !day.locations.is_empty() {
            let spread = calculate_daily_spread(day).spread as f64;
            score += spread.powi(2) * weights.spread;

            let ideal = day.assigned() as f64 / day.locations.len() as f64;
            score += day
                .locations
                .iter()
                .map(|(_, c)| (*c as f64 - ideal).abs() * weights.balance)
                .sum::<f64>();
        }

        let target = calculate_daily_target(day) as f64;
        for (_, count) in &day.locations {
            if *count == 0 {
                score += weights.empty_location;
                has_empty_locations = true;
            } else {
                score += (*count as f64 - target).powi(2);
            }
        }
    }

    for row in roster {
        if count_unique_locations(&row.assignment) != weekly_locations_required {
            score += weights.quota;
        }
        score += calculate_location_distribution(&row.assignment) * weights.distribution;
    }

    RosterScore {
        score,
        has_empty_locations,
    }
}

fn overload_penalty(overload: &Overload, weights: &ScoreWeights) -> f64 {
    if overload.is_empty() {
        return 0.0;
    }
    let mut penalty = 2f64.powi(overload.locations.len() as i32) * weights.overload;
    for (_, count) in &overload.locations {
        let excess = (*count - (overload.min_count + 1)) as i32;
        penalty += 3f64.powi(excess) * weights.overload;
    }
    penalty
}
