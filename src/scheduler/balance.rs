use super::mutate::{generate_move_chains, rank_move_chains};
use super::scoring::{calculate_roster_score, find_overloaded_locations};
use super::types::{BalanceOptions, INVALID_DATA_MESSAGE, QUOTA_MESSAGE, SUCCESS_MESSAGE};
use super::util::{
    calculate_daily_spread, count_staff_per_location, count_unique_locations, impossible_days,
    validate_roster,
};
use crate::model::{BalanceStats, EmptySlot, RosterGrid, RosterResult, StaffAssignment};

/// Recherche locale : répare les déséquilibres jour par jour via des chaînes de déplacements.
///
/// Une passe parcourt tous les jours ; pour chaque jour dont l'écart dépasse 1,
/// on essaie des chaînes de longueur 1 à `max_steps` au départ des sites surchargés.
/// Une chaîne est gardée si le score baisse ou si l'écart du jour diminue. Sans
/// progrès, la longueur maximale augmente jusqu'au plafond
/// `cases - cases OOF - 1`, puis la recherche s'arrête. La meilleure grille vue
/// est renvoyée.
pub fn balance_locations(
    grid: RosterGrid,
    locations: &[String],
    weekly_locations_required: usize,
    options: &BalanceOptions,
) -> RosterResult {
    let RosterGrid { days, roster } = grid;
    if roster.is_empty() {
        return RosterResult {
            days,
            roster: Vec::new(),
            is_valid: false,
            empty_locations: Vec::new(),
            impossible_days: Vec::new(),
            message: INVALID_DATA_MESSAGE.to_string(),
            stats: BalanceStats::default(),
        };
    }

    let weights = &options.weights;
    let score_of = |rows: &[StaffAssignment]| {
        let counts = count_staff_per_location(rows, &days, locations);
        calculate_roster_score(&counts, rows, weekly_locations_required, weights).score
    };

    let total_slots = days.len() * roster.len();
    let oof_slots = roster
        .iter()
        .map(|row| row.assignment.iter().filter(|s| s.is_oof()).count())
        .sum::<usize>();
    let max_possible_steps = total_slots.saturating_sub(oof_slots).saturating_sub(1);

    let mut roster = roster;
    let initial_score = score_of(&roster);
    let mut best_score = initial_score;
    let mut best_roster = roster.clone();
    let mut history = Vec::new();

    let mut max_steps = 1usize;
    let mut passes = 0usize;
    let mut stuck = 0usize;
    let mut improved_in_pass = true;

    log_debug!(
        "balancing {} staff over {} days, chain ceiling {}",
        roster.len(),
        days.len(),
        max_possible_steps
    );

    while improved_in_pass && passes < options.max_passes {
        passes += 1;
        improved_in_pass = false;
        let mut has_overloaded = false;

        for day_idx in 0..days.len() {
            let counts = count_staff_per_location(&roster, &days, locations);
            let day_counts = counts.at(day_idx);
            let distribution = calculate_daily_spread(day_counts);
            if distribution.balanced {
                continue;
            }
            has_overloaded = true;

            let current_score =
                calculate_roster_score(&counts, &roster, weekly_locations_required, weights).score;
            let overload = find_overloaded_locations(day_counts);

            'steps: for steps in 1..=max_steps {
                for (origin, _) in &overload.locations {
                    let mut chains = generate_move_chains(
                        &roster,
                        origin,
                        day_idx,
                        locations,
                        weekly_locations_required,
                        steps,
                    );
                    rank_move_chains(&mut chains, &roster, day_counts, weekly_locations_required);

                    for chain in chains {
                        let trial = chain.apply(&roster);
                        let trial_counts = count_staff_per_location(&trial, &days, locations);
                        let trial_score = calculate_roster_score(
                            &trial_counts,
                            &trial,
                            weekly_locations_required,
                            weights,
                        )
                        .score;
                        let trial_spread = calculate_daily_spread(trial_counts.at(day_idx)).spread;

                        if trial_score < current_score || trial_spread < distribution.spread {
                            roster = trial;
                            improved_in_pass = true;
                            stuck = 0;
                            if trial_score < best_score {
                                best_score = trial_score;
                                best_roster = roster.clone();
                            }
                            log_debug!(
                                "pass {passes}: {} chain of {} from {origin} kept ({trial_score})",
                                days[day_idx],
                                chain.len()
                            );
                            break 'steps;
                        }
                    }
                }
            }
        }

        history.push(best_score);

        if !improved_in_pass {
            if has_overloaded {
                stuck += 1;
                if stuck < options.max_stuck_attempts {
                    max_steps = (max_steps + stuck).min(max_possible_steps);
                    improved_in_pass = true;
                    log_debug!("stuck ({stuck}), chain length now {max_steps}");
                }
            } else if max_steps < max_possible_steps {
                max_steps += 1;
                improved_in_pass = true;
            }
        }
    }

    if passes >= options.max_passes && improved_in_pass {
        log_warn!("balancing stopped at the pass ceiling ({})", options.max_passes);
    }
    log_info!("balancing finished after {passes} passes, best score {best_score}");

    let roster = best_roster;
    let quota_ok = roster
        .iter()
        .all(|row| count_unique_locations(&row.assignment) == weekly_locations_required);
    let final_counts = count_staff_per_location(&roster, &days, locations);
    let empty_locations = validate_roster(&final_counts, &days, locations);
    let impossible = impossible_days(&roster, &days, locations);
    let message = result_message(quota_ok, &empty_locations);

    RosterResult {
        is_valid: quota_ok && empty_locations.is_empty(),
        message,
        empty_locations,
        impossible_days: impossible,
        stats: BalanceStats {
            passes,
            max_chain_length: max_steps,
            initial_score,
            best_score,
            best_score_history: history,
        },
        days,
        roster,
    }
}

/// Message lisible décrivant l'issue de l'équilibrage.
pub fn result_message(quota_ok: bool, empty_locations: &[EmptySlot]) -> String {
    if !quota_ok {
        return QUOTA_MESSAGE.to_string();
    }
    if !empty_locations.is_empty() {
        return format!(
            "Warning: Unable to staff all locations. Empty slots: {}",
            empty_slots_json(empty_locations)
        );
    }
    SUCCESS_MESSAGE.to_string()
}

#[cfg(feature = "serde")]
fn empty_slots_json(empty_locations: &[EmptySlot]) -> String {
    match serde_json::to_string(empty_locations) {
        Ok(json) => json,
        Err(err) => {
            log_warn!("serializing empty slots: {err}");
            empty_slots_fallback(empty_locations)
        }
    }
}

#[cfg(not(feature = "serde"))]
fn empty_slots_json(empty_locations: &[EmptySlot]) -> String {
    empty_slots_fallback(empty_locations)
}

fn empty_slots_fallback(empty_locations: &[EmptySlot]) -> String {
    let slots: Vec<String> = empty_locations.iter().map(ToString::to_string).collect();
    format!("[{}]", slots.join(","))
}
