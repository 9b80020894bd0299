use crate::model::{Day, OofPreferences, RosterGrid, Slot, StaffAssignment};
use crate::random::RandomSource;

/// Construit la grille de départ : quota respecté par construction, équilibre non garanti.
///
/// Un seul décalage aléatoire est tiré pour toute la génération ; la personne `i`
/// reçoit les sites `(offset + i + k) % n` pour `k` dans `0..quota`.
pub(super) fn generate_initial_roster<R: RandomSource + ?Sized>(
    staff: &[String],
    locations: &[String],
    weekly_locations_required: usize,
    oof_preferences: &OofPreferences,
    days: &[Day],
    rng: &mut R,
) -> RosterGrid {
    let total = locations.len();
    if total == 0 {
        return RosterGrid {
            days: days.to_vec(),
            roster: Vec::new(),
        };
    }
    let offset = rng.next_in_range(total);
    let per_staff = weekly_locations_required.clamp(1, total);

    let roster = staff
        .iter()
        .enumerate()
        .map(|(staff_index, name)| {
            let selected: Vec<&String> = (0..per_staff)
                .map(|k| &locations[(offset + staff_index + k) % total])
                .collect();
            let is_oof = |day: &Day| {
                oof_preferences
                    .get(name.as_str())
                    .is_some_and(|set| set.contains(day))
            };
            let available = days.iter().filter(|d| !is_oof(*d)).count();
            let mut plan = spread_days(available, selected.len()).into_iter();

            let assignment = days
                .iter()
                .map(|day| {
                    if is_oof(day) {
                        Slot::Oof
                    } else {
                        // `plan` a exactement `available` entrées
                        plan.next()
                            .map_or(Slot::Oof, |loc_idx| Slot::Location(selected[loc_idx].clone()))
                    }
                })
                .collect();

            StaffAssignment {
                staff: name.clone(),
                assignment,
            }
        })
        .collect();

    RosterGrid {
        days: days.to_vec(),
        roster,
    }
}

/// Répartit `available` jours sur `buckets` sites en blocs consécutifs :
/// `available / buckets` chacun, un de plus pour les `available % buckets` premiers.
fn spread_days(available: usize, buckets: usize) -> Vec<usize> {
    if buckets == 0 {
        return Vec::new();
    }
    let base = available / buckets;
    let extra = available % buckets;
    (0..buckets)
        .flat_map(|b| std::iter::repeat(b).take(base + usize::from(b < extra)))
        .collect()
}
