//! Chaînes de déplacements sur un jour donné.

use std::collections::HashSet;

use super::util::{count_unique_locations, DayCounts};
use crate::model::{Slot, StaffAssignment};

/// Réaffectation d'une personne sur le jour de la chaîne.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    /// Index de la personne dans la grille.
    pub staff: usize,
    pub from: String,
    pub to: String,
}

/// Suite de déplacements évaluée comme un seul essai.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveChain {
    pub day: usize,
    /// Site surchargé d'où part la chaîne.
    pub origin: String,
    pub moves: Vec<Move>,
}

impl MoveChain {
    /// Copie la grille puis applique la chaîne ; l'original n'est pas touché.
    pub fn apply(&self, roster: &[StaffAssignment]) -> Vec<StaffAssignment> {
        let mut scratch = roster.to_vec();
        for mv in &self.moves {
            if let Some(slot) = scratch
                .get_mut(mv.staff)
                .and_then(|row| row.assignment.get_mut(self.day))
            {
                *slot = Slot::Location(mv.to.clone());
            }
        }
        scratch
    }

    pub fn destination(&self) -> Option<&str> {
        self.moves.first().map(|m| m.to.as_str())
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Le passage vers `target` le jour `day` garde-t-il au plus `required` sites distincts ?
pub fn can_move_to_location(
    row: &StaffAssignment,
    target: &str,
    day: usize,
    required: usize,
) -> bool {
    let mut seen: Vec<&str> = row
        .assignment
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != day)
        .filter_map(|(_, slot)| slot.as_location())
        .collect();
    seen.push(target);
    seen.sort_unstable();
    seen.dedup();
    seen.len() <= required
}

type MoveKey = (usize, String, String, usize);

struct ChainSearch<'a> {
    roster: &'a [StaffAssignment],
    locations: &'a [String],
    origin: &'a str,
    day: usize,
    required: usize,
}

/// Énumère les chaînes de longueur `steps` partant de `origin` le jour `day`.
///
/// Le premier déplacement prend une personne placée sur `origin` ; les suivants
/// peuvent prendre n'importe qui. Chaque (personne, départ, arrivée, pas restants)
/// n'est exploré qu'une fois. Seules les chaînes qui laissent chaque personne à
/// exactement `required` sites distincts sont renvoyées.
pub fn generate_move_chains(
    roster: &[StaffAssignment],
    origin: &str,
    day: usize,
    locations: &[String],
    required: usize,
    steps: usize,
) -> Vec<MoveChain> {
    let search = ChainSearch {
        roster,
        locations,
        origin,
        day,
        required,
    };
    let mut visited: HashSet<MoveKey> = HashSet::new();
    let mut out = Vec::new();
    if steps > 0 {
        search.extend(Vec::new(), steps, &mut visited, &mut out);
    }
    out
}

impl ChainSearch<'_> {
    fn extend(
        &self,
        partial: Vec<Move>,
        remaining: usize,
        visited: &mut HashSet<MoveKey>,
        out: &mut Vec<MoveChain>,
    ) {
        if remaining == 0 {
            let chain = MoveChain {
                day: self.day,
                origin: self.origin.to_string(),
                moves: partial,
            };
            if chain_keeps_quota(self.roster, &chain, self.required) {
                out.push(chain);
            }
            return;
        }

        for (staff, row) in self.roster.iter().enumerate() {
            let Some(current) = row.assignment.get(self.day).and_then(Slot::as_location) else {
                continue;
            };
            if partial.is_empty() && current != self.origin {
                continue;
            }

            for target in self.locations {
                if target == current {
                    continue;
                }
                let key = (staff, current.to_string(), target.clone(), remaining);
                if !visited.insert(key) {
                    continue;
                }
                if !can_move_to_location(row, target, self.day, self.required) {
                    continue;
                }

                let mut next = partial.clone();
                next.push(Move {
                    staff,
                    from: current.to_string(),
                    to: target.clone(),
                });
                self.extend(next, remaining - 1, visited, out);
            }
        }
    }
}

/// Simule la chaîne sur une copie : toutes les personnes doivent garder le quota exact.
pub fn chain_keeps_quota(roster: &[StaffAssignment], chain: &MoveChain, required: usize) -> bool {
    chain
        .apply(roster)
        .iter()
        .all(|row| count_unique_locations(&row.assignment) == required)
}

/// Classe les chaînes : premier déplacement conforme au quota d'abord, puis
/// site d'arrivée le moins chargé.
pub fn rank_move_chains(
    chains: &mut [MoveChain],
    roster: &[StaffAssignment],
    counts: &DayCounts,
    required: usize,
) {
    chains.sort_by_key(|chain| {
        let keeps = chain.moves.first().is_some_and(|mv| {
            can_move_to_location(&roster[mv.staff], &mv.to, chain.day, required)
        });
        let load = chain.destination().map_or(0, |to| counts.get(to));
        (!keeps, load)
    });
}
