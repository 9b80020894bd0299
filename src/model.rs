use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Valeur sentinelle d'indisponibilité.
pub const OOF: &str = "OOF";
/// Valeur sentinelle du jour fixe, résolue au rendu.
pub const FIXED: &str = "X";

/// Jour ouvré de la semaine (lundi → vendredi).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    /// La semaine complète, dans l'ordre.
    pub const WEEK: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DayParseError {
    #[error("unknown weekday: {0}")]
    Unknown(String),
    #[error("not a working day: {0}")]
    Weekend(String),
}

impl TryFrom<Weekday> for Day {
    type Error = DayParseError;

    fn try_from(value: Weekday) -> Result<Self, Self::Error> {
        match value {
            Weekday::Mon => Ok(Day::Monday),
            Weekday::Tue => Ok(Day::Tuesday),
            Weekday::Wed => Ok(Day::Wednesday),
            Weekday::Thu => Ok(Day::Thursday),
            Weekday::Fri => Ok(Day::Friday),
            Weekday::Sat | Weekday::Sun => Err(DayParseError::Weekend(value.to_string())),
        }
    }
}

impl From<Day> for Weekday {
    fn from(day: Day) -> Self {
        match day {
            Day::Monday => Weekday::Mon,
            Day::Tuesday => Weekday::Tue,
            Day::Wednesday => Weekday::Wed,
            Day::Thursday => Weekday::Thu,
            Day::Friday => Weekday::Fri,
        }
    }
}

impl FromStr for Day {
    type Err = DayParseError;

    /// Accepte les noms complets ou abrégés (`Monday`, `mon`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let weekday: Weekday = raw
            .parse()
            .map_err(|_| DayParseError::Unknown(raw.to_string()))?;
        Day::try_from(weekday)
    }
}

/// Contenu d'une case de la grille : un site, `OOF` ou `X`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "String", into = "String")
)]
pub enum Slot {
    Location(String),
    Oof,
    Fixed,
}

impl Slot {
    pub fn location<S: Into<String>>(name: S) -> Self {
        Slot::from(name.into())
    }

    /// Nom du site si la case en porte un.
    pub fn as_location(&self) -> Option<&str> {
        match self {
            Slot::Location(name) => Some(name),
            Slot::Oof | Slot::Fixed => None,
        }
    }

    pub fn is_oof(&self) -> bool {
        matches!(self, Slot::Oof)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Slot::Location(name) => name,
            Slot::Oof => OOF,
            Slot::Fixed => FIXED,
        }
    }
}

impl From<String> for Slot {
    fn from(value: String) -> Self {
        match value.as_str() {
            OOF => Slot::Oof,
            FIXED => Slot::Fixed,
            _ => Slot::Location(value),
        }
    }
}

impl From<&str> for Slot {
    fn from(value: &str) -> Self {
        Slot::from(value.to_string())
    }
}

impl From<Slot> for String {
    fn from(slot: Slot) -> Self {
        match slot {
            Slot::Location(name) => name,
            Slot::Oof => OOF.to_string(),
            Slot::Fixed => FIXED.to_string(),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ligne de la grille : une valeur par jour de la liste courante.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StaffAssignment {
    pub staff: String,
    pub assignment: Vec<Slot>,
}

impl StaffAssignment {
    pub fn new<S: Into<String>>(staff: S, assignment: Vec<Slot>) -> Self {
        Self {
            staff: staff.into(),
            assignment,
        }
    }
}

/// Grille complète (jours + lignes par personne).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RosterGrid {
    pub days: Vec<Day>,
    pub roster: Vec<StaffAssignment>,
}

/// Jours d'indisponibilité par personne.
pub type OofPreferences = BTreeMap<String, BTreeSet<Day>>;

/// Entrées d'une génération.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RosterInputs {
    pub staff: Vec<String>,
    pub locations: Vec<String>,
    pub weekly_locations_required: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub oof_preferences: OofPreferences,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fixed_day: Option<Day>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fixed_day_location: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("staff list is empty")]
    NoStaff,
    #[error("location list is empty")]
    NoLocations,
    #[error("empty name in {0} list")]
    EmptyName(&'static str),
    #[error("duplicate {0} name: {1}")]
    Duplicate(&'static str, String),
    #[error("weekly locations required must be in 1..={max}, got {got}")]
    QuotaOutOfRange { got: usize, max: usize },
    #[error("fixed day location is not a known location: {0}")]
    UnknownFixedLocation(String),
    #[error("OOF preferences reference unknown staff: {0}")]
    UnknownStaff(String),
}

impl RosterInputs {
    /// Vérifie la forme des entrées (ce que la couche appelante doit garantir).
    pub fn validate(&self) -> Result<(), InputError> {
        if self.staff.is_empty() {
            return Err(InputError::NoStaff);
        }
        if self.locations.is_empty() {
            return Err(InputError::NoLocations);
        }
        check_names("staff", &self.staff)?;
        check_names("location", &self.locations)?;
        if self.weekly_locations_required == 0
            || self.weekly_locations_required > self.locations.len()
        {
            return Err(InputError::QuotaOutOfRange {
                got: self.weekly_locations_required,
                max: self.locations.len(),
            });
        }
        if let Some(loc) = &self.fixed_day_location {
            if self.fixed_day.is_some() && !self.locations.contains(loc) {
                return Err(InputError::UnknownFixedLocation(loc.clone()));
            }
        }
        if let Some(name) = self
            .oof_preferences
            .keys()
            .find(|name| !self.staff.contains(name))
        {
            return Err(InputError::UnknownStaff(name.clone()));
        }
        Ok(())
    }

    pub fn is_oof(&self, staff: &str, day: Day) -> bool {
        self.oof_preferences
            .get(staff)
            .is_some_and(|days| days.contains(&day))
    }
}

fn check_names(kind: &'static str, names: &[String]) -> Result<(), InputError> {
    let mut seen = BTreeSet::new();
    for name in names {
        if name.trim().is_empty() || name == OOF || name == FIXED {
            return Err(InputError::EmptyName(kind));
        }
        if !seen.insert(name.as_str()) {
            return Err(InputError::Duplicate(kind, name.clone()));
        }
    }
    Ok(())
}

/// Site sans personne un jour donné.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmptySlot {
    pub day: Day,
    pub location: String,
}

/// Objet JSON `{"day":..,"location":..}` (rendu sans `serde_json`).
impl fmt::Display for EmptySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"day\":\"{}\",\"location\":\"", self.day)?;
        for c in self.location.chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                c if u32::from(c) < 0x20 => write!(f, "\\u{:04x}", u32::from(c))?,
                c => write!(f, "{c}")?,
            }
        }
        f.write_str("\"}")
    }
}

/// Faisabilité d'un jour : assez de personnes disponibles pour couvrir chaque site ?
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayFeasibility {
    pub day: Day,
    pub possible: bool,
    pub available_staff: usize,
    pub required_staff: usize,
    pub shortfall: usize,
}

impl DayFeasibility {
    pub fn new(day: Day, available_staff: usize, required_staff: usize) -> Self {
        Self {
            day,
            possible: available_staff >= required_staff,
            available_staff,
            required_staff,
            shortfall: required_staff.saturating_sub(available_staff),
        }
    }
}

/// Statistiques d'équilibrage.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BalanceStats {
    pub passes: usize,
    pub max_chain_length: usize,
    pub initial_score: f64,
    pub best_score: f64,
    /// Meilleur score connu à la fin de chaque passe.
    pub best_score_history: Vec<f64>,
}

/// Résultat d'une génération.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RosterResult {
    pub days: Vec<Day>,
    pub roster: Vec<StaffAssignment>,
    pub is_valid: bool,
    pub empty_locations: Vec<EmptySlot>,
    pub impossible_days: Vec<DayFeasibility>,
    pub message: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: BalanceStats,
}
