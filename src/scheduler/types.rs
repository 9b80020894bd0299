use crate::model::InputError;
use thiserror::Error;

/// Message de succès.
pub const SUCCESS_MESSAGE: &str = "Success: All locations have at least one person assigned.";
/// Message d'erreur de quota.
pub const QUOTA_MESSAGE: &str =
    "Error: Some staff members do not have the exact required number of unique locations";
/// Message renvoyé pour des entrées vides.
pub const INVALID_DATA_MESSAGE: &str = "Error: Invalid roster data";

/// Poids des termes du score (plus bas = meilleur).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub overload: f64,
    pub spread: f64,
    pub balance: f64,
    pub empty_location: f64,
    pub quota: f64,
    pub distribution: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            overload: 2000.0,
            spread: 50.0,
            balance: 50.0,
            empty_location: 1000.0,
            quota: 5000.0,
            distribution: 50.0,
        }
    }
}

/// Options d'équilibrage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceOptions {
    /// Passes improductives tolérées tant qu'un site reste surchargé.
    pub max_stuck_attempts: usize,
    /// Plafond absolu du nombre de passes.
    pub max_passes: usize,
    pub weights: ScoreWeights,
}

impl Default for BalanceOptions {
    fn default() -> Self {
        Self {
            max_stuck_attempts: 3,
            max_passes: 1000,
            weights: ScoreWeights::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid roster inputs: {0}")]
    InvalidInputs(#[from] InputError),
}
