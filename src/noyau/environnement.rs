// src/noyau/environnement.rs
//
// Paramètres d’un appel d’évaluation, passés par valeur.
// Le noyau ne garde aucun état entre deux appels.

use std::f64::consts::PI;
use std::fmt;

/// Précision d’affichage par défaut (chiffres après la virgule).
pub const DIGITS_DEFAUT: usize = 10;

/// Garde-fou : précision maximale (anti-gel du formatage exact).
pub const DIGITS_MAX: usize = 200;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeAngle {
    #[default]
    Degres,
    Radians,
}

impl ModeAngle {
    /// Angle saisi -> radians (entrée des fonctions trig directes).
    pub fn vers_radians(self, x: f64) -> f64 {
        match self {
            ModeAngle::Degres => x * PI / 180.0,
            ModeAngle::Radians => x,
        }
    }

    /// Radians -> angle affiché (sortie des fonctions trig inverses).
    pub fn depuis_radians(self, x: f64) -> f64 {
        match self {
            ModeAngle::Degres => x * 180.0 / PI,
            ModeAngle::Radians => x,
        }
    }

    pub fn bascule(self) -> ModeAngle {
        match self {
            ModeAngle::Degres => ModeAngle::Radians,
            ModeAngle::Radians => ModeAngle::Degres,
        }
    }
}

impl fmt::Display for ModeAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeAngle::Degres => write!(f, "DEG"),
            ModeAngle::Radians => write!(f, "RAD"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Environnement {
    pub mode_angle: ModeAngle,
    /// Indication pour l’appelant (formatage) ; l’évaluation ne l’utilise pas.
    pub precision: usize,
}

impl Environnement {
    pub fn new(mode_angle: ModeAngle, precision: usize) -> Self {
        Self {
            mode_angle,
            precision,
        }
    }

    pub fn degres() -> Self {
        Self::new(ModeAngle::Degres, DIGITS_DEFAUT)
    }

    pub fn radians() -> Self {
        Self::new(ModeAngle::Radians, DIGITS_DEFAUT)
    }
}

impl Default for Environnement {
    fn default() -> Self {
        Self::degres()
    }
}
