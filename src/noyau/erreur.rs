// src/noyau/erreur.rs
//
// Taxonomie des échecs d’évaluation.
// - Syntaxe     : expression canonique mal formée (rejetée avant tout calcul)
// - Domaine     : argument hors domaine détecté structurellement (factorielle)
// - Indetermine : calcul terminé mais valeur non finie (±∞, NaN)
//
// Aucun échec ne traverse `evaluer` autrement que par ce type.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurEval {
    #[error("erreur de syntaxe : {0}")]
    Syntaxe(String),

    #[error("hors domaine : {fonction}({argument})")]
    Domaine { fonction: &'static str, argument: f64 },

    #[error("résultat non fini : {0}")]
    Indetermine(f64),
}

impl ErreurEval {
    pub fn syntaxe(msg: impl Into<String>) -> Self {
        ErreurEval::Syntaxe(msg.into())
    }

    /// Étiquette courte (logs, tests).
    pub fn genre(&self) -> &'static str {
        match self {
            ErreurEval::Syntaxe(_) => "syntaxe",
            ErreurEval::Domaine { .. } => "domaine",
            ErreurEval::Indetermine(_) => "indéterminé",
        }
    }
}
