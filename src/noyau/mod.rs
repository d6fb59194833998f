//! Noyau de calcul (sans état, sans affichage)
//!
//! Organisation interne :
//! - normalisation.rs : saisie calculatrice -> texte canonique (×, ÷, π, **, n!, 2(…), 2π)
//! - jetons.rs        : tokenisation
//! - rpn.rs           : shunting-yard + construction Expr (bornes de profondeur)
//! - expr.rs          : arbre d’expression + fonctions reconnues
//! - environnement.rs : mode d’angle + précision, passés à chaque appel
//! - eval.rs          : pipeline complet + contrôle de finitude
//! - erreur.rs        : Syntaxe / Domaine / Indéterminé
//! - lecture.rs       : affichage décimal exact (arrondi, zéros retirés)

pub mod environnement;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod jetons;
pub mod lecture;
pub mod normalisation;
pub mod rpn;

#[cfg(test)]
mod tests_scientifiques;


#[cfg(test)]
mod tests_proprietes;

// API publique minimale
pub use environnement::{Environnement, ModeAngle, DIGITS_DEFAUT, DIGITS_MAX};
pub use erreur::ErreurEval;
pub use eval::{calculer, evaluer, Calcul, DemarcheNoyau};
pub use lecture::formater_resultat;
pub use normalisation::normaliser;
