//! Calculatrice scientifique : normalisation de la saisie + évaluation.
//!
//! ```
//! use calculatrice_sci::{calculer, formater_resultat, Environnement};
//!
//! let c = calculer("2×π+5!", Environnement::degres()).unwrap();
//! assert_eq!(c.demarche.canonique, "2*pi+factorial(5)");
//! assert_eq!(formater_resultat(c.valeur, 4).unwrap(), "126.2832");
//! ```

pub mod app;
pub mod noyau;

pub use noyau::{
    calculer, evaluer, formater_resultat, normaliser, Calcul, DemarcheNoyau, Environnement,
    ErreurEval, ModeAngle,
};
