//! src/app/etat.rs
//!
//! État de session (sans affichage).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat affiché, erreur,
//! mode d’angle, précision, mémoire, historique) et offrir les actions des touches
//! (C/AC, DEL, =, DEG/RAD, MC/MR/M+/M-/MS) sans logique d’affichage.
//!
//! Contrats :
//! - Le noyau reste sans état : l’environnement est reconstruit à chaque appel.
//! - Sur échec, l’entrée est conservée telle quelle (l’utilisateur corrige).
//! - Bornes : précision (digits) et taille de l’historique.
//! - La mémoire reste finie : un M+/M- qui déborderait est refusé.

use std::collections::VecDeque;

use thiserror::Error;
use tracing::debug;

use crate::noyau::{
    calculer, formater_resultat, DemarcheNoyau, Environnement, ErreurEval, ModeAngle,
    DIGITS_DEFAUT, DIGITS_MAX,
};

/// Nombre d’entrées conservées (les plus anciennes sont retirées).
pub const HISTORIQUE_MAX: usize = 100;

/// Préfixes retirés d’un coup par DEL (les plus longs d’abord : "asin(" avant "sin(").
const MOTIFS_DEL: [&str; 11] = [
    "factorial(",
    "sqrt(",
    "asin(",
    "acos(",
    "atan(",
    "sin(",
    "cos(",
    "tan(",
    "log(",
    "ln(",
    "pi",
];

/// Refus d’une touche mémoire (MS, M+, M-, MR).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ErreurMemoire {
    #[error("aucun résultat à mémoriser")]
    AucunResultat,

    #[error("mémoire hors limites : opération refusée")]
    Debordement,

    #[error("mémoire non finie")]
    NonFinie,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EntreeHistorique {
    pub expression: String,
    pub resultat: String,
    pub valeur: f64,
}

#[derive(Clone, Debug)]
pub struct Session {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub affichage: String, // résultat formaté (vide si rien à lire)
    pub erreur: String,    // message d’erreur (si parsing/éval échoue)
    pub derniere_valeur: Option<f64>,

    // --- démarche (normalisation, jetons, RPN, arbre) ---
    pub demarche: DemarcheNoyau,

    // --- paramètres ---
    pub mode_angle: ModeAngle,
    pub digits: usize,

    // --- mémoire + historique ---
    pub memoire: f64,
    pub historique: VecDeque<EntreeHistorique>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            entree: String::new(),
            affichage: String::new(),
            erreur: String::new(),
            derniere_valeur: None,
            demarche: DemarcheNoyau::default(),
            mode_angle: ModeAngle::default(),
            digits: DIGITS_DEFAUT,
            memoire: 0.0,
            historique: VecDeque::new(),
        }
    }
}

impl Session {
    pub fn environnement(&self) -> Environnement {
        Environnement::new(self.mode_angle, self.digits)
    }

    /* ------------------------ Saisie ------------------------ */

    pub fn inserer(&mut self, txt: &str) {
        self.entree.push_str(txt);
    }

    /// Backspace “intelligent” : retire d’un coup les motifs utiles ("sin(", "pi", etc.).
    pub fn backspace_entree(&mut self) {
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        if let Some(pat) = MOTIFS_DEL.iter().find(|p| self.entree.ends_with(**p)) {
            let garde = self.entree.len() - pat.len();
            self.entree.truncate(garde);
        } else {
            self.entree.pop();
        }

        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
    }

    /* ------------------------ Actions “touches” ------------------------ */

    /// AC : remise à zéro (entrée + résultats + réglages), mémoire et historique conservés.
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.digits = DIGITS_DEFAUT;
        self.mode_angle = ModeAngle::default();
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
    }

    /// CLR : effacer résultat + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.affichage.clear();
        self.erreur.clear();
        self.derniere_valeur = None;
        self.demarche = DemarcheNoyau::default();
    }

    /// Utilitaire : placer une erreur.
    ///
    /// Choix UX :
    /// - On CONSERVE l’entrée pour que l’utilisateur puisse la corriger.
    /// - On coupe le résultat et la démarche (non fiables si l’évaluation échoue).
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.affichage.clear();
        self.derniere_valeur = None;
        self.demarche = DemarcheNoyau::default();
    }

    /// "=" : évalue l’entrée et l’ajoute à l’historique en cas de succès.
    pub fn evaluer(&mut self) -> Result<f64, ErreurEval> {
        self.recalculer(true)
    }

    fn recalculer(&mut self, historiser: bool) -> Result<f64, ErreurEval> {
        let env = self.environnement();

        let calcul = match calculer(&self.entree, env) {
            Ok(c) => c,
            Err(e) => {
                debug!(entree = %self.entree, genre = e.genre(), "échec d’évaluation");
                self.set_erreur(e.to_string());
                return Err(e);
            }
        };

        let valeur = calcul.valeur;
        let resultat = formater_resultat(valeur, self.digits).unwrap_or_default();

        if historiser {
            self.historiser(EntreeHistorique {
                expression: calcul.demarche.brut.clone(),
                resultat: resultat.clone(),
                valeur,
            });
        }

        self.erreur.clear();
        self.affichage = resultat;
        self.derniere_valeur = Some(valeur);
        self.demarche = calcul.demarche;

        Ok(valeur)
    }

    /// Ré-évalue seulement si un résultat est affiché (changement de réglage).
    fn rafraichir(&mut self) {
        if self.derniere_valeur.is_some() && !self.entree.trim().is_empty() {
            // une erreur ici est déjà déposée dans `self.erreur`
            let _ = self.recalculer(false);
        }
    }

    /* ------------------------ Réglages ------------------------ */

    pub fn set_mode_angle(&mut self, mode: ModeAngle) {
        self.mode_angle = mode;
        debug!(mode = %mode, "mode d’angle");
        self.rafraichir();
    }

    pub fn basculer_mode_angle(&mut self) {
        self.set_mode_angle(self.mode_angle.bascule());
    }

    /// Garde-fou : limite digits (évite abus / gel plus tard).
    pub fn set_digits(&mut self, digits: usize) {
        self.digits = digits.min(DIGITS_MAX);
        debug!(digits = self.digits, "précision");
        self.rafraichir();
    }

    /* ------------------------ Mémoire ------------------------ */

    /// MC
    pub fn memoire_effacer(&mut self) {
        self.memoire = 0.0;
    }

    /// MR : insère la valeur mémoire dans l’entrée.
    ///
    /// Négative, elle est parenthésée ; collée à une valeur (chiffre, ')' ou pi),
    /// un '*' explicite la précède : "2" + (-5) -> "2*(-5)", "2" + 5 -> "2*5".
    pub fn memoire_rappel(&mut self) -> Result<(), ErreurMemoire> {
        let txt = formater_resultat(self.memoire, self.digits).ok_or(ErreurMemoire::NonFinie)?;
        let txt = if txt.starts_with('-') {
            format!("({txt})")
        } else {
            txt
        };

        let fin = self.entree.trim_end();
        let longueur = fin.len();
        let apres_valeur = fin.ends_with(|c: char| c.is_ascii_digit() || c == ')' || c == 'π')
            || fin.to_lowercase().ends_with("pi");

        if apres_valeur {
            self.entree.truncate(longueur);
            self.entree.push('*');
        }

        self.entree.push_str(&txt);
        Ok(())
    }

    /// MS : mémorise le dernier résultat.
    pub fn memoire_stocker(&mut self) -> Result<(), ErreurMemoire> {
        let v = self.derniere_valeur.ok_or(ErreurMemoire::AucunResultat)?;
        self.memoire = v;
        Ok(())
    }

    /// M+ : ajoute le dernier résultat (refusé si la somme n’est plus finie).
    pub fn memoire_ajouter(&mut self) -> Result<(), ErreurMemoire> {
        let v = self.derniere_valeur.ok_or(ErreurMemoire::AucunResultat)?;
        self.memoire_cumuler(v)
    }

    /// M- : soustrait le dernier résultat (refusé si la différence n’est plus finie).
    pub fn memoire_soustraire(&mut self) -> Result<(), ErreurMemoire> {
        let v = self.derniere_valeur.ok_or(ErreurMemoire::AucunResultat)?;
        self.memoire_cumuler(-v)
    }

    fn memoire_cumuler(&mut self, v: f64) -> Result<(), ErreurMemoire> {
        let m = self.memoire + v;
        if !m.is_finite() {
            debug!(memoire = self.memoire, valeur = v, "mémoire : débordement refusé");
            return Err(ErreurMemoire::Debordement);
        }
        self.memoire = m;
        Ok(())
    }

    /* ------------------------ Historique ------------------------ */

    fn historiser(&mut self, e: EntreeHistorique) {
        if self.historique.len() >= HISTORIQUE_MAX {
            self.historique.pop_front();
        }
        self.historique.push_back(e);
    }

    /// Remet l’expression n° `index` (0 = la plus ancienne) dans l’entrée.
    pub fn rappeler(&mut self, index: usize) -> bool {
        match self.historique.get(index) {
            Some(e) => {
                self.entree = e.expression.clone();
                true
            }
            None => false,
        }
    }

    pub fn vider_historique(&mut self) {
        self.historique.clear();
    }
}
