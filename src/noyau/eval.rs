//! Noyau — évaluation (pipeline réel)
//!
//! normaliser -> tokenize -> RPN -> pile de valeurs -> contrôle de finitude
//!
//! L’évaluation parcourt la RPN avec une pile (aucune récursion, quelle que soit la
//! longueur des chaînes). L’arbre Expr ne sert qu’à la démarche de `calculer`.
//! Chaque appel est autonome, l’environnement (mode d’angle) arrive par valeur.
//! Aucun échec ne sort autrement que par `ErreurEval`.

use std::f64::consts::PI;

use tracing::debug;

use super::environnement::{Environnement, ModeAngle};
use super::erreur::ErreurEval;
use super::expr::{Fonction, NOM_FACTORIELLE};
use super::jetons::{format_tokens, tokenize, Tok};
use super::normalisation::normaliser;
use super::rpn::{from_rpn, to_rpn};

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub brut: String,
    pub canonique: String,
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
}

/// Résultat complet d’un calcul : valeur finie + démarche.
#[derive(Clone, Debug)]
pub struct Calcul {
    pub valeur: f64,
    pub demarche: DemarcheNoyau,
}

/// Texte de démarche quand l’arbre dépasse la borne d’affichage.
const ARBRE_NON_AFFICHE: &str = "(arbre trop profond pour l’affichage)";

/// API publique : évalue une expression DÉJÀ canonique.
pub fn evaluer(canonique: &str, env: Environnement) -> Result<f64, ErreurEval> {
    let res = analyser(canonique).and_then(|(_, rpn)| evaluer_rpn(&rpn, env));

    match &res {
        Ok(v) => debug!(canonique = canonique, valeur = *v, mode = %env.mode_angle, "évaluation"),
        Err(e) => debug!(canonique = canonique, genre = e.genre(), erreur = %e, "évaluation refusée"),
    }
    res
}

/// API publique : saisie calculatrice -> valeur, avec la démarche complète.
pub fn calculer(brut: &str, env: Environnement) -> Result<Calcul, ErreurEval> {
    let s = brut.trim();
    if s.is_empty() {
        return Err(ErreurEval::syntaxe("Entrée vide"));
    }

    let canonique = normaliser(s);
    let (jetons, rpn) = analyser(&canonique)?;
    let valeur = evaluer_rpn(&rpn, env)?;

    let arbre = match from_rpn(&rpn) {
        Ok(a) => a.to_string(),
        Err(_) => ARBRE_NON_AFFICHE.to_string(),
    };

    debug!(brut = s, canonique = %canonique, valeur = valeur, "calcul");

    Ok(Calcul {
        valeur,
        demarche: DemarcheNoyau {
            brut: s.to_string(),
            canonique,
            jetons: format_tokens(&jetons),
            rpn: format_tokens(&rpn),
            arbre,
        },
    })
}

/// Jetons + RPN (toutes les erreurs ici sont des erreurs de syntaxe).
fn analyser(canonique: &str) -> Result<(Vec<Tok>, Vec<Tok>), ErreurEval> {
    let jetons = tokenize(canonique)?;
    let rpn = to_rpn(&jetons)?;
    Ok((jetons, rpn))
}

/// Parcours de la RPN + contrôle final : seule la valeur finale est inspectée.
fn evaluer_rpn(rpn: &[Tok], env: Environnement) -> Result<f64, ErreurEval> {
    let mut pile: Vec<f64> = Vec::with_capacity(rpn.len());

    for tok in rpn {
        let v = match tok {
            Tok::Num(v) => *v,
            Tok::Pi => PI,

            // sémantique IEEE : pas de cas particulier pour /0
            Tok::Plus => binaire(&mut pile, |a, b| a + b)?,
            Tok::Minus => binaire(&mut pile, |a, b| a - b)?,
            Tok::Star => binaire(&mut pile, |a, b| a * b)?,
            Tok::Slash => binaire(&mut pile, |a, b| a / b)?,
            Tok::Caret => binaire(&mut pile, f64::powf)?,

            Tok::Neg => -depiler(&mut pile)?,

            Tok::Appel { nom, nb_args } => {
                if *nb_args != 1 {
                    return Err(ErreurEval::syntaxe(format!(
                        "{nom} attend 1 argument, reçu {nb_args}"
                    )));
                }
                let x = depiler(&mut pile)?;
                if nom == NOM_FACTORIELLE {
                    factorielle(x)?
                } else {
                    let f = Fonction::depuis_nom(nom)
                        .ok_or_else(|| ErreurEval::syntaxe(format!("fonction inconnue: {nom}")))?;
                    appliquer(f, x, env.mode_angle)
                }
            }

            Tok::Ident(_) | Tok::LPar | Tok::RPar | Tok::Virgule => {
                return Err(ErreurEval::syntaxe("jeton inattendu en RPN"));
            }
        };
        pile.push(v);
    }

    let v = match pile.as_slice() {
        [v] => *v,
        _ => return Err(ErreurEval::syntaxe("expression invalide")),
    };

    if v.is_finite() {
        Ok(v)
    } else {
        Err(ErreurEval::Indetermine(v))
    }
}

fn depiler(pile: &mut Vec<f64>) -> Result<f64, ErreurEval> {
    pile.pop().ok_or_else(|| ErreurEval::syntaxe("opérande manquant"))
}

fn binaire(pile: &mut Vec<f64>, op: fn(f64, f64) -> f64) -> Result<f64, ErreurEval> {
    let b = depiler(pile)?;
    let a = depiler(pile)?;
    Ok(op(a, b))
}

/// Factorielle itérative 2×3×…×n (1 pour 0 et 1).
/// Domaine : entiers >= 0. Le débordement donne +∞ (signalé plus haut comme non fini).
fn factorielle(x: f64) -> Result<f64, ErreurEval> {
    if !x.is_finite() || x < 0.0 || x.fract() != 0.0 {
        return Err(ErreurEval::Domaine {
            fonction: NOM_FACTORIELLE,
            argument: x,
        });
    }

    let mut acc = 1.0_f64;
    let mut k = 2.0_f64;
    while k <= x {
        acc *= k;
        if acc.is_infinite() {
            break;
        }
        k += 1.0;
    }
    Ok(acc)
}

fn appliquer(f: Fonction, x: f64, mode: ModeAngle) -> f64 {
    use Fonction::*;

    match f {
        // trig directe : l’argument est un angle
        Sin => mode.vers_radians(x).sin(),
        Cos => mode.vers_radians(x).cos(),
        Tan => mode.vers_radians(x).tan(),

        // trig inverse : l’argument est un rapport, le résultat un angle
        Asin => mode.depuis_radians(x.asin()),
        Acos => mode.depuis_radians(x.acos()),
        Atan => mode.depuis_radians(x.atan()),

        Log => x.log10(),
        Ln => x.ln(),
        Sqrt => x.sqrt(),
    }
}
