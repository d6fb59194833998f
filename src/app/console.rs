// src/app/console.rs
//
// Console ligne
// -------------
// - Chaque ligne est une expression (évaluée avec le mode d’angle courant)
//   ou une commande préfixée par ':' (réglages, mémoire, historique).
// - Ligne vide, Ctrl-C ou Ctrl-D : sortie.
//
// `executer` ne fait aucune E/S : la boucle `lancer` se contente d’afficher sa réponse.

use rustyline::{error::ReadlineError, Config, DefaultEditor};

use super::etat::{ErreurMemoire, Session};
use crate::noyau::{formater_resultat, ModeAngle};

const AIDE: &str = "\
Expressions : 2×π+sin(30), 2(3+4), 5!, 2^3^2, asin(1), log(1000), ln(2), sqrt(2)
Commandes :
  :deg / :rad       mode d’angle
  :prec N           chiffres après la virgule
  :ms :m+ :m- :mc   mémoire (dernier résultat)
  :mr               reprendre la mémoire comme entrée
  :hist             historique
  :rappel N         ré-évaluer l’entrée n° N de l’historique
  :effacer          vider l’historique
  :demarche         détail du dernier calcul
  :ac               remise à zéro (mémoire et historique conservés)
  :aide  :quitter";

#[derive(Clone, Debug, PartialEq)]
pub enum Reponse {
    Texte(String),
    Quitter,
}

/// Boucle interactive.
pub fn lancer() -> rustyline::Result<()> {
    let config = Config::builder().build();
    let mut rl = DefaultEditor::with_config(config)?;
    let mut session = Session::default();

    println!("Calculatrice scientifique — :aide pour la liste des commandes");

    loop {
        let invite = format!("[{}] > ", session.mode_angle);
        match rl.readline(&invite) {
            Ok(ligne) => {
                let ligne = ligne.trim();
                if ligne.is_empty() {
                    println!("Au revoir !");
                    break;
                }
                rl.add_history_entry(ligne)?;

                match executer(&mut session, ligne) {
                    Reponse::Texte(t) => println!("{t}"),
                    Reponse::Quitter => break,
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        }
    }

    Ok(())
}

/// Traite une ligne (expression ou commande) et renvoie le texte à afficher.
pub fn executer(session: &mut Session, ligne: &str) -> Reponse {
    let ligne = ligne.trim();

    let Some(commande) = ligne.strip_prefix(':') else {
        session.clear_entree();
        session.inserer(ligne);
        return Reponse::Texte(resultat_courant(session));
    };

    let mut mots = commande.split_whitespace();
    let nom = mots.next().unwrap_or("").to_lowercase();
    let argument = mots.next();

    let texte = match nom.as_str() {
        "quitter" | "q" => return Reponse::Quitter,
        "aide" | "h" => AIDE.to_string(),

        "deg" => {
            session.set_mode_angle(ModeAngle::Degres);
            reglage(session, "mode DEG")
        }
        "rad" => {
            session.set_mode_angle(ModeAngle::Radians);
            reglage(session, "mode RAD")
        }
        "prec" => match argument.and_then(|a| a.parse::<usize>().ok()) {
            Some(n) => {
                session.set_digits(n);
                let msg = format!("précision : {} chiffres", session.digits);
                reglage(session, &msg)
            }
            None => "précision invalide (ex: :prec 6)".to_string(),
        },

        "ms" => memoire(session, Session::memoire_stocker),
        "m+" => memoire(session, Session::memoire_ajouter),
        "m-" => memoire(session, Session::memoire_soustraire),
        "mc" => {
            session.memoire_effacer();
            texte_memoire(session)
        }
        "mr" => {
            let precedente = std::mem::take(&mut session.entree);
            match session.memoire_rappel() {
                Ok(()) => resultat_courant(session),
                Err(e) => {
                    session.entree = precedente;
                    e.to_string()
                }
            }
        }

        "hist" => {
            if session.historique.is_empty() {
                "historique vide".to_string()
            } else {
                session
                    .historique
                    .iter()
                    .enumerate()
                    .map(|(i, e)| format!("{i:>3}: {} = {}", e.expression, e.resultat))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        "rappel" => match argument.and_then(|a| a.parse::<usize>().ok()) {
            Some(i) if session.rappeler(i) => resultat_courant(session),
            _ => "entrée d’historique introuvable".to_string(),
        },
        "effacer" => {
            session.vider_historique();
            "historique vidé".to_string()
        }

        "demarche" => {
            let d = &session.demarche;
            if d.brut.is_empty() {
                "aucun calcul".to_string()
            } else {
                format!(
                    "saisie    : {}\ncanonique : {}\njetons    : {}\nRPN       : {}\narbre     : {}",
                    d.brut, d.canonique, d.jetons, d.rpn, d.arbre
                )
            }
        }

        "ac" => {
            session.reset_total();
            "remise à zéro".to_string()
        }

        _ => format!("commande inconnue : :{nom} (:aide)"),
    };

    Reponse::Texte(texte)
}

/// "=" sur l’entrée courante.
fn resultat_courant(session: &mut Session) -> String {
    match session.evaluer() {
        Ok(_) => format!("= {}", session.affichage),
        Err(_) => format!("Erreur : {}", session.erreur),
    }
}

/// Message de réglage + résultat ré-évalué s’il y en a un.
fn reglage(session: &Session, msg: &str) -> String {
    if !session.affichage.is_empty() {
        format!("{msg}\n= {}", session.affichage)
    } else if !session.erreur.is_empty() {
        format!("{msg}\nErreur : {}", session.erreur)
    } else {
        msg.to_string()
    }
}

fn memoire(
    session: &mut Session,
    action: fn(&mut Session) -> Result<(), ErreurMemoire>,
) -> String {
    match action(session) {
        Ok(()) => texte_memoire(session),
        Err(e) => e.to_string(),
    }
}

fn texte_memoire(session: &Session) -> String {
    match formater_resultat(session.memoire, session.digits) {
        Some(m) => format!("M = {m}"),
        None => format!("M : {}", ErreurMemoire::NonFinie),
    }
}
