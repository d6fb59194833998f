// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> arbre
// Objectif:
// - Valider la grammaire canonique en un seul passage (état "on attend une valeur")
// - Convertir la suite de Tok en RPN (postfix)
// - Puis (pour la démarche seulement) reconstruire Expr
//
// Grammaire:
//   expr  := term (('+'|'-') term)*
//   term  := unary (('*'|'/') unary)*
//   unary := '-'? power
//   power := atom ('^' unary)?          (associatif à droite)
//   atom  := NOMBRE | pi | FONC '(' expr (',' expr)* ')' | '(' expr ')'
//
// Règles:
// - Moins unaire : '-' quand on attend une valeur => opérateur préfixe Neg
//   (précédence entre * / et ^ : "-2^2" = -(2^2), "2*-3" = 2*(-3))
// - Fonctions : la parenthèse d’appel ouvre un cadre qui compte ses arguments ;
//   la fermeture émet Appel { nom, nb_args } après contrôle de l’arité.
// - Une RPN sortie de to_rpn est valide : l’évaluation n’a plus de syntaxe à vérifier.
// - Garde-fous : imbrication des parenthèses bornée ; l’arbre de la démarche a sa
//   propre borne (les chaînes plates restent évaluables, elles ne passent pas par l’arbre).

use super::erreur::ErreurEval;
use super::expr::{Expr, Fonction, NOM_FACTORIELLE};
use super::jetons::Tok;

/// Imbrication maximale des parenthèses.
pub const PROFONDEUR_PARENTHESES_MAX: usize = 256;

/// Profondeur maximale de l’arbre construit pour la démarche (Display/Drop récursifs).
pub const PROFONDEUR_ARBRE_MAX: usize = 256;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

fn is_operateur(t: &Tok) -> bool {
    matches!(
        t,
        Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret | Tok::Neg
    )
}

fn is_fonction_ident(name: &str) -> bool {
    name == NOM_FACTORIELLE || Fonction::depuis_nom(name).is_some()
}

/// Une parenthèse ouverte : appel de fonction (avec son compte d’arguments) ou groupe.
struct Cadre {
    appel: Option<String>,
    nb_args: usize,
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Pi, Slash, Num(2), RPar]
///   rpn:    [Pi, Num(2), Slash, Appel { nom: "sin", nb_args: 1 }]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurEval> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();
    let mut cadres: Vec<Cadre> = Vec::new();

    // Vrai en début d’expression, après un opérateur, '(' ou ','.
    let mut attend_valeur = true;
    let mut neg_precedent = false;

    let mut it = tokens.iter().cloned().peekable();

    while let Some(tok) = it.next() {
        let unaire = attend_valeur && matches!(tok, Tok::Minus);

        match tok {
            Tok::Num(_) | Tok::Pi => {
                if !attend_valeur {
                    return Err(ErreurEval::syntaxe("valeur inattendue après une valeur"));
                }
                out.push(tok);
                attend_valeur = false;
            }

            Tok::Ident(name) => {
                if !attend_valeur {
                    return Err(ErreurEval::syntaxe(format!(
                        "fonction {name} inattendue après une valeur"
                    )));
                }
                if !is_fonction_ident(&name) {
                    return Err(ErreurEval::syntaxe(format!("fonction inconnue: {name}")));
                }
                if it.next_if(|t| matches!(t, Tok::LPar)).is_none() {
                    return Err(ErreurEval::syntaxe(format!(
                        "parenthèse attendue après {name}"
                    )));
                }
                ouvrir(&mut ops, &mut cadres, Some(name))?;
            }

            Tok::LPar => {
                if !attend_valeur {
                    return Err(ErreurEval::syntaxe("parenthèse ouvrante après une valeur"));
                }
                ouvrir(&mut ops, &mut cadres, None)?;
            }

            Tok::RPar => {
                if attend_valeur {
                    return Err(ErreurEval::syntaxe("expression attendue avant ')'"));
                }
                depiler_jusqu_a_lpar(&mut ops, &mut out)?;
                ops.pop();

                let cadre = cadres
                    .pop()
                    .ok_or_else(|| ErreurEval::syntaxe("parenthèse fermante sans ouvrante"))?;
                if let Some(nom) = cadre.appel {
                    if cadre.nb_args != 1 {
                        return Err(ErreurEval::syntaxe(format!(
                            "{nom} attend 1 argument, reçu {}",
                            cadre.nb_args
                        )));
                    }
                    out.push(Tok::Appel {
                        nom,
                        nb_args: cadre.nb_args,
                    });
                }

                attend_valeur = false;
            }

            Tok::Virgule => {
                if attend_valeur {
                    return Err(ErreurEval::syntaxe("argument vide"));
                }
                match cadres.last_mut() {
                    Some(c) if c.appel.is_some() => {
                        depiler_jusqu_a_lpar(&mut ops, &mut out)?;
                        c.nb_args += 1;
                    }
                    _ => return Err(ErreurEval::syntaxe("virgule hors d’un appel de fonction")),
                }
                attend_valeur = true;
            }

            Tok::Minus if attend_valeur => {
                // un seul moins unaire par opérande ("--" est réécrit en amont)
                if neg_precedent {
                    return Err(ErreurEval::syntaxe("moins unaire répété"));
                }
                // préfixe : ne dépile rien
                ops.push(Tok::Neg);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if attend_valeur {
                    return Err(ErreurEval::syntaxe(format!(
                        "opérateur '{}' sans opérande gauche",
                        symbole(&tok)
                    )));
                }

                // dépile tant que la précédence/associativité exige de sortir le haut
                // (arrêt sur '(' : ce n’est pas un opérateur)
                while let Some(top) = ops.last() {
                    if !is_operateur(top) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok);
                attend_valeur = true;
            }

            Tok::Neg | Tok::Appel { .. } => {
                return Err(ErreurEval::syntaxe("jeton interne inattendu"));
            }
        }

        neg_precedent = unaire;
    }

    if attend_valeur {
        return Err(if tokens.is_empty() {
            ErreurEval::syntaxe("expression vide")
        } else {
            ErreurEval::syntaxe("expression incomplète")
        });
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurEval::syntaxe("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

fn ouvrir(
    ops: &mut Vec<Tok>,
    cadres: &mut Vec<Cadre>,
    appel: Option<String>,
) -> Result<(), ErreurEval> {
    if cadres.len() >= PROFONDEUR_PARENTHESES_MAX {
        return Err(ErreurEval::syntaxe(format!(
            "imbrication trop profonde (max {PROFONDEUR_PARENTHESES_MAX})"
        )));
    }
    ops.push(Tok::LPar);
    cadres.push(Cadre { appel, nb_args: 1 });
    Ok(())
}

/// Sort les opérateurs jusqu’à la '(' courante (laissée sur la pile).
fn depiler_jusqu_a_lpar(ops: &mut Vec<Tok>, out: &mut Vec<Tok>) -> Result<(), ErreurEval> {
    loop {
        match ops.last() {
            Some(Tok::LPar) => return Ok(()),
            Some(_) => {
                if let Some(op) = ops.pop() {
                    out.push(op);
                }
            }
            None => return Err(ErreurEval::syntaxe("parenthèse fermante sans ouvrante")),
        }
    }
}

fn symbole(t: &Tok) -> &'static str {
    match t {
        Tok::Plus => "+",
        Tok::Minus => "-",
        Tok::Star => "*",
        Tok::Slash => "/",
        Tok::Caret => "^",
        _ => "?",
    }
}

/// Construit une Expr à partir d’une RPN (affichage de la démarche).
///
/// Refuse un arbre plus profond que `PROFONDEUR_ARBRE_MAX` : le parcours, l’affichage
/// et la libération d’un `Expr` sont récursifs.
/// - Appel { nom, nb_args } : une seule arité acceptée (1) pour toutes les fonctions
/// - factorial => Expr::Fact, sinon Expr::Appel
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, ErreurEval> {
    // (noeud, profondeur)
    let mut st: Vec<(Expr, usize)> = Vec::new();

    for tok in rpn.iter().cloned() {
        let noeud = match tok {
            Tok::Num(v) => (Expr::Nombre(v), 1),
            Tok::Pi => (Expr::Pi, 1),

            Tok::Plus => binaire(&mut st, Expr::Add)?,
            Tok::Minus => binaire(&mut st, Expr::Sub)?,
            Tok::Star => binaire(&mut st, Expr::Mul)?,
            Tok::Slash => binaire(&mut st, Expr::Div)?,
            Tok::Caret => binaire(&mut st, Expr::Pow)?,

            Tok::Neg => {
                let (x, p) = st.pop().ok_or_else(|| ErreurEval::syntaxe("expression invalide"))?;
                (Expr::Neg(Box::new(x)), p + 1)
            }

            Tok::Appel { nom, nb_args } => {
                if nb_args != 1 {
                    return Err(ErreurEval::syntaxe(format!(
                        "{nom} attend 1 argument, reçu {nb_args}"
                    )));
                }
                let (x, p) = st
                    .pop()
                    .ok_or_else(|| ErreurEval::syntaxe("fonction sans argument"))?;
                let e = if nom == NOM_FACTORIELLE {
                    Expr::Fact(Box::new(x))
                } else {
                    let f = Fonction::depuis_nom(&nom)
                        .ok_or_else(|| ErreurEval::syntaxe(format!("fonction inconnue: {nom}")))?;
                    Expr::Appel(f, Box::new(x))
                };
                (e, p + 1)
            }

            Tok::Ident(_) | Tok::LPar | Tok::RPar | Tok::Virgule => {
                return Err(ErreurEval::syntaxe("jeton inattendu en RPN"));
            }
        };

        if noeud.1 > PROFONDEUR_ARBRE_MAX {
            return Err(ErreurEval::syntaxe(format!(
                "arbre trop profond (max {PROFONDEUR_ARBRE_MAX})"
            )));
        }
        st.push(noeud);
    }

    if st.len() != 1 {
        return Err(ErreurEval::syntaxe("expression invalide"));
    }
    st.pop()
        .map(|(e, _)| e)
        .ok_or_else(|| ErreurEval::syntaxe("expression invalide"))
}

fn binaire(
    st: &mut Vec<(Expr, usize)>,
    fabrique: fn(Box<Expr>, Box<Expr>) -> Expr,
) -> Result<(Expr, usize), ErreurEval> {
    let (b, pb) = st.pop().ok_or_else(|| ErreurEval::syntaxe("expression invalide"))?;
    let (a, pa) = st.pop().ok_or_else(|| ErreurEval::syntaxe("expression invalide"))?;
    Ok((fabrique(Box::new(a), Box::new(b)), pa.max(pb) + 1))
}
