// src/noyau/jetons.rs

use super::erreur::ErreurEval;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Pi,

    // Noms de fonctions (et mots inconnus : le passage RPN les rejette).
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    LPar,
    RPar,
    Virgule,

    // Produits seulement par to_rpn (jamais par tokenize)
    Neg,
    Appel { nom: String, nb_args: usize },
}

/// Tokenize une expression canonique en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .5, 2.)
/// - opérateurs + - * / ^ et la virgule des arguments
/// - parenthèses ( )
/// - pi (ou π, casse libre)
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurEval> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            ',' => Some(Tok::Virgule),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            'π' => Some(Tok::Pi),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word.to_lowercase();

            if w == "pi" {
                out.push(Tok::Pi);
            } else {
                out.push(Tok::Ident(w));
            }
            continue;
        }

        // Nombre décimal : chiffres, au plus un point
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            let mut point_vu = false;
            while i < chars.len() && (chars[i].is_ascii_digit() || (chars[i] == '.' && !point_vu)) {
                if chars[i] == '.' {
                    point_vu = true;
                }
                i += 1;
            }
            let txt: String = chars[start..i].iter().collect();
            if txt == "." {
                return Err(ErreurEval::syntaxe("point décimal isolé"));
            }
            let v = txt
                .parse::<f64>()
                .map_err(|_| ErreurEval::syntaxe(format!("nombre invalide: {txt}")))?;
            out.push(Tok::Num(v));
            continue;
        }

        return Err(ErreurEval::syntaxe(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/// Format utilitaire (démarche / traces) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Pi => "π".to_string(),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Virgule => ",".to_string(),

            Tok::Neg => "neg".to_string(),
            Tok::Appel { nom, nb_args } => format!("{nom}/{nb_args}"),
        };
        out.push(s);
    }
    out.join(" ")
}
