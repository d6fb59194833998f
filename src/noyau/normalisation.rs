// src/noyau/normalisation.rs
//
// Notation calculatrice -> forme canonique
// ----------------------------------------
// Règles ordonnées (chacune passe sur toute la chaîne avant la suivante) :
// 1) × -> *, ÷ -> /, π -> pi, "--" -> "+" (exactement deux signes, sans généraliser)
// 2) ** -> ^ (l’exposant canonique est ^)
// 3) littéral numérique collé à ! -> factorial(littéral)
// 4) noms de fonctions (mots entiers, casse libre) -> préfixes d’appel "nom("
// 5) multiplication implicite : chiffre avant "(" ou avant pi
//
// Fonction totale : une entrée mal formée donne un texte que l’évaluateur rejettera.
// Limite connue : "(2+3)!" n’est PAS réécrit (seul un littéral peut précéder !).

use tracing::trace;

/// Mots reconnus comme fonctions (préfixes d’appel).
pub const FONCTIONS: [&str; 10] = [
    "log",
    "ln",
    "sqrt",
    "sin",
    "cos",
    "tan",
    "asin",
    "acos",
    "atan",
    "factorial",
];

/// Jeton canonique de la constante π.
pub const JETON_PI: &str = "pi";

/// API publique : réécrit une saisie calculatrice en forme canonique.
pub fn normaliser(brut: &str) -> String {
    let s1 = regle_symboles(brut);
    let s2 = regle_exposant(&s1);
    let s3 = regle_factorielle(&s2);
    let s4 = regle_fonctions(&s3);
    let s5 = regle_mult_implicite(&s4);

    trace!(brut = brut, canonique = %s5, "normalisation");
    s5
}

/* ------------------------ Règles ------------------------ */

fn regle_symboles(s: &str) -> String {
    s.replace('×', "*")
        .replace('÷', "/")
        .replace('π', JETON_PI)
        .replace("--", "+")
}

fn regle_exposant(s: &str) -> String {
    s.replace("**", "^")
}

/// `5!` -> `factorial(5)`, `2.5!` -> `factorial(2.5)`.
fn regle_factorielle(s: &str) -> String {
    let mut out: Vec<char> = Vec::with_capacity(s.len() + 16);

    for c in s.chars() {
        if c != '!' {
            out.push(c);
            continue;
        }

        // littéral maximal juste avant le '!'
        let mut debut = out.len();
        while debut > 0 && (out[debut - 1].is_ascii_digit() || out[debut - 1] == '.') {
            debut -= 1;
        }
        let litteral: String = out[debut..].iter().collect();

        // pas de chiffre (ex: ")!" ou ".!") : on laisse le '!' pour l’évaluateur
        if !litteral.chars().any(|ch| ch.is_ascii_digit()) || colle_a_un_mot(&out, debut) {
            out.push(c);
            continue;
        }

        out.truncate(debut);
        out.extend("factorial(".chars());
        out.extend(litteral.chars());
        out.push(')');
    }

    out.into_iter().collect()
}

/// Noms de fonctions en minuscules, collés à leur parenthèse.
fn regle_fonctions(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if !debut_de_mot(c) {
            out.push(c);
            i += 1;
            continue;
        }

        let debut = i;
        while i < chars.len() && dans_un_mot(chars[i]) {
            i += 1;
        }
        let mot: String = chars[debut..i].iter().collect();
        let minus = mot.to_lowercase();

        if minus == JETON_PI {
            out.push_str(JETON_PI);
            continue;
        }

        if !FONCTIONS.contains(&minus.as_str()) {
            // mot inconnu : laissé tel quel (rejeté plus tard)
            out.push_str(&mot);
            continue;
        }

        out.push_str(&minus);

        // "sin (" -> "sin("
        let mut j = i;
        while j < chars.len() && chars[j].is_whitespace() {
            j += 1;
        }
        if j < chars.len() && chars[j] == '(' {
            i = j;
        }
    }

    out
}

/// `2(3+4)` -> `2*(3+4)`, `2pi` -> `2*pi`.
fn regle_mult_implicite(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 8);
    let mut dans_mot = false;
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];
        out.push(c);

        // les chiffres d’un identifiant (ex: "log10") ne sont pas des nombres
        dans_mot = if dans_mot { dans_un_mot(c) } else { debut_de_mot(c) };

        if dans_mot || !c.is_ascii_digit() {
            i += 1;
            continue;
        }

        // chiffre puis (espaces) "(" : on insère * et on retire les espaces
        let mut j = i + 1;
        while j < chars.len() && chars[j].is_whitespace() {
            j += 1;
        }
        if j < chars.len() && chars[j] == '(' {
            out.push('*');
            i = j;
            continue;
        }

        // chiffre immédiatement suivi du jeton pi
        if commence_par_pi(&chars, i + 1) {
            out.push('*');
        }

        i += 1;
    }

    out
}

/* ------------------------ Outils ------------------------ */

fn debut_de_mot(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn dans_un_mot(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Vrai si le littéral qui commence à `debut` prolonge un identifiant (ex: "x2!").
fn colle_a_un_mot(out: &[char], debut: usize) -> bool {
    debut > 0 && dans_un_mot(out[debut - 1])
}

/// "pi" à la position `i`, en mot entier.
fn commence_par_pi(chars: &[char], i: usize) -> bool {
    let fin = i + 2;
    if fin > chars.len() {
        return false;
    }
    let mot: String = chars[i..fin].iter().collect();
    mot == JETON_PI && (fin == chars.len() || !dans_un_mot(chars[fin]))
}
