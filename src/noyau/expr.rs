// src/noyau/expr.rs
//
// Arbre d’expression (flottants double précision).
// - Nombre : littéral
// - Pi     : constante π
// - Add/Sub/Mul/Div/Pow : opérateurs binaires (ordre des opérandes conservé)
// - Neg / Fact : opérateurs unaires (moins unaire, factorielle)
// - Appel : fonction intégrée à un argument
//
// L’arbre appartient à l’appel d’évaluation qui l’a construit.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log,
    Ln,
    Sqrt,
}

impl Fonction {
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        use Fonction::*;
        let f = match nom {
            "sin" => Sin,
            "cos" => Cos,
            "tan" => Tan,
            "asin" => Asin,
            "acos" => Acos,
            "atan" => Atan,
            "log" => Log,
            "ln" => Ln,
            "sqrt" => Sqrt,
            _ => return None,
        };
        Some(f)
    }

    pub fn nom(self) -> &'static str {
        use Fonction::*;
        match self {
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Asin => "asin",
            Acos => "acos",
            Atan => "atan",
            Log => "log",
            Ln => "ln",
            Sqrt => "sqrt",
        }
    }
}

/// Nom canonique de la factorielle (forme produite par la normalisation).
pub const NOM_FACTORIELLE: &str = "factorial";

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Pi,

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),

    Neg(Box<Expr>),
    Fact(Box<Expr>),

    Appel(Fonction, Box<Expr>),
}

/* ------------------------ Affichage (démarche) ------------------------ */

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Nombre(v) => write!(f, "{v}"),
            Pi => write!(f, "π"),
            Add(a, b) => write!(f, "({a}+{b})"),
            Sub(a, b) => write!(f, "({a}-{b})"),
            Mul(a, b) => write!(f, "({a}*{b})"),
            Div(a, b) => write!(f, "({a}/{b})"),
            Pow(a, b) => write!(f, "({a}^{b})"),
            Neg(x) => write!(f, "-{x}"),
            Fact(x) => write!(f, "{NOM_FACTORIELLE}({x})"),
            Appel(g, x) => write!(f, "{}({x})", g.nom()),
        }
    }
}
