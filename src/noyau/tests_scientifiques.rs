//! Tests scientifiques (campagne) : propriétés du pipeline + limites contrôlées.
//!
//! But : vérifier les identités attendues d’une calculatrice sans faire chauffer la machine.
//! - budget temps global sur les boucles
//! - tailles bornées (profondeur, longueur) ; seules les parenthèses ont une limite,
//!   les chaînes plates s’évaluent sans récursion
//!
//! Notes :
//! - Les valeurs sont des f64 : comparaisons à 1e-9 sauf là où le calcul est exact
//!   (entiers < 2^53, puissances de 2).
//! - La factorielle ne s’applique qu’à un littéral : "(2+3)!" reste une erreur de syntaxe.

use std::time::{Duration, Instant};

use super::{calculer, evaluer, normaliser, Environnement, ErreurEval};

const EPS: f64 = 1e-9;

fn val(expr: &str, env: Environnement) -> f64 {
    calculer(expr, env)
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
        .valeur
}

fn deg(expr: &str) -> f64 {
    val(expr, Environnement::degres())
}

fn rad(expr: &str) -> f64 {
    val(expr, Environnement::radians())
}

fn erreur(expr: &str) -> ErreurEval {
    match calculer(expr, Environnement::degres()) {
        Ok(c) => panic!("expr={expr:?} devait échouer, valeur={}", c.valeur),
        Err(e) => e,
    }
}

fn assert_proche(expr: &str, obtenu: f64, attendu: f64) {
    assert!(
        (obtenu - attendu).abs() < EPS,
        "expr={expr:?} attendu={attendu} obtenu={obtenu}"
    );
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Exemples de référence ------------------------ */

#[test]
fn sci_exemples_de_reference() {
    assert_eq!(evaluer(&normaliser("2×3"), Environnement::degres()), Ok(6.0));
    assert_eq!(deg("2^3^2"), 512.0);
    assert_eq!(deg("5!"), 120.0);
    assert_eq!(deg("2(3+4)"), 14.0);
    assert_eq!(deg("5-2"), 3.0);
    assert_proche("2π", deg("2π"), 6.283185307);

    assert_proche("sin(90)", deg("sin(90)"), 1.0);
    assert_proche("sin(π/2)", rad("sin(π/2)"), 1.0);
    assert_proche("asin(1)", deg("asin(1)"), 90.0);
    assert_proche("asin(1)", rad("asin(1)"), std::f64::consts::FRAC_PI_2);
}

#[test]
fn sci_genres_d_erreur() {
    assert_eq!(erreur("(2+3)!").genre(), "syntaxe");
    assert_eq!(erreur("1/0").genre(), "indéterminé");
    assert_eq!(erreur("factorial(-3)").genre(), "domaine");
    assert_eq!(erreur("3.5!").genre(), "domaine");
}

/* ------------------------ Identités trigonométriques ------------------------ */

#[test]
fn sci_pythagore_degres() {
    let start = Instant::now();
    for a in (-720..=720).step_by(15) {
        let expr = format!("sin({a})^2+cos({a})^2");
        assert_proche(&expr, deg(&expr), 1.0);
        budget(start, Duration::from_secs(2));
    }
}

#[test]
fn sci_modes_coherents() {
    // sin(a°) = sin(a·π/180 rad), et asin revient à l’angle de départ
    for a in [-80, -45, -30, 0, 10, 30, 45, 60, 89] {
        let en_deg = deg(&format!("sin({a})"));
        let en_rad = rad(&format!("sin({a}*π/180)"));
        assert_proche(&format!("sin({a})"), en_deg, en_rad);

        let aller_retour = format!("asin(sin({a}))");
        assert_proche(&aller_retour, deg(&aller_retour), a as f64);
    }
}

#[test]
fn sci_symetries() {
    for a in [15, 30, 45, 60, 75] {
        let s = deg(&format!("sin({a})"));
        assert_proche("sin(-a)", deg(&format!("sin(-{a})")), -s);

        let c = deg(&format!("cos({a})"));
        assert_proche("cos(-a)", deg(&format!("cos(-{a})")), c);
    }
}

#[test]
fn sci_inverses_en_degres() {
    assert_proche("acos(-1)", deg("acos(-1)"), 180.0);
    assert_proche("atan(-1)", deg("atan(-1)"), -45.0);
    assert_proche("acos(0.5)", deg("acos(0.5)"), 60.0);
}

/* ------------------------ Logs / puissances ------------------------ */

#[test]
fn sci_log_decimal() {
    for k in 0..=12 {
        let expr = format!("log(10^{k})");
        assert_proche(&expr, deg(&expr), k as f64);
    }
}

#[test]
fn sci_ln_et_racine() {
    assert_proche("ln(1)", deg("ln(1)"), 0.0);
    assert_proche("ln(2)+ln(3)", deg("ln(2)+ln(3)"), deg("ln(6)"));
    assert_proche("sqrt(2)^2", deg("sqrt(2)^2"), 2.0);
}

#[test]
fn sci_puissances_de_deux_exactes() {
    for k in 0..=60 {
        assert_eq!(deg(&format!("2^{k}")), 2f64.powi(k), "k={k}");
    }
    assert_eq!(deg("2^-2"), 0.25);
    assert_eq!(deg("-2^2"), -4.0);
    assert_eq!(deg("(-2)^2"), 4.0);
}

/* ------------------------ Factorielle ------------------------ */

#[test]
fn sci_factorielle_recurrence() {
    // n! = n·(n−1)! ; exact tant que les produits restent < 2^53
    for n in 1..=18 {
        let gauche = deg(&format!("{n}!"));
        let droite = deg(&format!("{n}*{}!", n - 1));
        assert_eq!(gauche, droite, "n={n}");
    }
}

#[test]
fn sci_factorielle_limites() {
    assert!(deg("170!").is_finite());
    assert_eq!(erreur("171!").genre(), "indéterminé");
    assert_eq!(deg("-3!"), -6.0);
}

/* ------------------------ Multiplication implicite ------------------------ */

#[test]
fn sci_implicite_equivaut_au_produit() {
    for (implicite, explicite) in [
        ("3(4-1)", "3*(4-1)"),
        ("2 (5)", "2*(5)"),
        ("4π", "4*π"),
        ("0.5(8)", "0.5*(8)"),
        ("3pi/3", "3*pi/3"),
    ] {
        assert_eq!(deg(implicite), deg(explicite), "{implicite} vs {explicite}");
    }
}

/* ------------------------ Stress borné ------------------------ */

#[test]
fn sci_longues_chaines_plates() {
    let start = Instant::now();
    for n in [1_000, 1_100, 20_000] {
        let s = vec!["1"; n].join("+");
        assert_eq!(deg(&s), n as f64);

        let s = vec!["1"; n].join("*");
        assert_eq!(deg(&s), 1.0);
        budget(start, Duration::from_secs(3));
    }
}

#[test]
fn sci_parentheses_profondes_sous_la_borne() {
    let start = Instant::now();
    let n = 200;
    let s = format!("{}7{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(deg(&s), 7.0);
    budget(start, Duration::from_secs(2));
}

#[test]
fn sci_limites_refusees_proprement() {
    let start = Instant::now();

    let n = 5_000;
    let s = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(erreur(&s).genre(), "syntaxe");

    // chaîne plate bien formée : pas une erreur de syntaxe, 2^5000 déborde
    let s = vec!["2"; 5_000].join("*");
    assert_eq!(erreur(&s).genre(), "indéterminé");

    // "---1" devient "+-1" : pas de plus unaire
    assert_eq!(erreur("---1").genre(), "syntaxe");

    budget(start, Duration::from_secs(2));
}

#[test]
fn sci_determinisme() {
    let exprs = ["2×π+5!", "sin(30)+cos(60)", "log(2)^2/ln(3)", "2^0.5(1+1)"];
    for e in exprs {
        let a = calculer(e, Environnement::degres())
            .map(|c| c.valeur.to_bits())
            .map_err(|e| e.genre());
        let b = calculer(e, Environnement::degres())
            .map(|c| c.valeur.to_bits())
            .map_err(|e| e.genre());
        assert_eq!(a, b, "expr={e:?}");
    }
}
