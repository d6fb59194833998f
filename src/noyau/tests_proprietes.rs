//! Tests de propriétés (proptest) : normalisation + cohérence du pipeline.
//!
//! Les entrées sont tirées sur l’alphabet canonique (chiffres, opérateurs ASCII,
//! parenthèses, virgule, espaces, noms de fonctions, pi), sans '!'.

use proptest::prelude::*;

use super::normalisation::FONCTIONS;
use super::{calculer, evaluer, normaliser, Environnement};

fn morceau_canonique() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[0-9]".prop_map(String::from),
        1 => Just(".".to_string()),
        2 => "[-+*/^]".prop_map(String::from),
        2 => "[(),]".prop_map(String::from),
        1 => Just(" ".to_string()),
        1 => Just("pi".to_string()),
        1 => Just("PI".to_string()),
        1 => Just("Sin".to_string()),
        2 => proptest::sample::select(FONCTIONS.to_vec()).prop_map(String::from),
    ]
}

fn entree_canonique() -> impl Strategy<Value = String> {
    proptest::collection::vec(morceau_canonique(), 0..40).prop_map(|v| v.concat())
}

proptest! {
    #[test]
    fn normalisation_idempotente(s in entree_canonique()) {
        let une = normaliser(&s);
        let deux = normaliser(&une);
        prop_assert_eq!(deux, une, "entrée {:?}", s);
    }

    #[test]
    fn calculer_equivaut_a_evaluer_la_forme_canonique(s in entree_canonique()) {
        let env = Environnement::radians();
        let direct = calculer(&s, env).map(|c| c.valeur.to_bits());
        let en_deux_temps = evaluer(&normaliser(&s), env).map(f64::to_bits);

        match (direct, en_deux_temps) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a, b, "entrée {:?}", s);
            }
            (Err(a), Err(b)) => {
                prop_assert_eq!(a.genre(), b.genre(), "entrée {:?}", s);
            }
            (a, b) => {
                prop_assert!(false, "entrée {:?} : {:?} / {:?}", s, a, b);
            }
        }
    }

    #[test]
    fn resultat_toujours_fini(a in -1.0e6f64..1.0e6, b in -1.0e6f64..1.0e6, op in "[-+*/^]") {
        let expr = format!("({a}){op}({b})");
        if let Ok(c) = calculer(&expr, Environnement::degres()) {
            prop_assert!(c.valeur.is_finite(), "expr {:?}", expr);
        }
    }
}
