// src/noyau/lecture.rs
//
// Lecture décimale d’un résultat flottant.
// - La valeur binaire EXACTE du f64 est convertie en rationnel (pas de double arrondi)
// - Arrondi à `digits` chiffres après la virgule (borné à DIGITS_MAX), demi-cas loin de zéro
// - Zéros finaux et point pendant retirés ; jamais de "-0"

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;

use super::environnement::DIGITS_MAX;

/* ------------------------ Décimal (scaled -> texte) ------------------------ */

/// 10^n, n borné à DIGITS_MAX (l’exposant tient donc dans un u32).
fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n.min(DIGITS_MAX) as u32)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal.
pub fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let digits = digits.min(DIGITS_MAX);
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    if digits == 0 {
        return if neg {
            format!("-{int_part}")
        } else {
            format!("{int_part}")
        };
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    if neg {
        format!("-{int_part}.{frac}")
    } else {
        format!("{int_part}.{frac}")
    }
}

/// r -> entier “scalé” = round(r * 10^digits), demi-cas loin de zéro.
fn rational_scaled_arrondi(r: &BigRational, digits: usize) -> BigInt {
    let scale = BigRational::from_integer(pow10(digits));
    (r * scale).round().to_integer()
}

/// "1.2500" -> "1.25", "3.000" -> "3"
fn retirer_zeros(mut s: String) -> String {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}

/// Texte d’affichage d’un résultat : None si la valeur n’est pas finie.
/// `digits` est ramené à DIGITS_MAX.
pub fn formater_resultat(valeur: f64, digits: usize) -> Option<String> {
    let digits = digits.min(DIGITS_MAX);
    let r = BigRational::from_float(valeur)?;
    let scaled = rational_scaled_arrondi(&r, digits);
    Some(retirer_zeros(scaled_to_decimal(scaled, digits)))
}
