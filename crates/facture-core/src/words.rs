//! # Amount In Words
//!
//! Converts a monetary amount into the French legal phrase printed at the
//! bottom of a facture ("Arrêtée la présente facture à la somme de ...").
//!
//! Recursive decomposition by magnitude, with the irregular joins French
//! requires: "vingt et un" but "quatre-vingt-un", "soixante et onze" but
//! "soixante-douze", "quatre-vingts" but "quatre-vingt-trois", "deux cents"
//! but "deux cent un", "mille" never "un mille".
//!
//! Pure computation; no allocation beyond the output string pieces.

use crate::money::Money;

/// 0-19 are atomic words. Index 0 is empty: a zero multiplier vanishes
/// inside a composite ("cent", not "cent zéro").
const UNITS: [&str; 20] = [
    "", "un", "deux", "trois", "quatre", "cinq", "six", "sept", "huit", "neuf", "dix", "onze",
    "douze", "treize", "quatorze", "quinze", "seize", "dix-sept", "dix-huit", "dix-neuf",
];

/// Tens words. 70 and 90 have no word of their own: they compose as
/// "soixante"/"quatre-vingt" plus a teen.
const TENS: [&str; 10] = [
    "", "", "vingt", "trente", "quarante", "cinquante", "soixante", "soixante", "quatre-vingt",
    "quatre-vingt",
];

/// Converts a non-negative integer to French words.
/// Returns the empty string for 0 (composite use only).
fn convert(n: u64) -> String {
    if n < 20 {
        return UNITS[n as usize].to_string();
    }

    if n < 100 {
        let t = (n / 10) as usize;
        let u = (n % 10) as usize;

        // 70-79 and 90-99 borrow the teens: soixante-dix ... quatre-vingt-dix-neuf
        if t == 7 || t == 9 {
            if t == 7 && u == 1 {
                return "soixante et onze".to_string();
            }
            return format!("{}-{}", TENS[t], UNITS[10 + u]);
        }

        if u == 0 {
            // quatre-vingts pluralizes only with no trailing unit
            if t == 8 {
                return format!("{}s", TENS[t]);
            }
            return TENS[t].to_string();
        }
        if u == 1 && t != 8 {
            return format!("{} et un", TENS[t]);
        }
        return format!("{}-{}", TENS[t], UNITS[u]);
    }

    if n < 1_000 {
        let h = (n / 100) as usize;
        let rest = n % 100;
        let mut s = if h == 1 {
            "cent".to_string()
        } else {
            format!("{} cent", UNITS[h])
        };
        // "deux cents" but "deux cent trente" and plain "cent"
        if rest == 0 && h > 1 {
            s.push('s');
        }
        if rest > 0 {
            s.push(' ');
            s.push_str(&convert(rest));
        }
        return s;
    }

    if n < 1_000_000 {
        let t = n / 1_000;
        let rest = n % 1_000;
        // "mille", never "un mille"
        let mut s = if t == 1 {
            "mille".to_string()
        } else {
            format!("{} mille", convert(t))
        };
        if rest > 0 {
            s.push(' ');
            s.push_str(&convert(rest));
        }
        return s;
    }

    if n < 1_000_000_000 {
        let m = n / 1_000_000;
        let rest = n % 1_000_000;
        let mut s = format!(
            "{} million{}",
            convert(m),
            if m > 1 { "s" } else { "" }
        );
        if rest > 0 {
            s.push(' ');
            s.push_str(&convert(rest));
        }
        return s;
    }

    let g = n / 1_000_000_000;
    let rest = n % 1_000_000_000;
    let mut s = format!(
        "{} milliard{}",
        convert(g),
        if g > 1 { "s" } else { "" }
    );
    if rest > 0 {
        s.push(' ');
        s.push_str(&convert(rest));
    }
    s
}

fn capitalize(s: String) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => s,
    }
}

/// Converts an amount to the French legal phrase, capitalized.
///
/// The integer part is spelled in dirhams; a non-zero centime part is
/// appended as " et ... centime(s)". Negative amounts are a caller error
/// (reject before calling); the conversion itself cannot fail.
///
/// ## Example
/// ```rust
/// use facture_core::money::Money;
/// use facture_core::words::amount_to_words;
///
/// assert_eq!(
///     amount_to_words(Money::from_centimes(123_450)),
///     "Mille deux cent trente-quatre dirhams et cinquante centimes"
/// );
/// assert_eq!(amount_to_words(Money::zero()), "Zéro dirham");
/// ```
pub fn amount_to_words(amount: Money) -> String {
    debug_assert!(!amount.is_negative(), "amount_to_words: negative amount");

    if amount.is_zero() {
        return "Zéro dirham".to_string();
    }

    let dirhams = amount.dirhams().max(0) as u64;
    let centimes = amount.centimes_part() as u64;

    let mut s = if dirhams == 0 {
        "zéro dirham".to_string()
    } else {
        let plural = if dirhams > 1 { "s" } else { "" };
        format!("{} dirham{}", convert(dirhams), plural)
    };

    if centimes > 0 {
        let plural = if centimes > 1 { "s" } else { "" };
        s.push_str(&format!(" et {} centime{}", convert(centimes), plural));
    }

    capitalize(s)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dh(major: i64, minor: i64) -> Money {
        Money::from_major_minor(major, minor)
    }

    #[test]
    fn test_zero_is_the_atomic_word() {
        assert_eq!(amount_to_words(Money::zero()), "Zéro dirham");
    }

    #[test]
    fn test_whole_amounts_have_no_centime_clause() {
        assert_eq!(amount_to_words(dh(1, 0)), "Un dirham");
        assert_eq!(amount_to_words(dh(2, 0)), "Deux dirhams");
        assert_eq!(amount_to_words(dh(100, 0)), "Cent dirhams");
        assert_eq!(amount_to_words(dh(1000, 0)), "Mille dirhams");
        assert!(!amount_to_words(dh(240, 0)).contains("centime"));
    }

    #[test]
    fn test_centime_only_amount() {
        assert_eq!(amount_to_words(dh(0, 50)), "Zéro dirham et cinquante centimes");
        assert_eq!(amount_to_words(dh(0, 1)), "Zéro dirham et un centime");
    }

    #[test]
    fn test_irregular_tens() {
        assert_eq!(amount_to_words(dh(21, 0)), "Vingt et un dirhams");
        assert_eq!(amount_to_words(dh(70, 0)), "Soixante-dix dirhams");
        assert_eq!(amount_to_words(dh(71, 0)), "Soixante et onze dirhams");
        assert_eq!(amount_to_words(dh(77, 0)), "Soixante-dix-sept dirhams");
        assert_eq!(amount_to_words(dh(80, 0)), "Quatre-vingts dirhams");
        assert_eq!(amount_to_words(dh(81, 0)), "Quatre-vingt-un dirhams");
        assert_eq!(amount_to_words(dh(90, 0)), "Quatre-vingt-dix dirhams");
        assert_eq!(amount_to_words(dh(91, 0)), "Quatre-vingt-onze dirhams");
        assert_eq!(amount_to_words(dh(99, 0)), "Quatre-vingt-dix-neuf dirhams");
    }

    #[test]
    fn test_hundred_pluralization() {
        // plural only when multiplier > 1 AND no remainder
        assert_eq!(amount_to_words(dh(200, 0)), "Deux cents dirhams");
        assert_eq!(amount_to_words(dh(201, 0)), "Deux cent un dirhams");
        assert_eq!(amount_to_words(dh(101, 0)), "Cent un dirhams");
        assert_eq!(amount_to_words(dh(580, 0)), "Cinq cent quatre-vingts dirhams");
    }

    #[test]
    fn test_thousands_elide_one() {
        assert_eq!(amount_to_words(dh(1000, 0)), "Mille dirhams");
        assert_eq!(amount_to_words(dh(2000, 0)), "Deux mille dirhams");
        assert_eq!(
            amount_to_words(dh(1981, 0)),
            "Mille neuf cent quatre-vingt-un dirhams"
        );
    }

    #[test]
    fn test_scale_words_pluralize_beyond_one() {
        assert_eq!(amount_to_words(dh(1_000_000, 0)), "Un million dirhams");
        assert_eq!(
            amount_to_words(dh(2_500_000, 0)),
            "Deux millions cinq cent mille dirhams"
        );
        assert_eq!(amount_to_words(dh(1_000_000_000, 0)), "Un milliard dirhams");
        assert_eq!(
            amount_to_words(dh(3_000_000_021, 0)),
            "Trois milliards vingt et un dirhams"
        );
    }

    #[test]
    fn test_reference_invoice_amount() {
        assert_eq!(
            amount_to_words(dh(1234, 50)),
            "Mille deux cent trente-quatre dirhams et cinquante centimes"
        );
    }

    #[test]
    fn test_centime_pluralization() {
        assert_eq!(
            amount_to_words(dh(5, 1)),
            "Cinq dirhams et un centime"
        );
        assert_eq!(
            amount_to_words(dh(5, 75)),
            "Cinq dirhams et soixante-quinze centimes"
        );
    }
}
