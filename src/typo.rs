//! Plausible mistypes based on the QWERTY layout.

use rand::Rng;
use rand::seq::SliceRandom;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Keys physically adjacent to `letter` on a QWERTY keyboard.
///
/// Returns `None` for anything that is not a lowercase ASCII letter.
pub fn neighbors(letter: char) -> Option<&'static str> {
    let keys = match letter {
        'a' => "sqwz",
        'b' => "vghn",
        'c' => "xdfv",
        'd' => "serfcx",
        'e' => "wsdr",
        'f' => "drtgvc",
        'g' => "ftyhbv",
        'h' => "gyujnb",
        'i' => "ujko",
        'j' => "huiknm",
        'k' => "jiolm",
        'l' => "kop",
        'm' => "njk",
        'n' => "bhjm",
        'o' => "iklp",
        'p' => "ol",
        'q' => "wa",
        'r' => "edft",
        's' => "awedxz",
        't' => "rfgy",
        'u' => "yhji",
        'v' => "cfgb",
        'w' => "qase",
        'x' => "zsdc",
        'y' => "tghu",
        'z' => "asx",
        _ => return None,
    };
    Some(keys)
}

/// Pick the wrong character a hurried typist would hit instead of `ch`.
///
/// Letters map to a uniformly chosen neighbor in the same case. Anything
/// else falls back to a uniformly chosen lowercase letter.
pub fn typo_char<R: Rng + ?Sized>(ch: char, rng: &mut R) -> char {
    let lower = ch.to_ascii_lowercase();
    match neighbors(lower) {
        Some(keys) => {
            let typo = pick(keys.as_bytes(), rng);
            if ch.is_ascii_uppercase() {
                typo.to_ascii_uppercase()
            } else {
                typo
            }
        }
        None => pick(ALPHABET, rng),
    }
}

fn pick<R: Rng + ?Sized>(keys: &[u8], rng: &mut R) -> char {
    // Both tables are non-empty ASCII.
    keys.choose(rng).copied().map(char::from).unwrap_or('a')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_every_letter_has_neighbors() {
        for &letter in ALPHABET {
            let keys = neighbors(letter as char).unwrap();
            assert!(!keys.is_empty());
            assert!(!keys.contains(letter as char), "{} lists itself", letter as char);
        }
        assert_eq!(neighbors('A'), None);
        assert_eq!(neighbors('1'), None);
    }

    #[test]
    fn test_table_entries() {
        assert_eq!(neighbors('a'), Some("sqwz"));
        assert_eq!(neighbors('d'), Some("serfcx"));
        assert_eq!(neighbors('j'), Some("huiknm"));
        assert_eq!(neighbors('p'), Some("ol"));
        assert_eq!(neighbors('z'), Some("asx"));
    }

    #[test]
    fn test_typo_is_a_neighbor() {
        let mut rng = StdRng::seed_from_u64(42);
        for &letter in ALPHABET {
            let letter = letter as char;
            let keys = neighbors(letter).unwrap();
            for _ in 0..50 {
                let typo = typo_char(letter, &mut rng);
                assert!(keys.contains(typo), "{typo} is not next to {letter}");
            }
        }
    }

    #[test]
    fn test_uppercase_keeps_case() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let typo = typo_char('G', &mut rng);
            assert!(typo.is_ascii_uppercase());
            assert!("FTYHBV".contains(typo));
        }
    }

    #[test]
    fn test_non_letters_fall_back_to_alphabet() {
        let mut rng = StdRng::seed_from_u64(3);
        for ch in ['1', '.', '?', 'é'] {
            for _ in 0..20 {
                let typo = typo_char(ch, &mut rng);
                assert!(typo.is_ascii_lowercase(), "{ch} -> {typo}");
            }
        }
    }

    #[test]
    fn test_every_neighbor_is_reachable() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(typo_char('s', &mut rng));
        }
        assert_eq!(seen.len(), "awedxz".len());
    }
}
