//! Reduction of pronunciation surface forms to plain `a..=z` words.

use deunicode::deunicode;

/// Closest ASCII rendering of `word`, covering Latin diacritics, IPA,
/// Greek and Cyrillic.
pub fn transliterate(word: &str) -> String {
    deunicode(word)
}

/// Normalize a surface form into a word over `a..=z`.
///
/// `gh` becomes `y` before transliteration, so only a literal lowercase
/// digraph in the input is rewritten.
pub fn normalize_word(word: &str) -> String {
    let rewritten = word.replace("gh", "y");
    transliterate(&rewritten)
        .to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strip_diacritics() {
        assert_eq!(normalize_word("três"), "tres");
        assert_eq!(normalize_word("Zwölf"), "zwolf");
        assert_eq!(normalize_word("čtyři"), "ctyri");
        assert_eq!(normalize_word("fünf"), "funf");
    }

    #[test]
    fn test_digraph_before_transliteration() {
        assert_eq!(normalize_word("ghee"), "yee");
        assert_eq!(normalize_word("Ghee"), "ghee");
        assert_eq!(normalize_word("dogh"), "doy");
    }

    #[test]
    fn test_drops_non_letters() {
        assert_eq!(normalize_word("ee-ko'"), "eeko");
        assert_eq!(normalize_word("12"), "");
        assert_eq!(normalize_word(""), "");
    }

    #[test]
    fn test_special_letters() {
        assert_eq!(normalize_word("groß"), "gross");
        assert_eq!(normalize_word("øl"), "ol");
        assert_eq!(normalize_word("łza"), "lza");
    }

    #[test]
    fn test_non_latin_scripts_keep_consonants() {
        assert_eq!(normalize_word("ʃto"), "sto");
        assert_eq!(normalize_word("tʃin"), "tsin");
        assert_eq!(normalize_word("θree"), "three");
        assert_eq!(normalize_word("ένα"), "ena");
        assert_eq!(normalize_word("два"), "dva");
        assert_eq!(normalize_word("12 три"), "tri");
    }

    #[test]
    fn test_schwa_has_no_letter() {
        assert_eq!(normalize_word("dəs"), "ds");
    }

    proptest! {
        #[test]
        fn prop_output_alphabet(w in "\\PC{0,16}") {
            prop_assert!(normalize_word(&w).chars().all(|c| c.is_ascii_lowercase()));
        }

        #[test]
        fn prop_idempotent_on_plain(w in "[a-z]{0,16}") {
            let once = normalize_word(&w);
            prop_assert_eq!(normalize_word(&once), once);
        }
    }
}
