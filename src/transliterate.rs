//! Character-level transliteration of Cyrillic file names into Latin.
//!
//! ASCII letters and digits are kept as they are. Russian and Ukrainian
//! letters are replaced by their Latin spelling, which may be several
//! characters long (`ж` -> `zh`, `щ` -> `sch`) or empty for the hard and
//! soft signs. Any other character becomes [`PLACEHOLDER`].
//!
//! # Examples
//!
//! ```
//! use clean_folder::transliterate::transliterate;
//!
//! assert_eq!(transliterate('ж'), "zh");
//! assert_eq!(transliterate('Щ'), "Sch");
//! assert_eq!(transliterate('ь'), "");
//! assert_eq!(transliterate('7'), "7");
//! assert_eq!(transliterate(' '), "_");
//! ```

use std::borrow::Cow;

/// Replacement for characters that have no Latin spelling.
pub const PLACEHOLDER: char = '_';

/// Returns the Latin spelling of a single character.
///
/// The function is total: every `char` maps to some string, possibly empty.
pub fn transliterate(c: char) -> Cow<'static, str> {
    if c.is_ascii_alphanumeric() {
        return Cow::Owned(c.to_string());
    }
    match lookup(c) {
        Some(latin) => Cow::Borrowed(latin),
        None => Cow::Owned(PLACEHOLDER.to_string()),
    }
}

/// Appends the transliteration of every character of `text` to `out`.
pub fn transliterate_into(text: &str, out: &mut String) {
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else {
            match lookup(c) {
                Some(latin) => out.push_str(latin),
                None => out.push(PLACEHOLDER),
            }
        }
    }
}

/// Table lookup for the Cyrillic letters that have a Latin spelling.
fn lookup(c: char) -> Option<&'static str> {
    let latin = match c {
        // Russian, lowercase
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' => "",
        'ы' => "y",
        'ь' => "",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",

        // Russian, uppercase
        'А' => "A",
        'Б' => "B",
        'В' => "V",
        'Г' => "G",
        'Д' => "D",
        'Е' => "E",
        'Ё' => "E",
        'Ж' => "Zh",
        'З' => "Z",
        'И' => "I",
        'Й' => "Y",
        'К' => "K",
        'Л' => "L",
        'М' => "M",
        'Н' => "N",
        'О' => "O",
        'П' => "P",
        'Р' => "R",
        'С' => "S",
        'Т' => "T",
        'У' => "U",
        'Ф' => "F",
        'Х' => "Kh",
        'Ц' => "Ts",
        'Ч' => "Ch",
        'Ш' => "Sh",
        'Щ' => "Sch",
        'Ъ' => "",
        'Ы' => "Y",
        'Ь' => "",
        'Э' => "E",
        'Ю' => "Yu",
        'Я' => "Ya",

        // Ukrainian
        'ґ' => "g",
        'є' => "ye",
        'ї' => "yi",
        'і' => "i",
        'Ґ' => "G",
        'Є' => "Ye",
        'Ї' => "Yi",
        'І' => "I",

        _ => return None,
    };
    Some(latin)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spell(text: &str) -> String {
        let mut out = String::new();
        transliterate_into(text, &mut out);
        out
    }

    #[test]
    fn test_ascii_alphanumerics_pass_through() {
        for c in ('a'..='z').chain('A'..='Z').chain('0'..='9') {
            assert_eq!(transliterate(c), c.to_string());
        }
    }

    #[test]
    fn test_multi_letter_spellings() {
        assert_eq!(transliterate('ж'), "zh");
        assert_eq!(transliterate('х'), "kh");
        assert_eq!(transliterate('щ'), "sch");
        assert_eq!(transliterate('Ю'), "Yu");
        assert_eq!(transliterate('Я'), "Ya");
    }

    #[test]
    fn test_signs_are_silent() {
        assert_eq!(transliterate('ъ'), "");
        assert_eq!(transliterate('ь'), "");
        assert_eq!(transliterate('Ъ'), "");
        assert_eq!(transliterate('Ь'), "");
    }

    #[test]
    fn test_ukrainian_letters() {
        assert_eq!(spell("ґєїі"), "gyeyii");
        assert_eq!(spell("ҐЄЇІ"), "GYeYiI");
    }

    #[test]
    fn test_every_russian_letter_is_mapped() {
        for c in ('а'..='я').chain('А'..='Я').chain(['ё', 'Ё']) {
            assert!(lookup(c).is_some(), "missing spelling for {c}");
        }
    }

    #[test]
    fn test_unknown_characters_become_placeholder() {
        for c in [' ', '-', '.', 'é', 'ß', '中', '😀', '\u{0}', '٣'] {
            assert_eq!(transliterate(c), "_", "unexpected spelling for {c:?}");
        }
    }

    #[test]
    fn test_transliterate_into_matches_per_char() {
        let text = "Привет, мир 42!";
        let per_char: String = text.chars().map(transliterate).collect();
        assert_eq!(spell(text), per_char);
        assert_eq!(spell(text), "Privet__mir_42_");
    }
}
