//! Name cleaning and splitting.
//!
//! SIRE wants surnames and given names in separate fields, uppercase.
//! Reports deliver anything from fully split columns to one "Nombre
//! Completo" cell, so the splitters here recover the pieces by token
//! position.

/// Uppercases a name and strips it to letters, spaces, hyphens and
/// apostrophes. Accented letters survive; digits and stray punctuation are
/// dropped without leaving a gap.
pub fn clean_name(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    let mut pending_space = false;
    for c in raw.chars() {
        if c.is_whitespace() {
            pending_space = true;
        } else if c.is_alphabetic() || c == '-' || c == '\'' {
            if pending_space && !cleaned.is_empty() {
                cleaned.push(' ');
            }
            pending_space = false;
            cleaned.extend(c.to_uppercase());
        }
    }
    cleaned
}

/// Surnames recovered from a dedicated surname column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitSurnames {
    pub first: String,
    pub second: String,
}

/// Splits a surname cell. Hispanic convention puts both surnames in one
/// cell: the first token is the paternal surname, everything after it the
/// maternal one.
pub fn split_surnames(raw: &str) -> SplitSurnames {
    let cleaned = clean_name(raw);
    match cleaned.split_once(' ') {
        Some((first, rest)) => SplitSurnames {
            first: first.to_string(),
            second: rest.to_string(),
        },
        None => SplitSurnames {
            first: cleaned,
            second: String::new(),
        },
    }
}

/// Name parts recovered from a single combined-name column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitFullName {
    pub given_names: String,
    pub first_surname: String,
    pub second_surname: String,
}

/// Splits a combined name by token count.
///
/// One token is a bare surname. Two read as given name plus surname. Three
/// put only the last token in the surname, since two given names are more
/// common than a second surname in that shape. Four or more put the last
/// two tokens in the surnames.
pub fn split_full_name(raw: &str) -> SplitFullName {
    let cleaned = clean_name(raw);
    let parts: Vec<&str> = cleaned.split(' ').filter(|part| !part.is_empty()).collect();
    match parts.len() {
        0 => SplitFullName::default(),
        1 => SplitFullName {
            first_surname: parts[0].to_string(),
            ..SplitFullName::default()
        },
        2 => SplitFullName {
            given_names: parts[0].to_string(),
            first_surname: parts[1].to_string(),
            ..SplitFullName::default()
        },
        3 => SplitFullName {
            given_names: parts[..2].join(" "),
            first_surname: parts[2].to_string(),
            ..SplitFullName::default()
        },
        _ => SplitFullName {
            given_names: parts[..parts.len() - 2].join(" "),
            first_surname: parts[parts.len() - 2].to_string(),
            second_surname: parts[parts.len() - 1].to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_uppercases_and_keeps_accents() {
        assert_eq!(clean_name("  garcía  lópez "), "GARCÍA LÓPEZ");
        assert_eq!(clean_name("O'Brien-Smith"), "O'BRIEN-SMITH");
    }

    #[test]
    fn clean_drops_digits_and_punctuation_in_place() {
        assert_eq!(clean_name("Juan3 Pérez."), "JUAN PÉREZ");
        assert_eq!(clean_name("MAR1A"), "MARA");
        assert_eq!(clean_name("12345"), "");
    }

    #[test]
    fn surname_cell_with_one_token() {
        let split = split_surnames("García");
        assert_eq!(split.first, "GARCÍA");
        assert_eq!(split.second, "");
    }

    #[test]
    fn surname_cell_with_two_tokens_carries_both_surnames() {
        let split = split_surnames("garcía lópez");
        assert_eq!(split.first, "GARCÍA");
        assert_eq!(split.second, "LÓPEZ");
    }

    #[test]
    fn surname_cell_with_three_tokens_keeps_the_tail_together() {
        let split = split_surnames("DE LA CRUZ");
        assert_eq!(split.first, "DE");
        assert_eq!(split.second, "LA CRUZ");
    }

    #[test]
    fn full_name_single_token_is_a_surname() {
        let split = split_full_name("García");
        assert_eq!(split.first_surname, "GARCÍA");
        assert_eq!(split.given_names, "");
        assert_eq!(split.second_surname, "");
    }

    #[test]
    fn full_name_two_tokens() {
        let split = split_full_name("Juan García");
        assert_eq!(split.given_names, "JUAN");
        assert_eq!(split.first_surname, "GARCÍA");
        assert_eq!(split.second_surname, "");
    }

    #[test]
    fn full_name_three_tokens_keeps_two_given_names() {
        let split = split_full_name("Juan Carlos García");
        assert_eq!(split.given_names, "JUAN CARLOS");
        assert_eq!(split.first_surname, "GARCÍA");
        assert_eq!(split.second_surname, "");
    }

    #[test]
    fn full_name_four_tokens_fills_both_surnames() {
        let split = split_full_name("Juan Carlos García López");
        assert_eq!(split.given_names, "JUAN CARLOS");
        assert_eq!(split.first_surname, "GARCÍA");
        assert_eq!(split.second_surname, "LÓPEZ");
    }

    #[test]
    fn full_name_empty_or_numeric_yields_nothing() {
        assert_eq!(split_full_name("  "), SplitFullName::default());
        assert_eq!(split_full_name("12345"), SplitFullName::default());
    }
}
