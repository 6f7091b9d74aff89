//! Text folding shared by the reference tables and the classifier.
//!
//! Reference lookups must be case- and accent-insensitive: police reports
//! arrive with any mix of "MEDELLÍN", "Medellin" or "medellín", and the
//! alias tables themselves carry both accented and plain spellings. Both
//! sides are folded through the same function so they meet in one keyspace.

/// Folds a token for reference-table lookups: uppercase, diacritics
/// transliterated to their base letter, every non-letter dropped, runs of
/// whitespace collapsed to a single space.
///
/// "E.E.U.U." folds to "EEUU", "Perú" to "PERU", "  san  andrés " to
/// "SAN ANDRES". A token with no letters at all folds to the empty string.
pub fn fold_for_lookup(raw: &str) -> String {
    let mut folded = String::with_capacity(raw.len());
    let mut pending_space = false;
    for upper in raw.chars().flat_map(char::to_uppercase) {
        let letter = strip_diacritic(upper);
        if letter.is_whitespace() {
            pending_space = true;
        } else if letter.is_alphabetic() {
            if pending_space && !folded.is_empty() {
                folded.push(' ');
            }
            pending_space = false;
            folded.push(letter);
        }
        // Digits and punctuation are dropped without acting as separators,
        // so "E.E.U.U." stays one token.
    }
    folded
}

/// Maps an uppercase Latin-1 letter with a diacritic to its base letter.
/// Letters outside the table pass through unchanged.
fn strip_diacritic(c: char) -> char {
    match c {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'Ç' => 'C',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'Ñ' => 'N',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'Ý' => 'Y',
        other => other,
    }
}

/// Prepares a value for a submission field: tabs and line breaks become
/// spaces (the output format is tab-delimited, one record per line), then
/// whitespace runs collapse and the ends are trimmed.
pub fn clean_field_value(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    let mut pending_space = false;
    for c in raw.chars() {
        if c.is_whitespace() {
            pending_space = true;
        } else {
            if pending_space && !cleaned.is_empty() {
                cleaned.push(' ');
            }
            pending_space = false;
            cleaned.push(c);
        }
    }
    cleaned
}
