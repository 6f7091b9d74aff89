//! Header-to-synonym scoring.
//!
//! The pipeline is transparent on purpose: every score carries the component
//! that produced it so the CLI can explain why a column was claimed.

use rapidfuzz::distance::jaro_winkler;

/// Bonus added on top of the length ratio for a containment hit.
const CONTAINMENT_BONUS: f32 = 0.3;
/// Jaro-Winkler similarity below this is ignored entirely; the typo
/// component exists for near-identical spellings, not loose resemblance.
const TYPO_SIMILARITY_FLOOR: f32 = 0.9;
/// Weight applied to the typo component. Keeps a typo-only hit inside the
/// medium-confidence band so a misspelled header never claims at high
/// confidence.
const TYPO_WEIGHT: f32 = 0.6;

/// Score for one header against one field's synonym set.
#[derive(Debug, Clone)]
pub struct HeaderScore {
    /// Best value across synonyms and components (0.0 to 1.3).
    pub score: f32,
    /// The component that produced the best value.
    pub explanation: Vec<ScoreComponent>,
}

impl HeaderScore {
    fn zero() -> Self {
        Self {
            score: 0.0,
            explanation: Vec::new(),
        }
    }

    /// Human-readable explanation of the score.
    pub fn explain(&self) -> String {
        self.explanation
            .iter()
            .map(|c| format!("{}: {:.0}%", c.name, c.value * 100.0))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A component contributing to a header score.
#[derive(Debug, Clone)]
pub struct ScoreComponent {
    pub name: &'static str,
    pub value: f32,
    pub description: String,
}

/// Scores a raw header against a synonym set; best component wins.
pub fn score_header(header: &str, synonyms: &[&str]) -> HeaderScore {
    let normalized = normalize(header);
    if normalized.is_empty() {
        return HeaderScore::zero();
    }

    let mut best = HeaderScore::zero();
    for pattern in synonyms {
        if normalized == *pattern {
            return HeaderScore {
                score: 1.0,
                explanation: vec![ScoreComponent {
                    name: "Exact match",
                    value: 1.0,
                    description: format!("'{header}' equals '{pattern}'"),
                }],
            };
        }

        if pattern.contains(normalized.as_str()) || normalized.contains(pattern) {
            let pattern_len = pattern.chars().count();
            let ratio = pattern_len as f32 / normalized.chars().count().max(pattern_len) as f32;
            consider(
                &mut best,
                ratio + CONTAINMENT_BONUS,
                "Containment",
                format!("'{header}' overlaps '{pattern}'"),
            );
        }

        let overlap = word_overlap(&normalized, pattern);
        if overlap > 0.0 {
            consider(
                &mut best,
                overlap,
                "Word overlap",
                format!("'{header}' shares words with '{pattern}'"),
            );
        }

        let similarity =
            jaro_winkler::similarity(normalized.chars(), pattern.chars()) as f32;
        if similarity >= TYPO_SIMILARITY_FLOOR {
            consider(
                &mut best,
                similarity * TYPO_WEIGHT,
                "Typo similarity",
                format!("'{header}' nearly spells '{pattern}'"),
            );
        }
    }
    best
}

fn consider(best: &mut HeaderScore, value: f32, name: &'static str, description: String) {
    if value > best.score {
        *best = HeaderScore {
            score: value,
            explanation: vec![ScoreComponent {
                name,
                value,
                description,
            }],
        };
    }
}

fn word_overlap(a: &str, b: &str) -> f32 {
    let a_words: Vec<&str> = a.split_whitespace().collect();
    let b_words: Vec<&str> = b.split_whitespace().collect();
    if a_words.is_empty() || b_words.is_empty() {
        return 0.0;
    }
    let common = a_words.iter().filter(|word| b_words.contains(word)).count();
    common as f32 / a_words.len().max(b_words.len()) as f32
}

/// Lowercases, turns `_`/`-`/`.` into spaces and collapses whitespace.
pub(crate) fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace(['_', '-', '.'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
