//! Column classification for police-report tables.
//!
//! Maps each semantic field onto at most one source column using three
//! deterministic passes: high-confidence header matching, medium-confidence
//! header matching, then content-shape probing for the critical fields.

pub mod classifier;
pub mod content;
pub mod score;
pub mod synonyms;

pub use classifier::ColumnClassifier;
pub use score::{HeaderScore, ScoreComponent, score_header};
pub use synonyms::{FieldVocabulary, vocabulary_for};
