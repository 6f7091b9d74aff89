use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical fields the converter must locate in a police-report table.
///
/// A SIRE submission line needs a value for every required field; the
/// classifier maps each of them to a source column (or marks it unresolved).
/// `FullName` is auxiliary: it is consulted only when the report carries a
/// single combined name column instead of split surname/given-name columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticField {
    DocumentType,
    DocumentNumber,
    GivenNames,
    FirstSurname,
    FullName,
    Nationality,
    BirthDate,
    MovementDate,
    Procedence,
    Destination,
}

impl SemanticField {
    /// Fixed greedy-assignment order for column classification: document
    /// fields and dates claim columns first, free-text name fields last.
    pub const CLASSIFICATION_ORDER: [SemanticField; 10] = [
        SemanticField::DocumentType,
        SemanticField::DocumentNumber,
        SemanticField::MovementDate,
        SemanticField::BirthDate,
        SemanticField::Nationality,
        SemanticField::Procedence,
        SemanticField::Destination,
        SemanticField::FirstSurname,
        SemanticField::GivenNames,
        SemanticField::FullName,
    ];

    /// Returns false only for `FullName`, which substitutes for the split
    /// name fields rather than standing on its own.
    pub fn is_required(&self) -> bool {
        !matches!(self, SemanticField::FullName)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticField::DocumentType => "document_type",
            SemanticField::DocumentNumber => "document_number",
            SemanticField::GivenNames => "given_names",
            SemanticField::FirstSurname => "first_surname",
            SemanticField::FullName => "full_name",
            SemanticField::Nationality => "nationality",
            SemanticField::BirthDate => "birth_date",
            SemanticField::MovementDate => "movement_date",
            SemanticField::Procedence => "procedence",
            SemanticField::Destination => "destination",
        }
    }
}

impl fmt::Display for SemanticField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SemanticField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "document_type" => Ok(SemanticField::DocumentType),
            "document_number" => Ok(SemanticField::DocumentNumber),
            "given_names" => Ok(SemanticField::GivenNames),
            "first_surname" => Ok(SemanticField::FirstSurname),
            "full_name" => Ok(SemanticField::FullName),
            "nationality" => Ok(SemanticField::Nationality),
            "birth_date" => Ok(SemanticField::BirthDate),
            "movement_date" => Ok(SemanticField::MovementDate),
            "procedence" => Ok(SemanticField::Procedence),
            "destination" => Ok(SemanticField::Destination),
            _ => Err(format!("unknown semantic field `{s}`")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_order_covers_every_field() {
        let mut seen: Vec<SemanticField> = SemanticField::CLASSIFICATION_ORDER.to_vec();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), SemanticField::CLASSIFICATION_ORDER.len());
    }

    #[test]
    fn round_trips_through_str() {
        for field in SemanticField::CLASSIFICATION_ORDER {
            let parsed: SemanticField = field.as_str().parse().expect("parse field name");
            assert_eq!(parsed, field);
        }
    }

    #[test]
    fn only_full_name_is_optional() {
        for field in SemanticField::CLASSIFICATION_ORDER {
            assert_eq!(field.is_required(), field != SemanticField::FullName);
        }
    }
}
