//! Header vocabularies for each semantic field.
//!
//! Police reports arrive with Spanish, English or mixed headers, so every
//! field carries both. Entries are pre-normalized (lowercase, separators as
//! single spaces) to line up with [`crate::score::normalize`].

use sire_model::{MovementType, SemanticField};

/// The synonym and exclusion sets used to score headers for one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldVocabulary {
    pub field: SemanticField,
    pub synonyms: &'static [&'static str],
    /// A header containing any of these never matches this field.
    pub exclusions: &'static [&'static str],
}

const DOCUMENT_TYPE: &[&str] = &[
    "tipo de documento",
    "document type",
    "tipo documento",
    "doc type",
    "id type",
    "tipo de id",
    "tipo id",
];

const DOCUMENT_NUMBER: &[&str] = &[
    "document number",
    "numero documento",
    "número de documento",
    "numero de identificacion",
    "número de identificación",
    "passport number",
    "passport no",
    "id number",
    "doc number",
    "document no",
    "numero del documento",
    "número del documento",
    "no documento",
    "nro documento",
    "n documento",
    "num documento",
    "numero id",
    "no identificacion",
    "número identificación",
];

const GIVEN_NAMES: &[&str] = &[
    "name",
    "first name",
    "nombres",
    "given name",
    "firstname",
    "given names",
    "nombre",
    "primer nombre",
];

const FIRST_SURNAME: &[&str] = &[
    "surname",
    "last name",
    "apellido",
    "primer apellido",
    "family name",
    "lastname",
    "apellidos",
];

const FULL_NAME: &[&str] = &[
    "guest name",
    "nombre completo",
    "full name",
    "guest",
    "huesped",
    "nombre y apellido",
    "huésped",
    "cliente",
];

const NATIONALITY: &[&str] = &[
    "country",
    "nationality",
    "nacionalidad",
    "pais",
    "país",
    "citizen",
    "citizenship",
    "nation",
];

const BIRTH_DATE: &[&str] = &[
    "birthday",
    "birth date",
    "fecha nacimiento",
    "date of birth",
    "birthdate",
    "dob",
    "nacimiento",
    "born",
    "cumpleaños",
    "fecha de nacimiento",
    "f nacimiento",
];

/// Movement-date headers when the batch reports entries (check-ins).
const ENTRY_DATE: &[&str] = &[
    "arrival date",
    "arrival",
    "check in",
    "checkin",
    "llegada",
    "entrada",
    "fecha entrada",
    "fecha llegada",
    "fecha de llegada",
    "fecha checkin",
    "ingreso",
];

/// Movement-date headers when the batch reports exits (check-outs).
const EXIT_DATE: &[&str] = &[
    "departure date",
    "departure",
    "check out",
    "checkout",
    "salida",
    "fecha salida",
    "fecha checkout",
    "fecha de salida",
    "egreso",
];

const PROCEDENCE: &[&str] = &[
    "pais de procedencia",
    "country of origin",
    "origin country",
    "procedencia",
    "from",
    "origen",
    "viene de",
];

const DESTINATION: &[&str] = &[
    "pais de destino",
    "destination country",
    "destino",
    "destination",
    "to",
    "va a",
    "hacia",
];

/// Headers containing "tipo" describe the document type, never its number.
const DOCUMENT_NUMBER_EXCLUSIONS: &[&str] = &["tipo"];

/// Returns the vocabulary for `field`, with the movement-date set picked by
/// the batch direction.
pub fn vocabulary_for(field: SemanticField, movement: MovementType) -> FieldVocabulary {
    let synonyms = match field {
        SemanticField::DocumentType => DOCUMENT_TYPE,
        SemanticField::DocumentNumber => DOCUMENT_NUMBER,
        SemanticField::GivenNames => GIVEN_NAMES,
        SemanticField::FirstSurname => FIRST_SURNAME,
        SemanticField::FullName => FULL_NAME,
        SemanticField::Nationality => NATIONALITY,
        SemanticField::BirthDate => BIRTH_DATE,
        SemanticField::MovementDate => match movement {
            MovementType::Entry => ENTRY_DATE,
            MovementType::Exit => EXIT_DATE,
        },
        SemanticField::Procedence => PROCEDENCE,
        SemanticField::Destination => DESTINATION,
    };
    let exclusions = match field {
        SemanticField::DocumentNumber => DOCUMENT_NUMBER_EXCLUSIONS,
        _ => &[],
    };
    FieldVocabulary {
        field,
        synonyms,
        exclusions,
    }
}
