//! Per-row record assembly.
//!
//! The assembler turns one raw row into a [`RowOutcome`] using the column
//! mapping, the reference tables and the normalizers. A row is never thrown
//! away for being bad: every field that cannot be resolved degrades to its
//! sentinel value and leaves a warning, so converted plus excluded always
//! equals the input row count. The only exclusion is the operator-requested
//! drop of Colombian nationals.

use std::collections::BTreeSet;

use tracing::debug;

use sire_model::text::clean_field_value;
use sire_model::{
    Confidence, ExclusionReason, FieldMapping, OperatorContext, RowOutcome, RowWarning,
    SemanticField, SireRecord, WarningKind,
};
use sire_normalize::{
    DateNormalizer, DateOutcome, DocumentTypeOrigin, PlaceCode, clean_name, normalize_nationality,
    normalize_place, resolve_document_type, split_full_name, split_surnames,
    validate_document_number,
};
use sire_reference::{
    COLOMBIA_CODE, DEFAULT_DESTINATION_CODE, DEFAULT_DOCUMENT_TYPE_CODE, ReferenceStore,
    UNKNOWN_COUNTRY_CODE,
};

/// What the mapping and the row yield for one semantic field.
enum FieldCell<'a> {
    /// No source column is mapped to the field.
    Unresolved,
    /// A column is mapped but this row's cell is blank.
    Missing,
    /// A non-empty cell.
    Value(&'a str),
}

/// Name fields after surname splitting or full-name recovery.
#[derive(Debug, Default)]
struct ResolvedNames {
    first_surname: String,
    second_surname: String,
    given_names: String,
}

/// Builds one [`SireRecord`] per input row.
///
/// Holds the duplicate tracker for the batch, so rows must be fed in input
/// order through a single assembler.
pub struct RowAssembler<'a> {
    store: &'a ReferenceStore,
    mapping: &'a FieldMapping,
    context: &'a OperatorContext,
    dates: DateNormalizer,
    seen_movements: BTreeSet<String>,
}

impl<'a> RowAssembler<'a> {
    pub fn new(
        store: &'a ReferenceStore,
        mapping: &'a FieldMapping,
        context: &'a OperatorContext,
    ) -> Self {
        Self {
            store,
            mapping,
            context,
            dates: DateNormalizer::new(),
            seen_movements: BTreeSet::new(),
        }
    }

    /// Converts row `index` (0-based, header not counted) into an outcome.
    pub fn assemble(&mut self, index: usize, row: &[String]) -> RowOutcome {
        let mut warnings = Vec::new();

        let document_number = self.document_number(row, &mut warnings);
        let document_type = self.document_type(row, &mut warnings);
        let nationality = self.nationality(row, &mut warnings);

        if self.context.exclude_colombian_nationals && nationality.code == COLOMBIA_CODE {
            debug!(row = index, "row excluded, colombian national");
            return RowOutcome::excluded(index, ExclusionReason::ColombianNational);
        }

        let names = self.names(row, &mut warnings);
        let movement_date = self.date_field(row, SemanticField::MovementDate, &mut warnings);
        let birth_date = self.date_field(row, SemanticField::BirthDate, &mut warnings);
        let procedence = self.procedence(row, &nationality, &mut warnings);
        let destination = self.destination(row, &mut warnings);

        self.track_duplicate(&document_number, &movement_date, &mut warnings);

        let record = SireRecord {
            establishment_code: clean_field_value(&self.context.establishment_code),
            report_city_code: clean_field_value(&self.context.report_city_code),
            document_type: clean_field_value(&document_type),
            document_number: clean_field_value(&document_number),
            nationality: clean_field_value(&nationality.code),
            first_surname: clean_field_value(&names.first_surname),
            second_surname: clean_field_value(&names.second_surname),
            given_names: clean_field_value(&names.given_names),
            movement_code: self.context.movement.code().to_string(),
            movement_date: clean_field_value(&movement_date),
            procedence: clean_field_value(&procedence),
            destination: clean_field_value(&destination),
            birth_date: clean_field_value(&birth_date),
        };
        debug!(row = index, warnings = warnings.len(), "row assembled");
        RowOutcome::converted(index, record, warnings)
    }

    fn cell<'r>(&self, row: &'r [String], field: SemanticField) -> FieldCell<'r> {
        let Some(column) = self.mapping.resolve(field) else {
            return FieldCell::Unresolved;
        };
        match row.get(column.index).map(String::as_str) {
            Some(value) if !value.trim().is_empty() => FieldCell::Value(value.trim()),
            _ => FieldCell::Missing,
        }
    }

    fn document_number(&self, row: &[String], warnings: &mut Vec<RowWarning>) -> String {
        match self.cell(row, SemanticField::DocumentNumber) {
            FieldCell::Value(raw) => match validate_document_number(raw) {
                Ok(number) => number,
                Err(error) => {
                    warnings.push(RowWarning::new(
                        WarningKind::InvalidDocument,
                        SemanticField::DocumentNumber,
                        error.to_string(),
                    ));
                    String::new()
                }
            },
            FieldCell::Missing => {
                warnings.push(RowWarning::new(
                    WarningKind::MissingValue,
                    SemanticField::DocumentNumber,
                    "document number cell is blank",
                ));
                String::new()
            }
            FieldCell::Unresolved => {
                warnings.push(RowWarning::new(
                    WarningKind::UnresolvedColumn,
                    SemanticField::DocumentNumber,
                    "no document number column detected",
                ));
                String::new()
            }
        }
    }

    fn document_type(&self, row: &[String], warnings: &mut Vec<RowWarning>) -> String {
        match self.cell(row, SemanticField::DocumentType) {
            FieldCell::Value(raw) => {
                let resolution = resolve_document_type(raw, &self.store.document_types);
                if resolution.origin == DocumentTypeOrigin::Default {
                    warnings.push(RowWarning::new(
                        WarningKind::UnknownDocumentType,
                        SemanticField::DocumentType,
                        format!("unrecognized document type `{raw}`, passport assumed"),
                    ));
                }
                resolution.code
            }
            // A blank cell quietly takes the passport default.
            FieldCell::Missing => DEFAULT_DOCUMENT_TYPE_CODE.to_string(),
            FieldCell::Unresolved => {
                warnings.push(RowWarning::new(
                    WarningKind::UnresolvedColumn,
                    SemanticField::DocumentType,
                    "no document type column detected, passport assumed",
                ));
                DEFAULT_DOCUMENT_TYPE_CODE.to_string()
            }
        }
    }

    fn nationality(&self, row: &[String], warnings: &mut Vec<RowWarning>) -> PlaceCode {
        match self.cell(row, SemanticField::Nationality) {
            FieldCell::Value(raw) => {
                if let Some(place) = normalize_nationality(raw, self.store) {
                    return place;
                }
                if let Some(inferred) = self.nationality_from_procedence(row, warnings) {
                    return inferred;
                }
                warnings.push(RowWarning::new(
                    WarningKind::UnknownCountry,
                    SemanticField::Nationality,
                    format!("no country matches `{raw}`"),
                ));
                unknown_nationality()
            }
            FieldCell::Missing => {
                if let Some(inferred) = self.nationality_from_procedence(row, warnings) {
                    return inferred;
                }
                warnings.push(RowWarning::new(
                    WarningKind::MissingValue,
                    SemanticField::Nationality,
                    "nationality cell is blank",
                ));
                unknown_nationality()
            }
            FieldCell::Unresolved => {
                warnings.push(RowWarning::new(
                    WarningKind::UnresolvedColumn,
                    SemanticField::Nationality,
                    "no nationality column detected",
                ));
                if let Some(inferred) = self.nationality_from_procedence(row, warnings) {
                    return inferred;
                }
                unknown_nationality()
            }
        }
    }

    /// A procedence cell naming a country is a good proxy for nationality:
    /// "viene de PERÚ" usually means a Peruvian guest. The borrowed value
    /// keeps its code but steps down one confidence level.
    fn nationality_from_procedence(
        &self,
        row: &[String],
        warnings: &mut Vec<RowWarning>,
    ) -> Option<PlaceCode> {
        let FieldCell::Value(raw) = self.cell(row, SemanticField::Procedence) else {
            return None;
        };
        let place = normalize_nationality(raw, self.store)?;
        warnings.push(RowWarning::new(
            WarningKind::InferredValue,
            SemanticField::Nationality,
            "nationality inferred from procedence",
        ));
        Some(PlaceCode {
            code: place.code,
            confidence: place.confidence.downgraded(),
        })
    }

    fn names(&self, row: &[String], warnings: &mut Vec<RowWarning>) -> ResolvedNames {
        let surname_cell = self.cell(row, SemanticField::FirstSurname);
        let given_cell = self.cell(row, SemanticField::GivenNames);

        // A combined-name column substitutes for the split columns only
        // when neither of them was mapped.
        if matches!(surname_cell, FieldCell::Unresolved)
            && matches!(given_cell, FieldCell::Unresolved)
            && self.mapping.is_resolved(SemanticField::FullName)
        {
            return self.names_from_full_name(row, warnings);
        }

        let (first_surname, second_surname) = match surname_cell {
            FieldCell::Value(raw) => {
                let split = split_surnames(raw);
                (split.first, split.second)
            }
            FieldCell::Missing => {
                warnings.push(RowWarning::new(
                    WarningKind::MissingValue,
                    SemanticField::FirstSurname,
                    "surname cell is blank",
                ));
                (String::new(), String::new())
            }
            FieldCell::Unresolved => {
                warnings.push(RowWarning::new(
                    WarningKind::UnresolvedColumn,
                    SemanticField::FirstSurname,
                    "no surname column detected",
                ));
                (String::new(), String::new())
            }
        };
        let given_names = match given_cell {
            FieldCell::Value(raw) => clean_name(raw),
            FieldCell::Missing => {
                warnings.push(RowWarning::new(
                    WarningKind::MissingValue,
                    SemanticField::GivenNames,
                    "given names cell is blank",
                ));
                String::new()
            }
            FieldCell::Unresolved => {
                warnings.push(RowWarning::new(
                    WarningKind::UnresolvedColumn,
                    SemanticField::GivenNames,
                    "no given names column detected",
                ));
                String::new()
            }
        };
        ResolvedNames {
            first_surname,
            second_surname,
            given_names,
        }
    }

    fn names_from_full_name(
        &self,
        row: &[String],
        warnings: &mut Vec<RowWarning>,
    ) -> ResolvedNames {
        match self.cell(row, SemanticField::FullName) {
            FieldCell::Value(raw) => {
                let split = split_full_name(raw);
                if split.first_surname.is_empty() {
                    warnings.push(RowWarning::new(
                        WarningKind::MissingValue,
                        SemanticField::FullName,
                        "combined name cell has no usable name",
                    ));
                } else {
                    warnings.push(RowWarning::new(
                        WarningKind::InferredValue,
                        SemanticField::FirstSurname,
                        "names split from a combined name column",
                    ));
                }
                ResolvedNames {
                    first_surname: split.first_surname,
                    second_surname: split.second_surname,
                    given_names: split.given_names,
                }
            }
            FieldCell::Missing | FieldCell::Unresolved => {
                warnings.push(RowWarning::new(
                    WarningKind::MissingValue,
                    SemanticField::FullName,
                    "combined name cell is blank",
                ));
                ResolvedNames::default()
            }
        }
    }

    fn date_field(
        &self,
        row: &[String],
        field: SemanticField,
        warnings: &mut Vec<RowWarning>,
    ) -> String {
        match self.cell(row, field) {
            FieldCell::Value(raw) => match self.dates.normalize(raw) {
                DateOutcome::Parsed(date) => {
                    if date.ambiguous {
                        warnings.push(RowWarning::new(
                            WarningKind::AmbiguousDate,
                            field,
                            format!("`{raw}` read day-first, month-first also fits"),
                        ));
                    }
                    date.formatted
                }
                DateOutcome::Empty => {
                    warnings.push(RowWarning::new(
                        WarningKind::MissingValue,
                        field,
                        "date cell is blank",
                    ));
                    String::new()
                }
                DateOutcome::Unrecognized => {
                    warnings.push(RowWarning::new(
                        WarningKind::UnparseableDate,
                        field,
                        format!("no date format matches `{raw}`"),
                    ));
                    String::new()
                }
            },
            FieldCell::Missing => {
                warnings.push(RowWarning::new(
                    WarningKind::MissingValue,
                    field,
                    "date cell is blank",
                ));
                String::new()
            }
            FieldCell::Unresolved => {
                warnings.push(RowWarning::new(
                    WarningKind::UnresolvedColumn,
                    field,
                    format!("no {field} column detected"),
                ));
                String::new()
            }
        }
    }

    fn procedence(
        &self,
        row: &[String],
        nationality: &PlaceCode,
        warnings: &mut Vec<RowWarning>,
    ) -> String {
        match self.cell(row, SemanticField::Procedence) {
            FieldCell::Value(raw) => {
                if let Some(place) = normalize_place(raw, self.store) {
                    return place.code;
                }
                warnings.push(RowWarning::new(
                    WarningKind::UnknownPlace,
                    SemanticField::Procedence,
                    format!("no city or country matches `{raw}`"),
                ));
                self.procedence_from_nationality(nationality, warnings)
            }
            FieldCell::Missing => self.procedence_from_nationality(nationality, warnings),
            FieldCell::Unresolved => {
                warnings.push(RowWarning::new(
                    WarningKind::UnresolvedColumn,
                    SemanticField::Procedence,
                    "no procedence column detected",
                ));
                self.procedence_from_nationality(nationality, warnings)
            }
        }
    }

    /// Guests usually arrive from their home country, so an unusable
    /// procedence borrows the nationality code. An unknown nationality has
    /// nothing to lend and the field stays blank.
    fn procedence_from_nationality(
        &self,
        nationality: &PlaceCode,
        warnings: &mut Vec<RowWarning>,
    ) -> String {
        if nationality.code == UNKNOWN_COUNTRY_CODE || nationality.code.is_empty() {
            return String::new();
        }
        warnings.push(RowWarning::new(
            WarningKind::InferredValue,
            SemanticField::Procedence,
            "procedence inferred from nationality",
        ));
        nationality.code.clone()
    }

    fn destination(&self, row: &[String], warnings: &mut Vec<RowWarning>) -> String {
        match self.cell(row, SemanticField::Destination) {
            FieldCell::Value(raw) => {
                if let Some(place) = normalize_place(raw, self.store) {
                    return place.code;
                }
                warnings.push(RowWarning::new(
                    WarningKind::UnknownPlace,
                    SemanticField::Destination,
                    format!("no city or country matches `{raw}`"),
                ));
                DEFAULT_DESTINATION_CODE.to_string()
            }
            // Guests in a Colombian hotel are in Colombia; a blank cell
            // quietly takes the default.
            FieldCell::Missing => DEFAULT_DESTINATION_CODE.to_string(),
            FieldCell::Unresolved => {
                warnings.push(RowWarning::new(
                    WarningKind::UnresolvedColumn,
                    SemanticField::Destination,
                    "no destination column detected",
                ));
                DEFAULT_DESTINATION_CODE.to_string()
            }
        }
    }

    /// Duplicate key is document, movement date and direction. Rows without
    /// a document number cannot be keyed and are never flagged.
    fn track_duplicate(
        &mut self,
        document_number: &str,
        movement_date: &str,
        warnings: &mut Vec<RowWarning>,
    ) {
        if document_number.is_empty() {
            return;
        }
        let key = format!(
            "{document_number}|{movement_date}|{}",
            self.context.movement.code()
        );
        if !self.seen_movements.insert(key) {
            warnings.push(RowWarning::row_level(
                WarningKind::DuplicateRow,
                "same document and movement date as an earlier row",
            ));
        }
    }
}

fn unknown_nationality() -> PlaceCode {
    PlaceCode {
        code: UNKNOWN_COUNTRY_CODE.to_string(),
        confidence: Confidence::Low,
    }
}
