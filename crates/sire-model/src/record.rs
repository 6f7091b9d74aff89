use serde::{Deserialize, Serialize};

/// One line of the SIRE submission file.
///
/// The format is positional: exactly 13 tab-separated fields, no header
/// line. Field values are stored exactly as they will be written; the
/// assembler guarantees they contain no tab or line-break characters, so
/// `to_line` is a plain join.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SireRecord {
    pub establishment_code: String,
    pub report_city_code: String,
    pub document_type: String,
    pub document_number: String,
    pub nationality: String,
    pub first_surname: String,
    pub second_surname: String,
    pub given_names: String,
    pub movement_code: String,
    pub movement_date: String,
    pub procedence: String,
    pub destination: String,
    pub birth_date: String,
}

impl SireRecord {
    /// Number of fields in a submission line, fixed by the SIRE format.
    pub const FIELD_COUNT: usize = 13;

    /// The 13 field values in submission order.
    pub fn fields(&self) -> [&str; Self::FIELD_COUNT] {
        [
            &self.establishment_code,
            &self.report_city_code,
            &self.document_type,
            &self.document_number,
            &self.nationality,
            &self.first_surname,
            &self.second_surname,
            &self.given_names,
            &self.movement_code,
            &self.movement_date,
            &self.procedence,
            &self.destination,
            &self.birth_date,
        ]
    }

    /// Serializes the record as one tab-delimited submission line.
    pub fn to_line(&self) -> String {
        self.fields().join("\t")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_has_exactly_thirteen_fields() {
        let record = SireRecord {
            establishment_code: "10675".to_string(),
            report_city_code: "5001".to_string(),
            document_type: "3".to_string(),
            document_number: "AB123456".to_string(),
            nationality: "249".to_string(),
            first_surname: "SMITH".to_string(),
            second_surname: String::new(),
            given_names: "JOHN".to_string(),
            movement_code: "E".to_string(),
            movement_date: "15/03/2024".to_string(),
            procedence: "249".to_string(),
            destination: "169".to_string(),
            birth_date: "01/06/1990".to_string(),
        };

        let line = record.to_line();
        assert_eq!(line.split('\t').count(), SireRecord::FIELD_COUNT);
        assert!(line.starts_with("10675\t5001\t3\tAB123456\t249"));
    }

    #[test]
    fn empty_fields_keep_their_position() {
        let record = SireRecord::default();
        let line = record.to_line();
        // 13 fields means 12 separators even when everything is empty.
        assert_eq!(line.matches('\t').count(), SireRecord::FIELD_COUNT - 1);
    }
}
