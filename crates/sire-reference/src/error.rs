use thiserror::Error;

/// Errors raised while parsing the embedded reference tables.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("{table}: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{table} row {row}: missing field `{field}`")]
    MissingField {
        table: &'static str,
        row: usize,
        field: &'static str,
    },

    #[error("{table} row {row}: duplicate code `{code}`")]
    DuplicateCode {
        table: &'static str,
        row: usize,
        code: String,
    },
}

pub type Result<T> = std::result::Result<T, ReferenceError>;
