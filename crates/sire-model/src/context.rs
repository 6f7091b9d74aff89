use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// City code used for the report header when the operator supplies none.
/// 5001 is Medellín, the default deployment site.
pub const DEFAULT_REPORT_CITY: &str = "5001";

/// Direction of the reported movement. SIRE encodes check-ins as `E`
/// (entrada) and check-outs as `S` (salida).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    Entry,
    Exit,
}

impl MovementType {
    /// Single-letter SIRE code emitted in field 9 of every record.
    pub fn code(&self) -> &'static str {
        match self {
            MovementType::Entry => "E",
            MovementType::Exit => "S",
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for MovementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "E" | "ENTRY" | "ENTRADA" | "CHECKIN" | "CHECK-IN" => Ok(MovementType::Entry),
            "S" | "EXIT" | "SALIDA" | "CHECKOUT" | "CHECK-OUT" => Ok(MovementType::Exit),
            _ => Err(format!("unknown movement type `{s}`")),
        }
    }
}

/// Batch-constant parameters supplied by the operator.
///
/// These never vary per row: the establishment and city codes land verbatim
/// in fields 1 and 2 of every record, and the movement type selects both the
/// field-9 code and the date vocabulary the classifier looks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorContext {
    pub establishment_code: String,
    pub report_city_code: String,
    pub movement: MovementType,
    /// SIRE takes no reports on Colombian nationals; with this set, rows
    /// whose nationality resolves to Colombia are excluded from the output
    /// instead of converted.
    pub exclude_colombian_nationals: bool,
}

impl OperatorContext {
    pub fn new(establishment_code: impl Into<String>, movement: MovementType) -> Self {
        Self {
            establishment_code: establishment_code.into(),
            report_city_code: DEFAULT_REPORT_CITY.to_string(),
            movement,
            exclude_colombian_nationals: false,
        }
    }

    #[must_use]
    pub fn with_report_city(mut self, city_code: impl Into<String>) -> Self {
        self.report_city_code = city_code.into();
        self
    }

    #[must_use]
    pub fn with_exclude_colombian_nationals(mut self, exclude: bool) -> Self {
        self.exclude_colombian_nationals = exclude;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_codes() {
        assert_eq!(MovementType::Entry.code(), "E");
        assert_eq!(MovementType::Exit.code(), "S");
    }

    #[test]
    fn movement_parses_codes_and_words() {
        assert_eq!("e".parse::<MovementType>().unwrap(), MovementType::Entry);
        assert_eq!("Salida".parse::<MovementType>().unwrap(), MovementType::Exit);
        assert_eq!(
            "check-in".parse::<MovementType>().unwrap(),
            MovementType::Entry
        );
        assert!("X".parse::<MovementType>().is_err());
    }

    #[test]
    fn context_defaults() {
        let ctx = OperatorContext::new("10675", MovementType::Entry);
        assert_eq!(ctx.report_city_code, DEFAULT_REPORT_CITY);
        assert!(!ctx.exclude_colombian_nationals);

        let ctx = ctx.with_report_city("11001").with_exclude_colombian_nationals(true);
        assert_eq!(ctx.report_city_code, "11001");
        assert!(ctx.exclude_colombian_nationals);
    }
}
