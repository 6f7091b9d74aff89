//! CLI library components for the SIRE converter.

pub mod logging;
