//! Report section data structures.
//!
//! Each section is a serializable snapshot of the numbers it prints, so the
//! JSON document and the text report always agree.

pub mod central;
pub mod dispersion;
pub mod metadata;
pub mod outliers;
pub mod position;
pub mod rankings;
pub mod shape;

pub use central::CentralTendencySection;
pub use dispersion::DispersionSection;
pub use metadata::RunMetadata;
pub use outliers::OutliersSection;
pub use position::PositionSection;
pub use rankings::RankingsSection;
pub use shape::ShapeSection;

use cs_common::Observation;
use std::fmt::Write;

/// Label printed in place of a measure that could not be computed.
pub const UNDEFINED: &str = "indefinida";

/// Column name of the key in precinct tables.
pub const KEY_COLUMN: &str = "cisp";

/// Column name of the value in precinct tables.
pub const VALUE_COLUMN: &str = "recuperacao_veiculos";

/// Write a blank line, the heading and an `=` underline of `rule` chars.
pub(crate) fn write_heading(out: &mut String, heading: &str, rule: usize) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", heading);
    let _ = writeln!(out, "{}", "=".repeat(rule));
}

/// Format an optional measure with two decimals.
pub(crate) fn fmt_opt2(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => UNDEFINED.to_string(),
    }
}

/// Write observations as a two-column table.
pub(crate) fn write_table(out: &mut String, rows: &[Observation]) {
    let key_width = rows
        .iter()
        .map(|o| o.key.as_str().chars().count())
        .max()
        .unwrap_or(0)
        .max(KEY_COLUMN.len());
    let _ = writeln!(
        out,
        "{:>kw$}  {:>vw$}",
        KEY_COLUMN,
        VALUE_COLUMN,
        kw = key_width,
        vw = VALUE_COLUMN.len()
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:>kw$}  {:>vw$}",
            row.key.as_str(),
            row.value,
            kw = key_width,
            vw = VALUE_COLUMN.len()
        );
    }
}
