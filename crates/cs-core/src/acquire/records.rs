//! CSV rows to typed `(precinct, value)` records.

use cs_common::{Error, PrecinctCode, Result};
use cs_report::sections::{KEY_COLUMN, VALUE_COLUMN};

/// One source row reduced to the two columns the analysis needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// 1-based line number in the source (the header is line 1).
    pub line: u64,
    pub key: PrecinctCode,
    pub value: f64,
}

/// Parse the decoded source text.
///
/// Every row must carry a precinct code and a finite number in the value
/// column; the first offending row aborts the parse.
pub fn parse_records(text: &str, delimiter: u8) -> Result<Vec<RawRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(csv_error)?.clone();
    let key_idx = column_index(&headers, KEY_COLUMN)?;
    let value_idx = column_index(&headers, VALUE_COLUMN)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_error)?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let key = row.get(key_idx).unwrap_or_default();
        if key.is_empty() {
            return Err(Error::MalformedCsv(format!(
                "line {}: empty '{}' cell",
                line, KEY_COLUMN
            )));
        }

        let raw = row.get(value_idx).unwrap_or_default();
        let value = parse_value(raw).ok_or_else(|| Error::InvalidNumber {
            line,
            column: VALUE_COLUMN.to_string(),
            value: raw.to_string(),
        })?;

        records.push(RawRecord {
            line,
            key: PrecinctCode::new(key),
            value,
        });
    }

    Ok(records)
}

fn column_index(headers: &csv::StringRecord, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}') == column)
        .ok_or_else(|| Error::MissingColumn {
            column: column.to_string(),
        })
}

/// Finite real number; empty cells, `nan` and `inf` are rejected.
fn parse_value(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn csv_error(err: csv::Error) -> Error {
    Error::MalformedCsv(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "cisp;mes;ano;recuperacao_veiculos;aisp\n\
                          1;1;2023;10;5\n\
                          5;1;2023;3;5\n\
                          1;2;2023;7;5\n";

    #[test]
    fn test_parse_selects_columns() {
        let records = parse_records(SAMPLE, b';').unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].key.as_str(), "1");
        assert_eq!(records[0].value, 10.0);
        assert_eq!(records[0].line, 2);
        assert_eq!(records[2].line, 4);
        assert_eq!(records[2].value, 7.0);
    }

    #[test]
    fn test_missing_column() {
        let err = parse_records("cisp;roubo_veiculo\n1;2\n", b';').unwrap_err();
        match err {
            Error::MissingColumn { column } => assert_eq!(column, VALUE_COLUMN),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_wrong_delimiter_reports_missing_column() {
        let err = parse_records(SAMPLE, b',').unwrap_err();
        assert!(matches!(err, Error::MissingColumn { .. }));
    }

    #[test]
    fn test_invalid_number_carries_line_and_text() {
        let text = "cisp;recuperacao_veiculos\n1;4\n2;quatro\n";
        match parse_records(text, b';').unwrap_err() {
            Error::InvalidNumber { line, column, value } => {
                assert_eq!(line, 3);
                assert_eq!(column, VALUE_COLUMN);
                assert_eq!(value, "quatro");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_and_non_finite_cells_rejected() {
        for bad in ["", "nan", "inf", "-inf"] {
            let text = format!("cisp;recuperacao_veiculos\n1;{bad}\n");
            let err = parse_records(&text, b';').unwrap_err();
            assert_eq!(err.code(), 31, "value {bad:?} should be rejected");
        }
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = parse_records("cisp;recuperacao_veiculos\n;4\n", b';').unwrap_err();
        assert!(matches!(err, Error::MalformedCsv(_)));
    }

    #[test]
    fn test_ragged_row_is_malformed() {
        let err = parse_records("cisp;recuperacao_veiculos\n1;4;9\n", b';').unwrap_err();
        assert_eq!(err.code(), 32);
    }

    #[test]
    fn test_header_only_yields_no_records() {
        let records = parse_records("cisp;recuperacao_veiculos\n", b';').unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_decimal_values_and_padding() {
        let records = parse_records("cisp ; recuperacao_veiculos\n 7 ; 2.5 \n", b';').unwrap();
        assert_eq!(records[0].key.as_str(), "7");
        assert_eq!(records[0].value, 2.5);
    }
}
