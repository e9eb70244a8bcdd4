use crate::error::ProjectorError;
use crate::model::{Row, Scalar};

/// Load CSV text into rows. First record = headers, values mapped
/// positionally; cells that parse as numbers become `Scalar::Number`.
/// Ragged records are tolerated: short rows simply omit the trailing
/// columns, extra cells are dropped.
pub fn load_rows(csv_text: &str) -> Result<Vec<Row>, ProjectorError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ProjectorError::Csv(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ProjectorError::Csv(e.to_string()))?;

        let mut fields = Vec::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            let Some(raw) = record.get(i) else {
                continue;
            };
            let value = raw.trim();
            fields.push((header.clone(), parse_scalar(value)));
        }
        rows.push(Row::from_pairs(fields));
    }

    Ok(rows)
}

fn parse_scalar(value: &str) -> Scalar {
    if !value.is_empty() {
        if let Ok(n) = value.parse::<f64>() {
            if n.is_finite() {
                return Scalar::Number(n);
            }
        }
    }
    Scalar::Text(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_basic() {
        let csv = "\
date,description,amount
2024-01-05,ACH TRANSFER,100.50
2024-01-06,CHECK 1042,-75
";
        let rows = load_rows(csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].get("date").and_then(Scalar::as_text),
            Some("2024-01-05")
        );
        assert_eq!(rows[0].get("amount"), Some(&Scalar::Number(100.5)));
        assert_eq!(rows[1].get("amount"), Some(&Scalar::Number(-75.0)));
    }

    #[test]
    fn quoted_commas_survive() {
        let csv = "date,description,amount\n2024-01-05,\"TRANSFER, WIRE\",10\n";
        let rows = load_rows(csv).unwrap();
        assert_eq!(
            rows[0].get("description").and_then(Scalar::as_text),
            Some("TRANSFER, WIRE")
        );
    }

    #[test]
    fn short_record_omits_trailing_columns() {
        let csv = "date,description,amount\n2024-01-05,PARTIAL\n";
        let rows = load_rows(csv).unwrap();
        assert_eq!(rows[0].len(), 2);
        assert!(rows[0].get("amount").is_none());
    }

    #[test]
    fn empty_cell_stays_text() {
        let csv = "date,amount\n2024-01-05,\n";
        let rows = load_rows(csv).unwrap();
        assert_eq!(rows[0].get("amount"), Some(&Scalar::Text(String::new())));
    }

    #[test]
    fn headers_only_yields_no_rows() {
        let rows = load_rows("date,amount\n").unwrap();
        assert!(rows.is_empty());
    }
}
