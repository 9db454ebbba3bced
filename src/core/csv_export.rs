use crate::domain::model::{cell_text, QuoteStyle, Record};
use crate::utils::error::Result;
use std::collections::HashSet;

const ROW_END: char = '\n';

/// Union of all record keys, in first-seen order.
pub fn column_set(records: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for record in records {
        for key in record.keys() {
            if seen.insert(key.as_str()) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter {
    style: QuoteStyle,
}

impl CsvExporter {
    pub fn new(style: QuoteStyle) -> Self {
        Self { style }
    }

    /// Header line plus one line per record, every line ending in `\n`.
    /// Only the `Rfc4180` style can fail, and only if the csv writer does.
    pub fn serialize(&self, records: &[Record]) -> Result<String> {
        let columns = column_set(records);
        tracing::debug!(
            "Serializing {} records with {} columns ({:?})",
            records.len(),
            columns.len(),
            self.style
        );

        match self.style {
            QuoteStyle::Compat => Ok(serialize_compat(&columns, records)),
            QuoteStyle::Rfc4180 => serialize_rfc4180(&columns, records),
        }
    }
}

fn serialize_compat(columns: &[String], records: &[Record]) -> String {
    let mut csv_string = columns.join(",");
    csv_string.push(ROW_END);

    for record in records {
        let line = columns
            .iter()
            .map(|column| format!("\"{}\"", cell_text(record.get(column))))
            .collect::<Vec<_>>()
            .join(",");
        csv_string.push_str(&line);
        csv_string.push(ROW_END);
    }

    csv_string
}

fn serialize_rfc4180(columns: &[String], records: &[Record]) -> Result<String> {
    // No columns: bare lines, same as the compat style.
    if columns.is_empty() {
        return Ok(ROW_END.to_string().repeat(records.len() + 1));
    }

    let mut header = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    header.write_record(columns)?;
    let buffer = header
        .into_inner()
        .map_err(|e| e.into_error())?;

    let mut rows = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(buffer);
    for record in records {
        rows.write_record(columns.iter().map(|column| cell_text(record.get(column))))?;
    }
    let buffer = rows
        .into_inner()
        .map_err(|e| e.into_error())?;

    String::from_utf8(buffer)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("test records must be objects"),
        }
    }

    fn compat(records: &[Record]) -> String {
        CsvExporter::default().serialize(records).unwrap()
    }

    #[test]
    fn test_single_record() {
        let records = vec![record(json!({"Id": "001", "Name": "Acme"}))];
        assert_eq!(compat(&records), "Id,Name\n\"001\",\"Acme\"\n");
    }

    #[test]
    fn test_empty_input_is_single_newline() {
        assert_eq!(compat(&[]), "\n");
        let rfc = CsvExporter::new(QuoteStyle::Rfc4180).serialize(&[]).unwrap();
        assert_eq!(rfc, "\n");
    }

    #[test]
    fn test_heterogeneous_keys_fill_missing_cells() {
        let records = vec![
            record(json!({"Id": "1"})),
            record(json!({"Id": "2", "Name": "X"})),
        ];
        assert_eq!(column_set(&records), vec!["Id", "Name"]);
        assert_eq!(compat(&records), "Id,Name\n\"1\",\"\"\n\"2\",\"X\"\n");
    }

    #[test]
    fn test_line_and_field_counts() {
        let records = vec![
            record(json!({"a": "1", "b": "2"})),
            record(json!({"c": "3"})),
            record(json!({"b": "4", "a": "5"})),
        ];
        let output = compat(&records);
        let lines: Vec<&str> = output.strip_suffix('\n').unwrap().split('\n').collect();
        assert_eq!(lines.len(), records.len() + 1);
        for line in lines {
            assert_eq!(line.split(',').count(), 3);
        }
        assert_eq!(output, compat(&records));
    }

    #[test]
    fn test_null_and_non_string_values() {
        let records = vec![record(json!({
            "Label": null,
            "Length": 80,
            "Unique": false,
            "Picklist": ["A", "B"]
        }))];
        assert_eq!(
            compat(&records),
            "Label,Length,Unique,Picklist\n\"\",\"80\",\"false\",\"[\"A\",\"B\"]\"\n"
        );
    }

    #[test]
    fn test_compat_leaves_embedded_quotes_alone() {
        let records = vec![record(json!({"Help": "say \"hi\", then go"}))];
        assert_eq!(compat(&records), "Help\n\"say \"hi\", then go\"\n");
    }

    #[test]
    fn test_rfc4180_doubles_embedded_quotes() {
        let records = vec![
            record(json!({"Help": "say \"hi\", then go", "Field Label": "A"})),
            record(json!({"Help": "plain"})),
        ];
        let output = CsvExporter::new(QuoteStyle::Rfc4180)
            .serialize(&records)
            .unwrap();
        assert_eq!(
            output,
            "Help,Field Label\n\"say \"\"hi\"\", then go\",\"A\"\n\"plain\",\"\"\n"
        );
    }

    #[test]
    fn test_records_without_keys() {
        let records = vec![Record::new(), Record::new()];
        assert_eq!(compat(&records), "\n\n\n");
        let rfc = CsvExporter::new(QuoteStyle::Rfc4180)
            .serialize(&records)
            .unwrap();
        assert_eq!(rfc, "\n\n\n");
    }

    #[test]
    fn test_empty_header_name_differs_between_styles() {
        let records = vec![record(json!({"": "x"}))];
        assert_eq!(compat(&records), "\n\"x\"\n");
        let rfc = CsvExporter::new(QuoteStyle::Rfc4180)
            .serialize(&records)
            .unwrap();
        assert_eq!(rfc, "\"\"\n\"x\"\n");
    }
}
