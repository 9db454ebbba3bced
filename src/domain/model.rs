use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered column name to value mapping. Key order is insertion order.
pub type Record = Map<String, Value>;

/// Text for one cell. Missing keys and JSON nulls both become empty.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectOption {
    pub label: String,
    pub value: String,
}

/// Field metadata exactly as the metadata source returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawField {
    #[serde(rename = "FieldLabel")]
    pub field_label: String,
    #[serde(rename = "FieldAPIName")]
    pub field_api_name: String,
    #[serde(rename = "FieldType")]
    pub field_type: String,
    /// `null` and a missing flag are both `None`.
    #[serde(rename = "isRequired", default)]
    pub is_required: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Row used for display and export. `is_required` holds "Yes" or "No".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRecord {
    #[serde(rename = "FieldLabel")]
    pub field_label: String,
    #[serde(rename = "FieldAPIName")]
    pub field_api_name: String,
    #[serde(rename = "FieldType")]
    pub field_type: String,
    #[serde(rename = "isRequired")]
    pub is_required: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FieldRecord {
    /// A source flag of `true` becomes "No" and anything else "Yes". This
    /// polarity matches the exports produced by the existing tool.
    pub fn from_raw(raw: RawField) -> Self {
        let is_required = if raw.is_required == Some(true) {
            "No"
        } else {
            "Yes"
        };
        Self {
            field_label: raw.field_label,
            field_api_name: raw.field_api_name,
            field_type: raw.field_type,
            is_required: is_required.to_string(),
            extra: raw.extra,
        }
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("FieldLabel".into(), Value::String(self.field_label.clone()));
        record.insert(
            "FieldAPIName".into(),
            Value::String(self.field_api_name.clone()),
        );
        record.insert("FieldType".into(), Value::String(self.field_type.clone()));
        record.insert("isRequired".into(), Value::String(self.is_required.clone()));
        for (key, value) in &self.extra {
            record.entry(key.clone()).or_insert_with(|| value.clone());
        }
        record
    }

    /// One cell per entry of `FIELD_COLUMNS`, looked up by field name.
    pub fn table_cells(&self) -> Vec<String> {
        let record = self.to_record();
        FIELD_COLUMNS
            .iter()
            .map(|column| cell_text(record.get(column.field_name)))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub variant: NotificationVariant,
}

/// How data cells are quoted in CSV exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    /// Header bare, every cell wrapped in quotes, embedded quotes left as-is.
    #[default]
    Compat,
    /// Embedded quotes doubled; header quoted only when it has to be.
    Rfc4180,
}

impl std::str::FromStr for QuoteStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compat" => Ok(QuoteStyle::Compat),
            "rfc4180" => Ok(QuoteStyle::Rfc4180),
            other => Err(format!(
                "Unsupported quote style: {}. Valid styles: compat, rfc4180",
                other
            )),
        }
    }
}

/// Title and message shown when filtering leaves no rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationLabels {
    pub no_data_title: String,
    pub no_data_message: String,
}

impl Default for NotificationLabels {
    fn default() -> Self {
        Self {
            no_data_title: "No Data Found".to_string(),
            no_data_message: "Download will be disabled".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableColumn {
    pub label: &'static str,
    pub field_name: &'static str,
}

pub const FIELD_COLUMNS: [TableColumn; 4] = [
    TableColumn {
        label: "Field Name",
        field_name: "FieldLabel",
    },
    TableColumn {
        label: "Field API Name",
        field_name: "FieldAPIName",
    },
    TableColumn {
        label: "DataType",
        field_name: "FieldType",
    },
    TableColumn {
        label: "Required",
        field_name: "isRequired",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_flag_inversion() {
        let raw: RawField = serde_json::from_value(serde_json::json!({
            "FieldLabel": "Account Name",
            "FieldAPIName": "Name",
            "FieldType": "STRING",
            "isRequired": true
        }))
        .unwrap();
        assert_eq!(FieldRecord::from_raw(raw).is_required, "No");

        let raw: RawField = serde_json::from_value(serde_json::json!({
            "FieldLabel": "Description",
            "FieldAPIName": "Description",
            "FieldType": "TEXTAREA"
        }))
        .unwrap();
        assert_eq!(FieldRecord::from_raw(raw).is_required, "Yes");
    }

    #[test]
    fn test_null_required_flag_reads_as_yes() {
        let raw: RawField = serde_json::from_value(serde_json::json!({
            "FieldLabel": "Fax",
            "FieldAPIName": "Fax",
            "FieldType": "PHONE",
            "isRequired": null
        }))
        .unwrap();
        assert_eq!(raw.is_required, None);
        assert_eq!(FieldRecord::from_raw(raw).is_required, "Yes");
    }

    #[test]
    fn test_quote_style_parsing() {
        assert_eq!("compat".parse::<QuoteStyle>().unwrap(), QuoteStyle::Compat);
        assert_eq!("RFC4180".parse::<QuoteStyle>().unwrap(), QuoteStyle::Rfc4180);
        assert!("excel".parse::<QuoteStyle>().is_err());
    }

    #[test]
    fn test_to_record_keeps_column_order_and_extras() {
        let raw: RawField = serde_json::from_value(serde_json::json!({
            "FieldLabel": "Industry",
            "FieldAPIName": "Industry",
            "FieldType": "PICKLIST",
            "isRequired": false,
            "Length": 255
        }))
        .unwrap();
        let record = FieldRecord::from_raw(raw).to_record();
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["FieldLabel", "FieldAPIName", "FieldType", "isRequired", "Length"]
        );
        assert_eq!(record["Length"], serde_json::json!(255));
    }

    #[test]
    fn test_table_cells_follow_field_columns() {
        let raw: RawField = serde_json::from_value(serde_json::json!({
            "FieldLabel": "Annual Revenue",
            "FieldAPIName": "AnnualRevenue",
            "FieldType": "CURRENCY",
            "isRequired": true,
            "Precision": 18
        }))
        .unwrap();
        let cells = FieldRecord::from_raw(raw).table_cells();
        assert_eq!(cells.len(), FIELD_COLUMNS.len());
        assert_eq!(cells, vec!["Annual Revenue", "AnnualRevenue", "CURRENCY", "No"]);
    }

    #[test]
    fn test_notification_variant_wire_name() {
        assert_eq!(
            serde_json::to_value(NotificationVariant::Error).unwrap(),
            serde_json::json!("error")
        );
    }
}
