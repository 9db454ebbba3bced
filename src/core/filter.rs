use crate::domain::model::FieldRecord;

/// Name and datatype search, both case-insensitive substring matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldFilter {
    pub name: String,
    pub datatype: String,
}

impl FieldFilter {
    pub fn new(name: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            datatype: datatype.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.datatype.is_empty()
    }

    pub fn matches(&self, field: &FieldRecord) -> bool {
        contains_ignore_case(&field.field_label, &self.name)
            && contains_ignore_case(&field.field_type, &self.datatype)
    }

    /// Always starts from `complete`, never from a previous result.
    pub fn apply(&self, complete: &[FieldRecord]) -> Vec<FieldRecord> {
        complete
            .iter()
            .filter(|field| self.matches(field))
            .cloned()
            .collect()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
