use crate::adapters::http::{DEFAULT_FIELDS_PATH, DEFAULT_OBJECTS_PATH, DEFAULT_TIMEOUT_SECONDS};
use crate::domain::model::{NotificationLabels, QuoteStyle};
use crate::utils::error::{Result, ViewerError};
use crate::utils::validation::{
    validate_api_path, validate_endpoint, validate_fields_path, validate_label, validate_path,
    validate_range, validate_required_field, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub export: ExportConfig,
    pub labels: Option<LabelsConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// "http" or "file".
    pub r#type: String,
    pub endpoint: Option<String>,
    pub objects_path: Option<String>,
    pub fields_path: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
    /// Snapshot file for `type = "file"`.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_path: Option<String>,
    pub quote_style: Option<QuoteStyle>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelsConfig {
    pub no_data_title: Option<String>,
    pub no_data_message: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ViewerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ViewerError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn is_file_source(&self) -> bool {
        self.source.r#type == "file"
    }

    pub fn objects_path(&self) -> &str {
        self.source
            .objects_path
            .as_deref()
            .unwrap_or(DEFAULT_OBJECTS_PATH)
    }

    pub fn fields_path(&self) -> &str {
        self.source
            .fields_path
            .as_deref()
            .unwrap_or(DEFAULT_FIELDS_PATH)
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn notification_labels(&self) -> NotificationLabels {
        let defaults = NotificationLabels::default();
        match &self.labels {
            Some(labels) => NotificationLabels {
                no_data_title: labels
                    .no_data_title
                    .clone()
                    .unwrap_or(defaults.no_data_title),
                no_data_message: labels
                    .no_data_message
                    .clone()
                    .unwrap_or(defaults.no_data_message),
            },
            None => defaults,
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        match self.source.r#type.as_str() {
            "http" => {
                let endpoint = validate_required_field("source.endpoint", &self.source.endpoint)?;
                validate_endpoint("source.endpoint", endpoint)?;
                validate_api_path("source.objects_path", self.objects_path())?;
                validate_fields_path("source.fields_path", self.fields_path())?;
                validate_range("source.timeout_seconds", self.timeout_seconds(), 1, 300)?;
            }
            "file" => {
                let path = validate_required_field("source.path", &self.source.path)?;
                validate_path("source.path", path)?;
            }
            other => {
                return Err(ViewerError::InvalidConfigValueError {
                    field: "source.type".to_string(),
                    value: other.to_string(),
                    reason: "Unsupported source type. Valid types: http, file".to_string(),
                });
            }
        }

        if let Some(output_path) = &self.export.output_path {
            validate_path("export.output_path", output_path)?;
        }

        let labels = self.notification_labels();
        validate_label("labels.no_data_title", &labels.no_data_title)?;
        validate_label("labels.no_data_message", &labels.no_data_message)?;

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
