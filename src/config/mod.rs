#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::adapters::http::HttpSourceOptions;
use crate::core::ConfigProvider;
use crate::domain::model::{NotificationLabels, QuoteStyle};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_api_path, validate_endpoint, validate_fields_path, validate_label, validate_path,
    validate_range, Validate,
};
use toml_config::TomlConfig;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSettings {
    Http(HttpSourceOptions),
    File { path: String },
}

/// Settings after merging the TOML file with command line overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerSettings {
    pub source: SourceSettings,
    pub output_path: String,
    pub quote_style: QuoteStyle,
    pub labels: NotificationLabels,
}

impl ViewerSettings {
    pub fn new(source: SourceSettings) -> Self {
        Self {
            source,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            quote_style: QuoteStyle::default(),
            labels: NotificationLabels::default(),
        }
    }

    pub fn from_toml(config: &TomlConfig) -> Result<Self> {
        config.validate()?;

        let source = if config.is_file_source() {
            SourceSettings::File {
                path: config.source.path.clone().unwrap_or_default(),
            }
        } else {
            SourceSettings::Http(HttpSourceOptions {
                endpoint: config.source.endpoint.clone().unwrap_or_default(),
                objects_path: config.objects_path().to_string(),
                fields_path: config.fields_path().to_string(),
                timeout_seconds: config.timeout_seconds(),
                headers: config.source.headers.clone().unwrap_or_default(),
            })
        };

        Ok(Self {
            source,
            output_path: config
                .export
                .output_path
                .clone()
                .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string()),
            quote_style: config.export.quote_style.unwrap_or_default(),
            labels: config.notification_labels(),
        })
    }
}

impl ConfigProvider for ViewerSettings {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn quote_style(&self) -> QuoteStyle {
        self.quote_style
    }

    fn notification_labels(&self) -> NotificationLabels {
        self.labels.clone()
    }
}

impl Validate for ViewerSettings {
    fn validate(&self) -> Result<()> {
        match &self.source {
            SourceSettings::Http(options) => {
                validate_endpoint("source.endpoint", &options.endpoint)?;
                validate_api_path("source.objects_path", &options.objects_path)?;
                validate_fields_path("source.fields_path", &options.fields_path)?;
                validate_range("source.timeout_seconds", options.timeout_seconds, 1, 300)?;
            }
            SourceSettings::File { path } => validate_path("source.path", path)?,
        }
        validate_path("export.output_path", &self.output_path)?;
        validate_label("labels.no_data_title", &self.labels.no_data_title)?;
        validate_label("labels.no_data_message", &self.labels.no_data_message)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ViewerError;

    #[test]
    fn test_from_toml_http() {
        let config = TomlConfig::from_toml_str(
            r#"
[source]
type = "http"
endpoint = "https://meta.example.com"

[export]
quote_style = "rfc4180"
"#,
        )
        .unwrap();

        let settings = ViewerSettings::from_toml(&config).unwrap();
        match &settings.source {
            SourceSettings::Http(options) => {
                assert_eq!(options.endpoint, "https://meta.example.com");
                assert_eq!(options.fields_path, "/objects/{object}/fields");
            }
            other => panic!("unexpected source: {:?}", other),
        }
        assert_eq!(settings.output_path(), DEFAULT_OUTPUT_PATH);
        assert_eq!(settings.quote_style(), QuoteStyle::Rfc4180);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_toml_rejects_invalid_config() {
        let config = TomlConfig::from_toml_str("[source]\ntype = \"file\"\n").unwrap();
        assert!(ViewerSettings::from_toml(&config).is_err());
    }

    #[test]
    fn test_validate_defaults() {
        let settings = ViewerSettings::new(SourceSettings::File {
            path: "org.json".to_string(),
        });
        assert!(settings.validate().is_ok());

        let settings = ViewerSettings::new(SourceSettings::Http(HttpSourceOptions::new("nope")));
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_http_paths_and_timeout() {
        let mut options = HttpSourceOptions::new("https://meta.example.com");
        options.fields_path = "/fields".to_string();
        let settings = ViewerSettings::new(SourceSettings::Http(options));
        assert!(matches!(
            settings.validate(),
            Err(ViewerError::InvalidConfigValueError { field, .. }) if field == "source.fields_path"
        ));

        let mut options = HttpSourceOptions::new("https://meta.example.com");
        options.timeout_seconds = 0;
        let settings = ViewerSettings::new(SourceSettings::Http(options));
        assert!(settings.validate().is_err());
    }
}
