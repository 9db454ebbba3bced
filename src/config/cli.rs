use super::toml_config::TomlConfig;
use super::{SourceSettings, ViewerSettings};
use crate::adapters::http::HttpSourceOptions;
use crate::domain::model::QuoteStyle;
use crate::utils::error::{Result, ViewerError};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "object-viewer")]
#[command(about = "Browse object and field metadata and export fields to CSV")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Metadata service base URL (overrides the config file)
    #[arg(long, conflicts_with = "source_file")]
    pub endpoint: Option<String>,

    /// JSON metadata snapshot to read instead of a service
    #[arg(long)]
    pub source_file: Option<String>,

    /// Object identifier or label to show fields for
    #[arg(short, long)]
    pub object: Option<String>,

    /// Case-insensitive substring of the field label
    #[arg(long, default_value = "")]
    pub name_filter: String,

    /// Case-insensitive substring of the field datatype
    #[arg(long, default_value = "")]
    pub datatype_filter: String,

    /// Write "<object> Data.csv" to the output path
    #[arg(long)]
    pub export: bool,

    #[arg(long)]
    pub output_path: Option<String>,

    /// compat or rfc4180
    #[arg(long)]
    pub quote_style: Option<QuoteStyle>,

    /// Print the CSV as a data URI
    #[arg(long)]
    pub print_data_uri: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    /// Loads the TOML file if one was given, then applies flag overrides.
    pub fn resolve_settings(&self) -> Result<ViewerSettings> {
        let mut settings = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                ViewerSettings::from_toml(&TomlConfig::from_file(path)?)?
            }
            None => {
                let source = match (&self.endpoint, &self.source_file) {
                    (Some(endpoint), _) => SourceSettings::Http(HttpSourceOptions::new(endpoint)),
                    (None, Some(path)) => SourceSettings::File { path: path.clone() },
                    (None, None) => {
                        return Err(ViewerError::MissingConfigError {
                            field: "--config, --endpoint or --source-file".to_string(),
                        })
                    }
                };
                ViewerSettings::new(source)
            }
        };

        if self.config.is_some() {
            if let Some(endpoint) = &self.endpoint {
                match &mut settings.source {
                    SourceSettings::Http(options) => options.endpoint = endpoint.clone(),
                    SourceSettings::File { .. } => {
                        settings.source = SourceSettings::Http(HttpSourceOptions::new(endpoint));
                    }
                }
                tracing::info!("🔧 Endpoint overridden to: {}", endpoint);
            } else if let Some(path) = &self.source_file {
                settings.source = SourceSettings::File { path: path.clone() };
                tracing::info!("🔧 Source overridden to snapshot: {}", path);
            }
        }

        if let Some(output_path) = &self.output_path {
            settings.output_path = output_path.clone();
        }
        if let Some(quote_style) = self.quote_style {
            settings.quote_style = quote_style;
        }

        Ok(settings)
    }
}
