pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{
    file::FileMetadataSource,
    http::{HttpMetadataSource, HttpSourceOptions},
    notify::{RecordingNotifier, TracingNotifier},
    storage::LocalStorage,
};
pub use crate::config::{SourceSettings, ViewerSettings};
pub use crate::core::{
    csv_export::CsvExporter,
    download::CsvDownload,
    filter::FieldFilter,
    viewer::{ObjectViewer, SelectOutcome},
};
pub use domain::model::{FieldRecord, ObjectOption, QuoteStyle, RawField, Record};
pub use utils::error::{Result, ViewerError};
