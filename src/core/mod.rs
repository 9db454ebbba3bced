pub mod csv_export;
pub mod download;
pub mod filter;
pub mod viewer;

pub use crate::domain::model::{FieldRecord, ObjectOption, QuoteStyle, RawField, Record};
pub use crate::domain::ports::{ConfigProvider, MetadataSource, Notifier, Storage};
pub use crate::utils::error::Result;
