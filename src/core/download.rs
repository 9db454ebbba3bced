use crate::domain::ports::Storage;
use crate::utils::error::Result;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

pub const CSV_MIME_TYPE: &str = "text/csv";
pub const CSV_CHARSET: &str = "utf-8";

/// Everything escaped except `A-Z a-z 0-9 ; , / ? : @ & = + $ - _ . ! ~ * ' ( ) #`.
const ENCODE_URI: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

pub fn encode_uri(input: &str) -> String {
    utf8_percent_encode(input, ENCODE_URI).to_string()
}

pub fn download_file_name(object_label: &str) -> String {
    format!("{} Data.csv", object_label)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDownload {
    pub file_name: String,
    pub mime_type: &'static str,
    pub charset: &'static str,
    pub content: String,
}

impl CsvDownload {
    pub fn new(object_label: &str, content: String) -> Self {
        Self {
            file_name: download_file_name(object_label),
            mime_type: CSV_MIME_TYPE,
            charset: CSV_CHARSET,
            content,
        }
    }

    pub fn data_uri(&self) -> String {
        format!(
            "data:{};charset={},{}",
            self.mime_type,
            self.charset,
            encode_uri(&self.content)
        )
    }

    /// Writes the CSV under its download name and returns that name.
    pub async fn save<S: Storage>(&self, storage: &S) -> Result<String> {
        tracing::debug!(
            "Writing {} ({} bytes) to storage",
            self.file_name,
            self.content.len()
        );
        storage
            .write_file(&self.file_name, self.content.as_bytes())
            .await?;
        Ok(self.file_name.clone())
    }
}
