use crate::domain::model::RawField;
use crate::domain::ports::MetadataSource;
use crate::utils::error::{Result, ViewerError};
use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

pub const DEFAULT_OBJECTS_PATH: &str = "/objects";
pub const DEFAULT_FIELDS_PATH: &str = "/objects/{object}/fields";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSourceOptions {
    pub endpoint: String,
    pub objects_path: String,
    /// `{object}` is replaced by the percent-encoded object identifier.
    pub fields_path: String,
    pub timeout_seconds: u64,
    pub headers: HashMap<String, String>,
}

impl HttpSourceOptions {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            objects_path: DEFAULT_OBJECTS_PATH.to_string(),
            fields_path: DEFAULT_FIELDS_PATH.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            headers: HashMap::new(),
        }
    }
}

pub struct HttpMetadataSource {
    client: Client,
    options: HttpSourceOptions,
}

impl HttpMetadataSource {
    pub fn new(options: HttpSourceOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &options.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ViewerError::InvalidConfigValueError {
                    field: "source.headers".to_string(),
                    value: name.clone(),
                    reason: format!("Invalid header name: {}", e),
                }
            })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| ViewerError::InvalidConfigValueError {
                    field: format!("source.headers.{}", name),
                    value: value.clone(),
                    reason: format!("Invalid header value: {}", e),
                })?;
            headers.insert(header_name, header_value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .default_headers(headers)
            .build()?;

        Ok(Self { client, options })
    }

    fn base(&self) -> &str {
        self.options.endpoint.trim_end_matches('/')
    }

    pub fn objects_url(&self) -> String {
        format!("{}{}", self.base(), self.options.objects_path)
    }

    pub fn fields_url(&self, object: &str) -> String {
        let encoded = utf8_percent_encode(object, PATH_SEGMENT).to_string();
        format!(
            "{}{}",
            self.base(),
            self.options.fields_path.replace("{object}", &encoded)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ViewerError::SourceError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl MetadataSource for HttpMetadataSource {
    async fn list_object_types(&self) -> Result<BTreeMap<String, String>> {
        self.get_json(&self.objects_url()).await
    }

    async fn list_fields(&self, object: &str) -> Result<Vec<RawField>> {
        self.get_json(&self.fields_url(object)).await
    }
}
