use crate::domain::model::RawField;
use crate::domain::ports::{MetadataSource, Storage};
use crate::utils::error::{Result, ViewerError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Offline copy of an org's metadata.
///
/// ```json
/// {
///   "objects": { "Account": "Account" },
///   "fields": { "Account": [ { "FieldLabel": "Account Name", ... } ] }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataSnapshot {
    pub objects: BTreeMap<String, String>,
    #[serde(default)]
    pub fields: HashMap<String, Vec<RawField>>,
}

pub struct FileMetadataSource<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> FileMetadataSource<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }

    async fn snapshot(&self) -> Result<MetadataSnapshot> {
        tracing::debug!("Reading metadata snapshot from {}", self.path);
        let data = self.storage.read_file(&self.path).await?;
        Ok(serde_json::from_slice(&data)?)
    }
}

#[async_trait]
impl<S: Storage> MetadataSource for FileMetadataSource<S> {
    async fn list_object_types(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.snapshot().await?.objects)
    }

    async fn list_fields(&self, object: &str) -> Result<Vec<RawField>> {
        let mut snapshot = self.snapshot().await?;
        snapshot
            .fields
            .remove(object)
            .ok_or_else(|| ViewerError::UnknownObject {
                object: object.to_string(),
            })
    }
}
