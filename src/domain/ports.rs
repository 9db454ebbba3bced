use crate::domain::model::{Notification, NotificationLabels, QuoteStyle, RawField};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Read-only lookups against the metadata service.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Display label to object identifier.
    async fn list_object_types(&self) -> Result<BTreeMap<String, String>>;
    async fn list_fields(&self, object: &str) -> Result<Vec<RawField>>;
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    fn quote_style(&self) -> QuoteStyle;
    fn notification_labels(&self) -> NotificationLabels;
}
