use crate::utils::error::{Result, ViewerError};
use url::Url;

pub const OBJECT_PLACEHOLDER: &str = "{object}";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> ViewerError {
    ViewerError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Base URL of the metadata service. API paths are appended verbatim, so a
/// query string or fragment on the base would end up in the middle of them.
pub fn validate_endpoint(field_name: &str, endpoint: &str) -> Result<()> {
    if endpoint.is_empty() {
        return Err(invalid(field_name, endpoint, "URL cannot be empty"));
    }

    let url = Url::parse(endpoint)
        .map_err(|e| invalid(field_name, endpoint, format!("Invalid URL format: {}", e)))?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(invalid(
                field_name,
                endpoint,
                format!("Unsupported URL scheme: {}", scheme),
            ))
        }
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(
            field_name,
            endpoint,
            "Endpoint must not carry a query string or fragment",
        ));
    }
    Ok(())
}

/// A path appended to the endpoint, e.g. `/objects`.
pub fn validate_api_path(field_name: &str, path: &str) -> Result<()> {
    if !path.starts_with('/') {
        return Err(invalid(field_name, path, "API path must start with '/'"));
    }
    Ok(())
}

/// The per-object path must name where the object identifier goes.
pub fn validate_fields_path(field_name: &str, path: &str) -> Result<()> {
    validate_api_path(field_name, path)?;
    if !path.contains(OBJECT_PLACEHOLDER) {
        return Err(invalid(
            field_name,
            path,
            "Path must contain the {object} placeholder",
        ));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ViewerError::MissingConfigError {
        field: field_name.to_string(),
    })
}

/// Notification labels are shown to the user, so blank text is rejected.
pub fn validate_label(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Label cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            &value.to_string(),
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(result: Result<()>) -> String {
        match result {
            Err(ViewerError::InvalidConfigValueError { reason, .. }) => reason,
            other => panic!("expected an invalid value error, got {:?}", other),
        }
    }

    #[test]
    fn test_metadata_endpoint() {
        assert!(validate_endpoint("source.endpoint", "https://meta.example.com/api").is_ok());
        assert!(validate_endpoint("source.endpoint", "http://127.0.0.1:8080").is_ok());
        assert_eq!(
            reason(validate_endpoint("source.endpoint", "")),
            "URL cannot be empty"
        );
        assert!(reason(validate_endpoint("source.endpoint", "meta.example.com"))
            .starts_with("Invalid URL format"));
        assert_eq!(
            reason(validate_endpoint("source.endpoint", "ftp://meta.example.com")),
            "Unsupported URL scheme: ftp"
        );
    }

    #[test]
    fn test_endpoint_with_query_is_rejected() {
        assert!(validate_endpoint("source.endpoint", "https://meta.example.com/api?v=2").is_err());
        assert!(validate_endpoint("source.endpoint", "https://meta.example.com/#objects").is_err());
    }

    #[test]
    fn test_objects_and_fields_paths() {
        assert!(validate_api_path("source.objects_path", "/objects").is_ok());
        assert!(validate_api_path("source.objects_path", "objects").is_err());
        assert!(validate_api_path("source.objects_path", "").is_err());

        assert!(validate_fields_path("source.fields_path", "/describe/{object}").is_ok());
        assert_eq!(
            reason(validate_fields_path("source.fields_path", "/fields")),
            "Path must contain the {object} placeholder"
        );
        assert!(validate_fields_path("source.fields_path", "{object}/fields").is_err());
    }

    #[test]
    fn test_snapshot_and_output_paths() {
        assert!(validate_path("source.path", "metadata.json").is_ok());
        assert!(validate_path("export.output_path", "./exports").is_ok());
        assert_eq!(
            reason(validate_path("export.output_path", "")),
            "Path cannot be empty"
        );
        assert_eq!(
            reason(validate_path("source.path", "meta\0data.json")),
            "Path contains null bytes"
        );
    }

    #[test]
    fn test_request_timeout_bounds() {
        assert!(validate_range("source.timeout_seconds", 30u64, 1, 300).is_ok());
        assert!(validate_range("source.timeout_seconds", 0u64, 1, 300).is_err());
        assert_eq!(
            reason(validate_range("source.timeout_seconds", 301u64, 1, 300)),
            "Value must be between 1 and 300"
        );
    }

    #[test]
    fn test_no_data_labels() {
        assert!(validate_label("labels.no_data_title", "No Data Found").is_ok());
        assert!(validate_label("labels.no_data_message", "   ").is_err());
    }

    #[test]
    fn test_snapshot_path_is_required_for_file_sources() {
        let present = Some("metadata.json".to_string());
        let missing: Option<String> = None;
        assert_eq!(
            validate_required_field("source.path", &present).unwrap(),
            "metadata.json"
        );
        assert!(matches!(
            validate_required_field("source.path", &missing),
            Err(ViewerError::MissingConfigError { field }) if field == "source.path"
        ));
    }
}
