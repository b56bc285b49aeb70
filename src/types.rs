/// Catalog resources as returned by the API and written to stdout.
///
/// Field declaration order is serialization order for JSON and YAML output.
use serde::{Deserialize, Serialize};

/// A product in the catalog (e.g. `p-mysql`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Numeric product ID.
    pub id: u64,
    /// URL-safe slug, e.g. "p-mysql".
    pub slug: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// A release of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Numeric release ID.
    pub id: u64,
    /// Version string, e.g. "0.1.2-rc1".
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_type: Option<String>,
    /// Release date as sent by the server ("YYYY-MM-DD").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
}

/// A user group controlling access to releases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroup {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A release that another release depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDependency {
    pub release: DependentRelease,
}

/// The release side of a [`ReleaseDependency`], with its owning product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependentRelease {
    pub id: u64,
    pub version: String,
    pub product: ProductRef,
}

/// Minimal product reference nested inside other resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: u64,
    pub slug: String,
}

/// A structured error envelope for JSON/YAML error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Close identifiers offered for not-found errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl ErrorOutput {
    /// Construct from a `CatalogError`.
    #[must_use]
    pub fn from_catalog_error(err: &crate::catalog::CatalogError) -> Self {
        use crate::catalog::CatalogError;
        let suggestions = match err {
            CatalogError::NotFound { suggestions, .. } if !suggestions.is_empty() => {
                Some(suggestions.clone())
            }
            _ => None,
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
                suggestions,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_optional_fields_default() {
        let r: Release = serde_json::from_str(r#"{"id":7,"version":"1.0"}"#).unwrap();
        assert_eq!(r.description, "");
        assert!(r.release_type.is_none());
        assert_eq!(serde_json::to_string(&r).unwrap(), r#"{"id":7,"version":"1.0","description":""}"#);
    }

    #[test]
    fn test_release_ignores_unknown_fields() {
        let r: Release = serde_json::from_str(
            r#"{"id":1,"version":"2.0","description":"d","_links":{"self":{"href":"x"}}}"#,
        )
        .unwrap();
        assert_eq!(r.version, "2.0");
    }

    #[test]
    fn test_dependency_nested_shape() {
        let d: ReleaseDependency = serde_json::from_str(
            r#"{"release":{"id":3,"version":"1.2","product":{"id":9,"slug":"p-redis"}}}"#,
        )
        .unwrap();
        assert_eq!(d.release.product.slug, "p-redis");
        assert_eq!(d.release.product.id, 9);
    }
}
