/// Blocking HTTP client for the catalog API (`{host}/api/v2`).
use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::errors::{ApiError, status_error};
use crate::types::{Product, Release, ReleaseDependency, UserGroup};

/// User-Agent sent with every request.
pub const USER_AGENT: &str = concat!("pivnet-cli/", env!("CARGO_PKG_VERSION"));

/// Path segments of the versioned API under the configured host.
const API_PREFIX: [&str; 2] = ["api", "v2"];

/// The operations commands need from the catalog service.
///
/// Every method is a single request; failures are returned as-is, without retry.
pub trait CatalogApi {
    /// Fetch one product by slug.
    fn get_product(&self, slug: &str) -> Result<Product, ApiError>;

    /// List all products visible to the caller.
    fn list_products(&self) -> Result<Vec<Product>, ApiError>;

    /// List all releases of a product, in server order.
    fn list_releases(&self, product_slug: &str) -> Result<Vec<Release>, ApiError>;

    /// List the releases a given release depends on.
    fn get_release_dependencies(
        &self,
        product_id: u64,
        release_id: u64,
    ) -> Result<Vec<ReleaseDependency>, ApiError>;

    /// List all user groups visible to the caller.
    fn list_user_groups(&self) -> Result<Vec<UserGroup>, ApiError>;

    /// List the user groups granted access to one release.
    fn list_user_groups_for_release(
        &self,
        product_slug: &str,
        release_id: u64,
    ) -> Result<Vec<UserGroup>, ApiError>;
}

/// Connection settings for [`HttpCatalogClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Scheme and host, e.g. `https://network.pivotal.io`.
    pub host: String,
    /// API token sent as `Authorization: Token <token>`.
    pub api_token: Option<String>,
    pub timeout: Duration,
}

#[derive(Deserialize)]
struct ProductsEnvelope {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Deserialize)]
struct ReleasesEnvelope {
    #[serde(default)]
    releases: Vec<Release>,
}

#[derive(Deserialize)]
struct DependenciesEnvelope {
    #[serde(default)]
    dependencies: Vec<ReleaseDependency>,
}

#[derive(Deserialize)]
struct UserGroupsEnvelope {
    #[serde(default)]
    user_groups: Vec<UserGroup>,
}

/// [`CatalogApi`] over HTTPS using `reqwest::blocking`.
pub struct HttpCatalogClient {
    http: Client,
    base_url: Url,
}

impl HttpCatalogClient {
    /// Build a client from connection settings.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ClientBuild` if the host is not an absolute URL, the
    /// token is not a valid header value, or the TLS backend cannot be initialised.
    pub fn new(settings: &ClientSettings) -> Result<Self, ApiError> {
        let base_url = base_url(&settings.host)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &settings.api_token {
            let mut value = HeaderValue::from_str(&format!("Token {token}"))
                .map_err(|e| ApiError::ClientBuild(format!("invalid API token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    /// Append `segments` to the API root, percent-encoding each one.
    ///
    /// A segment can never introduce a query, a fragment or another path level.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(ApiError::InvalidIdentifier {
                value: (*bad).to_owned(),
            });
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::ClientBuild(format!("host '{}' cannot carry a path", self.base_url))
            })?
            .extend(segments);
        Ok(url)
    }

    fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        let path = url.path().to_owned();
        debug!(%url, "GET");

        let response = self
            .http
            .get(url.clone())
            .send()
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        let body = response.text().map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;
        debug!(path = %path, status = status.as_u16(), bytes = body.len(), "response");

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &path, &body));
        }
        decode(&path, &body)
    }
}

impl CatalogApi for HttpCatalogClient {
    fn get_product(&self, slug: &str) -> Result<Product, ApiError> {
        self.get(&["products", slug])
    }

    fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get::<ProductsEnvelope>(&["products"])
            .map(|e| e.products)
    }

    fn list_releases(&self, product_slug: &str) -> Result<Vec<Release>, ApiError> {
        self.get::<ReleasesEnvelope>(&["products", product_slug, "releases"])
            .map(|e| e.releases)
    }

    fn get_release_dependencies(
        &self,
        product_id: u64,
        release_id: u64,
    ) -> Result<Vec<ReleaseDependency>, ApiError> {
        let product_id = product_id.to_string();
        let release_id = release_id.to_string();
        self.get::<DependenciesEnvelope>(&[
            "products",
            &product_id,
            "releases",
            &release_id,
            "dependencies",
        ])
        .map(|e| e.dependencies)
    }

    fn list_user_groups(&self) -> Result<Vec<UserGroup>, ApiError> {
        self.get::<UserGroupsEnvelope>(&["user_groups"])
            .map(|e| e.user_groups)
    }

    fn list_user_groups_for_release(
        &self,
        product_slug: &str,
        release_id: u64,
    ) -> Result<Vec<UserGroup>, ApiError> {
        let release_id = release_id.to_string();
        self.get::<UserGroupsEnvelope>(&[
            "products",
            product_slug,
            "releases",
            &release_id,
            "user_groups",
        ])
        .map(|e| e.user_groups)
    }
}

/// Parse the configured host and append the API prefix, tolerating a trailing slash.
fn base_url(host: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(host)
        .map_err(|e| ApiError::ClientBuild(format!("invalid host '{host}': {e}")))?;
    url.path_segments_mut()
        .map_err(|()| ApiError::ClientBuild(format!("host '{host}' cannot carry a path")))?
        .pop_if_empty()
        .extend(API_PREFIX);
    Ok(url)
}

fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(host: &str) -> HttpCatalogClient {
        HttpCatalogClient::new(&ClientSettings {
            host: host.to_owned(),
            api_token: None,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        assert_eq!(
            base_url("https://network.pivotal.io/").unwrap().as_str(),
            "https://network.pivotal.io/api/v2"
        );
        assert_eq!(
            base_url("http://localhost:8080").unwrap().as_str(),
            "http://localhost:8080/api/v2"
        );
    }

    #[test]
    fn test_base_url_rejects_relative_host() {
        assert!(matches!(
            base_url("network.pivotal.io"),
            Err(ApiError::ClientBuild(_))
        ));
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let url = client("https://network.pivotal.io").endpoint(&["products", "p-mysql", "releases"]);
        assert_eq!(
            url.unwrap().as_str(),
            "https://network.pivotal.io/api/v2/products/p-mysql/releases"
        );
    }

    #[test]
    fn test_slug_stays_in_one_path_segment() {
        let client = client("https://network.pivotal.io");
        for slug in ["p-mysql?x=1", "../user_groups#", "a/b", "p%2Fq"] {
            let url = client.endpoint(&["products", slug, "releases"]).unwrap();
            assert!(url.query().is_none(), "{slug}: {url}");
            assert!(url.fragment().is_none(), "{slug}: {url}");

            let segments: Vec<&str> = url.path_segments().unwrap().collect();
            assert_eq!(segments.len(), 5, "{slug}: {url}");
            assert_eq!(&segments[..3], ["api", "v2", "products"]);
            assert_ne!(segments[3], slug, "{slug} should be percent-encoded");
            assert_eq!(segments[4], "releases");
        }
    }

    #[test]
    fn test_dot_and_empty_segments_are_rejected() {
        let client = client("https://network.pivotal.io");
        for slug in ["..", ".", ""] {
            let result = client.endpoint(&["products", slug, "releases"]);
            assert!(
                matches!(result, Err(ApiError::InvalidIdentifier { ref value }) if value == slug),
                "{slug:?}"
            );
        }
    }

    #[test]
    fn test_decode_releases_envelope_keeps_order() {
        let body = r#"{"releases":[
            {"id":2,"version":"2.0","description":"second"},
            {"id":1,"version":"1.0","description":"first","release_type":"Major Release"}
        ]}"#;
        let env: ReleasesEnvelope = decode("/products/p/releases", body).unwrap();
        let versions: Vec<&str> = env.releases.iter().map(|r| r.version.as_str()).collect();
        assert_eq!(versions, ["2.0", "1.0"]);
        assert_eq!(env.releases[1].release_type.as_deref(), Some("Major Release"));
    }

    #[test]
    fn test_decode_missing_collection_is_empty() {
        let env: UserGroupsEnvelope = decode("/user_groups", "{}").unwrap();
        assert!(env.user_groups.is_empty());
    }

    #[test]
    fn test_decode_dependencies_envelope() {
        let body = r#"{"dependencies":[
            {"release":{"id":5,"version":"3.1","product":{"id":8,"slug":"stemcells"}}}
        ]}"#;
        let env: DependenciesEnvelope = decode("/x", body).unwrap();
        assert_eq!(env.dependencies[0].release.product.slug, "stemcells");
    }

    #[test]
    fn test_decode_garbage_is_decode_error() {
        let result: Result<ProductsEnvelope, _> = decode("/products", "<html>");
        assert!(matches!(result, Err(ApiError::Decode { ref path, .. }) if path == "/products"));
    }

    #[test]
    fn test_client_builds_with_token() {
        let settings = ClientSettings {
            host: "https://example.invalid".to_owned(),
            api_token: Some("abc123".to_owned()),
            timeout: Duration::from_secs(5),
        };
        assert!(HttpCatalogClient::new(&settings).is_ok());
    }

    #[test]
    fn test_client_rejects_token_with_newline() {
        let settings = ClientSettings {
            host: "https://example.invalid".to_owned(),
            api_token: Some("abc\n123".to_owned()),
            timeout: Duration::from_secs(5),
        };
        assert!(matches!(
            HttpCatalogClient::new(&settings),
            Err(ApiError::ClientBuild(_))
        ));
    }
}
