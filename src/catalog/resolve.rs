/// Identifier resolution: map a user-provided release version to one release.
///
/// Matching is exact and case-sensitive; the first resource in collection order
/// wins. Fuzzy scoring is only used to build "did you mean" suggestions for the
/// not-found error and never decides what resolves.
use nucleo_matcher::{
    Matcher, Utf32Str,
    pattern::{CaseMatching, Normalization, Pattern},
};

use super::errors::CatalogError;
use crate::types::Release;

/// Maximum number of suggestions attached to a not-found error.
const MAX_SUGGESTIONS: usize = 5;

/// A resource that users address by a string identifier.
pub trait Identified {
    /// Resource kind used in error messages, e.g. "release".
    const KIND: &'static str;

    /// The identifying field compared against user input.
    fn identifier(&self) -> &str;
}

impl Identified for Release {
    const KIND: &'static str = "release";

    fn identifier(&self) -> &str {
        &self.version
    }
}

/// Find the first resource whose identifier equals `target` exactly.
///
/// # Errors
///
/// - `CatalogError::NotFound` — nothing matches (always the case for an empty collection)
pub fn resolve<'a, T: Identified>(items: &'a [T], target: &str) -> Result<&'a T, CatalogError> {
    items
        .iter()
        .find(|item| item.identifier() == target)
        .ok_or_else(|| CatalogError::NotFound {
            kind: T::KIND,
            identifier: target.to_owned(),
            suggestions: suggest(items, target),
        })
}

/// Rank identifiers in `items` by fuzzy similarity to `target`.
fn suggest<T: Identified>(items: &[T], target: &str) -> Vec<String> {
    if target.trim().is_empty() {
        return Vec::new();
    }

    let pattern = Pattern::parse(target, CaseMatching::Smart, Normalization::Smart);
    let mut matcher = Matcher::new(nucleo_matcher::Config::DEFAULT);

    let mut scored: Vec<(&str, u32)> = items
        .iter()
        .filter_map(|item| {
            let mut buf = Vec::new();
            let haystack = Utf32Str::new(item.identifier(), &mut buf);
            pattern
                .score(haystack, &mut matcher)
                .map(|s| (item.identifier(), s))
        })
        .collect();

    // Stable sort keeps collection order among equal scores.
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    let mut suggestions: Vec<String> = Vec::new();
    for (id, _) in scored {
        if suggestions.len() == MAX_SUGGESTIONS {
            break;
        }
        if !suggestions.iter().any(|s| s == id) {
            suggestions.push(id.to_owned());
        }
    }
    suggestions
}

/// Which user groups a `user-groups` invocation asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseScope<'a> {
    /// Every user group visible to the caller.
    All,
    /// User groups attached to one release of one product.
    Release {
        product_slug: &'a str,
        release_version: &'a str,
    },
}

/// Validate a correlated product slug / release version pair.
///
/// Both or neither must be supplied; an empty string counts as not supplied.
///
/// # Errors
///
/// - `CatalogError::Usage` — exactly one of the two was supplied
pub fn release_scope<'a>(
    product_slug: Option<&'a str>,
    release_version: Option<&'a str>,
) -> Result<ReleaseScope<'a>, CatalogError> {
    let product_slug = product_slug.filter(|s| !s.is_empty());
    let release_version = release_version.filter(|s| !s.is_empty());

    match (product_slug, release_version) {
        (None, None) => Ok(ReleaseScope::All),
        (Some(product_slug), Some(release_version)) => Ok(ReleaseScope::Release {
            product_slug,
            release_version,
        }),
        _ => Err(CatalogError::Usage(
            "Both or neither of --product-slug and --release-version must be provided".to_owned(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(id: u64, version: &str) -> Release {
        Release {
            id,
            version: version.to_owned(),
            description: String::new(),
            release_type: None,
            release_date: None,
            availability: None,
        }
    }

    #[test]
    fn test_exact_match_returns_that_element() {
        let releases = vec![release(1, "1.0"), release(2, "2.0")];
        let found = resolve(&releases, "2.0").unwrap();
        assert_eq!(found.id, 2);
        assert_eq!(found.version, "2.0");
    }

    #[test]
    fn test_missing_version_is_not_found() {
        let releases = vec![release(1, "1.0"), release(2, "2.0")];
        let result = resolve(&releases, "3.0");
        assert!(matches!(
            result,
            Err(CatalogError::NotFound { kind: "release", ref identifier, .. }) if identifier == "3.0"
        ));
    }

    #[test]
    fn test_empty_collection_is_not_found() {
        let releases: Vec<Release> = Vec::new();
        assert!(matches!(
            resolve(&releases, "anything"),
            Err(CatalogError::NotFound { .. })
        ));
        assert!(matches!(resolve(&releases, ""), Err(CatalogError::NotFound { .. })));
    }

    #[test]
    fn test_first_duplicate_wins() {
        let releases = vec![release(10, "1.0"), release(11, "1.0")];
        assert_eq!(resolve(&releases, "1.0").unwrap().id, 10);
    }

    #[test]
    fn test_match_is_case_sensitive_and_not_prefix() {
        let releases = vec![release(1, "v1.0"), release(2, "1.0.1")];
        assert!(resolve(&releases, "V1.0").is_err());
        assert!(resolve(&releases, "1.0").is_err());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let releases = vec![release(1, "1.0"), release(2, "2.0")];
        let a = resolve(&releases, "2.0").unwrap().id;
        let b = resolve(&releases, "2.0").unwrap().id;
        assert_eq!(a, b);
    }

    #[test]
    fn test_not_found_carries_close_suggestions() {
        let releases = vec![release(1, "1.0"), release(2, "2.0"), release(3, "2.1")];
        let Err(CatalogError::NotFound { suggestions, .. }) = resolve(&releases, "2.") else {
            panic!("expected NotFound");
        };
        assert!(suggestions.contains(&"2.0".to_owned()));
        assert!(suggestions.contains(&"2.1".to_owned()));
        assert!(!suggestions.contains(&"1.0".to_owned()));
    }

    #[test]
    fn test_scope_neither_is_all() {
        assert_eq!(release_scope(None, None).unwrap(), ReleaseScope::All);
        assert_eq!(release_scope(Some(""), Some("")).unwrap(), ReleaseScope::All);
    }

    #[test]
    fn test_scope_both_is_release() {
        assert_eq!(
            release_scope(Some("p-mysql"), Some("1.0")).unwrap(),
            ReleaseScope::Release {
                product_slug: "p-mysql",
                release_version: "1.0",
            }
        );
    }

    #[test]
    fn test_scope_one_is_usage_error() {
        assert!(matches!(
            release_scope(Some("p-mysql"), None),
            Err(CatalogError::Usage(_))
        ));
        assert!(matches!(
            release_scope(None, Some("1.0")),
            Err(CatalogError::Usage(_))
        ));
        assert!(matches!(
            release_scope(Some("p-mysql"), Some("")),
            Err(CatalogError::Usage(_))
        ));
    }
}
