//! Container image reference parsing.
//!
//! Parses references such as `nginx`, `gcr.io/proj/app:1.2` or
//! `registry:5000/team/app@sha256:...` and normalizes them to their fully
//! qualified form: registry host, full repository path, and an explicit tag
//! or digest.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

const DEFAULT_DOMAIN: &str = "docker.io";
const LEGACY_DEFAULT_DOMAIN: &str = "index.docker.io";
const OFFICIAL_REPO_PREFIX: &str = "library";
const DEFAULT_TAG: &str = "latest";
const MAX_NAME_LENGTH: usize = 255;

/// Full reference grammar: `name[:tag][@digest]`, capturing each part.
static REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let alphanumeric = "[a-z0-9]+";
    let separator = "(?:[._]|__|[-]+)";
    let path_component = format!("{alphanumeric}(?:{separator}{alphanumeric})*");
    let domain_component = "(?:[a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9-]*[a-zA-Z0-9])";
    let domain_name = format!(r"{domain_component}(?:\.{domain_component})*");
    let ipv6 = r"\[(?:[a-fA-F0-9:]+)\]";
    let domain = format!("(?:{domain_name}|{ipv6})(?::[0-9]+)?");
    let name = format!("(?:{domain}/)?{path_component}(?:/{path_component})*");
    let tag = r"[A-Za-z0-9_][A-Za-z0-9_.-]{0,127}";
    let digest = r"[A-Za-z][A-Za-z0-9]*(?:[-_+.][A-Za-z][A-Za-z0-9]*)*:[0-9a-fA-F]+";
    Regex::new(&format!("^({name})(?::({tag}))?(?:@({digest}))?$")).unwrap()
});

/// A bare image ID (64 hex characters).
static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-f0-9]{64}$").unwrap());

/// A bare content digest, `algorithm:hex`, with at least 32 hex characters.
static DIGEST_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9]*(?:[-_+.][A-Za-z][A-Za-z0-9]*)*:[0-9a-fA-F]{32,}$").unwrap()
});

/// Reference parse errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    #[error("invalid reference format")]
    InvalidFormat,

    #[error("repository name must be lowercase")]
    NameNotLowercase,

    #[error("repository name must not be more than {MAX_NAME_LENGTH} characters")]
    NameTooLong,
}

/// A parsed image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageReference {
    /// `registry/path[:tag][@digest]`
    Named {
        domain: String,
        path: String,
        tag: Option<String>,
        digest: Option<String>,
    },
    /// A bare image ID, canonically `sha256:<id>`.
    Id(String),
    /// A bare digest such as `sha256:<hex>`, already canonical.
    Digest(String),
}

impl ImageReference {
    /// Parse a reference as written in a pod spec.
    pub fn parse(reference: &str) -> Result<Self, ReferenceError> {
        if IDENTIFIER_REGEX.is_match(reference) {
            return Ok(Self::Id(reference.to_string()));
        }
        if DIGEST_REGEX.is_match(reference) {
            return Ok(Self::Digest(reference.to_string()));
        }

        let (domain, remainder) = split_domain(reference);
        let repository = remainder.split(':').next().unwrap_or(&remainder);
        if repository.to_lowercase() != repository {
            return Err(ReferenceError::NameNotLowercase);
        }

        let qualified = format!("{domain}/{remainder}");
        let captures = REFERENCE_REGEX
            .captures(&qualified)
            .ok_or(ReferenceError::InvalidFormat)?;
        let name = captures.get(1).ok_or(ReferenceError::InvalidFormat)?.as_str();
        if name.len() > MAX_NAME_LENGTH {
            return Err(ReferenceError::NameTooLong);
        }
        let path = name
            .strip_prefix(&domain)
            .and_then(|p| p.strip_prefix('/'))
            .ok_or(ReferenceError::InvalidFormat)?;

        Ok(Self::Named {
            domain,
            path: path.to_string(),
            tag: captures.get(2).map(|m| m.as_str().to_string()),
            digest: captures.get(3).map(|m| m.as_str().to_string()),
        })
    }

    /// Fully qualified form, e.g. `docker.io/library/nginx:latest`.
    pub fn canonical(&self) -> String {
        match self {
            Self::Id(id) => format!("sha256:{id}"),
            Self::Digest(digest) => digest.clone(),
            Self::Named {
                domain,
                path,
                tag,
                digest,
            } => {
                let mut out = format!("{domain}/{path}");
                match (tag, digest) {
                    (Some(tag), _) => {
                        out.push(':');
                        out.push_str(tag);
                    }
                    (None, None) => {
                        out.push(':');
                        out.push_str(DEFAULT_TAG);
                    }
                    (None, Some(_)) => {}
                }
                if let Some(digest) = digest {
                    out.push('@');
                    out.push_str(digest);
                }
                out
            }
        }
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Split off the registry host, defaulting to Docker Hub.
///
/// The first path component is a host only if it contains a `.` or `:`, is
/// `localhost`, or has uppercase letters.
fn split_domain(name: &str) -> (String, String) {
    let (mut domain, mut remainder) = match name.split_once('/') {
        Some((first, rest))
            if first.contains(['.', ':'])
                || first == "localhost"
                || first.to_lowercase() != first =>
        {
            (first.to_string(), rest.to_string())
        }
        _ => (DEFAULT_DOMAIN.to_string(), name.to_string()),
    };
    if domain == LEGACY_DEFAULT_DOMAIN {
        domain = DEFAULT_DOMAIN.to_string();
    }
    if domain == DEFAULT_DOMAIN && !remainder.contains('/') {
        remainder = format!("{OFFICIAL_REPO_PREFIX}/{remainder}");
    }
    (domain, remainder)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(reference: &str) -> String {
        ImageReference::parse(reference).unwrap().canonical()
    }

    #[test]
    fn test_official_image_gets_registry_and_tag() {
        assert_eq!(canonical("nginx"), "docker.io/library/nginx:latest");
        assert_eq!(canonical("nginx:1.25"), "docker.io/library/nginx:1.25");
        assert_eq!(canonical("bitnami/redis:7"), "docker.io/bitnami/redis:7");
    }

    #[test]
    fn test_legacy_hub_domain_normalized() {
        assert_eq!(canonical("index.docker.io/nginx:1"), "docker.io/library/nginx:1");
    }

    #[test]
    fn test_already_canonical_is_unchanged() {
        for reference in [
            "registry.example.com/nginx:1.2@sha256:deadbeef",
            "docker.io/library/nginx:latest",
            "localhost:5000/team/app:dev",
            "gcr.io/project/app@sha256:0123456789abcdef",
            "[::1]:5000/app:v1",
        ] {
            assert_eq!(canonical(reference), reference);
        }
    }

    #[test]
    fn test_private_registry_without_tag() {
        assert_eq!(canonical("registry.example.com/app"), "registry.example.com/app:latest");
        assert_eq!(canonical("localhost/app"), "localhost/app:latest");
    }

    #[test]
    fn test_image_id() {
        let id = "a".repeat(64);
        assert_eq!(canonical(&id), format!("sha256:{id}"));
    }

    #[test]
    fn test_bare_digest_is_canonical() {
        let digest = format!("sha256:{}", "a".repeat(64));
        let reference = ImageReference::parse(&digest).unwrap();
        assert_eq!(reference, ImageReference::Digest(digest.clone()));
        assert_eq!(reference.canonical(), digest);
    }

    #[test]
    fn test_short_hex_tag_is_not_a_digest() {
        assert_eq!(canonical("app:beef"), "docker.io/library/app:beef");
    }

    #[test]
    fn test_malformed_references() {
        assert_eq!(ImageReference::parse("::bad::"), Err(ReferenceError::InvalidFormat));
        assert_eq!(ImageReference::parse(""), Err(ReferenceError::InvalidFormat));
        assert_eq!(ImageReference::parse("nginx:"), Err(ReferenceError::InvalidFormat));
        assert_eq!(ImageReference::parse("nginx@sha256:"), Err(ReferenceError::InvalidFormat));
        assert_eq!(ImageReference::parse("Nginx"), Err(ReferenceError::NameNotLowercase));
    }

    #[test]
    fn test_uppercase_host_allowed() {
        assert_eq!(canonical("Registry.Example.com/app:1"), "Registry.Example.com/app:1");
    }

    #[test]
    fn test_name_too_long() {
        let reference = format!("registry.example.com/{}", "a".repeat(250));
        assert_eq!(ImageReference::parse(&reference), Err(ReferenceError::NameTooLong));
    }
}
