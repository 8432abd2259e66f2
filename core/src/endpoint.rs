//! Endpoint builder.

use std::fmt;
use std::str::FromStr;

use http::Uri;

use crate::Error;
use crate::Result;

/// Endpoint is the path part of a request, appended to the client's base URL.
///
/// Each `with_*` step consumes the endpoint and returns the extended one, so
/// a partially built endpoint can be cloned and reused without aliasing.
///
/// ```
/// use std::collections::HashMap;
/// use restsign_core::Endpoint;
///
/// let endpoint = Endpoint::new()
///     .with_version("v1")
///     .with_path_params("users/{id}", &HashMap::from([("id", "42")]));
/// assert_eq!(endpoint.build().unwrap(), "/v1/users/42");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoint {
    url: String,
}

impl Endpoint {
    /// Create an empty endpoint, which resolves to the base URL itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a version segment.
    ///
    /// Do not prepend or append `/`, the separator is added for you.
    pub fn with_version(self, version: impl AsRef<str>) -> Self {
        self.with_segment(version.as_ref())
    }

    /// Append a controller segment.
    pub fn with_controller(self, controller: impl AsRef<str>) -> Self {
        self.with_segment(controller.as_ref())
    }

    /// Append a path.
    pub fn with_path(self, path: impl AsRef<str>) -> Self {
        self.with_segment(path.as_ref())
    }

    /// Append a path, then replace every `{key}` placeholder with its value.
    pub fn with_path_params<K, V>(
        self,
        path: impl AsRef<str>,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut endpoint = self.with_segment(path.as_ref());
        for (k, v) in params {
            let placeholder = format!("{{{}}}", k.as_ref());
            endpoint.url = endpoint.url.replace(&placeholder, v.as_ref());
        }
        endpoint
    }

    /// Append query parameters, form-url-encoded.
    ///
    /// `HashMap` iterates in arbitrary order, use a `BTreeMap` or a `Vec` for a
    /// stable query string. An empty set of parameters leaves the endpoint untouched.
    pub fn with_query<K, V>(mut self, query: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (k, v) in query {
            serializer.append_pair(k.as_ref(), v.as_ref());
        }
        let encoded = serializer.finish();
        if encoded.is_empty() {
            return self;
        }

        self.url.push(if self.url.contains('?') { '&' } else { '?' });
        self.url.push_str(&encoded);
        self
    }

    /// The accumulated url, not yet validated.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Validate the endpoint as a URI reference and return it.
    pub fn build(&self) -> Result<String> {
        if self.url.is_empty() {
            return Ok(String::new());
        }

        Uri::from_str(&self.url).map_err(|e| {
            Error::invalid_url(format!("invalid endpoint: {}", self.url)).with_source(e)
        })?;
        Ok(self.url.clone())
    }

    fn with_segment(mut self, segment: &str) -> Self {
        self.url.push('/');
        self.url.push_str(segment);
        self
    }
}

impl From<&str> for Endpoint {
    fn from(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }
}

impl From<String> for Endpoint {
    fn from(url: String) -> Self {
        Self { url }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ErrorKind;

    enum Version {
        V2,
    }

    impl AsRef<str> for Version {
        fn as_ref(&self) -> &str {
            match self {
                Version::V2 => "v2",
            }
        }
    }

    #[test]
    fn test_build_segments() {
        let endpoint = Endpoint::new()
            .with_version(Version::V2)
            .with_controller("accounts")
            .with_path("me");
        assert_eq!(endpoint.build().unwrap(), "/v2/accounts/me");
    }

    #[test]
    fn test_path_params() {
        let endpoint = Endpoint::new().with_path_params(
            "v1/users/{id}/posts/{post}",
            &HashMap::from([("id", "42"), ("post", "7")]),
        );
        assert_eq!(endpoint.url(), "/v1/users/42/posts/7");
    }

    #[test]
    fn test_query() {
        let endpoint = Endpoint::new()
            .with_path("search")
            .with_query(BTreeMap::from([("q", "a b&c"), ("page", "2")]))
            .with_query(vec![("sort", "asc")]);
        assert_eq!(endpoint.build().unwrap(), "/search?page=2&q=a+b%26c&sort=asc");

        let untouched = Endpoint::new()
            .with_path("search")
            .with_query(Vec::<(&str, &str)>::new());
        assert_eq!(untouched.url(), "/search");
    }

    #[test]
    fn test_steps_do_not_alias() {
        let base = Endpoint::new().with_version("v1");
        let users = base.clone().with_controller("users");
        let teams = base.clone().with_controller("teams");
        assert_eq!(base.url(), "/v1");
        assert_eq!(users.url(), "/v1/users");
        assert_eq!(teams.url(), "/v1/teams");
    }

    #[test]
    fn test_build_empty() {
        assert_eq!(Endpoint::new().build().unwrap(), "");
    }

    #[test]
    fn test_build_invalid() {
        let err = Endpoint::new().with_path("has space").build().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidUrl);
        assert_eq!(err.message(), "invalid endpoint: /has space");
    }
}
