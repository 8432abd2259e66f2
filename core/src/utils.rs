//! Utility functions and types.

use std::fmt::Debug;

use http::HeaderValue;

use crate::Result;

/// Build an `Authorization` value of the form `Bearer <token>`.
///
/// The value is marked as sensitive so it's hidden from `Debug` output.
pub fn bearer_header(token: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::try_from(format!("Bearer {token}"))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Redacts a string by replacing all but the first and last three characters with asterisks.
///
/// - If the input string has fewer than 12 characters, it should be entirely redacted.
/// - If the input string has 12 or more characters, only the first three and the last three.
///
/// Lengths are counted in `char`s, not bytes.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        match value {
            None => Redact(""),
            Some(v) => Redact(v),
        }
    }
}

impl<'a> Debug for Redact<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let length = self.0.chars().count();
        if length == 0 {
            f.write_str("EMPTY")
        } else if length < 12 {
            f.write_str("***")
        } else {
            // Count in chars, secrets may hold any utf-8.
            let head = self.0.chars().take(3).collect::<String>();
            let tail = self.0.chars().skip(length - 3).collect::<String>();
            f.write_str(&head)?;
            f.write_str("***")?;
            f.write_str(&tail)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact() {
        let cases = vec![
            ("app-key", "***"),
            ("0123456789ab", "012***9ab"),
            ("eyJhbGciOiJIUzI1NiJ9.e30.c2ln", "eyJ***2ln"),
            ("", "EMPTY"),
            ("0123456789a", "***"),
            ("clé-secrète-ünïcode", "clé***ode"),
            ("ünï-secret-àçé", "ünï***àçé"),
            ("ééééééééééé", "***"),
        ];

        for (input, expected) in cases {
            assert_eq!(
                format!("{:?}", Redact(input)),
                expected,
                "Failed on input: {}",
                input
            );
        }
    }

    #[test]
    fn test_bearer_header() {
        let value = bearer_header("abc.def.ghi").unwrap();
        assert_eq!(value, "Bearer abc.def.ghi");
        assert!(value.is_sensitive());

        let err = bearer_header("line\nbreak").unwrap_err();
        assert_eq!(err.kind(), &crate::ErrorKind::RequestInvalid);
    }
}
