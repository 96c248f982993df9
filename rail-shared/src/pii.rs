use serde::{Serialize, Deserialize, Serializer};
use std::fmt;

/// A wrapper for personal data (emails) that masks its value in Debug and Display output.
///
/// `Masked(email)` renders as `j***@example.com`; values without an `@` render fully masked.
#[derive(Clone, Deserialize)]
pub struct Masked<T>(pub T);

impl<T: AsRef<str>> Masked<T> {
    fn write_masked(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0.as_ref();
        match value.split_once('@') {
            Some((local, domain)) if !local.is_empty() => {
                let first = local.chars().next().unwrap_or('*');
                write!(f, "{}***@{}", first, domain)
            }
            _ => write!(f, "********"),
        }
    }
}

impl<T: AsRef<str>> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_masked(f)
    }
}

impl<T: AsRef<str>> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_masked(f)
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Masking only applies to log output; payloads carry the real value.
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_masked_in_logs() {
        let email = Masked("jane.doe@example.com");
        assert_eq!(format!("{}", email), "j***@example.com");
        assert_eq!(format!("{:?}", email), "j***@example.com");
    }

    #[test]
    fn test_malformed_value_fully_masked() {
        assert_eq!(Masked("no-at-sign").to_string(), "********");
        assert_eq!(Masked("@example.com").to_string(), "********");
    }

    #[test]
    fn test_serialization_keeps_value() {
        let json = serde_json::to_string(&Masked("jane@example.com".to_string())).unwrap();
        assert_eq!(json, "\"jane@example.com\"");
        assert_eq!(Masked("x@y.z".to_string()).into_inner(), "x@y.z");
    }
}
