//! Domain name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`DomainName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainNameError {
    /// The input string is empty.
    #[error("domain name cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("domain name must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input has no dot-separated extension.
    #[error("domain name must include an extension such as .com")]
    MissingTld,
    /// Two dots in a row, or a leading/trailing dot.
    #[error("domain name contains an empty label")]
    EmptyLabel,
    /// One label is longer than DNS allows.
    #[error("domain labels must be at most {max} characters")]
    LabelTooLong {
        /// Maximum allowed label length.
        max: usize,
    },
    /// A character outside `[a-z0-9-]`.
    #[error("domain name contains invalid character {0:?}")]
    InvalidCharacter(char),
    /// A label starts or ends with `-`.
    #[error("domain labels cannot start or end with a hyphen")]
    HyphenAtLabelEdge,
}

/// A registrable domain name such as `example.com`.
///
/// Input is trimmed and lowercased before validation.
///
/// ## Constraints
///
/// - Length: 1-253 characters
/// - At least two labels separated by `.`
/// - Each label is 1-63 characters of `[a-z0-9-]`
/// - No label starts or ends with `-`
///
/// ## Examples
///
/// ```
/// use hostpanel_core::DomainName;
///
/// let domain = DomainName::parse("MyBlog.bi").unwrap();
/// assert_eq!(domain.as_str(), "myblog.bi");
/// assert_eq!(domain.tld(), ".bi");
///
/// assert!(DomainName::parse("").is_err());          // empty
/// assert!(DomainName::parse("localhost").is_err()); // no extension
/// assert!(DomainName::parse("-bad.com").is_err());  // hyphen at edge
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct DomainName(String);

impl DomainName {
    /// Maximum length of a domain name.
    pub const MAX_LENGTH: usize = 253;

    /// Maximum length of a single label.
    pub const MAX_LABEL_LENGTH: usize = 63;

    /// Parse a `DomainName` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty or longer than 253 characters
    /// - Has no extension
    /// - Has an empty or over-long label
    /// - Contains characters outside `[a-z0-9-]` or a hyphen at a label edge
    pub fn parse(s: &str) -> Result<Self, DomainNameError> {
        let normalized = s.trim().to_ascii_lowercase();

        if normalized.is_empty() {
            return Err(DomainNameError::Empty);
        }

        if normalized.len() > Self::MAX_LENGTH {
            return Err(DomainNameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if !normalized.contains('.') {
            return Err(DomainNameError::MissingTld);
        }

        for label in normalized.split('.') {
            Self::validate_label(label)?;
        }

        Ok(Self(normalized))
    }

    fn validate_label(label: &str) -> Result<(), DomainNameError> {
        if label.is_empty() {
            return Err(DomainNameError::EmptyLabel);
        }

        if label.len() > Self::MAX_LABEL_LENGTH {
            return Err(DomainNameError::LabelTooLong {
                max: Self::MAX_LABEL_LENGTH,
            });
        }

        if let Some(c) = label
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(DomainNameError::InvalidCharacter(c));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(DomainNameError::HyphenAtLabelEdge);
        }

        Ok(())
    }

    /// Returns the domain name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `DomainName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the extension with its leading dot (e.g., `.com`).
    #[must_use]
    pub fn tld(&self) -> &str {
        self.0
            .rfind('.')
            .and_then(|pos| self.0.get(pos..))
            .unwrap_or("")
    }

    /// Returns the label directly in front of the extension (e.g., `example`).
    #[must_use]
    pub fn second_level(&self) -> &str {
        self.0.rsplit('.').nth(1).unwrap_or("")
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DomainName {
    type Err = DomainNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DomainName {
    type Error = DomainNameError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<DomainName> for String {
    fn from(domain: DomainName) -> Self {
        domain.0
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_domains() {
        assert!(DomainName::parse("example.com").is_ok());
        assert!(DomainName::parse("my-blog.bi").is_ok());
        assert!(DomainName::parse("shop.example.co.uk").is_ok());
        assert!(DomainName::parse("a1.info").is_ok());
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let domain = DomainName::parse("  MyStore.COM ").unwrap();
        assert_eq!(domain.as_str(), "mystore.com");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(DomainName::parse("   "), Err(DomainNameError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("{}.com", "a.".repeat(130));
        assert!(matches!(
            DomainName::parse(&long),
            Err(DomainNameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_missing_tld() {
        assert_eq!(
            DomainName::parse("localhost"),
            Err(DomainNameError::MissingTld)
        );
    }

    #[test]
    fn test_parse_empty_label() {
        assert_eq!(
            DomainName::parse("example..com"),
            Err(DomainNameError::EmptyLabel)
        );
        assert_eq!(
            DomainName::parse("example.com."),
            Err(DomainNameError::EmptyLabel)
        );
    }

    #[test]
    fn test_parse_label_too_long() {
        let long = format!("{}.com", "a".repeat(64));
        assert!(matches!(
            DomainName::parse(&long),
            Err(DomainNameError::LabelTooLong { .. })
        ));
    }

    #[test]
    fn test_parse_invalid_character() {
        assert_eq!(
            DomainName::parse("my_site.com"),
            Err(DomainNameError::InvalidCharacter('_'))
        );
    }

    #[test]
    fn test_parse_hyphen_at_edge() {
        assert_eq!(
            DomainName::parse("site-.com"),
            Err(DomainNameError::HyphenAtLabelEdge)
        );
    }

    #[test]
    fn test_tld_and_second_level() {
        let domain = DomainName::parse("shop.example.net").unwrap();
        assert_eq!(domain.tld(), ".net");
        assert_eq!(domain.second_level(), "example");
    }

    #[test]
    fn test_serde_roundtrip() {
        let domain = DomainName::parse("example.org").unwrap();
        let json = serde_json::to_string(&domain).unwrap();
        assert_eq!(json, "\"example.org\"");

        let parsed: DomainName = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, domain);
        assert!(serde_json::from_str::<DomainName>("\"nodot\"").is_err());
    }
}
