//! Newtype slugs for type-safe catalog references.
//!
//! Use the `define_slug!` macro to create type-safe id wrappers that prevent
//! accidentally mixing ids from different catalog entries.

/// Errors that can occur when parsing a catalog slug.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// The input string is empty.
    #[error("id cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[a-z0-9-]`.
    #[error("id contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// Maximum length of a catalog slug.
pub const MAX_SLUG_LENGTH: usize = 32;

/// Validate a slug: 1-32 characters of lowercase ASCII letters, digits or `-`.
///
/// # Errors
///
/// Returns a [`SlugError`] describing the first violated rule.
pub fn validate_slug(s: &str) -> Result<(), SlugError> {
    if s.is_empty() {
        return Err(SlugError::Empty);
    }

    if s.len() > MAX_SLUG_LENGTH {
        return Err(SlugError::TooLong {
            max: MAX_SLUG_LENGTH,
        });
    }

    match s
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
    {
        Some(c) => Err(SlugError::InvalidCharacter(c)),
        None => Ok(()),
    }
}

/// Macro to define a type-safe slug wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` as a plain string, validated on the way in
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `parse()`, `as_str()`
/// - `FromStr`, `TryFrom<String>` and `From<Slug> for String`
///
/// # Example
///
/// ```rust
/// # use hostpanel_core::define_slug;
/// define_slug!(ZoneId);
/// define_slug!(RecordId);
///
/// let zone = ZoneId::parse("eu-west").unwrap();
/// let record = RecordId::parse("eu-west").unwrap();
///
/// // These are different types, so this won't compile:
/// // let _: ZoneId = record;
/// # let _ = (zone, record);
/// ```
#[macro_export]
macro_rules! define_slug {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parse a slug from a string.
            ///
            /// # Errors
            ///
            /// Returns an error if the input is empty, too long, or contains
            /// characters outside `[a-z0-9-]`.
            pub fn parse(s: &str) -> ::core::result::Result<Self, $crate::types::id::SlugError> {
                $crate::types::id::validate_slug(s)?;
                Ok(Self(s.to_owned()))
            }

            /// Wrap a slug literal that is known to be valid.
            ///
            /// Validity is only checked in debug builds; use [`Self::parse`]
            /// for anything that is not a literal.
            #[must_use]
            pub fn from_static(s: &'static str) -> Self {
                debug_assert!($crate::types::id::validate_slug(s).is_ok());
                Self(s.to_owned())
            }

            /// Returns the slug as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::id::SlugError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl ::core::convert::TryFrom<String> for $name {
            type Error = $crate::types::id::SlugError;

            fn try_from(s: String) -> ::core::result::Result<Self, Self::Error> {
                $crate::types::id::validate_slug(&s)?;
                Ok(Self(s))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Catalog ids
define_slug!(AddOnId);
define_slug!(PlanId);
define_slug!(PaymentMethodId);
