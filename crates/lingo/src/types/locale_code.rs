use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a candidate string fails locale validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid locale code: '{candidate}'")]
pub struct InvalidLocale {
    /// The rejected candidate string.
    pub candidate: String,
}

/// A validated locale identifier.
///
/// A `LocaleCode` is nonempty and contains only characters from
/// `[a-zA-Z0-9_-]`. Candidates are validated once, at construction; a value
/// that fails the pattern never enters the system. Negotiation discards
/// failing candidates silently rather than surfacing them as errors.
///
/// # Example
///
/// ```
/// use lingo::LocaleCode;
///
/// let code = LocaleCode::parse("en-US").unwrap();
/// assert_eq!(code.as_str(), "en-US");
///
/// assert!(LocaleCode::parse("en/../../etc").is_err());
/// assert!(LocaleCode::parse("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleCode(String);

impl LocaleCode {
    /// Validate a candidate string as a locale code.
    pub fn parse(candidate: &str) -> Result<Self, InvalidLocale> {
        if candidate.is_empty() || !candidate.chars().all(is_locale_char) {
            return Err(InvalidLocale {
                candidate: candidate.to_string(),
            });
        }
        Ok(Self(candidate.to_string()))
    }

    /// Get the locale code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The default locale code is `"en"`.
impl Default for LocaleCode {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl std::fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LocaleCode {
    type Error = InvalidLocale;

    fn try_from(candidate: String) -> Result<Self, Self::Error> {
        LocaleCode::parse(&candidate)
    }
}

impl From<LocaleCode> for String {
    fn from(code: LocaleCode) -> Self {
        code.0
    }
}

fn is_locale_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}
