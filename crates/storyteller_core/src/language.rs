//! Language codes for speech synthesis.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A validated language tag such as `en`, `fr` or `pt-BR`.
///
/// Accepts a two or three letter primary subtag, optionally followed by a
/// region or script subtag of two to four alphanumerics. The primary subtag
/// is stored lowercase, a two letter region uppercase.
///
/// # Examples
///
/// ```
/// use storyteller_core::LanguageCode;
///
/// let code: LanguageCode = "PT-br".parse().unwrap();
/// assert_eq!(code.as_str(), "pt-BR");
/// assert!("invalid_lang".parse::<LanguageCode>().is_err());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Parses and normalizes a language tag.
    ///
    /// # Errors
    ///
    /// Returns a description when the tag is malformed.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        let mut parts = raw.split('-');
        let primary = parts.next().unwrap_or_default();

        if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(format!("'{}' is not a valid language code", raw));
        }

        let mut normalized = primary.to_ascii_lowercase();

        if let Some(sub) = parts.next() {
            if !(2..=4).contains(&sub.len()) || !sub.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(format!("'{}' is not a valid language code", raw));
            }
            normalized.push('-');
            if sub.len() == 2 {
                normalized.push_str(&sub.to_ascii_uppercase());
            } else {
                normalized.push_str(sub);
            }
        }

        if parts.next().is_some() {
            return Err(format!("'{}' is not a valid language code", raw));
        }

        Ok(Self(normalized))
    }

    /// The normalized tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl FromStr for LanguageCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}
