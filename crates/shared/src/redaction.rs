//! Secrets in fanlog: bot and ingestion tokens held as [`SecretString`], and
//! record payloads scrubbed by [`redact_json`] before they reach the log file,
//! the aggregator or the alert chat.

use serde_json::Value;
use std::fmt;

/// Placeholder written in place of a secret.
pub const REDACTED: &str = "[REDACTED]";

/// Key segments that always mark a secret.
const SECRET_SEGMENTS: [&str; 12] = [
    "token",
    "tokens",
    "password",
    "passwd",
    "secret",
    "secrets",
    "credential",
    "credentials",
    "auth",
    "authorization",
    "apikey",
    "cookie",
];

/// Segments that turn a following `key` segment into a secret (`apiKey`,
/// `PRIVATE_KEY`).
const KEY_QUALIFIERS: [&str; 6] = ["api", "private", "access", "secret", "signing", "encryption"];

/// Whether a payload key or env var name looks like it holds a secret.
///
/// Keys are split into words at `_`, `-`, `.` and camelCase boundaries, and
/// whole words are compared, so `author` or `keyword` stay visible.
///
/// ```
/// use fanlog_shared::is_secret_key;
///
/// assert!(is_secret_key("TELEGRAM_BOT_TOKEN"));
/// assert!(is_secret_key("apiKey"));
/// assert!(!is_secret_key("topicId"));
/// assert!(!is_secret_key("author"));
/// ```
#[must_use]
pub fn is_secret_key(key: &str) -> bool {
    let segments = key_segments(key);
    segments.iter().enumerate().any(|(index, segment)| {
        SECRET_SEGMENTS.contains(&segment.as_str())
            || (segment == "key"
                && index
                    .checked_sub(1)
                    .and_then(|previous| segments.get(previous))
                    .is_some_and(|previous| KEY_QUALIFIERS.contains(&previous.as_str())))
    })
}

/// Lowercased words of `key`. An uppercase run followed by a lowercase letter
/// ends one word early (`APIKey` is `api`, `key`).
fn key_segments(key: &str) -> Vec<String> {
    let chars: Vec<char> = key.chars().collect();
    let mut segments = Vec::new();
    let mut current = String::new();

    for (index, &character) in chars.iter().enumerate() {
        if !character.is_alphanumeric() {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
            continue;
        }
        let previous = index.checked_sub(1).and_then(|previous| chars.get(previous));
        let next_is_lower = chars.get(index + 1).is_some_and(|next| next.is_lowercase());
        let starts_word = character.is_uppercase()
            && previous.is_some_and(|previous| {
                previous.is_lowercase()
                    || previous.is_ascii_digit()
                    || (previous.is_uppercase() && next_is_lower)
            });
        if starts_word && !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
        current.extend(character.to_lowercase());
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Replace, in place, every value stored under a secret-looking object key.
/// Arrays and nested objects are walked; scalars at the top are left alone.
pub fn redact_json(value: &mut Value) {
    match value {
        Value::Object(map) => map.iter_mut().for_each(|(key, nested)| {
            if is_secret_key(key) {
                *nested = Value::from(REDACTED);
            } else {
                redact_json(nested);
            }
        }),
        Value::Array(items) => items.iter_mut().for_each(redact_json),
        _ => {},
    }
}

/// Token or credential that prints as [`REDACTED`].
#[derive(Clone, PartialEq, Eq, Default)]
pub struct SecretString(Box<str>);

impl SecretString {
    /// Wrap a secret value.
    pub fn new(value: impl Into<Box<str>>) -> Self {
        Self(value.into())
    }

    /// The raw value, for building requests.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Empty or whitespace-only; such tokens count as missing.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(REDACTED)
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(REDACTED)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
