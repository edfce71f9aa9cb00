//! ANSI color rendering.

use crate::{ColorName, ConfigError};

const RESET: &str = "\x1b[0m";

/// Wrap `text` in the escape sequence for `code` followed by a reset.
///
/// Fails when `code` is not in the color table or `text` is empty.
///
/// ```
/// use fanlog_domain::colorize;
///
/// assert_eq!(colorize(35, "hi").ok().as_deref(), Some("\x1b[35mhi\x1b[0m"));
/// assert!(colorize(12, "hi").is_err());
/// ```
pub fn colorize(code: u8, text: &str) -> Result<String, ConfigError> {
    let color = ColorName::from_code(code).ok_or(ConfigError::UnknownColorCode { code })?;
    paint(color, text)
}

/// Same as [`colorize`] for a color that is known by type.
pub fn paint(color: ColorName, text: &str) -> Result<String, ConfigError> {
    if text.is_empty() {
        return Err(ConfigError::EmptyText);
    }
    Ok(format!("\x1b[{}m{text}{RESET}", color.code()))
}
