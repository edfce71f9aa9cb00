//! Severity levels with their verbosity ranking, colors and emoji.
//!
//! The tables are compiled in and never change at runtime. Ranking is what the
//! threshold-based transports compare: `error` (rank 0) is the least verbose,
//! `custom` (rank 5) the most verbose.

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed, ordered log levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    /// Failures that need attention.
    Error,
    /// Suspicious but recoverable situations.
    Warn,
    /// Successful completion of a unit of work.
    Done,
    /// Regular progress information.
    Info,
    /// Diagnostics, printed with the full record.
    Debug,
    /// Everything else; the most verbose level.
    Custom,
}

impl SeverityLevel {
    /// All levels in rank order.
    pub const ALL: [Self; 6] = [
        Self::Error,
        Self::Warn,
        Self::Done,
        Self::Info,
        Self::Debug,
        Self::Custom,
    ];

    /// Verbosity rank (0 = most severe).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Error => 0,
            Self::Warn => 1,
            Self::Done => 2,
            Self::Info => 3,
            Self::Debug => 4,
            Self::Custom => 5,
        }
    }

    /// The level with the highest rank; a threshold at this level admits everything.
    #[must_use]
    pub const fn lowest_verbosity() -> Self {
        Self::Custom
    }

    /// Display color for the level.
    #[must_use]
    pub const fn color(self) -> ColorName {
        match self {
            Self::Error => ColorName::Red,
            Self::Warn => ColorName::Yellow,
            Self::Done => ColorName::Green,
            Self::Info => ColorName::Blue,
            Self::Debug => ColorName::Magenta,
            Self::Custom => ColorName::Cyan,
        }
    }

    /// Emoji glyph used by chat alerts.
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Error => "🔴",
            Self::Warn => "🟡",
            Self::Done => "🟢",
            Self::Info => "🔵",
            Self::Debug => "🟣",
            Self::Custom => "⚪️",
        }
    }

    /// Lowercase level name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Done => "done",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Custom => "custom",
        }
    }

    /// Returns true when a transport thresholded at `threshold` accepts this level.
    #[must_use]
    pub const fn admitted_by(self, threshold: Self) -> bool {
        self.rank() <= threshold.rank()
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for SeverityLevel {
    type Err = ConfigError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConfigError::UnknownLevel {
                value: input.to_string(),
            })
    }
}

/// Named terminal colors with their ANSI foreground codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorName {
    /// `30`
    Black,
    /// `31`
    Red,
    /// `32`
    Green,
    /// `33`
    Yellow,
    /// `34`
    Blue,
    /// `35`
    Magenta,
    /// `36`
    Cyan,
    /// `37`
    White,
    /// `90`, the neutral tone for calling-context names and stacks.
    Grey,
}

impl ColorName {
    /// Every entry of the color table.
    pub const ALL: [Self; 9] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
        Self::Grey,
    ];

    /// ANSI foreground code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Black => 30,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::White => 37,
            Self::Grey => 90,
        }
    }

    /// Reverse lookup of an ANSI code.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|color| color.code() == code)
    }

    /// Lowercase color name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::Grey => "grey",
        }
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
