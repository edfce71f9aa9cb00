//! `--output` handling shared by every command.

use crate::error::CliError;
use clap::{Args, ValueEnum};
use serde_json::Value;

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text for terminals.
    Text,
    /// Pretty-printed JSON for scripts.
    Json,
}

impl OutputFormat {
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output format for command responses.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

/// Pretty JSON terminated by a newline.
pub fn pretty_json(value: &Value) -> Result<String, CliError> {
    let mut output = serde_json::to_string_pretty(value)?;
    output.push('\n');
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pretty_json_ends_with_newline() -> Result<(), CliError> {
        assert_eq!(pretty_json(&json!([1]))?, "[\n  1\n]\n");
        Ok(())
    }
}
