//! Levels command handler: the severity table.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputFormat, pretty_json};
use fanlog_domain::{SeverityLevel, paint};
use fanlog_shared::ErrorEnvelope;
use serde_json::Value;

/// Print every level with its rank, color, ANSI code and emoji.
pub fn run_levels(format: OutputFormat) -> Result<CliOutput, CliError> {
    let stdout = if format.is_json() {
        format_levels_json()?
    } else {
        format_levels_text()?
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

fn format_levels_text() -> Result<String, CliError> {
    let mut output = String::new();
    for level in SeverityLevel::ALL {
        let color = level.color();
        let name = paint(color, level.as_str()).map_err(ErrorEnvelope::from)?;
        output.push_str(&format!(
            "{} {} {} {} {}\n",
            level.rank(),
            level.emoji(),
            name,
            color,
            color.code()
        ));
    }
    Ok(output)
}

fn format_levels_json() -> Result<String, CliError> {
    let levels: Vec<Value> = SeverityLevel::ALL
        .into_iter()
        .map(|level| {
            serde_json::json!({
                "level": level.as_str(),
                "rank": level.rank(),
                "color": level.color().as_str(),
                "code": level.color().code(),
                "emoji": level.emoji(),
            })
        })
        .collect();
    pretty_json(&Value::Array(levels))
}
