//! Services command handler: the service registry.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputFormat, pretty_json};
use fanlog_domain::ServiceName;
use serde_json::Value;

/// Print every registered service with its tag and alert topic.
pub fn run_services(format: OutputFormat) -> Result<CliOutput, CliError> {
    let stdout = if format.is_json() {
        let services: Vec<Value> = ServiceName::ALL
            .into_iter()
            .map(|service| {
                serde_json::json!({
                    "service": service.as_str(),
                    "tag": service.tag(),
                    "topicId": service.topic_id(),
                })
            })
            .collect();
        pretty_json(&Value::Array(services))?
    } else {
        ServiceName::ALL
            .into_iter()
            .map(|service| {
                let topic = service
                    .topic_id()
                    .map_or_else(|| "-".to_string(), |topic| topic.to_string());
                format!("{:<14} {} {topic}\n", service.as_str(), service.tag())
            })
            .collect()
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}
