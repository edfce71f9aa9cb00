//! Emit command handler: send one record through a logger instance.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputFormat, pretty_json};
use fanlog_adapters::{RecordingAggregator, RecordingAlerts};
use fanlog_config::LoggerEnv;
use fanlog_domain::{LogEntry, ServiceIdentity, ServiceName, SeverityLevel, TransportConfig};
use fanlog_infra::{LoggerFactory, LoggerPort};
use fanlog_shared::ErrorEnvelope;
use serde_json::Value;
use std::sync::Arc;

/// Arguments of the emit command.
#[derive(Debug)]
pub struct EmitCommandInput {
    pub service: Option<ServiceName>,
    pub tag: Option<String>,
    pub name: Option<String>,
    pub filename: Option<String>,
    pub topic_id: Option<u64>,
    pub fn_name: Option<String>,
    pub level: SeverityLevel,
    pub message: String,
    pub data: Option<String>,
    pub config: Option<String>,
    pub environment: Option<String>,
    pub force_alert: bool,
    pub dry_run: bool,
}

/// Run the emit command.
///
/// With `dry_run` the network sinks are replaced by recorders and the would-be
/// deliveries are reported instead of sent.
pub fn run_emit(format: OutputFormat, input: &EmitCommandInput) -> Result<CliOutput, CliError> {
    let mut env = LoggerEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    if let Some(environment) = input.environment.as_deref() {
        env.environment = environment.into();
    }
    let config = transport_config(input)?;
    let entry = log_entry(input)?;

    let alerts = Arc::new(RecordingAlerts::default());
    let aggregator = Arc::new(RecordingAggregator::default());
    let mut factory = LoggerFactory::new(resolve_identity(input)?, env)?;
    if input.dry_run {
        factory = factory
            .with_alert_delivery(alerts.clone())
            .with_aggregator_delivery(aggregator.clone());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let transports = runtime.block_on(async {
        let logger = factory.create_instance(&config)?;
        logger.log_entry(entry);
        logger.drain().await;
        Ok::<_, CliError>(logger.transport_names())
    })?;
    tracing::debug!(?transports, "record emitted");

    let stdout = if !input.dry_run {
        String::new()
    } else if format.is_json() {
        let alert_texts: Vec<String> = alerts
            .messages()
            .into_iter()
            .map(|message| message.text)
            .collect();
        let payload = serde_json::json!({
            "transports": transports,
            "alerts": alert_texts,
            "aggregated": aggregator.records().len(),
        });
        pretty_json(&payload)?
    } else {
        format!(
            "transports: {}\nalerts: {}\naggregated: {}\n",
            transports.join(", "),
            alerts.messages().len(),
            aggregator.records().len()
        )
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

fn resolve_identity(input: &EmitCommandInput) -> Result<ServiceIdentity, ErrorEnvelope> {
    if let Some(service) = input.service {
        return Ok(ServiceIdentity::for_service(service)?);
    }
    Ok(ServiceIdentity::new(
        input.tag.as_deref().unwrap_or_default(),
        input.name.as_deref().unwrap_or_default(),
        input.filename.as_deref().unwrap_or_default(),
        input.topic_id.unwrap_or_default(),
    )?)
}

fn transport_config(input: &EmitCommandInput) -> Result<TransportConfig, CliError> {
    let mut config = match input.config.as_deref() {
        Some(raw) => serde_json::from_str::<TransportConfig>(raw)
            .map_err(|error| CliError::InvalidInput(format!("--config: {error}")))?,
        None => TransportConfig::default(),
    };
    if let Some(fn_name) = input.fn_name.as_deref() {
        config.fn_name = Some(fn_name.into());
    }
    Ok(config)
}

fn log_entry(input: &EmitCommandInput) -> Result<LogEntry, CliError> {
    let data = input
        .data
        .as_deref()
        .map(serde_json::from_str::<Value>)
        .transpose()
        .map_err(|error| CliError::InvalidInput(format!("--data: {error}")))?;
    let entry = LogEntry::new(input.level, input.message.as_str()).with_optional_data(data);
    Ok(if input.force_alert {
        entry.force_alert()
    } else {
        entry
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> EmitCommandInput {
        EmitCommandInput {
            service: None,
            tag: Some("wber".to_string()),
            name: Some("WberReport".to_string()),
            filename: Some("WberReport".to_string()),
            topic_id: Some(4),
            fn_name: Some("runJob".to_string()),
            level: SeverityLevel::Error,
            message: "Job failed".to_string(),
            data: Some(r#"{"code":42}"#.to_string()),
            config: Some(r#"{"console":{"level":"warn"}}"#.to_string()),
            environment: None,
            force_alert: true,
            dry_run: true,
        }
    }

    #[test]
    fn flags_build_config_and_entry() -> Result<(), CliError> {
        let input = input();
        let config = transport_config(&input)?;
        assert_eq!(config.fn_name.as_deref(), Some("runJob"));
        assert_eq!(config.console.effective_level(), SeverityLevel::Warn);

        let entry = log_entry(&input)?;
        assert!(entry.force_alert);
        assert_eq!(entry.data, Some(serde_json::json!({"code": 42})));
        Ok(())
    }

    #[test]
    fn bad_json_is_invalid_input() {
        let mut input = input();
        input.data = Some("{".to_string());
        assert!(matches!(log_entry(&input), Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn missing_identity_fields_are_configuration_errors() {
        let mut input = input();
        input.tag = None;
        assert!(resolve_identity(&input).is_err_and(|error| error.is_configuration()));
    }
}
