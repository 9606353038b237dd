pub mod clients;
pub mod config;
pub mod doctor;
pub mod invoices;
pub mod price;
pub mod quotes;

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde_json::Value;
use tokio::runtime::Runtime;
use tracing::warn;
use uuid::Uuid;

use guesthouse_backend::{connect, FrontDesk};
use guesthouse_core::config::{AppConfig, LoadOptions};
use guesthouse_core::domain::draft::QuoteDraft;
use guesthouse_core::errors::{ApplicationError, InterfaceError};

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data: None,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn success_with_data(
        command: &str,
        message: impl Into<String>,
        data: impl Serialize,
    ) -> Self {
        let data = match serde_json::to_value(data) {
            Ok(data) => data,
            Err(error) => {
                return Self::failure(command, "serialization", error.to_string(), 1);
            }
        };
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data: Some(data),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    /// Maps a front-desk failure to its interface class, tagging it with a
    /// fresh correlation id that also appears in the logs.
    pub fn from_application_error(command: &str, error: ApplicationError) -> Self {
        let correlation_id = Uuid::new_v4().to_string();
        let interface = error.into_interface(correlation_id.clone());
        let (error_class, exit_code) = match &interface {
            InterfaceError::BadRequest { .. } => ("validation", 5),
            InterfaceError::NotFound { .. } => ("not_found", 6),
            InterfaceError::ServiceUnavailable { .. } => ("backend_unavailable", 4),
        };

        warn!(
            event_name = "cli.command.failed",
            correlation_id = %correlation_id,
            command,
            error_class,
            error = %interface,
            "command failed"
        );

        Self::failure(
            command,
            error_class,
            format!(
                "{} {interface} (correlation_id: {})",
                interface.user_message(),
                interface.correlation_id()
            ),
            exit_code,
        )
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// A front desk bound to the configured backend plus the runtime that drives it.
pub struct DeskSession {
    pub runtime: Runtime,
    pub desk: FrontDesk,
}

pub fn open_desk(command: &str) -> Result<DeskSession, CommandResult> {
    let config = AppConfig::load(LoadOptions::default()).map_err(|error| {
        CommandResult::failure(
            command,
            "config_validation",
            format!("configuration issue: {error}"),
            2,
        )
    })?;

    let runtime =
        tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(|error| {
            CommandResult::failure(
                command,
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            )
        })?;

    let backend = connect(&config.backend).map_err(|error| {
        CommandResult::failure(
            command,
            "backend_unavailable",
            format!("failed to build backend client: {error}"),
            4,
        )
    })?;

    Ok(DeskSession { runtime, desk: FrontDesk::http(backend) })
}

pub fn read_draft(command: &str, path: &Path) -> Result<QuoteDraft, CommandResult> {
    load_draft(path)
        .map_err(|error| CommandResult::failure(command, "input", format!("{error:#}"), 7))
}

fn load_draft(path: &Path) -> anyhow::Result<QuoteDraft> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("could not read draft file `{}`", path.display()))?;
    serde_json::from_str::<QuoteDraft>(&raw)
        .with_context(|| format!("could not parse draft file `{}`", path.display()))
}
