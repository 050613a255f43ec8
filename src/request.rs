//! Inbound command requests
//!
//! A request carries one raw phrase. The transport in front of the engine
//! decides how bytes arrive; this module only decodes, runs and reports.

use crate::core::error::SniperError;
use crate::engine::Engine;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    pub command: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Ok,
    /// The payload could not be decoded; the engine was not invoked
    ClientError,
    /// A command's action failed
    ExecutionError,
}

impl ResponseStatus {
    /// HTTP-style status code for transports that want one
    pub fn code(&self) -> u16 {
        match self {
            ResponseStatus::Ok => 200,
            ResponseStatus::ClientError => 400,
            ResponseStatus::ExecutionError => 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CommandResponse {
    pub fn ok() -> Self {
        Self {
            status: ResponseStatus::Ok,
            error: None,
        }
    }

    fn failed(status: ResponseStatus, error: &SniperError) -> Self {
        Self {
            status,
            error: Some(error.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ResponseStatus::Ok
    }
}

/// Run a decoded request
pub fn handle(engine: &Engine, request: &CommandRequest) -> CommandResponse {
    match engine.run(&request.command) {
        Ok(()) => CommandResponse::ok(),
        Err(e) => {
            tracing::error!(command = %request.command, "command failed: {}", e);
            CommandResponse::failed(ResponseStatus::ExecutionError, &e)
        }
    }
}

/// Decode `body` as a [`CommandRequest`] and run it
pub fn handle_json(engine: &Engine, body: &str) -> CommandResponse {
    match serde_json::from_str::<CommandRequest>(body) {
        Ok(request) => handle(engine, &request),
        Err(e) => {
            let error = SniperError::MalformedRequest(e.to_string());
            tracing::warn!("rejected request: {}", error);
            CommandResponse::failed(ResponseStatus::ClientError, &error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EngineConfig;
    use crate::input::RecordingExecutor;
    use std::sync::Arc;

    fn engine() -> (Arc<RecordingExecutor>, Engine, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let exec = Arc::new(RecordingExecutor::new());
        let config = EngineConfig {
            spot_file: Some(dir.path().join("spots.json")),
            ..EngineConfig::without_delays()
        };
        let engine = Engine::new(exec.clone(), config).unwrap();
        (exec, engine, dir)
    }

    #[test]
    fn test_ok_response_omits_error() {
        let (exec, engine, _dir) = engine();
        let response = handle_json(&engine, r#"{"command": "alpha"}"#);
        assert!(response.is_ok());
        assert_eq!(serde_json::to_string(&response).unwrap(), r#"{"status":"ok"}"#);
        assert_eq!(exec.typed(), "a");
    }

    #[test]
    fn test_malformed_body_never_reaches_engine() {
        let (exec, engine, _dir) = engine();
        for body in ["", "not json", r#"{"cmd": "left"}"#, r#"{"command": 5}"#] {
            let response = handle_json(&engine, body);
            assert_eq!(response.status, ResponseStatus::ClientError, "body {:?}", body);
            assert_eq!(response.status.code(), 400);
            assert!(response.error.is_some());
        }
        assert!(exec.events().is_empty());
        assert!(engine.current_state().is_none());
    }

    #[test]
    fn test_action_failure_is_execution_error() {
        let (exec, engine, _dir) = engine();
        exec.fail_next("no display");
        let response = handle_json(&engine, r#"{"command": "click"}"#);
        assert_eq!(response.status, ResponseStatus::ExecutionError);
        assert_eq!(response.status.code(), 500);
        assert!(response.error.unwrap().contains("no display"));
    }
}
