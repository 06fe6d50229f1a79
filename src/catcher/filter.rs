use crate::config::CatcherConfig;
use crate::error::{KatchError, Result};
use crate::exception::ExceptionFilter;
use crate::scenario::Scenario;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use std::error::Error;
use std::sync::Arc;

/// Envelope and code keys applied to every body a catcher produces
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseShape {
    envelope: Option<String>,
    code: Option<String>,
}

impl ResponseShape {
    pub fn new(envelope: Option<String>, code: Option<String>) -> Self {
        Self { envelope, code }
    }

    pub fn envelope(&self) -> Option<&str> {
        self.envelope.as_deref()
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Nest `body` under the envelope key and echo `status` under the code key
    ///
    /// Without an envelope the body is returned untouched; the code key only
    /// applies to an enveloped body.
    pub fn wrap(&self, body: Value, status: StatusCode) -> Value {
        let Some(envelope) = &self.envelope else {
            return body;
        };
        let mut object = Map::new();
        object.insert(envelope.clone(), body);
        if let Some(code) = &self.code {
            object.insert(code.clone(), Value::from(status.as_u16()));
        }
        Value::Object(object)
    }
}

impl From<CatcherConfig> for ResponseShape {
    fn from(config: CatcherConfig) -> Self {
        Self::new(config.envelope, config.code)
    }
}

/// The filter a catcher installs for each of a scenario's error types
pub struct ScenarioFilter {
    scenario: Arc<Scenario>,
    shape: Arc<ResponseShape>,
}

impl ScenarioFilter {
    pub fn new(scenario: Arc<Scenario>, shape: Arc<ResponseShape>) -> Self {
        Self { scenario, shape }
    }
}

impl ExceptionFilter for ScenarioFilter {
    fn catch(&self, error: &(dyn Error + 'static)) -> Result<Response> {
        let status = StatusCode::from_u16(self.scenario.status_code())
            .map_err(|_| KatchError::InvalidStatusCode(self.scenario.status_code()))?;
        let body = self.scenario.respond(error)?;

        Ok((status, Json(self.shape.wrap(body, status))).into_response())
    }
}
