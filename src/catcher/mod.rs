//! Catchers
//!
//! A [`Catcher`] collects [`Scenario`]s and installs one [`ScenarioFilter`]
//! per error type into a [`Host`]. A catcher can be created before the host
//! exists; scenarios added in the meantime are queued and installed by
//! [`Catcher::init_app`].
//!
//! ```
//! use axum::{Router, routing::get};
//! use katch::{Catcher, ErrorDispatcher, Exception, catch};
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("division by zero")]
//! struct DivisionByZero;
//!
//! async fn divide() -> Result<String, Exception> {
//!     Err(DivisionByZero.into())
//! }
//!
//! let mut catcher = Catcher::new();
//! catcher
//!     .add_scenario(catch!(DivisionByZero).with_status_code(400).and_stringify())
//!     .unwrap();
//!
//! let dispatcher = ErrorDispatcher::new();
//! catcher.init_app(dispatcher.clone()).unwrap();
//!
//! let app: Router = Router::new()
//!     .route("/divide", get(divide))
//!     .layer(dispatcher.layer());
//! ```

use crate::config::CatcherConfig;
use crate::error::{KatchError, Result};
use crate::exception::ExceptionFilter;
use crate::host::Host;
use crate::scenario::Scenario;
use std::sync::Arc;

mod builder;
mod filter;

pub use builder::CatcherBuilder;
pub use filter::{ResponseShape, ScenarioFilter};

/// Installs scenarios into a host's error dispatch
pub struct Catcher {
    host: Option<Box<dyn Host>>,
    scenarios: Vec<Arc<Scenario>>,
    pending_scenarios: Vec<Scenario>,
    shape: Arc<ResponseShape>,
}

impl Default for Catcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Catcher {
    /// A hostless catcher with the default `message` envelope and `code` key
    pub fn new() -> Self {
        Self::from_config(CatcherConfig::default())
    }

    pub fn from_config(config: CatcherConfig) -> Self {
        Self {
            host: None,
            scenarios: Vec::new(),
            pending_scenarios: Vec::new(),
            shape: Arc::new(ResponseShape::from(config)),
        }
    }

    pub fn builder() -> CatcherBuilder {
        CatcherBuilder::new()
    }

    /// Attach the catcher to `host` and install every queued scenario
    ///
    /// A catcher attaches once; a second call fails with
    /// [`KatchError::AlreadyAttached`].
    pub fn init_app<H: Host + 'static>(&mut self, host: H) -> Result<()> {
        self.attach(Box::new(host))
    }

    pub(crate) fn attach(&mut self, host: Box<dyn Host>) -> Result<()> {
        if self.host.is_some() {
            return Err(KatchError::AlreadyAttached);
        }

        let pending = std::mem::take(&mut self.pending_scenarios);
        tracing::info!(scenarios = pending.len(), "Attaching catcher to host");

        for scenario in pending {
            let scenario = install(host.as_ref(), &self.shape, scenario);
            self.scenarios.push(scenario);
        }
        self.host = Some(host);
        Ok(())
    }

    /// Add a scenario, installing it right away when attached
    pub fn add_scenario(&mut self, scenario: Scenario) -> Result<&mut Self> {
        scenario.validate()?;
        match &self.host {
            Some(host) => {
                let scenario = install(host.as_ref(), &self.shape, scenario);
                self.scenarios.push(scenario);
            }
            None => self.pending_scenarios.push(scenario),
        }
        Ok(self)
    }

    /// Add several scenarios; nothing is added if any of them is invalid
    pub fn add_scenarios<I>(&mut self, scenarios: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Scenario>,
    {
        let scenarios: Vec<Scenario> = scenarios.into_iter().collect();
        for scenario in &scenarios {
            scenario.validate()?;
        }
        for scenario in scenarios {
            self.add_scenario(scenario)?;
        }
        Ok(self)
    }

    pub fn is_attached(&self) -> bool {
        self.host.is_some()
    }

    /// Scenarios installed into the host, in installation order
    pub fn scenarios(&self) -> &[Arc<Scenario>] {
        &self.scenarios
    }

    /// Scenarios waiting for [`Catcher::init_app`]
    pub fn pending_scenarios(&self) -> &[Scenario] {
        &self.pending_scenarios
    }

    pub fn envelope_key(&self) -> Option<&str> {
        self.shape.envelope()
    }

    pub fn code_key(&self) -> Option<&str> {
        self.shape.code()
    }
}

fn install(host: &dyn Host, shape: &Arc<ResponseShape>, scenario: Scenario) -> Arc<Scenario> {
    if scenario.exceptions().is_empty() {
        tracing::warn!("Scenario catches no exception types and will never respond");
    }

    let scenario = Arc::new(scenario);
    let filter: Arc<dyn ExceptionFilter> =
        Arc::new(ScenarioFilter::new(Arc::clone(&scenario), Arc::clone(shape)));

    for exception in scenario.exceptions() {
        let installed = host.register_error_handler(*exception, Arc::clone(&filter));
        tracing::debug!(
            exception = exception.name(),
            status = scenario.status_code(),
            installed,
            "Installed scenario"
        );
    }
    scenario
}
