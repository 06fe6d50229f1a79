use crate::catcher::Catcher;
use crate::config::CatcherConfig;
use crate::error::Result;
use crate::host::Host;
use crate::scenario::Scenario;

/// Builder for constructing a [`Catcher`]
///
/// With a host the scenarios are installed by [`build`](Self::build); without
/// one they stay queued until [`Catcher::init_app`].
///
/// # Example
/// ```
/// use katch::{Catcher, ErrorDispatcher, catch};
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("list index out of range")]
/// struct IndexError;
///
/// let dispatcher = ErrorDispatcher::new();
/// let catcher = Catcher::builder()
///     .host(dispatcher.clone())
///     .envelope("error")
///     .no_code()
///     .scenario(catch!(IndexError).with_status_code(400).and_return("Out of bound"))
///     .build()
///     .unwrap();
///
/// assert!(catcher.is_attached());
/// assert!(dispatcher.contains::<IndexError>());
/// ```
pub struct CatcherBuilder {
    host: Option<Box<dyn Host>>,
    scenarios: Vec<Scenario>,
    config: CatcherConfig,
}

impl CatcherBuilder {
    pub fn new() -> Self {
        Self {
            host: None,
            scenarios: Vec::new(),
            config: CatcherConfig::default(),
        }
    }

    pub fn host<H: Host + 'static>(mut self, host: H) -> Self {
        self.host = Some(Box::new(host));
        self
    }

    pub fn scenario(mut self, scenario: Scenario) -> Self {
        self.scenarios.push(scenario);
        self
    }

    pub fn scenarios<I>(mut self, scenarios: I) -> Self
    where
        I: IntoIterator<Item = Scenario>,
    {
        self.scenarios.extend(scenarios);
        self
    }

    /// Replace both response keys
    pub fn config(mut self, config: CatcherConfig) -> Self {
        self.config = config;
        self
    }

    pub fn envelope(mut self, key: impl Into<String>) -> Self {
        self.config.envelope = Some(key.into());
        self
    }

    pub fn no_envelope(mut self) -> Self {
        self.config.envelope = None;
        self
    }

    pub fn code(mut self, key: impl Into<String>) -> Self {
        self.config.code = Some(key.into());
        self
    }

    pub fn no_code(mut self) -> Self {
        self.config.code = None;
        self
    }

    /// Build the catcher, installing its scenarios if a host was given
    pub fn build(self) -> Result<Catcher> {
        let mut catcher = Catcher::from_config(self.config);
        catcher.add_scenarios(self.scenarios)?;
        if let Some(host) = self.host {
            catcher.attach(host)?;
        }
        Ok(catcher)
    }
}

impl Default for CatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
