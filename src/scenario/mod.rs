//! Scenarios
//!
//! A [`Scenario`] binds one or more error types to a status code and a way of
//! producing the response body. Scenarios are built with [`catch`] (or the
//! [`catch!`](crate::catch!) macro) and a chain of modifiers:
//!
//! ```
//! use katch::catch;
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("list index out of range")]
//! struct IndexError;
//!
//! let scenario = catch!(IndexError)
//!     .with_status_code(400)
//!     .and_return("Out of bound");
//!
//! assert_eq!(scenario.respond(&IndexError).unwrap(), "Out of bound");
//! ```

use crate::error::{BoxError, KatchError, Result};
use crate::exception::ExceptionType;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Shared response callable stored by [`Responder::Callable`]
pub type ResponseFn = Arc<dyn Fn(&(dyn Error + 'static)) -> Result<Value> + Send + Sync>;

/// How a scenario turns a caught error into a response body
#[derive(Clone)]
pub enum Responder {
    /// Call a user function with the error
    Callable(ResponseFn),
    /// Render the error with its `Display` implementation
    Stringify,
    /// Return a fixed value
    Constant(Value),
}

impl fmt::Debug for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Responder::Callable(_) => f.write_str("Callable"),
            Responder::Stringify => f.write_str("Stringify"),
            Responder::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
        }
    }
}

/// A mapping from error types to an HTTP error response
#[derive(Clone, Debug)]
pub struct Scenario {
    exceptions: Vec<ExceptionType>,
    status_code: u16,
    responder: Option<Responder>,
}

/// Start a scenario for the given error types
///
/// The scenario answers with status 500 until [`Scenario::with_status_code`]
/// says otherwise. An empty type list is accepted but never matches anything.
pub fn catch<I>(exceptions: I) -> Scenario
where
    I: IntoIterator<Item = ExceptionType>,
{
    Scenario {
        exceptions: exceptions.into_iter().collect(),
        status_code: 500,
        responder: None,
    }
}

/// Build a [`Scenario`] from a list of error type names
///
/// `catch!(IndexError, KeyError)` is `catch([ExceptionType::of::<IndexError>(), ...])`.
#[macro_export]
macro_rules! catch {
    () => {
        $crate::scenario::catch(::std::vec::Vec::<$crate::exception::ExceptionType>::new())
    };
    ($($exception:ty),+ $(,)?) => {
        $crate::scenario::catch([$($crate::exception::ExceptionType::of::<$exception>()),*])
    };
}

impl Scenario {
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Always respond with `value`
    pub fn and_return(mut self, value: impl Into<Value>) -> Self {
        self.responder = Some(Responder::Constant(value.into()));
        self
    }

    /// Respond with the error's `Display` output
    pub fn and_stringify(mut self) -> Self {
        self.responder = Some(Responder::Stringify);
        self
    }

    /// Respond with whatever `f` returns for the caught error
    ///
    /// The error is passed as `&dyn Error`; use `downcast_ref` to reach fields
    /// of a concrete type.
    pub fn and_call<F, T>(mut self, f: F) -> Self
    where
        F: Fn(&(dyn Error + 'static)) -> T + Send + Sync + 'static,
        T: Serialize,
    {
        let responder: ResponseFn =
            Arc::new(move |error: &(dyn Error + 'static)| -> Result<Value> {
                Ok(serde_json::to_value(f(error))?)
            });
        self.responder = Some(Responder::Callable(responder));
        self
    }

    /// Like [`Scenario::and_call`], for a callable that can fail
    ///
    /// A failure is not turned into a body; it surfaces from [`Scenario::respond`]
    /// and the dispatcher answers with its fallback response.
    pub fn and_try_call<F, T, E>(mut self, f: F) -> Self
    where
        F: Fn(&(dyn Error + 'static)) -> std::result::Result<T, E> + Send + Sync + 'static,
        T: Serialize,
        E: Into<BoxError>,
    {
        let responder: ResponseFn =
            Arc::new(move |error: &(dyn Error + 'static)| -> Result<Value> {
                let value = f(error).map_err(|e| KatchError::Callable(e.into()))?;
                Ok(serde_json::to_value(value)?)
            });
        self.responder = Some(Responder::Callable(responder));
        self
    }

    /// Produce the response body for `error`
    ///
    /// A scenario without a responder yields `null`.
    pub fn respond(&self, error: &(dyn Error + 'static)) -> Result<Value> {
        match &self.responder {
            Some(Responder::Callable(f)) => f(error),
            Some(Responder::Stringify) => Ok(Value::String(error.to_string())),
            Some(Responder::Constant(value)) => Ok(value.clone()),
            None => Ok(Value::Null),
        }
    }

    /// Reject scenarios that cannot produce a well-formed response
    pub fn validate(&self) -> Result<()> {
        if self.responder.is_none() {
            return Err(KatchError::MissingResponder {
                exceptions: self.exception_names(),
            });
        }
        if !(100..=999).contains(&self.status_code) {
            return Err(KatchError::InvalidStatusCode(self.status_code));
        }
        Ok(())
    }

    pub fn exceptions(&self) -> &[ExceptionType] {
        &self.exceptions
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn responder(&self) -> Option<&Responder> {
        self.responder.as_ref()
    }

    pub(crate) fn exception_names(&self) -> String {
        self.exceptions
            .iter()
            .map(ExceptionType::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
