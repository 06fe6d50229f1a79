//! Host-side error dispatch
//!
//! A [`Host`] is whatever a [`Catcher`](crate::Catcher) installs its filters
//! into. [`ErrorDispatcher`] is the axum host: it owns the table of filters
//! keyed by error type and hands out a [`CatcherLayer`] that applies the table
//! to a `Router`.
//!
//! Nested routers get their own named [`ErrorDispatcher::scope`]. Scopes share
//! the parent's table, so every unit of an application dispatches through the
//! same registrations, and the first registration for a type wins no matter
//! which scope made it.

use crate::exception::http::DefaultExceptionFilter;
use crate::exception::{Exception, ExceptionFilter, ExceptionType};
use axum::response::Response;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::any::TypeId;
use std::error::Error;
use std::sync::Arc;

mod layer;

pub use layer::{CatcherLayer, CatcherMiddleware};

/// Registration hook a [`Catcher`](crate::Catcher) installs its filters through
pub trait Host: Send + Sync {
    /// Register `filter` for errors of type `exception`
    ///
    /// Returns `false` when the host kept an earlier registration instead.
    fn register_error_handler(
        &self,
        exception: ExceptionType,
        filter: Arc<dyn ExceptionFilter>,
    ) -> bool;
}

struct Registration {
    exception: ExceptionType,
    filter: Arc<dyn ExceptionFilter>,
    owner: Arc<str>,
}

/// Exception-to-filter table for an axum application
///
/// Cloning is cheap; clones share the table.
#[derive(Clone)]
pub struct ErrorDispatcher {
    name: Arc<str>,
    table: Arc<DashMap<TypeId, Registration>>,
    fallback: DefaultExceptionFilter,
}

impl Default for ErrorDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorDispatcher {
    pub fn new() -> Self {
        Self {
            name: Arc::from("app"),
            table: Arc::new(DashMap::new()),
            fallback: DefaultExceptionFilter,
        }
    }

    /// A named sub-unit that registers into the same table
    pub fn scope(&self, name: &str) -> Self {
        Self {
            name: Arc::from(format!("{}.{}", self.name, name)),
            table: Arc::clone(&self.table),
            fallback: self.fallback,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tower layer that runs this table over a router's responses
    pub fn layer(&self) -> CatcherLayer {
        CatcherLayer::new(self.clone())
    }

    pub fn contains<E: Error + 'static>(&self) -> bool {
        self.table.contains_key(&TypeId::of::<E>())
    }

    /// Name of the scope whose filter handles `E`
    pub fn owner_of<E: Error + 'static>(&self) -> Option<String> {
        self.table
            .get(&TypeId::of::<E>())
            .map(|registration| registration.owner.to_string())
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Run the filter registered for `exception`
    ///
    /// The exception's own type is looked up directly, then each error in its
    /// `source()` chain is tried. Returns `None` when nothing in the chain is
    /// registered.
    pub fn dispatch(&self, exception: &Exception) -> Option<Response> {
        let direct = self
            .table
            .get(&exception.error_type_id())
            .map(|registration| Arc::clone(&registration.filter));
        let (error, filter) = match direct {
            Some(filter) => (exception.as_error(), filter),
            None => exception
                .chain()
                .skip(1)
                .find_map(|error| self.filter_for(error).map(|filter| (error, filter)))?,
        };

        match filter.catch(error) {
            Ok(response) => Some(response),
            Err(e) => {
                tracing::error!(
                    exception = exception.type_name(),
                    "Exception filter failed: {}",
                    e
                );
                Some(self.fallback.respond(exception))
            }
        }
    }

    /// The 500 response for exceptions no filter handles
    pub fn fallback(&self, exception: &Exception) -> Response {
        self.fallback.respond(exception)
    }

    /// [`dispatch`](Self::dispatch), or the fallback 500 response
    pub fn handle(&self, exception: &Exception) -> Response {
        self.dispatch(exception)
            .unwrap_or_else(|| self.fallback(exception))
    }

    fn filter_for(&self, error: &(dyn Error + 'static)) -> Option<Arc<dyn ExceptionFilter>> {
        self.table
            .iter()
            .find(|registration| registration.exception.matches(error))
            .map(|registration| Arc::clone(&registration.filter))
    }
}

impl Host for ErrorDispatcher {
    fn register_error_handler(
        &self,
        exception: ExceptionType,
        filter: Arc<dyn ExceptionFilter>,
    ) -> bool {
        match self.table.entry(exception.id()) {
            Entry::Occupied(existing) => {
                tracing::debug!(
                    exception = exception.name(),
                    scope = %self.name,
                    owner = %existing.get().owner,
                    "Handler already registered, keeping the first one"
                );
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(Registration {
                    exception,
                    filter,
                    owner: Arc::clone(&self.name),
                });
                tracing::debug!(
                    exception = exception.name(),
                    scope = %self.name,
                    "Registered exception handler"
                );
                true
            }
        }
    }
}
