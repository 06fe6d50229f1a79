use crate::error::Result;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::any::{TypeId, type_name};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

pub mod http;

/// An error raised by a request handler
///
/// Handlers return `Result<T, Exception>`; any `std::error::Error` converts into it
/// with `?`. The resulting response carries the exception to the
/// [`CatcherLayer`](crate::host::CatcherLayer), which looks up the filter
/// registered for its type.
///
/// # Example
/// ```
/// use katch::Exception;
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("list index out of range")]
/// struct IndexError;
///
/// async fn break_list() -> Result<String, Exception> {
///     let list = vec!["foo"];
///     let item = list.get(1).ok_or(IndexError)?;
///     Ok(item.to_string())
/// }
/// ```
pub struct Exception {
    inner: Box<dyn Error + Send + Sync + 'static>,
    type_id: TypeId,
    type_name: &'static str,
}

impl Exception {
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            inner: Box::new(error),
            type_id: TypeId::of::<E>(),
            type_name: type_name::<E>(),
        }
    }

    /// Name of the concrete error type this exception was raised with
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// `TypeId` of the concrete error type this exception was raised with
    pub fn error_type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn as_error(&self) -> &(dyn Error + 'static) {
        self.inner.as_ref()
    }

    pub fn is<E: Error + 'static>(&self) -> bool {
        self.inner.is::<E>()
    }

    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }

    /// The exception followed by every error in its `source()` chain
    pub fn chain(&self) -> impl Iterator<Item = &(dyn Error + 'static)> {
        std::iter::successors(Some(self.as_error()), |error| (*error).source())
    }
}

impl<E> From<E> for Exception
where
    E: Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

impl fmt::Debug for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exception")
            .field("type", &self.type_name)
            .field("error", &self.inner)
            .finish()
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

/// Response extension that moves an [`Exception`] from the handler to the dispatch layer
#[derive(Clone, Debug)]
pub(crate) struct RaisedException(pub(crate) Arc<Exception>);

impl IntoResponse for Exception {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response
            .extensions_mut()
            .insert(RaisedException(Arc::new(self)));
        response
    }
}

/// Identifies an error type that a scenario can catch
#[derive(Clone, Copy)]
pub struct ExceptionType {
    id: TypeId,
    name: &'static str,
    matches: fn(&(dyn Error + 'static)) -> bool,
}

fn matches_type<E: Error + 'static>(error: &(dyn Error + 'static)) -> bool {
    error.is::<E>()
}

impl ExceptionType {
    pub fn of<E: Error + 'static>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: type_name::<E>(),
            matches: matches_type::<E>,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether `error` is an instance of this type
    pub fn matches(&self, error: &(dyn Error + 'static)) -> bool {
        (self.matches)(error)
    }
}

impl PartialEq for ExceptionType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ExceptionType {}

impl fmt::Debug for ExceptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// The ExceptionFilter trait
///
/// Filters turn a dispatched error into a response. The dispatcher calls the
/// filter registered for the error's type.
pub trait ExceptionFilter: Send + Sync + 'static {
    /// Catch an exception and return a response
    fn catch(&self, error: &(dyn Error + 'static)) -> Result<Response>;
}
