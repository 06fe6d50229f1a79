//! # katch
//!
//! Declarative error responses for axum applications.
//!
//! Request handlers return `Result<T, Exception>`. A [`Catcher`] maps error
//! types to JSON responses with [`Scenario`]s, and an [`ErrorDispatcher`]
//! layered onto the router turns every raised exception into the response of
//! the scenario registered for its type.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use axum::{Router, routing::get};
//! use katch::{Catcher, ErrorDispatcher, Exception, catch};
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("list index out of range")]
//! struct IndexError;
//!
//! async fn break_list() -> Result<String, Exception> {
//!     let list = vec!["foo"];
//!     Ok(list.get(1).ok_or(IndexError)?.to_string())
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let dispatcher = ErrorDispatcher::new();
//!
//!     // GET /break-something -> 400 {"error": "Out of bound"}
//!     let _catcher = Catcher::builder()
//!         .host(dispatcher.clone())
//!         .envelope("error")
//!         .no_code()
//!         .scenario(catch!(IndexError).with_status_code(400).and_return("Out of bound"))
//!         .build()
//!         .unwrap();
//!
//!     let app = Router::new()
//!         .route("/break-something", get(break_list))
//!         .layer(dispatcher.layer());
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod catcher;
pub mod config;
pub mod error;
pub mod exception;
pub mod host;
pub mod scenario;

// Re-export core types
pub use catcher::{Catcher, CatcherBuilder, ResponseShape, ScenarioFilter};
pub use config::CatcherConfig;
pub use error::{BoxError, KatchError, Result};
pub use exception::http::DefaultExceptionFilter;
pub use exception::{Exception, ExceptionFilter, ExceptionType};
pub use host::{CatcherLayer, ErrorDispatcher, Host};
pub use scenario::{Responder, Scenario, catch};

pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use katch::prelude::*;
/// ```
pub mod prelude {
    pub use crate::catch;
    pub use crate::catcher::{Catcher, CatcherBuilder};
    pub use crate::config::CatcherConfig;
    pub use crate::error::{KatchError, Result};
    pub use crate::exception::{Exception, ExceptionFilter, ExceptionType};
    pub use crate::host::{ErrorDispatcher, Host};
    pub use crate::scenario::Scenario;
}
