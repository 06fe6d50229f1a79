use crate::exception::RaisedException;
use crate::host::ErrorDispatcher;
use axum::{http::Request, response::Response};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Tower Layer that answers raised exceptions through an [`ErrorDispatcher`]
///
/// # Example
/// ```
/// use axum::{Router, routing::get};
/// use katch::ErrorDispatcher;
///
/// let dispatcher = ErrorDispatcher::new();
/// let app: Router = Router::new()
///     .route("/", get(|| async { "ok" }))
///     .layer(dispatcher.layer());
/// ```
#[derive(Clone)]
pub struct CatcherLayer {
    dispatcher: ErrorDispatcher,
}

impl CatcherLayer {
    pub fn new(dispatcher: ErrorDispatcher) -> Self {
        Self { dispatcher }
    }
}

impl<S> Layer<S> for CatcherLayer {
    type Service = CatcherMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CatcherMiddleware {
            inner,
            dispatcher: self.dispatcher.clone(),
        }
    }
}

#[derive(Clone)]
pub struct CatcherMiddleware<S> {
    inner: S,
    dispatcher: ErrorDispatcher,
}

impl<S, B> Service<Request<B>> for CatcherMiddleware<S>
where
    S: Service<Request<B>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        let dispatcher = self.dispatcher.clone();

        // The ready service goes into the future; keep a fresh clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let mut response = inner.call(request).await?;
            let raised = response.extensions_mut().remove::<RaisedException>();
            let Some(RaisedException(exception)) = raised else {
                return Ok(response);
            };
            match dispatcher.dispatch(&exception) {
                Some(response) => Ok(response),
                None => {
                    // Outer layers may hold a table that knows this exception.
                    let mut response = dispatcher.fallback(&exception);
                    response
                        .extensions_mut()
                        .insert(RaisedException(exception));
                    Ok(response)
                }
            }
        })
    }
}
