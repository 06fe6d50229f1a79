use axum::{Router, routing::get};
use katch::{Catcher, ErrorDispatcher, Exception, catch};
use serde_json::json;

mod errors;

use errors::{ArithmeticError, IndexError, QuotaError, TypeError};

async fn break_list() -> Result<String, Exception> {
    let list = ["foo"];
    let item = list.get(1).ok_or(IndexError { index: 1 })?;
    Ok(item.to_string())
}

async fn break_math() -> Result<String, Exception> {
    let (a, b) = (1i64, 0i64);
    let quotient = a.checked_div(b).ok_or(ArithmeticError::DivisionByZero)?;
    Ok(quotient.to_string())
}

async fn break_concat() -> Result<String, Exception> {
    let last_name: Option<&str> = None;
    let last_name = last_name.ok_or(TypeError("NoneType"))?;
    Ok(format!("John {}", last_name))
}

async fn break_quota() -> Result<String, Exception> {
    Err(QuotaError { used: 11, limit: 10 }.into())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("🚀 Starting Example Server...");

    // 1. Dispatch table for the app and a scope for the nested API router
    let dispatcher = ErrorDispatcher::new();
    let api = dispatcher.scope("api");

    // 2. Catcher created before the host exists; scenarios queue up
    let mut catcher = Catcher::builder().envelope("error").no_code().build()?;
    catcher
        .add_scenario(catch!(IndexError).with_status_code(400).and_return("Out of bound"))?
        .add_scenario(catch!(ArithmeticError).with_status_code(400).and_stringify())?;
    catcher.init_app(dispatcher.clone())?;

    // 3. API catcher without envelope; every incident gets an id
    let _api_catcher = Catcher::builder()
        .host(api.clone())
        .no_envelope()
        .scenario(catch!(TypeError).with_status_code(500).and_call(|_| {
            json!({
                "msg": "Something went wrong",
                "incident_id": uuid::Uuid::new_v4().to_string(),
            })
        }))
        .scenario(catch!(QuotaError).with_status_code(429).and_call(|e| {
            e.downcast_ref::<QuotaError>()
                .map(|quota| json!({ "used": quota.used, "limit": quota.limit }))
        }))
        .build()?;

    tracing::info!(handlers = dispatcher.len(), "Exception handlers registered");

    // 4. Create Router
    let api_router = Router::new()
        .route("/concat", get(break_concat))
        .route("/quota", get(break_quota))
        .layer(api.layer());

    let router = Router::new()
        .route("/break-list", get(break_list))
        .route("/break-math", get(break_math))
        .nest("/api/v1", api_router)
        .layer(dispatcher.layer());

    // 5. Start server
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("✅ Server running on http://127.0.0.1:{}", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}
