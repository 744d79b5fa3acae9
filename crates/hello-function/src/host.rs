//! Local host runtime - serves a handler over HTTP
//!
//! Stands in for the function-hosting platform: every method on every path is
//! converted into an SDK [`Request`](hello_function_sdk::Request), passed to
//! the handler, and the SDK response is written back to the client.

use axum::{
    body::{Body, Bytes},
    extract::{ConnectInfo, DefaultBodyLimit, FromRequestParts, State},
    http::{request::Parts, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hello_function_sdk::Handler;
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::config::FunctionConfig;

#[derive(Clone)]
struct HostState {
    handler: Arc<dyn Handler>,
}

/// Peer IP of the connection, empty when neither the listener nor a
/// `MockConnectInfo` layer recorded it.
struct RemoteAddr(String);

impl<S: Send + Sync> FromRequestParts<S> for RemoteAddr {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let addr = ConnectInfo::<SocketAddr>::from_request_parts(parts, state)
            .await
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_default();
        Ok(Self(addr))
    }
}

/// Create the router that sends every request to `handler`
pub fn create_router<H: Handler>(handler: H, config: &FunctionConfig) -> Router {
    let state = HostState {
        handler: Arc::new(handler),
    };

    Router::new()
        .route("/", any(invoke_function))
        .route("/{*path}", any(invoke_function))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout(),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `handler` on `listener` until Ctrl-C or SIGTERM
pub async fn serve<H: Handler>(
    listener: TcpListener,
    handler: H,
    config: &FunctionConfig,
) -> anyhow::Result<()> {
    let app = create_router(handler, config);

    tracing::info!("Function listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Function host stopped");
    Ok(())
}

async fn invoke_function(
    State(state): State<HostState>,
    RemoteAddr(remote_addr): RemoteAddr,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = Uuid::new_v4().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %uri.path(),
        "Incoming request"
    );

    let query: HashMap<String, String> = uri
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect()
        })
        .unwrap_or_default();

    // Repeated headers are folded into one comma-separated value.
    let mut header_map: HashMap<String, String> = HashMap::new();
    for (key, value) in headers.iter() {
        let value = String::from_utf8_lossy(value.as_bytes());
        header_map
            .entry(key.to_string())
            .and_modify(|joined| {
                joined.push_str(", ");
                joined.push_str(&value);
            })
            .or_insert_with(|| value.to_string());
    }

    let body = if body.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(&body).into_owned())
    };

    let sdk_request = hello_function_sdk::Request {
        method: method.to_string(),
        path: uri.path().to_string(),
        remote_addr,
        query,
        headers: header_map,
        body,
        request_id: request_id.clone(),
    };

    let sdk_response = state.handler.invoke(&sdk_request);
    into_http_response(sdk_response, &request_id)
}

fn into_http_response(sdk_response: hello_function_sdk::Response, request_id: &str) -> Response {
    let status = match StatusCode::from_u16(sdk_response.status) {
        Ok(status) => status,
        Err(_) => {
            tracing::error!(
                request_id = %request_id,
                "Handler returned invalid status {}",
                sdk_response.status
            );
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let mut builder = Response::builder().status(status);
    for (key, value) in sdk_response.headers {
        builder = builder.header(key, value);
    }

    match builder.body(Body::from(sdk_response.body.unwrap_or_default())) {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(request_id = %request_id, "Failed to build response: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to build response").into_response()
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to register SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
