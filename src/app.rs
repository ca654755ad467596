use std::net::SocketAddr;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use crate::{display, nutrition, search};

pub fn build_app(state: AppState) -> Router {
    let app = Router::new()
        .merge(display::router())
        .merge(nutrition::router())
        .merge(search::router())
        .with_state(state);
    with_http_layers(app)
}

/// CORS and request tracing shared by both binaries.
pub fn with_http_layers(router: Router) -> Router {
    router.layer(CorsLayer::permissive()).layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &axum::http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
            })
            .on_response(
                |res: &axum::http::Response<_>, latency: std::time::Duration, span: &tracing::Span| {
                    let status = res.status();
                    span.record("status", tracing::field::display(status));
                    if status.is_server_error() {
                        tracing::error!(%status, ?latency, "response");
                    } else {
                        tracing::info!(%status, ?latency, "response");
                    }
                },
            ),
    )
}

pub fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "bobafit=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }
}

pub async fn serve(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
