use axum::{
    Json, Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use serde::Serialize;
use tower_http::{
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use std::{sync::Arc, time::Duration};

use crate::{cargo_manifests, lookups, mawbs, uploads, user, weight_slips};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Resolve Basic credentials to an [`engine::User`] stored in the request
/// extensions.
async fn auth(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(TypedHeader(auth_header)) = auth_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user = state
        .engine
        .authenticate(auth_header.username(), auth_header.password())
        .await
        .map_err(|err| {
            tracing::error!("failed to authenticate {}: {err}", auth_header.username());
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let Some(user) = user else {
        tracing::debug!("rejected credentials for {}", auth_header.username());
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Build the application router.
///
/// Every route but `/health` requires Basic authentication. Requests running
/// longer than `request_timeout` are answered with 408.
pub fn router(state: ServerState, request_timeout: Duration) -> Router {
    let api = Router::new()
        .route("/user/me", get(user::me))
        .route("/dashboard", get(lookups::dashboard))
        .route("/dropdown/statuses", get(lookups::statuses))
        .route("/dropdown/mawbs", get(lookups::mawb_options))
        .route("/mawbs", post(mawbs::create).get(mawbs::list))
        .route("/mawbs/{id}", get(mawbs::get))
        .route(
            "/cargo-manifests",
            post(cargo_manifests::create)
                .put(cargo_manifests::update)
                .get(cargo_manifests::list),
        )
        .route("/cargo-manifests/{id}", get(cargo_manifests::get))
        .route(
            "/cargo-manifests/mawb/{mawb_info_id}",
            get(cargo_manifests::by_mawb),
        )
        .route(
            "/cargo-manifests/mawb/{mawb_info_id}/status",
            axum::routing::patch(cargo_manifests::update_status),
        )
        .route(
            "/weight-slips",
            post(weight_slips::create)
                .put(weight_slips::update)
                .get(weight_slips::list),
        )
        .route("/weight-slips/{id}", get(weight_slips::get))
        .route(
            "/weight-slips/mawb/{mawb_info_id}",
            get(weight_slips::by_mawb),
        )
        .route(
            "/weight-slips/mawb/{mawb_info_id}/status",
            axum::routing::patch(weight_slips::update_status),
        )
        .route("/uploads", post(uploads::create).get(uploads::list))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
    request_timeout: Duration,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state, request_timeout)).await
}
