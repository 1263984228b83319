use axum::{
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth;
use crate::config::TokenSource;
use crate::AppState;

pub fn app_routes(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut protected = Router::new().route("/auth/userinfo", get(auth::user_info));

    // In context mode the middleware authenticates once per request and the
    // extractor reads the attached principal; in header mode the extractor
    // parses the Authorization header itself.
    if state.token_source == TokenSource::Context {
        protected = protected.layer(from_fn_with_state(state.clone(), auth::attach_principal));
    }

    Router::new()
        .route("/health", get(health_check))
        .route("/auth/google", post(auth::login_with_google))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}
