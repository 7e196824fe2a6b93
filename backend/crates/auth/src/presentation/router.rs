//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::domain::repository::{CredentialRepository, SessionRepository};
use crate::infra::memory::{InMemorySessionRepository, StaticCredentialRepository};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_auth;

/// Create the Auth router with the in-memory stores
pub fn auth_router(
    state: AuthAppState<StaticCredentialRepository, InMemorySessionRepository>,
) -> Router {
    auth_router_generic(state)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<C, S>(state: AuthAppState<C, S>) -> Router
where
    C: CredentialRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/login", post(handlers::login::<C, S>))
        .route("/logout", post(handlers::logout::<C, S>))
        .route(
            "/me",
            get(handlers::me).route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_auth::<C, S>,
            )),
        )
        .with_state(state)
}
