use std::sync::Arc;
use std::time::Duration;

use auth::Role;
use auth::TokenIssuer;
use auth::TokenValidator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::guard::require_roles;
use super::guard::GuardState;
use super::handlers::change_password::change_password;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::me::me;
use super::handlers::register::register;
use super::handlers::set_role::set_role;
use super::handlers::set_status::set_status;
use crate::account::ports::AccountEventPublisher;
use crate::account::ports::CredentialRepository;
use crate::domain::account::service::AccountService;

/// Role set for routes any authenticated principal may call.
pub const ANY_ROLE: &[Role] = &[Role::Admin, Role::Seller, Role::User];
/// Role set for administrative routes.
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Shared state behind every handler and the guard.
///
/// Generic over the outbound ports so tests can run the full router
/// against in-memory implementations.
pub struct AppState<CR, EP>
where
    CR: CredentialRepository,
    EP: AccountEventPublisher,
{
    pub account_service: Arc<AccountService<CR, EP>>,
    pub token_issuer: Arc<TokenIssuer>,
    pub token_validator: Arc<TokenValidator>,
}

impl<CR, EP> Clone for AppState<CR, EP>
where
    CR: CredentialRepository,
    EP: AccountEventPublisher,
{
    fn clone(&self) -> Self {
        Self {
            account_service: Arc::clone(&self.account_service),
            token_issuer: Arc::clone(&self.token_issuer),
            token_validator: Arc::clone(&self.token_validator),
        }
    }
}

pub fn create_router<CR, EP>(state: AppState<CR, EP>) -> Router
where
    CR: CredentialRepository,
    EP: AccountEventPublisher,
{
    let public_routes = Router::new()
        .route("/api/auth/register", post(register::<CR, EP>))
        .route("/api/auth/login", post(login::<CR, EP>))
        .route("/api/auth/logout", post(logout));

    let account_routes = Router::new()
        .route("/api/accounts/me", get(me::<CR, EP>))
        .route("/api/accounts/password", put(change_password::<CR, EP>))
        .route_layer(middleware::from_fn_with_state(
            GuardState::new(state.clone(), ANY_ROLE),
            require_roles::<CR, EP>,
        ));

    let admin_routes = Router::new()
        .route("/api/accounts/:identifier/role", put(set_role::<CR, EP>))
        .route(
            "/api/accounts/:identifier/status",
            put(set_status::<CR, EP>),
        )
        .route_layer(middleware::from_fn_with_state(
            GuardState::new(state.clone(), ADMIN_ONLY),
            require_roles::<CR, EP>,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(account_routes)
        .merge(admin_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

