use auth::Role;
use auth::TokenError;
use auth::TokenKind;
use auth::TokenPair;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::account::errors::AuthError;
use crate::account::ports::AccountEventPublisher;
use crate::account::ports::CredentialRepository;
use crate::domain::account::models::CredentialRecord;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::inbound::http::transport;

/// Extension type carrying the authenticated principal into handlers.
///
/// The identifier feeds downstream audit fields (created_by / edited_by);
/// nothing else crosses from the guard into the wrapped operation.
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub identifier: String,
    pub role: Role,
}

/// Per-route guard configuration: the shared app state plus the role set
/// this route requires. Role checks are set membership, never equality
/// against a single role.
pub struct GuardState<CR, EP>
where
    CR: CredentialRepository,
    EP: AccountEventPublisher,
{
    pub app: AppState<CR, EP>,
    pub required_roles: &'static [Role],
}

impl<CR, EP> GuardState<CR, EP>
where
    CR: CredentialRepository,
    EP: AccountEventPublisher,
{
    pub fn new(app: AppState<CR, EP>, required_roles: &'static [Role]) -> Self {
        Self {
            app,
            required_roles,
        }
    }
}

impl<CR, EP> Clone for GuardState<CR, EP>
where
    CR: CredentialRepository,
    EP: AccountEventPublisher,
{
    fn clone(&self) -> Self {
        Self {
            app: self.app.clone(),
            required_roles: self.required_roles,
        }
    }
}

/// Session-guard middleware wrapping every protected route.
///
/// Per request:
/// 1. No access token presented: enter the refresh flow.
/// 2. Access token valid: load the record behind the subject (missing
///    record or blocked account reject with 401), check the claims role -
///    the issuance-time snapshot, not re-read from storage - against the
///    required set, then run the wrapped handler unchanged.
/// 3. Access token malformed or with a bad signature: reject immediately.
///    The refresh path is reserved for the expired sub-case; a tampered
///    access token is no evidence a valid refresh token ever existed.
/// 4. Access token expired (or absent): validate the refresh token, load
///    the record, mint a whole new pair (rotation - both tokens re-minted),
///    attach it to the response, then re-check active and role exactly as
///    in 2 and either run the handler or reject.
///
/// Authorization is evaluated fully before the wrapped operation runs;
/// every outcome is either the handler's response or a single rejection.
pub async fn require_roles<CR, EP>(
    State(guard): State<GuardState<CR, EP>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    CR: CredentialRepository,
    EP: AccountEventPublisher,
{
    let Some(token) = transport::read_token(&req, transport::ACCESS_TOKEN) else {
        return Ok(refresh_flow(&guard, req, next).await);
    };

    match guard.app.token_validator.validate(&token) {
        Ok(claims) if claims.kind == TokenKind::Access => {
            guard.app.account_service.authorize(&claims.sub).await?;

            if !guard.required_roles.contains(&claims.role) {
                return Err(AuthError::Forbidden.into());
            }

            req.extensions_mut().insert(AuthenticatedAccount {
                identifier: claims.sub,
                role: claims.role,
            });

            Ok(next.run(req).await)
        }
        // A refresh token in the access slot is structurally valid but
        // semantically wrong; treat it like tampering.
        Ok(_) => Err(AuthError::InvalidToken.into()),
        Err(TokenError::Expired) | Err(TokenError::Missing) => {
            Ok(refresh_flow(&guard, req, next).await)
        }
        Err(_) => Err(AuthError::InvalidToken.into()),
    }
}

/// The refresh half of the state machine: exchange a valid refresh token
/// for a rotated pair, then re-run the authorization checks.
///
/// The pair is attached to the response whether the final checks pass or
/// not; a blocked or under-privileged subject still cannot use it, since
/// every guarded call re-checks the record.
async fn refresh_flow<CR, EP>(guard: &GuardState<CR, EP>, mut req: Request, next: Next) -> Response
where
    CR: CredentialRepository,
    EP: AccountEventPublisher,
{
    let token = transport::read_token(&req, transport::REFRESH_TOKEN);
    let (record, pair) = match rotate(guard, token).await {
        Ok(rotated) => rotated,
        Err(err) => return ApiError::from(err).into_response(),
    };

    let outcome = if !record.active {
        Err(AuthError::Blocked)
    } else if !guard.required_roles.contains(&record.role) {
        Err(AuthError::Forbidden)
    } else {
        req.extensions_mut().insert(AuthenticatedAccount {
            identifier: record.identifier.to_string(),
            role: record.role,
        });
        Ok(())
    };

    let mut response = match outcome {
        Ok(()) => next.run(req).await,
        Err(err) => ApiError::from(err).into_response(),
    };

    transport::attach_pair(&mut response, &pair, guard.app.token_issuer.ttl());
    response
}

/// Validate the refresh token and mint a new pair for its subject.
async fn rotate<CR, EP>(
    guard: &GuardState<CR, EP>,
    token: Option<String>,
) -> Result<(CredentialRecord, TokenPair), AuthError>
where
    CR: CredentialRepository,
    EP: AccountEventPublisher,
{
    let token = token.ok_or(AuthError::MissingCredential)?;

    let claims = match guard.app.token_validator.validate(&token) {
        Ok(claims) if claims.kind == TokenKind::Refresh => claims,
        Ok(_) => return Err(AuthError::InvalidToken),
        Err(TokenError::Missing) => return Err(AuthError::MissingCredential),
        Err(TokenError::Expired) => return Err(AuthError::TokenExpired),
        Err(_) => return Err(AuthError::InvalidToken),
    };

    let record = guard.app.account_service.credential(&claims.sub).await?;

    // Rotation re-derives the role from storage, so a role change lands
    // here even though outstanding access tokens keep their snapshot.
    let pair = guard
        .app
        .token_issuer
        .issue_pair(record.identifier.as_str(), record.role)
        .map_err(|e| AuthError::Token(e.to_string()))?;

    Ok((record, pair))
}
