//! Bearer token authentication and role-based access.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, Method},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::AppError;
use crate::services::Role;

/// Authenticated caller extracted from the bearer token.
///
/// Opaque to the catalog services; only the boundary layer reads it.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub subject: String,
    pub username: Option<String>,
    pub roles: Vec<Role>,
}

impl CurrentUser {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Check whether the caller may issue a request with this method.
    pub fn may(&self, method: &Method) -> bool {
        required_roles(method).iter().any(|role| self.has_role(*role))
    }
}

/// Roles accepted for a method: reads need any catalog role, writes need
/// moderator.
pub fn required_roles(method: &Method) -> &'static [Role] {
    if *method == Method::GET || *method == Method::HEAD {
        &[Role::User, Role::Moderator]
    } else {
        &[Role::Moderator]
    }
}

/// JWT authentication middleware.
///
/// Extracts and validates the JWT token from the Authorization header,
/// then injects the CurrentUser into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.token_verifier.verify(token)?;

    let current_user = CurrentUser {
        roles: claims.roles(state.token_verifier.client_id()),
        subject: claims.sub,
        username: claims.preferred_username,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Role guard middleware; must run after [`auth_middleware`].
pub async fn require_role_for_method(request: Request, next: Next) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::Unauthorized)?;

    if !user.may(request.method()) {
        tracing::debug!(subject = %user.subject, method = %request.method(), "Insufficient role");
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}
