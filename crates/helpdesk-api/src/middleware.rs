use axum::{
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::auth::{AppState, verify_token};

/// Extract and validate the JWT from the Authorization header, then require
/// the admin role. Runs before any ticket handler.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let claims = verify_token(&state.jwt_secret, token).map_err(|e| {
        warn!("Rejected session token: {}", e);
        StatusCode::UNAUTHORIZED
    })?;

    if !claims.is_admin() {
        warn!("User {} with role '{}' denied admin view", claims.sub, claims.role);
        return Err(StatusCode::FORBIDDEN);
    }

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
