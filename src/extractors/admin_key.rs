//! Admin key header and the guard applied to `/admin`.

use crate::config::AppConfig;
use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

pub const ADMIN_KEY_HEADER: &str = "X-Admin-Key";

/// Optional admin key from the `X-Admin-Key` header.
#[derive(Clone, Debug)]
pub struct AdminKey(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for AdminKey
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(ADMIN_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Ok(AdminKey(value))
    }
}

/// Passes every request when no `ADMIN_API_KEY` is configured.
pub async fn require_admin_key(
    State(config): State<Arc<AppConfig>>,
    AdminKey(key): AdminKey,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(expected) = &config.admin_api_key {
        if key.as_deref() != Some(expected.as_str()) {
            tracing::warn!(path = %req.uri().path(), "rejected admin request");
            return Err(AppError::Unauthorized);
        }
    }
    Ok(next.run(req).await)
}
