use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;
use uuid::Uuid;

use crate::auth::cookie::SESSION_COOKIE;
use crate::auth::jwt::JwtKeys;
use crate::auth::repo::Role;
use crate::error::ApiError;

/// Identity resolved from the session cookie. Extracting this is the
/// authentication gate: handlers that take it reject unauthenticated
/// requests before running.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or(ApiError::Unauthorized("Unauthorized - no token provided"))?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(&token).map_err(|e| {
            warn!(error = %e, "session token rejected");
            ApiError::Unauthorized("Unauthorized - invalid or expired token")
        })?;

        Ok(AuthUser {
            id: claims.sub,
            role: claims.role,
        })
    }
}

/// Authentication plus the admin capability. Composes `AuthUser`, so a
/// missing or invalid token still surfaces as 401; only an authenticated
/// non-admin caller gets 403.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.is_admin() {
            return Err(ApiError::Forbidden);
        }
        Ok(AdminUser(user))
    }
}
