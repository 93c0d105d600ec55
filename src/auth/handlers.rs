use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        cookie::{clear_session_cookie, session_cookie},
        dto::{LoginRequest, SignupRequest, UserResponse},
        extractors::AuthUser,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::{is_unique_violation, User},
    },
    error::ApiError,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/check-auth", get(check_auth))
}

#[instrument(skip(state, jar, payload))]
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, CookieJar, Json<UserResponse>), ApiError> {
    if payload.name.is_empty() || payload.email.is_empty() || payload.password.is_empty() {
        warn!("signup with missing fields");
        return Err(ApiError::Validation("Missing fields"));
    }

    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "signup for existing email");
        return Err(ApiError::Conflict("User already exists"));
    }

    let hash = hash_password(&payload.password)?;
    let user = match User::create(&state.db, &payload.name, &payload.email, &hash).await {
        Ok(u) => u,
        // Lost a race against a concurrent signup with the same email.
        Err(e) if is_unique_violation(&e) => {
            return Err(ApiError::Conflict("User already exists"))
        }
        Err(e) => return Err(e.into()),
    };

    let token = JwtKeys::from_ref(&state).sign(user.id, user.role)?;
    let jar = jar.add(session_cookie(token, state.config.production));

    info!(user_id = %user.id, email = %user.email, "user created");
    Ok((
        StatusCode::CREATED,
        jar,
        Json(UserResponse {
            success: true,
            message: Some("User created successfully".into()),
            user: user.into(),
        }),
    ))
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<UserResponse>), ApiError> {
    // Unknown email and wrong password produce the identical response, so a
    // caller cannot enumerate accounts.
    let Some(user) = User::find_by_email(&state.db, &payload.email).await? else {
        warn!("login for unknown email");
        return Err(ApiError::InvalidCredentials);
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login with invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = JwtKeys::from_ref(&state).sign(user.id, user.role)?;
    let jar = jar.add(session_cookie(token, state.config.production));

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok((
        jar,
        Json(UserResponse {
            success: true,
            message: Some("Logged in successfully".into()),
            user: user.into(),
        }),
    ))
}

/// Always succeeds, whether or not a session was present.
#[instrument(skip(state, jar))]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<Value>) {
    let jar = jar.remove(clear_session_cookie(state.config.production));
    (
        jar,
        Json(json!({ "success": true, "message": "Logged out successfully" })),
    )
}

/// Runs behind the authentication gate; a valid token does not guarantee
/// the user record still exists.
#[instrument(skip(state))]
pub async fn check_auth(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let Some(user) = User::find_by_id(&state.db, caller.id).await? else {
        warn!(user_id = %caller.id, "token for deleted user");
        return Err(ApiError::NotFound("User not found"));
    };

    Ok(Json(UserResponse {
        success: true,
        message: None,
        user: user.into(),
    }))
}
