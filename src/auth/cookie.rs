use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::auth::jwt::SESSION_TTL;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

/// Build the session cookie. HTTP-only and SameSite=Strict always; `Secure`
/// only in a production deployment.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_secure(secure);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_path("/");
    cookie.set_max_age(SESSION_TTL);
    cookie
}

/// Cookie used when logging out. Browsers only drop a cookie when the
/// clearing instruction carries the same attributes it was set with.
pub fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = session_cookie(String::new(), secure);
    cookie.set_max_age(time::Duration::ZERO);
    cookie
}
