use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::auth::repo::Role;
use crate::state::AppState;

/// Session tokens live for 7 days; the cookie max-age mirrors this.
pub const SESSION_TTL: Duration = Duration::days(7);

/// JWT payload: user identity plus the role granted at issuance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
}

/// Holds JWT signing and verification keys derived from the process-wide
/// secret. A token is either fully trusted or rejected; there is no
/// partially-valid state.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::new(&state.config.jwt.secret)
    }
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    fn sign_with_timestamps(
        &self,
        user_id: Uuid,
        role: Role,
        iat: OffsetDateTime,
        exp: OffsetDateTime,
    ) -> anyhow::Result<String> {
        let claims = Claims {
            sub: user_id,
            role,
            iat: iat.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, role = ?role, "jwt signed");
        Ok(token)
    }

    /// Issue a token for the user, expiring 7 days from now.
    pub fn sign(&self, user_id: Uuid, role: Role) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        self.sign_with_timestamps(user_id, role, now, now + SESSION_TTL)
    }

    /// Verify signature and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        debug!(user_id = %data.claims.sub, role = ?data.claims.role, "jwt verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys() -> JwtKeys {
        let state = AppState::fake();
        JwtKeys::from_ref(&state)
    }

    #[tokio::test]
    async fn sign_and_verify_roundtrip() {
        let keys = make_keys();
        let user_id = Uuid::new_v4();
        let token = keys.sign(user_id, Role::User).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::User);
    }

    #[tokio::test]
    async fn admin_role_survives_roundtrip() {
        let keys = make_keys();
        let token = keys.sign(Uuid::new_v4(), Role::Admin).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let token = JwtKeys::new("secret-a")
            .sign(Uuid::new_v4(), Role::User)
            .expect("sign");
        assert!(JwtKeys::new("secret-b").verify(&token).is_err());
    }

    #[tokio::test]
    async fn verify_rejects_garbage() {
        let keys = make_keys();
        assert!(keys.verify("not-a-jwt").is_err());
    }

    #[tokio::test]
    async fn token_valid_six_days_after_issue() {
        let keys = make_keys();
        // Issued 6 days ago, so one day of the 7-day window remains.
        let iat = OffsetDateTime::now_utc() - Duration::days(6);
        let token = keys
            .sign_with_timestamps(Uuid::new_v4(), Role::User, iat, iat + SESSION_TTL)
            .expect("sign");
        assert!(keys.verify(&token).is_ok());
    }

    #[tokio::test]
    async fn token_expired_eight_days_after_issue() {
        let keys = make_keys();
        let iat = OffsetDateTime::now_utc() - Duration::days(8);
        let token = keys
            .sign_with_timestamps(Uuid::new_v4(), Role::User, iat, iat + SESSION_TTL)
            .expect("sign");
        assert!(keys.verify(&token).is_err());
    }
}
