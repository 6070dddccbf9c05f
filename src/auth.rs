//! Bearer principal (HS256 JWT) and password hashing.

use crate::error::AppError;
use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access-token lifetime for tokens issued by [`issue_token`].
pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    #[serde(rename = "nickName")]
    pub nick_name: String,
    pub iat: usize,
    pub exp: usize,
}

/// The authenticated caller, as carried in the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: Uuid,
    pub nick_name: String,
}

pub fn issue_token(secret: &str, principal: &Principal) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: principal.id,
        nick_name: principal.nick_name.clone(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::minutes(ACCESS_TOKEN_TTL_MINUTES)).timestamp() as usize,
    };
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))?;
    Ok(token)
}

pub fn decode_principal(secret: &str, token: &str) -> Result<Principal, AppError> {
    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &Validation::default())
        .map_err(|e| {
            tracing::warn!(error = %e, "rejected bearer token");
            AppError::Unauthorized
        })?;
    Ok(Principal {
        id: data.claims.sub,
        nick_name: data.claims.nick_name,
    })
}

/// Argon2id hash in PHC string form.
pub fn hash_password(pwd: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(pwd.as_bytes(), &salt)
        .map_err(|e| AppError::Password(e.to_string()))?;
    Ok(hash.to_string())
}

/// Login is handled outside this service; only tests check stored hashes.
#[cfg(test)]
pub(crate) fn verify_password(pwd: &str, hash: &str) -> bool {
    use argon2::{PasswordHash, PasswordVerifier};
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default().verify_password(pwd.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_principal() {
        let p = Principal {
            id: Uuid::new_v4(),
            nick_name: "reader".into(),
        };
        let token = issue_token("s3cret", &p).unwrap();
        assert_eq!(decode_principal("s3cret", &token).unwrap(), p);
    }

    #[test]
    fn wrong_secret_is_unauthorized() {
        let p = Principal {
            id: Uuid::new_v4(),
            nick_name: "reader".into(),
        };
        let token = issue_token("s3cret", &p).unwrap();
        assert!(matches!(decode_principal("other", &token), Err(AppError::Unauthorized)));
        assert!(matches!(decode_principal("s3cret", "not-a-jwt"), Err(AppError::Unauthorized)));
    }

    #[test]
    fn password_hash_verifies() {
        let hash = hash_password("correct horse").unwrap();
        assert_ne!(hash, "correct horse");
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("correct horse", "not-a-hash"));
    }
}
