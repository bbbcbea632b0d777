//! Bearer-token authentication.
//!
//! Tokens are HS256 JWTs carrying the user id in the `sub` claim. When no
//! secret is configured the server runs in dev mode and the bearer value is
//! taken verbatim as the user id.

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

/// Explicit per-request auth context passed down to the access layer.
///
/// Replaces the process-wide client cache the original design kept keyed by
/// token; every call receives the credential it runs under.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user_id: Option<String>,
    token: Option<String>,
}

impl Session {
    pub fn signed_in(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            token: Some(token.into()),
        }
    }

    /// A session with no authenticated identity.
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Fail fast unless the session has both an identity and a credential.
    pub fn require(&self) -> Result<&str, AppError> {
        let user_id = self
            .user_id
            .as_deref()
            .ok_or_else(|| AppError::Unauthenticated("No signed-in user".to_string()))?;

        match self.token.as_deref() {
            Some(token) if !token.is_empty() => Ok(user_id),
            _ => Err(AppError::TokenUnavailable(
                "No access token for session".to_string(),
            )),
        }
    }
}

/// Verify an access token and return the user id it was issued for.
pub fn verify_token(token: &str, secret: &str) -> Result<String, AppError> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| AppError::TokenUnavailable(format!("Invalid bearer token: {}", e)))?;

    Ok(data.claims.sub)
}

/// Bearer auth layer. Resolves the request to a [`Session`] stored in
/// request extensions, or rejects with the normalized error envelope.
pub async fn bearer_auth_layer(
    jwt_secret: Option<String>,
    mut request: Request,
    next: Next,
) -> Response {
    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string());

    let Some(token) = bearer else {
        return AppError::Unauthenticated("Missing bearer token".to_string()).into_response();
    };

    let user_id = match &jwt_secret {
        Some(secret) => match verify_token(&token, secret) {
            Ok(user_id) => user_id,
            Err(e) => return e.into_response(),
        },
        // Dev mode: no secret configured, bearer value is the user id
        None => token.clone(),
    };

    request.extensions_mut().insert(Session::signed_in(user_id, token));
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn make_token(sub: &str, exp: i64, secret: &str) -> String {
        encode(
            &Header::default(),
            &Claims {
                sub: sub.to_string(),
                exp,
            },
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_verify_token_valid() {
        let exp = chrono::Utc::now().timestamp() + 3600;
        let token = make_token("u1", exp, "secret");
        assert_eq!(verify_token(&token, "secret").unwrap(), "u1");
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let exp = chrono::Utc::now().timestamp() + 3600;
        let token = make_token("u1", exp, "secret");
        assert!(matches!(
            verify_token(&token, "other"),
            Err(AppError::TokenUnavailable(_))
        ));
    }

    #[test]
    fn test_verify_token_expired() {
        // Well past the default validation leeway
        let exp = chrono::Utc::now().timestamp() - 3600;
        let token = make_token("u1", exp, "secret");
        assert!(matches!(
            verify_token(&token, "secret"),
            Err(AppError::TokenUnavailable(_))
        ));
    }

    #[test]
    fn test_session_require() {
        let session = Session::signed_in("u1", "token");
        assert_eq!(session.require().unwrap(), "u1");

        let signed_out = Session::signed_out();
        assert!(matches!(
            signed_out.require(),
            Err(AppError::Unauthenticated(_))
        ));

        let no_token = Session {
            user_id: Some("u1".to_string()),
            token: None,
        };
        assert!(matches!(
            no_token.require(),
            Err(AppError::TokenUnavailable(_))
        ));
    }
}
