//! Bearer-token authentication.
//!
//! Tokens are HS256 JWTs carrying the user id, display name, and role name.
//! Issuance lives in a separate service; this layer only verifies and turns
//! valid claims into a [`Requester`].

use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use ventra_core::identity::{Requester, Role};

use crate::error::ErrorBody;
use crate::state::AppState;

/// Token verification settings.
#[derive(Clone)]
pub struct AuthConfig {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthConfig {
    /// Builds verification settings for an HS256 shared secret.
    #[must_use]
    pub fn from_secret(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: Uuid,
    /// Display name.
    pub name: String,
    /// Role name, resolved against [`Role`].
    pub role: String,
    /// Expiry as a Unix timestamp.
    pub exp: usize,
}

/// Extractor that authenticates the request and yields the requester.
#[derive(Debug)]
pub struct AuthUser(pub Requester);

/// Rejection for missing or invalid credentials. Always a 401; the message
/// says what was wrong without echoing the token.
#[derive(Debug)]
pub struct AuthRejection(String);

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: "unauthorized",
            message: self.0,
        };
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AuthRejection("missing authorization header".to_owned()))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| AuthRejection("authorization header must be a bearer token".to_owned()))?;

        let data = decode::<Claims>(token, &state.auth.decoding_key, &state.auth.validation)
            .map_err(|err| AuthRejection(format!("invalid or expired token: {err}")))?;

        let role: Role = data
            .claims
            .role
            .parse()
            .map_err(|err| AuthRejection(format!("{err}")))?;

        Ok(Self(Requester {
            user_id: data.claims.sub,
            name: data.claims.name,
            role,
        }))
    }
}
