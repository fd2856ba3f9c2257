use crate::{app_state::SharedState, board_error::BoardError, owner::Owner, settings::Settings};
use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub expiration_in_minutes: i64,
}

impl From<&Settings> for JwtSettings {
    fn from(settings: &Settings) -> Self {
        Self {
            secret: settings.jwt_secret.clone(),
            expiration_in_minutes: settings.jwt_expiration_in_minutes,
        }
    }
}

/// Mint a bearer token for `owner`. Issuance lives outside the board API;
/// this is for tooling and tests.
pub fn create_token(jwt: &JwtSettings, owner: &Owner) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let expiry = now + Duration::minutes(jwt.expiration_in_minutes);

    let claims = Claims {
        sub: owner.id,
        username: owner.username.clone(),
        exp: expiry.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt.secret.as_bytes()),
    )
}

pub fn verify_token(jwt: &JwtSettings, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// Resolve the bearer token into an [`Owner`] request extension.
pub async fn auth_middleware(
    State(state): State<SharedState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, BoardError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| BoardError::Unauthorized("Missing or invalid token".to_string()))?;

    let claims = verify_token(&state.jwt, token)
        .map_err(|_| BoardError::Unauthorized("Invalid token".to_string()))?;

    request.extensions_mut().insert(Owner {
        id: claims.sub,
        username: claims.username,
    });
    Ok(next.run(request).await)
}
