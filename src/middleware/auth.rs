//! Autenticación JWT
//!
//! La emisión de tokens es responsabilidad de otro servicio. Aquí solo se
//! verifica el `Bearer` y se extrae el propietario (`sub`) para pasarlo
//! explícitamente a cada operación del núcleo.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::errors::AppError;

/// Claims del JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // owner_id
    pub exp: usize,
    pub iat: usize,
}

/// Propietario autenticado de la request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedOwner {
    pub owner_id: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedOwner {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|auth_str| auth_str.to_str().ok())
            .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

        let owner_id = verify_token(token, &state.config.jwt_secret)?;
        Ok(AuthenticatedOwner { owner_id })
    }
}

/// Validar el token y devolver el owner_id del claim `sub`
pub fn verify_token(token: &str, secret: &str) -> Result<Uuid, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Token inválido".to_string()))?;

    Uuid::parse_str(&token_data.claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de propietario inválido".to_string()))
}
