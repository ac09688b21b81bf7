//! Middleware del sistema
//!
//! Autenticación del propietario y configuración de CORS.

pub mod auth;
pub mod cors;

pub use auth::AuthenticatedOwner;
pub use cors::cors_layer;
