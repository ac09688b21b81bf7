//! Utilidades de validación
//!
//! Validadores personalizados usados por los DTOs con `#[validate(custom = ...)]`.

use rust_decimal::Decimal;
use validator::ValidationError;

/// Validar que un string no esté vacío (ni sea solo espacios)
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Decimales admitidos en importes (columnas `NUMERIC(12, 2)`)
pub const MONEY_SCALE: u32 = 2;

/// Parte entera máxima de un importe: 10 dígitos
const MONEY_LIMIT: i64 = 10_000_000_000;

/// Validar un importe: no negativo, como mucho 2 decimales y menor a 10^10
pub fn validate_money(value: &Decimal) -> Result<(), ValidationError> {
    let code = if value.is_sign_negative() && !value.is_zero() {
        "non_negative"
    } else if value.normalize().scale() > MONEY_SCALE {
        "money_scale"
    } else if value.abs() >= Decimal::new(MONEY_LIMIT, 0) {
        "money_range"
    } else {
        return Ok(());
    };

    let mut error = ValidationError::new(code);
    error.add_param("actual".into(), &value.to_string());
    Err(error)
}
