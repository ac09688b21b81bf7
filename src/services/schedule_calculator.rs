//! Cálculo de vencimientos
//!
//! Funciones puras que derivan el próximo km o la próxima fecha de cambio a
//! partir de una línea base y un intervalo. Sin línea base no hay resultado.

use chrono::{DateTime, Duration, Utc};

/// Próximo km de cambio: `last_km + interval_km`
pub fn next_due_km(last_km: Option<i64>, interval_km: i64) -> Option<i64> {
    last_km?.checked_add(interval_km)
}

/// Próxima fecha de cambio: `last_date + interval_days` días
pub fn next_due_date(last_date: Option<DateTime<Utc>>, interval_days: i64) -> Option<DateTime<Utc>> {
    let days = Duration::try_days(interval_days)?;
    last_date?.checked_add_signed(days)
}
