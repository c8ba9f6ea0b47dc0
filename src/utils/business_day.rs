//! Cálculo del día de negocio
//!
//! Este módulo resuelve el rango de instantes UTC `[start, end)` que
//! corresponde a un día calendario en la zona horaria del negocio, y el
//! camino inverso (instante -> fecha local). Todos los endpoints que agregan
//! o buscan planillas por fecha usan este rango half-open en vez de
//! convertir zona horaria fila por fila.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::errors::{AppError, AppResult};

lazy_static! {
    static ref FECHA_ISO_RE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

/// Rango half-open `[start, end)` de un día de negocio, en UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Offset de la zona (en segundos) en un instante UTC dado
fn zone_offset_seconds(naive_utc: NaiveDateTime, tz: Tz) -> i64 {
    tz.offset_from_utc_datetime(&naive_utc).fix().local_minus_utc() as i64
}

/// Resolver una fecha/hora local de la zona a su instante UTC.
///
/// Corrección de offset en dos pasos (punto fijo):
/// 1. Tomar la fecha/hora local como si ya fuera UTC (`naive`).
/// 2. Calcular el offset de la zona en `naive` -> `offset1`.
/// 3. `guess2 = naive - offset1`; offset de la zona en `guess2` -> `offset2`.
/// 4. Resultado: `naive - offset2`.
///
/// Dentro de una ventana de transición DST el offset puede cambiar entre los
/// dos pasos; en ese caso el resultado es el instante post-corrección
/// (limitación conocida, aceptada).
fn resolve_local_datetime_utc(local: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    let naive = Utc.from_utc_datetime(&local);
    let offset1 = zone_offset_seconds(naive.naive_utc(), tz);
    let guess2 = naive - Duration::seconds(offset1);
    let offset2 = zone_offset_seconds(guess2.naive_utc(), tz);
    naive - Duration::seconds(offset2)
}

/// Instante UTC de las 00:00:00 locales de la zona para esa fecha calendario.
///
/// `None` si la fecha no es válida (mes fuera de 1..=12, día inexistente).
pub fn resolve_local_midnight_utc(year: i32, month: u32, day: u32, tz: Tz) -> Option<DateTime<Utc>> {
    let local = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
    Some(resolve_local_datetime_utc(local, tz))
}

/// Parsear una fecha estricta `YYYY-MM-DD` (día del negocio, no el del server)
pub fn parse_fecha_iso(fecha: &str) -> AppResult<NaiveDate> {
    if !FECHA_ISO_RE.is_match(fecha) {
        return Err(AppError::BadRequest(
            "Formato de fecha inválido. Use YYYY-MM-DD".to_string(),
        ));
    }
    NaiveDate::parse_from_str(fecha, "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest("Formato de fecha inválido. Use YYYY-MM-DD".to_string())
    })
}

/// Rango UTC `[start, end)` del día de negocio `fecha` (YYYY-MM-DD) en la zona.
///
/// `end` es la medianoche local del día calendario siguiente, así el rango
/// cubre días de 23/24/25 horas en transiciones DST sin huecos ni solapes.
pub fn day_range(fecha: &str, tz: Tz) -> AppResult<DayRange> {
    let date = parse_fecha_iso(fecha)?;
    let next = date.succ_opt().ok_or_else(|| {
        AppError::BadRequest("Fecha fuera de rango soportado".to_string())
    })?;

    let start = resolve_local_datetime_utc(
        date.and_hms_opt(0, 0, 0)
            .ok_or_else(|| AppError::Internal("Fecha local inválida".to_string()))?,
        tz,
    );
    let end = resolve_local_datetime_utc(
        next.and_hms_opt(0, 0, 0)
            .ok_or_else(|| AppError::Internal("Fecha local inválida".to_string()))?,
        tz,
    );

    Ok(DayRange { start, end })
}

/// Formatear un instante como fecha calendario `YYYY-MM-DD` en la zona
pub fn format_local_date(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%Y-%m-%d").to_string()
}

/// Instante a guardar para una planilla con fecha `fecha`.
///
/// - Si `fecha` es "hoy" en la zona, se guarda el instante actual (preserva
///   el orden de carga dentro del día).
/// - Si es una fecha manual (retroactiva o futura), se fija al mediodía local
///   de esa fecha: el mediodía nunca cae dentro de una transición DST.
pub fn submission_instant(fecha: &str, now: DateTime<Utc>, tz: Tz) -> AppResult<DateTime<Utc>> {
    let date = parse_fecha_iso(fecha)?;
    if fecha == format_local_date(now, tz) {
        return Ok(now);
    }
    let midday = date
        .and_hms_opt(12, 0, 0)
        .ok_or_else(|| AppError::Internal("Fecha local inválida".to_string()))?;
    Ok(resolve_local_datetime_utc(midday, tz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Tz;

    fn bsas() -> Tz {
        "America/Argentina/Buenos_Aires".parse().unwrap()
    }

    #[test]
    fn test_day_range_buenos_aires() {
        // UTC-3 fijo, sin DST
        let range = day_range("2025-12-24", bsas()).unwrap();
        assert_eq!(range.start.to_rfc3339(), "2025-12-24T03:00:00+00:00");
        assert_eq!(range.end.to_rfc3339(), "2025-12-25T03:00:00+00:00");
    }

    #[test]
    fn test_day_range_contiguity() {
        let tz = bsas();
        for (dia, siguiente) in [
            ("2025-12-24", "2025-12-25"),
            ("2025-12-31", "2026-01-01"),
            ("2025-02-28", "2025-03-01"),
            ("2024-02-28", "2024-02-29"),
        ] {
            let a = day_range(dia, tz).unwrap();
            let b = day_range(siguiente, tz).unwrap();
            assert_eq!(a.end, b.start, "hueco entre {} y {}", dia, siguiente);
        }
    }

    #[test]
    fn test_day_range_dst_short_day() {
        // Nueva York, 2025-03-09: salto de 02:00 a 03:00, día de 23 horas
        let tz: Tz = "America/New_York".parse().unwrap();
        let range = day_range("2025-03-09", tz).unwrap();
        assert_eq!(range.start.to_rfc3339(), "2025-03-09T05:00:00+00:00");
        assert_eq!(range.end.to_rfc3339(), "2025-03-10T04:00:00+00:00");
        assert_eq!((range.end - range.start).num_hours(), 23);

        let siguiente = day_range("2025-03-10", tz).unwrap();
        assert_eq!(range.end, siguiente.start);
    }

    #[test]
    fn test_resolve_midnight_invalid_date() {
        let tz = bsas();
        assert!(resolve_local_midnight_utc(2025, 13, 1, tz).is_none());
        assert!(resolve_local_midnight_utc(2025, 2, 30, tz).is_none());
        assert!(resolve_local_midnight_utc(2025, 0, 10, tz).is_none());
    }

    #[test]
    fn test_format_roundtrip() {
        for tz_name in ["America/Argentina/Buenos_Aires", "UTC", "Asia/Tokyo"] {
            let tz: Tz = tz_name.parse().unwrap();
            for fecha in ["2025-01-01", "2025-06-15", "2025-12-31", "2024-02-29"] {
                let date = parse_fecha_iso(fecha).unwrap();
                let midnight = resolve_local_midnight_utc(
                    chrono::Datelike::year(&date),
                    chrono::Datelike::month(&date),
                    chrono::Datelike::day(&date),
                    tz,
                )
                .unwrap();
                assert_eq!(format_local_date(midnight, tz), fecha, "zona {}", tz_name);
            }
        }
    }

    #[test]
    fn test_parse_fecha_iso_rejects_malformed() {
        for invalida in ["2025/12/24", "2025-1-1", "24-12-2025", "", "hoy", "2025-13-01", "2025-02-30"] {
            assert!(parse_fecha_iso(invalida).is_err(), "aceptó {:?}", invalida);
        }
    }

    #[test]
    fn test_submission_instant_today_keeps_now() {
        let tz = bsas();
        let now = Utc::now();
        let hoy = format_local_date(now, tz);
        assert_eq!(submission_instant(&hoy, now, tz).unwrap(), now);
    }

    #[test]
    fn test_submission_instant_backdated_pins_midday() {
        let tz = bsas();
        // "ahora" bien lejos de la fecha manual
        let now = "2026-01-15T18:30:00Z".parse::<DateTime<Utc>>().unwrap();
        let instant = submission_instant("2025-12-24", now, tz).unwrap();
        // mediodía local de Buenos Aires = 15:00 UTC
        assert_eq!(instant.to_rfc3339(), "2025-12-24T15:00:00+00:00");

        let range = day_range("2025-12-24", tz).unwrap();
        assert!(instant >= range.start && instant < range.end);
    }
}
