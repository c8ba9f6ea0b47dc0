//! Modelos de Planilla
//!
//! La planilla es el reporte diario de un chofer: recaudación por recorrido
//! más el arqueo físico de efectivo. Los hijos (recorridos y efectivo) son
//! propiedad de su planilla y se borran junto con ella.
//!
//! Invariante: `diferencia == total_recorrido - total_efectivo`, siempre
//! recalculada, nunca aceptada del cliente.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Estado de la planilla - guardado como texto en la columna `status`.
///
/// Se crea siempre en `enviado`. Las transiciones administrativas no están
/// restringidas: cualquier estado puede pisar cualquier otro.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlanillaStatus {
    Enviado,
    Revisado,
    Rechazado,
}

impl PlanillaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanillaStatus::Enviado => "enviado",
            PlanillaStatus::Revisado => "revisado",
            PlanillaStatus::Rechazado => "rechazado",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "enviado" => Some(PlanillaStatus::Enviado),
            "revisado" => Some(PlanillaStatus::Revisado),
            "rechazado" => Some(PlanillaStatus::Rechazado),
            _ => None,
        }
    }
}

/// Planilla principal - mapea a la tabla `planilla`
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Planilla {
    pub id: i64,
    pub chofer_id: i64,
    pub numero_coche: String,
    /// Instante UTC asignado para el bucketing por día de negocio
    pub fecha_hora_planilla: DateTime<Utc>,
    pub total_recorrido: Decimal,
    pub total_efectivo: Decimal,
    pub diferencia: Decimal,
    pub comentarios: Option<String>,
    pub status: String,
}

/// Recorrido - un tramo de viaje con el importe recaudado
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Recorrido {
    pub id: i64,
    pub planilla_id: i64,
    pub horario: Option<String>,
    pub numero_recorrido: Option<String>,
    pub importe: Decimal,
}

/// Efectivo - conteo de billetes de una denominación
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PlanillaEfectivo {
    pub id: i64,
    pub planilla_id: i64,
    pub denominacion: i64,
    pub cantidad: i64,
    /// denominacion * cantidad
    pub subtotal: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planilla_status_parse() {
        assert_eq!(PlanillaStatus::parse("enviado"), Some(PlanillaStatus::Enviado));
        assert_eq!(PlanillaStatus::parse("revisado"), Some(PlanillaStatus::Revisado));
        assert_eq!(PlanillaStatus::parse("rechazado"), Some(PlanillaStatus::Rechazado));
        assert_eq!(PlanillaStatus::parse("aprobado"), None);
    }
}
