//! DTOs de planilla
//!
//! El payload crudo del cliente (`SubmitPlanillaRequest`) se transforma en un
//! comando ya validado (`PlanillaCommand`) antes de tocar la persistencia:
//! se descartan los renglones incompletos, se truncan las denominaciones a
//! enteros y se recalculan los totales y la diferencia con decimales exactos.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::planilla::{Planilla, PlanillaEfectivo, Recorrido};
use crate::utils::errors::{AppError, AppResult};

/// Un renglón de recorrido tal como llega del formulario
#[derive(Debug, Clone, Deserialize)]
pub struct RecorridoInput {
    pub horario: Option<String>,
    pub numero_recorrido: Option<String>,
    pub importe: Option<Decimal>,
}

/// Un renglón de efectivo tal como llega del formulario
#[derive(Debug, Clone, Deserialize)]
pub struct EfectivoInput {
    pub denominacion: Option<Decimal>,
    pub cantidad: Option<Decimal>,
}

/// Request del chofer para enviar la planilla del día
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitPlanillaRequest {
    #[serde(alias = "coche")]
    pub numero_coche: String,

    /// YYYY-MM-DD; si falta, se usa "hoy" en la zona del negocio
    pub fecha: Option<String>,

    #[serde(default)]
    pub recorridos: Vec<RecorridoInput>,

    #[serde(default)]
    pub efectivos: Vec<EfectivoInput>,

    pub comentarios: Option<String>,
}

/// Recorrido validado: horario y número presentes, importe positivo
#[derive(Debug, Clone, PartialEq)]
pub struct RecorridoValidado {
    pub horario: String,
    pub numero_recorrido: String,
    pub importe: Decimal,
}

/// Efectivo validado: denominación y cantidad enteras y positivas
#[derive(Debug, Clone, PartialEq)]
pub struct EfectivoValidado {
    pub denominacion: i64,
    pub cantidad: i64,
    pub subtotal: Decimal,
}

/// Comando ya validado para crear la planilla, con totales recalculados
#[derive(Debug, Clone)]
pub struct PlanillaCommand {
    pub numero_coche: String,
    pub fecha: Option<String>,
    pub recorridos: Vec<RecorridoValidado>,
    pub efectivos: Vec<EfectivoValidado>,
    pub comentarios: Option<String>,
    pub total_recorrido: Decimal,
    pub total_efectivo: Decimal,
    pub diferencia: Decimal,
}

impl SubmitPlanillaRequest {
    /// Validar el payload y producir el comando de creación.
    ///
    /// Los renglones incompletos se filtran (no se rechazan); la planilla
    /// entera se rechaza solo si no queda ningún recorrido válido.
    pub fn into_command(self) -> AppResult<PlanillaCommand> {
        let numero_coche = self.numero_coche.trim().to_string();
        if numero_coche.is_empty() {
            return Err(AppError::BadRequest("Falta numero_coche".to_string()));
        }

        let recorridos: Vec<RecorridoValidado> = self
            .recorridos
            .into_iter()
            .filter_map(|r| {
                let horario = r.horario.map(|h| h.trim().to_string()).filter(|h| !h.is_empty())?;
                let numero = r
                    .numero_recorrido
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty())?;
                let importe = r.importe.filter(|i| *i > Decimal::ZERO)?;
                Some(RecorridoValidado {
                    horario,
                    numero_recorrido: numero,
                    importe,
                })
            })
            .collect();

        if recorridos.is_empty() {
            return Err(AppError::BadRequest(
                "La planilla debe tener al menos un recorrido completo (horario, recorrido e importe)"
                    .to_string(),
            ));
        }

        let efectivos: Vec<EfectivoValidado> = self
            .efectivos
            .into_iter()
            .filter_map(|e| {
                // Las denominaciones llegan a veces con decimales del input; se truncan
                let denominacion = e.denominacion?.trunc().to_i64().filter(|d| *d > 0)?;
                let cantidad = e.cantidad?.trunc().to_i64().filter(|c| *c > 0)?;
                Some(EfectivoValidado {
                    denominacion,
                    cantidad,
                    subtotal: Decimal::from(denominacion) * Decimal::from(cantidad),
                })
            })
            .collect();

        let total_recorrido: Decimal = recorridos.iter().map(|r| r.importe).sum();
        let total_efectivo: Decimal = efectivos.iter().map(|e| e.subtotal).sum();
        let diferencia = total_recorrido - total_efectivo;

        Ok(PlanillaCommand {
            numero_coche,
            fecha: self.fecha.filter(|f| !f.is_empty()),
            recorridos,
            efectivos,
            comentarios: self
                .comentarios
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            total_recorrido,
            total_efectivo,
            diferencia,
        })
    }
}

/// Request administrativa para crear una planilla sin hijos
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlanillaRequest {
    pub chofer_id: i64,

    #[validate(length(min = 1, max = 20))]
    pub numero_coche: String,

    /// YYYY-MM-DD del día de negocio
    pub fecha: String,

    pub total_recorrido: Decimal,
    pub total_efectivo: Decimal,
    pub comentarios: Option<String>,
}

/// Request administrativa para actualizar una planilla existente.
///
/// El status admite cualquier valor del enum sobre cualquier otro; no hay
/// grafo de transiciones.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePlanillaRequest {
    #[validate(length(min = 1, max = 20))]
    pub numero_coche: Option<String>,

    pub status: Option<String>,
    pub comentarios: Option<String>,
}

/// Response resumida tras el envío
#[derive(Debug, Serialize)]
pub struct SubmitPlanillaResponse {
    pub id: i64,
    pub total_recorrido: Decimal,
    pub total_efectivo: Decimal,
    pub diferencia: Decimal,
}

/// Planilla con sus hijos poblados, para el dashboard
#[derive(Debug, Serialize)]
pub struct PlanillaDetalleResponse {
    #[serde(flatten)]
    pub planilla: Planilla,
    pub recorridos: Vec<Recorrido>,
    pub efectivos: Vec<PlanillaEfectivo>,
}

/// Query de GET /planillas/por-chofer-fecha
#[derive(Debug, Deserialize)]
pub struct PorChoferFechaQuery {
    #[serde(rename = "choferId")]
    pub chofer_id: i64,
    pub fecha: String,
}

/// Query de GET /planillas/total-dia
#[derive(Debug, Deserialize)]
pub struct TotalDiaQuery {
    pub fecha: String,
    #[serde(rename = "choferId")]
    pub chofer_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn leg(horario: &str, numero: &str, importe: &str) -> RecorridoInput {
        RecorridoInput {
            horario: Some(horario.to_string()),
            numero_recorrido: Some(numero.to_string()),
            importe: Some(dec(importe)),
        }
    }

    #[test]
    fn test_planilla_cuadra() {
        let request = SubmitPlanillaRequest {
            numero_coche: "42".to_string(),
            fecha: None,
            recorridos: vec![leg("06:30", "0301", "5000"), leg("09:15", "0302", "3000")],
            efectivos: vec![EfectivoInput {
                denominacion: Some(dec("1000")),
                cantidad: Some(dec("8")),
            }],
            comentarios: None,
        };

        let cmd = request.into_command().unwrap();
        assert_eq!(cmd.total_recorrido, dec("8000"));
        assert_eq!(cmd.total_efectivo, dec("8000"));
        assert_eq!(cmd.diferencia, Decimal::ZERO);
    }

    #[test]
    fn test_diferencia_sobra_exacta() {
        // sobra: hay más efectivo que recaudación declarada
        let request = SubmitPlanillaRequest {
            numero_coche: "7".to_string(),
            fecha: None,
            recorridos: vec![leg("06:30", "0301", "15000.00")],
            efectivos: vec![EfectivoInput {
                denominacion: Some(dec("200")),
                cantidad: Some(dec("76")),
            }],
            comentarios: None,
        };

        let cmd = request.into_command().unwrap();
        assert_eq!(cmd.total_recorrido, dec("15000.00"));
        assert_eq!(cmd.total_efectivo, dec("15200"));
        assert_eq!(cmd.diferencia, dec("-200.00"));
    }

    #[test]
    fn test_renglones_incompletos_se_filtran() {
        let request = SubmitPlanillaRequest {
            numero_coche: "42".to_string(),
            fecha: None,
            recorridos: vec![
                leg("06:30", "0301", "5000"),
                RecorridoInput {
                    horario: None,
                    numero_recorrido: Some("0302".to_string()),
                    importe: Some(dec("3000")),
                },
                leg("10:00", "0303", "0"),
                RecorridoInput {
                    horario: Some("  ".to_string()),
                    numero_recorrido: Some("0304".to_string()),
                    importe: Some(dec("100")),
                },
            ],
            efectivos: vec![],
            comentarios: None,
        };

        let cmd = request.into_command().unwrap();
        assert_eq!(cmd.recorridos.len(), 1);
        assert_eq!(cmd.total_recorrido, dec("5000"));
    }

    #[test]
    fn test_sin_recorridos_validos_se_rechaza() {
        let request = SubmitPlanillaRequest {
            numero_coche: "42".to_string(),
            fecha: None,
            recorridos: vec![leg("06:30", "0301", "-10"), leg("07:00", "0302", "0")],
            efectivos: vec![],
            comentarios: None,
        };
        assert!(matches!(
            request.into_command(),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_falta_numero_coche() {
        let request = SubmitPlanillaRequest {
            numero_coche: "   ".to_string(),
            fecha: None,
            recorridos: vec![leg("06:30", "0301", "100")],
            efectivos: vec![],
            comentarios: None,
        };
        assert!(request.into_command().is_err());
    }

    #[test]
    fn test_efectivo_trunca_decimales() {
        let request = SubmitPlanillaRequest {
            numero_coche: "42".to_string(),
            fecha: None,
            recorridos: vec![leg("06:30", "0301", "100")],
            efectivos: vec![
                EfectivoInput {
                    denominacion: Some(dec("1000.9")),
                    cantidad: Some(dec("2.7")),
                },
                EfectivoInput {
                    denominacion: Some(dec("0")),
                    cantidad: Some(dec("5")),
                },
            ],
            comentarios: None,
        };

        let cmd = request.into_command().unwrap();
        assert_eq!(cmd.efectivos.len(), 1);
        assert_eq!(cmd.efectivos[0].denominacion, 1000);
        assert_eq!(cmd.efectivos[0].cantidad, 2);
        assert_eq!(cmd.efectivos[0].subtotal, dec("2000"));
    }
}
