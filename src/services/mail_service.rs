//! Notificación por email al enviar una planilla
//!
//! El mailer es un recurso de proceso: se construye una sola vez al arranque
//! con su configuración ya validada y se inyecta vía `AppState`. El envío es
//! best-effort y siempre fuera del camino request/response: un fallo se
//! loguea y jamás afecta el resultado de la planilla. Sin reintentos.

use anyhow::{anyhow, Result};
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::{info, warn};

use crate::config::environment::MailConfig;

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// Payload estructurado de la notificación de planilla enviada
#[derive(Debug, Clone)]
pub struct PlanillaEmailPayload {
    pub planilla_id: i64,
    pub fecha_iso: String,
    pub numero_coche: String,
    pub chofer_label: String,
    pub total_recorrido: Decimal,
    pub total_efectivo: Decimal,
    pub diferencia: Decimal,
    pub comentarios: Option<String>,
}

/// Estado de la diferencia para el asunto del email
fn estado_diferencia(diferencia: Decimal) -> &'static str {
    if diferencia == Decimal::ZERO {
        "CUADRA"
    } else if diferencia > Decimal::ZERO {
        // diferencia = total_recorrido - total_efectivo
        "FALTAN"
    } else {
        "SOBRA"
    }
}

fn format_money(value: Decimal) -> String {
    format!("${}", value.round_dp(2))
}

pub struct Mailer {
    http: Client,
    config: MailConfig,
}

impl Mailer {
    pub fn new(config: MailConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// El mailer está listo para enviar (habilitado y con destino,
    /// remitente y API key configurados)
    pub fn is_configured(&self) -> bool {
        self.config.enabled
            && self.config.to.is_some()
            && self.config.from.is_some()
            && self.config.sendgrid_api_key.is_some()
    }

    fn build_subject(payload: &PlanillaEmailPayload) -> String {
        format!(
            "Nueva planilla enviada - {} - {} ({})",
            payload.chofer_label,
            payload.fecha_iso,
            estado_diferencia(payload.diferencia)
        )
    }

    fn build_text(payload: &PlanillaEmailPayload) -> String {
        let mut lines = vec![
            "Se cargó una nueva planilla.".to_string(),
            String::new(),
            format!("Planilla ID: {}", payload.planilla_id),
            format!("Fecha: {}", payload.fecha_iso),
            format!("Chofer: {}", payload.chofer_label),
            format!("Coche: {}", payload.numero_coche),
            String::new(),
            format!("Total recorridos: {}", format_money(payload.total_recorrido)),
            format!("Total efectivo:  {}", format_money(payload.total_efectivo)),
            format!(
                "Diferencia:     {} ({})",
                format_money(payload.diferencia),
                estado_diferencia(payload.diferencia)
            ),
        ];
        if let Some(comentarios) = &payload.comentarios {
            lines.push(String::new());
            lines.push(format!("Comentarios: {}", comentarios));
        }
        lines.join("\n")
    }

    /// Enviar la notificación. Deshabilitado o sin configurar es un no-op.
    pub async fn send_planilla_submitted(&self, payload: &PlanillaEmailPayload) -> Result<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let (Some(to), Some(from), Some(api_key)) = (
            self.config.to.as_deref(),
            self.config.from.as_deref(),
            self.config.sendgrid_api_key.as_deref(),
        ) else {
            warn!("Mailer sin configurar (MAIL_TO/MAIL_FROM/SENDGRID_API_KEY); no se envía email");
            return Ok(());
        };

        let body = json!({
            "personalizations": [{ "to": [{ "email": to }] }],
            "from": { "email": from },
            "subject": Self::build_subject(payload),
            "content": [{
                "type": "text/plain",
                "value": Self::build_text(payload),
            }],
        });

        let response = self
            .http
            .post(SENDGRID_SEND_URL)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("SendGrid respondió {}", response.status()));
        }

        info!(
            "Email enviado a {} por planilla {}",
            to, payload.planilla_id
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn payload(diferencia: &str) -> PlanillaEmailPayload {
        PlanillaEmailPayload {
            planilla_id: 12,
            fecha_iso: "2025-12-24".to_string(),
            numero_coche: "42".to_string(),
            chofer_label: "Juan Pérez".to_string(),
            total_recorrido: dec("15000.00"),
            total_efectivo: dec("15200.00"),
            diferencia: dec(diferencia),
            comentarios: None,
        }
    }

    #[test]
    fn test_estado_diferencia() {
        assert_eq!(estado_diferencia(Decimal::ZERO), "CUADRA");
        assert_eq!(estado_diferencia(dec("100")), "FALTAN");
        assert_eq!(estado_diferencia(dec("-200.00")), "SOBRA");
    }

    #[test]
    fn test_subject_incluye_estado() {
        let subject = Mailer::build_subject(&payload("-200.00"));
        assert_eq!(
            subject,
            "Nueva planilla enviada - Juan Pérez - 2025-12-24 (SOBRA)"
        );
    }

    #[test]
    fn test_text_con_comentarios() {
        let mut p = payload("0");
        p.comentarios = Some("faltó el vuelto de la mañana".to_string());
        let text = Mailer::build_text(&p);
        assert!(text.contains("Planilla ID: 12"));
        assert!(text.contains("Comentarios: faltó el vuelto"));
    }

    #[test]
    fn test_mailer_sin_configurar_no_envia() {
        let mailer = Mailer::new(MailConfig {
            enabled: true,
            to: None,
            from: None,
            sendgrid_api_key: None,
        });
        assert!(!mailer.is_configured());
    }
}
