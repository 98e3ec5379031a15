use gloo_net::http::Request;

use super::{ActivityInfo, ApiError, PointsUpdateRequest, RoundResultRequest};
use crate::config::Config;
use crate::model::{CompletionRecord, Session};

/// Thin client for the scoring backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_url.clone())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// `POST /registrarResultado` — persist one round outcome. The wall-clock
    /// date is stamped here, at submission time.
    pub async fn registrar_resultado(
        &self,
        session: &Session,
        record: &CompletionRecord,
    ) -> Result<(), ApiError> {
        let body = RoundResultRequest {
            id_usuario: session.user_id,
            id_actividad: record.activity_id,
            puntuacion: record.score,
            tiempo_total: record.elapsed_seconds,
            fecha_realizacion: String::from(js_sys::Date::new_0().to_iso_string()),
        };
        let response = Request::post(&self.endpoint("registrarResultado"))
            .json(&body)?
            .send()
            .await?;
        if !response.ok() {
            return Err(ApiError::Status {
                endpoint: "registrarResultado",
                status: response.status(),
            });
        }
        Ok(())
    }

    /// `POST /actualizarPuntos` — fold points into the user's cumulative
    /// score. The backend answers with a plain-text acknowledgement.
    pub async fn actualizar_puntos(
        &self,
        session: &Session,
        puntos: u32,
    ) -> Result<String, ApiError> {
        let body = PointsUpdateRequest {
            id: session.user_id,
            puntos,
        };
        let response = Request::post(&self.endpoint("actualizarPuntos"))
            .json(&body)?
            .send()
            .await?;
        if !response.ok() {
            return Err(ApiError::Status {
                endpoint: "actualizarPuntos",
                status: response.status(),
            });
        }
        Ok(response.text().await?)
    }

    /// `GET /listarActividades` — the launchable activity catalog.
    pub async fn listar_actividades(
        &self,
        session: &Session,
    ) -> Result<Vec<ActivityInfo>, ApiError> {
        let response = Request::get(&self.endpoint("listarActividades"))
            .header("Authorization", &format!("Bearer {}", session.token))
            .send()
            .await?;
        if !response.ok() {
            return Err(ApiError::Status {
                endpoint: "listarActividades",
                status: response.status(),
            });
        }
        Ok(response.json().await?)
    }

    /// The round-completion contract: record the result, then update the
    /// cumulative score.
    pub async fn submit_round(
        &self,
        session: &Session,
        record: &CompletionRecord,
    ) -> Result<(), ApiError> {
        self.registrar_resultado(session, record).await?;
        self.actualizar_puntos(session, record.score).await?;
        Ok(())
    }
}
