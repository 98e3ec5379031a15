use serde::{Deserialize, Serialize};

use crate::model::ActivityId;

/// Body for `POST /api/v1/registrarResultado`. Field names are the backend's
/// wire contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResultRequest {
    pub id_usuario: i64,
    pub id_actividad: ActivityId,
    pub puntuacion: u32,
    pub tiempo_total: u64,
    pub fecha_realizacion: String,
}

/// Body for `POST /api/v1/actualizarPuntos`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointsUpdateRequest {
    pub id: i64,
    pub puntos: u32,
}

/// Row of `GET /api/v1/listarActividades`; feeds the game-launch menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityInfo {
    pub id: ActivityId,
    pub nombre: String,
    pub descripcion: String,
    pub tipo: String,
    pub fecha_creacion: String,
    pub ruta: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_result_uses_backend_field_names() {
        let body = RoundResultRequest {
            id_usuario: 12,
            id_actividad: 3,
            puntuacion: 132,
            tiempo_total: 48,
            fecha_realizacion: "2024-05-01T10:00:00.000Z".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["idUsuario"], 12);
        assert_eq!(json["idActividad"], 3);
        assert_eq!(json["puntuacion"], 132);
        assert_eq!(json["tiempoTotal"], 48);
        assert_eq!(json["fechaRealizacion"], "2024-05-01T10:00:00.000Z");
    }

    #[test]
    fn activity_rows_deserialize() {
        let json = r#"[{
            "id": 1,
            "nombre": "Juego de Pares",
            "descripcion": "Encuentra las parejas",
            "tipo": "memoria",
            "fecha_creacion": "2024-01-10",
            "ruta": "/games/pares"
        }]"#;
        let rows: Vec<ActivityInfo> = serde_json::from_str(json).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ruta, "/games/pares");
    }
}
