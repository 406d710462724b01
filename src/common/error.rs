// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveTime;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Parâmetro rejeitado antes de qualquer computação (período inválido,
    // número de parcelas não positivo, datas malformadas).
    #[error("Parâmetro inválido: {0}")]
    InvalidArgument(String),

    // Erro específico e endereçável pelo usuário: o horário proposto colide
    // com um atendimento existente do mesmo colaborador.
    #[error("Conflito de horário: colaborador já possui atendimento entre {start_time} e {end_time}")]
    SchedulingConflict {
        collaborator_id: Uuid,
        start_time: NaiveTime,
        end_time: NaiveTime,
    },

    #[error("{0} não encontrado")]
    NotFound(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::InvalidArgument(ref msg) => {
                let body = Json(json!({ "error": msg }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            // O conflito de agenda carrega o colaborador e o intervalo que
            // colidiu, para a UI montar a mensagem "horário já ocupado".
            AppError::SchedulingConflict {
                collaborator_id,
                start_time,
                end_time,
            } => {
                let body = Json(json!({
                    "error": "Conflito de horário: colaborador já possui atendimento neste período.",
                    "collaboratorId": collaborator_id,
                    "startTime": start_time.format("%H:%M").to_string(),
                    "endTime": end_time.format("%H:%M").to_string(),
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }

            AppError::NotFound(ref entity) => {
                let body = Json(json!({ "error": format!("{} não encontrado.", entity) }));
                return (StatusCode::NOT_FOUND, body).into_response();
            }

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` vai logar a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
