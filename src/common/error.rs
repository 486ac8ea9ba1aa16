// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;

use crate::models::appointments::AppointmentStatus;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Conclusão de atendimento: consumo pedido maior que o saldo atual.
    // Aborta a operação inteira, nomeando o material ofensor.
    #[error("Quantidade insuficiente de {material}")]
    InsufficientStock {
        material: String,
        available: Decimal,
        requested: Decimal,
    },

    // Transições fora da tabela do ciclo de vida são rejeitadas aqui,
    // independente de quem chamou (não confiamos nos botões da UI).
    #[error("Transição de status inválida: {from} -> {to}")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Agendamento não encontrado")]
    AppointmentNotFound,

    #[error("Material não encontrado")]
    MaterialNotFound,

    #[error("Cliente não encontrado")]
    ClientNotFound,

    #[error("Despesa não encontrada")]
    ExpenseNotFound,

    #[error("Perfil do estúdio ainda não configurado")]
    ProfileNotFound,

    #[error("Notificação não encontrada")]
    NotificationNotFound,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Cabeçalho X-Tenant-ID ausente ou inválido")]
    InvalidTenantHeader,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
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

            AppError::InsufficientStock {
                material,
                available,
                requested,
            } => {
                let body = Json(json!({
                    "error": format!("Quantidade insuficiente de {}", material),
                    "available": available,
                    "requested": requested,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::InvalidStatusTransition { from, to } => {
                let body = Json(json!({
                    "error": format!("Transição de status inválida: {} -> {}", from, to),
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }

            AppError::AppointmentNotFound => {
                (StatusCode::NOT_FOUND, "Agendamento não encontrado.")
            }
            AppError::MaterialNotFound => (StatusCode::NOT_FOUND, "Material não encontrado."),
            AppError::ClientNotFound => (StatusCode::NOT_FOUND, "Cliente não encontrado."),
            AppError::ExpenseNotFound => (StatusCode::NOT_FOUND, "Despesa não encontrada."),
            AppError::ProfileNotFound => (
                StatusCode::NOT_FOUND,
                "Perfil do estúdio ainda não configurado.",
            ),
            AppError::NotificationNotFound => {
                (StatusCode::NOT_FOUND, "Notificação não encontrada.")
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.",
            ),
            AppError::InvalidTenantHeader => (
                StatusCode::BAD_REQUEST,
                "O cabeçalho X-Tenant-ID é obrigatório e deve ser um UUID.",
            ),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que o `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.",
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
