// src/handlers/appointments.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{db_utils::get_rls_connection, error::AppError},
    config::AppState,
    handlers::validate_not_negative,
    middleware::{auth::AuthenticatedUser, tenancy::TenantContext},
    models::appointments::AppointmentStatus,
    services::appointment_service::ConsumptionEntry,
};

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPayload {
    pub client_id: Option<Uuid>,

    pub start_at: DateTime<Utc>,

    #[validate(range(min = 1, message = "A duração deve ser de pelo menos 1 minuto."))]
    pub duration_min: i32,

    #[validate(length(min = 1, message = "O serviço é obrigatório."))]
    pub service: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub price_expected: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub deposit: Decimal,

    pub notes: Option<String>,

    #[serde(default)]
    pub reminder: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusPayload {
    pub status: AppointmentStatus,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteAppointmentPayload {
    #[validate(custom(function = "validate_not_negative"))]
    pub price_final: Decimal,

    // Linhas do formulário de consumo; as vazias são descartadas no service
    #[serde(default)]
    pub consumptions: Vec<ConsumptionEntry>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AgendaQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

// ---
// Handlers
// ---

#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = "Agenda",
    params(
        AgendaQuery,
        ("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")
    ),
    responses(
        (status = 200, description = "Agendamentos da janela, com cliente embutido"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_agenda(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Query(query): Query<AgendaQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let agenda = app_state
        .appointment_service
        .get_agenda(&mut *rls_conn, tenant.0, query.from, query.to)
        .await?;

    Ok((StatusCode::OK, Json(agenda)))
}

#[utoipa::path(
    get,
    path = "/api/appointments/today",
    tag = "Agenda",
    params(("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")),
    responses(
        (status = 200, description = "Agendamentos de hoje")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_today(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let agenda = app_state
        .appointment_service
        .get_today(&mut *rls_conn, tenant.0)
        .await?;

    Ok((StatusCode::OK, Json(agenda)))
}

#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    tag = "Agenda",
    params(
        ("id" = Uuid, Path, description = "ID do agendamento"),
        ("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")
    ),
    responses(
        (status = 200, description = "Agendamento com o cliente embutido"),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_appointment(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let detail = app_state
        .appointment_service
        .get_appointment(&mut *rls_conn, tenant.0, id)
        .await?;

    Ok((StatusCode::OK, Json(detail)))
}

#[utoipa::path(
    post,
    path = "/api/appointments",
    tag = "Agenda",
    request_body = AppointmentPayload,
    params(("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")),
    responses(
        (status = 201, description = "Agendamento criado (status inicial: scheduled)"),
        (status = 400, description = "Payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_appointment(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<AppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let appointment = app_state
        .appointment_service
        .create(
            &mut *rls_conn,
            tenant.0,
            payload.client_id,
            payload.start_at,
            payload.duration_min,
            &payload.service,
            payload.price_expected,
            payload.deposit,
            payload.notes.as_deref(),
            payload.reminder,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    tag = "Agenda",
    request_body = AppointmentPayload,
    params(
        ("id" = Uuid, Path, description = "ID do agendamento"),
        ("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")
    ),
    responses(
        (status = 200, description = "Agendamento atualizado"),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_appointment(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<AppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let appointment = app_state
        .appointment_service
        .update(
            &mut *rls_conn,
            tenant.0,
            id,
            payload.client_id,
            payload.start_at,
            payload.duration_min,
            &payload.service,
            payload.price_expected,
            payload.deposit,
            payload.notes.as_deref(),
            payload.reminder,
        )
        .await?;

    Ok((StatusCode::OK, Json(appointment)))
}

#[utoipa::path(
    patch,
    path = "/api/appointments/{id}/status",
    tag = "Agenda",
    request_body = StatusPayload,
    params(
        ("id" = Uuid, Path, description = "ID do agendamento"),
        ("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")
    ),
    responses(
        (status = 200, description = "Status atualizado"),
        (status = 409, description = "Transição de status inválida")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_status(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    // `completed` é rejeitado aqui: conclusão passa pelo endpoint /complete
    let appointment = app_state
        .appointment_service
        .transition(&mut *rls_conn, tenant.0, id, payload.status)
        .await?;

    Ok((StatusCode::OK, Json(appointment)))
}

#[utoipa::path(
    post,
    path = "/api/appointments/{id}/complete",
    tag = "Agenda",
    request_body = CompleteAppointmentPayload,
    params(
        ("id" = Uuid, Path, description = "ID do agendamento"),
        ("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")
    ),
    responses(
        (status = 200, description = "Atendimento concluído; consumo registrado e estoque baixado"),
        (status = 400, description = "Estoque insuficiente para o consumo informado"),
        (status = 409, description = "Transição de status inválida")
    ),
    security(("api_jwt" = []))
)]
pub async fn complete_appointment(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<CompleteAppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    // Uma única transação: status + valor final + consumo + baixa de estoque
    let appointment = app_state
        .appointment_service
        .complete(
            &mut *rls_conn,
            tenant.0,
            id,
            payload.price_final,
            &payload.consumptions,
        )
        .await?;

    Ok((StatusCode::OK, Json(appointment)))
}

#[utoipa::path(
    get,
    path = "/api/appointments/{id}/consumption",
    tag = "Agenda",
    params(
        ("id" = Uuid, Path, description = "ID do agendamento"),
        ("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")
    ),
    responses(
        (status = 200, description = "Livro-razão de consumo do atendimento")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_consumption(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let records = app_state
        .appointment_service
        .get_consumption(&mut *rls_conn, tenant.0, id)
        .await?;

    Ok((StatusCode::OK, Json(records)))
}

#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    tag = "Agenda",
    params(
        ("id" = Uuid, Path, description = "ID do agendamento"),
        ("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")
    ),
    responses(
        (status = 204, description = "Agendamento removido"),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_appointment(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    app_state
        .appointment_service
        .delete(&mut *rls_conn, tenant.0, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
