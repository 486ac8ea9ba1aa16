// src/handlers/clients.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{db_utils::get_rls_connection, error::AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, tenancy::TenantContext},
};

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(email(message = "E-mail inválido."))]
    pub email: Option<String>,

    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub skin_tone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArchivePayload {
    pub archived: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ClientsQuery {
    #[serde(default)]
    pub include_archived: bool,
}

// ---
// Handlers
// ---

#[utoipa::path(
    get,
    path = "/api/clients",
    tag = "Clientes",
    params(
        ClientsQuery,
        ("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")
    ),
    responses(
        (status = 200, description = "Clientes do estúdio, arquivados fora por padrão")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_clients(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Query(query): Query<ClientsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let clients = app_state
        .client_service
        .get_clients(&mut *rls_conn, tenant.0, query.include_archived)
        .await?;

    Ok((StatusCode::OK, Json(clients)))
}

#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    tag = "Clientes",
    params(
        ("id" = Uuid, Path, description = "ID do cliente"),
        ("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")
    ),
    responses(
        (status = 200, description = "Cliente encontrado"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_client(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let client = app_state
        .client_service
        .get_client(&mut *rls_conn, tenant.0, id)
        .await?;

    Ok((StatusCode::OK, Json(client)))
}

#[utoipa::path(
    post,
    path = "/api/clients",
    tag = "Clientes",
    request_body = ClientPayload,
    params(("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")),
    responses(
        (status = 201, description = "Cliente criado"),
        (status = 400, description = "Payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<ClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let client = app_state
        .client_service
        .create_client(
            &mut *rls_conn,
            tenant.0,
            &payload.name,
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.instagram.as_deref(),
            payload.skin_tone.as_deref(),
            payload.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(client)))
}

#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    tag = "Clientes",
    request_body = ClientPayload,
    params(
        ("id" = Uuid, Path, description = "ID do cliente"),
        ("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")
    ),
    responses(
        (status = 200, description = "Cliente atualizado"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<ClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let client = app_state
        .client_service
        .update_client(
            &mut *rls_conn,
            tenant.0,
            id,
            &payload.name,
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.instagram.as_deref(),
            payload.skin_tone.as_deref(),
            payload.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(client)))
}

#[utoipa::path(
    patch,
    path = "/api/clients/{id}/archive",
    tag = "Clientes",
    request_body = ArchivePayload,
    params(
        ("id" = Uuid, Path, description = "ID do cliente"),
        ("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")
    ),
    responses(
        (status = 200, description = "Cliente arquivado/desarquivado"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn set_archived(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<ArchivePayload>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let client = app_state
        .client_service
        .set_archived(&mut *rls_conn, tenant.0, id, payload.archived)
        .await?;

    Ok((StatusCode::OK, Json(client)))
}

#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    tag = "Clientes",
    params(
        ("id" = Uuid, Path, description = "ID do cliente"),
        ("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")
    ),
    responses(
        (status = 204, description = "Cliente removido"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    app_state
        .client_service
        .delete_client(&mut *rls_conn, tenant.0, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
