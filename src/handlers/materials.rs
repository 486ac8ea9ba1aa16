// src/handlers/materials.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{db_utils::get_rls_connection, error::AppError},
    config::AppState,
    handlers::validate_not_negative,
    middleware::{auth::AuthenticatedUser, tenancy::TenantContext},
    models::materials::{MaterialCategory, UnitType},
};

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaterialPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub category: MaterialCategory,
    pub unit: UnitType,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub qty_current: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub min_qty: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub unit_cost: Decimal,

    pub supplier: Option<String>,
}

// Edição de cadastro: o saldo não entra aqui (só por ajuste ou baixa).
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaterialPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub category: MaterialCategory,
    pub unit: UnitType,

    #[validate(custom(function = "validate_not_negative"))]
    pub min_qty: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    pub unit_cost: Decimal,

    pub supplier: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjustStockPayload {
    // Positivo repõe, negativo corrige para baixo (o banco trava em zero)
    pub delta: Decimal,
}

// ---
// Handlers
// ---

#[utoipa::path(
    get,
    path = "/api/materials",
    tag = "Estoque",
    params(("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")),
    responses(
        (status = 200, description = "Materiais com o alerta de estoque calculado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_inventory(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let materials = app_state
        .inventory_service
        .get_inventory(&mut *rls_conn, tenant.0)
        .await?;

    Ok((StatusCode::OK, Json(materials)))
}

#[utoipa::path(
    get,
    path = "/api/materials/low-stock",
    tag = "Estoque",
    params(("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")),
    responses(
        (status = 200, description = "Materiais com saldo no limite ou abaixo dele")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_low_stock(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let materials = app_state
        .inventory_service
        .get_low_stock(&mut *rls_conn, tenant.0)
        .await?;

    Ok((StatusCode::OK, Json(materials)))
}

#[utoipa::path(
    get,
    path = "/api/materials/{id}",
    tag = "Estoque",
    params(
        ("id" = Uuid, Path, description = "ID do material"),
        ("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")
    ),
    responses(
        (status = 200, description = "Material com o alerta de estoque calculado"),
        (status = 404, description = "Material não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_material(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let material = app_state
        .inventory_service
        .get_material(&mut *rls_conn, tenant.0, id)
        .await?;

    Ok((StatusCode::OK, Json(material)))
}

#[utoipa::path(
    post,
    path = "/api/materials",
    tag = "Estoque",
    request_body = CreateMaterialPayload,
    params(("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")),
    responses(
        (status = 201, description = "Material criado"),
        (status = 400, description = "Payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_material(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<CreateMaterialPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let material = app_state
        .inventory_service
        .create_material(
            &mut *rls_conn,
            tenant.0,
            &payload.name,
            payload.category,
            payload.unit,
            payload.qty_current,
            payload.min_qty,
            payload.unit_cost,
            payload.supplier.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(material)))
}

#[utoipa::path(
    put,
    path = "/api/materials/{id}",
    tag = "Estoque",
    request_body = UpdateMaterialPayload,
    params(
        ("id" = Uuid, Path, description = "ID do material"),
        ("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")
    ),
    responses(
        (status = 200, description = "Material atualizado"),
        (status = 404, description = "Material não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_material(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateMaterialPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let material = app_state
        .inventory_service
        .update_material(
            &mut *rls_conn,
            tenant.0,
            id,
            &payload.name,
            payload.category,
            payload.unit,
            payload.min_qty,
            payload.unit_cost,
            payload.supplier.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(material)))
}

#[utoipa::path(
    patch,
    path = "/api/materials/{id}/stock",
    tag = "Estoque",
    request_body = AdjustStockPayload,
    params(
        ("id" = Uuid, Path, description = "ID do material"),
        ("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")
    ),
    responses(
        (status = 200, description = "Saldo ajustado (nunca fica negativo)"),
        (status = 404, description = "Material não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn adjust_stock(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<AdjustStockPayload>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let material = app_state
        .inventory_service
        .adjust_stock(&mut *rls_conn, tenant.0, id, payload.delta)
        .await?;

    Ok((StatusCode::OK, Json(material)))
}

#[utoipa::path(
    delete,
    path = "/api/materials/{id}",
    tag = "Estoque",
    params(
        ("id" = Uuid, Path, description = "ID do material"),
        ("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")
    ),
    responses(
        (status = 204, description = "Material removido"),
        (status = 404, description = "Material não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_material(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    app_state
        .inventory_service
        .delete_material(&mut *rls_conn, tenant.0, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
