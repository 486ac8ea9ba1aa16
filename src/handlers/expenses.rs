// src/handlers/expenses.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
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
    models::finance::{ExpenseCategory, PaymentMethod},
};

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePayload {
    pub date: NaiveDate,

    #[validate(custom(function = "validate_not_negative"))]
    pub amount: Decimal,

    pub category: ExpenseCategory,
    pub payment_method: PaymentMethod,
    pub description: Option<String>,

    #[serde(default)]
    pub recurring: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ExpensesQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

// ---
// Handlers
// ---

#[utoipa::path(
    get,
    path = "/api/expenses",
    tag = "Financeiro",
    params(
        ExpensesQuery,
        ("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")
    ),
    responses(
        (status = 200, description = "Despesas da janela, mais recentes primeiro")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_expenses(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Query(query): Query<ExpensesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let expenses = app_state
        .finance_service
        .get_expenses(&mut *rls_conn, tenant.0, query.from, query.to)
        .await?;

    Ok((StatusCode::OK, Json(expenses)))
}

#[utoipa::path(
    post,
    path = "/api/expenses",
    tag = "Financeiro",
    request_body = ExpensePayload,
    params(("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")),
    responses(
        (status = 201, description = "Despesa registrada"),
        (status = 400, description = "Payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_expense(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<ExpensePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let expense = app_state
        .finance_service
        .create_expense(
            &mut *rls_conn,
            tenant.0,
            payload.date,
            payload.amount,
            payload.category,
            payload.payment_method,
            payload.description.as_deref(),
            payload.recurring,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(expense)))
}

#[utoipa::path(
    put,
    path = "/api/expenses/{id}",
    tag = "Financeiro",
    request_body = ExpensePayload,
    params(
        ("id" = Uuid, Path, description = "ID da despesa"),
        ("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")
    ),
    responses(
        (status = 200, description = "Despesa atualizada"),
        (status = 404, description = "Despesa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_expense(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<ExpensePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let expense = app_state
        .finance_service
        .update_expense(
            &mut *rls_conn,
            tenant.0,
            id,
            payload.date,
            payload.amount,
            payload.category,
            payload.payment_method,
            payload.description.as_deref(),
            payload.recurring,
        )
        .await?;

    Ok((StatusCode::OK, Json(expense)))
}

#[utoipa::path(
    delete,
    path = "/api/expenses/{id}",
    tag = "Financeiro",
    params(
        ("id" = Uuid, Path, description = "ID da despesa"),
        ("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")
    ),
    responses(
        (status = 204, description = "Despesa removida"),
        (status = 404, description = "Despesa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_expense(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    app_state
        .finance_service
        .delete_expense(&mut *rls_conn, tenant.0, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
