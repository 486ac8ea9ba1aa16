// src/handlers/notifications.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::{db_utils::get_rls_connection, error::AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, tenancy::TenantContext},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsQuery {
    #[serde(default)]
    pub unread_only: bool,
}

#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notificações",
    params(
        NotificationsQuery,
        ("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")
    ),
    responses(
        (status = 200, description = "Notificações do estúdio, mais recentes primeiro")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_notifications(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Query(query): Query<NotificationsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let notifications = app_state
        .notifications_repo
        .get_all(&mut *rls_conn, tenant.0, query.unread_only)
        .await?;

    Ok((StatusCode::OK, Json(notifications)))
}

#[utoipa::path(
    patch,
    path = "/api/notifications/{id}/read",
    tag = "Notificações",
    params(
        ("id" = Uuid, Path, description = "ID da notificação"),
        ("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")
    ),
    responses(
        (status = 200, description = "Notificação marcada como lida"),
        (status = 404, description = "Notificação não encontrada ou já lida")
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_read(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let notification = app_state
        .notifications_repo
        .mark_read(&mut *rls_conn, tenant.0, id)
        .await?
        .ok_or(AppError::NotificationNotFound)?;

    Ok((StatusCode::OK, Json(notification)))
}
