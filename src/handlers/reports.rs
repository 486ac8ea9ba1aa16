// src/handlers/reports.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::{db_utils::get_rls_connection, error::AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, tenancy::TenantContext},
    models::reports::Period,
};

// ---
// Query de período (compartilhada pelos dois endpoints)
// ---

fn default_period() -> Period {
    Period::Weekly
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    // Sem seletor, o padrão é a semana corrente (segunda a domingo)
    #[serde(default = "default_period")]
    pub period: Period,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl PeriodQuery {
    fn custom_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Some((from, to)),
            _ => None,
        }
    }
}

// ---
// Handlers
// ---

#[utoipa::path(
    get,
    path = "/api/reports/summary",
    tag = "Relatórios",
    params(
        PeriodQuery,
        ("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")
    ),
    responses(
        (status = 200, description = "Resumo do período: faturamento, despesas, lucro e contagens"),
        (status = 400, description = "Período custom sem o par de datas")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let summary = app_state
        .reports_service
        .get_summary(&mut *rls_conn, tenant.0, query.period, query.custom_range())
        .await?;

    Ok((StatusCode::OK, Json(summary)))
}

#[utoipa::path(
    get,
    path = "/api/reports/revenue-by-day",
    tag = "Relatórios",
    params(
        PeriodQuery,
        ("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")
    ),
    responses(
        (status = 200, description = "Faturamento concluído por dia, para o gráfico")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_revenue_by_day(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Query(query): Query<PeriodQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let chart = app_state
        .reports_service
        .get_revenue_by_day(&mut *rls_conn, tenant.0, query.period, query.custom_range())
        .await?;

    Ok((StatusCode::OK, Json(chart)))
}
