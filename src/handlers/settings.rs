// src/handlers/settings.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{db_utils::get_rls_connection, error::AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, tenancy::TenantContext},
    models::settings::{UpdateProfileRequest, UpsertBusinessHoursRequest},
};

// PUT em lote: a grade inteira da semana de uma vez.
#[derive(Debug, serde::Deserialize, Validate, ToSchema)]
pub struct BusinessHoursPayload {
    #[validate(nested, length(max = 7, message = "No máximo uma linha por dia da semana."))]
    pub hours: Vec<UpsertBusinessHoursRequest>,
}

#[utoipa::path(
    get,
    path = "/api/settings/profile",
    tag = "Configurações",
    params(("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")),
    responses(
        (status = 200, description = "Perfil do estúdio"),
        (status = 404, description = "Perfil ainda não configurado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_profile(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let profile = app_state
        .settings_repo
        .get_profile(&mut *rls_conn, tenant.0)
        .await?
        .ok_or(AppError::ProfileNotFound)?;

    Ok((StatusCode::OK, Json(profile)))
}

#[utoipa::path(
    put,
    path = "/api/settings/profile",
    tag = "Configurações",
    request_body = UpdateProfileRequest,
    params(("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")),
    responses(
        (status = 200, description = "Perfil criado/atualizado"),
        (status = 400, description = "Payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn upsert_profile(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let profile = app_state
        .settings_repo
        .upsert_profile(
            &mut *rls_conn,
            tenant.0,
            &payload.name,
            payload.studio_name.as_deref(),
            payload.phone.as_deref(),
            payload.timezone.as_deref(),
            payload.currency.as_deref(),
            payload.stock_notifications,
            payload.onboarding_done,
        )
        .await?;

    Ok((StatusCode::OK, Json(profile)))
}

#[utoipa::path(
    get,
    path = "/api/settings/business-hours",
    tag = "Configurações",
    params(("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")),
    responses(
        (status = 200, description = "Horário de funcionamento, ordenado por dia da semana")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_business_hours(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let hours = app_state
        .settings_repo
        .get_business_hours(&mut *rls_conn, tenant.0)
        .await?;

    Ok((StatusCode::OK, Json(hours)))
}

#[utoipa::path(
    put,
    path = "/api/settings/business-hours",
    tag = "Configurações",
    request_body = BusinessHoursPayload,
    params(("x-tenant-id" = Uuid, Header, description = "ID do Estúdio")),
    responses(
        (status = 200, description = "Grade da semana gravada"),
        (status = 400, description = "Payload inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn upsert_business_hours(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<BusinessHoursPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut rls_conn = get_rls_connection(&app_state, &tenant, &user).await?;

    let mut saved = Vec::with_capacity(payload.hours.len());
    for entry in &payload.hours {
        let row = app_state
            .settings_repo
            .upsert_business_hours(
                &mut *rls_conn,
                tenant.0,
                entry.weekday,
                entry.open_time,
                entry.close_time,
                entry.is_closed,
            )
            .await?;
        saved.push(row);
    }

    Ok((StatusCode::OK, Json(saved)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use crate::models::settings::UpsertBusinessHoursRequest;

    fn linha(weekday: i16) -> UpsertBusinessHoursRequest {
        UpsertBusinessHoursRequest {
            weekday,
            open_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            close_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            is_closed: false,
        }
    }

    #[test]
    fn grade_completa_da_semana_e_aceita() {
        let payload = BusinessHoursPayload {
            hours: (0..7).map(linha).collect(),
        };
        assert!(payload.validate().is_ok());
    }

    // O erro de tamanho serializa a lista inteira nos params da validação
    #[test]
    fn grade_com_mais_de_sete_linhas_e_rejeitada() {
        let payload = BusinessHoursPayload {
            hours: (0..8).map(|d| linha(d % 7)).collect(),
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.errors().contains_key("hours"));
    }

    #[test]
    fn weekday_fora_do_intervalo_e_rejeitado_na_linha() {
        let payload = BusinessHoursPayload { hours: vec![linha(7)] };
        assert!(payload.validate().is_err());
    }
}
