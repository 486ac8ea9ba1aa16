// src/models/settings.rs

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Perfil do estúdio (1 linha por tenant)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[schema(ignore)] // O contexto (Header) já define o estúdio
    pub tenant_id: Uuid,
    #[schema(example = "Rafael Mendes")]
    pub name: String,
    #[schema(example = "Black Lotus Tattoo")]
    pub studio_name: Option<String>,
    pub phone: Option<String>,
    #[schema(example = "America/Sao_Paulo")]
    pub timezone: String,
    #[schema(example = "BRL")]
    pub currency: String,
    // Liga/desliga as notificações de estoque baixo da conclusão
    pub stock_notifications: bool,
    pub onboarding_done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub studio_name: Option<String>,
    pub phone: Option<String>,
    #[schema(example = "America/Sao_Paulo")]
    pub timezone: Option<String>,
    pub currency: Option<String>,
    pub stock_notifications: Option<bool>,
    pub onboarding_done: Option<bool>,
}

// Horário de funcionamento (1 linha por dia da semana, 0 = domingo)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessHours {
    pub id: Uuid,
    #[schema(ignore)]
    pub tenant_id: Uuid,
    #[schema(example = 1)]
    pub weekday: i16,
    #[schema(value_type = String, example = "09:00:00")]
    pub open_time: NaiveTime,
    #[schema(value_type = String, example = "19:00:00")]
    pub close_time: NaiveTime,
    pub is_closed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertBusinessHoursRequest {
    #[validate(range(min = 0, max = 6, message = "weekday deve estar entre 0 e 6."))]
    pub weekday: i16,
    #[schema(value_type = String)]
    pub open_time: NaiveTime,
    #[schema(value_type = String)]
    pub close_time: NaiveTime,
    #[serde(default)]
    pub is_closed: bool,
}
