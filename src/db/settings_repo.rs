// src/db/settings_repo.rs

use chrono::NaiveTime;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::settings::{BusinessHours, Profile},
};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- Perfil do estúdio ---

    pub async fn get_profile<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Option<Profile>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let profile =
            sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE tenant_id = $1")
                .bind(tenant_id)
                .fetch_optional(executor)
                .await?;
        Ok(profile)
    }

    /// UPSERT: o perfil nasce no primeiro PUT (onboarding).
    pub async fn upsert_profile<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        name: &str,
        studio_name: Option<&str>,
        phone: Option<&str>,
        timezone: Option<&str>,
        currency: Option<&str>,
        stock_notifications: Option<bool>,
        onboarding_done: Option<bool>,
    ) -> Result<Profile, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles
                (tenant_id, name, studio_name, phone, timezone, currency,
                 stock_notifications, onboarding_done)
            VALUES ($1, $2, $3, $4,
                    COALESCE($5, 'America/Sao_Paulo'),
                    COALESCE($6, 'BRL'),
                    COALESCE($7, TRUE),
                    COALESCE($8, FALSE))
            ON CONFLICT (tenant_id) DO UPDATE SET
                name = EXCLUDED.name,
                studio_name = EXCLUDED.studio_name,
                phone = EXCLUDED.phone,
                timezone = COALESCE($5, profiles.timezone),
                currency = COALESCE($6, profiles.currency),
                stock_notifications = COALESCE($7, profiles.stock_notifications),
                onboarding_done = COALESCE($8, profiles.onboarding_done),
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(name)
        .bind(studio_name)
        .bind(phone)
        .bind(timezone)
        .bind(currency)
        .bind(stock_notifications)
        .bind(onboarding_done)
        .fetch_one(executor)
        .await?;
        Ok(profile)
    }

    // --- Horário de funcionamento ---

    pub async fn get_business_hours<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Vec<BusinessHours>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let hours = sqlx::query_as::<_, BusinessHours>(
            "SELECT * FROM business_hours WHERE tenant_id = $1 ORDER BY weekday ASC",
        )
        .bind(tenant_id)
        .fetch_all(executor)
        .await?;
        Ok(hours)
    }

    /// Uma linha por dia da semana (UPSERT pela unique tenant+weekday).
    pub async fn upsert_business_hours<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        weekday: i16,
        open_time: NaiveTime,
        close_time: NaiveTime,
        is_closed: bool,
    ) -> Result<BusinessHours, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let hours = sqlx::query_as::<_, BusinessHours>(
            r#"
            INSERT INTO business_hours (tenant_id, weekday, open_time, close_time, is_closed)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (tenant_id, weekday) DO UPDATE SET
                open_time = EXCLUDED.open_time,
                close_time = EXCLUDED.close_time,
                is_closed = EXCLUDED.is_closed
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(weekday)
        .bind(open_time)
        .bind(close_time)
        .bind(is_closed)
        .fetch_one(executor)
        .await?;
        Ok(hours)
    }
}
