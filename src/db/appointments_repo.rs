// src/db/appointments_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::appointments::{Appointment, AppointmentStatus},
};

#[derive(Clone)]
pub struct AppointmentsRepository {
    pool: PgPool,
}

impl AppointmentsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---

    /// Lista ordenada pela data de início, com janela opcional sobre start_at.
    pub async fn get_all<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Appointment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appointments = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT * FROM appointments
            WHERE tenant_id = $1
              AND ($2::timestamptz IS NULL OR start_at >= $2)
              AND ($3::timestamptz IS NULL OR start_at <= $3)
            ORDER BY start_at ASC
            "#,
        )
        .bind(tenant_id)
        .bind(from)
        .bind(to)
        .fetch_all(executor)
        .await?;
        Ok(appointments)
    }

    pub async fn get_by_id<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Appointment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appointment = sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE id = $1 AND tenant_id = $2",
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(executor)
        .await?;
        Ok(appointment)
    }

    /// Variante com lock de linha, para usar dentro da transação de conclusão.
    pub async fn get_for_update<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Appointment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appointment = sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE id = $1 AND tenant_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(executor)
        .await?;
        Ok(appointment)
    }

    // ---
    // Funções de "Escrita"
    // ---

    pub async fn create<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        client_id: Option<Uuid>,
        start_at: DateTime<Utc>,
        duration_min: i32,
        service: &str,
        price_expected: Decimal,
        deposit: Decimal,
        notes: Option<&str>,
        reminder: bool,
    ) -> Result<Appointment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments
                (tenant_id, client_id, start_at, duration_min, service,
                 price_expected, deposit, notes, reminder)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(client_id)
        .bind(start_at)
        .bind(duration_min)
        .bind(service)
        .bind(price_expected)
        .bind(deposit)
        .bind(notes)
        .bind(reminder)
        .fetch_one(executor)
        .await?;
        Ok(appointment)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
        client_id: Option<Uuid>,
        start_at: DateTime<Utc>,
        duration_min: i32,
        service: &str,
        price_expected: Decimal,
        deposit: Decimal,
        notes: Option<&str>,
        reminder: bool,
    ) -> Result<Option<Appointment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            UPDATE appointments SET
                client_id = $3,
                start_at = $4,
                duration_min = $5,
                service = $6,
                price_expected = $7,
                deposit = $8,
                notes = $9,
                reminder = $10,
                updated_at = NOW()
            WHERE id = $1 AND tenant_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(client_id)
        .bind(start_at)
        .bind(duration_min)
        .bind(service)
        .bind(price_expected)
        .bind(deposit)
        .bind(notes)
        .bind(reminder)
        .fetch_optional(executor)
        .await?;
        Ok(appointment)
    }

    /// Troca simples de status (a legalidade da transição é checada no service).
    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Appointment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            UPDATE appointments SET status = $3, updated_at = NOW()
            WHERE id = $1 AND tenant_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(status)
        .fetch_one(executor)
        .await?;
        Ok(appointment)
    }

    /// Conclusão: status + valor final em um único UPDATE.
    pub async fn mark_completed<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
        price_final: Decimal,
    ) -> Result<Appointment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            UPDATE appointments SET status = 'completed', price_final = $3, updated_at = NOW()
            WHERE id = $1 AND tenant_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(price_final)
        .fetch_one(executor)
        .await?;
        Ok(appointment)
    }

    /// Ação destrutiva separada do ciclo de vida.
    pub async fn delete<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
