// src/db/reports_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::reports::{DateRange, RevenueByDay},
};

// Agregados dos relatórios. Tudo é calculado na hora, por janela —
// nada de valores materializados que possam ficar defasados.
#[derive(Clone)]
pub struct ReportsRepository {
    pool: PgPool,
}

impl ReportsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Faturamento = soma do valor final dos atendimentos concluídos na janela.
    pub async fn revenue_in_range<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        range: DateRange,
    ) -> Result<Decimal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(price_final), 0)
            FROM appointments
            WHERE tenant_id = $1 AND status = 'completed'
              AND start_at BETWEEN $2 AND $3
            "#,
        )
        .bind(tenant_id)
        .bind(range.from)
        .bind(range.to)
        .fetch_one(executor)
        .await?;
        Ok(total)
    }

    /// (total, concluídos) na janela.
    pub async fn appointment_counts<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        range: DateRange,
    ) -> Result<(i64, i64), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let counts = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE status = 'completed')
            FROM appointments
            WHERE tenant_id = $1 AND start_at BETWEEN $2 AND $3
            "#,
        )
        .bind(tenant_id)
        .bind(range.from)
        .bind(range.to)
        .fetch_one(executor)
        .await?;
        Ok(counts)
    }

    pub async fn minutes_worked_in_range<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        range: DateRange,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let minutes = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(SUM(duration_min), 0)::bigint
            FROM appointments
            WHERE tenant_id = $1 AND status = 'completed'
              AND start_at BETWEEN $2 AND $3
            "#,
        )
        .bind(tenant_id)
        .bind(range.from)
        .bind(range.to)
        .fetch_one(executor)
        .await?;
        Ok(minutes)
    }

    pub async fn expense_total_in_range<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        range: DateRange,
    ) -> Result<Decimal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM expenses
            WHERE tenant_id = $1 AND date BETWEEN $2::date AND $3::date
            "#,
        )
        .bind(tenant_id)
        .bind(range.from.date_naive())
        .bind(range.to.date_naive())
        .fetch_one(executor)
        .await?;
        Ok(total)
    }

    pub async fn low_stock_count<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM materials WHERE tenant_id = $1 AND qty_current <= min_qty",
        )
        .bind(tenant_id)
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    /// Série diária de faturamento para o gráfico.
    pub async fn revenue_by_day<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<RevenueByDay>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entries = sqlx::query_as::<_, RevenueByDay>(
            r#"
            SELECT (start_at AT TIME ZONE 'UTC')::date AS day,
                   COALESCE(SUM(price_final), 0) AS total
            FROM appointments
            WHERE tenant_id = $1 AND status = 'completed'
              AND start_at BETWEEN $2 AND $3
            GROUP BY day
            ORDER BY day ASC
            "#,
        )
        .bind(tenant_id)
        .bind(range.from)
        .bind(range.to)
        .fetch_all(executor)
        .await?;
        Ok(entries)
    }
}
