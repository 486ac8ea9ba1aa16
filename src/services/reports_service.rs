// src/services/reports_service.rs

use chrono::{NaiveDate, Utc};
use sqlx::{Executor, PgConnection, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ReportsRepository,
    models::reports::{resolve_range, Period, PeriodSummary, RevenueByDay},
};

#[derive(Clone)]
pub struct ReportsService {
    repo: ReportsRepository,
}

impl ReportsService {
    pub fn new(repo: ReportsRepository) -> Self {
        Self { repo }
    }

    /// Cards do dashboard/financeiro: tudo calculado sobre a mesma janela.
    /// Recebe a conexão direto (várias queries na mesma conexão RLS).
    pub async fn get_summary(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
        period: Period,
        custom: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<PeriodSummary, AppError> {
        let range = resolve_range(period, Utc::now(), custom)?;

        let revenue = self.repo.revenue_in_range(&mut *conn, tenant_id, range).await?;
        let (appointments_total, appointments_completed) =
            self.repo.appointment_counts(&mut *conn, tenant_id, range).await?;
        let minutes_worked = self
            .repo
            .minutes_worked_in_range(&mut *conn, tenant_id, range)
            .await?;
        let expense_total = self
            .repo
            .expense_total_in_range(&mut *conn, tenant_id, range)
            .await?;
        let low_stock_count = self.repo.low_stock_count(&mut *conn, tenant_id).await?;

        Ok(PeriodSummary {
            range,
            revenue,
            expense_total,
            profit: revenue - expense_total,
            appointments_total,
            appointments_completed,
            minutes_worked,
            low_stock_count,
        })
    }

    pub async fn get_revenue_by_day<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        period: Period,
        custom: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<RevenueByDay>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let range = resolve_range(period, Utc::now(), custom)?;
        self.repo.revenue_by_day(executor, tenant_id, range).await
    }
}
