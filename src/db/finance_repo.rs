// src/db/finance_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::finance::{Expense, ExpenseCategory, PaymentMethod},
};

#[derive(Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Despesas da janela, mais recentes primeiro.
    pub async fn get_all<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Expense>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT * FROM expenses
            WHERE tenant_id = $1
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(tenant_id)
        .bind(from)
        .bind(to)
        .fetch_all(executor)
        .await?;
        Ok(expenses)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        date: NaiveDate,
        amount: Decimal,
        category: ExpenseCategory,
        payment_method: PaymentMethod,
        description: Option<&str>,
        recurring: bool,
    ) -> Result<Expense, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses
                (tenant_id, date, amount, category, payment_method, description, recurring)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(date)
        .bind(amount)
        .bind(category)
        .bind(payment_method)
        .bind(description)
        .bind(recurring)
        .fetch_one(executor)
        .await?;
        Ok(expense)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
        date: NaiveDate,
        amount: Decimal,
        category: ExpenseCategory,
        payment_method: PaymentMethod,
        description: Option<&str>,
        recurring: bool,
    ) -> Result<Option<Expense>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            UPDATE expenses SET
                date = $3,
                amount = $4,
                category = $5,
                payment_method = $6,
                description = $7,
                recurring = $8
            WHERE id = $1 AND tenant_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(date)
        .bind(amount)
        .bind(category)
        .bind(payment_method)
        .bind(description)
        .bind(recurring)
        .fetch_optional(executor)
        .await?;
        Ok(expense)
    }

    pub async fn delete<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
