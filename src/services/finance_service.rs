// src/services/finance_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::FinanceRepository,
    models::finance::{Expense, ExpenseCategory, PaymentMethod},
};

#[derive(Clone)]
pub struct FinanceService {
    repo: FinanceRepository,
}

impl FinanceService {
    pub fn new(repo: FinanceRepository) -> Self {
        Self { repo }
    }

    pub async fn get_expenses<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Expense>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.get_all(executor, tenant_id, from, to).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_expense<'e, E>(
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
        self.repo
            .create(
                executor, tenant_id, date, amount, category, payment_method, description,
                recurring,
            )
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_expense<'e, E>(
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
    ) -> Result<Expense, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .update(
                executor, tenant_id, id, date, amount, category, payment_method, description,
                recurring,
            )
            .await?
            .ok_or(AppError::ExpenseNotFound)
    }

    pub async fn delete_expense<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if self.repo.delete(executor, tenant_id, id).await? {
            Ok(())
        } else {
            Err(AppError::ExpenseNotFound)
        }
    }
}
