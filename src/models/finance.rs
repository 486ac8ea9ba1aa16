// src/models/finance.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "expense_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Rent,
    Materials,
    Marketing,
    Apps,
    Utilities,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    Pix,
    Transfer,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    #[schema(ignore)]
    pub tenant_id: Uuid,
    #[schema(value_type = String, format = Date, example = "2025-08-02")]
    pub date: NaiveDate,
    #[schema(example = "250.00")]
    pub amount: Decimal,
    pub category: ExpenseCategory,
    pub payment_method: PaymentMethod,
    #[schema(example = "Aluguel da sala")]
    pub description: Option<String>,
    pub recurring: bool,
    pub created_at: DateTime<Utc>,
}
