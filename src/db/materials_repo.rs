// src/db/materials_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        appointments::MaterialConsumption,
        materials::{Material, MaterialCategory, UnitType},
    },
};

#[derive(Clone)]
pub struct MaterialsRepository {
    pool: PgPool,
}

impl MaterialsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---

    pub async fn get_all<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Vec<Material>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let materials = sqlx::query_as::<_, Material>(
            "SELECT * FROM materials WHERE tenant_id = $1 ORDER BY name ASC",
        )
        .bind(tenant_id)
        .fetch_all(executor)
        .await?;
        Ok(materials)
    }

    /// O alerta é a comparação de duas colunas, recalculada a cada leitura.
    pub async fn get_low_stock<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Vec<Material>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let materials = sqlx::query_as::<_, Material>(
            r#"
            SELECT * FROM materials
            WHERE tenant_id = $1 AND qty_current <= min_qty
            ORDER BY qty_current ASC
            "#,
        )
        .bind(tenant_id)
        .fetch_all(executor)
        .await?;
        Ok(materials)
    }

    pub async fn get_by_id<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Material>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let material = sqlx::query_as::<_, Material>(
            "SELECT * FROM materials WHERE id = $1 AND tenant_id = $2",
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(executor)
        .await?;
        Ok(material)
    }

    /// Com lock de linha: a validação de saldo da conclusão lê daqui para que
    /// conclusões concorrentes sobre o mesmo material fiquem serializadas.
    pub async fn get_for_update<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Material>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let material = sqlx::query_as::<_, Material>(
            "SELECT * FROM materials WHERE id = $1 AND tenant_id = $2 FOR UPDATE",
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(executor)
        .await?;
        Ok(material)
    }

    // ---
    // Funções de "Escrita"
    // ---

    pub async fn create<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        name: &str,
        category: MaterialCategory,
        unit: UnitType,
        qty_current: Decimal,
        min_qty: Decimal,
        unit_cost: Decimal,
        supplier: Option<&str>,
    ) -> Result<Material, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let material = sqlx::query_as::<_, Material>(
            r#"
            INSERT INTO materials
                (tenant_id, name, category, unit, qty_current, min_qty, unit_cost, supplier)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(name)
        .bind(category)
        .bind(unit)
        .bind(qty_current)
        .bind(min_qty)
        .bind(unit_cost)
        .bind(supplier)
        .fetch_one(executor)
        .await?;
        Ok(material)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
        name: &str,
        category: MaterialCategory,
        unit: UnitType,
        min_qty: Decimal,
        unit_cost: Decimal,
        supplier: Option<&str>,
    ) -> Result<Option<Material>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let material = sqlx::query_as::<_, Material>(
            r#"
            UPDATE materials SET
                name = $3,
                category = $4,
                unit = $5,
                min_qty = $6,
                unit_cost = $7,
                supplier = $8,
                updated_at = NOW()
            WHERE id = $1 AND tenant_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(name)
        .bind(category)
        .bind(unit)
        .bind(min_qty)
        .bind(unit_cost)
        .bind(supplier)
        .fetch_optional(executor)
        .await?;
        Ok(material)
    }

    /// Baixa atômica e condicional: o GREATEST roda em um único statement,
    /// então nunca gravamos saldo negativo nem corremos read-modify-write.
    pub async fn decrement_stock<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
        amount: Decimal,
    ) -> Result<Material, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let material = sqlx::query_as::<_, Material>(
            r#"
            UPDATE materials
            SET qty_current = GREATEST(0, qty_current - $3), updated_at = NOW()
            WHERE id = $1 AND tenant_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(amount)
        .fetch_one(executor)
        .await?;
        Ok(material)
    }

    /// Ajuste manual (delta positivo ou negativo), com o mesmo piso em zero.
    pub async fn adjust_stock<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
        delta: Decimal,
    ) -> Result<Option<Material>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let material = sqlx::query_as::<_, Material>(
            r#"
            UPDATE materials
            SET qty_current = GREATEST(0, qty_current + $3), updated_at = NOW()
            WHERE id = $1 AND tenant_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(delta)
        .fetch_optional(executor)
        .await?;
        Ok(material)
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
        let result = sqlx::query("DELETE FROM materials WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---
    // Livro-razão de consumo (imutável)
    // ---

    pub async fn record_consumption<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        appointment_id: Uuid,
        material_id: Uuid,
        qty_used: Decimal,
    ) -> Result<MaterialConsumption, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let record = sqlx::query_as::<_, MaterialConsumption>(
            r#"
            INSERT INTO material_consumption (tenant_id, appointment_id, material_id, qty_used)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(appointment_id)
        .bind(material_id)
        .bind(qty_used)
        .fetch_one(executor)
        .await?;
        Ok(record)
    }

    pub async fn get_consumption_for_appointment<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        appointment_id: Uuid,
    ) -> Result<Vec<MaterialConsumption>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let records = sqlx::query_as::<_, MaterialConsumption>(
            r#"
            SELECT * FROM material_consumption
            WHERE tenant_id = $1 AND appointment_id = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(tenant_id)
        .bind(appointment_id)
        .fetch_all(executor)
        .await?;
        Ok(records)
    }
}
