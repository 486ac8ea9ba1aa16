// src/services/inventory_service.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::MaterialsRepository,
    models::materials::{Material, MaterialCategory, MaterialWithAlert, UnitType},
};

#[derive(Clone)]
pub struct InventoryService {
    repo: MaterialsRepository,
}

impl InventoryService {
    pub fn new(repo: MaterialsRepository) -> Self {
        Self { repo }
    }

    /// Listagem com o alerta de estoque já resolvido por item.
    pub async fn get_inventory<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Vec<MaterialWithAlert>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let materials = self.repo.get_all(executor, tenant_id).await?;
        Ok(materials.into_iter().map(MaterialWithAlert::from).collect())
    }

    pub async fn get_low_stock<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
    ) -> Result<Vec<Material>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.get_low_stock(executor, tenant_id).await
    }

    pub async fn get_material<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<MaterialWithAlert, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let material = self
            .repo
            .get_by_id(executor, tenant_id, id)
            .await?
            .ok_or(AppError::MaterialNotFound)?;
        Ok(MaterialWithAlert::from(material))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_material<'e, E>(
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
        self.repo
            .create(
                executor, tenant_id, name, category, unit, qty_current, min_qty, unit_cost,
                supplier,
            )
            .await
    }

    /// Edição de cadastro. O saldo não passa por aqui: toda movimentação de
    /// quantidade entra por `adjust_stock` ou pela baixa da conclusão.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_material<'e, E>(
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
    ) -> Result<Material, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .update(
                executor, tenant_id, id, name, category, unit, min_qty, unit_cost, supplier,
            )
            .await?
            .ok_or(AppError::MaterialNotFound)
    }

    /// Ajuste manual de saldo: delta positivo repõe, negativo corrige para
    /// baixo. O banco trava o resultado em zero no mesmo statement.
    pub async fn adjust_stock<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
        delta: Decimal,
    ) -> Result<MaterialWithAlert, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let material = self
            .repo
            .adjust_stock(executor, tenant_id, id, delta)
            .await?
            .ok_or(AppError::MaterialNotFound)?;

        if material.is_low_stock() {
            tracing::warn!(
                "Estoque baixo após ajuste: {} com {} (mínimo {})",
                material.name,
                material.qty_current,
                material.min_qty
            );
        }
        Ok(MaterialWithAlert::from(material))
    }

    pub async fn delete_material<'e, E>(
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
            Err(AppError::MaterialNotFound)
        }
    }
}
