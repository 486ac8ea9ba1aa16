// src/db/clients_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::clients::Client};

#[derive(Clone)]
pub struct ClientsRepository {
    pool: PgPool,
}

impl ClientsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_all<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        include_archived: bool,
    ) -> Result<Vec<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT * FROM clients
            WHERE tenant_id = $1 AND ($2 OR archived = FALSE)
            ORDER BY name ASC
            "#,
        )
        .bind(tenant_id)
        .bind(include_archived)
        .fetch_all(executor)
        .await?;
        Ok(clients)
    }

    pub async fn get_by_id<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client =
            sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1 AND tenant_id = $2")
                .bind(id)
                .bind(tenant_id)
                .fetch_optional(executor)
                .await?;
        Ok(client)
    }

    /// Busca em lote, para montar a agenda com os clientes embutidos.
    pub async fn get_by_ids<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        ids: &[Uuid],
    ) -> Result<Vec<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT * FROM clients WHERE tenant_id = $1 AND id = ANY($2)",
        )
        .bind(tenant_id)
        .bind(ids)
        .fetch_all(executor)
        .await?;
        Ok(clients)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        instagram: Option<&str>,
        skin_tone: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (tenant_id, name, email, phone, instagram, skin_tone, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(instagram)
        .bind(skin_tone)
        .bind(notes)
        .fetch_one(executor)
        .await?;
        Ok(client)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        instagram: Option<&str>,
        skin_tone: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients SET
                name = $3,
                email = $4,
                phone = $5,
                instagram = $6,
                skin_tone = $7,
                notes = $8,
                updated_at = NOW()
            WHERE id = $1 AND tenant_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(instagram)
        .bind(skin_tone)
        .bind(notes)
        .fetch_optional(executor)
        .await?;
        Ok(client)
    }

    /// Arquiva/desarquiva sem apagar o histórico de atendimentos.
    pub async fn set_archived<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
        archived: bool,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients SET archived = $3, updated_at = NOW()
            WHERE id = $1 AND tenant_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(archived)
        .fetch_optional(executor)
        .await?;
        Ok(client)
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
        let result = sqlx::query("DELETE FROM clients WHERE id = $1 AND tenant_id = $2")
            .bind(id)
            .bind(tenant_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
