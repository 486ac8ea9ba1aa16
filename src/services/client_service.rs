// src/services/client_service.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, db::ClientsRepository, models::clients::Client};

#[derive(Clone)]
pub struct ClientService {
    repo: ClientsRepository,
}

impl ClientService {
    pub fn new(repo: ClientsRepository) -> Self {
        Self { repo }
    }

    pub async fn get_clients<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        include_archived: bool,
    ) -> Result<Vec<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.get_all(executor, tenant_id, include_archived).await
    }

    pub async fn get_client<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .get_by_id(executor, tenant_id, id)
            .await?
            .ok_or(AppError::ClientNotFound)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_client<'e, E>(
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
        self.repo
            .create(executor, tenant_id, name, email, phone, instagram, skin_tone, notes)
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_client<'e, E>(
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
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .update(executor, tenant_id, id, name, email, phone, instagram, skin_tone, notes)
            .await?
            .ok_or(AppError::ClientNotFound)
    }

    /// Arquivar preserva o vínculo com o histórico; excluir é definitivo.
    pub async fn set_archived<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
        archived: bool,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .set_archived(executor, tenant_id, id, archived)
            .await?
            .ok_or(AppError::ClientNotFound)
    }

    pub async fn delete_client<'e, E>(
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
            Err(AppError::ClientNotFound)
        }
    }
}
