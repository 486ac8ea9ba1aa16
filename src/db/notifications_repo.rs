// src/db/notifications_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::notifications::{Notification, NotificationType},
};

#[derive(Clone)]
pub struct NotificationsRepository {
    pool: PgPool,
}

impl NotificationsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_all<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        unread_only: bool,
    ) -> Result<Vec<Notification>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
            WHERE tenant_id = $1 AND ($2 = FALSE OR read_at IS NULL)
            ORDER BY created_at DESC
            "#,
        )
        .bind(tenant_id)
        .bind(unread_only)
        .fetch_all(executor)
        .await?;
        Ok(notifications)
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        r#type: NotificationType,
        title: &str,
        body: Option<&str>,
    ) -> Result<Notification, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (tenant_id, type, title, body)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(tenant_id)
        .bind(r#type)
        .bind(title)
        .bind(body)
        .fetch_one(executor)
        .await?;
        Ok(notification)
    }

    pub async fn mark_read<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Notification>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications SET read_at = NOW()
            WHERE id = $1 AND tenant_id = $2 AND read_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(executor)
        .await?;
        Ok(notification)
    }
}
