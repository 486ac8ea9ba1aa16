// src/middleware/tenancy.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::common::error::AppError;

// O nome do nosso cabeçalho HTTP customizado
const TENANT_ID_HEADER: &str = "x-tenant-id";

// O extrator de tenant.
// Armazena o UUID do estúdio que o utilizador quer aceder. O id nunca vem
// do estado da sessão: todo handler o recebe e o repassa explicitamente.
#[derive(Debug, Clone)]
pub struct TenantContext(pub Uuid);

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(TENANT_ID_HEADER)
            .ok_or(AppError::InvalidTenantHeader)?;

        let value_str = header_value
            .to_str()
            .map_err(|_| AppError::InvalidTenantHeader)?;

        let tenant_id = Uuid::parse_str(value_str).map_err(|_| AppError::InvalidTenantHeader)?;

        Ok(TenantContext(tenant_id))
    }
}
