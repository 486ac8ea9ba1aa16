// src/services/appointment_service.rs

use std::collections::HashMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{Acquire, Executor, PgConnection, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AppointmentsRepository, ClientsRepository, MaterialsRepository, NotificationsRepository, SettingsRepository},
    models::{
        appointments::{Appointment, AppointmentDetail, AppointmentStatus, MaterialConsumption},
        materials::deduct_clamped,
        notifications::NotificationType,
    },
};

// Linha do formulário de conclusão. Material vazio ou quantidade não
// positiva são descartados em silêncio antes da validação.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionEntry {
    pub material_id: Option<Uuid>,
    pub qty_used: Decimal,
}

/// Filtra as linhas aproveitáveis do formulário (par material + quantidade > 0).
pub fn sanitize_consumptions(entries: &[ConsumptionEntry]) -> Vec<(Uuid, Decimal)> {
    entries
        .iter()
        .filter_map(|entry| match entry.material_id {
            Some(material_id) if entry.qty_used > Decimal::ZERO => {
                Some((material_id, entry.qty_used))
            }
            _ => None,
        })
        .collect()
}

#[derive(Clone)]
pub struct AppointmentService {
    repo: AppointmentsRepository,
    materials_repo: MaterialsRepository,
    clients_repo: ClientsRepository,
    notifications_repo: NotificationsRepository,
    settings_repo: SettingsRepository,
}

impl AppointmentService {
    pub fn new(
        repo: AppointmentsRepository,
        materials_repo: MaterialsRepository,
        clients_repo: ClientsRepository,
        notifications_repo: NotificationsRepository,
        settings_repo: SettingsRepository,
    ) -> Self {
        Self {
            repo,
            materials_repo,
            clients_repo,
            notifications_repo,
            settings_repo,
        }
    }

    // --- AGENDA ---

    /// Lista com os clientes embutidos, para a agenda.
    /// Recebe a conexão direto (várias queries na mesma conexão RLS).
    pub async fn get_agenda(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<AppointmentDetail>, AppError> {
        let appointments = self.repo.get_all(&mut *conn, tenant_id, from, to).await?;

        // Busca os clientes referenciados em lote
        let client_ids: Vec<Uuid> = appointments.iter().filter_map(|a| a.client_id).collect();
        let clients = if client_ids.is_empty() {
            Vec::new()
        } else {
            self.clients_repo
                .get_by_ids(&mut *conn, tenant_id, &client_ids)
                .await?
        };
        // O mesmo cliente pode aparecer em vários atendimentos da janela
        let by_id: HashMap<Uuid, _> = clients.into_iter().map(|c| (c.id, c)).collect();

        Ok(appointments
            .into_iter()
            .map(|appointment| {
                let client = appointment
                    .client_id
                    .and_then(|id| by_id.get(&id).cloned());
                AppointmentDetail { appointment, client }
            })
            .collect())
    }

    /// Agenda do dia (meia-noite a meia-noite de hoje).
    pub async fn get_today(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
    ) -> Result<Vec<AppointmentDetail>, AppError> {
        let today = Utc::now().date_naive();
        let from = Utc.from_utc_datetime(&today.and_time(chrono::NaiveTime::MIN));
        let to = from + Duration::days(1) - Duration::seconds(1);
        self.get_agenda(conn, tenant_id, Some(from), Some(to)).await
    }

    pub async fn get_appointment(
        &self,
        conn: &mut PgConnection,
        tenant_id: Uuid,
        id: Uuid,
    ) -> Result<AppointmentDetail, AppError> {
        let appointment = self
            .repo
            .get_by_id(&mut *conn, tenant_id, id)
            .await?
            .ok_or(AppError::AppointmentNotFound)?;

        let client = match appointment.client_id {
            Some(client_id) => {
                self.clients_repo
                    .get_by_id(&mut *conn, tenant_id, client_id)
                    .await?
            }
            None => None,
        };

        Ok(AppointmentDetail { appointment, client })
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        client_id: Option<Uuid>,
        start_at: DateTime<Utc>,
        duration_min: i32,
        service: &str,
        price_expected: Decimal,
        deposit: Decimal,
        notes: Option<&str>,
        reminder: bool,
    ) -> Result<Appointment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // Todo atendimento nasce em `scheduled`
        self.repo
            .create(
                executor,
                tenant_id,
                client_id,
                start_at,
                duration_min,
                service,
                price_expected,
                deposit,
                notes,
                reminder,
            )
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
        client_id: Option<Uuid>,
        start_at: DateTime<Utc>,
        duration_min: i32,
        service: &str,
        price_expected: Decimal,
        deposit: Decimal,
        notes: Option<&str>,
        reminder: bool,
    ) -> Result<Appointment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .update(
                executor,
                tenant_id,
                id,
                client_id,
                start_at,
                duration_min,
                service,
                price_expected,
                deposit,
                notes,
                reminder,
            )
            .await?
            .ok_or(AppError::AppointmentNotFound)
    }

    pub async fn delete<'e, E>(
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
            Err(AppError::AppointmentNotFound)
        }
    }

    // --- TRANSIÇÃO DE STATUS ---

    /// Troca simples de status. `completed` não passa por aqui: conclusão
    /// carrega valor final e consumo, e tem a própria transação abaixo.
    pub async fn transition<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
        new_status: AppointmentStatus,
    ) -> Result<Appointment, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let appointment = self
            .repo
            .get_for_update(&mut *tx, tenant_id, id)
            .await?
            .ok_or(AppError::AppointmentNotFound)?;

        if new_status == AppointmentStatus::Completed
            || !appointment.status.can_transition_to(new_status)
        {
            return Err(AppError::InvalidStatusTransition {
                from: appointment.status,
                to: new_status,
            });
        }

        let updated = self.repo.update_status(&mut *tx, tenant_id, id, new_status).await?;
        tx.commit().await?;

        tracing::info!(
            "Atendimento {} transicionou {} -> {}",
            id,
            appointment.status,
            new_status
        );
        Ok(updated)
    }

    // --- CONCLUSÃO (status + valor final + baixa de materiais) ---

    /// Conclui o atendimento em uma única transação: ou tudo entra (status,
    /// valor final, consumo e baixas) ou nada entra.
    pub async fn complete<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        id: Uuid,
        price_final: Decimal,
        entries: &[ConsumptionEntry],
    ) -> Result<Appointment, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let consumptions = sanitize_consumptions(entries);

        let mut tx = executor.begin().await?;

        // 1. Carrega e trava o atendimento; valida a transição
        let appointment = self
            .repo
            .get_for_update(&mut *tx, tenant_id, id)
            .await?
            .ok_or(AppError::AppointmentNotFound)?;

        if !appointment.status.can_transition_to(AppointmentStatus::Completed) {
            return Err(AppError::InvalidStatusTransition {
                from: appointment.status,
                to: AppointmentStatus::Completed,
            });
        }

        // 2. Valida TODO o consumo antes de qualquer mutação.
        //    O lock de linha serializa conclusões concorrentes no mesmo material.
        let mut validated = Vec::with_capacity(consumptions.len());
        for (material_id, qty_used) in consumptions {
            let material = self
                .materials_repo
                .get_for_update(&mut *tx, tenant_id, material_id)
                .await?
                .ok_or(AppError::MaterialNotFound)?;

            if qty_used > material.qty_current {
                return Err(AppError::InsufficientStock {
                    material: material.name,
                    available: material.qty_current,
                    requested: qty_used,
                });
            }
            validated.push((material, qty_used));
        }

        // 3. Status + valor final
        let completed = self
            .repo
            .mark_completed(&mut *tx, tenant_id, id, price_final)
            .await?;

        // 4. Livro-razão + baixa atômica por material
        let stock_notifications = self
            .settings_repo
            .get_profile(&mut *tx, tenant_id)
            .await?
            .map(|p| p.stock_notifications)
            .unwrap_or(true);

        for (material, qty_used) in validated {
            self.materials_repo
                .record_consumption(&mut *tx, tenant_id, id, material.id, qty_used)
                .await?;

            let was_low = material.is_low_stock();
            let new_qty = deduct_clamped(material.qty_current, qty_used);

            let updated = self
                .materials_repo
                .decrement_stock(&mut *tx, tenant_id, material.id, qty_used)
                .await?;

            // Alerta apenas quando a baixa cruza o limite
            if !was_low && updated.is_low_stock() {
                tracing::warn!(
                    "Estoque baixo: {} ficou com {} (mínimo {})",
                    updated.name,
                    new_qty,
                    updated.min_qty
                );
                if stock_notifications {
                    self.notifications_repo
                        .insert(
                            &mut *tx,
                            tenant_id,
                            NotificationType::LowStock,
                            &format!("Estoque baixo: {}", updated.name),
                            Some(&format!(
                                "Restam {} {} (mínimo {}).",
                                updated.qty_current, updated.unit, updated.min_qty
                            )),
                        )
                        .await?;
                }
            }
        }

        tx.commit().await?;

        tracing::info!("Atendimento {} concluído (valor final {})", id, price_final);
        Ok(completed)
    }

    pub async fn get_consumption<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        appointment_id: Uuid,
    ) -> Result<Vec<MaterialConsumption>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.materials_repo
            .get_consumption_for_appointment(executor, tenant_id, appointment_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(material_id: Option<Uuid>, qty_used: Decimal) -> ConsumptionEntry {
        ConsumptionEntry { material_id, qty_used }
    }

    #[test]
    fn descarta_linhas_sem_material_ou_quantidade() {
        let valid_a = Uuid::new_v4();
        let valid_b = Uuid::new_v4();
        let entries = vec![
            entry(Some(valid_a), dec!(2)),
            entry(None, dec!(3)),              // sem material selecionado
            entry(Some(Uuid::new_v4()), dec!(0)),  // quantidade zero
            entry(Some(Uuid::new_v4()), dec!(-1)), // quantidade negativa
            entry(Some(valid_b), dec!(0.5)),
        ];

        let sanitized = sanitize_consumptions(&entries);
        assert_eq!(sanitized, vec![(valid_a, dec!(2)), (valid_b, dec!(0.5))]);
    }

    #[test]
    fn lista_vazia_continua_vazia() {
        assert!(sanitize_consumptions(&[]).is_empty());
        // Só linhas inválidas também vira lista vazia (conclusão sem consumo)
        let only_invalid = vec![entry(None, dec!(5)), entry(Some(Uuid::new_v4()), dec!(0))];
        assert!(sanitize_consumptions(&only_invalid).is_empty());
    }
}
