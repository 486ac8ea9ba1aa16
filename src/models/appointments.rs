// src/models/appointments.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::clients::Client;

// --- Enums ---

// Ciclo de vida do atendimento. `Completed` e `Cancelled` são terminais.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "appointment_status", rename_all = "snake_case")] // Banco
#[serde(rename_all = "snake_case")] // JSON
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Tabela de transições permitidas. A UI só mostra botões legais,
    /// mas a regra vale aqui no servidor para qualquer chamador.
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        match (self, next) {
            (Scheduled, Confirmed) => true,
            (Scheduled, InProgress) | (Confirmed, InProgress) => true,
            // Único caminho de entrada em `completed`
            (InProgress, Completed) => true,
            // Cancelamento a partir de qualquer estado não-terminal
            (Scheduled, Cancelled) | (Confirmed, Cancelled) | (InProgress, Cancelled) => true,
            _ => false,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::InProgress => "in_progress",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    #[schema(ignore)]
    pub tenant_id: Uuid,
    // Nulo = cliente de "walk-in", sem cadastro
    pub client_id: Option<Uuid>,
    pub start_at: DateTime<Utc>,
    #[schema(example = 120)]
    pub duration_min: i32,
    #[schema(example = "Fechamento de braço - sessão 2")]
    pub service: String,
    pub status: AppointmentStatus,
    #[schema(example = "450.00")]
    pub price_expected: Decimal,
    // Fica em 0 até a conclusão do atendimento
    #[schema(example = "0.00")]
    pub price_final: Decimal,
    #[schema(example = "100.00")]
    pub deposit: Decimal,
    pub notes: Option<String>,
    pub reminder: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Atendimento com o cliente embutido, para a agenda.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDetail {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub client: Option<Client>,
}

// Livro-razão de consumo de material: criado apenas pela conclusão
// de atendimento e nunca alterado depois.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialConsumption {
    pub id: Uuid,
    #[schema(ignore)]
    pub tenant_id: Uuid,
    pub appointment_id: Uuid,
    pub material_id: Uuid,
    #[schema(example = "2.5")]
    pub qty_used: Decimal,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::AppointmentStatus::*;

    #[test]
    fn caminho_feliz_do_ciclo_de_vida() {
        assert!(Scheduled.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Completed));
    }

    #[test]
    fn agendado_pode_iniciar_direto() {
        // Pular a confirmação é permitido
        assert!(Scheduled.can_transition_to(InProgress));
    }

    #[test]
    fn concluir_sem_estar_em_andamento_e_rejeitado() {
        assert!(!Scheduled.can_transition_to(Completed));
        assert!(!Confirmed.can_transition_to(Completed));
    }

    #[test]
    fn cancelamento_a_partir_de_qualquer_estado_nao_terminal() {
        assert!(Scheduled.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(InProgress.can_transition_to(Cancelled));
    }

    #[test]
    fn estados_terminais_nao_aceitam_transicao() {
        for next in [Scheduled, Confirmed, InProgress, Completed, Cancelled] {
            assert!(!Completed.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
        assert!(Completed.is_terminal());
        assert!(Cancelled.is_terminal());
    }

    #[test]
    fn nao_ha_transicao_para_o_proprio_estado() {
        for status in [Scheduled, Confirmed, InProgress] {
            assert!(!status.can_transition_to(status));
            assert!(!status.is_terminal());
        }
    }

    #[test]
    fn nao_ha_retrocesso() {
        assert!(!Confirmed.can_transition_to(Scheduled));
        assert!(!InProgress.can_transition_to(Confirmed));
        assert!(!InProgress.can_transition_to(Scheduled));
    }
}
