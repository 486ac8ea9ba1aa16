// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Agenda ---
        handlers::appointments::get_agenda,
        handlers::appointments::get_today,
        handlers::appointments::get_appointment,
        handlers::appointments::create_appointment,
        handlers::appointments::update_appointment,
        handlers::appointments::update_status,
        handlers::appointments::complete_appointment,
        handlers::appointments::get_consumption,
        handlers::appointments::delete_appointment,

        // --- Estoque ---
        handlers::materials::get_inventory,
        handlers::materials::get_low_stock,
        handlers::materials::get_material,
        handlers::materials::create_material,
        handlers::materials::update_material,
        handlers::materials::adjust_stock,
        handlers::materials::delete_material,

        // --- Clientes ---
        handlers::clients::get_clients,
        handlers::clients::get_client,
        handlers::clients::create_client,
        handlers::clients::update_client,
        handlers::clients::set_archived,
        handlers::clients::delete_client,

        // --- Financeiro ---
        handlers::expenses::get_expenses,
        handlers::expenses::create_expense,
        handlers::expenses::update_expense,
        handlers::expenses::delete_expense,

        // --- Relatórios ---
        handlers::reports::get_summary,
        handlers::reports::get_revenue_by_day,

        // --- Configurações ---
        handlers::settings::get_profile,
        handlers::settings::upsert_profile,
        handlers::settings::get_business_hours,
        handlers::settings::upsert_business_hours,

        // --- Notificações ---
        handlers::notifications::get_notifications,
        handlers::notifications::mark_read,
    ),
    components(
        schemas(
            // --- Agenda ---
            models::appointments::AppointmentStatus,
            models::appointments::Appointment,
            models::appointments::AppointmentDetail,
            models::appointments::MaterialConsumption,
            handlers::appointments::AppointmentPayload,
            handlers::appointments::StatusPayload,
            handlers::appointments::CompleteAppointmentPayload,
            services::appointment_service::ConsumptionEntry,

            // --- Estoque ---
            models::materials::MaterialCategory,
            models::materials::UnitType,
            models::materials::Material,
            models::materials::MaterialWithAlert,
            handlers::materials::CreateMaterialPayload,
            handlers::materials::UpdateMaterialPayload,
            handlers::materials::AdjustStockPayload,

            // --- Clientes ---
            models::clients::Client,
            handlers::clients::ClientPayload,
            handlers::clients::ArchivePayload,

            // --- Financeiro ---
            models::finance::ExpenseCategory,
            models::finance::PaymentMethod,
            models::finance::Expense,
            handlers::expenses::ExpensePayload,

            // --- Relatórios ---
            models::reports::Period,
            models::reports::DateRange,
            models::reports::PeriodSummary,
            models::reports::RevenueByDay,

            // --- Configurações ---
            models::settings::Profile,
            models::settings::UpdateProfileRequest,
            models::settings::BusinessHours,
            models::settings::UpsertBusinessHoursRequest,
            handlers::settings::BusinessHoursPayload,

            // --- Notificações ---
            models::notifications::NotificationType,
            models::notifications::Notification,
        )
    ),
    tags(
        (name = "Agenda", description = "Agendamentos e ciclo de vida do atendimento"),
        (name = "Estoque", description = "Materiais, consumo e alertas de estoque"),
        (name = "Clientes", description = "Cadastro de clientes do estúdio"),
        (name = "Financeiro", description = "Despesas do estúdio"),
        (name = "Relatórios", description = "Resumos e gráficos por período"),
        (name = "Configurações", description = "Perfil do estúdio e horário de funcionamento"),
        (name = "Notificações", description = "Alertas internos do estúdio")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // O documento inteiro precisa gerar e serializar, incluindo os schemas
    // com value_type sobrescrito (NaiveTime -> String).
    #[test]
    fn documento_openapi_gera_e_serializa() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).unwrap();

        assert!(json.contains("/api/settings/business-hours"));
        assert!(json.contains("BusinessHours"));
        assert!(json.contains("UpsertBusinessHoursRequest"));
        assert!(json.contains("api_jwt"));
    }
}
