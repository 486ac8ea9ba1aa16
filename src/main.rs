// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_middleware;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    let app_state = AppState::new().await?;

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!().run(&app_state.db_pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let app = build_router(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

// Todas as rotas da aplicação, com o estado já amarrado.
fn build_router(app_state: AppState) -> Router {
    let appointment_routes = Router::new()
        .route(
            "/",
            post(handlers::appointments::create_appointment)
                .get(handlers::appointments::get_agenda),
        )
        .route("/today", get(handlers::appointments::get_today))
        .route(
            "/{id}",
            get(handlers::appointments::get_appointment)
                .put(handlers::appointments::update_appointment)
                .delete(handlers::appointments::delete_appointment),
        )
        .route("/{id}/status", patch(handlers::appointments::update_status))
        .route(
            "/{id}/complete",
            post(handlers::appointments::complete_appointment),
        )
        .route(
            "/{id}/consumption",
            get(handlers::appointments::get_consumption),
        );

    let material_routes = Router::new()
        .route(
            "/",
            post(handlers::materials::create_material).get(handlers::materials::get_inventory),
        )
        .route("/low-stock", get(handlers::materials::get_low_stock))
        .route(
            "/{id}",
            get(handlers::materials::get_material)
                .put(handlers::materials::update_material)
                .delete(handlers::materials::delete_material),
        )
        .route("/{id}/stock", patch(handlers::materials::adjust_stock));

    let client_routes = Router::new()
        .route(
            "/",
            post(handlers::clients::create_client).get(handlers::clients::get_clients),
        )
        .route(
            "/{id}",
            get(handlers::clients::get_client)
                .put(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        )
        .route("/{id}/archive", patch(handlers::clients::set_archived));

    let expense_routes = Router::new()
        .route(
            "/",
            post(handlers::expenses::create_expense).get(handlers::expenses::get_expenses),
        )
        .route(
            "/{id}",
            put(handlers::expenses::update_expense).delete(handlers::expenses::delete_expense),
        );

    let report_routes = Router::new()
        .route("/summary", get(handlers::reports::get_summary))
        .route("/revenue-by-day", get(handlers::reports::get_revenue_by_day));

    let settings_routes = Router::new()
        .route(
            "/profile",
            get(handlers::settings::get_profile).put(handlers::settings::upsert_profile),
        )
        .route(
            "/business-hours",
            get(handlers::settings::get_business_hours)
                .put(handlers::settings::upsert_business_hours),
        );

    let notification_routes = Router::new()
        .route("/", get(handlers::notifications::get_notifications))
        .route("/{id}/read", patch(handlers::notifications::mark_read));

    // Rotas protegidas: tudo exige Bearer token (o X-Tenant-ID é extraído
    // por handler, via TenantContext)
    let protected = Router::new()
        .nest("/api/appointments", appointment_routes)
        .nest("/api/materials", material_routes)
        .nest("/api/clients", client_routes)
        .nest("/api/expenses", expense_routes)
        .nest("/api/reports", report_routes)
        .nest("/api/settings", settings_routes)
        .nest("/api/notifications", notification_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    // Monta o router completo (todos os handlers registrados) sobre uma
    // pool preguiçosa, sem precisar de banco vivo.
    #[tokio::test]
    async fn todas_as_rotas_montam() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/studio")
            .unwrap();
        let state = AppState::from_pool(pool, "segredo-de-teste".to_string());
        let _app = build_router(state);
    }
}
