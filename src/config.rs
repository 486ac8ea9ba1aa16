// src/config.rs

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        AppointmentsRepository, ClientsRepository, FinanceRepository, MaterialsRepository,
        NotificationsRepository, ReportsRepository, SettingsRepository,
    },
    services::{
        AppointmentService, ClientService, FinanceService, InventoryService, ReportsService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub appointment_service: AppointmentService,
    pub inventory_service: InventoryService,
    pub client_service: ClientService,
    pub finance_service: FinanceService,
    pub reports_service: ReportsService,
    pub settings_repo: SettingsRepository,
    pub notifications_repo: NotificationsRepository,
}

impl AppState {
    // Carrega as configurações, conecta ao banco e monta os services
    pub async fn new() -> anyhow::Result<Self> {
        // Em produção as variáveis vêm do ambiente; o .env é opcional
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;
        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, jwt_secret))
    }

    /// Monta o grafo de repositórios e services sobre uma pool já criada.
    pub fn from_pool(db_pool: PgPool, jwt_secret: String) -> Self {
        // Repositórios
        let appointments_repo = AppointmentsRepository::new(db_pool.clone());
        let materials_repo = MaterialsRepository::new(db_pool.clone());
        let clients_repo = ClientsRepository::new(db_pool.clone());
        let finance_repo = FinanceRepository::new(db_pool.clone());
        let reports_repo = ReportsRepository::new(db_pool.clone());
        let settings_repo = SettingsRepository::new(db_pool.clone());
        let notifications_repo = NotificationsRepository::new(db_pool.clone());

        // Services (regra de negócio)
        let appointment_service = AppointmentService::new(
            appointments_repo,
            materials_repo.clone(),
            clients_repo.clone(),
            notifications_repo.clone(),
            settings_repo.clone(),
        );
        let inventory_service = InventoryService::new(materials_repo);
        let client_service = ClientService::new(clients_repo);
        let finance_service = FinanceService::new(finance_repo);
        let reports_service = ReportsService::new(reports_repo);

        Self {
            db_pool,
            jwt_secret,
            appointment_service,
            inventory_service,
            client_service,
            finance_service,
            reports_service,
            settings_repo,
            notifications_repo,
        }
    }
}
