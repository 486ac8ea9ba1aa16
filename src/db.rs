pub mod appointments_repo;
pub use appointments_repo::AppointmentsRepository;
pub mod materials_repo;
pub use materials_repo::MaterialsRepository;
pub mod clients_repo;
pub use clients_repo::ClientsRepository;
pub mod finance_repo;
pub use finance_repo::FinanceRepository;
pub mod reports_repo;
pub use reports_repo::ReportsRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;
pub mod notifications_repo;
pub use notifications_repo::NotificationsRepository;
