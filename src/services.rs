// src/services.rs

pub mod appointment_service;
pub use appointment_service::AppointmentService;

pub mod inventory_service;
pub use inventory_service::InventoryService;

pub mod client_service;
pub use client_service::ClientService;

pub mod finance_service;
pub use finance_service::FinanceService;

pub mod reports_service;
pub use reports_service::ReportsService;
