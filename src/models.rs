pub mod auth;
pub mod appointments;
pub mod clients;
pub mod finance;
pub mod materials;
pub mod notifications;
pub mod reports;
pub mod settings;
