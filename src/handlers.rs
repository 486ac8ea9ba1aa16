// src/handlers.rs

use rust_decimal::Decimal;
use validator::ValidationError;

pub mod appointments;
pub mod clients;
pub mod expenses;
pub mod materials;
pub mod notifications;
pub mod reports;
pub mod settings;

// ---
// Validação Customizada (compartilhada pelos payloads com Decimal)
// ---
pub(crate) fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}
