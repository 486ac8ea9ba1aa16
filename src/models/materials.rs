// src/models/materials.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "material_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    Needles,
    Ink,
    Tips,
    Gloves,
    Paper,
    Film,
    Cleaning,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "unit_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Un,
    Ml,
    G,
    Box,
    Pack,
}

impl std::fmt::Display for UnitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UnitType::Un => "un",
            UnitType::Ml => "ml",
            UnitType::G => "g",
            UnitType::Box => "box",
            UnitType::Pack => "pack",
        };
        write!(f, "{s}")
    }
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: Uuid,
    #[schema(ignore)]
    pub tenant_id: Uuid,
    #[schema(example = "Agulha RL 07")]
    pub name: String,
    pub category: MaterialCategory,
    pub unit: UnitType,
    // Nunca negativo: qualquer baixa é travada em zero no banco
    #[schema(example = "10.0")]
    pub qty_current: Decimal,
    #[schema(example = "5.0")]
    pub min_qty: Decimal,
    #[schema(example = "3.50")]
    pub unit_cost: Decimal,
    pub supplier: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Material {
    /// Estoque baixo = saldo menor ou igual ao mínimo (inclusive).
    /// Sempre recalculado na leitura, nunca armazenado.
    pub fn is_low_stock(&self) -> bool {
        self.qty_current <= self.min_qty
    }
}

/// Baixa travada em zero. Espelha o `GREATEST(0, qty_current - $n)` que o
/// banco aplica; usada para decidir o alerta de estoque antes da gravação.
pub fn deduct_clamped(current: Decimal, amount: Decimal) -> Decimal {
    (current - amount).max(Decimal::ZERO)
}

// Material com o alerta de estoque já calculado, para a listagem.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialWithAlert {
    #[serde(flatten)]
    pub material: Material,
    pub low_stock: bool,
}

impl From<Material> for MaterialWithAlert {
    fn from(material: Material) -> Self {
        let low_stock = material.is_low_stock();
        Self { material, low_stock }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn material(qty_current: Decimal, min_qty: Decimal) -> Material {
        Material {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            name: "Agulha RL 07".to_string(),
            category: MaterialCategory::Needles,
            unit: UnitType::Un,
            qty_current,
            min_qty,
            unit_cost: dec!(3.5),
            supplier: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn baixa_nunca_deixa_saldo_negativo() {
        assert_eq!(deduct_clamped(dec!(10), dec!(4)), dec!(6));
        assert_eq!(deduct_clamped(dec!(10), dec!(10)), dec!(0));
        // Consumo maior que o saldo trava em zero, não dá erro
        assert_eq!(deduct_clamped(dec!(10), dec!(15)), dec!(0));
        assert_eq!(deduct_clamped(dec!(0), dec!(1)), dec!(0));
    }

    #[test]
    fn estoque_baixo_e_inclusivo_no_limite() {
        assert!(!material(dec!(6), dec!(5)).is_low_stock());
        assert!(material(dec!(5), dec!(5)).is_low_stock());
        assert!(material(dec!(3), dec!(5)).is_low_stock());
    }

    #[test]
    fn alerta_acompanha_baixas_sucessivas() {
        // Cenário: saldo 10, mínimo 5. Consome 4 -> 6, sem alerta.
        // Consome mais 3 -> 3, com alerta.
        let mut m = material(dec!(10), dec!(5));

        m.qty_current = deduct_clamped(m.qty_current, dec!(4));
        assert_eq!(m.qty_current, dec!(6));
        assert!(!m.is_low_stock());

        m.qty_current = deduct_clamped(m.qty_current, dec!(3));
        assert_eq!(m.qty_current, dec!(3));
        assert!(m.is_low_stock());
    }

    #[test]
    fn listagem_carrega_o_alerta_calculado() {
        let with_alert = MaterialWithAlert::from(material(dec!(2), dec!(5)));
        assert!(with_alert.low_stock);

        let ok = MaterialWithAlert::from(material(dec!(9), dec!(5)));
        assert!(!ok.low_stock);
    }
}
