// src/models/reports.rs

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::common::error::AppError;

// --- Filtro de Período ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Custom,
}

// Janela inclusiva [from, to] usada para filtrar agendamentos e despesas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

const END_OF_DAY: (u32, u32, u32) = (23, 59, 59);

fn day_bounds(date: NaiveDate) -> DateRange {
    let (h, m, s) = END_OF_DAY;
    let from = date.and_time(NaiveTime::MIN);
    // 23:59:59 sempre existe; o fallback nunca dispara
    let to = date.and_hms_opt(h, m, s).unwrap_or(from);
    DateRange {
        from: Utc.from_utc_datetime(&from),
        to: Utc.from_utc_datetime(&to),
    }
}

fn span_bounds(first_day: NaiveDate, last_day: NaiveDate) -> DateRange {
    DateRange {
        from: day_bounds(first_day).from,
        to: day_bounds(last_day).to,
    }
}

/// Resolve o seletor de período em uma janela concreta, relativa ao `now`
/// do momento da chamada (nada é recalculado reativamente depois).
/// A semana começa na segunda-feira.
pub fn resolve_range(
    period: Period,
    now: DateTime<Utc>,
    custom: Option<(NaiveDate, NaiveDate)>,
) -> Result<DateRange, AppError> {
    let today = now.date_naive();

    let range = match period {
        Period::Daily => day_bounds(today),

        Period::Weekly => {
            let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
            let sunday = monday + Duration::days(6);
            span_bounds(monday, sunday)
        }

        Period::Monthly => {
            let first = today.with_day(1).unwrap_or(today);
            let next_month = if today.month() == 12 {
                NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
            }
            .unwrap_or(first);
            span_bounds(first, next_month - Duration::days(1))
        }

        Period::Yearly => {
            let first = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
            let last = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
            span_bounds(first, last)
        }

        Period::Custom => {
            // Período custom exige o par de datas explícito
            let (from, to) = custom.ok_or_else(|| {
                let mut errors = validator::ValidationErrors::new();
                let mut err = validator::ValidationError::new("required");
                err.message =
                    Some("Período custom exige os campos 'from' e 'to'.".into());
                errors.add("from", err);
                AppError::ValidationError(errors)
            })?;
            span_bounds(from, to)
        }
    };

    Ok(range)
}

// --- Resumo do Período (Cards do Dashboard/Financeiro) ---

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub range: DateRange,
    // Soma de price_final dos atendimentos concluídos na janela
    #[schema(example = "1850.00")]
    pub revenue: Decimal,
    #[schema(example = "420.00")]
    pub expense_total: Decimal,
    #[schema(example = "1430.00")]
    pub profit: Decimal,
    pub appointments_total: i64,
    pub appointments_completed: i64,
    // Soma de duration_min dos concluídos
    pub minutes_worked: i64,
    pub low_stock_count: i64,
}

// Gráfico de faturamento por dia
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenueByDay {
    pub day: NaiveDate,
    pub total: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 30, 0).unwrap()
    }

    #[test]
    fn diario_cobre_o_dia_inteiro() {
        let range = resolve_range(Period::Daily, at(2025, 3, 14, 15), None).unwrap();
        assert_eq!(range.from.to_rfc3339(), "2025-03-14T00:00:00+00:00");
        assert_eq!(range.to.to_rfc3339(), "2025-03-14T23:59:59+00:00");
    }

    #[test]
    fn semana_vai_de_segunda_a_domingo() {
        // Independente do dia em que "hoje" cai
        for day in 10..=16 {
            let range = resolve_range(Period::Weekly, at(2025, 3, day, 9), None).unwrap();
            assert_eq!(range.from.weekday(), Weekday::Mon);
            assert_eq!(range.to.weekday(), Weekday::Sun);
            assert_eq!(range.from.date_naive(), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
            assert_eq!(range.to.date_naive(), NaiveDate::from_ymd_opt(2025, 3, 16).unwrap());
        }
    }

    #[test]
    fn domingo_pertence_a_semana_que_comecou_na_segunda_anterior() {
        // 16/03/2025 é domingo: a semana dele começou dia 10
        let range = resolve_range(Period::Weekly, at(2025, 3, 16, 22), None).unwrap();
        assert_eq!(range.from.date_naive(), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
    }

    #[test]
    fn mensal_respeita_o_ultimo_dia_do_mes() {
        let fev = resolve_range(Period::Monthly, at(2024, 2, 10, 12), None).unwrap();
        assert_eq!(fev.from.date_naive(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        // 2024 é bissexto
        assert_eq!(fev.to.date_naive(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let dez = resolve_range(Period::Monthly, at(2025, 12, 5, 12), None).unwrap();
        assert_eq!(dez.to.date_naive(), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn anual_cobre_o_ano_civil() {
        let range = resolve_range(Period::Yearly, at(2025, 7, 20, 8), None).unwrap();
        assert_eq!(range.from.date_naive(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(range.to.date_naive(), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn custom_usa_o_par_informado() {
        let from = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        let range =
            resolve_range(Period::Custom, at(2025, 6, 1, 10), Some((from, to))).unwrap();
        assert_eq!(range.from.date_naive(), from);
        assert_eq!(range.to.date_naive(), to);
        assert_eq!(range.to.time(), NaiveTime::from_hms_opt(23, 59, 59).unwrap());
    }

    #[test]
    fn custom_sem_datas_e_erro_de_validacao() {
        let result = resolve_range(Period::Custom, at(2025, 6, 1, 10), None);
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
