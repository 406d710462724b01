// src/models/packages.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "package_sale_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageSaleStatus {
    Active,
    Completed,
    Cancelled,
}

/// Pacote vendido para um evento. O saldo deve estar quitado 10 dias
/// antes de `event_date`; é essa data deslocada que a previsão usa.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageSale {
    pub id: Uuid,

    pub client_id: Uuid,
    pub package_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2026-08-01")]
    pub sale_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2026-11-20")]
    pub event_date: NaiveDate,

    #[schema(example = "2000.00")]
    pub total_amount: Decimal,
    #[schema(example = "500.00")]
    pub paid_amount: Decimal,

    pub status: PackageSaleStatus,

    pub notes: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
}
