// src/models/sales.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "sale_kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleKind {
    Product, // Venda de produto (baixa estoque na mesma transação)
    Service, // Venda avulsa de serviço
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Pix,
    DebitCard,
    CreditCard,
    Transfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "installment_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstallmentStatus {
    Pending,
    Paid,
    Overdue,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,

    pub client_id: Uuid,
    pub appointment_id: Option<Uuid>,

    pub kind: SaleKind,

    #[schema(value_type = String, format = Date, example = "2026-09-01")]
    pub sale_date: NaiveDate,

    #[schema(example = "1000.00")]
    pub total_amount: Decimal,
    #[schema(example = "0.00")]
    pub discount: Decimal,
    #[schema(example = "1000.00")]
    pub final_amount: Decimal,

    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,

    #[schema(example = 3)]
    pub installment_count: i32,
    pub card_fee: Option<Decimal>,

    pub notes: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub id: Uuid,
    pub sale_id: Uuid,

    #[schema(example = 1)]
    pub number: i32,

    #[schema(example = "333.33")]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2026-10-01")]
    pub due_date: NaiveDate,

    pub status: InstallmentStatus,
}

/// Parcela recém-gerada, ainda sem id: é o que o gerador de cronograma
/// produz e o repositório grava dentro da transação da venda. Nunca sai
/// na API; o que o cliente vê é `Installment`.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallmentDraft {
    pub number: i32,
    pub amount: Decimal,
    pub due_date: NaiveDate,
}

/// Item de uma venda de produto. Só serve para a baixa de estoque;
/// o esquema atual não persiste a composição da venda.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub product_id: Uuid,

    #[schema(example = 2)]
    pub quantity: i32,
}

/// Venda com o cronograma de parcelas, para consulta individual.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetail {
    pub sale: Sale,
    pub installments: Vec<Installment>,
}
