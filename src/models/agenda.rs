// src/models/agenda.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "appointment_kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentKind {
    Standard,      // Atendimento comum
    SocialService, // Serviço social (entra na previsão de recebíveis)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "appointment_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Scheduled,  // Agendado
    InProgress, // Em atendimento
    Completed,  // Concluído
    Cancelled,  // Cancelado (terminal: sai da previsão e da checagem de conflito)
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,

    pub client_id: Uuid,
    pub collaborator_id: Uuid,

    pub kind: AppointmentKind,
    pub status: AppointmentStatus,

    #[schema(value_type = String, format = Date, example = "2026-09-15")]
    pub appointment_date: NaiveDate,
    #[schema(value_type = String, example = "14:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "16:00:00")]
    pub end_time: NaiveTime,

    #[schema(example = "150.00")]
    pub total_amount: Decimal,
    #[schema(example = "50.00")]
    pub paid_amount: Decimal,

    pub notes: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Atendimento com os nomes do cliente e do colaborador, para listagens.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDetail {
    pub id: Uuid,
    pub client_id: Uuid,
    pub client_name: String,
    pub collaborator_id: Uuid,
    pub collaborator_name: String,
    pub kind: AppointmentKind,
    pub status: AppointmentStatus,
    #[schema(value_type = String, format = Date)]
    pub appointment_date: NaiveDate,
    #[schema(value_type = String)]
    pub start_time: NaiveTime,
    #[schema(value_type = String)]
    pub end_time: NaiveTime,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub notes: Option<String>,
}

/// Intervalo já ocupado na agenda de um colaborador em uma data.
/// É o conjunto de comparação do guard de conflito; atendimentos
/// cancelados nunca entram aqui.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct BusySlot {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Serviço do catálogo, com o que a agenda precisa: preço e duração.
#[derive(Debug, Clone, FromRow)]
pub struct ServiceInfo {
    pub id: Uuid,
    pub price: Decimal,
    pub duration_minutes: i32,
}
