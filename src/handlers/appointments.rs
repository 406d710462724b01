// src/handlers/appointments.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::agenda::{AppointmentKind, AppointmentStatus},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentPayload {
    pub client_id: Uuid,
    pub collaborator_id: Uuid,

    #[serde(default = "default_kind")]
    pub kind: AppointmentKind,

    #[schema(value_type = String, format = Date, example = "2026-09-15")]
    pub appointment_date: NaiveDate,

    #[schema(value_type = String, example = "14:00:00")]
    pub start_time: NaiveTime,

    /// Quando omitido, é derivado da soma das durações dos serviços.
    #[schema(value_type = String, example = "16:00:00")]
    pub end_time: Option<NaiveTime>,

    #[serde(default = "default_status")]
    pub status: AppointmentStatus,

    /// Quando omitido, soma dos preços dos serviços selecionados.
    pub total_amount: Option<Decimal>,

    #[serde(default)]
    pub paid_amount: Decimal,

    pub notes: Option<String>,

    #[validate(length(min = 1, message = "Pelo menos um serviço deve ser selecionado."))]
    pub service_ids: Vec<Uuid>,
}

fn default_kind() -> AppointmentKind {
    AppointmentKind::Standard
}

fn default_status() -> AppointmentStatus {
    AppointmentStatus::Scheduled
}

// POST /api/appointments
#[utoipa::path(
    post,
    path = "/api/appointments",
    tag = "Appointments",
    request_body = CreateAppointmentPayload,
    responses(
        (status = 201, description = "Atendimento agendado"),
        (status = 404, description = "Cliente, colaborador ou serviço não encontrado"),
        (status = 409, description = "Conflito de horário com outro atendimento do colaborador")
    )
)]
pub async fn create_appointment(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateAppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let appointment = app_state
        .agenda_service
        .create_appointment(
            &app_state.db_pool,
            payload.client_id,
            payload.collaborator_id,
            payload.kind,
            payload.appointment_date,
            payload.start_time,
            payload.end_time,
            payload.status,
            payload.total_amount,
            payload.paid_amount,
            payload.notes.as_deref(),
            &payload.service_ids,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

// GET /api/appointments
#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = "Appointments",
    responses(
        (status = 200, description = "Atendimentos mais recentes primeiro")
    )
)]
pub async fn list_appointments(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let appointments = app_state.agenda_service.list_appointments().await?;
    Ok((StatusCode::OK, Json(appointments)))
}

// GET /api/appointments/{id}
#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    tag = "Appointments",
    responses(
        (status = 200, description = "Detalhes do atendimento"),
        (status = 404, description = "Atendimento não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do atendimento")
    )
)]
pub async fn get_appointment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = app_state.agenda_service.get_appointment(id).await?;
    Ok((StatusCode::OK, Json(appointment)))
}

// DELETE /api/appointments/{id} (cancelamento lógico)
#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    tag = "Appointments",
    responses(
        (status = 200, description = "Atendimento cancelado"),
        (status = 404, description = "Atendimento não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "ID do atendimento")
    )
)]
pub async fn cancel_appointment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = app_state
        .agenda_service
        .cancel_appointment(&app_state.db_pool, id)
        .await?;

    Ok((StatusCode::OK, Json(appointment)))
}
