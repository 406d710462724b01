// src/handlers/package_sales.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{common::error::AppError, config::AppState};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePackageSalePayload {
    pub client_id: Uuid,

    pub package_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2026-09-01")]
    pub sale_date: NaiveDate,

    /// Data do evento; o pagamento do saldo vence 10 dias antes.
    #[schema(value_type = String, format = Date, example = "2026-10-15")]
    pub event_date: NaiveDate,

    #[schema(example = "2000.00")]
    pub total_amount: Decimal,

    #[serde(default)]
    #[schema(example = "500.00")]
    pub paid_amount: Decimal,

    pub notes: Option<String>,
}

// POST /api/package-sales
#[utoipa::path(
    post,
    path = "/api/package-sales",
    tag = "Packages",
    request_body = CreatePackageSalePayload,
    responses(
        (status = 201, description = "Venda de pacote registrada"),
        (status = 400, description = "Parâmetros inválidos"),
        (status = 404, description = "Cliente ou pacote não encontrado")
    )
)]
pub async fn create_package_sale(
    State(app_state): State<AppState>,
    Json(payload): Json<CreatePackageSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let package_sale = app_state
        .package_service
        .create_package_sale(
            &app_state.db_pool,
            payload.client_id,
            payload.package_id,
            payload.sale_date,
            payload.event_date,
            payload.total_amount,
            payload.paid_amount,
            payload.notes.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(package_sale)))
}

// GET /api/package-sales
#[utoipa::path(
    get,
    path = "/api/package-sales",
    tag = "Packages",
    responses(
        (status = 200, description = "Vendas de pacote por data de evento")
    )
)]
pub async fn list_package_sales(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let package_sales = app_state.package_service.list_package_sales().await?;
    Ok((StatusCode::OK, Json(package_sales)))
}
