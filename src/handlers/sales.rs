// src/handlers/sales.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::sales::{PaymentMethod, PaymentStatus, SaleItem, SaleKind},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalePayload {
    pub client_id: Uuid,

    pub appointment_id: Option<Uuid>,

    pub kind: SaleKind,

    #[schema(value_type = String, format = Date, example = "2026-09-01")]
    pub sale_date: NaiveDate,

    #[schema(example = "1000.00")]
    pub total_amount: Decimal,

    #[serde(default)]
    #[schema(example = "0.00")]
    pub discount: Decimal,

    #[schema(example = "1000.00")]
    pub final_amount: Decimal,

    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,

    #[validate(range(min = 1, message = "Número de parcelas deve ser no mínimo 1."))]
    #[schema(example = 3)]
    pub installment_count: i32,

    pub card_fee: Option<Decimal>,

    pub notes: Option<String>,

    /// Itens de venda de produto, só para a baixa de estoque.
    #[serde(default)]
    pub items: Vec<SaleItem>,
}

// POST /api/sales
#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "Sales",
    request_body = CreateSalePayload,
    responses(
        (status = 201, description = "Venda criada com cronograma de parcelas"),
        (status = 400, description = "Parâmetros inválidos"),
        (status = 404, description = "Cliente ou produto não encontrado")
    )
)]
pub async fn create_sale(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let sale = app_state
        .sale_service
        .create_sale(
            &app_state.db_pool,
            payload.client_id,
            payload.appointment_id,
            payload.kind,
            payload.sale_date,
            payload.total_amount,
            payload.discount,
            payload.final_amount,
            payload.payment_method,
            payload.payment_status,
            payload.installment_count,
            payload.card_fee,
            payload.notes.as_deref(),
            &payload.items,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(sale)))
}

// GET /api/sales
#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "Sales",
    responses(
        (status = 200, description = "Vendas mais recentes primeiro")
    )
)]
pub async fn list_sales(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let sales = app_state.sale_service.list_sales().await?;
    Ok((StatusCode::OK, Json(sales)))
}

// GET /api/sales/{id}
#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    tag = "Sales",
    responses(
        (status = 200, description = "Venda com o cronograma de parcelas"),
        (status = 404, description = "Venda não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da venda")
    )
)]
pub async fn get_sale(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state.sale_service.get_sale(id).await?;
    Ok((StatusCode::OK, Json(detail)))
}
