// src/handlers/dashboard.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    config::AppState,
    models::forecast::{ForecastPeriod, ForecastReport},
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForecastQuery {
    #[serde(default)]
    pub period: ForecastPeriod,

    /// Obrigatório apenas quando `period=custom`.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

// GET /api/dashboard/income-forecast
#[utoipa::path(
    get,
    path = "/api/dashboard/income-forecast",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Previsão de entrada para o período", body = ForecastReport),
        (status = 400, description = "Período ou datas inválidos")
    ),
    params(
        ("period" = Option<String>, Query, description = "7d | 15d | 30d | custom (padrão: 7d)"),
        ("startDate" = Option<String>, Query, description = "Início da janela custom (YYYY-MM-DD)"),
        ("endDate" = Option<String>, Query, description = "Fim da janela custom (YYYY-MM-DD)")
    )
)]
pub async fn income_forecast(
    State(app_state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Result<impl IntoResponse, AppError> {
    // "Hoje" é resolvido aqui e injetado no motor, que nunca lê o relógio.
    let today = Utc::now().date_naive();

    let report = app_state
        .forecast_service
        .income_forecast(
            &app_state.db_pool,
            query.period,
            query.start_date,
            query.end_date,
            today,
        )
        .await?;

    Ok((StatusCode::OK, Json(report)))
}
