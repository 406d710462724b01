// src/db/forecast_repo.rs
//
// Leituras da previsão de entrada. Só devolve linhas cruas já filtradas
// por data e status; o filtro de saldo em aberto é do extrator, na camada
// de serviço.

use chrono::NaiveDate;
use sqlx::{Executor, Postgres};

use crate::{
    common::error::AppError,
    models::forecast::{PackageReceivable, ServiceReceivable},
};

#[derive(Clone)]
pub struct ForecastRepository;

impl ForecastRepository {
    pub fn new() -> Self {
        Self
    }

    /// Atendimentos de serviço social com data dentro da janela (inclusiva).
    /// Cancelados ficam de fora; os demais status seguem na previsão.
    pub async fn service_receivables_between<'e, E>(
        &self,
        executor: E,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<ServiceReceivable>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, ServiceReceivable>(
            r#"
            SELECT a.id, c.name AS client_name, a.appointment_date,
                   a.total_amount, a.paid_amount
            FROM appointments a
            JOIN clients c ON c.id = a.client_id
            WHERE a.kind = 'SOCIAL_SERVICE'
              AND a.appointment_date BETWEEN $1 AND $2
              AND a.status IN ('SCHEDULED', 'IN_PROGRESS', 'COMPLETED')
            ORDER BY a.appointment_date ASC
            "#,
        )
        .bind(start_date)
        .bind(end_date)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    /// Atendimentos de serviço social com data anterior a `before`
    /// (atrasados, retrocesso ilimitado).
    pub async fn overdue_service_receivables<'e, E>(
        &self,
        executor: E,
        before: NaiveDate,
    ) -> Result<Vec<ServiceReceivable>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, ServiceReceivable>(
            r#"
            SELECT a.id, c.name AS client_name, a.appointment_date,
                   a.total_amount, a.paid_amount
            FROM appointments a
            JOIN clients c ON c.id = a.client_id
            WHERE a.kind = 'SOCIAL_SERVICE'
              AND a.appointment_date < $1
              AND a.status IN ('SCHEDULED', 'IN_PROGRESS', 'COMPLETED')
            ORDER BY a.appointment_date ASC
            "#,
        )
        .bind(before)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    /// Pacotes ativos com *evento* dentro da faixa (inclusiva). A janela de
    /// evento já vem deslocada pelo prazo de quitação.
    pub async fn package_receivables_by_event<'e, E>(
        &self,
        executor: E,
        event_start: NaiveDate,
        event_end: NaiveDate,
    ) -> Result<Vec<PackageReceivable>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, PackageReceivable>(
            r#"
            SELECT pv.id, c.name AS client_name, p.name AS package_name,
                   pv.event_date, pv.total_amount, pv.paid_amount
            FROM package_sales pv
            JOIN clients c ON c.id = pv.client_id
            JOIN packages p ON p.id = pv.package_id
            WHERE pv.event_date BETWEEN $1 AND $2
              AND pv.status = 'ACTIVE'
            ORDER BY pv.event_date ASC
            "#,
        )
        .bind(event_start)
        .bind(event_end)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    /// Pacotes ativos com evento anterior a `event_before` (prazo de
    /// quitação já estourado).
    pub async fn overdue_package_receivables<'e, E>(
        &self,
        executor: E,
        event_before: NaiveDate,
    ) -> Result<Vec<PackageReceivable>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, PackageReceivable>(
            r#"
            SELECT pv.id, c.name AS client_name, p.name AS package_name,
                   pv.event_date, pv.total_amount, pv.paid_amount
            FROM package_sales pv
            JOIN clients c ON c.id = pv.client_id
            JOIN packages p ON p.id = pv.package_id
            WHERE pv.event_date < $1
              AND pv.status = 'ACTIVE'
            ORDER BY pv.event_date ASC
            "#,
        )
        .bind(event_before)
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }
}

impl Default for ForecastRepository {
    fn default() -> Self {
        Self::new()
    }
}
