// src/services/package_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, db::PackageSalesRepository, models::packages::PackageSale};

#[derive(Clone)]
pub struct PackageSaleService {
    repo: PackageSalesRepository,
}

impl PackageSaleService {
    pub fn new(repo: PackageSalesRepository) -> Self {
        Self { repo }
    }

    /// Registra a venda de um pacote para um evento. O saldo deste registro
    /// alimenta a previsão de recebíveis com vencimento em `event_date - 10`.
    pub async fn create_package_sale<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        package_id: Uuid,
        sale_date: NaiveDate,
        event_date: NaiveDate,
        total_amount: Decimal,
        paid_amount: Decimal,
        notes: Option<&str>,
    ) -> Result<PackageSale, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        // Invariante das obrigações: nunca entra registro com pago > total.
        if paid_amount > total_amount {
            return Err(AppError::InvalidArgument(
                "Valor pago não pode exceder o valor total.".to_string(),
            ));
        }
        if total_amount < Decimal::ZERO || paid_amount < Decimal::ZERO {
            return Err(AppError::InvalidArgument(
                "Valores não podem ser negativos.".to_string(),
            ));
        }

        let mut tx = executor.begin().await?;

        if !self.repo.client_exists(&mut *tx, client_id).await? {
            return Err(AppError::NotFound("Cliente".to_string()));
        }
        if !self.repo.package_exists(&mut *tx, package_id).await? {
            return Err(AppError::NotFound("Pacote".to_string()));
        }

        let package_sale = self
            .repo
            .create(
                &mut *tx,
                client_id,
                package_id,
                sale_date,
                event_date,
                total_amount,
                paid_amount,
                notes,
            )
            .await?;

        tx.commit().await?;

        Ok(package_sale)
    }

    pub async fn list_package_sales(&self) -> Result<Vec<PackageSale>, AppError> {
        self.repo.find_all().await
    }
}
