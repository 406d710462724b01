// src/db/package_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::packages::PackageSale};

#[derive(Clone)]
pub struct PackageSalesRepository {
    pool: PgPool,
}

impl PackageSalesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn client_exists<'e, E>(&self, executor: E, client_id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM clients WHERE id = $1)",
        )
        .bind(client_id)
        .fetch_one(executor)
        .await?;

        Ok(exists)
    }

    pub async fn package_exists<'e, E>(
        &self,
        executor: E,
        package_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM packages WHERE id = $1 AND active)",
        )
        .bind(package_id)
        .fetch_one(executor)
        .await?;

        Ok(exists)
    }

    pub async fn create<'e, E>(
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
        E: Executor<'e, Database = Postgres>,
    {
        let package_sale = sqlx::query_as::<_, PackageSale>(
            r#"
            INSERT INTO package_sales (
                client_id, package_id, sale_date, event_date,
                total_amount, paid_amount, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(client_id)
        .bind(package_id)
        .bind(sale_date)
        .bind(event_date)
        .bind(total_amount)
        .bind(paid_amount)
        .bind(notes)
        .fetch_one(executor)
        .await?;

        Ok(package_sale)
    }

    pub async fn find_all(&self) -> Result<Vec<PackageSale>, AppError> {
        let package_sales = sqlx::query_as::<_, PackageSale>(
            "SELECT * FROM package_sales ORDER BY event_date ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(package_sales)
    }
}
