// src/db/sales_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::sales::{
        Installment, InstallmentDraft, PaymentMethod, PaymentStatus, Sale, SaleKind,
    },
};

#[derive(Clone)]
pub struct SalesRepository {
    pool: PgPool,
}

impl SalesRepository {
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

    pub async fn create_sale<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        appointment_id: Option<Uuid>,
        kind: SaleKind,
        sale_date: NaiveDate,
        total_amount: Decimal,
        discount: Decimal,
        final_amount: Decimal,
        payment_method: PaymentMethod,
        payment_status: PaymentStatus,
        installment_count: i32,
        card_fee: Option<Decimal>,
        notes: Option<&str>,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (
                client_id, appointment_id, kind, sale_date,
                total_amount, discount, final_amount,
                payment_method, payment_status, installment_count,
                card_fee, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(client_id)
        .bind(appointment_id)
        .bind(kind)
        .bind(sale_date)
        .bind(total_amount)
        .bind(discount)
        .bind(final_amount)
        .bind(payment_method)
        .bind(payment_status)
        .bind(installment_count)
        .bind(card_fee)
        .bind(notes)
        .fetch_one(executor)
        .await?;

        Ok(sale)
    }

    /// Grava o cronograma gerado para a venda. Roda dentro da transação da
    /// venda; nunca é chamado isoladamente.
    pub async fn create_installments(
        &self,
        tx: &mut sqlx::PgConnection,
        sale_id: Uuid,
        installments: &[InstallmentDraft],
    ) -> Result<(), AppError> {
        for draft in installments {
            sqlx::query(
                r#"
                INSERT INTO installments (sale_id, number, amount, due_date, status)
                VALUES ($1, $2, $3, $4, 'PENDING')
                "#,
            )
            .bind(sale_id)
            .bind(draft.number)
            .bind(draft.amount)
            .bind(draft.due_date)
            .execute(&mut *tx)
            .await?;
        }

        Ok(())
    }

    /// Baixa condicional de estoque: só decrementa se houver quantidade
    /// suficiente, na mesma transação da venda.
    pub async fn decrement_stock(
        &self,
        tx: &mut sqlx::PgConnection,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<(), AppError> {
        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE products
            SET stock_quantity = stock_quantity - $2
            WHERE id = $1 AND stock_quantity >= $2
            RETURNING id
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS (SELECT 1 FROM products WHERE id = $1)",
            )
            .bind(product_id)
            .fetch_one(&mut *tx)
            .await?;

            return Err(if exists {
                AppError::InvalidArgument(format!(
                    "Estoque insuficiente para o produto {product_id}."
                ))
            } else {
                AppError::NotFound("Produto".to_string())
            });
        }

        Ok(())
    }

    pub async fn find_all(&self) -> Result<Vec<Sale>, AppError> {
        let sales = sqlx::query_as::<_, Sale>("SELECT * FROM sales ORDER BY sale_date DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(sales)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Sale>, AppError> {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    pub async fn find_installments(&self, sale_id: Uuid) -> Result<Vec<Installment>, AppError> {
        let installments = sqlx::query_as::<_, Installment>(
            "SELECT * FROM installments WHERE sale_id = $1 ORDER BY number ASC",
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(installments)
    }
}
