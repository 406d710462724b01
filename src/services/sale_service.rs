// src/services/sale_service.rs

use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::SalesRepository,
    models::sales::{
        InstallmentDraft, PaymentMethod, PaymentStatus, Sale, SaleDetail, SaleItem, SaleKind,
    },
};

/// Gera o cronograma de parcelas de uma venda.
///
/// Cada parcela recebe `final_amount / count` truncado em 2 casas; a última
/// absorve a sobra do truncamento, então a soma bate com `final_amount`
/// exatamente, sem depender de tolerância. Truncar (em vez de arredondar
/// para cima) garante que a última parcela nunca fica menor que a base —
/// nem negativa em divisões miúdas como 0,10 em 12 vezes.
/// Vencimentos em meses-calendário a partir da data da venda; nenhuma
/// parcela vence no próprio dia da venda. Estouro de fim de mês (31/01 + 1
/// mês) trava no último dia válido do mês de destino.
pub fn generate_installments(
    final_amount: Decimal,
    count: i32,
    sale_date: NaiveDate,
) -> Result<Vec<InstallmentDraft>, AppError> {
    if count < 1 {
        return Err(AppError::InvalidArgument(
            "Número de parcelas deve ser no mínimo 1.".to_string(),
        ));
    }
    if final_amount <= Decimal::ZERO {
        return Err(AppError::InvalidArgument(
            "Valor final da venda deve ser positivo.".to_string(),
        ));
    }

    let base_amount = (final_amount / Decimal::from(count))
        .round_dp_with_strategy(2, RoundingStrategy::ToZero);

    let mut installments = Vec::with_capacity(count as usize);
    for number in 1..=count {
        let amount = if number == count {
            final_amount - base_amount * Decimal::from(count - 1)
        } else {
            base_amount
        };

        let due_date = sale_date
            .checked_add_months(Months::new(number as u32))
            .ok_or_else(|| {
                AppError::InvalidArgument("Data de vencimento fora do intervalo suportado.".to_string())
            })?;

        installments.push(InstallmentDraft {
            number,
            amount,
            due_date,
        });
    }

    Ok(installments)
}

#[derive(Clone)]
pub struct SaleService {
    repo: SalesRepository,
}

impl SaleService {
    pub fn new(repo: SalesRepository) -> Self {
        Self { repo }
    }

    /// Cria a venda, o cronograma de parcelas e a baixa de estoque (quando
    /// houver produtos) em uma única transação: ou tudo entra, ou nada.
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
        items: &[SaleItem],
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        // Gera o cronograma antes de abrir a transação: argumentos inválidos
        // são rejeitados sem encostar no banco.
        let installments = generate_installments(final_amount, installment_count, sale_date)?;

        let mut tx = executor.begin().await?;

        if !self.repo.client_exists(&mut *tx, client_id).await? {
            return Err(AppError::NotFound("Cliente".to_string()));
        }

        let sale = self
            .repo
            .create_sale(
                &mut *tx,
                client_id,
                appointment_id,
                kind,
                sale_date,
                total_amount,
                discount,
                final_amount,
                payment_method,
                payment_status,
                installment_count,
                card_fee,
                notes,
            )
            .await?;

        self.repo
            .create_installments(&mut *tx, sale.id, &installments)
            .await?;

        // Baixa de estoque dentro da mesma transação da venda.
        if kind == SaleKind::Product {
            for item in items {
                if item.quantity < 1 {
                    return Err(AppError::InvalidArgument(
                        "Quantidade do item deve ser no mínimo 1.".to_string(),
                    ));
                }
                self.repo
                    .decrement_stock(&mut *tx, item.product_id, item.quantity)
                    .await?;
            }
        }

        tx.commit().await?;

        tracing::info!(
            "Venda {} criada com {} parcela(s)",
            sale.id,
            installment_count
        );

        Ok(sale)
    }

    pub async fn list_sales(&self) -> Result<Vec<Sale>, AppError> {
        self.repo.find_all().await
    }

    pub async fn get_sale(&self, id: Uuid) -> Result<SaleDetail, AppError> {
        let sale = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Venda".to_string()))?;
        let installments = self.repo.find_installments(id).await?;
        Ok(SaleDetail { sale, installments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn splits_1000_in_3_with_exact_sum() {
        let plan = generate_installments(dec("1000.00"), 3, date(2026, 9, 1)).unwrap();

        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0].amount, dec("333.33"));
        assert_eq!(plan[1].amount, dec("333.33"));
        // A última parcela absorve a sobra do truncamento.
        assert_eq!(plan[2].amount, dec("333.34"));

        let total: Decimal = plan.iter().map(|p| p.amount).sum();
        assert_eq!(total, dec("1000.00"));
    }

    #[test]
    fn due_dates_advance_one_month_per_installment() {
        let plan = generate_installments(dec("300.00"), 3, date(2026, 9, 1)).unwrap();

        assert_eq!(plan[0].number, 1);
        assert_eq!(plan[0].due_date, date(2026, 10, 1));
        assert_eq!(plan[1].due_date, date(2026, 11, 1));
        assert_eq!(plan[2].due_date, date(2026, 12, 1));
    }

    #[test]
    fn month_end_overflow_clamps_to_last_valid_day() {
        // 31/01 + 1 mês não existe; trava em 28/02 (ou 29 em bissexto).
        let plan = generate_installments(dec("400.00"), 4, date(2026, 1, 31)).unwrap();

        assert_eq!(plan[0].due_date, date(2026, 2, 28));
        assert_eq!(plan[1].due_date, date(2026, 3, 31));
        assert_eq!(plan[2].due_date, date(2026, 4, 30));
        assert_eq!(plan[3].due_date, date(2026, 5, 31));
    }

    #[test]
    fn year_carries_over_past_december() {
        let plan = generate_installments(dec("600.00"), 6, date(2026, 10, 15)).unwrap();

        assert_eq!(plan[2].due_date, date(2027, 1, 15));
        assert_eq!(plan[5].due_date, date(2027, 4, 15));
    }

    #[test]
    fn single_installment_keeps_full_amount() {
        let plan = generate_installments(dec("157.89"), 1, date(2026, 9, 1)).unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].amount, dec("157.89"));
        assert_eq!(plan[0].due_date, date(2026, 10, 1));
    }

    #[test]
    fn non_positive_count_is_rejected() {
        let err = generate_installments(dec("100.00"), 0, date(2026, 9, 1)).unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));

        let err = generate_installments(dec("100.00"), -3, date(2026, 9, 1)).unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let err = generate_installments(Decimal::ZERO, 2, date(2026, 9, 1)).unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[test]
    fn tiny_amount_split_many_ways_never_goes_negative() {
        // 0,10 em 12 vezes: base trunca para 0,00 e a última parcela
        // carrega os 0,10. Base arredondada para cima geraria última
        // parcela de -0,01.
        let plan = generate_installments(dec("0.10"), 12, date(2026, 9, 1)).unwrap();

        assert_eq!(plan.len(), 12);
        assert!(plan.iter().all(|p| p.amount >= Decimal::ZERO));
        assert_eq!(plan[11].amount, dec("0.10"));

        let total: Decimal = plan.iter().map(|p| p.amount).sum();
        assert_eq!(total, dec("0.10"));
    }

    #[test]
    fn sum_is_exact_for_awkward_divisions() {
        // Divisões que não fecham em 2 casas: a soma tem que bater sempre.
        let cases = [
            ("100.00", 3),
            ("0.01", 2),
            ("999.99", 7),
            ("1234.56", 12),
            ("10.00", 6),
        ];

        for (amount, count) in cases {
            let plan = generate_installments(dec(amount), count, date(2026, 9, 1)).unwrap();
            let total: Decimal = plan.iter().map(|p| p.amount).sum();
            assert_eq!(total, dec(amount), "soma divergente para {amount}/{count}");

            // A base truncada nunca excede a última parcela.
            let base = plan[0].amount;
            assert!(
                plan.iter().all(|p| p.amount >= base),
                "parcela abaixo da base para {amount}/{count}"
            );

            let numbers: Vec<i32> = plan.iter().map(|p| p.number).collect();
            assert_eq!(numbers, (1..=count).collect::<Vec<_>>());
        }
    }
}
