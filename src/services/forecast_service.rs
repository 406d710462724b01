// src/services/forecast_service.rs
//
// Motor da previsão de entrada: resolve a janela de datas, normaliza as
// duas origens de recebível (serviço social e pacote) em obrigações e
// classifica tudo em "a vencer", "atrasado" e "vencendo em breve".
//
// Todo o cálculo é puro e recebe `today` injetado; as funções livres
// deste módulo não tocam o banco, o que mantém os testes determinísticos.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use sqlx::{Acquire, Postgres};

use crate::{
    common::error::AppError,
    db::ForecastRepository,
    models::forecast::{
        DateWindow, ForecastAlerts, ForecastPeriod, ForecastReport, ForecastSummary, Obligation,
        ObligationKind, PackageReceivable, ServiceReceivable, SummaryEntry,
        DUE_SOON_WINDOW_DAYS, PACKAGE_PAYMENT_LEAD_DAYS,
    },
};

/// Converte o seletor de período em uma janela concreta, ancorada em `today`
/// (já truncado para o dia) nos casos pré-definidos.
pub fn resolve_window(
    period: ForecastPeriod,
    custom_start: Option<NaiveDate>,
    custom_end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<DateWindow, AppError> {
    match period.days() {
        Some(days) => Ok(DateWindow {
            start_date: today,
            end_date: today + Days::new(days),
        }),
        // Período custom: datas usadas como vieram; uma janela invertida só
        // produz resultado vazio mais adiante, nunca erro.
        None => {
            let (start_date, end_date) = custom_start.zip(custom_end).ok_or_else(|| {
                AppError::InvalidArgument(
                    "Período 'custom' exige startDate e endDate.".to_string(),
                )
            })?;
            Ok(DateWindow {
                start_date,
                end_date,
            })
        }
    }
}

/// Faixa de datas de *evento* do alerta "vencendo em breve": prazos nos
/// próximos 5 dias equivalem a eventos entre `today + 10` e `today + 15`.
pub fn due_soon_event_band(today: NaiveDate) -> DateWindow {
    DateWindow {
        start_date: today + Days::new(PACKAGE_PAYMENT_LEAD_DAYS),
        end_date: today + Days::new(PACKAGE_PAYMENT_LEAD_DAYS + DUE_SOON_WINDOW_DAYS),
    }
}

/// Extrator: atendimentos de serviço social viram obrigações, retidos
/// apenas quando há saldo em aberto (`total > pago`, estrito).
pub fn service_obligations(rows: Vec<ServiceReceivable>) -> Vec<Obligation> {
    rows.into_iter()
        .filter(|r| r.total_amount > r.paid_amount)
        .map(|r| Obligation {
            id: r.id,
            kind: ObligationKind::Service,
            client_name: r.client_name,
            description: "Serviço Social".to_string(),
            // Serviço vence na própria data do atendimento.
            due_date: r.appointment_date,
            pending_balance: r.total_amount - r.paid_amount,
            total_amount: r.total_amount,
            paid_amount: r.paid_amount,
        })
        .collect()
}

/// Extrator: pacotes ativos viram obrigações com vencimento deslocado,
/// retidos apenas quando há saldo em aberto.
pub fn package_obligations(rows: Vec<PackageReceivable>) -> Vec<Obligation> {
    rows.into_iter()
        .filter(|r| r.total_amount > r.paid_amount)
        .map(|r| Obligation {
            id: r.id,
            kind: ObligationKind::Package,
            client_name: r.client_name,
            description: format!("Pacote {}", r.package_name),
            // O pacote deve estar quitado 10 dias antes do evento.
            due_date: r.event_date - Days::new(PACKAGE_PAYMENT_LEAD_DAYS),
            pending_balance: r.total_amount - r.paid_amount,
            total_amount: r.total_amount,
            paid_amount: r.paid_amount,
        })
        .collect()
}

fn summarize(obligations: &[Obligation]) -> SummaryEntry {
    SummaryEntry {
        count: obligations.len(),
        total_amount: obligations.iter().map(|o| o.pending_balance).sum(),
    }
}

/// Agregador: junta as obrigações das duas origens em um relatório único.
/// A ordenação por vencimento é estável; itens com a mesma data preservam
/// a ordem de entrada (serviços antes de pacotes).
pub fn assemble_report(
    period: ForecastPeriod,
    window: DateWindow,
    upcoming_services: Vec<Obligation>,
    upcoming_packages: Vec<Obligation>,
    overdue_services: Vec<Obligation>,
    overdue_packages: Vec<Obligation>,
    due_soon_packages: Vec<Obligation>,
) -> ForecastReport {
    let services_summary = summarize(&upcoming_services);
    let packages_summary = summarize(&upcoming_packages);
    let total = SummaryEntry {
        count: services_summary.count + packages_summary.count,
        total_amount: services_summary.total_amount + packages_summary.total_amount,
    };

    let mut upcoming = upcoming_services;
    upcoming.extend(upcoming_packages);
    upcoming.sort_by_key(|o| o.due_date);

    let mut overdue = overdue_services;
    overdue.extend(overdue_packages);
    overdue.sort_by_key(|o| o.due_date);

    let alerts = ForecastAlerts {
        overdue_count: overdue.len(),
        overdue_amount: overdue.iter().map(|o| o.pending_balance).sum::<Decimal>(),
        due_soon_count: due_soon_packages.len(),
        due_soon_amount: due_soon_packages
            .iter()
            .map(|o| o.pending_balance)
            .sum::<Decimal>(),
    };

    ForecastReport {
        period,
        start_date: window.start_date,
        end_date: window.end_date,
        summary: ForecastSummary {
            services: services_summary,
            packages: packages_summary,
            total,
        },
        upcoming,
        overdue,
        due_soon: due_soon_packages,
        alerts,
    }
}

#[derive(Clone)]
pub struct ForecastService {
    repo: ForecastRepository,
}

impl ForecastService {
    pub fn new(repo: ForecastRepository) -> Self {
        Self { repo }
    }

    /// Monta a previsão de entrada para o período pedido. Leitura pura:
    /// nenhuma escrita, nenhuma coordenação entre chamadas concorrentes.
    pub async fn income_forecast<'a, A>(
        &self,
        conn: A,
        period: ForecastPeriod,
        custom_start: Option<NaiveDate>,
        custom_end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<ForecastReport, AppError>
    where
        A: Acquire<'a, Database = Postgres>,
    {
        let window = resolve_window(period, custom_start, custom_end, today)?;
        let event_window = window.event_window();
        let due_soon_band = due_soon_event_band(today);

        tracing::info!(
            "Previsão de entrada: {} até {}",
            window.start_date,
            window.end_date
        );

        let mut conn = conn.acquire().await?;

        let upcoming_services = service_obligations(
            self.repo
                .service_receivables_between(&mut *conn, window.start_date, window.end_date)
                .await?,
        );
        let upcoming_packages = package_obligations(
            self.repo
                .package_receivables_by_event(
                    &mut *conn,
                    event_window.start_date,
                    event_window.end_date,
                )
                .await?,
        );

        // Atrasados: retrocesso ilimitado, independente da janela pedida.
        let overdue_services = service_obligations(
            self.repo
                .overdue_service_receivables(&mut *conn, today)
                .await?,
        );
        // Prazo vencido antes de hoje <=> evento antes de hoje + 10.
        let overdue_packages = package_obligations(
            self.repo
                .overdue_package_receivables(
                    &mut *conn,
                    today + Days::new(PACKAGE_PAYMENT_LEAD_DAYS),
                )
                .await?,
        );

        let due_soon_packages = package_obligations(
            self.repo
                .package_receivables_by_event(
                    &mut *conn,
                    due_soon_band.start_date,
                    due_soon_band.end_date,
                )
                .await?,
        );

        Ok(assemble_report(
            period,
            window,
            upcoming_services,
            upcoming_packages,
            overdue_services,
            overdue_packages,
            due_soon_packages,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service_row(
        appointment_date: NaiveDate,
        total: &str,
        paid: &str,
    ) -> ServiceReceivable {
        ServiceReceivable {
            id: Uuid::new_v4(),
            client_name: "Maria Souza".to_string(),
            appointment_date,
            total_amount: dec(total),
            paid_amount: dec(paid),
        }
    }

    fn package_row(event_date: NaiveDate, total: &str, paid: &str) -> PackageReceivable {
        PackageReceivable {
            id: Uuid::new_v4(),
            client_name: "Ana Lima".to_string(),
            package_name: "Debutante".to_string(),
            event_date,
            total_amount: dec(total),
            paid_amount: dec(paid),
        }
    }

    #[test]
    fn predefined_periods_anchor_at_today() {
        let today = date(2026, 9, 1);

        let w7 = resolve_window(ForecastPeriod::SevenDays, None, None, today).unwrap();
        assert_eq!(w7.start_date, today);
        assert_eq!(w7.end_date, date(2026, 9, 8));

        let w15 = resolve_window(ForecastPeriod::FifteenDays, None, None, today).unwrap();
        assert_eq!(w15.end_date, date(2026, 9, 16));

        let w30 = resolve_window(ForecastPeriod::ThirtyDays, None, None, today).unwrap();
        assert_eq!(w30.end_date, date(2026, 10, 1));
    }

    #[test]
    fn custom_period_uses_dates_verbatim() {
        let today = date(2026, 9, 1);
        let w = resolve_window(
            ForecastPeriod::Custom,
            Some(date(2026, 1, 10)),
            Some(date(2026, 2, 20)),
            today,
        )
        .unwrap();
        assert_eq!(w.start_date, date(2026, 1, 10));
        assert_eq!(w.end_date, date(2026, 2, 20));
    }

    #[test]
    fn custom_period_without_dates_is_rejected() {
        let today = date(2026, 9, 1);
        let err =
            resolve_window(ForecastPeriod::Custom, Some(date(2026, 1, 10)), None, today)
                .unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[test]
    fn event_window_shifts_both_ends_by_lead_time() {
        let w = DateWindow {
            start_date: date(2026, 9, 1),
            end_date: date(2026, 9, 8),
        };
        let ev = w.event_window();
        assert_eq!(ev.start_date, date(2026, 9, 11));
        assert_eq!(ev.end_date, date(2026, 9, 18));
    }

    #[test]
    fn due_soon_band_covers_events_ten_to_fifteen_days_out() {
        let today = date(2026, 9, 1);
        let band = due_soon_event_band(today);
        assert_eq!(band.start_date, date(2026, 9, 11));
        assert_eq!(band.end_date, date(2026, 9, 16));
    }

    #[test]
    fn fully_paid_records_are_excluded() {
        let d = date(2026, 9, 4);
        let services = service_obligations(vec![
            service_row(d, "150.00", "150.00"),
            service_row(d, "150.00", "50.00"),
        ]);
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].pending_balance, dec("100.00"));

        let packages = package_obligations(vec![package_row(d, "2000.00", "2000.00")]);
        assert!(packages.is_empty());
    }

    #[test]
    fn package_due_date_is_event_minus_lead_time() {
        let obligations = package_obligations(vec![package_row(
            date(2026, 9, 15),
            "2000.00",
            "500.00",
        )]);
        assert_eq!(obligations[0].due_date, date(2026, 9, 5));
        assert_eq!(obligations[0].description, "Pacote Debutante");
    }

    // Cenário: período 7d, serviço em D+3 (150/50) e pacote com evento em
    // D+14 (vence D+4, 2000/500). Resumo: 1600,00 em 2 itens.
    #[test]
    fn seven_day_scenario_buckets_and_totals() {
        let today = date(2026, 9, 1);
        let window = resolve_window(ForecastPeriod::SevenDays, None, None, today).unwrap();

        let services =
            service_obligations(vec![service_row(date(2026, 9, 4), "150.00", "50.00")]);
        let packages =
            package_obligations(vec![package_row(date(2026, 9, 15), "2000.00", "500.00")]);

        let report = assemble_report(
            ForecastPeriod::SevenDays,
            window,
            services,
            packages,
            vec![],
            vec![],
            vec![],
        );

        assert_eq!(report.upcoming.len(), 2);
        assert_eq!(report.upcoming[0].kind, ObligationKind::Service);
        assert_eq!(report.upcoming[0].pending_balance, dec("100.00"));
        assert_eq!(report.upcoming[1].kind, ObligationKind::Package);
        assert_eq!(report.upcoming[1].pending_balance, dec("1500.00"));

        assert_eq!(report.summary.services.count, 1);
        assert_eq!(report.summary.packages.count, 1);
        assert_eq!(report.summary.total.count, 2);
        assert_eq!(report.summary.total.total_amount, dec("1600.00"));
    }

    #[test]
    fn overdue_service_surfaces_regardless_of_window() {
        let today = date(2026, 9, 1);
        let window = resolve_window(ForecastPeriod::SevenDays, None, None, today).unwrap();

        // Atendimento de 5 dias atrás, nada pago.
        let overdue =
            service_obligations(vec![service_row(date(2026, 8, 27), "200.00", "0.00")]);

        let report = assemble_report(
            ForecastPeriod::SevenDays,
            window,
            vec![],
            vec![],
            overdue,
            vec![],
            vec![],
        );

        assert_eq!(report.overdue.len(), 1);
        assert_eq!(report.overdue[0].pending_balance, dec("200.00"));
        assert_eq!(report.alerts.overdue_count, 1);
        assert_eq!(report.alerts.overdue_amount, dec("200.00"));
    }

    #[test]
    fn upcoming_sort_is_stable_for_equal_due_dates() {
        let today = date(2026, 9, 1);
        let window = resolve_window(ForecastPeriod::SevenDays, None, None, today).unwrap();

        // Serviço e pacote vencendo no mesmo dia: serviço entra primeiro
        // e deve permanecer primeiro.
        let services =
            service_obligations(vec![service_row(date(2026, 9, 5), "100.00", "0.00")]);
        let packages =
            package_obligations(vec![package_row(date(2026, 9, 15), "300.00", "0.00")]);

        let report = assemble_report(
            ForecastPeriod::SevenDays,
            window,
            services,
            packages,
            vec![],
            vec![],
            vec![],
        );

        assert_eq!(report.upcoming[0].due_date, report.upcoming[1].due_date);
        assert_eq!(report.upcoming[0].kind, ObligationKind::Service);
        assert_eq!(report.upcoming[1].kind, ObligationKind::Package);
    }

    #[test]
    fn due_soon_alert_totals_pending_balances() {
        let today = date(2026, 9, 1);
        let window = resolve_window(ForecastPeriod::SevenDays, None, None, today).unwrap();

        let due_soon =
            package_obligations(vec![package_row(date(2026, 9, 12), "2000.00", "500.00")]);

        let report = assemble_report(
            ForecastPeriod::SevenDays,
            window,
            vec![],
            vec![],
            vec![],
            vec![],
            due_soon,
        );

        assert_eq!(report.due_soon.len(), 1);
        assert_eq!(report.alerts.due_soon_count, 1);
        assert_eq!(report.alerts.due_soon_amount, dec("1500.00"));
    }
}
