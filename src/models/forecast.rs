// src/models/forecast.rs
//
// Tipos derivados da previsão de entrada (recebíveis). Nada aqui é
// persistido: obrigações são uma visão calculada sob demanda a partir
// dos atendimentos e pacotes vigentes.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Prazo fixo entre a data do evento e o vencimento do pacote:
/// o saldo precisa estar quitado 10 dias antes do evento.
pub const PACKAGE_PAYMENT_LEAD_DAYS: u64 = 10;

/// Largura da faixa do alerta "vencendo em breve" (pacotes com
/// vencimento nos próximos 5 dias, contados a partir do prazo).
pub const DUE_SOON_WINDOW_DAYS: u64 = 5;

// --- Seleção de período ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ForecastPeriod {
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "15d")]
    FifteenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "custom")]
    Custom,
}

impl Default for ForecastPeriod {
    fn default() -> Self {
        ForecastPeriod::SevenDays
    }
}

impl ForecastPeriod {
    /// Quantidade de dias à frente, para os períodos pré-definidos.
    pub fn days(&self) -> Option<u64> {
        match self {
            ForecastPeriod::SevenDays => Some(7),
            ForecastPeriod::FifteenDays => Some(15),
            ForecastPeriod::ThirtyDays => Some(30),
            ForecastPeriod::Custom => None,
        }
    }
}

/// Janela de datas da previsão, com as duas pontas inclusivas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateWindow {
    /// Janela de eventos correspondente. Um pacote com evento em `E` vence
    /// em `E - 10`; para achar pacotes cujo *vencimento* cai na janela,
    /// buscamos eventos em `[início + 10, fim + 10]`.
    pub fn event_window(&self) -> DateWindow {
        let lead = Days::new(PACKAGE_PAYMENT_LEAD_DAYS);
        DateWindow {
            start_date: self.start_date + lead,
            end_date: self.end_date + lead,
        }
    }
}

// --- Obrigações ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ObligationKind {
    Service,
    Package,
}

/// Saldo em aberto de um cliente, já normalizado: as duas origens
/// (atendimento de serviço social e pacote vendido) viram o mesmo
/// formato, distinguidas apenas por `kind`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Obligation {
    pub id: Uuid,
    pub kind: ObligationKind,

    #[schema(example = "Maria Souza")]
    pub client_name: String,
    #[schema(example = "Pacote Debutante")]
    pub description: String,

    /// Serviço: a própria data do atendimento.
    /// Pacote: data do evento menos o prazo de 10 dias.
    #[schema(value_type = String, format = Date, example = "2026-09-10")]
    pub due_date: NaiveDate,

    #[schema(example = "2000.00")]
    pub total_amount: Decimal,
    #[schema(example = "500.00")]
    pub paid_amount: Decimal,
    #[schema(example = "1500.00")]
    pub pending_balance: Decimal,
}

// --- Linhas cruas vindas do banco (entrada do extrator) ---

/// Atendimento de serviço social com possível saldo em aberto.
#[derive(Debug, Clone, FromRow)]
pub struct ServiceReceivable {
    pub id: Uuid,
    pub client_name: String,
    pub appointment_date: NaiveDate,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
}

/// Pacote vendido (ativo) com possível saldo em aberto.
#[derive(Debug, Clone, FromRow)]
pub struct PackageReceivable {
    pub id: Uuid,
    pub client_name: String,
    pub package_name: String,
    pub event_date: NaiveDate,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
}

// --- Relatório ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEntry {
    #[schema(example = 2)]
    pub count: usize,
    #[schema(example = "1600.00")]
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub services: SummaryEntry,
    pub packages: SummaryEntry,
    pub total: SummaryEntry,
}

/// Alertas fixos, independentes do período selecionado.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForecastAlerts {
    pub overdue_count: usize,
    #[schema(example = "200.00")]
    pub overdue_amount: Decimal,
    pub due_soon_count: usize,
    #[schema(example = "1500.00")]
    pub due_soon_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
    pub period: ForecastPeriod,

    #[schema(value_type = String, format = Date)]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub end_date: NaiveDate,

    pub summary: ForecastSummary,

    /// Obrigações com vencimento dentro da janela, ordenadas por data.
    pub upcoming: Vec<Obligation>,
    /// Obrigações vencidas antes de hoje, sem limite de retrocesso.
    pub overdue: Vec<Obligation>,
    /// Pacotes vencendo na faixa fixa dos próximos 5 dias de prazo.
    pub due_soon: Vec<Obligation>,

    pub alerts: ForecastAlerts,
}
