// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{AgendaRepository, ForecastRepository, PackageSalesRepository, SalesRepository},
    services::{AgendaService, ForecastService, PackageSaleService, SaleService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub forecast_service: ForecastService,
    pub sale_service: SaleService,
    pub package_service: PackageSaleService,
    pub agenda_service: AgendaService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let forecast_service = ForecastService::new(ForecastRepository::new());
        let sale_service = SaleService::new(SalesRepository::new(db_pool.clone()));
        let package_service =
            PackageSaleService::new(PackageSalesRepository::new(db_pool.clone()));
        let agenda_service = AgendaService::new(AgendaRepository::new(db_pool.clone()));

        Ok(Self {
            db_pool,
            forecast_service,
            sale_service,
            package_service,
            agenda_service,
        })
    }
}
