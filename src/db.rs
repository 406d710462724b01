pub mod agenda_repo;
pub mod forecast_repo;
pub mod package_repo;
pub mod sales_repo;

pub use agenda_repo::AgendaRepository;
pub use forecast_repo::ForecastRepository;
pub use package_repo::PackageSalesRepository;
pub use sales_repo::SalesRepository;
